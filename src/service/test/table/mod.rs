use crate::{
    data::table::TableRepository,
    error::{table::TableError, AppError},
    model::table::{
        CreateTableParams, JoinOutcome, LeaveOutcome, ListScope, TableDraft, TableRole,
        UpdateTableParams,
    },
    service::table::TableStore,
};
use entity::prelude::{ArchiveReason, TableStatus};
use std::collections::HashSet;
use test_utils::{
    builder::TestBuilder, context::TestContext, error::TestError,
    factory::table::TableRecordFactory,
};

mod archive;
mod concurrency;
mod create;
mod edit;
mod join;
mod leave;
mod list;
mod persistence;

/// GM used by `draft`.
const GM: u64 = 9000;

/// Opens a store over the test directory.
async fn open_store(test: &TestContext) -> TableStore {
    TableStore::open(TableRepository::new(test.path()))
        .await
        .unwrap()
}

/// Builds a draft in channel 500 of guild 700.
fn draft(max_players: u32) -> TableDraft {
    TableDraft::new(CreateTableParams {
        system: "Mothership".to_string(),
        schedule: "Friday 20:00".to_string(),
        max_players,
        info: "Horror in space".to_string(),
        gm_id: GM,
        channel_id: 500,
        guild_id: Some(700),
    })
    .unwrap()
}

/// Extracts the table error from a store result.
fn table_err<T: std::fmt::Debug>(result: Result<T, AppError>) -> TableError {
    match result {
        Err(AppError::TableErr(e)) => e,
        other => panic!("expected table error, got {other:?}"),
    }
}
