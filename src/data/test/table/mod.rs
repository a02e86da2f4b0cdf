use crate::{
    data::table::{to_document, TableRepository, TablesSnapshot, ACTIVE_FILE, ARCHIVED_FILE},
    error::persistence::PersistenceError,
};
use entity::prelude::{ArchiveReason, TableStatus};
use test_utils::{builder::TestBuilder, error::TestError, factory::table::TableRecordFactory};

mod load;
mod save;
