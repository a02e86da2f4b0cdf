use super::*;
use crate::data::table::write_atomic;
use std::io::Write;

/// Tests that save followed by load returns identical collections.
///
/// Expected: Ok with tables equal to the ones that were saved
#[tokio::test]
async fn save_then_load_round_trips() -> Result<(), TestError> {
    let (active_id, active) = TableRecordFactory::new()
        .players(["1", "2"])
        .waiting_list(["3"])
        .build();
    let (archived_id, archived) = TableRecordFactory::new()
        .archived(ArchiveReason::NoAccess)
        .build();
    let seeded = TestBuilder::new()
        .with_active(active_id.clone(), active)
        .with_archived(archived_id, archived)
        .build()?;
    let stored = TableRepository::new(seeded.path()).load().await.unwrap();

    let test = TestBuilder::new().build()?;
    let repo = TableRepository::new(test.path());
    repo.save(TablesSnapshot {
        active: Some(to_document(stored.active.values())),
        archived: Some(to_document(stored.archived.values())),
    })
    .await
    .unwrap();

    let reloaded = repo.load().await.unwrap();
    assert_eq!(reloaded.active, stored.active);
    assert_eq!(reloaded.archived, stored.archived);
    Ok(())
}

/// Tests that a snapshot without an archived document leaves that file alone.
///
/// Expected: only the active file is written
#[tokio::test]
async fn save_skips_unselected_document() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let repo = TableRepository::new(test.path());

    repo.save(TablesSnapshot {
        active: Some(Default::default()),
        archived: None,
    })
    .await
    .unwrap();

    assert_eq!(test.file_names()?, vec![ACTIVE_FILE.to_string()]);
    Ok(())
}

/// Tests crash safety of the atomic write.
///
/// Verifies that a write failing midway keeps the previous document loadable
/// and removes its temporary file.
///
/// Expected: previous content intact, no `.tables_` file left behind
#[tokio::test]
async fn interrupted_write_keeps_previous_document() -> Result<(), TestError> {
    let (id, record) = TableRecordFactory::new().players(["5"]).build();
    let test = TestBuilder::new().with_active(id.clone(), record).build()?;
    let before = test.read_active()?;

    let result = write_atomic(&test.file_path(ACTIVE_FILE), |file| {
        file.write_all(b"{ \"partial\": ")?;
        Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        ))
    });

    assert!(matches!(result, Err(PersistenceError::Write { .. })));
    assert_eq!(test.read_active()?, before);
    assert_eq!(test.file_names()?, vec![ACTIVE_FILE.to_string()]);

    let stored = TableRepository::new(test.path()).load().await.unwrap();
    assert_eq!(stored.active[&id].players, vec![5]);
    Ok(())
}

/// Tests that saving into a missing directory creates it.
///
/// Expected: Ok and both files present
#[tokio::test]
async fn save_creates_data_directory() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let nested = test.file_path("nested");
    let repo = TableRepository::new(&nested);

    repo.save(TablesSnapshot {
        active: Some(Default::default()),
        archived: Some(Default::default()),
    })
    .await
    .unwrap();

    assert!(nested.join(ACTIVE_FILE).exists());
    assert!(nested.join(ARCHIVED_FILE).exists());
    Ok(())
}
