use super::*;
use crate::{data::table::ACTIVE_FILE, error::persistence::PersistenceError};

/// Tests the contract when a flush fails.
///
/// Verifies that a join whose write fails is still applied in memory and
/// reported as unpersisted, and that the next successful flush writes it
/// together with the later change.
///
/// Expected: Write error, then both players on disk after recovery
#[tokio::test]
async fn failed_flush_keeps_change_for_next_save() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;
    let id = store.create(draft(4)).await.unwrap().value.id;

    // A directory in place of the document makes the final rename fail.
    let active_path = test.file_path(ACTIVE_FILE);
    std::fs::remove_file(&active_path)?;
    std::fs::create_dir(&active_path)?;

    let committed = store.join(&id, 1).await.unwrap();

    assert!(!committed.is_persisted());
    assert!(matches!(
        committed.flush,
        Err(PersistenceError::Write { ref path, .. }) if *path == active_path
    ));
    assert_eq!(store.get(&id).await.unwrap().players, vec![1]);
    assert_eq!(test.file_names()?, vec![ACTIVE_FILE.to_string()]);

    std::fs::remove_dir(&active_path)?;
    let committed = store.join(&id, 2).await.unwrap();

    assert!(committed.is_persisted());
    assert_eq!(
        test.read_active()?[&id].players,
        vec!["1".to_string(), "2".to_string()]
    );
    Ok(())
}

/// Tests that the lock registry does not grow with tables that can't change.
///
/// Expected: no locks left after archiving and after touching an unknown id
#[tokio::test]
async fn locks_are_released_for_inactive_tables() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;
    let id = store.create(draft(2)).await.unwrap().value.id;
    store.join(&id, 1).await.unwrap();
    assert_eq!(store.lock_count().await, 1);

    store.archive(&id, ArchiveReason::Owner, Some(GM)).await.unwrap();
    assert_eq!(store.lock_count().await, 0);

    assert!(store.join(&id, 2).await.is_err());
    assert!(store.leave("no-such-table", 1).await.is_err());
    assert_eq!(store.lock_count().await, 0);
    Ok(())
}
