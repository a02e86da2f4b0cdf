use super::*;

/// Tests loading from a directory with no documents.
///
/// Verifies that missing files are treated as empty collections rather than
/// an error, which is the state of a fresh install.
///
/// Expected: Ok with both collections empty
#[tokio::test]
async fn missing_files_load_as_empty() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let repo = TableRepository::new(test.path());

    let stored = repo.load().await.unwrap();

    assert!(stored.active.is_empty());
    assert!(stored.archived.is_empty());
    Ok(())
}

/// Tests loading seeded active and archived records.
///
/// Verifies that ids are parsed into the domain model and lists keep their order.
///
/// Expected: Ok with one table in each collection
#[tokio::test]
async fn loads_both_documents() -> Result<(), TestError> {
    let (active_id, active) = TableRecordFactory::new()
        .players(["11", "12"])
        .waiting_list(["13"])
        .message_id("42")
        .build();
    let (archived_id, archived) = TableRecordFactory::new()
        .archived(ArchiveReason::Owner)
        .build();
    let test = TestBuilder::new()
        .with_active(active_id.clone(), active)
        .with_archived(archived_id.clone(), archived)
        .build()?;

    let stored = TableRepository::new(test.path()).load().await.unwrap();

    let table = &stored.active[&active_id];
    assert_eq!(table.players, vec![11, 12]);
    assert_eq!(table.waiting_list, vec![13]);
    assert_eq!(table.message_id, Some(42));
    assert_eq!(
        stored.archived[&archived_id].archive_reason,
        Some(ArchiveReason::Owner)
    );
    Ok(())
}

/// Tests that a malformed document is reported as corrupt.
///
/// Verifies that the error names the offending file and that the file is left
/// untouched for manual repair.
///
/// Expected: Err(PersistenceError::Corrupt) for the active path
#[tokio::test]
async fn malformed_document_is_corrupt() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_raw_file(ACTIVE_FILE, "{ \"abc\": ")
        .build()?;
    let repo = TableRepository::new(test.path());

    let err = repo.load().await.unwrap_err();

    match &err {
        PersistenceError::Corrupt { path, .. } => assert_eq!(path, &test.file_path(ACTIVE_FILE)),
        other => panic!("expected Corrupt, got {other:?}"),
    }
    assert!(err.is_corrupt());
    assert_eq!(
        std::fs::read_to_string(test.file_path(ACTIVE_FILE))?,
        "{ \"abc\": "
    );
    Ok(())
}

/// Tests that a record with an unparsable snowflake is rejected.
///
/// Expected: Err(PersistenceError::InvalidRecord) naming the table
#[tokio::test]
async fn invalid_snowflake_is_rejected() -> Result<(), TestError> {
    let (id, record) = TableRecordFactory::new().gm_id("not-a-user").build();
    let test = TestBuilder::new().with_active(id.clone(), record).build()?;

    let err = TableRepository::new(test.path()).load().await.unwrap_err();

    assert!(
        matches!(err, PersistenceError::InvalidRecord { ref table_id, .. } if *table_id == id)
    );
    Ok(())
}

/// Tests normalisation of records whose status disagrees with their document.
///
/// Verifies that a table listed in both documents survives only as archived and
/// that archive metadata on an active record is dropped.
///
/// Expected: Ok with the duplicate only in the archived collection
#[tokio::test]
async fn normalises_status_and_duplicates() -> Result<(), TestError> {
    let (dup_id, dup) = TableRecordFactory::new().build();
    let (odd_id, odd) = TableRecordFactory::new()
        .archived(ArchiveReason::Mod)
        .build();
    let (_, dup_archived) = TableRecordFactory::new()
        .id(dup_id.clone())
        .archived(ArchiveReason::Kick)
        .build();
    let test = TestBuilder::new()
        .with_active(dup_id.clone(), dup)
        .with_active(odd_id.clone(), odd)
        .with_archived(dup_id.clone(), dup_archived)
        .build()?;

    let stored = TableRepository::new(test.path()).load().await.unwrap();

    assert!(!stored.active.contains_key(&dup_id));
    assert_eq!(stored.archived[&dup_id].status, TableStatus::Archived);

    let odd = &stored.active[&odd_id];
    assert_eq!(odd.status, TableStatus::Active);
    assert_eq!(odd.archive_reason, None);
    Ok(())
}

/// Tests that an empty file is not mistaken for an empty collection.
///
/// Expected: Err(PersistenceError::Corrupt) for the archived path
#[tokio::test]
async fn whitespace_file_is_corrupt() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_raw_file(ARCHIVED_FILE, "\n")
        .build()?;

    let err = TableRepository::new(test.path()).load().await.unwrap_err();

    assert!(
        matches!(err, PersistenceError::Corrupt { ref path, .. } if *path == test.file_path(ARCHIVED_FILE))
    );
    Ok(())
}

/// Tests that records breaking roster invariants are rejected.
///
/// Verifies an over-capacity roster, a user on both lists, a duplicate seat,
/// the GM seated at their own table and a zero cap each fail the load.
///
/// Expected: Err(PersistenceError::InvalidRecord) for every record
#[tokio::test]
async fn inconsistent_roster_is_rejected() -> Result<(), TestError> {
    let broken = [
        TableRecordFactory::new()
            .max_players(1)
            .players(["1", "2"])
            .build(),
        TableRecordFactory::new()
            .players(["1"])
            .waiting_list(["1"])
            .build(),
        TableRecordFactory::new().players(["3", "3"]).build(),
        TableRecordFactory::new().waiting_list(["9000"]).build(),
        TableRecordFactory::new().max_players(0).build(),
    ];

    for (id, record) in broken {
        let test = TestBuilder::new().with_active(id.clone(), record).build()?;

        let err = TableRepository::new(test.path()).load().await.unwrap_err();

        assert!(
            matches!(err, PersistenceError::InvalidRecord { ref table_id, .. } if *table_id == id)
        );
        assert!(err.is_corrupt());
    }
    Ok(())
}
