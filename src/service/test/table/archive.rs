use super::*;

/// Tests archiving a table.
///
/// Verifies that the table moves to the archived document with its reason and
/// archiver, and disappears from the active document.
///
/// Expected: Ok with both documents updated
#[tokio::test]
async fn archive_moves_table() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;
    let id = store.create(draft(2)).await.unwrap().value.id;

    let table = store
        .archive(&id, ArchiveReason::Owner, Some(GM))
        .await
        .unwrap()
        .value;

    assert_eq!(table.status, TableStatus::Archived);
    assert_eq!(table.archived_by, Some(GM));
    assert!(table.archived_at.is_some());
    assert!(!test.read_active()?.contains_key(&id));
    assert_eq!(
        test.read_archived()?[&id].archive_reason,
        Some(ArchiveReason::Owner)
    );
    Ok(())
}

/// Tests that archiving is irreversible.
///
/// Expected: Archived error for join, leave, edit, attach and a second archive
#[tokio::test]
async fn archived_table_rejects_changes() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;
    let id = store.create(draft(2)).await.unwrap().value.id;
    store.join(&id, 1).await.unwrap();
    store.archive(&id, ArchiveReason::Mod, Some(42)).await.unwrap();

    let archived = TableError::Archived(id.clone());
    assert_eq!(table_err(store.join(&id, 2).await), archived);
    assert_eq!(table_err(store.leave(&id, 1).await), archived);
    assert_eq!(
        table_err(store.edit(&id, UpdateTableParams::default()).await),
        archived
    );
    assert_eq!(table_err(store.attach_message(&id, 3).await), archived);
    assert_eq!(
        table_err(store.archive(&id, ArchiveReason::Owner, None).await),
        archived
    );
    assert_eq!(store.get(&id).await.unwrap().status, TableStatus::Archived);
    Ok(())
}

/// Tests bulk archiving by channel.
///
/// Verifies that only tables in the matching channel are archived with the
/// given reason.
///
/// Expected: one table archived, the other still active
#[tokio::test]
async fn archive_where_matches_predicate() -> Result<(), TestError> {
    let (gone_id, gone) = TableRecordFactory::new().channel_id("600").build();
    let (kept_id, kept) = TableRecordFactory::new().channel_id("601").build();
    let test = TestBuilder::new()
        .with_active(gone_id.clone(), gone)
        .with_active(kept_id.clone(), kept)
        .build()?;
    let store = open_store(&test).await;

    let archived = store
        .archive_where(|t| t.channel_id == 600, ArchiveReason::Kick)
        .await
        .unwrap()
        .value;

    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0].id, gone_id);
    assert_eq!(archived[0].archive_reason, Some(ArchiveReason::Kick));
    assert_eq!(archived[0].archived_by, None);
    assert!(store.get(&kept_id).await.unwrap().is_active());
    assert!(test.read_archived()?.contains_key(&gone_id));
    Ok(())
}

/// Tests that a bulk archive matching nothing writes nothing.
///
/// Expected: empty result and no documents created
#[tokio::test]
async fn archive_where_without_match_skips_flush() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;

    let committed = store
        .archive_where(|t| t.guild_id == Some(1), ArchiveReason::Kick)
        .await
        .unwrap();

    assert!(committed.value.is_empty());
    assert!(test.file_names()?.is_empty());
    Ok(())
}
