use super::*;

/// Tests creating a table from a draft.
///
/// Verifies that the table is stored as active, written to the active
/// document, and that the archived document is not touched.
///
/// Expected: Ok with the table persisted
#[tokio::test]
async fn creates_and_persists_table() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;

    let draft = draft(4).with_message_id(77);
    let id = draft.id().to_string();
    let committed = store.create(draft).await.unwrap();

    assert!(committed.is_persisted());
    assert_eq!(committed.value.id, id);
    assert_eq!(committed.value.message_id, Some(77));
    assert_eq!(store.get(&id).await.unwrap().status, TableStatus::Active);

    let active = test.read_active()?;
    assert_eq!(active[&id].message_id.as_deref(), Some("77"));
    assert!(!test.file_path("tables_archived.json").exists());
    Ok(())
}

/// Tests that a created table survives reopening the store.
///
/// Expected: the reloaded table equals the created one
#[tokio::test]
async fn created_table_survives_restart() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;

    let created = store.create(draft(2)).await.unwrap().value;
    store.join(&created.id, 1).await.unwrap();
    drop(store);

    let reopened = open_store(&test).await;
    let table = reopened.get(&created.id).await.unwrap();
    assert_eq!(table.players, vec![1]);
    assert_eq!(table.system, created.system);
    Ok(())
}

#[tokio::test]
async fn get_unknown_table_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;

    assert_eq!(
        store.get("missing").await,
        Err(TableError::NotFound("missing".to_string()))
    );
    Ok(())
}
