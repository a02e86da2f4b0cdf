use super::*;

/// Tests that edits are applied and persisted.
///
/// Expected: Ok with changed fields on disk
#[tokio::test]
async fn edit_updates_fields() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;
    let id = store.create(draft(2)).await.unwrap().value.id;

    let (table, promoted) = store
        .edit(
            &id,
            UpdateTableParams {
                schedule: Some("Sunday 18:00".to_string()),
                max_players: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .value;

    assert!(promoted.is_empty());
    assert_eq!(table.schedule, "Sunday 18:00");
    assert_eq!(table.max_players, 5);
    assert_eq!(test.read_active()?[&id].schedule, "Sunday 18:00");
    Ok(())
}

/// Tests that the cap can't be lowered below the roster.
///
/// Verifies that nobody is dropped and nothing else changes.
///
/// Expected: Validation error, roster untouched
#[tokio::test]
async fn edit_below_roster_is_rejected() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;
    let id = store.create(draft(3)).await.unwrap().value.id;
    for user in [1, 2, 3] {
        store.join(&id, user).await.unwrap();
    }

    let err = table_err(
        store
            .edit(
                &id,
                UpdateTableParams {
                    max_players: Some(2),
                    ..Default::default()
                },
            )
            .await,
    );

    assert!(matches!(err, TableError::Validation(_)));
    let table = store.get(&id).await.unwrap();
    assert_eq!(table.players, vec![1, 2, 3]);
    assert_eq!(table.max_players, 3);
    Ok(())
}

/// Tests that raising the cap promotes waiting users.
///
/// Expected: promoted users reported in FIFO order
#[tokio::test]
async fn edit_raising_cap_promotes() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;
    let id = store.create(draft(1)).await.unwrap().value.id;
    for user in [1, 2, 3] {
        store.join(&id, user).await.unwrap();
    }

    let (table, promoted) = store
        .edit(
            &id,
            UpdateTableParams {
                max_players: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .value;

    assert_eq!(promoted, vec![2]);
    assert_eq!(table.waiting_list, vec![3]);
    Ok(())
}

#[tokio::test]
async fn attach_message_records_id() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;
    let id = store.create(draft(2)).await.unwrap().value.id;

    store.attach_message(&id, 1234).await.unwrap();

    assert_eq!(store.get(&id).await.unwrap().message_id, Some(1234));
    assert_eq!(test.read_active()?[&id].message_id.as_deref(), Some("1234"));
    Ok(())
}
