use super::*;

/// Tests joining until the table is full and beyond.
///
/// Expected: Joined, Joined, Waitlisted on a two-seat table
#[tokio::test]
async fn join_fills_then_waitlists() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;
    let id = store.create(draft(2)).await.unwrap().value.id;

    assert_eq!(store.join(&id, 1).await.unwrap().value.0, JoinOutcome::Joined);
    assert_eq!(store.join(&id, 2).await.unwrap().value.0, JoinOutcome::Joined);
    let (outcome, table) = store.join(&id, 3).await.unwrap().value;

    assert_eq!(outcome, JoinOutcome::Waitlisted);
    assert_eq!(table.players, vec![1, 2]);
    assert_eq!(table.waiting_list, vec![3]);

    let active = test.read_active()?;
    assert_eq!(active[&id].waiting_list, vec!["3".to_string()]);
    Ok(())
}

/// Tests the duplicate guard.
///
/// Verifies that a repeated join is rejected without changing the table.
///
/// Expected: AlreadyJoined, table unchanged
#[tokio::test]
async fn rejoin_is_rejected() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;
    let id = store.create(draft(3)).await.unwrap().value.id;
    store.join(&id, 1).await.unwrap();
    let before = store.get(&id).await.unwrap();

    assert_eq!(table_err(store.join(&id, 1).await), TableError::AlreadyJoined);
    assert_eq!(store.get(&id).await.unwrap(), before);
    Ok(())
}

#[tokio::test]
async fn gm_cannot_join() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;
    let id = store.create(draft(3)).await.unwrap().value.id;

    assert_eq!(table_err(store.join(&id, GM).await), TableError::OwnTable);
    Ok(())
}

#[tokio::test]
async fn join_unknown_table_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;

    assert!(matches!(
        table_err(store.join("nope", 1).await),
        TableError::NotFound(_)
    ));
    Ok(())
}

/// Tests that buttons on tables loaded from disk keep working.
///
/// Expected: Ok joining a table seeded before the store opened
#[tokio::test]
async fn join_table_loaded_from_disk() -> Result<(), TestError> {
    let (id, record) = TableRecordFactory::new()
        .max_players(1)
        .players(["1"])
        .build();
    let test = TestBuilder::new().with_active(id.clone(), record).build()?;
    let store = open_store(&test).await;

    let (outcome, _) = store.join(&id, 2).await.unwrap().value;

    assert_eq!(outcome, JoinOutcome::Waitlisted);
    Ok(())
}
