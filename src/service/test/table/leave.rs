use super::*;

/// Tests the full sign-up scenario with promotion.
///
/// Verifies that with two seats, after A and B join and C is waitlisted, A
/// leaving promotes C and empties the waiting list, both in memory and on disk.
///
/// Expected: players [B, C], waiting list empty
#[tokio::test]
async fn leave_promotes_first_waiting() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;
    let id = store.create(draft(2)).await.unwrap().value.id;
    let (a, b, c) = (11, 12, 13);

    store.join(&id, a).await.unwrap();
    store.join(&id, b).await.unwrap();
    store.join(&id, c).await.unwrap();
    let (outcome, table) = store.leave(&id, a).await.unwrap().value;

    assert_eq!(outcome, LeaveOutcome::Left { promoted: Some(c) });
    assert_eq!(table.players, vec![b, c]);
    assert!(table.waiting_list.is_empty());

    let active = test.read_active()?;
    assert_eq!(active[&id].players, vec!["12".to_string(), "13".to_string()]);
    assert!(active[&id].waiting_list.is_empty());
    Ok(())
}

#[tokio::test]
async fn leave_from_waitlist() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;
    let id = store.create(draft(1)).await.unwrap().value.id;
    store.join(&id, 1).await.unwrap();
    store.join(&id, 2).await.unwrap();

    let (outcome, table) = store.leave(&id, 2).await.unwrap().value;

    assert_eq!(outcome, LeaveOutcome::LeftWaitlist);
    assert_eq!(table.players, vec![1]);
    Ok(())
}

#[tokio::test]
async fn leave_without_signup_is_rejected() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;
    let id = store.create(draft(2)).await.unwrap().value.id;

    assert_eq!(table_err(store.leave(&id, 5).await), TableError::NotMember);
    Ok(())
}
