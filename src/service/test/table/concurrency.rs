use super::*;
use std::time::Duration;

/// Tests concurrent joins on a one-seat table.
///
/// Verifies that with many simultaneous sign-ups exactly one user gets the
/// seat and everyone else lands on the waiting list exactly once.
///
/// Expected: one Joined, the rest Waitlisted, no duplicates on disk
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_joins_fill_one_seat() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;
    let id = store.create(draft(1)).await.unwrap().value.id;

    let handles: Vec<_> = (1..=16u64)
        .map(|user| {
            let store = store.clone();
            let id = id.clone();
            tokio::spawn(async move { store.join(&id, user).await.unwrap().value.0 })
        })
        .collect();

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap());
    }

    let joined = outcomes
        .iter()
        .filter(|o| **o == JoinOutcome::Joined)
        .count();
    assert_eq!(joined, 1);

    let table = store.get(&id).await.unwrap();
    assert_eq!(table.players.len(), 1);
    assert_eq!(table.waiting_list.len(), 15);

    let on_disk = &test.read_active()?[&id];
    let mut everyone: Vec<String> = on_disk
        .players
        .iter()
        .chain(on_disk.waiting_list.iter())
        .cloned()
        .collect();
    everyone.sort();
    everyone.dedup();
    assert_eq!(everyone.len(), 16);
    Ok(())
}

/// Tests that a dropped caller can't leave a mutation unpersisted.
///
/// Verifies that a join whose caller gives up right after the first poll still
/// runs to completion and reaches disk.
///
/// Expected: the join shows up in the active document
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dropped_caller_still_persists() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = open_store(&test).await;
    let id = store.create(draft(3)).await.unwrap().value.id;

    let _ = tokio::time::timeout(Duration::from_nanos(1), store.join(&id, 1)).await;

    let mut persisted = false;
    for _ in 0..200 {
        if test.read_active()?[&id].players.contains(&"1".to_string()) {
            persisted = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(persisted);
    assert_eq!(store.get(&id).await.unwrap().players, vec![1]);
    Ok(())
}
