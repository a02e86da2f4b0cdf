use super::*;

/// Tests channel-scoped listing.
///
/// Verifies that only active tables from the channel are listed, sorted by
/// schedule text.
///
/// Expected: two tables in schedule order
#[tokio::test]
async fn lists_channel_tables_by_schedule() -> Result<(), TestError> {
    let (late_id, late) = TableRecordFactory::new()
        .channel_id("10")
        .schedule("Saturday")
        .build();
    let (early_id, early) = TableRecordFactory::new()
        .channel_id("10")
        .schedule("Monday")
        .build();
    let (other_id, other) = TableRecordFactory::new().channel_id("11").build();
    let (old_id, old) = TableRecordFactory::new()
        .channel_id("10")
        .archived(ArchiveReason::Owner)
        .build();
    let test = TestBuilder::new()
        .with_active(late_id.clone(), late)
        .with_active(early_id.clone(), early)
        .with_active(other_id, other)
        .with_archived(old_id, old)
        .build()?;
    let store = open_store(&test).await;

    let ids: Vec<String> = store
        .list_for(&ListScope::Channel(10))
        .await
        .into_iter()
        .map(|t| t.id)
        .collect();

    assert_eq!(ids, vec![early_id, late_id]);
    Ok(())
}

/// Tests DM-scoped listing.
///
/// Verifies that a user sees tables they are part of plus tables in channels
/// the caller marked visible, and nothing else.
///
/// Expected: the joined table and the visible-channel table
#[tokio::test]
async fn lists_direct_scope() -> Result<(), TestError> {
    let (joined_id, joined) = TableRecordFactory::new()
        .channel_id("20")
        .schedule("A")
        .waiting_list(["5"])
        .build();
    let (visible_id, visible) = TableRecordFactory::new()
        .channel_id("21")
        .schedule("B")
        .build();
    let (hidden_id, hidden) = TableRecordFactory::new().channel_id("22").build();
    let test = TestBuilder::new()
        .with_active(joined_id.clone(), joined)
        .with_active(visible_id.clone(), visible)
        .with_active(hidden_id, hidden)
        .build()?;
    let store = open_store(&test).await;

    let scope = ListScope::Direct {
        user_id: 5,
        visible_channel_ids: HashSet::from([21]),
    };
    let ids: Vec<String> = store
        .list_for(&scope)
        .await
        .into_iter()
        .map(|t| t.id)
        .collect();

    assert_eq!(ids, vec![joined_id, visible_id]);
    Ok(())
}

/// Tests the per-user table overview.
///
/// Expected: each table with the user's role
#[tokio::test]
async fn tables_for_user_reports_roles() -> Result<(), TestError> {
    let (gm_id, gm) = TableRecordFactory::new().gm_id("5").schedule("1").build();
    let (player_id, player) = TableRecordFactory::new()
        .players(["5"])
        .schedule("2")
        .build();
    let (waiting_id, waiting) = TableRecordFactory::new()
        .max_players(1)
        .players(["6"])
        .waiting_list(["5"])
        .schedule("3")
        .build();
    let (other_id, other) = TableRecordFactory::new().build();
    let test = TestBuilder::new()
        .with_active(gm_id.clone(), gm)
        .with_active(player_id.clone(), player)
        .with_active(waiting_id.clone(), waiting)
        .with_active(other_id, other)
        .build()?;
    let store = open_store(&test).await;

    let roles: Vec<(String, TableRole)> = store
        .tables_for_user(5)
        .await
        .into_iter()
        .map(|(t, role)| (t.id, role))
        .collect();

    assert_eq!(
        roles,
        vec![
            (gm_id, TableRole::Gm),
            (player_id, TableRole::Player),
            (waiting_id, TableRole::Waiting),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn active_channel_ids_ignore_archived() -> Result<(), TestError> {
    let (a_id, a) = TableRecordFactory::new().channel_id("30").build();
    let (b_id, b) = TableRecordFactory::new()
        .channel_id("31")
        .archived(ArchiveReason::Kick)
        .build();
    let test = TestBuilder::new()
        .with_active(a_id, a)
        .with_archived(b_id, b)
        .build()?;
    let store = open_store(&test).await;

    assert_eq!(store.active_channel_ids().await, HashSet::from([30]));
    assert_eq!(store.active_tables().await.len(), 1);
    Ok(())
}
