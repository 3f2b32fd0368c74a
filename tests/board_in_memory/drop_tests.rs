//! Optimistic drop tests against the in-memory store.

use super::helpers::{column_id, loaded_board, network_error, task_id};
use rstest::rstest;
use taskboard::board::{
    adapters::memory::StatusUpdateCall,
    domain::Reconciliation,
    services::{DropResolution, IgnoredDrop},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_move_of_task_42_reverts_to_planning() {
    let harness = loaded_board(&[(42, 1), (7, 2)]).await;
    harness.store.fail_next_update(network_error());
    harness.session.begin_drag(42);

    let handle = harness
        .session
        .drop_card(42, Some(3))
        .expect("drop dispatches an update");
    assert_eq!(harness.status_of(42), Some(3), "move shows before the response");

    let result = handle.await.expect("settlement task completes");

    assert_eq!(result, Reconciliation::RolledBack);
    assert_eq!(harness.status_of(42), Some(1));
    assert_eq!(harness.status_of(7), Some(2));
    assert_eq!(harness.notifier.count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn same_column_drop_of_task_7_does_nothing() {
    let harness = loaded_board(&[(42, 1), (7, 2)]).await;
    let before = harness.session.cache().snapshot();
    harness.session.begin_drag(7);

    let resolution = harness.session.drop_card_and_settle(7, Some(2)).await;

    assert_eq!(resolution, DropResolution::Ignored(IgnoredDrop::SameColumn));
    assert_eq!(harness.session.cache().snapshot(), before);
    assert!(harness.store.update_calls().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn successful_move_is_persisted_remotely() {
    let harness = loaded_board(&[(42, 1)]).await;
    harness.session.begin_drag(42);

    let resolution = harness.session.drop_card_and_settle(42, Some(4)).await;

    assert_eq!(resolution, DropResolution::Settled(Reconciliation::Confirmed));
    assert_eq!(harness.status_of(42), Some(4));
    assert_eq!(
        harness.store.update_calls(),
        vec![StatusUpdateCall {
            task_id: task_id(42),
            status_id: column_id(4),
        }]
    );
    assert_eq!(
        harness.store.task(task_id(42)).map(|stored| stored.status_id()),
        Some(column_id(4))
    );
    assert_eq!(harness.notifier.count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_deleted_during_drag_is_ignored() {
    let harness = loaded_board(&[(42, 1)]).await;
    harness.session.begin_drag(42);
    harness.session.cache().remove_task(task_id(42));

    let resolution = harness.session.drop_card_and_settle(42, Some(3)).await;

    assert_eq!(resolution, DropResolution::Ignored(IgnoredDrop::StaleTask));
    assert!(harness.store.update_calls().is_empty());
    assert_eq!(harness.notifier.count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drop_outside_the_board_is_ignored() {
    let harness = loaded_board(&[(42, 1)]).await;
    harness.session.begin_drag(42);

    assert!(harness.session.drop_card(42, None).is_none());
    assert_eq!(harness.status_of(42), Some(1));
    assert_eq!(harness.session.dragged_task(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn no_automatic_retry_after_failure() {
    let harness = loaded_board(&[(42, 1)]).await;
    harness
        .store
        .fail_updates_for(task_id(42), network_error());
    harness.session.begin_drag(42);

    let resolution = harness.session.drop_card_and_settle(42, Some(2)).await;

    assert_eq!(resolution, DropResolution::Settled(Reconciliation::RolledBack));
    assert_eq!(harness.store.update_calls().len(), 1);
}
