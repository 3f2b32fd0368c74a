//! Overlapping drops and late responses.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::helpers::{COLUMNS, PROJECT, column_id, loaded_board, network_error, task, task_id};
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::rstest;
use taskboard::board::{
    adapters::memory::{InMemoryTaskStore, RecordingNotifier},
    domain::{BoardColumn, BoardTask, ColumnId, ProjectId, Reconciliation, TaskId},
    ports::{RemoteStoreError, RemoteStoreResult, RemoteTaskStore},
    services::{BoardSession, DropOutcome},
};
use tokio::sync::{mpsc, oneshot};

/// Store whose status updates block until the test releases them, keyed by
/// the requested column.
struct GatedStore {
    inner: InMemoryTaskStore,
    gates: Mutex<HashMap<ColumnId, oneshot::Receiver<RemoteStoreResult<()>>>>,
    started: mpsc::UnboundedSender<ColumnId>,
}

#[async_trait]
impl RemoteTaskStore for GatedStore {
    async fn fetch_columns(&self) -> RemoteStoreResult<Vec<BoardColumn>> {
        self.inner.fetch_columns().await
    }

    async fn fetch_tasks(&self, project_id: ProjectId) -> RemoteStoreResult<Vec<BoardTask>> {
        self.inner.fetch_tasks(project_id).await
    }

    async fn update_task_status(
        &self,
        task_id: TaskId,
        status_id: ColumnId,
    ) -> RemoteStoreResult<()> {
        let gate = self
            .gates
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(&status_id);
        let _ = self.started.send(status_id);
        if let Some(release) = gate {
            release.await.map_err(RemoteStoreError::transport)??;
        }
        self.inner.update_task_status(task_id, status_id).await
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_drops_of_different_tasks_are_independent() {
    let harness = loaded_board(&[(42, 1), (7, 2)]).await;
    harness
        .store
        .fail_updates_for(task_id(42), network_error());
    let reconciler = harness.session.reconciler();

    let failing = reconciler
        .handle_drop(task_id(42), Some(column_id(3)))
        .expect("drop of 42 dispatches");
    let succeeding = reconciler
        .handle_drop(task_id(7), Some(column_id(4)))
        .expect("drop of 7 dispatches");

    let (failed, succeeded) = tokio::join!(failing, succeeding);

    assert_eq!(failed.expect("task completes"), Reconciliation::RolledBack);
    assert_eq!(succeeded.expect("task completes"), Reconciliation::Confirmed);
    assert_eq!(harness.status_of(42), Some(1));
    assert_eq!(harness.status_of(7), Some(4));
    assert_eq!(harness.notifier.count(), 1);
}

#[rstest]
#[case(false, Some(3))]
#[case(true, Some(2))]
#[tokio::test(flavor = "multi_thread")]
async fn earlier_response_never_overrides_a_later_drag(
    #[case] second_fails: bool,
    #[case] expected_status: Option<u64>,
) {
    let harness = loaded_board(&[(42, 1)]).await;
    harness.store.fail_next_update(network_error());
    if second_fails {
        harness.store.fail_next_update(network_error());
    }
    let reconciler = harness.session.reconciler();

    let DropOutcome::Pending(first) = reconciler.begin_drop(task_id(42), Some(column_id(2))) else {
        panic!("first drop should be pending");
    };
    let DropOutcome::Pending(second) = reconciler.begin_drop(task_id(42), Some(column_id(3))) else {
        panic!("second drop should be pending");
    };

    assert_eq!(reconciler.settle(first).await, Reconciliation::Superseded);
    assert_eq!(harness.status_of(42), Some(3));

    let expected = if second_fails {
        Reconciliation::RolledBack
    } else {
        Reconciliation::Confirmed
    };
    assert_eq!(reconciler.settle(second).await, expected);
    assert_eq!(harness.status_of(42), expected_status);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn response_after_refresh_is_ignored() {
    let harness = loaded_board(&[(42, 1)]).await;
    harness.store.fail_next_update(network_error());
    let reconciler = harness.session.reconciler();
    let DropOutcome::Pending(pending) = reconciler.begin_drop(task_id(42), Some(column_id(2))) else {
        panic!("drop should be pending");
    };

    harness.session.refresh().await.expect("board refreshes");
    let result = reconciler.settle(pending).await;

    assert_eq!(result, Reconciliation::Superseded);
    assert_eq!(harness.status_of(42), Some(1), "refetched state stands");
    assert_eq!(harness.notifier.count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn response_after_close_is_a_safe_no_op() {
    let harness = loaded_board(&[(42, 1)]).await;
    let reconciler = harness.session.reconciler();
    let DropOutcome::Pending(pending) = reconciler.begin_drop(task_id(42), Some(column_id(2))) else {
        panic!("drop should be pending");
    };

    harness.session.close();
    let result = reconciler.settle(pending).await;

    assert_eq!(result, Reconciliation::Superseded);
    assert!(harness.session.cache().snapshot().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn earlier_failure_after_later_confirmation_is_superseded() {
    let harness = loaded_board(&[(42, 1)]).await;
    let reconciler = harness.session.reconciler();

    let DropOutcome::Pending(first) = reconciler.begin_drop(task_id(42), Some(column_id(2))) else {
        panic!("first drop should be pending");
    };
    let DropOutcome::Pending(second) = reconciler.begin_drop(task_id(42), Some(column_id(3))) else {
        panic!("second drop should be pending");
    };

    assert_eq!(reconciler.settle(second).await, Reconciliation::Confirmed);
    harness.store.fail_next_update(network_error());
    assert_eq!(reconciler.settle(first).await, Reconciliation::Superseded);

    assert_eq!(harness.status_of(42), Some(3));
    assert_eq!(harness.notifier.count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn in_flight_updates_resolving_in_reverse_order_keep_the_later_move() -> eyre::Result<()> {
    let inner = InMemoryTaskStore::new();
    for (id, name, color) in COLUMNS {
        inner.seed_column(BoardColumn::from_parts(id, name, color)?);
    }
    let project = ProjectId::new(PROJECT)?;
    inner.seed_task(project, task(42, 1));

    let (release_first, first_gate) = oneshot::channel();
    let (release_second, second_gate) = oneshot::channel();
    let (started_tx, mut started_rx) = mpsc::unbounded_channel();
    let store = GatedStore {
        inner,
        gates: Mutex::new(HashMap::from([
            (column_id(2), first_gate),
            (column_id(3), second_gate),
        ])),
        started: started_tx,
    };
    let notifier = RecordingNotifier::new();
    let session = BoardSession::new(
        project,
        Arc::new(store),
        Arc::new(notifier.clone()),
        Arc::new(DefaultClock),
    );
    session.load().await?;
    let reconciler = session.reconciler();

    let first = reconciler
        .handle_drop(task_id(42), Some(column_id(2)))
        .ok_or_else(|| eyre::eyre!("first drop should dispatch"))?;
    let second = reconciler
        .handle_drop(task_id(42), Some(column_id(3)))
        .ok_or_else(|| eyre::eyre!("second drop should dispatch"))?;
    for _ in 0..2 {
        started_rx
            .recv()
            .await
            .ok_or_else(|| eyre::eyre!("update never reached the store"))?;
    }

    release_second
        .send(Ok(()))
        .map_err(|_| eyre::eyre!("second update gate closed"))?;
    eyre::ensure!(second.await? == Reconciliation::Confirmed);
    release_first
        .send(Err(network_error()))
        .map_err(|_| eyre::eyre!("first update gate closed"))?;
    eyre::ensure!(first.await? == Reconciliation::Superseded);

    let status = session
        .cache()
        .task(task_id(42))
        .map(|found| found.status_id());
    eyre::ensure!(status == Some(column_id(3)), "unexpected status {status:?}");
    eyre::ensure!(notifier.count() == 0, "superseded failure must not notify");
    Ok(())
}
