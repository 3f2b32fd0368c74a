//! Shared setup for in-memory board tests.

use std::sync::Arc;

use mockable::DefaultClock;
use taskboard::board::{
    adapters::memory::{InMemoryTaskStore, RecordingNotifier},
    domain::{BoardColumn, BoardTask, ColumnId, ProjectId, TaskId, TaskTitle},
    services::BoardSession,
};

/// Session type used across in-memory tests.
pub type TestSession = BoardSession<InMemoryTaskStore, RecordingNotifier, DefaultClock>;

/// Project every seeded task belongs to.
pub const PROJECT: i64 = 3;

/// Columns seeded on every board, in display order.
pub const COLUMNS: [(i64, &str, &str); 4] = [
    (1, "Planning", "#64748b"),
    (2, "In progress", "#3b82f6"),
    (3, "Review", "#f59e0b"),
    (4, "Done", "#22c55e"),
];

/// A loaded board plus handles on its collaborators.
pub struct Harness {
    pub store: InMemoryTaskStore,
    pub notifier: RecordingNotifier,
    pub session: TestSession,
}

impl Harness {
    /// Returns the cached column of a task, if the task is cached.
    pub fn status_of(&self, raw_task: i64) -> Option<u64> {
        self.session
            .cache()
            .task(task_id(raw_task))
            .map(|task| task.status_id().value())
    }
}

/// Builds a validated task identifier.
pub fn task_id(raw: i64) -> TaskId {
    TaskId::new(raw).expect("valid task id")
}

/// Builds a validated column identifier.
pub fn column_id(raw: i64) -> ColumnId {
    ColumnId::new(raw).expect("valid column id")
}

/// Builds a minimal task in a column.
pub fn task(raw_id: i64, raw_status: i64) -> BoardTask {
    BoardTask::new(
        task_id(raw_id),
        TaskTitle::new(format!("Task #{raw_id}")).expect("valid title"),
        column_id(raw_status),
    )
}

/// Seeds the store with the standard columns and the given tasks, then
/// opens and loads a session.
pub async fn loaded_board(tasks: &[(i64, i64)]) -> Harness {
    let store = InMemoryTaskStore::new();
    for (id, name, color) in COLUMNS {
        store.seed_column(BoardColumn::from_parts(id, name, color).expect("valid column"));
    }
    let project = ProjectId::new(PROJECT).expect("valid project id");
    for (raw_id, raw_status) in tasks {
        store.seed_task(project, task(*raw_id, *raw_status));
    }
    let notifier = RecordingNotifier::new();
    let session = BoardSession::new(
        project,
        Arc::new(store.clone()),
        Arc::new(notifier.clone()),
        Arc::new(DefaultClock),
    );
    session.load().await.expect("board loads");
    Harness {
        store,
        notifier,
        session,
    }
}

/// Network failure as the HTTP adapter would report it.
pub fn network_error() -> taskboard::board::ports::RemoteStoreError {
    taskboard::board::ports::RemoteStoreError::transport(std::io::Error::other(
        "connection refused",
    ))
}
