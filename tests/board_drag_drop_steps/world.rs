//! Shared world state for board drag-and-drop BDD scenarios.

use std::collections::VecDeque;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::{InMemoryTaskStore, RecordingNotifier},
    domain::ProjectId,
    services::{BoardSession, PendingUpdate},
};

/// Session type used by the BDD world.
pub type TestBoardSession = BoardSession<InMemoryTaskStore, RecordingNotifier, DefaultClock>;

/// Project shown on the scenario board.
pub const PROJECT: i64 = 3;

/// Scenario world for board drag-and-drop behaviour tests.
pub struct BoardDropWorld {
    pub store: InMemoryTaskStore,
    pub notifier: RecordingNotifier,
    pub session: TestBoardSession,
    pub pending: VecDeque<PendingUpdate>,
}

impl BoardDropWorld {
    /// Creates a world around an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = InMemoryTaskStore::new();
        let notifier = RecordingNotifier::new();
        let project = ProjectId::new(PROJECT).unwrap_or_else(|err| panic!("{err}"));
        let session = BoardSession::new(
            project,
            Arc::new(store.clone()),
            Arc::new(notifier.clone()),
            Arc::new(DefaultClock),
        );

        Self {
            store,
            notifier,
            session,
            pending: VecDeque::new(),
        }
    }
}

impl Default for BoardDropWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardDropWorld {
    BoardDropWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
