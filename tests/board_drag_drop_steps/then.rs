//! Then steps for board drag-and-drop BDD scenarios.

use super::world::BoardDropWorld;
use rstest_bdd_macros::then;
use taskboard::board::domain::TaskId;

#[then("task {task:i64} is in column {column:i64}")]
fn task_is_in_column(world: &BoardDropWorld, task: i64, column: i64) -> Result<(), eyre::Report> {
    let cached = world
        .session
        .cache()
        .task(TaskId::new(task)?)
        .ok_or_else(|| eyre::eyre!("task {task} is not cached"))?;
    let status = cached.status_id().value();
    if i64::try_from(status)? != column {
        return Err(eyre::eyre!("expected task {task} in column {column}, found {status}"));
    }
    Ok(())
}

#[then("the failure notification count is {count:usize}")]
fn failure_notification_count(world: &BoardDropWorld, count: usize) -> Result<(), eyre::Report> {
    let actual = world.notifier.count();
    if actual != count {
        return Err(eyre::eyre!("expected {count} failure notifications, found {actual}"));
    }
    Ok(())
}

#[then("no status update is sent to the server")]
fn no_status_update_sent(world: &BoardDropWorld) -> Result<(), eyre::Report> {
    let calls = world.store.update_calls();
    if !calls.is_empty() || !world.pending.is_empty() {
        return Err(eyre::eyre!("expected no status updates, found {calls:?}"));
    }
    Ok(())
}
