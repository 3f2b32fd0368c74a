//! When steps for board drag-and-drop BDD scenarios.

use super::world::{BoardDropWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::board::{
    domain::TaskId,
    ports::RemoteStoreError,
    services::DropOutcome,
};

fn release(world: &mut BoardDropWorld, task: i64, column: i64) {
    if let DropOutcome::Pending(pending) = world.session.release_card(task, Some(column)) {
        world.pending.push_back(pending);
    }
}

#[when("task {task:i64} is dropped on column {column:i64}")]
fn task_dropped_on_column(
    world: &mut BoardDropWorld,
    task: i64,
    column: i64,
) -> Result<(), eyre::Report> {
    world
        .session
        .begin_drag(task)
        .ok_or_else(|| eyre::eyre!("task {task} could not be dragged"))?;
    release(world, task, column);
    Ok(())
}

#[when("task {task:i64} is deleted while being dragged to column {column:i64}")]
fn task_deleted_during_drag(
    world: &mut BoardDropWorld,
    task: i64,
    column: i64,
) -> Result<(), eyre::Report> {
    world
        .session
        .begin_drag(task)
        .ok_or_else(|| eyre::eyre!("task {task} could not be dragged"))?;
    let id = TaskId::new(task)?;
    world.store.delete_task(id);
    world.session.cache().remove_task(id);
    release(world, task, column);
    Ok(())
}

#[when("the oldest pending update fails")]
fn oldest_update_fails(world: &mut BoardDropWorld) -> Result<(), eyre::Report> {
    let pending = world
        .pending
        .pop_front()
        .ok_or_else(|| eyre::eyre!("no pending update in scenario world"))?;
    world
        .store
        .fail_next_update(RemoteStoreError::transport(std::io::Error::other(
            "network unreachable",
        )));
    run_async(world.session.reconciler().settle(pending));
    Ok(())
}

#[when("the oldest pending update succeeds")]
fn oldest_update_succeeds(world: &mut BoardDropWorld) -> Result<(), eyre::Report> {
    let pending = world
        .pending
        .pop_front()
        .ok_or_else(|| eyre::eyre!("no pending update in scenario world"))?;
    run_async(world.session.reconciler().settle(pending));
    Ok(())
}
