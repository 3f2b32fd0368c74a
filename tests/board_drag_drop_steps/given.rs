//! Given steps for board drag-and-drop BDD scenarios.

use super::world::{BoardDropWorld, PROJECT, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::domain::{BoardColumn, BoardTask, ColumnId, ProjectId, TaskId, TaskTitle};

#[given("a board with columns Planning, In progress, Review and Done")]
fn board_with_columns(world: &mut BoardDropWorld) -> Result<(), eyre::Report> {
    let columns = [
        (1, "Planning", "#64748b"),
        (2, "In progress", "#3b82f6"),
        (3, "Review", "#f59e0b"),
        (4, "Done", "#22c55e"),
    ];
    for (id, name, color) in columns {
        world
            .store
            .seed_column(BoardColumn::from_parts(id, name, color)?);
    }
    Ok(())
}

#[given("task {task:i64} starts in column {column:i64}")]
fn task_starts_in_column(
    world: &mut BoardDropWorld,
    task: i64,
    column: i64,
) -> Result<(), eyre::Report> {
    let record = BoardTask::new(
        TaskId::new(task)?,
        TaskTitle::new(format!("Task #{task}"))?,
        ColumnId::new(column)?,
    );
    world.store.seed_task(ProjectId::new(PROJECT)?, record);
    Ok(())
}

#[given("the board has been loaded")]
fn board_loaded(world: &mut BoardDropWorld) -> Result<(), eyre::Report> {
    run_async(world.session.load()).wrap_err("load board for scenario")?;
    Ok(())
}
