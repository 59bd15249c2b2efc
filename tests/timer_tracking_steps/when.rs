//! When steps for time tracking scenarios.

use super::world::{TimerWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskflow::board::domain::TaskPatch;

#[when("a task is added to the first list")]
fn add_task(world: &mut TimerWorld) -> Result<(), eyre::Report> {
    let list_id = world
        .list_id
        .ok_or_else(|| eyre::eyre!("missing list in scenario world"))?;
    let created = run_async(world.store.add_task(list_id))
        .wrap_err("add task")?
        .ok_or_else(|| eyre::eyre!("list {list_id} disappeared"))?;
    world.task_id = Some(created.id);
    Ok(())
}

fn update(world: &mut TimerWorld, patch: &TaskPatch) -> Result<(), eyre::Report> {
    let (list_id, task_id) = world.target()?;
    let before = world.current_task()?;
    run_async(world.store.update_task(list_id, task_id, patch)).wrap_err("update task")?;
    world.last_update_changed = Some(world.current_task()? != before);
    Ok(())
}

#[when("the task timer is started")]
fn start_timer(world: &mut TimerWorld) -> Result<(), eyre::Report> {
    update(world, &TaskPatch::start())
}

#[when("the task timer is paused")]
fn pause_timer(world: &mut TimerWorld) -> Result<(), eyre::Report> {
    update(world, &TaskPatch::pause())
}

#[when("the task is finished")]
fn finish_task(world: &mut TimerWorld) -> Result<(), eyre::Report> {
    update(world, &TaskPatch::finish())
}

#[when("the timer ticks {count:u64} times")]
fn tick(world: &mut TimerWorld, count: u64) -> Result<(), eyre::Report> {
    for _ in 0..count {
        run_async(world.store.tick()).wrap_err("tick")?;
    }
    Ok(())
}
