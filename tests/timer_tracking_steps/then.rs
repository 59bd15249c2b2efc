//! Then steps for time tracking scenarios.

use super::world::TimerWorld;
use rstest_bdd_macros::then;
use taskflow::board::domain::ElapsedTime;

#[then("the task has {seconds:u64} seconds tracked")]
fn task_has_tracked_time(world: &TimerWorld, seconds: u64) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    eyre::ensure!(
        task.time_spent() == ElapsedTime::from_secs(seconds),
        "expected {seconds}s tracked, found {}",
        task.time_spent().as_secs()
    );
    Ok(())
}

fn ensure_finished(world: &TimerWorld) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    eyre::ensure!(task.is_finished(), "task should be finished");
    eyre::ensure!(!task.is_running(), "finished task should not be running");
    Ok(())
}

#[then("the task is finished and not running")]
fn task_is_finished(world: &TimerWorld) -> Result<(), eyre::Report> {
    ensure_finished(world)
}

#[then("the start request changed nothing")]
fn start_changed_nothing(world: &TimerWorld) -> Result<(), eyre::Report> {
    let changed = world
        .last_update_changed
        .ok_or_else(|| eyre::eyre!("no update recorded in scenario world"))?;
    eyre::ensure!(!changed, "starting a finished task should be a no-op");
    ensure_finished(world)
}
