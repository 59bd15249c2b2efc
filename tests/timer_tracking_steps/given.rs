//! Given steps for time tracking scenarios.

use super::world::{TimerWorld, run_async};
use rstest_bdd_macros::given;
use taskflow::board::domain::DEFAULT_LIST_TITLE;

#[given("a board with one empty default list")]
fn board_with_default_list(world: &mut TimerWorld) -> Result<(), eyre::Report> {
    let board = run_async(world.store.snapshot());
    let [list] = board.lists() else {
        return Err(eyre::eyre!(
            "expected exactly one list, found {}",
            board.lists().len()
        ));
    };
    eyre::ensure!(list.title() == DEFAULT_LIST_TITLE, "unexpected title {}", list.title());
    eyre::ensure!(list.tasks().is_empty(), "default list should be empty");
    world.list_id = Some(list.id());
    Ok(())
}
