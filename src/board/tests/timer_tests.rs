//! Tests for the periodic timer driver.

use std::sync::Arc;
use std::time::Duration;

use crate::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{Board, ElapsedTime, ListId, Task, TaskId, TaskList, TaskPatch},
    services::{BoardStore, TimerService},
};

fn store_with_running_task(
    running: bool,
) -> (Arc<BoardStore<InMemoryBoardRepository>>, ListId, TaskId) {
    let mut board = Board::new();
    let list_id = board.lists().first().map(TaskList::id).expect("default list");
    let task_id = board.add_task(list_id).expect("task");
    board.update_task(list_id, task_id, &TaskPatch::new().with_running(running));
    let store = Arc::new(BoardStore::with_board(
        Arc::new(InMemoryBoardRepository::new()),
        board,
    ));
    (store, list_id, task_id)
}

async fn time_spent(
    store: &BoardStore<InMemoryBoardRepository>,
    list_id: ListId,
    task_id: TaskId,
) -> ElapsedTime {
    store
        .snapshot()
        .await
        .find_task(list_id, task_id)
        .map(Task::time_spent)
        .expect("task should exist")
}

#[tokio::test(start_paused = true)]
async fn timer_ticks_once_per_period() {
    let (store, list_id, task_id) = store_with_running_task(true);
    let timer = TimerService::new(Arc::clone(&store));

    let observed = timer
        .run_until(tokio::time::sleep(Duration::from_millis(5_500)))
        .await;

    assert_eq!(observed, 5);
    assert_eq!(
        time_spent(&store, list_id, task_id).await,
        ElapsedTime::from_secs(5)
    );
}

#[tokio::test(start_paused = true)]
async fn timer_leaves_stopped_tasks_alone() {
    let (store, list_id, task_id) = store_with_running_task(false);
    let timer = TimerService::new(Arc::clone(&store));

    timer
        .run_until(tokio::time::sleep(Duration::from_millis(3_500)))
        .await;

    assert_eq!(time_spent(&store, list_id, task_id).await, ElapsedTime::ZERO);
}

#[tokio::test(start_paused = true)]
async fn custom_period_is_honoured() {
    let (store, list_id, task_id) = store_with_running_task(true);
    let timer =
        TimerService::new(Arc::clone(&store)).with_period(Duration::from_millis(250));

    let observed = timer
        .run_until(tokio::time::sleep(Duration::from_millis(1_100)))
        .await;

    assert_eq!(observed, 4);
    assert_eq!(
        time_spent(&store, list_id, task_id).await,
        ElapsedTime::from_secs(4)
    );
}

#[tokio::test(start_paused = true)]
async fn immediate_shutdown_observes_no_ticks() {
    let (store, list_id, task_id) = store_with_running_task(true);
    let timer = TimerService::new(Arc::clone(&store));

    let observed = timer.run_until(async {}).await;

    assert_eq!(observed, 0);
    assert_eq!(time_spent(&store, list_id, task_id).await, ElapsedTime::ZERO);
}
