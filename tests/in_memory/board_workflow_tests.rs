//! In-memory integration tests for board workflows.

use std::sync::Arc;

use eyre::WrapErr;
use rstest::{fixture, rstest};
use taskflow::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{Board, ElapsedTime, ListId, ListPatch, ListPriority, Task, TaskId, TaskPatch},
    ports::BoardRepository,
    services::{BoardStore, DragSession},
};

type TestStore = BoardStore<InMemoryBoardRepository>;

struct Harness {
    repository: InMemoryBoardRepository,
    store: TestStore,
}

#[fixture]
fn harness() -> Harness {
    let repository = InMemoryBoardRepository::new();
    let store = BoardStore::with_board(
        Arc::new(repository.clone()),
        Board::new(),
    );
    Harness { repository, store }
}

async fn first_list(store: &TestStore) -> Result<ListId, eyre::Report> {
    store
        .snapshot()
        .await
        .lists()
        .first()
        .map(|list| list.id())
        .ok_or_else(|| eyre::eyre!("board has no lists"))
}

async fn add_task(store: &TestStore, list_id: ListId) -> Result<TaskId, eyre::Report> {
    let created = store
        .add_task(list_id)
        .await
        .wrap_err("add task")?
        .ok_or_else(|| eyre::eyre!("list {list_id} missing"))?;
    Ok(created.id)
}

async fn task(store: &TestStore, list_id: ListId, task_id: TaskId) -> Result<Task, eyre::Report> {
    store
        .snapshot()
        .await
        .find_task(list_id, task_id)
        .cloned()
        .ok_or_else(|| eyre::eyre!("task {task_id} missing from list {list_id}"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn timer_lifecycle_end_to_end(harness: Harness) -> Result<(), eyre::Report> {
    let store = &harness.store;
    let list_id = first_list(store).await?;
    let task_id = add_task(store, list_id).await?;

    store
        .update_task(list_id, task_id, &TaskPatch::start())
        .await?;
    for _ in 0..5 {
        store.tick().await?;
    }
    store
        .update_task(list_id, task_id, &TaskPatch::pause())
        .await?;
    store
        .update_task(list_id, task_id, &TaskPatch::finish())
        .await?;
    let finished = task(store, list_id, task_id).await?;
    store
        .update_task(list_id, task_id, &TaskPatch::start())
        .await?;
    let after_start = task(store, list_id, task_id).await?;

    eyre::ensure!(finished.time_spent() == ElapsedTime::from_secs(5), "time");
    eyre::ensure!(finished.is_finished() && !finished.is_running(), "state");
    eyre::ensure!(after_start == finished, "start after finish must be a no-op");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saved_board_matches_the_store_after_each_change(
    harness: Harness,
) -> Result<(), eyre::Report> {
    let store = &harness.store;
    let list_id = first_list(store).await?;
    let added = store.add_list().await?;
    store
        .update_list(
            added.id,
            &ListPatch::new()
                .with_title("Doing")
                .with_important(true)
                .with_urgent(true),
        )
        .await?;
    add_task(store, list_id).await?;

    let saved = harness
        .repository
        .load()
        .await?
        .ok_or_else(|| eyre::eyre!("board was never saved"))?;
    let doing = saved
        .find_list(added.id)
        .ok_or_else(|| eyre::eyre!("new list missing"))?;

    eyre::ensure!(saved == store.snapshot().await, "saved board differs");
    eyre::ensure!(doing.title() == "Doing", "title not saved");
    eyre::ensure!(doing.priority() == ListPriority::Critical, "flags not saved");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cross_list_drag_preserves_task_count(harness: Harness) -> Result<(), eyre::Report> {
    let store = &harness.store;
    let todo = first_list(store).await?;
    let done = store.add_list().await?.id;
    let first = add_task(store, todo).await?;
    let second = add_task(store, todo).await?;
    add_task(store, done).await?;
    store
        .update_task(todo, first, &TaskPatch::start())
        .await?;

    let mut session = DragSession::new();
    session.start(store, first.into()).await?;
    session.over(store, Some(done.into())).await?;
    session.drop(store, Some(done.into())).await?;
    store.tick().await?;

    let board = store.snapshot().await;
    let moved = task(store, done, first).await?;
    eyre::ensure!(board.task_count() == 3, "task count changed");
    eyre::ensure!(
        board.list_of_task(first).map(|list| list.id()) == Some(done),
        "task not in target list"
    );
    eyre::ensure!(
        board.find_list(todo).map(|list| list.tasks().len()) == Some(1),
        "task still in source list"
    );
    eyre::ensure!(board.find_task(todo, second).is_some(), "sibling lost");
    eyre::ensure!(
        moved.time_spent() == ElapsedTime::from_secs(1),
        "moved task kept running"
    );
    Ok(())
}
