//! In-memory integration tests for enhancing task text.

use std::sync::Arc;

use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::rstest;
use taskflow::{
    board::{
        adapters::memory::InMemoryBoardRepository,
        domain::{Board, TaskPatch},
        services::BoardStore,
    },
    enhancement::{
        adapters::memory::ScriptedTextGenerator,
        domain::{EnhancedField, EnhancementError, EnhancementKind, RateLimiter, RateLimits},
        services::{
            DEFAULT_FALLBACK_MODEL, EnhanceOutcome, EnhancementGateway, ModelRoute, TaskEnhancer,
            TaskEnhancerError,
        },
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn enhancement_budget_spans_tasks() -> Result<(), eyre::Report> {
    let mut board = Board::new();
    let list_id = board
        .lists()
        .first()
        .map(|list| list.id())
        .ok_or_else(|| eyre::eyre!("default list missing"))?;
    let mut task_ids = Vec::new();
    for index in 0..3 {
        let task_id = board
            .add_task(list_id)
            .ok_or_else(|| eyre::eyre!("list missing"))?;
        board.update_task(
            list_id,
            task_id,
            &TaskPatch::new().with_title(format!("task {index}")),
        );
        task_ids.push(task_id);
    }
    let store = Arc::new(BoardStore::with_board(
        Arc::new(InMemoryBoardRepository::new()),
        board,
    ));

    let generator = ScriptedTextGenerator::new();
    for index in 0..3 {
        generator.push_text(format!("Polished task number {index}"))?;
    }
    let limits = RateLimits {
        primary_per_window: 1,
        daily_budget: 2,
        ..RateLimits::default()
    };
    let limiter = Arc::new(RateLimiter::new(Arc::new(DefaultClock), limits));
    let gateway = Arc::new(EnhancementGateway::new(
        Arc::new(generator.clone()),
        limiter,
        ModelRoute::default(),
    ));
    let enhancer = TaskEnhancer::new(Arc::clone(&store), gateway);

    let mut outcomes = Vec::new();
    for task_id in &task_ids {
        outcomes.push(
            enhancer
                .enhance_task(
                    list_id,
                    *task_id,
                    EnhancedField::Title,
                    EnhancementKind::General,
                )
                .await,
        );
    }

    let calls = generator.calls().wrap_err("read calls")?;
    eyre::ensure!(calls.len() == 2, "expected two provider calls");
    eyre::ensure!(
        calls.last().map(|call| call.model.as_str()) == Some(DEFAULT_FALLBACK_MODEL),
        "second call should use the fallback model"
    );
    eyre::ensure!(
        matches!(outcomes.first(), Some(Ok(EnhanceOutcome::Applied(_)))),
        "first enhancement should apply"
    );
    eyre::ensure!(
        matches!(
            outcomes.last(),
            Some(Err(TaskEnhancerError::Enhancement(
                EnhancementError::RateLimitExceeded
            )))
        ),
        "third enhancement should be rate limited"
    );
    let board_after = store.snapshot().await;
    let titles: Vec<&str> = board_after
        .find_list(list_id)
        .map(|list| list.tasks().iter().map(|task| task.title()).collect())
        .unwrap_or_default();
    eyre::ensure!(
        titles == ["Polished task number 0", "Polished task number 1", "task 2"],
        "unexpected titles {titles:?}"
    );
    Ok(())
}
