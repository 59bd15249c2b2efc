//! Service tests for task enhancement write-back.

use std::sync::Arc;

use crate::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{Board, ItemId, ListId, Task, TaskId, TaskList, TaskPatch},
    services::BoardStore,
};
use crate::enhancement::{
    adapters::memory::ScriptedTextGenerator,
    domain::{EnhancedField, EnhancementError, EnhancementKind, RateLimiter, RateLimits},
    ports::{TextGenerator, TextGeneratorError, TextGeneratorResult},
    services::{
        DEFAULT_PRIMARY_MODEL, EnhanceOutcome, EnhancementGateway, ModelRoute, TaskEnhancer,
        TaskEnhancerError,
    },
};
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use tokio::sync::Notify;

type Store = BoardStore<InMemoryBoardRepository>;

struct Seeded {
    store: Arc<Store>,
    list_id: ListId,
    task_id: TaskId,
}

#[fixture]
fn seeded() -> Seeded {
    let mut board = Board::new();
    let list_id = board.lists().first().map(TaskList::id).expect("default list");
    let task_id = board.add_task(list_id).expect("task");
    board.update_task(
        list_id,
        task_id,
        &TaskPatch::new()
            .with_title("fix login")
            .with_details("users cant log in sometimes"),
    );
    Seeded {
        store: Arc::new(BoardStore::with_board(
            Arc::new(InMemoryBoardRepository::new()),
            board,
        )),
        list_id,
        task_id,
    }
}

fn enhancer<G: TextGenerator>(
    store: &Arc<Store>,
    generator: G,
) -> TaskEnhancer<InMemoryBoardRepository, G, DefaultClock> {
    let limiter = Arc::new(RateLimiter::new(
        Arc::new(DefaultClock),
        RateLimits::default(),
    ));
    let gateway = EnhancementGateway::new(Arc::new(generator), limiter, ModelRoute::default());
    TaskEnhancer::new(Arc::clone(store), Arc::new(gateway))
}

fn applied_task(outcome: &EnhanceOutcome, task_id: TaskId) -> Task {
    let EnhanceOutcome::Applied(board) = outcome else {
        panic!("expected applied outcome, got {outcome:?}");
    };
    board
        .list_of_task(task_id)
        .and_then(|list| list.task(task_id))
        .cloned()
        .expect("task present")
}

/// Generator that blocks until released, so tests can act mid-flight.
struct GatedGenerator {
    release: Arc<Notify>,
    response: String,
}

#[async_trait]
impl TextGenerator for GatedGenerator {
    async fn generate(&self, _model: &str, _prompt: &str) -> TextGeneratorResult<String> {
        self.release.notified().await;
        Ok(self.response.clone())
    }
}

async fn wait_until_busy<G: TextGenerator>(
    enhancer: &TaskEnhancer<InMemoryBoardRepository, G, DefaultClock>,
    task_id: TaskId,
) {
    while !enhancer.is_busy(task_id) {
        tokio::task::yield_now().await;
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn title_enhancement_replaces_title_and_keeps_original(seeded: Seeded) {
    let generator = ScriptedTextGenerator::new();
    generator
        .push_text("**Here's a version:** \"Fix the login bug\"")
        .expect("queue response");
    let service = enhancer(&seeded.store, generator.clone());

    let outcome = service
        .enhance_task(
            seeded.list_id,
            seeded.task_id,
            EnhancedField::Title,
            EnhancementKind::General,
        )
        .await
        .expect("enhancement succeeds");

    let task = applied_task(&outcome, seeded.task_id);
    assert_eq!(task.title(), "Fix the login bug");
    assert_eq!(task.details(), "users cant log in sometimes");
    assert_eq!(task.original_text(), Some("fix login"));
    if let EnhanceOutcome::Applied(board) = &outcome {
        assert_eq!(&seeded.store.snapshot().await, board);
    }

    let calls = generator.calls().expect("calls");
    assert_eq!(calls.len(), 1);
    let call = calls.first().expect("one call");
    assert_eq!(call.model, DEFAULT_PRIMARY_MODEL);
    assert!(call.prompt.contains("\"fix login\""));
    assert!(!service.is_busy(seeded.task_id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn details_enhancement_only_touches_details(seeded: Seeded) {
    let generator = ScriptedTextGenerator::new();
    generator
        .push_text("Steps to reproduce: sign in twice with a valid account")
        .expect("queue response");
    let service = enhancer(&seeded.store, generator);

    let outcome = service
        .enhance_task(
            seeded.list_id,
            seeded.task_id,
            EnhancedField::Details,
            EnhancementKind::Bug,
        )
        .await
        .expect("enhancement succeeds");

    let task = applied_task(&outcome, seeded.task_id);
    assert_eq!(task.title(), "fix login");
    assert_eq!(
        task.details(),
        "Steps to reproduce: sign in twice with a valid account"
    );
    assert_eq!(task.original_text(), Some("users cant log in sometimes"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_enhancement_keeps_the_first_original(seeded: Seeded) {
    let generator = ScriptedTextGenerator::new();
    generator.push_text("Fix the login flow").expect("queue");
    generator.push_text("Repair the login flow").expect("queue");
    let service = enhancer(&seeded.store, generator);

    for _ in 0..2 {
        service
            .enhance_task(
                seeded.list_id,
                seeded.task_id,
                EnhancedField::Title,
                EnhancementKind::General,
            )
            .await
            .expect("enhancement succeeds");
    }

    let board = seeded.store.snapshot().await;
    let task = board
        .find_task(seeded.list_id, seeded.task_id)
        .expect("task");
    assert_eq!(task.title(), "Repair the login flow");
    assert_eq!(task.original_text(), Some("fix login"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_is_reported_without_calling_the_provider(seeded: Seeded) {
    let generator = ScriptedTextGenerator::new();
    let service = enhancer(&seeded.store, generator.clone());

    let outcome = service
        .enhance_task(
            seeded.list_id,
            TaskId::new(),
            EnhancedField::Title,
            EnhancementKind::General,
        )
        .await
        .expect("missing task is not an error");

    assert_eq!(outcome, EnhanceOutcome::TaskMissing);
    assert!(generator.calls().expect("calls").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn provider_failure_surfaces_and_clears_busy(seeded: Seeded) {
    let generator = ScriptedTextGenerator::new();
    generator
        .push_error(TextGeneratorError::EmptyResponse)
        .expect("queue");
    let service = enhancer(&seeded.store, generator);
    let before = seeded.store.snapshot().await;

    let result = service
        .enhance_task(
            seeded.list_id,
            seeded.task_id,
            EnhancedField::Title,
            EnhancementKind::General,
        )
        .await;

    assert!(matches!(
        result,
        Err(TaskEnhancerError::Enhancement(EnhancementError::Failed))
    ));
    assert!(!service.is_busy(seeded.task_id));
    assert_eq!(seeded.store.snapshot().await, before);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn output_that_sanitizes_to_nothing_is_a_failure(seeded: Seeded) {
    let generator = ScriptedTextGenerator::new();
    generator.push_text("```\n```").expect("queue");
    let service = enhancer(&seeded.store, generator);
    let before = seeded.store.snapshot().await;

    let result = service
        .enhance_task(
            seeded.list_id,
            seeded.task_id,
            EnhancedField::Details,
            EnhancementKind::General,
        )
        .await;

    assert!(matches!(
        result,
        Err(TaskEnhancerError::Enhancement(EnhancementError::Failed))
    ));
    assert_eq!(seeded.store.snapshot().await, before);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_request_for_a_busy_task_is_refused(seeded: Seeded) {
    let release = Arc::new(Notify::new());
    let service = Arc::new(enhancer(
        &seeded.store,
        GatedGenerator {
            release: Arc::clone(&release),
            response: "Fix the login bug".to_owned(),
        },
    ));
    let (list_id, task_id) = (seeded.list_id, seeded.task_id);

    let in_flight = {
        let shared = Arc::clone(&service);
        tokio::spawn(async move {
            shared
                .enhance_task(list_id, task_id, EnhancedField::Title, EnhancementKind::General)
                .await
        })
    };
    wait_until_busy(&service, task_id).await;

    let second = service
        .enhance_task(list_id, task_id, EnhancedField::Details, EnhancementKind::Spec)
        .await;
    assert!(matches!(second, Err(TaskEnhancerError::Busy(id)) if id == task_id));

    release.notify_one();
    let first = in_flight
        .await
        .expect("join")
        .expect("first enhancement succeeds");
    assert_eq!(applied_task(&first, task_id).title(), "Fix the login bug");
    assert!(!service.is_busy(task_id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn result_for_a_deleted_task_is_discarded(seeded: Seeded) {
    let release = Arc::new(Notify::new());
    let service = Arc::new(enhancer(
        &seeded.store,
        GatedGenerator {
            release: Arc::clone(&release),
            response: "Fix the login bug".to_owned(),
        },
    ));
    let (list_id, task_id) = (seeded.list_id, seeded.task_id);

    let in_flight = {
        let shared = Arc::clone(&service);
        tokio::spawn(async move {
            shared
                .enhance_task(list_id, task_id, EnhancedField::Title, EnhancementKind::General)
                .await
        })
    };
    wait_until_busy(&service, task_id).await;
    seeded
        .store
        .delete_task(list_id, task_id)
        .await
        .expect("delete");
    let before = seeded.store.snapshot().await;
    release.notify_one();

    let outcome = in_flight.await.expect("join").expect("no error");

    assert_eq!(outcome, EnhanceOutcome::TaskRemoved);
    assert_eq!(seeded.store.snapshot().await, before);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn result_follows_a_task_moved_mid_flight(seeded: Seeded) {
    let release = Arc::new(Notify::new());
    let service = Arc::new(enhancer(
        &seeded.store,
        GatedGenerator {
            release: Arc::clone(&release),
            response: "Fix the login bug".to_owned(),
        },
    ));
    let (list_id, task_id) = (seeded.list_id, seeded.task_id);
    let target = seeded.store.add_list().await.expect("add list").id;

    let in_flight = {
        let shared = Arc::clone(&service);
        tokio::spawn(async move {
            shared
                .enhance_task(list_id, task_id, EnhancedField::Title, EnhancementKind::General)
                .await
        })
    };
    wait_until_busy(&service, task_id).await;
    seeded
        .store
        .transfer_task(task_id, ItemId::from(target))
        .await
        .expect("transfer");
    release.notify_one();

    let outcome = in_flight.await.expect("join").expect("no error");

    let board = seeded.store.snapshot().await;
    let task = board.find_task(target, task_id).expect("task in target list");
    assert_eq!(task.title(), "Fix the login bug");
    assert_eq!(applied_task(&outcome, task_id), task.clone());
}
