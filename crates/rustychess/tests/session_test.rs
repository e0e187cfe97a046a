//! Turn transaction tests for the session controller.

use async_trait::async_trait;
use rustychess::{
    Actor, EngineFailurePolicy, EngineStatus, SessionConfig, SessionController, SessionError,
    SessionEvent, SessionStatus,
};
use rustychess_core::{
    ChessRules, GameState, Move, MoveValidator, Outcome, PieceKind, RejectionReason, Side, Square,
};
use rustychess_engine::{
    DecisionEngine, EngineError, EngineFactory, SearchConfig, SearchEngineFactory,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ─────────────────────────────────────────────────────────────
// Test doubles
// ─────────────────────────────────────────────────────────────

fn mv(text: &str) -> Move {
    text.parse().expect("valid move")
}

fn sq(name: &str) -> Square {
    name.parse().expect("valid square")
}

/// Chess rules that count `apply_move` calls.
struct CountingRules {
    rules: ChessRules,
    calls: Arc<AtomicUsize>,
}

impl MoveValidator for CountingRules {
    fn initial(&self) -> GameState {
        self.rules.initial()
    }

    fn apply_move(&self, state: &GameState, mv: Move) -> Result<GameState, RejectionReason> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.rules.apply_move(state, mv)
    }

    fn legal_moves(&self, state: &GameState) -> Vec<Move> {
        self.rules.legal_moves(state)
    }
}

/// Plays the first legal move it finds.
struct FirstLegalEngine {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl DecisionEngine for FirstLegalEngine {
    async fn select_move(&mut self, position: &str) -> Result<Move, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let rules = ChessRules::from_fen(position)
            .map_err(|e| EngineError::InvalidPosition(e.to_string()))?;
        rules
            .legal_moves(&rules.initial())
            .first()
            .copied()
            .ok_or(EngineError::NoLegalMoves)
    }

    fn name(&self) -> &str {
        "first-legal"
    }
}

/// Replies with a fixed list of moves, then reports no move.
struct ScriptedEngine {
    replies: VecDeque<Move>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl DecisionEngine for ScriptedEngine {
    async fn select_move(&mut self, _position: &str) -> Result<Move, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies.pop_front().ok_or(EngineError::NoLegalMoves)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Waits for a permit before delegating to [`FirstLegalEngine`].
struct GatedEngine {
    gate: Arc<Notify>,
    inner: FirstLegalEngine,
}

#[async_trait]
impl DecisionEngine for GatedEngine {
    async fn select_move(&mut self, position: &str) -> Result<Move, EngineError> {
        self.gate.notified().await;
        self.inner.select_move(position).await
    }

    fn name(&self) -> &str {
        "gated"
    }
}

/// Never replies.
struct SilentEngine;

#[async_trait]
impl DecisionEngine for SilentEngine {
    async fn select_move(&mut self, _position: &str) -> Result<Move, EngineError> {
        std::future::pending().await
    }

    fn name(&self) -> &str {
        "silent"
    }
}

/// Hands out one prebuilt engine, optionally after a permit.
struct OneShotFactory {
    engine: Mutex<Option<Box<dyn DecisionEngine>>>,
    gate: Option<Arc<Notify>>,
}

impl OneShotFactory {
    fn new(engine: impl DecisionEngine + 'static) -> Self {
        Self {
            engine: Mutex::new(Some(Box::new(engine))),
            gate: None,
        }
    }

    fn gated(engine: impl DecisionEngine + 'static, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(engine)
        }
    }
}

#[async_trait]
impl EngineFactory for OneShotFactory {
    async fn construct(&self) -> Result<Box<dyn DecisionEngine>, EngineError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.engine
            .lock()
            .expect("factory lock")
            .take()
            .ok_or_else(|| EngineError::Construction("engine already taken".to_string()))
    }
}

struct FailingFactory;

#[async_trait]
impl EngineFactory for FailingFactory {
    async fn construct(&self) -> Result<Box<dyn DecisionEngine>, EngineError> {
        Err(EngineError::Construction("model file missing".to_string()))
    }
}

struct PanickingFactory;

#[async_trait]
impl EngineFactory for PanickingFactory {
    async fn construct(&self) -> Result<Box<dyn DecisionEngine>, EngineError> {
        panic!("weights corrupted");
    }
}

struct Harness {
    session: SessionController,
    validator_calls: Arc<AtomicUsize>,
}

fn new_session(rules: ChessRules, config: SessionConfig) -> Harness {
    let validator_calls = Arc::new(AtomicUsize::new(0));
    let validator = CountingRules {
        rules,
        calls: Arc::clone(&validator_calls),
    };
    Harness {
        session: SessionController::new(Box::new(validator), config),
        validator_calls,
    }
}

async fn ready_session(
    rules: ChessRules,
    config: SessionConfig,
    engine: impl DecisionEngine + 'static,
) -> Harness {
    let harness = new_session(rules, config);
    assert!(harness
        .session
        .initialize_engine(Arc::new(OneShotFactory::new(engine))));
    assert_eq!(harness.session.wait_for_engine().await, EngineStatus::Ready);
    harness
}

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

fn first_legal(calls: &Arc<AtomicUsize>) -> FirstLegalEngine {
    FirstLegalEngine {
        calls: Arc::clone(calls),
    }
}

// ─────────────────────────────────────────────────────────────
// Turn transactions
// ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_pawn_push_is_answered() {
    let engine_calls = counter();
    let harness = ready_session(
        ChessRules::new(),
        SessionConfig::default(),
        first_legal(&engine_calls),
    )
    .await;
    let session = &harness.session;

    let turn = session
        .submit_human_move(mv("e2e4"))
        .await
        .expect("turn commits");

    let history = session.history();
    assert_eq!(history.len(), 2);

    let after_human = history.entries()[0].state();
    assert_eq!(after_human.piece_at(sq("e4")), Some((Side::White, PieceKind::Pawn)));
    assert_eq!(after_human.side_to_move(), Side::Black);

    assert!(turn.engine_move().is_some());
    assert_eq!(turn.state().side_to_move(), Side::White);
    assert_eq!(turn.state(), &session.current_state());
    assert_eq!(session.status(), SessionStatus::Playable);
    assert_eq!(engine_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_illegal_move_changes_nothing() {
    let engine_calls = counter();
    let harness = ready_session(
        ChessRules::new(),
        SessionConfig::default(),
        first_legal(&engine_calls),
    )
    .await;
    let session = &harness.session;
    let before = session.snapshot();

    let result = session.submit_human_move(mv("e1e3")).await;

    assert_eq!(
        result,
        Err(SessionError::IllegalMove(RejectionReason::Illegal(mv("e1e3"))))
    );
    assert_eq!(session.snapshot(), before);
    assert!(session.history().is_empty());
    assert_eq!(engine_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rejected_engine_move_keeps_human_half() {
    let engine_calls = counter();
    let engine = ScriptedEngine {
        // A white pawn move offered as black's reply.
        replies: VecDeque::from([mv("e2e4")]),
        calls: Arc::clone(&engine_calls),
    };
    let harness = ready_session(ChessRules::new(), SessionConfig::default(), engine).await;
    let session = &harness.session;

    let result = session.submit_human_move(mv("d2d4")).await;

    match result {
        Err(SessionError::EngineFailure { engine_move, .. }) => {
            assert_eq!(engine_move, Some(mv("e2e4")));
        }
        other => panic!("expected EngineFailure, got {:?}", other),
    }

    let history = session.history();
    assert_eq!(history.len(), 1);
    assert_eq!(*history.entries()[0].actor(), Actor::Human);
    assert_eq!(session.current_state(), *history.entries()[0].state());
    assert!(matches!(session.status(), SessionStatus::Halted { .. }));

    let later = session.submit_human_move(mv("e7e5")).await;
    assert!(matches!(later, Err(SessionError::Halted(_))));
    assert_eq!(engine_calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.history().len(), 1);
}

#[tokio::test]
async fn test_engine_error_is_engine_failure() {
    let engine = ScriptedEngine {
        replies: VecDeque::new(),
        calls: counter(),
    };
    let harness = ready_session(ChessRules::new(), SessionConfig::default(), engine).await;

    let result = harness.session.submit_human_move(mv("g1f3")).await;

    assert_eq!(
        result,
        Err(SessionError::EngineFailure {
            engine_move: None,
            reason: EngineError::NoLegalMoves.to_string(),
        })
    );
    assert_eq!(harness.session.history().len(), 1);
}

#[tokio::test]
async fn test_submission_while_loading_is_refused() {
    let engine_calls = counter();
    let gate = Arc::new(Notify::new());
    let harness = new_session(ChessRules::new(), SessionConfig::default());
    let session = &harness.session;

    session.initialize_engine(Arc::new(OneShotFactory::gated(
        first_legal(&engine_calls),
        Arc::clone(&gate),
    )));
    assert_eq!(session.engine_status(), EngineStatus::Loading);

    let result = session.submit_human_move(mv("e2e4")).await;

    assert_eq!(result, Err(SessionError::EngineNotReady(EngineStatus::Loading)));
    assert_eq!(harness.validator_calls.load(Ordering::SeqCst), 0);
    assert_eq!(engine_calls.load(Ordering::SeqCst), 0);
    assert!(session.history().is_empty());

    gate.notify_one();
    assert_eq!(session.wait_for_engine().await, EngineStatus::Ready);
    assert!(session.submit_human_move(mv("e2e4")).await.is_ok());
}

#[tokio::test]
async fn test_submission_before_loading_is_refused() {
    let harness = new_session(ChessRules::new(), SessionConfig::default());

    let result = harness.session.submit_human_move(mv("e2e4")).await;

    assert_eq!(
        result,
        Err(SessionError::EngineNotReady(EngineStatus::Uninitialized))
    );
    assert_eq!(harness.validator_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_engine_load_is_single_flight() {
    let harness = new_session(ChessRules::new(), SessionConfig::default());
    let session = &harness.session;

    assert!(session.initialize_engine(Arc::new(OneShotFactory::new(first_legal(&counter())))));
    assert!(!session.initialize_engine(Arc::new(FailingFactory)));
    assert_eq!(session.wait_for_engine().await, EngineStatus::Ready);
}

#[tokio::test]
async fn test_failed_load_blocks_moves() {
    let harness = new_session(ChessRules::new(), SessionConfig::default());
    let session = &harness.session;

    session.initialize_engine(Arc::new(FailingFactory));
    let status = session.wait_for_engine().await;
    assert!(matches!(status, EngineStatus::Failed(_)));

    let result = session.submit_human_move(mv("e2e4")).await;
    assert!(matches!(result, Err(SessionError::EngineLoadFailure(_))));
    assert_eq!(harness.validator_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_panicking_factory_fails_load() {
    let harness = new_session(ChessRules::new(), SessionConfig::default());
    let session = &harness.session;

    session.initialize_engine(Arc::new(PanickingFactory));
    let status = tokio::time::timeout(Duration::from_secs(5), session.wait_for_engine())
        .await
        .expect("lifecycle settles");

    match status {
        EngineStatus::Failed(reason) => assert!(reason.contains("aborted")),
        other => panic!("expected Failed, got {:?}", other),
    }
    let result = session.submit_human_move(mv("e2e4")).await;
    assert!(matches!(result, Err(SessionError::EngineLoadFailure(_))));
    assert_eq!(harness.validator_calls.load(Ordering::SeqCst), 0);
}

// ─────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_replay_matches_validator_alone() {
    let harness = ready_session(
        ChessRules::new(),
        SessionConfig::default(),
        first_legal(&counter()),
    )
    .await;
    let session = &harness.session;

    let mut applied = Vec::new();
    for text in ["e2e4", "d2d4", "g1f3"] {
        let turn = session
            .submit_human_move(mv(text))
            .await
            .expect("turn commits");
        applied.push(*turn.human_move());
        applied.push(turn.engine_move().expect("engine replied"));
    }

    let rules = ChessRules::new();
    let replayed = applied.iter().fold(rules.initial(), |state, &m| {
        rules.apply_move(&state, m).expect("legal on replay")
    });

    assert_eq!(session.current_state(), replayed);
    assert_eq!(session.history().len(), applied.len());
    let logged: Vec<Move> = session
        .history()
        .entries()
        .iter()
        .map(|entry| *entry.mv())
        .collect();
    assert_eq!(logged, applied);
}

#[tokio::test]
async fn test_same_rejection_twice() {
    let harness = ready_session(
        ChessRules::new(),
        SessionConfig::default(),
        first_legal(&counter()),
    )
    .await;
    let session = &harness.session;
    let before_state = session.current_state();
    let before = session.snapshot();

    let first = session.submit_human_move(mv("e7e5")).await;
    let after_first = session.snapshot();
    let second = session.submit_human_move(mv("e7e5")).await;

    assert_eq!(first, second);
    assert!(matches!(
        first,
        Err(SessionError::IllegalMove(RejectionReason::NotYourPiece { .. }))
    ));
    assert_eq!(after_first, before);
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.current_state(), before_state);
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_human_on_move_after_every_turn() {
    let harness = ready_session(
        ChessRules::new(),
        SessionConfig::default(),
        first_legal(&counter()),
    )
    .await;
    let session = &harness.session;

    for text in ["e2e4", "b1c3", "f1c4"] {
        let turn = session
            .submit_human_move(mv(text))
            .await
            .expect("turn commits");
        assert_eq!(turn.state().side_to_move(), session.human_side());
    }

    let sides: Vec<Side> = session
        .history()
        .entries()
        .iter()
        .map(|entry| entry.state().side_to_move())
        .collect();
    for pair in sides.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

// ─────────────────────────────────────────────────────────────
// Concurrency and failure policy
// ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_second_submission_while_thinking_is_busy() {
    let gate = Arc::new(Notify::new());
    let engine = GatedEngine {
        gate: Arc::clone(&gate),
        inner: first_legal(&counter()),
    };
    let harness = ready_session(ChessRules::new(), SessionConfig::default(), engine).await;
    let session = harness.session.clone();
    let mut events = session.subscribe();

    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.submit_human_move(mv("e2e4")).await })
    };

    loop {
        match events.recv().await.expect("event stream open") {
            SessionEvent::EngineThinking { .. } => break,
            _ => continue,
        }
    }
    assert!(session.is_in_flight());
    assert!(*session.snapshot().in_flight());

    let busy = session.submit_human_move(mv("d2d4")).await;
    assert_eq!(busy, Err(SessionError::Busy));

    gate.notify_one();
    let turn = pending.await.expect("task joins").expect("turn commits");
    assert_eq!(*turn.human_move(), mv("e2e4"));
    assert!(!session.is_in_flight());
    assert_eq!(session.history().len(), 2);
}

#[tokio::test]
async fn test_timeout_keeps_human_half() {
    let config = SessionConfig::default().with_engine_timeout_ms(50);
    let harness = ready_session(ChessRules::new(), config, SilentEngine).await;
    let session = &harness.session;

    let result = session.submit_human_move(mv("e2e4")).await;

    assert_eq!(result, Err(SessionError::EngineTimeout { millis: 50 }));
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.current_state().side_to_move(), Side::Black);
    assert!(matches!(session.status(), SessionStatus::Halted { .. }));
    assert!(!session.is_in_flight());
}

#[tokio::test]
async fn test_retry_policy_recovers() {
    let engine_calls = counter();
    let engine = ScriptedEngine {
        replies: VecDeque::from([mv("e2e4"), mv("e7e5")]),
        calls: Arc::clone(&engine_calls),
    };
    let config = SessionConfig::default().with_failure_policy(EngineFailurePolicy::Retry);
    let harness = ready_session(ChessRules::new(), config, engine).await;
    let session = &harness.session;

    let failed = session.submit_human_move(mv("d2d4")).await;
    assert!(matches!(failed, Err(SessionError::EngineFailure { .. })));
    assert!(matches!(
        session.status(),
        SessionStatus::AwaitingEngine { .. }
    ));

    let refused = session.submit_human_move(mv("c2c4")).await;
    assert_eq!(refused, Err(SessionError::AwaitingEngine));

    let entry = session.retry_engine_move().await.expect("retry commits");
    assert_eq!(*entry.actor(), Actor::Engine);
    assert_eq!(*entry.mv(), mv("e7e5"));
    assert_eq!(session.status(), SessionStatus::Playable);
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.current_state().side_to_move(), Side::White);

    assert_eq!(
        session.retry_engine_move().await,
        Err(SessionError::NothingToRetry)
    );
    assert_eq!(engine_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_timeout_under_retry_policy_awaits_engine() {
    let config = SessionConfig::default()
        .with_engine_timeout_ms(50)
        .with_failure_policy(EngineFailurePolicy::Retry);
    let harness = ready_session(ChessRules::new(), config, SilentEngine).await;
    let session = &harness.session;

    let result = session.submit_human_move(mv("e2e4")).await;

    assert_eq!(result, Err(SessionError::EngineTimeout { millis: 50 }));
    assert!(matches!(
        session.status(),
        SessionStatus::AwaitingEngine { .. }
    ));
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.current_state().side_to_move(), Side::Black);
}

#[tokio::test]
async fn test_failed_retry_keeps_awaiting_engine() {
    let engine_calls = counter();
    let engine = ScriptedEngine {
        replies: VecDeque::from([mv("e2e4")]),
        calls: Arc::clone(&engine_calls),
    };
    let config = SessionConfig::default().with_failure_policy(EngineFailurePolicy::Retry);
    let harness = ready_session(ChessRules::new(), config, engine).await;
    let session = &harness.session;

    let failed = session.submit_human_move(mv("d2d4")).await;
    assert!(matches!(failed, Err(SessionError::EngineFailure { .. })));
    let after_submit = session.current_state();

    let retried = session.retry_engine_move().await;

    assert_eq!(
        retried,
        Err(SessionError::EngineFailure {
            engine_move: None,
            reason: EngineError::NoLegalMoves.to_string(),
        })
    );
    assert!(matches!(
        session.status(),
        SessionStatus::AwaitingEngine { .. }
    ));
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.current_state(), after_submit);
    assert_eq!(engine_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_retry_on_halted_session_is_refused() {
    let engine_calls = counter();
    let engine = ScriptedEngine {
        replies: VecDeque::from([mv("e2e4")]),
        calls: Arc::clone(&engine_calls),
    };
    let harness = ready_session(ChessRules::new(), SessionConfig::default(), engine).await;
    let session = &harness.session;

    let failed = session.submit_human_move(mv("d2d4")).await;
    assert!(matches!(failed, Err(SessionError::EngineFailure { .. })));

    let retried = session.retry_engine_move().await;

    assert!(matches!(retried, Err(SessionError::Halted(_))));
    assert!(matches!(session.status(), SessionStatus::Halted { .. }));
    assert_eq!(session.history().len(), 1);
    assert_eq!(engine_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_engine_mate_finishes_session() {
    let engine_calls = counter();
    let engine = ScriptedEngine {
        replies: VecDeque::from([mv("d8h4")]),
        calls: Arc::clone(&engine_calls),
    };
    let rules = ChessRules::from_fen("rnbqkbnr/pppp1ppp/8/4p3/8/5P2/PPPPP1PP/RNBQKBNR w KQkq - 0 2")
        .expect("valid fen");
    let harness = ready_session(rules, SessionConfig::default(), engine).await;
    let session = &harness.session;

    let turn = session
        .submit_human_move(mv("g2g4"))
        .await
        .expect("turn commits");

    let outcome = Outcome::Checkmate {
        winner: Side::Black,
    };
    assert_eq!(*turn.engine_move(), Some(mv("d8h4")));
    assert_eq!(turn.state().outcome(), Some(outcome));
    assert_eq!(session.status(), SessionStatus::Finished(outcome));
    assert_eq!(session.history().len(), 2);

    let after = session.submit_human_move(mv("e2e3")).await;
    assert_eq!(after, Err(SessionError::GameOver(outcome)));
    assert_eq!(engine_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_mating_move_ends_game_without_engine() {
    let engine_calls = counter();
    let rules = ChessRules::from_fen("7k/8/6K1/8/8/8/8/1Q6 w - - 0 1").expect("valid fen");
    let harness = ready_session(rules, SessionConfig::default(), first_legal(&engine_calls)).await;
    let session = &harness.session;

    let turn = session
        .submit_human_move(mv("b1b8"))
        .await
        .expect("mate commits");

    let outcome = Outcome::Checkmate {
        winner: Side::White,
    };
    assert_eq!(*turn.engine_move(), None);
    assert_eq!(session.status(), SessionStatus::Finished(outcome));
    assert_eq!(session.history().len(), 1);
    assert_eq!(engine_calls.load(Ordering::SeqCst), 0);

    let after = session.submit_human_move(mv("g6g7")).await;
    assert_eq!(after, Err(SessionError::GameOver(outcome)));
}

#[tokio::test]
async fn test_commit_event_carries_new_entries() {
    let harness = ready_session(
        ChessRules::new(),
        SessionConfig::default(),
        first_legal(&counter()),
    )
    .await;
    let session = &harness.session;
    let mut events = session.subscribe();

    session
        .submit_human_move(mv("e2e4"))
        .await
        .expect("turn commits");

    loop {
        match events.recv().await.expect("event stream open") {
            SessionEvent::Committed { state, entries, status } => {
                assert_eq!(entries.len(), 2);
                assert_eq!(*entries[0].actor(), Actor::Human);
                assert_eq!(*entries[1].actor(), Actor::Engine);
                assert_eq!(state, session.current_state());
                assert_eq!(status, SessionStatus::Playable);
                break;
            }
            _ => continue,
        }
    }
}

#[tokio::test]
async fn test_failure_event_after_illegal_move() {
    let harness = ready_session(
        ChessRules::new(),
        SessionConfig::default(),
        first_legal(&counter()),
    )
    .await;
    let session = &harness.session;
    let mut events = session.subscribe();

    let _ = session.submit_human_move(mv("a1a5")).await;

    match events.recv().await.expect("event stream open") {
        SessionEvent::Failed { state, error } => {
            assert!(error.is_recoverable());
            assert_eq!(state, session.current_state());
        }
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_engine_plays_a_turn() {
    let search = SearchConfig::default()
        .with_search_depth(2)
        .with_cache_entries(1 << 10);
    let session = SessionController::start(
        Box::new(ChessRules::new()),
        SessionConfig::default(),
        Arc::new(SearchEngineFactory::new(search)),
    );
    assert_eq!(session.wait_for_engine().await, EngineStatus::Ready);

    let turn = session
        .submit_human_move(mv("e2e4"))
        .await
        .expect("turn commits");

    assert!(turn.engine_move().is_some());
    assert_eq!(turn.state().ply(), 2);
    assert_eq!(session.status(), SessionStatus::Playable);
}
