//! Turn transactions between the human and the engine.

use super::error::SessionError;
use super::events::{CommittedTurn, SessionEvent, SessionStatus, SessionView};
use super::history::{Actor, HistoryEntry, HistoryLog};
use super::lifecycle::{EngineLifecycle, EngineStatus};
use crate::config::{EngineFailurePolicy, SessionConfig};
use rustychess_core::{GameState, Move, MoveValidator, Side};
use rustychess_engine::{DecisionEngine, EngineFactory};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, instrument, warn};

const EVENT_CAPACITY: usize = 64;

/// Canonical record. Written only by the holder of the turn lock.
#[derive(Debug)]
struct Record {
    current: GameState,
    history: HistoryLog,
    status: SessionStatus,
}

/// Clears the in-flight flag when a transaction ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

struct Inner {
    validator: Box<dyn MoveValidator>,
    config: SessionConfig,
    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    initial: GameState,
    human: Side,
    lifecycle: EngineLifecycle,
    /// Transaction lock. Owns the engine, which is only used inside a turn.
    turn: Mutex<Option<Box<dyn DecisionEngine>>>,
    in_flight: AtomicBool,
    record: RwLock<Record>,
    events: broadcast::Sender<SessionEvent>,
}

/// Orchestrates one chess session between a human and an engine.
///
/// Each human move is validated, answered by the engine, and the reply is
/// validated before both are committed together. The controller refuses new
/// work while a turn is in flight or the engine is not ready; it never
/// queues. Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("human", &self.inner.human)
            .field("engine", &self.inner.lifecycle.status())
            .field("in_flight", &self.is_in_flight())
            .finish_non_exhaustive()
    }
}

impl SessionController {
    /// Creates a session at the validator's initial position. The human
    /// plays the side to move there. The engine is not loaded yet.
    #[instrument(skip_all)]
    pub fn new(validator: Box<dyn MoveValidator>, config: SessionConfig) -> Self {
        let initial = validator.initial();
        let human = initial.side_to_move();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        info!(%human, position = %initial.position(), "Session created");

        Self {
            inner: Arc::new(Inner {
                validator,
                config,
                human,
                record: RwLock::new(Record {
                    current: initial.clone(),
                    history: HistoryLog::new(),
                    status: SessionStatus::Playable,
                }),
                initial,
                lifecycle: EngineLifecycle::new(),
                turn: Mutex::new(None),
                in_flight: AtomicBool::new(false),
                events,
            }),
        }
    }

    /// Creates a session and starts building its engine.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        validator: Box<dyn MoveValidator>,
        config: SessionConfig,
        factory: Arc<dyn EngineFactory>,
    ) -> Self {
        let session = Self::new(validator, config);
        session.initialize_engine(factory);
        session
    }

    /// Starts building the engine in the background.
    ///
    /// Single-flight: returns false and does nothing if loading was already
    /// requested. Must be called from within a tokio runtime.
    #[instrument(skip_all)]
    pub fn initialize_engine(&self, factory: Arc<dyn EngineFactory>) -> bool {
        if !self.inner.lifecycle.begin_loading() {
            return false;
        }
        self.inner
            .emit(SessionEvent::EngineStatusChanged(EngineStatus::Loading));

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            // Construction runs in its own task so a panicking factory still
            // settles the lifecycle.
            let build = tokio::spawn(async move { factory.construct().await });
            match build.await {
                Ok(Ok(engine)) => {
                    info!(engine = engine.name(), "Engine constructed");
                    *inner.turn.lock().await = Some(engine);
                    inner.lifecycle.mark_ready();
                }
                Ok(Err(e)) => {
                    inner.lifecycle.mark_failed(e.to_string());
                }
                Err(join) => {
                    tracing::error!(error = %join, "Engine construction aborted");
                    inner
                        .lifecycle
                        .mark_failed(format!("engine construction aborted: {join}"));
                }
            }
            inner.emit(SessionEvent::EngineStatusChanged(inner.lifecycle.status()));
        });
        true
    }

    /// Plays the human's move and the engine's reply as one transaction.
    ///
    /// # Errors
    ///
    /// - [`SessionError::IllegalMove`]: nothing changed, the engine was not
    ///   asked.
    /// - [`SessionError::EngineFailure`] / [`SessionError::EngineTimeout`]:
    ///   the human's move was committed alone and the session stopped being
    ///   playable.
    /// - Any other variant: the request was refused and nothing changed.
    #[instrument(skip(self), fields(mv = %candidate))]
    pub async fn submit_human_move(&self, candidate: Move) -> Result<CommittedTurn, SessionError> {
        let result = self.inner.submit(candidate).await;
        if let Err(err) = &result {
            self.inner.report(err);
        }
        result
    }

    /// Asks the engine again after a failure under the retry policy.
    /// On success the engine's entry is committed and the human is on move.
    #[instrument(skip(self))]
    pub async fn retry_engine_move(&self) -> Result<HistoryEntry, SessionError> {
        let result = self.inner.retry().await;
        if let Err(err) = &result {
            self.inner.report(err);
        }
        result
    }

    /// Whether a turn is being processed right now.
    pub fn is_in_flight(&self) -> bool {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    /// Read-only view of the session.
    pub fn snapshot(&self) -> SessionView {
        let record = self.inner.read();
        SessionView::new(
            record.current.clone(),
            record.status.clone(),
            self.inner.lifecycle.status(),
            record.history.len(),
            self.is_in_flight(),
        )
    }

    /// Canonical position.
    pub fn current_state(&self) -> GameState {
        self.inner.read().current.clone()
    }

    /// Session status.
    pub fn status(&self) -> SessionStatus {
        self.inner.read().status.clone()
    }

    /// Copy of the history log.
    pub fn history(&self) -> HistoryLog {
        self.inner.read().history.clone()
    }

    /// Engine lifecycle status.
    pub fn engine_status(&self) -> EngineStatus {
        self.inner.lifecycle.status()
    }

    /// Waits until the engine is ready or has failed.
    pub async fn wait_for_engine(&self) -> EngineStatus {
        self.inner.lifecycle.wait_until_settled().await
    }

    /// Receiver for session events. Only events sent after subscribing are seen.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Side the human plays.
    pub fn human_side(&self) -> Side {
        self.inner.human
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Every legal move for the side to move in the canonical position.
    pub fn legal_moves(&self) -> Vec<Move> {
        let current = self.current_state();
        self.inner.validator.legal_moves(&current)
    }
}

impl Inner {
    async fn submit(&self, candidate: Move) -> Result<CommittedTurn, SessionError> {
        self.lifecycle.ensure_ready()?;
        let mut turn = self.turn.try_lock().map_err(|_| SessionError::Busy)?;
        let _flight = InFlight::enter(&self.in_flight);

        let current = self.playable_state()?;
        let after_human = self
            .validator
            .apply_move(&current, candidate)
            .map_err(SessionError::IllegalMove)?;
        let human_entry = HistoryEntry::new(Actor::Human, candidate, after_human.clone());

        if let Some(outcome) = after_human.outcome() {
            info!(%outcome, "Human move ended the game");
            self.commit(vec![human_entry], SessionStatus::Finished(outcome));
            return Ok(CommittedTurn::new(candidate, None, after_human));
        }

        let engine = turn
            .as_deref_mut()
            .ok_or_else(|| SessionError::EngineNotReady(self.lifecycle.status()))?;

        match self.consult_engine(engine, &after_human).await {
            Ok((engine_move, after_engine)) => {
                let status = after_engine
                    .outcome()
                    .map_or(SessionStatus::Playable, SessionStatus::Finished);
                let engine_entry = HistoryEntry::new(Actor::Engine, engine_move, after_engine.clone());
                self.commit(vec![human_entry, engine_entry], status);
                Ok(CommittedTurn::new(candidate, Some(engine_move), after_engine))
            }
            Err(err) => {
                self.commit(vec![human_entry], self.failure_status(&err));
                Err(err)
            }
        }
    }

    async fn retry(&self) -> Result<HistoryEntry, SessionError> {
        self.lifecycle.ensure_ready()?;
        let mut turn = self.turn.try_lock().map_err(|_| SessionError::Busy)?;
        let _flight = InFlight::enter(&self.in_flight);

        let current = {
            let record = self.read();
            match &record.status {
                SessionStatus::AwaitingEngine { .. } => record.current.clone(),
                SessionStatus::Playable => return Err(SessionError::NothingToRetry),
                SessionStatus::Halted { reason } => return Err(SessionError::Halted(reason.clone())),
                SessionStatus::Finished(outcome) => return Err(SessionError::GameOver(*outcome)),
            }
        };

        let engine = turn
            .as_deref_mut()
            .ok_or_else(|| SessionError::EngineNotReady(self.lifecycle.status()))?;

        match self.consult_engine(engine, &current).await {
            Ok((engine_move, after_engine)) => {
                let status = after_engine
                    .outcome()
                    .map_or(SessionStatus::Playable, SessionStatus::Finished);
                let entry = HistoryEntry::new(Actor::Engine, engine_move, after_engine);
                self.commit(vec![entry.clone()], status);
                Ok(entry)
            }
            Err(err) => {
                self.write().status = self.failure_status(&err);
                Err(err)
            }
        }
    }

    /// Asks the engine for a reply to `state` and validates it.
    async fn consult_engine(
        &self,
        engine: &mut dyn DecisionEngine,
        state: &GameState,
    ) -> Result<(Move, GameState), SessionError> {
        self.emit(SessionEvent::EngineThinking {
            position: state.position().to_string(),
        });
        debug!(engine = engine.name(), position = %state.position(), "Waiting for engine");

        let reply = match self.config.engine_timeout() {
            Some(bound) => tokio::time::timeout(bound, engine.select_move(state.position()))
                .await
                .map_err(|_| SessionError::EngineTimeout {
                    millis: *self.config.engine_timeout_ms(),
                })?,
            None => engine.select_move(state.position()).await,
        };

        let engine_move = reply.map_err(|e| SessionError::EngineFailure {
            engine_move: None,
            reason: e.to_string(),
        })?;

        let next = self
            .validator
            .apply_move(state, engine_move)
            .map_err(|reason| SessionError::EngineFailure {
                engine_move: Some(engine_move),
                reason: reason.to_string(),
            })?;

        info!(mv = %engine_move, "Engine replied");
        Ok((engine_move, next))
    }

    fn playable_state(&self) -> Result<GameState, SessionError> {
        let record = self.read();
        match &record.status {
            SessionStatus::Playable => Ok(record.current.clone()),
            SessionStatus::AwaitingEngine { .. } => Err(SessionError::AwaitingEngine),
            SessionStatus::Halted { reason } => Err(SessionError::Halted(reason.clone())),
            SessionStatus::Finished(outcome) => Err(SessionError::GameOver(*outcome)),
        }
    }

    fn failure_status(&self, err: &SessionError) -> SessionStatus {
        let reason = err.to_string();
        match self.config.failure_policy() {
            EngineFailurePolicy::Halt => SessionStatus::Halted { reason },
            EngineFailurePolicy::Retry => SessionStatus::AwaitingEngine { reason },
        }
    }

    /// Appends `entries` and replaces the canonical position with the last
    /// one. Callers hold the turn lock.
    fn commit(&self, entries: Vec<HistoryEntry>, status: SessionStatus) {
        let state = {
            let mut record = self.write();
            for entry in &entries {
                record.history.append(entry.clone());
            }
            if let Some(last) = entries.last() {
                record.current = last.state().clone();
            }
            record.status = status.clone();

            #[cfg(debug_assertions)]
            self.audit(&record);

            record.current.clone()
        };

        info!(ply = state.ply(), appended = entries.len(), %status, "Committed");
        self.emit(SessionEvent::Committed {
            state,
            entries,
            status,
        });
    }

    #[cfg(debug_assertions)]
    fn audit(&self, record: &Record) {
        use super::invariants::{InvariantSet, SessionInvariants, SessionRecord};

        let view = SessionRecord {
            initial: &self.initial,
            history: &record.history,
            current: &record.current,
        };
        if let Err(violations) = SessionInvariants::check_all(&view) {
            for violation in violations {
                tracing::error!(%violation, "Session invariant violated");
            }
        }
        if record.status.is_playable() && record.current.side_to_move() != self.human {
            tracing::error!(human = %self.human, "Session playable while the engine is on move");
        }
    }

    fn report(&self, err: &SessionError) {
        if err.is_recoverable() {
            info!(error = %err, "Request refused");
        } else {
            warn!(error = %err, "Session failure");
        }
        let state = self.read().current.clone();
        self.emit(SessionEvent::Failed {
            state,
            error: err.clone(),
        });
    }

    fn emit(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!("No session event subscribers");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Record> {
        self.record.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Record> {
        self.record.write().unwrap_or_else(PoisonError::into_inner)
    }
}
