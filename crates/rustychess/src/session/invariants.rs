//! History invariants.
//!
//! Logical properties of a session's record that must hold after every
//! commit. The controller checks them in debug builds; tests can check them
//! directly.

use super::history::{Actor, HistoryLog};
use rustychess_core::GameState;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<InvariantViolation> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Borrowed view of everything a session has recorded.
#[derive(Debug, Clone, Copy)]
pub struct SessionRecord<'a> {
    /// Position the session started from.
    pub initial: &'a GameState,
    /// Applied moves.
    pub history: &'a HistoryLog,
    /// Canonical position.
    pub current: &'a GameState,
}

/// Invariant: each entry is exactly one ply after the previous one.
pub struct MonotonicPlyInvariant;

impl Invariant<SessionRecord<'_>> for MonotonicPlyInvariant {
    fn holds(record: &SessionRecord<'_>) -> bool {
        record
            .history
            .entries()
            .iter()
            .map(|entry| entry.state().ply())
            .try_fold(record.initial.ply(), |previous, ply| {
                (ply == previous + 1).then_some(ply)
            })
            .is_some()
    }

    fn description() -> &'static str {
        "Every history entry advances the ply count by one"
    }
}

/// Invariant: sides and actors alternate, starting with the human.
pub struct AlternatingTurnInvariant;

impl Invariant<SessionRecord<'_>> for AlternatingTurnInvariant {
    fn holds(record: &SessionRecord<'_>) -> bool {
        let mut side = record.initial.side_to_move();
        let mut actor = Actor::Human;
        for entry in record.history.entries() {
            if *entry.actor() != actor || entry.state().side_to_move() != side.opponent() {
                return false;
            }
            side = side.opponent();
            actor = match actor {
                Actor::Human => Actor::Engine,
                Actor::Engine => Actor::Human,
            };
        }
        true
    }

    fn description() -> &'static str {
        "Sides and actors alternate, human first"
    }
}

/// Invariant: the canonical position is the last recorded one.
pub struct CurrentMatchesHistoryInvariant;

impl Invariant<SessionRecord<'_>> for CurrentMatchesHistoryInvariant {
    fn holds(record: &SessionRecord<'_>) -> bool {
        match record.history.last() {
            Some(entry) => entry.state() == record.current,
            None => record.initial == record.current,
        }
    }

    fn description() -> &'static str {
        "Current position equals the last history entry"
    }
}

/// Every invariant a session record must satisfy.
pub type SessionInvariants = (
    MonotonicPlyInvariant,
    AlternatingTurnInvariant,
    CurrentMatchesHistoryInvariant,
);
