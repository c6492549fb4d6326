//! Consistency checks for a running game session.
//!
//! Each check looks at the markers, score and turn pointer together and
//! reports whether they still agree. The session runs them after every
//! transition; in debug builds a disagreement panics.

use crate::session::GameSession;
use crate::types::MarkerState;
use tracing::{instrument, warn};

/// A property of a session that transitions must preserve.
pub trait Invariant<S> {
    /// True when `state` satisfies the property.
    fn holds(state: &S) -> bool;

    /// Sentence logged when the property fails.
    fn description() -> &'static str;

    /// The failure report for `state`, if any.
    fn violation(state: &S) -> Option<InvariantViolation> {
        (!Self::holds(state)).then(|| InvariantViolation::new(Self::description()))
    }
}

/// A failed session check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// What the session got wrong.
    pub description: String,
}

impl InvariantViolation {
    /// Wraps a failure sentence.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Several session checks run as one.
pub trait InvariantSet<S> {
    /// Runs every check and collects the ones that failed.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, A, B, C> InvariantSet<S> for (A, B, C)
where
    A: Invariant<S>,
    B: Invariant<S>,
    C: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [A::violation(state), B::violation(state), C::violation(state)]
            .into_iter()
            .flatten()
            .collect();
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

/// Unclicked markers are exactly `next_expected..=marker_count`; clicked
/// markers all rank below `next_expected`.
pub struct ContiguousNumbering;

impl Invariant<GameSession> for ContiguousNumbering {
    fn holds(session: &GameSession) -> bool {
        let next = session.next_expected();
        let count = session.marker_count();
        let mut pending = 0u32;

        for marker in session.markers() {
            match marker.state() {
                MarkerState::Pending => {
                    if marker.number() < next || marker.number() > count {
                        return false;
                    }
                    pending += 1;
                }
                MarkerState::Decaying { .. } => {
                    if marker.number() >= next {
                        return false;
                    }
                }
            }
        }

        pending == (count + 1).saturating_sub(next)
    }

    fn description() -> &'static str {
        "Unclicked markers must be exactly the ranks from next_expected to the marker count"
    }
}

/// Each correct click advances both score and turn pointer by one.
pub struct ScoreTracksProgress;

impl Invariant<GameSession> for ScoreTracksProgress {
    fn holds(session: &GameSession) -> bool {
        session.score() + 1 == session.next_expected()
    }

    fn description() -> &'static str {
        "Score must equal next_expected - 1"
    }
}

/// Clicked markers count down within `(0, decay_duration]`.
pub struct DecayBounded;

impl Invariant<GameSession> for DecayBounded {
    fn holds(session: &GameSession) -> bool {
        let limit = *session.config().decay_duration_ms();
        session
            .markers()
            .filter_map(|marker| marker.remaining_decay_ms())
            .all(|remaining| remaining > 0 && remaining <= limit)
    }

    fn description() -> &'static str {
        "Decay countdown must stay positive and no longer than the decay duration"
    }
}

/// The checks run after every session transition.
pub type SessionInvariants = (ContiguousNumbering, ScoreTracksProgress, DecayBounded);

/// Logs every failed session check and panics on any in debug builds.
#[instrument(skip(session))]
pub fn assert_invariants(session: &GameSession) {
    if let Err(violations) = SessionInvariants::check_all(session) {
        for violation in &violations {
            warn!(description = %violation.description, "Invariant violated");
        }
        debug_assert!(violations.is_empty(), "Session invariants violated: {violations:?}");
    }
}
