//! # Transition Lifecycle
//!
//! Every transition request moves through a fixed phase sequence:
//!
//! ```text
//! Requested ──▶ Accepted ──▶ EffectApplied ──▶ Done
//!     │
//!     ▼
//! Rejected ──▶ Done
//! ```
//!
//! The guard decides `Accepted` or `Rejected`. The effect applier only runs
//! after `Accepted`, so a rejected request can never reach `EffectApplied`.
//! [`TransitionRun`] records each phase change with a timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ─── Phases ──────────────────────────────────────────────────────────

/// Phase of a single transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitionPhase {
    /// The caller asked for the transition.
    Requested,
    /// The guard allowed it and the destination state was committed.
    Accepted,
    /// The guard denied it.
    Rejected,
    /// The publication effect ran.
    #[serde(rename = "APPLIED_EFFECT")]
    EffectApplied,
    /// Finished. Terminal.
    Done,
}

impl TransitionPhase {
    /// Every phase, in lifecycle order.
    pub const ALL: [TransitionPhase; 5] = [
        Self::Requested,
        Self::Accepted,
        Self::Rejected,
        Self::EffectApplied,
        Self::Done,
    ];

    /// The canonical string name of this phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "REQUESTED",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::EffectApplied => "APPLIED_EFFECT",
            Self::Done => "DONE",
        }
    }

    /// Parse a canonical phase name. Returns `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "REQUESTED" => Some(Self::Requested),
            "ACCEPTED" => Some(Self::Accepted),
            "REJECTED" => Some(Self::Rejected),
            "APPLIED_EFFECT" => Some(Self::EffectApplied),
            "DONE" => Some(Self::Done),
            _ => None,
        }
    }

    /// Whether this is the terminal phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Phases reachable in one step from this one.
    pub fn valid_transitions(&self) -> &'static [TransitionPhase] {
        match self {
            Self::Requested => &[Self::Accepted, Self::Rejected],
            Self::Accepted => &[Self::EffectApplied],
            Self::Rejected => &[Self::Done],
            Self::EffectApplied => &[Self::Done],
            Self::Done => &[],
        }
    }

    /// Whether `to` is reachable in one step.
    pub fn can_advance_to(&self, to: TransitionPhase) -> bool {
        self.valid_transitions().contains(&to)
    }
}

impl std::fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors from driving a [`TransitionRun`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The requested phase is not reachable from the current one.
    #[error("invalid transition phase change for run {run_id}: {from} -> {to}")]
    InvalidPhase {
        /// The run being advanced.
        run_id: Uuid,
        /// Current phase.
        from: TransitionPhase,
        /// Requested phase.
        to: TransitionPhase,
    },
}

// ─── Run ─────────────────────────────────────────────────────────────

/// One recorded phase change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub from: TransitionPhase,
    pub to: TransitionPhase,
    pub at: DateTime<Utc>,
}

/// Phase tracker for one transition request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRun {
    id: Uuid,
    phase: TransitionPhase,
    started_at: DateTime<Utc>,
    log: Vec<PhaseRecord>,
}

impl TransitionRun {
    /// A fresh run in [`TransitionPhase::Requested`].
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: TransitionPhase::Requested,
            started_at: Utc::now(),
            log: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Phase changes so far, oldest first.
    pub fn log(&self) -> &[PhaseRecord] {
        &self.log
    }

    /// Phases visited so far, starting with `Requested`.
    pub fn phases(&self) -> Vec<TransitionPhase> {
        std::iter::once(TransitionPhase::Requested)
            .chain(self.log.iter().map(|record| record.to))
            .collect()
    }

    pub fn is_done(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Move to phase `to`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidPhase`] if `to` is not reachable from
    /// the current phase. The run is unchanged in that case.
    pub fn advance(&mut self, to: TransitionPhase) -> Result<(), LifecycleError> {
        if !self.phase.can_advance_to(to) {
            return Err(LifecycleError::InvalidPhase {
                run_id: self.id,
                from: self.phase,
                to,
            });
        }
        self.log.push(PhaseRecord {
            from: self.phase,
            to,
            at: Utc::now(),
        });
        self.phase = to;
        Ok(())
    }
}

impl Default for TransitionRun {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_run_is_requested() {
        let run = TransitionRun::new();
        assert_eq!(run.phase(), TransitionPhase::Requested);
        assert!(run.log().is_empty());
        assert!(!run.is_done());
    }

    #[test]
    fn accepted_path() {
        let mut run = TransitionRun::new();
        run.advance(TransitionPhase::Accepted).unwrap();
        run.advance(TransitionPhase::EffectApplied).unwrap();
        run.advance(TransitionPhase::Done).unwrap();
        assert!(run.is_done());
        assert_eq!(
            run.phases(),
            vec![
                TransitionPhase::Requested,
                TransitionPhase::Accepted,
                TransitionPhase::EffectApplied,
                TransitionPhase::Done,
            ]
        );
        assert_eq!(run.log()[1].from, TransitionPhase::Accepted);
    }

    #[test]
    fn rejected_path() {
        let mut run = TransitionRun::new();
        run.advance(TransitionPhase::Rejected).unwrap();
        run.advance(TransitionPhase::Done).unwrap();
        assert_eq!(run.log().len(), 2);
    }

    #[test]
    fn rejected_cannot_apply_effect() {
        let mut run = TransitionRun::new();
        run.advance(TransitionPhase::Rejected).unwrap();
        let err = run.advance(TransitionPhase::EffectApplied).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::InvalidPhase {
                run_id: run.id(),
                from: TransitionPhase::Rejected,
                to: TransitionPhase::EffectApplied,
            }
        );
        assert_eq!(run.phase(), TransitionPhase::Rejected);
        assert_eq!(run.log().len(), 1);
    }

    #[test]
    fn effect_requires_acceptance() {
        let mut run = TransitionRun::new();
        assert!(run.advance(TransitionPhase::EffectApplied).is_err());
        assert!(run.advance(TransitionPhase::Done).is_err());
    }

    #[test]
    fn done_is_terminal() {
        assert!(TransitionPhase::Done.valid_transitions().is_empty());
        for phase in TransitionPhase::ALL {
            assert_eq!(phase.is_terminal(), phase == TransitionPhase::Done);
        }
    }

    #[test]
    fn names_round_trip() {
        for phase in TransitionPhase::ALL {
            assert_eq!(TransitionPhase::from_name(phase.as_str()), Some(phase));
        }
        assert_eq!(TransitionPhase::from_name("requested"), None);
    }

    #[test]
    fn serde_uses_canonical_names() {
        assert_eq!(
            serde_json::to_string(&TransitionPhase::EffectApplied).unwrap(),
            "\"APPLIED_EFFECT\""
        );
        assert_eq!(
            serde_json::from_str::<TransitionPhase>("\"REJECTED\"").unwrap(),
            TransitionPhase::Rejected
        );
    }

    #[test]
    fn error_display() {
        let id = Uuid::nil();
        let err = LifecycleError::InvalidPhase {
            run_id: id,
            from: TransitionPhase::Done,
            to: TransitionPhase::Accepted,
        };
        assert_eq!(
            err.to_string(),
            format!("invalid transition phase change for run {id}: DONE -> ACCEPTED")
        );
    }
}
