//! # pubgate-state: Transition Lifecycle and Engine
//!
//! - **Lifecycle** (`lifecycle.rs`): the phase machine every transition
//!   request follows, `REQUESTED → ACCEPTED | REJECTED → APPLIED_EFFECT →
//!   DONE`, with a timestamped phase log.
//!
//! - **Engine** (`engine.rs`): the reference orchestrator. It resolves the
//!   transition, checks that it is available from the entity's current
//!   state, consults the guard, commits the destination state, and applies
//!   the publication effect exactly once.
//!
//! The phase machine is a runtime enum with a validated `advance`, not a
//! typestate: a run's path is decided by the guard at runtime.

pub mod engine;
pub mod lifecycle;

pub use engine::{EngineError, EngineResult, TransitionOutcome, TransitionReport, WorkflowEngine};
pub use lifecycle::{LifecycleError, PhaseRecord, TransitionPhase, TransitionRun};
