//! Per-operation loading state
//!
//! Each operation moves `Idle -> Submitting -> {Success | Failed}` and is
//! back to `Idle` as soon as it returns. Success and failure are reported
//! through [`UpdateOutcome`]; the gate itself only tracks whether an
//! attempt is in flight.

use std::sync::atomic::{AtomicBool, Ordering};

use liftlog_model::Identity;
use log::debug;

use crate::common::validation::ValidationResult;
use crate::domains::profile::errors::ProfileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationPhase {
    Idle,
    Submitting,
}

/// At most one in-flight attempt per operation
#[derive(Debug)]
pub struct OperationGate {
    name: &'static str,
    submitting: AtomicBool,
}

impl OperationGate {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn phase(&self) -> OperationPhase {
        if self.submitting.load(Ordering::Acquire) {
            OperationPhase::Submitting
        } else {
            OperationPhase::Idle
        }
    }

    /// Enter `Submitting`, or `None` if an attempt is already running.
    /// Dropping the guard returns the gate to `Idle` on every path.
    pub fn try_begin(&self) -> Option<SubmitGuard<'_>> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        debug!("[Gate:{}] Idle -> Submitting", self.name);
        Some(SubmitGuard { gate: self })
    }
}

#[derive(Debug)]
pub struct SubmitGuard<'a> {
    gate: &'a OperationGate,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.gate.submitting.store(false, Ordering::Release);
        debug!("[Gate:{}] -> Idle", self.gate.name);
    }
}

/// Result of one profile or avatar attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Remote call succeeded and the session now holds this identity
    Updated(Identity),
    /// Local validation failed; nothing was sent
    Invalid(ValidationResult),
    /// The user closed the image picker
    Cancelled,
    /// Another attempt of the same operation is still in flight
    Busy,
    Failed(ProfileError),
}

impl UpdateOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, UpdateOutcome::Updated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_is_refused_while_first_is_held() {
        let gate = OperationGate::new("test");
        let guard = gate.try_begin();
        assert!(guard.is_some());
        assert_eq!(gate.phase(), OperationPhase::Submitting);
        assert!(gate.try_begin().is_none());

        drop(guard);
        assert_eq!(gate.phase(), OperationPhase::Idle);
        assert!(gate.try_begin().is_some());
    }

    #[test]
    fn gate_is_released_on_early_return() {
        fn attempt(gate: &OperationGate, bail: bool) -> Result<(), ()> {
            let _guard = gate.try_begin().ok_or(())?;
            if bail {
                return Err(());
            }
            Ok(())
        }

        let gate = OperationGate::new("test");
        assert!(attempt(&gate, true).is_err());
        assert_eq!(gate.phase(), OperationPhase::Idle);
        assert!(attempt(&gate, false).is_ok());
    }
}
