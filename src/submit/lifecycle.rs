//! Request lifecycle tracking
//!
//! Each user-facing action owns an [`ActionSlot`]. Starting the action takes
//! an [`InFlight`] guard; a second start while the guard is alive is refused.
//! Dropping the guard (on any exit path) returns the slot to idle.

use crate::error::{Error, Result};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Lifecycle state of one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// Ready to be triggered
    Idle,
    /// Request is in flight
    Pending,
    /// Request succeeded (reported through `last_outcome`)
    Fulfilled,
    /// Request failed with this message (reported through `last_outcome`)
    Rejected(String),
}

#[derive(Debug)]
struct SlotInner {
    state: SubmissionState,
    last_outcome: Option<SubmissionState>,
}

/// Single-flight guard for one action
#[derive(Debug)]
pub struct ActionSlot {
    action: &'static str,
    inner: Mutex<SlotInner>,
}

impl ActionSlot {
    /// Create an idle slot for the named action
    pub const fn new(action: &'static str) -> Self {
        Self {
            action,
            inner: Mutex::new(SlotInner {
                state: SubmissionState::Idle,
                last_outcome: None,
            }),
        }
    }

    /// Action name, used in messages
    pub const fn action(&self) -> &'static str {
        self.action
    }

    fn lock(&self) -> MutexGuard<'_, SlotInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current state
    pub fn state(&self) -> SubmissionState {
        self.lock().state.clone()
    }

    /// Whether a request is in flight
    pub fn is_pending(&self) -> bool {
        self.state() == SubmissionState::Pending
    }

    /// Outcome of the most recent settled request
    pub fn last_outcome(&self) -> Option<SubmissionState> {
        self.lock().last_outcome.clone()
    }

    /// Move to pending, or fail with [`Error::Busy`] if already in flight
    pub fn try_begin(&self) -> Result<InFlight<'_>> {
        let mut inner = self.lock();
        if inner.state == SubmissionState::Pending {
            return Err(Error::Busy(self.action));
        }
        inner.state = SubmissionState::Pending;
        debug!(action = self.action, "Request pending");
        Ok(InFlight {
            slot: self,
            settled: false,
        })
    }
}

/// Proof that an action is in flight; returns the slot to idle on drop
///
/// Only one guard exists per slot at a time, so while the state is
/// `Pending` it belongs to the live guard.
#[derive(Debug)]
pub struct InFlight<'a> {
    slot: &'a ActionSlot,
    settled: bool,
}

impl InFlight<'_> {
    /// Record the outcome of the request and release the slot
    ///
    /// The outcome and the return to idle are written under one lock.
    pub fn settle<T>(mut self, result: &Result<T>) {
        let outcome = match result {
            Ok(_) => SubmissionState::Fulfilled,
            Err(e) => SubmissionState::Rejected(e.to_string()),
        };
        debug!(action = self.slot.action, ?outcome, "Request settled");

        let mut inner = self.slot.lock();
        inner.last_outcome = Some(outcome);
        inner.state = SubmissionState::Idle;
        drop(inner);
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut inner = self.slot.lock();
        if inner.state == SubmissionState::Pending {
            inner.state = SubmissionState::Idle;
        }
    }
}
