//! Reconciliation results.

use std::fmt;

use thiserror::Error;

use crate::engine::EngineError;

/// Why a single toggle could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Unknown layer toggle")]
    UnknownToggle,
}

/// A toggle that failed; the rest of the batch still ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileFailure {
    /// Toggle key, or the source id when a stray source could not be removed.
    pub key: String,
    pub error: ReconcileError,
}

impl fmt::Display for ReconcileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.error)
    }
}

/// Outcome of one [`reconcile`](super::LayerManager::reconcile) call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Keys whose layer was attached by this call.
    pub attached: Vec<String>,
    /// Keys whose layer was detached by this call.
    pub detached: Vec<String>,
    /// Keys already in the desired state.
    pub unchanged: Vec<String>,
    /// Stray sources removed by this call.
    pub released: Vec<String>,
    pub failures: Vec<ReconcileFailure>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// True when the call attached, detached or released anything.
    pub fn changed(&self) -> bool {
        !self.attached.is_empty() || !self.detached.is_empty() || !self.released.is_empty()
    }

    /// Fold a later report into this one.
    pub fn merge(&mut self, other: ReconcileReport) {
        self.attached.extend(other.attached);
        self.detached.extend(other.detached);
        self.unchanged.extend(other.unchanged);
        self.released.extend(other.released);
        self.failures.extend(other.failures);
    }

    pub(super) fn fail(&mut self, key: &str, error: impl Into<ReconcileError>) {
        self.failures.push(ReconcileFailure {
            key: key.to_string(),
            error: error.into(),
        });
    }
}

impl fmt::Display for ReconcileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} attached, {} detached, {} unchanged, {} failed",
            self.attached.len(),
            self.detached.len(),
            self.unchanged.len(),
            self.failures.len()
        )
    }
}
