//! Resolver states and terminal outcomes.

use thiserror::Error;

use crate::geometry::{Position, RegionFeature, Viewport};
use crate::location::LocationFailure;

/// Progress of the current locate invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    Idle,
    AwaitingPosition,
    AwaitingFeatures,
}

/// A successful match.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Device position that was matched
    pub position: Position,
    /// Region containing the position
    pub feature: RegionFeature,
    /// Bounding box the camera was fitted to
    pub viewport: Viewport,
}

/// Terminal result of one locate invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum LocateOutcome {
    /// Region found and camera fitted to it.
    Resolved(Resolution),
    /// Position obtained but no materialized region contains it.
    NoMatch { position: Position },
    /// Position obtained but the engine's style or tiles are not loaded.
    NotReady { position: Position },
    /// Position could not be obtained.
    Failed(LocationFailure),
}

impl LocateOutcome {
    /// Short outcome name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LocateOutcome::Resolved(_) => "resolved",
            LocateOutcome::NoMatch { .. } => "no_match",
            LocateOutcome::NotReady { .. } => "not_ready",
            LocateOutcome::Failed(_) => "failed",
        }
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            LocateOutcome::Resolved(resolution) => Some(resolution),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, LocateOutcome::Resolved(_))
    }
}

/// A locate trigger arrived while another invocation was in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Location request already in progress")]
pub struct ResolverBusy;
