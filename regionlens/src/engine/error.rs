//! Rendering engine errors.

use thiserror::Error;

/// Errors reported by a [`MapEngine`](super::MapEngine) when a style mutation
/// is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A source with this id is already present.
    #[error("Source '{0}' already exists")]
    SourceExists(String),

    /// No source with this id is present.
    #[error("Source '{0}' does not exist")]
    SourceMissing(String),

    /// Source cannot be removed while a layer still references it.
    #[error("Source '{source_id}' is still used by layer '{layer_id}'")]
    SourceInUse { source_id: String, layer_id: String },

    /// A layer with this id is already present.
    #[error("Layer '{0}' already exists")]
    LayerExists(String),

    /// No layer with this id is present.
    #[error("Layer '{0}' does not exist")]
    LayerMissing(String),

    /// The engine rejected the request for another reason.
    #[error("Engine rejected request: {0}")]
    Rejected(String),
}
