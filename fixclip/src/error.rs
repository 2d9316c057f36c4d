use thiserror::Error;

/// Errors reported by clipping, offsetting and coordinate scaling operations.
///
/// Degenerate paths (too few distinct points to form an edge or an area) are not errors, they are
/// skipped silently so that a batch with a few bad entries still produces a result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClipError {
    /// The operation was given parameters it cannot honor, nothing was computed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A coordinate falls outside of the range the sweep arithmetic supports.
    #[error("coordinate ({x}, {y}) is outside of the supported fixed point range")]
    NumericOverflow { x: f64, y: f64 },

    /// Internal sweep state became inconsistent, this indicates a defect rather than bad input.
    #[error("clipping engine invariant violated: {0}")]
    AlgorithmicInvariant(&'static str),
}

impl ClipError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        ClipError::InvalidConfiguration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ClipError>;
