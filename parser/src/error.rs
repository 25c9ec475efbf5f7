//! Parse failure taxonomy.
//!
//! Every variant is terminal for the call that produced it. Per-rectangle
//! problems (bad geometry, excess count) never surface here; they are
//! absorbed into the result instead.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("svg payload is {size} bytes, exceeding the {limit} byte limit")]
    PayloadTooLarge { size: u64, limit: usize },
    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout { operation: &'static str, timeout_ms: u64 },
    #[error("invalid xml: {0}")]
    InvalidXml(String),
    #[error("missing <svg> root element")]
    MissingRootElement,
    #[error("invalid svg dimensions: width={width}, height={height}")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("svg dimensions {width}x{height} exceed the maximum of {max}")]
    DimensionTooLarge { width: f64, height: f64, max: f64 },
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl ParseError {
    /// Stable machine-readable code for transport layers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PayloadTooLarge { .. } => "E_PAYLOAD_TOO_LARGE",
            Self::Timeout { .. } => "E_TIMEOUT",
            Self::InvalidXml(_) => "E_INVALID_XML",
            Self::MissingRootElement => "E_MISSING_ROOT_ELEMENT",
            Self::InvalidDimensions { .. } => "E_INVALID_DIMENSIONS",
            Self::DimensionTooLarge { .. } => "E_DIMENSION_TOO_LARGE",
            Self::Io { .. } => "E_IO",
        }
    }

    /// Whether retrying the same input could plausibly succeed.
    ///
    /// Only a decode timeout depends on machine load; every other failure is
    /// a property of the input (or of storage, which the caller owns).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// True when the failure originates outside the submitted document.
    #[must_use]
    pub fn is_server_side(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}
