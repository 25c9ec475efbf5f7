//! Defensive limits applied to every parse.
//!
//! DESIGN
//! ======
//! `Limits` is a plain `Copy` value handed to each parse call. Callers that
//! want process-wide limits build one at startup and share it; tests build
//! their own. Nothing here is global or mutable.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_MAX_RECTANGLES: usize = 10_000;
pub const DEFAULT_MAX_DIMENSION: f64 = 100_000.0;
pub const DEFAULT_PARSE_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    /// Inputs longer than this many bytes fail before decoding.
    pub max_file_size_bytes: usize,
    /// Rectangles past this index (document order) are ignored.
    pub max_rectangles: usize,
    /// Canvas width or height above this fails validation. A non-finite or
    /// non-positive value is ignored in favor of the default; see
    /// [`Limits::dimension_ceiling`].
    pub max_dimension: f64,
    /// Wall-clock budget for the XML decode step.
    pub parse_timeout_ms: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            max_rectangles: DEFAULT_MAX_RECTANGLES,
            max_dimension: DEFAULT_MAX_DIMENSION,
            parse_timeout_ms: DEFAULT_PARSE_TIMEOUT_MS,
        }
    }
}

impl Limits {
    #[must_use]
    pub fn with_max_file_size_bytes(mut self, bytes: usize) -> Self {
        self.max_file_size_bytes = bytes;
        self
    }

    #[must_use]
    pub fn with_max_rectangles(mut self, count: usize) -> Self {
        self.max_rectangles = count;
        self
    }

    #[must_use]
    pub fn with_max_dimension(mut self, dimension: f64) -> Self {
        self.max_dimension = dimension;
        self
    }

    #[must_use]
    pub fn with_parse_timeout_ms(mut self, ms: u64) -> Self {
        self.parse_timeout_ms = ms;
        self
    }

    /// The ceiling actually enforced on canvas dimensions.
    #[must_use]
    pub fn dimension_ceiling(&self) -> f64 {
        if is_valid_dimension(self.max_dimension) { self.max_dimension } else { DEFAULT_MAX_DIMENSION }
    }

    #[must_use]
    pub fn parse_timeout(&self) -> Duration {
        Duration::from_millis(self.parse_timeout_ms)
    }
}

/// Finite and strictly positive: the only usable dimension ceilings.
#[must_use]
pub fn is_valid_dimension(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let limits = Limits::default();
        assert_eq!(limits.max_file_size_bytes, 5_242_880);
        assert_eq!(limits.max_rectangles, 10_000);
        assert!((limits.max_dimension - 100_000.0).abs() < f64::EPSILON);
        assert_eq!(limits.parse_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn overrides_touch_only_their_field() {
        let limits = Limits::default().with_max_rectangles(3);
        assert_eq!(limits.max_rectangles, 3);
        assert_eq!(limits.max_file_size_bytes, DEFAULT_MAX_FILE_SIZE_BYTES);
        assert_eq!(limits.parse_timeout_ms, DEFAULT_PARSE_TIMEOUT_MS);
    }

    #[test]
    fn unusable_dimension_ceiling_falls_back_to_default() {
        for bad in [f64::NAN, f64::INFINITY, 0.0, -10.0] {
            let limits = Limits::default().with_max_dimension(bad);
            assert!((limits.dimension_ceiling() - DEFAULT_MAX_DIMENSION).abs() < f64::EPSILON, "{bad}");
        }
        let limits = Limits::default().with_max_dimension(250.0);
        assert!((limits.dimension_ceiling() - 250.0).abs() < f64::EPSILON);
    }
}
