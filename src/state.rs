//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the in-memory design store plus the parser and retry policy
//! built from configuration at startup. Parser limits are immutable for the
//! lifetime of the process and shared by every request.

use std::collections::HashMap;
use std::sync::Arc;

use rectscan_parser::{ParseResult, SvgParser};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::{AppConfig, RetryPolicy};

// =============================================================================
// DESIGN
// =============================================================================

/// An uploaded SVG and its parse result.
#[derive(Debug, Clone, Serialize)]
pub struct Design {
    pub id: Uuid,
    pub name: String,
    /// Upload time, unix milliseconds.
    pub uploaded_at: i64,
    pub size_bytes: usize,
    pub result: ParseResult,
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub designs: Arc<RwLock<HashMap<Uuid, Design>>>,
    pub parser: SvgParser,
    pub retry: RetryPolicy,
}

impl AppState {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            designs: Arc::new(RwLock::new(HashMap::new())),
            parser: SvgParser::new(config.limits),
            retry: config.retry,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use rectscan_parser::Limits;

    /// App state with default limits and a fast retry policy.
    #[must_use]
    pub fn test_app_state() -> AppState {
        test_app_state_with_limits(Limits::default())
    }

    #[must_use]
    pub fn test_app_state_with_limits(limits: Limits) -> AppState {
        let config = AppConfig { port: 0, limits, retry: RetryPolicy { attempts: 2, base_ms: 1 } };
        AppState::new(&config)
    }

    /// A small valid SVG with two in-bounds rectangles.
    pub const SAMPLE_SVG: &str = r##"<svg width="100" height="50"><rect x="0" y="0" width="10" height="10" fill="#FF0000"/><rect x="20" y="20" width="30" height="10"/></svg>"##;
}
