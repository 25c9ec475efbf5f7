//! Design service: upload, list, fetch, delete.
//!
//! DESIGN
//! ======
//! Uploads are parsed before anything is stored, so the store only ever
//! holds designs with a valid parse result. Parse failures are returned to
//! the caller unchanged; only transient ones (decode timeouts) are retried,
//! with linear backoff.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rectscan_parser::{Issue, ParseError, ParseResult, SvgParser};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::RetryPolicy;
use crate::state::{AppState, Design};

const DEFAULT_DESIGN_NAME: &str = "Untitled design";
const MAX_DESIGN_NAME_CHARS: usize = 200;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    #[error("design not found: {0}")]
    NotFound(Uuid),
    #[error("upload is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl DesignError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_DESIGN_NOT_FOUND",
            Self::InvalidEncoding(_) => "E_INVALID_ENCODING",
            Self::Parse(e) => e.error_code(),
        }
    }
}

/// List view of a design, without the rectangle list.
#[derive(Debug, Clone, Serialize)]
pub struct DesignSummary {
    pub id: Uuid,
    pub name: String,
    pub uploaded_at: i64,
    pub size_bytes: usize,
    pub items_count: usize,
    pub coverage_ratio: f64,
    pub issues: Vec<Issue>,
}

impl From<&Design> for DesignSummary {
    fn from(design: &Design) -> Self {
        Self {
            id: design.id,
            name: design.name.clone(),
            uploaded_at: design.uploaded_at,
            size_bytes: design.size_bytes,
            items_count: design.result.items_count(),
            coverage_ratio: design.result.coverage_ratio(),
            issues: design.result.issues().to_vec(),
        }
    }
}

// =============================================================================
// PARSE
// =============================================================================

/// Parse `svg`, retrying transient failures per `retry`.
///
/// # Errors
///
/// Returns the last parse error once attempts run out, or the first
/// non-transient error immediately.
pub async fn parse_with_retry(parser: &SvgParser, svg: &str, retry: RetryPolicy) -> Result<ParseResult, ParseError> {
    retry_transient(retry, || parser.parse(svg)).await
}

/// Run `op` until it succeeds, fails non-transiently, or attempts run out.
/// Attempt `n` is followed by an `n * base_ms` sleep before the next one.
pub(crate) async fn retry_transient<T, F, Fut>(retry: RetryPolicy, mut op: F) -> Result<T, ParseError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ParseError>>,
{
    let attempts = retry.attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < attempts => {
                warn!(error = %e, attempt, total = attempts, "svg parse failed; retrying");
                tokio::time::sleep(Duration::from_millis(attempt as u64 * retry.base_ms)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

// =============================================================================
// CREATE
// =============================================================================

/// Parse an uploaded SVG and store it as a new design.
///
/// # Errors
///
/// Returns `Parse` if the SVG fails any validation gate.
pub async fn create_design(state: &AppState, name: Option<&str>, svg: &str) -> Result<Design, DesignError> {
    let result = parse_with_retry(&state.parser, svg, state.retry).await?;

    let design = Design {
        id: Uuid::new_v4(),
        name: normalize_name(name),
        uploaded_at: now_millis(),
        size_bytes: svg.len(),
        result,
    };

    info!(
        id = %design.id,
        items = design.result.items_count(),
        coverage = design.result.coverage_ratio(),
        "design stored"
    );

    state.designs.write().await.insert(design.id, design.clone());
    Ok(design)
}

fn normalize_name(name: Option<&str>) -> String {
    let trimmed = name.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return DEFAULT_DESIGN_NAME.to_owned();
    }
    trimmed.chars().take(MAX_DESIGN_NAME_CHARS).collect()
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}

// =============================================================================
// READ
// =============================================================================

/// All designs, newest first.
pub async fn list_designs(state: &AppState) -> Vec<DesignSummary> {
    let designs = state.designs.read().await;
    let mut summaries: Vec<DesignSummary> = designs.values().map(DesignSummary::from).collect();
    summaries.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then_with(|| a.id.cmp(&b.id)));
    summaries
}

/// Fetch one design.
///
/// # Errors
///
/// Returns `NotFound` if no design has this ID.
pub async fn get_design(state: &AppState, id: Uuid) -> Result<Design, DesignError> {
    state
        .designs
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or(DesignError::NotFound(id))
}

// =============================================================================
// DELETE
// =============================================================================

/// Remove a design.
///
/// # Errors
///
/// Returns `NotFound` if no design has this ID.
pub async fn delete_design(state: &AppState, id: Uuid) -> Result<(), DesignError> {
    if state.designs.write().await.remove(&id).is_none() {
        return Err(DesignError::NotFound(id));
    }
    info!(%id, "design deleted");
    Ok(())
}

#[cfg(test)]
#[path = "design_test.rs"]
mod tests;
