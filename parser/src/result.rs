//! Parse output: canvas size, rectangles, and derived metrics.

use serde::Serialize;

use crate::dimensions::Dimensions;
use crate::extract::Rectangle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Issue {
    /// No rectangle survived extraction.
    Empty,
    /// At least one rectangle extends past the canvas.
    OutOfBounds,
}

impl Issue {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "EMPTY",
            Self::OutOfBounds => "OUT_OF_BOUNDS",
        }
    }
}

/// Immutable parse result. Count, coverage, and issues are derived from the
/// rectangles at construction and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    svg_width: f64,
    svg_height: f64,
    items: Vec<Rectangle>,
    items_count: usize,
    coverage_ratio: f64,
    issues: Vec<Issue>,
}

impl ParseResult {
    #[must_use]
    pub fn new(canvas: Dimensions, items: Vec<Rectangle>) -> Self {
        let coverage_ratio = coverage_ratio(canvas, &items);
        let issues = collect_issues(&items);
        Self {
            svg_width: canvas.width,
            svg_height: canvas.height,
            items_count: items.len(),
            items,
            coverage_ratio,
            issues,
        }
    }

    #[must_use]
    pub fn svg_width(&self) -> f64 {
        self.svg_width
    }

    #[must_use]
    pub fn svg_height(&self) -> f64 {
        self.svg_height
    }

    #[must_use]
    pub fn items(&self) -> &[Rectangle] {
        &self.items
    }

    #[must_use]
    pub fn items_count(&self) -> usize {
        self.items_count
    }

    #[must_use]
    pub fn coverage_ratio(&self) -> f64 {
        self.coverage_ratio
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub fn has_issue(&self, issue: Issue) -> bool {
        self.issues.contains(&issue)
    }
}

/// Summed rectangle area over canvas area, rounded to 4 decimal places.
///
/// Overlaps are counted once per rectangle, so the ratio can exceed 1.0.
/// An empty list is exactly `0.0`, and a sum that overflows saturates at
/// `f64::MAX` so the ratio always serializes as a JSON number.
fn coverage_ratio(canvas: Dimensions, items: &[Rectangle]) -> f64 {
    // `Sum for f64` starts from -0.0.
    #[allow(clippy::unnecessary_fold)]
    let covered = items.iter().map(Rectangle::area).fold(0.0, |acc, area| acc + area);
    let ratio = round4(covered / canvas.area());
    if ratio.is_finite() { ratio } else { f64::MAX }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn collect_issues(items: &[Rectangle]) -> Vec<Issue> {
    let mut issues = Vec::new();
    if items.is_empty() {
        issues.push(Issue::Empty);
    }
    if items.iter().any(|r| r.is_out_of_bounds) {
        issues.push(Issue::OutOfBounds);
    }
    issues
}

#[cfg(test)]
#[path = "result_test.rs"]
mod tests;
