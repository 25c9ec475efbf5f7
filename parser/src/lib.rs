//! SVG rectangle extraction under defensive limits.
//!
//! PIPELINE
//! ========
//! size guard -> XML decode (deadline) -> root check -> dimension resolve ->
//! dimension validation -> rectangle extraction -> metrics.
//!
//! Every gate before extraction fails the whole call with a [`ParseError`].
//! Extraction itself never fails: bad rectangles are dropped, excess ones are
//! ignored, and overflowing ones are flagged on the result.

pub mod decode;
pub mod dimensions;
pub mod error;
pub mod extract;
pub mod limits;
pub mod numbers;
pub mod result;

use std::path::Path;

use tracing::debug;

pub use decode::{Children, Element, as_list};
pub use dimensions::Dimensions;
pub use error::ParseError;
pub use extract::{DEFAULT_FILL, Rectangle};
pub use limits::Limits;
pub use result::{Issue, ParseResult};

const ROOT_ELEMENT: &str = "svg";

/// A parser bound to one set of limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgParser {
    limits: Limits,
}

impl SvgParser {
    #[must_use]
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    #[must_use]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Parse SVG text.
    ///
    /// # Errors
    ///
    /// Returns the first validation gate that fails; see [`ParseError`].
    pub async fn parse(&self, svg: &str) -> Result<ParseResult, ParseError> {
        check_size(svg.len() as u64, &self.limits)?;
        let root = decode::decode_with_timeout(svg.to_owned(), self.limits.parse_timeout()).await?;
        let result = build_result(&root, &self.limits)?;
        debug!(
            width = result.svg_width(),
            height = result.svg_height(),
            items = result.items_count(),
            coverage = result.coverage_ratio(),
            "svg parsed"
        );
        Ok(result)
    }

    /// Read a UTF-8 file and parse it.
    ///
    /// The file size is checked against the limit before the read so an
    /// oversized file is never loaded.
    ///
    /// # Errors
    ///
    /// `Io` when the file cannot be read, otherwise as [`SvgParser::parse`].
    pub async fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParseResult, ParseError> {
        let path = path.as_ref();
        let io_err = |e: std::io::Error| ParseError::Io { path: path.display().to_string(), message: e.to_string() };

        let metadata = tokio::fs::metadata(path).await.map_err(io_err)?;
        check_size(metadata.len(), &self.limits)?;

        let text = tokio::fs::read_to_string(path).await.map_err(io_err)?;
        self.parse(&text).await
    }
}

/// Parse SVG text with default limits.
///
/// # Errors
///
/// See [`SvgParser::parse`].
pub async fn parse(svg: &str) -> Result<ParseResult, ParseError> {
    SvgParser::default().parse(svg).await
}

/// Parse an SVG file with default limits.
///
/// # Errors
///
/// See [`SvgParser::parse_file`].
pub async fn parse_file(path: impl AsRef<Path>) -> Result<ParseResult, ParseError> {
    SvgParser::default().parse_file(path).await
}

fn check_size(size: u64, limits: &Limits) -> Result<(), ParseError> {
    if size > limits.max_file_size_bytes as u64 {
        return Err(ParseError::PayloadTooLarge { size, limit: limits.max_file_size_bytes });
    }
    Ok(())
}

/// Run the post-decode gates and extraction over an already decoded tree.
///
/// # Errors
///
/// `MissingRootElement`, `InvalidDimensions`, or `DimensionTooLarge`.
pub fn build_result(root: &Element, limits: &Limits) -> Result<ParseResult, ParseError> {
    if root.name != ROOT_ELEMENT {
        return Err(ParseError::MissingRootElement);
    }
    let canvas = dimensions::validate(dimensions::resolve(root), limits)?;
    let items = extract::extract(root, canvas, limits.max_rectangles);
    Ok(ParseResult::new(canvas, items))
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
