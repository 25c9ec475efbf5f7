//! Canvas size resolution from root attributes with `viewBox` fallback.

use crate::decode::Element;
use crate::error::ParseError;
use crate::limits::Limits;
use crate::numbers::{length_or_zero, parse_leading_number};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Resolve width/height off the root element.
///
/// Direct `width`/`height` attributes win when positive. A non-positive value
/// is replaced by the matching `viewBox` field when the `viewBox` has exactly
/// four numeric fields. The result is not validated here; see [`validate`].
#[must_use]
pub fn resolve(root: &Element) -> Dimensions {
    let mut width = length_or_zero(root.attribute("width"));
    let mut height = length_or_zero(root.attribute("height"));

    if width <= 0.0 || height <= 0.0 {
        if let Some([_, _, vb_width, vb_height]) = root.attribute("viewBox").and_then(parse_view_box) {
            if width <= 0.0 {
                width = vb_width;
            }
            if height <= 0.0 {
                height = vb_height;
            }
        }
    }

    Dimensions { width, height }
}

/// Split a `viewBox` on whitespace and/or commas into exactly four numbers.
fn parse_view_box(raw: &str) -> Option<[f64; 4]> {
    let fields: Vec<&str> = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|f| !f.is_empty())
        .collect();
    if fields.len() != 4 {
        return None;
    }

    let mut out = [0.0; 4];
    for (slot, field) in out.iter_mut().zip(&fields) {
        *slot = parse_leading_number(field)?;
    }
    Some(out)
}

/// Enforce positivity, then the configured ceiling.
///
/// # Errors
///
/// `InvalidDimensions` when either side is not positive, `DimensionTooLarge`
/// when either side exceeds [`Limits::dimension_ceiling`].
pub fn validate(dims: Dimensions, limits: &Limits) -> Result<Dimensions, ParseError> {
    if dims.width <= 0.0 || dims.height <= 0.0 {
        return Err(ParseError::InvalidDimensions { width: dims.width, height: dims.height });
    }
    let max = limits.dimension_ceiling();
    if dims.width > max || dims.height > max {
        return Err(ParseError::DimensionTooLarge { width: dims.width, height: dims.height, max });
    }
    Ok(dims)
}

#[cfg(test)]
#[path = "dimensions_test.rs"]
mod tests;
