//! Rectangle extraction from the root's `<rect>` children.
//!
//! DESIGN
//! ======
//! Nothing in here fails. Rectangles past `max_rectangles` are ignored,
//! rectangles with a non-positive side are dropped, and rectangles that spill
//! past the canvas are kept but flagged.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::decode::Element;
use crate::dimensions::Dimensions;
use crate::numbers::length_or_zero;

pub const DEFAULT_FILL: &str = "#000000";

/// One extracted `<rect>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub is_out_of_bounds: bool,
}

impl Rectangle {
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Extract rectangles in document order.
#[must_use]
pub fn extract(root: &Element, canvas: Dimensions, max_rectangles: usize) -> Vec<Rectangle> {
    let nodes = root.children_named("rect");

    let nodes = if nodes.len() > max_rectangles {
        warn!(total = nodes.len(), max = max_rectangles, "rectangle count exceeds limit; truncating");
        &nodes[..max_rectangles]
    } else {
        nodes
    };

    let items: Vec<Rectangle> = nodes.iter().filter_map(|node| to_rectangle(node, canvas)).collect();

    let dropped = nodes.len() - items.len();
    if dropped > 0 {
        debug!(dropped, "dropped rectangles with non-positive size");
    }

    items
}

fn to_rectangle(node: &Element, canvas: Dimensions) -> Option<Rectangle> {
    let width = length_or_zero(node.attribute("width"));
    let height = length_or_zero(node.attribute("height"));
    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    let x = length_or_zero(node.attribute("x"));
    let y = length_or_zero(node.attribute("y"));
    let is_out_of_bounds = x + width > canvas.width || y + height > canvas.height;

    Some(Rectangle { x, y, width, height, fill: resolve_fill(node), is_out_of_bounds })
}

/// `fill` attribute, then `fill:` inside `style`, then black.
fn resolve_fill(node: &Element) -> String {
    if let Some(fill) = node.attribute("fill").filter(|f| !f.trim().is_empty()) {
        return fill.to_owned();
    }
    node.attribute("style")
        .and_then(style_fill)
        .unwrap_or(DEFAULT_FILL)
        .to_owned()
}

fn style_fill(style: &str) -> Option<&str> {
    style.split(';').find_map(|decl| {
        let (name, value) = decl.split_once(':')?;
        let value = value.trim();
        (name.trim().eq_ignore_ascii_case("fill") && !value.is_empty()).then_some(value)
    })
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
