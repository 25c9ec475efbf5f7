use super::*;
use crate::decode::decode;

const CANVAS: Dimensions = Dimensions { width: 800.0, height: 600.0 };

fn extract_str(svg: &str) -> Vec<Rectangle> {
    extract(&decode(svg).unwrap(), CANVAS, 10_000)
}

fn one_rect(attrs: &str) -> Option<Rectangle> {
    extract_str(&format!(r#"<svg width="800" height="600"><rect {attrs}/></svg>"#)).into_iter().next()
}

// =============================================================================
// GEOMETRY
// =============================================================================

#[test]
fn parses_geometry_with_units() {
    let rect = one_rect(r#"x="10px" y="20" width="30.5" height="40pt""#).unwrap();
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (10.0, 20.0, 30.5, 40.0));
}

#[test]
fn missing_offsets_default_to_zero() {
    let rect = one_rect(r#"width="5" height="5""#).unwrap();
    assert!(rect.x.abs() < f64::EPSILON);
    assert!(rect.y.abs() < f64::EPSILON);
}

#[test]
fn negative_offsets_are_kept() {
    let rect = one_rect(r#"x="-10" y="-20" width="5" height="5""#).unwrap();
    assert_eq!((rect.x, rect.y), (-10.0, -20.0));
    assert!(!rect.is_out_of_bounds);
}

#[test]
fn non_positive_sizes_are_dropped() {
    assert!(one_rect(r#"width="0" height="10""#).is_none());
    assert!(one_rect(r#"width="-10" height="10""#).is_none());
    assert!(one_rect(r#"width="10" height="0""#).is_none());
    assert!(one_rect(r#"width="10""#).is_none());
    assert!(one_rect(r#"width="big" height="10""#).is_none());
}

#[test]
fn drop_keeps_neighbours_in_order() {
    let rects = extract_str(
        r#"<svg><rect width="1" height="1" fill="a"/><rect width="0" height="1"/><rect width="2" height="2" fill="b"/></svg>"#,
    );
    let fills: Vec<&str> = rects.iter().map(|r| r.fill.as_str()).collect();
    assert_eq!(fills, vec!["a", "b"]);
}

// =============================================================================
// BOUNDS
// =============================================================================

#[test]
fn exact_boundary_is_in_bounds() {
    let rect = one_rect(r#"x="700" y="500" width="100" height="100""#).unwrap();
    assert!(!rect.is_out_of_bounds);
}

#[test]
fn overflowing_width_is_out_of_bounds() {
    let rect = one_rect(r#"x="750" width="100" height="10""#).unwrap();
    assert!(rect.is_out_of_bounds);
}

#[test]
fn overflowing_height_is_out_of_bounds() {
    let rect = one_rect(r#"y="550" width="10" height="100""#).unwrap();
    assert!(rect.is_out_of_bounds);
}

// =============================================================================
// FILL
// =============================================================================

#[test]
fn fill_attribute_wins_over_style() {
    let rect = one_rect(r##"width="1" height="1" fill="#FF0000" style="fill:#00FF00""##).unwrap();
    assert_eq!(rect.fill, "#FF0000");
}

#[test]
fn style_fill_is_used_without_attribute() {
    let rect = one_rect(r##"width="1" height="1" style="stroke: red; FILL : #00ff00 ; opacity:1""##).unwrap();
    assert_eq!(rect.fill, "#00ff00");
}

#[test]
fn style_fill_ignores_similar_properties() {
    let rect = one_rect(r#"width="1" height="1" style="fill-opacity:0.5;stroke:blue""#).unwrap();
    assert_eq!(rect.fill, DEFAULT_FILL);
}

#[test]
fn fill_defaults_to_black() {
    let rect = one_rect(r#"width="1" height="1""#).unwrap();
    assert_eq!(rect.fill, "#000000");
}

#[test]
fn empty_fill_attribute_falls_through() {
    let rect = one_rect(r#"width="1" height="1" fill="" style="fill:blue""#).unwrap();
    assert_eq!(rect.fill, "blue");
}

#[test]
fn fill_is_opaque() {
    let rect = one_rect(r#"width="1" height="1" fill="url(#grad)""#).unwrap();
    assert_eq!(rect.fill, "url(#grad)");
}

// =============================================================================
// TRUNCATION
// =============================================================================

#[test]
fn truncates_to_first_n_in_document_order() {
    let body: String = (0..5)
        .map(|i| format!(r#"<rect x="{i}" width="1" height="1"/>"#))
        .collect();
    let root = decode(&format!("<svg>{body}</svg>")).unwrap();
    let rects = extract(&root, CANVAS, 3);
    let xs: Vec<f64> = rects.iter().map(|r| r.x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0]);
}

#[test]
fn truncation_happens_before_dropping() {
    let root = decode(
        r#"<svg><rect width="0" height="1"/><rect width="1" height="1"/><rect width="1" height="1"/></svg>"#,
    )
    .unwrap();
    assert_eq!(extract(&root, CANVAS, 2).len(), 1);
}

#[test]
fn zero_limit_yields_nothing() {
    let root = decode(r#"<svg><rect width="1" height="1"/></svg>"#).unwrap();
    assert!(extract(&root, CANVAS, 0).is_empty());
}

#[test]
fn nested_rects_are_not_extracted() {
    let rects = extract_str(r#"<svg><g><rect width="1" height="1"/></g></svg>"#);
    assert!(rects.is_empty());
}
