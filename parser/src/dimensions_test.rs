use super::*;
use crate::decode::decode;

fn resolve_str(svg: &str) -> Dimensions {
    resolve(&decode(svg).unwrap())
}

#[test]
fn reads_direct_attributes() {
    assert_eq!(resolve_str(r#"<svg width="800" height="600"/>"#), Dimensions { width: 800.0, height: 600.0 });
}

#[test]
fn unit_suffix_matches_bare_number() {
    assert_eq!(resolve_str(r#"<svg width="800px" height="600pt"/>"#), resolve_str(r#"<svg width="800" height="600"/>"#));
}

#[test]
fn falls_back_to_view_box() {
    assert_eq!(resolve_str(r#"<svg viewBox="0 0 1000 500"/>"#), Dimensions { width: 1000.0, height: 500.0 });
}

#[test]
fn comma_separated_view_box_matches_whitespace() {
    assert_eq!(resolve_str(r#"<svg viewBox="0,0,800,400"/>"#), resolve_str(r#"<svg viewBox="0 0 800 400"/>"#));
    assert_eq!(resolve_str(r#"<svg viewBox="0, 0,  800 ,400"/>"#), Dimensions { width: 800.0, height: 400.0 });
}

#[test]
fn positive_direct_width_is_not_overridden() {
    let dims = resolve_str(r#"<svg width="300" viewBox="0 0 1000 500"/>"#);
    assert_eq!(dims, Dimensions { width: 300.0, height: 500.0 });
}

#[test]
fn zero_direct_value_is_replaced() {
    let dims = resolve_str(r#"<svg width="0" height="200" viewBox="0 0 1000 500"/>"#);
    assert_eq!(dims, Dimensions { width: 1000.0, height: 200.0 });
}

#[test]
fn malformed_view_box_is_ignored() {
    assert_eq!(resolve_str(r#"<svg viewBox="0 0 1000"/>"#), Dimensions { width: 0.0, height: 0.0 });
    assert_eq!(resolve_str(r#"<svg viewBox="0 0 wide 10"/>"#), Dimensions { width: 0.0, height: 0.0 });
    assert_eq!(resolve_str(r#"<svg viewBox="0 0 10 10 10"/>"#), Dimensions { width: 0.0, height: 0.0 });
}

#[test]
fn unparsable_attributes_resolve_to_zero() {
    assert_eq!(resolve_str(r#"<svg width="auto" height="100%"/>"#), Dimensions { width: 0.0, height: 100.0 });
}

#[test]
fn validate_rejects_non_positive() {
    let limits = Limits::default();
    let err = validate(Dimensions { width: 0.0, height: 10.0 }, &limits).unwrap_err();
    assert!(matches!(err, ParseError::InvalidDimensions { .. }));
    let err = validate(Dimensions { width: 10.0, height: -5.0 }, &limits).unwrap_err();
    assert!(matches!(err, ParseError::InvalidDimensions { .. }));
}

#[test]
fn validate_rejects_oversized() {
    let limits = Limits::default().with_max_dimension(1000.0);
    let err = validate(Dimensions { width: 1000.5, height: 10.0 }, &limits).unwrap_err();
    assert!(matches!(err, ParseError::DimensionTooLarge { max, .. } if (max - 1000.0).abs() < f64::EPSILON));
}

#[test]
fn validate_accepts_exact_ceiling() {
    let limits = Limits::default().with_max_dimension(1000.0);
    let dims = Dimensions { width: 1000.0, height: 1000.0 };
    assert_eq!(validate(dims, &limits).unwrap(), dims);
}

#[test]
fn nan_ceiling_still_rejects_huge_canvas() {
    let limits = Limits::default().with_max_dimension(f64::NAN);
    let err = validate(Dimensions { width: 1e9, height: 1e9 }, &limits).unwrap_err();
    assert!(matches!(err, ParseError::DimensionTooLarge { max, .. } if (max - 100_000.0).abs() < f64::EPSILON));
}
