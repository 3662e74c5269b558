use std::collections::HashMap;

use super::*;

#[test]
fn clamp_unit_bounds_and_nan() {
    assert_eq!(clamp_unit(-0.5), 0.0);
    assert_eq!(clamp_unit(0.25), 0.25);
    assert_eq!(clamp_unit(7.0), 1.0);
    assert_eq!(clamp_unit(f64::NAN), 0.0);
    assert_eq!(clamp_unit(f64::INFINITY), 1.0);
    assert_eq!(clamp_unit(f64::NEG_INFINITY), 0.0);
}

#[test]
fn frame_id_serializes_as_bare_string() {
    let id = FrameId::new("frame_0001.webp");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"frame_0001.webp\"");
    let back: FrameId = serde_json::from_str("\"a.png\"").unwrap();
    assert_eq!(back.as_str(), "a.png");
}

#[test]
fn frame_id_map_lookup_by_str() {
    let mut m = HashMap::new();
    m.insert(FrameId::from("a.jpg"), 1);
    assert_eq!(m.get("a.jpg"), Some(&1));
}
