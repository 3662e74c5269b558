use super::*;

fn three() -> Manifest {
    Manifest::new(["f0.jpg", "f1.jpg", "f2.jpg"])
}

#[test]
fn parse_bare_json_array_in_order() {
    let m = Manifest::from_json_slice(br#"["b.png", "a.png", "c.png"]"#).unwrap();
    assert_eq!(m.len(), 3);
    assert_eq!(m.get(0).unwrap().as_str(), "b.png");
    assert_eq!(m.get(2).unwrap().as_str(), "c.png");
    assert!(m.get(3).is_none());
}

#[test]
fn parse_rejects_non_array() {
    let err = Manifest::from_json_slice(br#"{"frames": []}"#).unwrap_err();
    assert!(err.to_string().contains("manifest error:"));
    assert!(Manifest::from_json_slice(b"not json").is_err());
}

#[test]
fn duplicates_are_tolerated() {
    let m = Manifest::from_json_slice(br#"["a.png", "a.png"]"#).unwrap();
    assert_eq!(m.len(), 2);
}

#[test]
fn json_round_trip_is_pretty_array() {
    let json = three().to_json_pretty().unwrap();
    assert!(json.starts_with("[\n  \"f0.jpg\""));
    assert_eq!(Manifest::from_json_slice(json.as_bytes()).unwrap(), three());
}

#[test]
fn window_is_clipped_to_timeline() {
    let m = Manifest::new((0..20).map(|i| format!("f{i}.jpg")));
    assert_eq!(m.window(0, 8), Some(0..=8));
    assert_eq!(m.window(10, 8), Some(2..=18));
    assert_eq!(m.window(19, 8), Some(11..=19));
    assert_eq!(m.window(40, 8), Some(11..=19));
    assert_eq!(three().window(1, 8), Some(0..=2));
    assert_eq!(Manifest::default().window(0, 8), None);
}

#[test]
fn from_path_missing_file_is_manifest_error() {
    let err = Manifest::from_path("definitely/not/here/manifest.json").unwrap_err();
    assert!(matches!(err, FilmError::Manifest(_)));
}
