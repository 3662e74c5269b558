use super::*;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "filmstrip_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn natural_order_compares_digit_runs_numerically() {
    let mut names = vec!["frame10.jpg", "frame2.jpg", "frame1.jpg", "Frame3.jpg"];
    names.sort_by(|a, b| natural_cmp(a, b));
    assert_eq!(
        names,
        vec!["frame1.jpg", "frame2.jpg", "Frame3.jpg", "frame10.jpg"]
    );
}

#[test]
fn natural_order_handles_zero_padding_and_prefixes() {
    assert_eq!(natural_cmp("f009.png", "f10.png"), Ordering::Less);
    assert_eq!(natural_cmp("f", "f1"), Ordering::Less);
    assert_eq!(natural_cmp("a2b10", "a2b9"), Ordering::Greater);
    assert_eq!(natural_cmp("x.png", "x.png"), Ordering::Equal);
    // Case-insensitive first, then byte order as a tie-break.
    assert_ne!(natural_cmp("A.png", "a.png"), Ordering::Equal);
    assert_eq!(natural_cmp("a.png", "B.png"), Ordering::Less);
}

#[test]
fn frame_file_filter_is_case_insensitive() {
    assert!(is_frame_file("a.JPG"));
    assert!(is_frame_file("a.jpeg"));
    assert!(is_frame_file("a.Png"));
    assert!(is_frame_file("a.webp"));
    assert!(!is_frame_file("manifest.json"));
    assert!(!is_frame_file("jpg"));
    assert!(!is_frame_file(".png"));
    assert!(!is_frame_file("a.gif"));
}

#[test]
fn scan_and_write_manifest() {
    let tmp = temp_dir("generate_scan");
    std::fs::create_dir_all(tmp.join("nested.png")).unwrap();
    for name in ["f10.png", "f2.webp", "f1.JPG", "notes.txt", "manifest.json"] {
        std::fs::write(tmp.join(name), b"x").unwrap();
    }

    let manifest = scan_frames_dir(&tmp).unwrap();
    let names: Vec<&str> = manifest.frames().iter().map(|f| f.as_str()).collect();
    assert_eq!(names, vec!["f1.JPG", "f2.webp", "f10.png"]);

    let out = tmp.join("out").join("manifest.json");
    write_manifest(&manifest, &out).unwrap();
    assert_eq!(Manifest::from_path(&out).unwrap(), manifest);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn scan_missing_dir_errors() {
    assert!(scan_frames_dir(Path::new("definitely/not/a/dir")).is_err());
}
