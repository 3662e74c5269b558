use super::*;

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn frame_ids_must_be_canonical() {
    assert!(check_frame_id(&FrameId::from("f0.jpg")).is_ok());
    assert!(check_frame_id(&FrameId::from("shots/f0.jpg")).is_ok());
    for id in ["./f0.jpg", "shots//f0.jpg", "shots\\f0.jpg", "../f0.jpg", "/f0.jpg", ""] {
        let err = check_frame_id(&FrameId::from(id)).unwrap_err();
        assert!(matches!(err, FilmError::Load(_)), "{id}: {err}");
    }
}

#[test]
fn join_base_handles_empty_and_trailing_slash() {
    assert_eq!(join_base("", "f0.jpg"), "f0.jpg");
    assert_eq!(join_base("frames", "f0.jpg"), "frames/f0.jpg");
    assert_eq!(join_base("frames/", "f0.jpg"), "frames/f0.jpg");
}

#[test]
fn fs_source_reads_below_root_only() {
    let tmp = std::env::temp_dir().join(format!(
        "filmstrip_fs_source_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(tmp.join("frames")).unwrap();
    std::fs::write(tmp.join("frames").join("a.bin"), b"abc").unwrap();

    let src = FsSource::new(&tmp);
    assert_eq!(src.root(), tmp.as_path());
    assert_eq!(src.fetch("frames/a.bin").unwrap(), b"abc");
    assert!(src.fetch("frames/missing.bin").is_err());
    assert!(src.fetch("../escape.bin").is_err());

    std::fs::remove_dir_all(&tmp).ok();
}
