use std::collections::HashMap;
use std::io::Cursor;

use super::*;
use crate::foundation::error::FilmError;

struct MapSource(HashMap<&'static str, Vec<u8>>);

impl FrameSource for MapSource {
    fn fetch(&self, path: &str) -> FilmResult<Vec<u8>> {
        self.0
            .get(path)
            .cloned()
            .ok_or_else(|| FilmError::load(format!("missing {path}")))
    }
}

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([9, 8, 7, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn path_joins_base_and_identifier() {
    let id = FrameId::from("a.png");
    let root = SourceLoader::new(MapSource(HashMap::new()), "");
    assert_eq!(root.path_for(&id), "a.png");
    let nested = SourceLoader::new(MapSource(HashMap::new()), "frames/");
    assert_eq!(nested.path_for(&id), "frames/a.png");
}

#[test]
fn loads_and_probes_from_base() {
    let src = MapSource(HashMap::from([("seq/f.png", png_bytes(5, 2))]));
    let loader = SourceLoader::new(src, "seq");
    let frame = loader.load(&FrameId::from("f.png")).unwrap();
    assert_eq!((frame.width(), frame.height()), (5, 2));
}

#[test]
fn missing_and_corrupt_frames_fail() {
    let src = MapSource(HashMap::from([("bad.png", b"garbage".to_vec())]));
    let loader = SourceLoader::new(src, "");
    assert!(loader.load(&FrameId::from("bad.png")).is_err());
    assert!(loader.load(&FrameId::from("absent.png")).is_err());
}

#[test]
fn non_canonical_ids_are_refused_before_fetching() {
    let src = MapSource(HashMap::from([("f.png", png_bytes(1, 1))]));
    let loader = SourceLoader::new(src, "");
    assert!(loader.load(&FrameId::from("f.png")).is_ok());
    let err = loader.load(&FrameId::from("./f.png")).unwrap_err();
    assert!(err.to_string().contains("not canonical"));
}
