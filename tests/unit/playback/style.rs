use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn style_endpoints() {
    let start = FrameStyle::from_progress(0.0);
    assert!(close(start.opacity, 0.4));
    assert!(close(start.brightness, 0.8));
    assert!(close(start.saturation, 0.9));

    let end = FrameStyle::from_progress(1.0);
    assert!(close(end.opacity, 0.8));
    assert!(close(end.brightness, 1.2));
    assert!(close(end.saturation, 1.1));

    assert_eq!(FrameStyle::from_progress(-3.0), start);
    assert_eq!(FrameStyle::default(), start);
}

#[test]
fn style_scrubs_continuously() {
    let a = FrameStyle::from_progress(0.50);
    let b = FrameStyle::from_progress(0.51);
    assert!(b.opacity > a.opacity);
    assert!(b.opacity - a.opacity < 0.01);
}

#[test]
fn identity_style_leaves_pixels_untouched() {
    let style = FrameStyle {
        opacity: 1.0,
        brightness: 1.0,
        saturation: 1.0,
    };
    let mut img = image::RgbaImage::from_pixel(2, 1, image::Rgba([200, 100, 50, 255]));
    style.apply_rgba8(&mut img);
    assert_eq!(img.get_pixel(0, 0).0, [200, 100, 50, 255]);
}

#[test]
fn zero_saturation_is_grayscale_and_opacity_scales_alpha() {
    let style = FrameStyle {
        opacity: 0.5,
        brightness: 1.0,
        saturation: 0.0,
    };
    let mut img = image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 0, 0, 255]));
    style.apply_rgba8(&mut img);
    let [r, g, b, a] = img.get_pixel(0, 0).0;
    assert_eq!(r, g);
    assert_eq!(g, b);
    assert_eq!(a, 128);
}

#[test]
fn brightness_scales_and_clamps() {
    let style = FrameStyle {
        opacity: 1.0,
        brightness: 2.0,
        saturation: 1.0,
    };
    let mut img = image::RgbaImage::from_pixel(1, 1, image::Rgba([100, 200, 0, 255]));
    style.apply_rgba8(&mut img);
    assert_eq!(img.get_pixel(0, 0).0, [200, 255, 0, 255]);
}
