use imgwatch::decode::decode_image;
use tempfile::tempdir;

mod common;
use common::{solid_image, write_image};

#[test]
fn decodes_png_with_native_dimensions() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("sample.png");
    write_image(&path, &solid_image(4, 6, [10, 20, 30, 255]));

    let decoded = decode_image(&path).expect("decode png");
    assert_eq!(decoded.width, 4);
    assert_eq!(decoded.height, 6);
    assert_eq!(decoded.pixels.size, [4, 6]);
    let px = decoded.pixels.pixels[0];
    assert_eq!((px.r(), px.g(), px.b()), (10, 20, 30));
}

#[test]
fn decodes_jpeg() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("sample.jpg");
    write_image(&path, &solid_image(32, 16, [200, 100, 50, 255]));

    let decoded = decode_image(&path).expect("decode jpeg");
    assert_eq!(decoded.width, 32);
    assert_eq!(decoded.height, 16);
}

#[test]
fn corrupt_file_is_an_error() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("broken.png");
    std::fs::write(&path, b"this is not an image").unwrap();

    assert!(decode_image(&path).is_err());
}

#[test]
fn missing_file_is_an_error() {
    let tmp = tempdir().unwrap();
    assert!(decode_image(&tmp.path().join("nope.png")).is_err());
}

#[test]
fn oversized_image_is_clamped_preserving_aspect() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("huge.png");
    write_image(&path, &solid_image(4000, 2000, [1, 2, 3, 255]));

    let decoded = decode_image(&path).expect("decode huge png");
    assert!(decoded.width <= 3840);
    assert!(decoded.height <= 2160);
    let ratio = decoded.width as f64 / decoded.height as f64;
    assert!((ratio - 2.0).abs() < 0.01);
}
