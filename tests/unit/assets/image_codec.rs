use std::io::Cursor;

use super::*;
use crate::assets::data_uri::{decode_data_uri_image, parse_data_uri};

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn fit_within_scales_longer_side() {
    assert_eq!(fit_within(1600, 1200, 800), (800, 600));
    assert_eq!(fit_within(1200, 1600, 800), (600, 800));
    assert_eq!(fit_within(1000, 1000, 800), (800, 800));
    assert_eq!(fit_within(1001, 333, 800), (800, 266));
}

#[test]
fn fit_within_is_noop_for_small_images() {
    assert_eq!(fit_within(640, 480, 800), (640, 480));
    assert_eq!(fit_within(800, 800, 800), (800, 800));
}

#[test]
fn fit_within_never_collapses_to_zero() {
    assert_eq!(fit_within(10_000, 1, 800), (800, 1));
    assert_eq!(fit_within(1, 10_000, 800), (1, 800));
}

#[test]
fn encode_bounds_output_and_keeps_aspect() {
    let uri = encode_image(&png_bytes(1000, 400), &ImageCodecOpts::default()).unwrap();
    assert!(uri.starts_with("data:image/jpeg;base64,"));

    let out = decode_data_uri_image(&uri).unwrap();
    assert_eq!(out.width(), 800);
    let expected_h = 400.0 * 800.0 / 1000.0;
    assert!((f64::from(out.height()) - expected_h).abs() <= 1.0);
}

#[test]
fn encode_small_image_keeps_dimensions() {
    let uri = encode_image(&png_bytes(32, 16), &ImageCodecOpts::default()).unwrap();
    let out = decode_data_uri_image(&uri).unwrap();
    assert_eq!((out.width(), out.height()), (32, 16));
    assert_eq!(parse_data_uri(&uri).unwrap().mime, "image/jpeg");
}

#[test]
fn encode_respects_custom_max_dimension() {
    let opts = ImageCodecOpts {
        quality: 0.5,
        max_dimension: 64,
    };
    let uri = encode_image(&png_bytes(100, 300), &opts).unwrap();
    let out = decode_data_uri_image(&uri).unwrap();
    assert_eq!(out.height(), 64);
    assert!(out.width() <= 64);
}

#[test]
fn unreadable_input_is_decode_error() {
    let err = encode_image(b"definitely not an image", &ImageCodecOpts::default()).unwrap_err();
    assert!(matches!(err, CardError::Decode(_)));

    let missing = encode_image_file("/nonexistent/greetcard.png", &ImageCodecOpts::default());
    assert!(matches!(missing, Err(CardError::Decode(_))));
}

#[test]
fn invalid_options_are_rejected() {
    let bad_quality = ImageCodecOpts {
        quality: 1.5,
        ..ImageCodecOpts::default()
    };
    assert!(matches!(
        encode_image(&png_bytes(2, 2), &bad_quality),
        Err(CardError::Validation(_))
    ));

    let bad_dim = ImageCodecOpts {
        max_dimension: 0,
        ..ImageCodecOpts::default()
    };
    assert!(bad_dim.validate().is_err());
}

#[test]
fn oversized_surface_is_resource_error() {
    assert!(acquire_surface(0, 10).is_err());
    assert!(matches!(
        acquire_surface(10_000, 10_000),
        Err(CardError::ResourceAcquisition(_))
    ));
    assert!(acquire_surface(800, 600).is_ok());
}
