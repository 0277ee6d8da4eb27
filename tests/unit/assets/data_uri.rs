use std::io::Cursor;

use super::*;

#[test]
fn format_then_parse_keeps_mime_and_bytes() {
    let uri = format_data_uri("image/png", &[0, 1, 2, 250, 251]);
    assert!(uri.starts_with("data:image/png;base64,"));

    let parsed = parse_data_uri(&uri).unwrap();
    assert_eq!(parsed.mime, "image/png");
    assert_eq!(parsed.bytes, vec![0, 1, 2, 250, 251]);
    assert_eq!(parsed.to_uri(), uri);
}

#[test]
fn parse_rejects_malformed_uris() {
    assert!(matches!(
        parse_data_uri("https://example.com/a.png"),
        Err(CardError::Decode(_))
    ));
    assert!(parse_data_uri("data:image/png;base64").is_err());
    assert!(parse_data_uri("data:text/plain,hello").is_err());
    assert!(parse_data_uri("data:image/png;base64,@@@").is_err());
}

#[test]
fn decode_image_from_uri() {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_data_uri_image(&format_data_uri("image/png", &buf)).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (3, 2));

    let not_an_image = format_data_uri("image/png", b"nope");
    assert!(decode_data_uri_image(&not_an_image).is_err());
}
