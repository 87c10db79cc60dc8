use std::io::Cursor;

use super::*;

#[test]
fn decode_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let bitmap = decode_bitmap(&buf).unwrap();
    assert_eq!(bitmap.width(), 1);
    assert_eq!(bitmap.height(), 1);
    assert_eq!(
        bitmap.as_bytes(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn garbage_is_a_decode_error() {
    let err = decode_bitmap(b"definitely not a png").unwrap_err();
    assert!(matches!(err, DialframeError::Decode(_)), "{err}");
}
