use super::*;

#[test]
fn new_buffer_is_transparent() {
    let buf = PixelBuffer::new(Canvas::new(3, 2)).unwrap();
    assert_eq!(buf.as_bytes().len(), 3 * 2 * 4);
    assert!(buf.as_bytes().iter().all(|&b| b == 0));
    assert_eq!(buf.pixel(2, 1), Some([0, 0, 0, 0]));
    assert_eq!(buf.pixel(3, 1), None);
    assert_eq!(buf.pixel(-1, 0), None);
}

#[test]
fn empty_canvas_is_rejected() {
    assert!(matches!(
        PixelBuffer::new(Canvas::new(0, 10)),
        Err(DialframeError::Config(_))
    ));
}

#[test]
fn from_bytes_checks_length() {
    assert!(PixelBuffer::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
    let buf = PixelBuffer::from_premul_rgba8(2, 2, vec![7; 16]).unwrap();
    assert_eq!(buf.pixel(1, 1), Some([7, 7, 7, 7]));
}

#[test]
fn flattening_keeps_premultiplied_color_and_unpremultiplies_for_png() {
    let buf = PixelBuffer::from_premul_rgba8(1, 1, vec![64, 32, 0, 128]).unwrap();
    assert_eq!(buf.to_rgb8_over_black(), vec![64, 32, 0]);
    assert_eq!(buf.to_straight_rgba8(), vec![128, 64, 0, 128]);
}
