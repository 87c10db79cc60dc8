use super::*;
use crate::foundation::core::Canvas;
use crate::geometry::sector::SectorParams;

fn canvas(w: u32, h: u32) -> PixelBuffer {
    PixelBuffer::new(Canvas::new(w, h)).unwrap()
}

#[test]
fn solid_disc_paints_only_inside_coverage() {
    let mut buf = canvas(21, 21);
    let mask = SectorMask::disc(Point2D::new(10, 10), 5.0).unwrap();
    fill_mask(&mut buf, ColorRgba::rgb(0xFF, 0x99, 0x00), &mask, BlendMode::Over);

    assert_eq!(buf.pixel(10, 10), Some([0xFF, 0x99, 0x00, 0xFF]));
    assert_eq!(buf.pixel(15, 10), Some([0xFF, 0x99, 0x00, 0xFF]));
    assert_eq!(buf.pixel(16, 10), Some([0, 0, 0, 0]));
    assert_eq!(buf.pixel(14, 14), Some([0, 0, 0, 0]));
}

#[test]
fn replace_keeps_pixels_without_coverage() {
    let mut buf = canvas(9, 9);
    let all = buf.bounds();
    fill_rect(
        &mut buf,
        all,
        ColorRgba::rgb(0, 0, 0xFF),
        BlendMode::Replace,
    );
    let mask = SectorMask::disc(Point2D::new(4, 4), 2.0).unwrap();
    fill_mask(&mut buf, ColorRgba::rgba(0xFF, 0, 0, 0x80), &mask, BlendMode::Replace);

    // Inside the disc the old blue is gone, not blended.
    assert_eq!(buf.pixel(4, 4), Some([0x80, 0, 0, 0x80]));
    // Inside the bounding box but outside the disc nothing changed.
    assert_eq!(buf.pixel(2, 2), Some([0, 0, 0xFF, 0xFF]));
}

#[test]
fn over_blends_with_existing_content() {
    let mut buf = canvas(5, 5);
    let all = buf.bounds();
    fill_rect(
        &mut buf,
        all,
        ColorRgba::rgb(0, 0, 200),
        BlendMode::Replace,
    );
    let half = SectorParams {
        center: Point2D::new(2, 2),
        outer_radius: 3.0,
        inner_alpha: 0.5,
        outer_alpha: 0.5,
        ..SectorParams::default()
    }
    .build()
    .unwrap();
    fill_mask(&mut buf, ColorRgba::rgb(200, 0, 0), &half, BlendMode::Over);

    let px = buf.pixel(2, 2).unwrap();
    assert_eq!(px[3], 255);
    assert!(px[0].abs_diff(100) <= 1, "{px:?}");
    assert!(px[2].abs_diff(100) <= 1, "{px:?}");
}

#[test]
fn region_limits_side_effects() {
    let mut buf = canvas(10, 10);
    let mask = SectorMask::disc(Point2D::new(5, 5), 4.0).unwrap();
    let region = PixelRect::new(0, 0, 5, 10);
    composite(
        &mut buf,
        region,
        Source::Solid {
            color: ColorRgba::WHITE,
            mask: &mask,
        },
        BlendMode::Over,
    );
    assert_eq!(buf.pixel(4, 5), Some([255, 255, 255, 255]));
    assert_eq!(buf.pixel(5, 5), Some([0, 0, 0, 0]));
    assert_eq!(buf.pixel(8, 5), Some([0, 0, 0, 0]));
}

#[test]
fn masks_partly_off_canvas_are_clipped() {
    let mut buf = canvas(8, 8);
    let mask = SectorMask::disc(Point2D::new(-2, -2), 5.0).unwrap();
    fill_mask(&mut buf, ColorRgba::WHITE, &mask, BlendMode::Over);
    assert_eq!(buf.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(buf.pixel(7, 7), Some([0, 0, 0, 0]));
}

#[test]
fn bitmap_uses_its_own_alpha_at_origin() {
    let mut buf = canvas(6, 6);
    let all = buf.bounds();
    fill_rect(
        &mut buf,
        all,
        ColorRgba::rgb(0, 0, 200),
        BlendMode::Replace,
    );

    // 2x1 overlay: opaque red, fully transparent.
    let overlay = PixelBuffer::from_premul_rgba8(2, 1, vec![255, 0, 0, 255, 0, 0, 0, 0]).unwrap();
    draw_bitmap(&mut buf, &overlay, Point2D::new(3, 4), BlendMode::Over);

    assert_eq!(buf.pixel(3, 4), Some([255, 0, 0, 255]));
    assert_eq!(buf.pixel(4, 4), Some([0, 0, 200, 255]));
    assert_eq!(buf.pixel(2, 4), Some([0, 0, 200, 255]));
}

#[test]
fn centered_origin_splits_the_bitmap_size() {
    let overlay = PixelBuffer::new(Canvas::new(24, 17)).unwrap();
    assert_eq!(
        centered_origin(Point2D::new(64, 64), &overlay),
        Point2D::new(52, 56)
    );
}

#[test]
fn centered_origin_saturates_far_off_canvas() {
    let overlay = PixelBuffer::new(Canvas::new(40, 40)).unwrap();
    assert_eq!(
        centered_origin(Point2D::new(i32::MIN, i32::MIN + 5), &overlay),
        Point2D::new(i32::MIN, i32::MIN)
    );

    let mut buf = canvas(8, 8);
    draw_bitmap(
        &mut buf,
        &overlay,
        centered_origin(Point2D::new(i32::MIN, 0), &overlay),
        BlendMode::Over,
    );
    assert_eq!(buf.pixel(0, 0), Some([0, 0, 0, 0]));
}
