use super::*;

const CENTER: Point2D = Point2D::new(64, 64);

#[test]
fn segment_slots_follow_the_offset() {
    let cfg = WheelConfig::default();
    let (a, _, b) = cfg.segment_angles(1);
    assert!((a + PI).abs() < 1e-12 && (b + 0.75 * PI).abs() < 1e-12);
    let (a, mid, b) = cfg.segment_angles(3);
    assert!((a - 0.5 * PI).abs() < 1e-12);
    assert!((mid - 0.625 * PI).abs() < 1e-12);
    assert!((b - 0.75 * PI).abs() < 1e-12);
    let (a, _, b) = cfg.segment_angles(6);
    assert!((a + 0.25 * PI).abs() < 1e-12 && b.abs() < 1e-12);
}

#[test]
fn active_segment_reaches_the_center() {
    let cfg = WheelConfig::default();
    let p = cfg.params(FrameSpec::new(3, 6), CENTER);
    assert_eq!(p.segments.len(), 6);
    for (j, seg) in (1..).zip(&p.segments) {
        if j == 3 {
            assert_eq!(seg.sector.inner_radius, 0.0);
        } else {
            assert!(seg.sector.inner_radius > p.segments[2].sector.inner_radius);
        }
        seg.sector.build().unwrap();
    }
    assert_eq!(p.icon_center, Point2D::new(46, 20));
}

#[test]
fn rendered_wedge_only_for_the_active_segment() {
    let cfg = WheelConfig::default();
    let mut buf = PixelBuffer::new(cfg.canvas).unwrap();
    cfg.draw(FrameSpec::new(3, 6), &mut buf, None).unwrap();

    // Radius ~40 on the mid-angles of segments 3 (active) and 4.
    assert!(buf.pixel(49, 27).unwrap()[3] > 0);
    assert_eq!(buf.pixel(79, 27), Some([0, 0, 0, 0]));
    // Rim of an inactive segment and the hub.
    assert!(buf.pixel(79, 4).unwrap()[3] > 0);
    assert_eq!(buf.pixel(64, 64), Some([0x99, 0x99, 0x99, 0xFF]));
}

#[test]
fn icon_is_centered_on_the_active_segment() {
    let cfg = WheelConfig::default();
    let icon = PixelBuffer::from_premul_rgba8(2, 2, vec![255; 16]).unwrap();
    let mut buf = PixelBuffer::new(cfg.canvas).unwrap();
    cfg.draw(FrameSpec::new(3, 6), &mut buf, Some(&icon)).unwrap();
    assert_eq!(buf.pixel(45, 19), Some([255, 255, 255, 255]));
    assert_eq!(buf.pixel(46, 20), Some([255, 255, 255, 255]));
}

#[test]
fn invalid_wheels_are_rejected() {
    let empty = WheelConfig {
        palette: Vec::new(),
        ..WheelConfig::default()
    };
    assert!(empty.validate().is_err());

    let crowded = WheelConfig {
        slots: 4,
        ..WheelConfig::default()
    };
    assert!(crowded.validate().is_err());

    let no_placeholder = WheelConfig {
        icons: Some("icon.png".to_owned()),
        ..WheelConfig::default()
    };
    assert!(no_placeholder.validate().is_err());
}
