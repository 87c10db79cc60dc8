use std::f64::consts::FRAC_PI_3;

use super::*;

fn render(frame: u32) -> PixelBuffer {
    let cfg = SpinnerConfig::default();
    let mut buf = PixelBuffer::new(cfg.canvas).unwrap();
    cfg.draw(FrameSpec::new(frame, 12), &mut buf).unwrap();
    buf
}

#[test]
fn first_frame_tail_points_east() {
    let cfg = SpinnerConfig::default();
    let p = cfg.params(FrameSpec::new(0, 12), Point2D::new(16, 16));
    assert!((p.tail.angle_start + FRAC_PI_3).abs() < 1e-12);
    assert!((p.tail.angle_end - FRAC_PI_3).abs() < 1e-12);

    let buf = render(0);
    assert!(buf.pixel(24, 16).unwrap()[3] > 0);
    assert_eq!(buf.pixel(8, 16), Some([0, 0, 0, 0]));
}

#[test]
fn tail_turns_clockwise() {
    let buf = render(3);
    assert!(buf.pixel(16, 24).unwrap()[3] > 0, "below the dot");
    assert_eq!(buf.pixel(16, 8), Some([0, 0, 0, 0]));

    // Half a turn later the tail wraps through PI.
    let buf = render(6);
    assert!(buf.pixel(8, 16).unwrap()[3] > 0);
    assert_eq!(buf.pixel(24, 16), Some([0, 0, 0, 0]));
}

#[test]
fn tail_fades_outward_and_dot_is_solid() {
    let buf = render(0);
    assert_eq!(buf.pixel(16, 16), Some([0xFF, 0x99, 0x00, 0xFF]));
    let near = buf.pixel(20, 16).unwrap()[3];
    let far = buf.pixel(28, 16).unwrap()[3];
    assert!(near > far, "{near} vs {far}");
}

#[test]
fn every_frame_builds_valid_masks() {
    let cfg = SpinnerConfig::default();
    for k in 0..12 {
        let p = cfg.params(FrameSpec::new(k, 12), Point2D::new(16, 16));
        p.dot.build().unwrap();
        p.tail.build().unwrap();
    }
}

#[test]
fn bad_tail_is_rejected() {
    let cfg = SpinnerConfig {
        tail_radius: 1.0,
        ..SpinnerConfig::default()
    };
    assert!(cfg.validate().is_err());
    let cfg = SpinnerConfig {
        span: 12,
        ..SpinnerConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn lead_wraps_around_the_revolution() {
    let huge = SpinnerConfig {
        lead: u32::MAX,
        ..SpinnerConfig::default()
    };
    huge.validate().unwrap();
    // u32::MAX = 12 * 357913941 + 3
    let same = SpinnerConfig {
        lead: 3,
        ..SpinnerConfig::default()
    };
    for k in 0..12 {
        let f = FrameSpec::new(k, 12);
        let center = Point2D::new(16, 16);
        assert_eq!(huge.params(f, center), same.params(f, center));
    }

    let dir = tempfile::tempdir().unwrap();
    let summary = huge.render(&FamilyContext::new(dir.path(), None)).unwrap();
    assert_eq!(summary.made, 12);
}
