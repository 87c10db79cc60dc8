use std::f64::consts::{FRAC_PI_2, PI};

use super::*;

const C: Point2D = Point2D::new(59, 59);

#[test]
fn volume_starts_just_before_twelve_and_runs_clockwise() {
    let cfg = GaugeConfig::volume();
    let s0 = cfg.step_sector(0, C);
    assert!((s0.angle_start - FRAC_PI_2).abs() < 1e-12);
    assert!((s0.angle_end - (FRAC_PI_2 + PI / 60.0)).abs() < 1e-12);

    let s1 = cfg.step_sector(1, C);
    assert!((s1.angle_end - FRAC_PI_2).abs() < 1e-12);
    assert!(s1.angle_start < s1.angle_end);
}

#[test]
fn every_step_is_a_valid_sector() {
    for cfg in [GaugeConfig::volume(), GaugeConfig::scale()] {
        for seg in cfg.params(C) {
            let s = seg.sector;
            assert!((-PI..=PI).contains(&s.angle_start), "{s:?}");
            assert!((-PI..=PI).contains(&s.angle_end), "{s:?}");
            s.build().unwrap();
        }
    }
}

#[test]
fn scale_inner_radius_tapers() {
    let cfg = GaugeConfig::scale();
    let segs = cfg.params(Point2D::new(61, 61));
    assert_eq!(segs.len(), 119);
    assert!((segs[0].sector.inner_radius - (52.0 - 8.0 / 120.0)).abs() < 1e-12);
    assert!(segs.windows(2).all(|w| w[0].sector.inner_radius > w[1].sector.inner_radius));
}

#[test]
fn colors_ramp_up_then_warn() {
    let cfg = GaugeConfig::volume();
    assert_eq!(cfg.step_color(99), ColorRgba::rgb(0x99, 0xFF, 0x00));
    assert_eq!(cfg.step_color(0), ColorRgba::rgb(93, 155, 0));
    assert_eq!(cfg.step_color(100), ColorRgba::rgb(0xFF, 0x82, 0x34));
    assert_eq!(cfg.step_color(110), ColorRgba::rgb(0xFF, 65, 0x34));
}

#[test]
fn rendered_volume_dial() {
    let cfg = GaugeConfig::volume();
    let mut buf = PixelBuffer::new(cfg.canvas).unwrap();
    cfg.draw(&mut buf).unwrap();

    assert_eq!(buf.pixel(59, 59), Some([0, 0, 0, 0]));
    assert_eq!(buf.pixel(89, 59), Some([0, 0, 0, 0]));
    assert_eq!(buf.pixel(109, 59).unwrap()[3], 255);
    assert_eq!(buf.pixel(32, 15), Some([0xFF, 65, 0x34, 0xFF]));
}

#[test]
fn scales_render_one_file_per_name() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = FamilyContext::new(dir.path(), None);
    let summary = ScaleDials::default().render(&ctx).unwrap();
    assert_eq!(summary.made, 4);
    for name in ["maxvol", "blktime", "savetime", "sleeptime"] {
        assert!(dir.path().join(format!("theme1/adjust/{name}_scale_focus.png")).is_file());
    }
}

#[test]
fn invalid_gauges_are_rejected() {
    let cfg = GaugeConfig {
        taper: 100.0,
        ..GaugeConfig::scale()
    };
    assert!(cfg.validate().is_err());

    let cfg = GaugeConfig {
        sweep_turns: 0.0,
        ..GaugeConfig::volume()
    };
    assert!(cfg.validate().is_err());

    let dials = ScaleDials {
        gauge: GaugeConfig::volume(),
        ..ScaleDials::default()
    };
    assert!(dials.validate().is_err());
}

#[test]
fn partial_scale_gauge_keeps_the_scale_preset() {
    let dials: ScaleDials = serde_json::from_str(r#"{"gauge": {"taper": 4.0}}"#).unwrap();
    assert_eq!(
        dials.gauge,
        GaugeConfig {
            taper: 4.0,
            ..GaugeConfig::scale()
        }
    );
    dials.validate().unwrap();

    let theme = crate::theme::Theme::from_json_over(
        &crate::theme::Theme::builtin(crate::theme::Revision::Classic),
        r#"{"scales": {"gauge": {"steps": 60}}}"#,
    )
    .unwrap();
    let scales = theme.scales.unwrap();
    assert_eq!(scales.gauge.steps, 60);
    assert_eq!(scales.gauge.canvas, GaugeConfig::scale().canvas);
    assert_eq!(scales.names, ScaleDials::default().names);

    assert!(serde_json::from_str::<ScaleDials>(r#"{"gauge": 3}"#).is_err());
}
