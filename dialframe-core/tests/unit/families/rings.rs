use super::*;

#[test]
fn boot_frame_k_has_k_plus_one_rings() {
    let cfg = BootRingsConfig::default();
    let first = cfg.params(FrameSpec::new(0, 46));
    assert_eq!(first.len(), 1);
    assert!((first[0].radius - 333.0 / 46.0).abs() < 1e-9);
    assert_eq!(first[0].color, ColorRgba::rgb(0x99, 0xFF, 0x00));

    let last = cfg.params(FrameSpec::new(45, 46));
    assert_eq!(last.len(), 46);
    assert!((last[0].radius - 333.0).abs() < 1e-9);
    assert_eq!(last[23].color, cfg.dim);
    assert_eq!(last[45].color, cfg.dim);
}

#[test]
fn boot_ring_colors_dim_toward_the_center() {
    let cfg = BootRingsConfig::default();
    let rings = cfg.params(FrameSpec::new(10, 46));
    for pair in rings.windows(2) {
        assert!(pair[0].radius > pair[1].radius);
        assert!(pair[0].color.g >= pair[1].color.g);
    }
}

#[test]
fn boot_outer_radius_grows_every_frame() {
    let cfg = BootRingsConfig::default();
    let radii: Vec<f64> = (0..46)
        .map(|k| cfg.params(FrameSpec::new(k, 46))[0].radius)
        .collect();
    assert!(radii.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn boot_first_frame_draws_a_small_bright_disc() {
    let cfg = BootRingsConfig::default();
    let mut buf = PixelBuffer::new(cfg.canvas).unwrap();
    cfg.draw(FrameSpec::new(0, 46), &mut buf).unwrap();
    assert_eq!(buf.pixel(167, 120), Some([0x99, 0xFF, 0x00, 0xFF]));
    assert_eq!(buf.pixel(168, 120), Some([0, 0, 0, 0]));
}

#[test]
fn shutdown_shrinks_to_an_empty_frame() {
    let cfg = ShutdownConfig::default();
    let first = cfg.params(FrameSpec::new(0, 18));
    assert!((first.radius - 120.0 * 17.0 / 18.0).abs() < 1e-9);

    let last = cfg.params(FrameSpec::new(17, 18));
    assert_eq!(last.radius, 0.0);
    assert_eq!(last.color, cfg.dim);

    let mut buf = PixelBuffer::new(cfg.canvas).unwrap();
    cfg.draw(FrameSpec::new(17, 18), &mut buf).unwrap();
    assert!(buf.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn pulse_peaks_mid_loop() {
    let cfg = PulseConfig::default();
    let peak = cfg.params(FrameSpec::new(5, 12));
    assert!((peak.radius - 8.0).abs() < 1e-9);

    let end = cfg.params(FrameSpec::new(11, 12));
    assert!(end.radius < MIN_VISIBLE_RADIUS);
    let mut buf = PixelBuffer::new(cfg.canvas).unwrap();
    cfg.draw(FrameSpec::new(11, 12), &mut buf).unwrap();
    assert!(buf.as_bytes().iter().all(|&b| b == 0));

    cfg.draw(FrameSpec::new(5, 12), &mut buf).unwrap();
    assert_eq!(buf.pixel(8, 8), Some([0x99, 0xFF, 0x00, 0xFF]));
}

#[test]
fn zero_frames_is_rejected() {
    let cfg = BootRingsConfig {
        frames: 0,
        ..BootRingsConfig::default()
    };
    assert!(cfg.validate().is_err());
    let cfg = PulseConfig {
        radius: f64::NAN,
        ..PulseConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg: ShutdownConfig =
        serde_json::from_str(r##"{"frames": 10, "bright": "#FF0000"}"##).unwrap();
    assert_eq!(cfg.frames, 10);
    assert_eq!(cfg.bright, ColorRgba::rgb(0xFF, 0, 0));
    assert_eq!(cfg.radius, 120.0);
}

#[test]
fn output_root_may_contain_a_percent_sign() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("100%_theme");
    let cfg = PulseConfig {
        frames: 3,
        ..PulseConfig::default()
    };
    let summary = cfg.render(&FamilyContext::new(&root, None)).unwrap();
    assert_eq!(summary.made, 3);
    assert!(root.join("theme1/music_update/02.png").is_file());
}
