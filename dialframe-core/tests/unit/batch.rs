use super::*;
use crate::families::gauge::GaugeConfig;
use crate::families::launcher::LauncherConfig;
use crate::families::rings::PulseConfig;
use crate::families::sweep::SweepConfig;
use crate::foundation::error::DialframeError;

fn init_logs() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn small_pulse() -> BusyIndicator {
    BusyIndicator::Pulse(PulseConfig {
        frames: 3,
        ..PulseConfig::default()
    })
}

fn small_theme() -> Theme {
    Theme {
        boot: Some(BootAnimation::Sweep(SweepConfig::default())),
        busy: Some(small_pulse()),
        wheel: None,
        volume: Some(GaugeConfig::volume()),
        scales: None,
        launcher: Some(LauncherConfig::default()),
    }
}

#[test]
fn families_needing_overlays_are_skipped_without_assets() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let paths = BatchPaths::new(dir.path());

    let summary = run_theme(&small_theme(), &paths, &[]).unwrap();
    assert_eq!(summary.made, 4);
    assert_eq!(summary.linked, 0);

    for i in 0..3 {
        assert!(dir.path().join(format!("theme1/music_update/{i:02}.png")).is_file());
    }
    assert!(dir.path().join("theme1/adjust/volume_scale_focus.png").is_file());
    assert!(!dir.path().join("boot_animation").exists());
    assert!(!dir.path().join("theme1/launcher").exists());
}

#[test]
fn only_filter_limits_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let paths = BatchPaths::new(dir.path());

    let summary = run_theme(&small_theme(), &paths, &[Family::Volume]).unwrap();
    assert_eq!(summary.made, 1);
    assert!(!dir.path().join("theme1/music_update").exists());
}

#[test]
fn second_run_keeps_every_file() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let paths = BatchPaths::new(dir.path());
    let theme = small_theme();

    let first = run_theme(&theme, &paths, &[]).unwrap();
    let second = run_theme(&theme, &paths, &[]).unwrap();
    assert_eq!(second.kept, first.made);
    assert_eq!(second.made + second.changed, 0);
}

#[test]
fn invalid_theme_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let mut theme = small_theme();
    theme.busy = Some(BusyIndicator::Pulse(PulseConfig {
        frames: 0,
        ..PulseConfig::default()
    }));

    let err = run_theme(&theme, &BatchPaths::new(&out), &[]).unwrap_err();
    assert!(matches!(err, DialframeError::Config(_)), "{err}");
    assert!(!out.exists());
}

#[test]
fn disabled_family_renders_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = FamilyContext::new(dir.path(), None);
    let summary = run_family(&small_theme(), Family::Wheel, &ctx).unwrap();
    assert_eq!(summary, RunSummary::default());
}

#[test]
fn with_assets_sets_the_overlay_root() {
    let paths = BatchPaths::new("out").with_assets("art");
    assert_eq!(paths.assets_root.as_deref(), Some(std::path::Path::new("art")));
}
