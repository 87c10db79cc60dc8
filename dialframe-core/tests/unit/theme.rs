use super::*;

#[test]
fn builtin_revisions_validate() {
    for rev in Revision::ALL {
        Theme::builtin(rev).validate().unwrap();
    }
}

#[test]
fn classic_only_has_boot_and_busy() {
    let theme = Theme::builtin(Revision::Classic);
    let enabled: Vec<Family> = Family::ALL
        .into_iter()
        .filter(|f| theme.is_enabled(*f))
        .collect();
    assert_eq!(enabled, vec![Family::Boot, Family::Busy]);
    assert!(!theme.needs_assets(Family::Boot));
    assert!(matches!(theme.busy, Some(BusyIndicator::Pulse(_))));
}

#[test]
fn outline_and_halo_differ_where_expected() {
    let outline = Theme::builtin(Revision::Outline);
    let halo = Theme::builtin(Revision::Halo);
    assert_eq!(outline.volume, halo.volume);
    assert_eq!(outline.busy, halo.busy);
    assert_ne!(outline.wheel, halo.wheel);
    assert!(matches!(halo.launcher, Some(LauncherConfig::Halo(_))));
    assert!(outline.needs_assets(Family::Boot));
    assert!(outline.needs_assets(Family::Launcher));
    assert!(!outline.needs_assets(Family::Wheel));
}

#[test]
fn names_parse_case_insensitively() {
    assert_eq!("HALO".parse::<Revision>().unwrap(), Revision::Halo);
    assert_eq!(Revision::Classic.to_string(), "classic");
    assert!("modern".parse::<Revision>().is_err());
    assert_eq!(" scales ".parse::<Family>().unwrap(), Family::Scales);
    let err = "clock".parse::<Family>().unwrap_err();
    assert!(matches!(err, DialframeError::Config(_)), "{err}");
}

#[test]
fn json_merges_over_the_base() {
    let base = Theme::builtin(Revision::Outline);
    let theme = Theme::from_json_over(
        &base,
        r#"{"volume": null, "wheel": {"hub_radius": 10.0}}"#,
    )
    .unwrap();
    assert!(theme.volume.is_none());
    let wheel = theme.wheel.unwrap();
    assert_eq!(wheel.hub_radius, 10.0);
    assert_eq!(wheel.palette, base.wheel.unwrap().palette);
    assert_eq!(theme.scales, base.scales);
}

#[test]
fn changing_a_variant_starts_from_its_defaults() {
    let theme = Theme::from_json_over(&Theme::default(), r#"{"busy": {"kind": "pulse"}}"#).unwrap();
    assert_eq!(theme.busy, Some(BusyIndicator::Pulse(PulseConfig::default())));
}

#[test]
fn serialized_theme_reloads_identically() {
    let halo = Theme::builtin(Revision::Halo);
    let json = serde_json::to_string_pretty(&halo).unwrap();
    let back = Theme::from_json_over(&Theme::builtin(Revision::Classic), &json).unwrap();
    assert_eq!(back, halo);
}

#[test]
fn bad_theme_data_is_a_config_error() {
    for json in [
        r#"{"wheel": {"palette": []}}"#,
        r##"{"volume": {"color": "#12"}}"##,
        r#"{"busy": {"kind": "nope"}}"#,
        "not json",
    ] {
        let err = Theme::from_json_over(&Theme::default(), json).unwrap_err();
        assert!(matches!(err, DialframeError::Config(_)), "{json}: {err}");
    }
}

#[test]
fn theme_files_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("theme.json");
    std::fs::write(&path, r#"{"launcher": null}"#).unwrap();
    let theme = Theme::from_path(&path).unwrap();
    assert!(theme.launcher.is_none());
    assert!(theme.boot.is_some());

    std::fs::write(&path, r#"{"scales": {"names": []}, "wheel": {"slots": 1}}"#).unwrap();
    let err = Theme::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("theme.json"), "{err}");

    let err = Theme::from_path(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, DialframeError::Io { .. }), "{err}");
}
