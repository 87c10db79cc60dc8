use super::*;

#[test]
fn shutdown_pairs_walk_boot_frames_backwards() {
    let pairs: Vec<(u32, u32)> = reverse_stride_pairs(17, 2).collect();
    assert_eq!(pairs.len(), 18);
    assert_eq!(pairs[0], (0, 34));
    assert_eq!(pairs[16], (16, 2));
    assert_eq!(pairs[17], (17, 0));
}

#[test]
fn links_share_the_source_contents_and_replace_stale_files() {
    let dir = tempfile::tempdir().unwrap();
    let src = OutputPattern::parse(dir.path().join("boot/%02d.jpg").to_string_lossy()).unwrap();
    let dst = OutputPattern::parse(dir.path().join("down/%02d.jpg").to_string_lossy()).unwrap();
    std::fs::create_dir_all(dir.path().join("boot")).unwrap();
    std::fs::create_dir_all(dir.path().join("down")).unwrap();
    std::fs::write(dir.path().join("boot/00.jpg"), b"zero").unwrap();
    std::fs::write(dir.path().join("boot/02.jpg"), b"two").unwrap();
    std::fs::write(dir.path().join("down/00.jpg"), b"stale").unwrap();

    let summary = link_frames(&src, &dst, reverse_stride_pairs(1, 2)).unwrap();
    assert_eq!(summary.linked, 2);
    assert_eq!(std::fs::read(dir.path().join("down/00.jpg")).unwrap(), b"two");
    assert_eq!(std::fs::read(dir.path().join("down/01.jpg")).unwrap(), b"zero");

    // Linking again over existing links is fine.
    let again = link_frames(&src, &dst, reverse_stride_pairs(1, 2)).unwrap();
    assert_eq!(again.linked, 2);
}

#[test]
fn missing_source_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let src = OutputPattern::parse(dir.path().join("%d.jpg").to_string_lossy()).unwrap();
    let dst = OutputPattern::parse(dir.path().join("out/%d.jpg").to_string_lossy()).unwrap();
    let err = link_frames(&src, &dst, [(0, 9)]).unwrap_err();
    match err {
        DialframeError::Io { source, .. } => {
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected io error, got {other}"),
    }
}
