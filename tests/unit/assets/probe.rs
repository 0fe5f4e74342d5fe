use super::*;

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "heroreel_probe_{tag}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn sniff_recognizes_mp4_and_webm() {
    let mp4 = [0, 0, 0, 0x20, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm'];
    assert_eq!(sniff_container(&mp4), Some(ContainerKind::IsoBmff));
    let webm = [0x1A, 0x45, 0xDF, 0xA3, 0x9F];
    assert_eq!(sniff_container(&webm), Some(ContainerKind::Matroska));
    assert_eq!(sniff_container(b"hello world"), None);
    assert_eq!(sniff_container(&[]), None);
}

#[test]
fn manual_host_tracks_live_probes() {
    let mut host = ManualProbeHost::new();
    let a = host.spawn(0, "a.mp4");
    let b = host.spawn(1, "b.mp4");
    assert_ne!(a, b);
    assert_eq!(host.live_count(), 2);

    host.dispose(a);
    assert_eq!(host.live_count(), 1);
    assert_eq!(host.live().collect::<Vec<_>>(), vec![(1, "b.mp4")]);

    // Unknown handles are tolerated and not counted.
    host.dispose(a);
    assert_eq!(host.disposed_count(), 1);
    assert_eq!(host.spawned_count(), 2);
}

#[test]
fn fs_host_reports_ready_and_failed_probes() {
    let dir = scratch_dir("fs");
    std::fs::write(
        dir.join("good.mp4"),
        [0, 0, 0, 0x18, b'f', b't', b'y', b'p', b'm', b'p', b'4', b'2'],
    )
    .unwrap();
    std::fs::write(dir.join("junk.mp4"), b"not a video").unwrap();

    let mut host = FsProbeHost::new(&dir);
    host.spawn(2, "missing.mp4");
    host.spawn(0, "good.mp4");
    host.spawn(1, "junk.mp4");
    host.spawn(3, "https://cdn.example.com/x.mp4");

    let events = host.drain();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0], (0, ProbeEvent::DataAvailable));
    assert!(matches!(events[1], (1, ProbeEvent::Error(_))));
    assert!(matches!(events[2], (2, ProbeEvent::Error(_))));
    assert!(matches!(events[3], (3, ProbeEvent::Error(_))));

    // Draining twice does not re-run probes.
    assert!(host.drain().is_empty());
    assert_eq!(host.live_count(), 4);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn fs_host_disposal_dequeues_unrun_probe() {
    let mut host = FsProbeHost::new(".");
    let h = host.spawn(0, "never-run.mp4");
    host.dispose(h);
    assert!(host.drain().is_empty());
    assert_eq!(host.live_count(), 0);
}
