use super::*;
use crate::assets::probe::ManualProbeHost;

fn hero_pool() -> AssetPool {
    AssetPool::from_template("videos/hero-{n}.mp4", 1, 4).unwrap()
}

fn started(pool: &AssetPool) -> (PreloadTracker, ManualProbeHost) {
    let mut host = ManualProbeHost::new();
    let mut tracker = PreloadTracker::new(pool.len());
    tracker.begin_preload(&mut host, pool).unwrap();
    (tracker, host)
}

fn fail(reason: &str) -> ProbeEvent {
    ProbeEvent::Error(reason.to_string())
}

#[test]
fn begin_spawns_one_probe_per_asset_once() {
    let pool = hero_pool();
    let (mut tracker, mut host) = started(&pool);
    assert_eq!(host.spawned_count(), 4);
    assert_eq!(tracker.pending_probes(), 4);

    tracker.begin_preload(&mut host, &pool).unwrap();
    assert_eq!(host.spawned_count(), 4);
}

// The pool deliberately unblocks at N - 1 settled probes, not N.
#[test]
fn ready_after_n_minus_one_settled_documented_threshold() {
    let pool = hero_pool();
    let (mut tracker, mut host) = started(&pool);
    assert_eq!(ready_threshold(4), 3);

    tracker.resolve(&mut host, 0, &ProbeEvent::DataAvailable).unwrap();
    tracker.resolve(&mut host, 1, &ProbeEvent::DataAvailable).unwrap();
    assert!(!tracker.is_pool_ready());

    let r = tracker.resolve(&mut host, 2, &fail("404")).unwrap();
    assert_eq!(
        r,
        ProbeResolution::Settled {
            status: ProbeStatus::Failed,
            became_ready: true
        }
    );
    assert!(tracker.is_pool_ready());
    assert_eq!(tracker.status(3), Some(ProbeStatus::Pending));
}

#[test]
fn readiness_is_order_independent() {
    let pool = hero_pool();
    for order in [[3, 1, 0], [2, 0, 3], [1, 3, 2], [0, 2, 1]] {
        let (mut tracker, mut host) = started(&pool);
        for (k, &i) in order.iter().enumerate() {
            assert!(!tracker.is_pool_ready());
            let event = if k % 2 == 0 {
                ProbeEvent::DataAvailable
            } else {
                fail("decode")
            };
            tracker.resolve(&mut host, i, &event).unwrap();
        }
        assert!(tracker.is_pool_ready(), "order {order:?}");
    }
}

#[test]
fn threshold_holds_for_other_pool_sizes() {
    for n in 2..=7u32 {
        let pool = AssetPool::from_template("v/{n}.webm", 0, n).unwrap();
        let (mut tracker, mut host) = started(&pool);
        for i in 0..(n as usize - 1) {
            assert!(!tracker.is_pool_ready());
            tracker.resolve(&mut host, i, &fail("x")).unwrap();
        }
        assert!(tracker.is_pool_ready(), "n = {n}");
    }
}

#[test]
fn second_terminal_event_does_not_double_count() {
    let pool = hero_pool();
    let (mut tracker, mut host) = started(&pool);

    tracker.resolve(&mut host, 0, &ProbeEvent::DataAvailable).unwrap();
    let again = tracker.resolve(&mut host, 0, &fail("late error")).unwrap();
    assert_eq!(again, ProbeResolution::Duplicate);
    assert_eq!(tracker.settled(), 1);
    assert_eq!(tracker.status(0), Some(ProbeStatus::Ready));

    tracker.resolve(&mut host, 1, &ProbeEvent::DataAvailable).unwrap();
    tracker.resolve(&mut host, 1, &ProbeEvent::DataAvailable).unwrap();
    assert!(!tracker.is_pool_ready());
}

#[test]
fn probes_are_disposed_once_terminal() {
    let pool = hero_pool();
    let (mut tracker, mut host) = started(&pool);

    tracker.resolve(&mut host, 2, &fail("network")).unwrap();
    tracker.resolve(&mut host, 0, &ProbeEvent::DataAvailable).unwrap();
    assert_eq!(host.disposed_count(), 2);
    assert_eq!(host.live_count(), 2);
    assert_eq!(tracker.pending_probes(), 2);

    tracker.teardown(&mut host);
    assert_eq!(host.live_count(), 0);
    assert_eq!(host.disposed_count(), 4);
    assert_eq!(tracker.pending_probes(), 0);
}

#[test]
fn all_failures_still_unblock() {
    let pool = hero_pool();
    let (mut tracker, mut host) = started(&pool);
    for i in 0..4 {
        tracker.resolve(&mut host, i, &fail("offline")).unwrap();
    }
    assert!(tracker.is_pool_ready());
    assert!(
        tracker
            .statuses()
            .iter()
            .all(|s| *s == ProbeStatus::Failed)
    );
}

#[test]
fn hung_probe_never_reaches_ready() {
    let pool = AssetPool::new(["a.mp4", "b.mp4", "c.mp4"]).unwrap();
    let (mut tracker, mut host) = started(&pool);
    tracker.resolve(&mut host, 0, &ProbeEvent::DataAvailable).unwrap();
    assert!(!tracker.is_pool_ready());
    assert_eq!(tracker.settled(), 1);
}

#[test]
fn out_of_range_index_is_an_error() {
    let pool = hero_pool();
    let (mut tracker, mut host) = started(&pool);
    let err = tracker
        .resolve(&mut host, 9, &ProbeEvent::DataAvailable)
        .unwrap_err();
    assert!(err.to_string().contains("preload error"));
}

#[test]
fn mismatched_pool_is_rejected() {
    let pool = hero_pool();
    let mut host = ManualProbeHost::new();
    let mut tracker = PreloadTracker::new(2);
    assert!(tracker.begin_preload(&mut host, &pool).is_err());
    assert_eq!(host.spawned_count(), 0);
}
