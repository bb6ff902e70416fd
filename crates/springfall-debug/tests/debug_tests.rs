//! Integration tests for springfall-debug.

use std::sync::Arc;

use springfall_debug::exchange::SnapshotExchange;
use springfall_debug::hooks::{InspectionHook, TelemetryHook};
use springfall_debug::snapshot::FrameSnapshot;
use springfall_math::Vec3;
use springfall_solver::{PointState, StepResult};
use springfall_telemetry::EventKind;

fn sample_state() -> PointState {
    let mut state = PointState::from_positions(vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.0, 4.0)]);
    state.velocities[0] = Vec3::new(3.0, 0.0, 4.0);
    state
}

// ─── Hook Tests ───────────────────────────────────────────────

#[test]
fn telemetry_hook_collects_frame_events() {
    let mut hook = TelemetryHook::new();
    let state = sample_state();
    let result = StepResult {
        contacts: 5,
        clamped: 1,
        ..Default::default()
    };

    hook.on_frame_begin(0, 0.0);
    hook.on_command(0, "toggle_wind");
    hook.on_frame_end(0, &result, 13, &state);

    let events = hook.drain_events();
    let labels: Vec<&str> = events.iter().map(|e| e.label()).collect();
    assert_eq!(
        labels,
        vec!["frame_begin", "command", "contacts", "energy", "instability", "frame_end"]
    );
    match &events[3].kind {
        EventKind::Energy { kinetic, max_speed } => {
            assert!((kinetic - 12.5).abs() < 1e-9);
            assert!((max_speed - 5.0).abs() < 1e-6);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn stable_frame_emits_no_instability() {
    let mut hook = TelemetryHook::new();
    hook.on_frame_end(2, &StepResult::default(), 1, &PointState::new(1));
    assert!(hook
        .drain_events()
        .iter()
        .all(|e| !matches!(e.kind, EventKind::Instability { .. })));
}

#[test]
fn hook_drain_clears() {
    let mut hook = TelemetryHook::new();
    hook.on_frame_begin(0, 0.0);
    let _ = hook.drain_events();
    assert!(hook.drain_events().is_empty());
    assert_eq!(hook.name(), "telemetry_hook");
}

// ─── Snapshot Tests ───────────────────────────────────────────

#[test]
fn snapshot_round_trip() {
    let snap = FrameSnapshot::capture(42, 0.7, "cloth", &sample_state());
    assert_eq!(snap.point_count, 2);
    assert_eq!(snap.positions, vec![1.0, 2.0, 3.0, -1.0, 0.0, 4.0]);

    let bytes = snap.to_bytes().unwrap();
    let recovered = FrameSnapshot::from_bytes(&bytes).unwrap();
    assert_eq!(recovered, snap);
}

#[test]
fn corrupt_snapshot_is_rejected() {
    assert!(FrameSnapshot::from_bytes(&[1, 2, 3]).is_err());

    let mut snap = FrameSnapshot::capture(0, 0.0, "particles", &sample_state());
    snap.velocities.pop();
    let bytes = snap.to_bytes().unwrap();
    assert!(FrameSnapshot::from_bytes(&bytes).is_err());
}

#[test]
fn summary_bounds_and_energy() {
    let summary = FrameSnapshot::capture(0, 0.0, "cloth", &sample_state()).summary();
    assert_eq!(summary.min, [-1.0, 0.0, 3.0]);
    assert_eq!(summary.max, [1.0, 2.0, 4.0]);
    assert!((summary.kinetic_energy - 12.5).abs() < 1e-9);
    assert!((summary.max_speed - 5.0).abs() < 1e-6);
}

#[test]
fn snapshot_file_round_trip() {
    let path = std::env::temp_dir().join(format!("springfall-snapshot-{}.bin", std::process::id()));
    let snap = FrameSnapshot::capture(3, 0.05, "free_fall", &sample_state());
    snap.write_to(&path).unwrap();
    let back = FrameSnapshot::read_from(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(back, snap);
}

// ─── Exchange Tests ───────────────────────────────────────────

#[test]
fn exchange_starts_empty() {
    let exchange = SnapshotExchange::new();
    assert!(exchange.latest().is_none());
    assert_eq!(exchange.published(), 0);
}

#[test]
fn readers_see_latest_complete_frame() {
    let exchange = SnapshotExchange::new();
    let state = sample_state();
    exchange.publish(FrameSnapshot::capture(0, 0.0, "cloth", &state));
    let held = exchange.latest().unwrap();
    exchange.publish(FrameSnapshot::capture(1, 1.0 / 60.0, "cloth", &state));

    assert_eq!(held.frame, 0);
    assert_eq!(exchange.latest().unwrap().frame, 1);
    assert_eq!(exchange.published(), 2);
}

#[test]
fn exchange_is_shared_across_threads() {
    let exchange = Arc::new(SnapshotExchange::new());
    let producer = {
        let exchange = Arc::clone(&exchange);
        std::thread::spawn(move || {
            let state = sample_state();
            for frame in 0..10 {
                exchange.publish(FrameSnapshot::capture(frame, frame as f64 / 60.0, "cloth", &state));
            }
        })
    };

    while exchange.published() < 10 {
        if let Some(snapshot) = exchange.latest() {
            assert_eq!(snapshot.positions.len(), snapshot.point_count * 3);
        }
        std::thread::yield_now();
    }
    producer.join().unwrap();
    assert_eq!(exchange.latest().unwrap().frame, 9);
}
