//! Integration tests for springfall-types.

use springfall_types::{GridCoord, SpringfallError};

// ─── ID Tests ──────────────────────────────────────────────────

#[test]
fn grid_coord_flat_round_trip() {
    let n = 7;
    for index in [0, 1, 6, 7, 20, 48] {
        let coord = GridCoord::from_flat(index, n);
        assert_eq!(coord.flat(n), index);
    }
    assert_eq!(GridCoord::new(2, 3).flat(7), 17);
}

#[test]
fn grid_coord_offset_respects_bounds() {
    let n = 4;
    let corner = GridCoord::new(0, 0);
    assert_eq!(corner.offset(-1, 0, n), None);
    assert_eq!(corner.offset(0, -1, n), None);
    assert_eq!(corner.offset(1, 1, n), Some(GridCoord::new(1, 1)));

    let far = GridCoord::new(3, 3);
    assert_eq!(far.offset(1, 0, n), None);
    assert_eq!(far.offset(-2, 0, n), Some(GridCoord::new(1, 3)));
}

#[test]
fn ids_are_serializable() {
    let coord = GridCoord::new(4, 9);
    let json = serde_json::to_string(&coord).unwrap();
    let deserialized: GridCoord = serde_json::from_str(&json).unwrap();
    assert_eq!(coord, deserialized);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = SpringfallError::InvalidConfig("grid size must be at least 2 (got 1)".into());
    assert!(err.to_string().contains("grid size"));
    assert!(err.to_string().starts_with("Invalid configuration"));
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
    let err: SpringfallError = io.into();
    assert!(err.to_string().contains("missing.toml"));
}

// ─── Constant Tests ───────────────────────────────────────────

#[test]
fn cloth_jitter_stays_within_one_lattice_cell() {
    use springfall_types::constants::CLOTH_JITTER;
    // The offset is (u - 0.5) * jitter * spacing, so at most half of it per axis.
    assert!(CLOTH_JITTER > 0.0);
    assert!(0.5 * CLOTH_JITTER < 1.0);
}
