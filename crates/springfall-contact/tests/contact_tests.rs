//! Integration tests for springfall-contact.

use springfall_contact::broad::{AllPairs, BroadPhase};
use springfall_contact::{BoundingBox, ContactResult, PairResponse, SpatialHash, SphereObstacle};
use springfall_math::Vec3;

fn lattice(side: usize, spacing: f32) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(side * side * side);
    for x in 0..side {
        for y in 0..side {
            for z in 0..side {
                points.push(Vec3::new(x as f32, y as f32, z as f32) * spacing);
            }
        }
    }
    points
}

// ─── Broad Phase Tests ────────────────────────────────────────

#[test]
fn all_pairs_lists_everyone_else() {
    let positions = lattice(2, 1.0);
    let mut bp = AllPairs::new();
    bp.update(&positions).unwrap();

    let mut out = Vec::new();
    bp.candidates(3, &positions, &mut out);
    assert_eq!(out, vec![0, 1, 2, 4, 5, 6, 7]);
    assert_eq!(bp.name(), "all_pairs");
}

#[test]
fn spatial_hash_finds_every_close_pair() {
    let positions = lattice(4, 0.15);
    let contact = 0.21;

    let mut hash = SpatialHash::new(contact);
    hash.update(&positions).unwrap();

    let mut out = Vec::new();
    for i in 0..positions.len() {
        hash.candidates(i, &positions, &mut out);
        assert!(out.windows(2).all(|w| w[0] < w[1]), "candidates must be sorted");
        assert!(!out.contains(&(i as u32)));
        for j in 0..positions.len() {
            if i != j && positions[i].distance(positions[j]) <= contact {
                assert!(out.contains(&(j as u32)), "missed pair ({i}, {j})");
            }
        }
    }
}

#[test]
fn spatial_hash_culls_far_points() {
    let positions = vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)];
    let mut hash = SpatialHash::new(0.5);
    hash.update(&positions).unwrap();

    let mut out = Vec::new();
    hash.candidates(0, &positions, &mut out);
    assert!(out.is_empty());
}

#[test]
fn spatial_hash_keeps_pairs_at_exact_contact_distance() {
    let response = PairResponse::new(0.1, 1e-3);
    let contact = response.contact_distance;

    // Straddles the x = 0 cell boundary; floor() puts these two cells apart
    // when the cell edge is exactly the contact distance.
    let positions = vec![Vec3::new(-1e-9, 0.0, 0.0), Vec3::new(contact, 0.0, 0.0)];
    let (_, exact) = response.resolve(0, &positions, Vec3::X, &[1]);
    assert_eq!(exact.resolved_count, 1);

    let mut hash = SpatialHash::new(contact);
    hash.update(&positions).unwrap();
    let mut out = Vec::new();
    hash.candidates(0, &positions, &mut out);
    assert_eq!(out, vec![1]);
    hash.candidates(1, &positions, &mut out);
    assert_eq!(out, vec![0]);
}

#[test]
fn spatial_hash_matches_all_pairs_along_cell_boundaries() {
    let response = PairResponse::new(0.1, 1e-3);
    let contact = response.contact_distance;

    // Pairs exactly one contact distance apart, starting just below
    // successive multiples of the contact distance.
    let mut positions = Vec::new();
    for k in -20..20 {
        let start = k as f32 * contact - 1e-6;
        let y = k as f32 * 10.0;
        positions.push(Vec3::new(start, y, 0.0));
        positions.push(Vec3::new(start + contact, y, 0.0));
    }

    let mut hash = SpatialHash::new(contact);
    hash.update(&positions).unwrap();
    let mut all = AllPairs::new();
    all.update(&positions).unwrap();

    let mut grid_out = Vec::new();
    let mut all_out = Vec::new();
    for i in 0..positions.len() {
        hash.candidates(i, &positions, &mut grid_out);
        all.candidates(i, &positions, &mut all_out);
        let v0 = Vec3::new(if i % 2 == 0 { 1.0 } else { -1.0 }, 0.0, 0.0);
        let (via_grid, grid_hits) = response.resolve(i, &positions, v0, &grid_out);
        let (via_all, all_hits) = response.resolve(i, &positions, v0, &all_out);
        assert_eq!(via_grid, via_all, "particle {i}");
        assert_eq!(grid_hits.resolved_count, all_hits.resolved_count, "particle {i}");
    }
}

#[test]
fn spatial_hash_rebuild_drops_stale_cells() {
    let mut hash = SpatialHash::new(1.0);
    hash.update(&[Vec3::ZERO, Vec3::splat(5.0)]).unwrap();
    hash.update(&[Vec3::ZERO, Vec3::new(0.1, 0.0, 0.0)]).unwrap();

    let positions = [Vec3::ZERO, Vec3::new(0.1, 0.0, 0.0)];
    let mut out = Vec::new();
    hash.candidates(0, &positions, &mut out);
    assert_eq!(out, vec![1]);
    assert_eq!(hash.name(), "spatial_hash");
}

// ─── Pair Response Tests ──────────────────────────────────────

#[test]
fn approaching_pair_is_stopped_along_normal() {
    let response = PairResponse::new(0.1, 0.001);
    let positions = vec![Vec3::ZERO, Vec3::new(0.15, 0.0, 0.0)];

    // Particle 0 moves toward particle 1 and sideways.
    let (v, result) = response.resolve(0, &positions, Vec3::new(1.0, 0.0, 0.5), &[1]);
    assert!(v.x.abs() < 1e-6);
    assert!((v.z - 0.5).abs() < 1e-6);
    assert_eq!(result.resolved_count, 1);
    assert!(result.max_penetration > 0.0);
}

#[test]
fn separating_pair_keeps_velocity() {
    let response = PairResponse::new(0.1, 0.001);
    let positions = vec![Vec3::ZERO, Vec3::new(0.15, 0.0, 0.0)];
    let v0 = Vec3::new(-1.0, 0.2, 0.0);
    let (v, _) = response.resolve(0, &positions, v0, &[1]);
    assert_eq!(v, v0);
}

#[test]
fn distant_pair_is_ignored() {
    let response = PairResponse::new(0.1, 0.001);
    let positions = vec![Vec3::ZERO, Vec3::new(0.202, 0.0, 0.0)];
    let v0 = Vec3::new(3.0, 0.0, 0.0);
    let (v, result) = response.resolve(0, &positions, v0, &[1]);
    assert_eq!(v, v0);
    assert_eq!(result, ContactResult::default());
}

#[test]
fn coincident_pair_is_skipped() {
    let response = PairResponse::new(0.1, 0.001);
    let positions = vec![Vec3::ONE, Vec3::ONE];
    let v0 = Vec3::new(1.0, 2.0, 3.0);
    let (v, result) = response.resolve(0, &positions, v0, &[1]);
    assert_eq!(v, v0);
    assert!(v.is_finite());
    assert_eq!(result.degenerate_count, 1);
    assert_eq!(result.resolved_count, 0);
}

#[test]
fn contact_results_merge() {
    let a = ContactResult {
        resolved_count: 2,
        degenerate_count: 0,
        max_penetration: 0.01,
    };
    let b = ContactResult {
        resolved_count: 1,
        degenerate_count: 1,
        max_penetration: 0.03,
    };
    let m = a.merge(b);
    assert_eq!(m.resolved_count, 3);
    assert_eq!(m.degenerate_count, 1);
    assert!((m.max_penetration - 0.03).abs() < 1e-7);
}

// ─── Sphere Obstacle Tests ────────────────────────────────────

#[test]
fn sphere_removes_inward_velocity() {
    let sphere = SphereObstacle::new(Vec3::ZERO, 0.3).unwrap();
    let (v, hit) = sphere.resolve(Vec3::new(0.0, 0.29, 0.0), Vec3::new(0.5, -1.0, 0.0));
    assert!(hit);
    assert_eq!(v, Vec3::new(0.5, 0.0, 0.0));
}

#[test]
fn sphere_ignores_outside_nodes() {
    let sphere = SphereObstacle::new(Vec3::ZERO, 0.3).unwrap();
    let v0 = Vec3::new(0.0, -1.0, 0.0);
    let (v, hit) = sphere.resolve(Vec3::new(0.0, 0.31, 0.0), v0);
    assert!(!hit);
    assert_eq!(v, v0);
}

#[test]
fn sphere_center_is_degenerate() {
    let sphere = SphereObstacle::new(Vec3::ZERO, 0.3).unwrap();
    let v0 = Vec3::new(0.0, -1.0, 0.0);
    let (v, hit) = sphere.resolve(Vec3::ZERO, v0);
    assert!(!hit);
    assert_eq!(v, v0);
}

#[test]
fn sphere_can_be_moved() {
    let mut sphere = SphereObstacle::new(Vec3::ZERO, 0.3).unwrap();
    sphere.set_center(Vec3::new(1.0, 0.0, 0.0));
    assert!(sphere.contains(Vec3::new(1.2, 0.0, 0.0)));
    assert!(!sphere.contains(Vec3::ZERO));
}

#[test]
fn sphere_rejects_bad_radius() {
    assert!(SphereObstacle::new(Vec3::ZERO, 0.0).is_err());
    assert!(SphereObstacle::new(Vec3::ZERO, -1.0).is_err());
    assert!(SphereObstacle::new(Vec3::splat(f32::NAN), 1.0).is_err());
}

// ─── Bounding Box Tests ───────────────────────────────────────

#[test]
fn floor_bounce_with_restitution() {
    let bounds = BoundingBox::new(20.0, 3.0);
    let (v, hits) = bounds.reflect(Vec3::new(0.0, 0.05, 0.0), Vec3::new(0.0, -2.0, 0.0), 0.1);
    assert_eq!(hits, 1);
    assert!((v.y - 1.8).abs() < 1e-6);
}

#[test]
fn floor_ignores_rising_particle() {
    let bounds = BoundingBox::new(20.0, 3.0);
    let v0 = Vec3::new(0.0, 2.0, 0.0);
    let (v, hits) = bounds.reflect(Vec3::new(0.0, 0.05, 0.0), v0, 0.1);
    assert_eq!(hits, 0);
    assert_eq!(v, v0);
}

#[test]
fn walls_reflect_outgoing_velocity() {
    let bounds = BoundingBox::new(20.0, 3.0);
    let wall = bounds.wall();
    assert!((wall - 19.6).abs() < 1e-4);

    let (v, hits) = bounds.reflect(Vec3::new(wall + 0.1, 5.0, -wall - 0.1), Vec3::new(1.0, 0.0, -2.0), 0.1);
    assert_eq!(hits, 2);
    assert!((v.x + 0.9).abs() < 1e-6);
    assert!((v.z - 1.8).abs() < 1e-6);

    // Already moving back inside: untouched.
    let (v, hits) = bounds.reflect(Vec3::new(wall + 0.1, 5.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), 0.1);
    assert_eq!(hits, 0);
    assert_eq!(v.x, -1.0);
}

#[test]
fn bounding_box_validation() {
    assert!(BoundingBox::new(20.0, 3.0).validate().is_ok());
    assert!(BoundingBox::new(0.0, 3.0).validate().is_err());
    assert!(BoundingBox::new(20.0, 3.0).with_restitution(1.5).validate().is_err());
    assert!(BoundingBox::default().validate().is_ok());
}

#[test]
fn bounding_box_serialization() {
    let bounds = BoundingBox::new(10.0, 2.0).with_restitution(0.5);
    let json = serde_json::to_string(&bounds).unwrap();
    let recovered: BoundingBox = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, bounds);
}
