//! Physical constants and simulation defaults.

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f32 = 9.8;

/// Frame rate the sub-step count is derived from.
pub const TARGET_FRAME_RATE: f32 = 60.0;

/// Numerator of the default sub-step size: `dt = DT_SCALE / resolution`.
pub const DT_SCALE: f32 = 4.0e-2;

/// Epsilon below which a separation is treated as degenerate.
pub const EPSILON: f32 = 1.0e-7;

/// Default speed bound for the stability guard (m/s).
pub const DEFAULT_MAX_SPEED: f32 = 1.0e3;

// ─── Cloth ───

/// Default cloth grid resolution (nodes per side).
pub const CLOTH_GRID_SIZE: usize = 128;

/// Elastic spring stiffness (Young's-modulus-like coefficient).
pub const SPRING_STIFFNESS: f32 = 3.0e4;

/// Dashpot damping coefficient along each spring axis.
pub const DASHPOT_DAMPING: f32 = 1.0e4;

/// Exponential drag coefficient: `v *= exp(-drag * dt)`.
pub const DRAG_DAMPING: f32 = 1.0;

/// Height the cloth sheet is dropped from.
pub const CLOTH_DROP_HEIGHT: f32 = 0.6;

/// Radius of the default sphere obstacle.
pub const OBSTACLE_RADIUS: f32 = 0.3;

/// Jitter amplitude as a fraction of the lattice spacing.
///
/// Deliberately relative: an absolute ±0.05 offset would span several
/// lattice cells at n = 128.
pub const CLOTH_JITTER: f32 = 0.5;

// ─── Particle system ───

/// Default particles per side of the spawn lattice (count = side²).
pub const PARTICLE_GRID_SIDE: usize = 33;

/// Default particle radius.
pub const PARTICLE_RADIUS: f32 = 0.1;

/// Slack added to the contact distance `2r`.
pub const CONTACT_EPSILON: f32 = 1.0e-3;

/// Fraction of incoming normal velocity kept after a wall bounce.
pub const RESTITUTION: f32 = 0.9;

/// Half extent of the particle bounding box.
pub const SCENE_SIZE: f32 = 20.0;

/// Height of the bounding box walls.
pub const WALL_HEIGHT: f32 = 3.0;

/// Walls sit at `±SCENE_SIZE * WALL_MARGIN`.
pub const WALL_MARGIN: f32 = 0.98;

/// Floor contact height offset added to the particle radius.
pub const FLOOR_OFFSET: f32 = 0.01;

/// Spawn height of the particle cloud.
pub const PARTICLE_DROP_HEIGHT: f32 = 5.0;

/// Spawn scatter as a fraction of the scene size.
pub const PARTICLE_SCATTER: f32 = 1.5;

/// Wind force applied to particles when wind is on.
pub const PARTICLE_WIND: [f32; 3] = [5.0, 0.0, 6.0];

/// Wind force applied to cloth when wind is on.
pub const CLOTH_WIND: [f32; 3] = [2.0, 0.0, 1.5];

/// Particle count above which the uniform grid broad phase is used.
pub const GRID_BROAD_PHASE_THRESHOLD: usize = 64;
