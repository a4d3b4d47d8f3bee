// Compiled constants for the verlet simulation and its demo window
use bevy::prelude::*;

// Window / frame
pub const WINDOW_SIZE: u32 = 840;
pub const WORLD_SIZE: f32 = WINDOW_SIZE as f32;
pub const FRAME_RATE: u32 = 60;
pub const FRAME_DT: f32 = 1.0 / FRAME_RATE as f32;
pub const DEFAULT_SUB_STEPS: u32 = 8;

// Forces (px/s^2, y grows downward)
pub const GRAVITY_MAGNITUDE: f32 = 1000.0;
pub const FORCE_STRENGTH: f32 = 10.0;
pub const FORCE_RADIUS: f32 = 120.0;
// Acceleration every particle used to start with; opt-in only.
pub const LEGACY_ACCELERATION_SEED: Vec2 = Vec2::new(10.0, 10.0);

// Boundary
pub const BOUNDARY_CENTER: Vec2 = Vec2::new(WORLD_SIZE / 2.0, WORLD_SIZE / 2.0);
pub const BOUNDARY_RADIUS: f32 = (WORLD_SIZE - 20.0) / 2.0;
pub const WALL_TANGENT_DAMPING: f32 = 0.75;

// Spawning
pub const MAX_PARTICLES: usize = 1000;
pub const SPAWN_DELAY: f32 = 0.05;
pub const SPAWN_POSITION: Vec2 = Vec2::new(420.0, 200.0);
pub const SPAWN_VELOCITY: Vec2 = Vec2::new(500.0, 50.0);
pub const MIN_SPAWN_RADIUS: f32 = 5.0;
pub const MAX_SPAWN_RADIUS: f32 = 12.0;
pub const DEFAULT_RADIUS: f32 = 10.0;

// Broad phase cells must fit the largest contact distance
pub const CELL_SIZE: f32 = 2.0 * MAX_SPAWN_RADIUS;
