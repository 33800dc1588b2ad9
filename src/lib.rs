//! Brickwall - a two-player arcade game around a self-repairing wall
//!
//! Core modules:
//! - `sim`: Deterministic wall simulation (grid, topology, impacts, repairs)
//! - `config`: Data-driven wall tuning loaded from JSON

pub mod config;
pub mod sim;

pub use config::{ConfigError, WallConfig};

/// Default tuning constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Preferred brick width; the real width is stretched so columns tile the surface exactly
    pub const TARGET_BRICK_WIDTH: f32 = 48.0;
    pub const BRICK_HEIGHT: f32 = 16.0;

    /// Extra ribbon columns hidden past each side of the surface
    pub const EDGE_BUFFER_COLUMNS: i32 = 2;
    /// Rows kept free between a surface edge and its row limit
    pub const ROW_MARGIN: i32 = 2;
    /// Distance (in rows) from a row limit inside which bricks turn inert
    pub const INERT_ROW_OFFSET: i32 = 1;

    /// Chance that a repair brick carries a power-up
    pub const POWER_UP_CHANCE: f64 = 0.08;

    pub const BALL_RADIUS: f32 = 6.0;
    pub const BALL_SPEED: f32 = 260.0;
}
