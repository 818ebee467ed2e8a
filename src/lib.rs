//! Lane Rush - A lane-based arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (traffic spawning, collisions, game state)
//! - `highscores`: Top-10 leaderboard and its text file format
//! - `settings`: Persisted player preferences
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, ScoreError, SettingsError};
pub use highscores::{ScoreRecord, ScoreTable, prepare_ratings};
pub use settings::{Resolution, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Number of parallel traffic lanes
    pub const LANE_COUNT: usize = 5;
    /// Horizontal distance between adjacent lane origins
    pub const LANE_WIDTH: f32 = 200.0;
    /// Offset of an obstacle's left edge from its lane origin
    pub const LANE_MARGIN: f32 = 65.0;
    /// Maximum obstacles assigned to one lane at a time
    pub const MAX_PER_LANE: usize = 3;

    /// Default screen size (pixels)
    pub const SCREEN_WIDTH: f32 = 1920.0;
    pub const SCREEN_HEIGHT: f32 = 1080.0;

    /// Respawn depth range, in screen heights above the visible area
    pub const SPAWN_SPREAD_SCREENS: f32 = 3.0;
    /// Candidate draws before respawn gives up (lane math makes this unreachable)
    pub const MAX_RESPAWN_ATTEMPTS: u32 = 1024;

    /// Obstacle sprite extents (width, height)
    pub const CAR_SIZE: (f32, f32) = (110.0, 210.0);
    pub const TRUCK_SIZE: (f32, f32) = (110.0, 300.0);
    pub const LONG_TRUCK_SIZE: (f32, f32) = (110.0, 420.0);

    /// Player defaults
    pub const PLAYER_SIZE: (f32, f32) = (110.0, 200.0);
    pub const PLAYER_SPEED: f32 = 10.0;
    /// Score gained per tick survived
    pub const POINTS_PER_TICK: f64 = 0.1;

    /// Road scroll per tick (pixels)
    pub const SCROLL_SPEED: f32 = 20.0;
    /// Traffic drives forward too, so it scrolls slower than the road
    pub const TRAFFIC_SPEED: f32 = 3.0;
}
