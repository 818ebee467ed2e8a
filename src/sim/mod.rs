//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, no wall clock
//! - Seeded RNG only
//! - Stable iteration order (obstacle creation order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod lanes;
pub mod obstacle;
pub mod player;
pub mod state;
pub mod tick;
pub mod traffic;

pub use aabb::Aabb;
pub use lanes::{LaneOccupancy, lane_origin_x};
pub use obstacle::{LaneId, Obstacle, VehicleKind, VehicleSizes};
pub use player::{Direction, Player};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use traffic::{TrafficConfig, TrafficManager};
