//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here so it can be
//! overridden from the settings file without touching code.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{TrafficConfig, VehicleKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Road scroll per tick (pixels)
    pub scroll_speed: f32,
    /// Traffic's own forward speed; traffic scrolls by `scroll_speed - traffic_speed`
    pub traffic_speed: f32,
    /// Player step per move command (pixels)
    pub player_speed: f32,
    pub player_size: Vec2,
    pub points_per_tick: f64,
    /// One obstacle is pooled per entry
    pub fleet: Vec<VehicleKind>,
    pub traffic: TrafficConfig,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scroll_speed: SCROLL_SPEED,
            traffic_speed: TRAFFIC_SPEED,
            player_speed: PLAYER_SPEED,
            player_size: Vec2::new(PLAYER_SIZE.0, PLAYER_SIZE.1),
            points_per_tick: POINTS_PER_TICK,
            fleet: vec![
                VehicleKind::Car,
                VehicleKind::Car,
                VehicleKind::Truck,
                VehicleKind::LongTruck,
            ],
            traffic: TrafficConfig::default(),
        }
    }
}

impl Tuning {
    /// Per-tick displacement applied to traffic
    pub fn traffic_scroll(&self) -> f32 {
        self.scroll_speed - self.traffic_speed
    }
}
