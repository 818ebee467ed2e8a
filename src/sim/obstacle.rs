//! Traffic obstacles
//!
//! Obstacles are pooled: built once when the traffic manager is created and
//! re-homed every time they scroll off the bottom of the screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::{CAR_SIZE, LONG_TRUCK_SIZE, TRUCK_SIZE};

/// Index of a traffic lane, in `[0, lane_count)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LaneId(pub usize);

impl LaneId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Visual category of an obstacle; only its extent differs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    Car,
    Truck,
    LongTruck,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 3] = [
        VehicleKind::Car,
        VehicleKind::Truck,
        VehicleKind::LongTruck,
    ];
}

/// Extent of each vehicle kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleSizes {
    pub car: Vec2,
    pub truck: Vec2,
    pub long_truck: Vec2,
}

impl Default for VehicleSizes {
    fn default() -> Self {
        Self {
            car: Vec2::new(CAR_SIZE.0, CAR_SIZE.1),
            truck: Vec2::new(TRUCK_SIZE.0, TRUCK_SIZE.1),
            long_truck: Vec2::new(LONG_TRUCK_SIZE.0, LONG_TRUCK_SIZE.1),
        }
    }
}

impl VehicleSizes {
    pub fn size_of(&self, kind: VehicleKind) -> Vec2 {
        match kind {
            VehicleKind::Car => self.car,
            VehicleKind::Truck => self.truck,
            VehicleKind::LongTruck => self.long_truck,
        }
    }
}

/// One traffic participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    aabb: Aabb,
    /// `None` until the first respawn assigns a lane
    lane: Option<LaneId>,
    kind: VehicleKind,
}

impl Obstacle {
    pub fn new(kind: VehicleKind, aabb: Aabb) -> Self {
        Self {
            aabb,
            lane: None,
            kind,
        }
    }

    #[inline]
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    #[inline]
    pub fn lane(&self) -> Option<LaneId> {
        self.lane
    }

    #[inline]
    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    /// Scroll down the screen
    #[inline]
    pub(crate) fn advance(&mut self, distance: f32) {
        self.aabb.translate(0.0, distance);
    }

    /// Assign a new lane and position in one step
    pub(crate) fn rehome(&mut self, lane: LaneId, x: f32, y: f32) {
        self.lane = Some(lane);
        self.aabb.set_position(x, y);
    }

    /// Drop the lane assignment, returning the one vacated
    pub(crate) fn vacate(&mut self) -> Option<LaneId> {
        self.lane.take()
    }
}
