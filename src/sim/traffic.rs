//! Traffic spawning, scrolling and collision
//!
//! The traffic manager owns a fixed pool of obstacles. Each tick it scrolls
//! them down the screen; any obstacle that passes the bottom edge is
//! re-homed above the screen in a lane that
//! - is not already at capacity,
//! - leaves at least one other lane completely empty, and
//! - does not make it overlap any other obstacle.
//!
//! Obstacles are always processed in creation order and all randomness comes
//! from a seeded PCG stream, so a seed plus a sequence of scroll speeds fully
//! determines every obstacle trajectory.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::lanes::{LaneOccupancy, lane_origin_x};
use super::obstacle::{LaneId, Obstacle, VehicleKind, VehicleSizes};
use crate::consts::*;
use crate::error::ConfigError;

/// Road and spawn geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    pub lane_count: usize,
    /// Distance between adjacent lane origins
    pub lane_width: f32,
    /// Offset of an obstacle's left edge inside its lane
    pub lane_margin: f32,
    /// Left edge of lane 0
    pub road_origin_x: f32,
    pub max_per_lane: usize,
    /// Obstacles whose top edge passes this y are respawned
    pub screen_height: f32,
    /// Depth range above the screen used for respawn positions
    pub spawn_spread: f32,
    /// Spawn depth in screen heights, used by `fit_to_screen`
    pub spawn_spread_screens: f32,
    pub vehicle_sizes: VehicleSizes,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            lane_count: LANE_COUNT,
            lane_width: LANE_WIDTH,
            lane_margin: LANE_MARGIN,
            road_origin_x: 0.0,
            max_per_lane: MAX_PER_LANE,
            screen_height: SCREEN_HEIGHT,
            spawn_spread: SCREEN_HEIGHT * SPAWN_SPREAD_SCREENS,
            spawn_spread_screens: SPAWN_SPREAD_SCREENS,
            vehicle_sizes: VehicleSizes::default(),
        }
        .fit_to_screen(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl TrafficConfig {
    /// Centre the road horizontally and scale spawn depth to the screen
    ///
    /// Short screens get the minimum depth any vehicle kind needs, so the
    /// result validates for every fleet the other fields allow.
    pub fn fit_to_screen(mut self, width: f32, height: f32) -> Self {
        self.road_origin_x = width / 2.0 - self.road_width() / 2.0;
        self.screen_height = height;
        let tallest = VehicleKind::ALL
            .iter()
            .map(|&kind| self.vehicle_sizes.size_of(kind).y)
            .fold(0.0, f32::max);
        self.spawn_spread =
            (height * self.spawn_spread_screens).max(self.min_spawn_spread(tallest));
        self
    }

    /// Spawn depth needed so a lane holding `max_per_lane - 1` others still
    /// has a gap taller than an obstacle of height `tallest`
    pub fn min_spawn_spread(&self, tallest: f32) -> f32 {
        2.0 * self.max_per_lane as f32 * tallest
    }

    /// Total width of all lanes
    pub fn road_width(&self) -> f32 {
        self.lane_count as f32 * self.lane_width
    }

    /// Horizontal extent of the road (left, right)
    pub fn road_bounds(&self) -> (f32, f32) {
        (self.road_origin_x, self.road_origin_x + self.road_width())
    }

    /// Obstacle left edge for a lane
    #[inline]
    pub fn lane_x(&self, lane: LaneId) -> f32 {
        lane_origin_x(self.road_origin_x, lane, self.lane_width, self.lane_margin)
    }

    /// Lane whose corridor contains `x`, if any
    pub fn lane_at(&self, x: f32) -> Option<LaneId> {
        let offset = x - self.road_origin_x;
        if offset < 0.0 || offset >= self.road_width() {
            return None;
        }
        Some(LaneId((offset / self.lane_width) as usize))
    }

    /// Obstacles that may be assigned at once while one lane stays empty
    pub fn usable_capacity(&self) -> usize {
        self.lane_count.saturating_sub(1) * self.max_per_lane
    }

    /// Reject configurations under which respawn could fail to find a slot
    pub fn validate(&self, fleet: &[VehicleKind]) -> Result<(), ConfigError> {
        if self.lane_count < 2 {
            return Err(ConfigError::TooFewLanes(self.lane_count));
        }
        if !(self.lane_width.is_finite() && self.lane_width > 0.0) {
            return Err(ConfigError::InvalidLaneWidth(self.lane_width));
        }
        if !(self.lane_margin.is_finite() && self.lane_margin >= 0.0) {
            return Err(ConfigError::InvalidLaneMargin(self.lane_margin));
        }
        if self.max_per_lane == 0 {
            return Err(ConfigError::ZeroLaneCapacity);
        }
        if !(self.screen_height.is_finite() && self.screen_height > 0.0) {
            return Err(ConfigError::InvalidScreenHeight(self.screen_height));
        }

        let available = self.lane_width - self.lane_margin;
        let mut tallest: f32 = 0.0;
        for &kind in fleet {
            let size = self.vehicle_sizes.size_of(kind);
            if !(size.is_finite() && size.x > 0.0 && size.y > 0.0) {
                return Err(ConfigError::InvalidVehicleSize {
                    kind,
                    width: size.x,
                    height: size.y,
                });
            }
            if size.x > available {
                return Err(ConfigError::VehicleTooWide {
                    kind,
                    width: size.x,
                    available,
                });
            }
            tallest = tallest.max(size.y);
        }

        let capacity = self.usable_capacity();
        if fleet.len() > capacity {
            return Err(ConfigError::PoolTooLarge {
                pool: fleet.len(),
                capacity,
            });
        }

        let required = self.min_spawn_spread(tallest);
        let spread = self.spawn_spread;
        if !(spread.is_finite() && spread > 0.0 && spread >= required) {
            return Err(ConfigError::SpawnSpreadTooSmall {
                spread: self.spawn_spread,
                required,
            });
        }

        Ok(())
    }
}

/// Owner of the obstacle pool and lane bookkeeping
#[derive(Debug, Clone)]
pub struct TrafficManager {
    config: TrafficConfig,
    /// Creation order, which is also processing order
    obstacles: Vec<Obstacle>,
    occupancy: LaneOccupancy,
    rng: Pcg32,
}

impl TrafficManager {
    /// Build one obstacle per fleet entry, parked just below the screen
    ///
    /// Parked obstacles sit at `y = screen_height`, off-screen below the
    /// visible area rather than above it, and have no lane. Any positive
    /// `advance` moves them past the respawn line, so the first tick places
    /// the whole pool above the screen; `advance(0.0)` leaves them parked.
    pub fn new(
        config: TrafficConfig,
        fleet: &[VehicleKind],
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate(fleet)?;

        let park_x = config.lane_x(LaneId(0));
        let obstacles = fleet
            .iter()
            .map(|&kind| {
                let size = config.vehicle_sizes.size_of(kind);
                Obstacle::new(kind, Aabb::new(park_x, config.screen_height, size.x, size.y))
            })
            .collect();

        log::debug!(
            "Traffic manager: {} obstacles, {} lanes x {} slots, seed {}",
            fleet.len(),
            config.lane_count,
            config.max_per_lane,
            seed
        );

        Ok(Self {
            occupancy: LaneOccupancy::new(config.lane_count, config.max_per_lane),
            config,
            obstacles,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &TrafficConfig {
        &self.config
    }

    /// Obstacles in creation order
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Owned copy of the pool for a renderer that must not see a half-updated tick
    pub fn snapshot(&self) -> Vec<Obstacle> {
        self.obstacles.clone()
    }

    pub fn occupancy(&self) -> &LaneOccupancy {
        &self.occupancy
    }

    /// Scroll every obstacle, then respawn those past the bottom edge
    pub fn advance(&mut self, scroll_speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(scroll_speed);
        }

        for index in 0..self.obstacles.len() {
            if self.obstacles[index].aabb().y() > self.config.screen_height {
                self.respawn(index);
            }
        }
    }

    /// Re-home one obstacle above the screen
    ///
    /// # Panics
    ///
    /// If no valid slot is found within `MAX_RESPAWN_ATTEMPTS` draws. A
    /// configuration accepted by `TrafficConfig::validate` always has one.
    pub fn respawn(&mut self, index: usize) {
        if let Some(old_lane) = self.obstacles[index].vacate() {
            self.occupancy.release(old_lane);
        }

        let size = self.obstacles[index].aabb().size;
        let lane_count = self.occupancy.lane_count();

        for attempt in 1..=MAX_RESPAWN_ATTEMPTS {
            let y = -size.y - self.rng.random_range(0.0..self.config.spawn_spread);
            let lane = LaneId(self.rng.random_range(0..lane_count));

            if self.occupancy.is_full(lane) || !self.occupancy.has_free_lane_besides(lane) {
                continue;
            }

            let x = self.config.lane_x(lane);
            let candidate = Aabb {
                pos: Vec2::new(x, y),
                size,
            };
            let blocked = self
                .obstacles
                .iter()
                .enumerate()
                .any(|(other, obstacle)| other != index && obstacle.aabb().overlaps(&candidate));
            if blocked {
                continue;
            }

            self.occupancy.occupy(lane);
            self.obstacles[index].rehome(lane, x, y);
            log::trace!(
                "Respawned obstacle {} into lane {} at y={:.1} after {} attempts",
                index,
                lane.index(),
                y,
                attempt
            );
            return;
        }

        log::error!(
            "Respawn of obstacle {} exhausted {} attempts (occupancy {:?})",
            index,
            MAX_RESPAWN_ATTEMPTS,
            self.occupancy.counts()
        );
        panic!(
            "no respawn slot for obstacle {index} after {MAX_RESPAWN_ATTEMPTS} attempts"
        );
    }

    /// Check whether any obstacle overlaps `other`
    pub fn collides_with(&self, other: &Aabb) -> bool {
        self.obstacles.iter().any(|o| o.aabb().overlaps(other))
    }

    /// Respawn every obstacle for a fresh run
    pub fn reset(&mut self) {
        for index in 0..self.obstacles.len() {
            self.respawn(index);
        }
        log::debug!("Traffic reset, occupancy {:?}", self.occupancy.counts());
    }
}
