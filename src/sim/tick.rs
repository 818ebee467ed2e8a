//! Fixed timestep simulation tick
//!
//! Core game loop step: input, traffic, collision, scoring.

use super::obstacle::LaneId;
use super::player::Direction;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move commands, already debounced by the input layer
    pub moves: Vec<Direction>,
    /// Pause toggle
    pub pause: bool,
    /// Start a new run (only honoured after game over)
    pub restart: bool,
    /// Demo mode - the player's car steers itself
    pub autopilot: bool,
}

/// Clearance (pixels) below which the autopilot looks for another lane
const AUTOPILOT_SAFE_DISTANCE: f32 = 600.0;

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if input.restart && state.phase == GamePhase::GameOver {
        state.restart();
        return;
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    for &direction in &input.moves {
        state.apply_move(direction);
    }
    if input.autopilot {
        if let Some(direction) = autopilot(state) {
            state.apply_move(direction);
        }
    }

    state.traffic.advance(state.tuning.traffic_scroll());

    if state.traffic.collides_with(state.player.aabb()) {
        state.player.set_dead(true);
        state.phase = GamePhase::GameOver;
        let points = state.score();
        log::info!("Crashed after {} ticks with {} points", state.time_ticks, points);
        state.events.push(GameEvent::Crashed { points });
        return;
    }

    state.player.update();
}

/// Pick a lateral move towards the safest neighbouring lane
fn autopilot(state: &GameState) -> Option<Direction> {
    let config = state.traffic.config();
    let player = state.player.aabb();
    let current = config.lane_at(player.center().x)?;

    // Gap between the player's nose and the nearest obstacle tail ahead;
    // negative when an obstacle is alongside.
    let clearance = |lane: LaneId| -> f32 {
        state
            .traffic
            .obstacles()
            .iter()
            .filter(|o| o.lane() == Some(lane) && o.aabb().y() < player.bottom())
            .map(|o| player.y() - o.aabb().bottom())
            .fold(f32::INFINITY, f32::min)
    };

    let mut target = current;
    let mut best = clearance(current);
    if best < AUTOPILOT_SAFE_DISTANCE {
        let neighbours = [current.index().checked_sub(1), Some(current.index() + 1)];
        for lane in neighbours.into_iter().flatten().filter(|&i| i < config.lane_count) {
            let gap = clearance(LaneId(lane));
            if gap > best && gap > 0.0 {
                best = gap;
                target = LaneId(lane);
            }
        }
    }

    let target_x = config.lane_x(target) - config.lane_margin
        + (config.lane_width - player.width()) / 2.0;
    let dx = target_x - player.x();
    if dx.abs() <= state.player.speed() / 2.0 {
        None
    } else if dx < 0.0 {
        Some(Direction::Left)
    } else {
        Some(Direction::Right)
    }
}
