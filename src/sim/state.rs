//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::{Direction, Player};
use super::traffic::TrafficManager;
use crate::error::ConfigError;
use crate::highscores::ScoreTable;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused (in-game menu)
    Paused,
    /// Run ended
    GameOver,
    /// Run ended with a leaderboard score, waiting for a name
    NewRecord,
}

/// Things the host should react to (sound, UI)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player hit traffic
    Crashed { points: i64 },
    /// New run started
    Restarted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub traffic: TrafficManager,
    pub tuning: Tuning,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given seed
    ///
    /// Traffic starts parked and is placed on the first tick.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        let traffic = TrafficManager::new(tuning.traffic.clone(), &tuning.fleet, seed)?;
        let player = Player::new(
            tuning.player_size.x,
            tuning.player_size.y,
            tuning.player_speed,
            tuning.points_per_tick,
        );

        let mut state = Self {
            seed,
            phase: GamePhase::Playing,
            player,
            traffic,
            tuning,
            time_ticks: 0,
            events: Vec::new(),
        };
        let start = state.start_position();
        state.player.set_position(start.x, start.y);

        Ok(state)
    }

    /// Player spawn point: centred on the road, halfway down the screen
    pub fn start_position(&self) -> Vec2 {
        let config = self.traffic.config();
        let (left, right) = config.road_bounds();
        Vec2::new(
            (left + right) / 2.0 - self.player.aabb().width() / 2.0,
            config.screen_height / 2.0,
        )
    }

    /// Score as stored on the leaderboard
    pub fn score(&self) -> i64 {
        self.player.points() as i64
    }

    /// Move the player one step, kept on the road and on screen
    pub fn apply_move(&mut self, direction: Direction) {
        self.player.move_in(direction);

        let config = self.traffic.config();
        let (left, right) = config.road_bounds();
        let aabb = self.player.aabb();
        let max_x = (right - aabb.width()).max(left);
        let max_y = (config.screen_height - aabb.height()).max(0.0);
        let x = aabb.x().clamp(left, max_x);
        let y = aabb.y().clamp(0.0, max_y);
        self.player.set_position(x, y);
    }

    /// Start a fresh run with fresh traffic
    pub fn restart(&mut self) {
        self.player.reset();
        let start = self.start_position();
        self.player.set_position(start.x, start.y);
        self.traffic.reset();
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Restarted);
        log::info!("Game restarted");
    }

    /// After a crash, ask for a name if the score makes the leaderboard
    pub fn enter_record(&mut self, table: &ScoreTable) -> bool {
        if self.phase != GamePhase::GameOver || !table.qualifies(self.score()) {
            return false;
        }
        self.phase = GamePhase::NewRecord;
        true
    }

    /// Store the run under `name`; returns the rank achieved
    pub fn submit_record(&mut self, name: &str, table: &mut ScoreTable) -> Option<usize> {
        if self.phase != GamePhase::NewRecord {
            return None;
        }
        self.player.set_name(name);
        let rank = table.add_score(self.player.name(), self.score());
        self.phase = GamePhase::GameOver;
        if let Some(rank) = rank {
            log::info!("{} placed #{} with {} points", self.player.name(), rank, self.score());
        }
        rank
    }

    /// Take pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
