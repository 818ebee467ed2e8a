//! The player's vehicle
//!
//! Holds raw position and score only. Arena bounds and the starting
//! position depend on screen geometry and are applied by the game state.

use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::{PLAYER_SIZE, PLAYER_SPEED, POINTS_PER_TICK};

/// Discrete move command from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in screen space (y grows downward)
    pub fn delta(self) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    aabb: Aabb,
    /// Pixels moved per command
    speed: f32,
    /// Ticks survived this run
    scored_ticks: u64,
    points_per_tick: f64,
    alive: bool,
    name: String,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_SIZE.0, PLAYER_SIZE.1, PLAYER_SPEED, POINTS_PER_TICK)
    }
}

impl Player {
    pub fn new(width: f32, height: f32, speed: f32, points_per_tick: f64) -> Self {
        Self {
            aabb: Aabb::new(0.0, 0.0, width, height),
            speed,
            scored_ticks: 0,
            points_per_tick,
            alive: true,
            name: String::new(),
        }
    }

    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn points(&self) -> f64 {
        self.scored_ticks as f64 * self.points_per_tick
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the leaderboard name; separators of the score file become spaces
    pub fn set_name(&mut self, name: &str) {
        self.name = name
            .trim()
            .chars()
            .map(|c| if c == ',' || c.is_control() { ' ' } else { c })
            .collect();
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.aabb.set_position(x, y);
    }

    /// Translate one step; the caller enforces bounds
    pub fn move_in(&mut self, direction: Direction) {
        let (dx, dy) = direction.delta();
        self.aabb.translate(dx * self.speed, dy * self.speed);
    }

    /// Accumulate score for one survived tick
    pub fn update(&mut self) {
        if self.alive {
            self.scored_ticks += 1;
        }
    }

    /// Dead players stop scoring but keep their position
    pub fn set_dead(&mut self, dead: bool) {
        self.alive = !dead;
    }

    /// Clear score and revive; position is reset by the caller
    pub fn reset(&mut self) {
        self.scored_ticks = 0;
        self.alive = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_by_speed() {
        let mut player = Player::new(110.0, 200.0, 10.0, 0.1);
        player.set_position(500.0, 400.0);

        player.move_in(Direction::Left);
        assert_eq!(player.aabb().x(), 490.0);
        player.move_in(Direction::Right);
        player.move_in(Direction::Right);
        assert_eq!(player.aabb().x(), 510.0);
        player.move_in(Direction::Up);
        assert_eq!(player.aabb().y(), 390.0);
        player.move_in(Direction::Down);
        assert_eq!(player.aabb().y(), 400.0);
    }

    #[test]
    fn test_points_accumulate_while_alive() {
        let mut player = Player::default();
        for _ in 0..10 {
            player.update();
        }
        assert!((player.points() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_long_run_points_stay_exact() {
        let mut player = Player::default();
        for tick in 1..=100_000u64 {
            player.update();
            if tick % 10 == 0 {
                assert_eq!(player.points() as i64, (tick / 10) as i64);
            }
        }
        assert_eq!(player.points(), 10_000.0);
    }

    #[test]
    fn test_dead_player_is_frozen() {
        let mut player = Player::default();
        player.set_position(100.0, 100.0);
        player.update();
        player.set_dead(true);
        let frozen = player.points();
        for _ in 0..10 {
            player.update();
        }
        assert!(!player.is_alive());
        assert_eq!(player.points(), frozen);
        assert_eq!(player.aabb().x(), 100.0);
        assert_eq!(player.aabb().y(), 100.0);
    }

    #[test]
    fn test_reset_revives() {
        let mut player = Player::default();
        player.set_position(100.0, 100.0);
        player.update();
        player.set_dead(true);
        player.reset();
        assert!(player.is_alive());
        assert_eq!(player.points(), 0.0);
        // Position untouched
        assert_eq!(player.aabb().x(), 100.0);
    }

    #[test]
    fn test_set_name_strips_separators() {
        let mut player = Player::default();
        player.set_name("  ann,bob\n ");
        assert_eq!(player.name(), "ann bob");
    }
}
