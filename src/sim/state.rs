//! Game state and core simulation types
//!
//! Everything that changes during a run lives here. A state is always built
//! from a `Level` and thrown away on reset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::{CoinSpawn, Level, Surface};
use super::rect::Rect;
use crate::consts::*;

/// Outcome of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    InProgress,
    /// Reached the goal
    Won,
    /// Ran out of time or fell out of the world
    Lost,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        self != Status::InProgress
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::InProgress => "playing",
            Status::Won => "won",
            Status::Lost => "lost",
        }
    }
}

/// Horizontal facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The player-controlled actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left of the hitbox
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    pub on_ground: bool,
}

impl Actor {
    pub fn new(start: Vec2) -> Self {
        Self {
            pos: start,
            size: Vec2::new(ACTOR_WIDTH, ACTOR_HEIGHT),
            vel: Vec2::ZERO,
            facing: Facing::Right,
            on_ground: false,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub radius: f32,
    pub collected: bool,
}

impl From<&CoinSpawn> for Coin {
    fn from(spawn: &CoinSpawn) -> Self {
        Self {
            pos: spawn.pos,
            radius: spawn.radius,
            collected: false,
        }
    }
}

/// Viewport top-left in world space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
}

/// Complete run state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub actor: Actor,
    /// Surfaces in level order (resolution order matters)
    pub surfaces: Vec<Surface>,
    pub coins: Vec<Coin>,
    pub goal: Rect,
    pub camera: Camera,
    pub world_width: f32,
    pub world_height: f32,
    /// Budget the run started with
    pub time_budget: f32,
    pub time_remaining: f32,
    pub coins_collected: u32,
    pub status: Status,
}

impl SimulationState {
    /// Build a fresh run from a level
    pub fn new(level: &Level) -> Self {
        Self {
            actor: Actor::new(level.start),
            surfaces: level.surfaces.clone(),
            coins: level.coins.iter().map(Coin::from).collect(),
            goal: level.goal,
            camera: Camera::default(),
            world_width: level.width,
            world_height: level.height,
            time_budget: level.time_budget,
            time_remaining: level.time_budget,
            coins_collected: 0,
            status: Status::InProgress,
        }
    }

    pub fn total_coins(&self) -> usize {
        self.coins.len()
    }

    /// Seconds spent so far this run
    pub fn elapsed(&self) -> f32 {
        self.time_budget - self.time_remaining
    }
}
