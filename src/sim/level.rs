//! Static level description
//!
//! A level is immutable once built; every run deep-copies what it needs
//! into a fresh `SimulationState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// What a surface does when the actor lands on it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// Inert ground
    Platform,
    /// Launches a falling actor upward with the given speed
    Spring { strength: f32 },
}

/// Static collidable geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub rect: Rect,
    pub kind: SurfaceKind,
}

impl Surface {
    pub const fn platform(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            kind: SurfaceKind::Platform,
        }
    }

    pub const fn spring(x: f32, y: f32, width: f32, height: f32, strength: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            kind: SurfaceKind::Spring { strength },
        }
    }

    pub fn is_spring(&self) -> bool {
        matches!(self.kind, SurfaceKind::Spring { .. })
    }
}

/// Where a coin sits in the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoinSpawn {
    pub pos: Vec2,
    pub radius: f32,
}

impl CoinSpawn {
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            radius: COIN_RADIUS,
        }
    }
}

/// Default coin radius
pub const COIN_RADIUS: f32 = 10.0;

/// A complete level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub width: f32,
    pub height: f32,
    /// Actor spawn point (top-left of hitbox)
    pub start: Vec2,
    /// Surfaces in resolution order
    pub surfaces: Vec<Surface>,
    pub coins: Vec<CoinSpawn>,
    pub goal: Rect,
    /// Seconds on the clock at run start
    pub time_budget: f32,
}

impl Level {
    /// The shipped level
    pub fn standard() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            start: Vec2::new(60.0, 800.0),
            surfaces: vec![
                // Ground runs, broken by pits
                Surface::platform(0.0, 868.0, 640.0, 32.0),
                Surface::spring(700.0, 852.0, 60.0, 16.0, 1150.0),
                Surface::platform(820.0, 868.0, 480.0, 32.0),
                Surface::platform(1400.0, 868.0, 420.0, 32.0),
                Surface::spring(1860.0, 852.0, 60.0, 16.0, 1300.0),
                Surface::platform(2180.0, 868.0, 220.0, 32.0),
                // Ledges
                Surface::platform(880.0, 740.0, 160.0, 20.0),
                Surface::platform(1100.0, 620.0, 160.0, 20.0),
                Surface::platform(1360.0, 500.0, 200.0, 20.0),
                Surface::platform(1960.0, 600.0, 180.0, 20.0),
                // Wall on the third ground run
                Surface::platform(1620.0, 760.0, 40.0, 108.0),
                // Shelf over the first spring
                Surface::platform(640.0, 460.0, 180.0, 20.0),
            ],
            coins: vec![
                CoinSpawn::new(300.0, 830.0),
                CoinSpawn::new(730.0, 560.0),
                CoinSpawn::new(730.0, 510.0),
                CoinSpawn::new(960.0, 700.0),
                CoinSpawn::new(1180.0, 580.0),
                CoinSpawn::new(1460.0, 460.0),
                CoinSpawn::new(1890.0, 520.0),
                CoinSpawn::new(2050.0, 560.0),
            ],
            goal: Rect::new(2320.0, 748.0, 56.0, 120.0),
            time_budget: TIME_BUDGET,
        }
    }

    pub fn total_coins(&self) -> usize {
        self.coins.len()
    }

    /// Bounds as a rectangle anchored at the origin
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::overlaps;

    fn start_hitbox(level: &Level) -> Rect {
        Rect::new(level.start.x, level.start.y, ACTOR_WIDTH, ACTOR_HEIGHT)
    }

    #[test]
    fn test_standard_level_start_is_clear() {
        let level = Level::standard();
        let hitbox = start_hitbox(&level);
        for surface in &level.surfaces {
            assert!(!overlaps(&hitbox, &surface.rect), "spawn inside {:?}", surface);
        }
        assert!(!overlaps(&hitbox, &level.goal));
    }

    #[test]
    fn test_standard_level_geometry_in_bounds() {
        let level = Level::standard();
        for surface in &level.surfaces {
            assert!(surface.rect.x >= 0.0);
            assert!(surface.rect.right() <= level.width);
            assert!(surface.rect.bottom() <= level.height);
        }
        assert!(level.goal.right() <= level.width);
        for coin in &level.coins {
            assert!(coin.pos.x > 0.0 && coin.pos.x < level.width);
        }
    }

    #[test]
    fn test_first_spring_matches_reference_pad() {
        let level = Level::standard();
        let pad = level
            .surfaces
            .iter()
            .find(|s| s.is_spring())
            .copied()
            .unwrap();
        assert_eq!(pad.rect, Rect::new(700.0, 852.0, 60.0, 16.0));
        assert_eq!(pad.kind, SurfaceKind::Spring { strength: 1150.0 });
    }
}
