//! # Factory Pattern
//!
//! Defines an interface for creating an object but lets an implementation
//! decide which concrete type to build. The business logic for picking an
//! obstacle lives in one place instead of being repeated by every caller.

use std::fmt;

// ============================================================================
// Products
// ============================================================================

pub trait Obstacle {
    fn name(&self) -> &'static str;
    fn size(&self) -> u32;
    fn danger(&self) -> u32;
}

impl fmt::Debug for dyn Obstacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.name())
            .field("size", &self.size())
            .field("danger", &self.danger())
            .finish()
    }
}

pub struct Mountain;
impl Obstacle for Mountain {
    fn name(&self) -> &'static str {
        "Mountain"
    }

    fn size(&self) -> u32 {
        10
    }

    fn danger(&self) -> u32 {
        10
    }
}

pub struct Asteroid;
impl Obstacle for Asteroid {
    fn name(&self) -> &'static str {
        "Asteroid"
    }

    fn size(&self) -> u32 {
        100
    }

    fn danger(&self) -> u32 {
        100
    }
}

pub struct Planet;
impl Obstacle for Planet {
    fn name(&self) -> &'static str {
        "Planet"
    }

    fn size(&self) -> u32 {
        1000
    }

    fn danger(&self) -> u32 {
        1000
    }
}

// ============================================================================
// Factory
// ============================================================================

pub trait ObstacleFactory {
    fn create_obstacle(&self, level: u32) -> Box<dyn Obstacle>;
}

/// Harder levels get bigger obstacles.
pub struct LevelObstacleFactory;

impl ObstacleFactory for LevelObstacleFactory {
    fn create_obstacle(&self, level: u32) -> Box<dyn Obstacle> {
        match level {
            0..=9 => Box::new(Mountain),
            10..=99 => Box::new(Asteroid),
            _ => Box::new(Planet),
        }
    }
}

pub const DEFAULT_OBSTACLE_COUNT: usize = 10;

/// The game never names a concrete obstacle type; instantiation is deferred
/// to the factory.
pub struct Game {
    level: u32,
    obstacles: Vec<Box<dyn Obstacle>>,
}

impl Game {
    pub fn new(level: u32, factory: &dyn ObstacleFactory, count: usize) -> Self {
        let obstacles = (0..count).map(|_| factory.create_obstacle(level)).collect();
        Self { level, obstacles }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn obstacles(&self) -> &[Box<dyn Obstacle>] {
        &self.obstacles
    }
}

/// Runs the demo and returns its console lines.
pub fn run(level: u32, count: usize) -> Vec<String> {
    let game = Game::new(level, &LevelObstacleFactory, count);
    let mut lines = vec![format!(
        "Level {} with {} obstacles:",
        game.level(),
        game.obstacles().len()
    )];
    lines.extend(game.obstacles().iter().map(|o| format!("  {:?}", o)));
    lines
}
