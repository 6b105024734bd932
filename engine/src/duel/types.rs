use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Cell {
        self.offset(direction, 1)
    }

    pub fn offset(self, direction: Direction, distance: i32) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx * distance, self.y + dy * distance)
    }

    pub fn manhattan_distance(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Enumeration order used wherever directions are scanned: up, down, left, right.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Screen coordinates: y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub width: u32,
    pub height: u32,
}

impl GridBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    /// Nearest in-bounds cell. Bounds must be non-empty.
    pub fn clamp(&self, cell: Cell) -> Cell {
        let max_x = self.width.saturating_sub(1) as i32;
        let max_y = self.height.saturating_sub(1) as i32;
        Cell::new(cell.x.clamp(0, max_x), cell.y.clamp(0, max_y))
    }
}

/// AI strength and game speed, 1 (very easy) to 5 (very hard).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Result<Self, String> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(format!(
                "Difficulty must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                level
            ))
        }
    }

    pub fn level(self) -> u8 {
        self.0
    }

    pub fn tick_interval(self) -> Duration {
        let millis = 180u64.saturating_sub(self.0 as u64 * 20).max(80);
        Duration::from_millis(millis)
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Very Easy",
            2 => "Easy",
            3 => "Medium",
            4 => "Hard",
            _ => "Very Hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Difficulty::new(level)
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    WallCollision,
    SelfCollision,
    BodyCollision,
    HeadOnCollision,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerWins,
    AiWins,
    Tie,
}

impl Outcome {
    pub fn from_deaths(player_dead: bool, ai_dead: bool) -> Option<Outcome> {
        match (player_dead, ai_dead) {
            (true, true) => Some(Outcome::Tie),
            (true, false) => Some(Outcome::AiWins),
            (false, true) => Some(Outcome::PlayerWins),
            (false, false) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Idle,
    Running,
    Paused,
    Over(Outcome),
}
