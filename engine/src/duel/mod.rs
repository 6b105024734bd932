mod ai_controller;
mod engine;
mod grid;
mod pathfinder;
mod settings;
mod snake;
mod types;

pub use ai_controller::AiController;
pub use engine::{RenderState, SimulationEngine};
pub use grid::GridModel;
pub use pathfinder::Pathfinder;
pub use settings::{AiSettings, EngineSettings};
pub use snake::Snake;
pub use types::{Cell, DeathCause, Difficulty, Direction, GridBounds, Outcome, Status};
