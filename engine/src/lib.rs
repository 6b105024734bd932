pub mod config;
pub mod duel;
pub mod logger;
mod session_rng;

pub use duel::{
    AiController, AiSettings, Cell, DeathCause, Difficulty, Direction, EngineSettings, GridBounds,
    GridModel, Outcome, Pathfinder, RenderState, SimulationEngine, Snake, Status,
};
pub use session_rng::SessionRng;
