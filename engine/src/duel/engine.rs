use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::log;
use crate::logger;
use crate::session_rng::SessionRng;
use super::ai_controller::AiController;
use super::grid::GridModel;
use super::settings::EngineSettings;
use super::snake::Snake;
use super::types::{Cell, DeathCause, Difficulty, Direction, GridBounds, Outcome, Status};

const FOOD_PLACEMENT_ATTEMPTS: usize = 100;

/// Snapshot handed to the presentation layer after each tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    pub bounds: GridBounds,
    pub player: Vec<Cell>,
    pub player_direction: Direction,
    pub ai: Vec<Cell>,
    pub ai_direction: Direction,
    pub food: Vec<Cell>,
    pub player_score: u32,
    pub ai_score: u32,
    pub status: Status,
    pub tick: u64,
    pub difficulty: Difficulty,
    pub player_death: Option<DeathCause>,
    pub ai_death: Option<DeathCause>,
}

/// Owns the whole board: both snakes, the food set, scores and the AI's memory.
/// Everything changes only inside `tick`, `reset` and `resize`.
pub struct SimulationEngine {
    settings: EngineSettings,
    player: Snake,
    ai: Snake,
    ai_controller: AiController,
    food: Vec<Cell>,
    player_score: u32,
    ai_score: u32,
    status: Status,
    tick: u64,
    player_death: Option<DeathCause>,
    ai_death: Option<DeathCause>,
    rng: SessionRng,
}

impl SimulationEngine {
    pub fn new(settings: EngineSettings) -> Result<Self, String> {
        settings.validate()?;

        let rng = settings.seed.map_or_else(SessionRng::from_random, SessionRng::new);
        let (player, ai) = Self::starting_snakes(settings.bounds());

        let mut engine = Self {
            ai_controller: AiController::new(settings.ai.clone()),
            settings,
            player,
            ai,
            food: Vec::new(),
            player_score: 0,
            ai_score: 0,
            status: Status::Idle,
            tick: 0,
            player_death: None,
            ai_death: None,
            rng,
        };
        engine.replenish_food();
        Ok(engine)
    }

    /// Back to `Idle` with fresh snakes, zero scores and an empty AI memory. Without a seed in
    /// `settings` the current seed is replayed, so repeated resets give identical boards.
    pub fn reset(&mut self, settings: EngineSettings) -> Result<(), String> {
        settings.validate()?;

        match settings.seed {
            Some(seed) => self.rng = SessionRng::new(seed),
            None => self.rng.reseed(),
        }

        let (player, ai) = Self::starting_snakes(settings.bounds());
        self.player = player;
        self.ai = ai;
        self.ai_controller = AiController::new(settings.ai.clone());
        self.settings = settings;
        self.food.clear();
        self.player_score = 0;
        self.ai_score = 0;
        self.status = Status::Idle;
        self.tick = 0;
        logger::set_tick(0);
        self.player_death = None;
        self.ai_death = None;
        self.replenish_food();

        log!(
            "Game reset: {}x{} grid, difficulty {}, seed {}",
            self.settings.grid_width,
            self.settings.grid_height,
            self.settings.difficulty,
            self.rng.seed()
        );
        Ok(())
    }

    /// `reset` with the settings already in use.
    pub fn restart(&mut self) -> Result<(), String> {
        self.reset(self.settings.clone())
    }

    pub fn start(&mut self) -> bool {
        if self.status != Status::Idle {
            return false;
        }
        self.status = Status::Running;
        log!("Game started at difficulty {}", self.settings.difficulty);
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.status != Status::Running {
            return false;
        }
        self.status = Status::Paused;
        log!("Game paused at tick {}", self.tick);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != Status::Paused {
            return false;
        }
        self.status = Status::Running;
        log!("Game resumed at tick {}", self.tick);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            Status::Running => self.pause(),
            Status::Paused => self.resume(),
            _ => false,
        }
    }

    /// Queued until the next tick. Ignored unless a round is live.
    pub fn set_player_pending_direction(&mut self, direction: Direction) {
        if matches!(self.status, Status::Running | Status::Paused) {
            self.player.set_pending_direction(direction);
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
    }

    /// Pulls every segment inside the new bounds, drops food that fell outside and tops the
    /// food set back up.
    pub fn resize(&mut self, bounds: GridBounds) -> Result<(), String> {
        let mut settings = self.settings.clone();
        settings.grid_width = bounds.width;
        settings.grid_height = bounds.height;
        settings.validate()?;
        self.settings = settings;

        self.player.clamp_into(bounds);
        self.ai.clamp_into(bounds);
        self.food.retain(|&cell| bounds.contains(cell));
        self.replenish_food();

        log!("Grid resized to {}x{}", bounds.width, bounds.height);
        Ok(())
    }

    /// Advances one step. Returns `false` without touching anything unless running.
    pub fn tick(&mut self) -> bool {
        if self.status != Status::Running {
            return false;
        }
        self.tick += 1;
        logger::set_tick(self.tick);
        let previous_heads = (self.player.head(), self.ai.head());

        self.player.advance();

        let bounds = self.bounds();
        let decision = self.ai_controller.decide(
            &self.ai,
            &self.player,
            &self.food,
            bounds,
            self.settings.difficulty,
            &mut self.rng,
        );
        self.ai.set_pending_direction(decision);
        self.ai.advance();
        self.ai_controller.record_position(self.ai.head());

        if let Some(outcome) = self.check_game_over(previous_heads) {
            self.status = Status::Over(outcome);
            log!(
                "Game over at tick {}: {:?} (player {:?}, ai {:?}), score {}:{}",
                self.tick,
                outcome,
                self.player_death,
                self.ai_death,
                self.player_score,
                self.ai_score
            );
            return true;
        }

        self.resolve_food();
        true
    }

    pub fn render_state(&self) -> RenderState {
        RenderState {
            bounds: self.bounds(),
            player: self.player.body().collect(),
            player_direction: self.player.direction(),
            ai: self.ai.body().collect(),
            ai_direction: self.ai.direction(),
            food: self.food.clone(),
            player_score: self.player_score,
            ai_score: self.ai_score,
            status: self.status,
            tick: self.tick,
            difficulty: self.settings.difficulty,
            player_death: self.player_death,
            ai_death: self.ai_death,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            Status::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn bounds(&self) -> GridBounds {
        self.settings.bounds()
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn player(&self) -> &Snake {
        &self.player
    }

    pub fn ai(&self) -> &Snake {
        &self.ai
    }

    pub fn ai_controller(&self) -> &AiController {
        &self.ai_controller
    }

    pub fn food(&self) -> &[Cell] {
        &self.food
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.player_score, self.ai_score)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    fn starting_snakes(bounds: GridBounds) -> (Snake, Snake) {
        let width = bounds.width as i32;
        let y = bounds.height as i32 / 2;
        let (player_x, ai_x) = if width >= 8 { (3, width - 4) } else { (0, width - 1) };

        (
            Snake::new(bounds.clamp(Cell::new(player_x, y)), Direction::Right),
            Snake::new(bounds.clamp(Cell::new(ai_x, y)), Direction::Right),
        )
    }

    /// All checks run for both sides and are OR'd, so their order does not matter.
    /// `previous_heads` are the (player, ai) heads before this tick's moves; two heads that
    /// trade cells meet head-on even when neither snake has a body to hit.
    fn check_game_over(&mut self, previous_heads: (Cell, Cell)) -> Option<Outcome> {
        let bounds = self.bounds();
        let mut player_death = Self::death_cause(&self.player, &self.ai, bounds);
        let mut ai_death = Self::death_cause(&self.ai, &self.player, bounds);

        let (player_before, ai_before) = previous_heads;
        let swapped = self.player.head() == ai_before && self.ai.head() == player_before;
        if self.player.head() == self.ai.head() || swapped {
            player_death = player_death.or(Some(DeathCause::HeadOnCollision));
            ai_death = ai_death.or(Some(DeathCause::HeadOnCollision));
        }

        self.player_death = player_death;
        self.ai_death = ai_death;
        Outcome::from_deaths(player_death.is_some(), ai_death.is_some())
    }

    fn death_cause(snake: &Snake, other: &Snake, bounds: GridBounds) -> Option<DeathCause> {
        let head = snake.head();
        if !bounds.contains(head) {
            Some(DeathCause::WallCollision)
        } else if snake.self_collision() {
            Some(DeathCause::SelfCollision)
        } else if other.occupies_cell(head, 1) {
            Some(DeathCause::BodyCollision)
        } else {
            None
        }
    }

    fn resolve_food(&mut self) {
        if let Some(index) = self.food.iter().position(|&cell| cell == self.player.head()) {
            let eaten = self.food.remove(index);
            self.player.grow();
            self.player_score += 1;
            log!("Player ate food at {}. Score: {}", eaten, self.player_score);
        }

        if let Some(index) = self.food.iter().position(|&cell| cell == self.ai.head()) {
            let eaten = self.food.remove(index);
            self.ai.grow();
            self.ai_score += 1;
            log!("AI ate food at {}. Score: {}", eaten, self.ai_score);
        }

        self.replenish_food();
    }

    /// Each missing item gets a bounded number of random probes, and no more items are tried
    /// than there are free cells. On a crowded board the set stays short until space frees up.
    fn replenish_food(&mut self) {
        let bounds = self.bounds();
        let free = GridModel::new(bounds, [&self.player, &self.ai], &self.food).free_cell_count();
        let missing = self.settings.food_count.saturating_sub(self.food.len());
        if missing > 0 && free == 0 {
            log!("Board is full, {} food item(s) not placed", missing);
            return;
        }

        for _ in 0..missing.min(free) {
            match self.find_free_cell(bounds) {
                Some(cell) => self.food.push(cell),
                None => {
                    log!(
                        "No free cell found for food after {} attempts ({} of {} placed)",
                        FOOD_PLACEMENT_ATTEMPTS,
                        self.food.len(),
                        self.settings.food_count
                    );
                }
            }
        }
    }

    fn find_free_cell(&mut self, bounds: GridBounds) -> Option<Cell> {
        for _ in 0..FOOD_PLACEMENT_ATTEMPTS {
            let cell = Cell::new(
                self.rng.random_range(0..bounds.width as i32),
                self.rng.random_range(0..bounds.height as i32),
            );
            let grid = GridModel::new(bounds, [&self.player, &self.ai], &self.food);
            if !grid.is_occupied(cell) {
                return Some(cell);
            }
        }
        None
    }
}
