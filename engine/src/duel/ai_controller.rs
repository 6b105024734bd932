use ringbuffer::{AllocRingBuffer, RingBuffer};

use crate::log;
use crate::session_rng::SessionRng;
use super::pathfinder::Pathfinder;
use super::settings::AiSettings;
use super::snake::Snake;
use super::types::{Cell, Difficulty, Direction, GridBounds};

/// What kills the controlled snake next tick: leaving the grid, touching any part of the
/// opponent, or touching its own body behind the head.
struct Hazards<'a> {
    bounds: GridBounds,
    own: &'a Snake,
    opponent: &'a Snake,
}

impl Hazards<'_> {
    fn is_deadly(&self, cell: Cell) -> bool {
        !self.bounds.contains(cell)
            || self.opponent.occupies_cell(cell, 0)
            || self.own.occupies_cell(cell, 1)
    }
}

pub struct AiController {
    settings: AiSettings,
    history: AllocRingBuffer<Cell>,
}

impl AiController {
    pub fn new(settings: AiSettings) -> Self {
        let history = AllocRingBuffer::new(settings.history_length.max(1));
        Self { settings, history }
    }

    pub fn settings(&self) -> &AiSettings {
        &self.settings
    }

    /// Oldest first.
    pub fn history(&self) -> Vec<Cell> {
        self.history.iter().copied().collect()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Remembers where the head ended up after a move; the oldest entry falls out once the
    /// history is full.
    pub fn record_position(&mut self, head: Cell) {
        let _ = self.history.enqueue(head);
    }

    pub fn is_recent(&self, cell: Cell) -> bool {
        self.settings.loop_avoidance && self.history.contains(&cell)
    }

    /// First food with the smallest Manhattan distance, in set order.
    pub fn nearest_food(from: Cell, food: &[Cell]) -> Option<Cell> {
        food.iter()
            .copied()
            .min_by_key(|candidate| from.manhattan_distance(*candidate))
    }

    /// Direction for the controlled snake's next move.
    pub fn decide(
        &self,
        own: &Snake,
        opponent: &Snake,
        food: &[Cell],
        bounds: GridBounds,
        difficulty: Difficulty,
        rng: &mut SessionRng,
    ) -> Direction {
        let hazards = Hazards {
            bounds,
            own,
            opponent,
        };
        let head = own.head();
        let current = own.direction();

        let mut proposal = match Self::nearest_food(head, food) {
            Some(target) if difficulty.level() >= self.settings.pathfinding_min_difficulty => {
                self.pathfinding_direction(&hazards, target, rng)
            }
            Some(target) => self.greedy_direction(&hazards, target, difficulty),
            None => current,
        };

        if difficulty.level() <= self.settings.random_turn_max_difficulty
            && rng.random_bool(self.settings.random_turn_chance)
        {
            proposal = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        }

        // A reversal would be dropped by the snake and it would carry straight on unchecked.
        if proposal.is_opposite(current) || hazards.is_deadly(head.step(proposal)) {
            proposal = self.fallback_direction(&hazards, rng);
        }

        proposal
    }

    /// A random non-reversing move that survives the next tick, preferring cells outside
    /// the recent history. Keeps the current direction when nothing survives.
    pub fn safe_direction(
        &self,
        own: &Snake,
        opponent: &Snake,
        bounds: GridBounds,
        rng: &mut SessionRng,
    ) -> Direction {
        let hazards = Hazards {
            bounds,
            own,
            opponent,
        };
        self.fallback_direction(&hazards, rng)
    }

    /// Penalty for heading into danger a few cells ahead. A death `i` cells out weighs
    /// `(lookahead - i + 1) * lookahead_weight`, so nearer collisions count more.
    pub fn collision_risk(
        &self,
        own: &Snake,
        opponent: &Snake,
        bounds: GridBounds,
        direction: Direction,
        difficulty: Difficulty,
    ) -> u32 {
        let hazards = Hazards {
            bounds,
            own,
            opponent,
        };
        self.risk_along(&hazards, direction, difficulty)
    }

    fn pathfinding_direction(&self, hazards: &Hazards, target: Cell, rng: &mut SessionRng) -> Direction {
        let head = hazards.own.head();
        let penalty = if self.settings.loop_avoidance {
            self.settings.history_penalty
        } else {
            0
        };

        let found = Pathfinder::new(hazards.bounds).find_direction(
            head,
            target,
            hazards.own.direction(),
            |cell| hazards.is_deadly(cell),
            |cell| if self.is_recent(cell) { penalty } else { 0 },
        );

        match found {
            Some(direction) => direction,
            None => {
                log!("AI has no path from {} to food at {}, falling back to a safe move", head, target);
                self.fallback_direction(hazards, rng)
            }
        }
    }

    fn greedy_direction(&self, hazards: &Hazards, target: Cell, difficulty: Difficulty) -> Direction {
        let head = hazards.own.head();
        let dx = target.x - head.x;
        let dy = target.y - head.y;

        let horizontal = if dx > 0 { Direction::Right } else { Direction::Left };
        let vertical = if dy > 0 { Direction::Down } else { Direction::Up };
        let candidates = if dx.abs() > dy.abs() {
            [horizontal, vertical]
        } else {
            [vertical, horizontal]
        };

        let acceptable: Vec<Direction> = candidates
            .into_iter()
            .filter(|&direction| {
                let next = head.step(direction);
                !hazards.is_deadly(next) && !self.is_recent(next)
            })
            .collect();

        let chosen = if self.settings.lookahead_scoring {
            // min_by_key keeps the first of equal keys, so the dominant axis wins ties.
            acceptable
                .iter()
                .copied()
                .min_by_key(|&direction| self.risk_along(hazards, direction, difficulty))
        } else {
            acceptable.first().copied()
        };

        chosen.unwrap_or(candidates[0])
    }

    fn fallback_direction(&self, hazards: &Hazards, rng: &mut SessionRng) -> Direction {
        let head = hazards.own.head();
        let current = hazards.own.direction();

        let mut directions = Direction::ALL;
        rng.shuffle(&mut directions);

        let (fresh, stale): (Vec<Direction>, Vec<Direction>) = directions
            .into_iter()
            .filter(|direction| !direction.is_opposite(current))
            .filter(|&direction| !hazards.is_deadly(head.step(direction)))
            .partition(|&direction| !self.is_recent(head.step(direction)));

        fresh.first().or(stale.first()).copied().unwrap_or(current)
    }

    fn risk_along(&self, hazards: &Hazards, direction: Direction, difficulty: Difficulty) -> u32 {
        let head = hazards.own.head();
        let lookahead = self.settings.max_lookahead.min(difficulty.level() as u32);

        (1..=lookahead)
            .filter(|&distance| hazards.is_deadly(head.offset(direction, distance as i32)))
            .map(|distance| (lookahead - distance + 1) * self.settings.lookahead_weight)
            .sum()
    }
}
