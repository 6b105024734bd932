use snake_duel_engine::{
    AiController, AiSettings, Difficulty, Direction, RenderState, SessionRng, Snake, Status, log,
};
use tokio::sync::{mpsc, watch};

/// Stand-in for a human at the keyboard: steers the player snake with a greedy, noise-free
/// controller and queues its choices like key presses.
pub struct Autopilot {
    controller: AiController,
    difficulty: Difficulty,
    rng: SessionRng,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        let settings = AiSettings {
            random_turn_chance: 0.0,
            ..AiSettings::default()
        };
        Self {
            controller: AiController::new(settings),
            difficulty: Difficulty::new(2).unwrap_or_default(),
            rng: SessionRng::new(seed),
        }
    }

    pub fn steer(&mut self, state: &RenderState) -> Option<Direction> {
        let own = Snake::from_segments(state.player.iter().copied(), state.player_direction).ok()?;
        let opponent = Snake::from_segments(state.ai.iter().copied(), state.ai_direction).ok()?;

        self.controller.record_position(own.head());
        Some(self.controller.decide(
            &own,
            &opponent,
            &state.food,
            state.bounds,
            self.difficulty,
            &mut self.rng,
        ))
    }
}

pub async fn run_autopilot(
    mut autopilot: Autopilot,
    mut state_rx: watch::Receiver<RenderState>,
    input_tx: mpsc::UnboundedSender<Direction>,
) {
    while state_rx.changed().await.is_ok() {
        let state = state_rx.borrow_and_update().clone();
        if matches!(state.status, Status::Over(_)) {
            break;
        }

        // One answer per state, so a lockstep session never waits on a skipped reply.
        let direction = autopilot.steer(&state).unwrap_or(state.player_direction);
        if input_tx.send(direction).is_err() {
            log!("Input queue closed, autopilot stopping");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_duel_engine::{EngineSettings, SimulationEngine};

    #[test]
    fn test_steer_towards_food() {
        let settings = EngineSettings {
            seed: Some(3),
            ..EngineSettings::default()
        };
        let engine = SimulationEngine::new(settings).unwrap();
        let mut state = engine.render_state();
        state.food = vec![snake_duel_engine::Cell::new(3, 4)];

        let mut autopilot = Autopilot::new(1);
        assert_eq!(autopilot.steer(&state), Some(Direction::Up));
    }

    #[test]
    fn test_steer_without_body_gives_nothing() {
        let engine = SimulationEngine::new(EngineSettings::default()).unwrap();
        let mut state = engine.render_state();
        state.player.clear();

        let mut autopilot = Autopilot::new(1);
        assert_eq!(autopilot.steer(&state), None);
    }
}
