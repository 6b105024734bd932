use std::time::Duration;

use snake_duel_engine::{RenderState, SimulationEngine, Status, log};
use tokio::sync::{mpsc, watch};
use tokio::time::{MissedTickBehavior, interval, timeout};

use crate::autopilot::{Autopilot, run_autopilot};
use crate::config::Config;

const LOCKSTEP_WAIT: Duration = Duration::from_secs(1);

/// Plays one round to the end (or to `max_ticks`) and returns the last snapshot.
pub async fn run_session(mut engine: SimulationEngine, config: &Config, pilot_seed: u64) -> RenderState {
    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(engine.render_state());
    let pilot = tokio::spawn(run_autopilot(Autopilot::new(pilot_seed), state_rx, input_tx));

    engine.start();
    state_tx.send_replace(engine.render_state());

    // Realtime rounds tick on a timer and take whatever input has arrived. Fast rounds run in
    // lockstep: each tick waits for the autopilot's answer to the previous state.
    let mut tick_timer = config.realtime.then(|| {
        let mut timer = interval(engine.settings().difficulty.tick_interval());
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    });

    log!(
        "Session started: {}x{} grid, difficulty {}, {}",
        engine.bounds().width,
        engine.bounds().height,
        engine.settings().difficulty,
        match tick_timer {
            Some(ref timer) => format!("tick every {} ms", timer.period().as_millis()),
            None => "lockstep".to_string(),
        }
    );

    loop {
        match tick_timer {
            Some(ref mut timer) => {
                timer.tick().await;
                while let Ok(direction) = input_rx.try_recv() {
                    engine.set_player_pending_direction(direction);
                }
            }
            None => match timeout(LOCKSTEP_WAIT, input_rx.recv()).await {
                Ok(Some(direction)) => engine.set_player_pending_direction(direction),
                Ok(None) => {}
                Err(_) => log!("No autopilot input for tick {}", engine.tick_count() + 1),
            },
        }

        engine.tick();
        let state = engine.render_state();

        if state.tick % config.log_every == 0 {
            log!(
                "Tick {}: player {} (len {}), ai {} (len {}), food {}",
                state.tick,
                state.player_score,
                state.player.len(),
                state.ai_score,
                state.ai.len(),
                state.food.len()
            );
        }

        let finished = matches!(state.status, Status::Over(_))
            || (config.max_ticks > 0 && state.tick >= config.max_ticks);
        state_tx.send_replace(state);
        if finished {
            break;
        }
    }

    drop(state_tx);
    if let Err(e) = pilot.await {
        log!("Autopilot task failed: {}", e);
    }

    let final_state = engine.render_state();
    match final_state.status {
        Status::Over(outcome) => log!(
            "Round finished after {} ticks: {:?}, score {}:{}",
            final_state.tick,
            outcome,
            final_state.player_score,
            final_state.ai_score
        ),
        _ => log!(
            "Tick limit {} reached, score {}:{}",
            config.max_ticks,
            final_state.player_score,
            final_state.ai_score
        ),
    }
    final_state
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_duel_engine::EngineSettings;

    fn fast_config(max_ticks: u64) -> Config {
        Config {
            engine: EngineSettings {
                seed: Some(21),
                ..EngineSettings::default()
            },
            max_ticks,
            log_every: 1000,
            realtime: false,
        }
    }

    #[tokio::test]
    async fn test_session_stops_at_tick_limit_or_game_over() {
        let config = fast_config(40);
        let engine = SimulationEngine::new(config.engine.clone()).unwrap();
        let state = run_session(engine, &config, 5).await;

        assert!(state.tick <= 40);
        assert!(state.tick == 40 || matches!(state.status, Status::Over(_)));
        assert_ne!(state.status, Status::Idle);
    }

    #[tokio::test]
    async fn test_fast_session_replays_identically() {
        let config = fast_config(60);
        let first = run_session(SimulationEngine::new(config.engine.clone()).unwrap(), &config, 7).await;
        let second = run_session(SimulationEngine::new(config.engine.clone()).unwrap(), &config, 7).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_session_without_limit_ends_in_game_over() {
        let mut config = fast_config(0);
        config.engine.grid_width = 3;
        config.engine.grid_height = 1;
        let engine = SimulationEngine::new(config.engine.clone()).unwrap();

        let state = tokio::time::timeout(Duration::from_secs(10), run_session(engine, &config, 9))
            .await
            .expect("a 3x1 corridor ends on the first tick");
        assert_eq!(state.tick, 1);
        assert!(matches!(state.status, Status::Over(_)));
    }
}
