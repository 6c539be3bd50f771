//! Crater Duel entry point
//!
//! Runs a headless match between two autopilots at a fixed step rate and
//! prints a JSON summary. Usage: `crater-duel [settings.json]`

use crater_duel::MatchSettings;
use crater_duel::consts::*;
use crater_duel::sim::{Autopilot, Clock, GameEvent, GameState, ManualClock, TickInput, tick};

/// Give up after ten minutes of game time
const MAX_STEPS: u64 = STEPS_PER_SECOND as u64 * 600;

fn main() {
    env_logger::init();
    log::info!("Crater Duel (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => MatchSettings::load_or_default(path),
        None => MatchSettings::default(),
    };

    let clock = ManualClock::new(0);
    let mut state = match GameState::new(&settings, 0) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Cannot start match: {err}");
            std::process::exit(1);
        }
    };

    let mut bots = [
        Autopilot::new(0, settings.seed.wrapping_add(1)),
        Autopilot::new(1, settings.seed.wrapping_add(2)),
    ];
    let mut explosions = 0u32;
    let mut skill_shots = 0u32;

    while !state.phase.is_game_over() && state.time_ticks < MAX_STEPS {
        clock.advance(STEP_MS);
        let input = TickInput {
            players: [bots[0].input(&state), bots[1].input(&state)],
        };
        tick(&mut state, &input, &clock);

        for event in &state.events {
            match event {
                GameEvent::Explosion(_) => explosions += 1,
                GameEvent::ShotResolved { bonus: true, .. } => skill_shots += 1,
                _ => {}
            }
        }
    }

    let snapshot = state.snapshot(clock.now_ms());
    let summary = serde_json::json!({
        "seed": state.seed,
        "layout": state.layout.as_str(),
        "characters": [state.players[0].kind, state.players[1].kind],
        "ticks": state.time_ticks,
        "turns": state.turn_number,
        "explosions": explosions,
        "skill_shots": skill_shots,
        "phase": snapshot.phase,
        "winner": snapshot.winner.map(|w| w + 1),
        "solid_cells": state.terrain.solid_count(),
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to serialize summary: {err}"),
    }
}
