//! Autopilot that plays a turn like a person at the keyboard
//!
//! Used for demo/headless runs. It only ever produces the same inputs a human
//! could: hold left/right during MOVE and tap fire to stop each gauge.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{GamePhase, GameState};
use super::tick::PlayerInput;
use crate::consts::*;

/// Chance the bot deliberately lets the power gauge run out
const HESITATE_CHANCE: f64 = 0.25;

#[derive(Debug, Clone)]
pub struct Autopilot {
    pub player: usize,
    rng: Pcg32,
    /// Turn number the current plan was made for
    planned_turn: u32,
    walk_steps: u32,
    walk_right: bool,
    /// Desired launch angle (degrees, already mirrored toward the opponent)
    target_angle: f32,
    hesitate: bool,
}

impl Autopilot {
    pub fn new(player: usize, seed: u64) -> Self {
        Self {
            player,
            rng: Pcg32::seed_from_u64(seed),
            planned_turn: 0,
            walk_steps: 0,
            walk_right: false,
            target_angle: DEFAULT_AIM_ANGLE,
            hesitate: false,
        }
    }

    fn plan(&mut self, state: &GameState) {
        let me = &state.players[self.player];
        let opponent = &state.players[1 - self.player];
        let opponent_right = opponent.center().x > me.center().x;

        self.planned_turn = state.turn_number;
        self.walk_steps = self.rng.random_range(0..12);
        self.walk_right = self.rng.random_bool(0.5);
        let lob = self.rng.random_range(35.0..70.0);
        self.target_angle = if opponent_right { lob } else { MAX_AIM_ANGLE - lob };
        self.hesitate = self.rng.random_bool(HESITATE_CHANCE);
    }

    /// Controls for this bot's player on the coming tick
    pub fn input(&mut self, state: &GameState) -> PlayerInput {
        if state.turn != self.player || state.phase.is_game_over() {
            return PlayerInput::default();
        }
        if self.planned_turn != state.turn_number {
            self.plan(state);
        }

        let me = &state.players[self.player];
        match state.phase {
            GamePhase::Move { .. } if self.walk_steps > 0 => {
                self.walk_steps -= 1;
                PlayerInput {
                    left: !self.walk_right,
                    right: self.walk_right,
                    fire: false,
                }
            }
            GamePhase::AimAngle { .. } => {
                // Gauge angle is mirrored by facing when fired
                let wanted = if me.facing_right {
                    self.target_angle
                } else {
                    MAX_AIM_ANGLE - self.target_angle
                };
                PlayerInput {
                    fire: (me.angle - wanted).abs() <= state.settings.angle_gauge_speed,
                    ..Default::default()
                }
            }
            GamePhase::AimPower { gauge, target, .. } => PlayerInput {
                fire: !self.hesitate && target.overlaps(gauge),
                ..Default::default()
            },
            _ => PlayerInput::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MatchSettings;
    use crate::sim::clock::ManualClock;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_idle_when_not_its_turn() {
        let state = GameState::new(&MatchSettings::default(), 0).unwrap();
        let mut bot = Autopilot::new(1, 5);
        assert_eq!(bot.input(&state), PlayerInput::default());
    }

    #[test]
    fn test_bots_finish_turns() {
        let settings = MatchSettings {
            seed: 21,
            layout: Some("flat".into()),
            ..Default::default()
        };
        let mut state = GameState::new(&settings, 0).unwrap();
        let clock = ManualClock::new(0);
        let mut bots = [Autopilot::new(0, 1), Autopilot::new(1, 2)];

        for _ in 0..20_000 {
            if state.turn_number >= 5 || state.phase.is_game_over() {
                break;
            }
            clock.advance(STEP_MS);
            let input = TickInput {
                players: [bots[0].input(&state), bots[1].input(&state)],
            };
            tick(&mut state, &input, &clock);
        }
        assert!(state.turn_number >= 5 || state.phase.is_game_over());
    }
}
