//! Simulation tick
//!
//! Advances the match by one step: apply the current player's input, run the
//! phase timers and gauges, integrate players and projectiles, then check for
//! a player fallen off the map.

use super::clock::Clock;
use super::state::{GameEvent, GamePhase, GameState, TargetBand};
use crate::consts::*;
use crate::reflect_in_range;

/// One player's controls for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    /// Held
    pub left: bool,
    /// Held
    pub right: bool,
    /// Pressed this tick (edge, not level)
    pub fire: bool,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub players: [PlayerInput; 2],
}

impl TickInput {
    /// Input where only `player` presses fire
    pub fn fire(player: usize) -> Self {
        let mut input = Self::default();
        input.players[player].fire = true;
        input
    }
}

/// Advance the match by one step
pub fn tick(state: &mut GameState, input: &TickInput, clock: &impl Clock) {
    if state.phase.is_game_over() {
        return;
    }

    let now = clock.now_ms();
    state.events.clear();
    state.time_ticks += 1;

    let controls = input.players[state.turn];
    handle_input(state, controls, now);
    advance_phase(state, now);
    step_entities(state, now);
    check_falls(state);

    state.normalize_order();
}

fn handle_input(state: &mut GameState, controls: PlayerInput, now: u64) {
    match state.phase {
        GamePhase::Move { .. } => {
            let player = state.current_player_mut();
            if controls.left {
                player.walk(-WALK_STEP);
            }
            if controls.right {
                player.walk(WALK_STEP);
            }
        }
        GamePhase::AimAngle { .. } if controls.fire => {
            let angle = state.current_player().angle;
            state.events.push(GameEvent::AngleLocked {
                player: state.turn,
                angle,
            });
            state.phase = GamePhase::AimPower {
                entered_ms: now,
                gauge: 0.0,
                direction: 1.0,
                target: TargetBand::random(&mut state.rng),
            };
        }
        GamePhase::AimPower { gauge, target, .. } if controls.fire => {
            resolve_shot(state, target.overlaps(gauge), now);
        }
        _ => {}
    }
}

fn advance_phase(state: &mut GameState, now: u64) {
    match state.phase {
        GamePhase::Move { entered_ms } => {
            if now.saturating_sub(entered_ms) > state.settings.move_time_ms {
                state.current_player_mut().angle = DEFAULT_AIM_ANGLE;
                state.phase = GamePhase::AimAngle { direction: 1.0 };
                state.events.push(GameEvent::AimStarted { player: state.turn });
                log::info!("Player {} aiming", state.turn + 1);
            }
        }
        GamePhase::AimAngle { direction } => {
            let speed = state.settings.angle_gauge_speed;
            let player = state.current_player_mut();
            let (angle, direction) =
                reflect_in_range(player.angle + speed * direction, direction, MAX_AIM_ANGLE);
            player.angle = angle;
            state.phase = GamePhase::AimAngle { direction };
        }
        GamePhase::AimPower {
            entered_ms,
            gauge,
            direction,
            target,
        } => {
            if now.saturating_sub(entered_ms) > state.settings.aim_time_ms {
                log::info!("Player {} ran out of aim time", state.turn + 1);
                resolve_shot(state, false, now);
            } else {
                let speed = state.settings.power_gauge_speed;
                let (gauge, direction) =
                    reflect_in_range(gauge + speed * direction, direction, POWER_BAR_HEIGHT);
                state.phase = GamePhase::AimPower {
                    entered_ms,
                    gauge,
                    direction,
                    target,
                };
            }
        }
        GamePhase::Fire {
            angle,
            bonus,
            shots_remaining,
        } => {
            if !state.projectiles.is_empty() {
                return;
            }
            if shots_remaining > 0 {
                fire_shot(state, angle, bonus, shots_remaining, now);
            } else {
                next_turn(state, now);
            }
        }
        GamePhase::GameOver { .. } => {}
    }
}

/// Lock in the shot plan and fire the first shot
fn resolve_shot(state: &mut GameState, bonus: bool, now: u64) {
    let player = state.current_player();
    let angle = player.firing_angle();
    let shots = player.kind.shot_count(bonus);
    if bonus {
        log::info!("Player {} SKILL SHOT ({})", state.turn + 1, player.kind.as_str());
    } else {
        log::info!("Player {} normal shot", state.turn + 1);
    }
    state.events.push(GameEvent::ShotResolved {
        player: state.turn,
        bonus,
        shots,
    });
    fire_shot(state, angle, bonus, shots, now);
}

/// Fire one planned shot and stay in FIRE with the rest queued
fn fire_shot(state: &mut GameState, angle: f32, bonus: bool, shots_planned: u8, now: u64) {
    let id = state.spawn_projectile(angle, bonus, now);
    state.events.push(GameEvent::Fired {
        player: state.turn,
        projectile: id,
    });
    state.phase = GamePhase::Fire {
        angle,
        bonus,
        shots_remaining: shots_planned.saturating_sub(1),
    };
}

fn next_turn(state: &mut GameState, now: u64) {
    state.turn = (state.turn + 1) % state.players.len();
    state.turn_number += 1;
    state.phase = GamePhase::Move { entered_ms: now };
    state.events.push(GameEvent::TurnStarted { player: state.turn });
    log::info!("Turn {}: player {}", state.turn_number, state.turn + 1);
}

fn step_entities(state: &mut GameState, now: u64) {
    for player in state.players.iter_mut() {
        player.step(&state.terrain);
    }

    let mut spawned = Vec::new();
    for projectile in state.projectiles.iter_mut() {
        let outcome = projectile.step(&mut state.terrain, &mut state.players, now);
        if let Some(report) = outcome.explosion {
            state.events.push(GameEvent::Explosion(report));
        }
        if !outcome.spawned.is_empty() {
            spawned.push((projectile.id, outcome.spawned));
        }
    }
    state.projectiles.retain(|p| !p.is_spent());

    for (parent, children) in spawned {
        let mut ids = Vec::with_capacity(children.len());
        for mut child in children {
            child.id = state.next_entity_id();
            ids.push(child.id);
            state.projectiles.push(child);
        }
        state.events.push(GameEvent::Split {
            parent,
            children: ids,
        });
    }
}

/// A player below the screen loses; the other wins
fn check_falls(state: &mut GameState) {
    let fallen = state
        .players
        .iter()
        .find(|p| p.top() > SCREEN_HEIGHT)
        .map(|p| p.index);
    if let Some(loser) = fallen {
        let winner = 1 - loser;
        state.phase = GamePhase::GameOver { winner };
        state.events.push(GameEvent::GameOver { winner });
        log::info!("Player {} fell off the map - player {} wins!", loser + 1, winner + 1);
    }
}
