//! Match state and core simulation types
//!
//! One `GameState` owns everything a match needs: terrain, both players, the
//! live projectiles, the seeded RNG and the turn phase.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::character::CharacterKind;
use super::combat::ExplosionReport;
use super::player::Player;
use super::projectile::Projectile;
use super::terrain::{MapLayout, Terrain, spawn_x};
use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::MatchSettings;

/// Randomly placed window on the power bar that earns a skill shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetBand {
    /// Offset from the top of the bar
    pub top: f32,
    pub height: f32,
}

impl TargetBand {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            top: rng.random_range(0.0..=POWER_BAR_HEIGHT - TARGET_BAND_HEIGHT),
            height: TARGET_BAND_HEIGHT,
        }
    }

    /// Whether the gauge indicator at `value` overlaps the band
    pub fn overlaps(&self, value: f32) -> bool {
        value < self.top + self.height && value + INDICATOR_HEIGHT > self.top
    }
}

/// Turn phase. Each variant carries only the data that phase uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "phase")]
pub enum GamePhase {
    /// Current player may walk until the window closes
    Move { entered_ms: u64 },
    /// Angle gauge sweeps 0..=180 until fire is pressed
    AimAngle { direction: f32 },
    /// Power gauge sweeps the bar until fire is pressed or time runs out
    AimPower {
        entered_ms: u64,
        gauge: f32,
        direction: f32,
        target: TargetBand,
    },
    /// Shots in flight; more may be queued
    Fire {
        angle: f32,
        bonus: bool,
        shots_remaining: u8,
    },
    /// Match over
    GameOver { winner: usize },
}

impl GamePhase {
    pub fn name(&self) -> &'static str {
        match self {
            GamePhase::Move { .. } => "MOVE",
            GamePhase::AimAngle { .. } => "AIM_1",
            GamePhase::AimPower { .. } => "AIM_2",
            GamePhase::Fire { .. } => "FIRE",
            GamePhase::GameOver { .. } => "GAMEOVER",
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, GamePhase::GameOver { .. })
    }
}

/// Things that happened during the last tick, for logs and presentation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    TurnStarted { player: usize },
    AimStarted { player: usize },
    AngleLocked { player: usize, angle: f32 },
    ShotResolved { player: usize, bonus: bool, shots: u8 },
    Fired { player: usize, projectile: u32 },
    Split { parent: u32, children: Vec<u32> },
    Explosion(ExplosionReport),
    GameOver { winner: usize },
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Match seed for reproducibility
    pub seed: u64,
    /// Tunables this match was built with
    pub settings: MatchSettings,
    pub rng: Pcg32,
    pub layout: MapLayout,
    pub terrain: Terrain,
    pub players: [Player; 2],
    /// Live projectiles (sorted by id)
    pub projectiles: Vec<Projectile>,
    /// Index of the player whose turn it is
    pub turn: usize,
    /// Turns started so far (1-based)
    pub turn_number: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Build a match: validate settings, generate terrain, drop both players in
    pub fn new(settings: &MatchSettings, now_ms: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        let kinds: [CharacterKind; 2] = settings.character_kinds()?;

        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let layout = match settings.map_layout()? {
            Some(layout) => layout,
            None => MapLayout::random(&mut rng),
        };

        let mut terrain = Terrain::new(MAP_WIDTH, MAP_HEIGHT)?;
        terrain.generate(layout, &mut rng);

        let players = [
            Player::new(0, kinds[0], spawn_x(0), &terrain),
            Player::new(1, kinds[1], spawn_x(1), &terrain),
        ];

        log::info!(
            "New match (seed {}): {} vs {} on '{}'",
            settings.seed,
            kinds[0].as_str(),
            kinds[1].as_str(),
            layout.as_str()
        );

        Ok(Self {
            seed: settings.seed,
            settings: settings.clone(),
            rng,
            layout,
            terrain,
            players,
            projectiles: Vec::new(),
            turn: 0,
            turn_number: 1,
            phase: GamePhase::Move { entered_ms: now_ms },
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.turn]
    }

    pub fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.turn]
    }

    pub fn winner(&self) -> Option<usize> {
        match self.phase {
            GamePhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Time left in a timed phase
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        let (entered, limit) = match self.phase {
            GamePhase::Move { entered_ms } => (entered_ms, self.settings.move_time_ms),
            GamePhase::AimPower { entered_ms, .. } => (entered_ms, self.settings.aim_time_ms),
            _ => return None,
        };
        Some(limit.saturating_sub(now_ms.saturating_sub(entered)))
    }

    /// Launch one projectile from the current player's center
    pub fn spawn_projectile(&mut self, angle: f32, bonus: bool, now_ms: u64) -> u32 {
        let id = self.next_entity_id();
        let player = self.current_player();
        let projectile = Projectile::launch(id, player.center(), angle, player.kind, bonus, now_ms);
        self.projectiles.push(projectile);
        id
    }

    /// Center of a player, for presentation
    pub fn player_center(&self, index: usize) -> Vec2 {
        self.players[index].center()
    }

    /// Ensure projectiles are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.projectiles.sort_by_key(|p| p.id);
    }
}
