//! Read-only view of a match for renderers and UI

use glam::{IVec2, Vec2};
use serde::Serialize;

use super::character::CharacterKind;
use super::state::{GamePhase, GameState, TargetBand};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub index: usize,
    pub kind: CharacterKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub facing_right: bool,
    pub angle: f32,
    /// Unit vector of the aim indicator
    pub aim: Vec2,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub anchor: IVec2,
    pub trail: Vec<IVec2>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchSnapshot {
    pub tick: u64,
    pub phase: &'static str,
    pub current_player: usize,
    pub turn_number: u32,
    /// Milliseconds left in MOVE / AIM_2
    pub remaining_ms: Option<u64>,
    pub aim_angle: f32,
    pub power_gauge: Option<f32>,
    pub target_band: Option<TargetBand>,
    pub players: Vec<PlayerView>,
    pub projectiles: Vec<ProjectileView>,
    pub terrain_width: usize,
    pub terrain_height: usize,
    /// Row-major material codes
    pub terrain: Vec<u8>,
    pub winner: Option<usize>,
}

impl GameState {
    pub fn snapshot(&self, now_ms: u64) -> MatchSnapshot {
        let (power_gauge, target_band) = match self.phase {
            GamePhase::AimPower { gauge, target, .. } => (Some(gauge), Some(target)),
            _ => (None, None),
        };

        MatchSnapshot {
            tick: self.time_ticks,
            phase: self.phase.name(),
            current_player: self.turn,
            turn_number: self.turn_number,
            remaining_ms: self.remaining_ms(now_ms),
            aim_angle: self.current_player().angle,
            power_gauge,
            target_band,
            players: self
                .players
                .iter()
                .map(|p| PlayerView {
                    index: p.index,
                    kind: p.kind,
                    pos: p.pos,
                    size: p.size,
                    facing_right: p.facing_right,
                    angle: p.angle,
                    aim: p.aim_direction(),
                    on_ground: p.on_ground,
                })
                .collect(),
            projectiles: self
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    anchor: p.anchor(),
                    trail: p.trail.iter().copied().collect(),
                })
                .collect(),
            terrain_width: self.terrain.width(),
            terrain_height: self.terrain.height(),
            terrain: self.terrain.codes(),
            winner: self.winner(),
        }
    }
}
