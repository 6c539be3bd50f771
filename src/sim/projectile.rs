//! Ballistic projectiles
//!
//! A projectile flies under gravity until the tile under its center is solid,
//! then explodes. Scatter skill shots split into three after a short delay.

use std::collections::VecDeque;

use glam::{IVec2, Vec2};
use serde::Serialize;

use super::character::{CharacterKind, Skill};
use super::combat::{self, ExplosionReport};
use super::player::Player;
use super::terrain::Terrain;
use crate::consts::*;
use crate::{direction_from_degrees, pixel_to_tile};

#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Character that fired it
    pub kind: CharacterKind,
    /// Fired with a successful skill timing
    pub bonus: bool,
    /// Recent pixel anchors, oldest first
    pub trail: VecDeque<IVec2>,
    /// Struck terrain and exploded
    pub hit: bool,
    /// Already split (or spawned by a split); never splits again
    pub split: bool,
    /// Left the playfield or replaced by its split children
    pub removed: bool,
    pub fired_at_ms: u64,
}

/// Result of one projectile step
#[derive(Debug, Default)]
pub struct ProjectileStep {
    /// Children to add to the live list
    pub spawned: Vec<Projectile>,
    pub explosion: Option<ExplosionReport>,
}

impl Projectile {
    /// Fire from `origin` at `angle` degrees (0 = right, 90 = up)
    pub fn launch(
        id: u32,
        origin: Vec2,
        angle: f32,
        kind: CharacterKind,
        bonus: bool,
        now_ms: u64,
    ) -> Self {
        Self {
            id,
            pos: origin,
            vel: direction_from_degrees(angle) * LAUNCH_SPEED,
            kind,
            bonus,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
            hit: false,
            split: false,
            removed: false,
            fired_at_ms: now_ms,
        }
    }

    /// Pixel the projectile is drawn at
    #[inline]
    pub fn anchor(&self) -> IVec2 {
        self.pos.round().as_ivec2()
    }

    /// True once the projectile should be dropped from the live list
    #[inline]
    pub fn is_spent(&self) -> bool {
        self.hit || self.removed
    }

    fn ready_to_split(&self, now_ms: u64) -> bool {
        self.bonus
            && !self.split
            && self.kind.skill() == Skill::Split
            && now_ms.saturating_sub(self.fired_at_ms) >= SPLIT_DELAY_MS
    }

    /// Three children fanned left, center, right; vertical speed is kept
    fn split_children(&self, now_ms: u64) -> Vec<Projectile> {
        [-SPLIT_SPREAD, 0.0, SPLIT_SPREAD]
            .into_iter()
            .map(|dx| Projectile {
                id: 0,
                pos: self.pos,
                vel: Vec2::new(self.vel.x + dx, self.vel.y),
                kind: self.kind,
                bonus: self.bonus,
                trail: self.trail.clone(),
                hit: false,
                split: true,
                removed: false,
                fired_at_ms: now_ms,
            })
            .collect()
    }

    /// Advance one step. Explodes into `terrain`/`players` on impact.
    ///
    /// Children come back with id 0; the owner assigns ids when merging them.
    pub fn step(
        &mut self,
        terrain: &mut Terrain,
        players: &mut [Player],
        now_ms: u64,
    ) -> ProjectileStep {
        if self.is_spent() {
            return ProjectileStep::default();
        }

        if self.ready_to_split(now_ms) {
            self.removed = true;
            log::debug!("Projectile {} split at ({:.0}, {:.0})", self.id, self.pos.x, self.pos.y);
            return ProjectileStep {
                spawned: self.split_children(now_ms),
                explosion: None,
            };
        }

        self.vel.y += GRAVITY;
        self.pos += self.vel;

        let anchor = self.anchor();
        self.trail.push_back(anchor);
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }

        let tile_x = pixel_to_tile(anchor.x as f32);
        let tile_y = pixel_to_tile(anchor.y as f32);
        if terrain.is_solid(tile_x, tile_y) {
            self.hit = true;
            return ProjectileStep {
                spawned: Vec::new(),
                explosion: Some(self.explode(terrain, players)),
            };
        }

        let off_side = anchor.x < 0 || anchor.x as f32 > SCREEN_WIDTH;
        let fell_away = anchor.y as f32 > SCREEN_HEIGHT * 2.0;
        if off_side || fell_away {
            self.removed = true;
        }
        ProjectileStep::default()
    }

    /// Blow up at the current anchor
    pub fn explode(&self, terrain: &mut Terrain, players: &mut [Player]) -> ExplosionReport {
        let radius = self.kind.blast_radius(self.bonus);
        combat::explode(self.anchor().as_vec2(), radius, terrain, players)
    }
}
