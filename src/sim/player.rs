//! Player entity and its physics
//!
//! Players are axis-aligned boxes. Horizontal motion comes from walking and
//! knockback; vertical motion is gravity resolved against the terrain through a
//! single foot probe under the box center.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::character::CharacterKind;
use super::terrain::Terrain;
use crate::consts::*;
use crate::{direction_from_degrees, pixel_to_tile};

/// Height above the ground a player is dropped from at spawn
const SPAWN_DROP: f32 = TILE_SIZE * 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// 0 or 1
    pub index: usize,
    pub kind: CharacterKind,
    /// Top-left corner of the hitbox (pixels)
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub facing_right: bool,
    /// Aim angle in degrees, 0..=180
    pub angle: f32,
    /// Foot probe distance above the box bottom
    pub foot_offset: f32,
    /// Whether the foot probe touched ground at the end of the last step
    pub on_ground: bool,
}

impl Player {
    /// Create a player centered on `spawn_x`, dropped just above the ground there
    pub fn new(index: usize, kind: CharacterKind, spawn_x: f32, terrain: &Terrain) -> Self {
        let profile = kind.profile();
        let pos_y = match terrain.surface_row(pixel_to_tile(spawn_x)) {
            Some(row) => {
                row as f32 * TILE_SIZE - (profile.size.y - profile.foot_offset) - SPAWN_DROP
            }
            None => SCREEN_HEIGHT / 2.0 - profile.size.y,
        };

        Self {
            index,
            kind,
            pos: Vec2::new(spawn_x - profile.size.x / 2.0, pos_y),
            size: profile.size,
            vel: Vec2::ZERO,
            // Face the opponent
            facing_right: spawn_x < SCREEN_WIDTH / 2.0,
            angle: DEFAULT_AIM_ANGLE,
            foot_offset: profile.foot_offset,
            on_ground: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    /// Y of the foot probe
    #[inline]
    pub fn foot_y(&self) -> f32 {
        self.pos.y + self.size.y - self.foot_offset
    }

    /// True if the foot probe sits in a solid tile
    pub fn is_on_ground(&self, terrain: &Terrain) -> bool {
        terrain.is_solid_at(self.center().x, self.foot_y())
    }

    /// Add an impulse; it takes effect on the next `step`
    pub fn apply_knockback(&mut self, kx: f32, ky: f32) {
        self.vel += Vec2::new(kx, ky);
    }

    /// Shift horizontally. Rejected if any part of the box would leave the screen.
    ///
    /// Terrain is not consulted here; walking into a slope leaves the foot
    /// inside it and the next `step` lifts the player on top.
    pub fn walk(&mut self, dx: f32) -> bool {
        let new_x = self.pos.x + dx;
        if new_x < 0.0 || new_x + self.size.x > SCREEN_WIDTH {
            return false;
        }
        self.pos.x = new_x;
        if dx > 0.0 {
            self.facing_right = true;
        } else if dx < 0.0 {
            self.facing_right = false;
        }
        true
    }

    /// Advance one physics step
    pub fn step(&mut self, terrain: &Terrain) {
        // Horizontal: knockback drift, kept on screen
        self.pos.x += self.vel.x;
        let max_x = SCREEN_WIDTH - self.size.x;
        if self.pos.x < 0.0 || self.pos.x > max_x {
            self.pos.x = self.pos.x.clamp(0.0, max_x);
            self.vel.x = 0.0;
        }
        self.vel.x *= PLAYER_FRICTION;
        if self.vel.x.abs() < PLAYER_MIN_SPEED {
            self.vel.x = 0.0;
        }

        // Vertical
        self.vel.y = (self.vel.y + PLAYER_GRAVITY).min(PLAYER_MAX_FALL_SPEED);
        self.pos.y += self.vel.y;

        self.on_ground = self.resolve_ground(terrain);
    }

    /// Nudge the box up until the foot is clear, then seat it on the tile below
    fn resolve_ground(&mut self, terrain: &Terrain) -> bool {
        let mut lifted = false;
        while self.is_on_ground(terrain) {
            self.pos.y -= 1.0;
            lifted = true;
        }
        if !lifted {
            return false;
        }

        // The foot is now less than a pixel above the solid row
        let ground_top = (pixel_to_tile(self.foot_y()) + 1) as f32 * TILE_SIZE;
        self.pos.y = ground_top - (self.size.y - self.foot_offset);
        self.vel.y = 0.0;
        true
    }

    /// Launch angle after mirroring for facing
    pub fn firing_angle(&self) -> f32 {
        if self.facing_right {
            self.angle
        } else {
            MAX_AIM_ANGLE - self.angle
        }
    }

    /// Unit vector of the aim indicator
    pub fn aim_direction(&self) -> Vec2 {
        direction_from_degrees(self.firing_angle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::terrain::{MapLayout, Material};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn flat_terrain() -> Terrain {
        let mut terrain = Terrain::screen_sized();
        terrain.generate(MapLayout::Flat, &mut Pcg32::seed_from_u64(0));
        terrain
    }

    fn ground_top() -> f32 {
        (MAP_HEIGHT * 3 / 4) as f32 * TILE_SIZE
    }

    fn settled(kind: CharacterKind, terrain: &Terrain) -> Player {
        let mut player = Player::new(0, kind, SCREEN_WIDTH / 2.0, terrain);
        for _ in 0..120 {
            player.step(terrain);
        }
        player
    }

    #[test]
    fn test_falls_and_lands_on_ground() {
        let terrain = flat_terrain();
        let mut player = Player::new(0, CharacterKind::Gunner, SCREEN_WIDTH / 2.0, &terrain);
        assert!(!player.is_on_ground(&terrain));

        let mut landed = false;
        for _ in 0..60 {
            player.step(&terrain);
            if player.on_ground {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(player.vel.y, 0.0);
        assert_eq!(player.foot_y(), ground_top());
    }

    #[test]
    fn test_resting_is_fixed_point() {
        let terrain = flat_terrain();
        let mut player = settled(CharacterKind::Scatter, &terrain);
        let rest = player.pos;
        for _ in 0..100 {
            player.step(&terrain);
            assert_eq!(player.pos, rest);
            assert!(player.on_ground);
            assert_eq!(player.vel.y, 0.0);
        }
    }

    #[test]
    fn test_on_ground_matches_velocity_reset() {
        let terrain = flat_terrain();
        let mut player = Player::new(1, CharacterKind::Bomber, SCREEN_WIDTH / 2.0, &terrain);
        for _ in 0..200 {
            player.step(&terrain);
            assert_eq!(player.on_ground, player.is_on_ground(&terrain));
            if player.on_ground {
                assert_eq!(player.vel.y, 0.0);
            }
        }
    }

    #[test]
    fn test_foot_offset_sinks_box() {
        let terrain = flat_terrain();
        let bomber = settled(CharacterKind::Bomber, &terrain);
        let bottom = bomber.pos.y + bomber.size.y;
        assert_eq!(bottom - ground_top(), bomber.foot_offset);
    }

    #[test]
    fn test_knockback_applies_next_step() {
        let terrain = flat_terrain();
        let mut player = settled(CharacterKind::Gunner, &terrain);
        let before = player.pos;

        player.apply_knockback(3.0, -4.0);
        assert_eq!(player.pos, before);

        player.step(&terrain);
        assert!(player.pos.x > before.x);
        assert!(player.pos.y < before.y);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_friction_snaps_to_zero() {
        let terrain = flat_terrain();
        let mut player = settled(CharacterKind::Gunner, &terrain);
        player.apply_knockback(2.0, 0.0);
        for _ in 0..100 {
            player.step(&terrain);
        }
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_walk_respects_screen_edges() {
        let terrain = flat_terrain();
        let mut player = Player::new(0, CharacterKind::Gunner, SCREEN_WIDTH / 4.0, &terrain);
        player.pos.x = 2.0;
        assert!(!player.walk(-5.0));
        assert_eq!(player.pos.x, 2.0);
        assert!(player.walk(-2.0));
        assert_eq!(player.pos.x, 0.0);
        assert!(!player.facing_right);

        player.pos.x = SCREEN_WIDTH - player.size.x;
        assert!(!player.walk(1.0));
        assert!(player.walk(-1.0));
        assert!(player.walk(1.0));
        assert!(player.facing_right);
    }

    #[test]
    fn test_knockback_clamped_to_screen() {
        let terrain = flat_terrain();
        let mut player = settled(CharacterKind::Gunner, &terrain);
        player.apply_knockback(-10_000.0, 0.0);
        player.step(&terrain);
        assert_eq!(player.pos.x, 0.0);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_walking_into_wall_climbs() {
        let mut terrain = flat_terrain();
        let mut player = settled(CharacterKind::Gunner, &terrain);
        // Two-tile step just right of the foot probe
        let column = pixel_to_tile(player.center().x) + 1;
        let ground_row = pixel_to_tile(ground_top());
        for dx in 0..4 {
            terrain.set(column + dx, ground_row - 1, Material::Dirt);
            terrain.set(column + dx, ground_row - 2, Material::Dirt);
        }

        assert!(player.walk(WALK_STEP));
        player.step(&terrain);
        assert!(player.on_ground);
        assert_eq!(player.foot_y(), ground_top() - 2.0 * TILE_SIZE);
    }

    #[test]
    fn test_firing_angle_mirrors_when_facing_left() {
        let terrain = flat_terrain();
        let mut player = Player::new(1, CharacterKind::Gunner, SCREEN_WIDTH * 0.75, &terrain);
        assert!(!player.facing_right);
        player.angle = 30.0;
        assert_eq!(player.firing_angle(), 150.0);
        assert!(player.aim_direction().x < 0.0);
        assert!(player.aim_direction().y < 0.0);
    }
}
