//! Crater Duel - a turn-based artillery duel on destructible terrain
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, physics, turn state machine)
//! - `settings`: Match configuration loaded from JSON
//! - `error`: Configuration errors rejected at match construction

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::MatchSettings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target simulation rate (steps per second)
    pub const STEPS_PER_SECOND: u32 = 60;
    /// Milliseconds per step at the target rate
    pub const STEP_MS: u64 = 1000 / STEPS_PER_SECOND as u64;

    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Terrain tiles are square, TILE_SIZE pixels per side
    pub const TILE_SIZE: f32 = 5.0;
    pub const MAP_WIDTH: usize = (SCREEN_WIDTH / TILE_SIZE) as usize;
    pub const MAP_HEIGHT: usize = (SCREEN_HEIGHT / TILE_SIZE) as usize;

    /// Projectile gravity (px/step²) and launch speed (px/step)
    pub const GRAVITY: f32 = 0.1;
    pub const LAUNCH_SPEED: f32 = 8.0;
    /// Trail points kept per projectile
    pub const TRAIL_LENGTH: usize = 50;

    /// Player gravity (px/step²). Fall speed stays below one tile per step.
    pub const PLAYER_GRAVITY: f32 = 0.35;
    pub const PLAYER_MAX_FALL_SPEED: f32 = 4.5;
    /// Horizontal damping applied every step, and the snap-to-zero threshold
    pub const PLAYER_FRICTION: f32 = 0.9;
    pub const PLAYER_MIN_SPEED: f32 = 0.05;
    /// Pixels moved per step while a direction is held
    pub const WALK_STEP: f32 = 5.0;

    /// Crater radii (pixels)
    pub const BASE_BLAST_RADIUS: f32 = 30.0;
    pub const AREA_BLAST_RADIUS: f32 = 50.0;
    /// Knockback reaches this multiple of the crater radius
    pub const KNOCKBACK_RADIUS_FACTOR: f32 = 2.0;
    /// Knockback speed at zero distance (px/step)
    pub const MAX_KNOCKBACK: f32 = 9.0;
    /// Downward knockback is flipped and scaled by this
    pub const DOWNWARD_ATTENUATION: f32 = 0.5;
    /// Fraction of the force always added as upward velocity
    pub const UPWARD_POP: f32 = 0.35;

    /// Split skill: delay after launch and the horizontal fan spread
    pub const SPLIT_DELAY_MS: u64 = 400;
    pub const SPLIT_SPREAD: f32 = 1.5;

    /// Turn timers
    pub const MOVE_TIME_MS: u64 = 5000;
    pub const AIM_TIME_MS: u64 = 3000;

    /// Angle gauge (degrees)
    pub const DEFAULT_AIM_ANGLE: f32 = 45.0;
    pub const MAX_AIM_ANGLE: f32 = 180.0;
    pub const ANGLE_GAUGE_SPEED: f32 = 2.2;

    /// Power gauge bar
    pub const POWER_BAR_HEIGHT: f32 = 200.0;
    pub const POWER_GAUGE_SPEED: f32 = 8.05;
    pub const TARGET_BAND_HEIGHT: f32 = 20.0;
    pub const INDICATOR_HEIGHT: f32 = 5.0;

    /// Shots fired by the multi-shot skill
    pub const VOLLEY_SHOTS: u8 = 3;
}

/// Unit vector for an angle in degrees, 0° along +x and 90° straight up (screen y grows down)
#[inline]
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Bounce `value` back into `[0, max]`, flipping `direction` when it crosses a bound
#[inline]
pub fn reflect_in_range(value: f32, direction: f32, max: f32) -> (f32, f32) {
    if value > max {
        ((2.0 * max - value).max(0.0), -direction)
    } else if value < 0.0 {
        ((-value).min(max), -direction)
    } else {
        (value, direction)
    }
}

/// Convert a pixel coordinate to its tile index (floors toward negative infinity)
#[inline]
pub fn pixel_to_tile(px: f32) -> i32 {
    (px / consts::TILE_SIZE).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_degrees() {
        let right = direction_from_degrees(0.0);
        assert!((right.x - 1.0).abs() < 1e-6 && right.y.abs() < 1e-6);

        let up = direction_from_degrees(90.0);
        assert!(up.x.abs() < 1e-6);
        assert!((up.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reflect_in_range() {
        assert_eq!(reflect_in_range(50.0, 1.0, 180.0), (50.0, 1.0));
        assert_eq!(reflect_in_range(181.0, 1.0, 180.0), (179.0, -1.0));
        assert_eq!(reflect_in_range(-2.0, -1.0, 180.0), (2.0, 1.0));
    }

    #[test]
    fn test_pixel_to_tile() {
        assert_eq!(pixel_to_tile(0.0), 0);
        assert_eq!(pixel_to_tile(4.9), 0);
        assert_eq!(pixel_to_tile(5.0), 1);
        assert_eq!(pixel_to_tile(-0.1), -1);
    }
}
