//! Explosion resolution: crater carving and radial knockback

use glam::Vec2;
use serde::Serialize;

use super::player::Player;
use super::terrain::Terrain;
use crate::consts::*;

/// What an explosion did, for logging and renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplosionReport {
    pub center: Vec2,
    pub radius: f32,
    pub cells_cleared: usize,
    /// (player index, impulse applied)
    pub knockbacks: Vec<(usize, Vec2)>,
}

/// Impulse felt by a point `target` from a blast at `center`
///
/// Falls off linearly to zero at `knockback_radius`. A blast never pushes a
/// player down: a downward component is flipped and attenuated, and a fixed
/// share of the force is always added upward. Zero distance yields nothing.
pub fn knockback_impulse(center: Vec2, target: Vec2, knockback_radius: f32) -> Option<Vec2> {
    let offset = target - center;
    let dist = offset.length();
    if dist == 0.0 || dist >= knockback_radius {
        return None;
    }

    let force = MAX_KNOCKBACK * (1.0 - dist / knockback_radius);
    let mut impulse = offset / dist * force;
    // Screen y grows downward
    if impulse.y > 0.0 {
        impulse.y = -impulse.y * DOWNWARD_ATTENUATION;
    }
    impulse.y -= force * UPWARD_POP;
    Some(impulse)
}

/// Carve a crater of `radius` at `center` and shove every player within twice that
pub fn explode(
    center: Vec2,
    radius: f32,
    terrain: &mut Terrain,
    players: &mut [Player],
) -> ExplosionReport {
    let cells_cleared = terrain.carve_circle(center.x, center.y, radius);
    let knockback_radius = radius * KNOCKBACK_RADIUS_FACTOR;

    let mut knockbacks = Vec::new();
    for player in players.iter_mut() {
        if let Some(impulse) = knockback_impulse(center, player.center(), knockback_radius) {
            player.apply_knockback(impulse.x, impulse.y);
            knockbacks.push((player.index, impulse));
        }
    }

    log::debug!(
        "Explosion at ({:.0}, {:.0}) r={}: {} cells cleared, {} players hit",
        center.x,
        center.y,
        radius,
        cells_cleared,
        knockbacks.len()
    );

    ExplosionReport {
        center,
        radius,
        cells_cleared,
        knockbacks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::character::CharacterKind;
    use crate::sim::terrain::{MapLayout, Material};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn flat_terrain() -> Terrain {
        let mut terrain = Terrain::screen_sized();
        terrain.generate(MapLayout::Flat, &mut Pcg32::seed_from_u64(0));
        terrain
    }

    #[test]
    fn test_directly_above_pushes_straight_up() {
        let center = Vec2::new(400.0, 500.0);
        let above = center - Vec2::new(0.0, 20.0);
        let impulse = knockback_impulse(center, above, 60.0).unwrap();
        assert_eq!(impulse.x, 0.0);
        assert!(impulse.y < 0.0);
    }

    #[test]
    fn test_below_is_flipped_upward() {
        let center = Vec2::new(400.0, 500.0);
        let below = center + Vec2::new(0.0, 20.0);
        let impulse = knockback_impulse(center, below, 60.0).unwrap();
        assert!(impulse.y < 0.0);

        let force = MAX_KNOCKBACK * (1.0 - 20.0 / 60.0);
        let expected = -force * DOWNWARD_ATTENUATION - force * UPWARD_POP;
        assert!((impulse.y - expected).abs() < 1e-4);
    }

    #[test]
    fn test_sideways_has_upward_pop() {
        let center = Vec2::new(400.0, 500.0);
        let right = center + Vec2::new(30.0, 0.0);
        let impulse = knockback_impulse(center, right, 60.0).unwrap();
        let force = MAX_KNOCKBACK * 0.5;
        assert!((impulse.x - force).abs() < 1e-4);
        assert!((impulse.y + force * UPWARD_POP).abs() < 1e-4);
    }

    #[test]
    fn test_force_falls_off_with_distance() {
        let center = Vec2::ZERO;
        let near = knockback_impulse(center, Vec2::new(10.0, 0.0), 60.0).unwrap();
        let far = knockback_impulse(center, Vec2::new(50.0, 0.0), 60.0).unwrap();
        assert!(near.x > far.x);
        assert!(knockback_impulse(center, Vec2::new(60.0, 0.0), 60.0).is_none());
        assert!(knockback_impulse(center, Vec2::new(90.0, 0.0), 60.0).is_none());
    }

    #[test]
    fn test_zero_distance_has_no_force() {
        let center = Vec2::new(100.0, 100.0);
        assert!(knockback_impulse(center, center, 60.0).is_none());
    }

    #[test]
    fn test_explode_carves_and_knocks_back() {
        let mut terrain = flat_terrain();
        let mut players = vec![
            Player::new(0, CharacterKind::Gunner, SCREEN_WIDTH / 2.0, &terrain),
            Player::new(1, CharacterKind::Bomber, SCREEN_WIDTH * 0.75, &terrain),
        ];
        let ground = (MAP_HEIGHT * 3 / 4) as f32 * TILE_SIZE;
        let center = Vec2::new(players[0].center().x + 10.0, ground + 2.0);
        let before = terrain.solid_count();

        let report = explode(center, BASE_BLAST_RADIUS, &mut terrain, &mut players);

        assert!(report.cells_cleared > 0);
        assert_eq!(before - terrain.solid_count(), report.cells_cleared);
        assert_eq!(report.knockbacks.len(), 1);
        assert_eq!(report.knockbacks[0].0, 0);
        // Blast is right of the player: pushed left and up
        assert!(players[0].vel.x < 0.0);
        assert!(players[0].vel.y < 0.0);
        assert_eq!(players[1].vel, Vec2::ZERO);
    }

    #[test]
    fn test_explode_only_removes_previously_solid_disk() {
        let mut terrain = flat_terrain();
        let ground_row = (MAP_HEIGHT * 3 / 4) as i32;
        let center = Vec2::new(642.0, ground_row as f32 * TILE_SIZE + 1.0);
        let before = terrain.clone();

        explode(center, BASE_BLAST_RADIUS, &mut terrain, &mut []);

        let (tx, ty) = (128, ground_row);
        let r = (BASE_BLAST_RADIUS / TILE_SIZE) as i32;
        for y in 0..MAP_HEIGHT as i32 {
            for x in 0..MAP_WIDTH as i32 {
                let (dx, dy) = (x - tx, y - ty);
                let in_disk = dx * dx + dy * dy <= r * r;
                let removed = before.is_solid(x, y) && !terrain.is_solid(x, y);
                assert_eq!(removed, in_disk && before.is_solid(x, y));
                assert!(!(terrain.get(x, y) != Material::Empty && in_disk));
            }
        }
    }
}
