//! Destructible tile terrain
//!
//! The map is a fixed grid of `TILE_SIZE` pixel squares. Cells are only ever
//! mutated, never resized: generation fills them once, explosions clear them.

use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::pixel_to_tile;

/// Material stored in a terrain cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Material {
    #[default]
    Empty = 0,
    /// Regular ground
    Dirt = 1,
    /// Decorative variant, collides exactly like dirt
    Rock = 2,
}

impl Material {
    #[inline]
    pub fn is_solid(self) -> bool {
        self != Material::Empty
    }

    /// Numeric material code (0 = empty, 1 = dirt, 2 = rock)
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Named map generators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapLayout {
    /// Nothing at all (fallback)
    Empty,
    /// One flat band across the middle of the screen
    Flat,
    /// Two raised platforms over the spawn points with a low floor between
    Platforms,
    /// Rolling sine hills with flat plateaus under each spawn
    Hills,
}

impl MapLayout {
    /// Layouts picked from when no layout is configured
    pub const PLAYABLE: [MapLayout; 3] = [MapLayout::Flat, MapLayout::Platforms, MapLayout::Hills];

    pub fn as_str(&self) -> &'static str {
        match self {
            MapLayout::Empty => "empty",
            MapLayout::Flat => "flat",
            MapLayout::Platforms => "platforms",
            MapLayout::Hills => "hills",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "empty" => Some(MapLayout::Empty),
            "flat" => Some(MapLayout::Flat),
            "platforms" | "platform" => Some(MapLayout::Platforms),
            "hills" | "hill" => Some(MapLayout::Hills),
            _ => None,
        }
    }

    /// Pick one of the playable layouts
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::PLAYABLE[rng.random_range(0..Self::PLAYABLE.len())]
    }
}

/// Spawn column (pixels) for a player index
pub fn spawn_x(index: usize) -> f32 {
    if index == 0 {
        SCREEN_WIDTH / 4.0
    } else {
        SCREEN_WIDTH * 3.0 / 4.0
    }
}

/// Chance a platform cell is rock instead of dirt
const PLATFORM_ROCK_CHANCE: f64 = 0.2;
/// Chance a hill cell is rock instead of dirt
const HILL_ROCK_CHANCE: f64 = 0.1;
/// Half-width (tiles) of the flat ground kept under each spawn
const PLATEAU_HALF_WIDTH: i32 = 12;

/// Tile grid, row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    width: usize,
    height: usize,
    cells: Vec<Material>,
}

impl Terrain {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidGrid { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Material::Empty; width * height],
        })
    }

    /// Empty grid sized to the screen
    pub fn screen_sized() -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            cells: vec![Material::Empty; MAP_WIDTH * MAP_HEIGHT],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, tile_x: i32, tile_y: i32) -> Option<usize> {
        if tile_x < 0 || tile_y < 0 {
            return None;
        }
        let (x, y) = (tile_x as usize, tile_y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Material at a tile; out of bounds reads as empty
    pub fn get(&self, tile_x: i32, tile_y: i32) -> Material {
        self.index(tile_x, tile_y)
            .map(|i| self.cells[i])
            .unwrap_or(Material::Empty)
    }

    /// Write a tile; out-of-bounds writes are ignored
    pub fn set(&mut self, tile_x: i32, tile_y: i32, material: Material) {
        if let Some(i) = self.index(tile_x, tile_y) {
            self.cells[i] = material;
        }
    }

    /// True iff the tile holds any solid material
    #[inline]
    pub fn is_solid(&self, tile_x: i32, tile_y: i32) -> bool {
        self.get(tile_x, tile_y).is_solid()
    }

    /// Solidity of the tile containing a pixel
    #[inline]
    pub fn is_solid_at(&self, px: f32, py: f32) -> bool {
        self.is_solid(pixel_to_tile(px), pixel_to_tile(py))
    }

    /// Number of solid cells
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|m| m.is_solid()).count()
    }

    /// Material codes row by row, for renderers
    pub fn codes(&self) -> Vec<u8> {
        self.cells.iter().map(|m| m.code()).collect()
    }

    /// Topmost solid row in a column
    pub fn surface_row(&self, tile_x: i32) -> Option<i32> {
        (0..self.height as i32).find(|&y| self.is_solid(tile_x, y))
    }

    /// Clear the grid and fill it with the given layout
    pub fn generate(&mut self, layout: MapLayout, rng: &mut impl Rng) {
        self.cells.fill(Material::Empty);
        match layout {
            MapLayout::Empty => {}
            MapLayout::Flat => self.fill_flat(),
            MapLayout::Platforms => self.fill_platforms(rng),
            MapLayout::Hills => self.fill_hills(rng),
        }
        log::info!(
            "Generated '{}' terrain: {} solid cells",
            layout.as_str(),
            self.solid_count()
        );
    }

    fn fill_flat(&mut self) {
        let (w, h) = (self.width as i32, self.height as i32);
        for y in h * 3 / 4..h {
            for x in w / 5..w * 4 / 5 {
                self.set(x, y, Material::Dirt);
            }
        }
    }

    fn fill_platforms(&mut self, rng: &mut impl Rng) {
        let (w, h) = (self.width as i32, self.height as i32);

        // Low floor between the platforms
        for y in h * 7 / 8..h {
            for x in w * 3 / 10..w * 7 / 10 {
                self.set(x, y, Material::Dirt);
            }
        }

        let half_width = w / 12;
        let top = h * 3 / 5;
        let bottom = top + h / 10;
        for index in 0..2 {
            let center = pixel_to_tile(spawn_x(index) * self.width as f32 / MAP_WIDTH as f32);
            for y in top..bottom {
                for x in center - half_width..=center + half_width {
                    let material = if rng.random_bool(PLATFORM_ROCK_CHANCE) {
                        Material::Rock
                    } else {
                        Material::Dirt
                    };
                    self.set(x, y, material);
                }
            }
        }
    }

    fn fill_hills(&mut self, rng: &mut impl Rng) {
        let (w, h) = (self.width as i32, self.height as i32);
        let base = h * 2 / 3;
        let amplitude = (h / 12) as f32;
        let spawns: Vec<i32> = (0..2)
            .map(|i| pixel_to_tile(spawn_x(i) * self.width as f32 / MAP_WIDTH as f32))
            .collect();

        for x in w / 10..w * 9 / 10 {
            let on_plateau = spawns
                .iter()
                .any(|&s| (x - s).abs() <= PLATEAU_HALF_WIDTH);
            let surface = if on_plateau {
                base
            } else {
                let phase = x as f32 / w as f32 * TAU * 3.0;
                base - (amplitude * phase.sin()).round() as i32
            };
            for y in surface.max(0)..h {
                let material = if rng.random_bool(HILL_ROCK_CHANCE) {
                    Material::Rock
                } else {
                    Material::Dirt
                };
                self.set(x, y, material);
            }
        }
    }

    /// Clear a disk of tiles around a pixel position, returning how many solid cells were removed
    pub fn carve_circle(&mut self, center_x: f32, center_y: f32, radius: f32) -> usize {
        let tile_x = pixel_to_tile(center_x);
        let tile_y = pixel_to_tile(center_y);
        let tile_radius = (radius / TILE_SIZE).floor() as i32;
        let r2 = tile_radius * tile_radius;

        let mut cleared = 0;
        for dy in -tile_radius..=tile_radius {
            for dx in -tile_radius..=tile_radius {
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                if let Some(i) = self.index(tile_x + dx, tile_y + dy) {
                    if self.cells[i].is_solid() {
                        self.cells[i] = Material::Empty;
                        cleared += 1;
                    }
                }
            }
        }
        cleared
    }
}
