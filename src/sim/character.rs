//! Character roster
//!
//! Every per-character number (hitbox, foot probe offset, skill) lives in one
//! table and is looked up once when a player is built.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// What a successful skill shot does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Skill {
    /// Three shots fired one after another
    Volley,
    /// Larger crater
    Blast,
    /// Projectile splits into three mid-flight
    Split,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterKind {
    Gunner,
    Bomber,
    Scatter,
}

/// Static per-character data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterProfile {
    /// Hitbox size in pixels
    pub size: Vec2,
    /// Transparent rows under the sprite's feet; the ground probe sits this far above the box bottom
    pub foot_offset: f32,
    pub skill: Skill,
}

const PROFILES: [CharacterProfile; 3] = [
    CharacterProfile {
        size: Vec2::new(TILE_SIZE * 4.0, TILE_SIZE * 4.0),
        foot_offset: 0.0,
        skill: Skill::Volley,
    },
    CharacterProfile {
        size: Vec2::new(TILE_SIZE * 5.0, TILE_SIZE * 5.0),
        foot_offset: 3.0,
        skill: Skill::Blast,
    },
    CharacterProfile {
        size: Vec2::new(TILE_SIZE * 4.0, TILE_SIZE * 5.0),
        foot_offset: 2.0,
        skill: Skill::Split,
    },
];

impl CharacterKind {
    pub const ALL: [CharacterKind; 3] = [
        CharacterKind::Gunner,
        CharacterKind::Bomber,
        CharacterKind::Scatter,
    ];

    /// Look up a character by its select-screen id (1-based)
    pub fn from_id(id: u8) -> Result<Self, ConfigError> {
        match id {
            1 => Ok(CharacterKind::Gunner),
            2 => Ok(CharacterKind::Bomber),
            3 => Ok(CharacterKind::Scatter),
            _ => Err(ConfigError::UnknownCharacter(id)),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            CharacterKind::Gunner => 1,
            CharacterKind::Bomber => 2,
            CharacterKind::Scatter => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CharacterKind::Gunner => "Gunner",
            CharacterKind::Bomber => "Bomber",
            CharacterKind::Scatter => "Scatter",
        }
    }

    #[inline]
    pub fn profile(self) -> &'static CharacterProfile {
        &PROFILES[self.id() as usize - 1]
    }

    #[inline]
    pub fn skill(self) -> Skill {
        self.profile().skill
    }

    /// Shots fired this turn for a resolved bonus flag
    pub fn shot_count(self, bonus: bool) -> u8 {
        if bonus && self.skill() == Skill::Volley {
            VOLLEY_SHOTS
        } else {
            1
        }
    }

    /// Crater radius for a projectile fired by this character
    pub fn blast_radius(self, bonus: bool) -> f32 {
        if bonus && self.skill() == Skill::Blast {
            AREA_BLAST_RADIUS
        } else {
            BASE_BLAST_RADIUS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        for kind in CharacterKind::ALL {
            assert_eq!(CharacterKind::from_id(kind.id()).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_id_rejected() {
        assert!(matches!(
            CharacterKind::from_id(0),
            Err(ConfigError::UnknownCharacter(0))
        ));
        assert!(CharacterKind::from_id(4).is_err());
    }

    #[test]
    fn test_profiles_match_skills() {
        assert_eq!(CharacterKind::Gunner.skill(), Skill::Volley);
        assert_eq!(CharacterKind::Bomber.skill(), Skill::Blast);
        assert_eq!(CharacterKind::Scatter.skill(), Skill::Split);
        for kind in CharacterKind::ALL {
            let profile = kind.profile();
            assert!(profile.foot_offset < profile.size.y);
        }
    }

    #[test]
    fn test_skill_numbers() {
        assert_eq!(CharacterKind::Gunner.shot_count(true), VOLLEY_SHOTS);
        assert_eq!(CharacterKind::Gunner.shot_count(false), 1);
        assert_eq!(CharacterKind::Bomber.shot_count(true), 1);

        assert_eq!(CharacterKind::Bomber.blast_radius(true), AREA_BLAST_RADIUS);
        assert_eq!(CharacterKind::Bomber.blast_radius(false), BASE_BLAST_RADIUS);
        assert_eq!(CharacterKind::Scatter.blast_radius(true), BASE_BLAST_RADIUS);
    }
}
