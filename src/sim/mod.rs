//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time comes from an injected `Clock`
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod bot;
pub mod character;
pub mod clock;
pub mod combat;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod terrain;
pub mod tick;

pub use bot::Autopilot;
pub use character::{CharacterKind, CharacterProfile, Skill};
pub use clock::{Clock, ManualClock, SystemClock};
pub use combat::{ExplosionReport, explode, knockback_impulse};
pub use player::Player;
pub use projectile::{Projectile, ProjectileStep};
pub use snapshot::{MatchSnapshot, PlayerView, ProjectileView};
pub use state::{GameEvent, GamePhase, GameState, TargetBand};
pub use terrain::{MapLayout, Material, Terrain, spawn_x};
pub use tick::{PlayerInput, TickInput, tick};
