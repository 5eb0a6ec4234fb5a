//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed timestep per `tick` call
//! - Seeded RNG only
//! - Stable iteration order (list order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod menu;
pub mod state;
pub mod tick;

pub use collision::{Hit, bullet_hits_enemy, enemy_catches_player, first_catch, pair_hits};
pub use menu::MenuButton;
pub use state::{Bullet, Enemy, GameEvent, GamePhase, GameState, Particle};
pub use tick::{FixedStep, TextEdit, TickInput, tick};
