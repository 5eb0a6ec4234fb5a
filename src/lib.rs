//! Space Escape - a dodge-and-shoot arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (phases, entities, collisions, scoring)
//! - `renderer`: Draw list generation and the Canvas 2D backend
//! - `platform`: Browser helpers (session storage, downloads, URL query)
//! - `highscores`: Session-scoped top 5 leaderboard

pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::{Leaderboard, LeaderboardEntry};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Simulation rate. Speeds below are in pixels per tick.
    pub const SIM_HZ: u64 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Points needed per level (level-up at `level * POINTS_PER_LEVEL`)
    pub const POINTS_PER_LEVEL: u64 = 1500;

    /// Enemies spawned on reset
    pub const INITIAL_ENEMIES: usize = 5;
    /// Extra enemies spawned on each level-up
    pub const ENEMIES_PER_LEVEL_UP: usize = 2;
    /// Enemies (re)enter above the top edge
    pub const ENEMY_SPAWN_Y: f32 = -50.0;
    pub const ENEMY_MIN_SIZE: f32 = 15.0;
    pub const ENEMY_SIZE_VARIANCE: f32 = 10.0;
    pub const GOLDEN_CHANCE: f64 = 0.15;
    pub const ENEMY_POINTS: u64 = 100;
    pub const GOLDEN_POINTS: u64 = 300;

    /// Bullet speed is `BULLET_BASE_SPEED + level`
    pub const BULLET_BASE_SPEED: f32 = 8.0;
    /// Added to enemy size for the bullet hit test
    pub const BULLET_HIT_RADIUS: f32 = 15.0;
    /// Bullets spawn this far above the player
    pub const BULLET_SPAWN_OFFSET: f32 = 20.0;
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_LENGTH: f32 = 18.0;
    /// Minimum time between shots
    pub const SHOT_COOLDOWN_MS: u64 = 150;

    /// Added to enemy size for the player catch test
    pub const PLAYER_HIT_RADIUS: f32 = 25.0;
    /// Player row sits this far above the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 80.0;
    pub const PLAYER_BODY_RADIUS: f32 = 15.0;

    /// Particle velocity components are uniform in `[-MAX, MAX)`
    pub const PARTICLE_MAX_SPEED: f32 = 5.0;
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const PARTICLE_SIZE: f32 = 3.0;
    pub const EXPLOSION_NORMAL: usize = 12;
    pub const EXPLOSION_GOLDEN: usize = 30;
    pub const EXPLOSION_LEVEL_UP: usize = 40;

    pub const DEFAULT_PLAYER_NAME: &str = "Pilot";
    pub const MAX_NAME_LEN: usize = 16;

    /// Viewport used until the host reports a real size
    pub const DEFAULT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_HEIGHT: f32 = 720.0;
}

/// Colour palette (CSS colour strings)
pub mod palette {
    pub const BACKGROUND: &str = "#050508";
    pub const CYAN: &str = "#00f2ff";
    pub const ENEMY: &str = "#ff0055";
    pub const GOLD: &str = "#FFD700";
    pub const WHITE: &str = "white";
    pub const FLASH: &str = "#fff";
    pub const PLAYER_BODY: &str = "#eee";
    pub const PLAYER_VISOR: &str = "#333";
}
