//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in `GameState`; nothing is global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::highscores::Leaderboard;
use crate::palette;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen with buttons and the leaderboard
    Menu,
    /// Manual screen, any click returns to the menu
    Instructions,
    /// Pilot name being typed before a run starts
    NameEntry,
    /// Active gameplay
    Playing,
    /// Run ended, any click returns to the menu
    GameOver,
}

/// Something the host should react to (persistence, export, logging)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A new run started
    RunStarted { name: String },
    /// A bullet destroyed an enemy
    EnemyDestroyed { golden: bool, points: u64 },
    /// Score crossed the level threshold
    LevelUp { level: u32 },
    /// An enemy reached the player; the leaderboard already holds the entry
    GameOver { score: u64, rank: Option<usize> },
}

/// A falling triangle
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    /// Triangle centre
    pub pos: Vec2,
    /// Half-extent of the triangle, also the collision radius
    pub size: f32,
    pub vel: Vec2,
    /// Golden enemies are worth triple points
    pub golden: bool,
}

impl Enemy {
    /// Spawn above the top edge with level-scaled speed
    pub fn spawn(rng: &mut Pcg32, level: u32, width: f32) -> Self {
        let lvl = level as f32;
        let size = ENEMY_MIN_SIZE + rng.random::<f32>() * ENEMY_SIZE_VARIANCE;
        let x = rng.random::<f32>() * width;
        let speed_x = (rng.random::<f32>() - 0.5) * (1.5 + lvl * 1.5);
        let speed_y = rng.random::<f32>() + (1.2 + lvl * 0.8);
        Self {
            pos: Vec2::new(x, ENEMY_SPAWN_Y),
            size,
            vel: Vec2::new(speed_x, speed_y),
            golden: rng.random_bool(GOLDEN_CHANCE),
        }
    }

    /// Advance one tick: bounce off the side walls, wrap back to the top
    pub fn update(&mut self, rng: &mut Pcg32, width: f32, height: f32) {
        self.pos += self.vel;
        if self.pos.x > width || self.pos.x < 0.0 {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y > height {
            self.pos.y = ENEMY_SPAWN_Y;
            self.pos.x = rng.random::<f32>() * width;
            self.golden = rng.random_bool(GOLDEN_CHANCE);
        }
    }

    pub fn points(&self) -> u64 {
        if self.golden { GOLDEN_POINTS } else { ENEMY_POINTS }
    }

    pub fn color(&self) -> &'static str {
        if self.golden { palette::GOLD } else { palette::ENEMY }
    }

    /// Particle count of this enemy's explosion
    pub fn explosion_size(&self) -> usize {
        if self.golden {
            EXPLOSION_GOLDEN
        } else {
            EXPLOSION_NORMAL
        }
    }

    /// Triangle vertices: apex up, base down
    pub fn vertices(&self) -> [Vec2; 3] {
        [
            Vec2::new(self.pos.x, self.pos.y - self.size),
            Vec2::new(self.pos.x + self.size, self.pos.y + self.size),
            Vec2::new(self.pos.x - self.size, self.pos.y + self.size),
        ]
    }
}

/// A laser bolt travelling straight up
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    /// Horizontal centre, top of the bolt
    pub pos: Vec2,
    /// Upward speed, fixed at creation from the level
    pub speed: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, level: u32) -> Self {
        Self {
            pos,
            speed: BULLET_BASE_SPEED + level as f32,
        }
    }

    pub fn update(&mut self) {
        self.pos.y -= self.speed;
    }

    /// True once the whole bolt is above the top edge
    pub fn off_screen(&self) -> bool {
        self.pos.y + BULLET_LENGTH < 0.0
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: &'static str,
    /// 0-1, decreases every tick; also used as draw alpha
    pub life: f32,
}

impl Particle {
    pub fn new(rng: &mut Pcg32, pos: Vec2, color: &'static str) -> Self {
        let vx = (rng.random::<f32>() - 0.5) * 2.0 * PARTICLE_MAX_SPEED;
        let vy = (rng.random::<f32>() - 0.5) * 2.0 * PARTICLE_MAX_SPEED;
        Self {
            pos,
            vel: Vec2::new(vx, vy),
            color,
            life: 1.0,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life -= PARTICLE_DECAY;
    }

    pub fn alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Viewport size in pixels
    pub width: f32,
    pub height: f32,
    /// Last known pointer position
    pub pointer: Vec2,
    pub score: u64,
    /// Starts at 1
    pub level: u32,
    pub player_name: String,
    /// Text typed so far during name entry
    pub name_buffer: String,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Tick of the most recent shot
    pub last_shot_tick: Option<u64>,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Live particle budget
    pub max_particles: usize,
    pub leaderboard: Leaderboard,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed, sitting on the menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            pointer: Vec2::new(DEFAULT_WIDTH / 2.0, DEFAULT_HEIGHT / 2.0),
            score: 0,
            level: 1,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            name_buffer: String::new(),
            time_ticks: 0,
            last_shot_tick: None,
            enemies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            max_particles: crate::QualityPreset::default().max_particles(),
            leaderboard: Leaderboard::new(),
            events: Vec::new(),
        }
    }

    /// Builder-style leaderboard injection (e.g. loaded from storage)
    pub fn with_leaderboard(mut self, leaderboard: Leaderboard) -> Self {
        self.leaderboard = leaderboard;
        self
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
    }

    /// Where the avatar sits: pointer column, fixed row near the bottom
    pub fn player_pos(&self) -> Vec2 {
        Vec2::new(self.pointer.x, self.height - PLAYER_BOTTOM_OFFSET)
    }

    /// Score at which the next level-up happens
    pub fn next_level_score(&self) -> u64 {
        self.level as u64 * POINTS_PER_LEVEL
    }

    /// Milliseconds of simulation time since the last shot
    pub fn ms_since_last_shot(&self) -> Option<u64> {
        self.last_shot_tick.map(|t| (self.time_ticks - t) * 1000 / SIM_HZ)
    }

    /// Switch phase, logging the transition
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::debug!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Open the name prompt, pre-filled with the current name
    pub fn begin_name_entry(&mut self) {
        self.name_buffer = self.player_name.clone();
        self.set_phase(GamePhase::NameEntry);
    }

    /// Start a fresh run.
    ///
    /// `name` replaces the current pilot name unless it is None or blank.
    pub fn reset_run(&mut self, name: Option<&str>) {
        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            self.player_name = name.to_string();
        }
        self.name_buffer.clear();
        self.score = 0;
        self.level = 1;
        self.last_shot_tick = None;
        self.enemies.clear();
        self.bullets.clear();
        self.particles.clear();
        self.spawn_enemies(INITIAL_ENEMIES);
        self.set_phase(GamePhase::Playing);
        log::info!("Run started for pilot '{}'", self.player_name);
        self.events.push(GameEvent::RunStarted {
            name: self.player_name.clone(),
        });
    }

    /// Spawn `count` enemies at the current level
    pub fn spawn_enemies(&mut self, count: usize) {
        for _ in 0..count {
            let enemy = Enemy::spawn(&mut self.rng, self.level, self.width);
            self.enemies.push(enemy);
        }
    }

    /// Burst of particles, limited by the particle budget
    pub fn spawn_explosion(&mut self, pos: Vec2, color: &'static str, count: usize) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let particle = Particle::new(&mut self.rng, pos, color);
            self.particles.push(particle);
        }
    }

    /// Advance every enemy by one tick
    pub fn update_enemies(&mut self) {
        let (width, height) = (self.width, self.height);
        for enemy in &mut self.enemies {
            enemy.update(&mut self.rng, width, height);
        }
    }

    /// Advance particles and drop the dead ones
    pub fn update_particles(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(Particle::alive);
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
