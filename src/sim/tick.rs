//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one step per call.

use glam::Vec2;

use super::collision::{first_catch, pair_hits};
use super::menu::MenuButton;
use super::state::{Bullet, GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::palette;

/// A single edit to the name being typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer position, if it moved
    pub pointer: Option<Vec2>,
    /// Button held (fires while playing)
    pub pointer_down: bool,
    /// Button pressed since the last tick
    pub click: bool,
    /// New viewport size, if the window was resized
    pub viewport: Option<Vec2>,
    /// Debug: jump the score to the next level threshold
    pub force_level_up: bool,
    /// Keystrokes for the name prompt, in order
    pub text_edits: Vec<TextEdit>,
    /// Accept the typed name
    pub confirm: bool,
    /// Dismiss the prompt, keeping the previous name
    pub cancel: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Reset everything that should fire only once
    pub fn clear_one_shots(&mut self) {
        self.pointer = None;
        self.click = false;
        self.viewport = None;
        self.force_level_up = false;
        self.text_edits.clear();
        self.confirm = false;
        self.cancel = false;
    }
}

/// Turns variable frame times into a whole number of fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    /// Add a frame's elapsed seconds and return how many ticks to run.
    ///
    /// At most `MAX_SUBSTEPS` per frame; time beyond that is dropped so a
    /// slow stretch never turns into a burst of catch-up ticks.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT * 0.5);
        }
        steps
    }

    /// Unconsumed time carried into the next frame
    pub fn backlog(&self) -> f32 {
        self.accumulator
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }
    let input = &input;

    if let Some(size) = input.viewport {
        state.resize(size.x, size.y);
    }
    if let Some(pointer) = input.pointer {
        state.pointer = pointer;
    }

    state.time_ticks += 1;

    match state.phase {
        GamePhase::Menu => {
            if input.click {
                match MenuButton::at(state.pointer.y, state.height) {
                    Some(MenuButton::Play) => state.begin_name_entry(),
                    Some(MenuButton::Instructions) => state.set_phase(GamePhase::Instructions),
                    None => {}
                }
            }
        }

        GamePhase::Instructions => {
            if input.click {
                state.set_phase(GamePhase::Menu);
            }
        }

        GamePhase::NameEntry => name_entry(state, input),

        GamePhase::Playing => play(state, input),

        GamePhase::GameOver => {
            // Let the last explosions finish behind the overlay
            state.update_particles();
            if input.click {
                state.set_phase(GamePhase::Menu);
            }
        }
    }
}

fn name_entry(state: &mut GameState, input: &TickInput) {
    for edit in &input.text_edits {
        match *edit {
            TextEdit::Insert(c) => {
                if !c.is_control() && state.name_buffer.chars().count() < MAX_NAME_LEN {
                    state.name_buffer.push(c);
                }
            }
            TextEdit::Backspace => {
                state.name_buffer.pop();
            }
        }
    }

    if input.cancel {
        state.reset_run(None);
    } else if input.confirm || input.click {
        let name = std::mem::take(&mut state.name_buffer);
        state.reset_run(Some(&name));
    }
}

fn play(state: &mut GameState, input: &TickInput) {
    if input.force_level_up {
        state.score = state.next_level_score();
    }

    // Fire, rate limited
    let ready = state
        .ms_since_last_shot()
        .is_none_or(|ms| ms >= SHOT_COOLDOWN_MS);
    if input.pointer_down && ready {
        let pos = state.player_pos() - Vec2::new(0.0, BULLET_SPAWN_OFFSET);
        state.bullets.push(Bullet::new(pos, state.level));
        state.last_shot_tick = Some(state.time_ticks);
    }

    // At most one level per tick
    if state.score >= state.next_level_score() {
        state.level += 1;
        let center = Vec2::new(state.width / 2.0, state.height / 2.0);
        state.spawn_explosion(center, palette::FLASH, EXPLOSION_LEVEL_UP);
        state.spawn_enemies(ENEMIES_PER_LEVEL_UP);
        log::info!("Level {} reached at score {}", state.level, state.score);
        state.events.push(GameEvent::LevelUp { level: state.level });
    }

    // Bullets: move, pair with enemies, then compact both lists
    for bullet in &mut state.bullets {
        bullet.update();
    }

    let hits = pair_hits(&state.bullets, &state.enemies);
    let mut dead_bullets = vec![false; state.bullets.len()];
    let mut dead_enemies = vec![false; state.enemies.len()];

    for hit in &hits {
        let enemy = state.enemies[hit.enemy].clone();
        state.spawn_explosion(enemy.pos, enemy.color(), enemy.explosion_size());
        state.score += enemy.points();
        state.events.push(GameEvent::EnemyDestroyed {
            golden: enemy.golden,
            points: enemy.points(),
        });
        dead_bullets[hit.bullet] = true;
        dead_enemies[hit.enemy] = true;
    }

    let mut dead = dead_bullets.into_iter();
    state
        .bullets
        .retain(|b| !dead.next().unwrap_or(false) && !b.off_screen());
    let mut dead = dead_enemies.into_iter();
    state.enemies.retain(|_| !dead.next().unwrap_or(false));
    state.spawn_enemies(hits.len());

    state.update_particles();

    // Enemies: move, then check the player
    state.update_enemies();
    if first_catch(state.player_pos(), &state.enemies).is_some() {
        game_over(state);
    }
}

fn game_over(state: &mut GameState) {
    let score = state.score;
    let rank = state.leaderboard.add(&state.player_name, score);
    log::info!(
        "Game over: '{}' scored {} at level {} (rank {:?})",
        state.player_name,
        score,
        state.level,
        rank
    );
    state.events.push(GameEvent::GameOver { score, rank });
    state.set_phase(GamePhase::GameOver);
}

/// How far the autopilot moves the pointer per tick
const AUTOPILOT_STEP: f32 = 12.0;

/// Drive the input from the current state (demo mode)
fn autopilot(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Menu => {
            let y = MenuButton::Play.baseline(state.height);
            input.pointer = Some(Vec2::new(state.width / 2.0, y));
            input.click = true;
        }
        GamePhase::Instructions => input.click = true,
        GamePhase::NameEntry => input.confirm = true,
        GamePhase::Playing => {
            let player = state.player_pos();

            // Closest enemy in the danger zone above the player
            let threat = state
                .enemies
                .iter()
                .filter(|e| e.pos.y > player.y - 160.0 && e.pos.y < player.y + 40.0)
                .min_by(|a, b| {
                    (a.pos.x - player.x)
                        .abs()
                        .total_cmp(&(b.pos.x - player.x).abs())
                })
                .filter(|e| (e.pos.x - player.x).abs() < e.size + 70.0);

            let target_x = match threat {
                Some(e) if e.pos.x > player.x => player.x - AUTOPILOT_STEP,
                Some(_) => player.x + AUTOPILOT_STEP,
                None => {
                    // Line up under the lowest enemy still out of reach
                    let aim = state
                        .enemies
                        .iter()
                        .filter(|e| e.pos.y > 0.0 && e.pos.y < player.y - 160.0)
                        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                        .map(|e| e.pos.x)
                        .unwrap_or(player.x);
                    player.x + (aim - player.x).clamp(-AUTOPILOT_STEP, AUTOPILOT_STEP)
                }
            };

            input.pointer = Some(Vec2::new(target_x.clamp(0.0, state.width), player.y));
            input.pointer_down = true;
        }
        GamePhase::GameOver => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, Particle};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn click_at(x: f32, y: f32) -> TickInput {
        TickInput {
            pointer: Some(Vec2::new(x, y)),
            click: true,
            ..Default::default()
        }
    }

    /// Playing state with no enemies and the pointer parked bottom right
    fn quiet_run(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.reset_run(Some("Ace"));
        state.enemies.clear();
        state.pointer = Vec2::new(state.width - 10.0, state.height - 10.0);
        state.drain_events();
        state
    }

    fn spark() -> Particle {
        Particle {
            pos: Vec2::new(50.0, 50.0),
            vel: Vec2::ZERO,
            color: palette::WHITE,
            life: 1.0,
        }
    }

    fn still_enemy(x: f32, y: f32, size: f32, golden: bool) -> Enemy {
        Enemy {
            pos: Vec2::new(x, y),
            size,
            vel: Vec2::ZERO,
            golden,
        }
    }

    #[test]
    fn test_menu_play_opens_name_entry() {
        let mut state = GameState::new(1);
        let h = state.height;
        tick(&mut state, &click_at(10.0, h / 2.0 - 20.0));
        assert_eq!(state.phase, GamePhase::NameEntry);
        assert_eq!(state.name_buffer, DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_menu_click_outside_buttons_does_nothing() {
        let mut state = GameState::new(1);
        tick(&mut state, &click_at(10.0, 10.0));
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_instructions_click_anywhere_returns_to_menu() {
        for (x, y) in [(0.0, 0.0), (640.0, 360.0), (5000.0, -20.0), (10.0, 380.0)] {
            let mut state = GameState::new(1);
            let h = state.height;
            tick(&mut state, &click_at(10.0, h / 2.0 + 40.0));
            assert_eq!(state.phase, GamePhase::Instructions);
            tick(&mut state, &click_at(x, y));
            assert_eq!(state.phase, GamePhase::Menu);
        }
    }

    #[test]
    fn test_no_click_keeps_phase() {
        let mut state = GameState::new(1);
        state.set_phase(GamePhase::Instructions);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Instructions);
    }

    #[test]
    fn test_name_entry_typing_and_confirm() {
        let mut state = GameState::new(1);
        state.begin_name_entry();
        state.name_buffer.clear();

        let input = TickInput {
            text_edits: vec![
                TextEdit::Insert('A'),
                TextEdit::Insert('x'),
                TextEdit::Backspace,
                TextEdit::Insert('c'),
                TextEdit::Insert('\n'),
                TextEdit::Insert('e'),
            ],
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.name_buffer, "Ace");
        assert_eq!(state.phase, GamePhase::NameEntry);

        tick(
            &mut state,
            &TickInput {
                confirm: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player_name, "Ace");
        assert_eq!(state.enemies.len(), INITIAL_ENEMIES);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(state
            .drain_events()
            .contains(&GameEvent::RunStarted { name: "Ace".into() }));
    }

    #[test]
    fn test_name_entry_length_limit() {
        let mut state = GameState::new(1);
        state.begin_name_entry();
        state.name_buffer.clear();
        let input = TickInput {
            text_edits: "abcdefghijklmnopqrstuvwxyz".chars().map(TextEdit::Insert).collect(),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.name_buffer.chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_name_entry_cancel_keeps_previous_name() {
        let mut state = GameState::new(1);
        state.player_name = "Old".into();
        state.begin_name_entry();
        let input = TickInput {
            text_edits: vec![TextEdit::Insert('Z')],
            cancel: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player_name, "Old");
    }

    #[test]
    fn test_name_entry_empty_confirm_keeps_previous_name() {
        let mut state = GameState::new(1);
        state.player_name = "Old".into();
        state.begin_name_entry();
        state.name_buffer.clear();
        tick(&mut state, &click_at(0.0, 0.0));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player_name, "Old");
    }

    #[test]
    fn test_level_up_keeps_score() {
        let mut state = quiet_run(2);
        state.score = state.level as u64 * POINTS_PER_LEVEL;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.level, 2);
        assert_eq!(state.score, POINTS_PER_LEVEL);
        assert_eq!(state.enemies.len(), ENEMIES_PER_LEVEL_UP);
        assert_eq!(state.particles.len(), EXPLOSION_LEVEL_UP);
        assert_eq!(state.drain_events(), vec![GameEvent::LevelUp { level: 2 }]);

        // Below the next threshold nothing happens
        tick(&mut state, &TickInput::default());
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_force_level_up_key() {
        let mut state = quiet_run(2);
        state.level = 3;
        let input = TickInput {
            force_level_up: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.score, 3 * POINTS_PER_LEVEL);
        assert_eq!(state.level, 4);
    }

    #[test]
    fn test_force_level_up_ignored_outside_play() {
        let mut state = GameState::new(2);
        let input = TickInput {
            force_level_up: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_bullet_kills_enemy() {
        for golden in [false, true] {
            let mut state = quiet_run(3);
            let speed = BULLET_BASE_SPEED + 1.0;
            state.enemies.push(still_enemy(100.0, 105.0, 15.0, golden));
            // Ends the tick at (100, 100)
            state.bullets.push(Bullet::new(Vec2::new(100.0, 100.0 + speed), 1));

            tick(&mut state, &TickInput::default());

            let points = if golden { GOLDEN_POINTS } else { ENEMY_POINTS };
            assert_eq!(state.score, points);
            assert!(state.bullets.is_empty());
            assert_eq!(state.enemies.len(), 1);
            assert_eq!(state.enemies[0].pos.y, ENEMY_SPAWN_Y + state.enemies[0].vel.y);
            let burst = if golden { EXPLOSION_GOLDEN } else { EXPLOSION_NORMAL };
            assert_eq!(state.particles.len(), burst);
            assert_eq!(
                state.drain_events(),
                vec![GameEvent::EnemyDestroyed { golden, points }]
            );
        }
    }

    #[test]
    fn test_bullet_kills_one_enemy_per_tick() {
        let mut state = quiet_run(3);
        state.enemies.push(still_enemy(100.0, 300.0, 20.0, false));
        state.enemies.push(still_enemy(104.0, 300.0, 20.0, false));
        state.bullets.push(Bullet::new(Vec2::new(102.0, 309.0), 1));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, ENEMY_POINTS);
        assert!(state.bullets.is_empty());
        // Survivor plus one replacement
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.enemies[0].pos, Vec2::new(104.0, 300.0));
    }

    #[test]
    fn test_fire_rate_limited() {
        let mut state = quiet_run(4);
        let input = TickInput {
            pointer_down: true,
            ..Default::default()
        };
        for _ in 0..20 {
            tick(&mut state, &input);
        }
        // Ticks 1, 10 and 19 at 60 Hz (150 ms apart)
        assert_eq!(state.bullets.len(), 3);
        let player = state.player_pos();
        assert!(state.bullets.iter().all(|b| b.pos.x == player.x));
    }

    #[test]
    fn test_no_fire_without_pointer_down() {
        let mut state = quiet_run(4);
        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_offscreen_bullets_removed() {
        let mut state = quiet_run(4);
        state.bullets.push(Bullet::new(Vec2::new(50.0, 5.0), 1));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bullets.len(), 1);
        for _ in 0..3 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_enemy_catches_player() {
        let mut state = quiet_run(5);
        state.score = 700;
        let player = state.player_pos();
        state.enemies.push(still_enemy(player.x + 10.0, player.y, 20.0, false));
        state.enemies.push(still_enemy(player.x - 10.0, player.y, 20.0, false));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.leaderboard.len(), 1);
        assert_eq!(state.leaderboard.entries()[0].name, "Ace");
        assert_eq!(state.leaderboard.entries()[0].score, 700);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver {
                score: 700,
                rank: Some(1)
            }]
        );

        // Further ticks do not record again
        tick(&mut state, &TickInput::default());
        assert_eq!(state.leaderboard.len(), 1);
    }

    #[test]
    fn test_particles_decay_on_catch_tick() {
        let mut state = quiet_run(5);
        let player = state.player_pos();
        state.enemies.push(still_enemy(player.x, player.y, 20.0, false));
        state.particles.push(spark());

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!((state.particles[0].life - (1.0 - PARTICLE_DECAY)).abs() < 1e-6);
    }

    #[test]
    fn test_game_over_freezes_field_but_not_particles() {
        let mut state = quiet_run(5);
        let player = state.player_pos();
        state.enemies.push(Enemy {
            vel: Vec2::new(1.0, 2.0),
            ..still_enemy(player.x, player.y, 20.0, false)
        });
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let enemy_pos = state.enemies[0].pos;
        state.particles = vec![spark()];
        let held = TickInput {
            pointer_down: true,
            ..Default::default()
        };
        tick(&mut state, &held);

        assert!((state.particles[0].life - (1.0 - PARTICLE_DECAY)).abs() < 1e-6);
        assert_eq!(state.enemies[0].pos, enemy_pos);
        assert!(state.bullets.is_empty());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_fixed_step_runs_whole_ticks() {
        let mut clock = FixedStep::default();
        assert_eq!(clock.advance(SIM_DT * 0.5), 0);
        assert_eq!(clock.advance(SIM_DT * 0.6), 1);
        assert_eq!(clock.advance(SIM_DT * 2.0), 2);
    }

    #[test]
    fn test_fixed_step_drops_backlog_after_slow_frames() {
        let mut clock = FixedStep::default();
        for _ in 0..300 {
            assert_eq!(clock.advance(0.1), MAX_SUBSTEPS);
            assert!(clock.backlog() < SIM_DT);
        }
        // Back at 60 fps: no catch-up burst
        for _ in 0..10 {
            assert!(clock.advance(SIM_DT) <= 2);
        }
    }

    #[test]
    fn test_fixed_step_ignores_negative_dt() {
        let mut clock = FixedStep::default();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.backlog(), 0.0);
    }

    #[test]
    fn test_game_over_click_returns_to_menu() {
        let mut state = GameState::new(1);
        state.set_phase(GamePhase::GameOver);
        tick(&mut state, &click_at(1.0, 1.0));
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_viewport_resize() {
        let mut state = GameState::new(1);
        let input = TickInput {
            viewport: Some(Vec2::new(800.0, 600.0)),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!((state.width, state.height), (800.0, 600.0));
        assert_eq!(state.player_pos().y, 600.0 - PLAYER_BOTTOM_OFFSET);
    }

    #[test]
    fn test_clear_one_shots_keeps_held_state() {
        let mut input = TickInput {
            pointer_down: true,
            click: true,
            confirm: true,
            idle_mode: true,
            text_edits: vec![TextEdit::Backspace],
            ..Default::default()
        };
        input.clear_one_shots();
        assert!(input.pointer_down);
        assert!(input.idle_mode);
        assert!(!input.click);
        assert!(!input.confirm);
        assert!(input.text_edits.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for _ in 0..600 {
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.enemies, state2.enemies);
        assert_eq!(state1.bullets, state2.bullets);
    }

    #[test]
    fn test_idle_mode_starts_and_plays() {
        let mut state = GameState::new(42);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::NameEntry);
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        tick(&mut state, &input);
        assert!(!state.bullets.is_empty());
    }

    proptest! {
        #[test]
        fn prop_enemy_moves_by_velocity(
            x in 0.0f32..800.0,
            y in -50.0f32..590.0,
            vx in -8.0f32..8.0,
            vy in 1.0f32..8.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(1);
            let (w, h) = (800.0, 600.0);
            let mut e = still_enemy(x, y, 20.0, false);
            e.vel = Vec2::new(vx, vy);
            let before = e.clone();
            e.update(&mut rng, w, h);

            let moved = before.pos + before.vel;
            if moved.y <= h {
                prop_assert_eq!(e.pos, moved);
            }
            let outside = moved.x > w || moved.x < 0.0;
            if outside {
                prop_assert_eq!(e.vel.x, -before.vel.x);
            } else {
                prop_assert_eq!(e.vel.x, before.vel.x);
            }
            prop_assert_eq!(e.vel.y, before.vel.y);
        }
    }
}
