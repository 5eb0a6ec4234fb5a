//! Scene generation: game state to draw commands

use glam::Vec2;

use super::command::{DrawCommand, TextAlign};
use crate::consts::*;
use crate::palette;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, MenuButton};

const TITLE_FONT: &str = "bold 50px sans-serif";
const HEADING_FONT: &str = "bold 35px sans-serif";
const BUTTON_FONT: &str = "25px sans-serif";
const BODY_FONT: &str = "20px sans-serif";
const MONO_FONT: &str = "18px monospace";
const HUD_FONT: &str = "bold 20px monospace";
const ENTRY_FONT: &str = "bold 28px monospace";

/// Shadow blur for golden enemies
const GOLDEN_GLOW: f32 = 15.0;

/// Build the full frame for the current phase
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<DrawCommand> {
    let mut cmds = vec![DrawCommand::Clear {
        color: palette::BACKGROUND,
        size: Vec2::new(state.width, state.height),
    }];

    match state.phase {
        GamePhase::Menu => menu(state, &mut cmds),
        GamePhase::Instructions => instructions(state, &mut cmds),
        GamePhase::NameEntry => name_entry(state, &mut cmds),
        GamePhase::Playing => playing(state, settings, &mut cmds),
        GamePhase::GameOver => game_over(state, settings, &mut cmds),
    }

    cmds
}

fn menu(state: &GameState, cmds: &mut Vec<DrawCommand>) {
    let cx = state.width / 2.0;
    let mid = state.height / 2.0;

    cmds.push(DrawCommand::text(
        "SPACE ESCAPE",
        Vec2::new(cx, 100.0),
        TITLE_FONT,
        TextAlign::Center,
        palette::CYAN,
    ));

    for button in MenuButton::ALL {
        let hovered = button.contains(state.pointer.y, state.height);
        cmds.push(DrawCommand::text(
            button.label(),
            Vec2::new(cx, button.baseline(state.height)),
            BUTTON_FONT,
            TextAlign::Center,
            if hovered { palette::WHITE } else { palette::CYAN },
        ));
    }

    cmds.push(DrawCommand::text(
        "--- TOP 5 RECORDS ---",
        Vec2::new(cx, mid + 130.0),
        HUD_FONT,
        TextAlign::Center,
        palette::GOLD,
    ));
    for (i, entry) in state.leaderboard.entries().iter().enumerate() {
        let y = mid + 170.0 + i as f32 * 25.0;
        let color = if i == 0 { palette::GOLD } else { palette::WHITE };
        cmds.push(DrawCommand::text(
            format!("{}. {}", i + 1, entry.name.to_uppercase()),
            Vec2::new(cx - 140.0, y),
            HUD_FONT,
            TextAlign::Left,
            color,
        ));
        cmds.push(DrawCommand::text(
            entry.score.to_string(),
            Vec2::new(cx + 140.0, y),
            HUD_FONT,
            TextAlign::Right,
            color,
        ));
    }
}

fn instructions(state: &GameState, cmds: &mut Vec<DrawCommand>) {
    let cx = state.width / 2.0;
    let mid = state.height / 2.0;
    let lines: [(&str, f32, &'static str, &'static str); 5] = [
        ("FLIGHT MANUAL", -100.0, HEADING_FONT, palette::CYAN),
        ("- MOVE THE MOUSE TO DODGE THE ENEMIES", -40.0, MONO_FONT, palette::WHITE),
        ("- HOLD LEFT CLICK TO FIRE THE LASER", -10.0, MONO_FONT, palette::WHITE),
        ("- GOLDEN ENEMIES = TRIPLE POINTS (300)!", 30.0, MONO_FONT, palette::GOLD),
        ("CLICK TO RETURN TO THE MENU", 100.0, MONO_FONT, palette::ENEMY),
    ];
    for (text, dy, font, color) in lines {
        cmds.push(DrawCommand::text(
            text,
            Vec2::new(cx, mid + dy),
            font,
            TextAlign::Center,
            color,
        ));
    }
}

fn name_entry(state: &GameState, cmds: &mut Vec<DrawCommand>) {
    let cx = state.width / 2.0;
    let mid = state.height / 2.0;

    cmds.push(DrawCommand::text(
        "PILOT IDENTIFICATION",
        Vec2::new(cx, mid - 60.0),
        HEADING_FONT,
        TextAlign::Center,
        palette::CYAN,
    ));
    cmds.push(DrawCommand::text(
        format!("{}_", state.name_buffer),
        Vec2::new(cx, mid),
        ENTRY_FONT,
        TextAlign::Center,
        palette::WHITE,
    ));
    cmds.push(DrawCommand::text(
        format!(
            "ENTER TO LAUNCH / ESC TO KEEP {}",
            state.player_name.to_uppercase()
        ),
        Vec2::new(cx, mid + 60.0),
        MONO_FONT,
        TextAlign::Center,
        palette::GOLD,
    ));
}

fn playing(state: &GameState, settings: &Settings, cmds: &mut Vec<DrawCommand>) {
    for bullet in &state.bullets {
        cmds.push(DrawCommand::Rect {
            pos: Vec2::new(bullet.pos.x - BULLET_WIDTH / 2.0, bullet.pos.y),
            size: Vec2::new(BULLET_WIDTH, BULLET_LENGTH),
            color: palette::CYAN,
            alpha: 1.0,
        });
    }

    for enemy in &state.enemies {
        let glow = if enemy.golden && settings.glow() {
            GOLDEN_GLOW
        } else {
            0.0
        };
        cmds.push(DrawCommand::Triangle {
            points: enemy.vertices(),
            color: enemy.color(),
            glow,
        });
    }

    particles(state, cmds);

    // Astronaut: helmet plus visor
    let player = state.player_pos();
    cmds.push(DrawCommand::Circle {
        center: player,
        radius: PLAYER_BODY_RADIUS,
        color: palette::PLAYER_BODY,
    });
    cmds.push(DrawCommand::Ellipse {
        center: player + Vec2::new(0.0, -5.0),
        radii: Vec2::new(10.0, 6.0),
        color: palette::PLAYER_VISOR,
    });

    cmds.push(DrawCommand::text(
        format!("PILOT: {}", state.player_name),
        Vec2::new(20.0, 40.0),
        HUD_FONT,
        TextAlign::Left,
        palette::WHITE,
    ));
    cmds.push(DrawCommand::text(
        format!("SCORE: {} | LVL: {}", state.score, state.level),
        Vec2::new(20.0, 70.0),
        HUD_FONT,
        TextAlign::Left,
        palette::WHITE,
    ));
}

fn game_over(state: &GameState, settings: &Settings, cmds: &mut Vec<DrawCommand>) {
    particles(state, cmds);

    let cx = state.width / 2.0;
    let mid = state.height / 2.0;

    cmds.push(DrawCommand::text(
        "MISSION FAILED",
        Vec2::new(cx, mid - 20.0),
        TITLE_FONT,
        TextAlign::Center,
        palette::ENEMY,
    ));
    cmds.push(DrawCommand::text(
        format!("FINAL SCORE: {}", state.score),
        Vec2::new(cx, mid + 30.0),
        BODY_FONT,
        TextAlign::Center,
        palette::WHITE,
    ));
    if settings.export_on_game_over && !state.leaderboard.is_empty() {
        cmds.push(DrawCommand::text(
            "RECORD SAVED TO DOWNLOADS",
            Vec2::new(cx, mid + 70.0),
            BODY_FONT,
            TextAlign::Center,
            palette::CYAN,
        ));
    }
    cmds.push(DrawCommand::text(
        "CLICK TO PLAY AGAIN",
        Vec2::new(cx, mid + 120.0),
        BODY_FONT,
        TextAlign::Center,
        palette::WHITE,
    ));
}

fn particles(state: &GameState, cmds: &mut Vec<DrawCommand>) {
    for p in state.particles.iter().filter(|p| p.alive()) {
        cmds.push(DrawCommand::Rect {
            pos: p.pos,
            size: Vec2::splat(PARTICLE_SIZE),
            color: p.color,
            alpha: p.life,
        });
    }
}
