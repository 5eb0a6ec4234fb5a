//! Circle-distance collision tests and bullet/enemy pairing
//!
//! Everything is treated as a point against a circle around the enemy centre;
//! the enemy's size doubles as its radius.

use glam::Vec2;

use super::state::{Bullet, Enemy};
use crate::consts::{BULLET_HIT_RADIUS, PLAYER_HIT_RADIUS};

/// True when `point` lies strictly inside `radius` of `center`
#[inline]
pub fn within(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) < radius
}

/// Bullet tip against an enemy
pub fn bullet_hits_enemy(bullet: &Bullet, enemy: &Enemy) -> bool {
    within(bullet.pos, enemy.pos, enemy.size + BULLET_HIT_RADIUS)
}

/// Player avatar against an enemy
pub fn enemy_catches_player(player: Vec2, enemy: &Enemy) -> bool {
    within(player, enemy.pos, enemy.size + PLAYER_HIT_RADIUS)
}

/// A bullet/enemy pair that collided this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub bullet: usize,
    pub enemy: usize,
}

/// Pair bullets with the enemies they hit.
///
/// Bullets are visited in order and each claims the first enemy (in list
/// order) it overlaps that no earlier bullet claimed. A bullet kills at most
/// one enemy and an enemy absorbs at most one bullet, so indices in the
/// result are unique on both sides.
pub fn pair_hits(bullets: &[Bullet], enemies: &[Enemy]) -> Vec<Hit> {
    let mut claimed = vec![false; enemies.len()];
    let mut hits = Vec::new();

    for (bi, bullet) in bullets.iter().enumerate() {
        let target = enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !claimed[*ei] && bullet_hits_enemy(bullet, enemy))
            .map(|(ei, _)| ei);

        if let Some(ei) = target {
            claimed[ei] = true;
            hits.push(Hit {
                bullet: bi,
                enemy: ei,
            });
        }
    }

    hits
}

/// Index of the first enemy touching the player, if any
pub fn first_catch(player: Vec2, enemies: &[Enemy]) -> Option<usize> {
    enemies.iter().position(|e| enemy_catches_player(player, e))
}
