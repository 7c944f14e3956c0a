//! Collision detection and damage
//!
//! The three passes run once per tick in a fixed order (hero vs enemies,
//! enemies vs bullets, hero vs supplies); `tick` applies their outcomes.
//! Planes with zero health are never collision sources.

use super::entity::{Bullet, Enemy, Hero, SupplyKind, Supply};
use super::geometry::Rect;
use super::mask::{MaskAtlas, MaskKey};

/// An enemy destroyed by bullets this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kill {
    /// Index into the enemy list
    pub index: usize,
    pub value: u64,
}

/// Hero against every live enemy. Any overlap destroys the hero and every
/// overlapping enemy outright. Skipped while the hero is invincible or
/// already destroyed. Returns how many enemies were destroyed.
pub fn hero_vs_enemies(hero: &mut Hero, enemies: &mut [Enemy], masks: &MaskAtlas) -> usize {
    if hero.kind.invincible || !hero.is_alive() {
        return 0;
    }

    let mut crashed = 0;
    for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
        if masks.collide((MaskKey::Hero, &hero.rect), (enemy.mask_key(), &enemy.rect)) {
            enemy.destroy();
            crashed += 1;
        }
    }
    if crashed > 0 {
        hero.destroy();
    }
    crashed
}

/// Enemies against hero bullets.
///
/// Each live enemy consumes its overlapping bullets in creation order until
/// it is destroyed or runs out of them. A consumed bullet is removed and can
/// never count against a second enemy. Bullets overlapping only destroyed
/// enemies stay in flight.
pub fn enemies_vs_bullets(
    enemies: &mut [Enemy],
    bullets: &mut Vec<Bullet>,
    masks: &MaskAtlas,
) -> Vec<Kill> {
    let mut spent = vec![false; bullets.len()];
    let mut kills = Vec::new();

    for (index, enemy) in enemies.iter_mut().enumerate() {
        if !enemy.is_alive() {
            continue;
        }
        for (bullet, used) in bullets.iter().zip(spent.iter_mut()) {
            if *used {
                continue;
            }
            if !masks.collide((enemy.mask_key(), &enemy.rect), (bullet.mask_key(), &bullet.rect)) {
                continue;
            }
            *used = true;
            enemy.damage(bullet.damage);
            if !enemy.is_alive() {
                kills.push(Kill {
                    index,
                    value: enemy.value,
                });
                break;
            }
        }
    }

    let mut used = spent.into_iter();
    bullets.retain(|_| !used.next().unwrap_or(false));
    kills
}

/// Hero against supplies: the first overlapping supply is parked and its
/// kind returned.
pub fn hero_vs_supplies(
    hero: &Hero,
    supplies: &mut [Supply],
    masks: &MaskAtlas,
    viewport: &Rect,
) -> Option<SupplyKind> {
    // A hero in its destroy sequence collects nothing
    if !hero.is_alive() {
        return None;
    }
    let supply = supplies
        .iter_mut()
        .find(|s| masks.collide((MaskKey::Hero, &hero.rect), (s.mask_key(), &s.rect)))?;
    supply.park(viewport);
    Some(supply.kind)
}
