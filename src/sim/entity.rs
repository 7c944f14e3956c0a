//! Game entities
//!
//! Planes share one record (`Plane<K>`) and carry their kind-specific data in
//! `K`. Enemies and supplies are never freed: enemies `respawn` and supplies
//! `park`. Bullets are the only entities that are truly removed.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::mask::MaskKey;
use super::phase::{Animation, FrameSet, PhaseStep};
use crate::audio::SoundEffect;
use crate::settings::{EnemyTuning, Settings};

/// Enemy size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyClass {
    Small,
    Medium,
    Large,
}

impl EnemyClass {
    pub const ALL: [EnemyClass; 3] = [EnemyClass::Small, EnemyClass::Medium, EnemyClass::Large];

    pub fn index(self) -> usize {
        match self {
            EnemyClass::Small => 0,
            EnemyClass::Medium => 1,
            EnemyClass::Large => 2,
        }
    }
}

/// Hero bullet strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BulletTier {
    #[default]
    Normal,
    /// Twin bullets per row
    Enhanced,
}

impl BulletTier {
    pub fn index(self) -> usize {
        match self {
            BulletTier::Normal => 0,
            BulletTier::Enhanced => 1,
        }
    }
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupplyKind {
    Bomb,
    BulletEnhance,
}

impl SupplyKind {
    pub fn index(self) -> usize {
        match self {
            SupplyKind::Bomb => 0,
            SupplyKind::BulletEnhance => 1,
        }
    }

    /// Cue played when the hero picks it up
    pub fn pickup_sound(self) -> SoundEffect {
        match self {
            SupplyKind::Bomb => SoundEffect::GetBomb,
            SupplyKind::BulletEnhance => SoundEffect::GetBullet,
        }
    }
}

/// Shared plane record
#[derive(Debug, Clone)]
pub struct Plane<K> {
    pub rect: Rect,
    /// Pixels per tick
    pub speed: i32,
    pub hp: i32,
    pub max_hp: i32,
    /// Score awarded when destroyed
    pub value: u64,
    pub anim: Animation,
    pub kind: K,
}

impl<K> Plane<K> {
    fn with_kind(size: IVec2, hp: i32, speed: i32, value: u64, frames: FrameSet, kind: K) -> Self {
        Self {
            rect: Rect::sized(size),
            speed,
            hp,
            max_hp: hp,
            value,
            anim: Animation::new(frames),
            kind,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Subtract damage, never going below zero
    pub fn damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }

    pub fn destroy(&mut self) {
        self.hp = 0;
    }

    /// Advance the animation one step
    pub fn animate(&mut self) -> PhaseStep {
        self.anim.advance(self.hp, self.max_hp)
    }

    /// Full health, first normal frame
    fn restore(&mut self) {
        self.hp = self.max_hp;
        self.anim.reset();
    }
}

/// Hero-specific state
#[derive(Debug, Clone, Default)]
pub struct HeroState {
    pub invincible: bool,
    pub bomb_count: u32,
    pub bullet_tier: BulletTier,
    /// Bullets in flight, in creation order
    pub bullets: Vec<Bullet>,
    next_bullet_id: u32,
}

/// Enemy-specific state
#[derive(Debug, Clone)]
pub struct EnemyState {
    pub class: EnemyClass,
    pub max_speed: i32,
}

pub type Hero = Plane<HeroState>;
pub type Enemy = Plane<EnemyState>;

impl Hero {
    pub fn new(settings: &Settings) -> Self {
        let tuning = &settings.hero;
        let frames = FrameSet {
            normal: tuning.normal_frames,
            destroy: tuning.destroy_frames,
        };
        let state = HeroState {
            bomb_count: tuning.bomb_count,
            ..Default::default()
        };
        let mut hero = Self::with_kind(tuning.size, tuning.hp, tuning.speed, 0, frames, state);
        hero.rect.set_midbottom(settings.hero_spawn());
        hero
    }

    pub fn death_sound(&self) -> SoundEffect {
        SoundEffect::HeroDown
    }

    /// Move by `sign(axis) * speed`, keeping every edge inside the viewport
    pub fn steer(&mut self, axis: IVec2, viewport: &Rect) {
        if !self.is_alive() {
            return;
        }
        self.rect.pos += axis.signum() * self.speed;
        self.rect.clamp_inside(viewport);
    }

    /// Reset after the destroy sequence: healed, invincible, default loadout.
    /// The caller raises hero-dead and arms the invincibility timer.
    pub fn reset_after_death(&mut self, settings: &Settings) {
        self.restore();
        self.kind.invincible = true;
        self.kind.bomb_count = settings.hero.bomb_count;
        self.kind.bullet_tier = BulletTier::Normal;
    }

    /// Reset for a new session
    pub fn revive(&mut self, settings: &Settings) {
        self.restore();
        self.kind.invincible = false;
        self.kind.bomb_count = settings.hero.bomb_count;
        self.kind.bullet_tier = BulletTier::Normal;
        self.kind.bullets.clear();
        self.rect.set_midbottom(settings.hero_spawn());
    }

    /// Fire one volley; returns how many bullets were emitted
    pub fn fire(&mut self, settings: &Settings) -> usize {
        let tuning = &settings.bullets;
        let tier = self.kind.bullet_tier;
        let center = self.rect.center_x();
        let offsets: &[i32] = match tier {
            BulletTier::Normal => &[0],
            BulletTier::Enhanced => &[-tuning.enhanced_spread, tuning.enhanced_spread],
        };

        let mut emitted = 0;
        for row in 0..tuning.volley_rows as i32 {
            let y = self.rect.top() - row * tuning.row_spacing;
            for &dx in offsets {
                let id = self.kind.next_bullet_id;
                self.kind.next_bullet_id = self.kind.next_bullet_id.wrapping_add(1);
                let mut bullet = Bullet {
                    id,
                    rect: Rect::sized(tuning.size),
                    speed: tuning.speed,
                    damage: tuning.damage,
                    tier,
                };
                bullet.rect.set_midbottom(IVec2::new(center + dx, y));
                self.kind.bullets.push(bullet);
                emitted += 1;
            }
        }
        emitted
    }

    /// Detonate a bomb: every live enemy that has entered the viewport
    /// (`rect.bottom > 0`) is destroyed. Returns (score, destroyed count);
    /// (0, 0) when the hero is dead or out of bombs.
    pub fn blowup(&mut self, enemies: &mut [Enemy]) -> (u64, usize) {
        if self.kind.bomb_count == 0 || !self.is_alive() {
            return (0, 0);
        }
        self.kind.bomb_count -= 1;

        let mut score = 0;
        let mut count = 0;
        for enemy in enemies.iter_mut() {
            if enemy.is_alive() && enemy.rect.bottom() > 0 {
                score += enemy.value;
                count += 1;
                enemy.destroy();
            }
        }
        log::debug!("Bomb destroyed {count} enemies for {score} points");
        (score, count)
    }

    /// Move bullets and drop the ones that left through the top
    pub fn step_bullets(&mut self) {
        for bullet in &mut self.kind.bullets {
            bullet.step();
        }
        self.kind.bullets.retain(|b| b.rect.bottom() >= 0);
    }
}

impl Enemy {
    /// Create an enemy at a random spawn point above the viewport
    pub fn spawn<R: Rng + ?Sized>(
        class: EnemyClass,
        max_speed: i32,
        settings: &Settings,
        rng: &mut R,
    ) -> Self {
        let tuning: &EnemyTuning = settings.enemies.get(class);
        let frames = FrameSet {
            normal: tuning.normal_frames,
            destroy: tuning.destroy_frames,
        };
        let state = EnemyState { class, max_speed };
        let mut enemy = Self::with_kind(tuning.size, tuning.hp, 1, tuning.value, frames, state);
        enemy.respawn(&settings.viewport_rect(), rng);
        enemy
    }

    pub fn class(&self) -> EnemyClass {
        self.kind.class
    }

    pub fn death_sound(&self) -> SoundEffect {
        SoundEffect::EnemyDown(self.kind.class)
    }

    /// Recycle: full health, random position above the viewport, random
    /// speed in `[1, max_speed]`
    pub fn respawn<R: Rng + ?Sized>(&mut self, viewport: &Rect, rng: &mut R) {
        self.restore();
        let max_x = (viewport.width() - self.rect.width()).max(0);
        let max_y = (viewport.height() - self.rect.height()).max(0);
        self.rect.pos = IVec2::new(
            rng.random_range(0..=max_x),
            rng.random_range(0..=max_y) - viewport.height(),
        );
        self.speed = rng.random_range(1..=self.kind.max_speed.max(1));
    }

    /// Fall one tick; recycle once past the bottom edge
    pub fn step<R: Rng + ?Sized>(&mut self, viewport: &Rect, rng: &mut R) {
        if self.is_alive() {
            self.rect.pos.y += self.speed;
        }
        if self.rect.y() >= viewport.bottom() {
            self.respawn(viewport, rng);
        }
    }

    pub fn mask_key(&self) -> MaskKey {
        MaskKey::Enemy(self.kind.class)
    }
}

/// A hero bullet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bullet {
    pub id: u32,
    pub rect: Rect,
    pub speed: i32,
    pub damage: i32,
    pub tier: BulletTier,
}

impl Bullet {
    pub fn step(&mut self) {
        self.rect.pos.y += self.speed;
    }

    pub fn mask_key(&self) -> MaskKey {
        MaskKey::Bullet(self.tier)
    }
}

/// A power-up, parked below the viewport until thrown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supply {
    pub kind: SupplyKind,
    pub rect: Rect,
    pub speed: i32,
}

impl Supply {
    pub fn new(kind: SupplyKind, settings: &Settings) -> Self {
        let size = match kind {
            SupplyKind::Bomb => settings.supply.bomb_size,
            SupplyKind::BulletEnhance => settings.supply.enhance_size,
        };
        let mut supply = Self {
            kind,
            rect: Rect::sized(size),
            speed: settings.supply.speed,
        };
        supply.park(&settings.viewport_rect());
        supply
    }

    pub fn is_parked(&self, viewport: &Rect) -> bool {
        self.rect.y() >= viewport.bottom()
    }

    /// Move below the viewport, out of play
    pub fn park(&mut self, viewport: &Rect) {
        self.rect.pos.y = viewport.bottom();
    }

    /// Drop from just above the top edge at a random column
    pub fn throw<R: Rng + ?Sized>(&mut self, viewport: &Rect, rng: &mut R) {
        let max_x = (viewport.width() - self.rect.width()).max(0);
        self.rect.pos.x = rng.random_range(0..=max_x);
        self.rect.set_bottom(viewport.top());
    }

    /// Fall one tick unless parked
    pub fn step(&mut self, viewport: &Rect) {
        if self.is_parked(viewport) {
            return;
        }
        self.rect.pos.y += self.speed;
    }

    pub fn mask_key(&self) -> MaskKey {
        MaskKey::Supply(self.kind)
    }
}

/// One of the two scrolling background tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Background {
    pub rect: Rect,
    pub speed: i32,
}

impl Background {
    /// The second tile starts directly above the first
    pub fn new(size: IVec2, stacked_above: bool) -> Self {
        let mut rect = Rect::sized(size);
        if stacked_above {
            rect.pos.y = -size.y;
        }
        Self { rect, speed: 1 }
    }

    pub fn step(&mut self) {
        self.rect.pos.y += self.speed;
        if self.rect.y() >= self.rect.height() {
            self.rect.pos.y = -self.rect.height();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_enemy_spawns_above_viewport() {
        let settings = Settings::default();
        let mut rng = rng();
        for class in EnemyClass::ALL {
            for _ in 0..50 {
                let enemy = Enemy::spawn(class, 3, &settings, &mut rng);
                assert!(enemy.rect.top() < 0);
                assert!(enemy.rect.left() >= 0);
                assert!(enemy.rect.right() <= settings.viewport.x);
                assert!((1..=3).contains(&enemy.speed));
                assert_eq!(enemy.hp, enemy.max_hp);
            }
        }
    }

    #[test]
    fn test_blowup_destroys_visible_enemies() {
        let settings = Settings::default();
        let mut rng = rng();
        let classes = [
            EnemyClass::Small,
            EnemyClass::Small,
            EnemyClass::Small,
            EnemyClass::Medium,
            EnemyClass::Large,
            EnemyClass::Small,
            EnemyClass::Small,
        ];
        let mut enemies: Vec<Enemy> = classes
            .iter()
            .map(|&class| Enemy::spawn(class, 1, &settings, &mut rng))
            .collect();
        for (i, enemy) in enemies.iter_mut().enumerate() {
            enemy.rect.pos = if i < 5 {
                IVec2::new(i as i32 * 60, 120)
            } else {
                // Bottom edge exactly at the top of the viewport
                IVec2::new(i as i32 * 60, -enemy.rect.size.y)
            };
        }
        let mut hero = Hero::new(&settings);
        hero.kind.bomb_count = 2;

        assert_eq!(hero.blowup(&mut enemies), (24_000, 5));
        assert_eq!(hero.kind.bomb_count, 1);
        assert!(enemies[..5].iter().all(|e| !e.is_alive()));
        assert!(enemies[5..].iter().all(|e| e.is_alive()));
    }

    #[test]
    fn test_enemy_recycles_at_bottom() {
        let settings = Settings::default();
        let viewport = settings.viewport_rect();
        let mut rng = rng();
        let mut enemy = Enemy::spawn(EnemyClass::Small, 3, &settings, &mut rng);
        enemy.rect.pos.y = viewport.bottom() - 1;
        enemy.speed = 2;
        enemy.step(&viewport, &mut rng);
        assert!(enemy.rect.top() < 0);
        assert!(enemy.is_alive());
    }

    #[test]
    fn test_dead_enemy_does_not_move() {
        let settings = Settings::default();
        let viewport = settings.viewport_rect();
        let mut rng = rng();
        let mut enemy = Enemy::spawn(EnemyClass::Medium, 1, &settings, &mut rng);
        enemy.rect.pos.y = 100;
        enemy.destroy();
        enemy.step(&viewport, &mut rng);
        assert_eq!(enemy.rect.y(), 100);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let settings = Settings::default();
        let mut enemy = Enemy::spawn(EnemyClass::Small, 1, &settings, &mut rng());
        enemy.damage(5);
        assert_eq!(enemy.hp, 0);
    }

    #[test]
    fn test_hero_steer_clamps_edges() {
        let settings = Settings::default();
        let viewport = settings.viewport_rect();
        let mut hero = Hero::new(&settings);
        for _ in 0..200 {
            hero.steer(IVec2::new(-1, 1), &viewport);
        }
        assert_eq!(hero.rect.left(), 0);
        assert_eq!(hero.rect.bottom(), viewport.bottom());

        for _ in 0..200 {
            hero.steer(IVec2::new(1, -1), &viewport);
        }
        assert_eq!(hero.rect.right(), viewport.right());
        assert_eq!(hero.rect.top(), 0);
    }

    #[test]
    fn test_dead_hero_cannot_steer() {
        let settings = Settings::default();
        let mut hero = Hero::new(&settings);
        let before = hero.rect;
        hero.destroy();
        hero.steer(IVec2::new(1, 0), &settings.viewport_rect());
        assert_eq!(hero.rect, before);
    }

    #[test]
    fn test_fire_by_tier() {
        let settings = Settings::default();
        let mut hero = Hero::new(&settings);
        assert_eq!(hero.fire(&settings), 3);
        let first = &hero.kind.bullets[0];
        assert_eq!(first.rect.bottom(), hero.rect.top());
        assert_eq!(first.rect.center_x(), hero.rect.center_x());
        assert_eq!(hero.kind.bullets[1].rect.bottom(), hero.rect.top() - 15);

        hero.kind.bullet_tier = BulletTier::Enhanced;
        assert_eq!(hero.fire(&settings), 6);
        assert_eq!(hero.kind.bullets.len(), 9);
        assert!(hero.kind.bullets[3..].iter().all(|b| b.tier == BulletTier::Enhanced));

        let ids: Vec<u32> = hero.kind.bullets.iter().map(|b| b.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_bullets_leave_through_top() {
        let settings = Settings::default();
        let mut hero = Hero::new(&settings);
        hero.fire(&settings);
        for _ in 0..100 {
            hero.step_bullets();
        }
        assert!(hero.kind.bullets.is_empty());
    }

    #[test]
    fn test_reset_after_death_restores_loadout() {
        let settings = Settings::default();
        let mut hero = Hero::new(&settings);
        hero.kind.bomb_count = 0;
        hero.kind.bullet_tier = BulletTier::Enhanced;
        hero.destroy();
        hero.reset_after_death(&settings);
        assert_eq!(hero.hp, hero.max_hp);
        assert!(hero.kind.invincible);
        assert_eq!(hero.kind.bomb_count, 3);
        assert_eq!(hero.kind.bullet_tier, BulletTier::Normal);
    }

    #[test]
    fn test_supply_throw_and_park() {
        let settings = Settings::default();
        let viewport = settings.viewport_rect();
        let mut supply = Supply::new(SupplyKind::Bomb, &settings);
        assert!(supply.is_parked(&viewport));
        supply.step(&viewport);
        assert!(supply.is_parked(&viewport));

        supply.throw(&viewport, &mut rng());
        assert_eq!(supply.rect.bottom(), 0);
        assert!(!supply.is_parked(&viewport));

        let mut ticks = 0;
        while !supply.is_parked(&viewport) {
            supply.step(&viewport);
            ticks += 1;
            assert!(ticks < 1000);
        }
        let parked_at = supply.rect.y();
        supply.step(&viewport);
        assert_eq!(supply.rect.y(), parked_at);
    }

    #[test]
    fn test_background_wraps() {
        let mut bg = Background::new(IVec2::new(480, 700), false);
        bg.rect.pos.y = 699;
        bg.step();
        assert_eq!(bg.rect.y(), -700);

        let alt = Background::new(IVec2::new(480, 700), true);
        assert_eq!(alt.rect.y(), -700);
    }
}
