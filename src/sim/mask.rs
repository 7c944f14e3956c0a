//! Per-pixel collision masks
//!
//! Two sprites collide only when an opaque pixel of one lands on an opaque
//! pixel of the other. Bounding boxes are only used as a cheap pre-check.

use glam::IVec2;

use super::entity::{BulletTier, EnemyClass, SupplyKind};
use super::geometry::Rect;
use crate::settings::Settings;

/// Alpha above this counts as opaque
pub const ALPHA_THRESHOLD: u8 = 127;

/// Bitset of opaque pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMask {
    width: i32,
    height: i32,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl CollisionMask {
    /// Fully transparent mask
    pub fn empty(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let words_per_row = (width as usize).div_ceil(64);
        Self {
            width,
            height,
            words_per_row,
            bits: vec![0; words_per_row * height as usize],
        }
    }

    /// Fully opaque mask
    pub fn solid(width: i32, height: i32) -> Self {
        let mut mask = Self::empty(width, height);
        for y in 0..mask.height {
            for x in 0..mask.width {
                mask.set(x, y);
            }
        }
        mask
    }

    /// Filled ellipse inscribed in the mask's box (transparent corners)
    pub fn ellipse(width: i32, height: i32) -> Self {
        let mut mask = Self::empty(width, height);
        let rx = width as f32 / 2.0;
        let ry = height as f32 / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return mask;
        }
        for y in 0..mask.height {
            for x in 0..mask.width {
                let dx = (x as f32 + 0.5 - rx) / rx;
                let dy = (y as f32 + 0.5 - ry) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    mask.set(x, y);
                }
            }
        }
        mask
    }

    /// Build from an alpha channel (`width * height` bytes, row-major)
    pub fn from_alpha(width: i32, height: i32, alpha: &[u8]) -> Self {
        let mut mask = Self::empty(width, height);
        for y in 0..mask.height {
            for x in 0..mask.width {
                let idx = (y * mask.width + x) as usize;
                if alpha.get(idx).is_some_and(|&a| a > ALPHA_THRESHOLD) {
                    mask.set(x, y);
                }
            }
        }
        mask
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    fn set(&mut self, x: i32, y: i32) {
        let word = y as usize * self.words_per_row + x as usize / 64;
        self.bits[word] |= 1u64 << (x as usize % 64);
    }

    /// Whether the pixel at (x, y) is opaque; out of range is transparent
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        let word = y as usize * self.words_per_row + x as usize / 64;
        self.bits[word] & (1u64 << (x as usize % 64)) != 0
    }

    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    /// Whether this mask placed at `offset` (relative to `other`) overlaps it
    pub fn overlaps(&self, other: &CollisionMask, offset: IVec2) -> bool {
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + self.width).min(other.width);
        let y1 = (offset.y + self.height).min(other.height);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }
        for y in y0..y1 {
            for x in x0..x1 {
                if other.get(x, y) && self.get(x - offset.x, y - offset.y) {
                    return true;
                }
            }
        }
        false
    }
}

/// Mask lookup key; every sprite of a kind shares its first frame's mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskKey {
    Hero,
    Enemy(EnemyClass),
    Bullet(BulletTier),
    Supply(SupplyKind),
}

/// Masks for every collidable sprite kind
#[derive(Debug, Clone)]
pub struct MaskAtlas {
    hero: CollisionMask,
    enemies: [CollisionMask; 3],
    bullets: [CollisionMask; 2],
    supplies: [CollisionMask; 2],
}

impl MaskAtlas {
    /// Ellipse masks sized from the settings; asset loaders replace them
    /// with real alpha masks via [`MaskAtlas::insert`].
    pub fn from_settings(settings: &Settings) -> Self {
        let ellipse = |size: IVec2| CollisionMask::ellipse(size.x, size.y);
        let bullet = settings.bullets.size;
        Self {
            hero: ellipse(settings.hero.size),
            enemies: [
                ellipse(settings.enemies.small.size),
                ellipse(settings.enemies.medium.size),
                ellipse(settings.enemies.large.size),
            ],
            bullets: [
                CollisionMask::solid(bullet.x, bullet.y),
                CollisionMask::solid(bullet.x, bullet.y),
            ],
            supplies: [
                ellipse(settings.supply.bomb_size),
                ellipse(settings.supply.enhance_size),
            ],
        }
    }

    pub fn insert(&mut self, key: MaskKey, mask: CollisionMask) {
        *self.slot_mut(key) = mask;
    }

    pub fn get(&self, key: MaskKey) -> &CollisionMask {
        match key {
            MaskKey::Hero => &self.hero,
            MaskKey::Enemy(class) => &self.enemies[class.index()],
            MaskKey::Bullet(tier) => &self.bullets[tier.index()],
            MaskKey::Supply(kind) => &self.supplies[kind.index()],
        }
    }

    fn slot_mut(&mut self, key: MaskKey) -> &mut CollisionMask {
        match key {
            MaskKey::Hero => &mut self.hero,
            MaskKey::Enemy(class) => &mut self.enemies[class.index()],
            MaskKey::Bullet(tier) => &mut self.bullets[tier.index()],
            MaskKey::Supply(kind) => &mut self.supplies[kind.index()],
        }
    }

    /// Pixel-accurate overlap of two placed sprites
    pub fn collide(&self, a: (MaskKey, &Rect), b: (MaskKey, &Rect)) -> bool {
        if !a.1.intersects(b.1) {
            return false;
        }
        let offset = a.1.pos - b.1.pos;
        self.get(a.0).overlaps(self.get(b.0), offset)
    }
}
