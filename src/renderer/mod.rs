//! Rendering seam
//!
//! The simulation never draws. Each frame the game collects a flat draw list
//! from the state (back to front) and hands it to a `Renderer`.

use glam::IVec2;

use crate::hud::{Hud, Label, StatusIcon};
use crate::sim::{BulletTier, EnemyClass, Frame, GameState, SupplyKind};

/// An image to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    Hero(Frame),
    Enemy(EnemyClass, Frame),
    Bullet(BulletTier),
    Supply(SupplyKind),
    Status(StatusIcon),
    BombIcon,
    LifeIcon,
}

impl Sprite {
    /// Image asset backing this sprite
    pub fn image_name(&self) -> String {
        match *self {
            Sprite::Background => "background.png".to_string(),
            Sprite::Hero(Frame::Normal(i)) => format!("me{}.png", i + 1),
            Sprite::Hero(Frame::Hurt) => "me1.png".to_string(),
            Sprite::Hero(Frame::Destroy(i)) => format!("me_destroy_{}.png", i + 1),
            Sprite::Enemy(EnemyClass::Large, Frame::Normal(i)) => {
                format!("enemy3_n{}.png", i + 1)
            }
            Sprite::Enemy(class, Frame::Normal(_)) => format!("enemy{}.png", class.index() + 1),
            Sprite::Enemy(EnemyClass::Small, Frame::Hurt) => "enemy1.png".to_string(),
            Sprite::Enemy(class, Frame::Hurt) => format!("enemy{}_hit.png", class.index() + 1),
            Sprite::Enemy(class, Frame::Destroy(i)) => {
                format!("enemy{}_down{}.png", class.index() + 1, i + 1)
            }
            Sprite::Bullet(tier) => format!("bullet{}.png", tier.index() + 1),
            Sprite::Supply(SupplyKind::Bomb) => "bomb_supply.png".to_string(),
            Sprite::Supply(SupplyKind::BulletEnhance) => "bullet_supply.png".to_string(),
            Sprite::Status(StatusIcon::Pause) => "pause.png".to_string(),
            Sprite::Status(StatusIcon::Resume) => "resume.png".to_string(),
            Sprite::BombIcon => "bomb.png".to_string(),
            Sprite::LifeIcon => "life.png".to_string(),
        }
    }
}

/// One entry of the draw list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// Image with its top-left corner at `pos`
    Sprite { sprite: Sprite, pos: IVec2 },
    Text(Label),
}

/// Presentation backend
pub trait Renderer {
    fn draw(&mut self, frame: &[DrawCommand]) -> anyhow::Result<()>;
}

/// Renderer that discards frames, for headless runs
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames: u64,
}

impl Renderer for NullRenderer {
    fn draw(&mut self, frame: &[DrawCommand]) -> anyhow::Result<()> {
        self.frames += 1;
        if self.frames % 600 == 0 {
            log::trace!("frame {} ({} commands)", self.frames, frame.len());
        }
        Ok(())
    }
}

/// Build the draw list for the current state, back to front:
/// backgrounds, enemies, supplies, bullets, hero, HUD.
pub fn collect_frame(state: &GameState) -> Vec<DrawCommand> {
    let viewport = state.settings().viewport_rect();
    let mut frame = Vec::with_capacity(state.enemies.len() + state.hero.kind.bullets.len() + 16);
    let mut sprite = |sprite: Sprite, pos: IVec2| frame.push(DrawCommand::Sprite { sprite, pos });

    for bg in &state.backgrounds {
        sprite(Sprite::Background, bg.rect.pos);
    }
    for enemy in &state.enemies {
        if enemy.rect.bottom() > viewport.top() && enemy.rect.top() < viewport.bottom() {
            sprite(Sprite::Enemy(enemy.class(), enemy.anim.frame()), enemy.rect.pos);
        }
    }
    for supply in state.supplies.iter().filter(|s| !s.is_parked(&viewport)) {
        sprite(Sprite::Supply(supply.kind), supply.rect.pos);
    }
    for bullet in &state.hero.kind.bullets {
        sprite(Sprite::Bullet(bullet.tier), bullet.rect.pos);
    }
    sprite(Sprite::Hero(state.hero.anim.frame()), state.hero.rect.pos);

    let hud = Hud::from_state(state);
    sprite(Sprite::Status(hud.status_icon), hud.status_pos);
    sprite(Sprite::BombIcon, hud.bomb_pos);
    sprite(Sprite::LifeIcon, hud.life_pos);
    frame.push(DrawCommand::Text(hud.score));
    frame.push(DrawCommand::Text(hud.bombs));
    frame.push(DrawCommand::Text(hud.lives));
    if let Some(overlay) = hud.overlay {
        frame.push(DrawCommand::Text(overlay.status));
        frame.push(DrawCommand::Text(overlay.best));
        frame.push(DrawCommand::Text(overlay.tip));
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{TickInput, tick};

    fn sprites(frame: &[DrawCommand]) -> Vec<Sprite> {
        frame
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { sprite, .. } => Some(*sprite),
                DrawCommand::Text(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_image_names() {
        assert_eq!(Sprite::Hero(Frame::Normal(1)).image_name(), "me2.png");
        assert_eq!(Sprite::Hero(Frame::Destroy(3)).image_name(), "me_destroy_4.png");
        assert_eq!(
            Sprite::Enemy(EnemyClass::Large, Frame::Normal(0)).image_name(),
            "enemy3_n1.png"
        );
        assert_eq!(
            Sprite::Enemy(EnemyClass::Medium, Frame::Hurt).image_name(),
            "enemy2_hit.png"
        );
        assert_eq!(
            Sprite::Enemy(EnemyClass::Small, Frame::Destroy(0)).image_name(),
            "enemy1_down1.png"
        );
        assert_eq!(Sprite::Bullet(BulletTier::Enhanced).image_name(), "bullet2.png");
    }

    #[test]
    fn test_sprites_key_an_image_cache() {
        use std::collections::HashMap;
        let mut cache: HashMap<Sprite, String> = HashMap::new();
        for sprite in [
            Sprite::Status(StatusIcon::Pause),
            Sprite::Status(StatusIcon::Resume),
            Sprite::Status(StatusIcon::Pause),
            Sprite::Hero(Frame::Normal(0)),
        ] {
            cache.entry(sprite).or_insert_with(|| sprite.image_name());
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache[&Sprite::Status(StatusIcon::Resume)], "resume.png");
    }

    #[test]
    fn test_offscreen_and_parked_are_skipped() {
        let state = GameState::new(3, Settings::default(), 0);
        let frame = collect_frame(&state);
        let sprites = sprites(&frame);
        // Fresh enemies wait above the viewport and supplies are parked
        assert!(!sprites.iter().any(|s| matches!(s, Sprite::Enemy(..))));
        assert!(!sprites.iter().any(|s| matches!(s, Sprite::Supply(_))));
        assert_eq!(sprites[0], Sprite::Background);
        assert!(sprites.contains(&Sprite::Hero(Frame::Normal(0))));
        // Game over overlay
        assert!(frame.iter().any(
            |c| matches!(c, DrawCommand::Text(label) if label.text == "Game Over!")
        ));
    }

    #[test]
    fn test_hero_drawn_over_enemies() {
        let mut state = GameState::new(3, Settings::default(), 0);
        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..Default::default()
            },
        );
        state.enemies[0].rect.pos = IVec2::new(100, 100);
        let sprites = sprites(&collect_frame(&state));
        let enemy = sprites
            .iter()
            .position(|s| matches!(s, Sprite::Enemy(..)))
            .unwrap();
        let hero = sprites
            .iter()
            .position(|s| matches!(s, Sprite::Hero(_)))
            .unwrap();
        assert!(enemy < hero);
        assert_eq!(sprites.last(), Some(&Sprite::LifeIcon));
    }

    #[test]
    fn test_null_renderer_counts() {
        let state = GameState::new(3, Settings::default(), 0);
        let mut renderer = NullRenderer::default();
        renderer.draw(&collect_frame(&state)).unwrap();
        assert_eq!(renderer.frames, 1);
    }
}
