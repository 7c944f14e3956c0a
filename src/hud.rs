//! Heads-up display layout
//!
//! Built fresh from the game state every frame. Text is laid out by anchor
//! point; the renderer measures glyphs, except where an icon has to sit next
//! to a label, which uses a fixed-advance width estimate.

use glam::IVec2;

use crate::sim::{GamePhase, GameState};

/// Spacing between HUD elements
pub const MARGIN: i32 = 10;

/// Icon sizes of the HUD images
pub const STATUS_ICON_SIZE: IVec2 = IVec2::new(60, 45);
pub const BOMB_ICON_SIZE: IVec2 = IVec2::new(63, 57);
pub const LIFE_ICON_SIZE: IVec2 = IVec2::new(46, 57);

pub const WHITE: [u8; 3] = [255, 255, 255];
pub const GRAY: [u8; 3] = [64, 64, 64];

/// Which point of a label its `pos` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    MidLeft,
    MidRight,
    MidTop,
    MidBottom,
    Center,
}

/// A line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    /// Font size in points
    pub size: u16,
    pub color: [u8; 3],
    pub anchor: Anchor,
    pub pos: IVec2,
}

impl Label {
    fn new(text: String, size: u16, color: [u8; 3], anchor: Anchor, pos: IVec2) -> Self {
        Self {
            text,
            size,
            color,
            anchor,
            pos,
        }
    }

    /// Width estimate: half the font size per character
    pub fn approx_width(&self) -> i32 {
        self.text.chars().count() as i32 * i32::from(self.size) / 2
    }

    /// Left edge, using the width estimate for right and centered anchors
    pub fn approx_left(&self) -> i32 {
        match self.anchor {
            Anchor::MidLeft => self.pos.x,
            Anchor::MidRight => self.pos.x - self.approx_width(),
            Anchor::MidTop | Anchor::MidBottom | Anchor::Center => {
                self.pos.x - self.approx_width() / 2
            }
        }
    }
}

/// Pause/resume indicator in the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusIcon {
    /// Game is running; clicking would pause
    Pause,
    /// Game is paused or over
    Resume,
}

/// Centered messages shown while paused or after the last life
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub status: Label,
    pub best: Label,
    pub tip: Label,
}

impl Overlay {
    pub fn new(game_over: bool, best_score: u64, viewport: IVec2) -> Self {
        let (status, tip) = if game_over {
            ("Game Over!", "Press spacebar to play again.")
        } else {
            ("Game Paused!", "Press spacebar to continue.")
        };

        let center = viewport / 2;
        let best_size = 36;
        let best_top = center.y - best_size / 2;
        let best_bottom = center.y + best_size / 2;

        Self {
            best: Label::new(
                format!("Best: {best_score}"),
                best_size as u16,
                WHITE,
                Anchor::Center,
                center,
            ),
            status: Label::new(
                status.to_string(),
                48,
                WHITE,
                Anchor::MidBottom,
                IVec2::new(center.x, best_top - 2 * MARGIN),
            ),
            tip: Label::new(
                tip.to_string(),
                22,
                WHITE,
                Anchor::MidTop,
                IVec2::new(center.x, best_bottom + 8 * MARGIN),
            ),
        }
    }
}

/// Complete HUD for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub status_icon: StatusIcon,
    /// Top-left of the status icon
    pub status_pos: IVec2,
    pub score: Label,
    /// Top-left of the bomb icon
    pub bomb_pos: IVec2,
    pub bombs: Label,
    /// Top-left of the life icon
    pub life_pos: IVec2,
    pub lives: Label,
    pub overlay: Option<Overlay>,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let viewport = state.settings().viewport;
        let board = &state.scoreboard;

        let status_pos = IVec2::splat(MARGIN);
        let status_mid_y = status_pos.y + STATUS_ICON_SIZE.y / 2;
        let score = Label::new(
            board.score.to_string(),
            32,
            GRAY,
            Anchor::MidLeft,
            IVec2::new(status_pos.x + STATUS_ICON_SIZE.x + MARGIN, status_mid_y),
        );

        let bomb_pos = IVec2::new(MARGIN, viewport.y - MARGIN - BOMB_ICON_SIZE.y);
        let bomb_mid_y = bomb_pos.y + BOMB_ICON_SIZE.y / 2;
        let bombs = Label::new(
            format!("X {}", state.hero.kind.bomb_count),
            32,
            GRAY,
            Anchor::MidLeft,
            IVec2::new(bomb_pos.x + BOMB_ICON_SIZE.x + MARGIN, bomb_mid_y),
        );

        let lives = Label::new(
            format!("X {}", board.lives),
            32,
            GRAY,
            Anchor::MidRight,
            IVec2::new(viewport.x - MARGIN, bomb_mid_y),
        );
        let life_pos = IVec2::new(
            lives.approx_left() - MARGIN - LIFE_ICON_SIZE.x,
            viewport.y - MARGIN - LIFE_ICON_SIZE.y,
        );

        let (status_icon, overlay) = match state.phase {
            GamePhase::Playing => (StatusIcon::Pause, None),
            GamePhase::Paused => (
                StatusIcon::Resume,
                Some(Overlay::new(false, board.best_score, viewport)),
            ),
            GamePhase::GameOver => (
                StatusIcon::Resume,
                Some(Overlay::new(true, board.best_score, viewport)),
            ),
        };

        Self {
            status_icon,
            status_pos,
            score,
            bomb_pos,
            bombs,
            life_pos,
            lives,
            overlay,
        }
    }
}
