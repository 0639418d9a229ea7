use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// The player-controlled entity. `x` never changes; `y` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Player {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Maps hand samples straight onto the player's vertical position.
///
/// There is no smoothing: every sample fully replaces the previous position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerController {
    player: Player,
    sensitivity: f32,
    playfield_height: f32,
}

impl PlayerController {
    pub fn new(config: &GameConfig) -> Self {
        let playfield_height = config.playfield_height as f32;
        let height = config.player_height.min(playfield_height);
        Self {
            player: Player {
                x: config.player_x,
                y: (playfield_height - height) / 2.0,
                width: config.player_width,
                height,
            },
            sensitivity: config.sensitivity,
            playfield_height,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Applies one sample. `None` (or a non-finite value) leaves the player where it is.
    pub fn update(&mut self, sample: Option<f32>) {
        let Some(sample) = sample.filter(|s| s.is_finite()) else {
            return;
        };
        let h = self.playfield_height;
        let centered = sample - 0.5;
        let mut y = centered * self.sensitivity * h + h / 2.0;

        if y < 0.0 {
            y = 0.0;
        }
        if y + self.player.height > h {
            y = h - self.player.height;
        }
        self.player.y = y;
    }
}
