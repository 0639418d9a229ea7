use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Start-time tunables. Every field has a default, so a partial JSON file is fine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub playfield_width: u32,
    pub playfield_height: u32,

    /// Fixed horizontal position of the player's left edge.
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Gain applied to the hand's offset from the frame centre.
    pub sensitivity: f32,

    /// Ticks between two obstacle spawns.
    pub time_between_pipe_spawn: u32,
    /// Horizontal distance between consecutive obstacles, in pixels.
    pub horizontal_spawn_distance: f32,
    pub pipe_width: f32,
    pub gap_height: f32,
    /// Minimum distance between the gap and the top/bottom playfield edges.
    pub gap_margin: f32,

    pub tick_rate_hz: u32,
    pub max_catch_up_ticks: u32,
    pub game_over_display_ticks: u32,

    pub seed: u64,
    /// Score needed per stage.
    pub stage_every: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield_width: 640,
            playfield_height: 480,
            player_x: 100.0,
            player_width: 40.0,
            player_height: 30.0,
            sensitivity: 1.5,
            time_between_pipe_spawn: 90,
            horizontal_spawn_distance: 270.0,
            pipe_width: 60.0,
            gap_height: 160.0,
            gap_margin: 40.0,
            tick_rate_hz: 60,
            max_catch_up_ticks: 5,
            game_over_display_ticks: 120,
            seed: 0x5eed,
            stage_every: 5,
        }
    }
}

impl GameConfig {
    /// Obstacle speed in pixels per tick.
    pub fn pipe_velocity(&self) -> f32 {
        self.horizontal_spawn_distance / self.time_between_pipe_spawn.max(1) as f32
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz.max(1) as f64)
    }

    /// Clamps values that would make the simulation degenerate.
    pub fn sanitized(mut self) -> Self {
        self.playfield_width = self.playfield_width.max(1);
        self.playfield_height = self.playfield_height.max(1);
        let height = self.playfield_height as f32;

        self.player_width = finite_or(self.player_width, 1.0).max(1.0);
        self.player_height = finite_or(self.player_height, 1.0).clamp(1.0, height);
        self.player_x = finite_or(self.player_x, 0.0).max(0.0);
        self.sensitivity = finite_or(self.sensitivity, 1.0);

        self.time_between_pipe_spawn = self.time_between_pipe_spawn.max(1);
        self.horizontal_spawn_distance = finite_or(self.horizontal_spawn_distance, 0.0).max(0.0);
        self.pipe_width = finite_or(self.pipe_width, 1.0).max(1.0);
        self.gap_margin = finite_or(self.gap_margin, 0.0).clamp(0.0, height / 2.0);
        let max_gap = height - 2.0 * self.gap_margin;
        self.gap_height = finite_or(self.gap_height, max_gap).clamp(0.0, max_gap);

        self.tick_rate_hz = self.tick_rate_hz.clamp(1, 1000);
        self.max_catch_up_ticks = self.max_catch_up_ticks.max(1);
        self.stage_every = self.stage_every.max(1);
        self
    }

    /// Hard errors `sanitized` cannot fix in a way the player would expect.
    pub fn validate(&self) -> GameResult<()> {
        if self.player_x >= self.playfield_width as f32 {
            return Err(GameError::InvalidConfig(format!(
                "player_x {} is outside the {}px playfield",
                self.player_x, self.playfield_width
            )));
        }
        if self.gap_height <= self.player_height {
            return Err(GameError::InvalidConfig(format!(
                "gap_height {} must exceed player_height {}",
                self.gap_height, self.player_height
            )));
        }
        Ok(())
    }
}

fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() { v } else { fallback }
}

/// Where the optional JSON override lives.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub const PATH_ENV: &'static str = "WRISTFLAP_CONFIG";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os(Self::PATH_ENV) {
            return Self::new(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("wristflap");
        path.push("config.json");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file means defaults; anything else that goes wrong is fatal.
    pub fn load(&self) -> GameResult<GameConfig> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no config file, using defaults");
                return Ok(GameConfig::default());
            }
            Err(source) => {
                return Err(GameError::ConfigIo {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let config = serde_json::from_slice::<GameConfig>(&bytes)
            .map_err(|source| GameError::ConfigParse {
                path: self.path.clone(),
                source,
            })?
            .sanitized();
        config.validate()?;
        tracing::info!(path = %self.path.display(), "loaded config");
        Ok(config)
    }

    pub fn save(&self, config: &GameConfig) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(config)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}
