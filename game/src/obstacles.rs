//! Obstacle pairs and the track that spawns, scrolls and evicts them.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Axis-aligned rect in playfield units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl FRect {
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// A top and a bottom segment sharing one `x`, with a gap between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub gap_center: f32,
    pub gap_height: f32,
    pub width: f32,
    pub scored: bool,
}

impl Obstacle {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn gap_top(&self) -> f32 {
        self.gap_center - self.gap_height / 2.0
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + self.gap_height / 2.0
    }

    /// From the top of the playfield down to the gap.
    pub fn top_rect(&self) -> FRect {
        FRect {
            x: self.x,
            y: 0.0,
            w: self.width,
            h: self.gap_top().max(0.0),
        }
    }

    /// From the gap down to the bottom of a playfield `playfield_height` tall.
    pub fn bottom_rect(&self, playfield_height: f32) -> FRect {
        let top = self.gap_bottom();
        FRect {
            x: self.x,
            y: top,
            w: self.width,
            h: (playfield_height - top).max(0.0),
        }
    }
}

/// Owns every live obstacle, oldest (leftmost) first.
#[derive(Debug, Clone)]
pub struct ObstacleTrack {
    obstacles: VecDeque<Obstacle>,
    rng: ChaCha8Rng,
    spawn_timer: u32,
    spawned_total: u64,
    evicted_total: u64,

    spawn_interval: u32,
    velocity: f32,
    spawn_x: f32,
    pipe_width: f32,
    gap_height: f32,
    gap_min: f32,
    gap_max: f32,
}

impl ObstacleTrack {
    pub fn new(config: &GameConfig) -> Self {
        let height = config.playfield_height as f32;
        let half_gap = config.gap_height / 2.0;
        let gap_min = config.gap_margin + half_gap;
        let gap_max = (height - config.gap_margin - half_gap).max(gap_min);
        Self {
            obstacles: VecDeque::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            spawn_timer: 0,
            spawned_total: 0,
            evicted_total: 0,
            spawn_interval: config.time_between_pipe_spawn.max(1),
            velocity: config.pipe_velocity(),
            spawn_x: config.playfield_width as f32,
            pipe_width: config.pipe_width,
            gap_height: config.gap_height,
            gap_min,
            gap_max,
        }
    }

    pub fn obstacles(&self) -> &VecDeque<Obstacle> {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut VecDeque<Obstacle> {
        &mut self.obstacles
    }

    pub fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    pub fn evicted_total(&self) -> u64 {
        self.evicted_total
    }

    /// Runs `ticks` single-tick updates.
    pub fn advance(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// One tick: move everything left, drop what has left the screen, then run the spawn timer.
    pub fn tick(&mut self) {
        for o in self.obstacles.iter_mut() {
            o.x -= self.velocity;
        }

        while self.obstacles.front().is_some_and(|o| o.right() < 0.0) {
            self.obstacles.pop_front();
            self.evicted_total += 1;
            tracing::debug!(evicted = self.evicted_total, "obstacle left the playfield");
        }

        self.spawn_timer += 1;
        if self.spawn_timer >= self.spawn_interval {
            self.spawn_timer = 0;
            self.spawn();
        }
    }

    fn spawn(&mut self) {
        let gap_center = if self.gap_max > self.gap_min {
            self.rng.gen_range(self.gap_min..=self.gap_max)
        } else {
            self.gap_min
        };
        self.obstacles.push_back(Obstacle {
            x: self.spawn_x,
            gap_center,
            gap_height: self.gap_height,
            width: self.pipe_width,
            scored: false,
        });
        self.spawned_total += 1;
        tracing::debug!(gap_center, spawned = self.spawned_total, "spawned obstacle");
    }
}
