use std::time::{Duration, Instant};

use engine::HeadlessRunner;
use engine::graphics::Renderer2d;
use engine::profiling::{NoopProfiler, Profiler, TickTimings};

use crate::config::GameConfig;
use crate::error::GameResult;
use crate::input::{FrameSource, HandDetector, InputSampler};
use crate::state::{FlapLogic, GameState, Phase, TickInput};
use crate::view::{self, Sprites};

/// What a single `GameLoop::tick` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Input sampled and the world advanced one tick.
    Simulated,
    /// Quit observed; the world is frozen and the game-over frame is due.
    EnteredGameOver,
    /// Game-over frame on screen, nothing simulated.
    Holding,
    Finished,
}

/// Owns the input sampler and the simulation, and decides when a frame needs drawing.
pub struct GameLoop<S, D> {
    sampler: InputSampler<S, D>,
    runner: HeadlessRunner<FlapLogic>,
    sprites: Sprites,
    needs_render: bool,
    renders: u64,
    pending: TickTimings,
}

impl<S: FrameSource, D: HandDetector> GameLoop<S, D> {
    pub fn new(config: GameConfig, source: S, detector: D) -> Self {
        Self::with_logic(FlapLogic::new(config), source, detector)
    }

    pub fn with_logic(logic: FlapLogic, source: S, detector: D) -> Self {
        let sprites = Sprites::new(logic.config().player_width, logic.config().player_height);
        Self {
            sampler: InputSampler::new(source, detector),
            runner: HeadlessRunner::new(logic),
            sprites,
            needs_render: true,
            renders: 0,
            pending: TickTimings::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        self.runner.state()
    }

    pub fn phase(&self) -> Phase {
        self.runner.state().phase
    }

    pub fn config(&self) -> &GameConfig {
        self.runner.game().config()
    }

    /// Frames drawn so far.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Advances one tick. The quit signal is checked before any input is sampled, so a quit tick
    /// never simulates.
    pub fn tick(&mut self, quit: bool) -> GameResult<TickOutcome> {
        let outcome = match self.phase() {
            Phase::Running if quit => {
                self.runner.step(TickInput::quit());
                self.needs_render = true;
                TickOutcome::EnteredGameOver
            }
            Phase::Running => {
                let t0 = Instant::now();
                let sample = self.sampler.sample()?;
                let t1 = Instant::now();
                self.runner.step(TickInput::sample(sample));
                self.pending.sample = t1 - t0;
                self.pending.simulate = t1.elapsed();
                self.needs_render = true;
                TickOutcome::Simulated
            }
            Phase::GameOver { .. } => {
                self.runner.step(TickInput::default());
                if self.phase() == Phase::Finished {
                    TickOutcome::Finished
                } else {
                    TickOutcome::Holding
                }
            }
            Phase::Finished => TickOutcome::Finished,
        };
        Ok(outcome)
    }

    /// Draws the current state if anything changed since the last draw. Returns whether it drew.
    pub fn render_if_needed(&mut self, gfx: &mut dyn Renderer2d) -> bool {
        if !self.needs_render {
            return false;
        }
        let camera = self.sampler.latest_frame();
        view::draw_game(gfx, self.runner.state(), camera, &self.sprites);
        self.needs_render = false;
        self.renders += 1;
        true
    }

    /// `tick` followed by `render_if_needed`.
    pub fn step(&mut self, quit: bool, gfx: &mut dyn Renderer2d) -> GameResult<TickOutcome> {
        self.step_profiled(quit, gfx, &mut NoopProfiler)
    }

    pub fn step_profiled(
        &mut self,
        quit: bool,
        gfx: &mut dyn Renderer2d,
        profiler: &mut dyn Profiler,
    ) -> GameResult<TickOutcome> {
        let start = Instant::now();
        self.pending = TickTimings::default();

        let outcome = self.tick(quit)?;

        let render_start = Instant::now();
        let rendered = self.render_if_needed(gfx);
        let mut timings = self.pending;
        timings.render = if rendered {
            render_start.elapsed()
        } else {
            Duration::ZERO
        };
        timings.total = start.elapsed();
        profiler.on_tick(self.runner.tick(), timings);
        Ok(outcome)
    }
}
