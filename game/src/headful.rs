use std::time::Duration;

use engine::app::{AppFlow, GameApp, InputFrame};
use engine::graphics::Renderer2d;

use crate::error::GameError;
use crate::game_loop::{GameLoop, TickOutcome};
use crate::input::sim::PointerHandle;
use crate::input::{FrameSource, HandDetector};
use crate::scheduler::TickScheduler;

/// Adapts a `GameLoop` to the window runner: real time in, fixed ticks out, one draw per
/// redraw at most.
pub struct HeadfulApp<S, D> {
    game: GameLoop<S, D>,
    scheduler: TickScheduler,
    pointer: Option<PointerHandle>,
}

impl<S: FrameSource, D: HandDetector> HeadfulApp<S, D> {
    pub fn new(game: GameLoop<S, D>) -> Self {
        let config = game.config();
        let scheduler = TickScheduler::new(config.tick_duration(), config.max_catch_up_ticks);
        Self {
            game,
            scheduler,
            pointer: None,
        }
    }

    /// Feed the window pointer into a simulated hand.
    pub fn with_pointer(mut self, pointer: PointerHandle) -> Self {
        self.pointer = Some(pointer);
        self
    }

    pub fn game(&self) -> &GameLoop<S, D> {
        &self.game
    }
}

impl<S: FrameSource, D: HandDetector> GameApp for HeadfulApp<S, D> {
    type Error = GameError;

    fn frame(
        &mut self,
        input: &InputFrame,
        dt: Duration,
        gfx: &mut dyn Renderer2d,
    ) -> Result<AppFlow, GameError> {
        if let Some(pointer) = &self.pointer {
            pointer.set(input.cursor);
        }

        // The game-over frame has to reach the screen before any hold tick runs, so the rest of
        // this frame's ticks are dropped once it is entered.
        let ticks = self.scheduler.advance(dt);
        for _ in 0..ticks {
            match self.game.tick(input.quit_requested) {
                Ok(TickOutcome::EnteredGameOver) => break,
                Ok(TickOutcome::Finished) => return Ok(AppFlow::Exit),
                Ok(_) => {}
                Err(err) => {
                    tracing::error!(error = %err, "tick failed");
                    return Err(err);
                }
            }
        }

        self.game.render_if_needed(gfx);
        Ok(AppFlow::Continue)
    }
}
