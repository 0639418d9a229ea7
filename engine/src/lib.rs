pub mod app;
pub mod error;
pub mod graphics;
pub mod image;
pub mod pixels_renderer;
pub mod profiling;
pub mod regression;
pub mod surface;
pub mod ui;

/// A deterministic simulation: the same inputs from the same initial state always produce the
/// same states.
///
/// `step` mutates in place; states may own large buffers or RNGs that are not worth cloning
/// every tick.
pub trait GameLogic {
    type State;
    type Input;

    fn initial_state(&self) -> Self::State;
    fn step(&self, state: &mut Self::State, input: Self::Input);
}

/// Drives a `GameLogic` without a window, one input per tick.
#[derive(Debug)]
pub struct HeadlessRunner<G: GameLogic> {
    game: G,
    state: G::State,
    tick: u64,
}

impl<G: GameLogic> HeadlessRunner<G> {
    pub fn new(game: G) -> Self {
        let state = game.initial_state();
        Self {
            game,
            state,
            tick: 0,
        }
    }

    /// Number of steps taken so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    pub fn step(&mut self, input: G::Input) -> u64 {
        self.game.step(&mut self.state, input);
        self.tick += 1;
        self.tick
    }
}
