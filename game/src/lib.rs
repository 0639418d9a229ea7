pub mod config;
pub mod error;
pub mod game_loop;
pub mod headful;
pub mod input;
pub mod logging;
pub mod obstacles;
pub mod player;
pub mod scheduler;
pub mod score;
pub mod state;
pub mod view;

pub use config::{ConfigStore, GameConfig};
pub use error::{GameError, GameResult};
pub use game_loop::{GameLoop, TickOutcome};
pub use state::{FlapLogic, GameState, Phase, TickInput};
