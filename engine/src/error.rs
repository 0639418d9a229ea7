//! Errors raised by the headful runtime.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The OS refused to create the window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// Surface creation, resize or present failed.
    #[error("pixels surface error: {0}")]
    Surface(#[from] pixels::Error),

    /// The game itself reported a fatal error from inside a frame.
    #[error("game aborted: {0}")]
    Game(#[source] Box<dyn std::error::Error + 'static>),
}
