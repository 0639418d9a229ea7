use std::process::ExitCode;

use engine::app::{AppConfig, run_game};
use engine::surface::SurfaceSize;

use wristflap::headful::HeadfulApp;
use wristflap::input::sim::{PointerHand, SyntheticCamera};
use wristflap::{ConfigStore, GameLoop, GameResult};

const CAMERA_WIDTH: u32 = 320;
const CAMERA_HEIGHT: u32 = 240;

fn run() -> GameResult<()> {
    let store = ConfigStore::from_env();
    let config = store.load()?;
    tracing::info!(
        config = %store.path().display(),
        tick_rate = config.tick_rate_hz,
        seed = config.seed,
        "starting wristflap"
    );

    let size = SurfaceSize::new(config.playfield_width, config.playfield_height);
    let hand = PointerHand::new();
    let pointer = hand.handle();
    let camera = SyntheticCamera::new(CAMERA_WIDTH, CAMERA_HEIGHT);

    let mut app = HeadfulApp::new(GameLoop::new(config, camera, hand)).with_pointer(pointer);
    let mut app_config = AppConfig::new("wristflap", size);
    app_config.vsync = Some(true);
    run_game(app_config, &mut app)?;

    let state = app.game().state();
    tracing::info!(
        score = state.score(),
        stage = state.stage(),
        ticks = state.elapsed_ticks,
        "session over"
    );
    Ok(())
}

fn main() -> ExitCode {
    let _log_guard = wristflap::logging::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "wristflap failed");
            ExitCode::FAILURE
        }
    }
}
