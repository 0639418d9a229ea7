use std::sync::Arc;

use engine::GameLogic;

use crate::config::GameConfig;
use crate::obstacles::ObstacleTrack;
use crate::player::PlayerController;
use crate::score::{ScoreKeeper, ScoreMilestones, StagePolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// The game-over frame is on screen for `remaining` more ticks.
    GameOver { remaining: u32 },
    Finished,
}

/// Everything one tick of simulation needs from the outside.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub sample: Option<f32>,
    pub quit: bool,
}

impl TickInput {
    pub fn sample(sample: Option<f32>) -> Self {
        Self {
            sample,
            quit: false,
        }
    }

    pub fn quit() -> Self {
        Self {
            sample: None,
            quit: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: Phase,
    /// Simulated ticks; stops counting once the game is over.
    pub elapsed_ticks: u64,
    /// The sample applied on the last simulated tick.
    pub last_sample: Option<f32>,
    pub player: PlayerController,
    pub track: ObstacleTrack,
    pub score: ScoreKeeper,
}

impl GameState {
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn stage(&self) -> u32 {
        self.score.stage()
    }
}

/// The deterministic part of the game: obstacles, player, scoring and the phase machine.
///
/// Input capture and rendering stay outside so the same logic runs headful, headless and in
/// tests.
#[derive(Debug, Clone)]
pub struct FlapLogic {
    config: GameConfig,
    stage_policy: Arc<dyn StagePolicy>,
}

impl FlapLogic {
    pub fn new(config: GameConfig) -> Self {
        let stage_policy = Arc::new(ScoreMilestones {
            every: config.stage_every,
        });
        Self {
            config,
            stage_policy,
        }
    }

    pub fn with_stage_policy(mut self, policy: Arc<dyn StagePolicy>) -> Self {
        self.stage_policy = policy;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

impl GameLogic for FlapLogic {
    type State = GameState;
    type Input = TickInput;

    fn initial_state(&self) -> Self::State {
        GameState {
            phase: Phase::Running,
            elapsed_ticks: 0,
            last_sample: None,
            player: PlayerController::new(&self.config),
            track: ObstacleTrack::new(&self.config),
            score: ScoreKeeper::new(self.stage_policy.clone()),
        }
    }

    fn step(&self, state: &mut Self::State, input: Self::Input) {
        match state.phase {
            Phase::Running if input.quit => {
                state.phase = Phase::GameOver {
                    remaining: self.config.game_over_display_ticks,
                };
                tracing::info!(
                    score = state.score(),
                    stage = state.stage(),
                    ticks = state.elapsed_ticks,
                    "game over"
                );
            }
            Phase::Running => {
                state.track.tick();
                let player_x = state.player.player().x;
                state
                    .score
                    .update(player_x, state.track.obstacles_mut(), state.elapsed_ticks + 1);
                state.player.update(input.sample);
                state.last_sample = input.sample;
                state.elapsed_ticks += 1;
                tracing::trace!(tick = state.elapsed_ticks, y = state.player.player().y, "tick");
            }
            Phase::GameOver { remaining } if remaining > 1 => {
                state.phase = Phase::GameOver {
                    remaining: remaining - 1,
                };
            }
            Phase::GameOver { .. } => {
                state.phase = Phase::Finished;
                tracing::info!("finished");
            }
            Phase::Finished => {}
        }
    }
}
