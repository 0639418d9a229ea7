use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::obstacles::Obstacle;

/// Decides which stage a run is in.
pub trait StagePolicy: fmt::Debug + Send + Sync {
    fn stage_for(&self, score: u32, elapsed_ticks: u64) -> u32;
}

/// One stage per `every` points, starting at stage 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreMilestones {
    pub every: u32,
}

impl Default for ScoreMilestones {
    fn default() -> Self {
        Self { every: 5 }
    }
}

impl StagePolicy for ScoreMilestones {
    fn stage_for(&self, score: u32, _elapsed_ticks: u64) -> u32 {
        1 + score / self.every.max(1)
    }
}

/// One stage per `every` ticks survived, starting at stage 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElapsedTicks {
    pub every: u64,
}

impl StagePolicy for ElapsedTicks {
    fn stage_for(&self, _score: u32, elapsed_ticks: u64) -> u32 {
        let stage = 1 + elapsed_ticks / self.every.max(1);
        u32::try_from(stage).unwrap_or(u32::MAX)
    }
}

/// What a single `ScoreKeeper::update` changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub scored: u32,
    pub stage_changed: bool,
}

#[derive(Debug, Clone)]
pub struct ScoreKeeper {
    score: u32,
    stage: u32,
    policy: Arc<dyn StagePolicy>,
}

impl ScoreKeeper {
    pub fn new(policy: Arc<dyn StagePolicy>) -> Self {
        let stage = policy.stage_for(0, 0).max(1);
        Self {
            score: 0,
            stage,
            policy,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    /// Scores every obstacle the player has fully passed, once each, then re-evaluates the
    /// stage. The stage never goes down.
    pub fn update(
        &mut self,
        player_x: f32,
        obstacles: &mut VecDeque<Obstacle>,
        elapsed_ticks: u64,
    ) -> ScoreUpdate {
        let mut scored = 0u32;
        for o in obstacles.iter_mut() {
            if !o.scored && o.right() < player_x {
                o.scored = true;
                scored += 1;
            }
        }
        self.score = self.score.saturating_add(scored);
        if scored > 0 {
            tracing::debug!(score = self.score, "scored");
        }

        let next = self.policy.stage_for(self.score, elapsed_ticks);
        let stage_changed = next > self.stage;
        if stage_changed {
            self.stage = next;
            tracing::info!(stage = self.stage, score = self.score, "stage up");
        }
        ScoreUpdate {
            scored,
            stage_changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(x: f32) -> Obstacle {
        Obstacle {
            x,
            gap_center: 240.0,
            gap_height: 160.0,
            width: 60.0,
            scored: false,
        }
    }

    #[test]
    fn scores_only_when_fully_passed() {
        let mut keeper = ScoreKeeper::new(Arc::new(ScoreMilestones::default()));
        // right edge 100 == player_x: not yet passed.
        let mut obs = VecDeque::from([obstacle(40.0)]);
        assert_eq!(keeper.update(100.0, &mut obs, 0).scored, 0);

        obs[0].x = 39.0;
        assert_eq!(keeper.update(100.0, &mut obs, 0).scored, 1);
        assert_eq!(keeper.score(), 1);
    }

    #[test]
    fn never_scores_the_same_obstacle_twice() {
        let mut keeper = ScoreKeeper::new(Arc::new(ScoreMilestones::default()));
        let mut obs = VecDeque::from([obstacle(-10.0), obstacle(500.0)]);
        for _ in 0..10 {
            keeper.update(100.0, &mut obs, 0);
        }
        assert_eq!(keeper.score(), 1);
        assert!(obs[0].scored);
        assert!(!obs[1].scored);
    }

    #[test]
    fn milestones_advance_stage() {
        let mut keeper = ScoreKeeper::new(Arc::new(ScoreMilestones { every: 2 }));
        assert_eq!(keeper.stage(), 1);

        let mut obs: VecDeque<Obstacle> = (0..3).map(|i| obstacle(-100.0 * i as f32)).collect();
        let update = keeper.update(100.0, &mut obs, 0);
        assert_eq!(update.scored, 3);
        assert!(update.stage_changed);
        assert_eq!(keeper.stage(), 2);
    }

    #[test]
    fn stage_is_monotonic_even_if_policy_goes_down() {
        #[derive(Debug)]
        struct Wobbly;
        impl StagePolicy for Wobbly {
            fn stage_for(&self, _score: u32, elapsed_ticks: u64) -> u32 {
                if elapsed_ticks == 1 { 3 } else { 1 }
            }
        }

        let mut keeper = ScoreKeeper::new(Arc::new(Wobbly));
        let mut obs = VecDeque::new();
        keeper.update(0.0, &mut obs, 1);
        assert_eq!(keeper.stage(), 3);
        keeper.update(0.0, &mut obs, 2);
        assert_eq!(keeper.stage(), 3);
    }

    #[test]
    fn elapsed_ticks_policy_counts_time() {
        let p = ElapsedTicks { every: 600 };
        assert_eq!(p.stage_for(0, 0), 1);
        assert_eq!(p.stage_for(0, 599), 1);
        assert_eq!(p.stage_for(99, 1_200), 3);
    }
}
