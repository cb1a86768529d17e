//! Running score state tracked by the engine.
//!
//! Stored in `SimulationEngine`, NOT as ECS entities.

use skyraid_core::state::GameStats;

/// Score, hit and shot counters plus time in play.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub score: u32,
    pub hits: u32,
    pub shots: u32,
    pub game_time: f32,
}

impl ScoreState {
    pub fn record_shot(&mut self) {
        self.shots += 1;
    }

    pub fn record_hit(&mut self, points: u32) {
        self.hits += 1;
        self.score = self.score.saturating_add(points);
    }

    pub fn advance_time(&mut self, dt: f32) {
        self.game_time += dt;
    }

    /// Hit percentage in [0, 100]; 0 before the first shot.
    pub fn accuracy(&self) -> f32 {
        if self.shots == 0 {
            0.0
        } else {
            self.hits as f32 / self.shots as f32 * 100.0
        }
    }

    pub fn stats(&self) -> GameStats {
        GameStats {
            score: self.score,
            hits: self.hits,
            shots: self.shots,
            accuracy: self.accuracy(),
            game_time: self.game_time,
        }
    }
}
