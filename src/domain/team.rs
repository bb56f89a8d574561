//! Aggregated team statistics over a rolling game window

use std::fmt;

use serde::{Deserialize, Serialize};

/// Win/loss/overtime-loss triple for a game window.
///
/// Invariant: the three counts sum to the window's games played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
    pub overtime_losses: u32,
}

impl TeamRecord {
    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.overtime_losses
    }
}

impl fmt::Display for TeamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.wins, self.losses, self.overtime_losses)
    }
}

/// Sums, rates and percentages folded from one team's recent game window.
/// Built once per ranking run and read-only afterward.
///
/// All percentage fields follow the guarded-division rule: a zero
/// denominator yields exactly 0.0, never NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamAggregate {
    pub games_played: u32,
    pub record: TeamRecord,
    pub points: u32,
    /// Points earned over points available (`games_played * 2`), 0-100
    pub points_percentage: f64,
    pub goals_for: u32,
    pub goals_against: u32,
    pub shots_for: u32,
    pub shots_against: u32,
    pub goal_differential_per_game: f64,
    pub shot_differential_per_game: f64,
    pub shooting_percentage: f64,
    pub save_percentage: f64,
    pub powerplay_percentage: f64,
    pub penalty_kill_percentage: f64,
    pub road_wins: u32,
    pub comeback_wins: u32,
    pub one_goal_games: u32,
    /// Games with 4+ goals scored
    pub high_scoring_games: u32,
    pub regulation_wins: u32,
    pub extra_time_wins: u32,
}

impl TeamAggregate {
    pub fn goals_for_per_game(&self) -> f64 {
        f64::from(self.goals_for) / f64::from(self.games_played)
    }

    pub fn goals_against_per_game(&self) -> f64 {
        f64::from(self.goals_against) / f64::from(self.games_played)
    }
}
