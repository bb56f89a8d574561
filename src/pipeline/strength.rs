//! Opponent strength and schedule difficulty
//!
//! Strength is the standings points-percentage as a 0-1 fraction, built
//! once per ranking run and read-only afterward. Teams missing from the
//! standings get the neutral 0.5 so one absent team never blocks the
//! pipeline.

use std::collections::HashMap;

use crate::domain::{GameStat, Outcome, ScheduleDifficulty, ScheduleGrade, StandingsSnapshot};

/// Neutral strength for teams absent from the standings
const NEUTRAL_STRENGTH: f64 = 0.5;

#[derive(Debug, Clone, Default)]
pub struct OpponentStrength {
    strengths: HashMap<String, f64>,
}

impl OpponentStrength {
    /// Build the per-team strength map from a standings snapshot.
    /// strength = points percentage / 100, on [0, 1].
    pub fn build(standings: &StandingsSnapshot) -> Self {
        let strengths = standings
            .entries
            .iter()
            .map(|e| (e.team.clone(), (e.points_percentage / 100.0).clamp(0.0, 1.0)))
            .collect();
        Self { strengths }
    }

    pub fn get(&self, team: &str) -> f64 {
        self.strengths.get(team).copied().unwrap_or(NEUTRAL_STRENGTH)
    }

    /// Quality-adjusted record over a recent game window: each result is
    /// weighted by the opponent's strength (2.0·s for a win, 1.0·s for an
    /// OT/SO loss, 0 for a regulation loss). The percentage denominator
    /// assumes a maximum opponent strength of 1.0, so only beating elite
    /// opposition approaches 100.
    pub fn schedule_difficulty(&self, games: &[GameStat]) -> ScheduleDifficulty {
        if games.is_empty() {
            return ScheduleDifficulty::neutral();
        }

        let mut total_strength = 0.0;
        let mut quality_points = 0.0;
        for game in games {
            let strength = self.get(&game.opponent);
            total_strength += strength;
            quality_points += match game.outcome {
                Outcome::Win => 2.0 * strength,
                Outcome::OvertimeLoss => 1.0 * strength,
                Outcome::Loss => 0.0,
            };
        }

        let n = games.len() as f64;
        let avg = total_strength / n;
        ScheduleDifficulty {
            avg_opponent_strength: avg,
            quality_adjusted_points_pct: quality_points / (n * 2.0) * 100.0,
            grade: ScheduleGrade::from_strength(avg),
        }
    }
}
