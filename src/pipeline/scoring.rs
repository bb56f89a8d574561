//! Fixed-weight multi-factor scoring
//!
//! One engine, one formula. The historical basic/improved/ultimate scorer
//! forks are gone: which ranking flavor to run is just a different
//! `WeightTable`, validated to sum to 1.0 so every flavor stays on the
//! same 0-100 scale.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{AdvancedMetrics, ScheduleDifficulty, StandingsEntry, TeamAggregate};
use crate::error::{RankError, Result};
use crate::pipeline::metrics::streak_bonus;

/// Per-factor weights. Must sum to 1.0 (±0.001).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightTable {
    pub recent_record: f64,
    pub strength_of_schedule: f64,
    pub goal_scoring_dominance: f64,
    pub expected_goals: f64,
    pub possession: f64,
    pub pdo_luck: f64,
    pub shot_quality: f64,
    pub season_points_pct: f64,
    pub goal_differential: f64,
    pub special_teams: f64,
    pub win_quality: f64,
    pub winning_streak: f64,
    pub clutch_performance: f64,
    pub recent_form: f64,
}

impl WeightTable {
    /// The published ranking weights
    pub fn standard() -> Self {
        Self {
            // Core performance (35%)
            recent_record: 0.15,
            strength_of_schedule: 0.12,
            goal_scoring_dominance: 0.08,
            // Advanced analytics (25%)
            expected_goals: 0.08,
            possession: 0.07,
            pdo_luck: 0.05,
            shot_quality: 0.05,
            // Current performance (25%)
            season_points_pct: 0.10,
            goal_differential: 0.08,
            special_teams: 0.04,
            win_quality: 0.03,
            // Momentum & context (15%)
            winning_streak: 0.06,
            clutch_performance: 0.05,
            recent_form: 0.04,
        }
    }

    fn factors(&self) -> [f64; 14] {
        [
            self.recent_record,
            self.strength_of_schedule,
            self.goal_scoring_dominance,
            self.expected_goals,
            self.possession,
            self.pdo_luck,
            self.shot_quality,
            self.season_points_pct,
            self.goal_differential,
            self.special_teams,
            self.win_quality,
            self.winning_streak,
            self.clutch_performance,
            self.recent_form,
        ]
    }

    pub fn sum(&self) -> f64 {
        self.factors().iter().sum()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(bad) = self
            .factors()
            .iter()
            .find(|w| !(0.0..=1.0).contains(*w) || !w.is_finite())
        {
            return Err(RankError::InvalidWeights(format!(
                "weight {bad} outside [0, 1]"
            )));
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > 1e-3 {
            return Err(RankError::InvalidWeights(format!(
                "weights sum to {sum:.4}, expected 1.0"
            )));
        }
        Ok(())
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Season-level context pulled from the standings snapshot. Kept separate
/// from the rolling-window aggregate so the two points percentages are
/// never conflated.
#[derive(Debug, Clone)]
pub struct SeasonContext {
    pub points_percentage: f64,
    pub goal_differential: i32,
    pub streak: String,
}

impl SeasonContext {
    /// Neutral stand-in for a team absent from the standings: every factor
    /// it feeds lands on 50.
    pub fn neutral() -> Self {
        Self {
            points_percentage: 50.0,
            goal_differential: 0,
            streak: String::new(),
        }
    }
}

impl From<&StandingsEntry> for SeasonContext {
    fn from(entry: &StandingsEntry) -> Self {
        Self {
            points_percentage: entry.points_percentage,
            goal_differential: entry.goal_differential,
            streak: entry.streak.clone(),
        }
    }
}

/// The fourteen sub-scores feeding the weighted sum, kept for logging and
/// explainability
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub recent_record: f64,
    pub strength_of_schedule: f64,
    pub goal_scoring_dominance: f64,
    pub expected_goals: f64,
    pub possession: f64,
    pub pdo_luck: f64,
    pub shot_quality: f64,
    pub season_points_pct: f64,
    pub goal_differential: f64,
    pub special_teams: f64,
    pub win_quality: f64,
    pub winning_streak: f64,
    pub clutch_performance: f64,
    pub recent_form: f64,
}

impl ScoreBreakdown {
    pub fn weighted_total(&self, weights: &WeightTable) -> f64 {
        self.recent_record * weights.recent_record
            + self.strength_of_schedule * weights.strength_of_schedule
            + self.goal_scoring_dominance * weights.goal_scoring_dominance
            + self.expected_goals * weights.expected_goals
            + self.possession * weights.possession
            + self.pdo_luck * weights.pdo_luck
            + self.shot_quality * weights.shot_quality
            + self.season_points_pct * weights.season_points_pct
            + self.goal_differential * weights.goal_differential
            + self.special_teams * weights.special_teams
            + self.win_quality * weights.win_quality
            + self.winning_streak * weights.winning_streak
            + self.clutch_performance * weights.clutch_performance
            + self.recent_form * weights.recent_form
    }
}

/// Season goal differential mapped onto 0-100 (±30 saturates the scale)
fn normalized_goal_differential(diff: i32) -> f64 {
    f64::from(diff.clamp(-30, 30)) / 30.0 * 50.0 + 50.0
}

/// Assemble the fourteen sub-scores. Factors whose inputs were unavailable
/// arrive here already carrying their neutral defaults; the engine never
/// skips a factor.
pub fn breakdown(
    agg: &TeamAggregate,
    schedule: &ScheduleDifficulty,
    metrics: &AdvancedMetrics,
    season: &SeasonContext,
) -> ScoreBreakdown {
    ScoreBreakdown {
        recent_record: agg.points_percentage,
        strength_of_schedule: schedule.quality_adjusted_points_pct,
        goal_scoring_dominance: metrics.goal_dominance,
        expected_goals: metrics.expected_goals_share,
        possession: metrics.corsi_for_pct,
        pdo_luck: metrics.luck_score,
        shot_quality: metrics.shot_quality,
        season_points_pct: season.points_percentage,
        goal_differential: normalized_goal_differential(season.goal_differential),
        special_teams: (agg.powerplay_percentage + agg.penalty_kill_percentage) / 2.0,
        win_quality: metrics.win_quality,
        winning_streak: streak_bonus(&season.streak),
        clutch_performance: metrics.clutch_performance,
        recent_form: metrics.momentum_score,
    }
}

/// Final score: weighted sum of the fourteen sub-scores, rounded to one
/// decimal place. Pure function.
pub fn score(
    agg: &TeamAggregate,
    schedule: &ScheduleDifficulty,
    metrics: &AdvancedMetrics,
    season: &SeasonContext,
    weights: &WeightTable,
) -> f64 {
    let parts = breakdown(agg, schedule, metrics, season);
    let total = parts.weighted_total(weights);
    debug!(
        recent = format!("{:.1}", parts.recent_record),
        sos = format!("{:.1}", parts.strength_of_schedule),
        dominance = format!("{:.1}", parts.goal_scoring_dominance),
        xg = format!("{:.1}", parts.expected_goals),
        luck = format!("{:.1}", parts.pdo_luck),
        total = format!("{total:.1}"),
        "scored team"
    );
    (total * 10.0).round() / 10.0
}
