//! Proxy advanced-analytics figures
//!
//! No shot-location or tracking feed exists upstream, so these are
//! closed-form estimates derived from box-score aggregates alone. The
//! estimator in `pipeline::metrics` owns the formulas; this is the plain
//! data carrier.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancedMetrics {
    /// Expected-goals share estimate, clamped to 30-70
    pub expected_goals_share: f64,
    /// Possession share estimate (Corsi-style), clamped to 35-65
    pub corsi_for_pct: f64,
    /// Secondary possession share (Fenwick-style), capped at 67
    pub fenwick_for_pct: f64,
    /// Estimated shooting% + save% (league average ~100)
    pub pdo: f64,
    pub estimated_shooting_pct: f64,
    pub estimated_save_pct: f64,
    /// Regression expectation from the PDO bands: low = expect decline,
    /// high = expect improvement, 50 = neutral
    pub luck_score: f64,
    /// Goals per game plus high-scoring-game rate, 10-100
    pub shot_quality: f64,
    /// Regulation wins weighted over all wins, 0-100; 50 with no wins
    pub win_quality: f64,
    /// Share of available points earned in one-goal games, 0-100; 50 with
    /// no one-goal games
    pub clutch_performance: f64,
    /// Second-half points% minus first-half points% of the window
    pub momentum_trend: f64,
    /// Trend centered on 50 and clamped to 0-100
    pub momentum_score: f64,
    /// Goals-per-game and win-margin composite, 0-100
    pub goal_dominance: f64,
}
