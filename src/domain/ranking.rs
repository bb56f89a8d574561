//! Final ranking output shape
//!
//! `RankingRow` is the flat, serializable record handed to the persistence
//! layer and the presentation layer. Field names are part of the external
//! contract; downstream consumers read them as-is.

use serde::Serialize;

use super::schedule::ScheduleGrade;

#[derive(Debug, Clone, Serialize)]
pub struct RankingRow {
    pub rank: u32,
    pub team: String,
    pub score: f64,

    // Rolling-window aggregate
    pub games_played: u32,
    pub record: String,
    pub points: u32,
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
    pub high_scoring_games: u32,
    pub regulation_wins: u32,
    pub extra_time_wins: u32,

    // Schedule context
    pub schedule_difficulty: f64,
    pub quality_adjusted_points_pct: f64,
    pub schedule_grade: ScheduleGrade,

    // Advanced metrics
    pub expected_goals_share: f64,
    pub corsi_for_pct: f64,
    pub fenwick_for_pct: f64,
    pub pdo: f64,
    pub luck_score: f64,
    pub shot_quality: f64,
    pub win_quality: f64,
    pub clutch_performance: f64,
    pub momentum_trend: f64,
    pub momentum_score: f64,
    pub streak_bonus: f64,

    // Season (standings) context, distinct from the rolling-window figures
    pub season_points_percentage: f64,
    pub season_goal_differential: i32,
    pub streak: String,

    /// Per-game results, most recent first, e.g.
    /// "W 5-2 vs BOS | L(OT) 2-3 @ NYR"
    pub last_10_results: String,
}
