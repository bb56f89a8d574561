//! Per-game domain types
//!
//! `GameStat` is the canonical record distilled from one raw box score for
//! one team. It is created once, never mutated, and cached for the lifetime
//! of a ranking run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Upstream game identifier (e.g. 2025020123)
pub type GameId = u64;

/// Final result of a game from one team's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    OvertimeLoss,
}

impl Outcome {
    /// League points earned: 2 for a win, 1 for an OT/SO loss, 0 for a
    /// regulation loss
    pub fn points_earned(&self) -> u32 {
        match self {
            Self::Win => 2,
            Self::OvertimeLoss => 1,
            Self::Loss => 0,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, Self::Win)
    }
}

/// Period type in which the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalPeriod {
    Regulation,
    Overtime,
    Shootout,
}

impl FinalPeriod {
    pub fn is_extra_time(&self) -> bool {
        !matches!(self, Self::Regulation)
    }

    /// Parse the upstream period-type code ("REG", "OT", "SO")
    pub fn from_code(code: &str) -> Self {
        match code {
            "OT" => Self::Overtime,
            "SO" => Self::Shootout,
            _ => Self::Regulation,
        }
    }
}

/// One completed game from the team's schedule, as reported by the data
/// provider. Carries enough context to stand in for a box score that could
/// not be fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub game_id: GameId,
    pub game_date: NaiveDate,
    pub opponent: String,
    pub is_road: bool,
    pub goals_for: u32,
    pub goals_against: u32,
    pub final_period: FinalPeriod,
}

/// Canonical per-team, per-game statistics distilled from a raw box score.
///
/// Invariant: `penalty_kill_successes <= times_shorthanded`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStat {
    pub opponent: String,
    pub game_date: NaiveDate,
    pub outcome: Outcome,
    pub final_period: FinalPeriod,
    pub goals_for: u32,
    pub goals_against: u32,
    pub shots_for: u32,
    pub shots_against: u32,
    pub powerplay_goals_for: u32,
    pub powerplay_opportunities: u32,
    pub times_shorthanded: u32,
    pub penalty_kill_successes: u32,
    pub empty_net_goals: u32,
    pub is_road_game: bool,
    /// One-goal margin after subtracting empty-net goals
    pub is_one_goal_game: bool,
    /// Whether this team scored the game's first goal; `None` when the
    /// scoring summary is absent from the payload
    pub scored_first: Option<bool>,
}

impl GameStat {
    pub fn points_earned(&self) -> u32 {
        self.outcome.points_earned()
    }

    /// Zeroed stand-in for a game whose box score was missing or could not
    /// be processed. Counts as a regulation loss so the window slot is kept
    /// rather than silently dropped.
    pub fn degraded(sched: &ScheduledGame) -> Self {
        Self {
            opponent: sched.opponent.clone(),
            game_date: sched.game_date,
            outcome: Outcome::Loss,
            final_period: FinalPeriod::Regulation,
            goals_for: 0,
            goals_against: 0,
            shots_for: 0,
            shots_against: 0,
            powerplay_goals_for: 0,
            powerplay_opportunities: 0,
            times_shorthanded: 0,
            penalty_kill_successes: 0,
            empty_net_goals: 0,
            is_road_game: sched.is_road,
            is_one_goal_game: false,
            scored_first: None,
        }
    }
}
