//! Raw wire payloads from the upstream sports-data API
//!
//! These structs mirror the upstream JSON shapes verbatim (camelCase keys,
//! nested home/away blocks, goalie "saves/shots" strings). Conversion into
//! the strongly-typed domain model happens here and in the extractor, and
//! nowhere else; all defaulting rules live at this boundary.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::{FinalPeriod, GameId, ScheduledGame, StandingsEntry, StandingsSnapshot};

/// Regular-season game type code in the upstream API
pub const GAME_TYPE_REGULAR: u32 = 2;

/// Game states that mark a game as completed
const COMPLETED_STATES: [&str; 4] = ["OFF", "FINAL", "FINAL/OT", "FINAL/SO"];

/// Upstream strings localized as `{"default": "..."}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub default: String,
}

// ---------------------------------------------------------------------------
// Box score
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boxscore {
    #[serde(rename = "id")]
    pub game_id: GameId,
    pub game_date: NaiveDate,
    pub home_team: BoxscoreTeam,
    pub away_team: BoxscoreTeam,
    #[serde(default)]
    pub period_descriptor: PeriodDescriptor,
    #[serde(default)]
    pub player_by_game_stats: Option<PlayerByGameStats>,
    #[serde(default)]
    pub summary: Option<GameSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxscoreTeam {
    pub abbrev: String,
    #[serde(default)]
    pub score: u32,
    /// Shots on goal
    #[serde(default)]
    pub sog: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDescriptor {
    #[serde(default)]
    pub period_type: String,
}

impl PeriodDescriptor {
    pub fn final_period(&self) -> FinalPeriod {
        FinalPeriod::from_code(&self.period_type)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerByGameStats {
    #[serde(default)]
    pub home_team: TeamPlayers,
    #[serde(default)]
    pub away_team: TeamPlayers,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPlayers {
    #[serde(default)]
    pub forwards: Vec<SkaterLine>,
    #[serde(default)]
    pub defense: Vec<SkaterLine>,
    #[serde(default)]
    pub goalies: Vec<GoalieLine>,
}

impl TeamPlayers {
    /// The starting goaltender's line, when the payload marks one
    pub fn starter(&self) -> Option<&GoalieLine> {
        self.goalies.iter().find(|g| g.starter)
    }

    /// Power-play goals summed over all skaters
    pub fn powerplay_goals(&self) -> u32 {
        self.forwards
            .iter()
            .chain(self.defense.iter())
            .map(|s| s.power_play_goals)
            .sum()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkaterLine {
    #[serde(default)]
    pub power_play_goals: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalieLine {
    #[serde(default)]
    pub starter: bool,
    /// "saves/shots" strings, e.g. "24/26"
    #[serde(default)]
    pub even_strength_shots_against: String,
    #[serde(default)]
    pub power_play_shots_against: String,
    #[serde(default)]
    pub shorthanded_shots_against: String,
    #[serde(default)]
    pub power_play_goals_against: u32,
}

/// Parse a "saves/shots" string into (saves, total shots).
/// Anything malformed parses as (0, 0): opportunity-less, not missing.
pub fn parse_shot_split(raw: &str) -> (u32, u32) {
    let Some((saves, total)) = raw.split_once('/') else {
        return (0, 0);
    };
    match (saves.trim().parse(), total.trim().parse()) {
        (Ok(s), Ok(t)) => (s, t),
        _ => (0, 0),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    #[serde(default)]
    pub scoring: Vec<PeriodScoring>,
}

impl GameSummary {
    /// All goal events in scoring order
    pub fn goals(&self) -> impl Iterator<Item = &GoalEvent> {
        self.scoring.iter().flat_map(|p| p.goals.iter())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodScoring {
    #[serde(default)]
    pub goals: Vec<GoalEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalEvent {
    #[serde(default)]
    pub team_abbrev: LocalizedText,
    #[serde(default)]
    pub empty_net: bool,
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsPayload {
    #[serde(default)]
    pub standings: Vec<StandingsLine>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsLine {
    #[serde(default)]
    pub team_abbrev: LocalizedText,
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub points: u32,
    /// The upstream reports this as a 0-1 fraction
    #[serde(default, alias = "pointPct")]
    pub point_pctg: f64,
    #[serde(default)]
    pub goal_differential: i32,
    #[serde(default)]
    pub streak_type: String,
    #[serde(default)]
    pub streak_count: u32,
}

impl StandingsPayload {
    /// Convert to the domain snapshot, normalizing the points percentage to
    /// the 0-100 scale and assembling the streak string.
    pub fn into_snapshot(self) -> StandingsSnapshot {
        let entries = self
            .standings
            .into_iter()
            .filter(|line| !line.team_abbrev.default.is_empty())
            .map(|line| {
                let points_percentage = if line.point_pctg <= 1.0 {
                    line.point_pctg * 100.0
                } else {
                    line.point_pctg
                };
                let streak = if line.streak_type.is_empty() || line.streak_count == 0 {
                    String::new()
                } else {
                    format!("{}{}", line.streak_type, line.streak_count)
                };
                StandingsEntry {
                    team: line.team_abbrev.default,
                    games_played: line.games_played,
                    points: line.points,
                    points_percentage,
                    goal_differential: line.goal_differential,
                    streak,
                }
            })
            .collect();
        StandingsSnapshot { entries }
    }
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    #[serde(default)]
    pub games: Vec<ScheduleLine>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleLine {
    #[serde(rename = "id")]
    pub game_id: GameId,
    pub game_date: NaiveDate,
    #[serde(default)]
    pub game_type: u32,
    #[serde(default)]
    pub game_state: String,
    pub home_team: ScheduleTeam,
    pub away_team: ScheduleTeam,
    #[serde(default)]
    pub game_outcome: GameOutcomeLine,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTeam {
    pub abbrev: String,
    #[serde(default)]
    pub score: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOutcomeLine {
    #[serde(default)]
    pub last_period_type: String,
}

impl ScheduleLine {
    /// Whether this line is a completed regular-season game with a real
    /// final score
    pub fn is_completed_regular_season(&self) -> bool {
        self.game_type == GAME_TYPE_REGULAR
            && COMPLETED_STATES.contains(&self.game_state.as_str())
            && (self.home_team.score > 0 || self.away_team.score > 0)
    }

    /// Project this schedule line onto one team's perspective. Returns
    /// `None` when the team played in neither slot.
    pub fn normalize(&self, team: &str) -> Option<ScheduledGame> {
        let (own, opp, is_road) = if self.home_team.abbrev == team {
            (&self.home_team, &self.away_team, false)
        } else if self.away_team.abbrev == team {
            (&self.away_team, &self.home_team, true)
        } else {
            return None;
        };
        Some(ScheduledGame {
            game_id: self.game_id,
            game_date: self.game_date,
            opponent: opp.abbrev.clone(),
            is_road,
            goals_for: own.score,
            goals_against: opp.score,
            final_period: FinalPeriod::from_code(&self.game_outcome.last_period_type),
        })
    }
}
