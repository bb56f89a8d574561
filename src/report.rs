//! Ranking output: terminal table and JSON serialization
//!
//! The JSON shape (a flat row list plus run metadata) is what the
//! persistence layer stores; field names are part of that contract.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::info;

use crate::domain::{RankingRow, StandingsSnapshot};
use crate::error::Result;

#[derive(Debug, Serialize)]
pub struct RankingReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub window_size: usize,
    pub rankings: &'a [RankingRow],
}

#[derive(Tabled)]
struct RankingLine {
    #[tabled(rename = "#")]
    rank: u32,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Record")]
    record: String,
    #[tabled(rename = "Pts%")]
    points_pct: String,
    #[tabled(rename = "GF")]
    goals_for: u32,
    #[tabled(rename = "GA")]
    goals_against: u32,
    #[tabled(rename = "PP%")]
    powerplay: String,
    #[tabled(rename = "PK%")]
    penalty_kill: String,
    #[tabled(rename = "SoS")]
    schedule: String,
    #[tabled(rename = "Streak")]
    streak: String,
}

impl From<&RankingRow> for RankingLine {
    fn from(row: &RankingRow) -> Self {
        Self {
            rank: row.rank,
            team: row.team.clone(),
            score: format!("{:.1}", row.score),
            record: row.record.clone(),
            points_pct: format!("{:.1}", row.points_percentage),
            goals_for: row.goals_for,
            goals_against: row.goals_against,
            powerplay: format!("{:.1}", row.powerplay_percentage),
            penalty_kill: format!("{:.1}", row.penalty_kill_percentage),
            schedule: row.schedule_grade.to_string(),
            streak: row.streak.clone(),
        }
    }
}

pub fn render_table(rows: &[RankingRow]) -> String {
    let lines: Vec<RankingLine> = rows.iter().map(RankingLine::from).collect();
    Table::new(lines).with(Style::sharp()).to_string()
}

#[derive(Tabled)]
struct StandingsLine {
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "GP")]
    games_played: u32,
    #[tabled(rename = "Pts")]
    points: u32,
    #[tabled(rename = "Pts%")]
    points_pct: String,
    #[tabled(rename = "Diff")]
    goal_differential: i32,
    #[tabled(rename = "Streak")]
    streak: String,
}

pub fn render_standings(snapshot: &StandingsSnapshot) -> String {
    let mut entries: Vec<&crate::domain::StandingsEntry> = snapshot.entries.iter().collect();
    entries.sort_by(|a, b| {
        b.points_percentage
            .partial_cmp(&a.points_percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.team.cmp(&b.team))
    });
    let lines: Vec<StandingsLine> = entries
        .into_iter()
        .map(|e| StandingsLine {
            team: e.team.clone(),
            games_played: e.games_played,
            points: e.points,
            points_pct: format!("{:.1}", e.points_percentage),
            goal_differential: e.goal_differential,
            streak: e.streak.clone(),
        })
        .collect();
    Table::new(lines).with(Style::sharp()).to_string()
}

/// Serialize the final row list for the persistence layer
pub fn write_json(rows: &[RankingRow], window_size: usize, path: &Path) -> Result<()> {
    let report = RankingReport {
        generated_at: Utc::now(),
        window_size,
        rankings: rows,
    };
    fs::write(path, serde_json::to_string_pretty(&report)?)?;
    info!(path = %path.display(), teams = rows.len(), "wrote rankings");
    Ok(())
}
