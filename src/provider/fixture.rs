//! Filesystem-backed stats provider
//!
//! Reads a snapshot directory captured from the upstream API:
//!
//! ```text
//! snapshot/
//!   standings.json          # standings payload
//!   schedule_BOS.json       # one schedule payload per team
//!   boxscore_2025020123.json
//! ```
//!
//! Useful for offline runs, reproducible rankings and tests. Missing files
//! surface as provider errors for that team/game only; the compiler
//! isolates them.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::payload::{Boxscore, SchedulePayload, StandingsPayload};
use super::StatsProvider;
use crate::domain::{GameId, ScheduledGame, StandingsSnapshot};
use crate::error::{RankError, Result};

pub struct FixtureProvider {
    root: PathBuf,
}

impl FixtureProvider {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.root.join(name);
        let raw = fs::read_to_string(&path)
            .map_err(|e| RankError::Provider(format!("{}: {e}", path.display())))?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[async_trait]
impl StatsProvider for FixtureProvider {
    async fn standings(&self) -> Result<StandingsSnapshot> {
        let payload: StandingsPayload = self.read_json("standings.json")?;
        let snapshot = payload.into_snapshot();
        debug!(teams = snapshot.entries.len(), "loaded standings snapshot");
        Ok(snapshot)
    }

    async fn recent_games(&self, team: &str) -> Result<Vec<ScheduledGame>> {
        let payload: SchedulePayload = self.read_json(&format!("schedule_{team}.json"))?;
        let mut games: Vec<ScheduledGame> = payload
            .games
            .iter()
            .filter(|line| line.is_completed_regular_season())
            .filter_map(|line| line.normalize(team))
            .collect();
        games.sort_by(|a, b| b.game_date.cmp(&a.game_date));
        debug!(team, games = games.len(), "loaded completed games");
        Ok(games)
    }

    async fn boxscore(&self, game_id: GameId) -> Result<Boxscore> {
        self.read_json(&format!("boxscore_{game_id}.json"))
    }
}
