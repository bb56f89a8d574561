//! Per-run memoization of extracted game stats
//!
//! The same game is requested by both participating teams' workers, so the
//! cache is keyed by `(game_id, team)` and must be safe for concurrent
//! read/write. It is an explicit object injected into the compiler, never
//! a process-wide singleton, so independent ranking runs and tests do not
//! share state.

use dashmap::DashMap;

use crate::domain::{GameId, GameStat};
use crate::error::{RankError, Result};
use crate::pipeline::extractor;
use crate::provider::Boxscore;

#[derive(Debug, Default)]
pub struct GameStatCache {
    entries: DashMap<(GameId, String), GameStat>,
}

impl GameStatCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached record for `(game_id, team)`, extracting and
    /// storing it from `payload` on a miss. On a hit the payload is never
    /// touched, so callers that know the entry exists may pass `None`.
    pub fn get_or_compute(
        &self,
        game_id: GameId,
        team: &str,
        payload: Option<&Boxscore>,
    ) -> Result<GameStat> {
        let key = (game_id, team.to_string());
        if let Some(hit) = self.entries.get(&key) {
            return Ok(hit.clone());
        }
        let payload = payload.ok_or(RankError::MissingBoxscore(game_id))?;
        let stat = extractor::extract(payload, team)?;
        self.entries.insert(key, stat.clone());
        Ok(stat)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empty the cache between independent ranking runs. Never called
    /// mid-run.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::payload::{BoxscoreTeam, PeriodDescriptor};
    use chrono::NaiveDate;

    fn boxscore() -> Boxscore {
        Boxscore {
            game_id: 2025020200,
            game_date: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            home_team: BoxscoreTeam {
                abbrev: "EDM".into(),
                score: 5,
                sog: 33,
            },
            away_team: BoxscoreTeam {
                abbrev: "CGY".into(),
                score: 3,
                sog: 29,
            },
            period_descriptor: PeriodDescriptor {
                period_type: "REG".into(),
            },
            player_by_game_stats: None,
            summary: None,
        }
    }

    #[test]
    fn test_miss_then_hit_without_payload() {
        let cache = GameStatCache::new();
        let bs = boxscore();

        let first = cache.get_or_compute(bs.game_id, "EDM", Some(&bs)).unwrap();
        assert_eq!(first.goals_for, 5);
        assert_eq!(cache.len(), 1);

        // Hit: no payload needed
        let second = cache.get_or_compute(bs.game_id, "EDM", None).unwrap();
        assert_eq!(second.goals_for, 5);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_miss_without_payload_errors() {
        let cache = GameStatCache::new();
        let err = cache.get_or_compute(42, "EDM", None).unwrap_err();
        assert!(matches!(err, RankError::MissingBoxscore(42)));
    }

    #[test]
    fn test_same_game_two_teams_two_entries() {
        let cache = GameStatCache::new();
        let bs = boxscore();
        let home = cache.get_or_compute(bs.game_id, "EDM", Some(&bs)).unwrap();
        let away = cache.get_or_compute(bs.game_id, "CGY", Some(&bs)).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(home.goals_for, 5);
        assert_eq!(away.goals_for, 3);
    }

    #[test]
    fn test_clear() {
        let cache = GameStatCache::new();
        let bs = boxscore();
        cache.get_or_compute(bs.game_id, "EDM", Some(&bs)).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
