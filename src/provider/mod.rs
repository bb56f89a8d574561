//! External data boundary
//!
//! The ranking core never talks to the network. Everything it consumes
//! (the standings snapshot, each team's recent completed games, raw box
//! scores) arrives through the `StatsProvider` trait. Implementations own
//! their transport concerns (timeouts, retries, rate limiting); the core
//! only promises to tolerate per-team failures.

pub mod fixture;
pub mod payload;

use async_trait::async_trait;

use crate::domain::{GameId, ScheduledGame, StandingsSnapshot};
use crate::error::Result;
pub use fixture::FixtureProvider;
pub use payload::Boxscore;

#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Current league standings snapshot
    async fn standings(&self) -> Result<StandingsSnapshot>;

    /// A team's completed regular-season games, most recent first.
    /// Callers truncate to their window; providers may return more.
    async fn recent_games(&self, team: &str) -> Result<Vec<ScheduledGame>>;

    /// Raw box-score payload for one game
    async fn boxscore(&self, game_id: GameId) -> Result<Boxscore>;
}
