pub mod config;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod provider;
pub mod report;

pub use config::AppConfig;
pub use domain::{
    AdvancedMetrics, FinalPeriod, GameId, GameStat, Outcome, RankingRow, ScheduleDifficulty,
    ScheduleGrade, ScheduledGame, StandingsEntry, StandingsSnapshot, TeamAggregate, TeamRecord,
};
pub use error::{RankError, Result};
pub use pipeline::{
    CompilerConfig, GameStatCache, OpponentStrength, RankingCompiler, SeasonContext, WeightTable,
};
pub use provider::{FixtureProvider, StatsProvider};
