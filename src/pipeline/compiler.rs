//! Full-league ranking runs
//!
//! Fans the per-team pipeline out across a bounded worker pool, isolates
//! per-team failures, and assembles the final ordered table. The standings
//! snapshot and opponent-strength map are built once up front and shared
//! read-only; the game-stat cache is shared because both participants of a
//! game may be processed by different workers.

use std::cmp::Ordering;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::domain::{
    AdvancedMetrics, FinalPeriod, GameStat, RankingRow, ScheduleDifficulty, ScheduledGame,
    StandingsSnapshot, TeamAggregate,
};
use crate::error::{RankError, Result};
use crate::pipeline::cache::GameStatCache;
use crate::pipeline::scoring::{self, SeasonContext, WeightTable};
use crate::pipeline::strength::OpponentStrength;
use crate::pipeline::{aggregate, metrics};
use crate::provider::StatsProvider;

#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Number of most-recent completed games per team
    pub window_size: usize,
    /// Concurrent per-team workers; kept small to respect upstream rate
    /// limits
    pub workers: usize,
    pub weights: WeightTable,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            window_size: 10,
            workers: 3,
            weights: WeightTable::standard(),
        }
    }
}

pub struct RankingCompiler {
    provider: Arc<dyn StatsProvider>,
    cache: Arc<GameStatCache>,
    config: CompilerConfig,
}

impl RankingCompiler {
    pub fn new(
        provider: Arc<dyn StatsProvider>,
        cache: Arc<GameStatCache>,
        config: CompilerConfig,
    ) -> Self {
        Self {
            provider,
            cache,
            config,
        }
    }

    /// Run the pipeline for every team in the roster. A team that yields no
    /// usable games is logged and omitted; the run fails only when zero
    /// teams produce a row.
    pub async fn compile(&self, roster: &[String]) -> Result<Vec<RankingRow>> {
        let standings = match self.provider.standings().await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                warn!(error = %e, "standings unavailable; using neutral strengths");
                Arc::new(StandingsSnapshot::default())
            }
        };
        let strengths = Arc::new(OpponentStrength::build(&standings));

        let semaphore = Arc::new(Semaphore::new(self.config.workers.max(1)));
        let mut tasks = JoinSet::new();
        for team in roster {
            let team = team.clone();
            let provider = Arc::clone(&self.provider);
            let cache = Arc::clone(&self.cache);
            let standings = Arc::clone(&standings);
            let strengths = Arc::clone(&strengths);
            let semaphore = Arc::clone(&semaphore);
            let window_size = self.config.window_size;
            let weights = self.config.weights.clone();
            tasks.spawn(async move {
                // Closed only on shutdown; treat as a provider-level failure
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => return (team, Err(RankError::Provider(e.to_string()))),
                };
                let row = process_team(
                    provider, cache, standings, strengths, weights, window_size, &team,
                )
                .await;
                (team, row)
            });
        }

        let mut rows = Vec::with_capacity(roster.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(row))) => rows.push(row),
                Ok((team, Err(RankError::EmptyWindow))) => {
                    warn!(team, "no usable games in window; excluded from ranking");
                }
                Ok((team, Err(e))) => {
                    warn!(team, error = %e, "team failed; excluded from ranking");
                }
                Err(e) => warn!(error = %e, "ranking worker panicked"),
            }
        }

        if rows.is_empty() {
            return Err(RankError::NoValidTeams);
        }

        rows.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.team.cmp(&b.team))
        });
        for (i, row) in rows.iter_mut().enumerate() {
            row.rank = i as u32 + 1;
        }

        info!(
            ranked = rows.len(),
            roster = roster.len(),
            cached_games = self.cache.len(),
            "ranking run complete"
        );
        Ok(rows)
    }
}

async fn process_team(
    provider: Arc<dyn StatsProvider>,
    cache: Arc<GameStatCache>,
    standings: Arc<StandingsSnapshot>,
    strengths: Arc<OpponentStrength>,
    weights: WeightTable,
    window_size: usize,
    team: &str,
) -> Result<RankingRow> {
    let recent = provider.recent_games(team).await?;
    if recent.is_empty() {
        return Err(RankError::EmptyWindow);
    }

    // Most recent first from the provider; the window is aggregated oldest
    // first so the momentum halves line up chronologically.
    let mut window: Vec<ScheduledGame> = recent.into_iter().take(window_size).collect();
    window.reverse();

    let mut games = Vec::with_capacity(window.len());
    for sched in &window {
        games.push(resolve_game(&provider, &cache, team, sched).await);
    }

    let agg = aggregate::aggregate(&games)?;
    let schedule = strengths.schedule_difficulty(&games);
    let advanced = metrics::estimate(&agg, &games);
    let season = match standings.get(team) {
        Some(entry) => SeasonContext::from(entry),
        None => {
            debug!(team, "not in standings snapshot; neutral season context");
            SeasonContext::neutral()
        }
    };
    let score = scoring::score(&agg, &schedule, &advanced, &season, &weights);

    Ok(build_row(team, score, &agg, &schedule, &advanced, &season, &games))
}

/// Fetch-and-extract one game through the cache. A missing or malformed box
/// score degrades to a zeroed regulation loss instead of dropping the
/// window slot.
async fn resolve_game(
    provider: &Arc<dyn StatsProvider>,
    cache: &Arc<GameStatCache>,
    team: &str,
    sched: &ScheduledGame,
) -> GameStat {
    match cache.get_or_compute(sched.game_id, team, None) {
        Ok(stat) => return stat,
        Err(RankError::MissingBoxscore(_)) => {}
        Err(e) => {
            warn!(team, game_id = sched.game_id, error = %e, "degrading unprocessable game");
            return GameStat::degraded(sched);
        }
    }

    let payload = match provider.boxscore(sched.game_id).await {
        Ok(payload) => payload,
        Err(e) => {
            warn!(team, game_id = sched.game_id, error = %e, "box score unavailable; degrading");
            return GameStat::degraded(sched);
        }
    };
    match cache.get_or_compute(sched.game_id, team, Some(&payload)) {
        Ok(stat) => stat,
        Err(e) => {
            warn!(team, game_id = sched.game_id, error = %e, "box score malformed; degrading");
            GameStat::degraded(sched)
        }
    }
}

fn build_row(
    team: &str,
    score: f64,
    agg: &TeamAggregate,
    schedule: &ScheduleDifficulty,
    advanced: &AdvancedMetrics,
    season: &SeasonContext,
    games: &[GameStat],
) -> RankingRow {
    RankingRow {
        rank: 0, // assigned after the league-wide sort
        team: team.to_string(),
        score,
        games_played: agg.games_played,
        record: agg.record.to_string(),
        points: agg.points,
        points_percentage: agg.points_percentage,
        goals_for: agg.goals_for,
        goals_against: agg.goals_against,
        shots_for: agg.shots_for,
        shots_against: agg.shots_against,
        goal_differential_per_game: agg.goal_differential_per_game,
        shot_differential_per_game: agg.shot_differential_per_game,
        shooting_percentage: agg.shooting_percentage,
        save_percentage: agg.save_percentage,
        powerplay_percentage: agg.powerplay_percentage,
        penalty_kill_percentage: agg.penalty_kill_percentage,
        road_wins: agg.road_wins,
        comeback_wins: agg.comeback_wins,
        one_goal_games: agg.one_goal_games,
        high_scoring_games: agg.high_scoring_games,
        regulation_wins: agg.regulation_wins,
        extra_time_wins: agg.extra_time_wins,
        schedule_difficulty: schedule.avg_opponent_strength,
        quality_adjusted_points_pct: schedule.quality_adjusted_points_pct,
        schedule_grade: schedule.grade,
        expected_goals_share: advanced.expected_goals_share,
        corsi_for_pct: advanced.corsi_for_pct,
        fenwick_for_pct: advanced.fenwick_for_pct,
        pdo: advanced.pdo,
        luck_score: advanced.luck_score,
        shot_quality: advanced.shot_quality,
        win_quality: advanced.win_quality,
        clutch_performance: advanced.clutch_performance,
        momentum_trend: advanced.momentum_trend,
        momentum_score: advanced.momentum_score,
        streak_bonus: metrics::streak_bonus(&season.streak),
        season_points_percentage: season.points_percentage,
        season_goal_differential: season.goal_differential,
        streak: season.streak.clone(),
        last_10_results: format_results(games),
    }
}

/// Per-game result string, most recent first: "W 5-2 vs BOS | L(OT) 2-3 @ NYR"
fn format_results(games: &[GameStat]) -> String {
    games
        .iter()
        .rev()
        .map(|g| {
            let letter = if g.outcome.is_win() { "W" } else { "L" };
            let suffix = match g.final_period {
                FinalPeriod::Overtime => "(OT)",
                FinalPeriod::Shootout => "(SO)",
                FinalPeriod::Regulation => "",
            };
            let location = if g.is_road_game { "@" } else { "vs" };
            format!(
                "{letter}{suffix} {}-{} {location} {}",
                g.goals_for, g.goals_against, g.opponent
            )
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
