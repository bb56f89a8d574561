//! End-to-end pipeline tests against in-memory providers

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use puckrank::domain::{FinalPeriod, GameId, ScheduledGame, StandingsEntry, StandingsSnapshot};
use puckrank::error::{RankError, Result};
use puckrank::pipeline::{CompilerConfig, GameStatCache, RankingCompiler};
use puckrank::provider::payload::{Boxscore, BoxscoreTeam, PeriodDescriptor};
use puckrank::provider::StatsProvider;

// ---------------------------------------------------------------------------
// Synthetic league
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct LeagueProvider {
    standings: StandingsSnapshot,
    schedules: HashMap<String, Vec<ScheduledGame>>,
    boxscores: HashMap<GameId, Boxscore>,
}

#[async_trait]
impl StatsProvider for LeagueProvider {
    async fn standings(&self) -> Result<StandingsSnapshot> {
        Ok(self.standings.clone())
    }

    async fn recent_games(&self, team: &str) -> Result<Vec<ScheduledGame>> {
        self.schedules
            .get(team)
            .cloned()
            .ok_or_else(|| RankError::Provider(format!("no schedule for {team}")))
    }

    async fn boxscore(&self, game_id: GameId) -> Result<Boxscore> {
        self.boxscores
            .get(&game_id)
            .cloned()
            .ok_or_else(|| RankError::Provider(format!("no box score {game_id}")))
    }
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
}

fn boxscore(game_id: GameId, day: u32, home: &str, away: &str, hs: u32, aws: u32) -> Boxscore {
    Boxscore {
        game_id,
        game_date: date(day),
        home_team: BoxscoreTeam {
            abbrev: home.into(),
            score: hs,
            sog: 28 + hs,
        },
        away_team: BoxscoreTeam {
            abbrev: away.into(),
            score: aws,
            sog: 26 + aws,
        },
        period_descriptor: PeriodDescriptor {
            period_type: "REG".into(),
        },
        player_by_game_stats: None,
        summary: None,
    }
}

/// Round-robin league where the lower-index team always wins 4-2, plus EDM
/// running the table 3-1 against CGY, which appears in no standings line.
fn league() -> LeagueProvider {
    let teams = ["COL", "DAL", "SJS", "WPG"];
    let mut schedules: HashMap<String, Vec<ScheduledGame>> =
        teams.iter().map(|t| (t.to_string(), Vec::new())).collect();
    let mut boxscores = HashMap::new();

    let mut game_id: GameId = 2025020300;
    let mut day = 1u32;
    for i in 0..teams.len() {
        for j in (i + 1)..teams.len() {
            let (home, away) = (teams[i], teams[j]);
            boxscores.insert(game_id, boxscore(game_id, day, home, away, 4, 2));
            schedules.get_mut(home).unwrap().push(ScheduledGame {
                game_id,
                game_date: date(day),
                opponent: away.into(),
                is_road: false,
                goals_for: 4,
                goals_against: 2,
                final_period: FinalPeriod::Regulation,
            });
            schedules.get_mut(away).unwrap().push(ScheduledGame {
                game_id,
                game_date: date(day),
                opponent: home.into(),
                is_road: true,
                goals_for: 2,
                goals_against: 4,
                final_period: FinalPeriod::Regulation,
            });
            game_id += 1;
            day += 1;
        }
    }

    // EDM's perfect ten against an unlisted opponent
    let mut edm_games = Vec::new();
    for k in 0..10u32 {
        let id = 2025020400 + GameId::from(k);
        let game_day = 10 + k;
        boxscores.insert(id, boxscore(id, game_day, "EDM", "CGY", 3, 1));
        edm_games.push(ScheduledGame {
            game_id: id,
            game_date: date(game_day),
            opponent: "CGY".into(),
            is_road: false,
            goals_for: 3,
            goals_against: 1,
            final_period: FinalPeriod::Regulation,
        });
    }
    edm_games.reverse(); // most recent first, as providers report
    schedules.insert("EDM".to_string(), edm_games);

    for schedule in schedules.values_mut() {
        schedule.sort_by(|a, b| b.game_date.cmp(&a.game_date));
    }

    let entry = |team: &str, pct: f64, diff: i32, streak: &str| StandingsEntry {
        team: team.into(),
        games_played: 15,
        points: (pct * 0.3) as u32,
        points_percentage: pct,
        goal_differential: diff,
        streak: streak.into(),
    };
    LeagueProvider {
        standings: StandingsSnapshot {
            entries: vec![
                entry("COL", 70.0, 18, "W4"),
                entry("DAL", 55.0, 6, "W1"),
                entry("SJS", 45.0, -4, "L2"),
                entry("WPG", 30.0, -20, "L6"),
            ],
        },
        schedules,
        boxscores,
    }
}

fn roster() -> Vec<String> {
    ["COL", "DAL", "SJS", "WPG", "EDM"]
        .iter()
        .map(|t| t.to_string())
        .collect()
}

fn compiler(provider: LeagueProvider) -> RankingCompiler {
    RankingCompiler::new(
        Arc::new(provider),
        Arc::new(GameStatCache::new()),
        CompilerConfig::default(),
    )
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ranks_are_a_dense_permutation() {
    let rows = compiler(league()).compile(&roster()).await.unwrap();
    assert_eq!(rows.len(), 5);
    let ranks: Vec<u32> = rows.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    for pair in rows.windows(2) {
        assert!(pair[0].score >= pair[1].score, "scores must be descending");
    }
}

#[tokio::test]
async fn round_robin_dominance_orders_the_table() {
    let rows = compiler(league()).compile(&roster()).await.unwrap();
    let rank_of = |team: &str| rows.iter().find(|r| r.team == team).unwrap().rank;
    assert!(rank_of("COL") < rank_of("DAL"));
    assert!(rank_of("DAL") < rank_of("SJS"));
    assert!(rank_of("SJS") < rank_of("WPG"));
}

#[tokio::test]
async fn rerun_on_frozen_inputs_is_byte_identical() {
    let provider = league();
    let first = compiler(provider.clone()).compile(&roster()).await.unwrap();
    let second = compiler(provider).compile(&roster()).await.unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn perfect_window_without_special_teams_data() {
    let rows = compiler(league()).compile(&roster()).await.unwrap();
    let edm = rows.iter().find(|r| r.team == "EDM").unwrap();
    assert_eq!(edm.record, "10-0-0");
    assert!((edm.points_percentage - 100.0).abs() < 1e-9);
    assert_eq!(edm.powerplay_percentage, 0.0);
    assert_eq!(edm.penalty_kill_percentage, 0.0);
    // Every opponent is absent from the standings: neutral 0.5 strength
    assert!((edm.schedule_difficulty - 0.5).abs() < 1e-9);
    assert!((edm.quality_adjusted_points_pct - 50.0).abs() < 1e-9);
    // Absent from the standings itself: neutral season context
    assert!((edm.season_points_percentage - 50.0).abs() < 1e-9);
    assert_eq!(edm.streak, "");
    assert_eq!(edm.streak_bonus, 50.0);
}

#[tokio::test]
async fn record_always_sums_to_games_played() {
    let rows = compiler(league()).compile(&roster()).await.unwrap();
    for row in &rows {
        let parts: Vec<u32> = row
            .record
            .split('-')
            .map(|p| p.parse().unwrap())
            .collect();
        assert_eq!(parts.iter().sum::<u32>(), row.games_played);
    }
}

#[tokio::test]
async fn window_truncates_to_configured_size() {
    let compiler = RankingCompiler::new(
        Arc::new(league()),
        Arc::new(GameStatCache::new()),
        CompilerConfig {
            window_size: 4,
            ..CompilerConfig::default()
        },
    );
    let rows = compiler.compile(&roster()).await.unwrap();
    let edm = rows.iter().find(|r| r.team == "EDM").unwrap();
    assert_eq!(edm.games_played, 4);
    assert_eq!(edm.record, "4-0-0");
}

// ---------------------------------------------------------------------------
// Failure isolation (mocked provider)
// ---------------------------------------------------------------------------

mockall::mock! {
    Provider {}

    #[async_trait]
    impl StatsProvider for Provider {
        async fn standings(&self) -> Result<StandingsSnapshot>;
        async fn recent_games(&self, team: &str) -> Result<Vec<ScheduledGame>>;
        async fn boxscore(&self, game_id: GameId) -> Result<Boxscore>;
    }
}

#[tokio::test]
async fn one_failing_team_does_not_poison_the_run() {
    let healthy = league();
    let mut mock = MockProvider::new();
    let standings = healthy.standings.clone();
    mock.expect_standings()
        .returning(move || Ok(standings.clone()));
    let schedules = healthy.schedules.clone();
    mock.expect_recent_games().returning(move |team| {
        if team == "DAL" {
            Err(RankError::Provider("upstream timed out".into()))
        } else {
            schedules
                .get(team)
                .cloned()
                .ok_or_else(|| RankError::Provider(format!("no schedule for {team}")))
        }
    });
    let boxscores = healthy.boxscores.clone();
    mock.expect_boxscore().returning(move |game_id| {
        boxscores
            .get(&game_id)
            .cloned()
            .ok_or_else(|| RankError::Provider(format!("no box score {game_id}")))
    });

    let compiler = RankingCompiler::new(
        Arc::new(mock),
        Arc::new(GameStatCache::new()),
        CompilerConfig::default(),
    );
    let rows = compiler.compile(&roster()).await.unwrap();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.team != "DAL"));
    assert_eq!(rows.last().unwrap().rank, 4);
}

#[tokio::test]
async fn standings_outage_degrades_to_neutral_strengths() {
    let healthy = league();
    let mut mock = MockProvider::new();
    mock.expect_standings()
        .returning(|| Err(RankError::Provider("standings endpoint down".into())));
    let schedules = healthy.schedules.clone();
    mock.expect_recent_games().returning(move |team| {
        schedules
            .get(team)
            .cloned()
            .ok_or_else(|| RankError::Provider(format!("no schedule for {team}")))
    });
    let boxscores = healthy.boxscores.clone();
    mock.expect_boxscore().returning(move |game_id| {
        boxscores
            .get(&game_id)
            .cloned()
            .ok_or_else(|| RankError::Provider(format!("no box score {game_id}")))
    });

    let compiler = RankingCompiler::new(
        Arc::new(mock),
        Arc::new(GameStatCache::new()),
        CompilerConfig::default(),
    );
    let rows = compiler.compile(&roster()).await.unwrap();
    assert_eq!(rows.len(), 5);
    for row in &rows {
        assert!((row.schedule_difficulty - 0.5).abs() < 1e-9);
        assert!((row.season_points_percentage - 50.0).abs() < 1e-9);
    }
}

#[tokio::test]
async fn every_team_failing_fails_the_run() {
    let mut mock = MockProvider::new();
    mock.expect_standings()
        .returning(|| Ok(StandingsSnapshot::default()));
    mock.expect_recent_games()
        .returning(|_| Err(RankError::Provider("upstream down".into())));

    let compiler = RankingCompiler::new(
        Arc::new(mock),
        Arc::new(GameStatCache::new()),
        CompilerConfig::default(),
    );
    let err = compiler.compile(&roster()).await.unwrap_err();
    assert!(matches!(err, RankError::NoValidTeams));
}
