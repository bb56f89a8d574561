//! Window aggregation: ordered `GameStat` list → `TeamAggregate`
//!
//! The input is already windowed (e.g. last 10 completed regular-season
//! games) and ordered oldest first; no date filtering happens here. Every
//! derived rate uses the guarded-division rule: a zero denominator yields
//! exactly 0.0.

use crate::domain::{GameStat, TeamAggregate, TeamRecord};
use crate::error::{RankError, Result};

/// Guarded percentage: 0.0 when the denominator is 0
fn pct(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}

pub fn aggregate(games: &[GameStat]) -> Result<TeamAggregate> {
    if games.is_empty() {
        return Err(RankError::EmptyWindow);
    }

    let games_played = games.len() as u32;
    let mut record = TeamRecord::default();
    let mut points = 0u32;
    let (mut goals_for, mut goals_against) = (0u32, 0u32);
    let (mut shots_for, mut shots_against) = (0u32, 0u32);
    let (mut pp_goals, mut pp_opportunities) = (0u32, 0u32);
    let (mut pk_successes, mut shorthanded) = (0u32, 0u32);
    let mut road_wins = 0u32;
    let mut comeback_wins = 0u32;
    let mut one_goal_games = 0u32;
    let mut high_scoring_games = 0u32;
    let mut regulation_wins = 0u32;
    let mut extra_time_wins = 0u32;

    for game in games {
        use crate::domain::Outcome::*;
        match game.outcome {
            Win => {
                record.wins += 1;
                if game.is_road_game {
                    road_wins += 1;
                }
                if game.scored_first == Some(false) {
                    comeback_wins += 1;
                }
                if game.final_period.is_extra_time() {
                    extra_time_wins += 1;
                } else {
                    regulation_wins += 1;
                }
            }
            Loss => record.losses += 1,
            OvertimeLoss => record.overtime_losses += 1,
        }
        points += game.points_earned();
        goals_for += game.goals_for;
        goals_against += game.goals_against;
        shots_for += game.shots_for;
        shots_against += game.shots_against;
        pp_goals += game.powerplay_goals_for;
        pp_opportunities += game.powerplay_opportunities;
        pk_successes += game.penalty_kill_successes;
        shorthanded += game.times_shorthanded;
        if game.is_one_goal_game {
            one_goal_games += 1;
        }
        if game.goals_for >= 4 {
            high_scoring_games += 1;
        }
    }

    let gp = f64::from(games_played);
    let save_percentage = if shots_against == 0 {
        0.0
    } else {
        (1.0 - f64::from(goals_against) / f64::from(shots_against)) * 100.0
    };

    Ok(TeamAggregate {
        games_played,
        record,
        points,
        points_percentage: pct(f64::from(points), gp * 2.0),
        goals_for,
        goals_against,
        shots_for,
        shots_against,
        goal_differential_per_game: (f64::from(goals_for) - f64::from(goals_against)) / gp,
        shot_differential_per_game: (f64::from(shots_for) - f64::from(shots_against)) / gp,
        shooting_percentage: pct(f64::from(goals_for), f64::from(shots_for)),
        save_percentage,
        powerplay_percentage: pct(f64::from(pp_goals), f64::from(pp_opportunities)).min(100.0),
        penalty_kill_percentage: pct(f64::from(pk_successes), f64::from(shorthanded)),
        road_wins,
        comeback_wins,
        one_goal_games,
        high_scoring_games,
        regulation_wins,
        extra_time_wins,
    })
}
