//! Box score → `GameStat` normalization
//!
//! Pure function of its inputs. All payload defaulting rules are applied
//! here: absent goalie breakdowns make every special-teams count 0
//! (opportunity-less, not missing), and a tied final score, invalid in
//! this domain, degrades to a zero-point record with a data-quality
//! warning instead of aborting the run.

use tracing::{debug, warn};

use crate::domain::{FinalPeriod, GameStat, Outcome};
use crate::error::{RankError, Result};
use crate::provider::payload::{parse_shot_split, Boxscore, TeamPlayers};

pub fn extract(boxscore: &Boxscore, team: &str) -> Result<GameStat> {
    let (own, opp, is_road) = if boxscore.home_team.abbrev == team {
        (&boxscore.home_team, &boxscore.away_team, false)
    } else if boxscore.away_team.abbrev == team {
        (&boxscore.away_team, &boxscore.home_team, true)
    } else {
        return Err(RankError::MalformedInput {
            game_id: boxscore.game_id,
            reason: format!(
                "team {team} matches neither {} nor {}",
                boxscore.home_team.abbrev, boxscore.away_team.abbrev
            ),
        });
    };

    let goals_for = own.score;
    let goals_against = opp.score;
    let final_period = boxscore.period_descriptor.final_period();

    let outcome = if goals_for > goals_against {
        Outcome::Win
    } else if goals_for < goals_against {
        if final_period.is_extra_time() {
            Outcome::OvertimeLoss
        } else {
            Outcome::Loss
        }
    } else {
        // Ties do not exist in this domain; treat as a zero-point record
        // but keep the game in the window.
        warn!(
            game_id = boxscore.game_id,
            team, goals_for, "tied final score in box score payload"
        );
        Outcome::Loss
    };

    let empty = TeamPlayers::default();
    let (own_players, opp_players) = match &boxscore.player_by_game_stats {
        Some(stats) if !is_road => (&stats.home_team, &stats.away_team),
        Some(stats) => (&stats.away_team, &stats.home_team),
        None => (&empty, &empty),
    };

    // Our power-play volume shows up as the opposing goaltender's
    // power-play shots against; our shorthanded time as our own goaltender's.
    let powerplay_opportunities = opp_players
        .starter()
        .map(|g| parse_shot_split(&g.power_play_shots_against).1)
        .unwrap_or(0);
    let (times_shorthanded, pp_goals_allowed) = own_players
        .starter()
        .map(|g| {
            (
                parse_shot_split(&g.power_play_shots_against).1,
                g.power_play_goals_against,
            )
        })
        .unwrap_or((0, 0));
    let penalty_kill_successes = times_shorthanded.saturating_sub(pp_goals_allowed);
    let powerplay_goals_for = own_players.powerplay_goals();

    let (empty_net_goals, scored_first) = match &boxscore.summary {
        Some(summary) => {
            let en = summary.goals().filter(|g| g.empty_net).count() as u32;
            let first = summary.goals().next().map(|g| g.team_abbrev.default == team);
            (en, first)
        }
        None => (0, None),
    };

    let margin = i64::from(goals_for.max(goals_against)) - i64::from(goals_for.min(goals_against));
    let is_one_goal_game = margin == 1 || margin - i64::from(empty_net_goals) == 1;

    let stat = GameStat {
        opponent: opp.abbrev.clone(),
        game_date: boxscore.game_date,
        outcome,
        final_period,
        goals_for,
        goals_against,
        shots_for: own.sog,
        shots_against: opp.sog,
        powerplay_goals_for,
        powerplay_opportunities,
        times_shorthanded,
        penalty_kill_successes,
        empty_net_goals,
        is_road_game: is_road,
        is_one_goal_game,
        scored_first,
    };
    debug!(
        game_id = boxscore.game_id,
        team,
        outcome = ?stat.outcome,
        score = format!("{goals_for}-{goals_against}"),
        "extracted game stats"
    );
    Ok(stat)
}
