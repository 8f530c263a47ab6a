use std::collections::{HashMap, HashSet};

use crate::game_log::Game;

/// Additive floor on opponent win percentage, so a winless opponent still
/// contributes non-zero weight to a blowout win.
const OPP_STRENGTH_FLOOR: f64 = 0.1;
/// Stand-in win percentage for an opponent with no computed record.
const NEUTRAL_WIN_PCT: f64 = 0.5;
/// Per-week multiplier applied to games older than the latest week.
const RECENCY_DECAY: f64 = 0.95;

const CLINCH_WINS: u32 = 10;
const ELIMINATION_WINS: u32 = 6;

/// Win/loss tally over a team's completed games. Every completed game counts
/// exactly once: a strict outscore is a win, anything else (including a tie)
/// is a loss, so `wins + losses` always equals games played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
}

impl TeamRecord {
    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }

    /// `None` for a team with no completed games; such a team never enters
    /// the record mapping, so this is a defensive guard rather than a
    /// reachable state.
    pub fn win_pct(&self) -> Option<f64> {
        match self.games() {
            0 => None,
            games => Some(f64::from(self.wins) / f64::from(games)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamStatus {
    Clinched,
    InTheHunt,
    Eliminated,
}

impl TeamStatus {
    /// Classification is a pure win-count threshold. Whether the team played
    /// in the latest week does not factor in.
    fn from_wins(wins: u32) -> Self {
        if wins >= CLINCH_WINS {
            TeamStatus::Clinched
        } else if wins <= ELIMINATION_WINS {
            TeamStatus::Eliminated
        } else {
            TeamStatus::InTheHunt
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TeamStatus::Clinched => "CLINCHED",
            TeamStatus::InTheHunt => "IN THE HUNT",
            TeamStatus::Eliminated => "ELIMINATED",
        }
    }
}

/// One ranked team, as handed to the report layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry {
    pub team: String,
    /// Power quotient, rounded to 2 decimals. Higher is stronger.
    pub score: f64,
    pub record: TeamRecord,
    pub status: TeamStatus,
    /// 1-based position after the stable descending sort on `score`.
    pub rank: usize,
}

/// Select the games that participate in ranking: target season, target game
/// type, both scores present. Duplicates in the feed are not collapsed.
pub fn completed_games<'a>(log: &'a [Game], season: u16, game_type: &str) -> Vec<&'a Game> {
    log.iter()
        .filter(|g| g.season == season && g.game_type == game_type && g.is_completed())
        .collect()
}

/// Distinct team codes in first-appearance order (home before away within a
/// game). Computed once and shared by the record and scoring passes so both
/// agree on the same team universe, and so equal-score ties resolve by this
/// order.
pub fn team_order(games: &[&Game]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut order = Vec::new();
    for g in games {
        for team in [g.home_team.as_str(), g.away_team.as_str()] {
            if seen.insert(team) {
                order.push(team.to_string());
            }
        }
    }
    order
}

/// Tally wins and losses per team over the filtered games.
pub fn team_records(games: &[&Game]) -> HashMap<String, TeamRecord> {
    let mut records: HashMap<String, TeamRecord> = HashMap::new();
    for g in games {
        let (Some(home_score), Some(away_score)) = (g.home_score, g.away_score) else {
            continue;
        };
        let home = records.entry(g.home_team.clone()).or_default();
        if home_score > away_score {
            home.wins += 1;
        } else {
            home.losses += 1;
        }
        let away = records.entry(g.away_team.clone()).or_default();
        if away_score > home_score {
            away.wins += 1;
        } else {
            away.losses += 1;
        }
    }
    records
}

/// Score every team and produce the ranked table.
///
/// A team's score is the sum over its games of
/// `signed point differential * opponent strength * recency weight`, where
/// opponent strength is the opponent's win percentage plus a 0.1 floor
/// (0.6 flat when the opponent has no record) and the recency weight decays
/// 5% per week of distance from the latest observed week.
pub fn power_rankings(
    games: &[&Game],
    order: &[String],
    records: &HashMap<String, TeamRecord>,
) -> Vec<RankingEntry> {
    let max_week = games.iter().map(|g| g.week).max().unwrap_or(0);

    let mut entries: Vec<RankingEntry> = Vec::with_capacity(order.len());
    for team in order {
        let mut score = 0.0;
        for g in games {
            let is_home = g.home_team == *team;
            if !is_home && g.away_team != *team {
                continue;
            }
            let (Some(home_score), Some(away_score)) = (g.home_score, g.away_score) else {
                continue;
            };
            let (own, opp, opponent) = if is_home {
                (home_score, away_score, g.away_team.as_str())
            } else {
                (away_score, home_score, g.home_team.as_str())
            };

            let diff = f64::from(own) - f64::from(opp);
            let opp_pct = records
                .get(opponent)
                .and_then(|r| r.win_pct())
                .unwrap_or(NEUTRAL_WIN_PCT);
            let strength = opp_pct + OPP_STRENGTH_FLOOR;
            let recency = RECENCY_DECAY.powi(i32::from(max_week - g.week));
            score += diff * strength * recency;
        }

        let record = records.get(team).copied().unwrap_or_default();
        entries.push(RankingEntry {
            team: team.clone(),
            score: round2(score),
            record,
            status: TeamStatus::from_wins(record.wins),
            rank: 0,
        });
    }

    // Stable sort: equal scores keep discovery order.
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.rank = idx + 1;
    }
    entries
}

/// Front door: filter, tally, score, rank. Empty input (no completed games
/// for the season/type) yields an empty table, not an error.
pub fn season_rankings(log: &[Game], season: u16, game_type: &str) -> Vec<RankingEntry> {
    let games = completed_games(log, season, game_type);
    let order = team_order(&games);
    let records = team_records(&games);
    power_rankings(&games, &order, &records)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
