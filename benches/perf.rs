use std::fmt::Write as _;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use pq_rankings::game_log::{Game, parse_games_csv};
use pq_rankings::rankings::season_rankings;

const TEAMS: usize = 32;
const WEEKS: u16 = 18;

/// Full round-robin-ish season: every week pairs the teams off, scores
/// derived from the indices so the data is deterministic.
fn synthetic_season(season: u16) -> Vec<Game> {
    let codes: Vec<String> = (0..TEAMS).map(|i| format!("T{i:02}")).collect();
    let mut games = Vec::new();
    for week in 1..=WEEKS {
        for pair in 0..TEAMS / 2 {
            let home = (pair * 2 + week as usize) % TEAMS;
            let away = (pair * 2 + 1 + week as usize) % TEAMS;
            games.push(Game {
                season,
                week,
                game_type: "REG".to_string(),
                home_team: codes[home].clone(),
                away_team: codes[away].clone(),
                home_score: Some(((home + week as usize * 3) % 40) as u16),
                away_score: Some(((away + week as usize * 5) % 40) as u16),
            });
        }
    }
    games
}

fn season_csv(games: &[Game]) -> String {
    let mut out = String::from(
        "game_id,season,game_type,week,away_team,away_score,home_team,home_score\n",
    );
    for (idx, g) in games.iter().enumerate() {
        let _ = writeln!(
            out,
            "g{idx},{},{},{},{},{},{},{}",
            g.season,
            g.game_type,
            g.week,
            g.away_team,
            g.away_score.unwrap_or_default(),
            g.home_team,
            g.home_score.unwrap_or_default(),
        );
    }
    out
}

fn bench_season_rankings(c: &mut Criterion) {
    let log = synthetic_season(2025);
    c.bench_function("season_rankings", |b| {
        b.iter(|| {
            let table = season_rankings(black_box(&log), 2025, "REG");
            black_box(table.len());
        })
    });
}

fn bench_games_csv_parse(c: &mut Criterion) {
    let raw = season_csv(&synthetic_season(2025));
    c.bench_function("games_csv_parse", |b| {
        b.iter(|| {
            let games = parse_games_csv(black_box(&raw)).unwrap();
            black_box(games.len());
        })
    });
}

criterion_group!(perf, bench_season_rankings, bench_games_csv_parse);
criterion_main!(perf);
