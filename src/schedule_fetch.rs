use anyhow::{Context, Result};

use crate::game_log::{self, Game};
use crate::http_cache::fetch_text_cached;
use crate::http_client::http_client;

/// Official season schedule/results export.
pub const DEFAULT_GAMES_URL: &str =
    "https://github.com/nflverse/nfldata/raw/master/data/games.csv";

/// Download the full game log and parse it. The caller filters by season and
/// game type; this fetch always pulls the whole export so one conditional GET
/// serves every downstream computation.
pub fn fetch_game_log(url: &str) -> Result<Vec<Game>> {
    let client = http_client()?;
    let body = fetch_text_cached(client, url).context("schedule feed request failed")?;
    if body.trim().is_empty() {
        return Err(anyhow::anyhow!("empty schedule feed response"));
    }
    game_log::parse_games_csv(&body).context("invalid schedule feed csv")
}
