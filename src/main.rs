use std::env;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;

use pq_rankings::schedule_fetch::{self, DEFAULT_GAMES_URL};
use pq_rankings::{rankings, report};

const DEFAULT_SEASON: u16 = 2025;
const DEFAULT_GAME_TYPE: &str = "REG";
const DEFAULT_OUTPUT: &str = "index.html";

struct Config {
    season: u16,
    game_type: String,
    data_url: String,
    output: PathBuf,
}

impl Config {
    fn from_env() -> Self {
        let season = env::var("PQ_SEASON")
            .ok()
            .and_then(|val| val.parse::<u16>().ok())
            .unwrap_or(DEFAULT_SEASON);
        let game_type = env::var("PQ_GAME_TYPE")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GAME_TYPE.to_string());
        let data_url = env::var("PQ_DATA_URL")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GAMES_URL.to_string());
        let output = env::var("PQ_OUTPUT")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        Self {
            season,
            game_type,
            data_url,
            output,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cfg = Config::from_env();

    println!(
        "[INFO] Fetching {} {} schedule from {}",
        cfg.season, cfg.game_type, cfg.data_url
    );
    let log = schedule_fetch::fetch_game_log(&cfg.data_url)?;
    println!("[INFO] Loaded {} games from the feed", log.len());

    let table = rankings::season_rankings(&log, cfg.season, &cfg.game_type);
    if table.is_empty() {
        println!(
            "[WARN] No completed {} {} games yet; publishing an empty table",
            cfg.season, cfg.game_type
        );
    }

    let html = report::render_rankings_page(cfg.season, &table, Local::now());
    report::write_report(&cfg.output, &html)?;
    println!(
        "[INFO] Ranked {} teams -> {}",
        table.len(),
        cfg.output.display()
    );
    Ok(())
}
