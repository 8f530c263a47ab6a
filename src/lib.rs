pub mod game_log;
pub mod http_cache;
pub mod http_client;
pub mod rankings;
pub mod report;
pub mod schedule_fetch;
