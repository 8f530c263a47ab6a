use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::rankings::{RankingEntry, TeamStatus};

/// Render the ranked table as a self-contained static page.
///
/// An empty table is a meaningful result (season not started yet) and renders
/// as a placeholder note rather than an empty grid.
pub fn render_rankings_page(
    season: u16,
    rankings: &[RankingEntry],
    updated: DateTime<Local>,
) -> String {
    let updated = updated.format("%B %d, %Y at %I:%M %p");

    let mut body = String::new();
    if rankings.is_empty() {
        body.push_str("        <p class=\"empty\">No completed games to rank yet.</p>\n");
    } else {
        body.push_str("        <table>\n            <tr><th>Rank</th><th>Team</th><th>PQ Score</th><th>Record</th><th>Status</th></tr>\n");
        for entry in rankings {
            let _ = writeln!(
                body,
                "            <tr class=\"{class}\"><td>{rank}</td><td>{team}</td><td>{score:.2}</td><td>{wins}-{losses}</td><td>{status}</td></tr>",
                class = status_class(entry.status),
                rank = entry.rank,
                team = escape_html(&entry.team),
                score = entry.score,
                wins = entry.record.wins,
                losses = entry.record.losses,
                status = entry.status.label(),
            );
        }
        body.push_str("        </table>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{season} PQ Power Rankings</title>
    <style>
        body {{ font-family: sans-serif; background: #f4f7f6; padding: 20px; }}
        .card {{ background: white; max-width: 800px; margin: auto; padding: 20px; border-radius: 10px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }}
        h1 {{ color: #013369; text-align: center; }}
        table {{ width: 100%; border-collapse: collapse; }}
        th {{ background: #013369; color: white; padding: 10px; text-align: left; }}
        td {{ padding: 10px; border-bottom: 1px solid #eee; }}
        tr.clinched td {{ background: #eaf7ea; }}
        tr.eliminated td {{ color: #888; }}
        .empty {{ text-align: center; color: #666; }}
    </style>
</head>
<body>
    <div class="card">
        <h1>&#127944; {season} PQ Power Rankings</h1>
        <p style="text-align:center;">Last Updated: {updated}</p>
{body}    </div>
</body>
</html>
"#
    )
}

/// Atomic write so a half-rendered page never replaces a published one.
pub fn write_report(path: &Path, html: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).context("create report directory")?;
        }
    }
    let tmp = path.with_extension("html.tmp");
    fs::write(&tmp, html).context("write report")?;
    fs::rename(&tmp, path).context("swap report")?;
    Ok(())
}

fn status_class(status: TeamStatus) -> &'static str {
    match status {
        TeamStatus::Clinched => "clinched",
        TeamStatus::InTheHunt => "hunt",
        TeamStatus::Eliminated => "eliminated",
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
