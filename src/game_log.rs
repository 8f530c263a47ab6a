use anyhow::{Context, Result, anyhow};

/// One scheduled or played contest, as carried by the nflverse games feed.
#[derive(Debug, Clone)]
pub struct Game {
    pub season: u16,
    pub week: u16,
    pub game_type: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u16>,
    pub away_score: Option<u16>,
}

impl Game {
    /// A game has been played iff both final scores are present.
    pub fn is_completed(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }
}

/// Column indices resolved from the feed's header row. The feed carries far
/// more columns than we read (rest days, odds, stadium, ...); anything not
/// listed here is ignored.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    season: usize,
    week: usize,
    game_type: usize,
    home_team: usize,
    away_team: usize,
    home_score: usize,
    away_score: usize,
}

impl ColumnMap {
    fn from_header(header: &[String]) -> Result<Self> {
        Ok(Self {
            season: find_column(header, "season")?,
            week: find_column(header, "week")?,
            game_type: find_column(header, "game_type")?,
            home_team: find_column(header, "home_team")?,
            away_team: find_column(header, "away_team")?,
            home_score: find_column(header, "home_score")?,
            away_score: find_column(header, "away_score")?,
        })
    }
}

fn find_column(header: &[String], name: &str) -> Result<usize> {
    header
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow!("games feed header is missing the `{name}` column"))
}

/// Parse the full games CSV into `Game` records.
///
/// Malformed rows (missing team code, unparsable week or score) abort the
/// parse with an error naming the offending line; silently coercing bad cells
/// would poison every score computed downstream.
pub fn parse_games_csv(raw: &str) -> Result<Vec<Game>> {
    let mut rows = split_rows(raw).into_iter();
    let header = rows.next().ok_or_else(|| anyhow!("games feed is empty"))?;
    let cols = ColumnMap::from_header(&header)?;

    let mut out = Vec::new();
    for (idx, row) in rows.enumerate() {
        // Header is line 1, so the first data row is line 2.
        let line = idx + 2;
        let game = parse_game_row(&row, cols)
            .with_context(|| format!("games feed line {line} is malformed"))?;
        out.push(game);
    }
    Ok(out)
}

fn parse_game_row(row: &[String], cols: ColumnMap) -> Result<Game> {
    let season = cell(row, cols.season, "season")?
        .parse::<u16>()
        .context("`season` is not a year")?;
    let week = cell(row, cols.week, "week")?
        .parse::<u16>()
        .context("`week` is not a number")?;
    if week == 0 {
        return Err(anyhow!("`week` must be positive"));
    }
    let game_type = cell(row, cols.game_type, "game_type")?.to_string();
    let home_team = team_cell(row, cols.home_team, "home_team")?;
    let away_team = team_cell(row, cols.away_team, "away_team")?;
    let home_score = score_cell(row, cols.home_score, "home_score")?;
    let away_score = score_cell(row, cols.away_score, "away_score")?;

    Ok(Game {
        season,
        week,
        game_type,
        home_team,
        away_team,
        home_score,
        away_score,
    })
}

fn cell<'a>(row: &'a [String], idx: usize, name: &str) -> Result<&'a str> {
    row.get(idx)
        .map(|s| s.trim())
        .ok_or_else(|| anyhow!("row has no `{name}` cell"))
}

fn team_cell(row: &[String], idx: usize, name: &str) -> Result<String> {
    let code = cell(row, idx, name)?;
    if code.is_empty() {
        return Err(anyhow!("`{name}` team code is empty"));
    }
    Ok(code.to_string())
}

/// Blank score cells mean the game has not been played yet. The upstream
/// export writes missing values as empty cells or `NA`.
fn score_cell(row: &[String], idx: usize, name: &str) -> Result<Option<u16>> {
    let raw = cell(row, idx, name)?;
    if raw.is_empty() || raw.eq_ignore_ascii_case("na") {
        return Ok(None);
    }
    let value = raw
        .parse::<u16>()
        .with_context(|| format!("`{name}` is not a score: {raw:?}"))?;
    Ok(Some(value))
}

/// Quote-aware CSV row splitter. Commas and newlines inside double-quoted
/// fields are literal; `""` inside quotes is an escaped quote. CRLF tolerant.
fn split_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && matches!(chars.peek(), Some('"')) {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => row.push(std::mem::take(&mut field)),
            '\r' | '\n' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                if row.len() > 1 || !row[0].is_empty() {
                    rows.push(std::mem::take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}
