use serde::{Deserialize, Serialize};

/// One team's line in a competition standings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    pub rank: u32,
    /// Raw display name, quoted team-letter suffix included.
    pub team: String,
    pub games: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    /// Match points.
    pub points: f64,
    /// Board-score tiebreak.
    pub score: f64,
    pub is_home_club: bool,
    /// Absolute link to the team's roster/schedule page, when the source
    /// row carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details_url: Option<String>,
}

/// One fixture within a competition's round schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub round: u32,
    /// Opaque display format; the source mixes `d.m.yyyy` and `yyyy/m/d`.
    pub date: String,
    pub home: String,
    pub away: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// A fixture seen from one team's side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamFixture {
    pub round: u32,
    pub date: String,
    pub opponent: String,
    pub is_home: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// The fixtures a team appears in, each carrying the opponent and side.
pub fn team_fixtures(schedule: &[ScheduleEntry], team: &str) -> Vec<TeamFixture> {
    schedule
        .iter()
        .filter_map(|entry| {
            let (opponent, is_home) = if entry.home == team {
                (entry.away.clone(), true)
            } else if entry.away == team {
                (entry.home.clone(), false)
            } else {
                return None;
            };
            Some(TeamFixture {
                round: entry.round,
                date: entry.date.clone(),
                opponent,
                is_home,
                result: entry.result.clone(),
            })
        })
        .collect()
}

/// One board's outcome inside a team-vs-team match.
///
/// Rows the extractor cannot break into fields survive as `raw` lines; the
/// frontend prints those verbatim instead of a formatted row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResult {
    /// May encode sub-match numbering, e.g. `3.1`.
    pub board: String,
    pub home_player: String,
    pub home_elo: String,
    pub guest_player: String,
    pub guest_elo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl BoardResult {
    pub fn raw_line(text: String) -> Self {
        Self {
            board: String::new(),
            home_player: String::new(),
            home_elo: String::new(),
            guest_player: String::new(),
            guest_elo: String::new(),
            result: None,
            raw: Some(text),
        }
    }
}

/// One player line on a team roster page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPlayer {
    pub rank: String,
    pub name: String,
    pub elo: String,
    /// One cell per round listed on the page; totals excluded.
    pub round_results: Vec<String>,
    /// Running score, e.g. `4.5/7`.
    pub score: String,
}
