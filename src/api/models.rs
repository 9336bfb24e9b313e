use serde::Serialize;

use crate::database::snapshots::StoredSnapshot;
use crate::domain::{BoardResult, RosterPlayer, StandingRow, TeamFixture};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionSummary {
    pub slug: String,
    pub name: String,
    pub snapshots: Vec<StoredSnapshot>,
}

#[derive(Serialize)]
pub struct CompetitionsResponse {
    pub competitions: Vec<CompetitionSummary>,
    pub count: usize,
}

/// A standings row enriched for the frontend: team letter for display and,
/// for the club's own teams, the joined fixture list.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    #[serde(flatten)]
    pub row: StandingRow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_letter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<TeamFixture>>,
}

#[derive(Serialize)]
pub struct StandingsResponse {
    pub teams: Vec<TeamStanding>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct BoardsResponse {
    pub boards: Vec<BoardResult>,
}

#[derive(Serialize)]
pub struct RosterResponse {
    pub players: Vec<RosterPlayer>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
