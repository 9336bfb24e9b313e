use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::layout::{RowMarkers, ScheduleColumns};
use crate::domain::ScheduleEntry;
use crate::parse::rows::{self, RowSplit};
use crate::parse::text;

// The site labels round headers in German, English or Czech depending on
// the locale parameter.
static ROUND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\.\s*(Runde|Round|Kolo)").unwrap());
static LABELED_DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Datum kola\s*([\d/.]+)").unwrap());
static BARE_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}\.\d{1,2}\.\d{4}|\d{4}/\d{1,2}/\d{1,2}").unwrap());
static RESULT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+[.,]?5?\s*[:\-]\s*\d+[.,]?5?").unwrap());

/// Parses the schedule view (`art=2`) into fixtures across all rounds.
///
/// A single forward scan carries the current round and date; every data row
/// with a numeric first cell belongs to the round last announced. Fixtures
/// appearing before any round header are dropped — without a round the
/// record would be ambiguous.
pub struct ScheduleParser {
    columns: ScheduleColumns,
    markers: RowMarkers,
}

impl ScheduleParser {
    pub fn new(columns: ScheduleColumns, markers: RowMarkers) -> Self {
        Self { columns, markers }
    }

    pub fn parse(&self, html: &str) -> Vec<ScheduleEntry> {
        let mut entries = Vec::new();
        let mut current_round: Option<u32> = None;
        let mut current_date: Option<String> = None;

        for row in rows::split_rows(html, RowSplit::CloseTag) {
            let line = text::clean(&row);
            if let Some(caps) = ROUND_RE.captures(&line) {
                current_round = caps[1].parse().ok();
                current_date = extract_date(&line);
                continue;
            }
            if !self.markers.is_data(&row) {
                continue;
            }
            let Some(round) = current_round else { continue };
            if let Some(entry) = self.parse_fixture(&row, round, current_date.as_deref()) {
                entries.push(entry);
            }
        }
        entries
    }

    fn parse_fixture(&self, row: &str, round: u32, date: Option<&str>) -> Option<ScheduleEntry> {
        let cells: Vec<String> = rows::cells_of(row).iter().map(|c| text::clean(c)).collect();
        text::parse_rank(cells.get(self.columns.fixture_no)?)?;

        let home = cells.get(self.columns.home)?.clone();
        let away = cells.get(self.columns.away)?.clone();
        if home.is_empty() || away.is_empty() {
            return None;
        }
        let result = cells
            .get(self.columns.result)
            .and_then(|cell| RESULT_RE.find(cell))
            .map(|m| m.as_str().to_string());

        Some(ScheduleEntry {
            round,
            date: date.unwrap_or_default().to_string(),
            home,
            away,
            result,
        })
    }
}

/// The labeled form wins over a bare date; first match wins overall.
fn extract_date(line: &str) -> Option<String> {
    if let Some(caps) = LABELED_DATE_RE.captures(line) {
        return Some(caps[1].to_string());
    }
    BARE_DATE_RE.find(line).map(|m| m.as_str().to_string())
}
