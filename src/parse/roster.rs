use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::layout::{RosterColumns, RowMarkers};
use crate::domain::RosterPlayer;
use crate::parse::rows::{self, RowSplit};
use crate::parse::text;

// A round cell with a definitive outcome: win, loss, draw, forfeit either way.
static PLAYED_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(½|[01+\-])").unwrap());

/// Parses the roster view (`art=1&snr=N`) into the team's player list.
///
/// Roster rows end with one cell per round plus exactly two totals
/// (cumulative points, games). The totals are NOT rounds; slicing them off
/// keeps `round_results` aligned with the rounds actually listed
/// (`round_results.len() == trailing.len() - 2`).
pub struct RosterParser {
    columns: RosterColumns,
    markers: RowMarkers,
}

impl RosterParser {
    pub fn new(columns: RosterColumns, markers: RowMarkers) -> Self {
        Self { columns, markers }
    }

    pub fn parse(&self, html: &str) -> Vec<RosterPlayer> {
        rows::split_rows(html, RowSplit::CloseTag)
            .iter()
            .filter(|row| self.markers.is_data(row))
            .filter_map(|row| self.parse_row(row))
            .collect()
    }

    fn parse_row(&self, row: &str) -> Option<RosterPlayer> {
        let mut cells: Vec<String> = rows::cells_of(row).iter().map(|c| text::clean(c)).collect();
        trim_trailing_empty(&mut cells);

        let columns = &self.columns;
        if cells.len() < columns.round_cells_start + columns.trailing_totals {
            return None;
        }
        let name = cells.get(columns.name)?.clone();
        if name.is_empty() {
            return None;
        }

        let rank = cells.get(columns.rank).cloned().unwrap_or_default();
        let elo = pick_rating(&cells, &[columns.rating, columns.alt_rating]);

        let totals_at = cells.len() - columns.trailing_totals;
        let round_results = cells[columns.round_cells_start..totals_at].to_vec();
        let points = text::parse_locale_number(&cells[totals_at]);
        let played = round_results
            .iter()
            .filter(|cell| PLAYED_MARKER_RE.is_match(cell))
            .count();

        Some(RosterPlayer {
            rank,
            name,
            elo,
            round_results,
            score: format_score(points, played),
        })
    }
}

fn pick_rating(cells: &[String], candidates: &[usize]) -> String {
    candidates
        .iter()
        .filter_map(|&idx| cells.get(idx))
        .find(|cell| text::is_elo(cell))
        .cloned()
        .unwrap_or_default()
}

/// The split leaves a fragment after the last closing tag; it cleans to
/// nothing but would otherwise shift the totals window.
fn trim_trailing_empty(cells: &mut Vec<String>) {
    while cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
}

fn format_score(points: f64, played: usize) -> String {
    if points.fract() == 0.0 {
        format!("{}/{}", points as i64, played)
    } else {
        format!("{points}/{played}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::layout::TableLayouts;

    fn parser() -> RosterParser {
        let layout = TableLayouts::default();
        RosterParser::new(layout.roster, layout.markers)
    }

    fn roster_row(rank: &str, name: &str, elo: &str, rounds: &[&str], points: &str, games: &str) -> String {
        let round_cells: String = rounds.iter().map(|r| format!("<td>{r}</td>")).collect();
        format!(
            "<tr class=\"CRg1\"><td>{rank}</td><td>{name}</td><td>{elo}</td><td>-</td>{round_cells}<td>{points}</td><td>{games}</td></tr>"
        )
    }

    #[test]
    fn totals_are_excluded_from_round_results() {
        let html = roster_row(
            "1",
            "Novák, Jan",
            "2105",
            &["1", "½", "0", "1", "+", "½", "1"],
            "4,5",
            "7",
        );
        let players = parser().parse(&html);
        assert_eq!(players.len(), 1);
        let player = &players[0];
        assert_eq!(player.round_results.len(), 7);
        assert_eq!(player.round_results[1], "½");
        assert_eq!(player.score, "4.5/7");
        assert_eq!(player.elo, "2105");
    }

    #[test]
    fn unplayed_rounds_do_not_count_into_the_denominator() {
        let html = roster_row(
            "3",
            "Svoboda, Petr",
            "1987",
            &["1", "", "½", "", "0"],
            "1,5",
            "3",
        );
        let players = parser().parse(&html);
        assert_eq!(players[0].round_results.len(), 5);
        assert_eq!(players[0].score, "1.5/3");
    }

    #[test]
    fn whole_point_scores_print_without_fraction() {
        let html = roster_row("2", "Dvořák, Ivo", "1820", &["1", "1", "1"], "3", "3");
        assert_eq!(parser().parse(&html)[0].score, "3/3");
    }

    #[test]
    fn rows_without_a_name_or_too_few_cells_are_skipped() {
        let html = format!(
            "{}<tr class=\"CRg2\"><td>9</td><td></td><td>1800</td><td>-</td><td>1</td><td>1</td><td>1</td></tr>",
            "<tr class=\"CRg1\"><td>1</td><td>Short</td></tr>"
        );
        assert!(parser().parse(&html).is_empty());
    }
}
