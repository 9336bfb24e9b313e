//! Locates one match's board rows inside a round-detail page.
//!
//! The detail view (`art=3&rd=N`) prints every match of the round as one
//! uninterrupted stream of table rows — no per-match container, no row ids.
//! The only anchors are the match-header rows carrying both team names, so
//! extraction is a two-state scan: seek the header, then capture data rows
//! until the next header-shaped row.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::layout::RowMarkers;
use crate::domain::BoardResult;
use crate::parse::rows::{self, RowSplit};
use crate::parse::text;

// Covers "1 - 0", "½ - ½", "1½:2½" and the dotted fraction variants.
static BOARD_RESULT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d+[½.]?|½)\s*[:\-]\s*(?:\d+[½.]?|½)$").unwrap());

enum ScanState {
    Seeking,
    Capturing,
}

pub struct BoardResolver {
    markers: RowMarkers,
}

impl BoardResolver {
    pub fn new(markers: RowMarkers) -> Self {
        Self { markers }
    }

    /// Extract the boards of the `home` vs `away` pairing. An empty result
    /// means the pairing was not found on the page ("details not
    /// available"), never an error.
    pub fn resolve(&self, html: &str, home: &str, away: &str) -> Vec<BoardResult> {
        let home = home.trim().to_lowercase();
        let away = away.trim().to_lowercase();
        if home.is_empty() || away.is_empty() {
            return Vec::new();
        }

        let mut boards = Vec::new();
        let mut state = ScanState::Seeking;
        for row in rows::split_rows(html, RowSplit::ClassedOpen) {
            match state {
                ScanState::Seeking => {
                    // Containment, not equality: headers decorate the names
                    // with whitespace and match numbers. The caller supplies
                    // exact names from the standings table, so an unrelated
                    // pairing containing both as substrings is unlikely.
                    let line = text::clean(&row).to_lowercase();
                    if line.contains(&home) && line.contains(&away) {
                        state = ScanState::Capturing;
                    }
                }
                ScanState::Capturing => {
                    if rows::has_header_cell(&row) || self.markers.is_bold(&row) {
                        // Next match's header.
                        break;
                    }
                    if self.markers.is_data(&row) {
                        boards.push(parse_board_row(&row));
                    }
                }
            }
        }
        boards
    }
}

/// Column positions are not stable across layout variants (plain rows, rows
/// with a title cell, rows with federation-flag cells), so each field is a
/// chain of fallbacks. New variants get a new fallback, not a new primary.
fn parse_board_row(row: &str) -> BoardResult {
    let cells: Vec<String> = rows::cells_of(row).iter().map(|c| text::clean(c)).collect();
    if cells.len() <= 5 {
        // Too few cells to trust any offsets; hand the whole line over.
        return BoardResult::raw_line(text::clean(row));
    }

    let board = cells[0].clone();
    let home_player = cells.get(3).cloned().unwrap_or_default();
    let home_elo = pick_elo(&cells, &[5, 4]);
    let (guest_player, guest_idx) = find_guest(&cells);
    let guest_elo = match guest_idx {
        Some(g) => pick_elo(&cells, &[g + 2, g + 1]),
        None => String::new(),
    };
    let result = find_result(&cells);

    BoardResult {
        board,
        home_player,
        home_elo,
        guest_player,
        guest_elo,
        result,
        raw: None,
    }
}

/// Prefer the later candidate: some layouts insert a title/flag cell
/// between name and rating.
fn pick_elo(cells: &[String], candidates: &[usize]) -> String {
    candidates
        .iter()
        .filter_map(|&idx| cells.get(idx))
        .find(|cell| text::is_elo(cell))
        .cloned()
        .unwrap_or_default()
}

/// "Surname, Given name" is the one shape the guest column keeps across all
/// observed variants; positional fallbacks cover the rest.
fn find_guest(cells: &[String]) -> (String, Option<usize>) {
    for (idx, cell) in cells.iter().enumerate().skip(6) {
        if cell.contains(',') && cell.chars().count() > 3 {
            return (cell.clone(), Some(idx));
        }
    }
    for idx in [8, 9] {
        if let Some(cell) = cells.get(idx) {
            if cell.chars().count() > 2 {
                return (cell.clone(), Some(idx));
            }
        }
    }
    (String::new(), None)
}

fn find_result(cells: &[String]) -> Option<String> {
    for cell in cells.iter().rev() {
        if BOARD_RESULT_RE.is_match(cell) {
            return Some(cell.clone());
        }
    }
    if cells.len() > 10 && !cells[10].is_empty() {
        return Some(cells[10].clone());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::layout::TableLayouts;

    fn resolver() -> BoardResolver {
        BoardResolver::new(TableLayouts::default().markers)
    }

    fn match_header(home: &str, away: &str) -> String {
        format!("<tr class=\"CRg1b\"><th>{home}</th><th>4 : 4</th><th>{away}</th></tr>")
    }

    fn board_row(class: &str, board: &str, home: &str, home_elo: &str, guest: &str, guest_elo: &str, result: &str) -> String {
        format!(
            "<tr class=\"{class}\"><td>{board}</td><td></td><td></td><td>{home}</td><td></td><td>{home_elo}</td><td>{guest}</td><td></td><td>{guest_elo}</td><td></td><td>{result}</td></tr>"
        )
    }

    fn three_match_page() -> String {
        let mut page = String::from("<table>");
        for (home, away) in [("Team A", "Team B"), ("Team C", "Team D"), ("Team E", "Team F")] {
            page.push_str(&match_header(home, away));
            for board in 1..=4 {
                let class = if board % 2 == 1 { "CRg1" } else { "CRg2" };
                page.push_str(&board_row(
                    class,
                    &format!("{board}.1"),
                    &format!("{home} Player, No{board}"),
                    "2000",
                    &format!("{away} Player, No{board}"),
                    "1900",
                    "1 - 0",
                ));
            }
        }
        page.push_str("</table>");
        page
    }

    #[test]
    fn captures_exactly_the_requested_match() {
        let boards = resolver().resolve(&three_match_page(), "Team C", "Team D");
        assert_eq!(boards.len(), 4);
        for board in &boards {
            assert!(board.home_player.starts_with("Team C Player"));
            assert!(board.guest_player.starts_with("Team D Player"));
        }
        assert_eq!(boards[0].board, "1.1");
        assert_eq!(boards[0].result.as_deref(), Some("1 - 0"));
    }

    #[test]
    fn unknown_pairing_yields_empty() {
        assert!(resolver().resolve(&three_match_page(), "Team X", "Team Y").is_empty());
    }

    #[test]
    fn header_match_is_substring_based() {
        let boards = resolver().resolve(&three_match_page(), "team c", "TEAM D");
        assert_eq!(boards.len(), 4);
    }

    #[test]
    fn elo_and_result_fallbacks() {
        // No title cell: rating sits at cell 4, result only at cell 10.
        let html = format!(
            "{}<tr class=\"CRg1\"><td>2.1</td><td></td><td></td><td>Novák, Jan</td><td>2105</td><td>x</td><td>Svoboda, Petr</td><td>1987</td><td></td><td></td><td>½ - ½</td></tr>",
            match_header("Team C", "Team D")
        );
        let boards = resolver().resolve(&html, "Team C", "Team D");
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].home_elo, "2105");
        assert_eq!(boards[0].guest_player, "Svoboda, Petr");
        assert_eq!(boards[0].guest_elo, "1987");
        assert_eq!(boards[0].result.as_deref(), Some("½ - ½"));
    }

    #[test]
    fn sparse_rows_degrade_to_raw_lines() {
        let html = format!(
            "{}<tr class=\"CRg1\"><td>1</td><td>Novák, Jan</td><td>1 - 0</td></tr>",
            match_header("Team C", "Team D")
        );
        let boards = resolver().resolve(&html, "Team C", "Team D");
        assert_eq!(boards.len(), 1);
        let raw = boards[0].raw.as_deref().unwrap();
        assert!(raw.contains("Novák, Jan"));
        assert!(boards[0].home_player.is_empty());
    }

    #[test]
    fn first_match_capture_stops_at_the_next_header() {
        // Asking for the first match must not leak rows from the second.
        let boards = resolver().resolve(&three_match_page(), "Team A", "Team B");
        assert_eq!(boards.len(), 4);
        assert!(boards.iter().all(|b| b.home_player.starts_with("Team A")));
    }
}
