use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::layout::{RowMarkers, StandingsColumns};
use crate::config::settings::ClubSettings;
use crate::domain::StandingRow;
use crate::matcher;
use crate::parse::rows::{self, RowSplit};
use crate::parse::text;

static HREF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"href="([^"]+)""#).unwrap());

/// Parses the standings view (`art=46`) into ordered [`StandingRow`]s.
pub struct StandingsParser {
    columns: StandingsColumns,
    markers: RowMarkers,
    club: ClubSettings,
}

impl StandingsParser {
    pub fn new(columns: StandingsColumns, markers: RowMarkers, club: ClubSettings) -> Self {
        Self {
            columns,
            markers,
            club,
        }
    }

    /// `page_url` is the URL the document came from; relative roster links
    /// resolve against its origin.
    ///
    /// A row without a parsable rank or a team name is skipped; a malformed
    /// numeric cell becomes `0` and the row is kept. Zero rows out of a
    /// fetched page is the caller's signal that the format drifted.
    pub fn parse(&self, html: &str, page_url: &str) -> Vec<StandingRow> {
        let row_fragments = rows::split_rows(html, RowSplit::CloseTag);
        self.log_header(&row_fragments);

        let origin = origin_of(page_url);
        let mut standings: Vec<StandingRow> = row_fragments
            .iter()
            .filter(|row| self.markers.is_data(row))
            .filter_map(|row| self.parse_row(row, origin.as_deref()))
            .collect();

        // Stable; source order is normally already ascending, but the page
        // makes no promises.
        standings.sort_by_key(|row| row.rank);
        standings
    }

    /// The column mapping is an observed assumption, not a contract. Logging
    /// the header row leaves a trail when the site shifts columns again.
    fn log_header(&self, row_fragments: &[String]) {
        if let Some(header) = row_fragments.iter().find(|r| rows::has_header_cell(r)) {
            debug!("standings header row: {}", text::clean(header));
        }
    }

    fn parse_row(&self, row: &str, origin: Option<&str>) -> Option<StandingRow> {
        let cells = rows::cells_of(row);
        let rank = text::parse_rank(&cell_text(&cells, self.columns.rank))?;
        let team = cell_text(&cells, self.columns.team);
        if team.is_empty() {
            return None;
        }
        let details_url = cells
            .get(self.columns.team)
            .and_then(|cell| extract_href(cell, origin));

        Some(StandingRow {
            rank,
            is_home_club: matcher::is_home_club(&team, &self.club),
            games: cell_number(&cells, self.columns.games) as u32,
            wins: cell_number(&cells, self.columns.wins) as u32,
            draws: cell_number(&cells, self.columns.draws) as u32,
            losses: cell_number(&cells, self.columns.losses) as u32,
            points: cell_number(&cells, self.columns.points),
            score: cell_number(&cells, self.columns.score),
            team,
            details_url,
        })
    }
}

fn cell_text(cells: &[String], idx: usize) -> String {
    cells.get(idx).map(|c| text::clean(c)).unwrap_or_default()
}

fn cell_number(cells: &[String], idx: usize) -> f64 {
    text::parse_locale_number(&cell_text(cells, idx))
}

/// Pull the team-cell link out of the raw fragment and absolutize it.
fn extract_href(cell: &str, origin: Option<&str>) -> Option<String> {
    let href = HREF_RE.captures(cell)?.get(1)?.as_str();
    let href = &text::decode_entities(href);
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    let origin = origin?;
    if href.starts_with('/') {
        Some(format!("{origin}{href}"))
    } else {
        Some(format!("{origin}/{href}"))
    }
}

fn origin_of(page_url: &str) -> Option<String> {
    let url = reqwest::Url::parse(page_url).ok()?;
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::layout::TableLayouts;

    const PAGE_URL: &str = "https://chess-results.com/tnr1023412.aspx?lan=5&art=46";

    fn parser() -> StandingsParser {
        let layout = TableLayouts::default();
        StandingsParser::new(layout.standings, layout.markers, ClubSettings::default())
    }

    fn page(rows: &str) -> String {
        format!(
            "<table><tr><th>Rg.</th><th></th><th>Mannschaft</th><th>Part.</th><th>+</th><th>=</th><th>-</th><th>MP</th><th>Brett</th></tr>{rows}</table>"
        )
    }

    #[test]
    fn parses_a_full_home_club_row() {
        let html = page(
            "<tr class=\"CRg1\"><td>5</td><td></td><td>TJ Bižuterie Jablonec n.N. &quot;A&quot;</td><td>7</td><td>5</td><td>1</td><td>1</td><td>11,5</td><td>21,0</td></tr>",
        );
        let rows = parser().parse(&html, PAGE_URL);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.rank, 5);
        assert_eq!(row.team, "TJ Bižuterie Jablonec n.N. \"A\"");
        assert_eq!(row.games, 7);
        assert_eq!(row.wins, 5);
        assert_eq!(row.draws, 1);
        assert_eq!(row.losses, 1);
        assert_eq!(row.points, 11.5);
        assert_eq!(row.score, 21.0);
        assert!(row.is_home_club);
    }

    #[test]
    fn output_is_ordered_by_rank_regardless_of_source_order() {
        let html = page(
            "<tr class=\"CRg1\"><td>3</td><td></td><td>Sokol Turnov</td><td>7</td><td>4</td><td>1</td><td>2</td><td>9</td><td>18</td></tr>\
             <tr class=\"CRg2\"><td>1</td><td></td><td>Slavia Liberec</td><td>7</td><td>6</td><td>1</td><td>0</td><td>13</td><td>25</td></tr>\
             <tr class=\"CRg1\"><td>2</td><td></td><td>Desko Liberec</td><td>7</td><td>5</td><td>1</td><td>1</td><td>11</td><td>22</td></tr>",
        );
        let ranks: Vec<u32> = parser().parse(&html, PAGE_URL).iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn unparsable_rank_skips_the_row_and_bad_numbers_coerce_to_zero() {
        let html = page(
            "<tr class=\"CRg1\"><td>Rg.</td><td></td><td>Ghost Team</td><td>7</td><td>5</td><td>1</td><td>1</td><td>11</td><td>21</td></tr>\
             <tr class=\"CRg2\"><td>4</td><td></td><td>Sokol Turnov</td><td>x</td><td>5</td><td>1</td><td>1</td><td>11,5</td><td>21,0</td></tr>",
        );
        let rows = parser().parse(&html, PAGE_URL);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rank, 4);
        assert_eq!(rows[0].games, 0);
        assert_eq!(rows[0].points, 11.5);
    }

    #[test]
    fn relative_team_links_resolve_against_the_page_origin() {
        let html = page(
            "<tr class=\"CRg1\"><td>1</td><td></td><td><a href=\"tnr1023412.aspx?art=1&amp;snr=3\">Sokol Turnov</a></td><td>7</td><td>6</td><td>1</td><td>0</td><td>13</td><td>25</td></tr>\
             <tr class=\"CRg2\"><td>2</td><td></td><td><a href=\"/tnr9.aspx\">Desko Liberec</a></td><td>7</td><td>5</td><td>1</td><td>1</td><td>11</td><td>22</td></tr>",
        );
        let rows = parser().parse(&html, PAGE_URL);
        assert_eq!(
            rows[0].details_url.as_deref(),
            Some("https://chess-results.com/tnr1023412.aspx?art=1&snr=3")
        );
        assert_eq!(
            rows[1].details_url.as_deref(),
            Some("https://chess-results.com/tnr9.aspx")
        );
    }

    #[test]
    fn page_without_data_rows_yields_nothing() {
        let html = page("<tr><td>decorative</td></tr>");
        assert!(parser().parse(&html, PAGE_URL).is_empty());
    }
}
