use log::debug;

use crate::config::CompetitionConfig;
use crate::config::settings::AppConfig;
use crate::domain::{BoardResult, RosterPlayer, ScheduleEntry, StandingRow};
use crate::errors::{Result, ScrapeError};
use crate::http::RateLimitedClient;
use crate::parse::{BoardResolver, RosterParser, ScheduleParser, StandingsParser};

/// Page variants the results site serves for one competition, selected by
/// the `art` query parameter.
enum View {
    Standings,
    Schedule,
    RoundDetails(u32),
    Roster(u32),
}

impl View {
    fn query(&self) -> String {
        match self {
            View::Standings => "art=46".to_string(),
            View::Schedule => "art=2".to_string(),
            View::RoundDetails(round) => format!("art=3&rd={round}"),
            View::Roster(snr) => format!("art=1&snr={snr}"),
        }
    }
}

/// Client for the third-party results site: URL building, fetching, and
/// page parsing behind one seam.
pub struct ResultsClient {
    http: RateLimitedClient,
    base_url: String,
    lan: u8,
    standings: StandingsParser,
    schedule: ScheduleParser,
    boards: BoardResolver,
    roster: RosterParser,
}

impl ResultsClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let scraper = &config.scraper;
        let layout = &config.layout;
        Ok(Self {
            http: RateLimitedClient::new(
                scraper.user_agent,
                scraper.timeout_secs,
                scraper.rate_limit_ms,
            )?,
            base_url: scraper.base_url.to_string(),
            lan: scraper.lan,
            standings: StandingsParser::new(
                layout.standings.clone(),
                layout.markers.clone(),
                config.club.clone(),
            ),
            schedule: ScheduleParser::new(layout.schedule.clone(), layout.markers.clone()),
            boards: BoardResolver::new(layout.markers.clone()),
            roster: RosterParser::new(layout.roster.clone(), layout.markers.clone()),
        })
    }

    /// Fetch and parse a competition's standings table.
    ///
    /// Zero rows is `EmptyParse`, never an empty `Ok`: it means format drift
    /// or an empty page, and callers must not persist it over a previous
    /// snapshot.
    pub async fn fetch_standings(&self, comp: &CompetitionConfig) -> Result<Vec<StandingRow>> {
        let url = self.view_url(comp, &View::Standings);
        let html = self.http.get_text(&url).await?;
        let rows = self.standings.parse(&html, &url);
        if rows.is_empty() {
            return Err(ScrapeError::EmptyParse { what: "standings" });
        }
        debug!("parsed {} standings rows from {}", rows.len(), url);
        Ok(rows)
    }

    /// Fetch and parse the full round-by-round fixture list. An empty list
    /// is a valid outcome here (season not drawn yet).
    pub async fn fetch_schedule(&self, comp: &CompetitionConfig) -> Result<Vec<ScheduleEntry>> {
        let url = self.view_url(comp, &View::Schedule);
        let html = self.http.get_text(&url).await?;
        let entries = self.schedule.parse(&html);
        debug!("parsed {} fixtures from {}", entries.len(), url);
        Ok(entries)
    }

    /// Fetch one round's detail page and extract the boards of the given
    /// pairing. Empty means "details not available" for that pairing.
    pub async fn fetch_round_boards(
        &self,
        comp: &CompetitionConfig,
        round: u32,
        home: &str,
        away: &str,
    ) -> Result<Vec<BoardResult>> {
        let url = self.view_url(comp, &View::RoundDetails(round));
        let html = self.http.get_text(&url).await?;
        let boards = self.boards.resolve(&html, home, away);
        debug!(
            "resolved {} boards for {home} vs {away} (round {round})",
            boards.len()
        );
        Ok(boards)
    }

    /// Fetch one team's roster with per-round results.
    pub async fn fetch_roster(
        &self,
        comp: &CompetitionConfig,
        snr: u32,
    ) -> Result<Vec<RosterPlayer>> {
        let url = self.view_url(comp, &View::Roster(snr));
        let html = self.http.get_text(&url).await?;
        Ok(self.roster.parse(&html))
    }

    fn view_url(&self, comp: &CompetitionConfig, view: &View) -> String {
        format!(
            "{}/tnr{}.aspx?lan={}&{}",
            self.base_url,
            comp.tnr,
            self.lan,
            view.query()
        )
    }
}
