use crate::config::layout::TableLayouts;

#[derive(Debug, Clone)]
pub struct ScraperSettings {
    pub base_url: &'static str,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
    /// Locale query parameter; affects round-header labels (Runde/Round/Kolo).
    pub lan: u8,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            base_url: "https://chess-results.com",
            // Some views reject empty or default library user agents.
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36",
            timeout_secs: 15,
            rate_limit_ms: 500,
            lan: 5,
        }
    }
}

/// Markers deciding whether a standings row belongs to "our" club.
///
/// Deliberately permissive: a missed home team loses its schedule in the UI,
/// one extra team merely shows a spare table.
#[derive(Debug, Clone)]
pub struct ClubSettings {
    /// Unambiguous club-name fragments.
    pub club_markers: &'static [&'static str],
    /// Town name; shared with unrelated clubs, so it never matches alone.
    pub city_marker: &'static str,
    /// Organization prefixes that qualify a city match.
    pub qualifier_markers: &'static [&'static str],
}

impl Default for ClubSettings {
    fn default() -> Self {
        Self {
            club_markers: &["bižuterie", "bizuterie"],
            city_marker: "jablonec",
            qualifier_markers: &["tj", "šk", "sk", "ddm"],
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub ttl_secs: u64,
    pub capacity: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        // Tournament data changes a few times a week; ten minutes of
        // staleness is invisible.
        Self {
            ttl_secs: 600,
            capacity: 256,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub scraper: ScraperSettings,
    pub club: ClubSettings,
    pub cache: CacheSettings,
    pub layout: TableLayouts,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
