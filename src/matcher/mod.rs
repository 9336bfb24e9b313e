//! Team-name classification helpers.
//!
//! The site renders the club's name with varying diacritics, abbreviations
//! and team-letter suffixes, so recognition is substring-based over a
//! diacritic-folded lowercase form. The rules favor false positives; a
//! missed home team costs its schedule in the UI.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::config::settings::ClubSettings;

static TEAM_LETTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new("\"([ABCD])\"").unwrap());

/// Lower-case and strip combining marks, so `Bižuterie` and `bizuterie`
/// compare equal.
pub fn fold(name: &str) -> String {
    name.to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Whether a standings team name is one of the club's own teams.
///
/// Applied in order: an unambiguous club marker wins outright; the town name
/// counts only together with an organization qualifier, since other clubs
/// share the town.
pub fn is_home_club(team: &str, club: &ClubSettings) -> bool {
    let folded = fold(team);
    if club.club_markers.iter().any(|m| folded.contains(&fold(m))) {
        return true;
    }
    if folded.contains(&fold(club.city_marker)) {
        return club
            .qualifier_markers
            .iter()
            .any(|m| folded.contains(&fold(m)));
    }
    false
}

/// Quoted single-letter team suffix (`"A"`..`"D"`) for display.
pub fn team_letter(team: &str) -> Option<String> {
    TEAM_LETTER_RE
        .captures(team)
        .map(|caps| caps[1].to_string())
}
