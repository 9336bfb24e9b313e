/// Competitions followed by the club site.
///
/// To find a tournament number on chess-results.com:
/// 1. Open the competition's page
/// 2. The URL is `tnr{number}.aspx` — the number stays stable for the season
/// 3. The same number serves all four views (`art` parameter)
#[derive(Debug, Clone)]
pub struct CompetitionConfig {
    pub tnr: i64,
    pub slug: &'static str,
    pub name: &'static str,
}

impl CompetitionConfig {
    pub fn new(tnr: i64, slug: &'static str, name: &'static str) -> Self {
        Self { tnr, slug, name }
    }
}

/// The club's teams for the current season, A through D.
pub fn get_competitions() -> Vec<CompetitionConfig> {
    vec![
        CompetitionConfig::new(1023412, "2-liga-zapad", "2. liga Západ"),
        CompetitionConfig::new(1031478, "krajsky-prebor", "Krajský přebor LK"),
        CompetitionConfig::new(1031492, "krajska-soutez-vychod", "Krajská soutěž Východ"),
        CompetitionConfig::new(1040209, "regionalni-prebor", "Regionální přebor Jablonecka"),
    ]
}

pub fn find_competition(slug: &str) -> Option<CompetitionConfig> {
    get_competitions().into_iter().find(|c| c.slug == slug)
}
