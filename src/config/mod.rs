pub mod competitions;
pub mod layout;
pub mod settings;

pub use competitions::{CompetitionConfig, find_competition, get_competitions};
pub use settings::AppConfig;
