pub mod boards;
pub mod roster;
pub mod rows;
pub mod schedule;
pub mod standings;
pub mod text;

pub use boards::BoardResolver;
pub use roster::RosterParser;
pub use schedule::ScheduleParser;
pub use standings::StandingsParser;
