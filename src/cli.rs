use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "chess club results backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Fetch fresh standings and schedules for all followed competitions
    Refresh,
    /// Print a competition's stored standings table
    Standings {
        /// Competition slug (see config/competitions.rs)
        competition: String,
    },
    /// Fetch and print one match's board-by-board results
    Match {
        competition: String,
        round: u32,
        home: String,
        away: String,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}
