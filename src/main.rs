use anyhow::Result;

use jablonec_chess_results::cli::Command;
use jablonec_chess_results::{
    handle_completions, handle_match, handle_refresh, handle_serve, handle_standings, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Refresh => handle_refresh(),
        Command::Standings { competition } => handle_standings(competition),
        Command::Match {
            competition,
            round,
            home,
            away,
        } => handle_match(competition, *round, home, away),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
