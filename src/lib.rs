pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod matcher;
pub mod parse;
pub mod rate_limiter;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::Colorize;

use crate::cli::{Cli, Command};
use crate::config::settings::AppConfig;
use crate::fetchers::ResultsClient;
use crate::services::refresh::RefreshService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_refresh() -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let pool = open_database()?;
        {
            let mut conn = database::get_connection(&pool)?;
            database::setup::init_schema(&mut conn)?;
        }
        let service = RefreshService::new(pool, AppConfig::new());
        service.run().await
    })
}

pub fn handle_standings(competition: &str) -> Result<()> {
    let comp = config::find_competition(competition)
        .ok_or_else(|| anyhow::anyhow!("unknown competition: {competition}"))?;

    let pool = open_database()?;
    let mut conn = database::get_connection(&pool)?;
    let rows = database::snapshots::load_standings(&mut conn, comp.slug)?;
    if rows.is_empty() {
        println!("No stored standings for {}; run `refresh` first.", comp.slug);
        return Ok(());
    }

    println!("{}", comp.name.bold());
    for row in rows {
        let line = format!(
            "{:>3}. {:<42} {:>2} {:>3} {:>3} {:>3} {:>6} {:>6}",
            row.rank, row.team, row.games, row.wins, row.draws, row.losses, row.points, row.score
        );
        if row.is_home_club {
            println!("{}", line.green().bold());
        } else {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn handle_match(competition: &str, round: u32, home: &str, away: &str) -> Result<()> {
    let comp = config::find_competition(competition)
        .ok_or_else(|| anyhow::anyhow!("unknown competition: {competition}"))?;

    let runtime = tokio::runtime::Runtime::new()?;
    let boards = runtime.block_on(async {
        let client = ResultsClient::new(&AppConfig::new())?;
        client
            .fetch_round_boards(&comp, round, home, away)
            .await
            .map_err(anyhow::Error::from)
    })?;

    if boards.is_empty() {
        println!("No board details available for this pairing.");
        return Ok(());
    }
    for board in &boards {
        if let Some(raw) = &board.raw {
            println!("{raw}");
            continue;
        }
        println!(
            "{:<6} {:<30} ({:>4})  {}  {:<30} ({:>4})",
            board.board,
            board.home_player,
            board.home_elo,
            board.result.as_deref().unwrap_or("-"),
            board.guest_player,
            board.guest_elo,
        );
    }
    Ok(())
}

pub fn handle_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}

fn open_database() -> Result<database::DbPool> {
    let db_path = std::env::var("DATABASE_PATH")
        .unwrap_or_else(|_| "jablonec_chess_results.db".to_string());
    database::create_pool(&db_path)
}
