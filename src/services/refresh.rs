use anyhow::Result;
use log::{error, info, warn};

use crate::config::settings::AppConfig;
use crate::config::{CompetitionConfig, get_competitions};
use crate::database::{self, DbPool};
use crate::errors::ScrapeError;
use crate::fetchers::ResultsClient;

/// Refreshes every followed competition's standings and schedule.
pub struct RefreshService {
    pool: DbPool,
    config: AppConfig,
}

impl RefreshService {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        Self { pool, config }
    }

    pub async fn run(&self) -> Result<()> {
        info!("=== Starting results refresh ===");

        // One broken competition must not take its siblings down, so each
        // runs in its own task and reports independently.
        let mut tasks = Vec::new();
        for comp in get_competitions() {
            let pool = self.pool.clone();
            let config = self.config.clone();
            tasks.push(tokio::spawn(async move {
                if let Err(e) = refresh_competition(&pool, &config, &comp).await {
                    error!("refresh failed for {}: {e:#}", comp.slug);
                }
            }));
        }
        for task in tasks {
            let _ = task.await;
        }

        info!("=== Refresh complete ===");
        Ok(())
    }
}

async fn refresh_competition(
    pool: &DbPool,
    config: &AppConfig,
    comp: &CompetitionConfig,
) -> Result<()> {
    let client = ResultsClient::new(config)?;

    // Standings and schedule are independent fetches; both finish before
    // anything is stored, so readers never see one side newer than a
    // half-written other.
    let (standings, schedule) = tokio::join!(
        client.fetch_standings(comp),
        client.fetch_schedule(comp),
    );

    let mut conn = database::get_connection(pool)?;

    match standings {
        Ok(rows) => {
            database::snapshots::replace_standings(&mut conn, comp.slug, &rows)?;
            info!("{}: {} standings rows", comp.slug, rows.len());
        }
        Err(ScrapeError::EmptyParse { .. }) => {
            warn!(
                "{}: standings parse yielded nothing; previous snapshot kept",
                comp.slug
            );
        }
        Err(e) => warn!("{}: standings fetch failed: {e}", comp.slug),
    }

    match schedule {
        Ok(entries) => {
            database::snapshots::replace_schedule(&mut conn, comp.slug, &entries)?;
            info!("{}: {} fixtures", comp.slug, entries.len());
        }
        Err(e) => warn!("{}: schedule fetch failed: {e}", comp.slug),
    }

    Ok(())
}
