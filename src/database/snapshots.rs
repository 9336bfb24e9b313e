use anyhow::{Context, Result};
use chrono::Utc;
use log::warn;
use rusqlite::{Transaction, params};
use serde::Serialize;

use super::connection::DbConn;
use crate::domain::{ScheduleEntry, StandingRow};

/// Replace a competition's standings snapshot.
///
/// Refuses an empty replacement and returns `false` with the stored rows
/// untouched: stale standings beat a silently erased table when the source
/// page drifts or serves an empty body.
pub fn replace_standings(
    conn: &mut DbConn,
    competition: &str,
    rows: &[StandingRow],
) -> Result<bool> {
    if rows.is_empty() {
        warn!("empty standings parse for {competition}; keeping previous snapshot");
        return Ok(false);
    }

    let tx = conn.transaction().context("Failed to open transaction")?;
    tx.execute(
        "DELETE FROM standings WHERE competition = ?1",
        params![competition],
    )?;
    for row in rows {
        tx.execute(
            "INSERT INTO standings (competition, rank, team, games, wins, draws, losses, points, score, is_home_club, details_url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                competition,
                row.rank,
                row.team,
                row.games,
                row.wins,
                row.draws,
                row.losses,
                row.points,
                row.score,
                row.is_home_club,
                row.details_url,
            ],
        )?;
    }
    record_snapshot(&tx, competition, "standings", rows.len())?;
    tx.commit().context("Failed to commit standings snapshot")?;
    Ok(true)
}

pub fn load_standings(conn: &mut DbConn, competition: &str) -> Result<Vec<StandingRow>> {
    let mut stmt = conn.prepare(
        "SELECT rank, team, games, wins, draws, losses, points, score, is_home_club, details_url
         FROM standings WHERE competition = ?1 ORDER BY rank",
    )?;
    let rows = stmt
        .query_map(params![competition], |row| {
            Ok(StandingRow {
                rank: row.get(0)?,
                team: row.get(1)?,
                games: row.get(2)?,
                wins: row.get(3)?,
                draws: row.get(4)?,
                losses: row.get(5)?,
                points: row.get(6)?,
                score: row.get(7)?,
                is_home_club: row.get(8)?,
                details_url: row.get(9)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to load standings snapshot")?;
    Ok(rows)
}

/// Replace a competition's schedule wholesale. Unlike standings, an empty
/// schedule is storable — a season without a published draw is a real state.
pub fn replace_schedule(
    conn: &mut DbConn,
    competition: &str,
    entries: &[ScheduleEntry],
) -> Result<()> {
    let tx = conn.transaction().context("Failed to open transaction")?;
    tx.execute(
        "DELETE FROM schedule WHERE competition = ?1",
        params![competition],
    )?;
    for entry in entries {
        tx.execute(
            "INSERT INTO schedule (competition, round, date, home, away, result)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                competition,
                entry.round,
                entry.date,
                entry.home,
                entry.away,
                entry.result,
            ],
        )?;
    }
    record_snapshot(&tx, competition, "schedule", entries.len())?;
    tx.commit().context("Failed to commit schedule snapshot")
}

pub fn load_schedule(conn: &mut DbConn, competition: &str) -> Result<Vec<ScheduleEntry>> {
    let mut stmt = conn.prepare(
        "SELECT round, date, home, away, result
         FROM schedule WHERE competition = ?1 ORDER BY round, rowid",
    )?;
    let entries = stmt
        .query_map(params![competition], |row| {
            Ok(ScheduleEntry {
                round: row.get(0)?,
                date: row.get(1)?,
                home: row.get(2)?,
                away: row.get(3)?,
                result: row.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to load schedule snapshot")?;
    Ok(entries)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSnapshot {
    pub kind: String,
    pub fetched_at: String,
    pub row_count: i64,
}

pub fn snapshot_infos(conn: &mut DbConn, competition: &str) -> Result<Vec<StoredSnapshot>> {
    let mut stmt = conn.prepare(
        "SELECT kind, fetched_at, row_count FROM snapshots WHERE competition = ?1 ORDER BY kind",
    )?;
    let infos = stmt
        .query_map(params![competition], |row| {
            Ok(StoredSnapshot {
                kind: row.get(0)?,
                fetched_at: row.get(1)?,
                row_count: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to load snapshot metadata")?;
    Ok(infos)
}

fn record_snapshot(
    tx: &Transaction<'_>,
    competition: &str,
    kind: &str,
    row_count: usize,
) -> Result<()> {
    tx.execute(
        "INSERT INTO snapshots (competition, kind, fetched_at, row_count) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (competition, kind) DO UPDATE SET fetched_at = ?3, row_count = ?4",
        params![competition, kind, Utc::now().to_rfc3339(), row_count as i64],
    )
    .context("Failed to record snapshot metadata")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{DbPool, setup};
    use r2d2_sqlite::SqliteConnectionManager;

    fn test_pool() -> DbPool {
        // Single connection: every handle must see the same in-memory db.
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .build(SqliteConnectionManager::memory())
            .unwrap();
        let mut conn = pool.get().unwrap();
        setup::init_schema(&mut conn).unwrap();
        pool
    }

    fn row(rank: u32, team: &str) -> StandingRow {
        StandingRow {
            rank,
            team: team.to_string(),
            games: 7,
            wins: 5,
            draws: 1,
            losses: 1,
            points: 11.5,
            score: 21.0,
            is_home_club: false,
            details_url: None,
        }
    }

    #[test]
    fn standings_snapshots_replace_wholesale() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();

        assert!(replace_standings(&mut conn, "test", &[row(1, "A"), row(2, "B")]).unwrap());
        assert!(replace_standings(&mut conn, "test", &[row(1, "C")]).unwrap());

        let stored = load_standings(&mut conn, "test").unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].team, "C");
    }

    #[test]
    fn empty_standings_never_erase_a_previous_snapshot() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();

        replace_standings(&mut conn, "test", &[row(1, "A"), row(2, "B")]).unwrap();
        assert!(!replace_standings(&mut conn, "test", &[]).unwrap());

        let stored = load_standings(&mut conn, "test").unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].team, "A");
    }

    #[test]
    fn schedule_replaces_and_loads_in_round_order() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();

        let entries = vec![
            ScheduleEntry {
                round: 2,
                date: "22.3.2025".to_string(),
                home: "C".to_string(),
                away: "D".to_string(),
                result: None,
            },
            ScheduleEntry {
                round: 1,
                date: "15.3.2025".to_string(),
                home: "A".to_string(),
                away: "B".to_string(),
                result: Some("4,5 : 3,5".to_string()),
            },
        ];
        replace_schedule(&mut conn, "test", &entries).unwrap();

        let stored = load_schedule(&mut conn, "test").unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].round, 1);
        assert_eq!(stored[0].result.as_deref(), Some("4,5 : 3,5"));

        // Empty schedules are storable; no stale protection here.
        replace_schedule(&mut conn, "test", &[]).unwrap();
        assert!(load_schedule(&mut conn, "test").unwrap().is_empty());
    }

    #[test]
    fn snapshot_metadata_tracks_the_latest_refresh() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();

        replace_standings(&mut conn, "test", &[row(1, "A")]).unwrap();
        replace_standings(&mut conn, "test", &[row(1, "A"), row(2, "B")]).unwrap();

        let infos = snapshot_infos(&mut conn, "test").unwrap();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].kind, "standings");
        assert_eq!(infos[0].row_count, 2);
    }
}
