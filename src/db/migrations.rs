use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS prayer_times_cache (
            city        TEXT NOT NULL,
            date        TEXT NOT NULL,
            fajr        TEXT NOT NULL,
            sunrise     TEXT NOT NULL,
            dhuhr       TEXT NOT NULL,
            asr         TEXT NOT NULL,
            maghrib     TEXT NOT NULL,
            isha        TEXT NOT NULL,
            latitude    REAL NOT NULL,
            longitude   REAL NOT NULL,
            created_at  TEXT NOT NULL,
            PRIMARY KEY (city, date)
        );

        CREATE TABLE IF NOT EXISTS status_checks (
            id           TEXT PRIMARY KEY,
            client_name  TEXT NOT NULL,
            timestamp    TEXT NOT NULL
        );
    ")?;
    Ok(())
}
