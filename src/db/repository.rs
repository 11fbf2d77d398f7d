use anyhow::{anyhow, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::models::{GeoCoordinate, PrayerCacheRecord, PrayerTimes, StatusCheck};
use crate::prayer_times::calculator::parse_clock;
use crate::prayer_times::{CacheKey, PrayerCache};

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| anyhow!("Bad timestamp '{}': {}", s, e))
}

// ─── Cached prayer times ────────────────────────────────────────────────────

pub struct CacheRepo;

impl CacheRepo {
    pub fn get(conn: &Connection, city: &str, date: &str) -> Result<Option<PrayerCacheRecord>> {
        let row = conn
            .query_row(
                "SELECT city, date, fajr, sunrise, dhuhr, asr, maghrib, isha,
                        latitude, longitude, created_at
                 FROM prayer_times_cache WHERE city = ?1 AND date = ?2",
                params![city, date],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        PrayerTimes {
                            fajr: row.get(2)?,
                            sunrise: row.get(3)?,
                            dhuhr: row.get(4)?,
                            asr: row.get(5)?,
                            maghrib: row.get(6)?,
                            isha: row.get(7)?,
                        },
                        GeoCoordinate {
                            lat: row.get(8)?,
                            lng: row.get(9)?,
                        },
                        row.get::<_, String>(10)?,
                    ))
                },
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((city, date, times, coordinates, created_at)) => {
                // Reject rows that were hand-edited into something unparseable.
                for (_, value) in times.schedule() {
                    parse_clock(value)?;
                }
                Ok(Some(PrayerCacheRecord {
                    city,
                    date,
                    times,
                    coordinates,
                    created_at: parse_timestamp(&created_at)?,
                }))
            }
        }
    }

    pub fn store(conn: &Connection, record: &PrayerCacheRecord) -> Result<()> {
        conn.execute(
            "INSERT OR REPLACE INTO prayer_times_cache
                (city, date, fajr, sunrise, dhuhr, asr, maghrib, isha, latitude, longitude, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                record.city,
                record.date,
                record.times.fajr,
                record.times.sunrise,
                record.times.dhuhr,
                record.times.asr,
                record.times.maghrib,
                record.times.isha,
                record.coordinates.lat,
                record.coordinates.lng,
                record.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;
        Ok(())
    }

    pub fn count(conn: &Connection) -> Result<i64> {
        conn.query_row("SELECT COUNT(*) FROM prayer_times_cache", [], |row| row.get(0))
            .map_err(anyhow::Error::from)
    }

    pub fn clear_all(conn: &Connection) -> Result<usize> {
        Ok(conn.execute("DELETE FROM prayer_times_cache", [])?)
    }
}

/// [`PrayerCache`] backed by the `prayer_times_cache` table.
pub struct SqliteCache<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteCache<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl PrayerCache for SqliteCache<'_> {
    fn get(&self, key: &CacheKey) -> Result<Option<PrayerCacheRecord>> {
        CacheRepo::get(self.conn, &key.city, &key.date)
    }

    fn put(&self, key: &CacheKey, record: &PrayerCacheRecord) -> Result<()> {
        if key.city != record.city || key.date != record.date {
            return Err(anyhow!(
                "Cache key {}/{} does not match record {}/{}",
                key.city,
                key.date,
                record.city,
                record.date
            ));
        }
        CacheRepo::store(self.conn, record)
    }
}

// ─── Status checks ──────────────────────────────────────────────────────────

pub struct StatusRepo;

impl StatusRepo {
    pub fn insert(conn: &Connection, check: &StatusCheck) -> Result<()> {
        conn.execute(
            "INSERT INTO status_checks (id, client_name, timestamp) VALUES (?1, ?2, ?3)",
            params![
                check.id.to_string(),
                check.client_name,
                check.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
            ],
        )?;
        Ok(())
    }

    pub fn list(conn: &Connection, limit: usize) -> Result<Vec<StatusCheck>> {
        let mut stmt = conn.prepare(
            "SELECT id, client_name, timestamp FROM status_checks
             ORDER BY timestamp, rowid LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut result = Vec::new();
        for r in rows {
            let (id, client_name, timestamp) = r?;
            result.push(StatusCheck {
                id: Uuid::parse_str(&id).map_err(|e| anyhow!("Bad status id '{}': {}", id, e))?,
                client_name,
                timestamp: parse_timestamp(&timestamp)?,
            });
        }
        Ok(result)
    }
}
