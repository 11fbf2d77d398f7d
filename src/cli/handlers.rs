use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use log::info;
use rusqlite::Connection;
use serde::Serialize;
use serde_json::json;
use std::io::{self, BufRead, Write};

use crate::cli::args::{CacheCommands, CoordArgs, StatusCommands, ZakatArgs};
use crate::config::data::{islamic_events, random_quote};
use crate::config::AppConfig;
use crate::db::repository::{CacheRepo, SqliteCache, StatusRepo};
use crate::error::{parse_iso_date, InputError};
use crate::models::{City, GeoCoordinate, StatusCheck, WealthAssessment};
use crate::prayer_times::{next_prayer, times_for_city, times_for_coordinates, NoCache, PrayerCache};
use crate::qibla::{compass_point, qibla_from};
use crate::utils::format::{format_amount, format_duration_secs, pad_right};
use crate::utils::hijri::{approximate, hijri_with_offset};
use crate::zakat::evaluate;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

/// How many status checks `status list` returns at most.
const STATUS_LIST_LIMIT: usize = 1000;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ─── Location resolution ─────────────────────────────────────────────────────

/// Where a request points: a configured city or raw coordinates.
pub enum Target {
    City(City),
    Coordinates(GeoCoordinate),
}

pub fn resolve_target(
    config: &AppConfig,
    city: Option<&str>,
    coords: &CoordArgs,
) -> Result<Target, InputError> {
    match (coords.lat, coords.lng, city) {
        (Some(lat), Some(lng), _) => Ok(Target::Coordinates(GeoCoordinate::new(lat, lng)?)),
        (_, _, Some(name)) => Ok(Target::City(config.find_city(name)?.clone())),
        _ => Ok(Target::City(config.default_city()?.clone())),
    }
}

fn resolve_date(date: Option<&str>) -> Result<NaiveDate, InputError> {
    match date {
        Some(s) => parse_iso_date(s),
        None => Ok(Local::now().date_naive()),
    }
}

// ─── Setup ───────────────────────────────────────────────────────────────────

pub fn handle_setup(config: &mut AppConfig, reset: bool) -> Result<()> {
    let path = AppConfig::config_path()?;
    if !reset && path.exists() {
        println!("zee is already configured ({}). Use --reset to reconfigure.", path.display());
        return Ok(());
    }

    println!();
    println_colored!(GOLD, "  Choose your default city");
    println!();
    for (i, city) in config.cities.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, city.name);
    }
    println!();

    let choice = prompt(&format!("  City [1-{}, or name]: ", config.cities.len()))?;
    let city = pick_city(config, &choice)?;

    let offset = prompt("  Hijri offset in days (e.g. -1, 0, +1) [0]: ")?;
    let offset = if offset.trim().is_empty() {
        0
    } else {
        offset
            .trim()
            .trim_start_matches('+')
            .parse::<i32>()
            .map_err(|_| anyhow!("Hijri offset must be a whole number of days, got '{}'", offset))?
    };

    config.location.default_city = city;
    config.calendar.hijri_offset = offset;
    config.save()?;
    info!("saved configuration to {:?}", path);

    println!();
    println_colored!(
        GREEN,
        "  ✓ Default city set to {} (hijri offset {:+})",
        config.location.default_city,
        offset
    );
    Ok(())
}

/// Accepts either a 1-based index into the city list or a city name.
fn pick_city(config: &AppConfig, choice: &str) -> Result<String> {
    let choice = choice.trim();
    if choice.is_empty() {
        return Ok(config.location.default_city.clone());
    }
    if let Ok(n) = choice.parse::<usize>() {
        return config
            .cities
            .get(n.wrapping_sub(1))
            .map(|c| c.name.clone())
            .ok_or_else(|| anyhow!("No city number {}", n));
    }
    Ok(config.find_city(choice)?.name.clone())
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(
    conn: &Connection,
    config: &AppConfig,
    city: Option<&str>,
    coords: &CoordArgs,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let date = resolve_date(date)?;
    let target = resolve_target(config, city, coords)?;

    let set = match &target {
        Target::City(city) => {
            let sqlite = SqliteCache::new(conn);
            let cache: &dyn PrayerCache = if config.cache.enabled { &sqlite } else { &NoCache };
            times_for_city(cache, city, date)
        }
        Target::Coordinates(coord) => times_for_coordinates(*coord, date),
    };

    if json {
        return print_json(&set);
    }

    let now = Local::now();
    let is_today = date == now.date_naive();

    println!();
    println_colored!(GOLD, "  Prayer Times — {} ({})", set.city, set.date);
    println!();

    for (prayer, time) in set.times.schedule() {
        let is_past = is_today && time < now.format("%H:%M").to_string().as_str();
        let line = format!("  {}  {}", pad_right(prayer.display_name(), 10), time);
        if is_past {
            println_colored!(DIM, "{}", line);
        } else {
            println_colored!(BOLD, "{}", line);
        }
    }

    if is_today {
        // Tomorrow's Fajr is only needed once today's prayers are over.
        let tomorrow = match (&target, date.succ_opt()) {
            (Target::City(city), Some(next)) => times_for_city(&NoCache, city, next).times,
            (Target::Coordinates(coord), Some(next)) => times_for_coordinates(*coord, next).times,
            (_, None) => set.times.clone(),
        };
        let (prayer, secs) = next_prayer(&set.times, &tomorrow, now.time())?;
        println!();
        println_colored!(AMBER, "  Next: {} in {}", prayer.display_name(), format_duration_secs(secs));
    }
    println!();
    Ok(())
}

// ─── Qibla ───────────────────────────────────────────────────────────────────

pub fn handle_qibla(
    config: &AppConfig,
    city: Option<&str>,
    coords: &CoordArgs,
    json: bool,
) -> Result<()> {
    let target = resolve_target(config, city, coords)?;
    let (label, coord) = match &target {
        Target::City(city) => (city.name.clone(), city.coordinate()),
        Target::Coordinates(coord) => (coord.label(), *coord),
    };
    let qibla = qibla_from(coord);

    if json {
        let value = match target {
            Target::City(_) => json!({
                "direction": qibla.direction,
                "distance": qibla.distance,
                "city": label,
            }),
            Target::Coordinates(coord) => json!({
                "direction": qibla.direction,
                "distance": qibla.distance,
                "coordinates": coord,
            }),
        };
        return print_json(&value);
    }

    println!();
    println_colored!(GOLD, "  Qibla — {}", label);
    println!();
    println_colored!(
        BOLD,
        "  Direction:  {:.1}° ({}) from true north",
        qibla.direction,
        compass_point(qibla.direction)
    );
    println!("  Distance:   {}", qibla.distance);
    println!();
    Ok(())
}

// ─── Zakat ───────────────────────────────────────────────────────────────────

pub fn handle_zakat(config: &AppConfig, args: &ZakatArgs, json: bool) -> Result<()> {
    let wealth = WealthAssessment {
        cash: args.cash,
        savings: args.savings,
        gold: args.gold,
        silver: args.silver,
        business: args.business,
        investments: args.investments,
        debts: args.debts,
    };
    wealth.validate()?;

    let result = evaluate(&wealth, &config.zakat);

    if json {
        return print_json(&result);
    }

    println!();
    println_colored!(GOLD, "  Zakat Assessment");
    println!();
    println!("  Total assets:   {}", format_amount(result.total_assets));
    println!("  Total debts:    {}", format_amount(result.total_debts));
    println_colored!(BOLD, "  Net wealth:     {}", format_amount(result.net_wealth));
    println_colored!(DIM, "  Nisab:          {}", format_amount(result.nisab_threshold));
    println!();
    if result.is_eligible {
        println_colored!(AMBER, "  Zakat due:      {}", format_amount(result.zakat_due));
    } else {
        println_colored!(GREEN, "  ✓ Below nisab — no zakat due");
    }
    println!();
    Ok(())
}

// ─── Hijri ───────────────────────────────────────────────────────────────────

pub fn handle_hijri(config: &AppConfig, date: Option<&str>, json: bool) -> Result<()> {
    let calendar = config.hijri_calendar();
    let hijri = match date {
        Some(s) => approximate(parse_iso_date(s)?, &calendar)?,
        None => hijri_with_offset(
            Local::now().date_naive(),
            config.calendar.hijri_offset,
            &calendar,
        )?,
    };

    if json {
        return print_json(&json!({
            "hijri_date": hijri.formatted(),
            "gregorian_date": hijri.gregorian_label,
            "day_name": hijri.weekday,
            "day": hijri.day,
            "month": hijri.month,
            "month_name": hijri.month_name,
            "year": hijri.year,
        }));
    }

    println!();
    println_colored!(GOLD, "  {}", hijri.formatted());
    println_colored!(DIM, "  {}", hijri.gregorian_label);
    println!();
    Ok(())
}

// ─── Static tables ───────────────────────────────────────────────────────────

pub fn handle_cities(config: &AppConfig, json: bool) -> Result<()> {
    if json {
        return print_json(&config.cities);
    }
    println!();
    println_colored!(GOLD, "  Cities");
    println!();
    for city in &config.cities {
        let marker = if city.name == config.location.default_city { "*" } else { " " };
        println!(
            "  {} {}  {:>9.4}  {:>9.4}",
            marker,
            pad_right(&city.name, 12),
            city.latitude,
            city.longitude
        );
    }
    println!();
    Ok(())
}

pub fn handle_events(json: bool) -> Result<()> {
    let events = islamic_events();
    if json {
        return print_json(&events);
    }
    println!();
    println_colored!(GOLD, "  Islamic Events");
    println!();
    for e in &events {
        println_colored!(BOLD, "  {}  {}", e.date, e.event);
        println_colored!(DIM, "              {}", e.description);
    }
    println!();
    Ok(())
}

pub fn handle_quote(json: bool) -> Result<()> {
    let quote = random_quote(&mut rand::thread_rng());
    if json {
        return print_json(&json!({ "quote": quote }));
    }
    println!();
    println_colored!(GOLD, "  {}", quote);
    println!();
    Ok(())
}

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn handle_status(conn: &Connection, action: &StatusCommands, json: bool) -> Result<()> {
    match action {
        StatusCommands::Ping { client } => {
            let check = StatusCheck::new(client);
            StatusRepo::insert(conn, &check)?;
            if json {
                return print_json(&check);
            }
            println_colored!(GREEN, "  ✓ Recorded status check {} for {}", check.id, check.client_name);
        }
        StatusCommands::List => {
            let checks = StatusRepo::list(conn, STATUS_LIST_LIMIT)?;
            if json {
                return print_json(&checks);
            }
            println!();
            if checks.is_empty() {
                println_colored!(DIM, "  No status checks recorded");
            }
            for c in &checks {
                println!(
                    "  {}  {}  {}",
                    c.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    pad_right(&c.client_name, 16),
                    c.id
                );
            }
            println!();
        }
    }
    Ok(())
}

// ─── Cache ───────────────────────────────────────────────────────────────────

pub fn handle_cache(conn: &Connection, action: &CacheCommands) -> Result<()> {
    match action {
        CacheCommands::Info => {
            let count = CacheRepo::count(conn)?;
            println_colored!(BOLD, "  {} cached city-days", count);
        }
        CacheCommands::Clear => {
            let removed = CacheRepo::clear_all(conn)?;
            println_colored!(GREEN, "  ✓ Removed {} cached entries", removed);
        }
    }
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}
