//! Dummy data for the catalogs.
//!
//! Rows use fixed identifiers `1..=count` and `INSERT OR IGNORE`, so seeding
//! an already populated database is a no-op.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use rusqlite::{params, Connection, Result};

const RACE_PREFIXES: [&str; 10] = [
    "Golden", "Silver", "Northern", "Royal", "Autumn", "Spring", "Coastal", "Grand", "Midnight",
    "Summer",
];

const RACE_SUFFIXES: [&str; 8] = [
    "Stakes", "Cup", "Handicap", "Plate", "Derby", "Classic", "Sprint", "Mile",
];

const EVENT_TEAMS: [&str; 12] = [
    "Rovers", "United", "Wanderers", "Tigers", "Eagles", "Sharks", "Giants", "Rangers", "Falcons",
    "Lions", "Storm", "Comets",
];

const SPORTS: [&str; 8] = [
    "Soccer",
    "Tennis",
    "Basketball",
    "Cricket",
    "Rugby",
    "Golf",
    "Baseball",
    "Ice Hockey",
];

const CITIES: [&str; 10] = [
    "Melbourne", "Sydney", "Brisbane", "Perth", "Adelaide", "Auckland", "London", "Dublin",
    "Tokyo", "Chicago",
];

/// Insert `count` races with ids `1..=count`.
pub fn seed_races<R: Rng>(
    conn: &Connection,
    count: u32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<()> {
    let mut stmt = conn.prepare(
        r#"
        INSERT OR IGNORE INTO races
        (id, meeting_id, name, number, visible, advertised_start_time)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )?;

    for id in 1..=count {
        let name = format!(
            "{} {}",
            pick(&RACE_PREFIXES, rng),
            pick(&RACE_SUFFIXES, rng)
        );
        stmt.execute(params![
            id,
            rng.gen_range(1..=10i64),
            name,
            rng.gen_range(1..=12i64),
            rng.gen_bool(0.5),
            start_time(now, rng),
        ])?;
    }

    Ok(())
}

/// Insert `count` sport events with ids `1..=count`.
pub fn seed_events<R: Rng>(
    conn: &Connection,
    count: u32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<()> {
    let mut stmt = conn.prepare(
        r#"
        INSERT OR IGNORE INTO sport_events
        (id, name, sport, location, advertised_start_time)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )?;

    for id in 1..=count {
        let home = pick(&EVENT_TEAMS, rng);
        let away = pick(&EVENT_TEAMS, rng);
        let location = pick(&CITIES, rng);
        stmt.execute(params![
            id,
            format!("{} {} vs {}", location, home, away),
            pick(&SPORTS, rng),
            location,
            start_time(now, rng),
        ])?;
    }

    Ok(())
}

/// Random start time between one day ago and two days ahead, whole seconds.
fn start_time<R: Rng>(now: DateTime<Utc>, rng: &mut R) -> DateTime<Utc> {
    let offset = rng.gen_range(0..=Duration::days(3).num_seconds());
    (now - Duration::days(1) + Duration::seconds(offset)).trunc_subsecs(0)
}

fn pick<'a, R: Rng>(values: &[&'a str], rng: &mut R) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::{create_races_table, create_sport_events_table};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_seed_races() {
        let conn = Connection::open_in_memory().unwrap();
        create_races_table(&conn).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        seed_races(&conn, 100, Utc::now(), &mut rng).unwrap();
        assert_eq!(count(&conn, "races"), 100);

        let (min_id, max_id): (i64, i64) = conn
            .query_row("SELECT MIN(id), MAX(id) FROM races", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!((min_id, max_id), (1, 100));
    }

    #[test]
    fn test_seed_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_sport_events_table(&conn).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        seed_events(&conn, 25, Utc::now(), &mut rng).unwrap();
        seed_events(&conn, 25, Utc::now(), &mut rng).unwrap();
        assert_eq!(count(&conn, "sport_events"), 25);
    }

    #[test]
    fn test_start_time_window() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let start = start_time(now, &mut rng);
            assert!(start >= (now - Duration::days(1)).trunc_subsecs(0));
            assert!(start <= now + Duration::days(2));
            assert_eq!(start.timestamp_subsec_nanos(), 0);
        }
    }
}
