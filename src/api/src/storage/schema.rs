//! SQLite schema definitions for the catalogs
//!
//! Tables:
//! - races: race meetings and their advertised start times
//! - sport_events: sporting events and their advertised start times

use rusqlite::{Connection, Result};

/// Create the races table
pub fn create_races_table(conn: &Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS races (
            id INTEGER PRIMARY KEY,
            meeting_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            number INTEGER NOT NULL,
            visible INTEGER NOT NULL,
            advertised_start_time DATETIME NOT NULL
        )
        "#,
        [],
    )?;

    Ok(())
}

/// Create the sport_events table
pub fn create_sport_events_table(conn: &Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS sport_events (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            sport TEXT NOT NULL,
            location TEXT NOT NULL,
            advertised_start_time DATETIME NOT NULL
        )
        "#,
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_create_tables() {
        let conn = Connection::open_in_memory().unwrap();
        create_races_table(&conn).unwrap();
        create_sport_events_table(&conn).unwrap();

        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN
                 ('races', 'sport_events')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_create_tables_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_races_table(&conn).unwrap();
        create_sport_events_table(&conn).unwrap();
        // Should not fail on second call
        create_races_table(&conn).unwrap();
        create_sport_events_table(&conn).unwrap();
    }
}
