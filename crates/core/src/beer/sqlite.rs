//! SQLite-backed beer store implementation.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode};
use uuid::Uuid;

use super::{BeerError, BeerRecord, BeerStore, BeerUpdate, NewBeer};

const SELECT_COLUMNS: &str =
    "SELECT id, beer_style, min_temp, max_temp, created_at, updated_at FROM beers";

/// SQLite-backed beer store.
pub struct SqliteBeerStore {
    conn: Mutex<Connection>,
}

impl SqliteBeerStore {
    /// Create a new SQLite store, creating the database file and table if needed.
    pub fn new(path: &Path) -> Result<Self, BeerError> {
        let conn = Connection::open(path).map_err(|e| BeerError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite store (useful for testing).
    pub fn in_memory() -> Result<Self, BeerError> {
        let conn = Connection::open_in_memory().map_err(|e| BeerError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), BeerError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS beers (
                id TEXT PRIMARY KEY,
                beer_style TEXT NOT NULL UNIQUE,
                min_temp REAL NOT NULL,
                max_temp REAL NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_beers_temp_range ON beers(min_temp, max_temp);
            "#,
        )
        .map_err(|e| BeerError::Database(e.to_string()))?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, BeerError> {
        self.conn
            .lock()
            .map_err(|_| BeerError::Database("connection lock poisoned".to_string()))
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<BeerRecord> {
        let created_at_str: String = row.get(4)?;
        let updated_at_str: String = row.get(5)?;

        Ok(BeerRecord {
            id: row.get(0)?,
            beer_style: row.get(1)?,
            min_temp: row.get(2)?,
            max_temp: row.get(3)?,
            created_at: parse_timestamp(&created_at_str),
            updated_at: parse_timestamp(&updated_at_str),
        })
    }

    fn query_records(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<BeerRecord>, BeerError> {
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| BeerError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params, Self::row_to_record)
            .map_err(|e| BeerError::Database(e.to_string()))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| BeerError::Database(e.to_string()))?);
        }
        Ok(records)
    }

    fn get_with(conn: &Connection, id: &str) -> Result<BeerRecord, BeerError> {
        conn.query_row(
            &format!("{} WHERE id = ?", SELECT_COLUMNS),
            params![id],
            Self::row_to_record,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => BeerError::NotFound(id.to_string()),
            _ => BeerError::Database(e.to_string()),
        })
    }
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Map a write error, telling unique violations on `beer_style` apart.
fn write_error(e: rusqlite::Error, beer_style: &str) -> BeerError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
            BeerError::Duplicate(beer_style.to_string())
        }
        _ => BeerError::Database(e.to_string()),
    }
}

impl BeerStore for SqliteBeerStore {
    fn find_by_temperature(&self, temperature: f64) -> Result<Vec<BeerRecord>, BeerError> {
        let conn = self.conn()?;
        Self::query_records(
            &conn,
            &format!(
                "{} WHERE min_temp <= ?1 AND max_temp >= ?1 ORDER BY beer_style ASC",
                SELECT_COLUMNS
            ),
            params![temperature],
        )
    }

    fn list(&self) -> Result<Vec<BeerRecord>, BeerError> {
        let conn = self.conn()?;
        Self::query_records(
            &conn,
            &format!("{} ORDER BY beer_style ASC", SELECT_COLUMNS),
            [],
        )
    }

    fn count(&self) -> Result<u64, BeerError> {
        let conn = self.conn()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM beers", [], |row| row.get(0))
            .map_err(|e| BeerError::Database(e.to_string()))?;
        Ok(count as u64)
    }

    fn get(&self, id: &str) -> Result<BeerRecord, BeerError> {
        let conn = self.conn()?;
        Self::get_with(&conn, id)
    }

    fn insert(&self, beer: &NewBeer) -> Result<BeerRecord, BeerError> {
        let conn = self.conn()?;
        let now = Utc::now();
        let now_str = now.to_rfc3339();
        let id = Uuid::new_v4().to_string();

        conn.execute(
            "INSERT INTO beers (id, beer_style, min_temp, max_temp, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                &id,
                &beer.beer_style,
                beer.min_temp,
                beer.max_temp,
                &now_str,
                &now_str,
            ],
        )
        .map_err(|e| write_error(e, &beer.beer_style))?;

        Self::get_with(&conn, &id)
    }

    fn update(&self, id: &str, update: &BeerUpdate) -> Result<BeerRecord, BeerError> {
        let conn = self.conn()?;
        let current = Self::get_with(&conn, id)?;

        let beer_style = update
            .beer_style
            .clone()
            .unwrap_or(current.beer_style);
        let min_temp = update.min_temp.unwrap_or(current.min_temp);
        let max_temp = update.max_temp.unwrap_or(current.max_temp);

        conn.execute(
            "UPDATE beers SET beer_style = ?, min_temp = ?, max_temp = ?, updated_at = ?
             WHERE id = ?",
            params![
                &beer_style,
                min_temp,
                max_temp,
                Utc::now().to_rfc3339(),
                id
            ],
        )
        .map_err(|e| write_error(e, &beer_style))?;

        Self::get_with(&conn, id)
    }

    fn delete(&self, id: &str) -> Result<BeerRecord, BeerError> {
        let conn = self.conn()?;
        let record = Self::get_with(&conn, id)?;

        conn.execute("DELETE FROM beers WHERE id = ?", params![id])
            .map_err(|e| BeerError::Database(e.to_string()))?;

        Ok(record)
    }
}
