use crate::error::QueryResult;
use crate::predicate::{contains_ignore_case, SearchPredicate};
use crate::record::Record;
use crate::store::{ensure_unique_ids, RecordStore};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::path::Path;

/// SQL name of the case-insensitive containment function
const CONTAINS_FN: &str = "contains_ci";

const RECORD_COLUMNS: &str =
    "record_id, title, description, price, category, sold, date_of_sale, image";

/// SQLite-backed record store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database: {:?}", db_path))?;

        // Enable WAL mode for crash recovery
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        setup_database(&conn)?;
        register_functions(&conn)?;
        Ok(SqliteStore { conn })
    }

    /// Delete every record and load the new set in one transaction.
    ///
    /// On failure the previous contents are kept.
    pub fn replace_all(&mut self, records: &[Record]) -> Result<usize> {
        ensure_unique_ids(records)?;

        let tx = self.conn.transaction()?;
        let removed = tx.execute("DELETE FROM transactions", [])?;
        let inserted = insert_records(&tx, records)?;
        tx.commit()?;

        tracing::info!(removed, inserted, "record store reloaded");
        Ok(inserted)
    }

    pub fn verify_count(&self) -> Result<i64> {
        verify_count(&self.conn)
    }

    fn where_clause(predicate: &SearchPredicate) -> (String, Vec<Value>) {
        let mut sql = "WHERE sale_month = ?1".to_string();
        let mut values = vec![Value::Integer(predicate.month().ordinal() as i64)];

        if let Some(term) = predicate.term() {
            sql.push_str(&format!(
                " AND ({f}(title, ?2) OR {f}(description, ?2) OR price = ?3)",
                f = CONTAINS_FN
            ));
            values.push(Value::Text(term.text().to_string()));
            // NULL never equals anything, so non-numeric terms skip the price test
            values.push(term.price().map_or(Value::Null, Value::Real));
        }

        (sql, values)
    }

    fn query_records(&self, sql: &str, values: Vec<Value>) -> QueryResult<Vec<Record>> {
        let mut stmt = self.conn.prepare(sql)?;
        let records = stmt
            .query_map(params_from_iter(values), record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

impl RecordStore for SqliteStore {
    fn count_matching(&self, predicate: &SearchPredicate) -> QueryResult<u64> {
        let (clause, values) = Self::where_clause(predicate);
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM transactions {}", clause),
            params_from_iter(values),
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn fetch_page(
        &self,
        predicate: &SearchPredicate,
        offset: u64,
        limit: u64,
    ) -> QueryResult<Vec<Record>> {
        let (clause, mut values) = Self::where_clause(predicate);
        let next = values.len();
        let sql = format!(
            "SELECT {} FROM transactions {} ORDER BY row_id LIMIT ?{} OFFSET ?{}",
            RECORD_COLUMNS,
            clause,
            next + 1,
            next + 2
        );
        values.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
        values.push(Value::Integer(i64::try_from(offset).unwrap_or(i64::MAX)));

        self.query_records(&sql, values)
    }

    fn fetch_all_matching(&self, predicate: &SearchPredicate) -> QueryResult<Vec<Record>> {
        let (clause, values) = Self::where_clause(predicate);
        let sql = format!("SELECT {} FROM transactions {}", RECORD_COLUMNS, clause);

        self.query_records(&sql, values)
    }
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // ==========================================================================
    // Transactions Table (sale_month is derived from date_of_sale at insert)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
            row_id INTEGER PRIMARY KEY AUTOINCREMENT,
            record_id TEXT UNIQUE NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            price REAL NOT NULL,
            category TEXT NOT NULL,
            sold INTEGER NOT NULL,
            date_of_sale TEXT NOT NULL,
            sale_month INTEGER NOT NULL,
            image TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_sale_month ON transactions(sale_month)",
        [],
    )?;

    Ok(())
}

/// Register Rust-side SQL functions so SQL filtering matches SearchPredicate::matches
fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        CONTAINS_FN,
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let haystack: String = ctx.get(0)?;
            let needle: String = ctx.get(1)?;
            Ok(contains_ignore_case(&haystack, &needle))
        },
    )?;

    Ok(())
}

pub fn insert_records(conn: &Connection, records: &[Record]) -> Result<usize> {
    let mut stmt = conn.prepare(
        "INSERT INTO transactions (
            record_id, title, description, price, category,
            sold, date_of_sale, sale_month, image
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )?;

    let mut inserted = 0;
    for record in records {
        stmt.execute(params![
            record.id,
            record.title,
            record.description,
            record.price,
            record.category,
            record.sold,
            record.date_of_sale.to_rfc3339(),
            record.sale_month(),
            record.image,
        ])
        .with_context(|| format!("Failed to insert record {}", record.id))?;

        inserted += 1;
    }

    tracing::debug!(inserted, "records inserted");
    Ok(inserted)
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<Record> {
    let date_str: String = row.get(6)?;
    let date_of_sale = DateTime::parse_from_rfc3339(&date_str)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?
        .with_timezone(&Utc);

    Ok(Record {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        category: row.get(4)?,
        sold: row.get(5)?,
        date_of_sale,
        image: row.get(7)?,
    })
}

pub fn verify_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;

    Ok(count)
}
