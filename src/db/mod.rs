//! SQLite sink: connection handling, table creation and batched inserts.

pub mod capacity;

use std::path::Path;

use log::debug;
use rusqlite::{Connection, ToSql, Transaction};
use rusqlite::types::ToSqlOutput;

use crate::error::{Error, Result};
use crate::schema::{gen, TableSchema};

/// A value ready to be bound to an insert statement
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            SqlValue::Null => Ok(ToSqlOutput::from(rusqlite::types::Null)),
            SqlValue::Integer(i) => Ok(ToSqlOutput::from(*i)),
            SqlValue::Real(f) => Ok(ToSqlOutput::from(*f)),
            SqlValue::Text(s) => Ok(ToSqlOutput::from(s.as_str())),
        }
    }
}

/// An in-memory row bound for a specific output table. Values must be in
/// the table's column order.
pub trait Record {
    fn schema() -> &'static TableSchema;
    fn values(&self) -> Vec<SqlValue>;
}

/// Handle to the output database.
pub struct Database {
    conn: Connection,
    capacity: usize,
}

impl Database {
    /// Create a new database file. Building into an existing path is a
    /// precondition error; nothing is created or overwritten.
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(Error::DatabaseExists(path.to_path_buf()));
        }

        let conn = Connection::open(path)?;

        // Optimize for bulk insert
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA cache_size = -64000;",
        )?;

        let capacity = capacity::probe_capacity();
        debug!("backend accepts {} parameters per statement", capacity);

        Ok(Self { conn, capacity })
    }

    /// Transient in-memory database, used by the test suites.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            capacity: capacity::FALLBACK_CAPACITY,
        })
    }

    /// Max bound parameters per statement, as probed at open time.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Create tables (and their foreign-key indexes) for the given schemas.
    /// Guarded with IF NOT EXISTS.
    pub fn create_tables(&self, schemas: &[&TableSchema]) -> Result<()> {
        for schema in schemas {
            self.conn.execute(&gen::generate_create_table(schema), [])?;
            for index_sql in gen::generate_indexes(schema) {
                self.conn.execute(&index_sql, [])?;
            }
        }
        Ok(())
    }

    /// Begin a transaction scope for one entity family.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// Primary-key lookup used for cross-family foreign key resolution.
    pub fn contains(&self, table: &'static str, id: i64) -> Result<bool> {
        let sql = format!("SELECT 1 FROM {} WHERE id = ?", table);
        let mut stmt = self.conn.prepare_cached(&sql)?;
        Ok(stmt.exists([id])?)
    }
}

/// Rows per multi-row INSERT for a record of `fields` columns under a
/// `capacity` parameter ceiling. One row of headroom is left for driver
/// overhead.
pub fn chunk_size(capacity: usize, fields: usize) -> usize {
    (capacity / fields).saturating_sub(1).max(1)
}

/// Insert records in capacity-sized chunks within the given transaction.
/// Returns the number of rows written.
pub fn insert_many<R: Record>(
    tx: &Transaction,
    capacity: usize,
    records: &[R],
) -> Result<usize> {
    if records.is_empty() {
        return Ok(0);
    }

    let schema = R::schema();
    let columns: Vec<&str> = schema.columns.iter().map(|c| c.name).collect();
    let row_placeholders = format!("({})", vec!["?"; columns.len()].join(", "));

    for chunk in records.chunks(chunk_size(capacity, columns.len())) {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            schema.name,
            columns.join(", "),
            vec![row_placeholders.as_str(); chunk.len()].join(", ")
        );

        let params: Vec<SqlValue> = chunk.iter().flat_map(|r| r.values()).collect();
        let mut stmt = tx.prepare(&sql)?;
        stmt.execute(rusqlite::params_from_iter(params))?;
    }

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables::TYPES;

    #[test]
    fn test_chunk_size_leaves_headroom() {
        assert_eq!(chunk_size(999, 3), 332);
        assert_eq!(chunk_size(10, 3), 2);
    }

    #[test]
    fn test_chunk_size_never_zero() {
        assert_eq!(chunk_size(3, 3), 1);
        assert_eq!(chunk_size(1, 8), 1);
    }

    struct TypeRow(i64, i64);

    impl Record for TypeRow {
        fn schema() -> &'static TableSchema {
            &TYPES
        }

        fn values(&self) -> Vec<SqlValue> {
            vec![SqlValue::Integer(self.0), SqlValue::Integer(self.1)]
        }
    }

    #[test]
    fn test_insert_many_preserves_all_rows_across_chunks() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute(&gen::generate_create_table(&TYPES), []).unwrap();

        let records: Vec<TypeRow> = (1..=10).map(|i| TypeRow(i, 1)).collect();

        // capacity 5 with 2 fields => chunk size 1, one statement per row
        let tx = conn.transaction().unwrap();
        let written = insert_many(&tx, 5, &records).unwrap();
        tx.commit().unwrap();
        assert_eq!(written, 10);

        let count: i64 = conn
            .query_row("SELECT count(*) FROM types", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 10);

        let sum: i64 = conn
            .query_row("SELECT sum(id) FROM types", [], |row| row.get(0))
            .unwrap();
        assert_eq!(sum, 55);
    }

    #[test]
    fn test_transaction_rolls_back_on_drop() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute(&gen::generate_create_table(&TYPES), []).unwrap();

        {
            let tx = conn.transaction().unwrap();
            insert_many(&tx, 999, &[TypeRow(1, 1)]).unwrap();
            // dropped without commit
        }

        let count: i64 = conn
            .query_row("SELECT count(*) FROM types", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
