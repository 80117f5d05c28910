//! Repository layer: CRUD contracts over `accounts` and `posts`.
//!
//! # Responsibility
//! - Map one method call to exactly one parameterized SQL statement.
//! - Map returned rows to fresh records, coercing integer columns.
//! - Report semantic errors (`NotFound`, `InvalidData`) in addition to DB
//!   transport errors.
//!
//! # Invariants
//! - Repositories borrow a connection; they never open, close or configure
//!   it.
//! - Values are always bound as parameters, never spliced into SQL text.
//! - No local recovery: every failure surfaces to the caller.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod account_repo;
pub mod post_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by account and post repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite error, propagated unchanged.
    Db(DbError),
    /// `find` matched no row.
    NotFound { table: &'static str, id: i64 },
    /// A persisted value could not be mapped onto the record field.
    InvalidData(String),
    /// `update` was called with a record that has no id.
    MissingId(&'static str),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "no row with id {id} in {table}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::MissingId(table) => write!(f, "cannot update {table} row without an id"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Checks that `conn` is migrated and that `table` has every mapped column.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM pragma_table_info(?1)
            WHERE name = ?2
        );",
        [table, column],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Reads an integer column, accepting native integers or decimal text.
pub(crate) fn read_integer(row: &Row<'_>, table: &str, column: &str) -> RepoResult<i64> {
    coerce_integer(row.get_ref(column)?).map_err(|found| {
        RepoError::InvalidData(format!(
            "expected integer in {table}.{column}, found {found}"
        ))
    })
}

/// Reads a text column verbatim.
pub(crate) fn read_text(row: &Row<'_>, table: &str, column: &str) -> RepoResult<String> {
    match row.get_ref(column)? {
        ValueRef::Text(bytes) => String::from_utf8(bytes.to_vec()).map_err(|_| {
            RepoError::InvalidData(format!("non UTF-8 text in {table}.{column}"))
        }),
        other => Err(RepoError::InvalidData(format!(
            "expected text in {table}.{column}, found {}",
            describe(other)
        ))),
    }
}

fn coerce_integer(value: ValueRef<'_>) -> Result<i64, String> {
    match value {
        ValueRef::Integer(value) => Ok(value),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| text.trim().parse::<i64>().ok())
            .ok_or_else(|| format!("text `{}`", String::from_utf8_lossy(bytes))),
        other => Err(describe(other)),
    }
}

fn describe(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(value) => format!("integer {value}"),
        ValueRef::Real(value) => format!("real {value}"),
        ValueRef::Text(bytes) => format!("text `{}`", String::from_utf8_lossy(bytes)),
        ValueRef::Blob(bytes) => format!("blob of {} bytes", bytes.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::coerce_integer;
    use rusqlite::types::ValueRef;

    #[test]
    fn coerce_integer_accepts_native_and_decimal_text() {
        assert_eq!(coerce_integer(ValueRef::Integer(14)), Ok(14));
        assert_eq!(coerce_integer(ValueRef::Text(b"42")), Ok(42));
        assert_eq!(coerce_integer(ValueRef::Text(b" -7 ")), Ok(-7));
    }

    #[test]
    fn coerce_integer_rejects_non_integers() {
        let err = coerce_integer(ValueRef::Text(b"lots")).unwrap_err();
        assert_eq!(err, "text `lots`");
        assert_eq!(coerce_integer(ValueRef::Null).unwrap_err(), "NULL");
        assert_eq!(coerce_integer(ValueRef::Real(2.5)).unwrap_err(), "real 2.5");
    }
}
