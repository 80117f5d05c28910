//! Account repository contract and SQLite implementation.
//!
//! # Invariants
//! - `all` returns rows ordered by `id ASC`.
//! - `update`/`delete` on a missing id are silent no-ops that report 0
//!   affected rows.

use crate::model::account::{Account, AccountId};
use crate::repo::{ensure_connection_ready, read_integer, read_text, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TABLE: &str = "accounts";
const COLUMNS: &[&str] = &["id", "email", "username"];

const ACCOUNT_SELECT_SQL: &str = "SELECT id, email, username FROM accounts";

/// Repository interface for account CRUD operations.
pub trait AccountRepository {
    /// Returns every account, ordered by id.
    fn all(&self) -> RepoResult<Vec<Account>>;
    /// Returns the account with `id`, or `RepoError::NotFound`.
    fn find(&self, id: AccountId) -> RepoResult<Account>;
    /// Inserts `email` and `username` and returns the generated id.
    ///
    /// `account.id` is ignored.
    fn create(&self, account: &Account) -> RepoResult<AccountId>;
    /// Overwrites `email` and `username` of the row with `account.id`.
    ///
    /// Returns the number of rows changed.
    fn update(&self, account: &Account) -> RepoResult<usize>;
    /// Deletes the row with `id` and returns the number of rows removed.
    fn delete(&self, id: AccountId) -> RepoResult<usize>;
}

/// SQLite-backed account repository.
pub struct SqliteAccountRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccountRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `RepoError::UninitializedConnection` when migrations were not applied.
    /// - `RepoError::MissingRequiredTable`/`MissingRequiredColumn` when the
    ///   `accounts` table does not have the mapped shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, TABLE, COLUMNS)?;
        Ok(Self { conn })
    }
}

impl AccountRepository for SqliteAccountRepository<'_> {
    fn all(&self) -> RepoResult<Vec<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;

        let mut accounts = Vec::new();
        while let Some(row) = rows.next()? {
            accounts.push(parse_account_row(row)?);
        }

        Ok(accounts)
    }

    fn find(&self, id: AccountId) -> RepoResult<Account> {
        let found = self
            .conn
            .query_row(&format!("{ACCOUNT_SELECT_SQL} WHERE id = ?1;"), [id], |row| {
                Ok(parse_account_row(row))
            })
            .optional()?;

        match found {
            Some(account) => account,
            None => Err(RepoError::NotFound { table: TABLE, id }),
        }
    }

    fn create(&self, account: &Account) -> RepoResult<AccountId> {
        self.conn.execute(
            "INSERT INTO accounts (email, username) VALUES (?1, ?2);",
            params![account.email.as_str(), account.username.as_str()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, account: &Account) -> RepoResult<usize> {
        let id = account.id.ok_or(RepoError::MissingId(TABLE))?;

        let changed = self.conn.execute(
            "UPDATE accounts SET email = ?1, username = ?2 WHERE id = ?3;",
            params![account.email.as_str(), account.username.as_str(), id],
        )?;

        Ok(changed)
    }

    fn delete(&self, id: AccountId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM accounts WHERE id = ?1;", [id])?;
        Ok(removed)
    }
}

fn parse_account_row(row: &Row<'_>) -> RepoResult<Account> {
    Ok(Account {
        id: Some(read_integer(row, TABLE, "id")?),
        email: read_text(row, TABLE, "email")?,
        username: read_text(row, TABLE, "username")?,
    })
}
