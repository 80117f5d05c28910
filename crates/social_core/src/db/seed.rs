//! Canonical fixture data for the social network tables.
//!
//! # Invariants
//! - After a reset, `accounts` holds ids 1 and 2 and `posts` holds ids 1
//!   and 2, and the next generated id in each table is 3.

use super::DbResult;
use log::info;
use rusqlite::Connection;

const SEED_SQL: &str = include_str!("seeds_social_network.sql");

/// Clears `accounts` and `posts` and inserts the fixture rows.
///
/// Runs inside one transaction, so a failure leaves the previous contents
/// in place. Must not be called while the connection has an open
/// transaction.
pub fn reset_social_network(conn: &Connection) -> DbResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(SEED_SQL)?;
    tx.commit()?;
    info!("event=db_seed module=db status=ok tables=accounts,posts");
    Ok(())
}
