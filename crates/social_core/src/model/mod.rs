//! Plain records for rows of the `accounts` and `posts` tables.
//!
//! # Invariants
//! - `id` is `None` until the database assigns one; core code never
//!   generates ids.
//! - Records carry no identity beyond their fields and are never cached.

pub mod account;
pub mod post;
