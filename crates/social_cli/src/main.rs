//! Command-line listing over a social network database file.
//!
//! Opens (and migrates) the database, optionally restores the fixture data,
//! and prints every record of one table as a JSON line.

use clap::{Parser, ValueEnum};
use log::info;
use social_core::{
    default_log_level, init_logging, open_db, reset_social_network, AccountRepository,
    PostRepository, SqliteAccountRepository, SqlitePostRepository,
};
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "social_cli", version, about = "Inspect accounts and posts")]
struct Cli {
    /// SQLite database file; created when missing.
    #[arg(long)]
    db: PathBuf,
    /// Reset accounts and posts to the fixture rows before listing.
    #[arg(long)]
    seed: bool,
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long)]
    log_dir: Option<String>,
    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long)]
    log_level: Option<String>,
    /// Table to print.
    #[arg(value_enum)]
    table: Table,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Table {
    Accounts,
    Posts,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("social_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let conn = open_db(&cli.db)?;
    if cli.seed {
        reset_social_network(&conn)?;
    }

    let printed = match cli.table {
        Table::Accounts => {
            let accounts = SqliteAccountRepository::try_new(&conn)?.all()?;
            for account in &accounts {
                writeln!(out, "{}", serde_json::to_string(account)?)?;
            }
            accounts.len()
        }
        Table::Posts => {
            let posts = SqlitePostRepository::try_new(&conn)?.all()?;
            for post in &posts {
                writeln!(out, "{}", serde_json::to_string(post)?)?;
            }
            posts.len()
        }
    };

    info!(
        "event=cli_list module=cli status=ok table={:?} rows={} version={}",
        cli.table,
        printed,
        social_core::core_version()
    );
    Ok(())
}
