mod config;
mod directories;
mod opt;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use crypto_upgrade::{
    fail, failt, get_version, latest_version, upgrade, upgrade_error, upgrade_info,
    upgrade_warning, Dialect,
};
use log::LevelFilter;
use opt::{Command, Opts};
use rusqlite::Connection;
use std::path::PathBuf;

fn main() {
    let args = Opts::parse();

    env_logger::Builder::new()
        .filter(None, match &args.verbose {
            1 => LevelFilter::Info,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Debug,
            4 => LevelFilter::Trace,
            _ => LevelFilter::Off,
        })
        .init();

    if let Err(e) = run(&args) {
        upgrade_error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Pick the database from the command line, falling back to the config file
fn database_path(args: &Opts) -> Result<PathBuf> {
    if let Some(path) = &args.database {
        return Ok(path.clone());
    }

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default_location()?,
    };

    config
        .database
        .context("no database given: pass --database or set `database` in the config file")
}

fn run(args: &Opts) -> Result<()> {
    let path = database_path(args)?;
    log::debug!("using crypto store: {}", path.display());

    let mut conn =
        Connection::open(&path).context(fail!("opening database: {}", path.display()))?;

    let current = get_version(&mut conn).context(failt!("read schema version"))?;
    let latest = latest_version();

    match args.cmd {
        Command::Version => {
            println!("{}/{}", current, latest);
        },
        Command::Upgrade => {
            if current > latest {
                upgrade_warning!(
                    "schema version {} is newer than this tool knows about ({})",
                    current,
                    latest
                );
            } else if current == latest {
                upgrade_info!("already up to date");
            }

            upgrade(&mut conn, Dialect::Sqlite.as_str()).context(failt!(
                "upgrade {} from version {}",
                path.display(),
                current
            ))?;

            let now = get_version(&mut conn).context(failt!("read schema version"))?;
            if now != current {
                upgrade_info!("upgraded from version {} to {}", current, now);
            }
            println!("{}", now);
        },
    }

    Ok(())
}
