//! Sequential, versioned schema upgrades for an SQL-backed crypto store.
//!
//! The store's schema is advanced one [`Upgrade`] at a time. Each step runs
//! in its own transaction together with the write of the new schema version,
//! so a store is always left at a fully committed version.
//!
//! ```no_run
//! use crypto_upgrade::Dialect;
//!
//! let mut conn = rusqlite::Connection::open("crypto.db")?;
//! crypto_upgrade::upgrade(&mut conn, Dialect::Sqlite.as_str())?;
//! # Ok::<(), crypto_upgrade::Error>(())
//! ```

mod macros;

pub mod dialect;
pub mod store;
pub mod upgrade;
pub mod version;

pub use dialect::Dialect;
pub use store::{Store, Txn};
pub use upgrade::{latest_version, upgrade, Upgrade, UPGRADES};
pub use version::{get_version, set_version};

use std::error;
use thiserror::Error;

/// An error coming from a database driver
pub type BoxError = Box<dyn error::Error + Send + Sync + 'static>;

/// Errors that can happen while reading the schema version or upgrading
#[derive(Debug, Error)]
pub enum Error {
    /// The database driver failed (connectivity, malformed statement,
    /// constraint violation, ...)
    #[error("database error")]
    Database(#[source] BoxError),

    /// An upgrade step needs engine-specific SQL and the dialect is not one
    /// it knows
    #[error("unknown dialect: {0}")]
    UnknownDialect(String),

    /// The stored schema version cannot be a step count
    #[error("invalid schema version stored in database: {0}")]
    InvalidVersion(i64),
}

/// Shorter `Result`, used for ergonomics
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(Box::new(err))
    }
}

#[cfg(feature = "postgres")]
impl From<postgres::Error> for Error {
    fn from(err: postgres::Error) -> Self {
        Self::Database(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use rusqlite::Connection;
    use std::error::Error as _;

    #[test]
    fn database_error_names_the_driver_message_once() -> anyhow::Result<()> {
        let conn = Connection::open_in_memory()?;
        let err = Error::from(
            conn.execute_batch("SELEC 1")
                .expect_err("malformed statement should fail"),
        );

        assert_eq!(err.to_string(), "database error");
        let driver = err.source().map(ToString::to_string).unwrap_or_default();
        assert!(driver.contains("syntax error"), "{}", driver);

        let chain = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(chain.matches(driver.as_str()).count(), 1, "{}", chain);

        Ok(())
    }
}
