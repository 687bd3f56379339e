//! SQL variants an [`Upgrade`](crate::Upgrade) knows how to speak

use crate::Error;
use std::{fmt, str::FromStr};

/// The engine a store runs on. Steps whose DDL differs between engines match
/// on this exhaustively; steps that don't care never parse it
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// PostgreSQL: constraints can be altered in place
    Postgres,
    /// SQLite: constraint changes need the table rebuilt and its rows copied
    Sqlite,
}

impl Dialect {
    /// The identifier callers pass to [`upgrade`](crate::upgrade)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite3",
        }
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "postgres" => Ok(Self::Postgres),
            "sqlite3" => Ok(Self::Sqlite),
            other => Err(Error::UnknownDialect(other.to_owned())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Dialect;
    use crate::Error;

    #[test]
    fn parses_known_identifiers() {
        assert_eq!("postgres".parse::<Dialect>().ok(), Some(Dialect::Postgres));
        assert_eq!("sqlite3".parse::<Dialect>().ok(), Some(Dialect::Sqlite));
    }

    #[test]
    fn round_trips_through_display() {
        for dialect in [Dialect::Postgres, Dialect::Sqlite] {
            assert_eq!(dialect.to_string().parse::<Dialect>().ok(), Some(dialect));
        }
    }

    #[test]
    fn rejects_near_misses() {
        for name in ["sqlite", "Postgres", "mysql", ""] {
            match name.parse::<Dialect>() {
                Err(Error::UnknownDialect(got)) => assert_eq!(got, name),
                other => panic!("expected unknown dialect for {:?}, got {:?}", name, other),
            }
        }
    }
}
