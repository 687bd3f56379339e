//! The database handle an upgrade runs against, and the transactions it
//! hands to each [`Upgrade`](crate::Upgrade)

mod sqlite;

#[cfg(feature = "postgres")]
mod postgres;

use crate::Result;

// =========================== Transaction ============================
// ====================================================================

/// An open transaction. Everything executed through it is committed or
/// discarded as one unit.
///
/// Dropping a `Txn` without calling [`commit`](Txn::commit) must roll it
/// back
pub trait Txn {
    /// Execute one SQL statement that returns no rows
    fn execute(&mut self, sql: &str) -> Result<()>;

    /// Commit every statement executed so far
    fn commit(self) -> Result<()>
    where
        Self: Sized;

    /// Discard every statement executed so far
    fn rollback(self) -> Result<()>
    where
        Self: Sized;
}

// ============================== Store ===============================
// ====================================================================

/// A connection to the database holding the crypto store
pub trait Store {
    /// The transaction type returned by [`begin`](Store::begin)
    type Transaction<'s>: Txn
    where
        Self: 's;

    /// Execute one SQL statement outside of any transaction
    fn execute(&mut self, sql: &str) -> Result<()>;

    /// Run a query and return the first column of its first row. `None` is
    /// returned when there are no rows or the value is `NULL`
    fn query_int(&mut self, sql: &str) -> Result<Option<i64>>;

    /// Begin a new transaction
    fn begin(&mut self) -> Result<Self::Transaction<'_>>;
}
