//! [`Store`] for a [`rusqlite`] connection

use super::{Store, Txn};
use crate::{log_sql, Result};
use rusqlite::{params, Connection, OptionalExtension, Transaction};

impl Store for Connection {
    type Transaction<'s> = Transaction<'s>;

    fn execute(&mut self, sql: &str) -> Result<()> {
        log_sql!("Store", sql);
        Connection::execute(self, sql, params![])?;

        Ok(())
    }

    fn query_int(&mut self, sql: &str) -> Result<Option<i64>> {
        log_sql!("Store", sql);
        let value = self
            .query_row(sql, params![], |row| row.get::<_, Option<i64>>(0))
            .optional()?;

        Ok(value.flatten())
    }

    fn begin(&mut self) -> Result<Transaction<'_>> {
        Ok(self.transaction()?)
    }
}

impl Txn for Transaction<'_> {
    fn execute(&mut self, sql: &str) -> Result<()> {
        log_sql!("Txn", sql);
        Connection::execute(self, sql, params![])?;

        Ok(())
    }

    fn commit(self) -> Result<()> {
        log::debug!("committing");
        Ok(Transaction::commit(self)?)
    }

    fn rollback(self) -> Result<()> {
        log::debug!("rolling back");
        Ok(Transaction::rollback(self)?)
    }
}
