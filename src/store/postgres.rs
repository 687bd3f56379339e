//! [`Store`] for a synchronous [`postgres`] client

use super::{Store, Txn};
use crate::{log_sql, Result};
use postgres::{Client, Transaction};

impl Store for Client {
    type Transaction<'s> = Transaction<'s>;

    fn execute(&mut self, sql: &str) -> Result<()> {
        log_sql!("Store", sql);
        self.batch_execute(sql)?;

        Ok(())
    }

    fn query_int(&mut self, sql: &str) -> Result<Option<i64>> {
        log_sql!("Store", sql);
        let value = match self.query_opt(sql, &[])? {
            Some(row) => row.try_get::<_, Option<i32>>(0)?,
            None => None,
        };

        Ok(value.map(i64::from))
    }

    fn begin(&mut self) -> Result<Transaction<'_>> {
        Ok(self.transaction()?)
    }
}

impl Txn for Transaction<'_> {
    fn execute(&mut self, sql: &str) -> Result<()> {
        log_sql!("Txn", sql);
        self.batch_execute(sql)?;

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

#[cfg(test)]
mod tests {
    use crate::{get_version, latest_version, upgrade, Store, Txn};
    use ::postgres::{Client, NoTls, Transaction};
    use anyhow::Result;
    use std::env;

    /// Connection string of a scratch server; the live test is skipped
    /// without it
    const SERVER_ENV: &str = "CRYPTO_UPGRADE_TEST_POSTGRES";

    fn assert_store<S: Store>() {}
    fn assert_txn<T: Txn>() {}

    #[test]
    fn client_is_a_store() {
        assert_store::<Client>();
        assert_txn::<Transaction<'static>>();
    }

    #[test]
    fn upgrades_a_live_server() -> Result<()> {
        let url = match env::var(SERVER_ENV) {
            Ok(url) => url,
            Err(_) => return Ok(()),
        };

        let schema = format!("crypto_upgrade_test_{}", std::process::id());
        let mut client = Client::connect(&url, NoTls)?;
        client.batch_execute(&format!(
            "DROP SCHEMA IF EXISTS {0} CASCADE; CREATE SCHEMA {0}; SET search_path TO {0}",
            schema
        ))?;

        let res = (|| -> Result<()> {
            assert_eq!(get_version(&mut client)?, 0);
            upgrade(&mut client, "postgres")?;
            assert_eq!(get_version(&mut client)?, latest_version());

            let key: i64 = client
                .query_one(
                    "SELECT COUNT(*) FROM information_schema.key_column_usage
                    WHERE table_schema = $1 AND table_name = 'crypto_account'
                        AND constraint_name = 'crypto_account_pkey'",
                    &[&schema],
                )?
                .get(0);
            assert_eq!(key, 2);

            // Already at the latest version
            upgrade(&mut client, "postgres")?;
            Ok(())
        })();

        client.batch_execute(&format!("DROP SCHEMA {} CASCADE", schema))?;
        res
    }
}
