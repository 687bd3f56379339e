//! The persisted schema version: how many [`Upgrade`](crate::Upgrade)s have
//! been applied to a store

use crate::{Error, Result, Store, Txn};

/// Name of the table holding the single version row
pub const VERSION_TABLE: &str = "crypto_version";

/// Return the current version of the store's schema.
///
/// The version table is created first if it is missing, so a brand new store
/// is at version `0` and has the table afterwards
pub fn get_version<S: Store>(store: &mut S) -> Result<u32> {
    store.execute(&format!(
        "CREATE TABLE IF NOT EXISTS {} (version INTEGER)",
        VERSION_TABLE
    ))?;

    let version = store
        .query_int(&format!("SELECT version FROM {} LIMIT 1", VERSION_TABLE))?
        .unwrap_or(0);

    u32::try_from(version).map_err(|_| Error::InvalidVersion(version))
}

/// Set the schema version inside a running transaction.
///
/// The row is replaced rather than updated, so there does not need to be a
/// previous one. This must run in the same transaction as the step it
/// certifies
pub fn set_version(txn: &mut dyn Txn, version: u32) -> Result<()> {
    txn.execute(&format!("DELETE FROM {}", VERSION_TABLE))?;
    txn.execute(&format!(
        "INSERT INTO {} (version) VALUES ({})",
        VERSION_TABLE, version
    ))
}
