//! The bodies of every [`Upgrade`](super::Upgrade) step.
//!
//! Released steps are never edited; a schema change is a new function
//! appended to [`UPGRADES`](super::UPGRADES)

use crate::{Dialect, Result, Txn};

// ================== Initialization ==================

/// The tables every crypto store starts with
const BASELINE_TABLES: [&str; 7] = [
    "CREATE TABLE IF NOT EXISTS crypto_account (
        device_id  VARCHAR(255) PRIMARY KEY,
        shared     BOOLEAN      NOT NULL,
        sync_token TEXT         NOT NULL,
        account    bytea        NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS crypto_message_index (
        sender_key CHAR(43),
        session_id CHAR(43),
        \"index\"    INTEGER,
        event_id   VARCHAR(255) NOT NULL,
        timestamp  BIGINT       NOT NULL,
        PRIMARY KEY (sender_key, session_id, \"index\")
    )",
    "CREATE TABLE IF NOT EXISTS crypto_tracked_user (
        user_id VARCHAR(255) PRIMARY KEY
    )",
    "CREATE TABLE IF NOT EXISTS crypto_device (
        user_id      VARCHAR(255),
        device_id    VARCHAR(255),
        identity_key CHAR(43)      NOT NULL,
        signing_key  CHAR(43)      NOT NULL,
        trust        SMALLINT      NOT NULL,
        deleted      BOOLEAN       NOT NULL,
        name         VARCHAR(255)  NOT NULL,
        PRIMARY KEY (user_id, device_id)
    )",
    "CREATE TABLE IF NOT EXISTS crypto_olm_session (
        session_id   CHAR(43)  PRIMARY KEY,
        sender_key   CHAR(43)  NOT NULL,
        session      bytea     NOT NULL,
        created_at   timestamp NOT NULL,
        last_used    timestamp NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS crypto_megolm_inbound_session (
        session_id   CHAR(43)     PRIMARY KEY,
        sender_key   CHAR(43)     NOT NULL,
        signing_key  CHAR(43)     NOT NULL,
        room_id      VARCHAR(255) NOT NULL,
        session      bytea        NOT NULL,
        forwarding_chains bytea   NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS crypto_megolm_outbound_session (
        room_id       VARCHAR(255) PRIMARY KEY,
        session_id    CHAR(43)     NOT NULL UNIQUE,
        session       bytea        NOT NULL,
        shared        BOOLEAN      NOT NULL,
        max_messages  INTEGER      NOT NULL,
        message_count INTEGER      NOT NULL,
        max_age       BIGINT       NOT NULL,
        created_at    timestamp    NOT NULL,
        last_used     timestamp    NOT NULL
    )",
];

/// Step 0: create the initial table set.
///
/// Every statement is guarded with `IF NOT EXISTS`, so this is safe to run
/// against a store that already has some or all of the tables
pub(super) fn create_tables(txn: &mut dyn Txn, _dialect: &str) -> Result<()> {
    for sql in BASELINE_TABLES {
        txn.execute(sql)?;
    }

    Ok(())
}

// ================== Account scoping ==================

/// A table that gains an `account_id` column in step 1
struct AccountScoped {
    /// Name of the table
    table:   &'static str,
    /// Primary key columns before `account_id` is appended
    key:     &'static [&'static str],
    /// Full column list of the rebuilt table, `account_id` first
    rebuilt: &'static str,
}

/// Tables scoped by account, in the order they are upgraded
const ACCOUNT_SCOPED: [AccountScoped; 4] = [
    AccountScoped {
        table:   "crypto_account",
        key:     &["device_id"],
        rebuilt: "
            account_id VARCHAR(255) NOT NULL,
            device_id  VARCHAR(255) NOT NULL,
            shared     BOOLEAN      NOT NULL,
            sync_token TEXT         NOT NULL,
            account    bytea        NOT NULL,
            PRIMARY KEY (account_id, device_id)
        ",
    },
    AccountScoped {
        table:   "crypto_olm_session",
        key:     &["session_id"],
        rebuilt: "
            account_id   VARCHAR(255) NOT NULL,
            session_id   CHAR(43)     NOT NULL,
            sender_key   CHAR(43)     NOT NULL,
            session      bytea        NOT NULL,
            created_at   timestamp    NOT NULL,
            last_used    timestamp    NOT NULL,
            PRIMARY KEY (account_id, session_id)
        ",
    },
    AccountScoped {
        table:   "crypto_megolm_inbound_session",
        key:     &["session_id"],
        rebuilt: "
            account_id   VARCHAR(255) NOT NULL,
            session_id   CHAR(43)     NOT NULL,
            sender_key   CHAR(43)     NOT NULL,
            signing_key  CHAR(43)     NOT NULL,
            room_id      VARCHAR(255) NOT NULL,
            session      bytea        NOT NULL,
            forwarding_chains bytea   NOT NULL,
            PRIMARY KEY (account_id, session_id)
        ",
    },
    AccountScoped {
        table:   "crypto_megolm_outbound_session",
        key:     &["room_id"],
        rebuilt: "
            account_id    VARCHAR(255) NOT NULL,
            room_id       VARCHAR(255) NOT NULL,
            session_id    CHAR(43)     NOT NULL UNIQUE,
            session       bytea        NOT NULL,
            shared        BOOLEAN      NOT NULL,
            max_messages  INTEGER      NOT NULL,
            message_count INTEGER      NOT NULL,
            max_age       BIGINT       NOT NULL,
            created_at    timestamp    NOT NULL,
            last_used     timestamp    NOT NULL,
            PRIMARY KEY (account_id, room_id)
        ",
    },
];

impl AccountScoped {
    /// Alter the table in place: add the column, backfill it, then swap the
    /// primary key for one that includes it
    fn alter(&self, txn: &mut dyn Txn) -> Result<()> {
        let table = self.table;
        let key = self
            .key
            .iter()
            .chain(["account_id"].iter())
            .copied()
            .collect::<Vec<_>>()
            .join(", ");

        for sql in [
            format!("ALTER TABLE {} ADD COLUMN account_id VARCHAR(255)", table),
            format!("UPDATE {} SET account_id=''", table),
            format!("ALTER TABLE {} ALTER COLUMN account_id SET NOT NULL", table),
            format!("ALTER TABLE {} DROP CONSTRAINT {}_pkey", table, table),
            format!(
                "ALTER TABLE {} ADD CONSTRAINT {}_pkey PRIMARY KEY ({})",
                table, table, key
            ),
        ] {
            txn.execute(&sql)?;
        }

        Ok(())
    }

    /// Recreate the table with the new column and key, then move the old rows
    /// across with an empty `account_id`
    fn rebuild(&self, txn: &mut dyn Txn) -> Result<()> {
        let table = self.table;

        for sql in [
            format!("ALTER TABLE {} RENAME TO old_{}", table, table),
            format!("CREATE TABLE {} ({})", table, self.rebuilt),
            format!("INSERT INTO {} SELECT '', * FROM old_{}", table, table),
            format!("DROP TABLE old_{}", table),
        ] {
            txn.execute(&sql)?;
        }

        Ok(())
    }
}

/// Step 1: add `account_id` to the account and session tables and make it
/// part of their primary keys. Existing rows get an empty `account_id`.
///
/// This is not guarded against running twice; the schema version is what
/// keeps it from being reapplied
pub(super) fn add_account_id(txn: &mut dyn Txn, dialect: &str) -> Result<()> {
    let dialect = dialect.parse::<Dialect>()?;

    for scoped in &ACCOUNT_SCOPED {
        log::debug!("adding `account_id` to `{}`", scoped.table);

        match dialect {
            Dialect::Postgres => scoped.alter(txn)?,
            Dialect::Sqlite => scoped.rebuild(txn)?,
        }
    }

    Ok(())
}
