//! The ordered list of schema [`Upgrade`]s and the runner that applies them

mod schema;


use crate::{get_version, set_version, Result, Store, Txn};
use colored::Colorize;
use std::fmt;

/// The signature of an upgrade step: the open transaction it must run in and
/// the dialect identifier given to [`upgrade`]
pub type UpgradeFn = fn(&mut dyn Txn, &str) -> Result<()>;

// ============================= Upgrade ==============================
// ====================================================================

/// One atomic schema change, identified by its position in [`UPGRADES`]
#[derive(Copy, Clone)]
pub struct Upgrade {
    /// What the step changes
    description: &'static str,
    /// The step itself
    run:         UpgradeFn,
}

impl Upgrade {
    /// Return what the step changes
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Run the step inside `txn`. The schema version is not touched
    pub fn apply(&self, txn: &mut dyn Txn, dialect: &str) -> Result<()> {
        (self.run)(txn, dialect)
    }
}

impl fmt::Debug for Upgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upgrade")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Every upgrade step, in the order they are applied. Step `i` takes a store
/// from version `i` to version `i + 1`.
///
/// Steps are append-only: once released, a step is never edited
pub static UPGRADES: [Upgrade; 2] = [
    Upgrade {
        description: "create the initial crypto store tables",
        run:         schema::create_tables,
    },
    Upgrade {
        description: "scope accounts and sessions by account id",
        run:         schema::add_account_id,
    },
];

/// The version a store is at once every step has been applied
#[must_use]
pub fn latest_version() -> u32 {
    UPGRADES.len() as u32
}

// ============================== Runner ==============================
// ====================================================================

/// Bring the store's schema up to [`latest_version`].
///
/// Each pending step runs in its own transaction together with the write of
/// its new version. On the first failure that transaction is rolled back and
/// the error is returned; steps committed before it stay committed, so calling
/// this again resumes where it stopped.
///
/// `dialect` is only checked by the steps that emit engine-specific SQL.
///
/// There is no locking between processes: two runners racing on the same
/// store may both try to apply the same step
pub fn upgrade<S: Store>(store: &mut S, dialect: &str) -> Result<()> {
    let current = get_version(store)?;
    let latest = latest_version();

    if current > latest {
        log::warn!(
            "schema version {} is newer than the latest known version {}; not upgrading",
            current,
            latest
        );
        return Ok(());
    }

    if current == latest {
        log::debug!("schema is up to date (v:{})", current);
        return Ok(());
    }

    for (idx, step) in UPGRADES.iter().enumerate().skip(current as usize) {
        let version = idx as u32 + 1;
        log::info!(
            "upgrading schema v:{} => v:{}: {}",
            idx,
            version.to_string().green().bold(),
            step.description()
        );

        let mut txn = store.begin()?;

        if let Err(e) = apply_versioned(&mut txn, step, dialect, version) {
            log::error!("upgrade to v:{} failed: {}", version, e);

            if let Err(rollback) = txn.rollback() {
                log::error!("failed to roll back upgrade to v:{}: {}", version, rollback);
            }

            return Err(e);
        }

        txn.commit()?;
    }

    Ok(())
}

/// Run `step` and record `version` in the same transaction
fn apply_versioned(txn: &mut dyn Txn, step: &Upgrade, dialect: &str, version: u32) -> Result<()> {
    step.apply(txn, dialect)?;
    set_version(txn, version)
}
