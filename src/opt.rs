//! Options used by the main executable

use clap::{crate_description, crate_version, AppSettings, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

pub(crate) const APP_NAME: &str = "crypto-upgrade";

#[derive(Parser, Debug)]
#[clap(
    name = APP_NAME,
    version = crate_version!(),
    about = crate_description!(),
    global_setting = AppSettings::DeriveDisplayOrder,
    max_term_width = 100
)]
pub(crate) struct Opts {
    /// Path to the SQLite crypto store
    #[clap(
        long, short,
        global = true,
        value_hint = ValueHint::FilePath,
        env = "CRYPTO_UPGRADE_DATABASE",
        hide_env_values = true,
        long_help = "\
        Path to the SQLite crypto store to inspect or upgrade. Overrides the `database` key \
        of the configuration file."
    )]
    pub(crate) database: Option<PathBuf>,
    /// Use a different configuration file
    #[clap(
        long, short,
        global = true,
        value_hint = ValueHint::FilePath,
        long_help = "\
        Read options from this YAML file instead of the one in the default configuration \
        directory"
    )]
    pub(crate) config:   Option<PathBuf>,
    #[clap(long, short, global = true, parse(from_occurrences))]
    /// Display debugging messages on 4 levels (i.e., -vv..)
    pub(crate) verbose:  u8,
    #[clap(subcommand)]
    pub(crate) cmd:      Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    /// Print the stored schema version and the latest known version
    #[clap(alias = "v")]
    Version,
    /// Apply every pending upgrade to the store
    #[clap(alias = "up")]
    Upgrade,
}

#[cfg(test)]
mod tests {
    use super::{Command, Opts};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn definition_is_consistent() {
        Opts::command().debug_assert();
    }

    #[test]
    fn global_options_follow_the_subcommand() -> anyhow::Result<()> {
        let opts =
            Opts::try_parse_from(["crypto-upgrade", "up", "-vv", "--database", "crypto.db"])?;

        assert_eq!(opts.cmd, Command::Upgrade);
        assert_eq!(opts.verbose, 2);
        assert_eq!(opts.database, Some(PathBuf::from("crypto.db")));

        Ok(())
    }

    #[test]
    fn long_help_describes_the_database() {
        let mut help = Vec::new();
        Opts::command()
            .write_long_help(&mut help)
            .expect("help should render");
        let help = String::from_utf8_lossy(&help);

        assert!(help.contains("Overrides"), "{}", help);
    }
}
