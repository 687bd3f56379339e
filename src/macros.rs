//! Macros that are shared between the library and the executable

/// Expand to an error message
#[macro_export]
macro_rules! upgrade_error {
    ($($err:tt)*) => ({
        use colored::Colorize;
        eprintln!("{}: {}", "[crypto-upgrade error]".red().bold(), format!($($err)*));
    })
}

/// Expand to an info message
#[macro_export]
macro_rules! upgrade_info {
    ($($err:tt)*) => ({
        use colored::Colorize;
        eprintln!("{}: {}", "[crypto-upgrade info]".green().bold(), format!($($err)*));
    })
}

/// Expand to a warning message
#[macro_export]
macro_rules! upgrade_warning {
    ($($err:tt)*) => ({
        use colored::Colorize;
        eprintln!("{}: {}", "[crypto-upgrade warning]".yellow().bold(), format!($($err)*));
    })
}

/// Log a statement right before it is sent to the database. `$who` names the
/// handle running it (`Store` or `Txn`)
#[macro_export]
macro_rules! log_sql {
    ($who:literal, $sql:expr) => ({
        use colored::Colorize;
        log::debug!("{}({}): {}", "execute".green().bold(), $who.purple(), $sql);
    })
}

/// A couple characters shorter to write an error message ("failed ...ing ...")
#[macro_export]
macro_rules! fail {
    ($($arg:tt)*) => ({
        format!("failed {}", format!($($arg)*))
    })
}

/// A couple characters shorter to write an error message ("failed to ...")
#[macro_export]
macro_rules! failt {
    ($($arg:tt)*) => ({
        format!("failed to {}", format!($($arg)*))
    })
}
