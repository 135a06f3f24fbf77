//! Message display macros with debug-aware routing.
//!
//! Every macro takes a [`Message`](crate::libs::messages::Message) (or any
//! `Display` value) and decides where it goes:
//!
//! ```text
//! msg_info!(..) ──▶ is_debug_mode()? ──yes──▶ tracing::info!
//!                                    └─no───▶ println!
//! ```
//!
//! Debug mode is on only when `JIRA_TIMELOGS_DEBUG` is set to a non-empty
//! value. `RUST_LOG` alone never reroutes user-facing output; it only tunes
//! the filter of the `tracing-subscriber` that `main` installs in debug mode.
//!
//! | Macro               | Prefix | Normal mode | Debug mode        |
//! |---------------------|--------|-------------|-------------------|
//! | `msg_print!`        |        | stdout      | `tracing::info!`  |
//! | `msg_info!`         | ℹ️     | stdout      | `tracing::info!`  |
//! | `msg_success!`      | ✅     | stdout      | `tracing::info!`  |
//! | `msg_error!`        | ❌     | stderr      | `tracing::error!` |
//! | `msg_debug!`        | 🔍     | (nothing)   | `tracing::debug!` |
//!
//! `msg_error_anyhow!` and `msg_bail_anyhow!` build `anyhow` errors from a
//! message instead of printing it.
//!
//! ```rust
//! use jira_timelogs::libs::messages::Message;
//! use jira_timelogs::{msg_info, msg_success};
//!
//! msg_info!(Message::FetchingTimeLogs("2024-03".to_string()));
//! msg_success!(Message::TimeLogsSaved("jira_time_logs_2024_03.csv".to_string()), true);
//! ```

use std::sync::OnceLock;

/// Environment variable that switches the application into debug mode.
pub const DEBUG_ENV_VAR: &str = "JIRA_TIMELOGS_DEBUG";

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Returns `true` when debug output was requested. Checked once per process.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| debug_mode_from(|key| std::env::var(key).ok()))
}

/// Debug-mode decision over an arbitrary variable lookup.
pub fn debug_mode_from<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(DEBUG_ENV_VAR).is_some_and(|value| !value.trim().is_empty())
}

/// Shared routing for the display macros. Not part of the public surface.
#[doc(hidden)]
#[macro_export]
macro_rules! __msg_route {
    ($trace:ident, $print:ident, $prefix:expr, $msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::$trace!("{}{}", $prefix, $msg);
        } else {
            $print!("{}{}", $prefix, $msg);
        }
    };
    ($trace:ident, $print:ident, $prefix:expr, $msg:expr, padded) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::$trace!("\n{}{}\n", $prefix, $msg);
        } else {
            $print!("\n{}{}\n", $prefix, $msg);
        }
    };
}

/// Prints a message without a prefix. Pass `true` to surround it with blank lines.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        $crate::__msg_route!(info, println, "", $msg)
    };
    ($msg:expr, true) => {
        $crate::__msg_route!(info, println, "", $msg, padded)
    };
}

/// Prints a success notice with the ✅ prefix.
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        $crate::__msg_route!(info, println, "✅ ", $msg)
    };
    ($msg:expr, true) => {
        $crate::__msg_route!(info, println, "✅ ", $msg, padded)
    };
}

/// Prints an error with the ❌ prefix. Goes to stderr outside debug mode.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        $crate::__msg_route!(error, eprintln, "❌ ", $msg)
    };
    ($msg:expr, true) => {
        $crate::__msg_route!(error, eprintln, "❌ ", $msg, padded)
    };
}

/// Prints an informational notice with the ℹ️ prefix.
///
/// Used for progress lines such as "Fetching time logs from Jira...".
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        $crate::__msg_route!(info, println, "ℹ️ ", $msg)
    };
    ($msg:expr, true) => {
        $crate::__msg_route!(info, println, "ℹ️ ", $msg, padded)
    };
}

/// Emits a 🔍 debug line, only in debug mode. Silent otherwise.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Builds an `anyhow::Error` from a message.
///
/// ```rust
/// use anyhow::Result;
/// use jira_timelogs::{libs::messages::Message, msg_error_anyhow};
///
/// fn require_jira(configured: bool) -> Result<()> {
///     if !configured {
///         return Err(msg_error_anyhow!(Message::JiraNotConfigured));
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("{}", $msg)
    };
}

/// Returns early with an `anyhow::Error` built from a message.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("{}", $msg)
    };
}
