#![deny(missing_docs)]
//! Shared logging utilities for the CareerMatch workspace.
//!
//! Every crate logs through the `cm_*` macros so the `log` facade stays the
//! only logging dependency below the binary. Secrets are passed through
//! [`redacted`] before they reach a record.

/// Describes a secret value without revealing it.
///
/// Tokens and passwords must never reach a log sink; call sites log the
/// output of this function instead.
pub fn redacted(secret: &str) -> String {
    if secret.is_empty() {
        "<empty>".to_string()
    } else {
        format!("<redacted {} chars>", secret.chars().count())
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! cm_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! cm_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! cm_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! cm_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! cm_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Level used by the client: `Debug` when verbose output was requested.
pub fn level_for(verbose: bool) -> log::LevelFilter {
    if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Routes records to the terminal while tests run. Later calls are no-ops.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let _ = TermLogger::init(
        level_for(cfg!(debug_assertions)),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacted_hides_content_but_keeps_length() {
        assert_eq!(redacted("abc.def"), "<redacted 7 chars>");
        assert_eq!(redacted("pässword"), "<redacted 8 chars>");
        assert_eq!(redacted(""), "<empty>");
    }

    #[test]
    fn verbose_lowers_the_threshold() {
        assert_eq!(level_for(true), log::LevelFilter::Debug);
        assert_eq!(level_for(false), log::LevelFilter::Info);
    }
}
