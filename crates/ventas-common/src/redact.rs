//! Redaction of personal values in log output.
//!
//! Customer names are only written to logs when the operator opts in
//! (`--log-data`). The switch is process-wide and set once by the CLI when
//! logging is initialised.

use std::sync::atomic::{AtomicBool, Ordering};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when row-level logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Enables or disables logging of personal values.
pub fn set_log_data(enable: bool) {
    LOG_DATA_ENABLED.store(enable, Ordering::Release);
}

/// Returns true if row-level logging is explicitly enabled.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the input value when personal-data logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}
