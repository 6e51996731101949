//! refinery version information.
//!
//! ## Notes
//!
//! - The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time.
//! - The CLI reports it through `--version`.

/// The refinery version string (for example, `0.1.0-alpha.1`).
pub const REFINERY_VERSION: &str = env!("CARGO_PKG_VERSION");
