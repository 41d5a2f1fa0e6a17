//! Shared foundations for the quiver utility crates.
//!
//! Holds the error and configuration types plus the small string/path
//! helpers used throughout the CalDAV/CardDAV utility suite.

pub mod config;
pub mod error;
pub mod logging;
pub mod util;

pub use config::Settings;
pub use error::{CoreError, CoreResult};
