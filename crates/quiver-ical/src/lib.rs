//! iCalendar model, parsing, xCal emission, geo URIs, and the
//! structural diff engine for computing update deltas between two
//! calendar object trees.

pub mod build;
pub mod core;
pub mod diff;
pub mod error;
pub mod geo;
pub mod parse;
pub mod xcal;

pub use error::{IcalError, IcalResult};
