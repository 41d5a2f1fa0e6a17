//! Small string utilities shared across the suite.

pub mod locale;
pub mod path;
