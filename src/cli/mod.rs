//! Command-line front end.

pub mod commands;
pub mod output;

pub use commands::run;
