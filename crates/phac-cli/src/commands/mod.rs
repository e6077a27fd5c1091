//! CLI command implementations.

pub mod common;
pub mod comodulogram;
pub mod generate;
pub mod pac;
