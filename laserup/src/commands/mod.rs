//! Subcommand handlers.

pub mod clean;
pub mod common;
pub mod doctor;
pub mod run;
pub mod setup;
