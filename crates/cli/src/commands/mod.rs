//! CLI subcommand implementations.
//!
//! Commands return the text to print so they can be tested without a
//! terminal.

pub mod cart;
pub mod catalog;
