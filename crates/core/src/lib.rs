//! Amana Core - Shared types library.
//!
//! This crate provides common types used across all Amana components:
//! - `storefront` - Public-facing bookstore site
//! - `cli` - Command-line cart and catalog tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Book records, cart lines, type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
