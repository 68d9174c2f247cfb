//! Core types for Amana.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod book;
pub mod cart;
pub mod id;
pub mod price;

pub use book::Book;
pub use cart::{CartLine, CartLines};
pub use id::*;
pub use price::{CurrencyCode, Price};
