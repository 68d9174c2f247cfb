//! Amana Bookstore storefront library.
//!
//! Holds the catalog, the browser-style cart model and the web layer that
//! serves it. The binary in `main.rs` only wires configuration, telemetry
//! and the listener around [`routes::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod storage;
