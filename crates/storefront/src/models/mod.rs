//! Session-scoped models for the storefront.

pub mod session;

pub use session::{VisitorStorage, keys as session_keys};
