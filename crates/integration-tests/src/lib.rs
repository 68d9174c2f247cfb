//! Integration tests for Amana Bookstore.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p amana-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_components` - Several cart components sharing one storage backend
//! - `storefront_http` - The storefront served on a loopback port, driven
//!   over HTTP with a cookie-keeping client
//!
//! Helpers live here so each test file stays focused on behavior.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::Arc;

use amana_storefront::cart::{CartNotifier, CartPage, CartStorage, HomeCart, Navbar};
use amana_storefront::catalog::Catalog;
use amana_storefront::config::StorefrontConfig;
use amana_storefront::routes;
use amana_storefront::state::AppState;
use amana_storefront::storage::KeyValueStorage;

/// One "browser tab": a catalog, storage adapter and notifier that every
/// component mounted through it shares.
#[derive(Clone)]
pub struct Tab {
    pub catalog: Arc<Catalog>,
    pub storage: CartStorage,
    pub notifier: CartNotifier,
}

impl Tab {
    /// Open a tab over `backend` with the built-in catalog.
    #[must_use]
    pub fn open(backend: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            catalog: Arc::new(Catalog::builtin()),
            storage: CartStorage::new(backend),
            notifier: CartNotifier::new(),
        }
    }

    #[must_use]
    pub fn home(&self) -> HomeCart {
        HomeCart::new(
            Arc::clone(&self.catalog),
            self.storage.clone(),
            self.notifier.clone(),
        )
    }

    #[must_use]
    pub fn cart_page(&self) -> CartPage {
        CartPage::mounted(
            Arc::clone(&self.catalog),
            self.storage.clone(),
            self.notifier.clone(),
        )
    }

    #[must_use]
    pub fn navbar(&self) -> Navbar {
        Navbar::mount(&self.storage, &self.notifier)
    }
}

/// A storefront served on a loopback port for the lifetime of the test.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Bind an ephemeral port and serve the full storefront app on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound or the client built.
    pub async fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let state = AppState::new(StorefrontConfig::default(), Catalog::builtin());
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, routes::app(state)).await {
                report_server_error(&e);
            }
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self { addr, client })
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

#[allow(clippy::print_stderr)]
fn report_server_error(e: &std::io::Error) {
    eprintln!("test server stopped: {e}");
}
