//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every handler runs the cart components against the visitor's session
//! storage. When a handler's work emits `cartUpdated`, the response carries
//! `HX-Trigger: cartUpdated` so the navbar badge re-fetches `/cart/count`.
//! Plain form posts (no `HX-Request` header) are answered with a redirect.

use amana_core::BookId;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::{CART_UPDATED_EVENT, CartOutcome, CartPage, HomeCart, Navbar};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::models::VisitorStorage;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub image: String,
    pub quantity: u32,
    /// Quantity posted by the decrease control.
    pub decrease_to: i64,
    /// Quantity posted by the increase control.
    pub increase_to: i64,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
///
/// Built from a mounted [`CartPage`]: handlers read storage synchronously,
/// so a response never shows the page's loading state.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    /// Distinct books in the cart.
    pub item_count: usize,
}

impl From<&CartPage> for CartView {
    fn from(page: &CartPage) -> Self {
        Self {
            items: page
                .rows()
                .map(|row| CartItemView {
                    book_id: row.book.id.to_string(),
                    title: row.book.title.clone(),
                    author: row.book.author.clone(),
                    image: row.book.image.clone(),
                    quantity: row.quantity,
                    decrease_to: i64::from(row.quantity) - 1,
                    increase_to: i64::from(row.quantity) + 1,
                    price: row.book.price.display(),
                    line_price: row.line_total().display(),
                })
                .collect(),
            total: page.total_price().display(),
            item_count: page.item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub book_id: String,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub book_id: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub book_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u32,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub cart_count: u32,
}

// =============================================================================
// Response Helpers
// =============================================================================

/// Whether the request came from HTMX.
fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

/// Attach `HX-Trigger: cartUpdated` when the cart changed.
fn with_cart_trigger(updated: bool, body: impl IntoResponse) -> Response {
    if updated {
        (AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]), body).into_response()
    } else {
        body.into_response()
    }
}

/// Log an ignored mutation.
fn log_outcome(action: &str, book_id: &BookId, outcome: CartOutcome) {
    match outcome {
        CartOutcome::Applied => {
            add_breadcrumb("cart", action, Some(&[("book_id", book_id.as_str())]));
        }
        CartOutcome::Ignored(reason) => {
            tracing::debug!(%book_id, ?reason, "Ignored cart {action}");
        }
    }
}

/// Finish a cart-page mutation: render the items fragment or redirect.
async fn finish_page_mutation(
    visitor: VisitorStorage,
    session: &Session,
    headers: &HeaderMap,
    cart: CartView,
) -> Result<Response> {
    let updated = visitor.persist(session).await?;
    if !is_htmx(headers) {
        return Ok(Redirect::to("/cart").into_response());
    }
    Ok(with_cart_trigger(updated, CartItemsTemplate { cart }))
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CartShowTemplate> {
    let visitor = VisitorStorage::hydrate(&session).await?;
    let storage = visitor.cart_storage();
    let navbar = Navbar::mount(&storage, visitor.notifier());
    let page = CartPage::mounted(state.catalog(), storage, visitor.notifier().clone());

    Ok(CartShowTemplate {
        cart: CartView::from(&page),
        cart_count: navbar.count(),
    })
}

/// Add item to cart (HTMX).
///
/// Returns the updated cart count badge.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let visitor = VisitorStorage::hydrate(&session).await?;
    let storage = visitor.cart_storage();
    let navbar = Navbar::mount(&storage, visitor.notifier());

    let book_id = BookId::new(form.book_id);
    let outcome = HomeCart::new(state.catalog(), storage, visitor.notifier().clone())
        .add_to_cart(&book_id)?;
    log_outcome("add", &book_id, outcome);

    let cart_count = navbar.count();
    navbar.unmount();

    let updated = visitor.persist(&session).await?;
    if !is_htmx(&headers) {
        return Ok(Redirect::to("/").into_response());
    }
    Ok(with_cart_trigger(updated, CartCountTemplate { cart_count }))
}

/// Update cart item quantity (HTMX).
#[instrument(skip(state, session, headers))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let visitor = VisitorStorage::hydrate(&session).await?;
    let mut page = CartPage::mounted(
        state.catalog(),
        visitor.cart_storage(),
        visitor.notifier().clone(),
    );

    let book_id = BookId::new(form.book_id);
    let outcome = page.update_quantity(&book_id, form.quantity)?;
    log_outcome("update", &book_id, outcome);

    let cart = CartView::from(&page);
    drop(page);
    finish_page_mutation(visitor, &session, &headers, cart).await
}

/// Remove item from cart (HTMX).
#[instrument(skip(state, session, headers))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let visitor = VisitorStorage::hydrate(&session).await?;
    let mut page = CartPage::mounted(
        state.catalog(),
        visitor.cart_storage(),
        visitor.notifier().clone(),
    );

    let book_id = BookId::new(form.book_id);
    let outcome = page.remove_item(&book_id)?;
    log_outcome("remove", &book_id, outcome);

    let cart = CartView::from(&page);
    drop(page);
    finish_page_mutation(visitor, &session, &headers, cart).await
}

/// Clear the cart (HTMX).
#[instrument(skip(state, session, headers))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response> {
    let visitor = VisitorStorage::hydrate(&session).await?;
    let mut page = CartPage::mounted(
        state.catalog(),
        visitor.cart_storage(),
        visitor.notifier().clone(),
    );
    let _ = page.clear_cart()?;
    add_breadcrumb("cart", "clear", None);

    let cart = CartView::from(&page);
    drop(page);
    finish_page_mutation(visitor, &session, &headers, cart).await
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let visitor = VisitorStorage::hydrate(&session).await?;
    let navbar = Navbar::mount(&visitor.cart_storage(), visitor.notifier());

    Ok(CartCountTemplate {
        cart_count: navbar.count(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_is_htmx() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));

        headers.insert("HX-Request", HeaderValue::from_static("true"));
        assert!(is_htmx(&headers));
    }

    #[test]
    fn test_cart_view_from_mounted_page() {
        use std::sync::Arc;

        use crate::cart::{CartNotifier, CartStorage};
        use crate::catalog::Catalog;
        use crate::storage::MemoryStorage;

        let storage = CartStorage::new(Arc::new(MemoryStorage::new()));
        let notifier = CartNotifier::new();
        let catalog = Arc::new(Catalog::builtin());
        HomeCart::new(Arc::clone(&catalog), storage.clone(), notifier.clone())
            .add_to_cart(&BookId::new("1"))
            .unwrap();

        let page = CartPage::mounted(catalog, storage, notifier);
        assert!(!page.is_loading());

        let html = CartItemsTemplate {
            cart: CartView::from(&page),
        }
        .render()
        .unwrap();
        assert!(html.contains("Total: $29.99"));
        assert!(!html.contains("Loading"));
    }

    #[test]
    fn test_with_cart_trigger() {
        let response = with_cart_trigger(true, "ok");
        assert_eq!(
            response.headers().get("HX-Trigger").map(HeaderValue::as_bytes),
            Some(CART_UPDATED_EVENT.as_bytes())
        );

        let response = with_cart_trigger(false, "ok");
        assert!(response.headers().get("HX-Trigger").is_none());
    }
}
