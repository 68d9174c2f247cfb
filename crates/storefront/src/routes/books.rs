//! Book detail route handler.

use amana_core::BookId;
use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tower_sessions::Session;
use tracing::instrument;

use super::home::BookCardView;
use crate::cart::Navbar;
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::VisitorStorage;
use crate::state::AppState;

/// Book detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "books/show.html")]
pub struct BookShowTemplate {
    pub book: BookCardView,
    pub description: String,
    /// Copies of this book already in the cart.
    pub in_cart: u32,
    pub cart_count: u32,
}

/// Display a single book.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<BookShowTemplate> {
    let id = BookId::new(id);
    let catalog = state.catalog();
    let book = catalog
        .find(&id)
        .ok_or_else(|| AppError::NotFound(format!("book {id}")))?;

    let visitor = VisitorStorage::hydrate(&session).await?;
    let storage = visitor.cart_storage();
    let navbar = Navbar::mount(&storage, visitor.notifier());
    let in_cart = storage.load().get(&id).map_or(0, |line| line.quantity);

    Ok(BookShowTemplate {
        book: BookCardView::from(book),
        description: book.description.clone(),
        in_cart,
        cart_count: navbar.count(),
    })
}
