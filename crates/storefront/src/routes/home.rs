//! Home page route handler.

use amana_core::Book;
use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::Navbar;
use crate::error::Result;
use crate::filters;
use crate::models::VisitorStorage;
use crate::state::AppState;

/// Book card display data for templates.
#[derive(Clone)]
pub struct BookCardView {
    pub id: String,
    pub title: String,
    pub author: String,
    pub price: String,
    pub image: String,
    pub genre: String,
    pub rating: String,
    pub reviews: u32,
    pub in_stock: bool,
    pub featured: bool,
}

impl From<&Book> for BookCardView {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.clone(),
            author: book.author.clone(),
            price: book.price.display(),
            image: book.image.clone(),
            genre: book.genre.join(", "),
            rating: format!("{:.1}", book.rating),
            reviews: book.reviews,
            in_stock: book.in_stock,
            featured: book.featured,
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Spotlight books shown above the grid.
    pub featured: Vec<BookCardView>,
    /// Every book in the catalog.
    pub books: Vec<BookCardView>,
    /// Navbar cart badge.
    pub cart_count: u32,
}

/// Display the home page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<HomeTemplate> {
    let visitor = VisitorStorage::hydrate(&session).await?;
    let navbar = Navbar::mount(&visitor.cart_storage(), visitor.notifier());

    let catalog = state.catalog();
    Ok(HomeTemplate {
        featured: catalog.featured().map(BookCardView::from).collect(),
        books: catalog.books().iter().map(BookCardView::from).collect(),
        cart_count: navbar.count(),
    })
}
