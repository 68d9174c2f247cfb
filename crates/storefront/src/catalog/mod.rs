//! Read-only book catalog.
//!
//! The catalog is static data shared by every page. Nothing in the storefront
//! mutates it; cart lines reference books by [`BookId`] and are joined
//! against the catalog when a page renders.

mod data;

use amana_core::{Book, BookId};

/// The set of purchasable books.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Build a catalog from explicit records.
    #[must_use]
    pub const fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// The bookstore's built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(data::books())
    }

    /// All books in display order.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Find a book by ID.
    #[must_use]
    pub fn find(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|book| &book.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &BookId) -> bool {
        self.find(id).is_some()
    }

    /// Books flagged for the home page spotlight.
    pub fn featured(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().filter(|book| book.featured)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = Catalog::builtin();
        let ids: HashSet<&BookId> = catalog.books().iter().map(|b| &b.id).collect();
        assert_eq!(ids.len(), catalog.len());
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_builtin_prices_non_negative() {
        for book in Catalog::builtin().books() {
            assert!(!book.price.amount.is_sign_negative(), "{}", book.id);
        }
    }

    #[test]
    fn test_find() {
        let catalog = Catalog::builtin();
        let first = catalog.books().first().map(|b| b.id.clone());
        let Some(id) = first else {
            panic!("builtin catalog is empty");
        };
        assert_eq!(catalog.find(&id).map(|b| &b.id), Some(&id));
        assert!(catalog.find(&BookId::new("does-not-exist")).is_none());
    }

    #[test]
    fn test_featured_subset() {
        let catalog = Catalog::builtin();
        assert!(catalog.featured().all(|b| b.featured));
        assert!(catalog.featured().count() > 0);
    }
}
