//! `amana catalog`.

use std::fmt::Write;

use amana_storefront::catalog::Catalog;

/// Render the catalog as one line per book.
#[must_use]
pub fn list(catalog: &Catalog) -> String {
    let mut out = String::new();
    for book in catalog.books() {
        let stock = if book.in_stock { "" } else { "  (out of stock)" };
        let featured = if book.featured { " *" } else { "" };
        let _ = writeln!(
            out,
            "{:>3}  {:<45} {:<24} {:>8}{featured}{stock}",
            book.id.as_str(),
            book.title,
            book.author,
            book.price.display(),
        );
    }
    let _ = write!(out, "{} books (* featured)", catalog.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_mentions_every_book() {
        let catalog = Catalog::builtin();
        let out = list(&catalog);

        for book in catalog.books() {
            assert!(out.contains(&book.title));
        }
        assert!(out.ends_with(&format!("{} books (* featured)", catalog.len())));
        assert!(out.contains("(out of stock)"));
    }
}
