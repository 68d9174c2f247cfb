//! Persisted cart lines.
//!
//! A [`CartLine`] is the stored form of one cart entry. [`CartLines`] is the
//! ordered collection kept under the `cart` storage key, addressed by
//! [`BookId`] so that a quantity change never disturbs the other lines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{BookId, CartLineId};

/// One persisted row of the cart.
///
/// Serialized with camelCase field names:
/// `{"id":"b1-1700000000000","bookId":"b1","quantity":2,"addedAt":"2023-11-14T22:13:20Z"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: CartLineId,
    pub book_id: BookId,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// A fresh line with quantity 1, stamped with `at`.
    #[must_use]
    pub fn new(book_id: BookId, at: DateTime<Utc>) -> Self {
        Self {
            id: CartLineId::generate(&book_id, at),
            book_id,
            quantity: 1,
            added_at: at,
        }
    }
}

/// Ordered cart lines with at most one line per book.
///
/// Deserializing a stored array that repeats a book folds the repeats into
/// the first occurrence, summing quantities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct CartLines {
    lines: Vec<CartLine>,
}

impl CartLines {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartLine> {
        self.lines.iter()
    }

    /// Look up the line for a book.
    #[must_use]
    pub fn get(&self, book_id: &BookId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.book_id == book_id)
    }

    #[must_use]
    pub fn contains(&self, book_id: &BookId) -> bool {
        self.get(book_id).is_some()
    }

    fn get_mut(&mut self, book_id: &BookId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.book_id == book_id)
    }

    /// Add one unit of a book.
    ///
    /// An existing line is bumped in place and keeps its id and `added_at`;
    /// otherwise a new line stamped with `at` is appended. Returns the
    /// resulting quantity.
    pub fn increment(&mut self, book_id: &BookId, at: DateTime<Utc>) -> u32 {
        if let Some(line) = self.get_mut(book_id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }
        self.lines.push(CartLine::new(book_id.clone(), at));
        1
    }

    /// Set the quantity of an existing line. Returns `false` when the book
    /// has no line or `quantity` is zero.
    pub fn set_quantity(&mut self, book_id: &BookId, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        match self.get_mut(book_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove the line for a book, returning it if present.
    pub fn remove(&mut self, book_id: &BookId) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| &line.book_id == book_id)?;
        Some(self.lines.remove(index))
    }

    /// Keep only the lines matching the predicate.
    pub fn retain(&mut self, f: impl FnMut(&CartLine) -> bool) {
        self.lines.retain(f);
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }
}

impl From<Vec<CartLine>> for CartLines {
    fn from(raw: Vec<CartLine>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<CartLines> for Vec<CartLine> {
    fn from(lines: CartLines) -> Self {
        lines.lines
    }
}

impl FromIterator<CartLine> for CartLines {
    fn from_iter<I: IntoIterator<Item = CartLine>>(iter: I) -> Self {
        let mut cart = Self::new();
        for line in iter {
            match cart.get_mut(&line.book_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }
}

impl IntoIterator for CartLines {
    type Item = CartLine;
    type IntoIter = std::vec::IntoIter<CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'a> IntoIterator for &'a CartLines {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    #[test]
    fn test_line_serializes_camel_case() {
        let line = CartLine::new(BookId::new("b1"), at(1_700_000_000_000));
        let json = serde_json::to_value(&line).unwrap();

        assert_eq!(json["id"], "b1-1700000000000");
        assert_eq!(json["bookId"], "b1");
        assert_eq!(json["quantity"], 1);
        assert!(json["addedAt"].as_str().unwrap().starts_with("2023-11-14T22:13:20"));
    }

    #[test]
    fn test_parses_browser_iso_timestamps() {
        let raw = r#"[{"id":"b1-1","bookId":"b1","quantity":3,"addedAt":"2024-05-01T10:00:00.000Z"}]"#;
        let lines: CartLines = serde_json::from_str(raw).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines.get(&BookId::new("b1")).unwrap().quantity, 3);
    }

    #[test]
    fn test_increment_keeps_metadata() {
        let mut lines = CartLines::new();
        assert_eq!(lines.increment(&BookId::new("b1"), at(1_000)), 1);
        assert_eq!(lines.increment(&BookId::new("b1"), at(2_000)), 2);

        let line = lines.get(&BookId::new("b1")).unwrap();
        assert_eq!(line.id.as_str(), "b1-1000");
        assert_eq!(line.added_at, at(1_000));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_set_quantity_rejects_zero_and_unknown() {
        let mut lines = CartLines::new();
        lines.increment(&BookId::new("b1"), at(1_000));

        assert!(!lines.set_quantity(&BookId::new("b1"), 0));
        assert!(!lines.set_quantity(&BookId::new("nope"), 4));
        assert!(lines.set_quantity(&BookId::new("b1"), 4));
        assert_eq!(lines.total_quantity(), 4);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut lines = CartLines::new();
        for (i, id) in ["a", "b", "c"].into_iter().enumerate() {
            lines.increment(&BookId::new(id), at(i64::try_from(i).unwrap()));
        }

        assert!(lines.remove(&BookId::new("b")).is_some());
        assert!(lines.remove(&BookId::new("b")).is_none());
        let order: Vec<&str> = lines.iter().map(|l| l.book_id.as_str()).collect();
        assert_eq!(order, ["a", "c"]);
    }

    #[test]
    fn test_duplicate_books_fold_on_deserialize() {
        let raw = r#"[
            {"id":"b1-1","bookId":"b1","quantity":1,"addedAt":"2024-05-01T10:00:00Z"},
            {"id":"b2-2","bookId":"b2","quantity":1,"addedAt":"2024-05-01T10:00:01Z"},
            {"id":"b1-3","bookId":"b1","quantity":2,"addedAt":"2024-05-01T10:00:02Z"}
        ]"#;
        let lines: CartLines = serde_json::from_str(raw).unwrap();

        assert_eq!(lines.len(), 2);
        let b1 = lines.get(&BookId::new("b1")).unwrap();
        assert_eq!(b1.quantity, 3);
        assert_eq!(b1.id.as_str(), "b1-1");
    }
}
