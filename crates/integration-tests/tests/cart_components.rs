//! Integration tests for cart components sharing one storage backend.
//!
//! Each test opens one or more [`Tab`]s over the same backend, the way
//! several pages of one browser share local storage.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use amana_core::BookId;
use amana_integration_tests::Tab;
use amana_storefront::cart::{CART_STORAGE_KEY, CartOutcome, IgnoreReason};
use amana_storefront::storage::{FileStorage, KeyValueStorage, MemoryStorage};

fn book(id: &str) -> BookId {
    BookId::new(id)
}

#[test]
fn test_navbar_follows_home_and_cart_page() {
    let tab = Tab::open(Arc::new(MemoryStorage::new()));
    let navbar = tab.navbar();
    assert_eq!(navbar.count(), 0);

    let home = tab.home();
    assert!(home.add_to_cart(&book("1")).unwrap().is_applied());
    assert!(home.add_to_cart(&book("1")).unwrap().is_applied());
    assert!(home.add_to_cart(&book("2")).unwrap().is_applied());
    assert_eq!(navbar.count(), 3);

    let mut page = tab.cart_page();
    assert_eq!(page.item_count(), 2);
    assert_eq!(page.update_quantity(&book("2"), 5).unwrap(), CartOutcome::Applied);
    assert_eq!(navbar.count(), 7);

    assert_eq!(page.clear_cart().unwrap(), CartOutcome::Applied);
    assert_eq!(navbar.count(), 0);
}

#[test]
fn test_repeated_adds_sum_to_quantity() {
    let tab = Tab::open(Arc::new(MemoryStorage::new()));
    let home = tab.home();

    for n in 1..=25_u32 {
        home.add_to_cart(&book("7")).unwrap();
        let lines = tab.storage.load();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.get(&book("7")).unwrap().quantity, n);
    }
}

#[test]
fn test_stale_page_overwrites_newer_add() {
    let backend: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
    let tab = Tab::open(Arc::clone(&backend));

    tab.home().add_to_cart(&book("1")).unwrap();
    let mut stale_page = tab.cart_page();

    // Another component adds a book after the page mounted.
    tab.home().add_to_cart(&book("2")).unwrap();
    assert_eq!(tab.storage.load().len(), 2);

    // The page saves its own projection; the later add is lost.
    stale_page.update_quantity(&book("1"), 3).unwrap();
    let lines = tab.storage.load();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines.get(&book("1")).unwrap().quantity, 3);
    assert!(!lines.contains(&book("2")));
}

#[test]
fn test_corrupt_value_reads_as_empty_until_next_save() {
    let backend = Arc::new(MemoryStorage::new());
    backend.set_item(CART_STORAGE_KEY, "not json").unwrap();
    let tab = Tab::open(backend.clone());

    let page = tab.cart_page();
    assert!(page.is_empty());
    assert_eq!(tab.navbar().count(), 0);
    assert_eq!(
        backend.get_item(CART_STORAGE_KEY).unwrap().as_deref(),
        Some("not json")
    );

    tab.home().add_to_cart(&book("3")).unwrap();
    let raw = backend.get_item(CART_STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["bookId"], "3");
    assert_eq!(value[0]["quantity"], 1);
}

#[test]
fn test_ignored_mutations_leave_storage_untouched() {
    let backend = Arc::new(MemoryStorage::new());
    let tab = Tab::open(backend.clone());
    let navbar = tab.navbar();

    assert_eq!(
        tab.home().add_to_cart(&book("404")).unwrap(),
        CartOutcome::Ignored(IgnoreReason::UnknownBook)
    );
    assert!(backend.is_empty());

    tab.home().add_to_cart(&book("1")).unwrap();
    let before = backend.get_item(CART_STORAGE_KEY).unwrap();

    let mut page = tab.cart_page();
    assert_eq!(
        page.update_quantity(&book("1"), -2).unwrap(),
        CartOutcome::Ignored(IgnoreReason::QuantityBelowMinimum)
    );
    assert_eq!(
        page.remove_item(&book("2")).unwrap(),
        CartOutcome::Ignored(IgnoreReason::NotInCart)
    );
    assert_eq!(backend.get_item(CART_STORAGE_KEY).unwrap(), before);
    assert_eq!(navbar.count(), 1);
}

#[test]
fn test_file_backed_cart_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let tab = Tab::open(Arc::new(FileStorage::new(&path)));
        tab.home().add_to_cart(&book("5")).unwrap();
        tab.home().add_to_cart(&book("8")).unwrap();
        tab.cart_page().update_quantity(&book("8"), 2).unwrap();
    }

    let tab = Tab::open(Arc::new(FileStorage::new(&path)));
    let page = tab.cart_page();
    let rows: Vec<_> = page.rows().map(|r| (r.book.id.to_string(), r.quantity)).collect();
    assert_eq!(rows, vec![("5".to_string(), 1), ("8".to_string(), 2)]);
    assert_eq!(page.total_price().display(), "$121.99");
}

#[test]
fn test_unmounted_navbar_stops_listening() {
    let tab = Tab::open(Arc::new(MemoryStorage::new()));
    let navbar = tab.navbar();
    assert_eq!(tab.notifier.listener_count(), 1);

    navbar.unmount();
    assert_eq!(tab.notifier.listener_count(), 0);
    tab.home().add_to_cart(&book("1")).unwrap();
}
