//! # Wishlist State
//!
//! Books saved for later. Held in memory only; the list starts over every
//! time the screen is opened.

use std::sync::Mutex;

use booknest_core::catalog::DEFAULT_COVER;
use booknest_core::WishlistItem;

use super::lock;

/// Books every new wishlist starts with, after the one being viewed.
const DEFAULT_WISHLIST: &[(&str, &str)] = &[
    ("Atomic Habits", "James Clear"),
    ("The Alchemist", "Paulo Coelho"),
    ("Dune", "Frank Herbert"),
    ("Becoming", "Michelle Obama"),
];

/// State holder for the wishlist screen.
#[derive(Debug)]
pub struct WishlistState {
    items: Mutex<Vec<WishlistItem>>,
}

impl WishlistState {
    /// Opens the wishlist from a book's detail screen.
    ///
    /// The viewed book comes first. Its description fills the author slot,
    /// which is all the detail screen passes along.
    pub fn new(title: &str, description: &str) -> Self {
        let mut items = vec![WishlistItem::new(title, description, DEFAULT_COVER)];
        items.extend(
            DEFAULT_WISHLIST
                .iter()
                .map(|(title, author)| WishlistItem::new(*title, *author, DEFAULT_COVER)),
        );

        WishlistState {
            items: Mutex::new(items),
        }
    }

    /// Appends a book. Returns `false` if a book with that title is
    /// already listed.
    pub fn add(&self, item: WishlistItem) -> bool {
        let mut items = lock(&self.items);
        if items.iter().any(|i| i.title == item.title) {
            return false;
        }
        items.push(item);
        true
    }

    /// Removes the first book with this title. Returns `false` (and changes
    /// nothing) when no such book is listed.
    pub fn remove(&self, title: &str) -> bool {
        let mut items = lock(&self.items);
        match items.iter().position(|i| i.title == title) {
            Some(pos) => {
                items.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn items(&self) -> Vec<WishlistItem> {
        lock(&self.items).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.items).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.items).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewed_book_comes_first() {
        let wishlist = WishlistState::new("Sapiens", "A brief history of humankind");
        let items = wishlist.items();

        assert_eq!(items.len(), 5);
        assert_eq!(items[0].title, "Sapiens");
        assert_eq!(items[0].author, "A brief history of humankind");
        assert_eq!(items[1].title, "Atomic Habits");
        assert_eq!(items[4].author, "Michelle Obama");
    }

    #[test]
    fn test_add_and_remove() {
        let wishlist = WishlistState::new("Sapiens", "");

        assert!(wishlist.add(WishlistItem::new("Sula", "Toni Morrison", "book")));
        assert!(!wishlist.add(WishlistItem::new("Sula", "Someone Else", "book")));
        assert_eq!(wishlist.len(), 6);

        assert!(wishlist.remove("Dune"));
        assert!(!wishlist.remove("Dune"));
        assert_eq!(wishlist.len(), 5);
        assert!(wishlist.items().iter().all(|i| i.title != "Dune"));
    }

    #[test]
    fn test_remove_absent_leaves_list_alone() {
        let wishlist = WishlistState::new("Sapiens", "");
        let before = wishlist.items();

        assert!(!wishlist.remove("Not Listed"));
        assert_eq!(wishlist.items(), before);
    }
}
