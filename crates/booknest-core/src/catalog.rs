//! # Starter Catalog
//!
//! The books a fresh install shows on the home grid. Seeded into an empty
//! `products` table by the composition root and by the `seed` binary.

use crate::types::NewProduct;

/// Image handle shared by the bundled cover placeholder.
pub const DEFAULT_COVER: &str = "book";

/// (title, description, price in cents)
const STARTER_BOOKS: &[(&str, &str, i64)] = &[
    (
        "Atomic Habits",
        "Atomic Habits is a guide on how small changes in habits can lead to remarkable results.",
        125_000,
    ),
    (
        "1984",
        "1984 is a dystopian novel about totalitarian surveillance and mind control.",
        98_000,
    ),
    (
        "The Alchemist",
        "A shepherd embarks on a journey to find a treasure and discover the meaning of his dreams.",
        110_000,
    ),
    (
        "Sapiens",
        "Sapiens chronicles the history of humankind from ancient times to the present.",
        160_000,
    ),
    (
        "The Great Gatsby",
        "The Great Gatsby explores themes of wealth, love, and the American Dream in the 1920s.",
        135_000,
    ),
    (
        "The Hobbit",
        "A hobbit embarks on a quest to reclaim a stolen treasure from a dragon.",
        115_000,
    ),
    (
        "Educated",
        "A memoir about growing up in a strict and abusive household and seeking education.",
        140_000,
    ),
    (
        "Becoming",
        "Michelle Obama's memoir about her life and experiences as the First Lady of the United States.",
        150_000,
    ),
    (
        "Harry Potter",
        "A young boy discovers he is a wizard and attends Hogwarts to defeat dark forces.",
        130_000,
    ),
    (
        "The Book Thief",
        "The story of a young girl in Nazi Germany who finds solace in books during World War II.",
        120_000,
    ),
    (
        "Dune",
        "A young nobleman navigates a universe filled with political intrigue and environmental challenges.",
        145_000,
    ),
    (
        "It Ends With Us",
        "A love story that deals with difficult themes of abuse and strength.",
        112_000,
    ),
];

/// Returns the starter catalog in display order.
pub fn starter_catalog() -> Vec<NewProduct> {
    STARTER_BOOKS
        .iter()
        .map(|(title, description, price_cents)| {
            NewProduct::new(*title, *description, *price_cents, DEFAULT_COVER)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_new_product;
    use std::collections::HashSet;

    #[test]
    fn test_starter_catalog_is_valid() {
        let books = starter_catalog();
        assert_eq!(books.len(), 12);
        for book in &books {
            assert!(validate_new_product(book).is_ok(), "{}", book.title);
        }
    }

    #[test]
    fn test_starter_titles_are_unique() {
        let books = starter_catalog();
        let titles: HashSet<_> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles.len(), books.len());
    }
}
