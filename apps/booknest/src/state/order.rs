//! # Order State
//!
//! The pending order (cart) shown on the order screen.
//!
//! ## Order Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order State Operations                               │
//! │                                                                         │
//! │  Screen Action            Method                  Line Change           │
//! │  ─────────────            ──────                  ───────────           │
//! │                                                                         │
//! │  "Order" on a book ─────► add_product() ────────► qty += 1 or push     │
//! │                                                                         │
//! │  Change Quantity ───────► set_quantity() ───────► qty = n (0 removes)  │
//! │                                                                         │
//! │  Click Remove ──────────► remove() ─────────────► lines.remove(i)      │
//! │                                                                         │
//! │  Place Order ───────────► place_order() ────────► receipt, lines.clear │
//! │                                                                         │
//! │  NOTE: Prices are frozen on the line when it is created.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Placing an order only produces a receipt; there is no payment step.

use std::sync::Mutex;

use booknest_core::catalog::DEFAULT_COVER;
use booknest_core::validation::{validate_price_cents, validate_quantity};
use booknest_core::{CoreError, Money, OrderLine, Product};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::lock;
use crate::error::AppResult;

/// Unit price of the book the order screen was opened from.
const VIEWED_BOOK_PRICE_CENTS: i64 = 125_000;

/// Lines every new order starts with, after the viewed book.
const DEFAULT_LINES: &[(&str, u32, i64)] = &[
    ("The Great Gatsby", 1, 135_000),
    ("1984", 2, 98_000),
    ("To Kill a Mockingbird", 1, 112_000),
];

/// Summary of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub lines: Vec<OrderLine>,
    pub total_items: u32,
    pub total_cents: i64,
    pub placed_at: DateTime<Utc>,
}

impl OrderReceipt {
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// State holder for the order screen.
#[derive(Debug)]
pub struct OrderState {
    lines: Mutex<Vec<OrderLine>>,
    currency_symbol: String,
}

impl OrderState {
    /// Opens the order screen for the book with this title.
    pub fn new(title: &str, currency_symbol: impl Into<String>) -> Self {
        let mut lines = vec![OrderLine::new(
            title,
            1,
            VIEWED_BOOK_PRICE_CENTS,
            DEFAULT_COVER,
        )];
        lines.extend(
            DEFAULT_LINES
                .iter()
                .map(|(title, qty, price)| OrderLine::new(*title, *qty, *price, DEFAULT_COVER)),
        );

        OrderState {
            lines: Mutex::new(lines),
            currency_symbol: currency_symbol.into(),
        }
    }

    /// An order with no lines.
    pub fn empty(currency_symbol: impl Into<String>) -> Self {
        OrderState {
            lines: Mutex::new(Vec::new()),
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Adds one copy of a catalog book, merging with an existing line of
    /// the same title.
    pub fn add_product(&self, product: &Product) -> AppResult<()> {
        validate_price_cents(product.price_cents)?;
        let mut lines = lock(&self.lines);

        if let Some(line) = lines.iter_mut().find(|l| l.title == product.title) {
            let new_qty = line.quantity.saturating_add(1);
            validate_quantity(new_qty)?;
            line.quantity = new_qty;
            return Ok(());
        }

        lines.push(OrderLine::from_product(product));
        Ok(())
    }

    /// Sets the quantity of a line. Zero removes the line.
    pub fn set_quantity(&self, title: &str, quantity: u32) -> AppResult<()> {
        if quantity == 0 {
            return self.remove(title);
        }
        validate_quantity(quantity)?;

        let mut lines = lock(&self.lines);
        match lines.iter_mut().find(|l| l.title == title) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::BookNotFound(title.to_string()).into()),
        }
    }

    /// Removes a line by title.
    pub fn remove(&self, title: &str) -> AppResult<()> {
        let mut lines = lock(&self.lines);
        let initial_len = lines.len();
        lines.retain(|l| l.title != title);

        if lines.len() == initial_len {
            Err(CoreError::BookNotFound(title.to_string()).into())
        } else {
            Ok(())
        }
    }

    pub fn lines(&self) -> Vec<OrderLine> {
        lock(&self.lines).clone()
    }

    /// Sum of unit price × quantity over all lines.
    ///
    /// Fails with a business-rule error when the sum overflows.
    pub fn total(&self) -> AppResult<Money> {
        order_total(&lock(&self.lines))
    }

    /// Number of copies across all lines.
    pub fn total_items(&self) -> u32 {
        lock(&self.lines).iter().map(|l| l.quantity).sum()
    }

    /// Label for the place-order button, e.g. `Place Order (Ksh 4,870.00)`.
    pub fn place_order_label(&self) -> AppResult<String> {
        Ok(format!(
            "Place Order ({})",
            self.total()?.format_with_symbol(&self.currency_symbol)
        ))
    }

    /// Places the order and empties it.
    ///
    /// ## Returns
    /// * `Ok(OrderReceipt)` - what was ordered
    /// * `Err(AppError)` - the order has no lines, or its total overflows
    ///   (the lines are kept)
    pub fn place_order(&self) -> AppResult<OrderReceipt> {
        let mut guard = lock(&self.lines);
        if guard.is_empty() {
            return Err(CoreError::EmptyOrder.into());
        }
        let total = order_total(&guard)?;

        let lines = std::mem::take(&mut *guard);
        drop(guard);
        let receipt = OrderReceipt {
            total_items: lines.iter().map(|l| l.quantity).sum(),
            total_cents: total.cents(),
            lines,
            placed_at: Utc::now(),
        };

        info!(
            items = receipt.total_items,
            total_cents = receipt.total_cents,
            "Order placed"
        );
        Ok(receipt)
    }
}

fn order_total(lines: &[OrderLine]) -> AppResult<Money> {
    lines
        .iter()
        .try_fold(Money::zero(), |sum, line| {
            line.line_total().and_then(|t| sum.checked_add(t))
        })
        .ok_or_else(|| CoreError::TotalOverflow.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use booknest_core::{NewProduct, MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

    fn order() -> OrderState {
        OrderState::new("Dune", "Ksh")
    }

    #[test]
    fn test_initial_order_totals() {
        let order = order();
        assert_eq!(order.lines()[0].title, "Dune");
        assert_eq!(order.total_items(), 5);
        // 1250 + 1350 + 2 × 980 + 1120
        assert_eq!(order.total().unwrap().cents(), 568_000);
        assert_eq!(order.place_order_label().unwrap(), "Place Order (Ksh 5,680.00)");
    }

    #[test]
    fn test_set_quantity_and_remove() {
        let order = order();

        order.set_quantity("1984", 3).unwrap();
        assert_eq!(order.total().unwrap().cents(), 666_000);

        order.set_quantity("1984", 0).unwrap();
        assert_eq!(order.lines().len(), 3);

        let err = order.remove("1984").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = order.set_quantity("Dune", MAX_ITEM_QUANTITY + 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_add_product_merges_by_title() {
        let order = order();
        let dune = NewProduct::new("Dune", "", 145_000, "book").with_id(11);
        let sula = NewProduct::new("Sula", "", 99_000, "book").with_id(20);

        order.add_product(&dune).unwrap();
        order.add_product(&sula).unwrap();

        let lines = order.lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].quantity, 2);
        // Existing line keeps the price it was created with.
        assert_eq!(lines[0].unit_price_cents, 125_000);
        assert_eq!(lines[4].unit_price_cents, 99_000);
    }

    #[test]
    fn test_place_order_clears_lines() {
        let order = order();
        let expected_total = order.total().unwrap();

        let receipt = order.place_order().unwrap();
        assert_eq!(receipt.total(), expected_total);
        assert_eq!(receipt.total_items, 5);
        assert_eq!(receipt.lines.len(), 4);

        assert!(order.lines().is_empty());
        assert!(order.total().unwrap().is_zero());
    }

    #[test]
    fn test_empty_order_is_rejected() {
        let order = OrderState::empty("Ksh");
        let err = order.place_order().unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[test]
    fn test_add_product_stops_at_max_quantity() {
        let order = OrderState::empty("Ksh");
        let dune = NewProduct::new("Dune", "", 145_000, "book").with_id(11);

        for _ in 0..MAX_ITEM_QUANTITY {
            order.add_product(&dune).unwrap();
        }
        let err = order.add_product(&dune).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(order.total_items(), MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_out_of_range_price_is_not_ordered() {
        let order = order();
        let priceless = NewProduct::new("Priceless", "", i64::MAX - 1, "book").with_id(30);

        let err = order.add_product(&priceless).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(order.lines().len(), 4);
        assert_eq!(order.total().unwrap().cents(), 568_000);
    }

    #[test]
    fn test_largest_prices_still_total() {
        let order = OrderState::empty("Ksh");
        let dear = NewProduct::new("Dear", "", MAX_PRICE_CENTS, "book").with_id(31);

        order.add_product(&dear).unwrap();
        order.set_quantity("Dear", MAX_ITEM_QUANTITY).unwrap();
        assert_eq!(
            order.total().unwrap().cents(),
            MAX_PRICE_CENTS * MAX_ITEM_QUANTITY as i64
        );
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let order = order();
        lock(&order.lines).push(OrderLine::new("Huge", 1, i64::MAX - 1, DEFAULT_COVER));

        let err = order.total().unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert!(order.place_order_label().is_err());

        let err = order.place_order().unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert_eq!(order.lines().len(), 5);
    }
}
