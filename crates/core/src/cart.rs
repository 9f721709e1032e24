//! The cart store: an ordered list of committed line items.
//!
//! The store is the single source of truth for the cart. Insertion order is
//! display order, and every total shown to the customer is derived from the
//! current list on demand. Nothing is cached, so there is nothing to
//! invalidate.

use serde::Serialize;
use thiserror::Error;

use crate::types::{Customization, LineItemId, Price, Quantity};

/// Cart operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// A positional operation referenced a line that does not exist.
    #[error("no line item at position {index} (cart has {len})")]
    OutOfRange { index: usize, len: usize },
}

/// A product selection ready to be committed to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub unit_price: Price,
    pub quantity: Quantity,
    pub customization: Customization,
}

impl NewItem {
    /// A single unit with default customization.
    #[must_use]
    pub fn simple(name: impl Into<String>, unit_price: Price) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity: Quantity::ONE,
            customization: Customization::default(),
        }
    }
}

/// A committed line in the cart.
///
/// Line items are immutable. The subtotal is computed once when the item is
/// added and kept as a snapshot, so later catalog price changes never alter
/// a line that is already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    id: LineItemId,
    name: String,
    unit_price: Price,
    quantity: Quantity,
    subtotal: Price,
    customization: Customization,
}

impl LineItem {
    fn commit(id: LineItemId, item: NewItem) -> Self {
        Self {
            id,
            subtotal: item.unit_price.times(item.quantity),
            name: item.name,
            unit_price: item.unit_price,
            quantity: item.quantity,
            customization: item.customization,
        }
    }

    #[must_use]
    pub const fn id(&self) -> LineItemId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Unit price times quantity, as frozen when the item was added.
    #[must_use]
    pub const fn subtotal(&self) -> Price {
        self.subtotal
    }

    #[must_use]
    pub const fn customization(&self) -> &Customization {
        &self.customization
    }
}

/// Ordered collection of line items for one shopping session.
///
/// Each store numbers its own line items with a strictly increasing
/// sequence, so two items added in quick succession never share an ID.
#[derive(Debug, Clone)]
pub struct CartStore {
    items: Vec<LineItem>,
    next_id: LineItemId,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: LineItemId::new(1),
        }
    }

    /// Append an item to the end of the cart.
    ///
    /// Adding the same product twice yields two separate lines.
    pub fn add(&mut self, item: NewItem) -> LineItemId {
        let id = self.next_id;
        self.next_id = id.next();
        self.items.push(LineItem::commit(id, item));
        id
    }

    /// Remove the line at `index`.
    ///
    /// An out-of-range index leaves the cart unchanged and returns `None`.
    pub fn remove_at(&mut self, index: usize) -> Option<LineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Remove the line at `index`, reporting an out-of-range index.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutOfRange` if there is no line at `index`. The
    /// cart is unchanged in that case.
    pub fn try_remove_at(&mut self, index: usize) -> Result<LineItem, CartError> {
        let len = self.items.len();
        self.remove_at(index)
            .ok_or(CartError::OutOfRange { index, len })
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The line items, in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// Number of lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .fold(0, u64::saturating_add)
    }

    /// Sum of subtotals over all lines.
    #[must_use]
    pub fn grand_total(&self) -> Price {
        self.items.iter().map(LineItem::subtotal).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::types::SpiceLevel;

    fn item(name: &str, price: u64, quantity: u32) -> NewItem {
        NewItem {
            name: name.to_string(),
            unit_price: Price::new(price),
            quantity: Quantity::new(quantity).unwrap(),
            customization: Customization::default(),
        }
    }

    #[test]
    fn test_add_snapshots_subtotal() {
        let mut cart = CartStore::new();
        let id = cart.add(NewItem {
            customization: Customization::new(SpiceLevel::Hot, "no onions"),
            ..item("Samosa", 50, 3)
        });

        let line = &cart.items()[0];
        assert_eq!(line.id(), id);
        assert_eq!(line.subtotal(), Price::new(150));
        assert_eq!(line.customization().spice_level(), SpiceLevel::Hot);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.grand_total(), Price::new(150));
        assert_eq!(cart.total_item_count(), 3);
    }

    #[test]
    fn test_duplicates_stay_distinct() {
        let mut cart = CartStore::new();
        let first = cart.add(item("Samosa", 50, 1));
        let second = cart.add(item("Samosa", 50, 1));

        assert_eq!(cart.len(), 2);
        assert_ne!(first, second);
        assert!(first < second);
    }

    #[test]
    fn test_totals_across_items() {
        let mut cart = CartStore::new();
        cart.add(item("Chapati", 50, 1));
        cart.add(item("Pilau", 100, 2));

        assert_eq!(cart.grand_total(), Price::new(250));
        assert_eq!(cart.total_item_count(), 3);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut cart = CartStore::new();
        cart.add(item("Samosa", 50, 2));

        assert!(cart.remove_at(1).is_none());
        assert!(cart.remove_at(usize::MAX).is_none());
        assert_eq!(cart.len(), 1);
        assert_eq!(
            cart.try_remove_at(5),
            Err(CartError::OutOfRange { index: 5, len: 1 })
        );
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut cart = CartStore::new();
        cart.add(item("A", 10, 1));
        cart.add(item("B", 20, 1));
        cart.add(item("C", 30, 1));

        let removed = cart.remove_at(1).unwrap();
        assert_eq!(removed.name(), "B");
        let names: Vec<_> = cart.items().iter().map(LineItem::name).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn test_ids_keep_increasing_after_clear() {
        let mut cart = CartStore::new();
        let before = cart.add(item("A", 10, 1));
        cart.clear();
        let after = cart.add(item("A", 10, 1));
        assert!(after > before);
    }

    #[test]
    fn test_clear_zeroes_totals() {
        let mut cart = CartStore::new();
        cart.add(item("A", 10, 4));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.grand_total(), Price::ZERO);
    }

    fn arb_item() -> impl Strategy<Value = (u64, u32)> {
        (0u64..10_000, 1u32..50)
    }

    proptest! {
        #[test]
        fn test_totals_match_added_items(items in proptest::collection::vec(arb_item(), 0..30)) {
            let mut cart = CartStore::new();
            for (price, qty) in &items {
                cart.add(item("Item", *price, *qty));
            }

            let expected_count: u64 = items.iter().map(|(_, q)| u64::from(*q)).sum();
            let expected_total: u64 = items.iter().map(|(p, q)| p * u64::from(*q)).sum();

            prop_assert_eq!(cart.total_item_count(), expected_count);
            prop_assert_eq!(cart.grand_total(), Price::new(expected_total));
            // Derivations are pure.
            prop_assert_eq!(cart.total_item_count(), expected_count);
            prop_assert_eq!(cart.grand_total(), Price::new(expected_total));
        }

        #[test]
        fn test_remove_at_adjusts_totals(
            items in proptest::collection::vec(arb_item(), 1..20),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut cart = CartStore::new();
            for (price, qty) in &items {
                cart.add(item("Item", *price, *qty));
            }
            let index = pick.index(items.len());
            let count_before = cart.total_item_count();
            let total_before = cart.grand_total().amount();

            let removed = cart.remove_at(index).unwrap();

            prop_assert_eq!(cart.len(), items.len() - 1);
            prop_assert_eq!(
                cart.total_item_count(),
                count_before - u64::from(removed.quantity().get())
            );
            prop_assert_eq!(
                cart.grand_total().amount(),
                total_before - removed.subtotal().amount()
            );
        }

        #[test]
        fn test_remove_out_of_range_never_changes_cart(
            items in proptest::collection::vec(arb_item(), 0..10),
            extra in 0usize..100,
        ) {
            let mut cart = CartStore::new();
            for (price, qty) in &items {
                cart.add(item("Item", *price, *qty));
            }
            let snapshot = cart.items().to_vec();

            prop_assert!(cart.remove_at(items.len() + extra).is_none());
            prop_assert_eq!(cart.items(), snapshot.as_slice());
        }
    }
}
