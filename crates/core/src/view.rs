//! View model for the cart summary.
//!
//! Rendering layers consume these records instead of the store itself, so
//! the cart never builds markup or terminal output.

use serde::Serialize;

use crate::cart::{CartStore, LineItem};
use crate::types::{InstructionPanel, PaymentMethod, Price};

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    /// Zero-based index, as accepted by `remove_at`.
    pub index: usize,
    /// One-based position shown to the customer.
    pub position: usize,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub subtotal: String,
    pub spice: Option<String>,
    pub notes: Option<String>,
}

impl CartItemView {
    fn from_line(index: usize, line: &LineItem) -> Self {
        let custom = line.customization();
        Self {
            index,
            position: index + 1,
            name: line.name().to_string(),
            quantity: line.quantity().get(),
            unit_price: line.unit_price().to_string(),
            subtotal: line.subtotal().to_string(),
            spice: custom.non_default_spice().map(|s| s.to_string()),
            notes: custom.non_empty_notes().map(str::to_string),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Formatted grand total (e.g. `KSh 250`).
    pub total: String,
    /// Badge count: total units, not lines.
    pub item_count: u64,
    /// Bare amount shown inside the MPesa instruction panel.
    pub mpesa_amount: u64,
    /// Instruction panel visible for the payment method selected at render time.
    pub panels: PaymentPanels,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: Price::ZERO.to_string(),
            item_count: 0,
            mpesa_amount: 0,
            panels: PaymentPanels::for_method(PaymentMethod::default()),
        }
    }

    /// Project `cart` with the panels for the selected payment `method`.
    #[must_use]
    pub fn new(cart: &CartStore, method: PaymentMethod) -> Self {
        let total = cart.grand_total();
        Self {
            items: cart
                .items()
                .iter()
                .enumerate()
                .map(|(index, line)| CartItemView::from_line(index, line))
                .collect(),
            total: total.to_string(),
            item_count: cart.total_item_count(),
            mpesa_amount: total.amount(),
            panels: PaymentPanels::for_method(method),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Project `cart` with the default payment method selected.
impl From<&CartStore> for CartView {
    fn from(cart: &CartStore) -> Self {
        Self::new(cart, PaymentMethod::default())
    }
}

/// Which payment instruction panels are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentPanels {
    pub mpesa: bool,
    pub bank: bool,
}

impl PaymentPanels {
    /// Hide every panel, then show the one for `method`.
    #[must_use]
    pub const fn for_method(method: PaymentMethod) -> Self {
        match method.instruction_panel() {
            Some(InstructionPanel::Mpesa) => Self {
                mpesa: true,
                bank: false,
            },
            Some(InstructionPanel::Bank) => Self {
                mpesa: false,
                bank: true,
            },
            None => Self {
                mpesa: false,
                bank: false,
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::cart::NewItem;
    use crate::types::{Customization, Quantity, SpiceLevel};

    #[test]
    fn test_empty_view() {
        let view = CartView::from(&CartStore::new());
        assert_eq!(view, CartView::empty());
        assert!(view.is_empty());
        assert_eq!(view.total, "KSh 0");
    }

    #[test]
    fn test_view_projects_lines() {
        let mut cart = CartStore::new();
        cart.add(NewItem {
            name: "Samosa".to_string(),
            unit_price: Price::new(50),
            quantity: Quantity::new(3).unwrap(),
            customization: Customization::new(SpiceLevel::Hot, "no onions"),
        });
        cart.add(NewItem::simple("Chapati", Price::new(30)));

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 4);
        assert_eq!(view.total, "KSh 180");
        assert_eq!(view.mpesa_amount, 180);

        let samosa = &view.items[0];
        assert_eq!(samosa.position, 1);
        assert_eq!(samosa.unit_price, "KSh 50");
        assert_eq!(samosa.subtotal, "KSh 150");
        assert_eq!(samosa.spice.as_deref(), Some("hot"));
        assert_eq!(samosa.notes.as_deref(), Some("no onions"));

        let chapati = &view.items[1];
        assert_eq!(chapati.index, 1);
        assert_eq!(chapati.spice, None);
        assert_eq!(chapati.notes, None);
    }

    #[test]
    fn test_view_carries_selected_panel() {
        let mut cart = CartStore::new();
        cart.add(NewItem::simple("Beef Pilau", Price::new(200)));

        assert!(CartView::from(&cart).panels.mpesa);

        let bank = CartView::new(&cart, PaymentMethod::Bank);
        assert!(bank.panels.bank);
        assert!(!bank.panels.mpesa);
        assert_eq!(bank.mpesa_amount, 200);

        let cash = CartView::new(&cart, PaymentMethod::CashOnDelivery);
        assert!(!cash.panels.mpesa && !cash.panels.bank);
    }

    #[test]
    fn test_payment_panels() {
        assert_eq!(
            PaymentPanels::for_method(PaymentMethod::Mpesa),
            PaymentPanels {
                mpesa: true,
                bank: false
            }
        );
        assert_eq!(
            PaymentPanels::for_method(PaymentMethod::Bank),
            PaymentPanels {
                mpesa: false,
                bank: true
            }
        );
        assert_eq!(
            PaymentPanels::for_method(PaymentMethod::CashOnDelivery),
            PaymentPanels {
                mpesa: false,
                bank: false
            }
        );
    }
}
