//! Item drafts: the selection a customer is building before adding it.
//!
//! Quantity is adjusted on the draft, never on a committed line item.

use crate::cart::NewItem;
use crate::types::{Customization, Price, Quantity, SpiceLevel};

/// A menu item being configured for the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    name: String,
    unit_price: Price,
    quantity: Quantity,
    spice_level: SpiceLevel,
    notes: String,
}

impl ItemDraft {
    /// Start a draft at quantity 1 with default customization.
    #[must_use]
    pub fn new(name: impl Into<String>, unit_price: Price) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity: Quantity::ONE,
            spice_level: SpiceLevel::default(),
            notes: String::new(),
        }
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

    #[must_use]
    pub const fn spice_level(&self) -> SpiceLevel {
        self.spice_level
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Add one unit.
    pub const fn increase(&mut self) {
        self.quantity = self.quantity.increased();
    }

    /// Remove one unit, stopping at one.
    pub const fn decrease(&mut self) {
        self.quantity = self.quantity.decreased();
    }

    pub const fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }

    pub const fn set_spice_level(&mut self, spice_level: SpiceLevel) {
        self.spice_level = spice_level;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Price of the draft at its current quantity.
    #[must_use]
    pub fn preview_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }

    /// Take the selection for the cart and reset the quantity to 1.
    ///
    /// Spice level and notes stay as they are, matching the form fields the
    /// customer filled in.
    pub fn commit(&mut self) -> NewItem {
        let quantity = std::mem::replace(&mut self.quantity, Quantity::ONE);
        NewItem {
            name: self.name.clone(),
            unit_price: self.unit_price,
            quantity,
            customization: Customization::new(self.spice_level, self.notes.clone()),
        }
    }
}
