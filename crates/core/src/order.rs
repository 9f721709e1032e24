//! Order document formatting.
//!
//! Turns the cart and the selected payment method into the plain-text order
//! the customer sends to the shop over WhatsApp. Customer details are left
//! as blank placeholders for the customer to fill in before sending.

use std::fmt;

use thiserror::Error;

use crate::cart::{CartStore, LineItem};
use crate::types::{PaymentDetails, PaymentMethod, Price};

/// Checkout errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,
}

/// The rendered order text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDocument(String);

impl OrderDocument {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The document percent-encoded for use as a URL query value.
    #[must_use]
    pub fn percent_encoded(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for OrderDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OrderDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Borrowed inputs for one order document.
#[derive(Debug, Clone, Copy)]
pub struct OrderSummary<'a> {
    items: &'a [LineItem],
    total: Price,
    method: PaymentMethod,
    details: &'a PaymentDetails,
}

impl<'a> OrderSummary<'a> {
    /// Summarize the cart for checkout.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if the cart has no items.
    pub fn new(
        cart: &'a CartStore,
        method: PaymentMethod,
        details: &'a PaymentDetails,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(Self {
            items: cart.items(),
            total: cart.grand_total(),
            method,
            details,
        })
    }

    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Render the summary into an owned document.
    #[must_use]
    pub fn to_document(&self) -> OrderDocument {
        OrderDocument(self.to_string())
    }

    fn write_items(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.items {
            writeln!(
                f,
                "• {}x {} - {}",
                item.quantity(),
                item.name(),
                item.subtotal()
            )?;
            let custom = item.customization();
            if let Some(spice) = custom.non_default_spice() {
                writeln!(f, "  🌶 Spice: {spice}")?;
            }
            if let Some(notes) = custom.non_empty_notes() {
                writeln!(f, "  📝 Notes: {notes}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_payment(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "💳 Payment Method: {}", self.method.label())?;
        writeln!(f)?;
        match self.method {
            PaymentMethod::Mpesa => {
                writeln!(f, "📱 MPesa Instructions:")?;
                writeln!(f, "1. Lipa Na MPesa → Buy Goods")?;
                writeln!(f, "2. Till: {}", self.details.till_number)?;
                writeln!(f, "3. Amount: {}", self.total)?;
                writeln!(f, "4. Enter PIN")?;
                writeln!(f, "5. Send screenshot of confirmation")?;
            }
            PaymentMethod::Bank => {
                writeln!(f, "🏦 Bank Transfer:")?;
                writeln!(f, "Bank: {}", self.details.bank_name)?;
                writeln!(f, "Account: {}", self.details.account_name)?;
                writeln!(f, "Number: {}", self.details.account_number)?;
                writeln!(f, "Send transfer screenshot")?;
            }
            PaymentMethod::CashOnDelivery => {
                writeln!(f, "💵 Cash on Delivery - Please have exact amount ready.")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for OrderSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🛒 GWD ORDER 🐻")?;
        writeln!(f)?;
        self.write_items(f)?;
        writeln!(f, "💰 TOTAL: {}", self.total)?;
        writeln!(f)?;
        self.write_payment(f)?;
        writeln!(f, "📋 Customer Details:")?;
        writeln!(f, "Name: _________________")?;
        writeln!(f, "Room/Hostel: ___________")?;
        writeln!(f, "Phone: _________________")?;
        writeln!(f)?;
        writeln!(f, "📍 Delivery Instructions:")?;
        write!(f, "_")
    }
}

/// Format the order document for the current cart.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if the cart has no items; no document
/// is produced and the cart is not touched.
pub fn format_order(
    cart: &CartStore,
    method: PaymentMethod,
    details: &PaymentDetails,
) -> Result<OrderDocument, CheckoutError> {
    OrderSummary::new(cart, method, details).map(|summary| summary.to_document())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cart::NewItem;
    use crate::types::{Customization, Quantity, SpiceLevel};

    fn samosa_cart() -> CartStore {
        let mut cart = CartStore::new();
        cart.add(NewItem {
            name: "Samosa".to_string(),
            unit_price: Price::new(50),
            quantity: Quantity::new(3).unwrap(),
            customization: Customization::new(SpiceLevel::Hot, "no onions"),
        });
        cart
    }

    #[test]
    fn test_empty_cart_is_refused() {
        let cart = CartStore::new();
        let result = format_order(&cart, PaymentMethod::Mpesa, &PaymentDetails::default());
        assert_eq!(result, Err(CheckoutError::EmptyCart));
    }

    #[test]
    fn test_full_mpesa_document() {
        let doc = format_order(
            &samosa_cart(),
            PaymentMethod::Mpesa,
            &PaymentDetails::default(),
        )
        .unwrap();

        let expected = "\
🛒 GWD ORDER 🐻

• 3x Samosa - KSh 150
  🌶 Spice: hot
  📝 Notes: no onions

💰 TOTAL: KSh 150

💳 Payment Method: MPESA

📱 MPesa Instructions:
1. Lipa Na MPesa → Buy Goods
2. Till: 3721190
3. Amount: KSh 150
4. Enter PIN
5. Send screenshot of confirmation

📋 Customer Details:
Name: _________________
Room/Hostel: ___________
Phone: _________________

📍 Delivery Instructions:
_";
        assert_eq!(doc.as_str(), expected);
    }

    #[test]
    fn test_default_customization_lines_are_omitted() {
        let mut cart = CartStore::new();
        cart.add(NewItem::simple("Chapati", Price::new(50)));
        cart.add(NewItem {
            quantity: Quantity::new(2).unwrap(),
            ..NewItem::simple("Pilau", Price::new(100))
        });

        let doc = format_order(&cart, PaymentMethod::Mpesa, &PaymentDetails::default()).unwrap();
        assert!(doc.as_str().contains("• 1x Chapati - KSh 50\n"));
        assert!(doc.as_str().contains("• 2x Pilau - KSh 200\n"));
        assert!(doc.as_str().contains("💰 TOTAL: KSh 250\n"));
        assert!(!doc.as_str().contains("Spice"));
        assert!(!doc.as_str().contains("Notes"));
    }

    #[test]
    fn test_bank_document() {
        let doc = format_order(
            &samosa_cart(),
            PaymentMethod::Bank,
            &PaymentDetails::default(),
        )
        .unwrap();
        let text = doc.as_str();

        assert!(text.contains("💳 Payment Method: BANK\n"));
        assert!(text.contains("Bank: Equity Bank\n"));
        assert!(text.contains("Account: Joe Gicharu Kamoni Grizzly World Deliveries\n"));
        assert!(text.contains("Number: 0380186537877\n"));
        assert!(!text.contains("Till:"));
        assert!(!text.contains("exact amount"));
    }

    #[test]
    fn test_cash_on_delivery_document() {
        let doc = format_order(
            &samosa_cart(),
            PaymentMethod::CashOnDelivery,
            &PaymentDetails::default(),
        )
        .unwrap();
        let text = doc.as_str();

        assert!(text.contains("Please have exact amount ready."));
        assert!(!text.contains("Till:"));
        assert!(!text.contains("Account:"));
    }

    #[test]
    fn test_configured_details_are_quoted() {
        let details = PaymentDetails {
            till_number: "555000".to_string(),
            ..PaymentDetails::default()
        };
        let doc = format_order(&samosa_cart(), PaymentMethod::Mpesa, &details).unwrap();
        assert!(doc.as_str().contains("2. Till: 555000\n"));
    }

    #[test]
    fn test_percent_encoding() {
        let doc = format_order(
            &samosa_cart(),
            PaymentMethod::CashOnDelivery,
            &PaymentDetails::default(),
        )
        .unwrap();
        let encoded = doc.percent_encoded();

        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('\n'));
        assert!(encoded.contains("3x%20Samosa"));
        assert_eq!(urlencoding::decode(&encoded).unwrap(), doc.as_str());
    }
}
