//! Checkout flow.
//!
//! ```text
//! Idle ──begin──▶ Reviewing ──confirm──▶ Confirmed ──clear──▶ Cleared
//!  ▲                  │                      │
//!  └──── cancel ──────┘                      └────keep───▶ Kept
//! ```
//!
//! Each state is its own type, so a document can only be handed off after
//! the customer has confirmed it, and the cart can only be cleared after a
//! handoff. An empty cart never leaves `Idle`.

use serde::Serialize;
use url::Url;

use crate::cart::CartStore;
use crate::handoff::{HandoffError, Messenger, Recipient, whatsapp_url};
use crate::order::{CheckoutError, OrderDocument, OrderSummary};
use crate::sync::{CartPresenter, SyncedCart};
use crate::types::{PaymentDetails, PaymentMethod, Price};

/// Where a checkout ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutOutcome {
    /// Refused at the entry guard; back to idle.
    EmptyCart,
    /// The customer declined the order document; cart untouched.
    Cancelled,
    /// Handed off, then the cart was emptied.
    Cleared,
    /// Handed off, and the cart was left as it was.
    Kept,
}

impl CheckoutOutcome {
    /// Whether the order document was handed to the messenger.
    #[must_use]
    pub const fn was_sent(&self) -> bool {
        matches!(self, Self::Cleared | Self::Kept)
    }
}

/// An order document awaiting the customer's confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reviewing {
    document: OrderDocument,
    method: PaymentMethod,
    total: Price,
}

impl Reviewing {
    /// Leave `Idle` by formatting the order for review.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` when there is nothing to order.
    pub fn begin(
        cart: &CartStore,
        method: PaymentMethod,
        details: &PaymentDetails,
    ) -> Result<Self, CheckoutError> {
        let summary = OrderSummary::new(cart, method, details)?;
        Ok(Self {
            document: summary.to_document(),
            method,
            total: summary.total(),
        })
    }

    /// The full document the customer is asked to acknowledge.
    #[must_use]
    pub const fn document(&self) -> &OrderDocument {
        &self.document
    }

    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        self.method
    }

    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// The customer acknowledged the document.
    #[must_use]
    pub fn confirm(self) -> Confirmed {
        Confirmed {
            document: self.document,
        }
    }

    /// The customer declined; nothing changes.
    #[must_use]
    pub fn cancel(self) -> CheckoutOutcome {
        CheckoutOutcome::Cancelled
    }
}

/// A confirmed order, ready to hand off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmed {
    document: OrderDocument,
}

impl Confirmed {
    #[must_use]
    pub const fn document(&self) -> &OrderDocument {
        &self.document
    }

    /// The pre-filled message link for `recipient`.
    ///
    /// # Errors
    ///
    /// Returns `HandoffError` if the link cannot be composed.
    pub fn message_url(&self, recipient: &Recipient) -> Result<Url, HandoffError> {
        whatsapp_url(recipient, &self.document)
    }

    /// Hand the document to `messenger` as a pre-filled draft.
    ///
    /// Failures are logged and otherwise ignored: delivery is never
    /// confirmed, and a failed handoff must not affect the cart. Returns the
    /// link when the messenger accepted it.
    pub fn hand_off<M: Messenger>(&self, recipient: &Recipient, messenger: &mut M) -> Option<Url> {
        let url = match self.message_url(recipient) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(error = %e, "Failed to compose messaging link");
                return None;
            }
        };
        match messenger.open(&url) {
            Ok(()) => {
                tracing::info!(recipient = %recipient, "Order handed to messenger");
                Some(url)
            }
            Err(e) => {
                tracing::error!(error = %e, "Messenger failed to open order link");
                None
            }
        }
    }

    /// Empty the cart, resync the display and toggle the cart panel.
    pub fn clear<P: CartPresenter>(self, cart: &mut SyncedCart<P>) -> CheckoutOutcome {
        cart.clear();
        cart.toggle_panel();
        CheckoutOutcome::Cleared
    }

    /// Leave the cart as it is.
    #[must_use]
    pub fn keep(self) -> CheckoutOutcome {
        CheckoutOutcome::Kept
    }
}

/// The customer-facing side of checkout: notices and blocking confirmations.
pub trait CheckoutPrompt {
    /// Tell the customer the cart is empty.
    fn notify_empty_cart(&mut self);

    /// Show the full order document and ask whether to send it.
    fn confirm_order(&mut self, document: &OrderDocument) -> bool;

    /// After sending, ask whether to clear the cart.
    fn confirm_clear(&mut self) -> bool;
}

impl<Q: CheckoutPrompt + ?Sized> CheckoutPrompt for &mut Q {
    fn notify_empty_cart(&mut self) {
        (**self).notify_empty_cart();
    }

    fn confirm_order(&mut self, document: &OrderDocument) -> bool {
        (**self).confirm_order(document)
    }

    fn confirm_clear(&mut self) -> bool {
        (**self).confirm_clear()
    }
}

/// Fixed checkout settings: who receives orders and how to pay them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub recipient: Recipient,
    pub payment: PaymentDetails,
}

/// Run one checkout from `Idle` to a terminal state.
///
/// `method` is the payment selection read from the UI at this moment; it is
/// not stored anywhere.
pub fn run_checkout<P, Q, M>(
    cart: &mut SyncedCart<P>,
    method: PaymentMethod,
    settings: &CheckoutSettings,
    prompt: &mut Q,
    messenger: &mut M,
) -> CheckoutOutcome
where
    P: CartPresenter,
    Q: CheckoutPrompt,
    M: Messenger,
{
    let reviewing = match Reviewing::begin(cart.store(), method, &settings.payment) {
        Ok(reviewing) => reviewing,
        Err(CheckoutError::EmptyCart) => {
            tracing::warn!("Checkout refused: cart is empty");
            prompt.notify_empty_cart();
            return CheckoutOutcome::EmptyCart;
        }
    };
    tracing::info!(
        method = %reviewing.method(),
        total = %reviewing.total(),
        lines = cart.store().len(),
        "Order ready for review"
    );

    if !prompt.confirm_order(reviewing.document()) {
        tracing::info!("Order cancelled during review");
        return reviewing.cancel();
    }

    let confirmed = reviewing.confirm();
    confirmed.hand_off(&settings.recipient, messenger);

    let outcome = if prompt.confirm_clear() {
        confirmed.clear(cart)
    } else {
        confirmed.keep()
    };
    tracing::info!(outcome = ?outcome, "Checkout finished");
    outcome
}
