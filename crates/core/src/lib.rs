//! Grizzly Core - Cart state machine and order formatting.
//!
//! This crate holds everything about the cart that does not depend on a
//! particular display:
//! - [`cart`] - The cart store and its derived totals
//! - [`draft`] - Quantity and customization controls before an item is added
//! - [`sync`] - Mutate-then-rerender presentation sync
//! - [`view`] - View model consumed by rendering layers
//! - [`order`] - Plain-text order documents with payment instructions
//! - [`handoff`] - WhatsApp click-to-chat links and the messenger seam
//! - [`checkout`] - The checkout state machine
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure logic - no terminal,
//! no network, no filesystem. Collaborators (presenters, prompts, messengers)
//! are traits implemented by the `grizzly-shop` crate and by tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod draft;
pub mod handoff;
pub mod order;
pub mod sync;
pub mod types;
pub mod view;

pub use cart::{CartError, CartStore, LineItem, NewItem};
pub use checkout::{
    CheckoutOutcome, CheckoutPrompt, CheckoutSettings, Confirmed, Reviewing, run_checkout,
};
pub use draft::ItemDraft;
pub use handoff::{HandoffError, Messenger, MessagingError, Recipient, whatsapp_url};
pub use order::{CheckoutError, OrderDocument, OrderSummary, format_order};
pub use sync::{CartPresenter, SyncedCart};
pub use types::*;
pub use view::{CartItemView, CartView, PaymentPanels};
