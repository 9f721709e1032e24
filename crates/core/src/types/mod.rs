//! Core types for the cart.
//!
//! This module provides type-safe wrappers for prices, quantities, payment
//! selection and per-item customization.

pub mod customization;
pub mod id;
pub mod payment;
pub mod price;

pub use customization::{Customization, SpiceLevel, SpiceLevelError};
pub use id::*;
pub use payment::{InstructionPanel, PaymentDetails, PaymentMethod, PaymentMethodError};
pub use price::{CURRENCY_LABEL, Price, Quantity, QuantityError};
