//! Grizzly Shop - Terminal storefront for Grizzly World Deliveries.
//!
//! Wires the cart core to a line-based terminal:
//! - [`commands`] - Parsing of shop input lines
//! - [`session`] - The interactive session and command handling
//! - [`render`] - Askama templates for the cart, payment panel and menu
//! - [`prompt`] - Checkout confirmations
//! - [`messaging`] - Opening WhatsApp links
//! - [`offline`] - Background offline-cache registration
//! - [`menu`], [`config`], [`error`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod commands;
pub mod config;
pub mod error;
pub mod menu;
pub mod messaging;
pub mod offline;
pub mod prompt;
pub mod render;
pub mod session;

pub use config::ShopConfig;
pub use error::{AppError, Result};
pub use menu::{Menu, MenuItem};
pub use session::{Flow, ShopSession, Terminal};
