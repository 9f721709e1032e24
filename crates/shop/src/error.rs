//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for the shop session. Errors caused by
//! the customer (unknown dish, bad position) are shown and the session goes
//! on; everything else is captured to Sentry before being shown.

use grizzly_core::{CartError, PaymentMethodError, QuantityError, SpiceLevelError};
use thiserror::Error;

use crate::config::ConfigError;
use crate::menu::MenuError;

/// Application-level error type for the shop.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Menu could not be loaded.
    #[error("Menu error: {0}")]
    Menu(#[from] MenuError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Background task failed to join.
    #[error("Task error: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Item not on the menu.
    #[error("Not on the menu: {0}")]
    NotFound(String),

    /// Bad input from the customer.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<QuantityError> for AppError {
    fn from(err: QuantityError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<SpiceLevelError> for AppError {
    fn from(err: SpiceLevelError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<PaymentMethodError> for AppError {
    fn from(err: PaymentMethodError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl AppError {
    /// Whether the customer caused this error and can simply retry.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::BadRequest(_) | Self::Cart(_))
    }

    /// Log the error, capturing non-customer errors to Sentry.
    pub fn report(&self) {
        if self.is_user_error() {
            tracing::debug!(error = %self, "Rejected customer input");
            return;
        }
        let event_id = sentry::capture_error(self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Shop error"
        );
    }

    /// Message shown to the customer.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Template(_) | Self::Io(_) | Self::Task(_) => {
                "Something went wrong, please try again".to_string()
            }
            Self::Cart(CartError::OutOfRange { len, .. }) => {
                if *len == 0 {
                    "Your cart is empty".to_string()
                } else {
                    format!("Pick a cart position between 1 and {len}")
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for customer actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("item", "Beef Samosa")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
