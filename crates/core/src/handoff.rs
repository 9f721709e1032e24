//! Messaging handoff: pre-filled WhatsApp drafts.
//!
//! The order is never sent by this crate. It composes a `wa.me` link whose
//! text parameter carries the percent-encoded order document, and asks a
//! [`Messenger`] to open it. Whether the message is actually sent is up to
//! the customer.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::order::OrderDocument;

/// Base of WhatsApp click-to-chat links.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Errors composing a handoff link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandoffError {
    #[error("invalid recipient number {0:?}: expected international digits only")]
    InvalidRecipient(String),

    #[error("invalid handoff URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Errors reported by a messaging collaborator.
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("failed to open messaging link: {0}")]
    Open(#[from] std::io::Error),

    #[error("messaging unavailable: {0}")]
    Unavailable(String),
}

/// The shop's WhatsApp number in international format, digits only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient(String);

impl Recipient {
    /// Validate a recipient number.
    ///
    /// A leading `+` and embedded spaces are accepted and stripped.
    ///
    /// # Errors
    ///
    /// Returns `HandoffError::InvalidRecipient` if anything other than digits
    /// remains, or if the number is implausibly short.
    pub fn new(number: &str) -> Result<Self, HandoffError> {
        let digits: String = number
            .trim()
            .trim_start_matches('+')
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if digits.len() < 7 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(HandoffError::InvalidRecipient(number.to_string()));
        }
        Ok(Self(digits))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Recipient {
    fn default() -> Self {
        Self("254714396527".to_string())
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Recipient {
    type Err = HandoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Build the click-to-chat link that pre-fills `document` for `recipient`.
///
/// # Errors
///
/// Returns `HandoffError::Url` if the composed link does not parse.
pub fn whatsapp_url(recipient: &Recipient, document: &OrderDocument) -> Result<Url, HandoffError> {
    let link = format!(
        "{WHATSAPP_BASE_URL}/{recipient}?text={}",
        document.percent_encoded()
    );
    Ok(Url::parse(&link)?)
}

/// Host-environment collaborator that opens a messaging link.
pub trait Messenger {
    /// Open `url` in a new context (browser tab, app, ...).
    ///
    /// # Errors
    ///
    /// Returns `MessagingError` if the host could not open the link. Callers
    /// log the failure; it never affects cart state.
    fn open(&mut self, url: &Url) -> Result<(), MessagingError>;
}

impl<M: Messenger + ?Sized> Messenger for &mut M {
    fn open(&mut self, url: &Url) -> Result<(), MessagingError> {
        (**self).open(url)
    }
}
