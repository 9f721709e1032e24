//! Integration tests for Grizzly World Deliveries.
//!
//! Shared fakes for driving the cart and checkout end to end without a
//! terminal or browser:
//! - [`ScriptedPrompt`] answers checkout questions from a fixed script
//! - [`RecordingMessenger`] keeps every handoff link instead of opening it
//! - [`RecordingPresenter`] keeps every rendered view
//! - [`SharedBuffer`] is a cloneable in-memory terminal
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p grizzly-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Write;
use std::rc::Rc;

use grizzly_core::{CartPresenter, CartView, CheckoutPrompt, Messenger, MessagingError, OrderDocument};
use url::Url;

/// Checkout prompt answering from a script.
///
/// Answers are consumed in order; once the script runs out every question is
/// declined.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    /// Documents shown for review, in order.
    pub reviewed: Vec<OrderDocument>,
    /// Number of empty-cart notices shown.
    pub empty_notices: usize,
}

impl ScriptedPrompt {
    #[must_use]
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            ..Self::default()
        }
    }

    fn next(&mut self) -> bool {
        self.answers.pop_front().unwrap_or(false)
    }
}

impl CheckoutPrompt for ScriptedPrompt {
    fn notify_empty_cart(&mut self) {
        self.empty_notices += 1;
    }

    fn confirm_order(&mut self, document: &OrderDocument) -> bool {
        self.reviewed.push(document.clone());
        self.next()
    }

    fn confirm_clear(&mut self) -> bool {
        self.next()
    }
}

/// Messenger recording links, optionally failing to open them.
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    pub opened: Vec<Url>,
    pub fail: bool,
}

impl RecordingMessenger {
    /// A messenger whose host refuses to open anything.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Messenger for RecordingMessenger {
    fn open(&mut self, url: &Url) -> Result<(), MessagingError> {
        self.opened.push(url.clone());
        if self.fail {
            return Err(MessagingError::Unavailable("popup blocked".to_string()));
        }
        Ok(())
    }
}

/// Presenter recording every view it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub views: Vec<CartView>,
    pub panel_open: bool,
}

impl RecordingPresenter {
    /// The most recently drawn view.
    #[must_use]
    pub fn last(&self) -> Option<&CartView> {
        self.views.last()
    }
}

impl CartPresenter for RecordingPresenter {
    fn render(&mut self, view: &CartView) {
        self.views.push(view.clone());
    }

    fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }
}

/// In-memory output that can be cloned and read back.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    /// Everything written so far, lossily decoded.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
