//! Blocking yes/no prompts for checkout.

use std::io::{BufRead, Write};

use grizzly_core::{CheckoutPrompt, OrderDocument};

pub const EMPTY_CART_NOTICE: &str = "🛒 Your cart is empty! Add some delicious items first.";
pub const CLEAR_CART_QUESTION: &str = "Order sent! Would you like to clear your cart?";

/// Checkout prompts read from a line-based input.
///
/// Anything other than an explicit yes counts as no, including end of
/// input and read errors.
#[derive(Debug)]
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Ask `question` and wait for an answer.
    pub fn ask(&mut self, question: &str) -> bool {
        if let Err(e) = write!(self.output, "{question} [y/N] ").and_then(|()| self.output.flush())
        {
            tracing::debug!(error = %e, "Prompt output unavailable");
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) => false,
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read prompt answer");
                false
            }
        }
    }

    fn say(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{message}") {
            tracing::debug!(error = %e, "Prompt output unavailable");
        }
    }
}

impl<R: BufRead, W: Write> CheckoutPrompt for TerminalPrompt<R, W> {
    fn notify_empty_cart(&mut self) {
        self.say(EMPTY_CART_NOTICE);
    }

    fn confirm_order(&mut self, document: &OrderDocument) -> bool {
        self.say("ORDER CONFIRMATION:\n");
        self.say(document.as_str());
        self.say("");
        self.ask("Proceed to WhatsApp? Answer no to review your order.")
    }

    fn confirm_clear(&mut self) -> bool {
        self.ask(CLEAR_CART_QUESTION)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "ok"
    )
}
