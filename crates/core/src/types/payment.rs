//! Payment selection and the fixed payee details quoted in order documents.
//!
//! Payment is never processed here. The selected method only decides which
//! manual instructions are written into the order document and which
//! instruction panel the storefront shows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a payment method from a UI value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentMethodError {
    #[error("unknown payment method: {0}")]
    Unknown(String),
}

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    /// Lipa na MPesa, Buy Goods till.
    #[default]
    Mpesa,
    /// Bank transfer.
    Bank,
    /// Cash handed over on delivery.
    CashOnDelivery,
}

impl PaymentMethod {
    /// All methods, in the order the storefront offers them.
    pub const ALL: [Self; 3] = [Self::Mpesa, Self::Bank, Self::CashOnDelivery];

    /// Resolve the UI's current selection.
    ///
    /// An unset or unrecognised selection falls back to MPesa.
    #[must_use]
    pub fn from_selection(selection: Option<&str>) -> Self {
        selection
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Label written on the payment-method line of the order document.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Mpesa => "MPESA",
            Self::Bank => "BANK",
            Self::CashOnDelivery => "CASH ON DELIVERY",
        }
    }

    /// Value used by the UI control for this option.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mpesa => "mpesa",
            Self::Bank => "bank",
            Self::CashOnDelivery => "cash",
        }
    }

    /// The instruction panel shown while this method is selected.
    ///
    /// Cash on delivery needs no instructions, so no panel is shown.
    #[must_use]
    pub const fn instruction_panel(&self) -> Option<InstructionPanel> {
        match self {
            Self::Mpesa => Some(InstructionPanel::Mpesa),
            Self::Bank => Some(InstructionPanel::Bank),
            Self::CashOnDelivery => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mpesa" | "m-pesa" => Ok(Self::Mpesa),
            "bank" | "bank-transfer" => Ok(Self::Bank),
            "cash" | "cod" | "cashondelivery" | "cash-on-delivery" | "cash_on_delivery" => {
                Ok(Self::CashOnDelivery)
            }
            _ => Err(PaymentMethodError::Unknown(s.to_string())),
        }
    }
}

/// Instruction panels the storefront can show next to the payment options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionPanel {
    Mpesa,
    Bank,
}

/// Payee details quoted in payment instructions.
///
/// These are fixed configuration, never customer input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// MPesa Buy Goods till number.
    pub till_number: String,
    /// Bank receiving transfers.
    pub bank_name: String,
    /// Account holder name.
    pub account_name: String,
    /// Account number.
    pub account_number: String,
}

impl Default for PaymentDetails {
    fn default() -> Self {
        Self {
            till_number: "3721190".to_string(),
            bank_name: "Equity Bank".to_string(),
            account_name: "Joe Gicharu Kamoni Grizzly World Deliveries".to_string(),
            account_number: "0380186537877".to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ui_values() {
        assert_eq!("mpesa".parse::<PaymentMethod>().unwrap(), PaymentMethod::Mpesa);
        assert_eq!("BANK".parse::<PaymentMethod>().unwrap(), PaymentMethod::Bank);
        assert_eq!(
            "cash".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::CashOnDelivery
        );
        assert_eq!(
            "cashOnDelivery".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::CashOnDelivery
        );
    }

    #[test]
    fn test_parse_unknown_is_error() {
        let err = "paypal".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(err, PaymentMethodError::Unknown("paypal".to_string()));
    }

    #[test]
    fn test_selection_defaults_to_mpesa() {
        assert_eq!(PaymentMethod::from_selection(None), PaymentMethod::Mpesa);
        assert_eq!(
            PaymentMethod::from_selection(Some("bitcoin")),
            PaymentMethod::Mpesa
        );
        assert_eq!(
            PaymentMethod::from_selection(Some("bank")),
            PaymentMethod::Bank
        );
    }

    #[test]
    fn test_instruction_panels() {
        assert_eq!(
            PaymentMethod::Mpesa.instruction_panel(),
            Some(InstructionPanel::Mpesa)
        );
        assert_eq!(
            PaymentMethod::Bank.instruction_panel(),
            Some(InstructionPanel::Bank)
        );
        assert_eq!(PaymentMethod::CashOnDelivery.instruction_panel(), None);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.to_string().parse::<PaymentMethod>().unwrap(), method);
        }
    }
}
