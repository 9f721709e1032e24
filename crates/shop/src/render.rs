//! Terminal rendering of the cart, payment panels and menu.
//!
//! Templates live in `templates/` and consume the core's view model; no
//! cart logic happens here.

use std::io::Write;

use askama::Template;
use grizzly_core::{CartPresenter, CartView, PaymentDetails, PaymentMethod, PaymentPanels};

use crate::menu::Menu;

/// Cart side panel.
#[derive(Template)]
#[template(path = "cart_panel.txt", escape = "none")]
struct CartPanelTemplate<'a> {
    view: &'a CartView,
}

/// Payment instructions for the selected method.
#[derive(Template)]
#[template(path = "payment_panel.txt", escape = "none")]
struct PaymentPanelTemplate<'a> {
    method_label: &'static str,
    panels: PaymentPanels,
    details: &'a PaymentDetails,
    mpesa_amount: u64,
}

/// Menu listing.
#[derive(Template)]
#[template(path = "menu.txt", escape = "none")]
struct MenuTemplate<'a> {
    menu: &'a Menu,
}

/// Render the cart panel.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_cart_panel(view: &CartView) -> askama::Result<String> {
    CartPanelTemplate { view }.render()
}

/// Render the instruction panel for `method`.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_payment_panel(
    method: PaymentMethod,
    details: &PaymentDetails,
    mpesa_amount: u64,
) -> askama::Result<String> {
    PaymentPanelTemplate {
        method_label: method.label(),
        panels: PaymentPanels::for_method(method),
        details,
        mpesa_amount,
    }
    .render()
}

/// Render the menu listing.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_menu(menu: &Menu) -> askama::Result<String> {
    MenuTemplate { menu }.render()
}

/// Item-count badge.
#[must_use]
pub fn badge(view: &CartView) -> String {
    format!("🛒 {}", view.item_count)
}

/// MPesa reminder kept in step with the cart total.
#[must_use]
pub fn mpesa_line(details: &PaymentDetails, amount: u64) -> String {
    format!(
        "📱 Lipa Na MPesa → Buy Goods, till {}, amount KSh {amount}",
        details.till_number
    )
}

/// Presenter drawing the cart on a terminal.
///
/// The badge, and the MPesa amount while MPesa is selected, are redrawn on
/// every render; the full panel only while it is open. Opening the panel
/// redraws the last view. Without an output the presenter draws nothing.
#[derive(Debug)]
pub struct TerminalPresenter<W> {
    out: Option<W>,
    panel_open: bool,
    payment: PaymentMethod,
    details: PaymentDetails,
    last_view: Option<CartView>,
}

impl<W: Write> TerminalPresenter<W> {
    /// Draw on `out`, starting with the panel closed and MPesa selected.
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            ..Self::detached()
        }
    }

    /// A presenter with no terminal attached.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            out: None,
            panel_open: false,
            payment: PaymentMethod::default(),
            details: PaymentDetails::default(),
            last_view: None,
        }
    }

    /// Use `details` for the payment reminders.
    #[must_use]
    pub fn with_payment_details(mut self, details: PaymentDetails) -> Self {
        self.details = details;
        self
    }

    #[must_use]
    pub const fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Change the payment method control.
    pub const fn select_payment(&mut self, method: PaymentMethod) {
        self.payment = method;
    }

    #[must_use]
    pub const fn payment(&self) -> PaymentMethod {
        self.payment
    }

    /// The underlying output, if any.
    pub fn into_inner(self) -> Option<W> {
        self.out
    }

    /// Borrow the output for direct messages.
    pub const fn output(&mut self) -> Option<&mut W> {
        self.out.as_mut()
    }

    fn draw(&mut self, view: &CartView) -> std::io::Result<()> {
        let panel = if self.panel_open {
            match render_cart_panel(view) {
                Ok(panel) => Some(panel),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to render cart panel");
                    None
                }
            }
        } else {
            None
        };
        let mpesa = view
            .panels
            .mpesa
            .then(|| mpesa_line(&self.details, view.mpesa_amount));

        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };
        if let Some(panel) = panel {
            write!(out, "{panel}")?;
        }
        if let Some(mpesa) = mpesa {
            writeln!(out, "{mpesa}")?;
        }
        writeln!(out, "{}", badge(view))?;
        out.flush()
    }
}

impl<W: Write> CartPresenter for TerminalPresenter<W> {
    fn render(&mut self, view: &CartView) {
        if let Err(e) = self.draw(view) {
            tracing::debug!(error = %e, "Cart display unavailable");
        }
        self.last_view = Some(view.clone());
    }

    fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
        tracing::debug!(open = self.panel_open, "Cart panel toggled");
        if !self.panel_open {
            return;
        }
        if let Some(view) = self.last_view.take() {
            self.render(&view);
        }
    }

    fn payment_selection(&self) -> Option<&str> {
        Some(self.payment.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use grizzly_core::{CartStore, Customization, NewItem, Price, Quantity, SpiceLevel};

    use super::*;

    fn samosa_view() -> CartView {
        let mut cart = CartStore::new();
        cart.add(NewItem {
            name: "Beef Samosa".to_string(),
            unit_price: Price::new(50),
            quantity: Quantity::new(3).unwrap(),
            customization: Customization::new(SpiceLevel::Hot, "no onions"),
        });
        cart.add(NewItem::simple("Chapati", Price::new(30)));
        CartView::from(&cart)
    }

    #[test]
    fn test_cart_panel_lists_items() {
        let panel = render_cart_panel(&samosa_view()).unwrap();
        assert!(panel.contains("1. Beef Samosa\n"));
        assert!(panel.contains("KSh 50 × 3 = KSh 150"));
        assert!(panel.contains("🌶 Spice: hot"));
        assert!(panel.contains("📝 Notes: no onions"));
        assert!(panel.contains("2. Chapati\n"));
        assert!(panel.contains("💰 Total: KSh 180"));
        assert_eq!(panel.matches("Spice").count(), 1);
    }

    #[test]
    fn test_empty_cart_panel() {
        let panel = render_cart_panel(&CartView::empty()).unwrap();
        assert!(panel.contains("Your cart is empty"));
        assert!(!panel.contains("Total"));
    }

    #[test]
    fn test_payment_panels() {
        let details = PaymentDetails::default();

        let mpesa = render_payment_panel(PaymentMethod::Mpesa, &details, 180).unwrap();
        assert!(mpesa.contains("till 3721190, amount KSh 180"));
        assert!(!mpesa.contains("Equity Bank"));

        let bank = render_payment_panel(PaymentMethod::Bank, &details, 180).unwrap();
        assert!(bank.contains("Equity Bank"));
        assert!(!bank.contains("till"));

        let cash = render_payment_panel(PaymentMethod::CashOnDelivery, &details, 180).unwrap();
        assert!(cash.contains("CASH ON DELIVERY"));
        assert!(!cash.contains("till"));
        assert!(!cash.contains("Equity Bank"));
    }

    #[test]
    fn test_menu_listing() {
        let menu = Menu::builtin().unwrap();
        let listing = render_menu(&menu).unwrap();
        assert!(listing.contains("beef-samosa"));
        assert!(listing.contains("KSh 50"));
        assert!(listing.contains("spice and notes available"));
    }

    #[test]
    fn test_presenter_draws_panel_only_when_open() {
        let view = samosa_view();
        let mut presenter = TerminalPresenter::new(Vec::new());

        presenter.render(&view);
        let closed = String::from_utf8(presenter.output().unwrap().clone()).unwrap();
        assert_eq!(
            closed,
            "📱 Lipa Na MPesa → Buy Goods, till 3721190, amount KSh 180\n🛒 4\n"
        );

        presenter.toggle_panel();
        assert!(presenter.is_panel_open());
        presenter.render(&view);
        let out = String::from_utf8(presenter.into_inner().unwrap()).unwrap();
        assert_eq!(out.matches("1. Beef Samosa").count(), 2);
        assert!(out.ends_with("🛒 4\n"));
    }

    #[test]
    fn test_opening_panel_redraws_last_view() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.render(&samosa_view());
        presenter.output().unwrap().clear();

        presenter.toggle_panel();
        let opened = String::from_utf8(presenter.output().unwrap().clone()).unwrap();
        assert!(opened.starts_with("🛒 Your cart (4 items)"));
        assert!(opened.contains("💰 Total: KSh 180"));
        presenter.output().unwrap().clear();

        // Closing draws nothing.
        presenter.toggle_panel();
        assert!(presenter.output().unwrap().is_empty());
    }

    #[test]
    fn test_mpesa_line_follows_selection() {
        let details = PaymentDetails {
            till_number: "555111".to_string(),
            ..PaymentDetails::default()
        };
        let mut presenter = TerminalPresenter::new(Vec::new()).with_payment_details(details);
        assert_eq!(presenter.payment_selection(), Some("mpesa"));

        presenter.select_payment(PaymentMethod::Bank);
        assert_eq!(presenter.payment_selection(), Some("bank"));

        let mut cart = CartStore::new();
        cart.add(NewItem::simple("Beef Pilau", Price::new(200)));
        presenter.render(&CartView::new(&cart, PaymentMethod::Bank));
        presenter.render(&CartView::new(&cart, PaymentMethod::Mpesa));

        let out = String::from_utf8(presenter.into_inner().unwrap()).unwrap();
        assert_eq!(out.matches("till 555111, amount KSh 200").count(), 1);
    }

    #[test]
    fn test_detached_presenter_is_noop() {
        let mut presenter = TerminalPresenter::<Vec<u8>>::detached();
        presenter.toggle_panel();
        presenter.render(&samosa_view());
        assert!(presenter.into_inner().is_none());
    }
}
