//! The interactive shop session.
//!
//! A session owns the synced cart, the menu and the UI state that is not part
//! of the cart: the selected payment method and the item being configured.
//! Each input line becomes one `ShopCommand`; errors are reported and shown
//! to the customer, and the session carries on.

use std::io::{BufRead, Write};

use grizzly_core::{
    CartError, CheckoutOutcome, CheckoutSettings, Customization, ItemDraft, NewItem,
    PaymentMethod, Quantity, SpiceLevel, SyncedCart, run_checkout,
};
use tracing::{debug, info, instrument};

use crate::commands::{ParseLineError, ShopCommand, parse_line};
use crate::config::ShopConfig;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::menu::{Menu, MenuItem};
use crate::messaging::BrowserMessenger;
use crate::prompt::TerminalPrompt;
use crate::render::{TerminalPresenter, render_menu, render_payment_panel};

/// Whether the session should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Handle to the process's standard output.
///
/// Cheap to clone, so the cart display, prompts and messenger can each hold
/// one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Terminal;

impl Write for Terminal {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        std::io::stdout().lock().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stdout().lock().flush()
    }
}

/// One customer's shopping session.
pub struct ShopSession<R, W> {
    cart: SyncedCart<TerminalPresenter<W>>,
    menu: Menu,
    settings: CheckoutSettings,
    open_browser: bool,
    draft: Option<ItemDraft>,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write + Clone> ShopSession<R, W> {
    /// Start a session with an empty cart.
    ///
    /// Nothing is drawn until `run` greets the customer or a command changes
    /// the cart.
    pub fn new(config: &ShopConfig, menu: Menu, input: R, out: W) -> Self {
        let presenter =
            TerminalPresenter::new(out.clone()).with_payment_details(config.payment.clone());
        Self {
            cart: SyncedCart::deferred(presenter),
            menu,
            settings: config.checkout_settings(),
            open_browser: config.open_browser,
            draft: None,
            input,
            out,
        }
    }

    /// The cart as it stands.
    #[must_use]
    pub const fn cart(&self) -> &SyncedCart<TerminalPresenter<W>> {
        &self.cart
    }

    /// The payment method currently selected.
    #[must_use]
    pub fn payment(&self) -> PaymentMethod {
        self.cart.payment_method()
    }

    /// The item being configured, if any.
    #[must_use]
    pub const fn draft(&self) -> Option<&ItemDraft> {
        self.draft.as_ref()
    }

    /// Read and handle commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only if the terminal itself fails. Customer mistakes
    /// and per-command failures are shown and the loop continues.
    pub fn run(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "🐻 Welcome to Grizzly World Deliveries! Type `menu` to see what's cooking, `help` for commands."
        )?;
        self.cart.resync();

        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("End of input, leaving the shop");
                break;
            }

            let command = match parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(ParseLineError::Clap(e)) => {
                    write!(self.out, "{}", e.render())?;
                    continue;
                }
                Err(e) => {
                    writeln!(self.out, "{e}")?;
                    continue;
                }
            };

            match self.handle(command) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => {
                    e.report();
                    writeln!(self.out, "⚠️ {}", e.user_message())?;
                }
            }
        }

        writeln!(self.out, "👋 Karibu tena!")?;
        Ok(())
    }

    /// Handle a single command.
    ///
    /// # Errors
    ///
    /// Returns `AppError` for unknown dishes, invalid input, bad cart
    /// positions and terminal failures.
    #[instrument(skip(self), fields(lines = self.cart.store().len()))]
    pub fn handle(&mut self, command: ShopCommand) -> Result<Flow> {
        match command {
            ShopCommand::Menu => {
                let listing = render_menu(&self.menu)?;
                write!(self.out, "{listing}")?;
            }
            ShopCommand::Add {
                slug,
                quantity,
                spice,
                notes,
            } => self.add(&slug, quantity, spice.as_deref(), notes)?,
            ShopCommand::Pick { slug } => {
                let item = self.find(&slug)?;
                self.draft = Some(item.draft());
                self.show_draft()?;
            }
            ShopCommand::Inc => {
                self.draft_mut()?.increase();
                self.show_draft()?;
            }
            ShopCommand::Dec => {
                self.draft_mut()?.decrease();
                self.show_draft()?;
            }
            ShopCommand::Commit => {
                let item = self.draft_mut()?.commit();
                self.add_to_cart(item)?;
            }
            ShopCommand::Remove { position } => self.remove(position)?,
            ShopCommand::Pay { method } => {
                let method: PaymentMethod = method.parse()?;
                self.cart.presenter_mut().select_payment(method);
                add_breadcrumb(
                    "payment",
                    "Selected payment method",
                    Some(&[("method", method.as_str())]),
                );
                let panel = render_payment_panel(
                    method,
                    &self.settings.payment,
                    self.cart.store().grand_total().amount(),
                )?;
                write!(self.out, "{panel}")?;
            }
            ShopCommand::Cart => self.cart.toggle_panel(),
            ShopCommand::Checkout => self.checkout(),
            ShopCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn add(
        &mut self,
        slug: &str,
        quantity: Option<u32>,
        spice: Option<&str>,
        notes: Option<String>,
    ) -> Result<()> {
        let item = self.find(slug)?;

        let new_item = if item.customizable {
            let spice_level = spice.map(str::parse::<SpiceLevel>).transpose()?;
            NewItem {
                name: item.name.clone(),
                unit_price: item.price,
                quantity: Quantity::new(quantity.unwrap_or(1))?,
                customization: Customization::new(
                    spice_level.unwrap_or_default(),
                    notes.unwrap_or_default(),
                ),
            }
        } else {
            if spice.is_some() || notes.is_some() {
                debug!(slug, "Ignoring customization for a simple item");
            }
            match quantity {
                None => item.simple(),
                Some(quantity) => NewItem {
                    quantity: Quantity::new(quantity)?,
                    ..item.simple()
                },
            }
        };

        self.add_to_cart(new_item)
    }

    fn add_to_cart(&mut self, item: NewItem) -> Result<()> {
        let message = format!("Added {} {} to cart!", item.quantity, item.name);
        let quantity = item.quantity.to_string();
        add_breadcrumb(
            "cart",
            "Added item",
            Some(&[("item", item.name.as_str()), ("quantity", quantity.as_str())]),
        );
        info!(item = %item.name, quantity = %item.quantity, "Adding item to cart");

        self.cart.add(item);
        writeln!(self.out, "{message}")?;
        Ok(())
    }

    fn remove(&mut self, position: usize) -> Result<()> {
        let len = self.cart.store().len();
        let index = position.saturating_sub(1);
        let removed = position
            .checked_sub(1)
            .and_then(|index| self.cart.remove_at(index))
            .ok_or(CartError::OutOfRange { index, len })?;

        add_breadcrumb("cart", "Removed item", Some(&[("item", removed.name())]));
        info!(item = %removed.name(), position, "Removed item from cart");
        writeln!(self.out, "Removed {} {} from cart", removed.quantity(), removed.name())?;
        Ok(())
    }

    fn checkout(&mut self) {
        add_breadcrumb("checkout", "Checkout started", None);

        let method = self.cart.payment_method();
        let mut prompt = TerminalPrompt::new(&mut self.input, self.out.clone());
        let mut messenger = BrowserMessenger::new(self.open_browser, self.out.clone());
        let outcome = run_checkout(
            &mut self.cart,
            method,
            &self.settings,
            &mut prompt,
            &mut messenger,
        );

        if outcome == CheckoutOutcome::Cleared {
            self.draft = None;
        }
        debug!(outcome = ?outcome, "Checkout returned to the shop");
    }

    fn find(&self, slug: &str) -> Result<&MenuItem> {
        self.menu
            .find(slug)
            .ok_or_else(|| AppError::NotFound(slug.to_string()))
    }

    fn draft_mut(&mut self) -> Result<&mut ItemDraft> {
        self.draft.as_mut().ok_or_else(|| {
            AppError::BadRequest("pick an item first, e.g. `pick beef-samosa`".to_string())
        })
    }

    fn show_draft(&mut self) -> Result<()> {
        if let Some(draft) = &self.draft {
            writeln!(
                self.out,
                "{}: {} × {} = {}",
                draft.name(),
                draft.unit_price(),
                draft.quantity(),
                draft.preview_total()
            )?;
        }
        Ok(())
    }
}
