//! Presentation sync: mutate, then fully re-render.
//!
//! `SyncedCart` owns the store and a presenter. Every mutator rebuilds the
//! whole `CartView` and hands it to the presenter before returning, which is
//! the only consistency mechanism between the cart and what is displayed.
//!
//! The payment method is owned by the display. It is read from the presenter
//! at each render and never kept by the cart.

use crate::cart::{CartStore, LineItem, NewItem};
use crate::types::{LineItemId, PaymentMethod};
use crate::view::CartView;

/// A surface that displays the cart.
///
/// Implementations must tolerate being called when nothing is available to
/// draw on; a missing surface is a no-op, never an error.
pub trait CartPresenter {
    /// Replace the displayed line list, total and badge with `view`.
    fn render(&mut self, view: &CartView);

    /// Toggle the visibility of the cart side panel.
    fn toggle_panel(&mut self);

    /// Raw value of the payment-method control, if the surface has one.
    fn payment_selection(&self) -> Option<&str> {
        None
    }
}

/// A presenter with nothing to draw on.
impl CartPresenter for () {
    fn render(&mut self, _view: &CartView) {}

    fn toggle_panel(&mut self) {}
}

impl<P: CartPresenter + ?Sized> CartPresenter for &mut P {
    fn render(&mut self, view: &CartView) {
        (**self).render(view);
    }

    fn toggle_panel(&mut self) {
        (**self).toggle_panel();
    }

    fn payment_selection(&self) -> Option<&str> {
        (**self).payment_selection()
    }
}

/// A cart store kept in sync with its presenter.
#[derive(Debug)]
pub struct SyncedCart<P> {
    store: CartStore,
    presenter: P,
}

impl<P: CartPresenter> SyncedCart<P> {
    /// Start an empty cart and draw it once.
    pub fn new(presenter: P) -> Self {
        let mut cart = Self {
            store: CartStore::new(),
            presenter,
        };
        cart.resync();
        cart
    }

    /// Start an empty cart without drawing it.
    ///
    /// The first draw happens on the first mutation or an explicit `resync`,
    /// for surfaces that are not ready yet.
    pub const fn deferred(presenter: P) -> Self {
        Self {
            store: CartStore::new(),
            presenter,
        }
    }

    /// Add an item, re-render, and open or close the cart panel.
    pub fn add(&mut self, item: NewItem) -> LineItemId {
        let id = self.store.add(item);
        tracing::debug!(line_item_id = %id, "Line item added");
        self.resync();
        self.presenter.toggle_panel();
        id
    }

    /// Remove the line at `index` and re-render.
    ///
    /// Out-of-range indices leave the cart as it was and skip the render.
    pub fn remove_at(&mut self, index: usize) -> Option<LineItem> {
        let removed = self.store.remove_at(index);
        if removed.is_some() {
            self.resync();
        } else {
            tracing::debug!(index, len = self.store.len(), "Ignoring out-of-range removal");
        }
        removed
    }

    /// Empty the cart and re-render.
    pub fn clear(&mut self) {
        self.store.clear();
        self.resync();
    }

    /// Toggle the cart panel without touching the cart.
    pub fn toggle_panel(&mut self) {
        self.presenter.toggle_panel();
    }

    /// Rebuild the view from the store and hand it to the presenter.
    pub fn resync(&mut self) {
        let view = CartView::new(&self.store, self.payment_method());
        self.presenter.render(&view);
    }

    /// The payment method currently selected on the presenter.
    #[must_use]
    pub fn payment_method(&self) -> PaymentMethod {
        PaymentMethod::from_selection(self.presenter.payment_selection())
    }

    /// Read access to the store.
    #[must_use]
    pub const fn store(&self) -> &CartStore {
        &self.store
    }

    #[must_use]
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    pub const fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Give up the cart, returning the store and presenter.
    pub fn into_parts(self) -> (CartStore, P) {
        (self.store, self.presenter)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Price;

    #[derive(Default)]
    struct Recorder {
        renders: Vec<CartView>,
        toggles: usize,
        selection: Option<String>,
    }

    impl CartPresenter for Recorder {
        fn render(&mut self, view: &CartView) {
            self.renders.push(view.clone());
        }

        fn toggle_panel(&mut self) {
            self.toggles += 1;
        }

        fn payment_selection(&self) -> Option<&str> {
            self.selection.as_deref()
        }
    }

    #[test]
    fn test_every_mutation_rerenders() {
        let mut cart = SyncedCart::new(Recorder::default());
        assert_eq!(cart.presenter().renders.len(), 1);

        cart.add(NewItem::simple("Mandazi", Price::new(20)));
        let last = cart.presenter().renders.last().unwrap();
        assert_eq!(last.item_count, 1);
        assert_eq!(last.total, "KSh 20");
        assert_eq!(cart.presenter().toggles, 1);

        cart.remove_at(0);
        assert_eq!(cart.presenter().renders.len(), 3);
        assert!(cart.presenter().renders.last().unwrap().is_empty());

        cart.add(NewItem::simple("Mandazi", Price::new(20)));
        cart.clear();
        assert_eq!(cart.presenter().renders.len(), 5);
        assert_eq!(cart.presenter().renders.last().unwrap().item_count, 0);
    }

    #[test]
    fn test_out_of_range_removal_skips_render() {
        let mut cart = SyncedCart::new(Recorder::default());
        cart.add(NewItem::simple("Mandazi", Price::new(20)));
        let renders = cart.presenter().renders.len();

        assert!(cart.remove_at(3).is_none());
        assert_eq!(cart.presenter().renders.len(), renders);
        assert_eq!(cart.store().len(), 1);
    }

    #[test]
    fn test_unit_presenter_is_noop() {
        let mut cart = SyncedCart::new(());
        cart.add(NewItem::simple("Soda", Price::new(80)));
        assert_eq!(cart.store().grand_total(), Price::new(80));
    }

    #[test]
    fn test_render_reads_payment_selection() {
        let mut cart = SyncedCart::new(Recorder::default());
        assert_eq!(cart.payment_method(), PaymentMethod::Mpesa);

        cart.add(NewItem::simple("Soda", Price::new(80)));
        let last = cart.presenter().renders.last().unwrap();
        assert!(last.panels.mpesa);
        assert_eq!(last.mpesa_amount, 80);

        cart.presenter_mut().selection = Some("bank".to_string());
        cart.add(NewItem::simple("Beef Pilau", Price::new(200)));
        let last = cart.presenter().renders.last().unwrap();
        assert!(last.panels.bank);
        assert!(!last.panels.mpesa);

        // Unknown selections fall back to MPesa.
        cart.presenter_mut().selection = Some("barter".to_string());
        cart.resync();
        assert_eq!(cart.payment_method(), PaymentMethod::Mpesa);
        let last = cart.presenter().renders.last().unwrap();
        assert!(last.panels.mpesa);
        assert_eq!(last.mpesa_amount, 280);
    }

    #[test]
    fn test_deferred_cart_waits_for_first_sync() {
        let mut cart = SyncedCart::deferred(Recorder::default());
        assert!(cart.presenter().renders.is_empty());

        cart.resync();
        assert_eq!(cart.presenter().renders.len(), 1);
    }
}
