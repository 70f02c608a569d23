use super::catalog::CatalogCache;
use crate::config::{CatalogConsistency, PosConfig};
use crate::domain::cart::{Cart, Quantity};
use crate::domain::checkout::{CheckoutFlow, CheckoutState, PaymentMethod, PaymentOutcome};
use crate::domain::draft::NewProductDraft;
use crate::domain::ports::CatalogGatewayBox;
use crate::domain::product::{EntryPolicy, Product, ProductId};
use crate::domain::selection::QuantitySelector;
use crate::error::{PosError, Result};
use tracing::{error, info, warn};

/// What happened when a product on the grid was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Added,
    AwaitingQuantity,
}

/// One till's screen: the catalog, the sale in progress and its dialogs.
///
/// Every state change happens through `&mut self`, one interaction at a time.
/// Network failures are logged and swallowed here; callers get a `bool` back
/// to know whether anything changed.
pub struct PosSession {
    catalog: CatalogCache,
    cart: Cart,
    checkout: CheckoutFlow,
    selection: Option<QuantitySelector>,
    consistency: CatalogConsistency,
}

impl PosSession {
    pub fn new(gateway: CatalogGatewayBox, config: &PosConfig) -> Self {
        Self {
            catalog: CatalogCache::new(gateway, config.images.clone()),
            cart: Cart::new(),
            checkout: CheckoutFlow::new(),
            selection: None,
            consistency: config.consistency,
        }
    }

    pub fn catalog(&self) -> &CatalogCache {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn checkout_state(&self) -> CheckoutState {
        self.checkout.state()
    }

    pub fn selection(&self) -> Option<&QuantitySelector> {
        self.selection.as_ref()
    }

    /// Loads (or reloads) the product list. On failure the previous list stays.
    pub async fn load_catalog(&mut self) -> bool {
        match self.catalog.refresh().await {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, "Error fetching products");
                false
            }
        }
    }

    pub fn add_to_cart(&mut self, product: &Product, quantity: Quantity) {
        self.cart = std::mem::take(&mut self.cart).add(product, quantity);
    }

    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.cart = std::mem::take(&mut self.cart).remove(id);
    }

    pub fn total_price(&self) -> String {
        self.cart.total_price()
    }

    /// Taps a product on the grid. Crema opens the quantity selector, the
    /// rest go straight into the cart with one unit.
    pub fn select_product(&mut self, id: ProductId) -> Result<Selection> {
        let product = self
            .catalog
            .get(id)
            .cloned()
            .ok_or(PosError::UnknownProduct(id))?;

        match product.categoria.entry_policy() {
            EntryPolicy::Direct => {
                self.add_to_cart(&product, Quantity::ONE);
                Ok(Selection::Added)
            }
            EntryPolicy::QuantitySelection => {
                self.selection = Some(QuantitySelector::new(product));
                Ok(Selection::AwaitingQuantity)
            }
        }
    }

    fn selector_mut(&mut self) -> Result<&mut QuantitySelector> {
        self.selection
            .as_mut()
            .ok_or(PosError::InvalidState("no product awaiting a quantity"))
    }

    pub fn increment_selection(&mut self) -> Result<Quantity> {
        Ok(self.selector_mut()?.increment())
    }

    pub fn decrement_selection(&mut self) -> Result<Quantity> {
        Ok(self.selector_mut()?.decrement())
    }

    pub fn set_selection_quantity(&mut self, value: u32) -> Result<Quantity> {
        Ok(self.selector_mut()?.set(value))
    }

    /// Adds the product being picked with the chosen quantity and closes the selector.
    pub fn confirm_selection(&mut self) -> Result<()> {
        let (product, quantity) = self
            .selection
            .take()
            .ok_or(PosError::InvalidState("no product awaiting a quantity"))?
            .into_parts();
        self.add_to_cart(&product, quantity);
        Ok(())
    }

    pub fn dismiss_selection(&mut self) {
        self.selection = None;
    }

    /// Rings up `quantity` units of a product the way a cashier would tap them in.
    ///
    /// Repeated taps on a direct product merge into one line, so the units
    /// after the first are added in a single step.
    pub fn ring_up(&mut self, id: ProductId, quantity: Quantity) -> Result<()> {
        match self.select_product(id)? {
            Selection::AwaitingQuantity => {
                self.set_selection_quantity(quantity.get())?;
                self.confirm_selection()
            }
            Selection::Added => {
                if let Ok(rest) = Quantity::new(quantity.get() - 1) {
                    let product = self
                        .catalog
                        .get(id)
                        .cloned()
                        .ok_or(PosError::UnknownProduct(id))?;
                    self.add_to_cart(&product, rest);
                }
                Ok(())
            }
        }
    }

    pub fn open_payment(&mut self) -> Result<()> {
        self.checkout.open(&self.cart)
    }

    pub fn close_payment(&mut self) {
        self.checkout.cancel();
    }

    /// Records the payment method and starts a fresh sale.
    pub fn pay(&mut self, method: PaymentMethod) -> Result<PaymentOutcome> {
        let outcome = self.checkout.pay(method, &mut self.cart)?;
        info!(
            method = %outcome.method,
            total = %outcome.total,
            items = outcome.items,
            "Pago realizado con {}. Total: S/ {}",
            outcome.method,
            outcome.total
        );
        Ok(outcome)
    }

    /// Sends `draft` to the catalog.
    ///
    /// On success the catalog is reloaded and the draft emptied. On failure the
    /// draft is kept as typed so it can be sent again.
    pub async fn submit_draft(&mut self, draft: &mut NewProductDraft) -> bool {
        if let Err(e) = self.catalog.gateway().create_product(draft).await {
            error!(error = %e, nombre = %draft.nombre, "Error adding product");
            return false;
        }

        self.refresh_until_visible(draft).await;
        draft.reset();
        true
    }

    /// The catalog may accept a write before it serves it back, so look for
    /// the new product a bounded number of times.
    async fn refresh_until_visible(&mut self, draft: &NewProductDraft) {
        let attempts = self.consistency.attempts.max(1);
        for attempt in 1..=attempts {
            if self.load_catalog().await
                && self.catalog.products().iter().any(|p| draft.describes(p))
            {
                return;
            }
            if attempt < attempts {
                tokio::time::sleep(self.consistency.delay).await;
            }
        }
        warn!(
            nombre = %draft.nombre,
            attempts,
            "created product not visible in catalog yet"
        );
    }
}
