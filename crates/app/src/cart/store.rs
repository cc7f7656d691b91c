//! Cart store.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use futures::future::join_all;
use jiff::Timestamp;
use reptitrack::{
    cart::{Cart, CartError, QuantityUpdate},
    products::{Product, ProductId},
    sales::SaleRequest,
};
use rusty_money::{Money, iso::Currency};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    auth::Identity,
    cart::{
        notice::Notice,
        report::{LineOutcome, LineResult, PurchaseError, PurchaseOutcome, PurchaseReport},
    },
    domain::sales::SalesService,
};

/// Notice shown after every sale was recorded.
pub const PURCHASE_SUCCEEDED: &str = "Purchase completed successfully!";

/// Notice shown when any sale could not be recorded.
pub const PURCHASE_FAILED: &str = "Could not complete the purchase. Please try again.";

/// Notice shown when nobody is signed in at checkout.
pub const USER_NOT_IDENTIFIED: &str = "User not identified";

/// Cart store behaviour knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSettings {
    /// How long an error notice stays up.
    pub error_ttl: Duration,

    /// How long a success notice stays up.
    pub success_ttl: Duration,

    /// After a partial failure keep only the lines that failed, instead of
    /// leaving the cart exactly as it was.
    pub retain_failed_only: bool,
}

impl Default for CartSettings {
    fn default() -> Self {
        Self {
            error_ttl: Duration::from_secs(5),
            success_ttl: Duration::from_secs(3),
            retain_failed_only: false,
        }
    }
}

/// The in-session cart, published to any number of subscribers.
///
/// The store is the only writer of its channels. Every channel replays its
/// latest value to new subscribers.
pub struct CartStore {
    cart: watch::Sender<Cart>,
    in_flight: watch::Sender<bool>,
    purchases: AtomicUsize,
    error: Arc<Notice>,
    success: Arc<Notice>,
    sales: Arc<dyn SalesService>,
    identity: Arc<dyn Identity>,
    settings: CartSettings,
}

impl CartStore {
    #[must_use]
    pub fn new(
        sales: Arc<dyn SalesService>,
        identity: Arc<dyn Identity>,
        currency: &'static Currency,
        settings: CartSettings,
    ) -> Self {
        let (cart, _) = watch::channel(Cart::new(currency));
        let (in_flight, _) = watch::channel(false);

        Self {
            cart,
            in_flight,
            purchases: AtomicUsize::new(0),
            error: Notice::new(settings.error_ttl),
            success: Notice::new(settings.success_ttl),
            sales,
            identity,
            settings,
        }
    }

    pub fn subscribe_cart(&self) -> watch::Receiver<Cart> {
        self.cart.subscribe()
    }

    pub fn subscribe_in_flight(&self) -> watch::Receiver<bool> {
        self.in_flight.subscribe()
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }

    pub fn subscribe_success(&self) -> watch::Receiver<Option<String>> {
        self.success.subscribe()
    }

    /// Whether a purchase is being submitted.
    pub fn in_flight(&self) -> bool {
        *self.in_flight.borrow()
    }

    /// Current error notice.
    pub fn error(&self) -> Option<String> {
        self.error.current()
    }

    /// Current success notice.
    pub fn success(&self) -> Option<String> {
        self.success.current()
    }

    /// Copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.cart.borrow().clone()
    }

    /// Add `quantity` units of `product` and announce it.
    ///
    /// Returns the resulting quantity of the product's line.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the cart untouched, when `quantity` is zero
    /// or the product is priced in another currency.
    pub fn add_to_cart(&self, product: Product, quantity: u32) -> Result<u32, CartError> {
        let name = product.name.clone();
        let product_id = product.id;
        let mut added = Ok(0);

        self.cart.send_if_modified(|cart| {
            added = cart.add(product, quantity);

            added.is_ok()
        });

        let total = added.inspect_err(|error| debug!(%product_id, %error, "add to cart rejected"))?;

        debug!(%product_id, quantity, total, "added to cart");
        self.success.show(format!("{name} added to cart"));

        Ok(total)
    }

    /// Remove the product's line; absent products are ignored.
    pub fn remove_from_cart(&self, product_id: ProductId) {
        self.cart.send_if_modified(|cart| {
            let removed = cart.remove(product_id).is_some();

            if removed {
                debug!(%product_id, "removed from cart");
            }

            removed
        });
    }

    /// Set the product's quantity; below one removes the line.
    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) -> QuantityUpdate {
        let mut update = QuantityUpdate::NotInCart;

        self.cart.send_if_modified(|cart| {
            update = cart.update_quantity(product_id, quantity);

            update != QuantityUpdate::NotInCart
        });

        debug!(%product_id, quantity, ?update, "cart quantity updated");

        update
    }

    pub fn clear_cart(&self) {
        self.cart.send_if_modified(|cart| {
            let changed = !cart.is_empty();
            cart.clear();

            changed
        });
    }

    /// Total price of the cart, recomputed from its lines.
    pub fn total(&self) -> Money<'static, Currency> {
        self.cart.borrow().total()
    }

    /// Number of units in the cart.
    pub fn items_count(&self) -> u64 {
        self.cart.borrow().item_count()
    }

    /// Record one sale per cart line, submitting them all at once.
    ///
    /// When every sale is recorded the purchased quantities are taken out of
    /// the cart, leaving anything added meanwhile. Otherwise the cart keeps
    /// its lines (or only the failed ones, with
    /// [`CartSettings::retain_failed_only`]) and a single error notice is
    /// published.
    ///
    /// # Errors
    ///
    /// - [`PurchaseError::NotIdentified`]: nobody is signed in.
    /// - [`PurchaseError::Partial`]: at least one sale was not recorded.
    pub async fn confirm_purchase(&self) -> Result<PurchaseOutcome, PurchaseError> {
        let cart = self.snapshot();

        if cart.is_empty() {
            return Ok(PurchaseOutcome::Empty);
        }

        self.error.clear();
        self.success.clear();

        let Some(user) = self.identity.current_user() else {
            warn!("purchase attempted without an identified user");
            self.error.show(USER_NOT_IDENTIFIED);

            return Err(PurchaseError::NotIdentified);
        };

        let report = {
            let _in_flight = InFlight::start(&self.in_flight, &self.purchases);
            let sale_date = Timestamp::now();

            info!(
                client_id = %user.id,
                lines = cart.len(),
                total = %cart.total(),
                "submitting purchase"
            );

            let submissions = cart
                .lines()
                .iter()
                .map(|line| self.sales.create_sale(SaleRequest::for_line(&user.id, line, sale_date)));

            let results = join_all(submissions).await;

            PurchaseReport::new(
                cart.lines()
                    .iter()
                    .zip(results)
                    .map(|(line, result)| {
                        let product_id = line.product().id;

                        let outcome = match result {
                            Ok(()) => LineOutcome::Succeeded,
                            Err(error) => {
                                warn!(%product_id, %error, "sale was not recorded");

                                LineOutcome::Failed(error.reason())
                            }
                        };

                        LineResult {
                            product_id,
                            quantity: line.quantity(),
                            outcome,
                        }
                    })
                    .collect(),
            )
        };

        if report.is_complete() {
            self.deduct(report.lines());
            self.success.show(PURCHASE_SUCCEEDED);

            info!(client_id = %user.id, lines = report.lines().len(), "purchase completed");

            return Ok(PurchaseOutcome::Completed(report));
        }

        if self.settings.retain_failed_only {
            self.deduct(report.succeeded());
        }

        info!(
            client_id = %user.id,
            failed = report.failed().count(),
            lines = report.lines().len(),
            "purchase failed"
        );

        self.error.show(PURCHASE_FAILED);

        Err(PurchaseError::Partial(report))
    }

    /// Take purchased quantities out of the live cart.
    fn deduct<'a>(&self, lines: impl IntoIterator<Item = &'a LineResult>) {
        self.cart.send_modify(|cart| {
            for line in lines {
                cart.deduct(line.product_id, line.quantity);
            }
        });
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &*self.cart.borrow())
            .field("in_flight", &*self.in_flight.borrow())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Counts one running purchase; the flag stays up while any purchase runs.
///
/// The counter only changes inside the watch lock so the flag always matches it.
struct InFlight<'a> {
    flag: &'a watch::Sender<bool>,
    purchases: &'a AtomicUsize,
}

impl<'a> InFlight<'a> {
    fn start(flag: &'a watch::Sender<bool>, purchases: &'a AtomicUsize) -> Self {
        flag.send_if_modified(|busy| {
            purchases.fetch_add(1, Ordering::SeqCst);

            !std::mem::replace(busy, true)
        });

        Self { flag, purchases }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.send_if_modified(|busy| {
            if self.purchases.fetch_sub(1, Ordering::SeqCst) != 1 {
                return false;
            }

            std::mem::replace(busy, false)
        });
    }
}
