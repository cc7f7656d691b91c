//! Checkout orchestration.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use jiff::{Zoned, civil::Date};
use mockall::automock;
use reptitrack::{
    checkout::{CheckoutError, CheckoutEvent, CheckoutState},
    payment::{CardDetails, PaymentErrors, validate},
};
use thiserror::Error;
use tokio::{sync::watch, time::sleep};
use tracing::{debug, info, warn};

use crate::cart::{CartStore, PurchaseError, PurchaseOutcome, PurchaseReport};

/// Default simulated payment processing time.
pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_secs(2);

/// Failure recorded when a submission is abandoned before it resolves.
pub const PAYMENT_INTERRUPTED: &str = "payment interrupted";

/// Source of the current calendar date for expiry checks.
#[automock]
pub trait Clock: Send + Sync {
    /// Today's date.
    fn today(&self) -> Date;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        Zoned::now().date()
    }
}

#[derive(Debug, Error)]
pub enum CheckoutFlowError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("a payment is already being submitted")]
    Busy,

    #[error("payment details are invalid")]
    Invalid(#[source] PaymentErrors),

    #[error(transparent)]
    Transition(#[from] CheckoutError),

    #[error("purchase failed")]
    Purchase(#[from] PurchaseError),
}

/// Drives a checkout from payment entry to the recorded purchase.
pub struct CheckoutFlow {
    state: watch::Sender<CheckoutState>,
    submitting: AtomicBool,
    store: Arc<CartStore>,
    clock: Arc<dyn Clock>,
    payment_delay: Duration,
}

impl CheckoutFlow {
    #[must_use]
    pub fn new(store: Arc<CartStore>, clock: Arc<dyn Clock>, payment_delay: Duration) -> Self {
        let (state, _) = watch::channel(CheckoutState::Idle);

        Self {
            state,
            submitting: AtomicBool::new(false),
            store,
            clock,
            payment_delay,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CheckoutState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> CheckoutState {
        self.state.borrow().clone()
    }

    /// Open the payment step.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart is empty or a checkout is being submitted.
    pub fn begin(&self) -> Result<CheckoutState, CheckoutFlowError> {
        if self.store.snapshot().is_empty() {
            return Err(CheckoutFlowError::EmptyCart);
        }

        Ok(self.transition(CheckoutEvent::Begin)?)
    }

    /// Close the payment step without side effects.
    ///
    /// # Errors
    ///
    /// Returns an error while a payment is being submitted.
    pub fn cancel(&self) -> Result<CheckoutState, CheckoutFlowError> {
        Ok(self.transition(CheckoutEvent::Cancel)?)
    }

    /// Validate `details`, simulate the payment and record the purchase.
    ///
    /// The card details are dropped as soon as they have been validated.
    ///
    /// # Errors
    ///
    /// - [`CheckoutFlowError::Busy`]: another submission is running.
    /// - [`CheckoutFlowError::Invalid`]: a payment field failed validation.
    /// - [`CheckoutFlowError::EmptyCart`]: the cart was emptied before the
    ///   purchase was recorded.
    /// - [`CheckoutFlowError::Purchase`]: the cart store could not record
    ///   every sale.
    pub async fn submit(&self, details: CardDetails) -> Result<PurchaseReport, CheckoutFlowError> {
        let _submission = Submission::acquire(&self.submitting).ok_or(CheckoutFlowError::Busy)?;

        self.state.borrow().apply(CheckoutEvent::Submit)?;

        let validation = validate(&details, self.clock.today());
        drop(details);

        if let Err(errors) = validation {
            debug!(invalid = errors.len(), "payment details rejected");

            return Err(CheckoutFlowError::Invalid(errors));
        }

        self.transition(CheckoutEvent::Submit)?;
        let _interrupted = Interrupted(self);

        info!(delay = ?self.payment_delay, "processing payment");
        sleep(self.payment_delay).await;

        match self.store.confirm_purchase().await {
            Ok(PurchaseOutcome::Completed(report)) => {
                self.transition(CheckoutEvent::Completed)?;

                Ok(report)
            }
            Ok(PurchaseOutcome::Empty) => {
                let error = CheckoutFlowError::EmptyCart;
                self.transition(CheckoutEvent::Rejected(error.to_string()))?;

                Err(error)
            }
            Err(error) => {
                self.transition(CheckoutEvent::Rejected(error.to_string()))?;

                Err(error.into())
            }
        }
    }

    fn transition(&self, event: CheckoutEvent) -> Result<CheckoutState, CheckoutError> {
        let mut result = Ok(CheckoutState::Idle);

        self.state.send_if_modified(|state| match state.apply(event) {
            Ok(next) => {
                debug!(from = %state, to = %next, "checkout transition");
                *state = next.clone();
                result = Ok(next);

                true
            }
            Err(error) => {
                result = Err(error);

                false
            }
        });

        result
    }
}

impl fmt::Debug for CheckoutFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutFlow")
            .field("state", &*self.state.borrow())
            .field("submitting", &self.submitting.load(Ordering::Relaxed))
            .field("payment_delay", &self.payment_delay)
            .finish_non_exhaustive()
    }
}

/// Fails a submission that is dropped while still `Submitting`.
struct Interrupted<'a>(&'a CheckoutFlow);

impl Drop for Interrupted<'_> {
    fn drop(&mut self) {
        if self
            .0
            .transition(CheckoutEvent::Rejected(PAYMENT_INTERRUPTED.to_string()))
            .is_ok()
        {
            warn!("payment submission interrupted");
        }
    }
}

/// Holds the single submission slot until dropped.
struct Submission<'a>(&'a AtomicBool);

impl<'a> Submission<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
