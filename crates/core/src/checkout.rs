//! Checkout state machine.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

/// Where a checkout currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutState {
    /// No checkout in progress.
    #[default]
    Idle,

    /// The payment form is open.
    CollectingPayment,

    /// Payment accepted locally; sales are being submitted.
    Submitting,

    /// Every sale was recorded and the cart cleared.
    Succeeded,

    /// Submission failed with the given message; the cart is intact.
    Failed(String),
}

/// Input driving [`CheckoutState`] transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutEvent {
    /// The user asked to check out.
    Begin,

    /// The user closed the payment form.
    Cancel,

    /// A valid payment form was submitted.
    Submit,

    /// Submission finished successfully.
    Completed,

    /// Submission failed.
    Rejected(String),
}

impl Display for CheckoutState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::CollectingPayment => f.write_str("collecting payment"),
            Self::Submitting => f.write_str("submitting"),
            Self::Succeeded => f.write_str("succeeded"),
            Self::Failed(_) => f.write_str("failed"),
        }
    }
}

impl Display for CheckoutEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin => f.write_str("begin"),
            Self::Cancel => f.write_str("cancel"),
            Self::Submit => f.write_str("submit"),
            Self::Completed => f.write_str("completed"),
            Self::Rejected(_) => f.write_str("rejected"),
        }
    }
}

/// Errors raised by checkout transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// `event` is not accepted in state `from`.
    #[error("cannot {event} while {from}")]
    InvalidTransition {
        /// State the event was applied to
        from: CheckoutState,

        /// Rejected event
        event: CheckoutEvent,
    },
}

impl CheckoutState {
    /// Apply `event`, returning the next state.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] when the event is not
    /// accepted in the current state.
    pub fn apply(&self, event: CheckoutEvent) -> Result<Self, CheckoutError> {
        let next = match (self, &event) {
            (Self::Idle | Self::Succeeded | Self::Failed(_), CheckoutEvent::Begin) => {
                Self::CollectingPayment
            }
            (
                Self::CollectingPayment | Self::Succeeded | Self::Failed(_),
                CheckoutEvent::Cancel,
            ) => Self::Idle,
            (Self::CollectingPayment | Self::Failed(_), CheckoutEvent::Submit) => Self::Submitting,
            (Self::Submitting, CheckoutEvent::Completed) => Self::Succeeded,
            (Self::Submitting, CheckoutEvent::Rejected(message)) => Self::Failed(message.clone()),
            _ => {
                return Err(CheckoutError::InvalidTransition {
                    from: self.clone(),
                    event,
                });
            }
        };

        Ok(next)
    }

    /// Whether the payment form is showing (collecting, submitting or failed).
    pub fn is_form_open(&self) -> bool {
        matches!(
            self,
            Self::CollectingPayment | Self::Submitting | Self::Failed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn happy_path() -> TestResult {
        let state = CheckoutState::Idle
            .apply(CheckoutEvent::Begin)?
            .apply(CheckoutEvent::Submit)?
            .apply(CheckoutEvent::Completed)?;

        assert_eq!(state, CheckoutState::Succeeded);
        assert!(!state.is_form_open());

        Ok(())
    }

    #[test]
    fn cancel_returns_to_idle() -> TestResult {
        let state = CheckoutState::Idle
            .apply(CheckoutEvent::Begin)?
            .apply(CheckoutEvent::Cancel)?;

        assert_eq!(state, CheckoutState::Idle);

        Ok(())
    }

    #[test]
    fn failure_allows_resubmission() -> TestResult {
        let failed = CheckoutState::Submitting.apply(CheckoutEvent::Rejected("boom".to_string()))?;

        assert_eq!(failed, CheckoutState::Failed("boom".to_string()));
        assert!(failed.is_form_open());
        assert_eq!(failed.apply(CheckoutEvent::Submit)?, CheckoutState::Submitting);

        Ok(())
    }

    #[test]
    fn cannot_submit_from_idle() {
        let result = CheckoutState::Idle.apply(CheckoutEvent::Submit);

        assert_eq!(
            result,
            Err(CheckoutError::InvalidTransition {
                from: CheckoutState::Idle,
                event: CheckoutEvent::Submit,
            })
        );
    }

    #[test]
    fn cannot_cancel_while_submitting() {
        let result = CheckoutState::Submitting.apply(CheckoutEvent::Cancel);

        assert!(result.is_err(), "submission cannot be cancelled");
    }

    #[test]
    fn transition_error_message() {
        let error = CheckoutState::Idle
            .apply(CheckoutEvent::Completed)
            .err()
            .map(|error| error.to_string());

        assert_eq!(error.as_deref(), Some("cannot completed while idle"));
    }
}
