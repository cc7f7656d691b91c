//! Purchase results.

use reptitrack::products::ProductId;
use thiserror::Error;

/// What happened to one cart line during a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Succeeded,
    Failed(String),
}

/// Submission result for one cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineResult {
    pub product_id: ProductId,
    pub quantity: u32,
    pub outcome: LineOutcome,
}

impl LineResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, LineOutcome::Succeeded)
    }
}

/// Per-line results of a purchase, in cart order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseReport {
    lines: Vec<LineResult>,
}

impl PurchaseReport {
    pub(crate) fn new(lines: Vec<LineResult>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[LineResult] {
        &self.lines
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &LineResult> {
        self.lines.iter().filter(|line| line.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &LineResult> {
        self.lines.iter().filter(|line| !line.is_success())
    }

    /// Whether every line was recorded.
    pub fn is_complete(&self) -> bool {
        self.lines.iter().all(LineResult::is_success)
    }
}

/// Result of a purchase that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Nothing to buy; no request was made.
    Empty,

    /// Every line was recorded and the cart cleared.
    Completed(PurchaseReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("user not identified")]
    NotIdentified,

    #[error("{} of {} cart line(s) could not be purchased", .0.failed().count(), .0.lines().len())]
    Partial(PurchaseReport),
}
