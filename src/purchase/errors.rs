//! Purchase errors.

use thiserror::Error;

use crate::gateway::GatewayError;

use super::flow::FlowState;

/// Errors raised by the purchase wizard and submission.
#[derive(Debug, Error)]
pub enum PurchaseError {
    /// A wizard step was taken out of order.
    #[error("expected the {expected} step, the wizard is at {actual}")]
    OutOfOrder {
        /// Step the wizard would have accepted.
        expected: FlowState,

        /// Step the wizard is actually at.
        actual: FlowState,
    },

    /// Confirmation with nothing selected.
    #[error("no package selected")]
    NoSelection,

    /// Backend call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
