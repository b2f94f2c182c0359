//! Purchase submission.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::gateway::client::BackendApi;
use crate::session::models::Identity;

use super::errors::PurchaseError;
use super::flow::PurchaseFlow;

/// Drives a confirmed wizard selection through backend submission.
pub struct PurchaseService {
    gateway: Arc<dyn BackendApi>,
}

impl fmt::Debug for PurchaseService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PurchaseService").finish_non_exhaustive()
    }
}

impl PurchaseService {
    /// Creates the service on top of a backend gateway.
    #[must_use]
    pub fn new(gateway: Arc<dyn BackendApi>) -> Self {
        Self { gateway }
    }

    /// Confirms the wizard and submits the composed request.
    ///
    /// Success leaves the wizard `Completed`. A rejected call and a transport
    /// failure are treated identically: the wizard is left `Failed` and the
    /// message is carried in the returned error.
    ///
    /// # Errors
    ///
    /// Returns an error when the wizard cannot confirm or the backend call
    /// fails.
    pub async fn submit(
        &self,
        user: &Identity,
        flow: &mut PurchaseFlow,
    ) -> Result<(), PurchaseError> {
        let order = flow.confirm()?;

        info!(
            package = %order.package_code,
            count = order.count,
            period_num = order.period_num,
            "submitting purchase"
        );

        match self.gateway.buy(user, &order).await {
            Ok(()) => {
                flow.complete();

                Ok(())
            }
            Err(error) => {
                flow.fail();

                Err(error.into())
            }
        }
    }
}
