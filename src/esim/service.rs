//! `eSIM` lifecycle service.
//!
//! Every mutating action re-fetches the full listing afterwards instead of
//! patching local state, trading one extra round trip for display freshness.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use rustc_hash::FxHashSet;
use tracing::info;

use crate::catalog::{Package, scope};
use crate::gateway::client::BackendApi;
use crate::session::models::Identity;

use super::errors::EsimServiceError;
use super::models::{EsimRecord, TopupOrder};
use super::status::{ActionKind, can_cancel, can_delete, can_refresh, can_top_up, sort_by_status};

/// Lifecycle operations over the signed-in user's `eSIMs`.
pub struct EsimService {
    gateway: Arc<dyn BackendApi>,
    pending: Mutex<FxHashSet<(String, ActionKind)>>,
}

impl fmt::Debug for EsimService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EsimService").finish_non_exhaustive()
    }
}

impl EsimService {
    /// Creates the service on top of a backend gateway.
    #[must_use]
    pub fn new(gateway: Arc<dyn BackendApi>) -> Self {
        Self {
            gateway,
            pending: Mutex::new(FxHashSet::default()),
        }
    }

    /// Fetches the user's `eSIMs` ordered freshest first.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails.
    pub async fn list(&self, user: &Identity) -> Result<Vec<EsimRecord>, EsimServiceError> {
        let mut records = self.gateway.my_esims(user).await?;

        sort_by_status(&mut records);

        Ok(records)
    }

    /// Finds one record by ICCID.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails or no record matches.
    pub async fn find(&self, user: &Identity, iccid: &str) -> Result<EsimRecord, EsimServiceError> {
        let records = self.gateway.my_esims(user).await?;

        records
            .into_iter()
            .find(|record| record.iccid == iccid)
            .ok_or_else(|| EsimServiceError::UnknownIccid(iccid.to_owned()))
    }

    /// Revokes a not-yet-activated `eSIM` and returns the refreshed listing.
    ///
    /// # Errors
    ///
    /// Returns an error when the record is unknown, its status forbids
    /// cancellation, the same action is already running, or a backend call
    /// fails.
    pub async fn cancel(
        &self,
        user: &Identity,
        iccid: &str,
    ) -> Result<Vec<EsimRecord>, EsimServiceError> {
        let record = self.find(user, iccid).await?;
        let status = record.status();

        if !can_cancel(status) {
            return Err(EsimServiceError::NotPermitted {
                action: ActionKind::Cancel,
                status,
            });
        }

        let tran_no = record
            .tran_no()
            .ok_or_else(|| EsimServiceError::MissingTranNo(iccid.to_owned()))?
            .to_owned();

        {
            let _guard = self.begin(iccid, ActionKind::Cancel)?;

            info!(iccid, "cancelling eSIM");
            self.gateway.cancel(user, iccid, &tran_no).await?;
        }

        self.list(user).await
    }

    /// Removes a finished `eSIM` from the listing and returns the refreshed
    /// listing.
    ///
    /// # Errors
    ///
    /// Returns an error when the record is unknown, its status forbids
    /// deletion, the same action is already running, or a backend call fails.
    pub async fn delete(
        &self,
        user: &Identity,
        iccid: &str,
    ) -> Result<Vec<EsimRecord>, EsimServiceError> {
        let record = self.find(user, iccid).await?;
        let status = record.status();

        if !can_delete(status) {
            return Err(EsimServiceError::NotPermitted {
                action: ActionKind::Delete,
                status,
            });
        }

        {
            let _guard = self.begin(iccid, ActionKind::Delete)?;

            info!(iccid, "deleting eSIM");
            self.gateway.delete(user, iccid).await?;
        }

        self.list(user).await
    }

    /// Lists top-up offers for one `eSIM`, cheapest first.
    ///
    /// # Errors
    ///
    /// Returns an error when the record is unknown, it cannot be topped up,
    /// or a backend call fails.
    pub async fn topup_offers(
        &self,
        user: &Identity,
        iccid: &str,
    ) -> Result<Vec<Package>, EsimServiceError> {
        let record = self.find(user, iccid).await?;

        if !can_top_up(&record) {
            return Err(EsimServiceError::NotPermitted {
                action: ActionKind::TopUp,
                status: record.status(),
            });
        }

        let mut offers = self.gateway.topup_packages(user, iccid).await?;

        scope::sort_by_retail_price(&mut offers);

        Ok(offers)
    }

    /// Applies one top-up package and returns the refreshed listing.
    ///
    /// # Errors
    ///
    /// Returns an error when the record is unknown, it cannot be topped up,
    /// it has no transaction number, the same action is already running, or a
    /// backend call fails.
    pub async fn topup(
        &self,
        user: &Identity,
        iccid: &str,
        package: &Package,
    ) -> Result<Vec<EsimRecord>, EsimServiceError> {
        let record = self.find(user, iccid).await?;

        if !can_top_up(&record) {
            return Err(EsimServiceError::NotPermitted {
                action: ActionKind::TopUp,
                status: record.status(),
            });
        }

        let tran_no = record
            .tran_no()
            .ok_or_else(|| EsimServiceError::MissingTranNo(iccid.to_owned()))?
            .to_owned();

        let order = TopupOrder {
            tran_no,
            package_code: package.package_code.clone(),
            amount: package.price,
        };

        {
            let _guard = self.begin(iccid, ActionKind::TopUp)?;

            info!(iccid, package = %order.package_code, "applying top-up");
            self.gateway.topup(user, &order).await?;
        }

        self.list(user).await
    }

    /// Re-reads one actively used record so its usage figures are current.
    ///
    /// # Errors
    ///
    /// Returns an error when the record is unknown, it is not in use, or a
    /// backend call fails.
    pub async fn refresh(
        &self,
        user: &Identity,
        iccid: &str,
    ) -> Result<EsimRecord, EsimServiceError> {
        let record = self.find(user, iccid).await?;
        let status = record.status();

        if !can_refresh(status) {
            return Err(EsimServiceError::NotPermitted {
                action: ActionKind::Refresh,
                status,
            });
        }

        self.find(user, iccid).await
    }

    /// Marks an action as running for one record, so a double-tap cannot
    /// submit it twice.
    fn begin(&self, iccid: &str, action: ActionKind) -> Result<PendingGuard<'_>, EsimServiceError> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);

        if !pending.insert((iccid.to_owned(), action)) {
            return Err(EsimServiceError::AlreadyPending {
                iccid: iccid.to_owned(),
                action,
            });
        }

        Ok(PendingGuard {
            service: self,
            key: (iccid.to_owned(), action),
        })
    }
}

struct PendingGuard<'a> {
    service: &'a EsimService,
    key: (String, ActionKind),
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut pending = self
            .service
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        pending.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::gateway::client::MockBackendApi;

    use super::super::models::PackageApplication;
    use super::super::status::CanonicalStatus;
    use super::*;

    fn user(id: i64) -> Identity {
        Identity {
            id,
            telegram_id: None,
            first_name: String::new(),
            last_name: None,
            username: None,
            photo_url: None,
        }
    }

    fn record(iccid: &str, smdp: &str, esim: &str, top_up_type: i64) -> EsimRecord {
        EsimRecord {
            iccid: iccid.to_owned(),
            esim_status: esim.to_owned(),
            smdp_status: smdp.to_owned(),
            order_usage: 0,
            total_volume: 0,
            expired_time: None,
            qr_code_url: None,
            esim_tran_no: Some(format!("T-{iccid}")),
            package_list: vec![PackageApplication {
                package_name: "pkg".to_owned(),
                create_time: None,
                support_top_up_type: top_up_type,
                esim_tran_no: None,
            }],
        }
    }

    fn offer(code: &str, retail: u64) -> Package {
        Package {
            package_code: code.to_owned(),
            slug: String::new(),
            name: code.to_owned(),
            price: retail,
            retail_price: retail,
            volume: 0,
            duration: 7,
            duration_unit: "DAY".to_owned(),
            support_top_up_type: 2,
            location: None,
            location_network_list: Vec::new(),
        }
    }

    #[tokio::test]
    async fn listing_orders_fresh_profiles_first() -> TestResult {
        let mut gateway = MockBackendApi::new();
        gateway.expect_my_esims().returning(|_| {
            Ok(vec![
                record("dead", "DISABLED", "USED_UP", 0),
                record("fresh", "RELEASED", "GOT_RESOURCE", 0),
            ])
        });

        let service = EsimService::new(Arc::new(gateway));
        let records = service.list(&user(1)).await?;

        let order: Vec<&str> = records.iter().map(|r| r.iccid.as_str()).collect();

        assert_eq!(order, ["fresh", "dead"]);

        Ok(())
    }

    #[tokio::test]
    async fn finding_an_unknown_iccid_fails() {
        let mut gateway = MockBackendApi::new();
        gateway.expect_my_esims().returning(|_| Ok(Vec::new()));

        let service = EsimService::new(Arc::new(gateway));
        let result = service.find(&user(1), "891030").await;

        assert!(
            matches!(result, Err(EsimServiceError::UnknownIccid(_))),
            "expected UnknownIccid, got {result:?}"
        );
    }

    #[tokio::test]
    async fn cancel_submits_the_transaction_number_and_refetches() -> TestResult {
        let mut gateway = MockBackendApi::new();
        gateway
            .expect_my_esims()
            .times(2)
            .returning(|_| Ok(vec![record("891030", "RELEASED", "GOT_RESOURCE", 0)]));
        gateway
            .expect_cancel()
            .times(1)
            .withf(|caller, iccid, tran_no| {
                caller.id == 1 && iccid == "891030" && tran_no == "T-891030"
            })
            .returning(|_, _, _| Ok(()));

        let service = EsimService::new(Arc::new(gateway));
        let records = service.cancel(&user(1), "891030").await?;

        assert_eq!(records.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn cancel_is_denied_for_an_active_profile() {
        let mut gateway = MockBackendApi::new();
        gateway
            .expect_my_esims()
            .returning(|_| Ok(vec![record("891030", "ENABLED", "IN_USE", 0)]));

        let service = EsimService::new(Arc::new(gateway));
        let result = service.cancel(&user(1), "891030").await;

        assert!(
            matches!(
                result,
                Err(EsimServiceError::NotPermitted {
                    action: ActionKind::Cancel,
                    status: CanonicalStatus::InUse,
                })
            ),
            "expected NotPermitted, got {result:?}"
        );
    }

    #[tokio::test]
    async fn cancel_needs_a_transaction_number() {
        let mut gateway = MockBackendApi::new();
        gateway.expect_my_esims().returning(|_| {
            let mut fresh = record("891030", "RELEASED", "GOT_RESOURCE", 0);
            fresh.esim_tran_no = None;
            fresh.package_list.clear();
            Ok(vec![fresh])
        });

        let service = EsimService::new(Arc::new(gateway));
        let result = service.cancel(&user(1), "891030").await;

        assert!(
            matches!(result, Err(EsimServiceError::MissingTranNo(_))),
            "expected MissingTranNo, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_is_denied_outside_terminal_states() {
        let mut gateway = MockBackendApi::new();
        gateway
            .expect_my_esims()
            .returning(|_| Ok(vec![record("891030", "ENABLED", "IN_USE", 0)]));

        let service = EsimService::new(Arc::new(gateway));
        let result = service.delete(&user(1), "891030").await;

        assert!(
            matches!(
                result,
                Err(EsimServiceError::NotPermitted {
                    action: ActionKind::Delete,
                    ..
                })
            ),
            "expected NotPermitted, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_removes_a_depleted_profile() -> TestResult {
        let mut gateway = MockBackendApi::new();
        gateway
            .expect_my_esims()
            .times(2)
            .returning(|_| Ok(vec![record("891030", "DISABLED", "USED_UP", 0)]));
        gateway
            .expect_delete()
            .times(1)
            .withf(|_, iccid| iccid == "891030")
            .returning(|_, _| Ok(()));

        let service = EsimService::new(Arc::new(gateway));
        service.delete(&user(1), "891030").await?;

        Ok(())
    }

    #[tokio::test]
    async fn topup_offers_come_back_cheapest_first() -> TestResult {
        let mut gateway = MockBackendApi::new();
        gateway
            .expect_my_esims()
            .returning(|_| Ok(vec![record("891030", "ENABLED", "IN_USE", 2)]));
        gateway
            .expect_topup_packages()
            .withf(|_, iccid| iccid == "891030")
            .returning(|_, _| Ok(vec![offer("BIG", 90_000), offer("SMALL", 20_000)]));

        let service = EsimService::new(Arc::new(gateway));
        let offers = service.topup_offers(&user(1), "891030").await?;

        let codes: Vec<&str> = offers.iter().map(|o| o.package_code.as_str()).collect();

        assert_eq!(codes, ["SMALL", "BIG"]);

        Ok(())
    }

    #[tokio::test]
    async fn topup_is_denied_without_package_support() {
        let mut gateway = MockBackendApi::new();
        gateway
            .expect_my_esims()
            .returning(|_| Ok(vec![record("891030", "ENABLED", "IN_USE", 0)]));

        let service = EsimService::new(Arc::new(gateway));
        let result = service.topup_offers(&user(1), "891030").await;

        assert!(
            matches!(
                result,
                Err(EsimServiceError::NotPermitted {
                    action: ActionKind::TopUp,
                    ..
                })
            ),
            "expected NotPermitted, got {result:?}"
        );
    }

    #[tokio::test]
    async fn topup_submits_the_chosen_package_price_as_amount() -> TestResult {
        let mut gateway = MockBackendApi::new();
        gateway
            .expect_my_esims()
            .times(2)
            .returning(|_| Ok(vec![record("891030", "ENABLED", "IN_USE", 2)]));
        gateway
            .expect_topup()
            .times(1)
            .withf(|_, order| {
                order.tran_no == "T-891030" && order.package_code == "PKT" && order.amount == 35_000
            })
            .returning(|_, _| Ok(()));

        let service = EsimService::new(Arc::new(gateway));
        service.topup(&user(1), "891030", &offer("PKT", 35_000)).await?;

        Ok(())
    }

    #[tokio::test]
    async fn refresh_is_denied_for_a_fresh_profile() {
        let mut gateway = MockBackendApi::new();
        gateway
            .expect_my_esims()
            .returning(|_| Ok(vec![record("891030", "RELEASED", "GOT_RESOURCE", 0)]));

        let service = EsimService::new(Arc::new(gateway));
        let result = service.refresh(&user(1), "891030").await;

        assert!(
            matches!(
                result,
                Err(EsimServiceError::NotPermitted {
                    action: ActionKind::Refresh,
                    ..
                })
            ),
            "expected NotPermitted, got {result:?}"
        );
    }

    #[tokio::test]
    async fn refresh_rereads_an_active_profile() -> TestResult {
        let mut gateway = MockBackendApi::new();
        gateway
            .expect_my_esims()
            .times(2)
            .returning(|_| Ok(vec![record("891030", "ENABLED", "IN_USE", 0)]));

        let service = EsimService::new(Arc::new(gateway));
        let refreshed = service.refresh(&user(1), "891030").await?;

        assert_eq!(refreshed.iccid, "891030");

        Ok(())
    }

    #[test]
    fn the_same_action_cannot_start_twice() -> TestResult {
        let service = EsimService::new(Arc::new(MockBackendApi::new()));

        let guard = service.begin("891030", ActionKind::Cancel)?;
        let result = service.begin("891030", ActionKind::Cancel);

        assert!(
            matches!(result, Err(EsimServiceError::AlreadyPending { .. })),
            "expected AlreadyPending, got an Ok guard"
        );

        drop(guard);

        assert!(service.begin("891030", ActionKind::Cancel).is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn a_pending_action_blocks_resubmission() {
        let mut gateway = MockBackendApi::new();
        gateway
            .expect_my_esims()
            .returning(|_| Ok(vec![record("891030", "RELEASED", "GOT_RESOURCE", 0)]));

        let service = EsimService::new(Arc::new(gateway));
        let _held = service
            .begin("891030", ActionKind::Cancel)
            .unwrap_or_else(|error| panic!("guard should be free: {error}"));

        let result = service.cancel(&user(1), "891030").await;

        assert!(
            matches!(result, Err(EsimServiceError::AlreadyPending { .. })),
            "expected AlreadyPending, got {result:?}"
        );
    }

    #[test]
    fn different_actions_on_one_record_do_not_collide() -> TestResult {
        let service = EsimService::new(Arc::new(MockBackendApi::new()));

        let _cancel = service.begin("891030", ActionKind::Cancel)?;
        let _top_up = service.begin("891030", ActionKind::TopUp)?;

        Ok(())
    }
}
