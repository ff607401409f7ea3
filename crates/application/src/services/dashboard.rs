//! Dashboard summary
//!
//! Seven independent listings fetched concurrently and reduced to a set of
//! counters. The summary is all-or-nothing: one failed listing fails the
//! whole load.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::{
    Complaint, Notification, Page, User, WaterAsset, WaterDemand, WaterInfrastructure,
    WaterQuality,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::DashboardSourcePort;

/// Default deadline for the whole aggregate in seconds
pub const DEFAULT_DASHBOARD_TIMEOUT_SECS: u64 = 30;

/// Window requested from every listing
pub const DASHBOARD_PAGE: Page = Page::new(0, 50);

/// Counters shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    /// Registered users
    pub total_users: usize,
    /// Infrastructure objects with a detected leak
    pub active_leaks: usize,
    /// Samples not classified as good
    pub quality_issues: usize,
    /// Complaints
    pub total_complaints: usize,
    /// Assets
    pub total_assets: usize,
    /// Assets whose scheduled maintenance is due
    pub maintenance_tasks: usize,
    /// Unread notifications
    pub pending_notifications: usize,
    /// Demand records
    pub demand_records: usize,
}

/// Raw listings behind the counters
#[derive(Debug, Clone, Default)]
pub struct DashboardListings {
    /// User accounts
    pub users: Vec<User>,
    /// Network elements, leaking or not
    pub infrastructure: Vec<WaterInfrastructure>,
    /// Quality samples
    pub quality: Vec<WaterQuality>,
    /// Complaints in every status
    pub complaints: Vec<Complaint>,
    /// Physical assets
    pub assets: Vec<WaterAsset>,
    /// Demand records
    pub demand: Vec<WaterDemand>,
    /// Notifications addressed to the current user
    pub notifications: Vec<Notification>,
}

impl DashboardMetrics {
    /// Reduce listings to counters as of `now`
    pub fn from_listings(listings: &DashboardListings, now: DateTime<Utc>) -> Self {
        Self {
            total_users: listings.users.len(),
            active_leaks: listings
                .infrastructure
                .iter()
                .filter(|item| item.leak_detected)
                .count(),
            quality_issues: listings
                .quality
                .iter()
                .filter(|sample| sample.quality_status.is_issue())
                .count(),
            total_complaints: listings.complaints.len(),
            total_assets: listings.assets.len(),
            maintenance_tasks: listings
                .assets
                .iter()
                .filter(|asset| asset.maintenance_due_at(now))
                .count(),
            pending_notifications: listings
                .notifications
                .iter()
                .filter(|notification| !notification.is_read)
                .count(),
            demand_records: listings.demand.len(),
        }
    }
}

/// Loads the dashboard summary
pub struct DashboardService {
    source: Arc<dyn DashboardSourcePort>,
    timeout: Duration,
}

impl fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardService")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl DashboardService {
    /// Create the service with an overall deadline
    pub fn new(source: Arc<dyn DashboardSourcePort>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// Fetch all listings concurrently
    ///
    /// The first failing listing aborts the others. `cancel` stops the
    /// load early with [`ApplicationError::Cancelled`].
    #[instrument(skip(self, cancel))]
    pub async fn fetch(
        &self,
        cancel: &CancellationToken,
    ) -> Result<DashboardListings, ApplicationError> {
        let source = &self.source;
        let all = async {
            tokio::try_join!(
                source.users(DASHBOARD_PAGE),
                source.infrastructure(DASHBOARD_PAGE),
                source.quality(DASHBOARD_PAGE),
                source.complaints(DASHBOARD_PAGE),
                source.assets(DASHBOARD_PAGE),
                source.demand(DASHBOARD_PAGE),
                source.notifications(DASHBOARD_PAGE),
            )
        };

        let (users, infrastructure, quality, complaints, assets, demand, notifications) = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                info!("Dashboard load cancelled");
                return Err(ApplicationError::Cancelled);
            },
            result = tokio::time::timeout(self.timeout, all) => match result {
                Ok(listings) => listings.inspect_err(|e| warn!(error = %e, "Dashboard listing failed"))?,
                Err(_) => {
                    warn!(timeout_secs = self.timeout.as_secs(), "Dashboard load timed out");
                    return Err(ApplicationError::ExternalService(format!(
                        "dashboard timed out after {}s",
                        self.timeout.as_secs()
                    )));
                },
            },
        };

        Ok(DashboardListings {
            users,
            infrastructure,
            quality,
            complaints,
            assets,
            demand,
            notifications,
        })
    }

    /// Fetch and reduce to counters
    pub async fn load(
        &self,
        cancel: &CancellationToken,
    ) -> Result<DashboardMetrics, ApplicationError> {
        let listings = self.fetch(cancel).await?;
        let metrics = DashboardMetrics::from_listings(&listings, Utc::now());
        info!(?metrics, "Dashboard loaded");
        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use domain::Role;

    use super::*;
    use crate::ports::MockDashboardSourcePort;
    use crate::services::test_support::user_with_role;

    fn json<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    fn infrastructure(leak: bool) -> WaterInfrastructure {
        json(serde_json::json!({
            "id": 1, "name": "Main 4", "type": "pipeline", "location": "North",
            "leak_detected": leak, "created_at": "2024-01-01T00:00:00Z"
        }))
    }

    fn sample(status: &str) -> WaterQuality {
        json(serde_json::json!({
            "id": 1, "location": "Well 2", "date_measured": "2024-02-01T00:00:00",
            "quality_status": status, "created_at": "2024-02-01T00:00:00Z"
        }))
    }

    fn complaint() -> Complaint {
        json(serde_json::json!({
            "id": 1, "full_name": "A. B.", "category": "leak",
            "description": "wet", "created_at": "2024-01-01T00:00:00Z"
        }))
    }

    fn asset(next: &str) -> WaterAsset {
        json(serde_json::json!({
            "id": 1, "name": "Pump", "asset_type": "pump", "location": "Station",
            "next_maintenance": next, "created_at": "2023-01-01T00:00:00Z"
        }))
    }

    fn demand() -> WaterDemand {
        json(serde_json::json!({
            "id": 1, "location": "West", "demand_amount": 10.0,
            "demand_date": "2024-01-01", "created_at": "2024-01-01T00:00:00Z"
        }))
    }

    fn notification(read: bool) -> Notification {
        json(serde_json::json!({
            "id": 1, "title": "t", "message": "m", "is_read": read,
            "created_at": "2024-01-01T00:00:00Z"
        }))
    }

    fn healthy_source() -> MockDashboardSourcePort {
        let mut source = MockDashboardSourcePort::new();
        source
            .expect_users()
            .withf(|page| *page == Page::new(0, 50))
            .returning(|_| {
                Ok(vec![
                    user_with_role("a", Role::User),
                    user_with_role("b", Role::Admin),
                ])
            });
        source
            .expect_infrastructure()
            .returning(|_| Ok(vec![infrastructure(true), infrastructure(false), infrastructure(true)]));
        source
            .expect_quality()
            .returning(|_| Ok(vec![sample("good"), sample("poor"), sample("satisfactory")]));
        source.expect_complaints().returning(|_| Ok(vec![complaint()]));
        source
            .expect_assets()
            .returning(|_| Ok(vec![asset("2000-01-01T00:00:00"), asset("2999-01-01T00:00:00")]));
        source.expect_demand().returning(|_| Ok(vec![demand(), demand()]));
        source
            .expect_notifications()
            .returning(|_| Ok(vec![notification(false), notification(true), notification(false)]));
        source
    }

    fn service(source: MockDashboardSourcePort) -> DashboardService {
        DashboardService::new(
            Arc::new(source),
            Duration::from_secs(DEFAULT_DASHBOARD_TIMEOUT_SECS),
        )
    }

    #[tokio::test]
    async fn computes_all_counters() {
        let metrics = service(healthy_source())
            .load(&CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            metrics,
            DashboardMetrics {
                total_users: 2,
                active_leaks: 2,
                quality_issues: 2,
                total_complaints: 1,
                total_assets: 2,
                maintenance_tasks: 1,
                pending_notifications: 2,
                demand_records: 2,
            }
        );
    }

    #[tokio::test]
    async fn one_failed_listing_fails_the_aggregate() {
        let mut source = MockDashboardSourcePort::new();
        source.expect_users().returning(|_| Ok(vec![]));
        source.expect_infrastructure().returning(|_| Ok(vec![]));
        source.expect_quality().returning(|_| Ok(vec![]));
        source.expect_complaints().returning(|_| {
            Err(ApplicationError::Rejected {
                status: 422,
                detail: "bad window".to_string(),
            })
        });
        source.expect_assets().returning(|_| Ok(vec![]));
        source.expect_demand().returning(|_| Ok(vec![]));
        source.expect_notifications().returning(|_| Ok(vec![]));

        let err = service(source)
            .load(&CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Rejected { status: 422, .. }));
    }

    #[tokio::test]
    async fn cancelled_token_stops_the_load() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = service(healthy_source()).load(&cancel).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Cancelled));
    }

    #[test]
    fn empty_listings_give_zero_counters() {
        let metrics = DashboardMetrics::from_listings(&DashboardListings::default(), Utc::now());
        assert_eq!(metrics, DashboardMetrics::default());
    }
}
