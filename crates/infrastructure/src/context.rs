//! Wiring of the client
//!
//! One session handle feeds the gateway's credential stages; the session
//! service, the dashboard and every resource client share that gateway.

use std::sync::Arc;

use application::{
    ApplicationError, DashboardService, SessionHandle, SessionService, SessionState,
    SessionStorePort,
};
use integration_api::{
    ApiGateway, AssetsClient, ComplaintsClient, CredentialSource, DemandClient,
    NotificationsClient, UsersClient, WaterInfrastructureClient, WaterQualityClient,
};
use tracing::{debug, instrument};

use crate::adapters::{DashboardAdapter, IdentityAdapter, SessionCredentials, map_api_error};
use crate::config::AppConfig;
use crate::persistence::{FileSessionStore, SessionStoreError};

/// Fully wired client
#[derive(Debug)]
pub struct WaterOpsContext {
    config: AppConfig,
    handle: Arc<SessionHandle>,
    session: SessionService,
    gateway: ApiGateway,
    dashboard: DashboardService,
}

impl WaterOpsContext {
    /// Wire the client with the file session store
    pub fn build(config: AppConfig) -> Result<Self, ApplicationError> {
        let store = match config.session.resolved_path() {
            Some(path) => FileSessionStore::new(path),
            None => return Err(SessionStoreError::NoLocation.into()),
        };
        Self::with_store(config, Arc::new(store))
    }

    /// Wire the client with an explicit session store
    pub fn with_store(
        config: AppConfig,
        store: Arc<dyn SessionStorePort>,
    ) -> Result<Self, ApplicationError> {
        config.validate()?;

        let handle = Arc::new(SessionHandle::new(store, config.session.idle_timeout()));
        let credentials: Arc<dyn CredentialSource> =
            Arc::new(SessionCredentials::new(Arc::clone(&handle)));
        let gateway =
            ApiGateway::with_credentials(config.api.clone(), credentials).map_err(map_api_error)?;

        let identity = Arc::new(IdentityAdapter::new(UsersClient::new(gateway.clone())));
        let session = SessionService::new(Arc::clone(&handle), identity);
        let dashboard = DashboardService::new(
            Arc::new(DashboardAdapter::new(&gateway)),
            config.dashboard.timeout(),
        );

        debug!(base_url = %config.api.base_url, "Client wired");
        Ok(Self {
            config,
            handle,
            session,
            gateway,
            dashboard,
        })
    }

    /// Load the persisted session
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<SessionState, ApplicationError> {
        self.handle.restore().await
    }

    /// Effective configuration
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Session state owner
    pub const fn handle(&self) -> &Arc<SessionHandle> {
        &self.handle
    }

    /// Session operations
    pub const fn session(&self) -> &SessionService {
        &self.session
    }

    /// Shared gateway
    pub const fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    /// Dashboard aggregate
    pub const fn dashboard(&self) -> &DashboardService {
        &self.dashboard
    }

    /// Users client
    pub fn users(&self) -> UsersClient {
        UsersClient::new(self.gateway.clone())
    }

    /// Water infrastructure client
    pub fn infrastructure(&self) -> WaterInfrastructureClient {
        WaterInfrastructureClient::new(self.gateway.clone())
    }

    /// Water quality client
    pub fn quality(&self) -> WaterQualityClient {
        WaterQualityClient::new(self.gateway.clone())
    }

    /// Complaints client
    pub fn complaints(&self) -> ComplaintsClient {
        ComplaintsClient::new(self.gateway.clone())
    }

    /// Assets client
    pub fn assets(&self) -> AssetsClient {
        AssetsClient::new(self.gateway.clone())
    }

    /// Demand client
    pub fn demand(&self) -> DemandClient {
        DemandClient::new(self.gateway.clone())
    }

    /// Notifications client
    pub fn notifications(&self) -> NotificationsClient {
        NotificationsClient::new(self.gateway.clone())
    }
}
