//! Application services - Use case implementations

mod dashboard;
mod route_guard;
mod session;
#[cfg(test)]
mod test_support;

pub use dashboard::{
    DASHBOARD_PAGE, DEFAULT_DASHBOARD_TIMEOUT_SECS, DashboardListings, DashboardMetrics,
    DashboardService,
};
pub use route_guard::{
    DEFAULT_FALLBACK, GuardDecision, LOGIN_PATH, RouteEntry, RouteGuard, RouteRule, RouteTable,
};
pub use session::{DEFAULT_IDLE_TIMEOUT_MINUTES, SessionHandle, SessionService, SessionState};
