//! Role-based route gating
//!
//! Decides whether a view may be shown for the current session state.
//! Gating is a convenience for the client; the backend authorizes every
//! request on its own.

use domain::Role;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, instrument};

use super::session::{SessionService, SessionState};
use crate::error::ApplicationError;

/// Where unauthenticated sessions are sent
pub const LOGIN_PATH: &str = "/login";

/// Where sessions with an insufficient role are sent
pub const DEFAULT_FALLBACK: &str = "/dashboard";

/// A navigable view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    /// Route path
    pub path: &'static str,
    /// Sidebar label
    pub label: &'static str,
    /// Lowest role that may open it
    pub required_role: Role,
}

/// The navigable views and the role each requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl Default for RouteTable {
    fn default() -> Self {
        const fn entry(path: &'static str, label: &'static str, required_role: Role) -> RouteEntry {
            RouteEntry {
                path,
                label,
                required_role,
            }
        }

        Self {
            entries: vec![
                entry("/dashboard", "Dashboard", Role::User),
                entry("/water-infrastructure", "Water infrastructure", Role::Engineer),
                entry("/water-quality", "Water quality", Role::Engineer),
                entry("/assets", "Assets", Role::Engineer),
                entry("/demand-forecasting", "Demand forecasting", Role::Engineer),
                entry("/notifications", "Notifications", Role::Engineer),
                entry("/complaints", "Complaints", Role::User),
                entry("/admin/users", "Users", Role::Admin),
            ],
        }
    }
}

impl RouteTable {
    /// All entries in sidebar order
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Entry for an exact path
    pub fn find(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    /// Gating rule for a path, with the default fallback
    pub fn rule_for(&self, path: &str) -> Option<RouteRule> {
        self.find(path)
            .map(|entry| RouteRule::new(entry.required_role))
    }

    /// Sidebar entries a role may open
    pub fn visible_routes(&self, role: Role) -> impl Iterator<Item = &RouteEntry> {
        self.entries
            .iter()
            .filter(move |entry| role.satisfies(entry.required_role))
    }
}

/// Gating requirement of one view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    /// Lowest role that may open the view
    pub required_role: Role,
    /// Redirect target for an insufficient role
    pub fallback: String,
}

impl RouteRule {
    /// Rule with the default fallback
    pub fn new(required_role: Role) -> Self {
        Self {
            required_role,
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }

    /// Override the fallback
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }
}

/// Outcome of a gating check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "target", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Show the view
    Allow,
    /// Navigate elsewhere
    Redirect(String),
    /// Identity not resolved yet
    Pending,
}

/// Guard for a single view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    rule: RouteRule,
    login_path: String,
}

impl RouteGuard {
    /// Guard enforcing `rule`
    pub fn new(rule: RouteRule) -> Self {
        Self {
            rule,
            login_path: LOGIN_PATH.to_string(),
        }
    }

    /// Override the login path
    #[must_use]
    pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
        self.login_path = login_path.into();
        self
    }

    /// Rule being enforced
    pub const fn rule(&self) -> &RouteRule {
        &self.rule
    }

    /// Decide for a given state without side effects
    pub fn evaluate(&self, state: &SessionState) -> GuardDecision {
        match state {
            SessionState::Unauthenticated => GuardDecision::Redirect(self.login_path.clone()),
            SessionState::Resolving => GuardDecision::Pending,
            SessionState::Authenticated(role) if role.satisfies(self.rule.required_role) => {
                GuardDecision::Allow
            },
            SessionState::Authenticated(_) => GuardDecision::Redirect(self.rule.fallback.clone()),
        }
    }

    /// Decide, resolving the identity first when it is still pending
    ///
    /// A failed resolution is returned as an error; the session keeps its
    /// credential in that case.
    #[instrument(skip(self, session), fields(required = %self.rule.required_role))]
    pub async fn authorize(
        &self,
        session: &SessionService,
    ) -> Result<GuardDecision, ApplicationError> {
        let decision = self.evaluate(&session.state());
        if decision != GuardDecision::Pending {
            return Ok(decision);
        }
        let state = session.establish().await?;
        let decision = self.evaluate(&state);
        debug!(?decision, %state, "Route decision after resolution");
        Ok(decision)
    }

    /// Wait until the session settles and decide
    ///
    /// A closed channel counts as unauthenticated.
    pub async fn await_decision(
        &self,
        states: &mut watch::Receiver<SessionState>,
    ) -> GuardDecision {
        loop {
            let decision = self.evaluate(&states.borrow_and_update());
            if decision != GuardDecision::Pending {
                return decision;
            }
            if states.changed().await.is_err() {
                return GuardDecision::Redirect(self.login_path.clone());
            }
        }
    }
}
