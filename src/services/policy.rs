//! Mock IAM policy check.
//!
//! Permissions are `*`, `area:*`, or `area:verb`. The identity's role label
//! is looked up in the role fixtures; an unknown role grants nothing. Like
//! the mock login, the check sleeps for a fixed delay and never fails.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::services::catalog::Catalog;
use crate::services::session::Identity;

#[derive(Debug, Clone, Deserialize)]
pub struct PolicyRequest {
    /// `area:verb`, e.g. `workloads:delete`.
    pub action: String,
    #[serde(default)]
    pub resource: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyDecision {
    pub allowed: bool,
    pub role: String,
    pub action: String,
}

/// True when `permission` covers `action`.
#[must_use]
pub fn permission_allows(permission: &str, action: &str) -> bool {
    if permission == "*" || permission == action {
        return true;
    }
    permission
        .strip_suffix(":*")
        .and_then(|area| action.strip_prefix(area))
        .is_some_and(|rest| rest.starts_with(':'))
}

/// Evaluate `request` for `identity` against the catalog's roles after `delay`.
pub async fn check_policy(catalog: &Catalog, identity: &Identity, request: &PolicyRequest, delay: Duration) -> PolicyDecision {
    tokio::time::sleep(delay).await;

    let allowed = catalog
        .role_named(&identity.role)
        .is_some_and(|role| role.permissions.iter().any(|p| permission_allows(p, &request.action)));

    debug!(
        user_id = %identity.id,
        role = %identity.role,
        action = %request.action,
        resource = request.resource.as_deref().unwrap_or("-"),
        allowed,
        "policy evaluated"
    );

    PolicyDecision { allowed, role: identity.role.clone(), action: request.action.clone() }
}
