//! Audit log rows and client-style substring filtering.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Success,
    Failure,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditLogEntry {
    pub id: String,
    /// RFC 3339.
    pub timestamp: String,
    pub severity: Severity,
    pub user: String,
    pub action: String,
    pub resource: String,
    pub details: String,
    pub status: AuditStatus,
    pub source_ip: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    /// Case-insensitive substring matched against the free-text columns.
    pub q: Option<String>,
    pub severity: Option<Severity>,
}

impl AuditLogEntry {
    fn matches_text(&self, needle: &str) -> bool {
        [&self.user, &self.action, &self.resource, &self.details, &self.source_ip]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Rows matching `query`, in fixture order. A blank query matches everything.
#[must_use]
pub fn filter_entries<'a>(entries: &'a [AuditLogEntry], query: &AuditQuery) -> Vec<&'a AuditLogEntry> {
    let needle = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    entries
        .iter()
        .filter(|e| query.severity.is_none_or(|s| e.severity == s))
        .filter(|e| needle.as_deref().is_none_or(|n| e.matches_text(n)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::Catalog;

    fn query(q: Option<&str>, severity: Option<Severity>) -> AuditQuery {
        AuditQuery { q: q.map(str::to_owned), severity }
    }

    #[test]
    fn blank_query_returns_every_row() {
        let log = Catalog::mock().audit_log;
        assert_eq!(filter_entries(&log, &AuditQuery::default()).len(), log.len());
        assert_eq!(filter_entries(&log, &query(Some("   "), None)).len(), log.len());
    }

    #[test]
    fn substring_is_case_insensitive_across_columns() {
        let log = Catalog::mock().audit_log;

        let by_user = filter_entries(&log, &query(Some("ADMIN@"), None));
        assert!(!by_user.is_empty());
        assert!(by_user.iter().all(|e| e.user.contains("admin@")));

        let by_ip = filter_entries(&log, &query(Some("203.0.113"), None));
        assert_eq!(by_ip.len(), 1);
        assert_eq!(by_ip[0].id, "aud-005");

        let by_details = filter_entries(&log, &query(Some("back-off"), None));
        assert_eq!(by_details.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(), vec!["aud-004"]);
    }

    #[test]
    fn severity_and_text_combine() {
        let log = Catalog::mock().audit_log;
        let hits = filter_entries(&log, &query(Some("login"), Some(Severity::Critical)));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].status, AuditStatus::Failure);
    }

    #[test]
    fn no_match_is_empty() {
        let log = Catalog::mock().audit_log;
        assert!(filter_entries(&log, &query(Some("kubectl-exec-nowhere"), None)).is_empty());
    }

    #[test]
    fn severity_deserializes_lowercase() {
        let q: AuditQuery = serde_json::from_str(r#"{"severity":"warning"}"#).unwrap();
        assert_eq!(q.severity, Some(Severity::Warning));
    }
}
