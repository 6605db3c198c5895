//! Mock resource catalog.
//!
//! DESIGN
//! ======
//! Every collection the console renders is a static fixture built once at
//! start-up and shared read-only through `AppState`. Rows that belong to a
//! project carry its id so handlers can apply the (cosmetic) tenancy filter.

use serde::Serialize;

use crate::services::audit::{AuditLogEntry, AuditStatus, Severity};
use crate::services::tenancy::{Organization, Project};

#[derive(Debug, Clone, Serialize)]
pub struct Cluster {
    pub id: String,
    pub name: String,
    /// `kubernetes` or `docker`.
    pub platform: String,
    pub version: String,
    pub nodes: u32,
    pub status: String,
    pub project_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Workload {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub namespace: String,
    pub image: String,
    pub replicas: u32,
    pub ready: u32,
    pub cluster_id: String,
    pub project_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Endpoint {
    pub id: String,
    pub name: String,
    pub url: String,
    pub protocol: String,
    pub healthy: bool,
    pub project_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKind {
    ConfigMap,
    Secret,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigEntry {
    pub id: String,
    pub name: String,
    pub kind: ConfigKind,
    pub namespace: String,
    pub project_id: String,
    /// Key names only; values are never exposed.
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stack {
    pub id: String,
    pub name: String,
    pub project_id: String,
    pub services: Vec<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    /// `*`, `area:*`, or `area:verb`.
    pub permissions: Vec<String>,
}

/// Everything the console can display.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub organizations: Vec<Organization>,
    pub clusters: Vec<Cluster>,
    pub workloads: Vec<Workload>,
    pub endpoints: Vec<Endpoint>,
    pub configs: Vec<ConfigEntry>,
    pub stacks: Vec<Stack>,
    pub roles: Vec<Role>,
    pub audit_log: Vec<AuditLogEntry>,
}

impl Catalog {
    #[must_use]
    pub fn config(&self, id: &str) -> Option<&ConfigEntry> {
        self.configs.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn stack(&self, id: &str) -> Option<&Stack> {
        self.stacks.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn role_named(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// The built-in demo data set.
    #[must_use]
    pub fn mock() -> Self {
        Self {
            organizations: mock_organizations(),
            clusters: mock_clusters(),
            workloads: mock_workloads(),
            endpoints: mock_endpoints(),
            configs: mock_configs(),
            stacks: mock_stacks(),
            roles: mock_roles(),
            audit_log: mock_audit_log(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn project(id: &str, name: &str, organization_id: &str) -> Project {
    Project { id: id.into(), name: name.into(), organization_id: organization_id.into() }
}

fn mock_organizations() -> Vec<Organization> {
    vec![
        Organization {
            id: "org-acme".into(),
            name: "Acme Corp".into(),
            projects: vec![
                project("prj-payments", "Payments", "org-acme"),
                project("prj-storefront", "Storefront", "org-acme"),
                project("prj-analytics", "Analytics", "org-acme"),
            ],
        },
        Organization {
            id: "org-globex".into(),
            name: "Globex".into(),
            projects: vec![
                project("prj-research", "Research", "org-globex"),
                project("prj-platform", "Platform", "org-globex"),
            ],
        },
        Organization { id: "org-sandbox".into(), name: "Sandbox Labs".into(), projects: Vec::new() },
    ]
}

fn mock_clusters() -> Vec<Cluster> {
    let row = |id: &str, name: &str, platform: &str, version: &str, nodes, status: &str, project_id: &str| Cluster {
        id: id.into(),
        name: name.into(),
        platform: platform.into(),
        version: version.into(),
        nodes,
        status: status.into(),
        project_id: project_id.into(),
    };
    vec![
        row("cls-prod-eu", "prod-eu-west", "kubernetes", "1.29.4", 12, "healthy", "prj-payments"),
        row("cls-prod-us", "prod-us-east", "kubernetes", "1.29.4", 9, "degraded", "prj-payments"),
        row("cls-shop", "storefront-main", "kubernetes", "1.28.9", 6, "healthy", "prj-storefront"),
        row("cls-etl", "etl-swarm", "docker", "24.0.7", 4, "healthy", "prj-analytics"),
        row("cls-lab", "research-lab", "docker", "25.0.3", 2, "offline", "prj-research"),
        row("cls-core", "platform-core", "kubernetes", "1.30.1", 15, "healthy", "prj-platform"),
    ]
}

fn mock_workloads() -> Vec<Workload> {
    #[allow(clippy::too_many_arguments)]
    fn row(
        id: &str,
        name: &str,
        kind: &str,
        namespace: &str,
        image: &str,
        replicas: u32,
        ready: u32,
        cluster_id: &str,
        project_id: &str,
    ) -> Workload {
        Workload {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            namespace: namespace.into(),
            image: image.into(),
            replicas,
            ready,
            cluster_id: cluster_id.into(),
            project_id: project_id.into(),
        }
    }
    vec![
        row("wl-api", "payments-api", "Deployment", "payments", "acme/payments-api:2.4.1", 4, 4, "cls-prod-eu", "prj-payments"),
        row("wl-ledger", "ledger", "StatefulSet", "payments", "acme/ledger:1.9.0", 3, 2, "cls-prod-us", "prj-payments"),
        row("wl-web", "storefront-web", "Deployment", "shop", "acme/storefront:5.0.2", 6, 6, "cls-shop", "prj-storefront"),
        row("wl-cart", "cart", "Deployment", "shop", "acme/cart:3.3.0", 2, 2, "cls-shop", "prj-storefront"),
        row("wl-spark", "spark-worker", "Service", "etl", "bitnami/spark:3.5", 3, 3, "cls-etl", "prj-analytics"),
        row("wl-notebook", "notebooks", "Container", "lab", "jupyter/base:2024.1", 1, 0, "cls-lab", "prj-research"),
        row("wl-ingress", "ingress-nginx", "DaemonSet", "kube-system", "nginx/ingress:1.10", 15, 15, "cls-core", "prj-platform"),
    ]
}

fn mock_endpoints() -> Vec<Endpoint> {
    let row = |id: &str, name: &str, url: &str, protocol: &str, healthy, project_id: &str| Endpoint {
        id: id.into(),
        name: name.into(),
        url: url.into(),
        protocol: protocol.into(),
        healthy,
        project_id: project_id.into(),
    };
    vec![
        row("ep-pay", "payments-public", "https://pay.acme.example", "https", true, "prj-payments"),
        row("ep-pay-grpc", "payments-internal", "grpc://ledger.payments.svc:9090", "grpc", false, "prj-payments"),
        row("ep-shop", "storefront", "https://shop.acme.example", "https", true, "prj-storefront"),
        row("ep-etl", "etl-dashboard", "http://etl.internal:8080", "http", true, "prj-analytics"),
        row("ep-core", "platform-gateway", "https://gw.globex.example", "https", true, "prj-platform"),
    ]
}

fn mock_configs() -> Vec<ConfigEntry> {
    fn row(id: &str, name: &str, kind: ConfigKind, namespace: &str, project_id: &str, keys: &[&str]) -> ConfigEntry {
        ConfigEntry {
            id: id.into(),
            name: name.into(),
            kind,
            namespace: namespace.into(),
            project_id: project_id.into(),
            keys: strings(keys),
        }
    }
    vec![
        row("cfg-pay-env", "payments-env", ConfigKind::ConfigMap, "payments", "prj-payments", &["LOG_LEVEL", "REGION"]),
        row("cfg-pay-db", "payments-db", ConfigKind::Secret, "payments", "prj-payments", &["DATABASE_URL"]),
        row("cfg-shop-flags", "feature-flags", ConfigKind::ConfigMap, "shop", "prj-storefront", &["checkout_v2", "dark_mode"]),
        row("cfg-tls", "wildcard-tls", ConfigKind::Secret, "kube-system", "prj-platform", &["tls.crt", "tls.key"]),
    ]
}

fn mock_stacks() -> Vec<Stack> {
    fn row(id: &str, name: &str, project_id: &str, services: &[&str], status: &str) -> Stack {
        Stack {
            id: id.into(),
            name: name.into(),
            project_id: project_id.into(),
            services: strings(services),
            status: status.into(),
        }
    }
    vec![
        row("stk-pay", "payments", "prj-payments", &["api", "ledger", "worker"], "running"),
        row("stk-shop", "storefront", "prj-storefront", &["web", "cart", "redis"], "running"),
        row("stk-etl", "etl-pipeline", "prj-analytics", &["spark-master", "spark-worker"], "stopped"),
    ]
}

fn mock_roles() -> Vec<Role> {
    fn row(id: &str, name: &str, permissions: &[&str]) -> Role {
        Role { id: id.into(), name: name.into(), permissions: strings(permissions) }
    }
    vec![
        row("role-admin", "Administrator", &["*"]),
        row("role-operator", "Operator", &["workloads:*", "deploy:*", "config:read", "observability:read"]),
        row("role-viewer", "Viewer", &["workloads:read", "config:read", "observability:read", "inventory:read"]),
    ]
}

fn mock_audit_log() -> Vec<AuditLogEntry> {
    #[allow(clippy::too_many_arguments)]
    fn row(
        id: &str,
        timestamp: &str,
        severity: Severity,
        user: &str,
        action: &str,
        resource: &str,
        details: &str,
        status: AuditStatus,
        source_ip: &str,
    ) -> AuditLogEntry {
        AuditLogEntry {
            id: id.into(),
            timestamp: timestamp.into(),
            severity,
            user: user.into(),
            action: action.into(),
            resource: resource.into(),
            details: details.into(),
            status,
            source_ip: source_ip.into(),
        }
    }
    vec![
        row("aud-001", "2024-05-01T09:12:03Z", Severity::Info, "admin@jacon.io", "login", "session", "Console sign-in", AuditStatus::Success, "10.0.4.17"),
        row("aud-002", "2024-05-01T09:15:41Z", Severity::Info, "admin@jacon.io", "scale", "workload/payments-api", "Replicas 3 -> 4", AuditStatus::Success, "10.0.4.17"),
        row("aud-003", "2024-05-01T10:02:19Z", Severity::Warning, "ops@acme.example", "update", "config/payments-env", "LOG_LEVEL changed to debug", AuditStatus::Success, "192.168.1.40"),
        row("aud-004", "2024-05-01T10:44:55Z", Severity::Error, "ci-bot", "deploy", "stack/etl-pipeline", "Image pull back-off", AuditStatus::Failure, "172.16.0.9"),
        row("aud-005", "2024-05-01T11:30:00Z", Severity::Critical, "unknown", "login", "session", "Repeated failed sign-in attempts", AuditStatus::Failure, "203.0.113.77"),
        row("aud-006", "2024-05-01T12:05:12Z", Severity::Info, "viewer@globex.example", "read", "secret/wildcard-tls", "Secret metadata viewed", AuditStatus::Success, "198.51.100.23"),
        row("aud-007", "2024-05-01T13:21:48Z", Severity::Warning, "ops@acme.example", "restart", "workload/ledger", "Pod ledger-2 restarted", AuditStatus::Success, "192.168.1.40"),
        row("aud-008", "2024-05-01T14:09:33Z", Severity::Info, "admin@jacon.io", "create", "role/Operator", "Role created", AuditStatus::Success, "10.0.4.17"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_catalog_has_an_organization_without_projects() {
        let catalog = Catalog::mock();
        assert!(!catalog.organizations.is_empty());
        assert!(catalog.organizations.iter().any(|o| o.projects.is_empty()));
    }

    #[test]
    fn projects_name_their_owning_organization() {
        let catalog = Catalog::mock();
        for org in &catalog.organizations {
            for p in &org.projects {
                assert_eq!(p.organization_id, org.id);
            }
        }
    }

    #[test]
    fn scoped_rows_reference_known_projects() {
        let catalog = Catalog::mock();
        let ids = catalog
            .clusters
            .iter()
            .map(|c| &c.project_id)
            .chain(catalog.workloads.iter().map(|w| &w.project_id))
            .chain(catalog.endpoints.iter().map(|e| &e.project_id))
            .chain(catalog.configs.iter().map(|c| &c.project_id))
            .chain(catalog.stacks.iter().map(|s| &s.project_id));
        let known: Vec<&String> = catalog
            .organizations
            .iter()
            .flat_map(|o| o.projects.iter().map(|p| &p.id))
            .collect();
        for id in ids {
            assert!(known.contains(&id), "unknown project {id}");
        }
    }

    #[test]
    fn lookups_by_id() {
        let catalog = Catalog::mock();
        assert_eq!(catalog.config("cfg-tls").map(|c| c.kind), Some(ConfigKind::Secret));
        assert!(catalog.config("cfg-missing").is_none());
        assert_eq!(catalog.stack("stk-pay").map(|s| s.services.len()), Some(3));
        assert!(catalog.role_named("administrator").is_some());
    }
}
