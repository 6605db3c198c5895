//! Tenancy scope: current organization and project selection.
//!
//! DESIGN
//! ======
//! Exactly one organization is always current. Switching organization
//! re-selects that organization's first project (fixture order), or no
//! project when it has none. Selecting a project does not check that it
//! belongs to the current organization; the scope is cosmetic and never
//! used for authorization.

use serde::Serialize;
use tracing::info;

use crate::error::ConsoleError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub organization_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    /// Ordered; the first entry is auto-selected on organization switch.
    pub projects: Vec<Project>,
}

/// Serialized view of the current selection.
#[derive(Debug, Clone, Serialize)]
pub struct ScopeView {
    pub organization: Organization,
    pub project: Option<Project>,
}

#[derive(Debug, Clone)]
pub struct TenancyScope {
    organizations: Vec<Organization>,
    current_organization: Organization,
    current_project: Option<Project>,
}

impl TenancyScope {
    /// Start with the first organization (and its first project) selected.
    ///
    /// # Errors
    ///
    /// Returns `NoOrganizations` if `organizations` is empty.
    pub fn new(organizations: Vec<Organization>) -> Result<Self, ConsoleError> {
        let first = organizations.first().cloned().ok_or(ConsoleError::NoOrganizations)?;
        let current_project = first.projects.first().cloned();
        Ok(Self { organizations, current_organization: first, current_project })
    }

    /// Full fixture list for selection UIs.
    #[must_use]
    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    #[must_use]
    pub fn current_organization(&self) -> &Organization {
        &self.current_organization
    }

    /// `None` when the current organization has no projects.
    #[must_use]
    pub fn current_project(&self) -> Option<&Project> {
        self.current_project.as_ref()
    }

    #[must_use]
    pub fn view(&self) -> ScopeView {
        ScopeView { organization: self.current_organization.clone(), project: self.current_project.clone() }
    }

    /// Replace the current organization and re-select its first project.
    pub fn select_organization(&mut self, org: Organization) {
        self.current_project = org.projects.first().cloned();
        info!(
            organization_id = %org.id,
            project_id = self.current_project.as_ref().map_or("-", |p| p.id.as_str()),
            "organization selected"
        );
        self.current_organization = org;
    }

    /// Replace the current project only.
    pub fn select_project(&mut self, project: Project) {
        info!(project_id = %project.id, "project selected");
        self.current_project = Some(project);
    }

    /// Select a fixture organization by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn select_organization_by_id(&mut self, id: &str) -> Result<ScopeView, ConsoleError> {
        let org = self
            .organizations
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| ConsoleError::not_found("organization", id))?;
        self.select_organization(org);
        Ok(self.view())
    }

    /// Select a fixture project by id, searching every organization.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn select_project_by_id(&mut self, id: &str) -> Result<ScopeView, ConsoleError> {
        let project = self
            .organizations
            .iter()
            .flat_map(|o| o.projects.iter())
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ConsoleError::not_found("project", id))?;
        self.select_project(project);
        Ok(self.view())
    }

    /// True when a row tagged with `project_id` is visible in the current scope.
    #[must_use]
    pub fn includes(&self, project_id: &str) -> bool {
        self.current_project.as_ref().is_some_and(|p| p.id == project_id)
    }
}

#[cfg(test)]
#[path = "tenancy_test.rs"]
mod tests;
