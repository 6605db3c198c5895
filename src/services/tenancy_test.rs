use super::*;
use crate::services::catalog::Catalog;

fn org(id: &str, project_ids: &[&str]) -> Organization {
    Organization {
        id: id.into(),
        name: id.to_uppercase(),
        projects: project_ids
            .iter()
            .map(|p| Project { id: (*p).into(), name: p.to_uppercase(), organization_id: id.into() })
            .collect(),
    }
}

fn scope() -> TenancyScope {
    TenancyScope::new(vec![org("a", &["a1", "a2"]), org("b", &["b1", "b2", "b3"]), org("empty", &[])]).unwrap()
}

#[test]
fn new_selects_first_org_and_first_project() {
    let s = scope();
    assert_eq!(s.current_organization().id, "a");
    assert_eq!(s.current_project().map(|p| p.id.as_str()), Some("a1"));
    assert_eq!(s.organizations().len(), 3);
}

#[test]
fn new_rejects_empty_fixture_list() {
    assert!(matches!(TenancyScope::new(Vec::new()), Err(ConsoleError::NoOrganizations)));
}

#[test]
fn new_with_projectless_first_org_has_no_project() {
    let s = TenancyScope::new(vec![org("empty", &[])]).unwrap();
    assert!(s.current_project().is_none());
}

#[test]
fn select_organization_picks_its_first_project() {
    let mut s = scope();
    let b = s.organizations()[1].clone();
    s.select_organization(b.clone());
    assert_eq!(s.current_organization(), &b);
    assert_eq!(s.current_project(), b.projects.first());
}

#[test]
fn select_organization_without_projects_clears_project() {
    let mut s = scope();
    s.select_organization(org("empty", &[]));
    assert_eq!(s.current_organization().id, "empty");
    assert!(s.current_project().is_none());
}

#[test]
fn select_organization_resets_a_previously_chosen_project() {
    let mut s = scope();
    s.select_project_by_id("a2").unwrap();
    s.select_organization_by_id("a").unwrap();
    assert_eq!(s.current_project().map(|p| p.id.as_str()), Some("a1"));
}

#[test]
fn select_project_replaces_only_the_project() {
    let mut s = scope();
    let view = s.select_project_by_id("a2").unwrap();
    assert_eq!(view.organization.id, "a");
    assert_eq!(view.project.map(|p| p.id), Some("a2".to_owned()));
}

#[test]
fn select_project_from_another_org_is_not_enforced() {
    let mut s = scope();
    s.select_project_by_id("b3").unwrap();
    assert_eq!(s.current_organization().id, "a");
    assert_eq!(s.current_project().map(|p| p.organization_id.as_str()), Some("b"));
}

#[test]
fn unknown_ids_are_not_found_and_leave_scope_untouched() {
    let mut s = scope();
    assert!(matches!(
        s.select_organization_by_id("zzz"),
        Err(ConsoleError::NotFound { kind: "organization", .. })
    ));
    assert!(matches!(s.select_project_by_id("zzz"), Err(ConsoleError::NotFound { kind: "project", .. })));
    assert_eq!(s.current_organization().id, "a");
    assert_eq!(s.current_project().map(|p| p.id.as_str()), Some("a1"));
}

#[test]
fn includes_matches_current_project_only() {
    let mut s = scope();
    assert!(s.includes("a1"));
    assert!(!s.includes("a2"));
    s.select_organization_by_id("empty").unwrap();
    assert!(!s.includes("a1"));
}

#[test]
fn every_mock_organization_switch_keeps_project_in_org() {
    let catalog = Catalog::mock();
    let mut s = TenancyScope::new(catalog.organizations.clone()).unwrap();
    for o in &catalog.organizations {
        s.select_organization(o.clone());
        match o.projects.first() {
            Some(first) => assert_eq!(s.current_project(), Some(first)),
            None => assert!(s.current_project().is_none()),
        }
    }
}
