//! Console path constants shared by the route guard and the session store.

/// Sign-in entry point.
pub const LOGIN_PATH: &str = "/login";

/// Where an already-signed-in visitor to the sign-in page is sent.
pub const LANDING_PATH: &str = "/dashboard";

/// Route prefixes that require a session cookie before render.
pub const PROTECTED_PREFIXES: [&str; 9] = [
    "/dashboard",
    "/admin",
    "/inventory",
    "/workloads",
    "/policy",
    "/config",
    "/observability",
    "/endpoints",
    "/deploy",
];

/// True when `path` is a protected prefix or one of its sub-paths.
///
/// Matching respects segment boundaries: `/configs` is not under `/config`.
#[must_use]
pub fn is_protected_path(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

#[must_use]
pub fn is_login_path(path: &str) -> bool {
    path == LOGIN_PATH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_prefix_and_its_subpaths_are_protected() {
        for prefix in PROTECTED_PREFIXES {
            assert!(is_protected_path(prefix), "{prefix} should be protected");
            assert!(is_protected_path(&format!("{prefix}/x")), "{prefix}/x should be protected");
            assert!(is_protected_path(&format!("{prefix}/")), "{prefix}/ should be protected");
        }
    }

    #[test]
    fn lookalike_prefixes_are_public() {
        assert!(!is_protected_path("/dashboarding"));
        assert!(!is_protected_path("/configs"));
        assert!(!is_protected_path("/"));
        assert!(!is_protected_path("/login"));
        assert!(!is_protected_path("/api/auth/login"));
    }

    #[test]
    fn login_path_is_exact() {
        assert!(is_login_path("/login"));
        assert!(!is_login_path("/login/help"));
        assert!(!is_login_path("/logins"));
    }
}
