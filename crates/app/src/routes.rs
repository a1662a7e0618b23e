//! Route table and path resolution.

use std::collections::BTreeMap;

/// Named application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Login,
    Dashboard,
    Employees,
    EmployeeDetail,
    NewEmployee,
    EditEmployee,
    AllEmployees,
    CompanySettings,
    NotFound,
}

impl RouteName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::Login => "login",
            RouteName::Dashboard => "dashboard",
            RouteName::Employees => "employees",
            RouteName::EmployeeDetail => "employee-detail",
            RouteName::NewEmployee => "new-employee",
            RouteName::EditEmployee => "edit-employee",
            RouteName::AllEmployees => "all-employees",
            RouteName::CompanySettings => "company-settings",
            RouteName::NotFound => "not-found",
        }
    }
}

impl core::fmt::Display for RouteName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: RouteName,
    /// `/`-separated pattern; `:name` segments capture a parameter.
    pub pattern: &'static str,
    pub requires_auth: bool,
}

/// A path matched against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub name: RouteName,
    /// Normalized path (no query, fragment or trailing slash).
    pub path: String,
    pub params: BTreeMap<&'static str, String>,
    pub requires_auth: bool,
}

impl ResolvedRoute {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Ordered set of routes. Unmatched paths resolve to [`RouteName::NotFound`].
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    login_path: &'static str,
    home_path: &'static str,
}

impl Default for RouteTable {
    fn default() -> Self {
        let route = |name, pattern, requires_auth| Route {
            name,
            pattern,
            requires_auth,
        };
        Self {
            routes: vec![
                route(RouteName::Login, "/login", false),
                route(RouteName::Dashboard, "/", true),
                route(RouteName::Employees, "/employees/:company", true),
                route(RouteName::EmployeeDetail, "/employees/:company/:id", true),
                route(RouteName::NewEmployee, "/employees/:company/new", true),
                route(RouteName::EditEmployee, "/employees/:company/:id/edit", true),
                route(RouteName::AllEmployees, "/all-employees", true),
                route(RouteName::CompanySettings, "/settings/:company", true),
            ],
            login_path: "/login",
            home_path: "/",
        }
    }
}

impl RouteTable {
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn login_path(&self) -> &'static str {
        self.login_path
    }

    pub fn home_path(&self) -> &'static str {
        self.home_path
    }

    /// Match `path`. Literal segments compare ASCII case-insensitively;
    /// captured params keep their case. When several patterns match, the one
    /// with more literal segments wins; remaining ties go to table order.
    pub fn resolve(&self, path: &str) -> ResolvedRoute {
        let segments = split_path(path);
        let normalized = format!("/{}", segments.join("/"));

        let mut best: Option<(usize, &Route, BTreeMap<&'static str, String>)> = None;
        for route in &self.routes {
            let Some((literals, params)) = match_pattern(route.pattern, &segments) else {
                continue;
            };
            if best.as_ref().is_none_or(|(score, _, _)| literals > *score) {
                best = Some((literals, route, params));
            }
        }

        match best {
            Some((_, route, params)) => ResolvedRoute {
                name: route.name,
                path: normalized,
                params,
                requires_auth: route.requires_auth,
            },
            None => ResolvedRoute {
                name: RouteName::NotFound,
                path: normalized,
                params: BTreeMap::new(),
                requires_auth: false,
            },
        }
    }
}

fn split_path(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|s| !s.is_empty()).collect()
}

/// Literal-segment count and captured params, if `pattern` matches.
fn match_pattern(
    pattern: &'static str,
    segments: &[&str],
) -> Option<(usize, BTreeMap<&'static str, String>)> {
    let parts: Vec<&'static str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    if parts.len() != segments.len() {
        return None;
    }

    let mut literals = 0;
    let mut params = BTreeMap::new();
    for (part, segment) in parts.iter().zip(segments) {
        match part.strip_prefix(':') {
            Some(name) => {
                params.insert(name, (*segment).to_string());
            }
            None if part.eq_ignore_ascii_case(segment) => literals += 1,
            None => return None,
        }
    }
    Some((literals, params))
}
