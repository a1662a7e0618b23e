//! Authentication guard consulted before every navigation.

use orgdir_auth::AuthCheck;

use crate::routes::{ResolvedRoute, RouteName};

/// Guard verdict for a single navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct NavigationGuard<A> {
    auth: A,
    login_path: String,
    home_path: String,
}

impl<A> NavigationGuard<A>
where
    A: AuthCheck,
{
    pub fn new(auth: A) -> Self {
        Self::with_paths(auth, "/login", "/")
    }

    pub fn with_paths(auth: A, login_path: impl Into<String>, home_path: impl Into<String>) -> Self {
        Self {
            auth,
            login_path: login_path.into(),
            home_path: home_path.into(),
        }
    }

    /// Decide whether navigation to `target` proceeds.
    ///
    /// The session is re-read from storage on every call so that a login or
    /// logout made through another handle is observed.
    pub fn before_each(&self, target: &ResolvedRoute) -> Navigation {
        let authenticated = self.auth.check_auth();

        if target.requires_auth && !authenticated {
            tracing::debug!(route = %target.name, path = %target.path, "unauthenticated; redirecting to login");
            return Navigation::Redirect(self.login_path.clone());
        }

        if target.name == RouteName::Login && authenticated {
            tracing::debug!("already authenticated; redirecting home");
            return Navigation::Redirect(self.home_path.clone());
        }

        Navigation::Allow
    }
}
