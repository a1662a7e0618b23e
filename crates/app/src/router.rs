//! Route resolution plus guard, with redirect following.

use std::sync::{PoisonError, RwLock};

use orgdir_auth::AuthCheck;
use thiserror::Error;

use crate::guard::{Navigation, NavigationGuard};
use crate::routes::{ResolvedRoute, RouteTable};

/// Upper bound on guard redirects followed by one navigation.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("redirect loop while navigating to '{path}' ({hops} hops)")]
    RedirectLoop { path: String, hops: usize },
}

pub struct Router<A> {
    table: RouteTable,
    guard: NavigationGuard<A>,
    current: RwLock<Option<ResolvedRoute>>,
}

impl<A> core::fmt::Debug for Router<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router")
            .field("current", &self.current())
            .finish_non_exhaustive()
    }
}

impl<A> Router<A>
where
    A: AuthCheck,
{
    pub fn new(auth: A) -> Self {
        let table = RouteTable::default();
        let guard = NavigationGuard::with_paths(auth, table.login_path(), table.home_path());
        Self {
            table,
            guard,
            current: RwLock::new(None),
        }
    }

    /// Resolve `path`, run the guard, and follow redirects until a route is
    /// allowed. The final route becomes [`Router::current`].
    pub fn navigate(&self, path: &str) -> Result<ResolvedRoute, NavigationError> {
        let mut target = self.table.resolve(path);

        for _ in 0..=MAX_REDIRECTS {
            match self.guard.before_each(&target) {
                Navigation::Allow => {
                    tracing::debug!(route = %target.name, path = %target.path, "navigated");
                    *self.current.write().unwrap_or_else(PoisonError::into_inner) =
                        Some(target.clone());
                    return Ok(target);
                }
                Navigation::Redirect(next) => {
                    target = self.table.resolve(&next);
                }
            }
        }

        tracing::warn!(path, "navigation aborted: too many redirects");
        Err(NavigationError::RedirectLoop {
            path: path.to_string(),
            hops: MAX_REDIRECTS,
        })
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn guard(&self) -> &NavigationGuard<A> {
        &self.guard
    }
}

impl<A> Router<A> {
    /// Last successfully navigated route.
    pub fn current(&self) -> Option<ResolvedRoute> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
