//! `orgdir-app`: configuration, routes, the navigation guard and service wiring.
//!
//! Presentation layers build one [`AppServices`] at startup and drive every
//! route change through [`Router::navigate`].

pub mod config;
pub mod guard;
pub mod router;
pub mod routes;
pub mod services;

pub use config::{AppConfig, StorageBackend};
pub use guard::{Navigation, NavigationGuard};
pub use router::{NavigationError, Router};
pub use routes::{ResolvedRoute, RouteName, RouteTable};
pub use services::AppServices;
