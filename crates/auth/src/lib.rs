//! `orgdir-auth`: credential matching and the active session.
//!
//! There is no real authentication here: credentials are a fixed in-memory
//! table and the session is a plain record persisted under the `user` key.

pub mod credential;
pub mod roles;
pub mod session;
pub mod store;

pub use credential::{Credential, credentials};
pub use roles::{Role, RoleParseError};
pub use session::Session;
pub use store::{AuthCheck, CredentialStore};
