//! Process-wide logging setup shared by every binary.

/// Subscriber setup (filter, output format).
pub mod logging;

pub use logging::{LogFormat, init, init_with};
