//! `orgdir-directory`: the directory's data stores.
//!
//! - [`company`]: fixed company metadata
//! - [`employee`]: per-company employee collections with simulated latency
//! - [`theme`]: dark-mode preference and its presentation observer

pub mod company;
pub mod employee;
pub mod error;
pub mod theme;

pub use company::{Company, CompanyDirectory};
pub use employee::{
    Employee, EmployeeDraft, EmployeeMap, EmployeeRepository, Profile, RepositoryLatency,
    filter_employees,
};
pub use error::{RepositoryError, RepositoryResult};
pub use theme::{
    ColorSchemeQuery, FixedColorScheme, HeadlessRoot, PresentationRoot, Theme, ThemeApplier,
    ThemeBus, ThemeChanged, ThemePreference,
};
