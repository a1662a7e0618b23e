//! Employee records and the per-company repository.

mod model;
mod repository;
mod search;
mod seed;

pub use model::{Employee, EmployeeDraft, EmployeeMap, Profile};
pub use repository::{EmployeeRepository, RepositoryLatency};
pub use search::filter_employees;
pub use seed::default_dataset;
