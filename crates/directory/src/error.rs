use orgdir_core::{CompanyId, EmployeeId};
use orgdir_storage::StorageError;
use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failure of a mutating employee-repository operation.
///
/// Lookups (`list_employees`, `get_employee`) never fail; only update and
/// delete report missing companies/employees, and the caller surfaces them.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("company not found: {0}")]
    CompanyNotFound(CompanyId),

    #[error("employee not found: {id} (company {company})")]
    EmployeeNotFound { company: CompanyId, id: EmployeeId },

    #[error("employee id already in use: {id} (company {company})")]
    DuplicateEmployeeId { company: CompanyId, id: EmployeeId },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to serialize employees: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RepositoryError::CompanyNotFound(_) | RepositoryError::EmployeeNotFound { .. }
        )
    }
}
