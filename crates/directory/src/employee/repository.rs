//! Employee repository: per-company collections persisted as one blob.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use orgdir_core::entity::{find_by_id, position_of};
use orgdir_core::{CompanyId, EmployeeId};
use orgdir_storage::{KeyValueStore, Latency, keys};

use super::model::{Employee, EmployeeDraft, EmployeeMap, Profile};
use super::seed::default_dataset;
use crate::error::{RepositoryError, RepositoryResult};

/// Simulated delays applied before operations resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryLatency {
    /// `list_employees`, `get_employee`, `list_all_employees`.
    pub read: Duration,
    /// `add_employee`, `update_employee`, `delete_employee`.
    pub write: Duration,
}

impl Default for RepositoryLatency {
    fn default() -> Self {
        Self {
            read: Duration::from_millis(300),
            write: Duration::from_millis(500),
        }
    }
}

impl RepositoryLatency {
    pub const fn none() -> Self {
        Self {
            read: Duration::ZERO,
            write: Duration::ZERO,
        }
    }
}

/// Per-company employee collections.
///
/// The whole company → employees mapping is re-serialized and written under
/// the `employees` key after every mutation. Mutations validate, wait the
/// write delay, then re-validate and apply under a single write lock, so at
/// most one writer touches the mapping at a time and no lock is held while
/// waiting.
pub struct EmployeeRepository {
    storage: Arc<dyn KeyValueStore>,
    latency: Arc<dyn Latency>,
    delays: RepositoryLatency,
    state: RwLock<EmployeeMap>,
    search_query: RwLock<String>,
}

impl core::fmt::Debug for EmployeeRepository {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EmployeeRepository")
            .field("companies", &self.read_state().len())
            .field("delays", &self.delays)
            .finish()
    }
}

impl EmployeeRepository {
    /// Load the persisted mapping, or seed from the bundled dataset.
    pub fn open(
        storage: Arc<dyn KeyValueStore>,
        latency: Arc<dyn Latency>,
        delays: RepositoryLatency,
    ) -> RepositoryResult<Self> {
        Self::open_with_seed(storage, latency, delays, default_dataset()?)
    }

    /// Like [`open`](Self::open) but with an explicit seed mapping.
    ///
    /// The seed is only used (and persisted immediately) when nothing usable
    /// is stored under `employees`; a malformed blob is replaced by the seed.
    pub fn open_with_seed(
        storage: Arc<dyn KeyValueStore>,
        latency: Arc<dyn Latency>,
        delays: RepositoryLatency,
        seed: EmployeeMap,
    ) -> RepositoryResult<Self> {
        let loaded = match storage.get(keys::EMPLOYEES)? {
            Some(json) => match serde_json::from_str::<EmployeeMap>(&json) {
                Ok(map) => Some(map),
                Err(err) => {
                    tracing::warn!(error = %err, "persisted employees are malformed; reseeding");
                    None
                }
            },
            None => None,
        };

        let repository = Self {
            storage,
            latency,
            delays,
            state: RwLock::new(EmployeeMap::new()),
            search_query: RwLock::new(String::new()),
        };

        match loaded {
            Some(map) => {
                tracing::debug!(companies = map.len(), "loaded persisted employees");
                *repository.write_state() = map;
            }
            None => {
                tracing::info!(companies = seed.len(), "seeding employee repository");
                let mut state = repository.write_state();
                *state = seed;
                repository.persist(&state)?;
            }
        }

        Ok(repository)
    }

    /// Employees of `company`, in insertion order.
    ///
    /// An unknown company gets an empty collection, persisted before the
    /// read delay. Never fails.
    pub async fn list_employees(&self, company: &CompanyId) -> Vec<Employee> {
        {
            let mut state = self.write_state();
            if !state.contains_key(company) {
                state.insert(company.clone(), Vec::new());
                tracing::debug!(%company, "created empty employee collection");
                if let Err(err) = self.persist(&state) {
                    tracing::warn!(%company, error = %err, "failed to persist new collection");
                }
            }
        }

        self.latency.wait(self.delays.read).await;

        self.read_state().get(company).cloned().unwrap_or_default()
    }

    /// One employee, or `None` when the company or id is unknown.
    pub async fn get_employee(&self, company: &CompanyId, id: &EmployeeId) -> Option<Employee> {
        if !self.read_state().contains_key(company) {
            return None;
        }

        self.latency.wait(self.delays.read).await;

        let state = self.read_state();
        state
            .get(company)
            .and_then(|employees| find_by_id(employees, id))
            .cloned()
    }

    /// Every company's employees, companies in key order.
    pub async fn list_all_employees(&self) -> Vec<(CompanyId, Employee)> {
        self.latency.wait(self.delays.read).await;

        let state = self.read_state();
        state
            .iter()
            .flat_map(|(company, employees)| {
                employees.iter().map(move |e| (company.clone(), e.clone()))
            })
            .collect()
    }

    /// Append an employee to `company`, creating the collection if needed.
    ///
    /// A missing or blank draft id is replaced by a freshly generated one;
    /// a supplied id that is already taken is rejected. If persisting fails
    /// the append is undone, including a collection created by this call.
    pub async fn add_employee(
        &self,
        company: &CompanyId,
        draft: EmployeeDraft,
    ) -> RepositoryResult<Employee> {
        let supplied = draft.supplied_id().cloned();
        let id = {
            let state = self.read_state();
            let employees = state.get(company).map(Vec::as_slice).unwrap_or_default();
            match supplied {
                Some(id) if position_of(employees, &id).is_some() => {
                    return Err(RepositoryError::DuplicateEmployeeId {
                        company: company.clone(),
                        id,
                    });
                }
                Some(id) => id,
                None => fresh_id(employees),
            }
        };

        self.latency.wait(self.delays.write).await;

        let mut state = self.write_state();
        let created = !state.contains_key(company);
        let employees = state.entry(company.clone()).or_default();
        let id = if position_of(employees, &id).is_none() {
            id
        } else if draft.supplied_id().is_none() {
            fresh_id(employees)
        } else {
            return Err(RepositoryError::DuplicateEmployeeId {
                company: company.clone(),
                id,
            });
        };

        let employee = Employee::new(id, draft.profile);
        employees.push(employee.clone());

        if let Err(err) = self.persist(&state) {
            if created {
                state.remove(company);
            } else if let Some(employees) = state.get_mut(company) {
                employees.pop();
            }
            return Err(err);
        }

        tracing::debug!(%company, id = %employee.id, "added employee");
        Ok(employee)
    }

    /// Replace an employee's profile in place; the id always stays `id`.
    pub async fn update_employee(
        &self,
        company: &CompanyId,
        id: &EmployeeId,
        data: Profile,
    ) -> RepositoryResult<Employee> {
        self.locate(&self.read_state(), company, id)?;

        self.latency.wait(self.delays.write).await;

        let mut state = self.write_state();
        let index = self.locate(&state, company, id)?;
        let updated = Employee::new(id.clone(), data);

        let previous = match state.get_mut(company) {
            Some(employees) => std::mem::replace(&mut employees[index], updated.clone()),
            None => return Err(RepositoryError::CompanyNotFound(company.clone())),
        };

        if let Err(err) = self.persist(&state) {
            if let Some(employees) = state.get_mut(company) {
                employees[index] = previous;
            }
            return Err(err);
        }

        tracing::debug!(%company, %id, "updated employee");
        Ok(updated)
    }

    /// Remove an employee. Returns `true` once removed and persisted.
    pub async fn delete_employee(
        &self,
        company: &CompanyId,
        id: &EmployeeId,
    ) -> RepositoryResult<bool> {
        self.locate(&self.read_state(), company, id)?;

        self.latency.wait(self.delays.write).await;

        let mut state = self.write_state();
        let index = self.locate(&state, company, id)?;
        let removed = match state.get_mut(company) {
            Some(employees) => employees.remove(index),
            None => return Err(RepositoryError::CompanyNotFound(company.clone())),
        };

        if let Err(err) = self.persist(&state) {
            if let Some(employees) = state.get_mut(company) {
                employees.insert(index, removed);
            }
            return Err(err);
        }

        tracing::debug!(%company, %id, "deleted employee");
        Ok(true)
    }

    /// Shared filter text for list views. In memory only.
    pub fn set_search_query(&self, query: impl Into<String>) {
        *self
            .search_query
            .write()
            .unwrap_or_else(PoisonError::into_inner) = query.into();
    }

    pub fn search_query(&self) -> String {
        self.search_query
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Copy of the whole mapping.
    pub fn snapshot(&self) -> EmployeeMap {
        self.read_state().clone()
    }

    fn locate(
        &self,
        state: &EmployeeMap,
        company: &CompanyId,
        id: &EmployeeId,
    ) -> RepositoryResult<usize> {
        let employees = state
            .get(company)
            .ok_or_else(|| RepositoryError::CompanyNotFound(company.clone()))?;
        position_of(employees, id).ok_or_else(|| RepositoryError::EmployeeNotFound {
            company: company.clone(),
            id: id.clone(),
        })
    }

    fn persist(&self, state: &EmployeeMap) -> RepositoryResult<()> {
        let json = serde_json::to_string(state)?;
        self.storage.set(keys::EMPLOYEES, &json)?;
        Ok(())
    }

    fn read_state(&self) -> RwLockReadGuard<'_, EmployeeMap> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, EmployeeMap> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn fresh_id(employees: &[Employee]) -> EmployeeId {
    loop {
        let id = EmployeeId::generate();
        if position_of(employees, &id).is_none() {
            return id;
        }
    }
}
