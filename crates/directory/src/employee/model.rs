use std::collections::BTreeMap;

use orgdir_core::{CompanyId, EmployeeId, Entity};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form profile fields (name, position, ...). Never contains `id`.
pub type Profile = serde_json::Map<String, Value>;

/// Company id → ordered employee sequence. This is the persisted blob.
pub type EmployeeMap = BTreeMap<CompanyId, Vec<Employee>>;

/// A stored employee: repository-owned id plus arbitrary profile fields.
///
/// Serialized flat: `{"id": "...", "firstName": "...", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(flatten)]
    pub profile: Profile,
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> &EmployeeId {
        &self.id
    }
}

impl Employee {
    /// Build a stored record; an `id` key inside `profile` is discarded.
    pub fn new(id: EmployeeId, mut profile: Profile) -> Self {
        profile.remove("id");
        Self { id, profile }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.profile.get(name)
    }

    /// String value of a profile field, if it is a string.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }
}

/// Input to `add_employee`: profile fields and an optional caller id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    #[serde(flatten)]
    pub profile: Profile,
}

impl EmployeeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a profile field. Setting `"id"` to a string sets the draft id.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        if name == "id" {
            self.id = value.as_str().map(EmployeeId::from);
        } else {
            self.profile.insert(name, value);
        }
        self
    }

    pub fn with_id(mut self, id: impl Into<EmployeeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The caller-supplied id, if it is present and not blank.
    pub(crate) fn supplied_id(&self) -> Option<&EmployeeId> {
        self.id.as_ref().filter(|id| !id.is_blank())
    }
}
