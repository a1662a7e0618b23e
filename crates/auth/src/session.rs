use serde::{Deserialize, Serialize};

use crate::{Credential, Role};

/// The authenticated actor: a reduced view of the matched credential.
///
/// Persisted as `{"username", "role", "fullName"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub role: Role,
    pub full_name: String,
}

impl From<&Credential> for Session {
    fn from(credential: &Credential) -> Self {
        Self {
            username: credential.username.to_string(),
            role: credential.role,
            full_name: credential.full_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials;

    #[test]
    fn persisted_shape_uses_camel_case_and_lowercase_role() {
        let session = Session::from(&credentials()[2]);
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"username": "Jaime", "role": "hr", "fullName": "Jaime HR"})
        );
    }

    #[test]
    fn session_never_carries_the_password() {
        let session = Session::from(&credentials()[0]);
        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("password"));
    }
}
