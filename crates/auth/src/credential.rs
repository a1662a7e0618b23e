//! Fixed credential table.

use crate::Role;

/// A username/password record. The table is compiled in and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credential {
    pub username: &'static str,
    pub password: &'static str,
    pub role: Role,
    pub full_name: &'static str,
}

impl Credential {
    /// Username compared case-insensitively, password exactly.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username.to_lowercase() == username.to_lowercase() && self.password == password
    }
}

static CREDENTIALS: [Credential; 6] = [
    Credential {
        username: "Kenneth",
        password: "Admin",
        role: Role::Admin,
        full_name: "Kenneth Chavez",
    },
    Credential {
        username: "Admin",
        password: "Admin",
        role: Role::Admin,
        full_name: "Administrator",
    },
    Credential {
        username: "Jaime",
        password: "RRHH",
        role: Role::Hr,
        full_name: "Jaime HR",
    },
    Credential {
        username: "Victor",
        password: "RRHH2025",
        role: Role::Hr,
        full_name: "Victor HR",
    },
    Credential {
        username: "Guillermo",
        password: "Gerencia",
        role: Role::Manager,
        full_name: "Guillermo Orellana",
    },
    Credential {
        username: "Natalia",
        password: "Larach",
        role: Role::Executive,
        full_name: "Natalia Larach",
    },
];

/// The built-in credentials, in match-priority order.
pub fn credentials() -> &'static [Credential] {
    &CREDENTIALS
}

/// First credential in `table` accepting the pair.
pub(crate) fn find_match<'a>(
    table: &'a [Credential],
    username: &str,
    password: &str,
) -> Option<&'a Credential> {
    table.iter().find(|c| c.matches(username, password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_ignores_case_but_password_does_not() {
        let kenneth = &credentials()[0];
        assert!(kenneth.matches("KENNETH", "Admin"));
        assert!(kenneth.matches("kenneth", "Admin"));
        assert!(!kenneth.matches("Kenneth", "admin"));
    }

    #[test]
    fn first_matching_record_wins() {
        let table = [
            Credential {
                username: "Dup",
                password: "pw",
                role: Role::Hr,
                full_name: "First",
            },
            Credential {
                username: "dup",
                password: "pw",
                role: Role::Admin,
                full_name: "Second",
            },
        ];
        let found = find_match(&table, "DUP", "pw").unwrap();
        assert_eq!(found.full_name, "First");
    }

    #[test]
    fn table_covers_every_role() {
        for role in Role::ALL {
            assert!(credentials().iter().any(|c| c.role == role));
        }
    }
}
