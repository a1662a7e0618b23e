//! Company directory (static, read-only).

use orgdir_core::CompanyId;
use serde::Serialize;

/// Company metadata. The set is fixed at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: &'static str,
    pub full_name: &'static str,
    pub description: &'static str,
    /// CSS color expression used by the presentation layer.
    pub color: &'static str,
}

static COMPANIES: [Company; 3] = [
    Company {
        id: CompanyId::from_static("nsh"),
        name: "NSH Corporation",
        full_name: "Nueva Sociedad Hotelera",
        description: "A leading technology company specializing in software solutions.",
        color: "var(--color-nsh)",
    },
    Company {
        id: CompanyId::from_static("tsn"),
        name: "TSN ",
        full_name: "Turismo y Servicios Nacionales",
        description: "Providing innovative networking and communication solutions.",
        color: "var(--color-tsn)",
    },
    Company {
        id: CompanyId::from_static("oth"),
        name: "OTH ",
        full_name: "O T H",
        description: "Hotel industrial technology solutions provider.",
        color: "var(--color-oth)",
    },
];

/// Lookup over the fixed company list.
#[derive(Debug, Clone, Copy)]
pub struct CompanyDirectory {
    companies: &'static [Company],
}

impl Default for CompanyDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyDirectory {
    pub fn new() -> Self {
        Self {
            companies: &COMPANIES,
        }
    }

    /// Every company, in declaration order.
    pub fn list_companies(&self) -> &'static [Company] {
        self.companies
    }

    /// Exact, case-sensitive id match.
    pub fn get_company(&self, id: &str) -> Option<&'static Company> {
        self.companies.iter().find(|c| c.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get_company(id).is_some()
    }
}
