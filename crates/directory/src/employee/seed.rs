//! Bundled default dataset, used when nothing is persisted yet.

use super::EmployeeMap;

const DEFAULT_DATASET: &str = include_str!("../../data/employees.json");

pub fn default_dataset() -> Result<EmployeeMap, serde_json::Error> {
    serde_json::from_str(DEFAULT_DATASET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgdir_core::CompanyId;
    use std::collections::HashSet;

    #[test]
    fn bundled_dataset_parses_and_covers_every_company() {
        let map = default_dataset().unwrap();
        for id in ["nsh", "tsn", "oth"] {
            let employees = &map[&CompanyId::from_static(id)];
            assert!(!employees.is_empty(), "no seed employees for {id}");
        }
    }

    #[test]
    fn bundled_ids_are_unique_per_company() {
        for (company, employees) in default_dataset().unwrap() {
            let ids: HashSet<_> = employees.iter().map(|e| e.id.clone()).collect();
            assert_eq!(ids.len(), employees.len(), "duplicate ids in {company}");
        }
    }
}
