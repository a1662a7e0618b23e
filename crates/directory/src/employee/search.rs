use serde_json::Value;

use super::Employee;

/// Employees whose string profile fields contain `query` (case-insensitive).
///
/// A blank query keeps everything. The id is not searched.
pub fn filter_employees<'a>(employees: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return employees.iter().collect();
    }

    employees
        .iter()
        .filter(|employee| {
            employee.profile.values().any(|value| match value {
                Value::String(text) => text.to_lowercase().contains(&needle),
                _ => false,
            })
        })
        .collect()
}
