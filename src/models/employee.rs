//! Employee model.
//!
//! Employees are read-only from this service's point of view: they are
//! maintained directly in the record store and only looked up by PIN.

use serde::{Deserialize, Serialize};

/// Display name used when an employee record has no name.
pub const DEFAULT_DISPLAY_NAME: &str = "Employé";

/// Represents an employee allowed to clock in and out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Record identifier in the store.
    pub id: String,
    /// The PIN code, compared by exact string equality.
    pub pin: String,
    /// Whether the employee may currently clock in. A missing flag reads as false.
    #[serde(default)]
    pub active: bool,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl Employee {
    /// Returns the name to show back to the employee.
    ///
    /// # Examples
    ///
    /// ```
    /// use pointage::models::Employee;
    ///
    /// let anonymous = Employee {
    ///     id: "recEMP1".to_string(),
    ///     pin: "1234".to_string(),
    ///     active: true,
    ///     name: None,
    /// };
    /// assert_eq!(anonymous.display_name(), "Employé");
    /// ```
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_DISPLAY_NAME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(name: Option<&str>) -> Employee {
        Employee {
            id: "recEMP1".to_string(),
            pin: "1234".to_string(),
            active: true,
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_display_name_uses_record_name() {
        let employee = create_test_employee(Some("Jean"));
        assert_eq!(employee.display_name(), "Jean");
    }

    #[test]
    fn test_display_name_defaults_when_missing() {
        let employee = create_test_employee(None);
        assert_eq!(employee.display_name(), DEFAULT_DISPLAY_NAME);
    }

    #[test]
    fn test_display_name_defaults_when_empty() {
        let employee = create_test_employee(Some(""));
        assert_eq!(employee.display_name(), DEFAULT_DISPLAY_NAME);
    }

    #[test]
    fn test_missing_active_flag_deserializes_as_inactive() {
        let json = r#"{"id": "recEMP2", "pin": "0000"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(!employee.active);
        assert_eq!(employee.name, None);
    }
}
