//! Employee entity

use serde::{Deserialize, Serialize};

use super::{slugify, Stream};

/// Employment category
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeType {
    #[default]
    Employee,
    Temp,
    Contractor,
    AgencyContractor,
}

impl EmployeeType {
    /// Bracketed tag shown in front of non-permanent staff
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            EmployeeType::Employee => None,
            EmployeeType::Temp => Some("[TMP]"),
            EmployeeType::Contractor => Some("[CON]"),
            EmployeeType::AgencyContractor => Some("[AGN]"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeType::Employee => "EMPLOYEE",
            EmployeeType::Temp => "TEMP",
            EmployeeType::Contractor => "CONTRACTOR",
            EmployeeType::AgencyContractor => "AGENCY_CONTRACTOR",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub title: String,

    /// Explicit manager; resolved through team leads when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports_to: Option<String>,

    /// Team the employee belongs to; absent means unassigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_of: Option<String>,

    pub stream: Stream,

    /// Employee number
    #[serde(default)]
    pub number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,

    /// `YYYY-MM-DD` for people who have not started yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, rename = "type")]
    pub employee_type: EmployeeType,
}

impl Employee {
    /// New unassigned employee with an id derived from `name`
    pub fn new(name: impl Into<String>, stream: Stream) -> Self {
        let name = name.into();
        Self {
            id: make_employee_id(&name),
            name,
            title: String::new(),
            reports_to: None,
            member_of: None,
            stream,
            number: String::new(),
            github: None,
            start_date: None,
            employee_type: EmployeeType::Employee,
        }
    }

    /// Whether this employee holds either lead role on `team`
    pub fn leads(&self, team: &super::Team) -> bool {
        team.tech_lead.as_deref() == Some(self.id.as_str())
            || team.product_lead.as_deref() == Some(self.id.as_str())
    }
}

pub fn make_employee_id(name: &str) -> String {
    slugify(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_id_from_name() {
        assert_eq!(make_employee_id("Ada Lovelace"), "ada_lovelace");
        assert_eq!(Employee::new("Grace B. Hopper", Stream::Data).id, "grace_b_hopper");
    }

    #[test]
    fn test_type_defaults_to_employee() {
        let json = r#"{"id":"a","name":"A","stream":"PRODUCT"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.employee_type, EmployeeType::Employee);
        assert_eq!(employee.member_of, None);
        assert_eq!(employee.title, "");
    }

    #[test]
    fn test_camel_case_fields() {
        let mut employee = Employee::new("A", Stream::Engineering);
        employee.member_of = Some("core_squad".to_string());
        employee.start_date = Some("2024-01-02".to_string());
        employee.employee_type = EmployeeType::AgencyContractor;

        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(value["memberOf"], "core_squad");
        assert_eq!(value["startDate"], "2024-01-02");
        assert_eq!(value["type"], "AGENCY_CONTRACTOR");
        assert!(value.get("reportsTo").is_none());
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(EmployeeType::Employee.tag(), None);
        assert_eq!(EmployeeType::Temp.tag(), Some("[TMP]"));
        assert_eq!(EmployeeType::Contractor.tag(), Some("[CON]"));
        assert_eq!(EmployeeType::AgencyContractor.tag(), Some("[AGN]"));
    }
}
