//! Employee model and related types.
//!
//! This module defines the Employee struct together with the employee class
//! and contract size enums used by the scheduling rules.

use serde::{Deserialize, Serialize};

/// The scheduling class of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeClass {
    /// An ordinary schedulable employee.
    Regular,
    /// An experienced employee, qualified to supervise trainees.
    Experienced,
    /// A trainee; may only work shifts with an experienced employee present.
    Trainee,
    /// A manager; excluded from the optimization model and assigned only via
    /// the deterministic preference-driven pass after solving.
    Manager,
}

/// The contract size of an employee, which fixes their shift quota for the
/// planning horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractSize {
    /// Exactly one shift over the horizon.
    Small,
    /// Exactly two shifts over the horizon.
    Large,
    /// Treated identically to Large. See the contract quota rule for why.
    Flexible,
}

/// Represents an employee on the roster for one solve call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Human-readable name, used in violation messages and reports.
    pub display_name: String,
    /// The scheduling class of the employee.
    pub employee_class: EmployeeClass,
    /// The contract size, which determines the shift quota.
    pub contract_size: ContractSize,
    /// Whether the employee may be the sole worker on a shift.
    pub can_work_alone: bool,
    /// Whether the employee is active. Inactive employees are never modeled.
    pub is_active: bool,
}

impl Employee {
    /// Returns true if the employee participates in the optimization model:
    /// active and not a manager.
    pub fn is_schedulable(&self) -> bool {
        self.is_active && self.employee_class != EmployeeClass::Manager
    }

    /// Returns true if the employee is a manager.
    pub fn is_manager(&self) -> bool {
        self.employee_class == EmployeeClass::Manager
    }

    /// Returns true if the employee is a trainee.
    pub fn is_trainee(&self) -> bool {
        self.employee_class == EmployeeClass::Trainee
    }

    /// Returns true if the employee counts as supervision for trainees.
    pub fn is_experienced(&self) -> bool {
        self.employee_class == EmployeeClass::Experienced
    }

    /// Returns the exact number of shifts this employee must work over the
    /// horizon. Small contracts get 1; large and flexible contracts get 2.
    pub fn shift_quota(&self) -> i64 {
        match self.contract_size {
            ContractSize::Small => 1,
            ContractSize::Large | ContractSize::Flexible => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_employee(class: EmployeeClass) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            display_name: "Alex Berg".to_string(),
            employee_class: class,
            contract_size: ContractSize::Large,
            can_work_alone: true,
            is_active: true,
        }
    }

    #[test]
    fn test_deserialize_employee() {
        let json = r#"{
            "id": "emp_001",
            "display_name": "Alex Berg",
            "employee_class": "experienced",
            "contract_size": "small",
            "can_work_alone": true,
            "is_active": true
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.employee_class, EmployeeClass::Experienced);
        assert_eq!(employee.contract_size, ContractSize::Small);
        assert!(employee.can_work_alone);
    }

    #[test]
    fn test_serialize_round_trip() {
        let employee = make_employee(EmployeeClass::Trainee);
        let json = serde_json::to_string(&employee).unwrap();
        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }

    #[test]
    fn test_employee_class_serialization() {
        assert_eq!(
            serde_json::to_string(&EmployeeClass::Manager).unwrap(),
            "\"manager\""
        );
        assert_eq!(
            serde_json::to_string(&ContractSize::Flexible).unwrap(),
            "\"flexible\""
        );
    }

    #[test]
    fn test_manager_is_not_schedulable() {
        let manager = make_employee(EmployeeClass::Manager);
        assert!(manager.is_manager());
        assert!(!manager.is_schedulable());
    }

    #[test]
    fn test_inactive_employee_is_not_schedulable() {
        let mut employee = make_employee(EmployeeClass::Regular);
        employee.is_active = false;
        assert!(!employee.is_schedulable());
    }

    #[test]
    fn test_regular_active_employee_is_schedulable() {
        let employee = make_employee(EmployeeClass::Regular);
        assert!(employee.is_schedulable());
        assert!(!employee.is_trainee());
        assert!(!employee.is_experienced());
    }

    #[test]
    fn test_shift_quota_by_contract_size() {
        let mut employee = make_employee(EmployeeClass::Regular);
        employee.contract_size = ContractSize::Small;
        assert_eq!(employee.shift_quota(), 1);
        employee.contract_size = ContractSize::Large;
        assert_eq!(employee.shift_quota(), 2);
        employee.contract_size = ContractSize::Flexible;
        assert_eq!(employee.shift_quota(), 2);
    }
}
