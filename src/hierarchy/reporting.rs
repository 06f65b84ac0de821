//! Reporting hierarchy builder
//!
//! Management tree over every employee. Explicit `reportsTo` wins; otherwise
//! an employee reports to the nearest lead above them for their stream, and
//! to the root employee when nobody qualifies.

use std::collections::HashMap;

use serde::Serialize;

use super::{ancestors, assemble, teams_by_id, HierarchyNode, LeadRole, TeamIndex};
use crate::entity::{Employee, Team};
use crate::error::HierarchyError;

/// Employee copy with its reports; `employee.reports_to` holds the resolved manager
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportingNode {
    #[serde(flatten)]
    pub employee: Employee,
    pub children: Vec<ReportingNode>,
}

impl HierarchyNode for ReportingNode {
    fn id(&self) -> &str {
        &self.employee.id
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

/// Manager id for `employee`.
///
/// A team lead reports to the lead of the parent team, never to themself; when
/// the nearest lead for their role is the employee again the search continues
/// further up.
pub fn resolve_manager<'a>(
    employee: &'a Employee,
    index: &TeamIndex<'a>,
    root: &'a str,
) -> Result<&'a str, HierarchyError> {
    let Some(team_id) = employee.member_of.as_deref() else {
        return Ok(root);
    };

    if let Some(manager) = employee.reports_to.as_deref() {
        return Ok(manager);
    }

    let mut team = index.get(team_id).copied().ok_or_else(|| HierarchyError::DanglingMember {
        employee: employee.id.clone(),
        team: team_id.to_string(),
    })?;

    if employee.leads(team) {
        match team.parent.as_deref().and_then(|parent| index.get(parent).copied()) {
            Some(parent) => team = parent,
            None => return Ok(root),
        }
    }

    let role = LeadRole::for_stream(employee.stream);
    let manager = ancestors(team, index)
        .filter_map(|t| role.of(t))
        .find(|lead| *lead != employee.id);

    Ok(manager.unwrap_or(root))
}

/// Build the reporting tree rooted at `root_employee`
pub fn build_reporting_hierarchy(
    employees: &[Employee],
    teams: &[Team],
    root_employee: &str,
) -> Result<ReportingNode, HierarchyError> {
    let index = teams_by_id(teams);

    let slots: HashMap<&str, usize> = employees
        .iter()
        .enumerate()
        .map(|(slot, employee)| (employee.id.as_str(), slot))
        .collect();

    let mut children = vec![Vec::new(); employees.len()];
    let mut managers: Vec<Option<String>> = vec![None; employees.len()];

    for (slot, employee) in employees.iter().enumerate() {
        if employee.id == root_employee {
            continue;
        }

        let manager = resolve_manager(employee, &index, root_employee)?;
        let manager_slot = slots.get(manager).ok_or_else(|| HierarchyError::MissingManagerNode {
            employee: employee.id.clone(),
            manager: manager.to_string(),
        })?;

        children[*manager_slot].push(slot);
        managers[slot] = Some(manager.to_string());
    }

    let root = *slots
        .get(root_employee)
        .ok_or_else(|| HierarchyError::UnknownRootEmployee(root_employee.to_string()))?;

    let records: Vec<(usize, Option<String>)> = managers.into_iter().enumerate().collect();

    let tree = assemble(root, records, &children, |(slot, manager), kids| {
        let mut employee = employees[slot].clone();
        employee.reports_to = manager;
        ReportingNode {
            employee,
            children: kids,
        }
    })
    .map_err(|unreached| {
        HierarchyError::CyclicHierarchy(
            unreached
                .into_iter()
                .map(|slot| employees[slot].id.clone())
                .collect(),
        )
    })?;

    tracing::debug!(
        "Built reporting hierarchy rooted at {} ({} employees)",
        root_employee,
        employees.len()
    );

    Ok(tree)
}
