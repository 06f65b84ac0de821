//! Record store
//!
//! Owns the flat employee and team collections for one chart. Lifecycle is
//! construct → load → read/mutate → save; derived trees are rebuilt from the
//! current collections on every read.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::entity::{
    make_employee_id, make_team_id, Employee, EmployeeType, Stream, Team, TeamKind,
};
use crate::error::{HierarchyError, StoreError};
use crate::hierarchy::{
    build_reporting_hierarchy, build_team_hierarchy, teams_by_id, ReportingNode, TeamIndex,
    TeamNode,
};

/// Persistence shape exchanged with data sources
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_employee: Option<String>,
}

/// Editable fields of an employee
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub stream: Stream,
    #[serde(default)]
    pub reports_to: Option<String>,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default, rename = "type")]
    pub employee_type: EmployeeType,
}

impl EmployeeDraft {
    pub fn new(name: impl Into<String>, stream: Stream) -> Self {
        Self {
            name: name.into(),
            title: String::new(),
            stream,
            reports_to: None,
            number: String::new(),
            github: None,
            start_date: None,
            employee_type: EmployeeType::Employee,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RecordStore {
    employees: Vec<Employee>,
    teams: Vec<Team>,
    root_employee: String,
}

impl RecordStore {
    /// Empty store whose reporting chart is rooted at `root_employee`
    pub fn new(root_employee: impl Into<String>) -> Self {
        Self {
            employees: Vec::new(),
            teams: Vec::new(),
            root_employee: root_employee.into(),
        }
    }

    /// Store holding `snapshot`; `default_root` applies when it names no root employee.
    ///
    /// Fails when two employees or two teams share an id.
    pub fn from_snapshot(snapshot: Snapshot, default_root: &str) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        if let Some(dup) = snapshot.employees.iter().find(|e| !seen.insert(e.id.as_str())) {
            return Err(StoreError::DuplicateEmployee(dup.id.clone()));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = snapshot.teams.iter().find(|t| !seen.insert(t.id.as_str())) {
            return Err(StoreError::DuplicateTeam(dup.id.clone()));
        }

        let root_employee = snapshot
            .root_employee
            .unwrap_or_else(|| default_root.to_string());
        info!(
            "Loaded {} employees and {} teams (root employee {})",
            snapshot.employees.len(),
            snapshot.teams.len(),
            root_employee
        );
        Ok(Self {
            employees: snapshot.employees,
            teams: snapshot.teams,
            root_employee,
        })
    }

    /// Replace the whole contents, keeping the current root when the snapshot has none.
    ///
    /// The store is left untouched when the snapshot is rejected.
    pub fn replace(&mut self, snapshot: Snapshot) -> Result<(), StoreError> {
        *self = Self::from_snapshot(snapshot, &self.root_employee)?;
        Ok(())
    }

    /// Flat copy for persistence, sorted by name
    pub fn snapshot(&self) -> Snapshot {
        let mut employees = self.employees.clone();
        employees.sort_by(|a, b| a.name.cmp(&b.name));
        let mut teams = self.teams.clone();
        teams.sort_by(|a, b| a.name.cmp(&b.name));

        Snapshot {
            employees,
            teams,
            root_employee: Some(self.root_employee.clone()),
        }
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    pub fn from_json(json: &str, default_root: &str) -> Result<Self, StoreError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot, default_root)
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn root_employee(&self) -> &str {
        &self.root_employee
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn teams_by_id(&self) -> TeamIndex<'_> {
        teams_by_id(&self.teams)
    }

    pub fn team_hierarchy(&self) -> Result<Option<TeamNode>, HierarchyError> {
        build_team_hierarchy(&self.employees, &self.teams)
    }

    pub fn reporting_hierarchy(&self) -> Result<ReportingNode, HierarchyError> {
        build_reporting_hierarchy(&self.employees, &self.teams, &self.root_employee)
    }

    /// Members of `team` followed by the members of each ancestor, nearest first
    pub fn upstream_members(&self, team: &str) -> Result<Vec<&Employee>, StoreError> {
        let index = self.teams_by_id();
        let start = index
            .get(team)
            .copied()
            .ok_or_else(|| StoreError::UnknownTeam(team.to_string()))?;
        let employees = &self.employees;

        Ok(crate::hierarchy::ancestors(start, &index)
            .flat_map(move |t| {
                employees
                    .iter()
                    .filter(move |e| e.member_of.as_deref() == Some(t.id.as_str()))
            })
            .collect())
    }

    /// Streams headcount for `team` can be opened in.
    ///
    /// Streams that already carry vacancies, plus one suggestion from the
    /// upstream members: Portfolio if any, else Operations if any, else
    /// Engineering and Product.
    pub fn headcount_streams(&self, team: &str) -> Result<Vec<Stream>, StoreError> {
        let upstream = self.upstream_members(team)?;
        let present = |stream: Stream| upstream.iter().any(|e| e.stream == stream);
        let suggested: &[Stream] = if present(Stream::Portfolio) {
            &[Stream::Portfolio]
        } else if present(Stream::Operations) {
            &[Stream::Operations]
        } else {
            &[Stream::Engineering, Stream::Product]
        };

        let open = self.team(team).map(|t| &t.vacancies);
        Ok(Stream::ALL
            .into_iter()
            .filter(|s| suggested.contains(s) || open.is_some_and(|v| v.contains_key(s)))
            .collect())
    }

    fn team_mut(&mut self, id: &str) -> Result<&mut Team, StoreError> {
        self.teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::UnknownTeam(id.to_string()))
    }

    fn employee_mut(&mut self, id: &str) -> Result<&mut Employee, StoreError> {
        self.employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::UnknownEmployee(id.to_string()))
    }

    fn require_team(&self, id: &str) -> Result<(), StoreError> {
        match self.team(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::UnknownTeam(id.to_string())),
        }
    }

    fn require_employee(&self, id: &str) -> Result<(), StoreError> {
        match self.employee(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::UnknownEmployee(id.to_string())),
        }
    }

    /// Whether `candidate` is `team` or sits below it
    fn is_within(&self, candidate: &str, team: &str) -> bool {
        let index = self.teams_by_id();
        match index.get(candidate) {
            Some(start) => crate::hierarchy::ancestors(start, &index).any(|t| t.id == team),
            None => false,
        }
    }

    pub fn add_team(
        &mut self,
        name: &str,
        kind: TeamKind,
        parent: Option<&str>,
        description: &str,
    ) -> Result<&Team, StoreError> {
        let id = make_team_id(name, kind);
        if self.team(&id).is_some() {
            return Err(StoreError::DuplicateTeam(id));
        }
        if let Some(parent) = parent {
            self.require_team(parent)?;
        }

        let mut team = Team::new(name, kind, parent.map(str::to_string));
        team.description = description.to_string();
        info!("Adding team {} under {:?}", team.id, team.parent);
        self.teams.push(team);

        Ok(&self.teams[self.teams.len() - 1])
    }

    pub fn rename_team(&mut self, id: &str, name: &str) -> Result<(), StoreError> {
        self.team_mut(id)?.name = name.to_string();
        Ok(())
    }

    pub fn describe_team(&mut self, id: &str, description: &str) -> Result<(), StoreError> {
        self.team_mut(id)?.description = description.to_string();
        Ok(())
    }

    /// Move `id` under `parent`; `None` makes it a root candidate
    pub fn reparent_team(&mut self, id: &str, parent: Option<&str>) -> Result<(), StoreError> {
        self.require_team(id)?;
        if let Some(parent) = parent {
            self.require_team(parent)?;
            if self.is_within(parent, id) {
                return Err(StoreError::CyclicParent {
                    team: id.to_string(),
                    parent: parent.to_string(),
                });
            }
        }

        info!("Reparenting team {} to {:?}", id, parent);
        self.team_mut(id)?.parent = parent.map(str::to_string);
        Ok(())
    }

    /// Remove a team; its members become unassigned and its child teams move
    /// up to its parent
    pub fn remove_team(&mut self, id: &str) -> Result<Team, StoreError> {
        let position = self
            .teams
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::UnknownTeam(id.to_string()))?;
        let removed = self.teams.remove(position);

        for employee in &mut self.employees {
            if employee.member_of.as_deref() == Some(id) {
                employee.member_of = None;
            }
        }
        for team in &mut self.teams {
            if team.parent.as_deref() == Some(id) {
                team.parent = removed.parent.clone();
            }
        }

        info!("Removed team {}", id);
        Ok(removed)
    }

    /// Set open headcount for one stream; `None` or zero clears it
    pub fn set_vacancies(&mut self, id: &str, stream: Stream, count: Option<u32>) -> Result<(), StoreError> {
        let team = self.team_mut(id)?;
        match count {
            Some(n) if n > 0 => team.vacancies.insert(stream, n),
            _ => team.vacancies.remove(&stream),
        };
        debug!("Vacancies for {} {} set to {:?}", id, stream, count);
        Ok(())
    }

    /// Set backfill headcount for one stream; `None` or zero clears it
    pub fn set_backfills(&mut self, id: &str, stream: Stream, count: Option<u32>) -> Result<(), StoreError> {
        let team = self.team_mut(id)?;
        match count {
            Some(n) if n > 0 => team.backfills.insert(stream, n),
            _ => team.backfills.remove(&stream),
        };
        debug!("Backfills for {} {} set to {:?}", id, stream, count);
        Ok(())
    }

    pub fn set_tech_lead(&mut self, id: &str, lead: Option<&str>) -> Result<(), StoreError> {
        if let Some(lead) = lead {
            self.require_employee(lead)?;
        }
        self.team_mut(id)?.tech_lead = lead.map(str::to_string);
        Ok(())
    }

    pub fn set_product_lead(&mut self, id: &str, lead: Option<&str>) -> Result<(), StoreError> {
        if let Some(lead) = lead {
            self.require_employee(lead)?;
        }
        self.team_mut(id)?.product_lead = lead.map(str::to_string);
        Ok(())
    }

    /// Checks `draft` as the new contents of employee `id`.
    ///
    /// The explicit `reportsTo` chain above the proposed manager must not
    /// lead back to `id`.
    fn validate_draft(&self, id: &str, draft: &EmployeeDraft) -> Result<(), StoreError> {
        if let Some(date) = draft.start_date.as_deref().filter(|d| !d.is_empty()) {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| StoreError::InvalidStartDate(date.to_string()))?;
        }
        if let Some(manager) = draft.reports_to.as_deref() {
            self.require_employee(manager)?;

            let mut seen = HashSet::new();
            let mut next = Some(manager);
            while let Some(current) = next {
                if current == id {
                    return Err(StoreError::CyclicManager {
                        employee: id.to_string(),
                        manager: manager.to_string(),
                    });
                }
                if !seen.insert(current) {
                    break;
                }
                next = self.employee(current).and_then(|e| e.reports_to.as_deref());
            }
        }
        Ok(())
    }

    fn apply_draft(employee: &mut Employee, draft: EmployeeDraft) {
        employee.name = draft.name;
        employee.title = draft.title;
        employee.stream = draft.stream;
        employee.reports_to = draft.reports_to;
        employee.number = draft.number;
        employee.github = draft.github.filter(|g| !g.is_empty());
        employee.start_date = draft.start_date.filter(|d| !d.is_empty());
        employee.employee_type = draft.employee_type;
    }

    /// Add an unassigned employee with an id derived from the name
    pub fn add_employee(&mut self, draft: EmployeeDraft) -> Result<&Employee, StoreError> {
        let id = make_employee_id(&draft.name);
        if self.employee(&id).is_some() {
            return Err(StoreError::DuplicateEmployee(id));
        }
        self.validate_draft(&id, &draft)?;

        let mut employee = Employee::new(draft.name.clone(), draft.stream);
        Self::apply_draft(&mut employee, draft);
        info!("Adding employee {}", employee.id);
        self.employees.push(employee);

        Ok(&self.employees[self.employees.len() - 1])
    }

    /// Replace the editable fields; the id never changes
    pub fn edit_employee(&mut self, id: &str, draft: EmployeeDraft) -> Result<(), StoreError> {
        self.require_employee(id)?;
        self.validate_draft(id, &draft)?;
        Self::apply_draft(self.employee_mut(id)?, draft);
        Ok(())
    }

    /// Remove an employee and clear every reference to them.
    ///
    /// Reports that named them explicitly fall back to lead inheritance. The
    /// root employee cannot be removed.
    pub fn remove_employee(&mut self, id: &str) -> Result<Employee, StoreError> {
        if id == self.root_employee {
            return Err(StoreError::RootEmployee(id.to_string()));
        }
        let position = self
            .employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| StoreError::UnknownEmployee(id.to_string()))?;
        let removed = self.employees.remove(position);

        for employee in &mut self.employees {
            if employee.reports_to.as_deref() == Some(id) {
                employee.reports_to = None;
            }
        }
        for team in &mut self.teams {
            if team.tech_lead.as_deref() == Some(id) {
                team.tech_lead = None;
            }
            if team.product_lead.as_deref() == Some(id) {
                team.product_lead = None;
            }
        }

        info!("Removed employee {}", id);
        Ok(removed)
    }

    pub fn assign_to_team(&mut self, employee: &str, team: &str) -> Result<(), StoreError> {
        self.require_team(team)?;
        self.employee_mut(employee)?.member_of = Some(team.to_string());
        Ok(())
    }

    pub fn remove_from_team(&mut self, employee: &str) -> Result<(), StoreError> {
        self.employee_mut(employee)?.member_of = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        let mut store = RecordStore::new("boss");
        store.add_employee(EmployeeDraft::new("Boss", Stream::Portfolio)).unwrap();
        store
            .add_team("Tech", TeamKind::Department, None, "everything")
            .unwrap();
        store
            .add_team("Payments", TeamKind::Tribe, Some("tech_department"), "")
            .unwrap();
        store
            .add_team("Checkout", TeamKind::Squad, Some("payments_tribe"), "")
            .unwrap();
        store
    }

    #[test]
    fn test_add_team_derives_id() {
        let store = store();
        assert!(store.team("tech_department").is_some());
        assert_eq!(
            store.team("checkout_squad").unwrap().parent.as_deref(),
            Some("payments_tribe")
        );
    }

    #[test]
    fn test_add_team_rejects_duplicates_and_unknown_parent() {
        let mut store = store();
        assert!(matches!(
            store.add_team("Tech", TeamKind::Department, None, ""),
            Err(StoreError::DuplicateTeam(_))
        ));
        assert!(matches!(
            store.add_team("Ghost", TeamKind::Unit, Some("nowhere"), ""),
            Err(StoreError::UnknownTeam(_))
        ));
    }

    #[test]
    fn test_reparent_rejects_own_subtree() {
        let mut store = store();
        let err = store
            .reparent_team("tech_department", Some("checkout_squad"))
            .unwrap_err();
        assert!(matches!(err, StoreError::CyclicParent { .. }));
        assert!(matches!(
            store.reparent_team("payments_tribe", Some("payments_tribe")),
            Err(StoreError::CyclicParent { .. })
        ));

        store
            .reparent_team("checkout_squad", Some("tech_department"))
            .unwrap();
        let tree = store.team_hierarchy().unwrap().unwrap();
        assert_eq!(tree.children.len(), 2);
    }

    #[test]
    fn test_reports_to_rejects_cycles() {
        let mut store = store();
        store.add_employee(EmployeeDraft::new("Dev", Stream::Engineering)).unwrap();
        store.add_employee(EmployeeDraft::new("Ops", Stream::Operations)).unwrap();

        let mut draft = EmployeeDraft::new("Dev", Stream::Engineering);
        draft.reports_to = Some("dev".to_string());
        assert!(matches!(
            store.edit_employee("dev", draft.clone()),
            Err(StoreError::CyclicManager { .. })
        ));

        draft.reports_to = Some("ops".to_string());
        store.edit_employee("dev", draft).unwrap();

        let mut draft = EmployeeDraft::new("Ops", Stream::Operations);
        draft.reports_to = Some("dev".to_string());
        let err = store.edit_employee("ops", draft).unwrap_err();
        assert!(matches!(err, StoreError::CyclicManager { .. }));
        assert_eq!(store.employee("ops").unwrap().reports_to, None);
        assert!(store.reporting_hierarchy().is_ok());
    }

    #[test]
    fn test_root_employee_cannot_be_removed() {
        let mut store = store();
        assert!(matches!(
            store.remove_employee("boss"),
            Err(StoreError::RootEmployee(_))
        ));
        assert!(store.employee("boss").is_some());
        assert!(store.reporting_hierarchy().is_ok());
    }

    #[test]
    fn test_upstream_members_and_headcount_streams() {
        let mut store = store();
        store.add_employee(EmployeeDraft::new("Dev", Stream::Engineering)).unwrap();
        store.add_employee(EmployeeDraft::new("Ops", Stream::Operations)).unwrap();
        store.assign_to_team("dev", "checkout_squad").unwrap();
        store.assign_to_team("ops", "tech_department").unwrap();

        let ids: Vec<&str> = store
            .upstream_members("checkout_squad")
            .unwrap()
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["dev", "ops"]);
        assert!(matches!(
            store.upstream_members("nowhere"),
            Err(StoreError::UnknownTeam(_))
        ));

        assert_eq!(
            store.headcount_streams("checkout_squad").unwrap(),
            vec![Stream::Operations]
        );

        store.assign_to_team("boss", "tech_department").unwrap();
        store
            .set_vacancies("checkout_squad", Stream::Design, Some(1))
            .unwrap();
        assert_eq!(
            store.headcount_streams("checkout_squad").unwrap(),
            vec![Stream::Portfolio, Stream::Design]
        );
    }

    #[test]
    fn test_headcount_streams_default_suggestion() {
        let store = store();
        assert_eq!(
            store.headcount_streams("payments_tribe").unwrap(),
            vec![Stream::Engineering, Stream::Product]
        );
    }

    #[test]
    fn test_snapshot_rejects_duplicate_ids() {
        let mut store = store();
        let mut snapshot = store.snapshot();
        snapshot.employees.push(snapshot.employees[0].clone());
        assert!(matches!(
            RecordStore::from_snapshot(snapshot, "boss"),
            Err(StoreError::DuplicateEmployee(id)) if id == "boss"
        ));

        let mut snapshot = store.snapshot();
        snapshot.teams.push(snapshot.teams[0].clone());
        let before = store.snapshot();
        assert!(matches!(
            store.replace(snapshot),
            Err(StoreError::DuplicateTeam(_))
        ));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_remove_team_lifts_children_and_unassigns() {
        let mut store = store();
        store.add_employee(EmployeeDraft::new("Dev", Stream::Engineering)).unwrap();
        store.assign_to_team("dev", "payments_tribe").unwrap();

        store.remove_team("payments_tribe").unwrap();

        assert_eq!(store.employee("dev").unwrap().member_of, None);
        assert_eq!(
            store.team("checkout_squad").unwrap().parent.as_deref(),
            Some("tech_department")
        );
        assert!(store.team_hierarchy().unwrap().is_some());
    }

    #[test]
    fn test_remove_employee_clears_references() {
        let mut store = store();
        store.add_employee(EmployeeDraft::new("Lead", Stream::Engineering)).unwrap();
        let mut draft = EmployeeDraft::new("Dev", Stream::Engineering);
        draft.reports_to = Some("lead".to_string());
        store.add_employee(draft).unwrap();
        store.set_tech_lead("payments_tribe", Some("lead")).unwrap();
        store.set_product_lead("payments_tribe", Some("lead")).unwrap();

        store.remove_employee("lead").unwrap();

        assert_eq!(store.employee("dev").unwrap().reports_to, None);
        let team = store.team("payments_tribe").unwrap();
        assert_eq!(team.tech_lead, None);
        assert_eq!(team.product_lead, None);
        assert!(store.reporting_hierarchy().is_ok());
    }

    #[test]
    fn test_headcount_changes() {
        let mut store = store();
        store
            .set_vacancies("checkout_squad", Stream::Engineering, Some(3))
            .unwrap();
        store
            .set_backfills("checkout_squad", Stream::Design, Some(1))
            .unwrap();
        assert_eq!(store.team("checkout_squad").unwrap().vacancies_for(Stream::Engineering), 3);

        store
            .set_vacancies("checkout_squad", Stream::Engineering, None)
            .unwrap();
        store
            .set_backfills("checkout_squad", Stream::Design, Some(0))
            .unwrap();
        let team = store.team("checkout_squad").unwrap();
        assert!(team.vacancies.is_empty());
        assert!(team.backfills.is_empty());
    }

    #[test]
    fn test_employee_validation() {
        let mut store = store();
        let mut draft = EmployeeDraft::new("New Starter", Stream::Design);
        draft.start_date = Some("next tuesday".to_string());
        assert!(matches!(
            store.add_employee(draft.clone()),
            Err(StoreError::InvalidStartDate(_))
        ));

        draft.start_date = Some("2025-03-01".to_string());
        draft.reports_to = Some("nobody".to_string());
        assert!(matches!(
            store.add_employee(draft.clone()),
            Err(StoreError::UnknownEmployee(_))
        ));

        draft.reports_to = None;
        assert_eq!(store.add_employee(draft.clone()).unwrap().id, "new_starter");
        assert!(matches!(
            store.add_employee(draft),
            Err(StoreError::DuplicateEmployee(_))
        ));
    }

    #[test]
    fn test_edit_employee_keeps_id() {
        let mut store = store();
        let mut draft = EmployeeDraft::new("Boss Renamed", Stream::Product);
        draft.start_date = Some(String::new());
        store.edit_employee("boss", draft).unwrap();

        let boss = store.employee("boss").unwrap();
        assert_eq!(boss.name, "Boss Renamed");
        assert_eq!(boss.stream, Stream::Product);
        assert_eq!(boss.start_date, None);
    }

    #[test]
    fn test_assignment() {
        let mut store = store();
        store.add_employee(EmployeeDraft::new("Dev", Stream::Engineering)).unwrap();
        assert!(matches!(
            store.assign_to_team("dev", "nowhere"),
            Err(StoreError::UnknownTeam(_))
        ));
        store.assign_to_team("dev", "checkout_squad").unwrap();
        let tree = store.team_hierarchy().unwrap().unwrap();
        assert_eq!(tree.find("checkout_squad").unwrap().members.len(), 1);

        store.remove_from_team("dev").unwrap();
        assert_eq!(store.employee("dev").unwrap().member_of, None);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut store = store();
        store.add_employee(EmployeeDraft::new("Alice", Stream::Data)).unwrap();
        store
            .set_vacancies("checkout_squad", Stream::Engineering, Some(2))
            .unwrap();

        let json = store.to_json().unwrap();
        let reparsed = RecordStore::from_json(&json, "someone_else").unwrap();

        assert_eq!(reparsed.snapshot(), store.snapshot());
        assert_eq!(reparsed.root_employee(), "boss");
        assert_eq!(reparsed.to_json().unwrap(), json);
    }

    #[test]
    fn test_snapshot_sorted_by_name() {
        let mut store = store();
        store.add_employee(EmployeeDraft::new("Alice", Stream::Data)).unwrap();
        let snapshot = store.snapshot();
        let names: Vec<&str> = snapshot.teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Checkout", "Payments", "Tech"]);
        assert_eq!(snapshot.employees[0].name, "Alice");
    }

    #[test]
    fn test_missing_root_employee_uses_default() {
        let store = RecordStore::from_json(r#"{"employees": [], "teams": []}"#, "fallback").unwrap();
        assert_eq!(store.root_employee(), "fallback");
        assert_eq!(store.team_hierarchy().unwrap(), None);
    }

    #[test]
    fn test_rebuilds_are_idempotent() {
        let store = store();
        let first = store.team_hierarchy().unwrap();
        let second = store.team_hierarchy().unwrap();
        assert_eq!(first, second);
    }
}
