//! Team hierarchy builder
//!
//! Turns the flat team collection into a single-rooted tree with members and
//! resolved leads attached to every node.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::{assemble, flatten, HierarchyNode};
use crate::entity::{Employee, Stream, Team, TeamKind};
use crate::error::HierarchyError;

/// Team tree node (snapshot; owns copies of its records)
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamNode {
    pub id: String,
    pub name: String,
    pub kind: TeamKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub vacancies: BTreeMap<Stream, u32>,
    pub backfills: BTreeMap<Stream, u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_lead: Option<Employee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_lead: Option<Employee>,
    pub description: String,
    pub children: Vec<TeamNode>,
    pub members: Vec<Employee>,
}

impl TeamNode {
    fn from_team(
        team: &Team,
        employees: &HashMap<&str, &Employee>,
        members: Vec<Employee>,
        children: Vec<TeamNode>,
    ) -> Self {
        let lead = |id: &Option<String>| {
            id.as_deref()
                .and_then(|id| employees.get(id))
                .map(|employee| (*employee).clone())
        };

        Self {
            id: team.id.clone(),
            name: team.name.clone(),
            kind: team.kind,
            parent: team.parent.clone(),
            vacancies: team.vacancies.clone(),
            backfills: team.backfills.clone(),
            tech_lead: lead(&team.tech_lead),
            product_lead: lead(&team.product_lead),
            description: team.description.clone(),
            children,
            members,
        }
    }

    /// Find a team anywhere in this subtree
    pub fn find(&self, id: &str) -> Option<&TeamNode> {
        flatten(self, None).find(|node| node.id == id)
    }

    /// Number of teams in this subtree, this one included
    pub fn team_count(&self) -> usize {
        flatten(self, None).count()
    }

    pub fn total_vacancies(&self) -> u32 {
        self.vacancies.values().sum()
    }

    pub fn total_backfills(&self) -> u32 {
        self.backfills.values().sum()
    }
}

impl HierarchyNode for TeamNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

/// Build the team tree.
///
/// `Ok(None)` while no parentless team exists yet.
pub fn build_team_hierarchy(
    employees: &[Employee],
    teams: &[Team],
) -> Result<Option<TeamNode>, HierarchyError> {
    let roots: Vec<usize> = teams
        .iter()
        .enumerate()
        .filter(|(_, team)| team.parent.is_none())
        .map(|(slot, _)| slot)
        .collect();

    let root = match roots.as_slice() {
        [] => {
            tracing::debug!("No root team defined, team hierarchy is empty");
            return Ok(None);
        }
        [root] => *root,
        _ => {
            return Err(HierarchyError::MultipleRoots(
                roots.iter().map(|slot| teams[*slot].id.clone()).collect(),
            ))
        }
    };

    let slots: HashMap<&str, usize> = teams
        .iter()
        .enumerate()
        .map(|(slot, team)| (team.id.as_str(), slot))
        .collect();

    let mut children = vec![Vec::new(); teams.len()];
    for (slot, team) in teams.iter().enumerate() {
        if let Some(parent) = team.parent.as_deref() {
            let parent_slot = slots.get(parent).ok_or_else(|| HierarchyError::DanglingParent {
                team: team.id.clone(),
                parent: parent.to_string(),
            })?;
            children[*parent_slot].push(slot);
        }
    }

    let mut members: Vec<Vec<Employee>> = vec![Vec::new(); teams.len()];
    for employee in employees {
        if let Some(team_id) = employee.member_of.as_deref() {
            let slot = slots.get(team_id).ok_or_else(|| HierarchyError::DanglingMember {
                employee: employee.id.clone(),
                team: team_id.to_string(),
            })?;
            members[*slot].push(employee.clone());
        }
    }

    let employees_by_id: HashMap<&str, &Employee> =
        employees.iter().map(|e| (e.id.as_str(), e)).collect();

    let records: Vec<(usize, Vec<Employee>)> = members.into_iter().enumerate().collect();

    let tree = assemble(root, records, &children, |(slot, members), kids| {
        TeamNode::from_team(&teams[slot], &employees_by_id, members, kids)
    })
    .map_err(|unreached| {
        HierarchyError::CyclicHierarchy(
            unreached.into_iter().map(|slot| teams[slot].id.clone()).collect(),
        )
    })?;

    tracing::debug!("Built team hierarchy rooted at {} ({} teams)", tree.id, teams.len());

    Ok(Some(tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::flatten;

    fn team(id: &str, kind: TeamKind, parent: Option<&str>) -> Team {
        let mut team = Team::new(id, kind, parent.map(str::to_string));
        team.id = id.to_string();
        team
    }

    fn employee(id: &str, member_of: Option<&str>) -> Employee {
        let mut employee = Employee::new(id, Stream::Engineering);
        employee.id = id.to_string();
        employee.member_of = member_of.map(str::to_string);
        employee
    }

    #[test]
    fn test_root_with_one_squad() {
        let teams = vec![
            team("root", TeamKind::Department, None),
            team("a", TeamKind::Squad, Some("root")),
        ];
        let employees = vec![employee("e1", Some("a"))];

        let tree = build_team_hierarchy(&employees, &teams).unwrap().unwrap();

        assert_eq!(tree.id, "root");
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].id, "a");
        assert_eq!(tree.children[0].members, vec![employees[0].clone()]);
        assert!(tree.members.is_empty());
    }

    #[test]
    fn test_dangling_parent() {
        let teams = vec![
            team("root", TeamKind::Department, None),
            team("a", TeamKind::Squad, Some("missing")),
        ];

        let err = build_team_hierarchy(&[], &teams).unwrap_err();
        assert_eq!(
            err,
            HierarchyError::DanglingParent {
                team: "a".to_string(),
                parent: "missing".to_string(),
            }
        );
    }

    #[test]
    fn test_no_root_is_empty() {
        assert_eq!(build_team_hierarchy(&[], &[]).unwrap(), None);

        let teams = vec![
            team("a", TeamKind::Squad, Some("b")),
            team("b", TeamKind::Squad, Some("a")),
        ];
        assert_eq!(build_team_hierarchy(&[], &teams).unwrap(), None);
    }

    #[test]
    fn test_multiple_roots() {
        let teams = vec![
            team("x", TeamKind::Department, None),
            team("a", TeamKind::Squad, Some("x")),
            team("y", TeamKind::Department, None),
        ];

        let err = build_team_hierarchy(&[], &teams).unwrap_err();
        assert_eq!(
            err,
            HierarchyError::MultipleRoots(vec!["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn test_dangling_member() {
        let teams = vec![team("root", TeamKind::Department, None)];
        let employees = vec![employee("e1", Some("nowhere"))];

        let err = build_team_hierarchy(&employees, &teams).unwrap_err();
        assert_eq!(
            err,
            HierarchyError::DanglingMember {
                employee: "e1".to_string(),
                team: "nowhere".to_string(),
            }
        );
    }

    #[test]
    fn test_cycle_below_root_is_rejected() {
        let teams = vec![
            team("root", TeamKind::Department, None),
            team("a", TeamKind::Squad, Some("b")),
            team("b", TeamKind::Squad, Some("a")),
            team("self", TeamKind::Unit, Some("self")),
        ];

        let err = build_team_hierarchy(&[], &teams).unwrap_err();
        assert_eq!(
            err,
            HierarchyError::CyclicHierarchy(vec!["a".into(), "b".into(), "self".into()])
        );
    }

    #[test]
    fn test_every_team_recovered_once() {
        let teams = vec![
            team("root", TeamKind::Department, None),
            team("t1", TeamKind::Tribe, Some("root")),
            team("s1", TeamKind::Squad, Some("t1")),
            team("t2", TeamKind::Tribe, Some("root")),
            team("s2", TeamKind::Squad, Some("t1")),
            team("u1", TeamKind::Unit, Some("s2")),
        ];

        let tree = build_team_hierarchy(&[], &teams).unwrap().unwrap();
        let ids: Vec<&str> = flatten(&tree, None).map(|n| n.id.as_str()).collect();

        assert_eq!(tree.team_count(), teams.len());
        assert_eq!(ids, vec!["root", "t1", "s1", "s2", "u1", "t2"]);
    }

    #[test]
    fn test_leads_resolved_and_stale_ignored() {
        let mut root = team("root", TeamKind::Department, None);
        root.tech_lead = Some("cto".to_string());
        root.product_lead = Some("departed".to_string());
        let teams = vec![root];
        let employees = vec![employee("cto", None)];

        let tree = build_team_hierarchy(&employees, &teams).unwrap().unwrap();

        assert_eq!(tree.tech_lead.as_ref().map(|e| e.id.as_str()), Some("cto"));
        assert_eq!(tree.product_lead, None);
    }

    #[test]
    fn test_inputs_untouched_and_snapshot_detached() {
        let teams = vec![
            team("root", TeamKind::Department, None),
            team("a", TeamKind::Squad, Some("root")),
        ];
        let employees = vec![employee("e1", Some("a"))];
        let before = (teams.clone(), employees.clone());

        let mut tree = build_team_hierarchy(&employees, &teams).unwrap().unwrap();
        tree.children[0].members[0].name = "changed".to_string();
        tree.children.clear();

        assert_eq!((teams, employees), before);
    }

    #[test]
    fn test_members_keep_collection_order() {
        let teams = vec![team("root", TeamKind::Department, None)];
        let employees = vec![
            employee("z", Some("root")),
            employee("unassigned", None),
            employee("a", Some("root")),
        ];

        let tree = build_team_hierarchy(&employees, &teams).unwrap().unwrap();
        let ids: Vec<&str> = tree.members.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a"]);
    }

    #[test]
    fn test_find() {
        let teams = vec![
            team("root", TeamKind::Department, None),
            team("a", TeamKind::Squad, Some("root")),
        ];
        let tree = build_team_hierarchy(&[], &teams).unwrap().unwrap();
        assert_eq!(tree.find("a").map(|n| n.name.as_str()), Some("a"));
        assert!(tree.find("zzz").is_none());
    }
}
