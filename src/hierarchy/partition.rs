//! Partition layout adapter
//!
//! Shapes a team or reporting tree for a radial partition (sunburst) renderer.
//! Members, vacancies and backfills become synthetic leaves; every leaf weighs
//! the same so arc sizes follow leaf counts. Angles and radii are left to the
//! renderer.

use serde::{Serialize, Serializer};

use super::{fold_tree, HierarchyNode, ReportingNode, TeamNode};
use crate::entity::{Employee, EmployeeType, Stream, TeamKind};

/// Weight of every leaf
pub const LEAF_WEIGHT: u64 = 100;

/// Own weight of every node with children
pub const INTERNAL_WEIGHT: u64 = 0;

pub const TECHNOLOGY_BOARD: &str = "technology_board";
pub const PRODUCT_BOARD: &str = "product_board";

/// Which synthetic nodes to add below each team
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartitionOptions {
    pub show_members: bool,
    pub show_vacancies: bool,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self {
            show_members: true,
            show_vacancies: true,
        }
    }
}

/// Synthetic top-level grouping of several charts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Board {
    Technology,
    Product,
}

impl Board {
    pub fn id(&self) -> &'static str {
        match self {
            Board::Technology => TECHNOLOGY_BOARD,
            Board::Product => PRODUCT_BOARD,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Board::Technology => "Technology Board",
            Board::Product => "Product Board",
        }
    }
}

/// People in a team subtree against the headcount it is planned for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Headcount {
    pub actual: u32,
    pub target: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartitionVariant {
    Board(Board),
    Team { kind: TeamKind, headcount: Headcount },
    Member { employee_type: EmployeeType, stream: Stream, start_date: Option<String> },
    Vacancy { stream: Stream },
    Backfill { stream: Stream },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionNode {
    pub id: String,
    pub name: String,
    pub variant: PartitionVariant,
    /// Summed leaf weight of this subtree
    pub value: u64,
    pub children: Vec<PartitionNode>,
}

impl PartitionNode {
    fn with_children(id: String, name: String, variant: PartitionVariant, children: Vec<PartitionNode>) -> Self {
        let value = if children.is_empty() {
            LEAF_WEIGHT
        } else {
            INTERNAL_WEIGHT + children.iter().map(|c| c.value).sum::<u64>()
        };
        Self {
            id,
            name,
            variant,
            value,
            children,
        }
    }

    fn member(employee: &Employee, children: Vec<PartitionNode>) -> Self {
        Self::with_children(
            employee.id.clone(),
            employee.name.clone(),
            PartitionVariant::Member {
                employee_type: employee.employee_type,
                stream: employee.stream,
                start_date: employee.start_date.clone(),
            },
            children,
        )
    }

    fn opening(team_id: &str, stream: Stream, index: u32, backfill: bool) -> Self {
        let (prefix, variant) = if backfill {
            ("backfill", PartitionVariant::Backfill { stream })
        } else {
            ("vacancy", PartitionVariant::Vacancy { stream })
        };
        Self::with_children(
            format!("{}_{}_{}_{}", prefix, team_id, stream, index),
            stream.to_string(),
            variant,
            Vec::new(),
        )
    }

    /// Group several charts below a synthetic board root
    pub fn board(board: Board, children: Vec<PartitionNode>) -> Self {
        Self::with_children(
            board.id().to_string(),
            board.display_name().to_string(),
            PartitionVariant::Board(board),
            children,
        )
    }

    /// Own weight as fed to the partition layout
    pub fn weight(&self) -> u64 {
        if self.children.is_empty() {
            LEAF_WEIGHT
        } else {
            INTERNAL_WEIGHT
        }
    }

    /// Text the renderer prints on the arc
    pub fn label(&self) -> String {
        match self.id.as_str() {
            TECHNOLOGY_BOARD => return Board::Technology.display_name().to_string(),
            PRODUCT_BOARD => return Board::Product.display_name().to_string(),
            _ => {}
        }

        match &self.variant {
            PartitionVariant::Board(board) => board.display_name().to_string(),
            PartitionVariant::Team { headcount, .. } => {
                format!("{} {}/{}", self.name, headcount.actual, headcount.target)
            }
            PartitionVariant::Member { employee_type, .. } => match employee_type.tag() {
                Some(tag) => format!("{} {}", tag, self.name),
                None => self.name.clone(),
            },
            PartitionVariant::Vacancy { .. } => format!("[HC] {}", self.name),
            PartitionVariant::Backfill { .. } => format!("[BF] {}", self.name),
        }
    }

    /// Node kind as exposed to the renderer
    pub fn kind(&self) -> &'static str {
        match &self.variant {
            PartitionVariant::Board(_) => "board",
            PartitionVariant::Team { kind, .. } => kind.as_str(),
            PartitionVariant::Member { .. } => "EMPLOYEE",
            PartitionVariant::Vacancy { .. } => "vacancy",
            PartitionVariant::Backfill { .. } => "backfill",
        }
    }
}

impl HierarchyNode for PartitionNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PartitionNodeView<'a> {
    id: &'a str,
    name: &'a str,
    label: String,
    kind: &'static str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    employee_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<Stream>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headcount: Option<Headcount>,
    value: u64,
    children: &'a [PartitionNode],
}

impl Serialize for PartitionNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (employee_type, stream, start_date, headcount) = match &self.variant {
            PartitionVariant::Team { headcount, .. } => (None, None, None, Some(*headcount)),
            PartitionVariant::Member {
                employee_type,
                stream,
                start_date,
            } => (Some(employee_type.as_str()), Some(*stream), start_date.as_deref(), None),
            PartitionVariant::Vacancy { stream } | PartitionVariant::Backfill { stream } => {
                (None, Some(*stream), None, None)
            }
            PartitionVariant::Board(_) => (None, None, None, None),
        };

        PartitionNodeView {
            id: &self.id,
            name: &self.name,
            label: self.label(),
            kind: self.kind(),
            employee_type,
            stream,
            start_date,
            headcount,
            value: self.value,
            children: &self.children,
        }
        .serialize(serializer)
    }
}

/// A derived tree the partition chart can display
pub trait DisplayTree {
    fn to_partition(&self, options: PartitionOptions) -> PartitionNode;
}

impl DisplayTree for TeamNode {
    fn to_partition(&self, options: PartitionOptions) -> PartitionNode {
        fold_tree(self, |team: &TeamNode, kids: Vec<(PartitionNode, Headcount)>| {
            let mut headcount = Headcount::default();
            let mut children = Vec::with_capacity(kids.len());
            for (child, child_headcount) in kids {
                headcount.actual += child_headcount.actual;
                headcount.target += child_headcount.target;
                children.push(child);
            }

            let members = team.members.len() as u32;
            headcount.actual += members;
            headcount.target += members + team.total_vacancies() + team.total_backfills();

            if options.show_members {
                children.extend(team.members.iter().map(|m| PartitionNode::member(m, Vec::new())));
            }

            if options.show_vacancies {
                for (stream, count) in &team.vacancies {
                    children.extend((1..=*count).map(|n| PartitionNode::opening(&team.id, *stream, n, false)));
                }
                for (stream, count) in &team.backfills {
                    children.extend((1..=*count).map(|n| PartitionNode::opening(&team.id, *stream, n, true)));
                }
            }

            let node = PartitionNode::with_children(
                team.id.clone(),
                team.name.clone(),
                PartitionVariant::Team {
                    kind: team.kind,
                    headcount,
                },
                children,
            );
            (node, headcount)
        })
        .0
    }
}

impl DisplayTree for ReportingNode {
    /// Reporting charts carry no members or openings; `options` has no effect
    fn to_partition(&self, _options: PartitionOptions) -> PartitionNode {
        fold_tree(self, |node: &ReportingNode, kids| PartitionNode::member(&node.employee, kids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Team;
    use crate::hierarchy::{build_reporting_hierarchy, build_team_hierarchy, flatten};

    fn team(id: &str, parent: Option<&str>) -> Team {
        let mut team = Team::new(id, TeamKind::Squad, parent.map(str::to_string));
        team.id = id.to_string();
        team
    }

    fn employee(id: &str, member_of: &str) -> Employee {
        let mut employee = Employee::new(id, Stream::Engineering);
        employee.id = id.to_string();
        employee.member_of = Some(member_of.to_string());
        employee
    }

    fn chart() -> TeamNode {
        let mut root = team("root", None);
        root.name = "Root".to_string();
        root.kind = TeamKind::Department;
        let mut a = team("a", Some("root"));
        a.name = "A".to_string();
        a.vacancies.insert(Stream::Engineering, 2);
        a.backfills.insert(Stream::Product, 1);
        let teams = vec![root, a];
        let employees = vec![employee("e1", "a"), employee("e2", "root")];
        build_team_hierarchy(&employees, &teams).unwrap().unwrap()
    }

    fn ids(node: &PartitionNode) -> Vec<&str> {
        node.children.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_vacancy_leaves() {
        let partition = chart().to_partition(PartitionOptions {
            show_members: false,
            show_vacancies: true,
        });
        let a = &partition.children[0];

        assert_eq!(
            ids(a),
            vec!["vacancy_a_ENGINEERING_1", "vacancy_a_ENGINEERING_2", "backfill_a_PRODUCT_1"]
        );
        assert_eq!(a.children[0].kind(), "vacancy");
        assert_eq!(a.children[0].name, "ENGINEERING");
        assert_eq!(a.children[2].kind(), "backfill");
    }

    #[test]
    fn test_children_then_members_then_openings() {
        let partition = chart().to_partition(PartitionOptions::default());
        assert_eq!(ids(&partition), vec!["a", "e2"]);
        assert_eq!(
            ids(&partition.children[0]),
            vec!["e1", "vacancy_a_ENGINEERING_1", "vacancy_a_ENGINEERING_2", "backfill_a_PRODUCT_1"]
        );
    }

    #[test]
    fn test_toggles_off_leave_plain_tree() {
        let partition = chart().to_partition(PartitionOptions {
            show_members: false,
            show_vacancies: false,
        });
        assert_eq!(ids(&partition), vec!["a"]);
        assert!(partition.children[0].children.is_empty());
    }

    #[test]
    fn test_leaf_weights_drive_values() {
        let partition = chart().to_partition(PartitionOptions::default());

        // a: e1 + 2 vacancies + 1 backfill; root: a's leaves + e2
        assert_eq!(partition.children[0].value, 4 * LEAF_WEIGHT);
        assert_eq!(partition.value, 5 * LEAF_WEIGHT);
        assert_eq!(partition.weight(), INTERNAL_WEIGHT);
        assert_eq!(partition.children[1].weight(), LEAF_WEIGHT);

        let leaves = flatten(&partition, None).filter(|n| n.children.is_empty()).count() as u64;
        assert_eq!(partition.value, leaves * LEAF_WEIGHT);
    }

    #[test]
    fn test_team_labels_show_headcount() {
        let partition = chart().to_partition(PartitionOptions::default());
        assert_eq!(partition.children[0].label(), "A 1/4");
        assert_eq!(partition.label(), "Root 2/5");
    }

    #[test]
    fn test_member_and_opening_labels() {
        let mut contractor = employee("c", "a");
        contractor.name = "Casey".to_string();
        contractor.employee_type = EmployeeType::Contractor;

        assert_eq!(PartitionNode::member(&contractor, Vec::new()).label(), "[CON] Casey");
        contractor.employee_type = EmployeeType::Temp;
        assert_eq!(PartitionNode::member(&contractor, Vec::new()).label(), "[TMP] Casey");
        contractor.employee_type = EmployeeType::AgencyContractor;
        assert_eq!(PartitionNode::member(&contractor, Vec::new()).label(), "[AGN] Casey");
        contractor.employee_type = EmployeeType::Employee;
        assert_eq!(PartitionNode::member(&contractor, Vec::new()).label(), "Casey");

        assert_eq!(PartitionNode::opening("a", Stream::Data, 1, false).label(), "[HC] DATA");
        assert_eq!(PartitionNode::opening("a", Stream::Data, 1, true).label(), "[BF] DATA");
    }

    #[test]
    fn test_board_roots() {
        let board = PartitionNode::board(Board::Technology, vec![chart().to_partition(PartitionOptions::default())]);
        assert_eq!(board.id, "technology_board");
        assert_eq!(board.label(), "Technology Board");
        assert_eq!(board.value, 5 * LEAF_WEIGHT);
        assert_eq!(PartitionNode::board(Board::Product, Vec::new()).label(), "Product Board");
    }

    #[test]
    fn test_reporting_tree_partition() {
        let teams = vec![team("root", None)];
        let mut boss = employee("boss", "root");
        boss.member_of = None;
        let employees = vec![boss, employee("dev", "root")];
        let tree = build_reporting_hierarchy(&employees, &teams, "boss").unwrap();

        let partition = tree.to_partition(PartitionOptions::default());
        assert_eq!(partition.id, "boss");
        assert_eq!(ids(&partition), vec!["dev"]);
        assert_eq!(partition.kind(), "EMPLOYEE");
        assert_eq!(partition.value, LEAF_WEIGHT);
    }

    #[test]
    fn test_serialized_shape() {
        let partition = chart().to_partition(PartitionOptions::default());
        let value = serde_json::to_value(&partition).unwrap();

        assert_eq!(value["id"], "root");
        assert_eq!(value["kind"], "DEPARTMENT");
        assert_eq!(value["headcount"]["target"], 5);
        let a = &value["children"][0];
        assert_eq!(a["children"][0]["type"], "EMPLOYEE");
        assert_eq!(a["children"][1]["kind"], "vacancy");
        assert_eq!(a["children"][1]["label"], "[HC] ENGINEERING");
        assert_eq!(a["children"][1]["stream"], "ENGINEERING");
    }
}
