//! Headcount statistics and leadership overview
//!
//! Read-only summaries over a team tree and the flat employee list.

use std::collections::HashMap;

use serde::Serialize;

use crate::entity::{Employee, EmployeeType, Stream, Team};
use crate::hierarchy::{flatten, flatten_with_depth, TeamNode};

pub const UNASSIGNED: &str = "Unassigned";

/// Organisation-wide counts for one stream
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamTotals {
    pub stream: Stream,
    pub employees: u32,
    pub vacancies: u32,
    pub backfills: u32,
}

/// Counts for one team restricted to a set of streams
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamBreakdown {
    pub id: String,
    pub name: String,
    pub members: u32,
    pub vacancies: u32,
    pub backfills: u32,
}

/// One line of a people listing
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListing {
    pub id: String,
    pub name: String,
    pub team: String,
    pub detail: String,
}

/// Lead resolved for a team, `own` when the team sets it itself
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadCell {
    pub name: String,
    pub own: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderRow {
    pub id: String,
    pub name: String,
    pub depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_lead: Option<LeadCell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_lead: Option<LeadCell>,
}

/// Members, vacancies and backfills per stream, every stream listed
pub fn stream_totals(tree: &TeamNode) -> Vec<StreamTotals> {
    let mut totals: Vec<StreamTotals> = Stream::ALL
        .iter()
        .map(|stream| StreamTotals {
            stream: *stream,
            employees: 0,
            vacancies: 0,
            backfills: 0,
        })
        .collect();

    for team in flatten(tree, None) {
        for member in &team.members {
            totals[member.stream as usize].employees += 1;
        }
        for (stream, count) in &team.vacancies {
            totals[*stream as usize].vacancies += count;
        }
        for (stream, count) in &team.backfills {
            totals[*stream as usize].backfills += count;
        }
    }

    totals
}

/// Per-team counts for `streams`, pre-order; teams with neither members nor
/// vacancies in those streams are left out
pub fn team_breakdown(tree: &TeamNode, streams: &[Stream]) -> Vec<TeamBreakdown> {
    let count = |openings: &std::collections::BTreeMap<Stream, u32>| -> u32 {
        streams
            .iter()
            .filter_map(|stream| openings.get(stream))
            .sum()
    };

    flatten(tree, None)
        .filter_map(|team| {
            let members = team
                .members
                .iter()
                .filter(|m| streams.contains(&m.stream))
                .count() as u32;
            let vacancies = count(&team.vacancies);
            let backfills = count(&team.backfills);

            if members == 0 && vacancies == 0 {
                return None;
            }

            Some(TeamBreakdown {
                id: team.id.clone(),
                name: team.name.clone(),
                members,
                vacancies,
                backfills,
            })
        })
        .collect()
}

fn listing(
    employee: &Employee,
    teams: &HashMap<&str, &Team>,
    detail: impl Into<String>,
) -> EmployeeListing {
    let team = employee
        .member_of
        .as_deref()
        .and_then(|id| teams.get(id))
        .map(|team| team.name.clone())
        .unwrap_or_else(|| UNASSIGNED.to_string());

    EmployeeListing {
        id: employee.id.clone(),
        name: employee.name.clone(),
        team,
        detail: detail.into(),
    }
}

/// Employees with a start date, detail is the date
pub fn new_starters(employees: &[Employee], teams: &[Team]) -> Vec<EmployeeListing> {
    let index = crate::hierarchy::teams_by_id(teams);
    employees
        .iter()
        .filter_map(|e| e.start_date.as_deref().map(|date| listing(e, &index, date)))
        .collect()
}

/// Temps and contractors, detail is the employment type
pub fn non_employees(employees: &[Employee], teams: &[Team]) -> Vec<EmployeeListing> {
    let index = crate::hierarchy::teams_by_id(teams);
    employees
        .iter()
        .filter(|e| e.employee_type != EmployeeType::Employee)
        .map(|e| listing(e, &index, e.employee_type.as_str()))
        .collect()
}

/// Tech and product lead of every team, inherited from the nearest ancestor
/// that sets one
pub fn leaders_table(tree: &TeamNode) -> Vec<LeaderRow> {
    let mut rows = Vec::new();
    // resolved (tech, product) names for the current ancestor chain
    let mut chain: Vec<(Option<String>, Option<String>)> = Vec::new();

    for (depth, team) in flatten_with_depth(tree, None) {
        chain.truncate(depth);
        let (inherited_tech, inherited_product) = chain.last().cloned().unwrap_or((None, None));

        let cell = |own: &Option<Employee>, inherited: Option<String>| match own {
            Some(lead) => Some(LeadCell {
                name: lead.name.clone(),
                own: true,
            }),
            None => inherited.map(|name| LeadCell { name, own: false }),
        };

        let tech_lead = cell(&team.tech_lead, inherited_tech);
        let product_lead = cell(&team.product_lead, inherited_product);

        chain.push((
            tech_lead.as_ref().map(|c| c.name.clone()),
            product_lead.as_ref().map(|c| c.name.clone()),
        ));

        rows.push(LeaderRow {
            id: team.id.clone(),
            name: team.name.clone(),
            depth,
            tech_lead,
            product_lead,
        });
    }

    rows
}
