//! Flat export rows for downstream reporting
//!
//! Team ancestry and reporting lines are `::`-joined id paths starting at the
//! root. Rows are written as JSON lines or as CSV with a header row.

use std::io::Write;

use serde::Serialize;

use crate::entity::{Stream, Team};
use crate::error::HierarchyError;
use crate::hierarchy::{ancestors, flatten_with_depth, resolve_lead, LeadRole, TeamIndex};
use crate::store::RecordStore;

pub const PATH_SEPARATOR: &str = "::";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmployeeExport {
    pub id: String,
    pub name: String,
    pub stream: Stream,
    #[serde(rename = "type")]
    pub employee_type: String,
    /// Team ancestry ending with the employee's own team, empty when unassigned
    pub team: String,
    /// Managers from the root down to the direct manager
    pub reporting: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamExport {
    pub id: String,
    pub name: String,
    pub parents: String,
    pub tech_lead: String,
    pub product_lead: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningType {
    New,
    Backfill,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VacancyExport {
    #[serde(rename = "type")]
    pub opening_type: OpeningType,
    pub team: String,
    pub stream: Stream,
    pub count: u32,
}

/// Output encoding of export rows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    JsonLines,
    Csv,
}

pub fn write_rows<T: Serialize, W: Write>(rows: &[T], format: Format, mut out: W) -> anyhow::Result<()> {
    match format {
        Format::JsonLines => {
            for row in rows {
                serde_json::to_writer(&mut out, row)?;
                writeln!(out)?;
            }
        }
        Format::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn team_path(team: &Team, index: &TeamIndex<'_>, include_self: bool) -> String {
    let mut path: Vec<&str> = ancestors(team, index).map(|t| t.id.as_str()).collect();
    if !include_self {
        path.remove(0);
    }
    path.reverse();
    path.join(PATH_SEPARATOR)
}

pub fn employee_exports(store: &RecordStore) -> Result<Vec<EmployeeExport>, HierarchyError> {
    let tree = store.reporting_hierarchy()?;
    let index = store.teams_by_id();

    let mut rows = Vec::with_capacity(store.employees().len());
    let mut line: Vec<&str> = Vec::new();

    for (depth, node) in flatten_with_depth(&tree, None) {
        line.truncate(depth);
        let employee = &node.employee;

        let team = employee
            .member_of
            .as_deref()
            .and_then(|id| index.get(id))
            .map(|team| team_path(team, &index, true))
            .unwrap_or_default();

        rows.push(EmployeeExport {
            id: employee.id.clone(),
            name: employee.name.clone(),
            stream: employee.stream,
            employee_type: employee.employee_type.as_str().to_string(),
            team,
            reporting: line.join(PATH_SEPARATOR),
        });

        line.push(&employee.id);
    }

    Ok(rows)
}

/// Teams in collection order; a lead no team above defines falls back to the
/// root employee
pub fn team_exports(store: &RecordStore) -> Vec<TeamExport> {
    let index = store.teams_by_id();
    let root = store.root_employee();

    store
        .teams()
        .iter()
        .map(|team| TeamExport {
            id: team.id.clone(),
            name: team.name.clone(),
            parents: team_path(team, &index, false),
            tech_lead: resolve_lead(team, &index, LeadRole::TechLead)
                .unwrap_or(root)
                .to_string(),
            product_lead: resolve_lead(team, &index, LeadRole::ProductLead)
                .unwrap_or(root)
                .to_string(),
        })
        .collect()
}

/// One row per team, stream and opening type with a non-zero count
pub fn vacancy_exports(store: &RecordStore) -> Vec<VacancyExport> {
    let mut rows = Vec::new();

    for team in store.teams() {
        for stream in Stream::ALL {
            let openings = [
                (OpeningType::New, team.vacancies_for(stream)),
                (OpeningType::Backfill, team.backfills_for(stream)),
            ];
            for (opening_type, count) in openings {
                if count > 0 {
                    rows.push(VacancyExport {
                        opening_type,
                        team: team.id.clone(),
                        stream,
                        count,
                    });
                }
            }
        }
    }

    rows
}
