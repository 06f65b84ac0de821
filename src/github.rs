//! GitHub team sync planning
//!
//! Every chart team maps to one GitHub team named `{prefix}{id}` with `_`
//! turned into `-`. Team members are the employees assigned to the team;
//! maintainers are the team's own tech and product leads. Reconciling the
//! plan against a listing of the organisation yields what a sync would
//! change. Nothing here talks to GitHub.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::RecordStore;

pub const DEFAULT_TEAM_PREFIX: &str = "org-";

pub fn team_slug(prefix: &str, team_id: &str) -> String {
    format!("{}{}", prefix, team_id.replace('_', "-"))
}

/// Desired state of one GitHub team
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPlan {
    /// Chart team id
    pub team: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub members: Vec<String>,
    pub maintainers: Vec<String>,
}

impl TeamPlan {
    /// Members then maintainers, each login once
    pub fn logins(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.members
            .iter()
            .chain(&self.maintainers)
            .map(String::as_str)
            .filter(|login| seen.insert(*login))
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPlan {
    pub teams: Vec<TeamPlan>,
    /// Assigned employees without a GitHub login
    pub missing_members: Vec<String>,
    /// Team leads without a GitHub login
    pub missing_maintainers: Vec<String>,
}

/// Desired GitHub teams for every chart team, in collection order
pub fn plan(store: &RecordStore, prefix: &str) -> SyncPlan {
    let mut plan = SyncPlan::default();

    for team in store.teams() {
        let mut members = Vec::new();
        for employee in store
            .employees()
            .iter()
            .filter(|e| e.member_of.as_deref() == Some(team.id.as_str()))
        {
            match employee.github.as_deref() {
                Some(login) => members.push(login.to_string()),
                None => plan.missing_members.push(employee.id.clone()),
            }
        }

        let mut maintainers = Vec::new();
        for lead in [&team.tech_lead, &team.product_lead]
            .into_iter()
            .flatten()
            .filter_map(|id| store.employee(id))
        {
            match lead.github.as_deref() {
                Some(login) => maintainers.push(login.to_string()),
                None => plan.missing_maintainers.push(lead.id.clone()),
            }
        }

        plan.teams.push(TeamPlan {
            team: team.id.clone(),
            slug: team_slug(prefix, &team.id),
            parent: team.parent.as_deref().map(|p| team_slug(prefix, p)),
            members,
            maintainers,
        });
    }

    plan
}

/// Listing of a GitHub organisation, as exported from its API
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubOrg {
    /// Member logins
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub teams: Vec<GithubTeam>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubTeam {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipChange {
    pub team: String,
    pub add: Vec<String>,
    pub remove: Vec<String>,
}

/// What a sync of `plan` into an organisation would do
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// Employee ids whose login is not an organisation member
    pub employees_not_in_github: Vec<String>,
    /// Organisation logins no employee carries
    pub github_members_not_in_chart: Vec<String>,
    pub teams_to_create: Vec<String>,
    /// Prefixed GitHub teams with no chart team
    pub teams_to_remove: Vec<String>,
    pub teams_to_reparent: Vec<String>,
    pub membership: Vec<MembershipChange>,
    pub missing_members: Vec<String>,
    pub missing_maintainers: Vec<String>,
}

/// Compare `plan` with `org`.
///
/// Only GitHub teams whose name starts with `prefix` take part. With
/// `skip_members` no membership changes are computed.
pub fn reconcile(
    store: &RecordStore,
    plan: &SyncPlan,
    org: &GithubOrg,
    prefix: &str,
    skip_members: bool,
) -> SyncReport {
    let org_members: HashSet<&str> = org.members.iter().map(String::as_str).collect();
    let chart_logins: HashSet<&str> = store
        .employees()
        .iter()
        .filter_map(|e| e.github.as_deref())
        .collect();
    let managed: Vec<&GithubTeam> = org
        .teams
        .iter()
        .filter(|t| t.name.starts_with(prefix))
        .collect();
    let find = |slug: &str| managed.iter().copied().find(|t| t.name == slug);

    let mut report = SyncReport {
        employees_not_in_github: store
            .employees()
            .iter()
            .filter(|e| e.github.as_deref().is_some_and(|g| !org_members.contains(g)))
            .map(|e| e.id.clone())
            .collect(),
        github_members_not_in_chart: org
            .members
            .iter()
            .filter(|login| !chart_logins.contains(login.as_str()))
            .cloned()
            .collect(),
        teams_to_remove: managed
            .iter()
            .filter(|t| !plan.teams.iter().any(|p| p.slug == t.name))
            .map(|t| t.name.clone())
            .collect(),
        missing_members: plan.missing_members.clone(),
        missing_maintainers: plan.missing_maintainers.clone(),
        ..SyncReport::default()
    };

    for wanted in &plan.teams {
        let existing = find(&wanted.slug);
        match existing {
            None => report.teams_to_create.push(wanted.slug.clone()),
            Some(current) if current.parent != wanted.parent => {
                report.teams_to_reparent.push(wanted.slug.clone())
            }
            Some(_) => {}
        }

        if skip_members {
            continue;
        }

        let desired = wanted.logins();
        let current: Vec<&str> = existing
            .map(|t| t.members.iter().map(String::as_str).collect())
            .unwrap_or_default();

        let add: Vec<String> = desired
            .iter()
            .filter(|login| !current.contains(login))
            .map(|login| login.to_string())
            .collect();
        let remove: Vec<String> = current
            .iter()
            .filter(|login| !desired.contains(login))
            .map(|login| login.to_string())
            .collect();

        if add.is_empty() && remove.is_empty() {
            continue;
        }
        debug!(
            "Team {}: adding [{}], removing [{}]",
            wanted.slug,
            add.join(", "),
            remove.join(", ")
        );
        report.membership.push(MembershipChange {
            team: wanted.slug.clone(),
            add,
            remove,
        });
    }

    report
}
