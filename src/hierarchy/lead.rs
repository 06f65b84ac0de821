//! Upward lead resolution
//!
//! An employee without an explicit manager reports to the nearest team lead
//! above them for their stream's lead role.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::entity::{Stream, Team};

/// Team lookup by id, borrowed from the record store
pub type TeamIndex<'a> = HashMap<&'a str, &'a Team>;

pub fn teams_by_id(teams: &[Team]) -> TeamIndex<'_> {
    teams.iter().map(|team| (team.id.as_str(), team)).collect()
}

/// Leadership role a team can define
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeadRole {
    TechLead,
    ProductLead,
}

impl LeadRole {
    /// Role an employee of `stream` reports into
    pub fn for_stream(stream: Stream) -> Self {
        match stream {
            Stream::Product | Stream::Design | Stream::Data => LeadRole::ProductLead,
            Stream::Engineering | Stream::Operations => LeadRole::TechLead,
            _ => LeadRole::TechLead,
        }
    }

    /// Lead id this role names on `team`
    pub fn of<'a>(&self, team: &'a Team) -> Option<&'a str> {
        match self {
            LeadRole::TechLead => team.tech_lead.as_deref(),
            LeadRole::ProductLead => team.product_lead.as_deref(),
        }
    }
}

/// Walks from a team up through its ancestors.
///
/// Stops at a missing parent and at the first repeated team, so a corrupt
/// parent chain cannot loop forever.
pub struct Ancestors<'i, 'a> {
    next: Option<&'a Team>,
    index: &'i TeamIndex<'a>,
    seen: HashSet<&'a str>,
}

impl<'i, 'a> Iterator for Ancestors<'i, 'a> {
    type Item = &'a Team;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if !self.seen.insert(current.id.as_str()) {
            return None;
        }
        self.next = current
            .parent
            .as_deref()
            .and_then(|parent| self.index.get(parent).copied());
        Some(current)
    }
}

/// `team` followed by each of its ancestors, nearest first
pub fn ancestors<'i, 'a>(team: &'a Team, index: &'i TeamIndex<'a>) -> Ancestors<'i, 'a> {
    Ancestors {
        next: Some(team),
        index,
        seen: HashSet::new(),
    }
}

/// Nearest lead for `role`, starting at `team` itself.
///
/// `None` when no team on the way up defines the role.
pub fn resolve_lead<'a>(team: &'a Team, index: &TeamIndex<'a>, role: LeadRole) -> Option<&'a str> {
    ancestors(team, index).find_map(|t| role.of(t))
}
