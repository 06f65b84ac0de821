//! Team entity

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{slugify, Stream};

/// Organisational tier; display only
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamKind {
    Department,
    Tribe,
    Squad,
    Team,
    Unit,
}

impl TeamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamKind::Department => "DEPARTMENT",
            TeamKind::Tribe => "TRIBE",
            TeamKind::Squad => "SQUAD",
            TeamKind::Team => "TEAM",
            TeamKind::Unit => "UNIT",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,

    pub name: String,

    pub kind: TeamKind,

    /// Parent team id; exactly one team in a chart has none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Open headcount per stream
    #[serde(default)]
    pub vacancies: BTreeMap<Stream, u32>,

    /// Replacement headcount per stream
    #[serde(default)]
    pub backfills: BTreeMap<Stream, u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_lead: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_lead: Option<String>,

    #[serde(default)]
    pub description: String,
}

impl Team {
    pub fn new(name: impl Into<String>, kind: TeamKind, parent: Option<String>) -> Self {
        let name = name.into();
        Self {
            id: make_team_id(&name, kind),
            name,
            kind,
            parent,
            vacancies: BTreeMap::new(),
            backfills: BTreeMap::new(),
            tech_lead: None,
            product_lead: None,
            description: String::new(),
        }
    }

    pub fn vacancies_for(&self, stream: Stream) -> u32 {
        self.vacancies.get(&stream).copied().unwrap_or(0)
    }

    pub fn backfills_for(&self, stream: Stream) -> u32 {
        self.backfills.get(&stream).copied().unwrap_or(0)
    }

    pub fn total_vacancies(&self) -> u32 {
        self.vacancies.values().sum()
    }

    pub fn total_backfills(&self) -> u32 {
        self.backfills.values().sum()
    }
}

pub fn make_team_id(name: &str, kind: TeamKind) -> String {
    slugify(&format!("{}_{}", name, kind.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_from_name_and_kind() {
        assert_eq!(make_team_id("Payments", TeamKind::Squad), "payments_squad");
        assert_eq!(make_team_id("Data & ML", TeamKind::Tribe), "data_ml_tribe");
    }

    #[test]
    fn test_sparse_headcount() {
        let mut team = Team::new("Core", TeamKind::Team, None);
        team.vacancies.insert(Stream::Engineering, 2);
        team.backfills.insert(Stream::Design, 1);

        assert_eq!(team.vacancies_for(Stream::Engineering), 2);
        assert_eq!(team.vacancies_for(Stream::Product), 0);
        assert_eq!(team.total_vacancies(), 2);
        assert_eq!(team.total_backfills(), 1);
    }

    #[test]
    fn test_missing_maps_default_empty() {
        let json = r#"{"id":"root","name":"Root","kind":"DEPARTMENT"}"#;
        let team: Team = serde_json::from_str(json).unwrap();
        assert!(team.vacancies.is_empty());
        assert!(team.backfills.is_empty());
        assert_eq!(team.parent, None);
    }
}
