//! Entity module - flat organisation records
//!
//! Employees and teams as they are stored and exchanged with data sources.
//! Derived trees live in `crate::hierarchy`.

use serde::{Deserialize, Serialize};

pub mod employee;
pub mod team;

pub use employee::{make_employee_id, Employee, EmployeeType};
pub use team::{make_team_id, Team, TeamKind};

/// Functional discipline of an employee or an open position
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stream {
    Engineering,
    Operations,
    Product,
    Portfolio,
    Data,
    Design,
}

impl Stream {
    /// All streams in declaration order
    pub const ALL: [Stream; 6] = [
        Stream::Engineering,
        Stream::Operations,
        Stream::Product,
        Stream::Portfolio,
        Stream::Data,
        Stream::Design,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stream::Engineering => "ENGINEERING",
            Stream::Operations => "OPERATIONS",
            Stream::Product => "PRODUCT",
            Stream::Portfolio => "PORTFOLIO",
            Stream::Data => "DATA",
            Stream::Design => "DESIGN",
        }
    }
}

impl std::fmt::Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower-case `raw` and collapse every run of non-alphanumerics into `_`
pub(crate) fn slugify(raw: &str) -> String {
    let mut id = String::with_capacity(raw.len());
    let mut in_gap = false;

    for ch in raw.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            id.push(ch);
            in_gap = false;
        } else if !in_gap {
            id.push('_');
            in_gap = true;
        }
    }

    id
}
