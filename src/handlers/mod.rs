//! Request handlers module

pub mod chart;
pub mod data;
pub mod employee;
pub mod team;

use serde::Deserialize;

/// Query parameters naming a single record
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: String,
}
