use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::state::DisruptionState;

pub const SCHEMA_VERSION: &str = "1.0.0";

/// Queue label -> state, in table column order.
pub type QueueSchedule = IndexMap<String, DisruptionState>;

/// Unix seconds of local midnight (as a string) -> that day's schedule.
pub type DayRecord = IndexMap<String, QueueSchedule>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub region_id: String,
    pub last_updated: String,
    pub fact: Fact,
    pub last_update_status: UpdateStatus,
    pub meta: Meta,
    pub region_affiliation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fact {
    pub data: DayRecord,
    pub update_fact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatus {
    pub status: String,
    pub ok: bool,
    pub code: u16,
    pub message: Option<String>,
    pub at: String,
    pub attempt: u32,
}

impl UpdateStatus {
    pub fn parsed(at: String) -> Self {
        Self {
            status: "parsed".to_string(),
            ok: true,
            code: 200,
            message: None,
            at,
            attempt: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub schema_version: String,
    pub content_hash: String,
}
