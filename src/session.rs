use std::fs;
use std::io;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::QueryDescriptor;

// Unused fields in the settings document carry this sentinel, including
// an absent min or max bound.
const SENTINEL: &str = "-1";

// The persisted form of the last query, one record overwritten after
// every successful report.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "settings")]
struct SessionState {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    selection: String,
    #[serde(default)]
    min: String,
    #[serde(default)]
    max: String,
}

impl SessionState {
    fn from_query(query: &QueryDescriptor) -> Self {
        match query {
            QueryDescriptor::ByCountry { country } => Self {
                kind: "C".into(),
                selection: country.clone(),
                min: SENTINEL.into(),
                max: SENTINEL.into(),
            },
            QueryDescriptor::BySourceType { source_type } => Self {
                kind: "S".into(),
                selection: source_type.clone(),
                min: SENTINEL.into(),
                max: SENTINEL.into(),
            },
            QueryDescriptor::ByPercentRange { min, max } => Self {
                kind: "P".into(),
                selection: SENTINEL.into(),
                min: encode_bound(*min),
                max: encode_bound(*max),
            },
        }
    }

    fn into_query(self) -> Option<QueryDescriptor> {
        match self.kind.as_str() {
            "C" if !self.selection.is_empty() => Some(QueryDescriptor::ByCountry {
                country: self.selection,
            }),
            "S" if !self.selection.is_empty() => Some(QueryDescriptor::BySourceType {
                source_type: self.selection,
            }),
            "P" => Some(QueryDescriptor::ByPercentRange {
                min: decode_bound(&self.min)?,
                max: decode_bound(&self.max)?,
            }),
            _ => None,
        }
    }
}

fn encode_bound(bound: Option<Decimal>) -> String {
    bound.map(|d| d.to_string()).unwrap_or_else(|| SENTINEL.into())
}

fn decode_bound(raw: &str) -> Option<Option<Decimal>> {
    if raw == SENTINEL {
        return Some(None);
    }
    raw.parse::<Decimal>().ok().map(Some)
}

// A missing or undecodable settings file is simply "no prior session";
// loading never fails.
pub fn load(path: &Path) -> Option<QueryDescriptor> {
    decode(&fs::read_to_string(path).ok()?)
}

pub fn decode(text: &str) -> Option<QueryDescriptor> {
    quick_xml::de::from_str::<SessionState>(text)
        .ok()?
        .into_query()
}

pub fn save(path: &Path, query: &QueryDescriptor) -> io::Result<()> {
    fs::write(path, encode(query)?)
}

pub fn encode(query: &QueryDescriptor) -> io::Result<String> {
    quick_xml::se::to_string(&SessionState::from_query(query)).map_err(io::Error::other)
}
