use crate::geodata::DatasetSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Level at which a snapshot is requested.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "id", rename_all = "lowercase")]
pub enum IndicatorScope {
    Country,
    Region(String),
    State(String),
}

impl IndicatorScope {
    /// Scope for a clicked region: fallback regions are macro-regions,
    /// remote features are states.
    pub fn for_region(source: DatasetSource, id: &str) -> Self {
        match source {
            DatasetSource::Fallback => IndicatorScope::Region(id.to_string()),
            DatasetSource::Remote => IndicatorScope::State(id.to_string()),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            IndicatorScope::Country => None,
            IndicatorScope::Region(id) | IndicatorScope::State(id) => Some(id),
        }
    }
}

impl fmt::Display for IndicatorScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorScope::Country => f.write_str("country"),
            IndicatorScope::Region(id) => write!(f, "region {}", id),
            IndicatorScope::State(id) => write!(f, "state {}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub name: String,
    pub gdp_growth_pct: f64,
    pub inflation_pct: f64,
    pub debt_to_gdp_pct: f64,
    pub unemployment_pct: f64,
    pub trade_balance_usd_billions: f64,
    pub updated_at: DateTime<Utc>,
}
