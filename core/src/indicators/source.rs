use super::snapshot::{IndicatorScope, IndicatorSnapshot};
use crate::prelude::IndicatorResult;
use chrono::Utc;
use std::future::Future;
use std::time::Duration;

/// Asynchronous indicator lookup.
pub trait IndicatorSource: Send + Sync {
    fn fetch(
        &self,
        scope: IndicatorScope,
    ) -> impl Future<Output = IndicatorResult<IndicatorSnapshot>> + Send;
}

const COUNTRY_NAME: &str = "Brasil";

/// Demonstration data with a small artificial delay.
#[derive(Debug, Clone)]
pub struct MockIndicatorSource {
    latency: Duration,
}

impl MockIndicatorSource {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    fn snapshot_for(scope: &IndicatorScope) -> IndicatorSnapshot {
        let name = match scope {
            IndicatorScope::Country => COUNTRY_NAME.to_string(),
            IndicatorScope::Region(id) => region_name(id).unwrap_or(id.as_str()).to_string(),
            IndicatorScope::State(id) => id.clone(),
        };
        IndicatorSnapshot {
            name,
            gdp_growth_pct: 3.2,
            inflation_pct: 4.5,
            debt_to_gdp_pct: 78.5,
            unemployment_pct: 7.8,
            trade_balance_usd_billions: 30.1,
            updated_at: Utc::now(),
        }
    }
}

impl Default for MockIndicatorSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(150))
    }
}

impl IndicatorSource for MockIndicatorSource {
    async fn fetch(&self, scope: IndicatorScope) -> IndicatorResult<IndicatorSnapshot> {
        tokio::time::sleep(self.latency).await;
        Ok(Self::snapshot_for(&scope))
    }
}

fn region_name(id: &str) -> Option<&'static str> {
    match id {
        "N" => Some("Norte"),
        "NE" => Some("Nordeste"),
        "CO" => Some("Centro-Oeste"),
        "SE" => Some("Sudeste"),
        "S" => Some("Sul"),
        _ => None,
    }
}
