use super::snapshot::{IndicatorScope, IndicatorSnapshot};
use crate::prelude::IndicatorResult;
use crate::telemetry::LogManager;
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// Handle for one outstanding lookup; only the newest one is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorTicket(u64);

/// One line of the indicator card.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub label: &'static str,
    pub description: &'static str,
    pub value: String,
    pub emphasized: bool,
}

/// Loading flag and last-known snapshot for the indicator card.
pub struct IndicatorPanel {
    scope: IndicatorScope,
    loading: bool,
    snapshot: Option<IndicatorSnapshot>,
    latest: u64,
    logger: LogManager,
}

impl IndicatorPanel {
    pub fn new(scope: IndicatorScope) -> Self {
        Self {
            scope,
            loading: false,
            snapshot: None,
            latest: 0,
            logger: LogManager::new("indicators"),
        }
    }

    pub fn scope(&self) -> &IndicatorScope {
        &self.scope
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn snapshot(&self) -> Option<&IndicatorSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn title(&self) -> String {
        match &self.scope {
            IndicatorScope::Country => "Indicadores do Brasil".to_string(),
            IndicatorScope::Region(id) | IndicatorScope::State(id) => {
                let name = self
                    .snapshot
                    .as_ref()
                    .map(|snapshot| snapshot.name.as_str())
                    .unwrap_or(id.as_str());
                format!("Indicadores de {}", name)
            }
        }
    }

    /// Switches scope and starts a lookup for it.
    pub fn select(&mut self, scope: IndicatorScope) -> (IndicatorTicket, IndicatorScope) {
        if scope != self.scope {
            self.snapshot = None;
            self.scope = scope;
        }
        self.begin_refresh()
    }

    /// Marks the panel as loading and returns the request to issue.
    pub fn begin_refresh(&mut self) -> (IndicatorTicket, IndicatorScope) {
        self.latest += 1;
        self.loading = true;
        (IndicatorTicket(self.latest), self.scope.clone())
    }

    /// Applies a lookup result. Stale tickets are ignored; failures keep
    /// the last-known snapshot.
    pub fn complete(
        &mut self,
        ticket: IndicatorTicket,
        result: IndicatorResult<IndicatorSnapshot>,
    ) -> bool {
        if ticket.0 != self.latest {
            self.logger
                .trace_discard(&format!("ignoring stale indicator response #{}", ticket.0));
            return false;
        }
        self.loading = false;
        match result {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                true
            }
            Err(err) => {
                self.logger
                    .warn(&format!("indicator lookup for {} failed: {}", self.scope, err));
                false
            }
        }
    }

    /// Rows to display, or `None` while the skeleton should be shown.
    pub fn rows(&self) -> Option<Vec<StatRow>> {
        if self.loading {
            return None;
        }
        self.snapshot.as_ref().map(stat_rows)
    }

    pub fn updated_at_label(&self) -> Option<String> {
        self.snapshot
            .as_ref()
            .map(|snapshot| {
                let local = snapshot.updated_at.with_timezone(&Local);
                format!("Atualizado em: {}", format_timestamp(&local))
            })
    }
}

pub fn stat_rows(snapshot: &IndicatorSnapshot) -> Vec<StatRow> {
    vec![
        StatRow {
            label: "PIB",
            description: "Taxa de crescimento anual",
            value: format!("{:.1}%", snapshot.gdp_growth_pct),
            emphasized: true,
        },
        StatRow {
            label: "Inflação",
            description: "Índice de Preços ao Consumidor",
            value: format!("{:.1}%", snapshot.inflation_pct),
            emphasized: false,
        },
        StatRow {
            label: "Dívida Pública",
            description: "Relação dívida/PIB",
            value: format!("{:.1}%", snapshot.debt_to_gdp_pct),
            emphasized: false,
        },
        StatRow {
            label: "Desemprego",
            description: "Taxa de desemprego",
            value: format!("{:.1}%", snapshot.unemployment_pct),
            emphasized: false,
        },
        StatRow {
            label: "Setor Externo",
            description: "Balança comercial (US$ bi)",
            value: format!("US$ {:.1} bi", snapshot.trade_balance_usd_billions),
            emphasized: false,
        },
    ]
}

pub fn format_timestamp<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    timestamp.format("%d/%m/%Y %H:%M:%S").to_string()
}
