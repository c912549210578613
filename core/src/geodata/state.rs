use super::region::GeoDataset;
use crate::telemetry::LogManager;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Lifecycle of the boundary dataset as seen by the renderer.
#[derive(Debug, Clone, Default)]
pub enum GeoStatus {
    #[default]
    Pending,
    Ready(Arc<GeoDataset>),
}

/// Identifies one resolution attempt. Carries the token that the owner
/// cancels on teardown.
#[derive(Debug, Clone)]
pub struct ResolutionTicket {
    generation: u64,
    token: CancellationToken,
}

impl ResolutionTicket {
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Result of a resolution attempt, waiting to be committed.
#[derive(Debug, Clone)]
pub struct Resolution {
    ticket: ResolutionTicket,
    dataset: Option<Arc<GeoDataset>>,
}

impl Resolution {
    pub fn completed(ticket: ResolutionTicket, dataset: Arc<GeoDataset>) -> Self {
        Self {
            ticket,
            dataset: Some(dataset),
        }
    }

    pub fn cancelled(ticket: ResolutionTicket) -> Self {
        Self {
            ticket,
            dataset: None,
        }
    }

    pub fn dataset(&self) -> Option<&GeoDataset> {
        self.dataset.as_deref()
    }
}

/// Owner of the externally visible dataset.
///
/// A resolution only lands if its ticket is the latest one issued and its
/// token has not been cancelled; anything else is dropped untouched.
pub struct GeoDataState {
    status: GeoStatus,
    generation: u64,
    token: Option<CancellationToken>,
    logger: LogManager,
}

impl GeoDataState {
    pub fn new() -> Self {
        Self {
            status: GeoStatus::Pending,
            generation: 0,
            token: None,
            logger: LogManager::new("geodata"),
        }
    }

    pub fn status(&self) -> &GeoStatus {
        &self.status
    }

    pub fn dataset(&self) -> Option<&GeoDataset> {
        match &self.status {
            GeoStatus::Pending => None,
            GeoStatus::Ready(dataset) => Some(dataset),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, GeoStatus::Pending)
    }

    /// Starts a new attempt, cancelling any attempt still in flight. The
    /// current dataset stays visible until the new one is committed.
    pub fn begin(&mut self) -> ResolutionTicket {
        if let Some(previous) = self.token.take() {
            previous.cancel();
        }
        self.generation += 1;
        let token = CancellationToken::new();
        self.token = Some(token.clone());
        ResolutionTicket {
            generation: self.generation,
            token,
        }
    }

    /// Applies a finished resolution. Returns `false` when it was discarded.
    pub fn commit(&mut self, resolution: Resolution) -> bool {
        let Resolution { ticket, dataset } = resolution;
        if ticket.is_cancelled() || ticket.generation != self.generation {
            self.logger.trace_discard(&format!(
                "dropping resolution #{} (current #{})",
                ticket.generation, self.generation
            ));
            return false;
        }
        let Some(dataset) = dataset else {
            return false;
        };
        self.logger.record(&format!(
            "committed {} regions from {} source",
            dataset.regions().len(),
            dataset.source()
        ));
        self.status = GeoStatus::Ready(dataset);
        self.token = None;
        true
    }

    /// Cancels the in-flight attempt, if any. Late results are ignored.
    pub fn teardown(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}

impl Default for GeoDataState {
    fn default() -> Self {
        Self::new()
    }
}
