use super::fallback::GeometrySource;
use super::parse::parse_feature_collection;
use super::region::GeoDataset;
use super::remote::BoundarySource;
use super::state::{Resolution, ResolutionTicket};
use crate::prelude::ResolveResult;
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};
use std::sync::Arc;

/// Obtains the boundary dataset for a session, degrading to the embedded
/// macro-regions on any failure.
pub struct GeoDataResolver<S> {
    source: S,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl<S: BoundarySource> GeoDataResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            logger: LogManager::new("geodata"),
            metrics: MetricsRecorder::new(),
        }
    }

    /// Always yields a renderable dataset. Remote failures are logged and
    /// replaced by [`GeometrySource::dataset`].
    pub async fn resolve(&self) -> GeoDataset {
        match self.fetch_remote().await {
            Ok(dataset) => {
                self.metrics.record_remote();
                self.logger.record(&format!(
                    "resolved {} remote regions",
                    dataset.regions().len()
                ));
                dataset
            }
            Err(err) => {
                self.metrics.record_fallback();
                self.logger
                    .warn(&format!("remote boundaries unavailable, using fallback regions: {}", err));
                GeometrySource::dataset()
            }
        }
    }

    /// Resolves on behalf of `ticket`, abandoning the attempt as soon as the
    /// ticket's token is cancelled.
    pub async fn resolve_for(&self, ticket: ResolutionTicket) -> Resolution {
        let token = ticket.token().clone();
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                self.metrics.record_discarded();
                self.logger.trace_discard("resolution cancelled before completion");
                Resolution::cancelled(ticket)
            }
            dataset = self.resolve() => Resolution::completed(ticket, Arc::new(dataset)),
        }
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    async fn fetch_remote(&self) -> ResolveResult<GeoDataset> {
        let body = self.source.fetch().await?;
        parse_feature_collection(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodata::region::DatasetSource;
    use crate::geodata::state::GeoDataState;
    use crate::prelude::ResolveError;
    use std::future::Future;
    use std::time::Duration;

    const ONE_STATE: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"SIGLA_UF":"RN","NM_ESTADO":"Rio Grande do Norte"},
         "geometry":{"type":"Polygon","coordinates":[[[-38,-5],[-35,-5],[-35,-7],[-38,-5]]]}}]}"#;

    enum Canned {
        Body(&'static str),
        Fail(ResolveError),
        Stall,
    }

    impl BoundarySource for Canned {
        fn fetch(&self) -> impl Future<Output = ResolveResult<Vec<u8>>> + Send {
            let outcome = match self {
                Canned::Body(body) => Some(Ok(body.as_bytes().to_vec())),
                Canned::Fail(err) => Some(Err(err.clone())),
                Canned::Stall => None,
            };
            async move {
                match outcome {
                    Some(result) => result,
                    None => {
                        tokio::time::sleep(Duration::from_secs(3600)).await;
                        Err(ResolveError::Network("stalled".into()))
                    }
                }
            }
        }
    }

    #[tokio::test]
    async fn forced_failure_resolves_to_fallback() {
        let resolver = GeoDataResolver::new(Canned::Fail(ResolveError::Network(
            "connection refused".into(),
        )));
        let dataset = resolver.resolve().await;
        assert_eq!(dataset.source(), DatasetSource::Fallback);
        assert_eq!(dataset.region_ids(), vec!["N", "NE", "CO", "SE", "S"]);
        assert_eq!(resolver.metrics().fallback, 1);
    }

    #[tokio::test]
    async fn error_status_resolves_to_fallback() {
        let resolver = GeoDataResolver::new(Canned::Fail(ResolveError::Status(503)));
        assert_eq!(resolver.resolve().await.source(), DatasetSource::Fallback);
    }

    #[tokio::test]
    async fn malformed_payload_is_not_partially_used() {
        let resolver = GeoDataResolver::new(Canned::Body(r#"{"type":"FeatureCollection"}"#));
        let dataset = resolver.resolve().await;
        assert_eq!(dataset.source(), DatasetSource::Fallback);
        assert_eq!(dataset.regions().len(), 5);
    }

    #[tokio::test]
    async fn well_formed_payload_resolves_to_remote() {
        let resolver = GeoDataResolver::new(Canned::Body(ONE_STATE));
        let dataset = resolver.resolve().await;
        assert_eq!(dataset.source(), DatasetSource::Remote);
        assert_eq!(dataset.region_ids(), vec!["RN"]);
        assert_eq!(resolver.metrics().remote, 1);
    }

    #[tokio::test]
    async fn resolving_twice_yields_equal_datasets() {
        let resolver = GeoDataResolver::new(Canned::Body(ONE_STATE));
        let first = resolver.resolve().await;
        let second = resolver.resolve().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn cancelled_ticket_abandons_a_stalled_fetch() {
        let resolver = GeoDataResolver::new(Canned::Stall);
        let mut state = GeoDataState::new();
        let ticket = state.begin();
        state.teardown();

        let resolution = resolver.resolve_for(ticket).await;
        assert!(resolution.dataset().is_none());
        assert!(!state.commit(resolution));
        assert!(state.is_pending());
        assert_eq!(resolver.metrics().discarded, 1);
    }
}
