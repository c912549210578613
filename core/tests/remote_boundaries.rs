use choroplethcore::geodata::{
    BoundarySource, DatasetSource, GeoDataResolver, GeoDataState, HttpBoundarySource,
};
use choroplethcore::ResolveError;
use std::net::SocketAddr;
use std::time::Duration;
use warp::http::StatusCode;
use warp::Filter;

const STATES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": { "SIGLA_UF": "RN", "NM_ESTADO": "Rio Grande do Norte" },
            "geometry": { "type": "Polygon", "coordinates": [[[-38.6, -4.8], [-35.0, -5.1], [-35.1, -6.5], [-38.2, -6.4], [-38.6, -4.8]]] }
        },
        {
            "type": "Feature",
            "properties": { "SIGLA_UF": "PB", "NM_ESTADO": "Paraíba" },
            "geometry": { "type": "Polygon", "coordinates": [[[-38.7, -6.0], [-34.8, -6.6], [-34.9, -8.0], [-38.5, -7.5], [-38.7, -6.0]]] }
        }
    ]
}"#;

fn spawn_server() -> SocketAddr {
    let states = warp::path("states")
        .map(|| warp::reply::with_header(STATES, "content-type", "application/geo+json"));
    let failing = warp::path("failing")
        .map(|| warp::reply::with_status("boom", StatusCode::INTERNAL_SERVER_ERROR));
    let garbage = warp::path("garbage").map(|| "<html>maintenance</html>");
    let slow = warp::path("slow").and_then(|| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok::<_, warp::Rejection>(STATES)
    });

    let (addr, server) = warp::serve(states.or(failing).or(garbage).or(slow))
        .bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

fn source(addr: SocketAddr, path: &str) -> HttpBoundarySource {
    HttpBoundarySource::new(format!("http://{}/{}", addr, path), Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn well_formed_payload_is_used() {
    let addr = spawn_server();
    let resolver = GeoDataResolver::new(source(addr, "states"));
    let dataset = resolver.resolve().await;
    assert_eq!(dataset.source(), DatasetSource::Remote);
    assert_eq!(dataset.region_ids(), vec!["RN", "PB"]);
    assert_eq!(dataset.region("PB").unwrap().accessible_label(), "Paraíba");
}

#[tokio::test]
async fn server_error_falls_back() {
    let addr = spawn_server();
    let http = source(addr, "failing");
    assert_eq!(http.fetch().await, Err(ResolveError::Status(500)));

    let dataset = GeoDataResolver::new(http).resolve().await;
    assert_eq!(dataset.source(), DatasetSource::Fallback);
    assert_eq!(dataset.region_ids(), vec!["N", "NE", "CO", "SE", "S"]);
}

#[tokio::test]
async fn non_geojson_body_falls_back() {
    let addr = spawn_server();
    let dataset = GeoDataResolver::new(source(addr, "garbage")).resolve().await;
    assert_eq!(dataset.source(), DatasetSource::Fallback);
}

#[tokio::test]
async fn unreachable_host_falls_back() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let http = HttpBoundarySource::new(
        format!("http://127.0.0.1:{}/states", port),
        Duration::from_secs(2),
    )
    .unwrap();
    assert!(matches!(http.fetch().await, Err(ResolveError::Network(_))));

    let resolver = GeoDataResolver::new(http);
    assert_eq!(resolver.resolve().await.source(), DatasetSource::Fallback);
    assert_eq!(resolver.metrics().fallback, 1);
}

#[tokio::test]
async fn teardown_during_fetch_leaves_state_pending() {
    let addr = spawn_server();
    let resolver = GeoDataResolver::new(source(addr, "slow"));
    let mut state = GeoDataState::new();
    let ticket = state.begin();

    let cancel = ticket.token().clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });

    let resolution = resolver.resolve_for(ticket).await;
    assert!(!state.commit(resolution));
    assert!(state.is_pending());
    assert_eq!(resolver.metrics().discarded, 1);
}

#[tokio::test]
async fn resolution_commits_when_not_cancelled() {
    let addr = spawn_server();
    let resolver = GeoDataResolver::new(source(addr, "states"));
    let mut state = GeoDataState::new();
    let ticket = state.begin();
    let resolution = resolver.resolve_for(ticket).await;
    assert!(state.commit(resolution));
    assert_eq!(
        state.dataset().map(|dataset| dataset.source()),
        Some(DatasetSource::Remote)
    );
}
