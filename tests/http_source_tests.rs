use std::sync::Arc;

use chrono::Utc;
use muster::cache::{DocumentCache, MemoryStore};
use muster::data::army::Army;
use muster::data::dataset::DatasetKey;
use muster::data::loader::DatasetLoader;
use muster::data::source::{DocumentSource, FetchError, HttpSource};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARMIES: &str = "- id: sm-patrol\n  name: Vanguard Patrol\n  category: Combat Patrol\n";

#[tokio::test]
async fn fetches_document_under_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rules/armies.yaml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARMIES))
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpSource::new(format!("{}/rules/", server.uri()));
    let body = source.fetch(DatasetKey::Armies).await.expect("fetch should succeed");
    assert_eq!(body, ARMIES);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/units.yaml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = HttpSource::new(server.uri());
    match source.fetch(DatasetKey::Units).await {
        Err(FetchError::Status { status, url }) => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/units.yaml"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn loader_fetches_over_http_once_then_serves_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/armies.yaml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARMIES))
        .expect(1)
        .mount(&server)
        .await;

    let loader = DatasetLoader::new(
        Arc::new(DocumentCache::new(Box::new(MemoryStore::default()))),
        HttpSource::new(server.uri()),
    );
    let pass = loader.cache().begin_refresh(Utc::now());
    for _ in 0..2 {
        let mut armies: Option<Vec<Army>> = None;
        assert!(loader.load(DatasetKey::Armies, &pass, |doc| armies = Some(doc)).await);
        assert_eq!(armies.map(|a| a[0].id.clone()), Some("sm-patrol".to_string()));
    }
}
