//! Integration tests for `DistributorHttp` using wiremock HTTP mocks.

use partscout_distributors::{ApiRequest, ClientSettings, DistributorError, DistributorHttp};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http() -> DistributorHttp {
    DistributorHttp::new(ClientSettings::default())
}

#[tokio::test]
async fn cached_request_hits_network_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/parts"))
        .and(query_param("q", "lm2596"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"n": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let http = http();
    let _session = http.open_session().expect("session should open");
    let url = format!("{}/parts", server.uri());

    let first = http
        .request(ApiRequest::get(&url).query("q", "lm2596"))
        .await
        .expect("first request should succeed");
    let second = http
        .request(ApiRequest::get(&url).query("q", "lm2596"))
        .await
        .expect("second request should be served from cache");

    assert_eq!(first, serde_json::json!({"n": 1}));
    assert_eq!(first, second);
    assert_eq!(http.cache().len().await, 1);
}

#[tokio::test]
async fn uncached_request_always_hits_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_json(serde_json::json!({"k": "v"})))
        .and(header("x-custom", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let http = http();
    let _session = http.open_session().unwrap();
    let url = format!("{}/search", server.uri());
    for _ in 0..2 {
        http.request(
            ApiRequest::post(&url, serde_json::json!({"k": "v"})).header("x-custom", "yes"),
        )
        .await
        .expect("request should succeed");
    }
    assert!(http.cache().is_empty().await);
}

#[tokio::test]
async fn server_error_is_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let http = http();
    let _session = http.open_session().unwrap();
    let result = http.request(ApiRequest::get(server.uri())).await;
    assert!(
        matches!(result, Err(DistributorError::UnexpectedStatus { status: 500, .. })),
        "expected UnexpectedStatus(500), got: {result:?}"
    );
    assert!(http.cache().is_empty().await, "failures must not be cached");
}

#[tokio::test]
async fn too_many_requests_is_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let http = http();
    let _session = http.open_session().unwrap();
    let result = http.request(ApiRequest::get(server.uri())).await;
    assert!(
        matches!(
            result,
            Err(DistributorError::RateLimited {
                retry_after_secs: 7,
                ..
            })
        ),
        "expected RateLimited, got: {result:?}"
    );
}

#[tokio::test]
async fn non_json_body_is_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let http = http();
    let _session = http.open_session().unwrap();
    let result = http.request(ApiRequest::get(server.uri())).await;
    assert!(
        matches!(result, Err(DistributorError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn request_after_session_closes_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let http = http();
    {
        let _session = http.open_session().unwrap();
        http.request(ApiRequest::get(server.uri()).cached(false))
            .await
            .expect("request inside session should succeed");
    }
    let result = http.request(ApiRequest::get(server.uri()).cached(false)).await;
    assert!(
        matches!(result, Err(DistributorError::ClientNotInitialized)),
        "expected ClientNotInitialized, got: {result:?}"
    );
}

#[tokio::test]
async fn slow_server_times_out_without_leaking_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let http = DistributorHttp::new(ClientSettings {
        timeout_secs: 1,
        ..ClientSettings::default()
    });
    let _session = http.open_session().unwrap();

    let started = std::time::Instant::now();
    let result = http
        .request(ApiRequest::get(server.uri()).query("apiKey", "sekrit-key"))
        .await;
    let elapsed = started.elapsed();

    match result {
        Err(DistributorError::Http(e)) => {
            assert!(e.is_timeout(), "expected a timeout, got: {e:?}");
            let rendered = DistributorError::Http(e).to_string();
            assert!(!rendered.contains("sekrit-key"), "credential leaked: {rendered}");
        }
        other => panic!("expected Http timeout, got: {other:?}"),
    }
    assert!(elapsed < std::time::Duration::from_secs(4), "took {elapsed:?}");
    assert!(http.cache().is_empty().await);
}
