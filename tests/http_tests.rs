//! HTTP API Tests
//!
//! Runs the real router on an ephemeral port and checks:
//! - Status codes and JSON bodies for lookups and upserts
//! - Rejection of non-numeric populations
//! - The save-failed reply when the data file cannot be written

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use citypop::http::{build_router, AppState, MessageBody, PopulationBody, Server};
use citypop::{CityPopError, Config, Engine};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const SAMPLE: &str = "Los Angeles,CA,3900000\nNew York,NY,8400000";

struct TestServer {
    _temp: TempDir,
    path: PathBuf,
    addr: SocketAddr,
    engine: Arc<Engine>,
}

impl TestServer {
    async fn start(content: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("city_populations.csv");
        fs::write(&path, content).unwrap();

        let config = Config::builder().data_file(&path).max_body_bytes(64).build();
        let engine = Arc::new(Engine::open(config).unwrap());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = build_router(AppState::new(Arc::clone(&engine)));
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        Self {
            _temp: temp,
            path,
            addr,
            engine,
        }
    }

    fn url(&self, state: &str, city: &str) -> String {
        format!(
            "http://{}/api/population/state/{}/city/{}",
            self.addr, state, city
        )
    }

    async fn get(&self, state: &str, city: &str) -> (StatusCode, Value) {
        let response = reqwest::get(self.url(state, city)).await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn put(&self, state: &str, city: &str, body: &str) -> (StatusCode, Value) {
        let response = reqwest::Client::new()
            .put(self.url(state, city))
            .body(body.to_string())
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn put_json(&self, state: &str, city: &str, body: &Value) -> (StatusCode, Value) {
        let response = reqwest::Client::new()
            .put(self.url(state, city))
            .json(body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }
}

// =============================================================================
// GET Tests
// =============================================================================

#[tokio::test]
async fn test_get_existing_city() {
    let server = TestServer::start(SAMPLE).await;

    let (status, body) = server.get("ca", "los%20angeles").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "population": 3900000 }));
}

#[tokio::test]
async fn test_get_any_casing() {
    let server = TestServer::start(SAMPLE).await;

    let (status, body) = server.get("Ny", "NEW%20YORK").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["population"], 8400000);
}

#[tokio::test]
async fn test_get_unknown_city() {
    let server = TestServer::start(SAMPLE).await;

    for (state, city) in [("ca", "sandiego"), ("zz", "los%20angeles")] {
        let (status, body) = server.get(state, city).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "City not found" }));
    }
}

// =============================================================================
// PUT Tests
// =============================================================================

#[tokio::test]
async fn test_put_creates_then_updates() {
    let server = TestServer::start(SAMPLE).await;

    let (status, body) = server.put("ca", "losangeles", "500").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "message": "Population created!" }));

    let (status, body) = server.put("CA", "LosAngeles", "600").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Population updated!" }));

    let (status, body) = server.get("ca", "losangeles").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["population"], 600);
}

#[tokio::test]
async fn test_put_rewrites_file() {
    let server = TestServer::start(SAMPLE).await;

    let (status, _) = server.put("ca", "losangeles", "500").await;
    assert_eq!(status, StatusCode::CREATED);

    assert_eq!(server.engine.len(), 3);
    assert_eq!(
        fs::read_to_string(&server.path).unwrap(),
        "Los Angeles,CA,3900000\nlosangeles,ca,500\nNew York,NY,8400000"
    );
}

#[tokio::test]
async fn test_put_accepts_numeric_prefix() {
    let server = TestServer::start(SAMPLE).await;

    let (status, _) = server.put("tx", "austin", " 961855 people\n").await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = server.get("tx", "austin").await;
    assert_eq!(body["population"], 961855);
}

#[tokio::test]
async fn test_put_rejects_non_numeric_body() {
    let server = TestServer::start(SAMPLE).await;

    for body in ["", "lots", "-12"] {
        let (status, reply) = server.put("tx", "austin", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            reply,
            json!({ "message": "Population must be a non-negative integer" })
        );
    }

    // Nothing was stored
    assert_eq!(server.engine.len(), 2);
    let (status, _) = server.get("tx", "austin").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_rejects_separator_in_city() {
    let server = TestServer::start(SAMPLE).await;

    for city in ["a%2Cb", "a%0Ab", "a%0Db"] {
        let (status, body) = server.put("ca", city, "5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "message": "State and city names cannot contain commas or line breaks" })
        );
    }

    assert_eq!(server.engine.len(), 2);
    assert_eq!(fs::read_to_string(&server.path).unwrap(), SAMPLE);
    assert_eq!(Engine::open_path(&server.path).unwrap().len(), 2);
}

#[tokio::test]
async fn test_put_json_bodies() {
    let server = TestServer::start(SAMPLE).await;

    let (status, _) = server.put_json("tx", "austin", &json!("500")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = server.put_json("tx", "austin", &json!(600)).await;
    assert_eq!(status, StatusCode::OK);
    let body: MessageBody = serde_json::from_value(body).unwrap();
    assert_eq!(body.message, "Population updated!");

    let response = reqwest::get(server.url("tx", "austin")).await.unwrap();
    let body: PopulationBody = response.json().await.unwrap();
    assert_eq!(body, PopulationBody { population: 600 });

    for bad in [json!(-1), json!(1.5), json!(null), json!({ "population": 5 }), json!("many")] {
        let (status, _) = server.put_json("tx", "austin", &bad).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_put_plain_text_keeps_quotes() {
    let server = TestServer::start(SAMPLE).await;

    // Without a JSON content type the body is read as text
    let (status, _) = server.put("tx", "austin", "\"500\"").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_oversized_body_rejected() {
    let server = TestServer::start(SAMPLE).await;

    let response = reqwest::Client::new()
        .put(server.url("tx", "austin"))
        .body("1".repeat(1024))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(server.engine.len(), 2);
}

#[tokio::test]
async fn test_put_save_failed() {
    let server = TestServer::start(SAMPLE).await;

    // Swap the data file for a directory so the rewrite fails
    fs::remove_file(&server.path).unwrap();
    fs::create_dir(&server.path).unwrap();

    let (status, body) = server.put("tx", "austin", "1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "message": "Data could not be saved, maybe the file was opened or locked!" })
    );

    // The in-memory change is not rolled back
    let (status, body) = server.get("tx", "austin").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["population"], 1);
}

// =============================================================================
// Server Tests
// =============================================================================

#[tokio::test]
async fn test_server_graceful_shutdown() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("city_populations.csv");
    fs::write(&path, SAMPLE).unwrap();

    let config = Config::builder().data_file(&path).listen_addr("127.0.0.1:0").build();
    let engine = Arc::new(Engine::open(config.clone()).unwrap());
    let server = Server::new(config, engine);

    let listener = server.bind().await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

    let handle = tokio::spawn(server.serve(listener, async move {
        let _ = stop_rx.await;
    }));

    let url = format!("http://{}/api/population/state/ny/city/new%20york", addr);
    let response = reqwest::get(url).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    stop_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_server_bind_reports_bad_address() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("city_populations.csv");
    fs::write(&path, SAMPLE).unwrap();

    let config = Config::builder().data_file(&path).listen_addr("not an address").build();
    let engine = Arc::new(Engine::open(config.clone()).unwrap());

    let err = Server::new(config, engine).bind().await.unwrap_err();
    assert!(matches!(err, CityPopError::Server(_)));
}
