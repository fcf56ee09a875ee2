//! Test helper utilities for spinning up a full advisory server

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use agro_advisory::services::{InMemoryAdvisoryStore, RealPredictionClient};
use agro_advisory::{Advisor, AdvisoryServer};

/// A running advisory server wired to a wiremock prediction service and an
/// in-memory store the test can inspect.
pub struct TestApp {
    pub address: String,
    pub prediction: MockServer,
    pub store: InMemoryAdvisoryStore,
    pub client: reqwest::Client,
}

/// Start the full server on an ephemeral port
pub async fn spawn_app() -> TestApp {
    let prediction = MockServer::start().await;
    let store = InMemoryAdvisoryStore::new();

    let advisor = Advisor::new(RealPredictionClient::new(prediction.uri()), store.clone());
    let router = AdvisoryServer::new(advisor).build_router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port should bind");
    let addr = listener.local_addr().expect("listener should report its address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server should run");
    });

    TestApp {
        address: format!("http://{addr}"),
        prediction,
        store,
        client: reqwest::Client::new(),
    }
}

/// Mount a successful crop prediction on the mock service
pub async fn mount_crop_success(prediction: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/predict_crop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recommended_crop": "Rice",
            "alternatives": ["Rice", "Maize"],
            "message": "Success"
        })))
        .mount(prediction)
        .await;
}

/// Mount a successful fertilizer prediction on the mock service
pub async fn mount_fertilizer_success(prediction: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/predict_fertilizer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recommended_fertilizer": ["Urea", "DAP"],
            "message": "Based on NPK soil analysis"
        })))
        .mount(prediction)
        .await;
}

/// Soil sample request body with every reading present
pub fn full_sample(farmer_uid: Option<&str>) -> serde_json::Value {
    let mut body = json!({
        "landParcelId": 12,
        "nitrogen": 90.0,
        "phosphorus": 42.0,
        "potassium": 43.0,
        "phLevel": 6.5,
        "rainfall": 200.0,
        "temperature": 25.0,
        "humidity": 70.0
    });
    if let Some(uid) = farmer_uid {
        body["farmerUid"] = json!(uid);
    }
    body
}
