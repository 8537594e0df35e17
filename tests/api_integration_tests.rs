// API Integration Tests
//
// Exercises every endpoint against a router backed by the embedded
// catalog and a temporary layout directory.
// Run with: cargo test --test api_integration_tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt; // for oneshot

use herbal_garden::garden::FileLayoutStore;
use herbal_garden::{create_router, AppState};

// Helper: Create a test router over a throwaway layout directory.
// The TempDir must outlive the router, so it is returned alongside it.
fn test_app() -> (axum::Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = Arc::new(FileLayoutStore::new(dir.path()));
    let state = AppState::new(store).expect("Failed to build app state");
    (create_router(state), dir)
}

// Helper: Parse JSON response
async fn json_response(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&body).expect("Failed to parse JSON")
}

async fn get(app: &axum::Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_json(app: &axum::Router, uri: &str, body: Value) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn post_empty(app: &axum::Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

// =========================================================================
// Section 1: Health Check
// =========================================================================

#[tokio::test]
async fn test_health_check() {
    let (app, _dir) = test_app();

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_response(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

// =========================================================================
// Section 2: Plant Catalog
// =========================================================================

#[tokio::test]
async fn test_list_plants() {
    let (app, _dir) = test_app();

    let response = get(&app, "/api/plants").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_response(response).await;
    assert_eq!(body["rows"], 11);
    let data = body["data"].as_array().unwrap();
    assert!(data.iter().any(|p| p["id"] == "neem"));
    assert!(data.iter().any(|p| p["id"] == "lavender"));
}

#[tokio::test]
async fn test_get_plant_by_id() {
    let (app, _dir) = test_app();

    let response = get(&app, "/api/plants/neem").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_response(response).await;
    assert_eq!(body["plant"]["scientificName"], "Azadirachta indica");
    assert_eq!(body["hindiName"], "नीम");
    assert_eq!(body["modelPath"], "/assets/3d/neem.glb");
    assert_eq!(body["scientificInfo"]["order"], "Sapindales");
}

#[tokio::test]
async fn test_get_plant_not_found() {
    let (app, _dir) = test_app();

    let response = get(&app, "/api/plants/nonexistent-id").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_response(response).await;
    assert!(body["error"].as_str().unwrap().contains("nonexistent-id"));
}

// =========================================================================
// Section 3: Plant Search
// =========================================================================

#[tokio::test]
async fn test_search_by_name() {
    let (app, _dir) = test_app();

    let response = get(&app, "/api/plants/search?q=neem").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_response(response).await;
    assert_eq!(body["rows"], 1);
    assert_eq!(body["data"][0]["id"], "neem");
}

#[tokio::test]
async fn test_search_scoped_to_classification() {
    let (app, _dir) = test_app();

    let response = get(&app, "/api/plants/search?q=lamiaceae&field=classification").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_response(response).await;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"tulsi"));
    assert!(ids.contains(&"lavender"));
    assert!(!ids.contains(&"neem"));
}

#[tokio::test]
async fn test_search_empty_query_matches_nothing() {
    let (app, _dir) = test_app();

    let response = get(&app, "/api/plants/search?q=").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_response(response).await;
    assert_eq!(body["rows"], 0);
}

// =========================================================================
// Section 4: Remedies
// =========================================================================

#[tokio::test]
async fn test_remedies_grouped() {
    let (app, _dir) = test_app();

    let response = get(&app, "/api/remedies").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_response(response).await;
    assert!(body["ailments"].as_u64().unwrap() > 0);
    assert!(body["data"]["insomnia"].is_array());
}

#[tokio::test]
async fn test_remedies_filtered_by_term_and_category() {
    let (app, _dir) = test_app();

    let response = get(&app, "/api/remedies?q=insomnia").await;
    let body: Value = json_response(response).await;
    // "Insomnia" and "Insomnia or restless sleep" both match the term
    let groups = body["data"].as_object().unwrap();
    assert!(!groups.is_empty());
    assert!(groups.keys().all(|k| k.contains("insomnia")));

    let response = get(&app, "/api/remedies?category=sleep").await;
    let body: Value = json_response(response).await;
    let groups = body["data"].as_object().unwrap();
    assert!(groups.keys().any(|k| k.contains("insomnia")));
}

// =========================================================================
// Section 5: Garden Editor Session
// =========================================================================

#[tokio::test]
async fn test_garden_starts_empty() {
    let (app, _dir) = test_app();

    let response = get(&app, "/api/garden").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_response(response).await;
    let garden = &body["garden"];
    assert_eq!(garden["placed"].as_array().unwrap().len(), 0);
    assert_eq!(garden["background"], "ground");
    assert_eq!(garden["selection"], Value::Null);
    // The three preset backgrounds are always offered
    assert_eq!(garden["backgrounds"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_place_selects_new_entry() {
    let (app, _dir) = test_app();

    let response = post_json(
        &app,
        "/api/garden/place",
        serde_json::json!({ "plantId": "tulsi", "x": 120.0, "y": 80.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_response(response).await;
    let entry_id = body["placed"]["id"].as_str().unwrap();
    assert!(entry_id.starts_with("plant-"));
    assert_eq!(body["placed"]["plantId"], "tulsi");
    assert_eq!(body["placed"]["scale"], 1.0);
    assert_eq!(body["placed"]["rotation"], 0);

    let garden = &body["garden"];
    assert_eq!(garden["selection"], entry_id);
    assert_eq!(garden["infoVisible"], true);
}

#[tokio::test]
async fn test_drag_flow_clamps_to_surface() {
    let (app, _dir) = test_app();

    let place = post_json(
        &app,
        "/api/garden/place",
        serde_json::json!({ "plantId": "neem", "x": 400.0, "y": 300.0 }),
    )
    .await;
    let body: Value = json_response(place).await;
    let entry_id = body["placed"]["id"].as_str().unwrap().to_string();

    let begin = post_json(
        &app,
        "/api/garden/drag/begin",
        serde_json::json!({ "id": entry_id, "x": 400.0, "y": 300.0 }),
    )
    .await;
    assert_eq!(begin.status(), StatusCode::OK);

    // Way past the bottom-right corner: clamped to extent minus margin
    let moved = post_json(
        &app,
        "/api/garden/drag/move",
        serde_json::json!({ "x": 99999.0, "y": 99999.0 }),
    )
    .await;
    let body: Value = json_response(moved).await;
    assert_eq!(body["garden"]["placed"][0]["x"], 860.0);
    assert_eq!(body["garden"]["placed"][0]["y"], 500.0);

    let end = post_empty(&app, "/api/garden/drag/end").await;
    let body: Value = json_response(end).await;
    assert_eq!(body["garden"]["dragging"], false);
}

#[tokio::test]
async fn test_drag_rejected_for_unselected_entry() {
    let (app, _dir) = test_app();

    let first = post_json(
        &app,
        "/api/garden/place",
        serde_json::json!({ "plantId": "neem", "x": 10.0, "y": 10.0 }),
    )
    .await;
    let body: Value = json_response(first).await;
    let first_id = body["placed"]["id"].as_str().unwrap().to_string();

    // Second placement takes over the selection
    post_json(
        &app,
        "/api/garden/place",
        serde_json::json!({ "plantId": "basil", "x": 20.0, "y": 20.0 }),
    )
    .await;

    let begin = post_json(
        &app,
        "/api/garden/drag/begin",
        serde_json::json!({ "id": first_id, "x": 0.0, "y": 0.0 }),
    )
    .await;
    assert_eq!(begin.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancelled_drag_releases_without_click_guard() {
    let (app, _dir) = test_app();

    let place = post_json(
        &app,
        "/api/garden/place",
        serde_json::json!({ "plantId": "neem", "x": 100.0, "y": 100.0 }),
    )
    .await;
    let body: Value = json_response(place).await;
    let entry_id = body["placed"]["id"].as_str().unwrap().to_string();

    post_json(
        &app,
        "/api/garden/drag/begin",
        serde_json::json!({ "id": entry_id, "x": 100.0, "y": 100.0 }),
    )
    .await;

    let cancelled = post_empty(&app, "/api/garden/drag/cancel").await;
    assert_eq!(cancelled.status(), StatusCode::OK);
    let body: Value = json_response(cancelled).await;
    assert_eq!(body["garden"]["dragging"], false);

    // No click guard armed: the next click toggles the selection off
    let clicked = post_empty(&app, &format!("/api/garden/select/{}", entry_id)).await;
    let body: Value = json_response(clicked).await;
    assert_eq!(body["garden"]["selection"], Value::Null);
}

#[tokio::test]
async fn test_scale_rotate_delete() {
    let (app, _dir) = test_app();

    post_json(
        &app,
        "/api/garden/place",
        serde_json::json!({ "plantId": "lavender", "x": 100.0, "y": 100.0 }),
    )
    .await;

    let scaled = post_json(&app, "/api/garden/scale", serde_json::json!({ "increase": true })).await;
    let body: Value = json_response(scaled).await;
    let scale = body["garden"]["placed"][0]["scale"].as_f64().unwrap();
    assert!((scale - 1.2).abs() < 1e-9);

    let rotated = post_empty(&app, "/api/garden/rotate").await;
    let body: Value = json_response(rotated).await;
    assert_eq!(body["garden"]["placed"][0]["rotation"], 45);

    let deleted = post_empty(&app, "/api/garden/delete").await;
    let body: Value = json_response(deleted).await;
    assert_eq!(body["garden"]["placed"].as_array().unwrap().len(), 0);
    assert_eq!(body["garden"]["selection"], Value::Null);
}

#[tokio::test]
async fn test_background_modes() {
    let (app, _dir) = test_app();

    let response = post_json(
        &app,
        "/api/garden/background",
        serde_json::json!({ "mode": "color", "color": "#112233" }),
    )
    .await;
    let body: Value = json_response(response).await;
    assert_eq!(body["garden"]["background"], "color");
    assert_eq!(body["garden"]["customColor"], "#112233");

    let response = post_json(
        &app,
        "/api/garden/backgrounds",
        serde_json::json!({ "name": "My Patio", "url": "/assets/patio.jpg" }),
    )
    .await;
    let body: Value = json_response(response).await;
    let image_id = body["background"]["id"].as_str().unwrap();
    assert!(image_id.starts_with("custom-"));
    assert_eq!(body["garden"]["background"], "custom");
    assert_eq!(body["garden"]["selectedBackground"], image_id);
    assert_eq!(body["garden"]["backgrounds"].as_array().unwrap().len(), 4);
}

// =========================================================================
// Section 6: Persistence
// =========================================================================

#[tokio::test]
async fn test_save_then_restart_restores_layout() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    {
        let store = Arc::new(FileLayoutStore::new(dir.path()));
        let state = AppState::new(store).expect("Failed to build app state");
        let app = create_router(state);

        post_json(
            &app,
            "/api/garden/place",
            serde_json::json!({ "plantId": "tulsi", "x": 40.0, "y": 60.0 }),
        )
        .await;

        let saved = post_empty(&app, "/api/garden/save").await;
        assert_eq!(saved.status(), StatusCode::OK);
        let body: Value = json_response(saved).await;
        assert_eq!(body["saved"], true);
        assert_eq!(body["plants"], 1);
    }

    // A fresh state over the same directory picks the layout back up
    let store = Arc::new(FileLayoutStore::new(dir.path()));
    let state = AppState::new(store).expect("Failed to build app state");
    let app = create_router(state);

    let response = get(&app, "/api/garden").await;
    let body: Value = json_response(response).await;
    let placed = body["garden"]["placed"].as_array().unwrap();
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0]["plantId"], "tulsi");
    assert_eq!(placed[0]["x"], 40.0);
    // Selection does not survive a restart
    assert_eq!(body["garden"]["selection"], Value::Null);
}

#[tokio::test]
async fn test_corrupted_slot_starts_empty_instead_of_failing() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("saved_garden.json"), "{not a layout").unwrap();

    let store = Arc::new(FileLayoutStore::new(dir.path()));
    let state = AppState::new(store).expect("corrupted slot must not abort startup");
    let app = create_router(state);

    let response = get(&app, "/api/garden").await;
    let body: Value = json_response(response).await;
    assert_eq!(body["garden"]["placed"].as_array().unwrap().len(), 0);
}

// =========================================================================
// Section 7: Snapshot Export
// =========================================================================

#[tokio::test]
async fn test_export_returns_png_attachment() {
    let (app, _dir) = test_app();

    post_json(
        &app,
        "/api/garden/place",
        serde_json::json!({ "plantId": "neem", "x": 200.0, "y": 150.0 }),
    )
    .await;

    let response = get(&app, "/api/garden/export.png").await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(content_type, "image/png");

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("my-herbal-garden-"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..8], b"\x89PNG\r\n\x1a\n");
}

// =========================================================================
// Section 8: HTML Pages
// =========================================================================

async fn page_body(app: &axum::Router, uri: &str) -> String {
    let response = get(app, uri).await;
    assert_eq!(response.status(), StatusCode::OK, "page {} should render", uri);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn test_pages_render() {
    let (app, _dir) = test_app();

    let home = page_body(&app, "/").await;
    assert!(home.contains("Virtual Herbal Garden"));
    assert!(home.contains("/plants/neem"));

    let detail = page_body(&app, "/plants/tulsi").await;
    assert!(detail.contains("Ocimum sanctum"));
    assert!(detail.contains("तुलसी"));

    let search = page_body(&app, "/search?q=lavender").await;
    assert!(search.contains("Lavandula angustifolia"));

    let remedies = page_body(&app, "/remedies?category=sleep").await;
    assert!(remedies.contains("insomnia") || remedies.contains("Insomnia"));

    let garden = page_body(&app, "/garden").await;
    assert!(garden.contains("garden-surface"));
}

#[tokio::test]
async fn test_unknown_plant_page_is_404() {
    let (app, _dir) = test_app();

    let response = get(&app, "/plants/not-a-plant").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
