// Axum server module
//
// Combines the plant catalog (read-only JSON API + HTML pages) with the
// garden layout editor session. One editor session per process, guarded
// by a single RwLock; all mutation happens on discrete request handlers.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::{PlantCatalog, SearchField};
use crate::catalog::remedies::AilmentCategory;
use crate::garden::{
    render_snapshot, BackgroundChoice, GardenEditor, LayoutStore, Surface,
};
use crate::web::handlers::pages;

/// Editor surface dimensions, matching the original 600px-tall canvas
pub const SURFACE_WIDTH: f64 = 960.0;
pub const SURFACE_HEIGHT: f64 = 600.0;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<PlantCatalog>,
    pub editor: Arc<RwLock<GardenEditor>>,
    pub store: Arc<dyn LayoutStore>,
}

impl AppState {
    /// Build the state and restore the saved layout, if any. A corrupted
    /// slot is logged and leaves the collection empty.
    pub fn new(store: Arc<dyn LayoutStore>) -> anyhow::Result<Self> {
        let catalog = Arc::new(PlantCatalog::builtin()?);
        tracing::info!("Loaded plant catalog ({} plants)", catalog.all().len());

        let mut editor = GardenEditor::new(Surface::new(SURFACE_WIDTH, SURFACE_HEIGHT));
        match store.load() {
            Ok(entries) => {
                if !entries.is_empty() {
                    tracing::info!("Restored saved garden layout ({} plants)", entries.len());
                }
                editor.restore(entries);
            }
            Err(e) => {
                tracing::warn!("Failed to load saved garden, starting empty: {}", e);
            }
        }

        Ok(AppState {
            catalog,
            editor: Arc::new(RwLock::new(editor)),
            store,
        })
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // HTML pages
        .route("/", get(pages::home_page))
        .route("/plants/:id", get(pages::plant_page))
        .route("/search", get(pages::search_page))
        .route("/remedies", get(pages::remedies_page))
        .route("/garden", get(pages::garden_page))

        // Health check
        .route("/health", get(health_check))

        // Plant catalog (JSON API)
        // NOTE: search route must come before :id route (Axum matches in order)
        .route("/api/plants", get(list_plants))
        .route("/api/plants/search", get(search_plants))
        .route("/api/plants/:id", get(get_plant))
        .route("/api/remedies", get(get_remedies))

        // Garden editor session
        .route("/api/garden", get(get_garden))
        .route("/api/garden/place", post(place_plant))
        .route("/api/garden/select/:id", post(select_plant))
        .route("/api/garden/drag/begin", post(begin_drag))
        .route("/api/garden/drag/move", post(drag_move))
        .route("/api/garden/drag/end", post(end_drag))
        .route("/api/garden/drag/cancel", post(cancel_drag))
        .route("/api/garden/scale", post(rescale_plant))
        .route("/api/garden/rotate", post(rotate_plant))
        .route("/api/garden/delete", post(delete_plant))
        .route("/api/garden/dismiss-info", post(dismiss_info))
        .route("/api/garden/background", post(set_background))
        .route("/api/garden/backgrounds", post(add_background))
        .route("/api/garden/save", post(save_layout))
        .route("/api/garden/export.png", get(export_snapshot))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Errors
// ============================================================================

pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Store(String),
    Export(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Store(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Export(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// ============================================================================
// Catalog handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

fn plant_summary(state: &AppState, plant: &crate::catalog::Plant) -> serde_json::Value {
    serde_json::json!({
        "id": plant.id,
        "name": plant.name,
        "scientificName": plant.scientific_name,
        "shortDescription": plant.short_description,
        "hindiName": state.catalog.hindi_name(&plant.id),
        "modelPath": state.catalog.model_path(&plant.id),
        "image": plant.image,
    })
}

async fn list_plants(State(state): State<AppState>) -> Json<serde_json::Value> {
    let data: Vec<serde_json::Value> = state
        .catalog
        .all()
        .iter()
        .map(|p| plant_summary(&state, p))
        .collect();

    Json(serde_json::json!({
        "rows": data.len(),
        "data": data,
    }))
}

#[derive(Debug, serde::Deserialize)]
struct SearchQuery {
    q: Option<String>,
    #[serde(default)]
    field: SearchField,
}

async fn search_plants(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<serde_json::Value> {
    let query = params.q.as_deref().unwrap_or("");
    let results = state.catalog.search(query, params.field);

    tracing::debug!(
        "Plant search '{}' ({:?}) returned {} results",
        query,
        params.field,
        results.len()
    );

    let data: Vec<serde_json::Value> = results
        .iter()
        .map(|p| plant_summary(&state, p))
        .collect();

    Json(serde_json::json!({
        "rows": data.len(),
        "data": data,
    }))
}

async fn get_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let plant = state
        .catalog
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Plant {} not found", id)))?;

    Ok(Json(serde_json::json!({
        "plant": plant,
        "hindiName": state.catalog.hindi_name(&id),
        "scientificInfo": state.catalog.scientific_info(&id),
        "modelPath": state.catalog.model_path(&id),
        "gradient": state.catalog.gradient(&id),
    })))
}

#[derive(Debug, serde::Deserialize)]
struct RemediesQuery {
    q: Option<String>,
    category: Option<String>,
}

async fn get_remedies(
    State(state): State<AppState>,
    Query(params): Query<RemediesQuery>,
) -> Json<serde_json::Value> {
    let category = params
        .category
        .as_deref()
        .and_then(AilmentCategory::from_id);
    let groups = state
        .catalog
        .filtered_remedies(params.q.as_deref(), category);

    Json(serde_json::json!({
        "ailments": groups.len(),
        "data": groups,
    }))
}

// ============================================================================
// Garden editor handlers
// ============================================================================

async fn get_garden(State(state): State<AppState>) -> Json<serde_json::Value> {
    let editor = state.editor.read().await;
    Json(serde_json::json!({ "garden": editor.view() }))
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceRequest {
    plant_id: String,
    x: f64,
    y: f64,
}

async fn place_plant(
    State(state): State<AppState>,
    Json(req): Json<PlaceRequest>,
) -> Json<serde_json::Value> {
    let mut editor = state.editor.write().await;
    let entry = editor.place(&req.plant_id, req.x, req.y).clone();
    tracing::debug!("Placed {} at ({}, {})", entry.plant_id, entry.x, entry.y);
    Json(serde_json::json!({ "placed": entry, "garden": editor.view() }))
}

async fn select_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<serde_json::Value> {
    let mut editor = state.editor.write().await;
    editor.select_or_toggle(&id);
    Json(serde_json::json!({ "garden": editor.view() }))
}

#[derive(Debug, serde::Deserialize)]
struct DragBeginRequest {
    id: String,
    x: f64,
    y: f64,
}

async fn begin_drag(
    State(state): State<AppState>,
    Json(req): Json<DragBeginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut editor = state.editor.write().await;
    if !editor.begin_drag(&req.id, (req.x, req.y)) {
        return Err(AppError::BadRequest(format!(
            "Entry {} is not the current selection",
            req.id
        )));
    }
    Ok(Json(serde_json::json!({ "dragging": true })))
}

#[derive(Debug, serde::Deserialize)]
struct PointerRequest {
    x: f64,
    y: f64,
}

async fn drag_move(
    State(state): State<AppState>,
    Json(req): Json<PointerRequest>,
) -> Json<serde_json::Value> {
    let mut editor = state.editor.write().await;
    editor.drag_move((req.x, req.y));
    Json(serde_json::json!({ "garden": editor.view() }))
}

async fn end_drag(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut editor = state.editor.write().await;
    editor.end_drag();
    Json(serde_json::json!({ "garden": editor.view() }))
}

/// Interrupted drag (pointer capture lost): release without the click guard
async fn cancel_drag(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut editor = state.editor.write().await;
    editor.cancel_drag();
    Json(serde_json::json!({ "garden": editor.view() }))
}

#[derive(Debug, serde::Deserialize)]
struct ScaleRequest {
    increase: bool,
}

async fn rescale_plant(
    State(state): State<AppState>,
    Json(req): Json<ScaleRequest>,
) -> Json<serde_json::Value> {
    let mut editor = state.editor.write().await;
    editor.rescale(req.increase);
    Json(serde_json::json!({ "garden": editor.view() }))
}

async fn rotate_plant(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut editor = state.editor.write().await;
    editor.rotate();
    Json(serde_json::json!({ "garden": editor.view() }))
}

async fn delete_plant(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut editor = state.editor.write().await;
    editor.delete();
    Json(serde_json::json!({ "garden": editor.view() }))
}

async fn dismiss_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut editor = state.editor.write().await;
    editor.dismiss_info();
    Json(serde_json::json!({ "garden": editor.view() }))
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
enum BackgroundRequest {
    Ground,
    Balcony,
    Terrace,
    Color { color: String },
    Custom {
        #[serde(rename = "imageId")]
        image_id: String,
    },
}

async fn set_background(
    State(state): State<AppState>,
    Json(req): Json<BackgroundRequest>,
) -> Json<serde_json::Value> {
    let choice = match req {
        BackgroundRequest::Ground => BackgroundChoice::Ground,
        BackgroundRequest::Balcony => BackgroundChoice::Balcony,
        BackgroundRequest::Terrace => BackgroundChoice::Terrace,
        BackgroundRequest::Color { color } => BackgroundChoice::Color(color),
        BackgroundRequest::Custom { image_id } => BackgroundChoice::Custom(image_id),
    };

    let mut editor = state.editor.write().await;
    editor.set_background(choice);
    Json(serde_json::json!({ "garden": editor.view() }))
}

#[derive(Debug, serde::Deserialize)]
struct AddBackgroundRequest {
    name: String,
    /// Bundled asset path or data-URL from a locally chosen file
    url: String,
}

async fn add_background(
    State(state): State<AppState>,
    Json(req): Json<AddBackgroundRequest>,
) -> Json<serde_json::Value> {
    let mut editor = state.editor.write().await;
    let image = editor.add_background_image(&req.name, &req.url).clone();
    Json(serde_json::json!({ "background": image, "garden": editor.view() }))
}

/// Serialize the whole collection into the single persisted slot.
/// Fire-and-forget: reports success, performs no integrity check.
async fn save_layout(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let snapshot = {
        let editor = state.editor.read().await;
        editor.snapshot()
    };

    state.store.save(&snapshot).map_err(|e| {
        tracing::error!("Failed to save garden layout: {}", e);
        AppError::Store(e.to_string())
    })?;

    Ok(Json(serde_json::json!({
        "saved": true,
        "plants": snapshot.len(),
    })))
}

/// Rasterize the surface and hand it back as a file download
async fn export_snapshot(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let editor = state.editor.read().await;
    let bytes = render_snapshot(&editor, &state.catalog).map_err(|e| {
        tracing::error!("Failed to export garden snapshot: {}", e);
        AppError::Export(e.to_string())
    })?;

    let filename = format!(
        "my-herbal-garden-{}.png",
        chrono::Utc::now().format("%Y-%m-%d")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    ))
}
