// Page handlers for HTML rendering with Askama

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};

use crate::catalog::{FaqItem, Plant, PlantCategory, RemedyEntry, ScientificInfo, SearchField};
use crate::catalog::remedies::AilmentCategory;
use crate::garden::EditorView;
use crate::server::{AppError, AppState};

/// Summary card used by the home, search and garden plant palettes
pub struct PlantCard {
    pub id: String,
    pub display_name: String,
    pub scientific_name: String,
    pub short_description: String,
    pub image: String,
    pub gradient: String,
}

fn plant_card(state: &AppState, plant: &Plant) -> PlantCard {
    PlantCard {
        id: plant.id.clone(),
        display_name: state
            .catalog
            .display_name(&plant.id)
            .unwrap_or_else(|| plant.name.clone()),
        scientific_name: plant.scientific_name.clone(),
        short_description: plant.short_description.clone(),
        image: plant.image.clone(),
        gradient: state.catalog.gradient(&plant.id).to_string(),
    }
}

fn render<T: Template>(template: T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        format!("Template error: {}", e)
    }))
}

// ============================================================================
// Home Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub plants: Vec<PlantCard>,
    pub categories: Vec<PlantCategory>,
    pub faqs: Vec<FaqItem>,
}

pub async fn home_page(State(state): State<AppState>) -> impl IntoResponse {
    let template = HomeTemplate {
        title: "Virtual Herbal Garden".to_string(),
        plants: state
            .catalog
            .all()
            .iter()
            .map(|p| plant_card(&state, p))
            .collect(),
        categories: state.catalog.categories().to_vec(),
        faqs: state.catalog.faqs().to_vec(),
    };
    render(template)
}

// ============================================================================
// Plant Detail Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/plant_detail.html")]
pub struct PlantDetailTemplate {
    pub title: String,
    pub plant: Plant,
    pub display_name: String,
    pub gradient: String,
    pub scientific: Option<ScientificInfo>,
    pub model_path: Option<String>,
}

pub async fn plant_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let plant = state
        .catalog
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Plant {} not found", id)))?
        .clone();

    let template = PlantDetailTemplate {
        title: format!("{} - Virtual Herbal Garden", plant.name),
        display_name: state
            .catalog
            .display_name(&id)
            .unwrap_or_else(|| plant.name.clone()),
        gradient: state.catalog.gradient(&id).to_string(),
        scientific: state.catalog.scientific_info(&id).cloned(),
        model_path: state.catalog.model_path(&id).map(String::from),
        plant,
    };
    Ok(render(template))
}

// ============================================================================
// Search Page
// ============================================================================

#[derive(Debug, serde::Deserialize)]
pub struct SearchPageQuery {
    q: Option<String>,
    #[serde(default)]
    field: SearchField,
}

#[derive(Template)]
#[template(path = "pages/search.html")]
pub struct SearchTemplate {
    pub title: String,
    pub query: String,
    pub field: String,
    pub results: Vec<PlantCard>,
}

pub async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchPageQuery>,
) -> impl IntoResponse {
    let query = params.q.unwrap_or_default();
    let results = state
        .catalog
        .search(&query, params.field)
        .into_iter()
        .map(|p| plant_card(&state, p))
        .collect();

    let template = SearchTemplate {
        title: "Search - Virtual Herbal Garden".to_string(),
        field: format!("{:?}", params.field).to_lowercase(),
        query,
        results,
    };
    render(template)
}

// ============================================================================
// Remedies Page
// ============================================================================

pub struct RemedyGroup {
    pub ailment: String,
    pub entries: Vec<RemedyEntry>,
}

#[derive(Debug, serde::Deserialize)]
pub struct RemediesPageQuery {
    q: Option<String>,
    category: Option<String>,
}

#[derive(Template)]
#[template(path = "pages/remedies.html")]
pub struct RemediesTemplate {
    pub title: String,
    pub query: String,
    pub category: String,
    pub groups: Vec<RemedyGroup>,
}

pub async fn remedies_page(
    State(state): State<AppState>,
    Query(params): Query<RemediesPageQuery>,
) -> impl IntoResponse {
    let category = params
        .category
        .as_deref()
        .and_then(AilmentCategory::from_id);
    let groups = state
        .catalog
        .filtered_remedies(params.q.as_deref(), category)
        .into_iter()
        .map(|(ailment, entries)| RemedyGroup { ailment, entries })
        .collect();

    let template = RemediesTemplate {
        title: "Home Remedies - Virtual Herbal Garden".to_string(),
        query: params.q.unwrap_or_default(),
        category: params.category.unwrap_or_default(),
        groups,
    };
    render(template)
}

// ============================================================================
// Garden Editor Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/garden.html")]
pub struct GardenTemplate {
    pub title: String,
    pub palette: Vec<PlantCard>,
    pub garden: EditorView,
}

pub async fn garden_page(State(state): State<AppState>) -> impl IntoResponse {
    let garden = {
        let editor = state.editor.read().await;
        editor.view()
    };

    let template = GardenTemplate {
        title: "Create Your Garden - Virtual Herbal Garden".to_string(),
        palette: state
            .catalog
            .all()
            .iter()
            .map(|p| plant_card(&state, p))
            .collect(),
        garden,
    };
    render(template)
}
