//! Herbal Garden
//!
//! A medicinal-plant encyclopedia with an interactive garden layout editor.
//!
//! - `catalog/`: The static plant dataset, field-scoped search and the
//!   home-remedy index derived from it
//! - `garden/`: The layout editor state machine, layout persistence and
//!   PNG snapshot export
//! - `server`: Axum application state, router and JSON handlers
//! - `web/`: Askama page templates

pub mod catalog;
pub mod garden;
pub mod server;
pub mod web;

// Re-export commonly used types
pub use catalog::{PlantCatalog, SearchField};
pub use garden::{FileLayoutStore, GardenEditor, LayoutStore, PlacedPlant, Surface};
pub use server::{create_router, AppState};
