//! Garden layout editor
//!
//! State model, persistence and snapshot export for the drag-and-drop
//! garden builder. The editor owns the placed-plant collection for the
//! session; the store holds the single persisted slot; the exporter
//! rasterizes the surface.

pub mod editor;
pub mod export;
pub mod layout;
pub mod store;

pub use editor::{BackgroundChoice, EditorView, GardenEditor};
pub use export::{render_snapshot, ExportError};
pub use layout::{
    BackgroundImage, GardenBackground, PlacedPlant, Surface, PLACEMENT_MARGIN,
};
pub use store::{FileLayoutStore, LayoutStore, StoreError, LAYOUT_SLOT};
