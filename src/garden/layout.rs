//! Garden layout data model
//!
//! Placed-plant entries, the bounded editor surface, and background
//! choices. The serialized form keeps the original camelCase keys so a
//! previously saved layout blob loads unchanged.

use serde::{Deserialize, Serialize};

/// Margin kept between a placed plant's anchor and the surface edges.
/// Positions are clamped to `[0, extent - PLACEMENT_MARGIN]` during drag.
pub const PLACEMENT_MARGIN: f64 = 100.0;

/// Default plant scale at placement time
pub const DEFAULT_SCALE: f64 = 1.0;

/// Scale change applied per resize action
pub const SCALE_STEP: f64 = 0.2;

/// Rotation applied per rotate action, in degrees
pub const ROTATION_STEP: i32 = 45;

/// One plant instance positioned on the editor surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPlant {
    /// Opaque token, unique for the lifetime of the entry
    pub id: String,
    /// Catalog id; not validated at placement, unknown ids are skipped at render
    pub plant_id: String,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation: i32,
}

/// The bounded 2D area plants are positioned within
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Surface { width, height }
    }

    /// Clamp a position to the surface bounds minus the placement margin
    pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x.max(0.0).min(self.width - PLACEMENT_MARGIN),
            y.max(0.0).min(self.height - PLACEMENT_MARGIN),
        )
    }
}

/// Background mode of the editor surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GardenBackground {
    #[default]
    Ground,
    Balcony,
    Terrace,
    Color,
    Custom,
}

/// A selectable background image, either a bundled preset or an upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundImage {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl BackgroundImage {
    /// The three bundled presets every session starts with
    pub fn presets() -> Vec<BackgroundImage> {
        vec![
            BackgroundImage {
                id: "garden1".to_string(),
                name: "Garden Path".to_string(),
                url: "/images/garden-backgrounds/ground.jpg".to_string(),
            },
            BackgroundImage {
                id: "balcony1".to_string(),
                name: "Wooden Balcony".to_string(),
                url: "/images/garden-backgrounds/balcony.jpg".to_string(),
            },
            BackgroundImage {
                id: "terrace1".to_string(),
                name: "Stone Terrace".to_string(),
                url: "/images/garden-backgrounds/terrace.jpg".to_string(),
            },
        ]
    }
}

/// Monotonic entry id generator.
///
/// Ids combine a millisecond timestamp with a per-session counter, so
/// rapid placement within the same millisecond cannot collide.
#[derive(Debug, Default)]
pub struct EntryIdGenerator {
    counter: u64,
}

impl EntryIdGenerator {
    pub fn next_id(&mut self) -> String {
        self.counter += 1;
        let millis = chrono::Utc::now().timestamp_millis();
        format!("plant-{}-{}", millis, self.counter)
    }
}
