//! Garden layout editor state
//!
//! The headless state machine behind the drag-and-drop garden builder.
//! Selection is a single optional entry; a drag is an explicitly acquired
//! and released resource; every mutation runs on one caller at a time.
//! The editor never consults the catalog: placement accepts any plant id
//! and unknown ids only surface (and are skipped) at render time.

use serde::Serialize;

use super::layout::{
    BackgroundImage, EntryIdGenerator, GardenBackground, PlacedPlant, Surface, DEFAULT_SCALE,
    ROTATION_STEP, SCALE_STEP,
};

/// Default fill when the custom color has not been changed
pub const DEFAULT_CUSTOM_COLOR: &str = "#e9f5db";

/// An active drag: pointer and entry positions captured at pointer-down
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    pointer_start: (f64, f64),
    entry_start: (f64, f64),
}

/// Background selection carrying its parameter
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundChoice {
    Ground,
    Balcony,
    Terrace,
    /// Hex fill, e.g. `#e9f5db`
    Color(String),
    /// Id of an entry in the background image collection
    Custom(String),
}

/// Serializable view of the whole editor session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    pub surface: Surface,
    pub placed: Vec<PlacedPlant>,
    pub selection: Option<String>,
    pub dragging: bool,
    pub info_visible: bool,
    pub background: GardenBackground,
    pub custom_color: String,
    pub backgrounds: Vec<BackgroundImage>,
    pub selected_background: Option<String>,
}

pub struct GardenEditor {
    surface: Surface,
    placed: Vec<PlacedPlant>,
    selection: Option<String>,
    drag: Option<DragState>,
    /// Armed with the dragged entry's id when a drag ends; swallows the
    /// click that follows the pointer-up on that entry so it does not
    /// toggle the selection off. A click anywhere else clears the guard
    /// and behaves normally.
    suppress_click_for: Option<String>,
    info_visible: bool,
    background: GardenBackground,
    custom_color: String,
    backgrounds: Vec<BackgroundImage>,
    selected_background: Option<String>,
    ids: EntryIdGenerator,
}

impl GardenEditor {
    pub fn new(surface: Surface) -> Self {
        GardenEditor {
            surface,
            placed: Vec::new(),
            selection: None,
            drag: None,
            suppress_click_for: None,
            info_visible: false,
            background: GardenBackground::default(),
            custom_color: DEFAULT_CUSTOM_COLOR.to_string(),
            backgrounds: BackgroundImage::presets(),
            selected_background: None,
            ids: EntryIdGenerator::default(),
        }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn placed(&self) -> &[PlacedPlant] {
        &self.placed
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn background(&self) -> GardenBackground {
        self.background
    }

    pub fn backgrounds(&self) -> &[BackgroundImage] {
        &self.backgrounds
    }

    /// Drop a plant onto the surface at the given pointer position.
    /// No duplicate check: the same catalog id can be placed twice.
    /// The new entry becomes the selection and reveals its panel.
    pub fn place(&mut self, plant_id: &str, x: f64, y: f64) -> &PlacedPlant {
        let id = self.ids.next_id();
        self.selection = Some(id.clone());
        self.info_visible = true;
        self.placed.push(PlacedPlant {
            id,
            plant_id: plant_id.to_string(),
            x,
            y,
            scale: DEFAULT_SCALE,
            rotation: 0,
        });
        &self.placed[self.placed.len() - 1]
    }

    /// Click on a placed plant: select it, or deselect if already selected.
    /// The click fired by the pointer-up that ended a drag of this entry
    /// is swallowed once; clicks on any other entry are unaffected.
    pub fn select_or_toggle(&mut self, entry_id: &str) {
        if self.suppress_click_for.take().as_deref() == Some(entry_id) {
            return;
        }
        if self.selection.as_deref() == Some(entry_id) {
            self.selection = None;
        } else {
            self.selection = Some(entry_id.to_string());
            self.info_visible = true;
        }
    }

    /// Start dragging the selected entry. Rejected for any other entry.
    pub fn begin_drag(&mut self, entry_id: &str, pointer: (f64, f64)) -> bool {
        if self.selection.as_deref() != Some(entry_id) {
            return false;
        }
        let Some(entry) = self.placed.iter().find(|p| p.id == entry_id) else {
            return false;
        };
        self.drag = Some(DragState {
            pointer_start: pointer,
            entry_start: (entry.x, entry.y),
        });
        true
    }

    /// Apply a pointer move to the active drag: `start + delta`, clamped
    /// to the surface bounds minus the placement margin.
    pub fn drag_move(&mut self, pointer: (f64, f64)) {
        let Some(drag) = self.drag else { return };
        let Some(id) = self.selection.clone() else { return };

        let dx = pointer.0 - drag.pointer_start.0;
        let dy = pointer.1 - drag.pointer_start.1;
        let (x, y) = self
            .surface
            .clamp(drag.entry_start.0 + dx, drag.entry_start.1 + dy);

        if let Some(entry) = self.placed.iter_mut().find(|p| p.id == id) {
            entry.x = x;
            entry.y = y;
        }
    }

    /// Pointer-up: release the drag and arm the one-shot click guard so
    /// the click event fired by the same pointer-up does not deselect.
    pub fn end_drag(&mut self) {
        if self.drag.take().is_some() {
            self.suppress_click_for = self.selection.clone();
        }
    }

    /// Release an interrupted drag without arming the click guard
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Grow or shrink the selected entry by one scale step.
    /// Deliberately unclamped, matching the observed behavior.
    pub fn rescale(&mut self, increase: bool) {
        let Some(id) = self.selection.clone() else { return };
        if let Some(entry) = self.placed.iter_mut().find(|p| p.id == id) {
            entry.scale += if increase { SCALE_STEP } else { -SCALE_STEP };
        }
    }

    /// Rotate the selected entry one step, wrapped into `[0, 360)`
    pub fn rotate(&mut self) {
        let Some(id) = self.selection.clone() else { return };
        if let Some(entry) = self.placed.iter_mut().find(|p| p.id == id) {
            entry.rotation = (entry.rotation + ROTATION_STEP) % 360;
        }
    }

    /// Remove the selected entry and clear selection and panel state.
    /// A stale or absent selection leaves the collection unchanged.
    pub fn delete(&mut self) {
        let Some(id) = self.selection.take() else { return };
        self.placed.retain(|p| p.id != id);
        self.info_visible = false;
        self.drag = None;
    }

    pub fn dismiss_info(&mut self) {
        self.info_visible = false;
    }

    pub fn set_background(&mut self, choice: BackgroundChoice) {
        match choice {
            BackgroundChoice::Ground => self.background = GardenBackground::Ground,
            BackgroundChoice::Balcony => self.background = GardenBackground::Balcony,
            BackgroundChoice::Terrace => self.background = GardenBackground::Terrace,
            BackgroundChoice::Color(hex) => {
                self.custom_color = hex;
                self.background = GardenBackground::Color;
            }
            BackgroundChoice::Custom(image_id) => {
                self.selected_background = Some(image_id);
                self.background = GardenBackground::Custom;
            }
        }
    }

    /// Append an uploaded background image and switch to it.
    /// The collection is append-only within a session.
    pub fn add_background_image(&mut self, name: &str, url: &str) -> &BackgroundImage {
        let id = format!("custom-{}", chrono::Utc::now().timestamp_millis());
        self.backgrounds.push(BackgroundImage {
            id: id.clone(),
            name: name.to_string(),
            url: url.to_string(),
        });
        self.set_background(BackgroundChoice::Custom(id));
        &self.backgrounds[self.backgrounds.len() - 1]
    }

    /// Resolved flat fill for the current background mode. Custom image
    /// modes fall back to a neutral fill when compositing is unavailable
    /// or the referenced image is unknown.
    pub fn background_fill(&self) -> &str {
        match self.background {
            GardenBackground::Ground => "#e9f5db",
            GardenBackground::Balcony => "#f0ead2",
            GardenBackground::Terrace => "#dde5b6",
            GardenBackground::Color => &self.custom_color,
            GardenBackground::Custom => "#f8f9fa",
        }
    }

    /// Wholesale copy of the collection for persistence
    pub fn snapshot(&self) -> Vec<PlacedPlant> {
        self.placed.clone()
    }

    /// Replace the collection wholesale, resetting selection and drag
    pub fn restore(&mut self, entries: Vec<PlacedPlant>) {
        self.placed = entries;
        self.selection = None;
        self.drag = None;
        self.suppress_click_for = None;
        self.info_visible = false;
    }

    pub fn view(&self) -> EditorView {
        EditorView {
            surface: self.surface,
            placed: self.placed.clone(),
            selection: self.selection.clone(),
            dragging: self.drag.is_some(),
            info_visible: self.info_visible,
            background: self.background,
            custom_color: self.custom_color.clone(),
            backgrounds: self.backgrounds.clone(),
            selected_background: self.selected_background.clone(),
        }
    }
}
