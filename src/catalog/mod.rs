//! Plant Catalog
//!
//! Read-only reference data for all plant records and derived metadata
//! (localized names, scientific info, 3D asset paths). Seeded from the
//! embedded JSON datasets under `data/` and handed to consumers as an
//! explicit provider rather than a process-wide global, so the garden
//! editor and the web layer stay independently testable.

pub mod remedies;
pub mod search;

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub use remedies::{AilmentCategory, RemedyEntry};
pub use search::SearchField;

const PLANTS_JSON: &str = include_str!("../../data/plants.json");
const NAMES_JSON: &str = include_str!("../../data/names.json");

/// Botanical classification of a plant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantClassification {
    pub family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subfamily: Option<String>,
    pub genus: String,
    pub species: String,
}

/// Cultivation requirements shown on the plant detail page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowingConditions {
    pub sunlight: String,
    pub soil: String,
    pub water: String,
    pub temperature: String,
}

/// A traditional home remedy attached to a plant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeRemedy {
    pub ailment: String,
    pub preparation: String,
    pub usage: String,
}

/// Full plant record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    pub short_description: String,
    pub description: String,
    pub image: String,
    pub properties: Vec<String>,
    pub classification: PlantClassification,
    pub growing_conditions: GrowingConditions,
    pub medicinal_uses: Vec<String>,
    pub home_remedies: Vec<HomeRemedy>,
    pub historical_significance: String,
    pub garden_benefits: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantCategory {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// Taxonomic and phytochemical metadata, keyed separately from the
/// main records (some keys cover plants not in the active dataset)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScientificInfo {
    pub kingdom: String,
    pub order: String,
    pub chemical_constituents: Vec<String>,
    pub research_studies: String,
}

#[derive(Deserialize)]
struct PlantsDataset {
    plants: Vec<Plant>,
    categories: Vec<PlantCategory>,
    faqs: Vec<FaqItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NamesDataset {
    hindi_names: FxHashMap<String, String>,
    scientific_info: FxHashMap<String, ScientificInfo>,
}

/// Main catalog holder
pub struct PlantCatalog {
    plants: Vec<Plant>,
    categories: Vec<PlantCategory>,
    faqs: Vec<FaqItem>,
    hindi_names: FxHashMap<String, String>,
    scientific_info: FxHashMap<String, ScientificInfo>,
}

impl PlantCatalog {
    /// Build the catalog from the embedded datasets
    pub fn builtin() -> Result<Self> {
        let data: PlantsDataset =
            serde_json::from_str(PLANTS_JSON).context("Failed to parse embedded plants dataset")?;
        let names: NamesDataset =
            serde_json::from_str(NAMES_JSON).context("Failed to parse embedded names dataset")?;

        Ok(PlantCatalog {
            plants: data.plants,
            categories: data.categories,
            faqs: data.faqs,
            hindi_names: names.hindi_names,
            scientific_info: names.scientific_info,
        })
    }

    pub fn all(&self) -> &[Plant] {
        &self.plants
    }

    /// Unknown ids yield `None`; callers skip them silently at render
    pub fn get(&self, id: &str) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id == id)
    }

    pub fn hindi_name(&self, id: &str) -> Option<&str> {
        self.hindi_names.get(id).map(|s| s.as_str())
    }

    pub fn scientific_info(&self, id: &str) -> Option<&ScientificInfo> {
        self.scientific_info.get(id)
    }

    pub fn categories(&self) -> &[PlantCategory] {
        &self.categories
    }

    pub fn faqs(&self) -> &[FaqItem] {
        &self.faqs
    }

    /// 3D asset path for a plant, when a model file exists
    pub fn model_path(&self, id: &str) -> Option<&'static str> {
        let path = match id {
            "basil" => "/assets/3d/basil.glb",
            "rosemary" => "/assets/3d/rosemary.glb",
            "tulsi" => "/assets/3d/tulsi.glb",
            "neem" => "/assets/3d/neem.glb",
            "aloevera" => "/assets/3d/aloevera.glb",
            "fenugreek" => "/assets/3d/fenugreek.glb",
            "birch" => "/assets/3d/birch.glb",
            "mugwort" => "/assets/3d/mugwort.glb",
            "ginseng" => "/assets/3d/ginseng.glb",
            "chamomile" => "/assets/3d/chamomile.glb",
            "lavender" => "/assets/3d/lavender.glb",
            _ => return None,
        };
        Some(path)
    }

    /// Background gradient class for a plant card, with a default fill
    pub fn gradient(&self, id: &str) -> &'static str {
        match id {
            "neem" => "bg-gradient-to-br from-herbal-green to-herbal-darkGreen",
            "aloevera" => "bg-gradient-to-br from-herbal-lightGreen to-herbal-green",
            "tulsi" => "bg-gradient-to-br from-herbal-green to-herbal-yellow",
            "ashwagandha" => "bg-gradient-to-br from-herbal-brown to-herbal-orange",
            "ajwain" => "bg-gradient-to-br from-herbal-yellow to-herbal-orange",
            "turmeric" => "bg-gradient-to-br from-herbal-orange to-herbal-yellow",
            "ginger" => "bg-gradient-to-br from-herbal-lightBrown to-herbal-brown",
            "fenugreek" => "bg-gradient-to-br from-herbal-green to-herbal-lightGreen",
            "rosemary" => "bg-gradient-to-br from-herbal-darkGreen to-herbal-green",
            "birch" => "bg-gradient-to-br from-herbal-lightBrown to-herbal-brown",
            "mugwort" => "bg-gradient-to-br from-herbal-green to-herbal-darkGreen",
            "basil" => "bg-gradient-to-br from-herbal-lightGreen to-herbal-green",
            "ginseng" => "bg-gradient-to-br from-herbal-brown to-herbal-lightBrown",
            "chamomile" => "bg-gradient-to-br from-herbal-yellow to-herbal-lightGreen",
            "lavender" => "bg-gradient-to-br from-purple-200 to-herbal-lightGreen",
            "shatavari" => "bg-gradient-to-br from-herbal-green to-herbal-yellow",
            "black-cohosh" => "bg-gradient-to-br from-herbal-brown to-herbal-darkGreen",
            _ => "bg-gradient-to-br from-herbal-green to-herbal-yellow",
        }
    }

    /// Display name with the Hindi name appended when one exists
    pub fn display_name(&self, id: &str) -> Option<String> {
        let plant = self.get(id)?;
        Some(match self.hindi_name(id) {
            Some(hindi) => format!("{} ({})", plant.name, hindi),
            None => plant.name.clone(),
        })
    }
}
