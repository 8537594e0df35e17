//! Home remedies browser support
//!
//! Flattens every plant's remedies into ailment groups and provides the
//! keyword buckets the remedies page filters by.

use std::collections::BTreeMap;

use serde::Serialize;

use super::PlantCatalog;

/// One remedy row under an ailment heading
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemedyEntry {
    pub ailment: String,
    pub plant_id: String,
    pub plant_name: String,
    pub hindi_name: String,
    pub plant_image: String,
    pub preparation: String,
    pub usage: String,
}

/// Coarse ailment buckets offered as filter chips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AilmentCategory {
    Digestive,
    Respiratory,
    Skin,
    Stress,
    Pain,
    Sleep,
    Immune,
    Women,
}

impl AilmentCategory {
    pub fn from_id(id: &str) -> Option<Self> {
        Some(match id {
            "digestive" => Self::Digestive,
            "respiratory" => Self::Respiratory,
            "skin" => Self::Skin,
            "stress" => Self::Stress,
            "pain" => Self::Pain,
            "sleep" => Self::Sleep,
            "immune" => Self::Immune,
            "women" => Self::Women,
            _ => return None,
        })
    }

    /// Ailment headings match a category when they contain any keyword
    fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Digestive => &["indigestion", "bloating", "gas", "stomach", "digestive", "appetite", "digestion"],
            Self::Respiratory => &["cough", "cold", "congestion", "respiratory", "breath", "sinus"],
            Self::Skin => &["skin", "acne", "eczema", "rash", "burn", "wound"],
            Self::Stress => &["stress", "anxiety", "tension", "nervous", "calm"],
            Self::Pain => &["pain", "inflammation", "ache", "arthritis", "joint", "muscle"],
            Self::Sleep => &["sleep", "insomnia", "restless"],
            Self::Immune => &["immune", "infection", "cold", "flu", "fever"],
            Self::Women => &["menstrual", "menopause", "pms", "cramp", "women", "fertility", "milk supply"],
        }
    }

    pub fn matches(self, ailment: &str) -> bool {
        let lower = ailment.to_lowercase();
        self.keywords().iter().any(|k| lower.contains(k))
    }
}

impl PlantCatalog {
    /// All remedies grouped by lowercased ailment, sorted by heading
    pub fn remedies_by_ailment(&self) -> BTreeMap<String, Vec<RemedyEntry>> {
        let mut groups: BTreeMap<String, Vec<RemedyEntry>> = BTreeMap::new();

        for plant in self.all() {
            for remedy in &plant.home_remedies {
                let entry = RemedyEntry {
                    ailment: remedy.ailment.clone(),
                    plant_id: plant.id.clone(),
                    plant_name: plant.name.clone(),
                    hindi_name: self.hindi_name(&plant.id).unwrap_or_default().to_string(),
                    plant_image: plant.image.clone(),
                    preparation: remedy.preparation.clone(),
                    usage: remedy.usage.clone(),
                };
                groups.entry(remedy.ailment.to_lowercase()).or_default().push(entry);
            }
        }

        groups
    }

    /// Remedy groups narrowed by a free-text term or a category bucket.
    /// A search term takes precedence over the category, as on the page.
    pub fn filtered_remedies(
        &self,
        term: Option<&str>,
        category: Option<AilmentCategory>,
    ) -> BTreeMap<String, Vec<RemedyEntry>> {
        self.remedies_by_ailment()
            .into_iter()
            .filter(|(ailment, _)| {
                if let Some(term) = term.filter(|t| !t.trim().is_empty()) {
                    return ailment.contains(&term.to_lowercase());
                }
                if let Some(category) = category {
                    return category.matches(ailment);
                }
                true
            })
            .collect()
    }
}
