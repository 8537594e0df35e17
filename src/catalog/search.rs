//! Field-scoped plant search
//!
//! Case-insensitive substring matching across the catalog, scoped to one
//! of four fields. Name search also covers scientific and Hindi names so
//! a query in either script finds the plant.

use serde::Deserialize;

use super::{Plant, PlantCatalog};

/// Which part of the record a query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    Name,
    Classification,
    Properties,
    Uses,
}

impl PlantCatalog {
    /// Search the catalog; an empty or whitespace query matches nothing
    pub fn search(&self, query: &str, field: SearchField) -> Vec<&Plant> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        self.all()
            .iter()
            .filter(|plant| self.matches(plant, &term, field))
            .collect()
    }

    fn matches(&self, plant: &Plant, term: &str, field: SearchField) -> bool {
        match field {
            SearchField::Name => {
                plant.name.to_lowercase().contains(term)
                    || plant.scientific_name.to_lowercase().contains(term)
                    || self
                        .hindi_name(&plant.id)
                        .is_some_and(|h| h.to_lowercase().contains(term))
            }
            SearchField::Classification => {
                let c = &plant.classification;
                c.family.to_lowercase().contains(term)
                    || c.subfamily
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(term))
                    || c.genus.to_lowercase().contains(term)
                    || c.species.to_lowercase().contains(term)
            }
            SearchField::Properties => plant
                .properties
                .iter()
                .any(|p| p.to_lowercase().contains(term)),
            SearchField::Uses => plant
                .medicinal_uses
                .iter()
                .any(|u| u.to_lowercase().contains(term)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PlantCatalog {
        PlantCatalog::builtin().unwrap()
    }

    #[test]
    fn name_search_matches_display_and_scientific_names() {
        let c = catalog();
        let by_name = c.search("neem", SearchField::Name);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "neem");

        let by_scientific = c.search("azadirachta", SearchField::Name);
        assert_eq!(by_scientific.len(), 1);
        assert_eq!(by_scientific[0].id, "neem");
    }

    #[test]
    fn name_search_matches_hindi_names() {
        let c = catalog();
        let results = c.search("तुलसी", SearchField::Name);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "tulsi");
    }

    #[test]
    fn classification_search_by_family() {
        let c = catalog();
        let lamiaceae: Vec<&str> = c
            .search("lamiaceae", SearchField::Classification)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        // Tulsi, lavender, rosemary and basil all belong to the mint family
        assert!(lamiaceae.contains(&"tulsi"));
        assert!(lamiaceae.contains(&"lavender"));
        assert!(lamiaceae.contains(&"rosemary"));
        assert!(lamiaceae.contains(&"basil"));
    }

    #[test]
    fn properties_and_uses_scoping() {
        let c = catalog();
        let adaptogens = c.search("adaptogenic", SearchField::Properties);
        assert!(adaptogens.iter().any(|p| p.id == "tulsi"));
        assert!(adaptogens.iter().any(|p| p.id == "ginseng"));

        let memory = c.search("memory", SearchField::Uses);
        assert!(memory.iter().any(|p| p.id == "rosemary"));
        // "memory" appears in uses, not in properties
        assert!(c.search("memory", SearchField::Properties).is_empty());
    }

    #[test]
    fn empty_query_matches_nothing() {
        let c = catalog();
        assert!(c.search("", SearchField::Name).is_empty());
        assert!(c.search("   ", SearchField::Uses).is_empty());
    }
}
