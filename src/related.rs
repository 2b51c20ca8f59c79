use crate::catalog::LoadError;
use crate::route::Route;
use crate::{Catalog, Item, statics};
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};
use std::{fs, path::Path};

/// One link in the related-collections bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedLink {
    pub name: String,
    pub location: String,
    /// The collection being viewed; shown as a label instead of a link.
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedPanel {
    pub heading: &'static str,
    pub links: Vec<RelatedLink>,
}

/// Computes the related-collections bar for a collection view.
/// `None` means nothing is rendered.
pub trait RelatedCollections {
    fn related(&self, catalog: &Catalog, current: &str, items: &[Item]) -> Option<RelatedPanel>;
}

fn link(name: &str, current: &str) -> RelatedLink {
    RelatedLink {
        name: name.to_string(),
        location: Route::Collection(name.to_string()).to_location(),
        current: name == current,
    }
}

fn knife_model(item: &Item) -> &str {
    item.weapon_name().unwrap_or(&item.name)
}

/// Cases that drop at least one of the knife models found in the current view.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedKnifeCases;

impl SharedKnifeCases {
    /// Sorted case names sharing a knife model with `items` (the current case included).
    pub fn overlapping_cases(catalog: &Catalog, items: &[Item]) -> Vec<String> {
        let current_models: BTreeSet<&str> = items
            .iter()
            .filter(|i| i.is_knife())
            .map(knife_model)
            .collect();
        if current_models.is_empty() {
            return Vec::new();
        }

        let mut case_models: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for item in catalog.items().iter().filter(|i| i.is_knife()) {
            for krate in &item.crates {
                case_models
                    .entry(krate.name.as_str())
                    .or_default()
                    .insert(knife_model(item));
            }
        }

        case_models
            .into_iter()
            .filter(|(_, models)| models.iter().any(|m| current_models.contains(m)))
            .map(|(case, _)| case.to_string())
            .collect()
    }
}

impl RelatedCollections for SharedKnifeCases {
    fn related(&self, catalog: &Catalog, current: &str, items: &[Item]) -> Option<RelatedPanel> {
        let cases = Self::overlapping_cases(catalog, items);
        // A single hit is just the current case.
        if cases.len() < 2 {
            return None;
        }
        Some(RelatedPanel {
            heading: statics::EN_LABEL_SIMILAR_CASES,
            links: cases.iter().map(|c| link(c, current.trim())).collect(),
        })
    }
}

/// Hand-maintained `name -> [related names]` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticRelatedTable {
    table: IndexMap<String, Vec<String>>,
}

impl StaticRelatedTable {
    pub fn new(table: IndexMap<String, Vec<String>>) -> Self {
        Self { table }
    }

    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    pub fn load_path(path: &Path) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.table.get(name).map(Vec::as_slice)
    }
}

impl RelatedCollections for StaticRelatedTable {
    fn related(&self, _catalog: &Catalog, current: &str, _items: &[Item]) -> Option<RelatedPanel> {
        let current = current.trim();
        let names = self.get(current).filter(|names| !names.is_empty())?;
        Some(RelatedPanel {
            heading: statics::EN_LABEL_SIMILAR_COLLECTIONS,
            links: names.iter().map(|n| link(n, current)).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{RelatedCollections, StaticRelatedTable};
    use crate::Catalog;

    #[test]
    fn static_table_renders_entry_verbatim() {
        let table = StaticRelatedTable::from_json(
            r#"{ "Chroma Case": ["Chroma 2 Case", "Chroma 3 Case"], "Empty": [] }"#,
        )
        .unwrap();
        let catalog = Catalog::default();

        let panel = table.related(&catalog, "Chroma Case", &[]).unwrap();
        let names: Vec<_> = panel.links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Chroma 2 Case", "Chroma 3 Case"]);
        assert_eq!(panel.links[0].location, "?collection=Chroma+2+Case");

        assert!(table.related(&catalog, "Empty", &[]).is_none());
        assert!(table.related(&catalog, "Missing", &[]).is_none());
    }

    #[test]
    fn static_table_rejects_malformed_json() {
        assert!(StaticRelatedTable::from_json("[1, 2]").is_err());
    }
}
