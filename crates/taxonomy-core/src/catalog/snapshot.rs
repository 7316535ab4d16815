//! Built catalog and the read-only queries forms run against it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ident::derive_id;
use super::model::{Category, Item, Subcategory};

/// Where a catalog's base records came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CatalogSource {
    Local,
    Remote { name: String },
}

/// Pipeline output for one input source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub source: CatalogSource,
    /// SHA-256 of the raw input the tree was built from
    pub fingerprint: String,
    pub built_at: DateTime<Utc>,
}

/// Location of an item inside the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPath<'a> {
    pub category: &'a Category,
    pub subcategory: &'a Subcategory,
    pub item: &'a Item,
}

impl ItemPath<'_> {
    /// `category/subcategory/item` id path
    pub fn key(&self) -> String {
        format!(
            "{}/{}/{}",
            self.category.id, self.subcategory.id, self.item.id
        )
    }

    /// Human-readable `Category › Subcategory › Item`
    pub fn label(&self) -> String {
        format!(
            "{} › {} › {}",
            self.category.name, self.subcategory.name, self.item.name
        )
    }
}

/// Flattened entry for dropdowns, in tree order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogOption {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub categories: usize,
    pub subcategories: usize,
    pub items: usize,
}

impl Catalog {
    pub fn new(categories: Vec<Category>, source: CatalogSource, fingerprint: String) -> Self {
        Self {
            categories,
            source,
            fingerprint,
            built_at: Utc::now(),
        }
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn subcategory(&self, category_id: &str, subcategory_id: &str) -> Option<&Subcategory> {
        self.category(category_id)?.subcategory(subcategory_id)
    }

    /// Every place an item id appears (splits can place one item in several
    /// categories)
    pub fn find_item(&self, item_id: &str) -> Vec<ItemPath<'_>> {
        self.item_paths().filter(|p| p.item.id == item_id).collect()
    }

    /// Same as [`Catalog::find_item`], matching by display name
    pub fn find_item_by_name(&self, name: &str) -> Vec<ItemPath<'_>> {
        self.find_item(&derive_id(name))
    }

    pub fn item_paths(&self) -> impl Iterator<Item = ItemPath<'_>> {
        self.categories.iter().flat_map(|category| {
            category.subcategories.iter().flat_map(move |subcategory| {
                subcategory.items.iter().map(move |item| ItemPath {
                    category,
                    subcategory,
                    item,
                })
            })
        })
    }

    pub fn options(&self) -> Vec<CatalogOption> {
        self.item_paths()
            .map(|p| CatalogOption {
                key: p.key(),
                label: p.label(),
            })
            .collect()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            categories: self.categories.len(),
            subcategories: self.categories.iter().map(|c| c.subcategories.len()).sum(),
            items: self.categories.iter().map(Category::item_count).sum(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.source, CatalogSource::Remote { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(
            vec![
                Category::new(
                    "Correias",
                    vec![Subcategory::new("Peças", vec![Item::new("Emenda")])],
                ),
                Category::new(
                    "Transportadores",
                    vec![
                        Subcategory::new("Peças", vec![Item::new("Emenda"), Item::new("Tambor")]),
                        Subcategory::new("Outros", vec![]),
                    ],
                ),
            ],
            CatalogSource::Local,
            "abc".to_string(),
        )
    }

    #[test]
    fn test_lookup() {
        let catalog = sample();
        assert!(catalog.category("correias").is_some());
        assert!(catalog.subcategory("transportadores", "outros").is_some());
        assert!(catalog.subcategory("correias", "outros").is_none());
        assert!(!catalog.is_remote());
    }

    #[test]
    fn test_find_item_in_several_places() {
        let catalog = sample();
        let paths = catalog.find_item_by_name("EMENDA");
        let keys: Vec<_> = paths.iter().map(ItemPath::key).collect();
        assert_eq!(
            keys,
            vec!["correias/pecas/emenda", "transportadores/pecas/emenda"]
        );
        assert_eq!(paths[0].label(), "Correias › Peças › Emenda");
        assert!(catalog.find_item("rolo").is_empty());
    }

    #[test]
    fn test_options_and_stats() {
        let catalog = sample();
        let options = catalog.options();
        assert_eq!(options.len(), 3);
        assert_eq!(options[2].key, "transportadores/pecas/tambor");

        assert_eq!(
            catalog.stats(),
            CatalogStats {
                categories: 2,
                subcategories: 3,
                items: 3,
            }
        );
    }

    #[test]
    fn test_source_serialization() {
        let json = serde_json::to_value(CatalogSource::Remote {
            name: "firestore".to_string(),
        })
        .unwrap();
        assert_eq!(json["kind"], "remote");
        assert_eq!(json["name"], "firestore");
    }
}
