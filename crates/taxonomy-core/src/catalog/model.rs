//! Taxonomy tree nodes
//!
//! Category → Subcategory → Item の3階層。各ノードのIDは名前からのみ導出される。

use serde::{Deserialize, Serialize};

use super::ident::derive_id;

/// Leaf node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub id: String,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let id = derive_id(&name);
        Self { name, id }
    }
}

/// Second level: a named group of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Subcategory {
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Self {
        let name = name.into();
        let id = derive_id(&name);
        Self { name, id, items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Top level of the taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    pub fn new(name: impl Into<String>, subcategories: Vec<Subcategory>) -> Self {
        let name = name.into();
        let id = derive_id(&name);
        Self {
            name,
            id,
            subcategories,
        }
    }

    /// Deep copy of the subtree owned by a new category name
    pub fn cloned_as(&self, name: impl Into<String>) -> Self {
        Self::new(name, self.subcategories.clone())
    }

    pub fn subcategory(&self, id: &str) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.id == id)
    }

    /// Total number of items across all subcategories
    pub fn item_count(&self) -> usize {
        self.subcategories.iter().map(|s| s.items.len()).sum()
    }
}
