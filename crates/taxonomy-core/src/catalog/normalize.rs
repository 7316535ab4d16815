//! Shape Normalizer
//!
//! 歴史的に形の異なる生レコード（文字列、フィールド名の揺れ、単数/複数）を
//! Category → Subcategory → Item の正規ツリーに変換する。
//!
//! 各階層の子要素は [`FieldStrategy`] の順序付きリストで探索し、最初に配列を
//! 返したものを採用する。この順序は既存データとの互換性のため固定。

use serde_json::Value;
use tracing::debug;

use super::ident::is_blank_id;
use super::model::{Category, Item, Subcategory};

/// Name of the synthetic subcategory that holds a flat list of strings
pub const GENERAL_SUBCATEGORY: &str = "Geral";

/// Fields that may carry a node's display name, in lookup order
pub const NAME_FIELDS: &[&str] = &["nome", "name"];

/// Category children lookup order
pub const CATEGORY_CHILD_STRATEGIES: &[FieldStrategy] = &[
    FieldStrategy::new("subcategorias"),
    FieldStrategy::new("subcategories"),
    FieldStrategy::new("subCategorias"),
    FieldStrategy::new("children"),
];

/// Subcategory item lookup order. The last entry is the legacy shape where
/// items were stored under a nested `subcategorias` array.
pub const ITEM_STRATEGIES: &[FieldStrategy] = &[
    FieldStrategy::new("itens"),
    FieldStrategy::new("items"),
    FieldStrategy::new("produtos"),
    FieldStrategy::legacy("subcategorias"),
];

/// One step of a field fallback chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldStrategy {
    pub field: &'static str,
    /// Only present in old documents
    pub legacy: bool,
}

impl FieldStrategy {
    pub const fn new(field: &'static str) -> Self {
        Self {
            field,
            legacy: false,
        }
    }

    pub const fn legacy(field: &'static str) -> Self {
        Self {
            field,
            legacy: true,
        }
    }

    /// Array stored under this strategy's field, if any.
    ///
    /// A field that is present but not an array does not match.
    pub fn extract<'a>(&self, record: &'a Value) -> Option<&'a Vec<Value>> {
        record.get(self.field)?.as_array()
    }
}

/// Try each strategy in order; the first successful one wins
pub fn first_match<'a>(record: &'a Value, strategies: &[FieldStrategy]) -> Option<&'a Vec<Value>> {
    strategies.iter().find_map(|s| {
        let found = s.extract(record)?;
        if s.legacy {
            debug!(field = s.field, "using legacy item field");
        }
        Some(found)
    })
}

/// Normalize a list of raw category records.
///
/// Never fails: unknown shapes become empty collections and nodes whose name
/// yields an empty identifier are dropped.
pub fn normalize(records: &[Value]) -> Vec<Category> {
    let categories: Vec<Category> = records.iter().filter_map(normalize_record).collect();
    debug!(
        records = records.len(),
        categories = categories.len(),
        "normalized raw records"
    );
    categories
}

/// Normalize a single raw category record
pub fn normalize_record(record: &Value) -> Option<Category> {
    let Some(name) = node_name(record) else {
        debug!(record = %truncate(record), "dropping category record without usable name");
        return None;
    };

    let subcategories = match record {
        Value::Object(_) => normalize_children(record),
        _ => Vec::new(),
    };

    Some(Category::new(name, subcategories))
}

fn normalize_children(record: &Value) -> Vec<Subcategory> {
    let Some(children) = first_match(record, CATEGORY_CHILD_STRATEGIES) else {
        return Vec::new();
    };

    if !children.is_empty() && children.iter().all(Value::is_string) {
        let items = children.iter().filter_map(normalize_item).collect();
        return vec![Subcategory::new(GENERAL_SUBCATEGORY, items)];
    }

    children.iter().filter_map(normalize_subcategory).collect()
}

fn normalize_subcategory(value: &Value) -> Option<Subcategory> {
    let name = node_name(value)?;

    if value.is_string() {
        return Some(Subcategory::new(name.clone(), vec![Item::new(name)]));
    }

    let items = first_match(value, ITEM_STRATEGIES)
        .map(|raw| raw.iter().filter_map(normalize_item).collect())
        .unwrap_or_default();

    Some(Subcategory::new(name, items))
}

fn normalize_item(value: &Value) -> Option<Item> {
    node_name(value).map(Item::new)
}

/// Trimmed display name of a node, `None` when it would produce an empty id
fn node_name(value: &Value) -> Option<String> {
    let raw = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => NAME_FIELDS
            .iter()
            .find_map(|f| map.get(*f).and_then(Value::as_str))?,
        _ => return None,
    };

    let name = raw.trim();
    if is_blank_id(name) {
        return None;
    }
    Some(name.to_string())
}

fn truncate(value: &Value) -> String {
    let mut text = value.to_string();
    if text.len() > 80 {
        let mut cut = 80;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push('…');
    }
    text
}
