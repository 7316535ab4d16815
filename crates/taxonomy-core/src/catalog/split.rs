//! Category Splitter
//!
//! 複数の実カテゴリを1つにまとめてしまっている旧データのカテゴリ（複合カテゴリ）を、
//! 静的な分割テーブルに従って個別カテゴリへ複製する。

use std::collections::HashSet;

use tracing::debug;

use super::model::Category;

/// Compound categories and the categories they stand for
pub const SPLIT_TABLE: &[SplitRule] = &[
    SplitRule {
        source_id: "separadores-magneticos-e-detectores-de-metais",
        targets: &["Separadores Magnéticos", "Detectores de Metais"],
    },
    SplitRule {
        source_id: "correias-e-transportadores",
        targets: &["Correias", "Transportadores"],
    },
    SplitRule {
        source_id: "maquinas-e-equipamentos-pesados",
        targets: &["Máquinas Pesadas", "Equipamentos Pesados"],
    },
];

/// One entry of the split table
#[derive(Debug, Clone)]
pub struct SplitRule {
    /// Identifier of the compound category
    pub source_id: &'static str,
    /// Display names of the categories that replace it, in output order
    pub targets: &'static [&'static str],
}

/// Split compound categories using [`SPLIT_TABLE`]
pub fn split_categories(categories: Vec<Category>) -> Vec<Category> {
    split_with(categories, SPLIT_TABLE)
}

/// Split compound categories using a custom table.
///
/// Each compound category is replaced by one deep copy per target name. The
/// output is deduplicated by category id, first occurrence wins.
pub fn split_with(categories: Vec<Category>, table: &[SplitRule]) -> Vec<Category> {
    collapse(expand_with(categories, table))
}

/// A category after expansion, remembering the compound it was cloned from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitCategory {
    pub category: Category,
    /// `source_id` of the compound, `None` for categories that were not split
    pub origin: Option<&'static str>,
}

impl SplitCategory {
    pub fn untouched(category: Category) -> Self {
        Self {
            category,
            origin: None,
        }
    }
}

/// First half of the split: replace compounds by their clones without
/// deduplicating, so later stages can still tell the clones apart
pub fn expand_with(categories: Vec<Category>, table: &[SplitRule]) -> Vec<SplitCategory> {
    let mut expanded = Vec::with_capacity(categories.len());

    for category in categories {
        match table.iter().find(|r| r.source_id == category.id) {
            Some(rule) => {
                debug!(
                    source = %category.id,
                    targets = ?rule.targets,
                    "splitting compound category"
                );
                expanded.extend(rule.targets.iter().map(|t| SplitCategory {
                    category: category.cloned_as(*t),
                    origin: Some(rule.source_id),
                }));
            }
            None => expanded.push(SplitCategory::untouched(category)),
        }
    }

    expanded
}

/// Second half of the split: drop provenance and keep the first category
/// of each id
pub fn collapse(expanded: Vec<SplitCategory>) -> Vec<Category> {
    let mut seen = HashSet::new();
    expanded
        .into_iter()
        .map(|s| s.category)
        .filter(|c| seen.insert(c.id.clone()))
        .collect()
}
