//! Deep merge of canonical trees.
//!
//! Unions an "additions" tree into a base tree keyed strictly by identifier.
//! Nothing already in the base is removed or replaced.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::model::{Category, Item, Subcategory};

/// What a merge added to the base tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub categories_added: usize,
    pub subcategories_added: usize,
    pub items_added: usize,
}

impl MergeReport {
    /// Whether any node was added
    pub fn changed(&self) -> bool {
        self.categories_added + self.subcategories_added + self.items_added > 0
    }
}

/// Merge `additions` into `base` and return the extended base
pub fn merge_trees(base: Vec<Category>, additions: &[Category]) -> Vec<Category> {
    merge_trees_with_report(base, additions).0
}

/// Same as [`merge_trees`], also reporting what was added
pub fn merge_trees_with_report(
    mut base: Vec<Category>,
    additions: &[Category],
) -> (Vec<Category>, MergeReport) {
    let mut report = MergeReport::default();
    let mut index: HashMap<String, usize> = base
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.clone(), i))
        .collect();

    for addition in additions {
        match index.get(&addition.id) {
            Some(&pos) => {
                merge_subcategories(&mut base[pos].subcategories, &addition.subcategories, &mut report);
            }
            None => {
                index.insert(addition.id.clone(), base.len());
                base.push(addition.clone());
                report.categories_added += 1;
            }
        }
    }

    debug!(
        categories = report.categories_added,
        subcategories = report.subcategories_added,
        items = report.items_added,
        "merged additions into base tree"
    );

    (base, report)
}

fn merge_subcategories(
    target: &mut Vec<Subcategory>,
    additions: &[Subcategory],
    report: &mut MergeReport,
) {
    let mut index: HashMap<String, usize> = target
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id.clone(), i))
        .collect();

    for addition in additions {
        match index.get(&addition.id) {
            Some(&pos) => merge_items(&mut target[pos].items, &addition.items, report),
            None => {
                index.insert(addition.id.clone(), target.len());
                target.push(addition.clone());
                report.subcategories_added += 1;
            }
        }
    }
}

fn merge_items(target: &mut Vec<Item>, additions: &[Item], report: &mut MergeReport) {
    let mut seen: HashSet<String> = target.iter().map(|i| i.id.clone()).collect();

    for item in additions {
        if seen.insert(item.id.clone()) {
            target.push(item.clone());
            report.items_added += 1;
        }
    }
}
