//! Specializer
//!
//! 複合カテゴリから分割されたカテゴリペアについて、アイテム名のキーワード判定で中身を
//! 振り分け直す。Splitter の単純な複製と違い、内容ベースの再分類を行う。
//!
//! 対象は Splitter が複合カテゴリから生成したクローンのみ。同名でも別ソース由来の
//! カテゴリには触れない。ルールは [`SPECIALIZATION_RULES`] のテーブルで定義する。

use tracing::debug;

use super::ident::derive_id;
use super::model::{Category, Item, Subcategory};
use super::split::SplitCategory;

/// Keyword that marks an item as belt-related
pub const BELT_KEYWORD: &str = "correia";

/// Content-based re-partitioning rules, applied to the splitter's clones
pub const SPECIALIZATION_RULES: &[SpecializationRule] = &[SpecializationRule {
    source_id: "correias-e-transportadores",
    keyword: BELT_KEYWORD,
    matching: "Correias",
    complement: "Transportadores",
    partitions: &[
        Partition {
            source: "Transportadores",
            matching: "Correias",
            complement: "Transportadores",
        },
        Partition {
            source: "Peças",
            matching: "Peças",
            complement: "Peças",
        },
    ],
    shared: &["Serviços", "Outros"],
}];

/// A category pair whose items are split by a name predicate
#[derive(Debug, Clone)]
pub struct SpecializationRule {
    /// Compound category the pair was cloned from
    pub source_id: &'static str,
    /// Case-insensitive substring tested against item names
    pub keyword: &'static str,
    /// Category that keeps the matching items
    pub matching: &'static str,
    /// Category that keeps the remaining items
    pub complement: &'static str,
    /// Filtered subcategories that change name depending on the side
    pub partitions: &'static [Partition],
    /// Subcategories copied unchanged to both sides. Every other subcategory
    /// is filtered under its own name.
    pub shared: &'static [&'static str],
}

/// A filtered subcategory and its name on each side
#[derive(Debug, Clone)]
pub struct Partition {
    pub source: &'static str,
    pub matching: &'static str,
    pub complement: &'static str,
}

/// Which side of a rule a category is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Matching,
    Complement,
}

impl SpecializationRule {
    /// Whether an item name satisfies the keyword predicate
    pub fn matches(&self, item_name: &str) -> bool {
        item_name
            .to_lowercase()
            .contains(&self.keyword.to_lowercase())
    }

    /// Side of this rule a split clone belongs to. Categories from any other
    /// origin never match.
    pub fn side_of(&self, origin: Option<&str>, category_id: &str) -> Option<Side> {
        if origin != Some(self.source_id) {
            return None;
        }
        if derive_id(self.matching) == category_id {
            Some(Side::Matching)
        } else if derive_id(self.complement) == category_id {
            Some(Side::Complement)
        } else {
            None
        }
    }

    pub fn is_shared(&self, subcategory_id: &str) -> bool {
        self.shared.iter().any(|s| derive_id(s) == subcategory_id)
    }

    fn category_name(&self, side: Side) -> &'static str {
        match side {
            Side::Matching => self.matching,
            Side::Complement => self.complement,
        }
    }

    /// Name a filtered subcategory takes on `side`
    fn target_name<'a>(&self, sub: &'a Subcategory, side: Side) -> &'a str {
        self.partitions
            .iter()
            .find(|p| derive_id(p.source) == sub.id)
            .map(|p| match side {
                Side::Matching => p.matching,
                Side::Complement => p.complement,
            })
            .unwrap_or(sub.name.as_str())
    }
}

/// Apply [`SPECIALIZATION_RULES`]
pub fn specialize(categories: Vec<SplitCategory>) -> Vec<SplitCategory> {
    specialize_with(categories, SPECIALIZATION_RULES)
}

/// Apply a custom rule table to the splitter's expanded output. Categories
/// that are not clones of a rule's compound pass through.
pub fn specialize_with(
    categories: Vec<SplitCategory>,
    rules: &[SpecializationRule],
) -> Vec<SplitCategory> {
    categories
        .into_iter()
        .map(|split| {
            let hit = rules.iter().find_map(|r| {
                r.side_of(split.origin, &split.category.id)
                    .map(|side| (r, side))
            });
            match hit {
                Some((rule, side)) => SplitCategory {
                    category: specialize_category(split.category, rule, side),
                    origin: split.origin,
                },
                None => split,
            }
        })
        .collect()
}

fn specialize_category(category: Category, rule: &SpecializationRule, side: Side) -> Category {
    let keep_matching = side == Side::Matching;
    let mut subcategories: Vec<Subcategory> = Vec::with_capacity(category.subcategories.len());

    for sub in &category.subcategories {
        if rule.is_shared(&sub.id) {
            append_into(&mut subcategories, &sub.name, sub.items.iter().cloned());
            continue;
        }

        let items: Vec<_> = sub
            .items
            .iter()
            .filter(|i| rule.matches(&i.name) == keep_matching)
            .cloned()
            .collect();
        if !items.is_empty() {
            append_into(&mut subcategories, rule.target_name(sub, side), items);
        }
    }

    if subcategories.iter().all(Subcategory::is_empty) {
        subcategories = vec![Subcategory::new(rule.category_name(side), Vec::new())];
    }

    debug!(
        category = %category.id,
        ?side,
        subcategories = subcategories.len(),
        "specialized category"
    );

    Category {
        subcategories,
        ..category
    }
}

/// Add items to the subcategory named `name`, creating it if no sibling has
/// that id yet. Items already present by id are skipped.
fn append_into(
    subcategories: &mut Vec<Subcategory>,
    name: &str,
    items: impl IntoIterator<Item = Item>,
) {
    let id = derive_id(name);
    let pos = match subcategories.iter().position(|s| s.id == id) {
        Some(pos) => pos,
        None => {
            subcategories.push(Subcategory::new(name, Vec::new()));
            subcategories.len() - 1
        }
    };

    let target = &mut subcategories[pos].items;
    for item in items {
        if !target.iter().any(|i| i.id == item.id) {
            target.push(item);
        }
    }
}
