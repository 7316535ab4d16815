//! Final duplicate collapse. First occurrence of an id wins at every level
//! and first-seen order is kept.

use std::collections::HashSet;

use super::model::{Category, Item, Subcategory};

pub fn dedupe_tree(categories: Vec<Category>) -> Vec<Category> {
    let mut seen = HashSet::new();
    categories
        .into_iter()
        .filter(|c| seen.insert(c.id.clone()))
        .map(|c| Category {
            subcategories: dedupe_subcategories(c.subcategories),
            ..c
        })
        .collect()
}

pub fn dedupe_subcategories(subcategories: Vec<Subcategory>) -> Vec<Subcategory> {
    let mut seen = HashSet::new();
    subcategories
        .into_iter()
        .filter(|s| seen.insert(s.id.clone()))
        .map(|s| Subcategory {
            items: dedupe_items(s.items),
            ..s
        })
        .collect()
}

pub fn dedupe_items(items: Vec<Item>) -> Vec<Item> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|i| seen.insert(i.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_keep_first_seen_order() {
        let items = vec![
            Item::new("A"),
            Item::new("B"),
            Item::new("a"),
            Item::new("C"),
        ];
        let names: Vec<_> = dedupe_items(items).into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_dedupes_every_level() {
        let tree = vec![
            Category::new(
                "Bombas",
                vec![
                    Subcategory::new("Peças", vec![Item::new("Rotor"), Item::new("ROTOR")]),
                    Subcategory::new("pecas", vec![Item::new("Selo")]),
                ],
            ),
            Category::new("BOMBAS", vec![]),
        ];

        let result = dedupe_tree(tree);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].subcategories.len(), 1);
        assert_eq!(result[0].subcategories[0].name, "Peças");
        assert_eq!(result[0].subcategories[0].items, vec![Item::new("Rotor")]);
    }

    #[test]
    fn test_already_unique_tree_unchanged() {
        let tree = vec![Category::new(
            "A",
            vec![Subcategory::new("X", vec![Item::new("1"), Item::new("2")])],
        )];
        assert_eq!(dedupe_tree(tree.clone()), tree);
    }
}
