//! Make resolution over the category forest.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use super::slug::normalize;
use crate::types::{Category, CategoryId};

/// How a make input was matched to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Normalized slug equals the normalized input.
    Slug,
    /// Normalized name equals the normalized input.
    Name,
    /// Normalized slug or name contains the normalized input.
    ///
    /// First match in store order wins, so the result can change if the
    /// upstream reorders its categories. Best effort only.
    Partial,
}

/// Outcome of resolving a make input against the category forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMake {
    /// The input exactly as the caller supplied it.
    pub requested_slug: String,
    /// The category the input resolved to, if any.
    pub matched: Option<Category>,
    /// Which matching rule produced `matched`.
    pub tier: Option<MatchTier>,
    /// Every category below `matched`, excluding `matched` itself.
    pub descendant_ids: HashSet<CategoryId>,
}

impl ResolvedMake {
    fn unmatched(requested_slug: &str) -> Self {
        Self {
            requested_slug: requested_slug.to_string(),
            matched: None,
            tier: None,
            descendant_ids: HashSet::new(),
        }
    }

    /// The matched category plus all of its descendants.
    ///
    /// Empty when nothing matched.
    #[must_use]
    pub fn category_ids(&self) -> HashSet<CategoryId> {
        let mut ids = self.descendant_ids.clone();
        if let Some(root) = &self.matched {
            ids.insert(root.id);
        }
        ids
    }
}

/// Parent to children lookup over a category snapshot.
///
/// Children are kept in store order. Categories whose parent does not exist
/// are indexed under that missing parent and are therefore never reached
/// from a real category.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex<'a> {
    categories: &'a [Category],
    children: HashMap<CategoryId, Vec<usize>>,
}

impl<'a> CategoryIndex<'a> {
    /// Build the index for a category snapshot.
    #[must_use]
    pub fn new(categories: &'a [Category]) -> Self {
        let mut children: HashMap<CategoryId, Vec<usize>> = HashMap::new();
        for (position, category) in categories.iter().enumerate() {
            children.entry(category.parent).or_default().push(position);
        }
        Self {
            categories,
            children,
        }
    }

    /// Direct children of `parent`, in store order.
    pub fn children(&self, parent: CategoryId) -> impl Iterator<Item = &'a Category> + '_ {
        self.children
            .get(&parent)
            .into_iter()
            .flatten()
            .filter_map(|&position| self.categories.get(position))
    }

    /// Top-level categories (makes), in store order.
    pub fn roots(&self) -> impl Iterator<Item = &'a Category> + '_ {
        self.children(CategoryId::ROOT)
    }

    /// All categories transitively below `root`, excluding `root`.
    ///
    /// Breadth-first with a visited set, so a cycle in the parent pointers
    /// ends the walk instead of looping.
    #[must_use]
    pub fn descendants(&self, root: CategoryId) -> HashSet<CategoryId> {
        let mut visited = HashSet::from([root]);
        let mut found = HashSet::new();
        let mut queue = VecDeque::from([root]);

        while let Some(current) = queue.pop_front() {
            for child in self.children(current) {
                if visited.insert(child.id) {
                    found.insert(child.id);
                    queue.push_back(child.id);
                }
            }
        }

        found
    }
}

/// All categories transitively below `root`, excluding `root`.
#[must_use]
pub fn descendant_ids(root: CategoryId, categories: &[Category]) -> HashSet<CategoryId> {
    CategoryIndex::new(categories).descendants(root)
}

/// Resolve a make slug or name to a category and its descendants.
///
/// Tries, in order: exact normalized slug, exact normalized name, then the
/// first category whose normalized slug or name contains the normalized
/// input. An input that normalizes to nothing never matches.
#[must_use]
pub fn resolve_make(make_slug_or_name: &str, categories: &[Category]) -> ResolvedMake {
    let wanted = normalize(make_slug_or_name);
    if wanted.is_empty() {
        return ResolvedMake::unmatched(make_slug_or_name);
    }

    let Some((matched, tier)) = find_make(&wanted, categories) else {
        return ResolvedMake::unmatched(make_slug_or_name);
    };

    ResolvedMake {
        requested_slug: make_slug_or_name.to_string(),
        descendant_ids: descendant_ids(matched.id, categories),
        matched: Some(matched.clone()),
        tier: Some(tier),
    }
}

fn find_make<'a>(wanted: &str, categories: &'a [Category]) -> Option<(&'a Category, MatchTier)> {
    if let Some(c) = categories.iter().find(|c| normalize(&c.slug) == wanted) {
        return Some((c, MatchTier::Slug));
    }
    if let Some(c) = categories.iter().find(|c| normalize(&c.name) == wanted) {
        return Some((c, MatchTier::Name));
    }
    categories
        .iter()
        .find(|c| normalize(&c.slug).contains(wanted) || normalize(&c.name).contains(wanted))
        .map(|c| (c, MatchTier::Partial))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: i64, slug: &str, name: &str, parent: i64) -> Category {
        Category {
            id: CategoryId::new(id),
            slug: slug.to_string(),
            name: name.to_string(),
            parent: CategoryId::new(parent),
            count: 0,
        }
    }

    fn ids(raw: &[i64]) -> HashSet<CategoryId> {
        raw.iter().copied().map(CategoryId::new).collect()
    }

    /// Two makes, BMW three levels deep, plus an orphan pointing at id 99.
    fn forest() -> Vec<Category> {
        vec![
            cat(1, "bmw", "BMW", 0),
            cat(2, "x5", "X5", 1),
            cat(3, "x5-g05", "X5 G05", 2),
            cat(4, "x5-g05-lci", "X5 G05 LCI", 2),
            cat(5, "x7-g07", "X7 G07", 1),
            cat(10, "land-rover", "Land Rover", 0),
            cat(11, "l460-vogue", "L460 Vogue", 10),
            cat(20, "lost-model", "Lost Model", 99),
        ]
    }

    /// Reference closure: repeatedly add any category whose parent is already
    /// in the set until nothing changes.
    fn closure_by_fixpoint(root: CategoryId, categories: &[Category]) -> HashSet<CategoryId> {
        let mut reached = HashSet::from([root]);
        loop {
            let before = reached.len();
            for c in categories {
                if reached.contains(&c.parent) {
                    reached.insert(c.id);
                }
            }
            if reached.len() == before {
                break;
            }
        }
        reached.remove(&root);
        reached
    }

    #[test]
    fn test_descendants_are_transitive_and_exclude_root() {
        let categories = forest();
        assert_eq!(
            descendant_ids(CategoryId::new(1), &categories),
            ids(&[2, 3, 4, 5])
        );
        assert_eq!(descendant_ids(CategoryId::new(2), &categories), ids(&[3, 4]));
        assert!(descendant_ids(CategoryId::new(3), &categories).is_empty());
    }

    #[test]
    fn test_descendants_match_reference_closure() {
        let categories = forest();
        for c in &categories {
            assert_eq!(
                descendant_ids(c.id, &categories),
                closure_by_fixpoint(c.id, &categories),
                "closure mismatch for {}",
                c.slug
            );
        }
    }

    #[test]
    fn test_orphan_is_never_a_descendant() {
        let categories = forest();
        for root in [1, 10, 2] {
            assert!(!descendant_ids(CategoryId::new(root), &categories).contains(&CategoryId::new(20)));
        }
        // The missing parent itself still "owns" the orphan without failing.
        assert_eq!(descendant_ids(CategoryId::new(99), &categories), ids(&[20]));
    }

    #[test]
    fn test_descendants_terminate_on_cycle() {
        let categories = vec![
            cat(1, "a", "A", 2),
            cat(2, "b", "B", 1),
            cat(3, "c", "C", 2),
        ];
        assert_eq!(descendant_ids(CategoryId::new(1), &categories), ids(&[2, 3]));
        assert_eq!(descendant_ids(CategoryId::new(2), &categories), ids(&[1, 3]));
    }

    #[test]
    fn test_descendants_terminate_on_self_parent() {
        let categories = vec![cat(7, "loop", "Loop", 7), cat(8, "child", "Child", 7)];
        assert_eq!(descendant_ids(CategoryId::new(7), &categories), ids(&[8]));
    }

    #[test]
    fn test_index_roots_and_children_keep_store_order() {
        let categories = forest();
        let index = CategoryIndex::new(&categories);
        let roots: Vec<_> = index.roots().map(|c| c.slug.as_str()).collect();
        assert_eq!(roots, vec!["bmw", "land-rover"]);
        let children: Vec<_> = index
            .children(CategoryId::new(2))
            .map(|c| c.slug.as_str())
            .collect();
        assert_eq!(children, vec!["x5-g05", "x5-g05-lci"]);
    }

    #[test]
    fn test_resolve_exact_slug() {
        let resolved = resolve_make("land-rover", &forest());
        assert_eq!(resolved.tier, Some(MatchTier::Slug));
        assert_eq!(resolved.matched.map(|c| c.id), Some(CategoryId::new(10)));
        assert_eq!(resolved.descendant_ids, ids(&[11]));
    }

    #[test]
    fn test_resolve_normalizes_input() {
        let resolved = resolve_make("BMW ", &forest());
        assert_eq!(resolved.tier, Some(MatchTier::Slug));
        assert_eq!(resolved.requested_slug, "BMW ");
        assert_eq!(resolved.category_ids(), ids(&[1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_resolve_by_name_when_slug_differs() {
        let categories = vec![cat(30, "rr-make", "Rolls Royce", 0), cat(31, "ghost", "Ghost", 30)];
        let resolved = resolve_make("rolls-royce", &categories);
        assert_eq!(resolved.tier, Some(MatchTier::Name));
        assert_eq!(resolved.category_ids(), ids(&[30, 31]));
    }

    #[test]
    fn test_resolve_partial_takes_first_in_store_order() {
        let resolved = resolve_make("rover", &forest());
        assert_eq!(resolved.tier, Some(MatchTier::Partial));
        assert_eq!(resolved.matched.map(|c| c.id), Some(CategoryId::new(10)));
    }

    #[test]
    fn test_resolve_prefers_slug_over_earlier_name_match() {
        let categories = vec![cat(1, "other", "Audi", 0), cat(2, "audi", "Audi Cars", 0)];
        let resolved = resolve_make("audi", &categories);
        assert_eq!(resolved.tier, Some(MatchTier::Slug));
        assert_eq!(resolved.matched.map(|c| c.id), Some(CategoryId::new(2)));
    }

    #[test]
    fn test_resolve_no_match() {
        let resolved = resolve_make("ferrari", &forest());
        assert!(resolved.matched.is_none());
        assert!(resolved.tier.is_none());
        assert!(resolved.category_ids().is_empty());
    }

    #[test]
    fn test_resolve_empty_inputs() {
        assert!(resolve_make("bmw", &[]).matched.is_none());
        assert!(resolve_make("", &forest()).matched.is_none());
        assert!(resolve_make(" - ", &forest()).matched.is_none());
    }

    #[test]
    fn test_resolved_make_on_cycle_terminates() {
        let categories = vec![cat(1, "a", "A", 2), cat(2, "b", "B", 1)];
        let resolved = resolve_make("a", &categories);
        assert_eq!(resolved.descendant_ids, ids(&[2]));
        assert_eq!(resolved.category_ids(), ids(&[1, 2]));
    }
}
