use std::sync::Arc;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::domain::entities::{Category, Product};

/// Fuzzy matching over already fetched lists, using the Skim algorithm.
#[derive(Clone)]
pub struct FuzzySearcher {
    matcher: Arc<SkimMatcherV2>,
}

impl Default for FuzzySearcher {
    fn default() -> Self {
        Self {
            matcher: Arc::new(SkimMatcherV2::default().ignore_case()),
        }
    }
}

impl std::fmt::Debug for FuzzySearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzySearcher").finish_non_exhaustive()
    }
}

impl FuzzySearcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn score(&self, choice: &str, pattern: &str) -> Option<i64> {
        self.matcher.fuzzy_match(choice, pattern)
    }

    /// Returns the indices of matching products, best match first. A blank
    /// pattern keeps every product in its original order.
    #[must_use]
    pub fn filter_products(&self, products: &[Product], pattern: &str) -> Vec<usize> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return (0..products.len()).collect();
        }

        let mut scored: Vec<(usize, i64)> = products
            .iter()
            .enumerate()
            .filter_map(|(idx, product)| {
                let haystack = match &product.description {
                    Some(desc) => format!("{} {}", product.name, desc),
                    None => product.name.clone(),
                };
                self.score(&haystack, pattern).map(|score| (idx, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.into_iter().map(|(idx, _)| idx).collect()
    }

    /// Category names matching the pattern, best match first.
    #[must_use]
    pub fn filter_categories<'a>(&self, categories: &'a [Category], pattern: &str) -> Vec<&'a Category> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return categories.iter().collect();
        }

        let mut scored: Vec<(&Category, i64)> = categories
            .iter()
            .filter_map(|c| self.score(&c.name, pattern).map(|s| (c, s)))
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(c, _)| c).collect()
    }
}
