//! Product category.

use serde::{Deserialize, Serialize};

/// Category as returned by `/api/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

impl Category {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Sidebar entries shown on the category tab before the API list.
pub const SIDEBAR_CATEGORIES: [&str; 12] = [
    "Recommend",
    "Clothing",
    "Shoes",
    "Luggage & Bags",
    "Watch & Jewelry",
    "Kids & Toys",
    "Home & Appliances",
    "Beauty",
    "Medicine",
    "Phones & Telecommunications",
    "Electronics",
    "Computer & Office",
];

/// Merges the static sidebar with fetched category names, skipping
/// case-insensitive duplicates and keeping sidebar order first.
#[must_use]
pub fn merge_with_sidebar(fetched: &[Category]) -> Vec<String> {
    let mut names: Vec<String> = SIDEBAR_CATEGORIES.iter().map(ToString::to_string).collect();

    for category in fetched {
        let name = category.name.trim();
        if name.is_empty() {
            continue;
        }
        if !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            names.push(name.to_string());
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_skips_duplicates_and_blanks() {
        let fetched = vec![
            Category::new("1", "shoes"),
            Category::new("2", "Garden"),
            Category::new("3", "  "),
        ];

        let merged = merge_with_sidebar(&fetched);

        assert_eq!(merged.len(), SIDEBAR_CATEGORIES.len() + 1);
        assert_eq!(merged.last().map(String::as_str), Some("Garden"));
        assert_eq!(merged[0], "Recommend");
    }
}
