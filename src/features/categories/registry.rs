use std::sync::Arc;

use crate::shared::constants::MEDIA_CATEGORIES;

/// Fixed, ordered set of categories media can be filed under.
///
/// Built once at startup and shared read-only; there is no way to add or
/// remove a category at runtime.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Arc<[String]>,
}

impl CategoryRegistry {
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// All registered categories, in registry order
    pub fn list(&self) -> &[String] {
        &self.categories
    }

    /// Check whether the given category is in the registry (exact match).
    pub fn is_valid(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new(MEDIA_CATEGORIES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_order() {
        let registry = CategoryRegistry::default();
        assert_eq!(
            registry.list(),
            [
                "Rap Battles",
                "MUBAS Got Talent",
                "Music",
                "Social Weekend Highlights",
                "Live",
            ]
        );
    }

    #[test]
    fn test_is_valid() {
        let registry = CategoryRegistry::default();
        assert!(registry.is_valid("Rap Battles"));
        assert!(registry.is_valid("Live"));
        assert!(!registry.is_valid("Comedy"));
        assert!(!registry.is_valid("rap battles"));
        assert!(!registry.is_valid(""));
    }
}
