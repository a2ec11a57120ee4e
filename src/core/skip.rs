//! Packages excluded from building
//!
//! Names are compared case-insensitively. The built-in defaults are always
//! present so core packaging tools are never rebuilt.

use std::collections::BTreeSet;

use crate::config::defaults::DEFAULT_SKIP_PACKAGES;

/// Set of lowercase package names that must not be built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipSet {
    names: BTreeSet<String>,
}

impl Default for SkipSet {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl SkipSet {
    /// The built-in defaults only
    pub fn with_defaults() -> Self {
        Self::empty().extend_with(DEFAULT_SKIP_PACKAGES.iter().copied())
    }

    /// No names at all
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Add more names; blanks are ignored
    #[must_use]
    pub fn extend_with<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref().trim();
            if !name.is_empty() {
                self.names.insert(name.to_lowercase());
            }
        }
        self
    }

    /// Whether `name` is skipped, ignoring case
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    /// Skipped names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::generators::package_name;
    use proptest::prelude::*;

    #[test]
    fn test_defaults_always_present() {
        let skip = SkipSet::with_defaults().extend_with(["Flask"]);
        assert!(skip.contains("setuptools"));
        assert!(skip.contains("pip"));
        assert!(skip.contains("flask"));
    }

    #[test]
    fn test_blank_entries_ignored() {
        let skip = SkipSet::empty().extend_with(["", "   "]);
        assert!(skip.is_empty());
    }

    #[test]
    fn test_names_are_sorted_and_deduplicated() {
        let skip = SkipSet::empty().extend_with(["b", "A", "a"]);
        assert_eq!(skip.names().collect::<Vec<_>>(), ["a", "b"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_membership_ignores_case(name in package_name()) {
            let skip = SkipSet::empty().extend_with([name.to_uppercase()]);
            prop_assert!(skip.contains(&name));
            prop_assert!(skip.contains(&name.to_uppercase()));
        }
    }
}
