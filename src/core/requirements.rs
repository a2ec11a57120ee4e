//! Requirements list parsing
//!
//! A requirements list is one dependency descriptor per line, such as
//! `requests==2.0.0` or `flask`. Blank lines and `#` comments carry no
//! dependency and never reach the downloader.

use std::path::Path;

use crate::error::ConfigError;

/// A single dependency to hand to the downloader, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDescriptor(String);

impl DependencyDescriptor {
    /// Parse one requirements line; `None` for blanks and comments
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            None
        } else {
            Some(Self(line.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DependencyDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keep only the lines that name a dependency
pub fn parse_lines<I, S>(lines: I) -> Vec<DependencyDescriptor>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|l| DependencyDescriptor::parse(l.as_ref()))
        .collect()
}

/// Read a requirements file into its raw lines
pub fn read_lines(path: &Path) -> Result<Vec<String>, ConfigError> {
    std::fs::read_to_string(path)
        .map(|content| content.lines().map(str::to_string).collect())
        .map_err(|e| ConfigError::RequirementsUnreadable {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::generators::requirement_line;
    use proptest::prelude::*;

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let deps = parse_lines(["requests==2.0.0", "# comment", "", "flask"]);
        let names: Vec<&str> = deps.iter().map(DependencyDescriptor::as_str).collect();
        assert_eq!(names, ["requests==2.0.0", "flask"]);
    }

    #[test]
    fn test_indented_comment_is_skipped() {
        assert_eq!(DependencyDescriptor::parse("   # pinned below"), None);
        assert_eq!(DependencyDescriptor::parse("\t"), None);
    }

    #[test]
    fn test_descriptor_is_trimmed_but_otherwise_verbatim() {
        let dep = DependencyDescriptor::parse("  Django>=1.4,<1.5  ").unwrap();
        assert_eq!(dep.as_str(), "Django>=1.4,<1.5");
    }

    #[test]
    fn test_read_lines_missing_file() {
        let err = read_lines(Path::new("/nonexistent/requirements.txt")).unwrap_err();
        assert!(matches!(err, ConfigError::RequirementsUnreadable { .. }));
    }

    #[test]
    fn test_read_lines_roundtrips_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requirements.txt");
        std::fs::write(&path, "six\n\n# x\nmock==1.0\n").unwrap();
        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, ["six", "", "# x", "mock==1.0"]);
        assert_eq!(parse_lines(&lines).len(), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_blank_and_comment_lines_never_survive(
            lines in prop::collection::vec(requirement_line(), 0..20)
        ) {
            let deps = parse_lines(&lines);
            let expected = lines
                .iter()
                .filter(|l| !l.trim().is_empty() && !l.trim().starts_with('#'))
                .count();
            prop_assert_eq!(deps.len(), expected);
            for dep in &deps {
                prop_assert!(!dep.as_str().is_empty());
                prop_assert!(!dep.as_str().starts_with('#'));
            }
        }
    }
}
