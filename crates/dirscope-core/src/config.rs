//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Configuration for scanning operations.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Maximum depth to expand (None = unlimited).
    ///
    /// Sub-directories of a directory at this depth are recorded but not listed.
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Glob patterns matched against entry names; matches are omitted.
    #[builder(default)]
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Include hidden files (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,
}

fn default_true() -> bool {
    true
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        if let Some(ref patterns) = self.exclude_patterns {
            for pattern in patterns {
                Glob::new(pattern).map_err(|e| format!("Invalid exclude pattern: {e}"))?;
            }
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: None,
            exclude_patterns: Vec::new(),
            include_hidden: true,
        }
    }

    /// Whether a directory at `depth` may have its sub-directories listed.
    pub fn expands_below(&self, depth: u32) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }

    /// Compile the exclusion rules into a reusable matcher.
    pub fn exclude_matcher(&self) -> Result<ExcludeMatcher, ScanError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude_patterns {
            let glob = Glob::new(pattern).map_err(|e| ScanError::InvalidConfig {
                message: format!("invalid exclude pattern {pattern:?}: {e}"),
            })?;
            builder.add(glob);
        }
        let globs = builder.build().map_err(|e| ScanError::InvalidConfig {
            message: e.to_string(),
        })?;

        Ok(ExcludeMatcher {
            globs,
            skip_hidden: !self.include_hidden,
        })
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Compiled exclusion rules, matched against entry base names.
#[derive(Debug, Clone)]
pub struct ExcludeMatcher {
    globs: GlobSet,
    skip_hidden: bool,
}

impl ExcludeMatcher {
    /// Check if an entry with this name should be left out of the tree.
    pub fn is_excluded(&self, name: &str) -> bool {
        (self.skip_hidden && name.starts_with('.')) || self.globs.is_match(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::builder()
            .root("/home/user")
            .max_depth(Some(2u32))
            .include_hidden(false)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.max_depth, Some(2));
        assert!(!config.include_hidden);
    }

    #[test]
    fn test_config_simple() {
        let config = ScanConfig::new("/home/user");
        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.max_depth, None);
        assert!(config.include_hidden);
    }

    #[test]
    fn test_builder_rejects_empty_root() {
        assert!(ScanConfig::builder().root("").build().is_err());
        assert!(ScanConfig::builder().build().is_err());
    }

    #[test]
    fn test_builder_rejects_bad_glob() {
        let result = ScanConfig::builder()
            .root("/test")
            .exclude_patterns(vec!["[unclosed".to_string()])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_exclude_matcher() {
        let config = ScanConfig::builder()
            .root("/test")
            .exclude_patterns(vec!["node_modules".to_string(), "*.log".to_string()])
            .build()
            .unwrap();
        let matcher = config.exclude_matcher().unwrap();

        assert!(matcher.is_excluded("node_modules"));
        assert!(matcher.is_excluded("test.log"));
        assert!(!matcher.is_excluded("src"));
        assert!(!matcher.is_excluded(".git"));
    }

    #[test]
    fn test_hidden_exclusion() {
        let mut config = ScanConfig::new("/test");
        config.include_hidden = false;
        let matcher = config.exclude_matcher().unwrap();

        assert!(matcher.is_excluded(".git"));
        assert!(!matcher.is_excluded("src"));
    }

    #[test]
    fn test_expands_below() {
        let mut config = ScanConfig::new("/test");
        assert!(config.expands_below(100));

        config.max_depth = Some(0);
        assert!(!config.expands_below(0));

        config.max_depth = Some(2);
        assert!(config.expands_below(1));
        assert!(!config.expands_below(2));
    }
}
