//! Configuration for graph construction.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

pub const DEFAULT_MAIN_TOPIC_THRESHOLD: f32 = 0.5;
pub const DEFAULT_CROSS_LINK_THRESHOLD: f32 = 0.6;
pub const DEFAULT_SUBTOPIC_THRESHOLD: f32 = 0.8;

/// Similarity thresholds and merge policy for the builder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuilderConfig {
    /// Minimum cosine similarity for a new main topic to reuse an existing one.
    ///
    /// Deliberately loose so recurring subjects collapse onto one node.
    /// Default: 0.5.
    pub main_topic_threshold: f32,

    /// Minimum cosine similarity for a similarity edge between two subtopics
    /// created in the same run.
    ///
    /// Default: 0.6.
    pub cross_link_threshold: f32,

    /// Minimum cosine similarity for a subtopic to reuse an existing subtopic
    /// under the same main topic. Only consulted when `dedup_subtopics` is set.
    ///
    /// Default: 0.8.
    pub subtopic_threshold: f32,

    /// Merge subtopics into existing ones under the same main topic.
    ///
    /// Off by default: every run creates fresh subtopic nodes.
    #[serde(default)]
    pub dedup_subtopics: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            main_topic_threshold: DEFAULT_MAIN_TOPIC_THRESHOLD,
            cross_link_threshold: DEFAULT_CROSS_LINK_THRESHOLD,
            subtopic_threshold: DEFAULT_SUBTOPIC_THRESHOLD,
            dedup_subtopics: false,
        }
    }
}

impl BuilderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_main_topic_threshold(mut self, threshold: f32) -> Self {
        self.main_topic_threshold = threshold;
        self
    }

    pub fn with_cross_link_threshold(mut self, threshold: f32) -> Self {
        self.cross_link_threshold = threshold;
        self
    }

    pub fn with_subtopic_threshold(mut self, threshold: f32) -> Self {
        self.subtopic_threshold = threshold;
        self
    }

    pub fn with_subtopic_dedup(mut self, enabled: bool) -> Self {
        self.dedup_subtopics = enabled;
        self
    }

    /// Every threshold must be a cosine value in `[-1, 1]`.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("main_topic_threshold", self.main_topic_threshold),
            ("cross_link_threshold", self.cross_link_threshold),
            ("subtopic_threshold", self.subtopic_threshold),
        ] {
            if !(-1.0..=1.0).contains(&value) {
                return Err(GraphError::Config(format!(
                    "{} must be within [-1, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuilderConfig::default();
        assert_eq!(config.main_topic_threshold, 0.5);
        assert_eq!(config.cross_link_threshold, 0.6);
        assert_eq!(config.subtopic_threshold, 0.8);
        assert!(!config.dedup_subtopics);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = BuilderConfig::new().with_cross_link_threshold(1.5);
        assert!(matches!(config.validate(), Err(GraphError::Config(_))));

        let config = BuilderConfig::new().with_main_topic_threshold(f32::NAN);
        assert!(config.validate().is_err());
    }
}
