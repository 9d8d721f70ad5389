//! The structured topic document returned by topic extraction.
//!
//! Shape: main topics → subtopics → detail strings.
//!
//! ```json
//! {
//!   "main_topics": [
//!     { "name": "Budgeting",
//!       "subtopics": [ { "name": "Savings", "details": ["Emergency fund"] } ] }
//!   ]
//! }
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// `main_topics` is required and unknown keys are rejected, so a response in
/// some other shape fails instead of reading as an empty document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TopicDocument {
    /// Primary subjects of the transcription, in the order they were discussed
    pub main_topics: Vec<MainTopic>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MainTopic {
    /// Short topic label. Reuse an existing topic name when one fits
    pub name: String,
    #[serde(default)]
    pub subtopics: Vec<SubtopicEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SubtopicEntry {
    /// Specific aspect of the main topic
    pub name: String,
    /// Concrete detail points mentioned for this subtopic
    #[serde(default)]
    pub details: Vec<String>,
}

impl TopicDocument {
    pub fn new(main_topics: Vec<MainTopic>) -> Self {
        Self { main_topics }
    }

    pub fn subtopic_count(&self) -> usize {
        self.main_topics.iter().map(|m| m.subtopics.len()).sum()
    }

    /// Trims labels, drops blank details and rejects blank topic names.
    pub fn validated(self) -> Result<Self> {
        let mut main_topics = Vec::with_capacity(self.main_topics.len());

        for (i, main) in self.main_topics.into_iter().enumerate() {
            let name = main.name.trim().to_string();
            if name.is_empty() {
                return Err(GraphError::extraction(format!(
                    "main topic #{} has an empty name",
                    i + 1
                )));
            }

            let mut subtopics = Vec::with_capacity(main.subtopics.len());
            for (j, sub) in main.subtopics.into_iter().enumerate() {
                let sub_name = sub.name.trim().to_string();
                if sub_name.is_empty() {
                    return Err(GraphError::extraction(format!(
                        "subtopic #{} of '{}' has an empty name",
                        j + 1,
                        name
                    )));
                }
                let details = sub
                    .details
                    .into_iter()
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty())
                    .collect();
                subtopics.push(SubtopicEntry {
                    name: sub_name,
                    details,
                });
            }

            main_topics.push(MainTopic { name, subtopics });
        }

        Ok(Self { main_topics })
    }
}

impl MainTopic {
    pub fn new(name: impl Into<String>, subtopics: Vec<SubtopicEntry>) -> Self {
        Self {
            name: name.into(),
            subtopics,
        }
    }
}

impl SubtopicEntry {
    pub fn new(name: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            name: name.into(),
            details,
        }
    }
}

/// Parse a raw model response into a validated document.
///
/// Accepts bare JSON or JSON wrapped in a markdown code fence. Anything that
/// does not parse as the expected structure is an extraction failure.
pub fn parse_topic_document(raw: &str) -> Result<TopicDocument> {
    let json = strip_code_fence(raw);
    if json.is_empty() {
        return Err(GraphError::extraction("empty extraction response"));
    }

    let document: TopicDocument = serde_json::from_str(json)
        .map_err(|e| GraphError::extraction(format!("malformed topic document: {}", e)))?;

    document.validated()
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.trim_end()
                .strip_suffix("```")
                .unwrap_or(rest)
                .trim()
        }
        None => trimmed,
    }
}
