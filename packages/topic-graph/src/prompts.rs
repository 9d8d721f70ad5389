//! LLM prompts for topic extraction.

/// System message for the extraction call.
pub const EXTRACTION_SYSTEM_PROMPT: &str =
    "You are tasked with analyzing a transcription and organizing it into a structured mind map.";

/// User message for the extraction call.
pub const EXTRACTION_PROMPT: &str = r#"Break the following transcription down into main topics, subtopics, and detailed information points.

Rules:
- Main topics are the broad subjects of the transcription.
- Each subtopic belongs to exactly one main topic.
- Details are short factual points stated for a subtopic.
- Keep every name short (1-5 words). Do not invent content that was not said.
{existing_topics}
Respond with JSON:
{
    "main_topics": [
        {
            "name": "main topic name",
            "subtopics": [
                { "name": "subtopic name", "details": ["detail point"] }
            ]
        }
    ]
}

Transcription:
{transcription}"#;

/// Build the user message, listing the user's current main topics so the
/// model reuses their names where they fit.
pub fn format_extraction_prompt(transcription: &str, existing_main_topics: &[String]) -> String {
    let existing = if existing_main_topics.is_empty() {
        String::new()
    } else {
        let list = existing_main_topics
            .iter()
            .map(|name| format!("- {}", name))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "\nThis user already has these main topics. Reuse a name exactly when the transcription covers the same subject:\n{}\n",
            list
        )
    };

    EXTRACTION_PROMPT
        .replace("{existing_topics}", &existing)
        .replace("{transcription}", transcription)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_transcription() {
        let prompt = format_extraction_prompt("We talked about savings.", &[]);
        assert!(prompt.contains("We talked about savings."));
        assert!(!prompt.contains("{transcription}"));
        assert!(!prompt.contains("already has these main topics"));
    }

    #[test]
    fn test_prompt_lists_existing_topics() {
        let existing = vec!["Budgeting".to_string(), "Health".to_string()];
        let prompt = format_extraction_prompt("text", &existing);

        assert!(prompt.contains("already has these main topics"));
        assert!(prompt.contains("- Budgeting\n- Health"));
        assert!(!prompt.contains("{existing_topics}"));
    }
}
