use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

use topic_graph::BuilderConfig;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Absent means nodes and edges live in memory for the life of the process.
    pub database_url: Option<String>,
    pub port: u16,
    pub openai_api_key: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub builder: BuilderConfig,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = BuilderConfig::default();
        let builder = BuilderConfig {
            main_topic_threshold: parse_or("MAIN_TOPIC_THRESHOLD", defaults.main_topic_threshold)?,
            cross_link_threshold: parse_or("CROSS_LINK_THRESHOLD", defaults.cross_link_threshold)?,
            subtopic_threshold: parse_or("SUBTOPIC_THRESHOLD", defaults.subtopic_threshold)?,
            dedup_subtopics: parse_or("DEDUP_SUBTOPICS", defaults.dedup_subtopics)?,
        };
        builder
            .validate()
            .context("Invalid similarity thresholds")?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            port: parse_or("PORT", 8080)?,
            openai_api_key: env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?,
            chat_model: env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            embedding_model: env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "text-embedding-3-small".to_string()),
            builder,
            allowed_origins: parse_origins(env::var("ALLOWED_ORIGINS").ok().as_deref()),
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

/// Comma-separated origin list. Empty entries are dropped.
pub fn parse_origins(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(Some("http://localhost:3000, https://app.example.com,,")),
            vec!["http://localhost:3000", "https://app.example.com"]
        );
        assert!(parse_origins(None).is_empty());
    }
}
