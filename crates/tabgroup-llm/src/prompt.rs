//! Prompt templates for theme naming and entity extraction.

use tabgroup_core::capability::Entity;

/// A prompt template for LLM requests.
pub trait PromptTemplate {
    /// Generate the prompt text.
    fn generate(&self) -> String;

    /// Get the system prompt (if any).
    fn system_prompt(&self) -> Option<String> {
        None
    }
}

/// Prompt asking for a short theme that describes a set of titles.
#[derive(Debug, Clone)]
pub struct ThemePrompt {
    /// Titles of the cluster members.
    pub titles: Vec<String>,
    /// Maximum number of words in the theme.
    pub max_words: usize,
}

impl ThemePrompt {
    /// Create a new theme prompt.
    pub fn new(titles: Vec<String>) -> Self {
        Self {
            titles,
            max_words: 3,
        }
    }

    /// Set the maximum theme length in words.
    pub fn with_max_words(mut self, max: usize) -> Self {
        self.max_words = max;
        self
    }
}

impl PromptTemplate for ThemePrompt {
    fn system_prompt(&self) -> Option<String> {
        Some(
            "You name groups of related browser tabs and documents. \
             Respond ONLY with the group name, no explanation."
                .to_string(),
        )
    }

    fn generate(&self) -> String {
        let list = self
            .titles
            .iter()
            .map(|t| format!("- {t}"))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"Give a theme of at most {} words that describes these titles:

{}

Theme:"#,
            self.max_words, list
        )
    }
}

/// Prompt for named-entity extraction.
#[derive(Debug, Clone)]
pub struct EntityPrompt {
    /// The text to extract entities from.
    pub text: String,
    /// Maximum number of entities to extract.
    pub max_entities: usize,
}

impl EntityPrompt {
    /// Create a new entity extraction prompt.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            max_entities: 10,
        }
    }

    /// Set max entities.
    pub fn with_max_entities(mut self, max: usize) -> Self {
        self.max_entities = max;
        self
    }
}

impl PromptTemplate for EntityPrompt {
    fn system_prompt(&self) -> Option<String> {
        Some(
            "You are an expert at named-entity recognition. \
             Extract people, organizations, products and places from the given text. \
             Respond ONLY with a JSON array, no explanation."
                .to_string(),
        )
    }

    fn generate(&self) -> String {
        format!(
            r#"Extract up to {} named entities from this text:

---
{}
---

Respond with a JSON array like:
[{{"name": "<entity>", "confidence": <0.0-1.0>}}]

JSON:"#,
            self.max_entities, self.text
        )
    }
}

/// Parse entities from a JSON response. Missing confidence means 1.0.
pub fn parse_entities_json(json: &str) -> Result<Vec<Entity>, serde_json::Error> {
    let json_str = extract_json_array(json);

    #[derive(serde::Deserialize)]
    struct RawEntity {
        name: String,
        #[serde(default = "default_confidence")]
        confidence: f32,
    }

    fn default_confidence() -> f32 {
        1.0
    }

    let raw: Vec<RawEntity> = serde_json::from_str(json_str)?;

    Ok(raw
        .into_iter()
        .filter(|r| !r.name.trim().is_empty())
        .map(|r| Entity::new(r.name.trim(), r.confidence))
        .collect())
}

/// Reduce a completion to a bare label: first non-empty line, surrounding
/// quotes and a trailing period removed.
pub fn clean_theme(response: &str) -> String {
    let line = response
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");
    let line = line.strip_prefix("Theme:").unwrap_or(line).trim();
    line.trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '*'))
        .trim_end_matches('.')
        .trim()
        .to_string()
}

/// Extract JSON array from text (handles markdown code blocks).
pub(crate) fn extract_json_array(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    let text = text.trim();

    if let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) {
        &text[start..=end]
    } else {
        text
    }
}
