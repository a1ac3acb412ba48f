//! LLM prompt engineering for claim extraction

/// Category examples offered to the model when none are configured
const DEFAULT_CATEGORY_HINTS: [&str; 4] = ["Cryptocurrency", "AI", "Economy", "Technology"];

/// Builds prompts for the LLM to extract claims
pub struct PromptBuilder {
    text: String,
    category_hints: Vec<String>,
}

impl PromptBuilder {
    /// Create a new prompt builder for a document
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category_hints: DEFAULT_CATEGORY_HINTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the example categories offered to the model
    pub fn with_category_hints(mut self, hints: Vec<String>) -> Self {
        if !hints.is_empty() {
            self.category_hints = hints;
        }
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Instructions
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. What to produce per claim
        prompt.push_str("For each claim, provide:\n");
        prompt.push_str("1. The claim itself (be specific and concise)\n");
        let hints: Vec<String> = self
            .category_hints
            .iter()
            .map(|h| format!("\"{}\"", h))
            .collect();
        prompt.push_str(&format!("2. The category (e.g., {}, etc.)\n", hints.join(", ")));
        prompt.push_str("3. A search query to verify this claim\n\n");

        // 3. Output format
        prompt.push_str(OUTPUT_FORMAT_REMINDER);
        prompt.push_str("\n\n");

        // 4. The document
        prompt.push_str("Document:\n");
        prompt.push_str("---\n");
        prompt.push_str(&self.text);
        prompt.push_str("\n---\n\n");
        prompt.push_str("JSON Response:");

        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str =
    "Analyze the following document and extract all specific factual claims that can be verified.";

const OUTPUT_FORMAT_REMINDER: &str = r#"Return ONLY a valid JSON array of objects with keys: "claim", "category", "search_query"
[
  {
    "claim": "statement exactly as asserted",
    "category": "topic label",
    "search_query": "web search query that would confirm or refute the claim"
  }
]"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_text() {
        let prompt = PromptBuilder::new("Alice founded Acme Corp in 1999").build();
        assert!(prompt.contains("Alice founded Acme Corp in 1999"));
        assert!(prompt.ends_with("JSON Response:"));
    }

    #[test]
    fn test_prompt_includes_instructions() {
        let prompt = PromptBuilder::new("Test text").build();
        assert!(prompt.contains("extract all specific factual claims"));
        assert!(prompt.contains("\"claim\", \"category\", \"search_query\""));
    }

    #[test]
    fn test_default_category_hints() {
        let prompt = PromptBuilder::new("Test").build();
        assert!(prompt.contains("\"Cryptocurrency\", \"AI\", \"Economy\", \"Technology\""));
    }

    #[test]
    fn test_custom_category_hints() {
        let prompt = PromptBuilder::new("Test")
            .with_category_hints(vec!["Medicine".to_string(), "Law".to_string()])
            .build();
        assert!(prompt.contains("\"Medicine\", \"Law\""));
        assert!(!prompt.contains("Cryptocurrency"));
    }

    #[test]
    fn test_empty_hints_keep_defaults() {
        let prompt = PromptBuilder::new("Test").with_category_hints(Vec::new()).build();
        assert!(prompt.contains("Cryptocurrency"));
    }
}
