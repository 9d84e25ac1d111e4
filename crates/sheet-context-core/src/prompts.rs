//! Prompt templates that wrap the dataset context around a user question
//!
//! The context string comes from [`crate::context::format_for_model`]. Nothing
//! here talks to a model; callers send the finished prompt themselves.

/// Instructions for the chat-style data analyst
pub const ANALYST_INSTRUCTIONS: &str = r"IMPORTANT INSTRUCTIONS:
- You have full access to ALL sheets and ALL data in this Excel file
- Analyze the ENTIRE dataset to answer the user's question
- Provide specific insights, numbers, trends, and patterns
- Be comprehensive and detailed in your analysis
- Use the actual data values and structure shown above
- If the user asks about trends, patterns, or insights, examine all relevant data points
- Present findings in a clear, structured format with bullet points and sections
- Include relevant statistics, comparisons, and recommendations when applicable";

/// Word budget for spoken answers
pub const VOICE_WORD_LIMIT: usize = 150;

/// Prompt flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptTemplate {
    /// Long-form written analysis
    #[default]
    Analyst,
    /// Short answer meant to be read aloud
    Voice,
}

impl PromptTemplate {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Analyst => "analyst",
            Self::Voice => "voice",
        }
    }
}

/// Build the full prompt for `question` around `context`.
#[must_use]
pub fn build_prompt(template: PromptTemplate, context: &str, question: &str) -> String {
    match template {
        PromptTemplate::Analyst => format!(
            "You are an expert data analyst with access to a comprehensive Excel dataset. \
Here's the complete data structure and content:\n\n\
{context}\n\n\
{ANALYST_INSTRUCTIONS}\n\n\
User Question: {question}\n\n\
Please provide a thorough analysis based on the complete dataset above."
        ),
        PromptTemplate::Voice => format!(
            "You are a background check data analyst assistant. \
Analyze this Excel dataset and answer the user's voice query:\n\n\
{context}\n\n\
User Query: {question}\n\n\
Provide a clear, spoken-friendly response with specific insights. \
Keep it under {VOICE_WORD_LIMIT} words for voice delivery."
        ),
    }
}
