//! The fixed audit prompt

/// Characters of contract text sent to the model
pub const MAX_PROMPT_CHARS: usize = 7000;

const PROMPT_HEADER: &str = r#"Analyze the following Indian contract text. Return ONLY a valid JSON object:
{
    "risk_score": (integer 1-100),
    "summary": "2-sentence summary of the document",
    "risks": [
        {
            "clause": "Name",
            "level": "High/Medium/Low",
            "impact": "English explanation",
            "hindi": "Simple Hindi explanation",
            "alternative": "Suggested renegotiation wording"
        }
    ]
}
"#;

/// First `MAX_PROMPT_CHARS` characters of `text`, never splitting a character
pub fn truncate_text(text: &str) -> &str {
    match text.char_indices().nth(MAX_PROMPT_CHARS) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Build the single user message sent for an analysis
pub fn build_prompt(text: &str) -> String {
    format!("{}Text: {}\n", PROMPT_HEADER, truncate_text(text))
}
