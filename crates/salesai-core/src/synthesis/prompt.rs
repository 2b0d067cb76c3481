/// Directive prompt asking the model for a single bare JSON object.
pub fn build_prompt(context: &str, question: &str) -> String {
    let question = if question.trim().is_empty() {
        "General account analysis"
    } else {
        question
    };

    format!(
        r#"You are a sales intelligence analyst.
Based on the following context, provide a concise, actionable insight.

Context:
{context}

Question:
{question}

Respond with ONLY valid JSON (no markdown, no code blocks) with these fields:
{{
  "insight": "actionable finding",
  "confidence": 0.85,
  "reasoning": "explanation",
  "sources": ["url1", "url2"],
  "action": "specific next step for sales team"
}}

Be factual. Confidence should be 0.5-0.95."#
    )
}
