use serde_json::{Map, Value};

/// Longest raw-text excerpt used as an insight when the reply can't be parsed.
pub const UNPARSED_INSIGHT_CHARS: usize = 200;
/// Longest question excerpt echoed back when the service is unreachable.
pub const UNAVAILABLE_QUESTION_CHARS: usize = 50;

pub const UNPARSED_CONFIDENCE: f64 = 0.6;
pub const UNAVAILABLE_CONFIDENCE: f64 = 0.5;

pub const UNPARSED_REASONING: &str = "Parsed from completion response";
pub const UNAVAILABLE_REASONING: &str = "Default response (completion service unavailable)";
pub const GENERIC_ACTION: &str = "Review insight and action accordingly";

/// Where a [`SynthesisRecord`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisOrigin {
    /// The model replied with a JSON object
    Model,
    /// The model replied, but nothing in the reply parsed
    Unparsed,
    /// The completion call itself failed
    Unavailable,
}

/// Loosely-typed synthesis output: `insight`, `confidence`, `reasoning`,
/// `sources`, `action`.
///
/// Fields are kept as raw JSON because model output is not trusted to match
/// the expected shape; typing happens at assembly. Key lookup ignores case.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRecord {
    fields: Map<String, Value>,
    origin: SynthesisOrigin,
}

impl SynthesisRecord {
    pub fn from_model(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            origin: SynthesisOrigin::Model,
        }
    }

    /// Fallback for a reply that contained no parseable JSON object.
    pub fn unparsed(raw: &str) -> Self {
        Self::default_record(
            truncate_chars(raw, UNPARSED_INSIGHT_CHARS),
            UNPARSED_CONFIDENCE,
            UNPARSED_REASONING,
            SynthesisOrigin::Unparsed,
        )
    }

    /// Fallback for a failed completion call.
    pub fn unavailable(question: &str) -> Self {
        Self::default_record(
            format!(
                "Analysis for: {}",
                truncate_chars(question, UNAVAILABLE_QUESTION_CHARS)
            ),
            UNAVAILABLE_CONFIDENCE,
            UNAVAILABLE_REASONING,
            SynthesisOrigin::Unavailable,
        )
    }

    fn default_record(
        insight: String,
        confidence: f64,
        reasoning: &str,
        origin: SynthesisOrigin,
    ) -> Self {
        let mut fields = Map::new();
        fields.insert("insight".into(), Value::String(insight));
        fields.insert("confidence".into(), Value::from(confidence));
        fields.insert("reasoning".into(), Value::String(reasoning.to_string()));
        fields.insert("sources".into(), Value::Array(Vec::new()));
        fields.insert("action".into(), Value::String(GENERIC_ACTION.to_string()));
        Self { fields, origin }
    }

    /// Look up a field. An exact key match wins; otherwise the first key
    /// equal ignoring ASCII case.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).or_else(|| {
            self.fields
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })
    }

    pub fn origin(&self) -> SynthesisOrigin {
        self.origin
    }

    pub fn is_fallback(&self) -> bool {
        self.origin != SynthesisOrigin::Model
    }

    /// Reported confidence, if numeric. For logging only.
    pub fn confidence_hint(&self) -> Option<f64> {
        self.get("confidence").and_then(Value::as_f64)
    }
}

/// Truncate `s` to at most `max_chars` Unicode scalar values.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_end, _)) => s[..byte_end].to_string(),
        None => s.to_string(),
    }
}
