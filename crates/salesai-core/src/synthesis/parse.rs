use super::record::SynthesisRecord;
use serde_json::{Map, Value};

/// Coerce raw model text into a record.
///
/// Tries the whole text as a JSON object first. Failing that, takes the
/// span from the first `{` to the last `}` (greedy, so surrounding prose and
/// markdown fences are dropped and nested objects stay intact) and tries
/// that. Returns `None` if neither yields a JSON object.
pub fn parse_model_output(raw: &str) -> Option<SynthesisRecord> {
    if let Some(map) = parse_object(raw.trim()) {
        return Some(SynthesisRecord::from_model(map));
    }

    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    parse_object(&raw[start..=end]).map(SynthesisRecord::from_model)
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
