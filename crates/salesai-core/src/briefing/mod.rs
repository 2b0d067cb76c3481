//! Briefing assembly: maps a synthesis record onto the briefing data model.

pub mod engine;
pub mod renderer;

pub use engine::BriefingEngine;
pub use renderer::{BriefingRenderer, MarkdownRenderer};

use crate::error::{Result, SalesAiError};
use crate::synthesis::SynthesisRecord;
use crate::types::*;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

pub const INSIGHT_ID: &str = "insight_1";
pub const ACCOUNT_NAME: &str = "Sample Account";

const DEFAULT_INSIGHT: &str = "Account analysis generated via completion service";
const DEFAULT_CONFIDENCE: f64 = 0.75;
const DEFAULT_REASONING: &str = "Analyzed based on available data sources";
const DEFAULT_ACTION: &str = "Engage with tailored messaging";
const DEFAULT_SOURCES: [&str; 2] = ["NewsAPI", "SEC EDGAR"];

const CITATION_SNIPPET: &str = "...";
const CITATION_CONFIDENCE: f64 = 0.9;

/// Role-specific briefing sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleSections {
    pub ice_breakers: Option<Vec<String>>,
    pub value_map: Option<Vec<ValueMapItem>>,
    pub financial_metrics: Option<BTreeMap<String, String>>,
}

pub fn role_sections(role: &Role) -> RoleSections {
    match role {
        Role::Sdr => RoleSections {
            ice_breakers: Some(vec![
                "What's your take on sustainable manufacturing?".to_string(),
                "How are you approaching digital transformation?".to_string(),
            ]),
            ..Default::default()
        },
        Role::Ae => RoleSections {
            value_map: Some(vec![
                value_item(
                    "Real-time pipeline tracking",
                    "Visibility gaps between sales stages",
                    Relevance::High,
                ),
                value_item(
                    "Automated deal scoring",
                    "Manual forecasting is error-prone",
                    Relevance::High,
                ),
                value_item(
                    "Integrated CRM sync",
                    "Duplicate data entry across systems",
                    Relevance::Medium,
                ),
            ]),
            financial_metrics: Some(BTreeMap::from([
                ("roe".to_string(), "12%".to_string()),
                ("fcf_growth".to_string(), "+15%".to_string()),
                ("debt_to_equity".to_string(), "0.45".to_string()),
            ])),
            ..Default::default()
        },
        Role::Other(_) => RoleSections::default(),
    }
}

fn value_item(feature: &str, pain_point: &str, relevance: Relevance) -> ValueMapItem {
    ValueMapItem {
        feature: feature.to_string(),
        pain_point: pain_point.to_string(),
        relevance,
    }
}

/// Map a synthesis record onto an [`Insight`].
///
/// Missing or `null` fields take defaults. A field present with an
/// incompatible type is an error.
pub fn assemble_insight(record: &SynthesisRecord) -> Result<Insight> {
    let text = string_field(record, "insight", DEFAULT_INSIGHT)?;
    let confidence = confidence_field(record)?.clamp(0.0, MAX_INSIGHT_CONFIDENCE);
    let citations = citations_from_sources(&sources_field(record)?);
    let reasoning = string_field(record, "reasoning", DEFAULT_REASONING)?;
    let action = string_field(record, "action", DEFAULT_ACTION)?;

    Ok(Insight {
        id: INSIGHT_ID.to_string(),
        text,
        category: InsightCategory::Opportunity,
        confidence,
        citations,
        reasoning,
        action,
    })
}

pub fn assemble_briefing(
    account_id: &str,
    role: &Role,
    record: &SynthesisRecord,
    generated_at: DateTime<Utc>,
) -> Result<Briefing> {
    let insight = assemble_insight(record)?;
    let sections = role_sections(role);

    Ok(Briefing {
        metadata: BriefingMetadata {
            account_id: account_id.to_string(),
            account_name: ACCOUNT_NAME.to_string(),
            trigger_type: TriggerType::Manual,
            generated_at,
            role: role.clone(),
        },
        insights: vec![insight],
        ice_breakers: sections.ice_breakers,
        value_map: sections.value_map,
        financial_metrics: sections.financial_metrics,
    })
}

/// Up to [`MAX_CITATIONS`] citations. Absolute http(s) URLs pass through;
/// anything else gets a placeholder URL keyed by position.
pub fn citations_from_sources(sources: &[String]) -> Vec<Citation> {
    sources
        .iter()
        .take(MAX_CITATIONS)
        .enumerate()
        .map(|(i, src)| {
            let url = if is_absolute_url(src) {
                src.clone()
            } else {
                format!("https://example.com/source-{}", i)
            };
            Citation::new(
                url,
                format!("Source {}", i + 1),
                CITATION_SNIPPET,
                RetrievalMethod::Vector,
                CITATION_CONFIDENCE,
            )
        })
        .collect()
}

fn is_absolute_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

fn present<'a>(record: &'a SynthesisRecord, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| !v.is_null())
}

fn string_field(record: &SynthesisRecord, key: &str, default: &str) -> Result<String> {
    match present(record, key) {
        None => Ok(default.to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(invalid(key, "string", other)),
    }
}

fn confidence_field(record: &SynthesisRecord) -> Result<f64> {
    match present(record, "confidence") {
        None => Ok(DEFAULT_CONFIDENCE),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| invalid("confidence", "number", &Value::Number(n.clone()))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .ok_or_else(|| invalid("confidence", "number", &Value::String(s.clone()))),
        Some(other) => Err(invalid("confidence", "number", other)),
    }
}

/// Only the entries that become citations are type-checked.
fn sources_field(record: &SynthesisRecord) -> Result<Vec<String>> {
    match present(record, "sources") {
        None => Ok(DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect()),
        Some(Value::Array(items)) => items
            .iter()
            .take(MAX_CITATIONS)
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(invalid("sources", "array of strings", other)),
            })
            .collect(),
        Some(other) => Err(invalid("sources", "array of strings", other)),
    }
}

fn invalid(field: &str, expected: &'static str, found: &Value) -> SalesAiError {
    SalesAiError::InvalidField {
        field: field.to_string(),
        expected,
        found: found.to_string(),
    }
}
