use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Highest confidence a synthesised insight may carry.
pub const MAX_INSIGHT_CONFIDENCE: f64 = 0.95;

/// Maximum number of citations attached to a single insight.
pub const MAX_CITATIONS: usize = 3;

/// Requester role. Drives which role-specific sections a briefing carries.
///
/// Parsed by exact match; anything other than `sdr` or `ae` is kept verbatim
/// as [`Role::Other`] so it round-trips unchanged into the response metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Sales development rep (outbound prospecting)
    Sdr,
    /// Account executive
    #[default]
    Ae,
    Other(String),
}

impl Role {
    pub fn parse(s: &str) -> Self {
        Role::from(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Sdr => "sdr",
            Role::Ae => "ae",
            Role::Other(s) => s,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "sdr" => Role::Sdr,
            "ae" => Role::Ae,
            _ => Role::Other(s),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which retrieval path produced a citation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMethod {
    Vector,
    Graph,
    Sql,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Threat,
    Opportunity,
    Competitive,
    Financial,
}

/// What caused a briefing to be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    Calendar,
    IntentSpike,
    Manual,
}

/// A reference to a source backing an insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub source_url: String,
    pub title: String,
    pub text_snippet: String,
    pub retrieval_method: RetrievalMethod,
    /// Always within [0, 1]
    pub confidence: f64,
}

impl Citation {
    pub fn new(
        source_url: impl Into<String>,
        title: impl Into<String>,
        text_snippet: impl Into<String>,
        retrieval_method: RetrievalMethod,
        confidence: f64,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            title: title.into(),
            text_snippet: text_snippet.into(),
            retrieval_method,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// One synthesised finding with supporting citations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub text: String,
    pub category: InsightCategory,
    /// Within [0, MAX_INSIGHT_CONFIDENCE]
    pub confidence: f64,
    pub citations: Vec<Citation>,
    pub reasoning: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BriefingMetadata {
    pub account_id: String,
    pub account_name: String,
    pub trigger_type: TriggerType,
    pub generated_at: DateTime<Utc>,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    High,
    Medium,
    Low,
}

/// Product capability mapped to a prospect pain point (AE section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueMapItem {
    pub feature: String,
    pub pain_point: String,
    pub relevance: Relevance,
}

/// Top-level response summarising account intelligence for a sales role.
///
/// At most one role-specific section set is populated, chosen by
/// `metadata.role` (none for unrecognised roles); absent sections serialize
/// as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Briefing {
    pub metadata: BriefingMetadata,
    pub insights: Vec<Insight>,
    /// SDR only
    pub ice_breakers: Option<Vec<String>>,
    /// AE only
    pub value_map: Option<Vec<ValueMapItem>>,
    /// AE only
    pub financial_metrics: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillDownRequest {
    pub insight_id: String,
    #[serde(default)]
    pub account_id: Option<String>,
}

/// An insight expanded with its reasoning trace and graph context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillDownResponse {
    pub insight: Insight,
    pub full_context: String,
    pub reasoning_trace: Vec<String>,
    pub related_graph_paths: Vec<GraphEdge>,
}

/// A directed, labelled relationship in the account graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub relation: String,
}

impl GraphEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, relation: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            relation: relation.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphResponse {
    pub account_id: String,
    pub graph: Vec<GraphEdge>,
}
