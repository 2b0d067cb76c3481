//! Optional enrichment sources for briefings.
//!
//! A [`Retriever`] combines vector search, graph traversal and relational
//! lookups over account data. No store-backed implementation ships yet;
//! [`StaticRetriever`] stands in and returns the same mock payloads the
//! endpoints have always served, so callers never branch on whether a real
//! store is configured.

use crate::error::Result;
use crate::types::GraphEdge;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const HYBRID_VECTOR_TOP_K: usize = 5;
const HYBRID_SQL_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrieverStatus {
    Connected,
    Stub,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorHit {
    pub id: String,
    pub title: String,
    pub snippet: String,
    pub url: String,
    pub score: f32,
}

/// Document metadata row from the relational store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub title: String,
    pub source: String,
    pub url: String,
}

/// Output of [`Retriever::hybrid_search`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievedContext {
    pub vector_results: Vec<VectorHit>,
    pub sql_metadata: Vec<DocumentRecord>,
}

impl RetrievedContext {
    pub fn is_empty(&self) -> bool {
        self.vector_results.is_empty() && self.sql_metadata.is_empty()
    }
}

#[async_trait]
pub trait Retriever: Send + Sync {
    /// Semantic search over ingested documents for `query`.
    async fn vector_search(&self, query: &str, top_k: usize) -> Result<Vec<VectorHit>>;

    /// Relationships reachable from the account within `depth` hops.
    async fn graph_search(&self, account_id: &str, depth: usize) -> Result<Vec<GraphEdge>>;

    /// Most recent document metadata for the account.
    async fn relational_search(&self, account_id: &str, limit: usize)
        -> Result<Vec<DocumentRecord>>;

    fn status(&self) -> RetrieverStatus;

    /// Vector + relational lookup. Graph context is left out of the briefing
    /// path; it is served separately through [`Retriever::graph_search`].
    async fn hybrid_search(&self, account_id: &str, query: &str) -> Result<RetrievedContext> {
        let vector_results = self.vector_search(query, HYBRID_VECTOR_TOP_K).await?;
        let sql_metadata = self.relational_search(account_id, HYBRID_SQL_LIMIT).await?;
        Ok(RetrievedContext {
            vector_results,
            sql_metadata,
        })
    }
}

/// Retriever with no backing stores.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRetriever;

#[async_trait]
impl Retriever for StaticRetriever {
    async fn vector_search(&self, _query: &str, _top_k: usize) -> Result<Vec<VectorHit>> {
        Ok(Vec::new())
    }

    async fn graph_search(&self, account_id: &str, _depth: usize) -> Result<Vec<GraphEdge>> {
        log::info!("Graph search requested for {} (static retriever)", account_id);
        Ok(vec![
            GraphEdge::new(account_id, "Key Stakeholder", "decision_maker"),
            GraphEdge::new(account_id, "CompetitorX", "competes_with"),
        ])
    }

    async fn relational_search(
        &self,
        _account_id: &str,
        _limit: usize,
    ) -> Result<Vec<DocumentRecord>> {
        Ok(Vec::new())
    }

    fn status(&self) -> RetrieverStatus {
        RetrieverStatus::Stub
    }
}
