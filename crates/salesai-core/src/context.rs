use crate::retriever::RetrievedContext;
use crate::types::Role;

const DEFAULT_FOCUS: &str = "Comprehensive Account Strategy";

/// Format the account dossier fed to the completion service.
///
/// Pure templating: the account id, role and (optional) query are substituted
/// into a fixed multi-section layout. A blank query falls back to a generic
/// primary focus.
pub fn build_dossier(account_id: &str, role: &Role, query: &str) -> String {
    let focus = if query.trim().is_empty() {
        DEFAULT_FOCUS
    } else {
        query.trim()
    };
    let role_label = role.as_str().to_uppercase();

    format!(
        "EXECUTIVE DOSSIER: {account_id}\n\
         Primary Focus: {focus}\n\
         \n\
         CRITICAL BUSINESS SIGNALS:\n\
         - Recent News: Recent news regarding {account_id}.\n\
         - Financial Performance: Latest quarterly filings for {account_id}.\n\
         - SEC Insights: 2026 priorities from recent 10-K.\n\
         SOCIAL & MARKET SENTIMENT:\n\
         - LinkedIn Trends: Notable social news or developments regarding {account_id}.\n\
         - Industry Positioning: Shifts in business model for {account_id}.\n\
         COMPANY RIVAL:\n\
         - Key Competitors: Main competitors for {account_id} in the market.\n\
         HISTORICAL CRM CONTEXT:\n\
         - Previous Engagement: What we know from prior sales cycles with {account_id}.\n\
         - Current Status: Their current vendor landscape.\n\
         OBJECTIVE: Identify high-impact entry points for {role_label} to start a conversation with {account_id}.\n"
    )
}

/// Append retrieved evidence to a dossier. Returns the dossier untouched when
/// nothing was retrieved.
pub fn with_evidence(dossier: String, retrieved: &RetrievedContext) -> String {
    if retrieved.is_empty() {
        return dossier;
    }

    let mut out = dossier;
    out.push_str("RETRIEVED EVIDENCE:\n");
    for hit in &retrieved.vector_results {
        out.push_str(&format!(
            "- [vector {:.2}] {}: {}\n",
            hit.score, hit.title, hit.snippet
        ));
    }
    for doc in &retrieved.sql_metadata {
        out.push_str(&format!("- [{}] {} ({})\n", doc.source, doc.title, doc.url));
    }
    out
}
