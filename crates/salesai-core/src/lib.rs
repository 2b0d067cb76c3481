//! Account briefing synthesis.
//!
//! A briefing request flows through three stages: [`context::build_dossier`]
//! formats the account dossier, [`synthesis::Synthesizer`] asks the remote
//! completion service for an insight and coerces whatever comes back into a
//! [`synthesis::SynthesisRecord`], and [`briefing::assemble_briefing`] maps
//! that record onto the [`types::Briefing`] data model.
pub mod types;
pub mod error;
pub mod context;
pub mod llm;
pub mod synthesis;
pub mod briefing;
pub mod retriever;

pub use error::{CompletionError, Result, SalesAiError};
pub use types::*;
pub use context::{build_dossier, with_evidence};
pub use llm::{
    ChatCompletionsClient, ChatCompletionsConfig, ChatMessage, CompletionRequest,
    CompletionService, MessageRole,
};
pub use synthesis::{parse_model_output, SynthesisConfig, SynthesisRecord, Synthesizer};
pub use briefing::{
    assemble_briefing, assemble_insight, role_sections, BriefingEngine, BriefingRenderer,
    MarkdownRenderer, RoleSections,
};
pub use retriever::{
    DocumentRecord, RetrievedContext, Retriever, RetrieverStatus, StaticRetriever, VectorHit,
};
