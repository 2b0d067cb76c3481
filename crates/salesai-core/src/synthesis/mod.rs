//! Completion-service synthesis with a fallback ladder.
//!
//! [`Synthesizer::synthesize`] never fails: a transport error becomes
//! [`SynthesisRecord::unavailable`], unusable text becomes
//! [`SynthesisRecord::unparsed`].

pub mod parse;
pub mod prompt;
pub mod record;

pub use parse::parse_model_output;
pub use prompt::build_prompt;
pub use record::{truncate_chars, SynthesisOrigin, SynthesisRecord};

use crate::llm::{ChatMessage, CompletionRequest, CompletionService};
use std::sync::Arc;

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

impl SynthesisConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

pub struct Synthesizer {
    service: Arc<dyn CompletionService>,
    config: SynthesisConfig,
}

impl Synthesizer {
    pub fn new(service: Arc<dyn CompletionService>, config: SynthesisConfig) -> Self {
        Self { service, config }
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    pub fn request_for(&self, context: &str, question: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::user(build_prompt(context, question))],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    pub async fn synthesize(&self, context: &str, question: &str) -> SynthesisRecord {
        let request = self.request_for(context, question);

        let raw = match self.service.complete(request).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("{} completion failed: {}", self.service.name(), e);
                return SynthesisRecord::unavailable(question);
            }
        };

        let record = match parse_model_output(&raw) {
            Some(record) => record,
            None => {
                log::warn!(
                    "{} reply was not JSON ({} chars); using raw text",
                    self.service.name(),
                    raw.chars().count()
                );
                SynthesisRecord::unparsed(&raw)
            }
        };

        log::info!(
            "Synthesis complete: confidence={:?} origin={:?}",
            record.confidence_hint(),
            record.origin()
        );
        record
    }
}
