use clap::Args;
use salesai_core::llm::chat::GROQ_CHAT_COMPLETIONS_URL;
use salesai_core::synthesis::DEFAULT_MODEL;
use salesai_core::{
    BriefingEngine, ChatCompletionsClient, ChatCompletionsConfig, StaticRetriever,
    SynthesisConfig,
};
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Completion-service credential. Never printed.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Remote completion service settings. The API key has no default: startup
/// fails if it is not supplied.
#[derive(Args, Debug, Clone)]
pub struct CompletionSettings {
    /// Chat-completions endpoint URL
    #[arg(long, env = "GROQ_API_URL", default_value = GROQ_CHAT_COMPLETIONS_URL)]
    pub api_url: String,

    /// API key for the completion service
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: ApiKey,

    /// Model identifier
    #[arg(long, env = "GROQ_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Request timeout in seconds (unset: transport defaults)
    #[arg(long, env = "GROQ_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl CompletionSettings {
    pub fn chat_config(&self) -> ChatCompletionsConfig {
        ChatCompletionsConfig::groq(self.api_key.expose())
            .with_api_url(self.api_url.clone())
            .with_timeout(self.timeout_secs.map(Duration::from_secs))
    }

    pub fn synthesis_config(&self) -> SynthesisConfig {
        SynthesisConfig::default().with_model(self.model.clone())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.expose().trim().is_empty() {
            anyhow::bail!("GROQ_API_KEY is set but empty");
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            anyhow::bail!("GROQ_API_URL must be an http(s) URL, got '{}'", self.api_url);
        }
        if self.timeout_secs == Some(0) {
            anyhow::bail!("GROQ_TIMEOUT_SECS must be greater than zero");
        }
        Ok(())
    }

    /// Briefing engine backed by the configured completion service and the
    /// static retriever.
    pub fn build_engine(&self) -> anyhow::Result<BriefingEngine> {
        self.validate()?;
        let client = ChatCompletionsClient::new(self.chat_config())?;
        Ok(BriefingEngine::new(
            Arc::new(client),
            Arc::new(StaticRetriever),
            self.synthesis_config(),
        ))
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    /// HTTP listen address
    #[arg(long, env = "SALESAI_HTTP_ADDR", default_value = "0.0.0.0:4011")]
    pub http_addr: SocketAddr,

    #[command(flatten)]
    pub completion: CompletionSettings,
}
