//! Judge transport trait and the genai-backed production implementation.
//!
//! A transport issues exactly one completion call. All resilience concerns
//! (abort timeout, verdict cache, circuit breaker) live in
//! [`super::JudgeClient`], so implementations stay thin.

use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};

use super::error::JudgeError;

/// One opaque completion call against a judge provider.
#[async_trait]
pub trait JudgeTransport: Send + Sync {
    /// Issues a single completion and returns the raw reply text.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, JudgeError>;

    /// Short provider label recorded in `similarity_source` values.
    fn label(&self) -> &str;
}

/// Production transport backed by the `genai` multi-provider client.
///
/// The default model targets Groq; `genai` resolves the provider and its
/// credentials (`GROQ_API_KEY`) from the model name and environment.
pub struct GenaiTransport {
    client: Client,
    model: String,
    label: String,
}

impl GenaiTransport {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::default(),
            model: model.into(),
            label: "groq".to_string(),
        }
    }

    /// Overrides the provider label, e.g. when pointing the same transport
    /// at a different backend.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[inline]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl JudgeTransport for GenaiTransport {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, JudgeError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_prompt),
        ]);

        let response = self
            .client
            .exec_chat(&self.model, request, None)
            .await
            .map_err(|e| JudgeError::Transport(e.to_string()))?;

        Ok(response.first_text().unwrap_or_default().to_string())
    }

    fn label(&self) -> &str {
        &self.label
    }
}
