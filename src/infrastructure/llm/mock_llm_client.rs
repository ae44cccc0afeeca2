use crate::application::ports::{ChatMessage, LlmClient, LlmClientError};

/// Returns a scripted response, letting tests drive extraction without a
/// live model.
pub struct MockLlmClient {
    response: String,
}

impl MockLlmClient {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn invoke(
        &self,
        _messages: &[ChatMessage],
        _temperature: f32,
        _max_tokens: u32,
    ) -> Result<String, LlmClientError> {
        Ok(self.response.clone())
    }
}
