use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{ChatReply, ChatRequest};
use crate::upstream::UpstreamClient;

/// Longest message accepted, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 5000;

/// Prior turns forwarded with each message.
pub const HISTORY_WINDOW: usize = 5;

const CHAT_PATH: &str = "/api/chat";

#[derive(Clone)]
pub struct ChatGateway {
    mcp: UpstreamClient,
}

impl ChatGateway {
    pub fn new(mcp: UpstreamClient) -> Self {
        Self { mcp }
    }

    /// Rejects empty or oversized messages and trims the history to the most
    /// recent turns.
    pub fn prepare(mut request: ChatRequest) -> Result<ChatRequest, AppError> {
        if request.message.trim().is_empty() {
            return Err(AppError::empty_field("message"));
        }
        let length = request.message.chars().count();
        if length > MAX_MESSAGE_LENGTH {
            return Err(AppError::FieldTooLong {
                field_name: "message".to_string(),
                max_length: MAX_MESSAGE_LENGTH,
                actual_length: length,
            });
        }

        let excess = request.conversation_history.len().saturating_sub(HISTORY_WINDOW);
        request.conversation_history.drain(..excess);
        Ok(request)
    }

    #[instrument(skip_all, fields(request_id = tracing::field::Empty))]
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatReply, AppError> {
        let request = Self::prepare(request)?;

        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());
        info!(
            history = request.conversation_history.len(),
            "Forwarding chat message to {}",
            self.mcp.base_url()
        );

        let reply: ChatReply = self.mcp.post_json(CHAT_PATH, &request, &request_id).await?;
        info!(intent = ?reply.intent, dashboard = reply.dashboard_config.is_some(), "Chat reply received");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HistoryEntry, MessageRole};

    fn request(message: &str, history: usize) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            conversation_history: (0..history)
                .map(|i| HistoryEntry {
                    role: if i % 2 == 0 { MessageRole::User } else { MessageRole::Assistant },
                    content: format!("turn {i}"),
                })
                .collect(),
        }
    }

    #[test]
    fn blank_message_is_rejected() {
        let err = ChatGateway::prepare(request("  \n", 0)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn length_is_counted_in_characters() {
        let at_limit = "ă".repeat(MAX_MESSAGE_LENGTH);
        assert!(ChatGateway::prepare(request(&at_limit, 0)).is_ok());

        let over = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        let err = ChatGateway::prepare(request(&over, 0)).unwrap_err();
        assert!(matches!(err, AppError::FieldTooLong { actual_length: 5001, .. }));
    }

    #[test]
    fn history_keeps_the_most_recent_turns() {
        let prepared = ChatGateway::prepare(request("hi", 8)).unwrap();
        let contents: Vec<_> = prepared
            .conversation_history
            .iter()
            .map(|h| h.content.as_str())
            .collect();
        assert_eq!(contents, vec!["turn 3", "turn 4", "turn 5", "turn 6", "turn 7"]);
    }

    #[test]
    fn short_history_is_untouched() {
        let prepared = ChatGateway::prepare(request("hi", 2)).unwrap();
        assert_eq!(prepared.conversation_history.len(), 2);
    }
}
