use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One prior turn of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: MessageRole,
    pub content: String,
}

/// Body of `POST /api/chat`, as received from the browser and as forwarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<HistoryEntry>,
}

/// Reply from the chat service. The dashboard configuration is passed through
/// untouched; the browser interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_config: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub time: DateTime<Utc>,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "ok", time: Utc::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn history_is_optional() {
        let request: ChatRequest = serde_json::from_value(json!({ "message": "hi" })).unwrap();
        assert!(request.conversation_history.is_empty());
    }

    #[test]
    fn unknown_roles_are_rejected() {
        let result = serde_json::from_value::<ChatRequest>(json!({
            "message": "hi",
            "conversation_history": [{ "role": "system", "content": "x" }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn reply_keeps_dashboard_config_verbatim() {
        let raw = json!({
            "response": "Here you go",
            "intent": "create_dashboard",
            "dashboard_config": { "title": "Sales", "charts": [{ "type": "scatter" }] }
        });
        let reply: ChatReply = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&reply).unwrap(), raw);
    }
}
