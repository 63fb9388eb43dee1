use chrono::{DateTime, Utc};

use crate::api::ApiError;
use crate::dashboard::DashboardSpec;
use crate::models::{ChatReply, ChatRequest, HistoryEntry};

/// Number of prior turns sent as conversational context.
pub const HISTORY_WINDOW: usize = 5;

pub const ERROR_REPLY: &str = "Sorry, something went wrong. Please try again later.";

pub const GREETING: &str = "Hello! I am the ERP-MCP assistant. I can help you:\n\n\
    • query revenue and financial reports\n\
    • forecast revenue with AI\n\
    • build custom dashboards\n\
    • analyse ERP data\n\
    • search the document store\n\n\
    Ask me anything!";

/// Example prompts offered under the input box.
pub const SUGGESTIONS: [&str; 3] = ["September revenue?", "Q4 forecast", "Create a dashboard"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatTurn {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub intent: Option<String>,
    pub dashboard: Option<DashboardSpec>,
}

/// Badge shown under an assistant reply for a known intent.
pub fn intent_label(intent: &str) -> Option<&'static str> {
    match intent {
        "revenue_query" => Some("Revenue query"),
        "forecast" => Some("AI forecast"),
        "document_qa" => Some("Document search"),
        "create_dashboard" => Some("Dashboard"),
        "analytics" => Some("Data analysis"),
        _ => None,
    }
}

/// Append-only transcript plus the single in-flight flag.
///
/// A request is produced by [`ChatSession::submit`] and settled by
/// [`ChatSession::complete`]; the network call in between belongs to the
/// caller.
#[derive(Clone, Debug, Default)]
pub struct ChatSession {
    turns: Vec<ChatTurn>,
    busy: bool,
    next_id: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session opened with an assistant greeting.
    pub fn with_greeting(text: &str) -> Self {
        let mut session = Self::new();
        session.push(Role::Assistant, text.to_string(), None, None);
        session
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    fn push(
        &mut self,
        role: Role,
        text: String,
        intent: Option<String>,
        dashboard: Option<DashboardSpec>,
    ) -> &ChatTurn {
        self.next_id += 1;
        self.turns.push(ChatTurn {
            id: format!("turn-{}", self.next_id),
            role,
            text,
            created_at: Utc::now(),
            intent,
            dashboard,
        });
        &self.turns[self.turns.len() - 1]
    }

    /// Records the user's turn and returns the request to send, or `None`
    /// when the text is blank or another request is still in flight.
    pub fn submit(&mut self, text: &str) -> Option<ChatRequest> {
        if text.trim().is_empty() || self.busy {
            return None;
        }

        let start = self.turns.len().saturating_sub(HISTORY_WINDOW);
        let conversation_history = self.turns[start..]
            .iter()
            .map(|turn| HistoryEntry {
                role: turn.role.as_str().to_string(),
                content: turn.text.clone(),
            })
            .collect();

        self.push(Role::User, text.to_string(), None, None);
        self.busy = true;

        Some(ChatRequest {
            message: text.to_string(),
            conversation_history,
        })
    }

    /// Settles the in-flight request. Returns `None` if nothing was pending.
    pub fn complete(&mut self, result: Result<ChatReply, ApiError>) -> Option<&ChatTurn> {
        if !self.busy {
            log::warn!("Dropping chat reply with no request in flight");
            return None;
        }
        self.busy = false;

        let turn = match result {
            Ok(reply) => self.push(
                Role::Assistant,
                reply.response,
                reply.intent,
                reply.dashboard_config,
            ),
            Err(e) => {
                log::error!("Chat request failed: {e}");
                self.push(Role::Assistant, ERROR_REPLY.to_string(), None, None)
            }
        };
        Some(turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(text: &str) -> ChatReply {
        ChatReply {
            response: text.to_string(),
            intent: Some("revenue_query".to_string()),
            dashboard_config: None,
        }
    }

    #[test]
    fn successful_exchange_appends_user_then_assistant() {
        let mut session = ChatSession::new();
        let request = session.submit("Revenue in September?").unwrap();
        assert_eq!(request.message, "Revenue in September?");
        assert!(request.conversation_history.is_empty());
        assert!(session.is_busy());
        assert_eq!(session.turns().len(), 1);

        session.complete(Ok(reply("2.1 billion VND")));
        let turns = session.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].text, "2.1 billion VND");
        assert_eq!(turns[1].intent.as_deref(), Some("revenue_query"));
        assert!(!session.is_busy());
    }

    #[test]
    fn failed_exchange_appends_fixed_error_turn() {
        let mut session = ChatSession::new();
        session.submit("Forecast Q4").unwrap();
        session.complete(Err(ApiError::Status(500)));

        let turns = session.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].text, ERROR_REPLY);
        assert!(turns[1].dashboard.is_none());
        assert!(!session.is_busy());
    }

    #[test]
    fn submit_while_busy_is_a_no_op() {
        let mut session = ChatSession::new();
        session.submit("first").unwrap();
        assert!(session.submit("second").is_none());
        assert_eq!(session.turns().len(), 1);

        session.complete(Err(ApiError::Timeout(30)));
        assert!(session.submit("second").is_some());
        assert_eq!(session.turns().len(), 3);
    }

    #[test]
    fn blank_text_is_rejected() {
        let mut session = ChatSession::new();
        assert!(session.submit("   \n").is_none());
        assert!(session.turns().is_empty());
        assert!(!session.is_busy());
    }

    #[test]
    fn history_holds_the_five_most_recent_prior_turns() {
        let mut session = ChatSession::with_greeting(GREETING);
        for i in 0..3 {
            session.submit(&format!("q{i}")).unwrap();
            session.complete(Ok(reply(&format!("a{i}"))));
        }
        // greeting + 3 exchanges = 7 turns before the next submit
        let request = session.submit("q3").unwrap();
        let contents: Vec<_> = request
            .conversation_history
            .iter()
            .map(|h| h.content.as_str())
            .collect();
        assert_eq!(contents, vec!["a0", "q1", "a1", "q2", "a2"]);
        assert_eq!(request.conversation_history[0].role, "assistant");
        assert_eq!(request.conversation_history[1].role, "user");
    }

    #[test]
    fn turn_ids_are_unique_and_increasing() {
        let mut session = ChatSession::with_greeting("hi");
        session.submit("x").unwrap();
        session.complete(Ok(reply("y")));
        let ids: Vec<_> = session.turns().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["turn-1", "turn-2", "turn-3"]);
    }

    #[test]
    fn late_completion_without_request_is_ignored() {
        let mut session = ChatSession::new();
        assert!(session.complete(Ok(reply("stray"))).is_none());
        assert!(session.turns().is_empty());
    }

    #[test]
    fn intent_labels() {
        assert_eq!(intent_label("forecast"), Some("AI forecast"));
        assert_eq!(intent_label("create_dashboard"), Some("Dashboard"));
        assert_eq!(intent_label("smalltalk"), None);
    }
}
