//! Chat screen state: transcript plus one-question-at-a-time discipline

use ragdesk_core::{AssistantReply, ChatMessage};

use crate::requests::{RequestId, RequestTracker};

/// Opening message seeded into every new conversation
pub const GREETING: &str =
    "您好！我是RAG智能助手，可以幫您檢索和分析文檔庫中的信息。請問有什麼可以幫助您的？";

/// Owned transcript behind the chat screen
///
/// Unlike search, chat refuses new questions while an answer is pending;
/// the transcript stays strictly alternating after the greeting.
#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    tracker: RequestTracker,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// A fresh conversation holding only the assistant greeting
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING, Vec::new())],
            tracker: RequestTracker::new(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_waiting(&self) -> bool {
        self.tracker.in_flight()
    }

    /// Post a question. Returns None for blank input or while an answer is
    /// still pending; otherwise the question joins the transcript and the
    /// returned id settles via [`complete`](Self::complete).
    pub fn send(&mut self, question: &str) -> Option<RequestId> {
        if question.trim().is_empty() || self.tracker.in_flight() {
            return None;
        }
        self.messages.push(ChatMessage::user(question));
        Some(self.tracker.begin())
    }

    /// Append the backend's answer for the given question id. A stale or
    /// unknown id returns false and leaves the transcript alone.
    pub fn complete(&mut self, id: RequestId, reply: AssistantReply) -> bool {
        if !self.tracker.finish(id) {
            return false;
        }
        self.messages
            .push(ChatMessage::assistant(reply.content, reply.sources));
        true
    }

    /// Settle a question without an answer, used when the backend errored.
    /// The question stays in the transcript; asking again becomes possible.
    pub fn abandon(&mut self, id: RequestId) -> bool {
        self.tracker.finish(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragdesk_core::ChatRole;

    fn reply(content: &str) -> AssistantReply {
        AssistantReply {
            content: content.to_string(),
            sources: vec!["文檔A.pdf".to_string()],
        }
    }

    #[test]
    fn new_session_greets_first() {
        let session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, ChatRole::Assistant);
        assert_eq!(session.messages()[0].content, GREETING);
    }

    #[test]
    fn question_and_answer_extend_the_transcript() {
        let mut session = ChatSession::new();
        let id = session.send("年假有幾天？").unwrap();
        assert!(session.is_waiting());

        assert!(session.complete(id, reply("21天。")));
        assert!(!session.is_waiting());

        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[2].role, ChatRole::Assistant);
        assert_eq!(messages[2].sources, ["文檔A.pdf"]);
    }

    #[test]
    fn second_question_is_refused_while_waiting() {
        let mut session = ChatSession::new();
        let id = session.send("第一個問題").unwrap();
        assert_eq!(session.send("第二個問題"), None);
        assert_eq!(session.messages().len(), 2);

        session.complete(id, reply("答案"));
        assert!(session.send("第二個問題").is_some());
    }

    #[test]
    fn blank_question_is_refused() {
        let mut session = ChatSession::new();
        assert_eq!(session.send("  "), None);
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn stale_answer_is_dropped() {
        let mut session = ChatSession::new();
        let id = session.send("問題").unwrap();
        assert!(session.abandon(id));

        assert!(!session.complete(id, reply("遲到的答案")));
        assert_eq!(session.messages().len(), 2);
        assert!(!session.is_waiting());
    }
}
