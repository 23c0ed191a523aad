//! Chat exchange with the design assistant
//!
//! DESIGN
//! ======
//! [`ChatSession`] owns the transcript and an explicit [`ChatState`]. A turn
//! is split in two so the remote call can run off the UI thread:
//! [`ChatSession::begin`] validates input and appends the user message,
//! [`ChatSession::complete`] appends the reply and returns to idle. Remote
//! failures never escape the session; they become [`FALLBACK_REPLY`].

mod gemini;
mod types;

use futures::future::BoxFuture;

pub use gemini::GeminiClient;
pub use types::{ChatError, Message, Role};

/// Model entry appended when the remote call fails
pub const FALLBACK_REPLY: &str = "I am currently meditating on a new concept. Please try again later.";

/// Opening model entry of the chat widget
pub const GREETING: &str = "Greetings. I am AIOOOKI. How may I assist your design journey today?";

pub const SYSTEM_INSTRUCTION: &str = "\
You are 'AIOOOKI', an AI design assistant for a high-end portfolio website created by a visionary designer.
The portfolio features two main sections: Interior Design (focusing on spatial harmony, minimalism, and texture) and Graphic Design (focusing on typography, branding, and digital art).

Your role is to:
1. Briefly answer questions about design principles.
2. Guide visitors to the relevant sections of the website (Interior or Graphic).
3. Maintain a tone that is elegant, sophisticated, and slightly mysterious.
4. Keep answers concise (under 50 words) to fit the chat widget.

If asked about contact, direct them to the Contact page.
";

/// Remote text completion
///
/// `history` is the transcript before `prompt`; the reply is the model's
/// text for `prompt`.
pub trait CompletionService: Send + Sync {
    fn complete<'a>(&'a self, history: &'a [Message], prompt: &'a str) -> BoxFuture<'a, Result<String, ChatError>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    AwaitingResponse,
}

/// A submitted turn waiting for its reply
///
/// Owns copies of the history and prompt so it can be moved to another
/// thread while the session keeps serving the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExchange {
    pub history: Vec<Message>,
    pub prompt: String,
}

impl PendingExchange {
    /// Ask `service` for the reply to this turn
    pub async fn send(&self, service: &dyn CompletionService) -> Result<String, ChatError> {
        service.complete(&self.history, &self.prompt).await
    }
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<Message>,
    state: ChatState,
    open: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// Empty transcript, closed, idle
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            state: ChatState::Idle,
            open: false,
        }
    }

    /// Transcript opening with the assistant's greeting
    pub fn with_greeting() -> Self {
        let mut session = Self::new();
        session.messages.push(Message::model(GREETING));
        session
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ChatState::AwaitingResponse
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open or close the widget; the transcript is kept either way
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Start a turn
    ///
    /// Returns `None`, changing nothing, for blank input or while a reply
    /// is outstanding.
    pub fn begin(&mut self, input: &str) -> Option<PendingExchange> {
        if input.trim().is_empty() || self.state == ChatState::AwaitingResponse {
            return None;
        }

        let pending = PendingExchange {
            history: self.messages.clone(),
            prompt: input.to_string(),
        };
        self.messages.push(Message::user(input));
        self.state = ChatState::AwaitingResponse;
        Some(pending)
    }

    /// Finish the outstanding turn with the service's result
    ///
    /// Ignored when no turn is outstanding.
    pub fn complete(&mut self, reply: Result<String, ChatError>) {
        if self.state != ChatState::AwaitingResponse {
            log::warn!("Chat reply arrived with no turn outstanding; dropping it");
            return;
        }

        let text = match reply {
            Ok(text) => text,
            Err(e) => {
                log::error!("Chat request failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        };
        self.messages.push(Message::model(text));
        self.state = ChatState::Idle;
    }

    /// `begin`, await the service, `complete`
    ///
    /// Returns whether a turn ran.
    pub async fn submit(&mut self, input: &str, service: &dyn CompletionService) -> bool {
        let Some(pending) = self.begin(input) else {
            return false;
        };
        let reply = pending.send(service).await;
        self.complete(reply);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_appends_user_message() {
        let mut session = ChatSession::new();
        let pending = session.begin("What is minimalism?").unwrap();

        assert!(pending.history.is_empty());
        assert_eq!(pending.prompt, "What is minimalism?");
        assert_eq!(session.messages(), &[Message::user("What is minimalism?")]);
        assert!(session.is_loading());
    }

    #[test]
    fn test_blank_input_is_noop() {
        let mut session = ChatSession::with_greeting();
        assert!(session.begin("").is_none());
        assert!(session.begin("   \n\t").is_none());
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.state(), ChatState::Idle);
    }

    #[test]
    fn test_begin_while_awaiting_is_noop() {
        let mut session = ChatSession::new();
        session.begin("first").unwrap();
        assert!(session.begin("second").is_none());
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_history_excludes_new_message() {
        let mut session = ChatSession::with_greeting();
        let pending = session.begin("Hello").unwrap();
        assert_eq!(pending.history, vec![Message::model(GREETING)]);
    }

    #[test]
    fn test_complete_failure_appends_fallback() {
        let mut session = ChatSession::new();
        session.begin("Hello").unwrap();
        session.complete(Err(ChatError::ApiRequest("timed out".into())));

        assert_eq!(session.messages().last(), Some(&Message::model(FALLBACK_REPLY)));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_complete_without_turn_is_ignored() {
        let mut session = ChatSession::new();
        session.complete(Ok("stray".into()));
        assert!(session.messages().is_empty());
    }

    #[test]
    fn test_toggle_keeps_transcript() {
        let mut session = ChatSession::with_greeting();
        assert!(!session.is_open());
        assert!(session.toggle());
        assert!(!session.toggle());
        assert_eq!(session.messages().len(), 1);
    }
}
