//! Session state for the quest conversation
//!
//! The session is owned by the UI thread and mutated only by the
//! `SessionController` as capture and quest-service events arrive. The
//! listening flag is true exactly between a capture start and its terminal
//! outcome; there is no timeout transition.

use super::transcript::Transcript;
use super::turn::Turn;

/// Voice capture state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListeningState {
    /// No capture in progress
    #[default]
    Idle,
    /// A single-shot capture has been started and has not yet produced
    /// its transcript or error
    Listening,
}

impl ListeningState {
    pub fn is_listening(&self) -> bool {
        matches!(self, ListeningState::Listening)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ListeningState::Idle)
    }
}

impl std::fmt::Display for ListeningState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListeningState::Idle => write!(f, "Idle"),
            ListeningState::Listening => write!(f, "Listening"),
        }
    }
}

/// Conversation state for one quest session
///
/// Created empty; `quest_id` is replaced wholesale on every successful
/// service response. Lives for the lifetime of the view and is never
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Opaque identifier returned by the quest service
    pub quest_id: Option<String>,
    /// Ordered conversation history
    pub transcript: Transcript,
    /// Voice capture state
    pub listening: ListeningState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // === State transitions ===

    /// A capture request was accepted
    pub fn begin_listening(&mut self) {
        self.listening = ListeningState::Listening;
    }

    /// A capture reached a terminal outcome (transcript or error)
    pub fn finish_listening(&mut self) {
        self.listening = ListeningState::Idle;
    }

    /// A new quest started: replace the identifier and reset the
    /// transcript to the opening AI narration
    pub fn begin_quest(&mut self, quest_id: String, opening: Turn) {
        self.quest_id = Some(quest_id);
        self.transcript.reset(opening);
    }

    /// Record the child's captured utterance
    pub fn record_child_turn(&mut self, text: impl Into<String>) {
        self.transcript.push(Turn::child(text));
    }

    /// Record the service's narrative reply and overwrite the quest id,
    /// even when unchanged
    pub fn record_ai_turn(&mut self, quest_id: String, text: impl Into<String>) {
        self.transcript.push(Turn::ai(text));
        self.quest_id = Some(quest_id);
    }
}
