use super::turn::Turn;

/// Ordered, append-only history of turns for the current session.
///
/// Turns are never removed or edited once added; starting a new quest
/// replaces the whole transcript.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Replace the entire history, used when a new quest starts.
    pub fn reset(&mut self, opening: Turn) {
        self.turns = vec![opening];
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Text of the most recent turn, or empty when the transcript is empty.
    pub fn last_text(&self) -> String {
        self.turns
            .last()
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::turn::Speaker;

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::ai("Welcome"));
        transcript.push(Turn::child("go north"));

        let turns = transcript.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker, Speaker::Ai);
        assert_eq!(turns[1].speaker, Speaker::Child);
    }

    #[test]
    fn test_last_text_empty() {
        let transcript = Transcript::new();
        assert_eq!(transcript.last_text(), "");
    }

    #[test]
    fn test_reset_replaces_history() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::ai("Old quest"));
        transcript.push(Turn::child("old input"));

        transcript.reset(Turn::ai("A new quest begins"));
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.last_text(), "A new quest begins");
    }
}
