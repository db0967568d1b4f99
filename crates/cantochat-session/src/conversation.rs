//! Turn history for one scenario session.
//!
//! A `Conversation` is append-only except for its trailing assistant
//! turn, which stays open while a connection is still delivering chunks
//! for it. At most one turn is open at any time and it is always last.

use crate::Role;

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: Role,
    text: String,
    open: bool,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            open: false,
        }
    }

    /// A closed assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            open: false,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether chunks may still be appended to this turn.
    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of turns authored by `role`.
    pub fn count(&self, role: Role) -> usize {
        self.turns.iter().filter(|t| t.role == role).count()
    }

    /// The trailing turn if it is still receiving chunks.
    pub fn open_turn(&self) -> Option<&Turn> {
        self.turns.last().filter(|t| t.open)
    }

    /// Drop all history and start over with a single closed assistant turn.
    pub fn reset_with_assistant(&mut self, text: impl Into<String>) {
        self.turns.clear();
        self.turns.push(Turn::assistant(text));
    }

    /// Append a closed user turn, closing any open assistant turn first.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.close_trailing();
        self.turns.push(Turn::user(text));
    }

    /// Fold one chunk of assistant text into the conversation.
    ///
    /// Extends the trailing turn if it is an open assistant turn, otherwise
    /// starts a new open assistant turn seeded with `chunk`. Empty chunks
    /// are ignored.
    pub fn append_chunk(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        match self.turns.last_mut() {
            Some(turn) if turn.open && turn.role == Role::Assistant => turn.text.push_str(chunk),
            _ => self.turns.push(Turn {
                role: Role::Assistant,
                text: chunk.to_string(),
                open: true,
            }),
        }
    }

    /// Mark the trailing turn closed. No-op if nothing is open.
    pub fn close_trailing(&mut self) {
        if let Some(turn) = self.turns.last_mut() {
            turn.open = false;
        }
    }

    /// All closed turns, in order. Excludes an open trailing assistant turn.
    pub fn closed_history(&self) -> Vec<Turn> {
        self.turns.iter().filter(|t| !t.open).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_count(conversation: &Conversation) -> usize {
        conversation.turns().iter().filter(|t| t.is_open()).count()
    }

    #[test]
    fn reset_replaces_history() {
        let mut conversation = Conversation::new();
        conversation.push_user("hello");
        conversation.append_chunk("hi");
        conversation.reset_with_assistant("歡迎光臨");

        assert_eq!(conversation.turns(), &[Turn::assistant("歡迎光臨")]);
    }

    #[test]
    fn chunks_fold_into_one_turn() {
        let mut conversation = Conversation::new();
        conversation.push_user("我想要一份炒饭");
        for chunk in ["好", "嘅，", "即刻嚟。"] {
            conversation.append_chunk(chunk);
        }

        assert_eq!(conversation.len(), 2);
        let last = conversation.last().unwrap();
        assert_eq!(last.role(), Role::Assistant);
        assert_eq!(last.text(), "好嘅，即刻嚟。");
        assert!(last.is_open());
    }

    #[test]
    fn chunk_after_closed_assistant_starts_new_turn() {
        let mut conversation = Conversation::new();
        conversation.reset_with_assistant("opening");
        conversation.append_chunk("more");

        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.turns()[0].text(), "opening");
        assert_eq!(conversation.turns()[1].text(), "more");
        assert_eq!(open_count(&conversation), 1);
    }

    #[test]
    fn empty_chunk_is_ignored() {
        let mut conversation = Conversation::new();
        conversation.push_user("q");
        conversation.append_chunk("");
        assert_eq!(conversation.len(), 1);
        assert!(conversation.open_turn().is_none());
    }

    #[test]
    fn push_user_closes_open_assistant() {
        let mut conversation = Conversation::new();
        conversation.push_user("one");
        conversation.append_chunk("partial");
        conversation.push_user("two");

        assert_eq!(open_count(&conversation), 0);
        assert_eq!(conversation.turns()[1].text(), "partial");
        assert!(!conversation.turns()[1].is_open());
    }

    #[test]
    fn closed_history_skips_open_turn() {
        let mut conversation = Conversation::new();
        conversation.reset_with_assistant("opening");
        conversation.push_user("q");
        conversation.append_chunk("streaming");

        let history = conversation.closed_history();
        assert_eq!(history, vec![Turn::assistant("opening"), Turn::user("q")]);

        conversation.close_trailing();
        assert_eq!(conversation.closed_history().len(), 3);
    }

    #[test]
    fn count_by_role() {
        let mut conversation = Conversation::new();
        conversation.reset_with_assistant("a");
        conversation.push_user("b");
        conversation.push_user("c");
        assert_eq!(conversation.count(Role::User), 2);
        assert_eq!(conversation.count(Role::Assistant), 1);
    }
}
