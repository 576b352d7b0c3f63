//! Player-name prompt shown after game over.

use arrayvec::ArrayString;
use log::warn;

use crate::{ExitRequest, InputEvent};

/// Maximum length of a player name, in bytes.
pub const MAX_NAME_LEN: usize = 16;

/// Name stored when the player confirms an empty prompt.
pub const ANONYMOUS_NAME: &str = "anonymous";

/// What the prompt wants the driver to do after an event.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum NameEntryStatus {
    /// Keep prompting.
    Editing,
    /// The player confirmed this name; record the score.
    Committed(String),
    /// The player left without saving.
    Aborted(ExitRequest),
}

/// Text buffer edited by typed characters and backspace.
///
/// # Example
///
/// ```
/// use blockfall_engine::{InputEvent, NameEntry, NameEntryStatus};
///
/// let mut entry = NameEntry::new();
/// for ch in "abc".chars() {
///     entry.handle(InputEvent::Char(ch));
/// }
/// entry.handle(InputEvent::Backspace);
/// assert_eq!(
///     entry.handle(InputEvent::Confirm),
///     NameEntryStatus::Committed("ab".to_owned())
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct NameEntry {
    name: ArrayString<MAX_NAME_LEN>,
}

impl NameEntry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The text typed so far.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.name
    }

    pub fn handle(&mut self, event: InputEvent) -> NameEntryStatus {
        match event {
            InputEvent::Char(ch) if !ch.is_control() => {
                // Characters past the limit are dropped.
                _ = self.name.try_push(ch);
            }
            InputEvent::Backspace => {
                self.name.pop();
            }
            InputEvent::Confirm => {
                let name = self.name.trim();
                let name = if name.is_empty() { ANONYMOUS_NAME } else { name };
                return NameEntryStatus::Committed(name.to_owned());
            }
            InputEvent::Quit | InputEvent::Escape => {
                let exit = event.exit_request().unwrap_or(ExitRequest::Quit);
                warn!("name entry aborted ({exit:?}), score not saved");
                return NameEntryStatus::Aborted(exit);
            }
            _ => {}
        }
        NameEntryStatus::Editing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(entry: &mut NameEntry, text: &str) {
        for ch in text.chars() {
            assert!(entry.handle(InputEvent::Char(ch)).is_editing());
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut entry = NameEntry::new();
        type_text(&mut entry, "alice");
        assert_eq!(entry.text(), "alice");
        entry.handle(InputEvent::Backspace);
        entry.handle(InputEvent::Backspace);
        assert_eq!(entry.text(), "ali");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut entry = NameEntry::new();
        assert!(entry.handle(InputEvent::Backspace).is_editing());
        assert_eq!(entry.text(), "");
    }

    #[test]
    fn test_confirm_trims_and_defaults() {
        let mut entry = NameEntry::new();
        type_text(&mut entry, "  bob ");
        assert_eq!(
            entry.handle(InputEvent::Confirm),
            NameEntryStatus::Committed("bob".to_owned())
        );

        let mut entry = NameEntry::new();
        assert_eq!(
            entry.handle(InputEvent::Confirm),
            NameEntryStatus::Committed(ANONYMOUS_NAME.to_owned())
        );
    }

    #[test]
    fn test_length_is_capped() {
        let mut entry = NameEntry::new();
        type_text(&mut entry, &"x".repeat(MAX_NAME_LEN + 5));
        assert_eq!(entry.text().len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_control_chars_and_game_keys_are_ignored() {
        let mut entry = NameEntry::new();
        entry.handle(InputEvent::Char('\t'));
        entry.handle(InputEvent::HardDrop);
        entry.handle(InputEvent::RotateClockwise);
        assert_eq!(entry.text(), "");
    }

    #[test]
    fn test_quit_and_escape_abort() {
        let mut entry = NameEntry::new();
        type_text(&mut entry, "carol");
        assert_eq!(
            entry.handle(InputEvent::Escape),
            NameEntryStatus::Aborted(ExitRequest::Escape)
        );
        assert_eq!(
            entry.handle(InputEvent::Quit),
            NameEntryStatus::Aborted(ExitRequest::Quit)
        );
    }
}
