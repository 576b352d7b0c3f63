use std::time::Duration;

use blockfall_engine::{HeldKeys, InputEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// How long a sideways key stays held after its last press or repeat when the
/// terminal does not report releases.
pub(crate) const RELEASE_TIMEOUT: Duration = Duration::from_millis(80);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Meaning of a key on the game screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GameKey {
    Event(InputEvent),
    Press(Side),
    Release(Side),
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c' | 'C'))
}

/// Maps a key on the game screen.
///
/// Discrete actions fire on press only; the arrow keys for sideways movement
/// are reported as held state instead.
pub(crate) fn game_key(key: &KeyEvent) -> Option<GameKey> {
    let side = match key.code {
        KeyCode::Left => Some(Side::Left),
        KeyCode::Right => Some(Side::Right),
        _ => None,
    };
    if let Some(side) = side {
        return Some(match key.kind {
            KeyEventKind::Release => GameKey::Release(side),
            KeyEventKind::Press | KeyEventKind::Repeat => GameKey::Press(side),
        });
    }
    if !key.is_press() {
        return None;
    }
    if is_ctrl_c(key) {
        return Some(GameKey::Event(InputEvent::Quit));
    }
    let event = match key.code {
        KeyCode::Char('q' | 'Q') => InputEvent::Quit,
        KeyCode::Esc => InputEvent::Escape,
        KeyCode::Down => InputEvent::RotateCounterClockwise,
        KeyCode::Up => InputEvent::RotateClockwise,
        KeyCode::Char(' ') => InputEvent::HardDrop,
        _ => return None,
    };
    Some(GameKey::Event(event))
}

/// Maps a key on a text prompt. Letters are text here, so only Ctrl-C quits.
pub(crate) fn text_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.is_release() {
        return None;
    }
    if is_ctrl_c(key) {
        return Some(InputEvent::Quit);
    }
    match key.code {
        KeyCode::Esc => Some(InputEvent::Escape),
        KeyCode::Enter => Some(InputEvent::Confirm),
        KeyCode::Backspace => Some(InputEvent::Backspace),
        KeyCode::Char(ch) => Some(InputEvent::Char(ch)),
        _ => None,
    }
}

/// Held state of the sideways keys.
///
/// Once the terminal has delivered a release event, releases are trusted and
/// keys stay held until released. Before that, a key counts as released when
/// no press or repeat arrived within [`RELEASE_TIMEOUT`].
#[derive(Debug, Clone, Default)]
pub(crate) struct HeldKeyTracker {
    left: Option<Duration>,
    right: Option<Duration>,
    release_events: bool,
}

impl HeldKeyTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, side: Side) -> &mut Option<Duration> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub(crate) fn press(&mut self, side: Side) {
        *self.slot(side) = Some(Duration::ZERO);
    }

    pub(crate) fn release(&mut self, side: Side) {
        if !self.release_events {
            log::debug!("key release events detected");
        }
        self.release_events = true;
        *self.slot(side) = None;
    }

    /// Ages held keys by `elapsed`, dropping those past the release timeout.
    pub(crate) fn advance(&mut self, elapsed: Duration) {
        if self.release_events {
            return;
        }
        for slot in [&mut self.left, &mut self.right] {
            if let Some(age) = slot.as_mut() {
                *age += elapsed;
                if *age > RELEASE_TIMEOUT {
                    *slot = None;
                }
            }
        }
    }

    pub(crate) fn held(&self) -> HeldKeys {
        HeldKeys {
            left: self.left.is_some(),
            right: self.right.is_some(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.left = None;
        self.right = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    fn press(code: KeyCode) -> KeyEvent {
        key(code, KeyEventKind::Press)
    }

    #[test]
    fn test_game_key_bindings() {
        let cases = [
            (KeyCode::Char('q'), InputEvent::Quit),
            (KeyCode::Esc, InputEvent::Escape),
            (KeyCode::Down, InputEvent::RotateCounterClockwise),
            (KeyCode::Up, InputEvent::RotateClockwise),
            (KeyCode::Char(' '), InputEvent::HardDrop),
        ];
        for (code, expected) in cases {
            assert_eq!(game_key(&press(code)), Some(GameKey::Event(expected)), "{code:?}");
        }
        assert_eq!(game_key(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_game_key_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(game_key(&ctrl_c), Some(GameKey::Event(InputEvent::Quit)));
    }

    #[test]
    fn test_game_key_ignores_release_of_discrete_keys() {
        assert_eq!(game_key(&key(KeyCode::Up, KeyEventKind::Release)), None);
        assert_eq!(game_key(&key(KeyCode::Char(' '), KeyEventKind::Release)), None);
    }

    #[test]
    fn test_game_key_arrows_are_held() {
        assert_eq!(game_key(&press(KeyCode::Left)), Some(GameKey::Press(Side::Left)));
        assert_eq!(
            game_key(&key(KeyCode::Right, KeyEventKind::Repeat)),
            Some(GameKey::Press(Side::Right))
        );
        assert_eq!(
            game_key(&key(KeyCode::Left, KeyEventKind::Release)),
            Some(GameKey::Release(Side::Left))
        );
    }

    #[test]
    fn test_text_key_bindings() {
        assert_eq!(text_key(&press(KeyCode::Char('q'))), Some(InputEvent::Char('q')));
        assert_eq!(text_key(&press(KeyCode::Enter)), Some(InputEvent::Confirm));
        assert_eq!(text_key(&press(KeyCode::Backspace)), Some(InputEvent::Backspace));
        assert_eq!(text_key(&press(KeyCode::Esc)), Some(InputEvent::Escape));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(text_key(&ctrl_c), Some(InputEvent::Quit));
        assert_eq!(text_key(&key(KeyCode::Char('a'), KeyEventKind::Release)), None);
    }

    #[test]
    fn test_held_key_times_out_without_release_events() {
        let mut tracker = HeldKeyTracker::new();
        tracker.press(Side::Left);
        tracker.advance(Duration::from_millis(60));
        assert!(tracker.held().left);

        // A repeat refreshes the timeout.
        tracker.press(Side::Left);
        tracker.advance(Duration::from_millis(60));
        assert!(tracker.held().left);

        tracker.advance(Duration::from_millis(60));
        assert!(!tracker.held().left);
    }

    #[test]
    fn test_held_key_waits_for_release_once_seen() {
        let mut tracker = HeldKeyTracker::new();
        tracker.press(Side::Right);
        tracker.release(Side::Right);
        assert!(!tracker.held().any());

        tracker.press(Side::Right);
        tracker.advance(Duration::from_secs(1));
        assert!(tracker.held().right);

        tracker.release(Side::Right);
        assert!(!tracker.held().right);
    }

    #[test]
    fn test_both_sides_tracked_independently() {
        let mut tracker = HeldKeyTracker::new();
        tracker.press(Side::Left);
        tracker.advance(Duration::from_millis(50));
        tracker.press(Side::Right);
        tracker.advance(Duration::from_millis(50));
        assert_eq!(
            tracker.held(),
            HeldKeys {
                left: false,
                right: true
            }
        );
        tracker.clear();
        assert!(!tracker.held().any());
    }
}
