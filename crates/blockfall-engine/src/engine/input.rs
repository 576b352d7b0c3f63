use crate::RotationDirection;

/// Discrete key-down events delivered by the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum InputEvent {
    Quit,
    Escape,
    RotateCounterClockwise,
    RotateClockwise,
    HardDrop,
    /// A typed text character (used by name entry).
    Char(char),
    Backspace,
    Confirm,
}

impl InputEvent {
    #[must_use]
    pub fn rotation(self) -> Option<RotationDirection> {
        match self {
            InputEvent::RotateCounterClockwise => Some(RotationDirection::CounterClockwise),
            InputEvent::RotateClockwise => Some(RotationDirection::Clockwise),
            _ => None,
        }
    }

    /// Returns the exit this event requests, if any.
    #[must_use]
    pub fn exit_request(self) -> Option<ExitRequest> {
        match self {
            InputEvent::Quit => Some(ExitRequest::Quit),
            InputEvent::Escape => Some(ExitRequest::Escape),
            _ => None,
        }
    }
}

/// Continuous held state of the sideways movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    #[must_use]
    pub fn any(self) -> bool {
        self.left || self.right
    }
}

/// Everything the input source delivered for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    pub held: HeldKeys,
}

impl FrameInput {
    #[must_use]
    pub fn from_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            held: HeldKeys::default(),
        }
    }

    #[must_use]
    pub fn held(held: HeldKeys) -> Self {
        Self {
            events: Vec::new(),
            held,
        }
    }
}

/// Why the player left a running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum ExitRequest {
    /// Quit the application.
    Quit,
    /// Leave the game through the escape key.
    Escape,
}
