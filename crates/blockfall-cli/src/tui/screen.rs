use std::{fmt, time::Duration};

use crossterm::event::Event;
use ratatui::Frame;

use super::Runtime;

/// One full-terminal view of the application.
///
/// Exactly one screen is active at a time. A screen hands over to the next one
/// by returning [`ScreenTransition::Replace`] from [`handle_event`] or
/// [`update`]; [`on_enter`] runs when it becomes active and is the place to
/// configure the [`Runtime`] tick interval.
///
/// [`handle_event`]: Self::handle_event
/// [`update`]: Self::update
/// [`on_enter`]: Self::on_enter
pub(crate) trait Screen: fmt::Debug {
    fn on_enter(&mut self, _runtime: &mut Runtime) {}

    /// Handles a terminal event.
    fn handle_event(&mut self, event: &Event) -> anyhow::Result<ScreenTransition>;

    /// Advances screen state; called on every tick with the time since the last one.
    fn update(&mut self, elapsed: Duration) -> anyhow::Result<ScreenTransition>;

    fn draw(&self, frame: &mut Frame);
}

/// What the active screen wants to happen next.
#[derive(Debug)]
pub(crate) enum ScreenTransition {
    Stay,
    /// Drop the current screen and activate another one.
    Replace(Box<dyn Screen>),
    /// Leave the application.
    Exit,
}

/// Holds the active screen and applies transitions.
#[derive(Debug)]
pub(crate) struct ScreenHost {
    current: Box<dyn Screen>,
    should_exit: bool,
}

impl ScreenHost {
    pub(crate) fn new(initial: Box<dyn Screen>) -> Self {
        Self {
            current: initial,
            should_exit: false,
        }
    }

    pub(super) fn enter(&mut self, runtime: &mut Runtime) {
        self.current.on_enter(runtime);
    }

    pub(super) fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn apply(&mut self, runtime: &mut Runtime, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Replace(next) => {
                log::debug!("switching screen to {next:?}");
                self.current = next;
                self.current.on_enter(runtime);
            }
            ScreenTransition::Exit => self.should_exit = true,
        }
    }

    pub(super) fn handle_event(
        &mut self,
        runtime: &mut Runtime,
        event: &Event,
    ) -> anyhow::Result<()> {
        let transition = self.current.handle_event(event)?;
        self.apply(runtime, transition);
        Ok(())
    }

    pub(super) fn update(
        &mut self,
        runtime: &mut Runtime,
        elapsed: Duration,
    ) -> anyhow::Result<()> {
        let transition = self.current.update(elapsed)?;
        self.apply(runtime, transition);
        Ok(())
    }

    pub(super) fn draw(&self, frame: &mut Frame) {
        self.current.draw(frame);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    /// Shared record of screen callbacks.
    #[derive(Debug, Clone, Default)]
    struct CallLog {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl CallLog {
        fn log(&self, msg: impl Into<String>) {
            self.calls.borrow_mut().push(msg.into());
        }

        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.calls.borrow_mut())
        }
    }

    #[derive(Debug)]
    struct TestScreen {
        name: &'static str,
        log: CallLog,
        next: Option<ScreenTransition>,
    }

    impl TestScreen {
        fn boxed(name: &'static str, log: &CallLog, next: Option<ScreenTransition>) -> Box<Self> {
            Box::new(Self {
                name,
                log: log.clone(),
                next,
            })
        }
    }

    impl Screen for TestScreen {
        fn on_enter(&mut self, _runtime: &mut Runtime) {
            self.log.log(format!("{}: on_enter", self.name));
        }

        fn handle_event(&mut self, _event: &Event) -> anyhow::Result<ScreenTransition> {
            self.log.log(format!("{}: handle_event", self.name));
            Ok(self.next.take().unwrap_or(ScreenTransition::Stay))
        }

        fn update(&mut self, elapsed: Duration) -> anyhow::Result<ScreenTransition> {
            self.log.log(format!("{}: update {}ms", self.name, elapsed.as_millis()));
            Ok(ScreenTransition::Stay)
        }

        fn draw(&self, _frame: &mut Frame) {}
    }

    fn key_event() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE))
    }

    #[test]
    fn test_enter_calls_on_enter() {
        let log = CallLog::default();
        let mut host = ScreenHost::new(TestScreen::boxed("A", &log, None));
        host.enter(&mut Runtime::new());
        assert_eq!(log.take(), ["A: on_enter"]);
    }

    #[test]
    fn test_replace_activates_next_screen() {
        let log = CallLog::default();
        let b = TestScreen::boxed("B", &log, None);
        let a = TestScreen::boxed("A", &log, Some(ScreenTransition::Replace(b)));
        let mut host = ScreenHost::new(a);
        let mut runtime = Runtime::new();

        host.handle_event(&mut runtime, &key_event()).unwrap();
        host.update(&mut runtime, Duration::from_millis(16)).unwrap();

        assert_eq!(log.take(), ["A: handle_event", "B: on_enter", "B: update 16ms"]);
        assert!(!host.should_exit());
    }

    #[test]
    fn test_exit_sets_flag() {
        let log = CallLog::default();
        let a = TestScreen::boxed("A", &log, Some(ScreenTransition::Exit));
        let mut host = ScreenHost::new(a);
        host.handle_event(&mut Runtime::new(), &key_event()).unwrap();
        assert!(host.should_exit());
    }
}
