use std::{io, time::Duration};

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};
use log::{debug, info};
use ratatui::DefaultTerminal;

use super::{
    ScreenHost,
    event_loop::{EventLoop, TuiEvent},
};

const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);
const MIN_RENDER_INTERVAL: Duration = Duration::from_millis(16);

/// Terminal application runtime.
///
/// Owns the event loop and drives a [`ScreenHost`] until a screen exits.
#[derive(Debug)]
pub(crate) struct Runtime {
    events: EventLoop,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub(crate) fn new() -> Self {
        Self {
            events: EventLoop::new(DEFAULT_TICK_INTERVAL, MIN_RENDER_INTERVAL),
        }
    }

    /// Sets the tick rate (Hz, ticks per second).
    pub(crate) fn set_tick_rate(&mut self, rate: f64) {
        self.events.set_tick_interval(Duration::from_secs_f64(1.0 / rate));
    }

    /// Runs `host` in the alternate screen until it asks to exit.
    ///
    /// Key release reporting is switched on when the terminal supports it, so
    /// screens can track held keys precisely.
    pub(crate) fn run(mut self, host: &mut ScreenHost) -> anyhow::Result<()> {
        ratatui::run(|terminal| {
            let release_events = enable_release_events();
            let result = self.drive(terminal, host);
            if release_events {
                execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
            }
            result
        })
    }

    fn drive(
        &mut self,
        terminal: &mut DefaultTerminal,
        host: &mut ScreenHost,
    ) -> anyhow::Result<()> {
        host.enter(self);
        while !host.should_exit() {
            match self.events.next()? {
                TuiEvent::Tick(elapsed) => host.update(self, elapsed)?,
                TuiEvent::Render => {
                    terminal.draw(|frame| host.draw(frame))?;
                }
                TuiEvent::Crossterm(event) => host.handle_event(self, &event)?,
            }
        }
        Ok(())
    }
}

fn enable_release_events() -> bool {
    let supported = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if !supported {
        info!("terminal does not report key releases; using release timeout");
        return false;
    }
    let flags = KeyboardEnhancementFlags::REPORT_EVENT_TYPES;
    match execute!(io::stdout(), PushKeyboardEnhancementFlags(flags)) {
        Ok(()) => {
            debug!("key release reporting enabled");
            true
        }
        Err(e) => {
            info!("failed to enable key release reporting: {e}");
            false
        }
    }
}
