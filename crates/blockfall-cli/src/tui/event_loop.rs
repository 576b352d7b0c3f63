use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};

/// Events produced by [`EventLoop::next`].
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Game logic update, carrying the time since the previous tick.
    Tick(Duration),
    /// Screen render timing.
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(Event),
}

/// Tick and render scheduling.
///
/// Ticks fire every `tick_interval`. Renders happen after something changed
/// (a tick or a terminal event), at most once per `min_render_interval`.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Duration,
    min_render_interval: Duration,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new(tick_interval: Duration, min_render_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            tick_interval,
            min_render_interval,
            last_tick: now,
            last_render: now.checked_sub(min_render_interval).unwrap_or(now),
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
    }

    /// Blocks until the next tick, render or terminal event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            let since_tick = now.duration_since(self.last_tick);
            if since_tick >= self.tick_interval {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick(since_tick));
            }

            if self.dirty && now.duration_since(self.last_render) >= self.min_render_interval {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if !event::poll(self.timeout(now))? {
                continue;
            }
            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn timeout(&self, now: Instant) -> Duration {
        let next_tick_at = self.last_tick + self.tick_interval;
        let next_at = if self.dirty {
            next_tick_at.min(self.last_render + self.min_render_interval)
        } else {
            next_tick_at
        };
        next_at.saturating_duration_since(now)
    }
}
