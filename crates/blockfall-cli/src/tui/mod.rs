//! Minimal terminal runtime: a tick/render event loop driving one active screen.

pub(crate) use self::{
    runtime::Runtime,
    screen::{Screen, ScreenHost, ScreenTransition},
};

mod event_loop;
mod runtime;
mod screen;
