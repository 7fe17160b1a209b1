//! Synchronous event loop driving the desktop.
//!
//! The loop is the only place that polls or reads input. Events are handed
//! to a closure which routes them into the shell; a `None` event marks an
//! idle tick and is the cue to redraw.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::Event;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// Source of terminal input events. Abstracted so tests can script an event
/// stream instead of reading the real console.
pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }
}

/// Live console input via crossterm, with a pushback queue so callers can
/// re-inject events they peeked at.
#[derive(Default)]
pub struct ConsoleInputDriver {
    queue: VecDeque<Event>,
}

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, event: Event) {
        self.queue.push_back(event);
    }
}

impl InputDriver for ConsoleInputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        if !self.queue.is_empty() {
            return Ok(true);
        }
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        if let Some(event) = self.queue.pop_front() {
            return Ok(event);
        }
        crossterm::event::read()
    }
}

pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Run until the handler returns [`ControlFlow::Quit`].
    ///
    /// The handler sees `Some(event)` for each input event and `None` once
    /// per poll interval. When input arrives the queue is drained before the
    /// next idle tick, so rendering never falls behind a burst of mouse-drag
    /// events.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None)? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
