#![forbid(unsafe_code)]

//! Headless harness running a [`Model`] on a virtual clock.
//!
//! The simulator executes the same command semantics as
//! [`Program`](crate::program::Program) — including [`Cmd::Defer`] — but
//! time only moves when the test calls [`Simulator::advance`]. Rendering
//! goes to an offscreen [`Frame`] the test can inspect.

use std::collections::BinaryHeap;
use std::time::Duration;

use numfield_core::event::Event;
use numfield_render::frame::Frame;

use crate::program::{Cmd, Deferred, Model};

/// Deterministic, clock-controlled model harness.
pub struct Simulator<M: Model> {
    model: M,
    frame: Frame,
    now: Duration,
    deferred: BinaryHeap<Deferred<Duration, M::Message>>,
    seq: u64,
    quit: bool,
}

impl<M: Model> Simulator<M> {
    /// Create a simulator over an offscreen terminal of the given size.
    /// Runs the model's `init` commands.
    pub fn new(mut model: M, width: u16, height: u16) -> Self {
        let init = model.init();
        let mut sim = Self {
            model,
            frame: Frame::new(width, height),
            now: Duration::ZERO,
            deferred: BinaryHeap::new(),
            seq: 0,
            quit: false,
        };
        sim.dispatch(init);
        sim
    }

    /// The model under test.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the model under test.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Whether the model has requested quit.
    #[must_use]
    pub fn has_quit(&self) -> bool {
        self.quit
    }

    /// Number of deferred messages still pending.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.deferred.len()
    }

    /// Deliver a terminal event to the model.
    pub fn event(&mut self, event: Event) {
        let cmd = self.model.update(event.into());
        self.dispatch(cmd);
    }

    /// Deliver a message directly.
    pub fn message(&mut self, msg: M::Message) {
        self.dispatch(Cmd::Msg(msg));
    }

    /// Advance the virtual clock, delivering every deferred message that
    /// falls due, in deadline order with scheduling order breaking ties.
    pub fn advance(&mut self, delta: Duration) {
        self.now += delta;
        while self.deferred.peek().is_some_and(|d| d.due <= self.now) {
            if let Some(d) = self.deferred.pop() {
                let cmd = self.model.update(d.msg);
                self.dispatch(cmd);
            }
        }
    }

    /// Render the model into the offscreen frame and return it.
    pub fn render(&mut self) -> &Frame {
        self.frame.reset();
        self.model.view(&mut self.frame);
        &self.frame
    }

    fn dispatch(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.quit = true,
            Cmd::Msg(m) => {
                let next = self.model.update(m);
                self.dispatch(next);
            }
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.dispatch(c);
                }
            }
            Cmd::Defer(delay, msg) => {
                self.deferred.push(Deferred {
                    due: self.now + delay,
                    seq: self.seq,
                    msg,
                });
                self.seq += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numfield_core::event::{KeyCode, KeyEvent};

    /// Counts deliveries; defers an echo for each `Ping`.
    #[derive(Default)]
    struct Echo {
        pings: u32,
        echoes: Vec<u32>,
    }

    enum Msg {
        Ping,
        Echoed(u32),
        Quit,
        Ignore,
    }

    impl From<Event> for Msg {
        fn from(event: Event) -> Self {
            match event {
                Event::Key(k) if k.is_char('q') => Msg::Quit,
                Event::Key(k) if k.is_char('p') => Msg::Ping,
                _ => Msg::Ignore,
            }
        }
    }

    impl Model for Echo {
        type Message = Msg;

        fn update(&mut self, msg: Msg) -> Cmd<Msg> {
            match msg {
                Msg::Ping => {
                    self.pings += 1;
                    Cmd::defer(Duration::from_secs(2), Msg::Echoed(self.pings))
                }
                Msg::Echoed(n) => {
                    self.echoes.push(n);
                    Cmd::none()
                }
                Msg::Quit => Cmd::quit(),
                Msg::Ignore => Cmd::none(),
            }
        }

        fn view(&self, _frame: &mut Frame) {}
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c)))
    }

    #[test]
    fn deferred_delivery_waits_for_the_clock() {
        let mut sim = Simulator::new(Echo::default(), 20, 5);
        sim.event(key('p'));
        assert_eq!(sim.pending(), 1);
        sim.advance(Duration::from_secs(1));
        assert!(sim.model().echoes.is_empty());
        sim.advance(Duration::from_secs(1));
        assert_eq!(sim.model().echoes, vec![1]);
        assert_eq!(sim.pending(), 0);
    }

    #[test]
    fn deferred_delivery_preserves_scheduling_order() {
        let mut sim = Simulator::new(Echo::default(), 20, 5);
        sim.event(key('p'));
        sim.event(key('p'));
        sim.event(key('p'));
        sim.advance(Duration::from_secs(10));
        assert_eq!(sim.model().echoes, vec![1, 2, 3]);
    }

    #[test]
    fn quit_is_sticky() {
        let mut sim = Simulator::new(Echo::default(), 20, 5);
        assert!(!sim.has_quit());
        sim.event(key('q'));
        assert!(sim.has_quit());
    }
}
