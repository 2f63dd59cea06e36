#![forbid(unsafe_code)]

//! Elm-style update/view loop over a crossterm terminal session.
//!
//! Applications implement [`Model`]: events become messages, `update`
//! transitions state and returns a [`Cmd`] describing side effects, and
//! `view` renders into a [`Frame`]. [`Program`] owns the terminal — raw
//! mode, alternate screen, mouse capture — and restores it on exit,
//! including on errors.
//!
//! The one asynchronous effect is [`Cmd::Defer`]: deliver a message after a
//! delay. The loop keeps deferred messages in a min-heap keyed on deadline
//! and wakes the event poll in time to deliver them.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::io::{self, Stdout, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::cursor::Show;
use crossterm::event::{self as cte, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use numfield_core::event::Event;
use numfield_render::frame::Frame;
use numfield_render::presenter::Presenter;
use tracing::debug;

/// Poll timeout when no deferred message is pending.
const POLL_IDLE: Duration = Duration::from_millis(100);

/// Application state and behavior.
pub trait Model: Sized {
    /// The message type driving this model. Every terminal event must map
    /// to a message.
    type Message: From<Event>;

    /// Startup commands. Called once before the first frame.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// State transition. Returns commands for side effects.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state.
    fn view(&self, frame: &mut Frame);
}

/// A side effect requested by `update`.
pub enum Cmd<M> {
    /// No operation.
    None,
    /// Quit the application.
    Quit,
    /// Execute commands sequentially.
    Batch(Vec<Cmd<M>>),
    /// Feed a message back into `update`.
    Msg(M),
    /// Deliver a message after a delay.
    Defer(Duration, M),
}

impl<M> Default for Cmd<M> {
    fn default() -> Self {
        Self::None
    }
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Defer(d, m) => f.debug_tuple("Defer").field(d).field(m).finish(),
        }
    }
}

impl<M> Cmd<M> {
    /// No-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Quit command.
    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Deliver `m` after `delay`.
    #[inline]
    pub fn defer(delay: Duration, m: M) -> Self {
        Self::Defer(delay, m)
    }

    /// A batch of commands. Empty batches collapse to `None`, singleton
    /// batches to the command itself.
    pub fn batch(mut cmds: Vec<Self>) -> Self {
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }

    /// Check if this is a no-op.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// A deferred message waiting for its deadline.
///
/// Ordered inverted on `(due, seq)` so a `BinaryHeap` pops the earliest
/// deadline first; `seq` breaks ties in scheduling order.
pub(crate) struct Deferred<T, M> {
    pub(crate) due: T,
    pub(crate) seq: u64,
    pub(crate) msg: M,
}

impl<T: Ord, M> PartialEq for Deferred<T, M> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T: Ord, M> Eq for Deferred<T, M> {}

impl<T: Ord, M> PartialOrd for Deferred<T, M> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord, M> Ord for Deferred<T, M> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// RAII guard for the terminal session. Restores the terminal on drop, so
/// a panic or early `?` return still leaves the shell usable.
struct Session {
    out: Stdout,
}

impl Session {
    fn enter() -> io::Result<Self> {
        let mut out = stdout();
        enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
        Ok(Self { out })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Runs a [`Model`] against a real terminal.
pub struct Program<M: Model> {
    model: M,
}

impl<M: Model> Program<M> {
    /// Wrap a model for running.
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Enter the terminal session and drive the update/view loop until the
    /// model quits. The terminal is restored before returning.
    pub fn run(mut self) -> io::Result<M> {
        let mut session = Session::enter()?;
        let (width, height) = crossterm::terminal::size()?;
        let mut frame = Frame::new(width, height);
        let mut presenter = Presenter::new();
        let mut deferred: BinaryHeap<Deferred<Instant, M::Message>> = BinaryHeap::new();
        let mut seq = 0u64;

        let init = self.model.init();
        if Self::dispatch(&mut self.model, init, &mut deferred, &mut seq) {
            return Ok(self.model);
        }

        loop {
            frame.reset();
            self.model.view(&mut frame);
            presenter.present(&frame, &mut session.out)?;
            session.out.flush()?;

            let timeout = deferred
                .peek()
                .map(|d| d.due.saturating_duration_since(Instant::now()))
                .unwrap_or(POLL_IDLE);
            if cte::poll(timeout)? {
                let raw = cte::read()?;
                if let cte::Event::Resize(w, h) = raw {
                    debug!(width = w, height = h, "terminal resized");
                    frame.resize(w, h);
                    presenter.invalidate();
                }
                if let Some(event) = Event::from_crossterm(raw) {
                    let cmd = self.model.update(event.into());
                    if Self::dispatch(&mut self.model, cmd, &mut deferred, &mut seq) {
                        break;
                    }
                }
            }

            let now = Instant::now();
            while deferred.peek().is_some_and(|d| d.due <= now) {
                if let Some(d) = deferred.pop() {
                    let cmd = self.model.update(d.msg);
                    if Self::dispatch(&mut self.model, cmd, &mut deferred, &mut seq) {
                        return Ok(self.model);
                    }
                }
            }
        }
        Ok(self.model)
    }

    /// Run a command tree. Returns `true` when a quit was requested.
    fn dispatch(
        model: &mut M,
        cmd: Cmd<M::Message>,
        deferred: &mut BinaryHeap<Deferred<Instant, M::Message>>,
        seq: &mut u64,
    ) -> bool {
        match cmd {
            Cmd::None => false,
            Cmd::Quit => true,
            Cmd::Msg(m) => {
                let next = model.update(m);
                Self::dispatch(model, next, deferred, seq)
            }
            Cmd::Batch(cmds) => {
                let mut quit = false;
                for c in cmds {
                    quit |= Self::dispatch(model, c, deferred, seq);
                }
                quit
            }
            Cmd::Defer(delay, msg) => {
                deferred.push(Deferred {
                    due: Instant::now() + delay,
                    seq: *seq,
                    msg,
                });
                *seq += 1;
                false
            }
        }
    }
}
