//! Recording backend for tests and tracing.
//!
//! A [`Recorder`] hands out a [`RecordingRenderer`] and a [`RecordingEmitter`]
//! that append to one shared call log, so the relative order of render calls
//! and signals is preserved.
//!
//! # Example
//!
//! ```
//! use render::{BarSettings, Dispatch, testing::Recorder};
//!
//! let recorder = Recorder::new();
//! let mut dispatch = Dispatch::new(recorder.emitter());
//! dispatch
//!     .parse(&BarSettings::default(), &mut recorder.renderer(), "a%{r}b")
//!     .unwrap();
//! assert_eq!(
//!     recorder.trace(),
//!     "text \"a\" [left]\nsignal align=right\ntext \"b\" [right]"
//! );
//! ```
//!
//! The renderer also keeps a cursor per zone, advancing one pixel per
//! character, so recorded action extents can be fed back into an
//! [`ActionTracker`] for click resolution tests.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use markup::{Extent, MouseButton};

use crate::action::{ActionId, ActionTracker};
use crate::context::{Attributes, Context, ContextState};
use crate::renderer::Renderer;
use crate::signal::{Signal, SignalEmitter};

/// One recorded backend or signal call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Text { text: String, state: ContextState },
    Offset { offset: Extent, pixels: i32 },
    ActionOpen { button: MouseButton, id: ActionId },
    ActionClose { id: ActionId },
    Signal(Signal),
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Call::Text { text, state } => {
                write!(f, "text {text:?} [{}", state.alignment)?;
                let colors = [("fg", state.fg), ("bg", state.bg), ("ul", state.ul), ("ol", state.ol)];
                for (name, color) in colors {
                    if let Some(color) = color {
                        write!(f, " {name}={color}")?;
                    }
                }
                if let Some(font) = state.font {
                    write!(f, " font={font}")?;
                }
                for (flag, name) in [
                    (Attributes::UNDERLINE, "underline"),
                    (Attributes::OVERLINE, "overline"),
                    (Attributes::REVERSE, "reverse"),
                ] {
                    if state.attributes.contains(flag) {
                        write!(f, " +{name}")?;
                    }
                }
                write!(f, "]")
            }
            Call::Offset { offset, pixels } => write!(f, "offset {offset} ({pixels})"),
            Call::ActionOpen { button, id } => {
                write!(f, "action_open button={} id={id}", button.number())
            }
            Call::ActionClose { id } => write!(f, "action_close id={id}"),
            Call::Signal(Signal::ChangeAlignment(alignment)) => {
                write!(f, "signal align={alignment}")
            }
        }
    }
}

#[derive(Debug, Default)]
struct Log {
    calls: Vec<Call>,
    cursor: [i32; 3],
    extents: Vec<(ActionId, i32, Option<i32>)>,
}

/// Shared call log.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    log: Rc<RefCell<Log>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renderer(&self) -> RecordingRenderer {
        RecordingRenderer {
            log: Rc::clone(&self.log),
        }
    }

    pub fn emitter(&self) -> RecordingEmitter {
        RecordingEmitter {
            log: Rc::clone(&self.log),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().calls.clone()
    }

    /// Text passed to `render_text`, in order.
    pub fn texts(&self) -> Vec<String> {
        self.log
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn signals(&self) -> Vec<Signal> {
        self.log
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Signal(signal) => Some(*signal),
                _ => None,
            })
            .collect()
    }

    /// One line per call.
    pub fn trace(&self) -> String {
        self.log
            .borrow()
            .calls
            .iter()
            .map(Call::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Forget all calls and reset the cursors, e.g. between redraws.
    pub fn clear(&self) {
        *self.log.borrow_mut() = Log::default();
    }

    /// Report the recorded start and end of every action region.
    pub fn apply_extents(&self, tracker: &mut ActionTracker) {
        for &(id, start, end) in &self.log.borrow().extents {
            tracker.set_start(id, start);
            if let Some(end) = end {
                tracker.set_end(id, end);
            }
        }
    }
}

/// [`Renderer`] that records every call.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    log: Rc<RefCell<Log>>,
}

impl Renderer for RecordingRenderer {
    fn render_text(&mut self, ctx: &Context<'_>, text: &str) {
        let mut log = self.log.borrow_mut();
        let width = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        let cursor = &mut log.cursor[ctx.alignment().index()];
        *cursor = cursor.saturating_add(width);
        log.calls.push(Call::Text {
            text: text.to_string(),
            state: *ctx.state(),
        });
    }

    fn render_offset(&mut self, ctx: &Context<'_>, offset: Extent) {
        let mut log = self.log.borrow_mut();
        let pixels = ctx.to_pixels(offset);
        let cursor = &mut log.cursor[ctx.alignment().index()];
        *cursor = cursor.saturating_add(pixels);
        log.calls.push(Call::Offset { offset, pixels });
    }

    fn action_open(&mut self, ctx: &Context<'_>, button: MouseButton, id: ActionId) {
        let mut log = self.log.borrow_mut();
        let start = log.cursor[ctx.alignment().index()];
        log.extents.push((id, start, None));
        log.calls.push(Call::ActionOpen { button, id });
    }

    fn action_close(&mut self, ctx: &Context<'_>, id: ActionId) {
        let mut log = self.log.borrow_mut();
        let end = log.cursor[ctx.alignment().index()];
        if let Some(extent) = log.extents.iter_mut().find(|(open, _, _)| *open == id) {
            extent.2 = Some(end);
        }
        log.calls.push(Call::ActionClose { id });
    }
}

/// [`SignalEmitter`] that records every signal.
#[derive(Debug, Clone)]
pub struct RecordingEmitter {
    log: Rc<RefCell<Log>>,
}

impl SignalEmitter for RecordingEmitter {
    fn emit(&mut self, signal: Signal) {
        self.log.borrow_mut().calls.push(Call::Signal(signal));
    }
}
