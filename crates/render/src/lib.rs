//! Markup dispatch for status bar modules.
//!
//! Every redraw, each bar module hands over a string of text and format tags.
//! [`Dispatch`] tokenizes it with the [`markup`] crate and turns it into calls
//! against a [`Renderer`], tracking the [`Context`] (colors, font, alignment,
//! attributes) along the way and recording clickable regions in an
//! [`ActionTracker`].
//!
//! # Usage
//!
//! ```
//! use render::{BarSettings, Dispatch, testing::Recorder};
//!
//! let settings = BarSettings::default();
//! let recorder = Recorder::new();
//! let mut dispatch = Dispatch::new(recorder.emitter());
//!
//! dispatch
//!     .parse(&settings, &mut recorder.renderer(), "A%{F#ff0000}B%{F-}C")
//!     .unwrap();
//! assert_eq!(recorder.texts(), ["A", "B", "C"]);
//! ```
//!
//! # Modules
//!
//! - [`context`]: per-pass rendering state
//! - [`action`]: clickable regions and click resolution
//! - [`dispatch`]: the interpreter loop
//! - [`renderer`], [`signal`]: interfaces to the backend and the bar
//! - [`settings`]: bar settings loaded through `config`
//! - [`testing`]: recording backend

pub mod action;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod log_init;
pub mod renderer;
pub mod settings;
pub mod signal;
pub mod testing;

// Re-export main types at crate root
pub use action::{ActionId, ActionIdAllocator, ActionRegion, ActionTracker};
pub use context::{Alignment, Attributes, Context, ContextState};
pub use dispatch::{CycleSummary, Dispatch};
pub use error::{DispatchError, InvariantViolation};
pub use renderer::Renderer;
pub use settings::{BarSettings, Loader};
pub use signal::{Signal, SignalEmitter};
