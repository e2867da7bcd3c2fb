//! Notifications sent from the dispatcher to the rest of the bar.

use tokio::sync::mpsc;

use crate::context::Alignment;

/// An event emitted while dispatching markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Subsequent output belongs to another zone.
    ChangeAlignment(Alignment),
}

/// Fire-and-forget sink for [`Signal`]s.
pub trait SignalEmitter {
    fn emit(&mut self, signal: Signal);
}

impl SignalEmitter for Vec<Signal> {
    fn emit(&mut self, signal: Signal) {
        self.push(signal);
    }
}

/// Forwards signals to a bar event loop. A closed channel is not an error
/// for the dispatcher.
impl SignalEmitter for mpsc::UnboundedSender<Signal> {
    fn emit(&mut self, signal: Signal) {
        if self.send(signal).is_err() {
            log::debug!("signal receiver dropped, discarding {signal:?}");
        }
    }
}

impl<T: SignalEmitter + ?Sized> SignalEmitter for &mut T {
    fn emit(&mut self, signal: Signal) {
        (**self).emit(signal);
    }
}
