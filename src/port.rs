// Signal ports connecting control blocks within one control cycle
//
// A producer owns (or is handed) an `OutputPort` and writes its latest sample
// into it. Consumers hold `InputPort`s connected to those output ports and
// sample them with `present()` during their own update. Ports carry no
// locking: `Cell` makes them `!Sync`, so every block wired to a port has to
// live in the same execution context.

use core::cell::Cell;
use core::fmt;

/// Producer side of a signal
///
/// Holds the most recent sample, or nothing. Absence is always explicit:
/// a reset port reports `None` rather than a stale number.
pub struct OutputPort<T: Copy> {
    content: Cell<Option<T>>,
}

impl<T: Copy> OutputPort<T> {
    /// Create an empty port (no value present)
    pub const fn new() -> Self {
        Self {
            content: Cell::new(None),
        }
    }

    /// Create a port that already holds `value`
    pub const fn with_value(value: T) -> Self {
        Self {
            content: Cell::new(Some(value)),
        }
    }

    /// Publish a new sample
    #[inline]
    pub fn write(&self, value: T) {
        self.content.set(Some(value));
    }

    /// Withdraw the current sample
    #[inline]
    pub fn reset(&self) {
        self.content.set(None);
    }

    /// Current sample, if the producer holds a valid one
    #[inline]
    pub fn present(&self) -> Option<T> {
        self.content.get()
    }
}

impl<T: Copy> Default for OutputPort<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for OutputPort<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OutputPort").field(&self.present()).finish()
    }
}

#[derive(Clone, Copy)]
enum Source<'a, T: Copy> {
    Disconnected,
    Port(&'a OutputPort<T>),
    Value(T),
}

/// Consumer side of a signal
///
/// Either disconnected (never present), connected to an [`OutputPort`], or
/// bound to a fixed value.
#[derive(Clone, Copy)]
pub struct InputPort<'a, T: Copy> {
    source: Source<'a, T>,
}

impl<'a, T: Copy> InputPort<'a, T> {
    /// Create a disconnected input
    pub const fn new() -> Self {
        Self {
            source: Source::Disconnected,
        }
    }

    /// Follow the given producer port
    pub fn connect_to(&mut self, port: &'a OutputPort<T>) {
        self.source = Source::Port(port);
    }

    /// Bind the input to a constant value
    pub fn connect_to_value(&mut self, value: T) {
        self.source = Source::Value(value);
    }

    pub fn disconnect(&mut self) {
        self.source = Source::Disconnected;
    }

    pub fn is_connected(&self) -> bool {
        !matches!(self.source, Source::Disconnected)
    }

    /// Sample the connected signal
    ///
    /// Has no side effects on the producer.
    #[inline]
    pub fn present(&self) -> Option<T> {
        match self.source {
            Source::Disconnected => None,
            Source::Port(port) => port.present(),
            Source::Value(value) => Some(value),
        }
    }
}

impl<T: Copy> Default for InputPort<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for InputPort<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.source {
            Source::Disconnected => "disconnected",
            Source::Port(_) => "port",
            Source::Value(_) => "value",
        };
        f.debug_struct("InputPort")
            .field("source", &kind)
            .field("present", &self.present())
            .finish()
    }
}

/// A block executed once per control cycle
pub trait Component {
    /// Advance the block by one cycle
    ///
    /// # Arguments
    /// * `timestamp` - Free-running hardware tick count at the time of the call
    fn update(&mut self, timestamp: u32);
}
