//! Per-call execution context: caller, clock, and event log.

use alloy_primitives::Address;

use super::Event;

/// Who is calling, at what time, and what has been emitted so far.
///
/// Every mutating operation in the crate takes a `&mut CallContext`.  The
/// caller plays the role of `msg.sender`, the timestamp that of
/// `block.timestamp`.  Successful operations append their events to the
/// log; failed ones leave it as it was.
///
/// # Examples
///
/// ```
/// use alloy_primitives::address;
/// use pairswap::domain::CallContext;
///
/// let alice = address!("0x00000000000000000000000000000000000a11ce");
/// let mut ctx = CallContext::new(alice, 1_700_000_000);
/// ctx.advance(12);
/// assert_eq!(ctx.timestamp(), 1_700_000_012);
/// assert!(ctx.events().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    caller: Address,
    timestamp: u64,
    events: Vec<Event>,
}

impl CallContext {
    /// Creates a context for `caller` at `timestamp` with an empty log.
    #[must_use]
    pub const fn new(caller: Address, timestamp: u64) -> Self {
        Self {
            caller,
            timestamp,
            events: Vec::new(),
        }
    }

    /// Returns the current caller.
    #[must_use]
    pub const fn caller(&self) -> Address {
        self.caller
    }

    /// Returns the current block timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Returns the block timestamp truncated to 32 bits (wraps mod 2^32).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn timestamp_u32(&self) -> u32 {
        self.timestamp as u32
    }

    /// Switches the caller for subsequent operations.
    pub fn set_caller(&mut self, caller: Address) {
        self.caller = caller;
    }

    /// Moves the clock to `timestamp`.
    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = timestamp;
    }

    /// Moves the clock forward by `seconds`.
    pub fn advance(&mut self, seconds: u64) {
        self.timestamp = self.timestamp.saturating_add(seconds);
    }

    /// Runs `f` with `caller` as the caller, restoring the previous caller
    /// afterwards regardless of the outcome.
    pub fn as_caller<T>(&mut self, caller: Address, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = core::mem::replace(&mut self.caller, caller);
        let out = f(self);
        self.caller = previous;
        out
    }

    /// Returns every event emitted so far.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drains the event log.
    pub fn take_events(&mut self) -> Vec<Event> {
        core::mem::take(&mut self.events)
    }

    pub(crate) fn emit_all(&mut self, events: impl IntoIterator<Item = Event>) {
        self.events.extend(events);
    }

    pub(crate) fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub(crate) fn event_mark(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn truncate_events(&mut self, mark: usize) {
        self.events.truncate(mark);
    }
}
