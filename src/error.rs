// MorseWatch — Error types

use thiserror::Error;

use crate::events::Event;

/// Failures of the event queue handles.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// Non-blocking push found the queue full. The event is handed back.
    #[error("event queue full, {0:?} not queued")]
    Full(Event),
    /// Bounded-wait pop expired with nothing to deliver.
    #[error("timed out waiting for an event")]
    Timeout,
    /// The other side of the queue has been dropped.
    #[error("event queue disconnected")]
    Disconnected,
}

/// An append to the output buffer did not fit. The byte was dropped.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("output buffer full, byte 0x{byte:02x} dropped")]
pub struct CapacityExceeded {
    pub byte: u8,
}
