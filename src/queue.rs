// MorseWatch — Event Queue
//
// Bounded FIFO between the input task (producer) and the encoder task
// (consumer), built on `mpsc::sync_channel`.
//
// Full-queue policy: `push` blocks the producer until the consumer makes
// room, so no event is ever dropped.  `try_push` is the fail-fast variant
// and hands the event back in `QueueError::Full`.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TrySendError};
use std::time::Duration;

use crate::error::QueueError;
use crate::events::Event;

/// Create a queue holding at most `capacity` events (minimum 1).
pub fn event_queue(capacity: usize) -> (EventProducer, EventConsumer) {
    // A zero-sized sync_channel is a rendezvous, not a queue.
    let capacity = capacity.max(1);
    let (tx, rx) = mpsc::sync_channel(capacity);
    (
        EventProducer { tx, capacity },
        EventConsumer { rx, capacity },
    )
}

/// Sending half.  Cloneable, so more than one producer may feed the queue.
#[derive(Debug, Clone)]
pub struct EventProducer {
    tx: SyncSender<Event>,
    capacity: usize,
}

impl EventProducer {
    /// Enqueue `event`, blocking while the queue is full.
    pub fn push(&self, event: Event) -> Result<(), QueueError> {
        self.tx.send(event).map_err(|_| QueueError::Disconnected)
    }

    /// Enqueue `event` without blocking.
    pub fn try_push(&self, event: Event) -> Result<(), QueueError> {
        self.tx.try_send(event).map_err(|e| match e {
            TrySendError::Full(event) => QueueError::Full(event),
            TrySendError::Disconnected(_) => QueueError::Disconnected,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Receiving half.  There is exactly one.
#[derive(Debug)]
pub struct EventConsumer {
    rx: Receiver<Event>,
    capacity: usize,
}

impl EventConsumer {
    /// Block until the next event arrives.
    ///
    /// Events already queued are still delivered after every producer has
    /// been dropped; `Disconnected` is only returned once the queue is empty.
    pub fn pop(&self) -> Result<Event, QueueError> {
        self.rx.recv().map_err(|_| QueueError::Disconnected)
    }

    /// Like [`pop`](Self::pop), but gives up after `timeout`.
    pub fn pop_timeout(&self, timeout: Duration) -> Result<Event, QueueError> {
        self.rx.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => QueueError::Timeout,
            RecvTimeoutError::Disconnected => QueueError::Disconnected,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
