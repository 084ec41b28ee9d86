// MorseWatch — Protocol Encoder
//
// Builds the outgoing Morse line from events and hands finished messages
// to the serial sink:
//
//   Dot        → '.'
//   Dash       → '-'
//   GapLetter  → ' '    (collapses with an existing trailing space)
//   GapWord    → "  "   (tops the trailing spaces up to two)
//   EndMessage → "  \n" (same top-up, then newline, then flush)
//
// Appends that do not fit are dropped; the message is never corrupted.

use std::io::Write;

use crate::config::OUTPUT_BUFFER_CAPACITY;
use crate::error::CapacityExceeded;
use crate::events::Event;

pub const TERMINATOR: &[u8] = b"  \n";

const DOT: u8 = b'.';
const DASH: u8 = b'-';
const SPACE: u8 = b' ';
const NEWLINE: u8 = b'\n';
const WORD_GAP_SPACES: usize = 2;

/// Fixed-capacity message buffer.
///
/// The last `TERMINATOR.len()` bytes are reserved: [`push`](Self::push)
/// stops short of them so [`terminate`](Self::terminate) always has room.
#[derive(Debug, Clone)]
pub struct MorseBuffer<const N: usize = OUTPUT_BUFFER_CAPACITY> {
    bytes: heapless::Vec<u8, N>,
}

impl<const N: usize> MorseBuffer<N> {
    const BODY_CAPACITY: usize = {
        assert!(N >= TERMINATOR.len(), "buffer too small for the terminator");
        N - TERMINATOR.len()
    };

    pub const fn new() -> Self {
        Self { bytes: heapless::Vec::new() }
    }

    /// Append one body byte, or drop it if the body is full.
    pub fn push(&mut self, byte: u8) -> Result<(), CapacityExceeded> {
        if self.bytes.len() >= Self::BODY_CAPACITY {
            return Err(CapacityExceeded { byte });
        }
        self.bytes.push(byte).map_err(|byte| CapacityExceeded { byte })
    }

    /// Close the message with exactly two spaces and a newline.
    pub fn terminate(&mut self) -> Result<(), CapacityExceeded> {
        for _ in self.trailing_spaces()..WORD_GAP_SPACES {
            self.bytes.push(SPACE).map_err(|byte| CapacityExceeded { byte })?;
        }
        self.bytes.push(NEWLINE).map_err(|byte| CapacityExceeded { byte })
    }

    pub fn trailing_spaces(&self) -> usize {
        self.bytes.iter().rev().take_while(|&&b| b == SPACE).count()
    }

    pub fn last(&self) -> Option<u8> {
        self.bytes.last().copied()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

impl<const N: usize> Default for MorseBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MorseEncoder<const N: usize = OUTPUT_BUFFER_CAPACITY> {
    buffer: MorseBuffer<N>,
    /// Symbols lost to the capacity limit in the current message.  Dropped
    /// gap spaces are not counted: `terminate` tops them back up.
    dropped: usize,
}

impl<const N: usize> MorseEncoder<N> {
    pub fn new() -> Self {
        Self { buffer: MorseBuffer::new(), dropped: 0 }
    }

    /// The message built so far.
    pub fn pending(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Apply one event.
    ///
    /// On `EndMessage` the framed message goes to `sink` in a single
    /// `write_all` and the buffer starts over.  Returns `true` when a
    /// message was flushed.
    pub fn handle<W: Write + ?Sized>(&mut self, event: Event, sink: &mut W) -> bool {
        match event {
            Event::Dot => self.append_symbol(DOT),
            Event::Dash => self.append_symbol(DASH),
            Event::GapLetter => {
                if self.buffer.last().is_some_and(|b| b != SPACE) {
                    self.append_space();
                }
            }
            Event::GapWord => {
                for _ in self.buffer.trailing_spaces()..WORD_GAP_SPACES {
                    self.append_space();
                }
            }
            Event::EndMessage => {
                self.flush(sink);
                return true;
            }
        }
        false
    }

    fn append_symbol(&mut self, byte: u8) {
        if self.buffer.push(byte).is_err() {
            self.dropped += 1;
        }
    }

    fn append_space(&mut self) {
        // A full body only ever gains the terminator, which restores the gap.
        let _ = self.buffer.push(SPACE);
    }

    fn flush<W: Write + ?Sized>(&mut self, sink: &mut W) {
        if self.buffer.terminate().is_err() {
            self.dropped += 1;
        }
        if self.dropped > 0 {
            log::warn!(
                "Message truncated to {} bytes ({} symbols dropped)",
                self.buffer.len(),
                self.dropped
            );
        }

        let message = self.buffer.as_bytes();
        if let Err(e) = sink.write_all(message).and_then(|()| sink.flush()) {
            log::warn!("Serial write failed, message discarded: {}", e);
        } else {
            log::debug!("Sent {} byte message", message.len());
        }

        self.buffer.clear();
        self.dropped = 0;
    }
}

impl<const N: usize> Default for MorseEncoder<N> {
    fn default() -> Self {
        Self::new()
    }
}
