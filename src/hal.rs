// MorseWatch — Hardware seams
//
// The input classifier only sees these traits.  The esp-idf drivers in
// `drivers/` implement them on the device; tests use scripted fakes.

use crate::events::MotionSample;

/// Source of accelerometer samples.
pub trait MotionSensor {
    /// Read the latest sample.  An `Err` is a transient read failure for
    /// this tick only.
    fn read_motion(&mut self) -> anyhow::Result<MotionSample>;
}

/// Instantaneous state of the Morse gap button.
pub trait ButtonInput {
    /// `true` while the button is held down.
    fn is_pressed(&mut self) -> bool;
}

/// Transmit side of the serial link that carries the Morse stream.  Kept
/// apart from the log console so the stream holds protocol bytes only.
pub trait SerialTx {
    type Error: std::fmt::Display;

    /// Write some of `bytes`, returning how many were accepted.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<usize, Self::Error>;
}
