//! # MorseWatch
//!
//! Wrist-worn Morse keyer: tilt the watch for dots (X axis) and dashes
//! (Y axis), click the button for letter gaps, word gaps and end of
//! message.  The result goes out on the USB-Serial-JTAG port as plain Morse
//! text, apart from the UART0 log console:
//!
//! ```text
//! IMU + button ──▶ InputClassifier ──▶ event queue ──▶ MorseEncoder ──▶ MorsePort
//!                  (input task)                        (encoder task)
//! ```
//!
//! Wire format: `.`, `-` and spaces, one space between letters, two
//! between words, and every message ends in `"  \n"`.
//!
//! Everything except `drivers` is plain `std` and runs on the host.

pub mod config;
pub mod encoder;
pub mod error;
pub mod events;
pub mod hal;
pub mod input;
pub mod queue;
pub mod serial;
pub mod tasks;

#[cfg(target_os = "espidf")]
pub mod drivers;

pub use config::ClassifierConfig;
pub use encoder::{MorseBuffer, MorseEncoder, TERMINATOR};
pub use error::{CapacityExceeded, QueueError};
pub use events::{Event, MotionSample};
pub use hal::{ButtonInput, MotionSensor, SerialTx};
pub use input::{ButtonState, InputClassifier, TiltLatch};
pub use queue::{event_queue, EventConsumer, EventProducer};
pub use serial::MorsePort;
