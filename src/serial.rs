// MorseWatch — Morse serial port
//
// `io::Write` adapter over a `SerialTx`, handed to the encoder task as its
// sink.

use std::io;

use crate::hal::SerialTx;

pub struct MorsePort<T> {
    tx: T,
}

impl<T: SerialTx> MorsePort<T> {
    pub fn new(tx: T) -> Self {
        Self { tx }
    }

    pub fn into_inner(self) -> T {
        self.tx
    }
}

impl<T: SerialTx> io::Write for MorsePort<T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.tx
            .write_bytes(buf)
            .map_err(|e| io::Error::other(e.to_string()))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
