// MorseWatch — Encoder Task
//
// Waits on the event queue, feeds each event to the protocol encoder, and
// writes every finished message to the serial sink before taking the next
// event.  A slow sink therefore back-pressures the whole pipeline.

use std::io::Write;

use crate::encoder::MorseEncoder;
use crate::queue::EventConsumer;

/// Runs until every producer is gone, then hands the sink back.
pub fn encoder_task<W: Write, const N: usize>(
    events: EventConsumer,
    mut encoder: MorseEncoder<N>,
    mut sink: W,
) -> W {
    log::info!("Encoder task started");

    loop {
        // Block until an event arrives.
        let event = match events.pop() {
            Ok(ev) => ev,
            Err(_) => {
                log::warn!("Event queue closed, exiting encoder task");
                return sink;
            }
        };

        encoder.handle(event, &mut sink);
    }
}
