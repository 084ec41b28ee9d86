// MorseWatch — Input Task
//
// Samples the IMU and the button every SAMPLE_PERIOD_MS (50 Hz) and pushes
// classified events into the event queue for the encoder task.

use std::thread;
use std::time::Instant;

use crate::config::ClassifierConfig;
use crate::hal::{ButtonInput, MotionSensor};
use crate::input::InputClassifier;
use crate::queue::EventProducer;

pub fn input_task<S, B>(mut sensor: S, mut button: B, config: ClassifierConfig, events: EventProducer)
where
    S: MotionSensor,
    B: ButtonInput,
{
    log::info!("Input task started");

    let interval = config.sample_period;
    let mut classifier = InputClassifier::new(config, Instant::now());

    loop {
        let tick_start = Instant::now();

        for event in classifier.sample(tick_start, &mut sensor, &mut button) {
            // Blocks while the queue is full; events are never dropped here.
            if events.push(event).is_err() {
                log::warn!("Event queue closed, exiting input task");
                return;
            }
        }

        // Sleep for the remainder of the sampling interval to hold 50 Hz.
        let elapsed = tick_start.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
        }
    }
}
