// MorseWatch — Input Classifier
//
// Turns raw IMU and button samples into Morse events.  Designed to be
// ticked every SAMPLE_PERIOD_MS from the input task.
//
// Tilt: X past the move threshold is a dot, Y is a dash.  An axis latches
// after it fires and re-arms when the watch returns to rest.
// Button: presses are counted and the count is read on release
// (1 = letter gap, 2 = word gap, 3 = end of message).

use std::time::Instant;

use crate::config::ClassifierConfig;
use crate::events::{Event, MotionSample};
use crate::hal::{ButtonInput, MotionSensor};

/// Events produced by one tick: at most one symbol, then at most one gap.
pub type TickEvents = heapless::Vec<Event, 2>;

/// Per-axis tilt latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiltLatch {
    /// The next tilt past the threshold emits a symbol.
    Armed,
    /// Already fired for the current gesture.
    Latched,
}

/// Button press counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Idle,
    Counting(u8),
}

impl ButtonState {
    pub fn count(&self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Counting(n) => *n,
        }
    }
}

pub struct InputClassifier {
    config: ClassifierConfig,

    // Tilt state
    x_latch: TiltLatch,
    y_latch: TiltLatch,
    last_movement: Option<Instant>,

    // Debounce state
    last_raw: bool,
    last_debounce: Instant,

    // Press tracking
    button_down: bool,
    button: ButtonState,

    sensor_failing: bool,
}

impl InputClassifier {
    pub fn new(config: ClassifierConfig, now: Instant) -> Self {
        Self {
            config,
            x_latch: TiltLatch::Armed,
            y_latch: TiltLatch::Armed,
            last_movement: None,
            last_raw: false,
            last_debounce: now,
            button_down: false,
            button: ButtonState::Idle,
            sensor_failing: false,
        }
    }

    pub fn latches(&self) -> (TiltLatch, TiltLatch) {
        (self.x_latch, self.y_latch)
    }

    pub fn button_state(&self) -> ButtonState {
        self.button
    }

    /// Read both collaborators and classify.  Call once per sample period.
    ///
    /// A failed IMU read only skips tilt classification for this tick; the
    /// button path keeps running so gaps and end-of-message still work.
    pub fn sample<S, B>(&mut self, now: Instant, sensor: &mut S, button: &mut B) -> TickEvents
    where
        S: MotionSensor + ?Sized,
        B: ButtonInput + ?Sized,
    {
        let motion = match sensor.read_motion() {
            Ok(sample) => {
                if self.sensor_failing {
                    log::info!("IMU reads recovered, tilt input resumed");
                    self.sensor_failing = false;
                }
                Some(sample)
            }
            Err(e) => {
                if self.sensor_failing {
                    log::debug!("IMU read error: {}", e);
                } else {
                    log::warn!("IMU read error, tilt input paused: {}", e);
                    self.sensor_failing = true;
                }
                None
            }
        };
        let pressed = button.is_pressed();

        self.tick(now, motion.as_ref(), pressed)
    }

    /// Classify one sample.  `motion` is `None` when the IMU read failed.
    pub fn tick(&mut self, now: Instant, motion: Option<&MotionSample>, pressed: bool) -> TickEvents {
        let mut events = TickEvents::new();

        // Capacity is 2 and each branch contributes at most one event.
        if let Some(ev) = motion.and_then(|m| self.classify_motion(now, m)) {
            let _ = events.push(ev);
        }
        if let Some(ev) = self.classify_button(now, pressed) {
            let _ = events.push(ev);
        }

        for ev in events.iter() {
            log::debug!("event: {}", ev.label());
        }
        events
    }

    fn is_stationary(&self, m: &MotionSample) -> bool {
        let limit = self.config.stationary_threshold;
        m.ax.abs() < limit && m.ay.abs() < limit && (m.az - self.config.gravity_bias).abs() < limit
    }

    fn classify_motion(&mut self, now: Instant, m: &MotionSample) -> Option<Event> {
        if self.is_stationary(m) {
            self.x_latch = TiltLatch::Armed;
            self.y_latch = TiltLatch::Armed;
            return None;
        }

        if let Some(last) = self.last_movement {
            if now.duration_since(last) < self.config.tilt_cooldown {
                return None;
            }
        }

        let threshold = self.config.move_threshold;
        let x_tilted = m.ax.abs() > threshold;
        let y_tilted = m.ay.abs() > threshold;

        let event = if x_tilted && self.x_latch == TiltLatch::Armed {
            self.x_latch = TiltLatch::Latched;
            if !y_tilted {
                self.y_latch = TiltLatch::Armed;
            }
            Event::Dot
        } else if y_tilted && self.y_latch == TiltLatch::Armed {
            self.y_latch = TiltLatch::Latched;
            if !x_tilted {
                self.x_latch = TiltLatch::Armed;
            }
            Event::Dash
        } else {
            return None;
        };

        self.last_movement = Some(now);
        // A finished gesture counts as the first press of the next sequence.
        self.button = ButtonState::Counting(1);
        Some(event)
    }

    fn classify_button(&mut self, now: Instant, raw: bool) -> Option<Event> {
        // ---- debounce filter ----
        if raw != self.last_raw {
            self.last_debounce = now;
        }
        self.last_raw = raw;

        if now.duration_since(self.last_debounce) < self.config.debounce {
            return None;
        }

        // ---- button pressed edge ----
        if raw && !self.button_down {
            self.button_down = true;
            self.button = ButtonState::Counting(self.button.count().saturating_add(1));
            return None;
        }

        // ---- button released edge ----
        if !raw && self.button_down {
            self.button_down = false;
            return match self.button.count() {
                1 => Some(Event::GapLetter),
                2 => Some(Event::GapWord),
                3 => {
                    self.button = ButtonState::Idle;
                    Some(Event::EndMessage)
                }
                // Longer sequences are absorbed.
                _ => None,
            };
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const REST: MotionSample = MotionSample::accel(0.0, 0.0, 1.0);
    const TILT_X: MotionSample = MotionSample::accel(0.6, 0.05, 0.8);
    const TILT_Y: MotionSample = MotionSample::accel(0.05, -0.6, 0.8);
    const TILT_XY: MotionSample = MotionSample::accel(0.5, 0.5, 0.7);
    const SLIGHT: MotionSample = MotionSample::accel(0.2, 0.05, 0.95);

    /// Drives a classifier on a 20 ms tick clock and records every event.
    struct Harness {
        classifier: InputClassifier,
        t0: Instant,
        tick: u32,
        events: Vec<Event>,
    }

    impl Harness {
        fn new(config: ClassifierConfig) -> Self {
            let t0 = Instant::now();
            Self { classifier: InputClassifier::new(config, t0), t0, tick: 0, events: Vec::new() }
        }

        /// No debounce or cooldown, so one tick is enough for every edge.
        fn immediate() -> Self {
            Self::new(ClassifierConfig {
                debounce: Duration::ZERO,
                tilt_cooldown: Duration::ZERO,
                ..ClassifierConfig::default()
            })
        }

        fn step(&mut self, motion: Option<MotionSample>, pressed: bool) {
            self.tick += 1;
            let now = self.t0 + Duration::from_millis(20 * u64::from(self.tick));
            let out = self.classifier.tick(now, motion.as_ref(), pressed);
            self.events.extend(out);
        }

        fn hold(&mut self, motion: MotionSample, pressed: bool, ticks: u32) {
            for _ in 0..ticks {
                self.step(Some(motion), pressed);
            }
        }

        fn click(&mut self) {
            self.hold(REST, true, 3);
            self.hold(REST, false, 3);
        }
    }

    #[test]
    fn test_single_click_is_letter_gap() {
        let mut h = Harness::immediate();
        h.click();
        assert_eq!(h.events, vec![Event::GapLetter]);
        assert_eq!(h.classifier.button_state(), ButtonState::Counting(1));
    }

    #[test]
    fn test_click_sequence_letter_word_end() {
        let mut h = Harness::immediate();
        h.click();
        h.click();
        h.click();
        assert_eq!(h.events, vec![Event::GapLetter, Event::GapWord, Event::EndMessage]);
        assert_eq!(h.classifier.button_state(), ButtonState::Idle);

        // Counter starts over after the end of message.
        h.click();
        assert_eq!(h.events.last(), Some(&Event::GapLetter));
    }

    #[test]
    fn test_no_event_while_button_held() {
        let mut h = Harness::immediate();
        h.hold(REST, true, 50);
        assert!(h.events.is_empty());
        assert_eq!(h.classifier.button_state(), ButtonState::Counting(1));
    }

    #[test]
    fn test_stationary_never_emits_symbols() {
        let mut h = Harness::immediate();
        for _ in 0..4 {
            h.hold(REST, false, 5);
            h.click();
        }
        assert!(h.events.iter().all(|e| !e.is_symbol()));
        assert_eq!(h.events.len(), 4);
    }

    #[test]
    fn test_sustained_tilt_emits_once() {
        let mut h = Harness::immediate();
        h.hold(TILT_X, false, 100);
        assert_eq!(h.events, vec![Event::Dot]);
        assert_eq!(h.classifier.latches(), (TiltLatch::Latched, TiltLatch::Armed));
    }

    #[test]
    fn test_rest_rearms_axis() {
        let mut h = Harness::immediate();
        h.hold(TILT_X, false, 5);
        h.hold(REST, false, 1);
        assert_eq!(h.classifier.latches(), (TiltLatch::Armed, TiltLatch::Armed));
        h.hold(TILT_X, false, 5);
        h.hold(REST, false, 1);
        h.hold(TILT_Y, false, 5);
        assert_eq!(h.events, vec![Event::Dot, Event::Dot, Event::Dash]);
    }

    #[test]
    fn test_small_tilt_keeps_latch() {
        let mut h = Harness::immediate();
        h.hold(TILT_X, false, 3);
        // Below the move threshold but not at rest either.
        h.hold(SLIGHT, false, 3);
        h.hold(TILT_X, false, 3);
        assert_eq!(h.events, vec![Event::Dot]);
    }

    #[test]
    fn test_opposite_axis_rearms() {
        let mut h = Harness::immediate();
        h.hold(TILT_X, false, 3);
        h.hold(TILT_Y, false, 3);
        h.hold(TILT_X, false, 3);
        assert_eq!(h.events, vec![Event::Dot, Event::Dash, Event::Dot]);
    }

    #[test]
    fn test_diagonal_tilt_does_not_alternate() {
        let mut h = Harness::immediate();
        h.hold(TILT_XY, false, 20);
        assert_eq!(h.events, vec![Event::Dot, Event::Dash]);
        assert_eq!(h.classifier.latches(), (TiltLatch::Latched, TiltLatch::Latched));
    }

    #[test]
    fn test_tilt_resets_press_counter_to_one() {
        let mut h = Harness::immediate();
        h.click();
        h.click();
        assert_eq!(h.classifier.button_state(), ButtonState::Counting(2));

        h.hold(TILT_X, false, 2);
        assert_eq!(h.classifier.button_state(), ButtonState::Counting(1));

        h.hold(REST, false, 2);
        h.click();
        assert_eq!(h.events, vec![Event::GapLetter, Event::GapWord, Event::Dot, Event::GapWord]);
    }

    #[test]
    fn test_tilt_cooldown_delays_next_symbol() {
        let mut h = Harness::new(ClassifierConfig {
            debounce: Duration::ZERO,
            tilt_cooldown: Duration::from_millis(150),
            ..ClassifierConfig::default()
        });
        h.hold(TILT_X, false, 1); // t = 20 ms, dot
        h.hold(TILT_Y, false, 1); // t = 40 ms, inside cooldown
        assert_eq!(h.events, vec![Event::Dot]);
        assert_eq!(h.classifier.latches(), (TiltLatch::Latched, TiltLatch::Armed));

        // Still held: fires once the cooldown has run out (t = 180 ms).
        h.hold(TILT_Y, false, 6);
        assert_eq!(h.events, vec![Event::Dot]);
        h.hold(TILT_Y, false, 1);
        assert_eq!(h.events, vec![Event::Dot, Event::Dash]);
    }

    #[test]
    fn test_debounce_ignores_glitches() {
        let mut h = Harness::new(ClassifierConfig {
            debounce: Duration::from_millis(40),
            tilt_cooldown: Duration::ZERO,
            ..ClassifierConfig::default()
        });
        // One-tick spikes never settle.
        for _ in 0..5 {
            h.hold(REST, true, 1);
            h.hold(REST, false, 1);
        }
        assert!(h.events.is_empty());
        assert_eq!(h.classifier.button_state(), ButtonState::Idle);

        // A real click must hold each level for the debounce window.
        h.hold(REST, true, 3);
        h.hold(REST, false, 2);
        assert!(h.events.is_empty());
        h.hold(REST, false, 1);
        assert_eq!(h.events, vec![Event::GapLetter]);
    }

    #[test]
    fn test_sensor_failure_keeps_button_path() {
        let mut h = Harness::immediate();
        h.hold(TILT_X, false, 2);

        for _ in 0..3 {
            h.step(None, true);
        }
        for _ in 0..3 {
            h.step(None, false);
        }
        // Failed reads leave the latch alone.
        assert_eq!(h.classifier.latches(), (TiltLatch::Latched, TiltLatch::Armed));
        assert_eq!(h.events, vec![Event::Dot, Event::GapWord]);
    }

    struct FailingImu;

    impl MotionSensor for FailingImu {
        fn read_motion(&mut self) -> anyhow::Result<MotionSample> {
            anyhow::bail!("i2c timeout")
        }
    }

    struct Held(bool);

    impl ButtonInput for Held {
        fn is_pressed(&mut self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_sample_reads_collaborators() {
        let config = ClassifierConfig { debounce: Duration::ZERO, ..ClassifierConfig::default() };
        let t0 = Instant::now();
        let mut classifier = InputClassifier::new(config, t0);
        let mut imu = FailingImu;

        let pressed = classifier.sample(t0 + Duration::from_millis(20), &mut imu, &mut Held(true));
        assert!(pressed.is_empty());
        let released = classifier.sample(t0 + Duration::from_millis(40), &mut imu, &mut Held(false));
        assert_eq!(released.as_slice(), &[Event::GapLetter]);
    }
}
