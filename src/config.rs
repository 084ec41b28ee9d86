// MorseWatch — Hardware & System Configuration
// Target: Seeed Studio Xiao ESP32-C3 (RISC-V)

use std::time::Duration;

// ---------------------------------------------------------------------------
// GPIO Pin Definitions (Xiao ESP32-C3 pinout)
// main.rs selects these pins by peripheral field name; keep both in step.
// ---------------------------------------------------------------------------
pub const PIN_BUTTON: i32 = 3;      // D1/A1 — Morse gap button (INPUT_PULLUP, active LOW)
pub const PIN_I2C_SDA: i32 = 6;     // D4    — I2C data line
pub const PIN_I2C_SCL: i32 = 7;     // D5    — I2C clock line
pub const PIN_USB_DM: i32 = 18;     // USB D- — Morse stream (USB-Serial-JTAG)
pub const PIN_USB_DP: i32 = 19;     // USB D+

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_ICM42670: u8 = 0x69; // AD0 pulled high
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_INPUT: usize = 4096;
pub const STACK_ENCODER: usize = 4096;

// ---------------------------------------------------------------------------
// Morse unit timing (milliseconds)
// ---------------------------------------------------------------------------
pub const DOT_MS: u64 = 150;

// ---------------------------------------------------------------------------
// Input classification
// ---------------------------------------------------------------------------
pub const SAMPLE_PERIOD_MS: u64 = 20;          // 50 Hz
pub const MOVE_THRESHOLD_G: f32 = 0.35;        // |a| above this on X/Y is a tilt
pub const STATIONARY_THRESHOLD_G: f32 = 0.1;   // per-axis tolerance at rest
pub const GRAVITY_BIAS_G: f32 = 1.0;           // Z reads +1 g when lying flat
pub const DEBOUNCE_MS: u64 = 2 * SAMPLE_PERIOD_MS;
pub const TILT_COOLDOWN_MS: u64 = DOT_MS;

// ---------------------------------------------------------------------------
// Buffers
// ---------------------------------------------------------------------------
pub const EVENT_QUEUE_CAPACITY: usize = 32;
pub const OUTPUT_BUFFER_CAPACITY: usize = 256; // includes the "  \n" terminator

// ---------------------------------------------------------------------------
// ICM-42670 Sensor Scale Factors
// ---------------------------------------------------------------------------
pub const ACCEL_SCALE_4G: f32 = 8192.0;   // LSB/g  at ±4 g
pub const GYRO_SCALE_500: f32 = 65.5;     // LSB/°/s at ±500 °/s
pub const TEMP_SCALE: f32 = 128.0;        // LSB/°C, offset 25 °C

/// Runtime tunables for the input classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierConfig {
    pub sample_period: Duration,
    pub move_threshold: f32,
    pub stationary_threshold: f32,
    pub gravity_bias: f32,
    /// How long the raw button level must hold before an edge counts.
    /// Zero accepts edges on the tick they appear.
    pub debounce: Duration,
    /// Minimum spacing between two tilt symbols.
    pub tilt_cooldown: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            sample_period: Duration::from_millis(SAMPLE_PERIOD_MS),
            move_threshold: MOVE_THRESHOLD_G,
            stationary_threshold: STATIONARY_THRESHOLD_G,
            gravity_bias: GRAVITY_BIAS_G,
            debounce: Duration::from_millis(DEBOUNCE_MS),
            tilt_cooldown: Duration::from_millis(TILT_COOLDOWN_MS),
        }
    }
}
