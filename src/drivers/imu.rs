// MorseWatch — ICM-42670 IMU Driver
//
// Register-level driver over the shared I2C bus.

use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use esp_idf_hal::i2c::I2cDriver;

use crate::config::*;
use crate::events::MotionSample;
use crate::hal::MotionSensor;

/// Thread-safe handle to a shared I2C bus.
pub type SharedBus = &'static Mutex<I2cDriver<'static>>;

// ICM-42670 register addresses (bank 0)
const REG_TEMP_DATA1: u8 = 0x09; // Start of 14-byte sensor burst
const REG_PWR_MGMT0: u8 = 0x1F;
const REG_GYRO_CONFIG0: u8 = 0x20;
const REG_ACCEL_CONFIG0: u8 = 0x21;
const REG_WHO_AM_I: u8 = 0x75;
const WHO_AM_I_EXPECTED: u8 = 0x67;

const PWR_ACCEL_GYRO_LN: u8 = 0x0F;  // both sensors in low-noise mode
const GYRO_500DPS_100HZ: u8 = 0x49;  // FS_SEL=010, ODR=1001
const ACCEL_4G_100HZ: u8 = 0x49;     // FS_SEL=010, ODR=1001

pub struct Icm42670 {
    bus: SharedBus,
}

impl Icm42670 {
    pub fn new(bus: SharedBus) -> Self {
        Self { bus }
    }

    fn bus(&self) -> anyhow::Result<MutexGuard<'_, I2cDriver<'static>>> {
        self.bus
            .lock()
            .map_err(|_| anyhow::anyhow!("I2C bus lock poisoned"))
    }

    /// Verify the device answers with the expected WHO_AM_I.
    pub fn is_connected(&self) -> bool {
        let Ok(mut bus) = self.bus() else {
            return false;
        };
        let mut buf = [0u8; 1];
        match bus.write_read(I2C_ADDR_ICM42670, &[REG_WHO_AM_I], &mut buf, I2C_TIMEOUT_TICKS) {
            Ok(()) => buf[0] == WHO_AM_I_EXPECTED,
            Err(_) => false,
        }
    }

    /// Power up accel (±4 g) and gyro (±500 °/s), both at 100 Hz.
    pub fn init(&self) -> anyhow::Result<()> {
        let mut bus = self.bus()?;

        bus.write(I2C_ADDR_ICM42670, &[REG_PWR_MGMT0, PWR_ACCEL_GYRO_LN], I2C_TIMEOUT_TICKS)?;
        // No register writes for 200 µs after a power mode change.
        thread::sleep(Duration::from_millis(1));

        bus.write(I2C_ADDR_ICM42670, &[REG_GYRO_CONFIG0, GYRO_500DPS_100HZ], I2C_TIMEOUT_TICKS)?;
        bus.write(I2C_ADDR_ICM42670, &[REG_ACCEL_CONFIG0, ACCEL_4G_100HZ], I2C_TIMEOUT_TICKS)?;

        log::info!("ICM-42670 initialised (±4g, ±500°/s, 100Hz)");
        Ok(())
    }

    /// Burst-read temperature, accel and gyro and convert to physical units.
    pub fn read_data(&self) -> anyhow::Result<MotionSample> {
        let mut bus = self.bus()?;
        let mut raw = [0u8; 14];
        bus.write_read(I2C_ADDR_ICM42670, &[REG_TEMP_DATA1], &mut raw, I2C_TIMEOUT_TICKS)?;

        let word = |i: usize| i16::from_be_bytes([raw[i], raw[i + 1]]) as f32;
        Ok(MotionSample {
            temp: word(0) / TEMP_SCALE + 25.0,
            ax: word(2) / ACCEL_SCALE_4G,
            ay: word(4) / ACCEL_SCALE_4G,
            az: word(6) / ACCEL_SCALE_4G,
            gx: word(8) / GYRO_SCALE_500,
            gy: word(10) / GYRO_SCALE_500,
            gz: word(12) / GYRO_SCALE_500,
        })
    }
}

impl MotionSensor for Icm42670 {
    fn read_motion(&mut self) -> anyhow::Result<MotionSample> {
        self.read_data()
    }
}
