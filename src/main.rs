// MorseWatch — Firmware Entry Point
//
// Boot sequence:
//   1. Initialise logging and take the peripherals.
//   2. Configure the gap button and the shared I2C bus.
//   3. Probe and initialise the ICM-42670.  A failure is reported once and
//      the watch keeps running with button framing only.
//   4. Open the USB-Serial-JTAG port and create the event queue.
//   5. Spawn the input and encoder tasks.
//
// The Morse stream goes out on USB-Serial-JTAG only.  ESP-IDF's console,
// and with it every log line, stays on UART0 (sdkconfig.defaults).
//
// Peripheral fields are typed per pin, so the pins are picked by name
// below; each one is annotated with the config constant that records it.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::gpio::{InputPin, PinDriver};
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::prelude::*;
    use esp_idf_hal::usb_serial::{config::Config as UsbSerialConfig, UsbSerialDriver};

    use morsewatch::config::*;
    use morsewatch::drivers::button::Button;
    use morsewatch::drivers::imu::Icm42670;
    use morsewatch::encoder::MorseEncoder;
    use morsewatch::queue::event_queue;
    use morsewatch::serial::MorsePort;
    use morsewatch::tasks;

    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("MorseWatch firmware starting…");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;

    // Gap button (pull-up, active LOW).
    let button = Button::new(PinDriver::input(
        peripherals.pins.gpio3.downgrade_input(), // PIN_BUTTON
    )?)?;

    // ---- I2C bus ----------------------------------------------------------
    let i2c_config = I2cConfig::new().baudrate(400u32.kHz().into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio6, // PIN_I2C_SDA
        peripherals.pins.gpio7, // PIN_I2C_SCL
        &i2c_config,
    )?;
    // Firmware never exits, so the bus can live for the rest of the programme.
    let i2c_bus: &'static Mutex<I2cDriver<'static>> = Box::leak(Box::new(Mutex::new(i2c)));

    // ---- IMU self-test ----------------------------------------------------
    let imu = Icm42670::new(i2c_bus);
    if !imu.is_connected() {
        log::error!(
            "ICM-42670 not found at 0x{:02x}, tilt input disabled",
            I2C_ADDR_ICM42670
        );
    } else if let Err(e) = imu.init() {
        log::error!("ICM-42670 init failed, tilt input disabled: {}", e);
    }
    // Continue anyway: gaps and end-of-message only need the button.

    // ---- Morse port -------------------------------------------------------
    let usb_serial = UsbSerialDriver::new(
        peripherals.usb_serial,
        peripherals.pins.gpio18, // PIN_USB_DM
        peripherals.pins.gpio19, // PIN_USB_DP
        &UsbSerialConfig::new(),
    )?;
    let morse_port = MorsePort::new(usb_serial);

    // ---- Event queue ------------------------------------------------------
    let (events_tx, events_rx) = event_queue(EVENT_QUEUE_CAPACITY);

    // ---- Spawn tasks (map to FreeRTOS tasks via std::thread) ---------------
    thread::Builder::new()
        .name("input".into())
        .stack_size(STACK_INPUT)
        .spawn(move || {
            tasks::input::input_task(imu, button, ClassifierConfig::default(), events_tx);
        })?;

    thread::Builder::new()
        .name("encoder".into())
        .stack_size(STACK_ENCODER)
        .spawn(move || {
            let encoder: MorseEncoder = MorseEncoder::new();
            tasks::encoder::encoder_task(events_rx, encoder, morse_port);
        })?;

    log::info!(
        "Boot complete, keying on GPIO{} and the IMU (SDA GPIO{}, SCL GPIO{}), Morse out on USB-Serial-JTAG",
        PIN_BUTTON,
        PIN_I2C_SDA,
        PIN_I2C_SCL
    );

    // Main thread has nothing left to do; park it forever.
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("morsewatch is ESP32-C3 firmware; build it for riscv32imc-esp-espidf");
    std::process::exit(1);
}
