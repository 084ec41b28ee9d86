// MorseWatch — USB-Serial-JTAG transport
//
// Carries the Morse stream on the C3's native USB port.  The log console
// stays on UART0 (see sdkconfig.defaults).

use esp_idf_hal::delay::BLOCK;
use esp_idf_hal::usb_serial::UsbSerialDriver;
use esp_idf_sys::EspError;

use crate::hal::SerialTx;

impl SerialTx for UsbSerialDriver<'_> {
    type Error = EspError;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<usize, EspError> {
        self.write(bytes, BLOCK)
    }
}
