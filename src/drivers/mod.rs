pub mod button;
pub mod imu;
pub mod usb_serial;
