pub mod encoder;
pub mod input;
