//! Audio hardware output.
//!
//! Drives a [`crate::Processor`] from the default
//! output device's callback, using `cpal`.

mod cpal;
pub use self::cpal::CpalOutput;
