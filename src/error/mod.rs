//! Errors that can occur outside of the render path.
//!
//! The render path itself has no errors, every anomaly
//! there degrades to silence plus a [`crate::Status`].

mod config;
pub use config::ConfigError;

mod send;
pub use send::SendError;

#[cfg(feature = "cpal")]
mod output;
#[cfg(feature = "cpal")]
pub use output::OutputError;
