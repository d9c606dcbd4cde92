//---------------------------------------------------------------------------------------------------- use
#[allow(unused_imports)] // docs
use crate::config::Config;

//---------------------------------------------------------------------------------------------------- Config Errors
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
/// Errors when validating a [`Config`]
pub enum ConfigError {
	#[error("input sample rate must be non-zero")]
	/// [`Config::input_sample_rate`] was `0`
	InvalidInputSampleRate,

	#[error("output sample rate must be non-zero")]
	/// The resolved output sample rate was `0`
	InvalidOutputSampleRate,

	#[error("buffer capacity must be non-zero")]
	/// [`Config::buffer_capacity`] was `0`
	ZeroCapacity,

	#[error("ready threshold ({threshold}) exceeds buffer capacity ({capacity})")]
	/// Playback would never start
	ThresholdExceedsCapacity {
		/// The configured ready threshold
		threshold: usize,
		/// The configured buffer capacity
		capacity: usize,
	},

	#[error("channel lengths must be non-zero")]
	/// A message or status channel length was `0`
	ZeroChannelLen,
}
