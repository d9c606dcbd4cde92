//! Construction-time configuration.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	config::constants::{
		DEFAULT_INPUT_SAMPLE_RATE,
		DEFAULT_BUFFER_CAPACITY,
		DEFAULT_READY_THRESHOLD,
		DEFAULT_FORCED_SILENCE_TICKS,
		DEFAULT_MESSAGE_CHANNEL_LEN,
		DEFAULT_STATUS_CHANNEL_LEN,
	},
	error::ConfigError,
};

#[allow(unused_imports)] // docs
use crate::{Processor,Input};

//---------------------------------------------------------------------------------------------------- Config
/// Configuration for a [`Processor`] and its [`Input`].
///
/// This configuration is passed once and used for the
/// rest of the processor's lifetime, nothing here can be
/// changed after construction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub struct Config {
	//------------------------------------------ Rates
	/// The sample rate of the incoming PCM blocks.
	pub input_sample_rate: u32,

	/// The sample rate the output is rendered at.
	///
	/// `None` means "whatever the audio device runs at",
	/// which gets resolved by [`Config::validate`].
	pub output_sample_rate: Option<u32>,

	//------------------------------------------ Buffer
	/// How many samples the ring buffer holds.
	///
	/// The buffer is allocated once with this length.
	pub buffer_capacity: usize,

	/// How many samples must be buffered before
	/// the first non-silent render tick.
	///
	/// Must not be greater than `buffer_capacity`.
	pub ready_threshold: usize,

	/// How many render ticks are unconditionally
	/// silent after a [`crate::Command::ClearBuffer`].
	pub forced_silence_ticks: usize,

	//------------------------------------------ Channels
	/// How many unprocessed messages the [`Input`]
	/// can queue before sends start failing.
	pub message_channel_len: usize,

	/// Bound of the status channel created by [`crate::init`].
	pub status_channel_len: usize,

	//------------------------------------------ Logging
	/// Log rates, transitions and (sampled) buffer latency.
	///
	/// This only has an effect with the `log` feature.
	pub debug_logging: bool,
}

//---------------------------------------------------------------------------------------------------- Config Impl
impl Config {
	/// A reasonable default [`Config`].
	///
	/// ```rust
	/// # use jitterbuf::Config;
	/// Config {
	///     input_sample_rate:    16_000,
	///     output_sample_rate:   None,
	///     buffer_capacity:      4096,
	///     ready_threshold:      1536,
	///     forced_silence_ticks: 30,
	///     message_channel_len:  64,
	///     status_channel_len:   256,
	///     debug_logging:        false,
	/// };
	/// ```
	pub const DEFAULT: Self = Self {
		input_sample_rate:    DEFAULT_INPUT_SAMPLE_RATE,
		output_sample_rate:   None,
		buffer_capacity:      DEFAULT_BUFFER_CAPACITY,
		ready_threshold:      DEFAULT_READY_THRESHOLD,
		forced_silence_ticks: DEFAULT_FORCED_SILENCE_TICKS,
		message_channel_len:  DEFAULT_MESSAGE_CHANNEL_LEN,
		status_channel_len:   DEFAULT_STATUS_CHANNEL_LEN,
		debug_logging:        false,
	};

	/// Check this configuration and resolve the output rate.
	///
	/// `device_sample_rate` is used if `output_sample_rate` is `None`.
	///
	/// # Errors
	/// - Zero input or output sample rate
	/// - Zero buffer capacity
	/// - `ready_threshold` greater than `buffer_capacity`
	/// - Zero channel lengths
	pub fn validate(&self, device_sample_rate: u32) -> Result<RateConfig, ConfigError> {
		let output_sample_rate = self.output_sample_rate.unwrap_or(device_sample_rate);

		if self.input_sample_rate == 0 {
			return Err(ConfigError::InvalidInputSampleRate);
		}
		if output_sample_rate == 0 {
			return Err(ConfigError::InvalidOutputSampleRate);
		}
		if self.buffer_capacity == 0 {
			return Err(ConfigError::ZeroCapacity);
		}
		if self.ready_threshold > self.buffer_capacity {
			return Err(ConfigError::ThresholdExceedsCapacity {
				threshold: self.ready_threshold,
				capacity: self.buffer_capacity,
			});
		}
		if self.message_channel_len == 0 || self.status_channel_len == 0 {
			return Err(ConfigError::ZeroChannelLen);
		}

		Ok(RateConfig::new(self.input_sample_rate, output_sample_rate))
	}
}

impl Default for Config {
	fn default() -> Self {
		Self::DEFAULT
	}
}

//---------------------------------------------------------------------------------------------------- RateConfig
/// The resolved input/output sample rates.
///
/// The ratio is derived once here and never re-derived
/// from timing, this is what keeps the pitch stable.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct RateConfig {
	input: u32,
	output: u32,
	ratio: f64,
}

impl RateConfig {
	/// Both rates must be non-zero, see [`Config::validate`].
	pub(crate) fn new(input: u32, output: u32) -> Self {
		debug_assert!(input != 0 && output != 0);
		Self {
			input,
			output,
			ratio: f64::from(output) / f64::from(input),
		}
	}

	#[inline]
	/// The input sample rate.
	pub const fn input(&self) -> u32 {
		self.input
	}

	#[inline]
	/// The output sample rate.
	pub const fn output(&self) -> u32 {
		self.output
	}

	#[inline]
	/// `output / input`.
	///
	/// This is how many output samples each input sample turns into.
	pub fn ratio(&self) -> f64 {
		self.ratio
	}

	#[inline]
	/// No conversion needed?
	pub fn is_identity(&self) -> bool {
		self.input == self.output
	}
}
