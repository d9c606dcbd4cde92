//! Construction-time configuration for the [`crate::Processor`].

mod config;
pub use config::{Config,RateConfig};

mod constants;
pub use constants::{
	DEFAULT_INPUT_SAMPLE_RATE,
	DEFAULT_BUFFER_CAPACITY,
	DEFAULT_READY_THRESHOLD,
	DEFAULT_FORCED_SILENCE_TICKS,
	DEFAULT_MESSAGE_CHANNEL_LEN,
	DEFAULT_STATUS_CHANNEL_LEN,
};
pub(crate) use constants::{
	DC_OFFSET_THRESHOLD,
	DC_OFFSET_CORRECTION,
	PCM_SCALE,
	LATENCY_LOG_PROBABILITY,
};
