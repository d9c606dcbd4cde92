//! Default configuration values.

//---------------------------------------------------------------------------------------------------- Constants
/// The sample rate decoded audio arrives at.
///
/// The radio side decimates down to this before sending.
pub const DEFAULT_INPUT_SAMPLE_RATE: u32 = 16_000;

/// The amount of samples the ring buffer holds.
///
/// ~256ms at 16kHz.
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// The amount of buffered samples required before playback starts.
///
/// ~96ms at 16kHz.
pub const DEFAULT_READY_THRESHOLD: usize = 1536;

/// How many render ticks are forced silent after a clear.
///
/// At 128 frame blocks and 48kHz this is ~80ms,
/// at larger device blocks it stretches to ~300ms.
pub const DEFAULT_FORCED_SILENCE_TICKS: usize = 30;

/// Bound of the `Input` -> `Processor` message channel.
pub const DEFAULT_MESSAGE_CHANNEL_LEN: usize = 64;

/// Bound of the default status channel.
pub const DEFAULT_STATUS_CHANNEL_LEN: usize = 256;

/// Integer units of DC offset a block's mean must exceed to be corrected.
pub(crate) const DC_OFFSET_THRESHOLD: f64 = 100.0;

/// Fraction of the measured DC offset that gets removed.
///
/// Full removal overshoots on short blocks.
pub(crate) const DC_OFFSET_CORRECTION: f64 = 0.5;

/// The `i16` -> `f32` normalization divisor.
pub(crate) const PCM_SCALE: f32 = 32768.0;

/// Chance per render tick of logging the buffer latency (with `debug_logging`).
pub(crate) const LATENCY_LOG_PROBABILITY: f64 = 0.01;

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ready_threshold_fits() {
		assert!(DEFAULT_READY_THRESHOLD <= DEFAULT_BUFFER_CAPACITY);
	}

	#[test]
	fn ready_threshold_millis() {
		let ms = DEFAULT_READY_THRESHOLD as f32 / DEFAULT_INPUT_SAMPLE_RATE as f32 * 1000.0;
		assert_eq!(ms, 96.0);
	}

	#[test]
	fn pcm_scale() {
		assert_eq!(i16::MIN as f32 / PCM_SCALE, -1.0);
		assert!(i16::MAX as f32 / PCM_SCALE < 1.0);
	}
}
