//---------------------------------------------------------------------------------------------------- Use
use std::time::Duration;

//---------------------------------------------------------------------------------------------------- Stats
/// A snapshot of the processor's state and counters.
///
/// Obtained with [`crate::Input::stats`] or [`crate::Processor::stats`].
///
/// The gauges are whatever the render side last published,
/// they may lag behind the real buffer by a tick.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[derive(Copy,Clone,Debug,Default,PartialEq)]
pub struct Stats {
	/// Fixed sample buffer capacity.
	pub capacity: usize,
	/// Fixed input sample rate.
	pub input_sample_rate: u32,
	/// Buffered samples.
	pub occupancy: usize,
	/// `occupancy / capacity`.
	pub level: f32,
	/// Has playback started (and not been cleared since)?
	pub ready: bool,
	/// Render ticks left in the post-clear silence window.
	pub forced_silence: usize,
	/// Render ticks run.
	pub ticks: u64,
	/// Render ticks that were silent due to lack of samples.
	pub underruns: u64,
	/// PCM blocks that were fully or partially dropped.
	pub overruns: u64,
	/// Samples lost to overruns.
	pub dropped_samples: u64,
	/// PCM blocks that made it (at least partially) into the buffer.
	pub blocks: u64,
	/// Clears applied.
	pub clears: u64,
}

impl Stats {
	/// How long the buffered samples take to play out.
	///
	/// ```rust
	/// # use jitterbuf::Stats;
	/// # use std::time::Duration;
	/// let stats = Stats { occupancy: 1600, input_sample_rate: 16_000, ..Default::default() };
	/// assert_eq!(stats.latency(), Duration::from_millis(100));
	/// ```
	pub fn latency(&self) -> Duration {
		if self.input_sample_rate == 0 {
			return Duration::ZERO;
		}
		Duration::from_secs_f64(self.occupancy as f64 / f64::from(self.input_sample_rate))
	}
}
