//! Atomic state.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	atomic::AtomicF32,
	buffer::SampleBuffer,
	flow::FlowController,
	state::Stats,
};
use std::sync::atomic::{AtomicBool,AtomicU64,AtomicUsize,Ordering};

//---------------------------------------------------------------------------------------------------- AtomicState
/// State shared between the render side and everybody else.
///
/// The render side is the only writer of the gauges
/// (`occupancy`, `level`, `ready`, `forced_silence`),
/// the counters may be bumped from either side.
///
/// Readers get an eventually consistent view, fields
/// are not updated together as one transaction.
#[derive(Debug)]
pub(crate) struct AtomicState {
	/// Fixed buffer capacity.
	pub(crate) capacity: usize,
	/// Fixed input sample rate, for latency.
	pub(crate) input_sample_rate: u32,

	//--- Gauges
	/// Buffered samples after the last tick/ingest.
	pub(crate) occupancy: AtomicUsize,
	/// `occupancy / capacity` after the last tick/ingest.
	pub(crate) level: AtomicF32,
	/// `FlowState::Ready`?
	pub(crate) ready: AtomicBool,
	/// Ticks left in the forced silence window.
	pub(crate) forced_silence: AtomicUsize,

	//--- Counters
	/// Render ticks run.
	pub(crate) ticks: AtomicU64,
	/// Render ticks that output silence due to lack of samples.
	pub(crate) underruns: AtomicU64,
	/// Blocks that were (partially) dropped.
	pub(crate) overruns: AtomicU64,
	/// Total samples dropped by overruns.
	pub(crate) dropped_samples: AtomicU64,
	/// Blocks that made it into the buffer.
	pub(crate) blocks: AtomicU64,
	/// Clears applied.
	pub(crate) clears: AtomicU64,

	//--- Flags
	/// `Input` dropped a block, the render side owes a `BufferFull`.
	pub(crate) full_pending: AtomicBool,
}

impl AtomicState {
	/// Everything zeroed, priming.
	pub(crate) const fn new(capacity: usize, input_sample_rate: u32) -> Self {
		Self {
			capacity,
			input_sample_rate,
			occupancy: AtomicUsize::new(0),
			level: AtomicF32::ZERO,
			ready: AtomicBool::new(false),
			forced_silence: AtomicUsize::new(0),
			ticks: AtomicU64::new(0),
			underruns: AtomicU64::new(0),
			overruns: AtomicU64::new(0),
			dropped_samples: AtomicU64::new(0),
			blocks: AtomicU64::new(0),
			clears: AtomicU64::new(0),
			full_pending: AtomicBool::new(false),
		}
	}

	#[inline]
	/// Publish the render side's gauges.
	pub(crate) fn publish(&self, buffer: &SampleBuffer, flow: &FlowController) {
		self.occupancy.store(buffer.len(), Ordering::Release);
		self.level.set(buffer.level());
		self.ready.store(flow.is_ready(), Ordering::Release);
		self.forced_silence.store(flow.forced_silence(), Ordering::Release);
	}

	#[inline]
	/// Count one overrun of `dropped` samples.
	pub(crate) fn overrun(&self, dropped: usize) {
		self.overruns.fetch_add(1, Ordering::Relaxed);
		self.dropped_samples.fetch_add(dropped as u64, Ordering::Relaxed);
	}

	#[inline]
	/// Count an overrun that happened before the render side saw the block,
	/// and ask it to report `BufferFull` on its next tick.
	pub(crate) fn overrun_pending(&self, dropped: usize) {
		self.overrun(dropped);
		self.full_pending.store(true, Ordering::Release);
	}

	#[inline]
	/// Was there an [`Self::overrun_pending`] since the last call?
	pub(crate) fn take_full_pending(&self) -> bool {
		self.full_pending.swap(false, Ordering::AcqRel)
	}

	#[inline]
	/// Bump a counter.
	pub(crate) fn bump(counter: &AtomicU64) {
		counter.fetch_add(1, Ordering::Relaxed);
	}

	/// Read everything into a [`Stats`].
	pub(crate) fn snapshot(&self) -> Stats {
		Stats {
			capacity:          self.capacity,
			input_sample_rate: self.input_sample_rate,
			occupancy:         self.occupancy.load(Ordering::Acquire),
			level:             self.level.get(),
			ready:             self.ready.load(Ordering::Acquire),
			forced_silence:    self.forced_silence.load(Ordering::Acquire),
			ticks:             self.ticks.load(Ordering::Relaxed),
			underruns:         self.underruns.load(Ordering::Relaxed),
			overruns:          self.overruns.load(Ordering::Relaxed),
			dropped_samples:   self.dropped_samples.load(Ordering::Relaxed),
			blocks:            self.blocks.load(Ordering::Relaxed),
			clears:            self.clears.load(Ordering::Relaxed),
		}
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use std::num::NonZeroUsize;

	#[test]
	fn new_is_zeroed() {
		let s = AtomicState::new(4096, 16_000).snapshot();
		assert_eq!(s, Stats {
			capacity: 4096,
			input_sample_rate: 16_000,
			..Stats::default()
		});
	}

	#[test]
	fn publish() {
		let state = AtomicState::new(8, 16_000);
		let mut buffer = SampleBuffer::new(NonZeroUsize::new(8).unwrap());
		let mut flow = FlowController::new(4, 3);

		buffer.write(&[0.0; 6]);
		flow.on_ingest(buffer.len());
		flow.clear();
		state.publish(&buffer, &flow);

		let s = state.snapshot();
		assert_eq!(s.occupancy, 6);
		assert_eq!(s.level, 0.75);
		assert!(!s.ready);
		assert_eq!(s.forced_silence, 3);
	}

	#[test]
	fn counters() {
		let state = AtomicState::new(8, 16_000);
		state.overrun(10);
		state.overrun(5);
		AtomicState::bump(&state.clears);
		let s = state.snapshot();
		assert_eq!(s.overruns, 2);
		assert_eq!(s.dropped_samples, 15);
		assert_eq!(s.clears, 1);
	}

	#[test]
	fn full_pending_is_taken_once() {
		let state = AtomicState::new(8, 16_000);
		assert!(!state.take_full_pending());

		state.overrun_pending(3);
		state.overrun_pending(4);
		assert!(state.take_full_pending());
		assert!(!state.take_full_pending());

		let s = state.snapshot();
		assert_eq!(s.overruns, 2);
		assert_eq!(s.dropped_samples, 7);
	}
}
