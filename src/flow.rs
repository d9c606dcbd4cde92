//! Readiness / underrun state machine.
//!
//! Rendering whenever _any_ data is present sounds awful on
//! startup and right after a clear, so output is gated on:
//!
//! 1. a forced silence window after every clear
//! 2. the buffer having primed to `ready_threshold` once
//! 3. a full block's worth of samples being available
//!
//! Silence is always a legal output, so every "no" here is safe.

//---------------------------------------------------------------------------------------------------- FlowState
/// Has playback started?
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq,Hash)]
pub enum FlowState {
	#[default]
	/// Waiting for the buffer to reach the ready threshold.
	Priming,
	/// Playing. Only a clear goes back to [`FlowState::Priming`].
	Ready,
}

//---------------------------------------------------------------------------------------------------- Decision
/// What a render tick should do.
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash)]
pub enum Decision {
	/// Inside the post-clear window, output silence and stay quiet.
	ForcedSilence,
	/// Priming or not enough samples, output silence and report it.
	Underrun,
	/// Run the resampler.
	Render,
}

//---------------------------------------------------------------------------------------------------- FlowController
/// The per-tick go/no-go gate in front of the resampler.
///
/// ```rust
/// # use jitterbuf::{FlowController,FlowState,Decision};
/// let mut flow = FlowController::new(4, 2);
/// assert_eq!(flow.decide(3, 2), Decision::Underrun);
///
/// assert!(flow.on_ingest(4));
/// assert_eq!(flow.state(), FlowState::Ready);
/// assert_eq!(flow.decide(4, 2), Decision::Render);
///
/// flow.clear();
/// assert_eq!(flow.decide(100, 2), Decision::ForcedSilence);
/// assert_eq!(flow.decide(100, 2), Decision::ForcedSilence);
/// assert_eq!(flow.decide(100, 2), Decision::Underrun); // priming again
/// ```
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub struct FlowController {
	state: FlowState,
	forced_silence: usize,
	ready_threshold: usize,
	forced_silence_ticks: usize,
}

impl FlowController {
	#[must_use]
	/// Start in [`FlowState::Priming`] with no forced silence.
	pub const fn new(ready_threshold: usize, forced_silence_ticks: usize) -> Self {
		Self {
			state: FlowState::Priming,
			forced_silence: 0,
			ready_threshold,
			forced_silence_ticks,
		}
	}

	#[inline]
	/// The current [`FlowState`].
	pub const fn state(&self) -> FlowState {
		self.state
	}

	#[inline]
	/// `true` if [`FlowState::Ready`].
	pub const fn is_ready(&self) -> bool {
		matches!(self.state, FlowState::Ready)
	}

	#[inline]
	/// Render ticks left in the forced silence window.
	pub const fn forced_silence(&self) -> usize {
		self.forced_silence
	}

	/// Report the occupancy after an ingest.
	///
	/// Returns `true` only on the `Priming -> Ready` transition.
	pub fn on_ingest(&mut self, occupancy: usize) -> bool {
		if self.state == FlowState::Priming && occupancy >= self.ready_threshold {
			self.state = FlowState::Ready;
			true
		} else {
			false
		}
	}

	/// The buffer was cleared: back to priming, start the silence window.
	pub fn clear(&mut self) {
		self.state = FlowState::Priming;
		self.forced_silence = self.forced_silence_ticks;
	}

	/// Decide this tick's output for `frames` wanted samples.
	///
	/// This must be called exactly once per render tick,
	/// it counts down the forced silence window.
	pub fn decide(&mut self, occupancy: usize, frames: usize) -> Decision {
		if self.forced_silence > 0 {
			self.forced_silence -= 1;
			Decision::ForcedSilence
		} else if self.state == FlowState::Priming || occupancy < frames {
			Decision::Underrun
		} else {
			Decision::Render
		}
	}
}
