//! Equal input/output rates, a clamped copy.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	buffer::{SampleBuffer,clamp_sample},
	config::RateConfig,
	resampler::Resampler,
};

//---------------------------------------------------------------------------------------------------- Passthrough
/// The identity [`Resampler`], used when `ratio == 1.0`.
///
/// Pops `min(out.len(), occupancy)` samples and pads the rest with silence.
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq)]
pub struct Passthrough;

impl Resampler for Passthrough {
	fn new(rates: RateConfig) -> Self {
		debug_assert!(rates.is_identity());
		Self
	}

	#[inline]
	fn process(&mut self, buffer: &mut SampleBuffer, out: &mut [f32]) -> usize {
		let popped = buffer.read(out);
		for sample in &mut out[..popped] {
			*sample = clamp_sample(*sample);
		}
		popped
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use std::num::NonZeroUsize;

	fn passthrough() -> Passthrough {
		Passthrough::new(RateConfig::new(16_000, 16_000))
	}

	#[test]
	fn round_trip() {
		let mut buffer = SampleBuffer::new(NonZeroUsize::new(64).unwrap());
		let input: Vec<f32> = (0..48).map(|i| (i as f32 / 24.0) - 1.0).collect();
		buffer.write(&input);

		let mut out = vec![0.0; 48];
		assert_eq!(passthrough().process(&mut buffer, &mut out), 48);
		assert_eq!(out, input);
		assert!(buffer.is_empty());
	}

	#[test]
	fn clamps() {
		let mut buffer = SampleBuffer::new(NonZeroUsize::new(4).unwrap());
		buffer.write(&[1.5, -3.0, 0.5]);

		let mut out = [9.0; 5];
		assert_eq!(passthrough().process(&mut buffer, &mut out), 3);
		assert_eq!(out, [1.0, -1.0, 0.5, 0.0, 0.0]);
	}
}
