//! Linear interpolation resampling.
//!
//! Each output sample `i` maps to the fractional input position
//! `i / ratio` and is blended from its two neighbors. Positions
//! are offsets from the read cursor (nothing is popped while
//! interpolating), the input is consumed in bulk afterwards.
//!
//! The phase restarts at `0` every call, so a block that doesn't
//! divide evenly by the ratio rounds its consumption up.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	buffer::{SampleBuffer,clamp_sample},
	config::RateConfig,
	resampler::Resampler,
};

//---------------------------------------------------------------------------------------------------- Linear
/// Linear interpolation [`Resampler`], used when `ratio != 1.0`.
///
/// ```rust
/// # use jitterbuf::{Linear,Resampler,SampleBuffer,Config};
/// # use std::num::NonZeroUsize;
/// let rates = Config { input_sample_rate: 8_000, ..Config::DEFAULT }.validate(16_000).unwrap();
/// let mut linear = Linear::new(rates);
///
/// let mut buffer = SampleBuffer::new(NonZeroUsize::new(8).unwrap());
/// buffer.write(&[0.0, 1.0]);
///
/// let mut out = [0.0; 4];
/// linear.process(&mut buffer, &mut out);
/// assert_eq!(out, [0.0, 0.5, 1.0, 1.0]);
/// ```
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub struct Linear {
	// The position `i / ratio` is kept as the exact
	// fraction `i * input / output` so that it never
	// drifts, e.g. `3 / (16000 / 48000)` is not `9.0`
	// in floating point.
	input: u64,
	output: u64,
}

impl Linear {
	#[inline]
	/// `output / input` this resampler was created with.
	pub fn ratio(&self) -> f64 {
		self.output as f64 / self.input as f64
	}

	#[inline]
	/// How many input samples a block of `frames` outputs consumes at most.
	///
	/// This is `ceil(frames / ratio)`.
	pub fn input_len(&self, frames: usize) -> usize {
		let n = frames as u64 * self.input;
		usize::try_from((n + self.output - 1) / self.output).unwrap_or(usize::MAX)
	}
}

impl Resampler for Linear {
	fn new(rates: RateConfig) -> Self {
		Self {
			input: u64::from(rates.input()),
			output: u64::from(rates.output()),
		}
	}

	fn process(&mut self, buffer: &mut SampleBuffer, out: &mut [f32]) -> usize {
		let available = buffer.len();
		let output = self.output as f32;

		for (i, sample) in out.iter_mut().enumerate() {
			let position = i as u64 * self.input;
			let i0 = usize::try_from(position / self.output).unwrap_or(usize::MAX);

			*sample = if i0 < available {
				// Clamp the right neighbor to the last buffered
				// sample, never interpolate into the unknown.
				let i1 = (i0 + 1).min(available - 1);
				let frac = (position % self.output) as f32 / output;
				let s0 = buffer.peek(i0);
				let s1 = buffer.peek(i1);
				clamp_sample((1.0 - frac) * s0 + frac * s1)
			} else {
				0.0
			};
		}

		buffer.consume(self.input_len(out.len()))
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use std::num::NonZeroUsize;

	fn linear(input: u32, output: u32) -> Linear {
		Linear::new(RateConfig::new(input, output))
	}

	fn buffer(samples: &[f32]) -> SampleBuffer {
		let mut b = SampleBuffer::new(NonZeroUsize::new(4096).unwrap());
		b.write(samples);
		b
	}

	fn assert_close(a: &[f32], b: &[f32]) {
		assert_eq!(a.len(), b.len());
		for (x, y) in a.iter().zip(b) {
			assert!((x - y).abs() < 1e-6, "{a:?} != {b:?}");
		}
	}

	#[test]
	fn ratio_2() {
		let mut b = buffer(&[0.0, 1.0]);
		let mut out = [9.0; 4];
		let consumed = linear(8_000, 16_000).process(&mut b, &mut out);
		assert_close(&out, &[0.0, 0.5, 1.0, 1.0]);
		assert_eq!(consumed, 2);
		assert!(b.is_empty());
	}

	#[test]
	fn ratio_3_upsample() {
		// 16kHz -> 48kHz, the common radio -> soundcard case.
		let mut b = buffer(&[0.0, 0.3, 0.6, 0.9, 0.9]);
		let mut out = [0.0; 9];
		let consumed = linear(16_000, 48_000).process(&mut b, &mut out);
		assert_close(&out, &[0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8]);
		assert_eq!(consumed, 3);
		assert_eq!(b.len(), 2);
		assert_eq!(b.peek(0), 0.9);
	}

	#[test]
	fn downsample() {
		// 48kHz -> 16kHz, every 3rd sample.
		let input: Vec<f32> = (0..12).map(|i| i as f32 / 12.0).collect();
		let mut b = buffer(&input);
		let mut out = [0.0; 4];
		let consumed = linear(48_000, 16_000).process(&mut b, &mut out);
		assert_close(&out, &[input[0], input[3], input[6], input[9]]);
		assert_eq!(consumed, 12);
	}

	#[test]
	fn starved_is_silence() {
		let mut b = buffer(&[0.5]);
		let mut out = [9.0; 6];
		let consumed = linear(16_000, 48_000).process(&mut b, &mut out);
		// i0 == 0 for the first 3 outputs, both neighbors are the only sample.
		assert_close(&out, &[0.5, 0.5, 0.5, 0.0, 0.0, 0.0]);
		assert_eq!(consumed, 1);
	}

	#[test]
	fn empty_is_silence() {
		let mut b = buffer(&[]);
		let mut out = [9.0; 8];
		assert_eq!(linear(16_000, 44_100).process(&mut b, &mut out), 0);
		assert_eq!(out, [0.0; 8]);
	}

	#[test]
	fn clamps() {
		let mut b = buffer(&[2.0, -2.0]);
		let mut out = [0.0; 2];
		linear(8_000, 16_000).process(&mut b, &mut out);
		assert_close(&out, &[1.0, 0.0]);
	}

	#[test]
	fn consumption_rounds_up() {
		// 128 / (44100 / 16000) = 46.4
		let l = linear(16_000, 44_100);
		assert_eq!(l.input_len(128), 47);
		let l = linear(16_000, 48_000);
		assert_eq!(l.input_len(128), 43);
		assert_eq!(l.input_len(129), 43);
	}
}
