// Audio resampling
//
// This file defines the `Resampler` trait.
//
// A resampler pulls samples out of the `SampleBuffer` at
// the input rate and writes exactly `out.len()` samples at
// the output rate.
//
// `process()` is called from the real-time render path, so it
// must not allocate, block, or fail. Running out of input is
// not an error, it is silence.

//----------------------------------------------------------------------------------------------- use
use crate::{buffer::SampleBuffer, config::RateConfig};

//----------------------------------------------------------------------------------------------- Resampler
/// Converts buffered input-rate samples into output-rate samples.
pub trait Resampler
where
	Self: Sized,
{
	/// Create a new [`Resampler`] for these rates.
	///
	/// The ratio is fixed for the resampler's lifetime.
	fn new(rates: RateConfig) -> Self;

	/// Fill all of `out`, consuming input from `buffer`.
	///
	/// Every output sample is within `-1.0..=1.0`.
	/// Positions without enough input are `0.0`.
	///
	/// Returns how many input samples were consumed.
	fn process(&mut self, buffer: &mut SampleBuffer, out: &mut [f32]) -> usize;
}
