//! Resampler backends.
//!
//! Which backend is used is decided once from the [`RateConfig`],
//! equal rates get a plain copy, anything else is interpolated.

mod resampler;
pub use resampler::Resampler;

mod passthrough;
pub use passthrough::Passthrough;

mod linear;
pub use linear::Linear;

use crate::{buffer::SampleBuffer, config::RateConfig};

//---------------------------------------------------------------------------------------------------- ResamplerStruct
/// The resampler backend used by the [`crate::Processor`].
#[derive(Copy,Clone,Debug,PartialEq)]
pub(crate) enum ResamplerStruct {
	/// `ratio == 1.0`
	Passthrough(Passthrough),
	/// `ratio != 1.0`
	Linear(Linear),
}

impl ResamplerStruct {
	/// The name of the backend picked, for logging.
	pub(crate) const fn backend(&self) -> &'static str {
		match self {
			Self::Passthrough(_) => "passthrough",
			Self::Linear(_) => "linear",
		}
	}
}

impl Resampler for ResamplerStruct {
	fn new(rates: RateConfig) -> Self {
		if rates.is_identity() {
			Self::Passthrough(Passthrough::new(rates))
		} else {
			Self::Linear(Linear::new(rates))
		}
	}

	#[inline]
	fn process(&mut self, buffer: &mut SampleBuffer, out: &mut [f32]) -> usize {
		match self {
			Self::Passthrough(r) => r.process(buffer, out),
			Self::Linear(r) => r.process(buffer, out),
		}
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn backend_selection() {
		let r = ResamplerStruct::new(RateConfig::new(16_000, 16_000));
		assert_eq!(r.backend(), "passthrough");

		let r = ResamplerStruct::new(RateConfig::new(16_000, 48_000));
		assert_eq!(r.backend(), "linear");

		let r = ResamplerStruct::new(RateConfig::new(48_000, 44_100));
		assert_eq!(r.backend(), "linear");
	}
}
