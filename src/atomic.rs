// An AtomicF32 implementation.
//
// This internally uses [AtomicU32], where the
// u32 is the bit pattern of the internal float.
//
// [.to_bits()] and [from_bits()] convert between
// the actual float and the stored representation.

//---------------------------------------------------------------------------------------------------- Use
use std::sync::atomic::{AtomicU32,Ordering};

//---------------------------------------------------------------------------------------------------- AtomicF32
/// Lock-free `f32` cell, used to publish the buffer
/// fill level from the render thread.
pub(crate) struct AtomicF32(AtomicU32);

impl AtomicF32 {
	/// `0.0` has an all-zero bit pattern.
	#[allow(clippy::declare_interior_mutable_const)]
	pub(crate) const ZERO: Self = Self(AtomicU32::new(0));

	#[inline]
	pub(crate) fn store(&self, f: f32, ordering: Ordering) {
		self.0.store(f.to_bits(), ordering);
	}

	#[inline]
	pub(crate) fn load(&self, ordering: Ordering) -> f32 {
		f32::from_bits(self.0.load(ordering))
	}

	#[inline]
	pub(crate) fn set(&self, f: f32) {
		self.store(f, Ordering::Release);
	}

	#[inline]
	pub(crate) fn get(&self) -> f32 {
		self.load(Ordering::Acquire)
	}
}

impl std::fmt::Debug for AtomicF32 {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("AtomicF32")
			.field(&self.get())
			.finish()
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn zero() {
		assert_eq!(AtomicF32::ZERO.get(), 0.0);
		assert_eq!(0.0_f32.to_bits(), 0);
	}

	#[test]
	fn fill_levels() {
		let f = AtomicF32::ZERO;
		for occupancy in 0..=4096_usize {
			let level = occupancy as f32 / 4096.0;
			f.set(level);
			assert_eq!(f.get(), level);
		}
	}
}
