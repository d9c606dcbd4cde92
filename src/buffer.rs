//! Fixed-capacity circular sample store.
//!
//! This is the jitter buffer proper. It is allocated once and
//! never grows, writes past capacity are dropped instead of
//! overwriting, reads past the end are padded with silence.

//---------------------------------------------------------------------------------------------------- use
use std::num::NonZeroUsize;

//---------------------------------------------------------------------------------------------------- Free functions
#[inline]
/// Clamp an output sample to `-1.0..=1.0`, `NaN` becomes silence.
pub(crate) fn clamp_sample(sample: f32) -> f32 {
	if sample.is_nan() {
		0.0
	} else {
		sample.clamp(-1.0, 1.0)
	}
}

//---------------------------------------------------------------------------------------------------- SampleBuffer
/// A fixed-capacity ring buffer of normalized mono samples.
///
/// ```rust
/// # use jitterbuf::SampleBuffer;
/// # use std::num::NonZeroUsize;
/// let mut buf = SampleBuffer::new(NonZeroUsize::new(4).unwrap());
///
/// // Excess input is dropped, not wrapped over.
/// assert_eq!(buf.write(&[0.1, 0.2, 0.3, 0.4, 0.5]), 4);
/// assert!(buf.is_full());
///
/// // Reading past the end pads with silence.
/// let mut out = [1.0; 6];
/// assert_eq!(buf.read(&mut out), 4);
/// assert_eq!(out, [0.1, 0.2, 0.3, 0.4, 0.0, 0.0]);
/// assert!(buf.is_empty());
/// ```
#[derive(Clone,Debug,PartialEq)]
pub struct SampleBuffer {
	storage: Box<[f32]>, // Allocated once in `new()`, never resized
	write_cursor: usize, // Next slot to write, `0..capacity`
	read_cursor: usize,  // Next slot to read, `0..capacity`
	occupancy: usize,    // Readable samples, `0..=capacity`
}

impl SampleBuffer {
	#[cold]
	#[must_use]
	/// Allocate a zeroed buffer holding `capacity` samples.
	///
	/// This is the only allocation this type ever does.
	pub fn new(capacity: NonZeroUsize) -> Self {
		Self {
			storage: vec![0.0; capacity.get()].into_boxed_slice(),
			write_cursor: 0,
			read_cursor: 0,
			occupancy: 0,
		}
	}

	//------------------------------------------ Getters
	#[inline]
	/// The fixed amount of samples this buffer can hold.
	pub fn capacity(&self) -> usize {
		self.storage.len()
	}

	#[inline]
	/// The amount of samples currently readable (the occupancy).
	pub fn len(&self) -> usize {
		self.occupancy
	}

	#[inline]
	/// `true` when there is nothing to read.
	pub fn is_empty(&self) -> bool {
		self.occupancy == 0
	}

	#[inline]
	/// `true` when the next write will be dropped.
	pub fn is_full(&self) -> bool {
		self.occupancy == self.capacity()
	}

	#[inline]
	/// The amount of samples that can still be written.
	pub fn free(&self) -> usize {
		self.capacity() - self.occupancy
	}

	#[inline]
	/// `occupancy / capacity`, `0.0..=1.0`.
	pub fn level(&self) -> f32 {
		self.occupancy as f32 / self.capacity() as f32
	}

	//------------------------------------------ Write
	/// Write as many `samples` as fit.
	///
	/// Returns how many were written, the rest are dropped.
	/// Non-finite samples are stored as silence.
	pub fn write(&mut self, samples: &[f32]) -> usize {
		self.extend(samples.iter().copied())
	}

	/// [`Self::write`] but from an iterator.
	///
	/// The iterator is not polled past the first sample that doesn't fit.
	pub(crate) fn extend<I>(&mut self, samples: I) -> usize
	where
		I: IntoIterator<Item = f32>,
	{
		let capacity = self.capacity();
		let free = self.free();

		let mut written = 0;
		for sample in samples.into_iter().take(free) {
			self.storage[self.write_cursor] = if sample.is_finite() { sample } else { 0.0 };
			self.write_cursor = (self.write_cursor + 1) % capacity;
			written += 1;
		}

		self.occupancy += written;
		debug_assert!(self.occupancy <= capacity);
		written
	}

	//------------------------------------------ Read
	/// Pop `out.len()` samples into `out`.
	///
	/// Positions past the buffered amount are filled with `0.0`.
	/// Popped slots are zeroed. Returns how many real samples were popped.
	pub fn read(&mut self, out: &mut [f32]) -> usize {
		let capacity = self.capacity();
		let popped = out.len().min(self.occupancy);

		let (real, pad) = out.split_at_mut(popped);
		for o in real {
			let slot = &mut self.storage[self.read_cursor];
			*o = *slot;
			*slot = 0.0;
			self.read_cursor = (self.read_cursor + 1) % capacity;
		}
		pad.fill(0.0);

		self.occupancy -= popped;
		popped
	}

	#[inline]
	/// Look at the sample `offset` positions past the read cursor.
	///
	/// Offsets at or past [`Self::len`] read as silence,
	/// never as stale data from a previous lap.
	pub fn peek(&self, offset: usize) -> f32 {
		if offset < self.occupancy {
			self.storage[(self.read_cursor + offset) % self.capacity()]
		} else {
			0.0
		}
	}

	/// Advance the read cursor by up to `count` samples without copying them.
	///
	/// Returns how many were actually consumed.
	pub fn consume(&mut self, count: usize) -> usize {
		let capacity = self.capacity();
		let consumed = count.min(self.occupancy);

		for _ in 0..consumed {
			self.storage[self.read_cursor] = 0.0;
			self.read_cursor = (self.read_cursor + 1) % capacity;
		}

		self.occupancy -= consumed;
		consumed
	}

	//------------------------------------------ Reset
	/// Zero every slot, the cursors and the occupancy.
	///
	/// The storage is reused, not reallocated.
	pub fn reset(&mut self) {
		self.storage.fill(0.0);
		self.write_cursor = 0;
		self.read_cursor = 0;
		self.occupancy = 0;
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn buf(capacity: usize) -> SampleBuffer {
		SampleBuffer::new(NonZeroUsize::new(capacity).unwrap())
	}

	#[test]
	fn read_empty_is_silence() {
		let mut b = buf(16);
		let mut out = [0.5; 8];
		assert_eq!(b.read(&mut out), 0);
		assert_eq!(out, [0.0; 8]);
		assert_eq!(b.len(), 0);
	}

	#[test]
	fn capacity_invariant() {
		let mut b = buf(10);
		let mut total = 0;
		for len in [3, 4, 5, 6] {
			total += b.write(&vec![0.25; len]);
			assert!(b.len() <= b.capacity());
		}
		assert_eq!(total, 10);
		assert!(b.is_full());
		assert_eq!(b.free(), 0);
		assert_eq!(b.write(&[1.0]), 0);
		assert_eq!(b.len(), 10);
	}

	#[test]
	fn overflow_does_not_overwrite() {
		let mut b = buf(3);
		assert_eq!(b.write(&[0.1, 0.2, 0.3, 0.9, 0.9]), 3);
		let mut out = [0.0; 3];
		b.read(&mut out);
		assert_eq!(out, [0.1, 0.2, 0.3]);
	}

	#[test]
	fn wraparound() {
		let mut b = buf(4);
		let mut out = [0.0; 3];

		b.write(&[0.1, 0.2, 0.3]);
		b.read(&mut out);
		assert_eq!(b.len(), 0);

		// Cursors are at 3, this write wraps.
		assert_eq!(b.write(&[0.4, 0.5, 0.6, 0.7]), 4);
		let mut out = [0.0; 4];
		assert_eq!(b.read(&mut out), 4);
		assert_eq!(out, [0.4, 0.5, 0.6, 0.7]);
	}

	#[test]
	fn read_zeroes_slots() {
		let mut b = buf(2);
		b.write(&[0.3, 0.4]);
		let mut out = [0.0; 2];
		b.read(&mut out);
		assert_eq!(b.storage.as_ref(), &[0.0, 0.0]);
	}

	#[test]
	fn partial_read_pads() {
		let mut b = buf(8);
		b.write(&[0.5, -0.5]);
		let mut out = [9.0; 5];
		assert_eq!(b.read(&mut out), 2);
		assert_eq!(out, [0.5, -0.5, 0.0, 0.0, 0.0]);
	}

	#[test]
	fn peek_and_consume() {
		let mut b = buf(4);
		b.write(&[0.1, 0.2]);
		b.consume(1);
		b.write(&[0.3, 0.4, 0.5]);

		// read_cursor == 1, data wraps around index 0.
		assert_eq!(b.peek(0), 0.2);
		assert_eq!(b.peek(3), 0.5);
		assert_eq!(b.peek(4), 0.0);
		assert_eq!(b.peek(100), 0.0);

		assert_eq!(b.consume(10), 4);
		assert!(b.is_empty());
		assert_eq!(b.peek(0), 0.0);
	}

	#[test]
	fn non_finite_is_silence() {
		let mut b = buf(3);
		b.write(&[f32::NAN, f32::INFINITY, 0.5]);
		let mut out = [1.0; 3];
		b.read(&mut out);
		assert_eq!(out, [0.0, 0.0, 0.5]);
	}

	#[test]
	fn reset() {
		let mut b = buf(4);
		b.write(&[0.1, 0.2, 0.3]);
		b.consume(1);
		b.reset();
		assert_eq!(b, buf(4));
		assert_eq!(b.level(), 0.0);
	}

	#[test]
	fn clamp() {
		assert_eq!(clamp_sample(1.5), 1.0);
		assert_eq!(clamp_sample(-1.5), -1.0);
		assert_eq!(clamp_sample(0.25), 0.25);
		assert_eq!(clamp_sample(f32::NAN), 0.0);
		assert_eq!(clamp_sample(f32::NEG_INFINITY), -1.0);
	}
}
