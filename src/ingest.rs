//! PCM ingest: `i16` blocks into normalized `f32` samples.
//!
//! Capacity control and the status events that go with it
//! live in [`crate::Processor`], this file is the pure part.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	buffer::clamp_sample,
	config::{DC_OFFSET_THRESHOLD,DC_OFFSET_CORRECTION,PCM_SCALE},
};

//---------------------------------------------------------------------------------------------------- BlockStats
/// Statistics of one raw PCM block.
///
/// ```rust
/// # use jitterbuf::BlockStats;
/// let stats = BlockStats::analyze(&[-300, 100, 500]);
/// assert_eq!(stats.min, -300);
/// assert_eq!(stats.max, 500);
/// assert_eq!(stats.mean, 100.0);
///
/// // Exactly 100 is not "significant" yet.
/// assert!(!stats.is_dc_corrected());
/// ```
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct BlockStats {
	/// Amount of samples in the block.
	pub len: usize,
	/// Lowest sample, `0` for an empty block.
	pub min: i16,
	/// Highest sample, `0` for an empty block.
	pub max: i16,
	/// Mean sample value in integer units, `0.0` for an empty block.
	pub mean: f64,
}

impl BlockStats {
	/// Compute `min`, `max` and `mean` in one pass.
	pub fn analyze(pcm: &[i16]) -> Self {
		Self::from_samples(pcm.iter().copied())
	}

	/// [`Self::analyze`] but from an iterator.
	pub(crate) fn from_samples<I>(pcm: I) -> Self
	where
		I: Iterator<Item = i16>,
	{
		let mut len = 0_usize;
		let mut min = i16::MAX;
		let mut max = i16::MIN;
		let mut sum: i64 = 0;
		for s in pcm {
			len += 1;
			min = min.min(s);
			max = max.max(s);
			sum += i64::from(s);
		}

		if len == 0 {
			return Self { len: 0, min: 0, max: 0, mean: 0.0 };
		}

		Self {
			len,
			min,
			max,
			mean: sum as f64 / len as f64,
		}
	}

	#[inline]
	/// Is the DC offset large enough to be (partially) removed?
	pub fn is_dc_corrected(&self) -> bool {
		self.mean.abs() > DC_OFFSET_THRESHOLD
	}

	#[inline]
	/// The offset subtracted from every normalized sample.
	///
	/// Half the measured mean, or `0.0` when the mean is not significant.
	pub fn dc_offset(&self) -> f32 {
		if self.is_dc_corrected() {
			(DC_OFFSET_CORRECTION * self.mean / f64::from(PCM_SCALE)) as f32
		} else {
			0.0
		}
	}
}

//---------------------------------------------------------------------------------------------------- Normalize
/// Analyze `pcm` and return the normalized samples lazily.
///
/// Each sample is divided by `32768`, shifted by [`BlockStats::dc_offset`]
/// and clamped to `-1.0..=1.0`. The iterator allocates nothing, so the
/// caller can stop pulling once the sample buffer is full.
pub fn normalize(pcm: &[i16]) -> (BlockStats, impl Iterator<Item = f32> + '_) {
	normalize_samples(pcm.iter().copied())
}

/// [`normalize`] but from an iterator, which is walked twice.
pub(crate) fn normalize_samples<I>(pcm: I) -> (BlockStats, impl Iterator<Item = f32>)
where
	I: Iterator<Item = i16> + Clone,
{
	let stats = BlockStats::from_samples(pcm.clone());
	let offset = stats.dc_offset();
	let iter = pcm.map(move |s| clamp_sample(f32::from(s) / PCM_SCALE - offset));
	(stats, iter)
}

//---------------------------------------------------------------------------------------------------- Bytes
/// Decode little-endian `i16` samples from a data message into `out`.
///
/// `out` is cleared first. The sample count is `bytes.len() / 2`,
/// a trailing odd byte is ignored.
///
/// ```rust
/// # use jitterbuf::pcm_from_le_bytes;
/// let mut pcm = vec![];
/// pcm_from_le_bytes(&[0x01, 0x00, 0xFF, 0xFF, 0x00, 0x80, 0x7F], &mut pcm);
/// assert_eq!(pcm, [1, -1, i16::MIN]);
/// ```
pub fn pcm_from_le_bytes(bytes: &[u8], out: &mut Vec<i16>) {
	out.clear();
	out.extend(le_samples(bytes));
}

#[inline]
/// Little-endian `i16` samples of `bytes`, without copying them out.
pub(crate) fn le_samples(bytes: &[u8]) -> impl Iterator<Item = i16> + Clone + '_ {
	bytes
		.chunks_exact(2)
		.map(|b| i16::from_le_bytes([b[0], b[1]]))
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn close(a: f32, b: f32) -> bool {
		(a - b).abs() < 1e-6
	}

	#[test]
	fn empty_block() {
		let (stats, iter) = normalize(&[]);
		assert_eq!(stats, BlockStats { len: 0, min: 0, max: 0, mean: 0.0 });
		assert_eq!(iter.count(), 0);
	}

	#[test]
	fn plain_normalization() {
		let (stats, iter) = normalize(&[0, 16384, -16384, i16::MIN, i16::MAX]);
		assert!(!stats.is_dc_corrected());
		let v: Vec<f32> = iter.collect();
		assert_eq!(&v[..4], &[0.0, 0.5, -0.5, -1.0]);
		assert!(close(v[4], 32767.0 / 32768.0));
	}

	#[test]
	fn dc_threshold_not_crossed() {
		// mean == 100 and mean == -100, both uncorrected.
		for block in [[100_i16; 4], [-100_i16; 4]] {
			let (stats, iter) = normalize(&block);
			assert_eq!(stats.dc_offset(), 0.0);
			for s in iter {
				assert_eq!(s, f32::from(block[0]) / 32768.0);
			}
		}
	}

	#[test]
	fn dc_threshold_crossed() {
		let block = [1000_i16, 1002, 1004, 1006]; // mean == 1003
		let (stats, iter) = normalize(&block);
		assert!(stats.is_dc_corrected());
		assert_eq!(stats.mean, 1003.0);

		let offset = 0.5 * 1003.0 / 32768.0;
		for (s, raw) in iter.zip(block) {
			assert!(close(s, f32::from(raw) / 32768.0 - offset));
		}
	}

	#[test]
	fn dc_correction_clamps() {
		// mean is hugely negative, shifting up pushes i16::MAX over 1.0.
		let mut block = vec![i16::MIN; 9];
		block.push(i16::MAX);
		let (stats, iter) = normalize(&block);
		assert!(stats.dc_offset() < 0.0);
		let v: Vec<f32> = iter.collect();
		assert_eq!(v[9], 1.0);
		assert!(v.iter().all(|s| (-1.0..=1.0).contains(s)));
	}

	#[test]
	fn bytes() {
		let mut out = vec![7; 10];
		pcm_from_le_bytes(&[], &mut out);
		assert!(out.is_empty());

		pcm_from_le_bytes(&[0x34, 0x12, 0x00], &mut out);
		assert_eq!(out, [0x1234]);
	}

	#[test]
	fn bytes_normalize_like_slices() {
		let pcm = [1000_i16, -2000, 3000, 4000];
		let bytes: Vec<u8> = pcm.iter().flat_map(|s| s.to_le_bytes()).collect();

		let (a, iter_a) = normalize(&pcm);
		let (b, iter_b) = normalize_samples(le_samples(&bytes));
		assert_eq!(a, b);
		assert_eq!(iter_a.collect::<Vec<f32>>(), iter_b.collect::<Vec<f32>>());
	}
}
