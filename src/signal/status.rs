//---------------------------------------------------------------------------------------------------- use
use strum::{AsRefStr,EnumCount,EnumVariantNames,IntoStaticStr};

//---------------------------------------------------------------------------------------------------- Status
/// Events emitted by the [`crate::Processor`]
///
/// These are purely informational, dropping them
/// never affects what gets rendered.
///
/// The tag is the same `snake_case` string the radio's
/// web front end expects:
/// ```rust
/// # use jitterbuf::Status;
/// assert_eq!(Status::BufferLevel(0.5).as_ref(), "buffer_level");
/// assert_eq!(Status::BufferLevel(0.5).level(), Some(0.5));
/// assert_eq!(Status::BufferLow.level(), None);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[derive(Copy,Clone,Debug,PartialEq,PartialOrd)]
#[derive(AsRefStr,EnumCount,EnumVariantNames,IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Status {
	/// A [`crate::Command::ClearBuffer`] was applied.
	BufferCleared,
	/// A PCM block (or part of one) was dropped, the buffer is full.
	BufferFull,
	/// A PCM block was ingested, the buffer is now this full (`0.0..=1.0`).
	BufferLevel(f32),
	/// A render tick had to output silence due to lack of samples.
	BufferLow,
}

impl Status {
	#[inline]
	#[must_use]
	/// The fill level, if this is a [`Status::BufferLevel`].
	pub fn level(&self) -> Option<f32> {
		match self {
			Self::BufferLevel(level) => Some(*level),
			_ => None,
		}
	}
}
