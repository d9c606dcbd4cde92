//---------------------------------------------------------------------------------------------------- use
use strum::{
	AsRefStr,Display,EnumCount,EnumString,
	EnumVariantNames,IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- Command
/// Out-of-band commands for the [`crate::Processor`]
///
/// These are sent through an [`crate::Input`] and applied at
/// the start of the next render tick, in order with PCM blocks.
///
/// Commands also have a string tag for callers whose control
/// messages arrive as text, unknown tags are ignored:
/// ```rust
/// # use jitterbuf::Command;
/// assert_eq!("clear_buffer".parse::<Command>(), Ok(Command::ClearBuffer));
/// assert!("clear_everything".parse::<Command>().is_err());
/// assert_eq!(Command::ClearBuffer.as_ref(), "clear_buffer");
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "command", rename_all = "snake_case"))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[derive(Copy,Clone,Debug,PartialEq,PartialOrd,Eq,Ord,Hash)]
#[derive(AsRefStr,Display,EnumCount,EnumString,EnumVariantNames,IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Command {
	/// Discard every buffered sample and go back to priming.
	///
	/// The next [`crate::Config::forced_silence_ticks`] render
	/// ticks are silent no matter what arrives in the meantime,
	/// and exactly one [`crate::Status::BufferCleared`] is emitted.
	ClearBuffer,
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use strum::VariantNames;

	#[test]
	fn tags() {
		assert_eq!(Command::VARIANTS, &["clear_buffer"]);
		assert_eq!(Command::ClearBuffer.to_string(), "clear_buffer");
	}

	#[test]
	fn malformed() {
		for tag in ["", "ClearBuffer", "clear_buffer ", "CLEAR_BUFFER", "buffer_cleared"] {
			assert!(tag.parse::<Command>().is_err(), "{tag:?}");
		}
	}
}
