//! Errors from opening the optional `cpal` output.

//---------------------------------------------------------------------------------------------------- use
use crate::error::ConfigError;

//----------------------------------------------------------------------------------------------- Output Errors
/// Error that occurs when attempting to open
/// a stream on the audio hardware/server.
///
/// This can be due to many reasons, e.g:
/// - No output device exists
/// - The audio server refused the stream
/// - The device only takes a sample format we can't write
#[derive(thiserror::Error, Debug)]
pub enum OutputError {
	#[error("audio hardware/server is unavailable")]
	/// There is no default output device.
	DeviceUnavailable,

	#[error("audio format is invalid or unsupported")]
	/// The device's sample format is not `f32`.
	InvalidFormat,

	#[error("invalid configuration: {0}")]
	/// The [`crate::Config`] did not validate against the device.
	Config(#[from] ConfigError),

	#[error("failed to query the device's output config: {0}")]
	/// The device could not report its preferred output config.
	DefaultConfig(#[from] cpal::DefaultStreamConfigError),

	#[error("failed to build the output stream: {0}")]
	/// The backend refused to build the stream.
	Build(#[from] cpal::BuildStreamError),

	#[error("failed to start the output stream: {0}")]
	/// The stream was built but could not start.
	Play(#[from] cpal::PlayStreamError),

	#[error("failed to pause the output stream: {0}")]
	/// The stream could not be paused.
	Pause(#[from] cpal::PauseStreamError),
}
