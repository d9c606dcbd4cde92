//! `cpal` output.

//----------------------------------------------------------------------------------------------- use
use crossbeam::channel::{bounded,Receiver};
use cpal::traits::{DeviceTrait,HostTrait,StreamTrait};
use crate::{
	channel::Input,
	config::Config,
	error::OutputError,
	macros::{debug2,error2},
	processor::init,
	signal::Status,
};

//----------------------------------------------------------------------------------------------- Constants
/// Frames rendered per [`crate::Processor::render`] call inside the callback.
///
/// The scratch buffer is allocated once with this length,
/// larger device buffers are rendered in chunks.
const SCRATCH_FRAMES: usize = 4096;

/// How many stream errors are kept until [`CpalOutput::error`] reads them.
const ERROR_CHANNEL_LEN: usize = 16;

//----------------------------------------------------------------------------------------------- CpalOutput
/// An output stream on the default device, fed by a [`crate::Processor`].
///
/// The processor is moved into the device callback, the
/// [`Input`] and status channel stay here for the caller.
///
/// The processor renders mono, every output channel gets the same sample.
///
/// Dropping this closes the stream.
pub struct CpalOutput {
	/// The actual audio stream.
	stream: cpal::Stream,
	/// Send PCM and commands here.
	input: Input,
	/// Statuses from the callback.
	statuses: Receiver<Status>,
	/// Stream errors from the callback.
	errors: Receiver<cpal::StreamError>,
	/// The device's rate, which is the output rate unless overridden.
	sample_rate: u32,
	/// Device channel count.
	channels: u16,
}

impl std::fmt::Debug for CpalOutput {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CpalOutput")
			.field("input", &self.input)
			.field("sample_rate", &self.sample_rate)
			.field("channels", &self.channels)
			.finish_non_exhaustive()
	}
}

impl CpalOutput {
	#[cold]
	#[inline(never)]
	/// Open the default output device and start playing.
	///
	/// `config.output_sample_rate` of `None` uses the device's default rate.
	///
	/// # Errors
	/// - No default output device
	/// - The device doesn't take `f32` samples
	/// - `config` is invalid
	/// - The backend failed to build or start the stream
	pub fn open(config: Config) -> Result<Self, OutputError> {
		let host = cpal::default_host();
		let Some(device) = host.default_output_device() else {
			return Err(OutputError::DeviceUnavailable);
		};

		let supported = device.default_output_config()?;
		debug2!("CpalOutput - device config: {supported:?}");

		if supported.sample_format() != cpal::SampleFormat::F32 {
			return Err(OutputError::InvalidFormat);
		}

		let mut stream_config = supported.config();
		if let Some(rate) = config.output_sample_rate {
			stream_config.sample_rate = cpal::SampleRate(rate);
		}
		let sample_rate = stream_config.sample_rate.0;
		let channels = stream_config.channels;
		if channels == 0 {
			return Err(OutputError::InvalidFormat);
		}

		let (mut processor, input, statuses) = init(config, sample_rate)?;
		let (error_send, errors) = bounded(ERROR_CHANNEL_LEN);

		let mut scratch = vec![0.0_f32; SCRATCH_FRAMES];
		let width = usize::from(channels);
		let data_callback = move |output: &mut [f32], _: &cpal::OutputCallbackInfo| {
			for chunk in output.chunks_mut(SCRATCH_FRAMES * width) {
				let frames = chunk.len() / width;
				let mono = &mut scratch[..frames];
				processor.render(mono);

				for (frame, sample) in chunk.chunks_exact_mut(width).zip(mono.iter()) {
					frame.fill(*sample);
				}
			}
		};
		let error_callback = move |error: cpal::StreamError| {
			error2!("CpalOutput - stream error: {error}");
			drop(error_send.try_send(error));
		};

		let stream = device.build_output_stream(&stream_config, data_callback, error_callback, None)?;
		stream.play()?;
		debug2!("CpalOutput - playing, {sample_rate} Hz, {channels} channel(s)");

		Ok(Self {
			stream,
			input,
			statuses,
			errors,
			sample_rate,
			channels,
		})
	}

	#[inline]
	/// Send PCM and commands through this.
	pub const fn input(&self) -> &Input {
		&self.input
	}

	#[inline]
	/// Statuses emitted from the device callback.
	pub const fn statuses(&self) -> &Receiver<Status> {
		&self.statuses
	}

	#[inline]
	/// The rate the stream was opened at.
	pub const fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	#[inline]
	/// The device channel count.
	pub const fn channels(&self) -> u16 {
		self.channels
	}

	/// The oldest stream error the backend reported, if any.
	pub fn error(&self) -> Option<cpal::StreamError> {
		self.errors.try_recv().ok()
	}

	/// Resume the stream.
	///
	/// # Errors
	/// The backend failed to start the stream.
	pub fn play(&self) -> Result<(), OutputError> {
		Ok(self.stream.play()?)
	}

	/// Pause the stream, the processor stops rendering.
	///
	/// # Errors
	/// The backend failed to pause the stream.
	pub fn pause(&self) -> Result<(), OutputError> {
		Ok(self.stream.pause()?)
	}
}
