//! The render side.
//!
//! [`Processor`] exclusively owns the [`SampleBuffer`], the
//! [`FlowController`] and the resampler. It is meant to live
//! inside the audio callback, and everything it does per tick
//! is bounded, lock-free and allocation-free: at most
//! `message_channel_len` batches of at most `buffer_capacity`
//! ready-made samples are copied in per tick.

//---------------------------------------------------------------------------------------------------- Use
use std::{
	num::NonZeroUsize,
	sync::Arc,
};
use crossbeam::channel::{bounded,Receiver,Sender};
use rand::{rngs::StdRng,Rng,SeedableRng};
use crate::{
	buffer::SampleBuffer,
	channel::{Input,Message,StatusSender},
	config::{Config,RateConfig,LATENCY_LOG_PROBABILITY},
	error::ConfigError,
	flow::{Decision,FlowController,FlowState},
	ingest::normalize,
	macros::{debug2,emit,info2,trace2},
	resampler::{Resampler,ResamplerStruct},
	signal::{Command,Status},
	state::{AtomicState,Stats},
};

//---------------------------------------------------------------------------------------------------- init
/// Create a [`Processor`] and [`Input`] pair, with a bounded status channel.
///
/// The status channel is `config.status_channel_len` long,
/// statuses emitted while it is full are dropped.
///
/// Use [`Processor::new`] to send statuses somewhere else.
///
/// ```rust
/// # use jitterbuf::*;
/// let (mut processor, input, statuses) = jitterbuf::init(Config::DEFAULT, 48_000).unwrap();
///
/// // Not enough samples yet, silence.
/// input.send_pcm(&[1000; 160]).unwrap();
/// let mut out = [1.0; 128];
/// processor.render(&mut out);
/// assert_eq!(out, [0.0; 128]);
///
/// assert!(matches!(statuses.try_recv(), Ok(Status::BufferLevel(_))));
/// assert_eq!(statuses.try_recv(), Ok(Status::BufferLow));
/// ```
///
/// # Errors
/// See [`Config::validate`].
pub fn init(
	config: Config,
	device_sample_rate: u32,
) -> Result<(Processor, Input, Receiver<Status>), ConfigError> {
	// Checked before the channel is created, `bounded(0)` is a rendezvous channel.
	config.validate(device_sample_rate)?;
	let (to_caller, from_processor) = bounded(config.status_channel_len);
	let (processor, input) = Processor::new(config, device_sample_rate, to_caller)?;
	Ok((processor, input, from_processor))
}

//---------------------------------------------------------------------------------------------------- Processor
/// The real-time jitter buffer + resampler.
///
/// Call [`Processor::render`] once per audio device callback.
///
/// Data and commands sent through the [`Input`] are applied at
/// the start of the next `render()`, in the order they were sent.
///
/// `S` is where [`Status`]'s go, see [`StatusSender`].
#[derive(Debug)]
pub struct Processor<S: StatusSender = Sender<Status>> {
	buffer:    SampleBuffer,       // The jitter buffer
	flow:      FlowController,     // Ready/underrun/forced silence gate
	resampler: ResamplerStruct,    // Picked once from `rates`
	rates:     RateConfig,         // Fixed input/output rates
	state:     Arc<AtomicState>,   // Shared with `Input`
	status:    S,                  // Status sink
	debug:     bool,               // `Config::debug_logging`
	announced: bool,               // Has the first data block been logged?
	rng:       StdRng,             // For the sampled latency log
	drain_len: usize,              // Max messages handled per tick

	from_input: Receiver<Message>,  // PCM + commands
	to_input:   Sender<Vec<f32>>,   // Spent batch allocations
	// Keeps the recycle channel connected after the `Input` is dropped,
	// so spent batches are never freed on the render thread.
	_recycled:  Receiver<Vec<f32>>,
}

impl<S: StatusSender> Processor<S> {
	//------------------------------------------ Init
	#[cold]
	#[inline(never)]
	/// Create a [`Processor`] sending statuses into `status`, and its [`Input`].
	///
	/// All allocation happens here.
	///
	/// # Errors
	/// See [`Config::validate`].
	pub fn new(
		config: Config,
		device_sample_rate: u32,
		status: S,
	) -> Result<(Self, Input), ConfigError> {
		let rates = config.validate(device_sample_rate)?;
		let capacity = NonZeroUsize::new(config.buffer_capacity).ok_or(ConfigError::ZeroCapacity)?;

		let (to_processor, from_input) = bounded(config.message_channel_len);
		// `Input` takes one spent batch back per data send, so at most
		// `message_channel_len + 1` are ever waiting here.
		let (to_input, from_processor) = bounded(config.message_channel_len.saturating_add(1));
		let state = Arc::new(AtomicState::new(config.buffer_capacity, rates.input()));

		let resampler = ResamplerStruct::new(rates);
		debug2!(
			"Processor - {} Hz -> {} Hz, ratio: {}, resampler: {}",
			rates.input(),
			rates.output(),
			rates.ratio(),
			resampler.backend(),
		);

		let this = Self {
			buffer: SampleBuffer::new(capacity),
			flow: FlowController::new(config.ready_threshold, config.forced_silence_ticks),
			resampler,
			rates,
			state: Arc::clone(&state),
			status,
			debug: config.debug_logging,
			announced: false,
			rng: StdRng::from_entropy(),
			drain_len: config.message_channel_len,
			from_input,
			to_input,
			_recycled: from_processor.clone(),
		};

		Ok((this, Input::new(to_processor, from_processor, state)))
	}

	//------------------------------------------ Render
	/// Fill `out` with mono samples at the output rate.
	///
	/// Pending [`Input`] messages are applied first. Then `out`
	/// is either rendered from the buffer or filled with silence:
	///
	/// - inside the forced silence window after a clear: silence
	/// - priming, or fewer than `out.len()` samples buffered: silence and [`Status::BufferLow`]
	/// - otherwise: resampled output
	///
	/// This never blocks and never allocates.
	pub fn render(&mut self, out: &mut [f32]) {
		self.drain();
		if self.state.take_full_pending() {
			emit!(self.status, Status::BufferFull);
		}
		AtomicState::bump(&self.state.ticks);

		match self.flow.decide(self.buffer.len(), out.len()) {
			Decision::ForcedSilence => out.fill(0.0),
			Decision::Underrun => {
				out.fill(0.0);
				AtomicState::bump(&self.state.underruns);
				emit!(self.status, Status::BufferLow);
			},
			Decision::Render => {
				self.resampler.process(&mut self.buffer, out);
				self.log_latency();
			},
		}

		self.state.publish(&self.buffer, &self.flow);
	}

	/// Apply up to `drain_len` pending messages.
	///
	/// Bounded so a flooding [`Input`] can't starve the tick.
	fn drain(&mut self) {
		for _ in 0..self.drain_len {
			match self.from_input.try_recv() {
				Ok(Message::Pcm { samples, truncated }) => {
					self.accept(samples.len() + truncated, samples.iter().copied());
					self.recycle(samples);
				},
				Ok(Message::Command(command)) => self.apply(command),
				Err(_) => break,
			}
		}
	}

	#[inline]
	/// Send a spent batch back to the [`Input`] so it gets reused.
	///
	/// The channel always has room, see [`Processor::new`].
	fn recycle(&self, samples: Vec<f32>) {
		if self.to_input.try_send(samples).is_err() {
			trace2!("Processor - recycle channel full, freeing batch");
		}
	}

	fn log_latency(&mut self) {
		if !cfg!(feature = "log") || !self.debug || !self.rng.gen_bool(LATENCY_LOG_PROBABILITY) {
			return;
		}

		debug2!(
			"Processor - buffer latency: {:.1}ms, level: {:.1}%",
			self.buffer.len() as f64 / f64::from(self.rates.input()) * 1000.0,
			self.buffer.level() * 100.0,
		);
	}

	//------------------------------------------ Ingest
	/// Normalize one block of `i16` PCM and write it into the buffer.
	///
	/// [`Input::send_pcm`] does the same thing split across threads,
	/// normalizing on the sending side. Calling this directly is for
	/// when both sides are on one thread, the work is `O(pcm.len())`.
	///
	/// Returns how many samples were accepted.
	///
	/// - A full buffer drops the whole block and emits [`Status::BufferFull`]
	/// - A block that only partially fits has its tail dropped,
	///   emitting [`Status::BufferFull`] then [`Status::BufferLevel`]
	/// - Otherwise [`Status::BufferLevel`] is emitted
	pub fn ingest(&mut self, pcm: &[i16]) -> usize {
		let (block, samples) = normalize(pcm);
		if block.len != 0 {
			trace2!("Processor - ingest {block:?}, DC offset removed: {}", block.dc_offset());
		}
		self.accept(pcm.len(), samples)
	}

	/// Write a normalized block of `len` samples, `samples` may yield fewer.
	///
	/// Anything not written counts as dropped.
	fn accept<I>(&mut self, len: usize, samples: I) -> usize
	where
		I: Iterator<Item = f32>,
	{
		if !self.announced {
			self.announced = true;
			if self.debug {
				info2!(
					"Processor - first block, input: {} Hz, output: {} Hz",
					self.rates.input(),
					self.rates.output(),
				);
			}
		}

		if self.buffer.is_full() {
			self.state.overrun(len);
			emit!(self.status, Status::BufferFull);
			return 0;
		}

		let written = self.buffer.extend(samples);
		let dropped = len - written;
		if dropped != 0 {
			self.state.overrun(dropped);
			emit!(self.status, Status::BufferFull);
		}

		AtomicState::bump(&self.state.blocks);
		if self.flow.on_ingest(self.buffer.len()) && self.debug {
			info2!("Processor - buffer ready, {} samples", self.buffer.len());
		}
		self.state.publish(&self.buffer, &self.flow);

		emit!(self.status, Status::BufferLevel(self.buffer.level()));
		written
	}

	//------------------------------------------ Commands
	/// Apply a [`Command`] immediately.
	///
	/// [`Command::ClearBuffer`] empties the buffer, goes back to priming,
	/// starts the forced silence window and emits [`Status::BufferCleared`].
	pub fn apply(&mut self, command: Command) {
		match command {
			Command::ClearBuffer => {
				self.buffer.reset();
				self.flow.clear();
				AtomicState::bump(&self.state.clears);
				self.state.publish(&self.buffer, &self.flow);
				emit!(self.status, Status::BufferCleared);
				if self.debug {
					debug2!("Processor - buffer cleared");
				}
			},
		}
	}

	//------------------------------------------ Getters
	#[inline]
	/// The resolved input/output rates.
	pub const fn rates(&self) -> RateConfig {
		self.rates
	}

	#[inline]
	/// The current [`FlowState`].
	pub const fn flow_state(&self) -> FlowState {
		self.flow.state()
	}

	#[inline]
	/// The jitter buffer.
	pub const fn buffer(&self) -> &SampleBuffer {
		&self.buffer
	}

	#[must_use]
	/// A snapshot of the shared state, same as [`Input::stats`].
	pub fn stats(&self) -> Stats {
		self.state.snapshot()
	}
}
