//! The control channel.
//!
//! [`Input`] is the ingest/control side: it is held by whatever
//! thread receives PCM from the network or decoder and sends blocks
//! and [`Command`]'s to the [`crate::Processor`] over a bounded,
//! lock-free channel. Nothing it does ever touches the sample buffer.
//!
//! The per-sample work of a block (analysis, DC correction,
//! normalization) happens here on the sending thread, the
//! processor only copies ready `f32` batches into its buffer.
//!
//! [`StatusSender`] is the other direction: any bounded channel
//! that can `try_send()` a [`Status`] without blocking or allocating.
//!
//! This trait is already implemented on:
//! - `std::sync::mpsc::SyncSender`
//! - `crossbeam::channel::Sender`
//! - `()`
//!
//! `try_send()` on `()` does nothing, use it to ignore statuses:
//! ```rust
//! # use jitterbuf::{Config,Processor};
//! let (mut processor, input) = Processor::new(Config::DEFAULT, 48_000, ()).unwrap();
//!
//! input.send_pcm(&[0; 160]).unwrap();
//! let mut out = [0.0; 128];
//! processor.render(&mut out);
//! ```

//---------------------------------------------------------------------------------------------------- use
use std::{
	convert::Infallible,
	sync::Arc,
};
use crossbeam::channel::{Receiver,Sender,TrySendError};
use crate::{
	error::SendError,
	ingest::{le_samples,normalize_samples},
	macros::{debug2,trace2,warn2},
	signal::{Command,Status},
	state::{AtomicState,Stats},
};

#[allow(unused_imports)] // docs
use crate::Processor;

//---------------------------------------------------------------------------------------------------- Message
/// What travels from [`Input`] to [`Processor`].
///
/// Data and commands share one channel so
/// their relative order is preserved.
#[derive(Debug)]
pub(crate) enum Message {
	/// A normalized block of mono samples.
	Pcm {
		/// At most `buffer_capacity` samples.
		samples: Vec<f32>,
		/// Samples cut off the end of the block because it
		/// was longer than the buffer could ever hold.
		truncated: usize,
	},
	/// An out-of-band command.
	Command(Command),
}

//---------------------------------------------------------------------------------------------------- Input
/// The ingest/control side of a [`Processor`].
///
/// Created alongside it by [`Processor::new`] or [`crate::init`].
///
/// Every send is non-blocking. A [`SendError::Full`] means the
/// processor isn't rendering often enough to drain its messages,
/// the message is dropped. For PCM this counts as an overrun and
/// the processor reports [`Status::BufferFull`] on its next tick.
///
/// Blocks longer than the buffer capacity are cut to the capacity
/// before sending, the rest could never be buffered anyway and is
/// counted as dropped.
#[derive(Debug)]
pub struct Input {
	to_processor: Sender<Message>,
	/// Spent sample allocations coming back from the processor.
	from_processor: Receiver<Vec<f32>>,
	state: Arc<AtomicState>,
}

impl Input {
	pub(crate) fn new(
		to_processor: Sender<Message>,
		from_processor: Receiver<Vec<f32>>,
		state: Arc<AtomicState>,
	) -> Self {
		Self { to_processor, from_processor, state }
	}

	//------------------------------------------ Data
	/// Send a block of mono `i16` PCM.
	///
	/// The block is normalized into a recycled allocation.
	///
	/// # Errors
	/// The processor is not draining, or no longer exists.
	pub fn send_pcm(&self, pcm: &[i16]) -> Result<(), SendError> {
		self.send_samples(pcm.iter().copied())
	}

	/// Send a data message of little-endian `i16` PCM bytes.
	///
	/// The sample count is `bytes.len() / 2`, a trailing odd byte is ignored.
	///
	/// # Errors
	/// The processor is not draining, or no longer exists.
	pub fn send_bytes(&self, bytes: &[u8]) -> Result<(), SendError> {
		self.send_samples(le_samples(bytes))
	}

	fn send_samples<I>(&self, pcm: I) -> Result<(), SendError>
	where
		I: Iterator<Item = i16> + Clone,
	{
		let (block, normalized) = normalize_samples(pcm);
		if block.len != 0 {
			trace2!("Input - {block:?}, DC offset removed: {}", block.dc_offset());
		}

		let mut samples = self.recycled();
		samples.extend(normalized.take(self.state.capacity));
		let truncated = block.len - samples.len();

		match self.to_processor.try_send(Message::Pcm { samples, truncated }) {
			Ok(()) => Ok(()),
			Err(TrySendError::Full(_)) => {
				warn2!("Input - message channel full, dropping {} samples", block.len);
				self.state.overrun_pending(block.len);
				Err(SendError::Full)
			},
			Err(TrySendError::Disconnected(_)) => Err(SendError::Disconnected),
		}
	}

	//------------------------------------------ Commands
	/// Send a [`Command`].
	///
	/// # Errors
	/// The processor is not draining, or no longer exists.
	pub fn command(&self, command: Command) -> Result<(), SendError> {
		self.to_processor
			.try_send(Message::Command(command))
			.map_err(SendError::from)
	}

	/// Send [`Command::ClearBuffer`].
	///
	/// # Errors
	/// The processor is not draining, or no longer exists.
	pub fn clear(&self) -> Result<(), SendError> {
		self.command(Command::ClearBuffer)
	}

	/// Decode a command tag such as `"clear_buffer"` and send it.
	///
	/// Unknown tags are ignored, this returns `Ok(false)` for them.
	///
	/// # Errors
	/// The processor is not draining, or no longer exists.
	pub fn command_str(&self, tag: &str) -> Result<bool, SendError> {
		match tag.parse::<Command>() {
			Ok(command) => self.command(command).map(|()| true),
			Err(_) => {
				debug2!("Input - ignoring unknown command: {tag:?}");
				Ok(false)
			},
		}
	}

	//------------------------------------------ Misc
	#[must_use]
	/// A snapshot of the processor's state.
	pub fn stats(&self) -> Stats {
		self.state.snapshot()
	}

	#[inline]
	/// An empty `Vec` from the processor's spent batches, or a new one.
	///
	/// Every data send takes one back if there is one, so the
	/// spent batches never outnumber `message_channel_len + 1`
	/// and the processor can always hand them back.
	fn recycled(&self) -> Vec<f32> {
		match self.from_processor.try_recv() {
			Ok(mut samples) => {
				samples.clear();
				samples
			},
			Err(_) => Vec::new(),
		}
	}
}

//---------------------------------------------------------------------------------------------------- StatusSender
/// A sender side of a channel, that can send a [`Status`].
///
/// Implementors must never block or allocate in `try_send()`,
/// it is called from the real-time render path. This is why the
/// unbounded `std::sync::mpsc::Sender` does not implement it.
pub trait StatusSender
where
	Self: Send + 'static,
{
	/// The error(s) that can occur when sending.
	type Error;

	/// Attempt to send the status `s`.
	///
	/// # Errors
	/// The channel is full or disconnected,
	/// the status is dropped either way.
	fn try_send(&self, s: Status) -> Result<(), Self::Error>;
}

impl StatusSender for () {
	type Error = Infallible;
	#[inline(always)]
	fn try_send(&self, _: Status) -> Result<(), Self::Error> {
		Ok(())
	}
}

impl StatusSender for crossbeam::channel::Sender<Status> {
	type Error = crossbeam::channel::TrySendError<Status>;
	#[inline]
	fn try_send(&self, s: Status) -> Result<(), Self::Error> {
		crossbeam::channel::Sender::try_send(self, s)
	}
}

impl StatusSender for std::sync::mpsc::SyncSender<Status> {
	type Error = std::sync::mpsc::TrySendError<Status>;
	#[inline]
	fn try_send(&self, s: Status) -> Result<(), Self::Error> {
		std::sync::mpsc::SyncSender::try_send(self, s)
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crossbeam::channel::bounded;
	use pretty_assertions::assert_eq;

	fn input(len: usize, capacity: usize) -> (Input, Receiver<Message>, Sender<Vec<f32>>) {
		let (to_processor, from_input) = bounded(len);
		let (to_input, from_processor) = bounded(len + 1);
		let state = Arc::new(AtomicState::new(capacity, 16_000));
		(Input::new(to_processor, from_processor, state), from_input, to_input)
	}

	fn samples(message: Result<Message, crossbeam::channel::TryRecvError>) -> (Vec<f32>, usize) {
		match message {
			Ok(Message::Pcm { samples, truncated }) => (samples, truncated),
			other => panic!("{other:?}"),
		}
	}

	#[test]
	fn order_is_kept() {
		let (input, rx, _) = input(8, 4096);
		input.send_pcm(&[16384, -16384]).unwrap();
		input.clear().unwrap();
		input.send_bytes(&[0x00, 0x40, 0x00, 0xC0, 0x01]).unwrap();

		assert_eq!(samples(rx.try_recv()), (vec![0.5, -0.5], 0));
		assert!(matches!(rx.try_recv(), Ok(Message::Command(Command::ClearBuffer))));
		assert_eq!(samples(rx.try_recv()), (vec![0.5, -0.5], 0));
	}

	#[test]
	fn normalized_before_sending() {
		let (input, rx, _) = input(1, 4096);
		// mean == 1003, half of it is removed.
		input.send_pcm(&[1000, 1002, 1004, 1006]).unwrap();
		let (v, _) = samples(rx.try_recv());
		let offset = 0.5 * 1003.0 / 32768.0;
		assert!((v[0] - (1000.0 / 32768.0 - offset)).abs() < 1e-6);
	}

	#[test]
	fn oversized_block_is_cut_to_capacity() {
		let (input, rx, _) = input(4, 64);
		input.send_pcm(&vec![100; 10_000]).unwrap();
		input.send_bytes(&vec![0; 1000]).unwrap();

		let (v, truncated) = samples(rx.try_recv());
		assert_eq!(v.len(), 64);
		assert_eq!(truncated, 10_000 - 64);

		let (v, truncated) = samples(rx.try_recv());
		assert_eq!(v.len(), 64);
		assert_eq!(truncated, 500 - 64);
	}

	#[test]
	fn full_is_an_overrun() {
		let (input, _rx, _) = input(1, 4096);
		input.send_pcm(&[0; 10]).unwrap();
		assert!(!input.state.take_full_pending());

		assert_eq!(input.send_pcm(&[0; 20]), Err(SendError::Full));
		assert_eq!(input.clear(), Err(SendError::Full));

		let stats = input.stats();
		assert_eq!(stats.overruns, 1);
		assert_eq!(stats.dropped_samples, 20);
		assert!(input.state.take_full_pending());
	}

	#[test]
	fn disconnected() {
		let (input, rx, _) = input(1, 4096);
		drop(rx);
		assert_eq!(input.send_pcm(&[0]), Err(SendError::Disconnected));
		assert_eq!(input.clear(), Err(SendError::Disconnected));
		assert_eq!(input.stats().overruns, 0);
		assert!(!input.state.take_full_pending());
	}

	#[test]
	fn command_tags() {
		let (input, rx, _) = input(4, 4096);
		assert_eq!(input.command_str("clear_buffer"), Ok(true));
		assert_eq!(input.command_str("reboot_radio"), Ok(false));
		assert_eq!(input.command_str(""), Ok(false));
		assert_eq!(rx.len(), 1);
	}

	#[test]
	fn recycles() {
		let (input, rx, to_input) = input(4, 4096);
		to_input.send(Vec::with_capacity(512)).unwrap();

		input.send_pcm(&[0; 3]).unwrap();
		let (v, _) = samples(rx.try_recv());
		assert_eq!(v, [0.0; 3]);
		assert!(v.capacity() >= 512);
		assert!(to_input.is_empty());
	}

	#[test]
	fn status_senders() {
		assert!(().try_send(Status::BufferLow).is_ok());

		let (tx, rx) = bounded(1);
		assert!(StatusSender::try_send(&tx, Status::BufferFull).is_ok());
		assert!(StatusSender::try_send(&tx, Status::BufferFull).is_err());
		assert_eq!(rx.try_recv(), Ok(Status::BufferFull));

		let (tx, rx) = std::sync::mpsc::sync_channel(1);
		assert!(StatusSender::try_send(&tx, Status::BufferCleared).is_ok());
		assert!(StatusSender::try_send(&tx, Status::BufferCleared).is_err());
		assert_eq!(rx.try_recv(), Ok(Status::BufferCleared));
	}
}
