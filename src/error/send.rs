//---------------------------------------------------------------------------------------------------- use
#[allow(unused_imports)] // docs
use crate::{Input,Processor};

//---------------------------------------------------------------------------------------------------- Send Errors
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
/// Errors when sending to the [`Processor`] through an [`Input`]
///
/// A failed send means the message was dropped, it is never
/// queued for later. Retrying is up to the caller.
pub enum SendError {
	#[error("the processor's message channel is full")]
	/// The [`Processor`] is not draining messages fast enough
	///
	/// This counts as an overrun, same as a full sample buffer.
	Full,

	#[error("the processor was dropped")]
	/// The [`Processor`] no longer exists
	Disconnected,
}

impl<T> From<crossbeam::channel::TrySendError<T>> for SendError {
	fn from(value: crossbeam::channel::TrySendError<T>) -> Self {
		use crossbeam::channel::TrySendError as E;
		match value {
			E::Full(_)         => Self::Full,
			E::Disconnected(_) => Self::Disconnected,
		}
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crossbeam::channel::bounded;

	#[test]
	fn from_try_send() {
		let (tx, rx) = bounded::<u8>(1);
		tx.try_send(0).unwrap();
		assert_eq!(SendError::from(tx.try_send(1).unwrap_err()), SendError::Full);

		drop(rx);
		assert_eq!(SendError::from(tx.try_send(2).unwrap_err()), SendError::Disconnected);
	}
}
