//! Messages crossing the control channel.
//!
//! [`Command`]'s flow into the [`crate::Processor`],
//! [`Status`]'s flow back out of it.

mod command;
pub use command::Command;

mod status;
pub use status::Status;
