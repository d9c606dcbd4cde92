//! Observable processor state.
//!
//! The [`crate::Processor`] owns the real state, this is a
//! lock-free copy of it that any thread can read.

mod atomic_state;
pub(crate) use atomic_state::AtomicState;

mod stats;
pub use stats::Stats;
