//! Real-time audio jitter buffer.
//!
//! Mono `i16` PCM arrives in irregular blocks at a fixed input rate,
//! a [`Processor`] smooths it through a fixed-capacity [`SampleBuffer`]
//! and renders normalized `f32` samples at the output device's rate,
//! resampling linearly when the two rates differ.
//!
//! There are two sides:
//! - [`Input`]: held by whatever receives PCM, sends blocks and [`Command`]'s
//! - [`Processor`]: lives in the audio callback, call [`Processor::render`] every tick
//!
//! They only talk through bounded lock-free channels, the render
//! side never blocks, never allocates and never fails. Anything
//! worth knowing comes back out as a [`Status`].
//!
//! ```rust
//! use jitterbuf::{Config,Status};
//!
//! let (mut processor, input, statuses) = jitterbuf::init(Config::DEFAULT, 48_000).unwrap();
//!
//! // 100ms of 16 kHz audio from the network.
//! for _ in 0..10 {
//!     input.send_pcm(&[2000; 160]).unwrap();
//! }
//!
//! // The device asks for 10ms of 48 kHz audio.
//! let mut out = [0.0; 480];
//! processor.render(&mut out);
//! assert!(out.iter().all(|s| *s != 0.0));
//!
//! // Start over, e.g. on a new call.
//! input.clear().unwrap();
//! processor.render(&mut out);
//! assert_eq!(out, [0.0; 480]);
//!
//! assert!(statuses.try_iter().any(|s| s == Status::BufferCleared));
//! ```

//---------------------------------------------------------------------------------------------------- Lints
#![allow(
    clippy::len_zero,
    clippy::type_complexity,
    clippy::module_inception,
)]

#![deny(
    nonstandard_style,
    deprecated,
    missing_docs,
)]

#![forbid(
    unused_mut,
    unused_unsafe,
    future_incompatible,
    break_with_label_and_loop,
    coherence_leak_check,
    duplicate_macro_attributes,
    exported_private_dependencies,
    for_loops_over_fallibles,
    large_assignments,
    overlapping_range_endpoints,
    semicolon_in_expressions_from_macros,
    redundant_semicolons,
    unconditional_recursion,
    unreachable_patterns,
    unused_allocation,
    unused_braces,
    unused_comparisons,
    unused_doc_comments,
    unused_parens,
    unused_labels,
    while_true,
    keyword_idents,
    non_ascii_idents,
    noop_method_call,
    single_use_lifetimes,
)]

//---------------------------------------------------------------------------------------------------- Public API
mod buffer;
pub use buffer::SampleBuffer;

mod ingest;
pub use ingest::{BlockStats,normalize,pcm_from_le_bytes};

mod flow;
pub use flow::{Decision,FlowController,FlowState};

mod processor;
pub use processor::{init,Processor};

mod channel;
pub use channel::{Input,StatusSender};

pub mod config;
pub use config::{Config,RateConfig};

pub mod error;
pub use error::{ConfigError,SendError};

pub mod resampler;
pub use resampler::{Linear,Passthrough,Resampler};

pub mod signal;
pub use signal::{Command,Status};

mod state;
pub use state::Stats;

#[cfg(feature = "cpal")]
pub mod output;
#[cfg(feature = "cpal")]
pub use output::CpalOutput;

//---------------------------------------------------------------------------------------------------- Private Usage
mod atomic;
mod macros;

#[cfg(test)]
mod tests;
