//! These are helper functions used for testing throughout the codebase.

//---------------------------------------------------------------------------------------------------- Use
use crossbeam::channel::Receiver;
use crate::{
	channel::Input,
	config::Config,
	processor::{init,Processor},
	signal::Status,
};

//---------------------------------------------------------------------------------------------------- Test Init Helpers
/// Init a `Processor` with default values apart from the rates.
pub(crate) fn processor(input: u32, output: u32) -> (Processor, Input, Receiver<Status>) {
	let config = Config {
		input_sample_rate: input,
		output_sample_rate: Some(output),
		..Config::DEFAULT
	};
	init(config, output).unwrap()
}

// Drain all statuses currently in the channel.
pub(crate) fn collect(rx: &Receiver<Status>) -> Vec<Status> {
	rx.try_iter().collect()
}

// `len` samples of a 250 Hz sine at 16 kHz.
//
// 64 samples per period, so any multiple of
// 64 has (close to) no DC offset.
pub(crate) fn sine(len: usize) -> Vec<i16> {
	(0..len)
		.map(|i| {
			let phase = i as f32 / 64.0 * std::f32::consts::TAU;
			(phase.sin() * 16000.0) as i16
		})
		.collect()
}
