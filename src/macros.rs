// Global macros for internal jitterbuf usage.

//---------------------------------------------------------------------------------------------------- Logging
// Logs with `log` but only if the log feature is enabled.
//
// These are used on the render path, so without
// the feature they must compile down to nothing.

#[cfg_attr(not(feature = "cpal"), allow(unused_macros))]
macro_rules! error2 {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::error!($($arg)+);
    }};
}
#[cfg_attr(not(feature = "cpal"), allow(unused_imports))]
pub(crate) use error2;

macro_rules! warn2 {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::warn!($($arg)+);
    }};
}
pub(crate) use warn2;

macro_rules! info2 {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::info!($($arg)+);
    }};
}
pub(crate) use info2;

macro_rules! debug2 {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::debug!($($arg)+);
    }};
}
pub(crate) use debug2;

macro_rules! trace2 {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::trace!($($arg)+);
    }};
}
pub(crate) use trace2;

//---------------------------------------------------------------------------------------------------- Status
// Emit a `Status` into a `StatusSender` and forget about it.
//
// A full or disconnected sink is not our problem,
// the render path must never wait on the consumer.
macro_rules! emit {
    ($sink:expr, $status:expr) => {{
        let status = $status;
        if $sink.try_send(status).is_err() {
            $crate::macros::trace2!("status dropped: {status:?}");
        }
    }};
}
pub(crate) use emit;
