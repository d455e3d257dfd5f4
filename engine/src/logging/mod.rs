//! Log output for hosts without a terminal of their own.
//!
//! The engine only talks to the `log` facade. A host that wants the records elsewhere (a UI
//! panel, a test assertion, stdout on its own schedule) installs a [`ChannelLogger`] and drains
//! the receiving end of its channel.

mod channel;

pub use channel::{ChannelLogger, LogMessage, drain};
