//! Event loop integrations.

pub mod calloop;

pub use self::calloop::CalloopScheduler;
