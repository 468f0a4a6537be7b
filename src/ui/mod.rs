//! # User Interface
//!
//! Colored stderr logging and the console stage observer.

pub mod log;
pub mod observer;

pub use log::{debug, error, header, info, success, warn, Log};
pub use observer::ConsoleObserver;
