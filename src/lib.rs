//! # vecscape
//!
//! Projects batches of high-dimensional vectors to 2-D for visualization.
//! Given a center vector, rows are weighted by cosine closeness to it before
//! reduction and the nearest row is anchored at the origin afterwards.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod processing;
pub mod ui;

pub use crate::core::{ReduceError, Result};
pub use processing::{run, NoopObserver, PipelineInput, PipelineOutput, Reducer, StageObserver};
