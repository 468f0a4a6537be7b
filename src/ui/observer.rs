//! Console rendering of pipeline stage transitions

use std::time::Duration;

use crate::core::ReduceError;
use crate::processing::{Stage, StageObserver};

use super::log;

/// Logs stage progress through the ui helpers
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleObserver;

impl StageObserver for ConsoleObserver {
	fn stage_started(&self, stage: Stage) {
		log::debug(&format!("[{}] started", stage.label()));
	}

	fn stage_finished(&self, stage: Stage, elapsed: Duration) {
		let msg = format!("[{}] done in {:.1}ms", stage.label(), elapsed.as_secs_f64() * 1000.0);
		if stage == Stage::Reduce {
			log::info(&msg);
		} else {
			log::debug(&msg);
		}
	}

	// The caller reports the error itself
	fn stage_failed(&self, stage: Stage, error: &ReduceError) {
		log::debug(&format!("[{}] {}: {}", stage.label(), error.kind(), error));
	}

	fn note(&self, stage: Stage, message: &str) {
		log::debug(&format!("[{}] {}", stage.label(), message));
	}
}
