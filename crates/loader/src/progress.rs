//! Load progress reporting.
//!
//! Progress is purely observational: reporters never see or change row content.

use crate::error::LoadError;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Trait for receiving per-source progress updates from the loader.
pub trait LoadProgress: Send + Sync {
    /// Called once the source has been read, before its first row is written.
    fn on_source_start(&self, source: &str, total: usize);

    /// Called after each row of the current source has been consumed.
    fn on_row(&self);

    /// Called when every row of the current source has been consumed.
    fn on_source_complete(&self, source: &str);

    /// Called once when the load aborts while working on `source`.
    fn on_source_failed(&self, source: &str);
}

impl<T: LoadProgress + ?Sized> LoadProgress for &T {
    fn on_source_start(&self, source: &str, total: usize) {
        (**self).on_source_start(source, total)
    }

    fn on_row(&self) {
        (**self).on_row()
    }

    fn on_source_complete(&self, source: &str) {
        (**self).on_source_complete(source)
    }

    fn on_source_failed(&self, source: &str) {
        (**self).on_source_failed(source)
    }
}

/// Takes the guard even from a poisoned lock; the guarded state is plain counters.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl LoadProgress for SilentProgress {
    fn on_source_start(&self, _source: &str, _total: usize) {}
    fn on_row(&self) {}
    fn on_source_complete(&self, _source: &str) {}
    fn on_source_failed(&self, _source: &str) {}
}

#[derive(Debug, Default, PartialEq, Eq)]
struct SourceCount {
    source: String,
    current: usize,
    total: usize,
}

/// A progress reporter that logs through `tracing` every 500 rows.
#[derive(Default)]
pub struct LogProgress {
    state: Mutex<SourceCount>,
}

impl LoadProgress for LogProgress {
    fn on_source_start(&self, source: &str, total: usize) {
        *lock(&self.state) = SourceCount {
            source: source.to_string(),
            current: 0,
            total,
        };
        tracing::info!(source, total, "Loading source.");
    }

    fn on_row(&self) {
        let mut state = lock(&self.state);
        state.current += 1;
        if state.current % 500 == 0 || state.current == state.total {
            tracing::info!(source = %state.source, "  [{}/{}]", state.current, state.total);
        }
    }

    fn on_source_complete(&self, source: &str) {
        tracing::info!(source, "Source loaded.");
    }

    fn on_source_failed(&self, source: &str) {
        let state = lock(&self.state);
        tracing::warn!(source, rows = state.current, total = state.total, "Source aborted.");
    }
}

/// Width the source title is padded to, so bars line up across sources.
const TITLE_WIDTH: usize = 32;

/// An interactive progress bar per source, drawn with `indicatif`.
pub struct BarProgress {
    style: ProgressStyle,
    current: Mutex<Option<ProgressBar>>,
}

impl BarProgress {
    pub fn new() -> Result<Self, LoadError> {
        let style = ProgressStyle::default_bar()
            .template(&format!(
                "{{prefix:{}}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
                TITLE_WIDTH
            ))?
            .progress_chars("=>-");
        Ok(Self {
            style,
            current: Mutex::new(None),
        })
    }
}

impl LoadProgress for BarProgress {
    fn on_source_start(&self, source: &str, total: usize) {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(self.style.clone());
        bar.set_prefix(source.to_string());
        *lock(&self.current) = Some(bar);
    }

    fn on_row(&self) {
        if let Some(bar) = lock(&self.current).as_ref() {
            bar.inc(1);
        }
    }

    fn on_source_complete(&self, _source: &str) {
        if let Some(bar) = lock(&self.current).take() {
            bar.finish();
        }
    }

    fn on_source_failed(&self, _source: &str) {
        if let Some(bar) = lock(&self.current).take() {
            bar.abandon();
        }
    }
}
