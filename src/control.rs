//! Abort flag and progress reporting for long-running stages.

use crate::error::TomographyError;
use std::sync::atomic::Ordering::Relaxed;
use std::sync::atomic::{AtomicBool, AtomicUsize};
use std::sync::{Arc, RwLock};

/// Handles a host keeps to watch and stop a running computation.
///
/// `progress_lock` holds `Some(fraction)` while a stage runs and `None` when idle.
/// Raising `abort_flag` makes the running stage return [`TomographyError::Aborted`];
/// the stage lowers the flag again so the next computation starts clean.
#[derive(Clone, Debug, Default)]
pub struct ComputeControl {
    pub abort_flag: Arc<AtomicBool>,
    pub progress_lock: Arc<RwLock<Option<f32>>>,
}

impl ComputeControl {
    pub fn new() -> ComputeControl {
        ComputeControl::default()
    }

    pub fn abort(&self) {
        self.abort_flag.store(true, Relaxed);
    }

    pub fn is_aborted(&self) -> bool {
        self.abort_flag.load(Relaxed)
    }

    pub fn progress(&self) -> Option<f32> {
        self.progress_lock.read().map(|p| *p).unwrap_or(None)
    }

    pub(crate) fn start(&self) -> ProgressCounter<'_> {
        self.set_progress(Some(0.0));
        ProgressCounter {
            control: self,
            done: AtomicUsize::new(0),
        }
    }

    /// Clears the progress bar and turns an unfinished loop into `Aborted`.
    pub(crate) fn finish(&self, completed: bool, stage: &str) -> Result<(), TomographyError> {
        self.set_progress(None);
        if completed {
            Ok(())
        } else {
            log::warn!("{} aborted", stage);
            self.abort_flag.store(false, Relaxed);
            Err(TomographyError::Aborted)
        }
    }

    /// Clears the progress bar and the abort flag after a stage failed, so a
    /// flag raised during the failing run does not stop the next one.
    pub(crate) fn fail(&self, stage: &str, err: TomographyError) -> TomographyError {
        self.set_progress(None);
        self.abort_flag.store(false, Relaxed);
        log::error!("{} failed: {}", stage, err);
        err
    }

    fn set_progress(&self, value: Option<f32>) {
        if let Ok(mut p) = self.progress_lock.write() {
            *p = value;
        }
    }
}

/// Counts finished work items of one stage and publishes the fraction.
pub(crate) struct ProgressCounter<'a> {
    control: &'a ComputeControl,
    done: AtomicUsize,
}

impl ProgressCounter<'_> {
    pub(crate) fn step(&self, total: usize) {
        let done = self.done.fetch_add(1, Relaxed) + 1;
        self.control
            .set_progress(Some(done as f32 / total.max(1) as f32));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_runs_from_zero_to_idle() {
        let control = ComputeControl::new();
        assert_eq!(control.progress(), None);
        let counter = control.start();
        assert_eq!(control.progress(), Some(0.0));
        counter.step(4);
        counter.step(4);
        assert_eq!(control.progress(), Some(0.5));
        assert!(control.finish(true, "test").is_ok());
        assert_eq!(control.progress(), None);
    }

    #[test]
    fn test_failed_stage_clears_flag_and_progress() {
        let control = ComputeControl::new();
        let _counter = control.start();
        control.abort();
        let err = control.fail("test", TomographyError::OutOfRange("x".to_string()));
        assert_eq!(err, TomographyError::OutOfRange("x".to_string()));
        assert!(!control.is_aborted());
        assert_eq!(control.progress(), None);
    }

    #[test]
    fn test_unfinished_stage_reports_abort_and_rearms() {
        let control = ComputeControl::new();
        control.abort();
        assert!(control.is_aborted());
        assert_eq!(
            control.finish(false, "test"),
            Err(TomographyError::Aborted)
        );
        assert!(!control.is_aborted());
    }
}
