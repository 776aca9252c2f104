//! # cancellable_loops
//!
//! Sequential and Rayon-parallel loops that stop early once an abort flag is raised.
//!
//! Every loop reports whether it ran to completion, so callers can tell a finished
//! result apart from a partially written one and discard the latter.
//!
//! ## Example
//!
//! ```
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use cancellable_loops::for_each_cancellable;
//!
//! let abort_flag = AtomicBool::new(false);
//! let mut columns_done = 0;
//!
//! let finished = for_each_cancellable(0..180, &abort_flag, |angle| {
//!     columns_done += 1;
//!     if angle == 9 {
//!         abort_flag.store(true, Ordering::Relaxed);
//!     }
//! });
//!
//! assert!(!finished);
//! assert_eq!(columns_done, 10);
//! ```

use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Runs `func` over `iter` in order, checking `abort_flag` before each item.
///
/// Returns `true` if every item was processed and `false` if the loop was cut short.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use cancellable_loops::for_each_cancellable;
///
/// let abort_flag = AtomicBool::new(false);
/// let mut sum = 0;
/// assert!(for_each_cancellable(1..=4, &abort_flag, |i| sum += i));
/// assert_eq!(sum, 10);
/// ```
pub fn for_each_cancellable<I, F, T>(iter: I, abort_flag: &AtomicBool, mut func: F) -> bool
where
    I: IntoIterator<Item = T>,
    F: FnMut(T),
{
    for item in iter {
        if abort_flag.load(Ordering::Relaxed) {
            return false;
        }
        func(item);
    }
    true
}

/// Parallel counterpart of [`for_each_cancellable`].
///
/// Items already handed to a worker finish; items not yet started are skipped once
/// the flag is set. Returns `true` only if no item was skipped.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
/// use cancellable_loops::par_for_each_cancellable;
///
/// let abort_flag = AtomicBool::new(false);
/// let visited = AtomicUsize::new(0);
///
/// let finished = par_for_each_cancellable(0..64, &abort_flag, |_| {
///     visited.fetch_add(1, Ordering::Relaxed);
/// });
///
/// assert!(finished);
/// assert_eq!(visited.load(Ordering::Relaxed), 64);
/// ```
pub fn par_for_each_cancellable<I, F>(iter: I, abort_flag: &AtomicBool, func: F) -> bool
where
    I: IntoParallelIterator,
    F: Fn(I::Item) + Sync + Send,
    I::Item: Send,
{
    iter.into_par_iter()
        .try_for_each(|item| {
            if abort_flag.load(Ordering::Relaxed) {
                Err(())
            } else {
                func(item);
                Ok(())
            }
        })
        .is_ok()
}

enum Stop<E> {
    Aborted,
    Failed(E),
}

/// Parallel loop whose body may fail.
///
/// Returns `Ok(true)` when every item succeeded, `Ok(false)` when the abort flag
/// stopped the loop, and the first observed error otherwise.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use cancellable_loops::par_try_for_each_cancellable;
///
/// let abort_flag = AtomicBool::new(false);
///
/// let ok: Result<bool, String> = par_try_for_each_cancellable(0..8, &abort_flag, |_| Ok(()));
/// assert_eq!(ok, Ok(true));
///
/// let failed = par_try_for_each_cancellable(0..8, &abort_flag, |i| {
///     if i == 3 { Err(format!("bin {i}")) } else { Ok(()) }
/// });
/// assert_eq!(failed, Err("bin 3".to_string()));
/// ```
pub fn par_try_for_each_cancellable<I, F, E>(
    iter: I,
    abort_flag: &AtomicBool,
    func: F,
) -> Result<bool, E>
where
    I: IntoParallelIterator,
    F: Fn(I::Item) -> Result<(), E> + Sync + Send,
    I::Item: Send,
    E: Send,
{
    let outcome = iter.into_par_iter().try_for_each(|item| {
        if abort_flag.load(Ordering::Relaxed) {
            Err(Stop::Aborted)
        } else {
            func(item).map_err(Stop::Failed)
        }
    });

    match outcome {
        Ok(()) => Ok(true),
        Err(Stop::Aborted) => Ok(false),
        Err(Stop::Failed(err)) => Err(err),
    }
}
