use core::fmt;
use core::marker::PhantomData;

/// A leading-edge throttled function.
///
/// The first call runs immediately and opens a `limit_ms` window; calls inside the window are
/// dropped (not queued). The first call at or after the window's end runs immediately and opens
/// the next window.
///
/// Returned by [`throttle`]; also usable as a long-lived component field. There is nothing to
/// cancel on teardown: the leading call already ran and nothing is scheduled.
pub struct Throttled<A, R, F> {
    f: F,
    limit_ms: u64,
    last_run_ms: Option<u64>,
    last_result: Option<R>,
    _args: PhantomData<fn(A)>,
}

/// Wraps `f` so that it runs at most once per `limit_ms` window.
pub fn throttle<A, R, F>(f: F, limit_ms: u64) -> Throttled<A, R, F>
where
    F: FnMut(A) -> R,
{
    Throttled {
        f,
        limit_ms,
        last_run_ms: None,
        last_result: None,
        _args: PhantomData,
    }
}

impl<A, R, F> Throttled<A, R, F>
where
    F: FnMut(A) -> R,
{
    /// Runs `f(args)` unless the current window is still open.
    ///
    /// Returns the fresh result when the call ran, `None` when it was dropped.
    pub fn call(&mut self, args: A, now_ms: u64) -> Option<&R> {
        if !self.is_ready(now_ms) {
            vtrace!(now_ms, "Throttled::call: dropped");
            return None;
        }
        vtrace!(now_ms, "Throttled::call: running");
        self.last_run_ms = Some(now_ms);
        self.last_result = Some((self.f)(args));
        self.last_result.as_ref()
    }

    /// Whether a call at `now_ms` would run.
    pub fn is_ready(&self, now_ms: u64) -> bool {
        match self.last_run_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.limit_ms,
            None => true,
        }
    }

    /// Result of the most recent call that ran.
    pub fn last_result(&self) -> Option<&R> {
        self.last_result.as_ref()
    }

    pub fn last_run_ms(&self) -> Option<u64> {
        self.last_run_ms
    }

    pub fn limit_ms(&self) -> u64 {
        self.limit_ms
    }

    pub fn set_limit_ms(&mut self, limit_ms: u64) {
        self.limit_ms = limit_ms;
    }

    /// Closes the current window so the next call runs immediately.
    pub fn reset(&mut self) {
        self.last_run_ms = None;
    }

    /// Replaces the wrapped function. The current window stays open.
    pub fn set_callback(&mut self, f: F) {
        self.f = f;
    }
}

impl<A, R: fmt::Debug, F> fmt::Debug for Throttled<A, R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttled")
            .field("limit_ms", &self.limit_ms)
            .field("last_run_ms", &self.last_run_ms)
            .field("last_result", &self.last_result)
            .finish_non_exhaustive()
    }
}
