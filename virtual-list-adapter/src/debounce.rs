use core::fmt;

/// The pending-call state behind every debounce wrapper.
///
/// Each `call` replaces the pending arguments and pushes the due time to `now_ms + wait_ms`, so
/// only the last call of a burst survives. Nothing runs on its own: the host polls with its
/// clock (typically from a timer or frame tick) and receives the arguments once they are due.
#[derive(Clone, Debug)]
pub struct Debouncer<A> {
    wait_ms: u64,
    pending: Option<Pending<A>>,
}

#[derive(Clone, Debug)]
struct Pending<A> {
    args: A,
    due_ms: u64,
}

impl<A> Debouncer<A> {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            pending: None,
        }
    }

    pub fn wait_ms(&self) -> u64 {
        self.wait_ms
    }

    /// Changes the quiet period for subsequent calls. An already pending call keeps its due time.
    pub fn set_wait_ms(&mut self, wait_ms: u64) {
        self.wait_ms = wait_ms;
    }

    /// Schedules `args`, cancelling any call that is still pending.
    pub fn call(&mut self, args: A, now_ms: u64) {
        let due_ms = now_ms.saturating_add(self.wait_ms);
        vtrace!(
            now_ms,
            due_ms,
            replaced = self.pending.is_some(),
            "Debouncer::call"
        );
        self.pending = Some(Pending { args, due_ms });
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_ms(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.due_ms)
    }

    pub fn pending_args(&self) -> Option<&A> {
        self.pending.as_ref().map(|p| &p.args)
    }

    /// Takes the pending arguments if their due time has been reached.
    pub fn poll(&mut self, now_ms: u64) -> Option<A> {
        let due = self.pending.as_ref().is_some_and(|p| now_ms >= p.due_ms);
        if !due {
            return None;
        }
        self.pending.take().map(|p| p.args)
    }

    /// Drops the pending call without running it, returning its arguments.
    pub fn cancel(&mut self) -> Option<A> {
        self.pending.take().map(|p| p.args)
    }
}

/// A debounced function: only the last call in any `wait_ms` burst executes.
///
/// Returned by [`debounce`]. This also serves as the component-level variant: keep the value
/// alive across renders, call [`Debounced::tick`] from the host's timer, and drop it on unmount.
/// Dropping discards the pending call, so the callback never runs against torn-down state.
pub struct Debounced<A, F> {
    f: F,
    state: Debouncer<A>,
}

/// Wraps `f` so that bursts of calls collapse into one, `wait_ms` after the last call.
pub fn debounce<A, F>(f: F, wait_ms: u64) -> Debounced<A, F>
where
    F: FnMut(A),
{
    Debounced {
        f,
        state: Debouncer::new(wait_ms),
    }
}

impl<A, F> Debounced<A, F>
where
    F: FnMut(A),
{
    pub fn call(&mut self, args: A, now_ms: u64) {
        self.state.call(args, now_ms);
    }

    /// Runs the pending call if it is due. Returns `true` when the callback ran.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(args) = self.state.poll(now_ms) else {
            return false;
        };
        vtrace!(now_ms, "Debounced::tick: firing");
        (self.f)(args);
        true
    }

    /// Runs the pending call immediately, regardless of its due time.
    pub fn flush(&mut self) -> bool {
        let Some(args) = self.state.cancel() else {
            return false;
        };
        (self.f)(args);
        true
    }

    /// Drops the pending call. Returns `true` if there was one.
    pub fn cancel(&mut self) -> bool {
        self.state.cancel().is_some()
    }

    /// Replaces the wrapped function. The pending call belonged to the old one and is dropped.
    pub fn set_callback(&mut self, f: F) {
        if self.state.cancel().is_some() {
            vdebug!("Debounced::set_callback: dropped pending call");
        }
        self.f = f;
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    pub fn due_ms(&self) -> Option<u64> {
        self.state.due_ms()
    }

    pub fn wait_ms(&self) -> u64 {
        self.state.wait_ms()
    }

    pub fn set_wait_ms(&mut self, wait_ms: u64) {
        self.state.set_wait_ms(wait_ms);
    }
}

impl<A: fmt::Debug, F> fmt::Debug for Debounced<A, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// A value that settles `delay_ms` after it stops changing.
///
/// Typical use: a search input whose query should only be applied once typing pauses.
#[derive(Clone, Debug)]
pub struct DebouncedValue<T> {
    value: T,
    state: Debouncer<T>,
}

impl<T: PartialEq> DebouncedValue<T> {
    pub fn new(initial: T, delay_ms: u64) -> Self {
        Self {
            value: initial,
            state: Debouncer::new(delay_ms),
        }
    }

    /// The settled value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The latest input that has not settled yet.
    pub fn pending_value(&self) -> Option<&T> {
        self.state.pending_args()
    }

    /// Feeds a new input. Re-submitting the latest input does not restart the delay.
    ///
    /// Returns `true` if the delay was (re)started.
    pub fn set(&mut self, value: T, now_ms: u64) -> bool {
        let latest = self.state.pending_args().unwrap_or(&self.value);
        if *latest == value {
            return false;
        }
        self.state.call(value, now_ms);
        true
    }

    /// Settles the pending input if its delay has elapsed. Returns `true` when the value changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(next) = self.state.poll(now_ms) else {
            return false;
        };
        let changed = next != self.value;
        self.value = next;
        changed
    }

    pub fn cancel(&mut self) -> bool {
        self.state.cancel().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    pub fn delay_ms(&self) -> u64 {
        self.state.wait_ms()
    }

    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.state.set_wait_ms(delay_ms);
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
