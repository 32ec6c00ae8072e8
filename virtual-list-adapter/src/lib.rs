//! Host-driven bindings for the `virtual-list` crate.
//!
//! The `virtual-list` crate is pure arithmetic and state. This crate adds the pieces that depend
//! on time or on platform capabilities, still without holding any UI objects:
//!
//! - Debounce and leading-edge throttle wrappers (functions and values)
//! - Frame-gated page scroll tracking with subscribers
//! - Visibility observers over a pluggable intersection backend
//!
//! Nothing here reads a clock or spawns work. Adapters pass `now_ms` from their own timeline and
//! call `tick`/`on_frame` from their own timers and animation frames.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod debounce;
mod observer;
mod throttle;
mod tracker;


pub use debounce::{Debounced, DebouncedValue, Debouncer, debounce};
pub use observer::{IntersectionBackend, ObserverConfig, VisibilityObserver};
pub use throttle::{Throttled, throttle};
pub use tracker::{ScrollListener, ScrollTracker, SubscriptionId};
