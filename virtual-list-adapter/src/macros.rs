// Events compile to nothing unless the `tracing` feature is enabled.

#[cfg(feature = "tracing")]
macro_rules! vlog {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "virtual_list_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! vlog {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! vtrace {
    ($($tt:tt)*) => { vlog!(trace, $($tt)*) };
}

macro_rules! vdebug {
    ($($tt:tt)*) => { vlog!(debug, $($tt)*) };
}

macro_rules! vwarn {
    ($($tt:tt)*) => { vlog!(warn, $($tt)*) };
}
