/// Helper macro for locking items
///
/// ```rust, ignore
///  let mut data = lock!(my_mutex);
///  data.some_field = 42;
/// ```
macro_rules! lock {
    ($lock:expr) => {
        $lock.lock().expect("Failed to acquire lock")
    };
}

/// Helper macro for reading locked items
///
/// ```rust, ignore
///  let data = read_lock!(my_rwlock);
///  println!("{}", data.some_field);
/// ```
macro_rules! read_lock {
    ($rwlock:expr) => {
        $rwlock.read().expect("Failed to acquire read lock")
    };
}

/// Helper macro for writing to locked items
///
/// ```rust, ignore
///  let mut data = write_lock!(my_rwlock);
///  data.some_field = 42;
/// ```
macro_rules! write_lock {
    ($rwlock:expr) => {
        $rwlock.write().expect("Failed to acquire write lock")
    };
}

/// Expands to the path of the enclosing function, for log prefixes.
///
/// ```rust
/// fn lookup() -> &'static str {
///     dbgchan::func_name!()
/// }
/// assert!(lookup().ends_with("lookup"));
/// ```
#[macro_export]
macro_rules! func_name {
    () => {{
        fn __here() {}
        fn __name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        let name = __name_of(__here);
        name.strip_suffix("::__here").unwrap_or(name)
    }};
}

/// Emits one log record on a channel if the given class is enabled.
///
/// The class check happens first, so a disabled channel pays no
/// formatting cost. Without a format string, the record is the
/// `class:channel:function ` prefix alone.
///
/// ```rust
/// use dbgchan::{dbg_log, DebugChannel, DebugClass};
///
/// let channel = DebugChannel::new("relay");
/// dbg_log!(DebugClass::Warn, channel, "unexpected argc {}", 3);
/// ```
#[macro_export]
macro_rules! dbg_log {
    ($class:expr, $channel:expr) => {{
        let __class = $class;
        let __channel = &$channel;
        if __channel.enabled(__class) {
            $crate::dbg_log(
                __class as u8,
                __channel.name(),
                $crate::func_name!(),
                ::core::option::Option::None,
            );
        }
    }};
    ($class:expr, $channel:expr, $($arg:tt)+) => {{
        let __class = $class;
        let __channel = &$channel;
        if __channel.enabled(__class) {
            $crate::dbg_log(
                __class as u8,
                __channel.name(),
                $crate::func_name!(),
                ::core::option::Option::Some(::core::format_args!($($arg)+)),
            );
        }
    }};
}

/// Logs at trace class on a channel. See [`dbg_log!`].
#[macro_export]
macro_rules! trace {
    ($channel:expr) => { $crate::dbg_log!($crate::DebugClass::Trace, $channel) };
    ($channel:expr, $($arg:tt)+) => { $crate::dbg_log!($crate::DebugClass::Trace, $channel, $($arg)+) };
}

/// Logs at warn class on a channel. See [`dbg_log!`].
#[macro_export]
macro_rules! warn {
    ($channel:expr) => { $crate::dbg_log!($crate::DebugClass::Warn, $channel) };
    ($channel:expr, $($arg:tt)+) => { $crate::dbg_log!($crate::DebugClass::Warn, $channel, $($arg)+) };
}

/// Logs at err class on a channel. See [`dbg_log!`].
#[macro_export]
macro_rules! err {
    ($channel:expr) => { $crate::dbg_log!($crate::DebugClass::Err, $channel) };
    ($channel:expr, $($arg:tt)+) => { $crate::dbg_log!($crate::DebugClass::Err, $channel, $($arg)+) };
}

/// Logs at fixme class on a channel. See [`dbg_log!`].
#[macro_export]
macro_rules! fixme {
    ($channel:expr) => { $crate::dbg_log!($crate::DebugClass::Fixme, $channel) };
    ($channel:expr, $($arg:tt)+) => { $crate::dbg_log!($crate::DebugClass::Fixme, $channel, $($arg)+) };
}
