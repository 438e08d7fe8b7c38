//! The context object tying registry, options, and backend together.
//!
//! All engine state is explicit: a [`DebugContext`] owns one channel
//! registry and one active backend, lives for as long as its owner keeps
//! it, and needs no init or teardown calls. A process-global instance
//! (created lazily, alive through process exit so diagnostics work even
//! from static destructors) backs the crate-level convenience functions
//! and the logging macros; tests and embedders that want isolation simply
//! construct their own instance instead.

use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

use crate::backend::{DebugBackend, StderrBackend};
use crate::channel::{ClassFlags, DebugChannel};
use crate::dbgstr::{AnsiParam, WideParam};
use crate::options;
use crate::pool::TempBuffer;
use crate::registry::{ChannelRegistry, RegistrationHandle};

/// One self-contained instance of the diagnostic engine.
pub struct DebugContext {
    registry: ChannelRegistry,
    backend: RwLock<Arc<dyn DebugBackend>>,
}

impl DebugContext {
    /// Creates a context with an empty registry and the default
    /// [`StderrBackend`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(Arc::new(StderrBackend::new()))
    }

    /// Creates a context with a caller-supplied backend.
    #[must_use]
    pub fn with_backend(backend: Arc<dyn DebugBackend>) -> Self {
        DebugContext {
            registry: ChannelRegistry::new(),
            backend: RwLock::new(backend),
        }
    }

    /// Registers a module's sorted channel array; every option already on
    /// record is applied to it before this returns.
    pub fn register(&self, channels: Arc<[DebugChannel]>) -> RegistrationHandle {
        self.registry.register(channels)
    }

    /// Drops a registration. Null and stale handles are no-ops.
    pub fn unregister(&self, handle: RegistrationHandle) {
        self.registry.unregister(handle);
    }

    /// Records one filter option and applies it to every registered module.
    pub fn add_option(&self, name: &str, set: ClassFlags, clear: ClassFlags) {
        self.registry.add_option(name, set, clear);
    }

    /// Parses an option spec, recording and applying each token that
    /// parses; returns the number of tokens that did not.
    pub fn parse_options(&self, spec: &str) -> usize {
        let (rules, errors) = options::parse_spec(spec);
        for rule in rules {
            self.registry.add_rule(rule);
        }
        errors
    }

    /// Reads an option spec from an environment variable and feeds it to
    /// [`parse_options`](Self::parse_options).
    ///
    /// An unset, empty, or non-Unicode variable contributes no options
    /// and counts no errors.
    pub fn parse_options_from_env(&self, var: &str) -> usize {
        match std::env::var(var) {
            Ok(spec) if !spec.is_empty() => self.parse_options(&spec),
            _ => 0,
        }
    }

    /// Swaps in a new backend and returns the previous one, so a caller
    /// can restore it later by installing it again.
    pub fn install_backend(&self, backend: Arc<dyn DebugBackend>) -> Arc<dyn DebugBackend> {
        std::mem::replace(&mut *write_lock!(self.backend), backend)
    }

    /// The currently active backend.
    #[must_use]
    pub fn backend(&self) -> Arc<dyn DebugBackend> {
        read_lock!(self.backend).clone()
    }

    /// Emits already-formatted text through the active backend.
    pub fn write(&self, args: fmt::Arguments<'_>) {
        self.backend().write(args);
    }

    /// Emits one log record through the active backend.
    pub fn log(&self, class: u8, channel: &str, function: &str, msg: Option<fmt::Arguments<'_>>) {
        self.backend().log(class, channel, function, msg);
    }

    /// Renders a byte string through the active backend.
    pub fn dbgstr_an(&self, s: AnsiParam<'_>, len: isize) -> TempBuffer {
        self.backend().dbgstr_an(s, len)
    }

    /// Renders a UTF-16 string through the active backend.
    pub fn dbgstr_wn(&self, s: WideParam<'_>, len: isize) -> TempBuffer {
        self.backend().dbgstr_wn(s, len)
    }

    /// Number of filter options on record.
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.registry.option_count()
    }

    /// Number of live module registrations.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.registry.module_count()
    }
}

impl Default for DebugContext {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: OnceLock<DebugContext> = OnceLock::new();

/// The process-global context used by the crate-level functions and the
/// logging macros. Created on first use; never torn down.
pub fn global() -> &'static DebugContext {
    GLOBAL.get_or_init(DebugContext::new)
}

/// Registers a channel array with the global context.
pub fn register(channels: Arc<[DebugChannel]>) -> RegistrationHandle {
    global().register(channels)
}

/// Unregisters a handle from the global context.
pub fn unregister(handle: RegistrationHandle) {
    global().unregister(handle);
}

/// Records one filter option in the global context.
pub fn add_option(name: &str, set: ClassFlags, clear: ClassFlags) {
    global().add_option(name, set, clear);
}

/// Parses an option spec into the global context; returns the error count.
pub fn parse_options(spec: &str) -> usize {
    global().parse_options(spec)
}

/// Sources an option spec from an environment variable into the global
/// context; returns the error count.
pub fn parse_options_from_env(var: &str) -> usize {
    global().parse_options_from_env(var)
}

/// Swaps the global context's backend, returning the previous one.
pub fn install_backend(backend: Arc<dyn DebugBackend>) -> Arc<dyn DebugBackend> {
    global().install_backend(backend)
}

/// The global context's active backend.
#[must_use]
pub fn backend() -> Arc<dyn DebugBackend> {
    global().backend()
}

/// Emits already-formatted text through the global context.
pub fn dbg_write(args: fmt::Arguments<'_>) {
    global().write(args);
}

/// Emits one log record through the global context.
pub fn dbg_log(class: u8, channel: &str, function: &str, msg: Option<fmt::Arguments<'_>>) {
    global().log(class, channel, function, msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::channel_array;
    use std::sync::Mutex;

    struct CaptureBackend {
        pool: crate::pool::TempBufferPool,
        lines: Mutex<Vec<String>>,
    }

    impl CaptureBackend {
        fn new() -> Self {
            CaptureBackend {
                pool: crate::pool::TempBufferPool::new(),
                lines: Mutex::new(Vec::new()),
            }
        }
    }

    impl DebugBackend for CaptureBackend {
        fn get_temp_buffer(&self, min_size: usize) -> TempBuffer {
            self.pool.get(min_size)
        }

        fn write(&self, args: fmt::Arguments<'_>) {
            lock!(self.lines).push(args.to_string());
        }
    }

    #[test]
    fn test_parse_options_applies_immediately() {
        let ctx = DebugContext::new();
        let channels = channel_array(&["relay"]);
        ctx.register(channels.clone());

        let errors = ctx.parse_options("trace+relay,bogus+");
        assert_eq!(errors, 1);
        assert!(channels[0].enabled(crate::DebugClass::Trace));
        assert_eq!(ctx.option_count(), 1);
    }

    #[test]
    fn test_install_backend_swaps_and_returns_old() {
        let ctx = DebugContext::new();
        let capture = Arc::new(CaptureBackend::new());
        let old = ctx.install_backend(capture.clone());

        ctx.write(format_args!("through capture"));
        assert_eq!(*lock!(capture.lines), ["through capture"]);

        ctx.install_backend(old);
        ctx.write(format_args!("through default again"));
        assert_eq!(lock!(capture.lines).len(), 1);
    }

    #[test]
    fn test_env_sourcing() {
        let ctx = DebugContext::new();
        assert_eq!(ctx.parse_options_from_env("DBGCHAN_TEST_UNSET_VAR"), 0);
        assert_eq!(ctx.option_count(), 0);

        std::env::set_var("DBGCHAN_TEST_CTX_VAR", "warn-all,junk+");
        assert_eq!(ctx.parse_options_from_env("DBGCHAN_TEST_CTX_VAR"), 1);
        assert_eq!(ctx.option_count(), 1);
        std::env::remove_var("DBGCHAN_TEST_CTX_VAR");
    }

    #[test]
    fn test_contexts_are_isolated() {
        let a = DebugContext::new();
        let b = DebugContext::new();
        let channels = channel_array(&["relay"]);
        a.register(channels.clone());
        b.add_option("relay", ClassFlags::TRACE, ClassFlags::empty());

        assert!(!channels[0].enabled(crate::DebugClass::Trace));
        assert_eq!(a.option_count(), 0);
        assert_eq!(b.module_count(), 0);
    }
}
