//! The swappable output backend behind every emit operation.
//!
//! Call sites never print directly; they go through the context's active
//! [`DebugBackend`], so a host (or a test) can redirect everything —
//! where text goes, how strings are escaped, where scratch buffers come
//! from — by installing one object. The trait object is swapped behind
//! an `RwLock`, so the whole table is replaced at once, and operations
//! added to the trait later get default implementations: backends
//! written against an older trait keep working.
//!
//! [`StderrBackend`] is the default: its own temp-buffer pool, standard
//! escaping, output to standard error. Write failures are swallowed —
//! diagnostics must never disrupt the process they diagnose.

use std::fmt;
use std::fmt::Write as _;
use std::io::Write as _;

use crate::channel::DebugClass;
use crate::dbgstr::{self, AnsiParam, WideParam};
use crate::pool::{TempBuffer, TempBufferPool};

/// The set of primitive operations used to format and emit diagnostics.
///
/// Only [`get_temp_buffer`](Self::get_temp_buffer) and
/// [`write`](Self::write) are required; the rest have standard default
/// implementations built on those two.
pub trait DebugBackend: Send + Sync {
    /// Hands out a scratch buffer of at least `min_size` bytes.
    fn get_temp_buffer(&self, min_size: usize) -> TempBuffer;

    /// Returns a scratch buffer. Dropping the handle is equivalent; this
    /// exists for call-site parity and for backends that want to account
    /// for `used` bytes.
    fn release_temp_buffer(&self, buf: TempBuffer, used: usize) {
        let _ = (buf, used);
    }

    /// Renders a byte string into a scratch buffer, quoted and escaped.
    fn dbgstr_an(&self, s: AnsiParam<'_>, len: isize) -> TempBuffer {
        let buf = self.get_temp_buffer(32);
        buf.with(|out| dbgstr::format_an(out, s, len));
        buf
    }

    /// Renders a UTF-16 string into a scratch buffer, quoted and escaped.
    fn dbgstr_wn(&self, s: WideParam<'_>, len: isize) -> TempBuffer {
        let buf = self.get_temp_buffer(32);
        buf.with(|out| dbgstr::format_wn(out, s, len));
        buf
    }

    /// Emits already-formatted text. The one required output primitive.
    fn write(&self, args: fmt::Arguments<'_>);

    /// Emits one log record.
    ///
    /// The default composes `"<class>:<channel>:<function> "` followed by
    /// the message and forwards to [`write`](Self::write). `class` is an
    /// index into the class table; an out-of-range index skips the prefix
    /// silently. A `None` message emits the prefix alone.
    fn log(&self, class: u8, channel: &str, function: &str, msg: Option<fmt::Arguments<'_>>) {
        let buf = self.get_temp_buffer(64);
        buf.with(|line| {
            if let Some(class) = DebugClass::from_repr(class) {
                let _ = write!(line, "{class}:{channel}:{function} ");
            }
            if let Some(args) = msg {
                let _ = line.write_fmt(args);
            }
        });
        self.write(format_args!("{buf}"));
        self.release_temp_buffer(buf, 0);
    }
}

/// The default backend: pool-backed buffers, output to standard error.
pub struct StderrBackend {
    pool: TempBufferPool,
}

impl StderrBackend {
    /// Creates a backend with a fresh buffer pool.
    #[must_use]
    pub fn new() -> Self {
        StderrBackend {
            pool: TempBufferPool::new(),
        }
    }
}

impl Default for StderrBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugBackend for StderrBackend {
    fn get_temp_buffer(&self, min_size: usize) -> TempBuffer {
        self.pool.get(min_size)
    }

    fn write(&self, args: fmt::Arguments<'_>) {
        // Diagnostics never fail the caller; a broken stderr is dropped.
        let _ = std::io::stderr().lock().write_fmt(args);
    }
}
