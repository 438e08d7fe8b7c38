//! Debug channels and the class-enable bitmask they carry.
//!
//! A [`DebugChannel`] is a named, independently-enableable diagnostic output
//! category owned by a module (e.g. `"relay"`, `"comctl32"`). Each channel
//! carries one enable bit per [`DebugClass`]; filter options flip those bits
//! at runtime while logging call sites test them with [`DebugChannel::enabled`].
//!
//! # Key Types
//! - [`DebugClass`]: the fixed class table (fixme/err/warn/trace)
//! - [`ClassFlags`]: one enable bit per class
//! - [`DebugChannel`]: name plus atomic flag byte
//! - [`channel_array`]: builds the sorted channel array a module registers

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use bitflags::bitflags;
use strum::{Display, EnumIter, EnumString, FromRepr};

/// A severity/category tier of diagnostic output.
///
/// The class table is fixed at build time; `class as u8` is the table index
/// and the matching enable bit is `1 << index`. Class names serialize in
/// lowercase, which is also the spelling the option-string parser accepts
/// (exact, case-sensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, FromRepr)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum DebugClass {
    /// Unimplemented or partially implemented functionality.
    Fixme = 0,
    /// Serious errors.
    Err = 1,
    /// Suspicious but recoverable conditions.
    Warn = 2,
    /// Detailed execution traces.
    Trace = 3,
}

bitflags! {
    /// Per-channel class-enable bits, one per [`DebugClass`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClassFlags: u8 {
        /// Enable bit for [`DebugClass::Fixme`]
        const FIXME = 1 << 0;
        /// Enable bit for [`DebugClass::Err`]
        const ERR = 1 << 1;
        /// Enable bit for [`DebugClass::Warn`]
        const WARN = 1 << 2;
        /// Enable bit for [`DebugClass::Trace`]
        const TRACE = 1 << 3;
    }
}

impl ClassFlags {
    /// Initial state of a freshly created channel: everything but traces.
    pub const DEFAULT: ClassFlags = ClassFlags::FIXME.union(ClassFlags::ERR).union(ClassFlags::WARN);

    /// The enable bit corresponding to a single class.
    #[must_use]
    pub fn from_class(class: DebugClass) -> Self {
        Self::from_bits_truncate(1 << class as u8)
    }
}

impl Default for ClassFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A named diagnostic channel with an atomically mutable class mask.
///
/// Channels are shared, not copied: the owning module builds an
/// `Arc<[DebugChannel]>` (see [`channel_array`]) and hands a clone to the
/// registry, so option application on the registry side and
/// [`enabled`](Self::enabled) checks on the logging side see the same flag
/// byte. Flag updates use relaxed atomics; they are visible across threads
/// but carry no ordering with unrelated state.
#[derive(Debug)]
pub struct DebugChannel {
    name: String,
    flags: AtomicU8,
}

impl DebugChannel {
    /// Creates a channel with the default class mask ([`ClassFlags::DEFAULT`]).
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_flags(name, ClassFlags::DEFAULT)
    }

    /// Creates a channel with an explicit initial class mask.
    pub fn with_flags(name: impl Into<String>, flags: ClassFlags) -> Self {
        DebugChannel {
            name: name.into(),
            flags: AtomicU8::new(flags.bits()),
        }
    }

    /// The channel name, the key option rules match against.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current class mask.
    #[must_use]
    pub fn flags(&self) -> ClassFlags {
        ClassFlags::from_bits_truncate(self.flags.load(Ordering::Relaxed))
    }

    /// Whether output of the given class is currently enabled.
    ///
    /// This is the cheap test logging call sites perform before paying any
    /// formatting cost.
    #[must_use]
    pub fn enabled(&self, class: DebugClass) -> bool {
        self.flags().contains(ClassFlags::from_class(class))
    }

    /// Applies one filter rule: clear first, then set.
    pub(crate) fn apply(&self, set: ClassFlags, clear: ClassFlags) {
        let _ = self
            .flags
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |flags| {
                Some((flags & !clear.bits()) | set.bits())
            });
    }
}

impl fmt::Display for DebugChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builds the sorted channel array a module hands to the registry.
///
/// The registry locates channels by binary search, so the array it receives
/// must be sorted by name; this helper takes care of that. All channels start
/// with [`ClassFlags::DEFAULT`].
///
/// # Examples
///
/// ```rust
/// use dbgchan::{channel_array, DebugClass};
///
/// let channels = channel_array(&["relay", "heap", "module"]);
/// assert_eq!(channels[0].name(), "heap");
/// assert!(channels[0].enabled(DebugClass::Err));
/// assert!(!channels[0].enabled(DebugClass::Trace));
/// ```
#[must_use]
pub fn channel_array(names: &[&str]) -> Arc<[DebugChannel]> {
    let mut channels: Vec<DebugChannel> = names.iter().map(|name| DebugChannel::new(*name)).collect();
    channels.sort_by(|a, b| a.name().cmp(b.name()));
    channels.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_class_index_and_bit() {
        assert_eq!(DebugClass::Fixme as u8, 0);
        assert_eq!(DebugClass::Trace as u8, 3);
        assert_eq!(ClassFlags::from_class(DebugClass::Fixme), ClassFlags::FIXME);
        assert_eq!(ClassFlags::from_class(DebugClass::Trace), ClassFlags::TRACE);
    }

    #[test]
    fn test_class_names_roundtrip() {
        for class in DebugClass::iter() {
            let name = class.to_string();
            assert_eq!(DebugClass::from_str(&name).unwrap(), class);
        }
        assert_eq!(DebugClass::from_str("warn").unwrap(), DebugClass::Warn);
        // Exact match only: no prefixes, no case folding.
        assert!(DebugClass::from_str("warn2").is_err());
        assert!(DebugClass::from_str("Warn").is_err());
        assert!(DebugClass::from_str("").is_err());
    }

    #[test]
    fn test_class_from_repr() {
        assert_eq!(DebugClass::from_repr(2), Some(DebugClass::Warn));
        assert_eq!(DebugClass::from_repr(4), None);
        assert_eq!(DebugClass::from_repr(0xff), None);
    }

    #[test]
    fn test_default_flags() {
        let channel = DebugChannel::new("relay");
        assert!(channel.enabled(DebugClass::Fixme));
        assert!(channel.enabled(DebugClass::Err));
        assert!(channel.enabled(DebugClass::Warn));
        assert!(!channel.enabled(DebugClass::Trace));
    }

    #[test]
    fn test_apply_clears_then_sets() {
        let channel = DebugChannel::new("relay");
        channel.apply(ClassFlags::TRACE, ClassFlags::all());
        assert_eq!(channel.flags(), ClassFlags::TRACE);

        // A bit named in both masks ends up set.
        channel.apply(ClassFlags::TRACE, ClassFlags::TRACE);
        assert_eq!(channel.flags(), ClassFlags::TRACE);
    }

    #[test]
    fn test_channel_array_sorted() {
        let channels = channel_array(&["zeta", "alpha", "midi"]);
        let names: Vec<&str> = channels.iter().map(DebugChannel::name).collect();
        assert_eq!(names, ["alpha", "midi", "zeta"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(DebugChannel::new("heap").to_string(), "heap");
        assert_eq!(DebugClass::Fixme.to_string(), "fixme");
    }
}
