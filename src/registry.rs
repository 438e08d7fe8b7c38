//! The process-wide channel registry and the filter rules applied to it.
//!
//! Modules register a sorted channel array and get back an opaque
//! [`RegistrationHandle`]; filter rules ([`OptionRule`]) accumulate in an
//! append-only list. The registry's one job is keeping those two sides
//! consistent for all time: every rule already on record is applied to a
//! newly registered module, and every new rule is applied to all modules
//! already registered. Together that makes the observable flag state
//! independent of the order in which registration and configuration happen.
//!
//! Registrations live in a [`DashMap`] keyed by a monotonically allocated
//! id, which gives O(1) unregister-by-handle without any intrusive-list
//! bookkeeping; a stale handle simply misses the map.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use dashmap::DashMap;

use crate::channel::{ClassFlags, DebugChannel};

/// Maximum stored length of an option's channel name, in bytes.
///
/// Names longer than this are silently truncated when a rule is recorded;
/// lookups then match the truncated form exactly. Truncation never splits
/// a UTF-8 code point, so the stored name may come in under the limit by
/// a byte or two for multibyte input.
pub const OPTION_NAME_CAPACITY: usize = 13;

/// One parsed filter rule: a channel name (or "all channels") plus the
/// class bits to set and clear.
///
/// Rules are immutable once recorded and are applied clear-first:
/// `flags = (flags & !clear) | set`, so a bit named in both masks ends up
/// set. An empty name means the rule applies to every channel of every
/// module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRule {
    name: String,
    set: ClassFlags,
    clear: ClassFlags,
}

impl OptionRule {
    /// Creates a rule, truncating the name to [`OPTION_NAME_CAPACITY`].
    #[must_use]
    pub fn new(name: &str, set: ClassFlags, clear: ClassFlags) -> Self {
        OptionRule {
            name: truncate_name(name),
            set,
            clear,
        }
    }

    /// The channel name this rule matches; empty means "every channel".
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class bits this rule turns on.
    #[must_use]
    pub fn set(&self) -> ClassFlags {
        self.set
    }

    /// Class bits this rule turns off.
    #[must_use]
    pub fn clear(&self) -> ClassFlags {
        self.clear
    }

    /// Applies this rule to one module's sorted channel array.
    ///
    /// Named rules locate their channel by binary search; a miss is not an
    /// error, modules legitimately have different channel sets.
    pub(crate) fn apply_to(&self, channels: &[DebugChannel]) {
        if self.name.is_empty() {
            for channel in channels {
                channel.apply(self.set, self.clear);
            }
        } else if let Ok(index) =
            channels.binary_search_by(|channel| channel.name().cmp(&self.name))
        {
            channels[index].apply(self.set, self.clear);
        }
    }
}

fn truncate_name(name: &str) -> String {
    if name.len() <= OPTION_NAME_CAPACITY {
        return name.to_owned();
    }
    let mut end = OPTION_NAME_CAPACITY;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].to_owned()
}

/// Opaque ticket identifying one module registration.
///
/// Returned by [`ChannelRegistry::register`] and consumed by
/// [`ChannelRegistry::unregister`]. [`RegistrationHandle::NULL`] and
/// already-unregistered handles unregister as silent no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationHandle(u64);

impl RegistrationHandle {
    /// The null handle; unregistering it does nothing.
    pub const NULL: RegistrationHandle = RegistrationHandle(0);

    /// Whether this is the null handle.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

struct Registration {
    channels: Arc<[DebugChannel]>,
}

/// Tracks registered modules and keeps every known filter rule applied to
/// every known channel.
///
/// All three mutating operations are safe to call concurrently. An
/// interleaved `register`/`add_option` pair can apply one rule to one
/// channel twice, but the per-rule transform is idempotent, so the final
/// flag state is the same; no interleaving can cause a rule to be missed,
/// because `register` publishes the module before snapshotting the rule
/// list.
pub struct ChannelRegistry {
    modules: DashMap<u64, Registration>,
    options: Mutex<Vec<OptionRule>>,
    next_id: AtomicU64,
}

impl ChannelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        ChannelRegistry {
            modules: DashMap::new(),
            options: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Registers a module's channel array and applies every rule on record
    /// to it, in append order.
    ///
    /// The array must be sorted by channel name; named rules locate their
    /// channel by binary search. An unsorted array trips a debug
    /// assertion.
    pub fn register(&self, channels: Arc<[DebugChannel]>) -> RegistrationHandle {
        debug_assert!(
            channels.windows(2).all(|pair| pair[0].name() <= pair[1].name()),
            "channel array must be sorted by name"
        );

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.modules.insert(
            id,
            Registration {
                channels: channels.clone(),
            },
        );

        let snapshot = lock!(self.options).clone();
        for rule in &snapshot {
            rule.apply_to(&channels);
        }
        RegistrationHandle(id)
    }

    /// Removes a registration; later rules no longer reach its channels.
    ///
    /// The null handle and handles already unregistered are no-ops. The
    /// channel array itself is shared storage and is untouched.
    pub fn unregister(&self, handle: RegistrationHandle) {
        if handle.is_null() {
            return;
        }
        self.modules.remove(&handle.0);
    }

    /// Records a rule and applies it to every live registration.
    pub fn add_option(&self, name: &str, set: ClassFlags, clear: ClassFlags) {
        self.add_rule(OptionRule::new(name, set, clear));
    }

    /// Records an already-built rule and applies it to every live
    /// registration.
    pub fn add_rule(&self, rule: OptionRule) {
        lock!(self.options).push(rule.clone());
        for entry in self.modules.iter() {
            rule.apply_to(&entry.channels);
        }
    }

    /// Number of rules on record.
    #[must_use]
    pub fn option_count(&self) -> usize {
        lock!(self.options).len()
    }

    /// Number of live registrations.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
