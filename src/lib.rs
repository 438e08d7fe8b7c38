// Copyright 2026 The dbgchan developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # dbgchan
//!
//! A runtime-filterable diagnostic channel engine: the generic core a large
//! compatibility layer or plugin host needs for its debug output. Every
//! module of the host registers a set of named **channels**; each channel
//! carries one enable bit per **class** (fixme/err/warn/trace); filter
//! **options** parsed from a textual spec string flip those bits at runtime;
//! and everything is emitted through a swappable **backend**.
//!
//! ## Features
//!
//! - **Dynamic channel registry** - modules register and unregister channel
//!   arrays at any time; every known filter option is applied to every known
//!   channel, regardless of the order in which they appear
//! - **Textual filter specs** - `"fixme-all,+relay,trace+comctl32"`-style
//!   option strings, parsed best-effort with an error count, plus a strict
//!   fail-fast variant for configuration validation
//! - **Pluggable backend** - a single trait object controls where output
//!   goes, how strings are escaped, and where scratch buffers come from;
//!   swap it at runtime and get the old one back
//! - **Cheap call sites** - logging macros test one atomic byte before
//!   paying any formatting cost; scratch buffers come from a fixed
//!   round-robin pool with no per-call heap churn
//! - **No setup** - a lazily created process-global context backs the
//!   crate-level functions and macros; isolated [`DebugContext`] instances
//!   are available for tests and embedders
//!
//! ## Quick Start
//!
//! ```rust
//! use dbgchan::prelude::*;
//! use dbgchan::trace;
//!
//! // A module declares its channels once, sorted automatically.
//! let channels = channel_array(&["heap", "relay"]);
//! let handle = dbgchan::register(channels.clone());
//!
//! // Configuration can arrive before or after registration; the result
//! // is the same. Typically sourced from an environment variable.
//! let errors = dbgchan::parse_options("trace+relay");
//! assert_eq!(errors, 0);
//!
//! // Call sites check the channel first, then format and emit.
//! let relay = &channels[1];
//! assert!(relay.enabled(DebugClass::Trace));
//! trace!(relay, "forwarding {} bytes\n", 117);
//!
//! dbgchan::unregister(handle);
//! ```
//!
//! ## Architecture
//!
//! - [`channel`] - channels, classes, and the class-enable bitmask
//! - [`registry`] - module registrations and the append-only option list
//! - [`options`] - the option-spec grammar and its two parsers
//! - [`backend`] - the output trait, its default methods, and [`StderrBackend`]
//! - [`pool`] - the round-robin scratch-buffer pool
//! - [`dbgstr`] - quoted/escaped string renderings for log arguments
//! - [`context`] - the [`DebugContext`] object and the process-global instance
//!
//! ## Filter Option Strings
//!
//! A spec is a comma-separated token list. A bare name enables every class
//! for that channel (`relay`, `+relay`); a leading `-` disables them
//! (`-relay`). A class name followed by `+`/`-` flips a single class, for
//! one channel (`fixme-dbghelp`) or for all (`fixme-`). The name `all` is
//! an alias for every channel. Unknown tokens are counted and skipped;
//! diagnostics configuration is best-effort by design. See [`options`] for
//! the precise grammar and its edge cases.
//!
//! ## Error Handling
//!
//! The engine never propagates failures to logging call sites: bad spec
//! tokens are counted, lookup misses are silent, and output errors are
//! swallowed. The only [`Result`]-returning surface is the strict spec
//! parser, for hosts that validate configuration up front:
//!
//! ```rust
//! use dbgchan::{options::parse_spec_strict, Error};
//!
//! let err = parse_spec_strict("relay,bogus+").unwrap_err();
//! assert!(matches!(err, Error::UnknownClass { .. }));
//! ```

#[macro_use]
pub(crate) mod macros;

pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and functions.
///
/// # Example
///
/// ```rust
/// use dbgchan::prelude::*;
///
/// let ctx = DebugContext::new();
/// let channels = channel_array(&["relay"]);
/// ctx.register(channels.clone());
/// ctx.parse_options("-relay");
/// assert_eq!(channels[0].flags(), ClassFlags::empty());
/// ```
pub mod prelude;

/// Debug channels and the class-enable bitmask they carry.
///
/// # Key Types
///
/// - [`DebugChannel`] - a named channel with an atomically mutable mask
/// - [`DebugClass`] - the fixed class table (fixme/err/warn/trace)
/// - [`ClassFlags`] - one enable bit per class
/// - [`channel_array`] - builds the sorted array a module registers
pub mod channel;

/// The process-wide channel registry and the filter rules applied to it.
///
/// Registrations are held in a concurrent handle map; options accumulate
/// in an append-only list. Every rule on record is applied to every
/// registration, past and future.
pub mod registry;

/// Parsing of the textual option specification.
///
/// [`options::parse_spec`] is best-effort and returns an error count;
/// [`options::parse_spec_strict`] fails fast with an [`Error`].
pub mod options;

/// Round-robin pool of reusable formatting buffers.
///
/// Fixed depth, lock-free slot selection, per-slot locking for contents.
/// Buffers are reclaimed by ring rotation, never freed early.
pub mod pool;

/// Quoted, escaped renderings of byte and UTF-16 strings for log output.
///
/// Handles real strings, nulls, and small-integer resource handles;
/// escapes control characters and truncates very long output.
pub mod dbgstr;

/// The swappable output backend behind every emit operation.
///
/// A trait object with default methods; [`StderrBackend`] is installed by
/// default and writes to standard error.
pub mod backend;

/// The context object tying registry, options, and backend together.
///
/// [`DebugContext`] is a self-contained engine instance; a process-global
/// one backs the crate-level functions and the logging macros.
pub mod context;

/// `dbgchan` Result type
///
/// A type alias for [`std::result::Result<T, Error>`], used by the strict
/// option-spec parsing surface. Nothing else in the engine fails.
pub type Result<T> = std::result::Result<T, Error>;

/// `dbgchan` Error type
///
/// Describes why an option-spec token was rejected. Produced only by
/// [`options::parse_spec_strict`]; the best-effort surfaces count errors
/// instead of returning them.
pub use error::Error;

/// Channels and their class masks.
pub use channel::{channel_array, ClassFlags, DebugChannel, DebugClass};

/// Registry handles and option rules.
pub use registry::{ChannelRegistry, OptionRule, RegistrationHandle, OPTION_NAME_CAPACITY};

/// The output backend trait and its default implementation.
pub use backend::{DebugBackend, StderrBackend};

/// Pool-backed scratch buffers.
pub use pool::{TempBuffer, TempBufferPool, TEMP_BUFFER_POOL_SIZE};

/// Escaped string renderings and their input enums.
pub use dbgstr::{dbgstr_a, dbgstr_an, dbgstr_w, dbgstr_wn, AnsiParam, WideParam};

/// Global-context entry points.
pub use context::{
    add_option, backend as active_backend, dbg_log, dbg_write, global, install_backend,
    parse_options, parse_options_from_env, register, unregister, DebugContext,
};
