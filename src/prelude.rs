//! # dbgchan Prelude
//!
//! This module provides a convenient prelude for the most commonly used
//! types and functions from the dbgchan library. Import it to get quick
//! access to the essentials for channel registration, option parsing, and
//! diagnostic output.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for strict option-spec validation
pub use crate::Error;

/// The result type used by the strict parsing surface
pub use crate::Result;

// ================================================================================================
// Channels and Classes
// ================================================================================================

/// A named diagnostic channel with an atomic class mask
pub use crate::channel::DebugChannel;

/// The fixed class table (fixme/err/warn/trace)
pub use crate::channel::DebugClass;

/// Per-channel class-enable bits
pub use crate::channel::ClassFlags;

/// Builds the sorted channel array a module registers
pub use crate::channel::channel_array;

// ================================================================================================
// Registry and Options
// ================================================================================================

/// The registry tracking modules and filter rules
pub use crate::registry::{ChannelRegistry, RegistrationHandle};

/// One parsed filter rule and the stored-name capacity
pub use crate::registry::{OptionRule, OPTION_NAME_CAPACITY};

/// Spec-string parsing, best-effort and strict
pub use crate::options::{parse_spec, parse_spec_strict};

// ================================================================================================
// Context and Global Entry Points
// ================================================================================================

/// An isolated engine instance
pub use crate::context::DebugContext;

/// Global-context operations
pub use crate::context::{
    add_option, backend, global, install_backend, parse_options, parse_options_from_env, register,
    unregister,
};

// ================================================================================================
// Output Backend and Formatting
// ================================================================================================

/// The swappable output backend and its default implementation
pub use crate::backend::{DebugBackend, StderrBackend};

/// Pool-backed scratch buffers
pub use crate::pool::{TempBuffer, TempBufferPool, TEMP_BUFFER_POOL_SIZE};

/// Quoted/escaped string renderings for log output
pub use crate::dbgstr::{dbgstr_a, dbgstr_an, dbgstr_w, dbgstr_wn, AnsiParam, WideParam};
