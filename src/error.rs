use thiserror::Error;

/// The generic Error type, covering everything this library can reject.
///
/// The engine itself never propagates errors: the best-effort option parser
/// counts bad tokens and moves on, lookup misses are silent, and applying a
/// rule cannot fail. These variants are produced only by the strict,
/// fail-fast spec parser ([`crate::options::parse_spec_strict`]), intended
/// for hosts that want to validate an option string before committing it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A `+`/`-` token carried a non-empty prefix that is not a known class name.
    ///
    /// Class matching requires an exact, case-sensitive, full-length match:
    /// `fixme2+` and `comctl32+trace` both land here, exactly like an
    /// outright typo such as `bogus+`.
    #[error("unknown debug class in option token '{token}'")]
    UnknownClass {
        /// The offending token, as it appeared in the spec string
        token: String,
    },

    /// A bare `+` or `-` with nothing after it.
    ///
    /// A missing name is only an error when no class matched; `fixme+`
    /// legitimately means "the fixme class, for every channel".
    #[error("missing channel name in option token '{token}'")]
    EmptyChannelName {
        /// The offending token, as it appeared in the spec string
        token: String,
    },

    /// An empty token, e.g. from a doubled or trailing comma.
    #[error("empty option token")]
    EmptyToken,
}
