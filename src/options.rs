//! Parsing of the textual option specification.
//!
//! An option spec is a comma-separated list of tokens, typically sourced
//! from an environment variable or a command line by the host:
//!
//! ```text
//! spec       := token (',' token)*
//! token      := class_tok | channel_tok
//! class_tok  := class_name ('+' | '-') channel_name?
//! channel_tok:= ('+' | '-')? channel_name | channel_name '-'
//! class_name := "fixme" | "err" | "warn" | "trace"
//! ```
//!
//! A `channel_tok` flips every class at once: `relay` and `+relay` enable
//! all classes for channel `relay`, `-relay` disables them, and the
//! trailing-dash form `relay-` is a shorthand for `-relay`. A `class_tok`
//! flips a single class bit: `fixme-dbghelp` turns fixmes off for
//! `dbghelp`; with no name after the sign (`warn+`) it applies to every
//! channel. The name `all` is an alias for "every channel", so `fixme-all`
//! and `fixme-` are equivalent.
//!
//! Class matching is exact: the prefix before the sign must match a class
//! name in full, case-sensitively. Anything else (`bogus+`, `fixme2+`,
//! `comctl32+trace`) is one parse error; the single-class spelling always
//! puts the class first.
//!
//! Two entry points share the grammar: [`parse_spec`] is best-effort and
//! returns the rules it could extract plus an error count, which is how a
//! live engine consumes configuration (a typo must never disable
//! diagnostics wholesale). [`parse_spec_strict`] fails on the first bad
//! token with a descriptive [`Error`], for hosts that validate
//! configuration before applying it.

use std::str::FromStr;

use crate::channel::{ClassFlags, DebugClass};
use crate::registry::OptionRule;
use crate::{Error, Result};

/// Parses a spec string, skipping unparseable tokens.
///
/// Returns the rules from the tokens that parsed, in spec order, and the
/// number of tokens that did not. Nothing is printed for bad tokens; the
/// count is the only signal.
///
/// # Examples
///
/// ```rust
/// use dbgchan::options::parse_spec;
///
/// let (rules, errors) = parse_spec("relay-,fixme+,bogus+");
/// assert_eq!(rules.len(), 2);
/// assert_eq!(errors, 1);
/// ```
#[must_use]
pub fn parse_spec(spec: &str) -> (Vec<OptionRule>, usize) {
    let mut rules = Vec::new();
    let mut errors = 0;
    for token in spec.split(',') {
        match parse_token(token) {
            Ok(rule) => rules.push(rule),
            Err(_) => errors += 1,
        }
    }
    (rules, errors)
}

/// Parses a spec string, failing on the first bad token.
///
/// Same grammar as [`parse_spec`]; no side effects, no partial results.
///
/// # Errors
///
/// Returns the [`Error`] describing the first token that failed to parse.
pub fn parse_spec_strict(spec: &str) -> Result<Vec<OptionRule>> {
    spec.split(',').map(parse_token).collect()
}

/// Parses a single spec token into a rule.
fn parse_token(token: &str) -> Result<OptionRule> {
    if token.is_empty() {
        return Err(Error::EmptyToken);
    }

    let (name, set, clear) = match token.find(['+', '-']) {
        // No sign at all: the whole token is a channel name, all classes on.
        None => (token, ClassFlags::all(), ClassFlags::empty()),

        // Leading sign: all classes on or off for the named channel.
        Some(0) => {
            let name = &token[1..];
            if name.is_empty() {
                return Err(Error::EmptyChannelName {
                    token: token.to_owned(),
                });
            }
            if token.starts_with('-') {
                (name, ClassFlags::empty(), ClassFlags::all())
            } else {
                (name, ClassFlags::all(), ClassFlags::empty())
            }
        }

        // Sign after a prefix: the prefix must name a class exactly. The
        // remainder is the channel name; empty means every channel. A
        // non-class prefix ending in `-` with nothing after it is the
        // trailing-dash disable shorthand (`relay-` == `-relay`).
        Some(pos) => match DebugClass::from_str(&token[..pos]) {
            Ok(class) => {
                let bit = ClassFlags::from_class(class);
                let name = &token[pos + 1..];
                if token[pos..].starts_with('-') {
                    (name, ClassFlags::empty(), bit)
                } else {
                    (name, bit, ClassFlags::empty())
                }
            }
            Err(_) if token.ends_with('-') && pos == token.len() - 1 => {
                (&token[..pos], ClassFlags::empty(), ClassFlags::all())
            }
            Err(_) => {
                return Err(Error::UnknownClass {
                    token: token.to_owned(),
                })
            }
        },
    };

    // "all" is a reserved alias for the empty name.
    let name = if name == "all" { "" } else { name };
    Ok(OptionRule::new(name, set, clear))
}
