//! Quoted, escaped renderings of byte and UTF-16 strings for log output.
//!
//! Diagnostic call sites frequently need to print a string argument whose
//! contents are untrusted: embedded quotes, control characters, raw bytes,
//! or a value that is not a string at all but a small integer handle
//! smuggled through a pointer-sized slot. [`dbgstr_an`] and [`dbgstr_wn`]
//! render all of those safely:
//!
//! - a real string comes out quoted, with `\n \r \t " \` as two-character
//!   escapes and anything else non-printable as `\xHH` (bytes) or `\HHHH`
//!   (UTF-16 units),
//! - a null renders as the literal text `(null)`,
//! - a small-integer handle renders as `#xxxx` and is never dereferenced.
//!
//! C APIs tell handles apart from pointers by sniffing whether the
//! pointer value fits in 16 bits. References cannot (and should not) be
//! sniffed, so the distinction is an explicit input enum —
//! [`AnsiParam`] / [`WideParam`] — with `From` impls that keep call sites
//! terse.
//!
//! Output longer than [`DBGSTR_OUTPUT_CAP`] characters between the quotes
//! is cut short and marked with a trailing `...`. Results live in pool
//! temp buffers (see [`crate::pool`]) and implement `Display`, so they
//! drop straight into a format string.

use std::fmt::Write;

use widestring::U16Str;

use crate::pool::TempBuffer;

/// Maximum rendered content between the quotes before truncation.
pub const DBGSTR_OUTPUT_CAP: usize = 300;

/// A byte-string argument: real bytes, a null, or a small-integer handle.
#[derive(Debug, Clone, Copy)]
pub enum AnsiParam<'a> {
    /// A null string pointer; renders as `(null)`.
    Null,
    /// A 16-bit resource handle; renders as `#xxxx`, never dereferenced.
    Handle(u16),
    /// Actual string bytes.
    Bytes(&'a [u8]),
}

impl<'a> From<&'a [u8]> for AnsiParam<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        AnsiParam::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for AnsiParam<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        AnsiParam::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for AnsiParam<'a> {
    fn from(s: &'a str) -> Self {
        AnsiParam::Bytes(s.as_bytes())
    }
}

impl<'a> From<Option<&'a [u8]>> for AnsiParam<'a> {
    fn from(opt: Option<&'a [u8]>) -> Self {
        match opt {
            Some(bytes) => AnsiParam::Bytes(bytes),
            None => AnsiParam::Null,
        }
    }
}

impl From<u16> for AnsiParam<'static> {
    fn from(handle: u16) -> Self {
        AnsiParam::Handle(handle)
    }
}

/// A UTF-16 string argument: real units, a null, or a small-integer handle.
#[derive(Debug, Clone, Copy)]
pub enum WideParam<'a> {
    /// A null string pointer; renders as `(null)`.
    Null,
    /// A 16-bit resource handle; renders as `#xxxx`, never dereferenced.
    Handle(u16),
    /// Actual UTF-16 code units.
    Chars(&'a [u16]),
}

impl<'a> From<&'a [u16]> for WideParam<'a> {
    fn from(chars: &'a [u16]) -> Self {
        WideParam::Chars(chars)
    }
}

impl<'a, const N: usize> From<&'a [u16; N]> for WideParam<'a> {
    fn from(chars: &'a [u16; N]) -> Self {
        WideParam::Chars(chars)
    }
}

impl<'a> From<&'a U16Str> for WideParam<'a> {
    fn from(s: &'a U16Str) -> Self {
        WideParam::Chars(s.as_slice())
    }
}

impl<'a> From<Option<&'a [u16]>> for WideParam<'a> {
    fn from(opt: Option<&'a [u16]>) -> Self {
        match opt {
            Some(chars) => WideParam::Chars(chars),
            None => WideParam::Null,
        }
    }
}

impl From<u16> for WideParam<'static> {
    fn from(handle: u16) -> Self {
        WideParam::Handle(handle)
    }
}

/// Resolves the C-style length convention against a slice:
/// `-1` means "up to the first NUL" (the whole slice if none), any other
/// non-positive value means empty, and a positive value is capped at the
/// slice length since a safe port cannot read past it.
fn resolved_len<T: Copy + PartialEq + Default>(data: &[T], len: isize) -> usize {
    match len {
        -1 => data
            .iter()
            .position(|&unit| unit == T::default())
            .unwrap_or(data.len()),
        n if n > 0 => usize::try_from(n).map_or(data.len(), |n| n.min(data.len())),
        _ => 0,
    }
}

fn escaped_byte_len(b: u8) -> usize {
    match b {
        b'\n' | b'\r' | b'\t' | b'"' | b'\\' => 2,
        0x20..=0x7e => 1,
        _ => 4, // \xHH
    }
}

fn push_escaped_byte(out: &mut String, b: u8) {
    match b {
        b'\n' => out.push_str("\\n"),
        b'\r' => out.push_str("\\r"),
        b'\t' => out.push_str("\\t"),
        b'"' => out.push_str("\\\""),
        b'\\' => out.push_str("\\\\"),
        0x20..=0x7e => out.push(b as char),
        _ => {
            let _ = write!(out, "\\x{b:02x}");
        }
    }
}

fn escaped_wide_len(c: u16) -> usize {
    match c {
        0x0a | 0x0d | 0x09 | 0x22 | 0x5c => 2,
        0x20..=0x7e => 1,
        _ => 5, // \HHHH
    }
}

fn push_escaped_wide(out: &mut String, c: u16) {
    match c {
        0x0a => out.push_str("\\n"),
        0x0d => out.push_str("\\r"),
        0x09 => out.push_str("\\t"),
        0x22 => out.push_str("\\\""),
        0x5c => out.push_str("\\\\"),
        0x20..=0x7e => out.push(c as u8 as char),
        _ => {
            let _ = write!(out, "\\{c:04x}");
        }
    }
}

/// Renders an [`AnsiParam`] into `out` per the module rules.
pub(crate) fn format_an(out: &mut String, s: AnsiParam<'_>, len: isize) {
    match s {
        AnsiParam::Null => out.push_str("(null)"),
        AnsiParam::Handle(handle) => {
            let _ = write!(out, "#{handle:04x}");
        }
        AnsiParam::Bytes(data) => {
            let data = &data[..resolved_len(data, len)];
            out.push('"');
            let start = out.len();
            let mut truncated = false;
            for &b in data {
                if out.len() - start + escaped_byte_len(b) > DBGSTR_OUTPUT_CAP {
                    truncated = true;
                    break;
                }
                push_escaped_byte(out, b);
            }
            out.push('"');
            if truncated {
                out.push_str("...");
            }
        }
    }
}

/// Renders a [`WideParam`] into `out` per the module rules.
pub(crate) fn format_wn(out: &mut String, s: WideParam<'_>, len: isize) {
    match s {
        WideParam::Null => out.push_str("(null)"),
        WideParam::Handle(handle) => {
            let _ = write!(out, "#{handle:04x}");
        }
        WideParam::Chars(data) => {
            let data = &data[..resolved_len(data, len)];
            out.push('"');
            let start = out.len();
            let mut truncated = false;
            for &c in data {
                if out.len() - start + escaped_wide_len(c) > DBGSTR_OUTPUT_CAP {
                    truncated = true;
                    break;
                }
                push_escaped_wide(out, c);
            }
            out.push('"');
            if truncated {
                out.push_str("...");
            }
        }
    }
}

/// Renders a byte string through the global context's active backend.
///
/// # Examples
///
/// ```rust
/// use dbgchan::dbgstr_an;
///
/// assert_eq!(dbgstr_an("hello", -1).to_string(), "\"hello\"");
/// assert_eq!(dbgstr_an(0x30u16, -1).to_string(), "#0030");
/// ```
pub fn dbgstr_an<'a>(s: impl Into<AnsiParam<'a>>, len: isize) -> TempBuffer {
    crate::context::global().dbgstr_an(s.into(), len)
}

/// [`dbgstr_an`] with the length taken from the first NUL (or the slice end).
pub fn dbgstr_a<'a>(s: impl Into<AnsiParam<'a>>) -> TempBuffer {
    dbgstr_an(s, -1)
}

/// Renders a UTF-16 string through the global context's active backend.
pub fn dbgstr_wn<'a>(s: impl Into<WideParam<'a>>, len: isize) -> TempBuffer {
    crate::context::global().dbgstr_wn(s.into(), len)
}

/// [`dbgstr_wn`] with the length taken from the first NUL (or the slice end).
pub fn dbgstr_w<'a>(s: impl Into<WideParam<'a>>) -> TempBuffer {
    dbgstr_wn(s, -1)
}
