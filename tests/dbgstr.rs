//! Escaped string rendering through the public surface: the crate-level
//! `dbgstr_*` functions (global backend) and an isolated context.

use dbgchan::prelude::*;
use widestring::u16str;

#[test]
fn printable_ascii_roundtrips_quoted() {
    let input = "The quick brown fox; 0123456789 #~@";
    assert_eq!(dbgstr_an(input, -1).to_string(), format!("\"{input}\""));
    assert_eq!(dbgstr_a(input).to_string(), format!("\"{input}\""));
}

#[test]
fn embedded_quote_is_escaped() {
    assert_eq!(dbgstr_an("a\"b", -1).to_string(), "\"a\\\"b\"");
    assert_eq!(dbgstr_wn(u16str!("a\"b"), -1).to_string(), "\"a\\\"b\"");
}

#[test]
fn control_and_high_bytes() {
    assert_eq!(dbgstr_a("tab\there").to_string(), "\"tab\\there\"");
    let bytes: &[u8] = &[b'o', b'k', 0x07, 0xc3];
    assert_eq!(dbgstr_an(bytes, 4).to_string(), "\"ok\\x07\\xc3\"");
}

#[test]
fn wide_units_use_four_hex_digits() {
    let units: &[u16] = &[0x48, 0x69, 0x2603];
    assert_eq!(dbgstr_wn(units, 3).to_string(), "\"Hi\\2603\"");
    assert_eq!(dbgstr_w(u16str!("Hi")).to_string(), "\"Hi\"");
}

#[test]
fn null_and_handle_renderings() {
    assert_eq!(dbgstr_a(None::<&[u8]>).to_string(), "(null)");
    assert_eq!(dbgstr_w(None::<&[u16]>).to_string(), "(null)");
    assert_eq!(dbgstr_a(0x0123u16).to_string(), "#0123");
    assert_eq!(dbgstr_w(0xfeedu16).to_string(), "#feed");
}

#[test]
fn nul_terminated_length_convention() {
    assert_eq!(dbgstr_an(b"cut\0rest", -1).to_string(), "\"cut\"");
    let wide: &[u16] = &[0x63, 0x75, 0x74, 0x00, 0x21];
    assert_eq!(dbgstr_wn(wide, -1).to_string(), "\"cut\"");
}

#[test]
fn explicit_and_degenerate_lengths() {
    assert_eq!(dbgstr_an(b"abcdef", 3).to_string(), "\"abc\"");
    assert_eq!(dbgstr_an(b"abcdef", 0).to_string(), "\"\"");
    assert_eq!(dbgstr_an(b"abcdef", -7).to_string(), "\"\"");
    // A length past the end is clamped to the data.
    assert_eq!(dbgstr_an(b"ab", 64).to_string(), "\"ab\"");
}

#[test]
fn long_output_is_truncated_with_marker() {
    let long = "y".repeat(2000);
    let rendered = dbgstr_a(long.as_str()).to_string();
    assert!(rendered.ends_with("\"..."));
    assert!(rendered.len() < long.len());
}

#[test]
fn context_dbgstr_goes_through_installed_backend() {
    use std::fmt;
    use std::sync::Mutex;

    // A backend that stamps its own rendering, proving the override took.
    struct Stamping {
        pool: TempBufferPool,
        writes: Mutex<Vec<String>>,
    }

    impl DebugBackend for Stamping {
        fn get_temp_buffer(&self, min_size: usize) -> TempBuffer {
            self.pool.get(min_size)
        }

        fn write(&self, args: fmt::Arguments<'_>) {
            self.writes.lock().unwrap().push(args.to_string());
        }

        fn dbgstr_an(&self, _s: AnsiParam<'_>, _len: isize) -> TempBuffer {
            let buf = self.pool.get(16);
            buf.with(|out| out.push_str("<stamped>"));
            buf
        }
    }

    let ctx = DebugContext::with_backend(std::sync::Arc::new(Stamping {
        pool: TempBufferPool::new(),
        writes: Mutex::new(Vec::new()),
    }));
    assert_eq!(ctx.dbgstr_an("anything".into(), -1).to_string(), "<stamped>");
    // The default wide path is untouched by the override.
    assert_eq!(ctx.dbgstr_wn(u16str!("w").into(), -1).to_string(), "\"w\"");
}
