use inspectdb_core::Value;

use std::fmt::{self, Write};

/// Code points other than controls that Python's `str.isprintable()`
/// rejects: separators besides the ASCII space, format characters, private
/// use areas and noncharacters. Unassigned code points are not listed.
const NON_PRINTABLE: &[(char, char)] = &[
    ('\u{ad}', '\u{ad}'),
    ('\u{600}', '\u{605}'),
    ('\u{61c}', '\u{61c}'),
    ('\u{6dd}', '\u{6dd}'),
    ('\u{70f}', '\u{70f}'),
    ('\u{890}', '\u{891}'),
    ('\u{8e2}', '\u{8e2}'),
    ('\u{1680}', '\u{1680}'),
    ('\u{180e}', '\u{180e}'),
    ('\u{2000}', '\u{200f}'),
    ('\u{2028}', '\u{202f}'),
    ('\u{205f}', '\u{2064}'),
    ('\u{2066}', '\u{206f}'),
    ('\u{3000}', '\u{3000}'),
    ('\u{e000}', '\u{f8ff}'),
    ('\u{fdd0}', '\u{fdef}'),
    ('\u{feff}', '\u{feff}'),
    ('\u{fff9}', '\u{fffb}'),
    ('\u{110bd}', '\u{110bd}'),
    ('\u{110cd}', '\u{110cd}'),
    ('\u{13430}', '\u{1343f}'),
    ('\u{1bca0}', '\u{1bca3}'),
    ('\u{1d173}', '\u{1d17a}'),
    ('\u{e0001}', '\u{e0001}'),
    ('\u{e0020}', '\u{e007f}'),
    ('\u{f0000}', '\u{10ffff}'),
];

/// Displays a value as the equivalent Python literal.
pub(crate) struct Repr<'a>(pub(crate) &'a Value);

impl fmt::Display for Repr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::I64(value) => write!(f, "{value}"),
            Value::String(value) => write_str(f, value),
        }
    }
}

/// Returns `value` as a Python string literal.
pub(crate) fn str_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    // Writing to a String never fails.
    let _ = write_str(&mut out, value);
    out
}

/// Single quotes unless the string contains a single quote and no double
/// quote, the same choice Python's `repr()` makes.
fn write_str(out: &mut impl Write, value: &str) -> fmt::Result {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    out.write_char(quote)?;

    for c in value.chars() {
        match c {
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if c == quote => {
                out.write_char('\\')?;
                out.write_char(c)?;
            }
            c if !is_printable(c) => match c as u32 {
                n if n < 0x100 => write!(out, "\\x{n:02x}")?,
                n if n < 0x10000 => write!(out, "\\u{n:04x}")?,
                n => write!(out, "\\U{n:08x}")?,
            },
            c => out.write_char(c)?,
        }
    }

    out.write_char(quote)
}

fn is_printable(c: char) -> bool {
    if c < ' ' || ('\u{7f}'..='\u{a0}').contains(&c) {
        return false;
    }

    // U+xFFFE and U+xFFFF are noncharacters in every plane.
    if c as u32 & 0xfffe == 0xfffe {
        return false;
    }

    !NON_PRINTABLE
        .iter()
        .any(|&(start, end)| (start..=end).contains(&c))
}
