//! Removal of surrounding quotes from a raw source fragment.
//!
//! Accepts the three quoted forms: `"..."` with backslash escapes, back-quoted
//! raw text, and a single-quoted character. Returns `None` when the text is not
//! exactly one such literal, in which case callers keep the raw text.

use std::str::Chars;

pub fn unquote(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let quote = *bytes.first()?;
    if bytes.len() < 2 || bytes[bytes.len() - 1] != quote {
        return None;
    }
    // Both quote bytes are ASCII, so the slice sits on char boundaries.
    let inner = &text[1..text.len() - 1];

    match quote {
        b'`' => (!inner.contains('`')).then(|| inner.replace('\r', "")),
        b'"' | b'\'' => unquote_escaped(inner, quote as char),
        _ => None,
    }
}

fn unquote_escaped(inner: &str, quote: char) -> Option<String> {
    if inner.contains('\n') {
        return None;
    }

    let mut out: Vec<u8> = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();
    let mut count = 0;

    while let Some(c) = chars.next() {
        count += 1;
        match c {
            c if c == quote => return None,
            '\\' => unescape(&mut chars, quote, &mut out)?,
            c => push_char(&mut out, c),
        }
    }

    if quote == '\'' && count != 1 {
        return None;
    }
    String::from_utf8(out).ok()
}

fn unescape(chars: &mut Chars<'_>, quote: char, out: &mut Vec<u8>) -> Option<()> {
    match chars.next()? {
        'a' => out.push(0x07),
        'b' => out.push(0x08),
        'f' => out.push(0x0c),
        'n' => out.push(b'\n'),
        'r' => out.push(b'\r'),
        't' => out.push(b'\t'),
        'v' => out.push(0x0b),
        '\\' => out.push(b'\\'),
        c @ ('\'' | '"') => {
            if c != quote {
                return None;
            }
            push_char(out, c);
        }
        'x' => out.push(u8::try_from(hex_digits(chars, 2)?).ok()?),
        'u' => push_char(out, char::from_u32(hex_digits(chars, 4)?)?),
        'U' => push_char(out, char::from_u32(hex_digits(chars, 8)?)?),
        c @ '0'..='7' => {
            let mut value = c.to_digit(8)?;
            for _ in 0..2 {
                value = value * 8 + chars.next()?.to_digit(8)?;
            }
            out.push(u8::try_from(value).ok()?);
        }
        _ => return None,
    }
    Some(())
}

fn hex_digits(chars: &mut Chars<'_>, count: usize) -> Option<u32> {
    (0..count).try_fold(0u32, |acc, _| Some(acc * 16 + chars.next()?.to_digit(16)?))
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}
