//! Normalizes the `---`/`+++` header lines of a unified diff for ports-format patches.
//!
//! With `TZ=UTC` GNU diff writes headers as
//! `--- path\t2023-01-01 12:00:00.123456789 +0000`. The original side keeps
//! its timestamp to the second, marked ` UTC`; the modified side keeps only
//! its path.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::bytes::Regex;

lazy_static! {
    static ref ORIGINAL_STAMP_RE: Regex = Regex::new(r"\.\d* \+0000$").expect("Invalid Regex");
    static ref MODIFIED_STAMP_RE: Regex =
        Regex::new(r"(\s+[-0-9:.+]+)+$").expect("Invalid Regex");
}

/// Rewrites one line of diff output. The line may carry its terminator,
/// which is kept as is.
pub fn normalize_line(line: &[u8], ports_format: bool) -> Cow<'_, [u8]> {
    if !ports_format {
        return Cow::Borrowed(line);
    }
    let (body, eol) = split_eol(line);
    let rewritten = if body.starts_with(b"---") {
        ORIGINAL_STAMP_RE.replace(body, &b" UTC"[..])
    } else if body.starts_with(b"+++") {
        MODIFIED_STAMP_RE.replace(body, &b""[..])
    } else {
        return Cow::Borrowed(line);
    };
    match rewritten {
        Cow::Borrowed(_) => Cow::Borrowed(line),
        Cow::Owned(mut owned) => {
            owned.extend_from_slice(eol);
            Cow::Owned(owned)
        }
    }
}

fn split_eol(line: &[u8]) -> (&[u8], &[u8]) {
    let body_len = if line.ends_with(b"\r\n") {
        line.len() - 2
    } else if line.ends_with(b"\n") {
        line.len() - 1
    } else {
        line.len()
    };
    line.split_at(body_len)
}
