//! # Delimiter Scanner
//!
//! A small finite-state scanner that bounds brace-delimited blocks.
//!
//! Pattern matching alone cannot bound a block containing nested object
//! literals: a non-nesting pattern stops at the first inner `}`. The scanner
//! tracks the current depth and terminates when it returns to zero. String
//! literals and comments are skipped so that path templates such as
//! `'/roles/{id}'` do not disturb the count.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Str(u8),
    Escape(u8),
    LineComment,
    BlockComment,
}

/// Runs the state machine from `start`, handing every byte that sits in plain
/// code (outside strings and comments) to `on_code`.
///
/// Stops as soon as `on_code` returns `Some`, yielding that value.
fn scan_code<F>(text: &str, start: usize, mut on_code: F) -> Option<usize>
where
    F: FnMut(usize, u8) -> Option<usize>,
{
    let bytes = text.as_bytes();
    let mut state = State::Code;
    let mut i = start;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();

        state = match state {
            State::Code => match b {
                b'\'' | b'"' | b'`' => State::Str(b),
                b'/' if next == Some(b'/') => {
                    i += 1;
                    State::LineComment
                }
                b'/' if next == Some(b'*') => {
                    i += 1;
                    State::BlockComment
                }
                _ => {
                    if let Some(found) = on_code(i, b) {
                        return Some(found);
                    }
                    State::Code
                }
            },
            State::Str(quote) => match b {
                b'\\' => State::Escape(quote),
                _ if b == quote => State::Code,
                _ => State::Str(quote),
            },
            State::Escape(quote) => State::Str(quote),
            State::LineComment => match b {
                b'\n' => State::Code,
                _ => State::LineComment,
            },
            State::BlockComment => {
                if b == b'*' && next == Some(b'/') {
                    i += 1;
                    State::Code
                } else {
                    State::BlockComment
                }
            }
        };
        i += 1;
    }

    None
}

/// Returns the byte index of the `}` that closes the `{` at `open`.
///
/// Returns `None` when `open` does not point at a `{`, or when the document
/// ends before the depth returns to zero.
///
/// # Examples
/// ```
/// use opcov_core::registry::scanner::matching_brace;
///
/// let text = "{ a: { b: 1 }, c: '}' }";
/// assert_eq!(matching_brace(text, 0), Some(text.len() - 1));
/// ```
pub fn matching_brace(text: &str, open: usize) -> Option<usize> {
    if text.as_bytes().get(open) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    scan_code(text, open, |i, b| {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        None
    })
}

/// Returns the index of the `,` ending the value that starts at `from`.
///
/// Any bracket pair (`{}`, `[]`, `()`) opened inside the value is skipped.
/// When no separator follows (last value, or a stray closing bracket at the
/// value's own level), the end of the text is returned.
pub fn value_end(text: &str, from: usize) -> usize {
    let mut depth = 0usize;
    scan_code(text, from, |i, b| {
        match b {
            b'{' | b'[' | b'(' => depth += 1,
            b'}' | b']' | b')' => {
                if depth == 0 {
                    return Some(text.len());
                }
                depth -= 1;
            }
            b',' if depth == 0 => return Some(i),
            _ => {}
        }
        None
    })
    .unwrap_or(text.len())
}

/// Finds the first `{` at or after `from`.
pub(crate) fn next_open_brace(text: &str, from: usize) -> Option<usize> {
    text.get(from..)?.find('{').map(|offset| from + offset)
}
