// Field unescaping (quote stripping and doubled-quote collapsing)

use std::borrow::Cow;

use crate::format::QUOTE;

/// Produce the logical value of a field as scanned from the buffer.
///
/// Strips the surrounding quotes of a quoted field and collapses doubled
/// quotes inside it. Returns `Cow::Borrowed` when no rewriting is needed,
/// `Cow::Owned` only when doubled quotes force an allocation. Unquoted
/// fields pass through unchanged.
pub fn unescape_field(field: &[u8]) -> Cow<'_, [u8]> {
    // Not quoted - return as-is
    if field.len() < 2 || field[0] != QUOTE || field[field.len() - 1] != QUOTE {
        return Cow::Borrowed(field);
    }

    let inner = &field[1..field.len() - 1];

    // Fast path: no doubled quotes inside
    if !inner.contains(&QUOTE) {
        return Cow::Borrowed(inner);
    }

    // Slow path: collapse doubled quotes
    let mut result = Vec::with_capacity(inner.len());
    let mut i = 0;
    while i < inner.len() {
        if inner[i] == QUOTE && i + 1 < inner.len() && inner[i + 1] == QUOTE {
            result.push(QUOTE);
            i += 2;
        } else {
            result.push(inner[i]);
            i += 1;
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquoted_passes_through() {
        assert_eq!(unescape_field(b"hello").as_ref(), b"hello");
        assert_eq!(unescape_field(b"").as_ref(), b"");
    }

    #[test]
    fn plain_field_is_fixed_point() {
        // Fields without quotes come back byte-identical and borrowed.
        let field = b"no special bytes here";
        match unescape_field(field) {
            Cow::Borrowed(b) => assert_eq!(b, field),
            Cow::Owned(_) => panic!("must not allocate for a plain field"),
        }
    }

    #[test]
    fn quoted_strips_quotes() {
        assert_eq!(unescape_field(b"\"hello\"").as_ref(), b"hello");
    }

    #[test]
    fn doubled_quotes_collapse() {
        assert_eq!(
            unescape_field(b"\"say \"\"hi\"\"\"").as_ref(),
            b"say \"hi\""
        );
    }

    #[test]
    fn quoted_separator_and_delimiter_survive() {
        assert_eq!(unescape_field(b"\"a,b\nc\"").as_ref(), b"a,b\nc");
    }

    #[test]
    fn single_quote_byte_is_not_quoted() {
        // Too short to be a quoted field.
        assert_eq!(unescape_field(b"\"").as_ref(), b"\"");
    }
}
