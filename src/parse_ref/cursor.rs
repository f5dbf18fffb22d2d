//! A single-token-lookahead cursor over a reference string.

/// Byte-offset cursor over the input, used by the recursive-descent
/// parser (§4.B). Operates on bytes rather than `chars` because every
/// token the grammar cares about (`::`, `<`, identifiers, operators)
/// is ASCII; identifiers containing non-ASCII UTF-8 are carried
/// through unexamined.
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    pub fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Consumes `literal` if `rest()` starts with it (after skipping
    /// leading whitespace). Returns whether it matched.
    pub fn eat(&mut self, literal: &str) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    pub fn starts_with(&self, literal: &str) -> bool {
        self.rest().starts_with(literal)
    }

    /// Consumes a C++ identifier: `[A-Za-z_][A-Za-z0-9_]*`. Returns
    /// `None` (without advancing) if the cursor isn't at one.
    pub fn eat_identifier(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let start = self.pos;
        let bytes = self.input.as_bytes();
        let Some(&first) = bytes.get(start) else {
            return None;
        };
        if !(first.is_ascii_alphabetic() || first == b'_') {
            return None;
        }
        let mut end = start + 1;
        while let Some(&b) = bytes.get(end) {
            if b.is_ascii_alphanumeric() || b == b'_' {
                end += 1;
            } else {
                break;
            }
        }
        self.pos = end;
        Some(&self.input[start..end])
    }

    /// Advances past a single byte unconditionally, for error recovery
    /// / reporting offsets.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eat_identifier_stops_at_non_ident_byte() {
        let mut cur = Cursor::new("foo_bar2::baz");
        assert_eq!(cur.eat_identifier(), Some("foo_bar2"));
        assert_eq!(cur.offset(), 8);
    }

    #[test]
    fn eat_identifier_rejects_leading_digit() {
        let mut cur = Cursor::new("2foo");
        assert_eq!(cur.eat_identifier(), None);
        assert_eq!(cur.offset(), 0);
    }

    #[test]
    fn eat_skips_leading_whitespace() {
        let mut cur = Cursor::new("   const");
        assert!(cur.eat("const"));
    }

    #[test]
    fn eat_does_not_advance_on_mismatch() {
        let mut cur = Cursor::new("volatile");
        assert!(!cur.eat("const"));
        assert_eq!(cur.offset(), 0);
    }
}
