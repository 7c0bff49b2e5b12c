//! Byte-offset coordinates over a [`crate::source::SourceFile`].

use serde::{Deserialize, Serialize};

/// A span of bytes in a source file plus the metadata needed to print a
/// caret-annotated snippet and to losslessly reassemble surrounding trivia.
///
/// `preambleLength`/`postambleLength` are the widths of the whitespace runs
/// immediately before/after the span on the same logical line; they let a
/// formatter or round-trip test reconstruct exactly how much horizontal
/// whitespace bordered a token without re-scanning the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub byte_offset: u32,
    pub length: u32,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub preamble_length: u32,
    pub postamble_length: u32,
}

impl Location {
    #[must_use]
    pub fn new(
        byte_offset: u32,
        length: u32,
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        Self {
            byte_offset,
            length,
            start_line,
            start_column,
            end_line,
            end_column,
            preamble_length: 0,
            postamble_length: 0,
        }
    }

    #[must_use]
    pub fn with_trivia(mut self, preamble_length: u32, postamble_length: u32) -> Self {
        self.preamble_length = preamble_length;
        self.postamble_length = postamble_length;
        self
    }

    #[must_use]
    pub fn byte_end(&self) -> u32 {
        self.byte_offset + self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Combine two locations into the span that covers both, inclusive.
    /// The preamble of the result is `a`'s, the postamble is `b`'s: the
    /// combined span's surrounding whitespace is whatever bordered its
    /// first and last token.
    #[must_use]
    pub fn span(a: Location, b: Location) -> Location {
        let byte_offset = a.byte_offset.min(b.byte_offset);
        let byte_end = a.byte_end().max(b.byte_end());
        let (start_line, start_column, preamble_length) = if a.byte_offset <= b.byte_offset {
            (a.start_line, a.start_column, a.preamble_length)
        } else {
            (b.start_line, b.start_column, b.preamble_length)
        };
        let (end_line, end_column, postamble_length) = if a.byte_end() >= b.byte_end() {
            (a.end_line, a.end_column, a.postamble_length)
        } else {
            (b.end_line, b.end_column, b.postamble_length)
        };

        Location {
            byte_offset,
            length: byte_end - byte_offset,
            start_line,
            start_column,
            end_line,
            end_column,
            preamble_length,
            postamble_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_covers_both_and_keeps_outer_trivia() {
        let a = Location::new(0, 3, 1, 1, 1, 3).with_trivia(0, 9);
        let b = Location::new(10, 2, 1, 11, 1, 12).with_trivia(9, 4);
        let s = Location::span(a, b);
        assert_eq!(s.byte_offset, 0);
        assert_eq!(s.byte_end(), 12);
        assert_eq!(s.preamble_length, 0);
        assert_eq!(s.postamble_length, 4);
    }
}
