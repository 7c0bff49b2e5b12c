//! Immutable byte buffer backing a parse, with offset/line/column resolution.

use crate::location::Location;

/// One named, immutable source buffer. Byte offsets into `bytes` are stable
/// for the lifetime of the file; line/column are computed lazily by
/// scanning from the nearest known newline rather than maintaining a full
/// line-index table, since formatting and diagnostics only need a handful
/// of lookups per parse.
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    bytes: Vec<u8>,
}

impl SourceFile {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Slices the bytes covered by `location`. Panics if the location's
    /// span exceeds the buffer; callers only ever construct locations from
    /// this same buffer, so that would be an internal bug.
    #[must_use]
    pub fn slice(&self, location: &Location) -> &[u8] {
        let start = location.byte_offset as usize;
        let end = location.byte_end() as usize;
        &self.bytes[start..end]
    }

    #[must_use]
    pub fn slice_str(&self, location: &Location) -> &str {
        std::str::from_utf8(self.slice(location)).expect("span does not fall on a UTF-8 boundary")
    }

    /// Resolves a byte offset to a 1-based (line, column) pair. Columns are
    /// code-point counts, not byte counts, so multi-byte UTF-8 sequences
    /// count as a single column.
    #[must_use]
    pub fn line_column(&self, byte_offset: u32) -> (u32, u32) {
        let offset = byte_offset as usize;
        let text = std::str::from_utf8(&self.bytes[..offset.min(self.bytes.len())])
            .unwrap_or_default();
        let mut line = 1u32;
        let mut column = 1u32;
        for ch in text.chars() {
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_column_counts_code_points_not_bytes() {
        let file = SourceFile::new("t.psc", "a\nb\xC3\xA9c".as_bytes().to_vec());
        // "b" is at offset 2, the 2-byte 'é' follows at offset 3, 'c' at offset 5.
        assert_eq!(file.line_column(2), (2, 1));
        assert_eq!(file.line_column(5), (2, 3));
    }

    #[test]
    fn slice_returns_exact_bytes() {
        let file = SourceFile::new("t.psc", b"Hello".to_vec());
        let loc = Location::new(1, 3, 1, 2, 1, 5);
        assert_eq!(file.slice_str(&loc), "ell");
    }
}
