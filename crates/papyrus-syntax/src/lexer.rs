//! Mode-switching tokenizer.
//!
//! Normal mode produces ordinary tokens. Comments are modeled as short
//! token sequences so the tree can reproduce them losslessly:
//! `Semicolon Comment Newline` for line comments, `BraceOpen Comment
//! BraceClose` for doc comments, `BlockCommentOpen Comment
//! BlockCommentClose` for block comments. Once a comment's body has been
//! scanned we already know exactly where its closing token starts, so we
//! stash that closer in `pending_terminal` and hand it back verbatim on
//! the following call instead of re-deriving it.

use crate::location::Location;
use crate::token::{lookup_keyword, Token, TokenKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct LexError {
    pub location: Location,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    LineComment,
    BlockComment,
    DocComment,
}

pub struct Lexer<'a> {
    text: &'a str,
    pos: usize,
    line: u32,
    column: u32,
    mode: Mode,
    pending_terminal: Option<Token>,
    eof_emitted: bool,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            line: 1,
            column: 1,
            mode: Mode::Normal,
            pending_terminal: None,
            eof_emitted: false,
        }
    }

    /// Validates `bytes` as UTF-8 before constructing a lexer over them.
    ///
    /// # Errors
    /// Returns a [`LexError`] located at the first invalid byte.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, LexError> {
        match std::str::from_utf8(bytes) {
            Ok(text) => Ok(Self::new(text)),
            Err(err) => {
                let offset = err.valid_up_to() as u32;
                let (line, column) = line_column_of_prefix(&bytes[..offset as usize]);
                Err(LexError {
                    location: Location::new(offset, 1, line, column, line, column + 1),
                    message: "invalid UTF-8".to_string(),
                })
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek2(&self) -> Option<char> {
        let mut chars = self.text[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn here(&self) -> (u32, u32, u32) {
        (self.pos as u32, self.line, self.column)
    }

    /// Counts, without consuming, how many space/tab bytes sit ahead before
    /// the next newline, non-whitespace character, or EOF.
    fn peek_postamble(&self) -> u32 {
        self.text[self.pos..]
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .count() as u32
    }

    fn skip_inline_whitespace(&mut self) -> u32 {
        let mut n = 0u32;
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.bump();
            n += 1;
        }
        n
    }

    fn make_location(
        &self,
        start_byte: u32,
        start_line: u32,
        start_col: u32,
        preamble: u32,
    ) -> Location {
        let (end_byte, end_line, end_col) = self.here();
        Location::new(start_byte, end_byte - start_byte, start_line, start_col, end_line, end_col)
            .with_trivia(preamble, self.peek_postamble())
    }

    /// Produces the next token, or an error describing the offending span.
    /// The lexer recovers from an error by advancing past the offending
    /// byte(s) so a caller may keep calling `next_token` to continue.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if let Some(terminal) = self.pending_terminal.take() {
            self.mode = Mode::Normal;
            return Ok(terminal);
        }

        if self.eof_emitted {
            let (byte, line, col) = self.here();
            return Ok(Token::new(TokenKind::Eof, Location::new(byte, 0, line, col, line, col)));
        }

        match self.mode {
            Mode::Normal => self.lex_normal(),
            Mode::LineComment => self.lex_comment_body(CommentKind::Line),
            Mode::BlockComment => self.lex_comment_body(CommentKind::Block),
            Mode::DocComment => self.lex_comment_body(CommentKind::Doc),
        }
    }

    fn lex_normal(&mut self) -> Result<Token, LexError> {
        let preamble = self.skip_inline_whitespace();
        let (start_byte, start_line, start_col) = self.here();

        let Some(ch) = self.peek() else {
            self.eof_emitted = true;
            return Ok(Token::new(
                TokenKind::Eof,
                self.make_location(start_byte, start_line, start_col, preamble),
            ));
        };

        match ch {
            '\r' => {
                self.bump();
                if self.peek() == Some('\n') {
                    self.bump();
                    Ok(Token::new(
                        TokenKind::Newline,
                        self.make_location(start_byte, start_line, start_col, preamble),
                    ))
                } else {
                    Err(self.error_at(
                        start_byte,
                        start_line,
                        start_col,
                        preamble,
                        "expected newline after carriage return".to_string(),
                    ))
                }
            }
            '\n' => {
                self.bump();
                Ok(Token::new(
                    TokenKind::Newline,
                    self.make_location(start_byte, start_line, start_col, preamble),
                ))
            }
            '\\' => {
                self.bump();
                match self.peek() {
                    Some('\r') | Some('\n') => {
                        // Consume the newline silently and recurse for the
                        // next real token.
                        if self.peek() == Some('\r') {
                            self.bump();
                            if self.peek() == Some('\n') {
                                self.bump();
                            } else {
                                return Err(self.error_at(
                                    start_byte,
                                    start_line,
                                    start_col,
                                    preamble,
                                    "expected newline after carriage return".to_string(),
                                ));
                            }
                        } else {
                            self.bump();
                        }
                        self.next_token()
                    }
                    _ => Err(self.error_at(
                        start_byte,
                        start_line,
                        start_col,
                        preamble,
                        "illegal line continuation".to_string(),
                    )),
                }
            }
            ';' => {
                self.bump();
                if self.peek() == Some('/') {
                    self.bump();
                    self.mode = Mode::BlockComment;
                    Ok(Token::new(
                        TokenKind::BlockCommentOpen,
                        self.make_location(start_byte, start_line, start_col, preamble),
                    ))
                } else {
                    self.mode = Mode::LineComment;
                    Ok(Token::new(
                        TokenKind::Semicolon,
                        self.make_location(start_byte, start_line, start_col, preamble),
                    ))
                }
            }
            '{' => {
                self.bump();
                self.mode = Mode::DocComment;
                Ok(Token::new(
                    TokenKind::BraceOpen,
                    self.make_location(start_byte, start_line, start_col, preamble),
                ))
            }
            '}' => {
                self.bump();
                Err(self.error_at(
                    start_byte,
                    start_line,
                    start_col,
                    preamble,
                    "unexpected '}'".to_string(),
                ))
            }
            '(' => self.single(TokenKind::ParenthesisOpen, start_byte, start_line, start_col, preamble),
            ')' => self.single(TokenKind::ParenthesisClose, start_byte, start_line, start_col, preamble),
            ',' => self.single(TokenKind::Comma, start_byte, start_line, start_col, preamble),
            '.' => self.single(TokenKind::Dot, start_byte, start_line, start_col, preamble),
            '[' => {
                self.bump();
                if self.peek() == Some(']') {
                    self.bump();
                    Ok(Token::new(
                        TokenKind::ArrayType,
                        self.make_location(start_byte, start_line, start_col, preamble),
                    ))
                } else {
                    Ok(Token::new(
                        TokenKind::BracketOpen,
                        self.make_location(start_byte, start_line, start_col, preamble),
                    ))
                }
            }
            ']' => self.single(TokenKind::BracketClose, start_byte, start_line, start_col, preamble),
            '=' => self.one_or_assign(TokenKind::Assign, TokenKind::Equal, start_byte, start_line, start_col, preamble),
            '+' => self.one_or_assign(TokenKind::Plus, TokenKind::AssignAdd, start_byte, start_line, start_col, preamble),
            '*' => self.one_or_assign(TokenKind::Multiply, TokenKind::AssignMultiply, start_byte, start_line, start_col, preamble),
            '/' => self.one_or_assign(TokenKind::Divide, TokenKind::AssignDivide, start_byte, start_line, start_col, preamble),
            '%' => self.one_or_assign(TokenKind::Modulo, TokenKind::AssignModulo, start_byte, start_line, start_col, preamble),
            '!' => self.one_or_assign(TokenKind::LogicalNot, TokenKind::NotEqual, start_byte, start_line, start_col, preamble),
            '>' => self.one_or_assign(TokenKind::Greater, TokenKind::GreaterOrEqual, start_byte, start_line, start_col, preamble),
            '<' => self.one_or_assign(TokenKind::Less, TokenKind::LessOrEqual, start_byte, start_line, start_col, preamble),
            '-' => self.lex_minus(start_byte, start_line, start_col, preamble),
            '&' => {
                self.bump();
                if self.peek() == Some('&') {
                    self.bump();
                    Ok(Token::new(
                        TokenKind::LogicalAnd,
                        self.make_location(start_byte, start_line, start_col, preamble),
                    ))
                } else {
                    Err(self.error_at(start_byte, start_line, start_col, preamble, "expected '&&'".to_string()))
                }
            }
            '|' => {
                self.bump();
                if self.peek() == Some('|') {
                    self.bump();
                    Ok(Token::new(
                        TokenKind::LogicalOr,
                        self.make_location(start_byte, start_line, start_col, preamble),
                    ))
                } else {
                    Err(self.error_at(start_byte, start_line, start_col, preamble, "expected '||'".to_string()))
                }
            }
            '"' => self.lex_string(start_byte, start_line, start_col, preamble),
            c if c.is_ascii_digit() => self.lex_number(start_byte, start_line, start_col, preamble),
            c if is_ident_start(c) => self.lex_identifier(start_byte, start_line, start_col, preamble),
            other => {
                self.bump();
                Err(self.error_at(
                    start_byte,
                    start_line,
                    start_col,
                    preamble,
                    format!("unexpected character '{other}'"),
                ))
            }
        }
    }

    fn single(
        &mut self,
        kind: TokenKind,
        start_byte: u32,
        start_line: u32,
        start_col: u32,
        preamble: u32,
    ) -> Result<Token, LexError> {
        self.bump();
        Ok(Token::new(kind, self.make_location(start_byte, start_line, start_col, preamble)))
    }

    fn one_or_assign(
        &mut self,
        plain: TokenKind,
        assign: TokenKind,
        start_byte: u32,
        start_line: u32,
        start_col: u32,
        preamble: u32,
    ) -> Result<Token, LexError> {
        self.bump();
        let kind = if self.peek() == Some('=') {
            self.bump();
            assign
        } else {
            plain
        };
        Ok(Token::new(kind, self.make_location(start_byte, start_line, start_col, preamble)))
    }

    fn lex_minus(
        &mut self,
        start_byte: u32,
        start_line: u32,
        start_col: u32,
        preamble: u32,
    ) -> Result<Token, LexError> {
        self.bump(); // consume '-'
        if self.peek() == Some('=') {
            self.bump();
            return Ok(Token::new(
                TokenKind::AssignSubtract,
                self.make_location(start_byte, start_line, start_col, preamble),
            ));
        }

        let next_is_hex_prefix = self.peek() == Some('0')
            && matches!(self.peek2(), Some('x') | Some('X'));
        if !next_is_hex_prefix && matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            return self.lex_number(start_byte, start_line, start_col, preamble);
        }

        Ok(Token::new(TokenKind::Minus, self.make_location(start_byte, start_line, start_col, preamble)))
    }

    fn lex_number(
        &mut self,
        start_byte: u32,
        start_line: u32,
        start_col: u32,
        preamble: u32,
    ) -> Result<Token, LexError> {
        if self.peek() == Some('0') && matches!(self.peek2(), Some('x') | Some('X')) {
            self.bump(); // 0
            self.bump(); // x/X
            let mut digits = 0;
            while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
                self.bump();
                digits += 1;
            }
            if digits == 0 {
                return Err(self.error_at(
                    start_byte,
                    start_line,
                    start_col,
                    preamble,
                    "hexadecimal literal has no digits".to_string(),
                ));
            }
            return Ok(Token::new(
                TokenKind::IntLiteral,
                self.make_location(start_byte, start_line, start_col, preamble),
            ));
        }

        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }

        if self.peek() == Some('.') {
            self.bump();
            let mut digits = 0;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
                digits += 1;
            }
            if digits == 0 {
                return Err(self.error_at(
                    start_byte,
                    start_line,
                    start_col,
                    preamble,
                    "float literal cannot end in '.'".to_string(),
                ));
            }
            return Ok(Token::new(
                TokenKind::FloatLiteral,
                self.make_location(start_byte, start_line, start_col, preamble),
            ));
        }

        Ok(Token::new(
            TokenKind::IntLiteral,
            self.make_location(start_byte, start_line, start_col, preamble),
        ))
    }

    fn lex_string(
        &mut self,
        start_byte: u32,
        start_line: u32,
        start_col: u32,
        preamble: u32,
    ) -> Result<Token, LexError> {
        self.bump(); // opening quote
        loop {
            match self.peek() {
                None => {
                    return Err(self.error_at(
                        start_byte,
                        start_line,
                        start_col,
                        preamble,
                        "unterminated string literal".to_string(),
                    ))
                }
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    self.bump();
                    match self.peek() {
                        Some('n') | Some('t') | Some('"') | Some('\\') => {
                            self.bump();
                        }
                        _ => {
                            return Err(self.error_at(
                                start_byte,
                                start_line,
                                start_col,
                                preamble,
                                "invalid escape sequence in string literal".to_string(),
                            ))
                        }
                    }
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
        Ok(Token::new(
            TokenKind::StringLiteral,
            self.make_location(start_byte, start_line, start_col, preamble),
        ))
    }

    fn lex_identifier(
        &mut self,
        start_byte: u32,
        start_line: u32,
        start_col: u32,
        preamble: u32,
    ) -> Result<Token, LexError> {
        while matches!(self.peek(), Some(c) if is_ident_continue(c)) {
            self.bump();
        }
        let location = self.make_location(start_byte, start_line, start_col, preamble);
        let text = &self.text[start_byte as usize..location.byte_end() as usize];
        let lowered = text.to_ascii_lowercase();
        let kind = lookup_keyword(&lowered).unwrap_or(TokenKind::Identifier);
        Ok(Token::new(kind, location))
    }

    fn lex_comment_body(&mut self, kind: CommentKind) -> Result<Token, LexError> {
        let preamble = 0;
        let (start_byte, start_line, start_col) = self.here();

        let (terminal_kind, terminal_len, found) = match kind {
            CommentKind::Line => {
                loop {
                    match self.peek() {
                        None => break (TokenKind::Eof, 0, false),
                        Some('\r') => {
                            if self.peek2() == Some('\n') {
                                break (TokenKind::Newline, 2, true);
                            }
                            break (TokenKind::Newline, 1, true);
                        }
                        Some('\n') => break (TokenKind::Newline, 1, true),
                        Some(_) => {
                            self.bump();
                        }
                    }
                }
            }
            CommentKind::Block => loop {
                match self.peek() {
                    None => {
                        self.mode = Mode::Normal;
                        return Err(self.error_at(
                            start_byte,
                            start_line,
                            start_col,
                            preamble,
                            "unterminated block comment".to_string(),
                        ));
                    }
                    Some('/') if self.peek2_matches_close() => {
                        break (TokenKind::BlockCommentClose, 2, true);
                    }
                    Some(_) => {
                        self.bump();
                    }
                }
            },
            CommentKind::Doc => loop {
                match self.peek() {
                    None => {
                        self.mode = Mode::Normal;
                        return Err(self.error_at(
                            start_byte,
                            start_line,
                            start_col,
                            preamble,
                            "unterminated doc comment".to_string(),
                        ));
                    }
                    Some('}') => break (TokenKind::BraceClose, 1, true),
                    Some(_) => {
                        self.bump();
                    }
                }
            },
        };

        let comment_location = self.make_location(start_byte, start_line, start_col, preamble);

        if found {
            let (term_byte, term_line, term_col) = self.here();
            // Consume the terminal now so we know its end position, then
            // hand it back verbatim on the next call.
            for _ in 0..terminal_len {
                self.bump();
            }
            let terminal_location = self
                .make_location(term_byte, term_line, term_col, 0)
                .with_trivia(0, self.peek_postamble());
            self.pending_terminal = Some(Token::new(terminal_kind, terminal_location));
        } else {
            // Line comment ran off the end of the file with no newline.
            self.mode = Mode::Normal;
        }

        Ok(Token::new(TokenKind::Comment, comment_location))
    }

    fn peek2_matches_close(&self) -> bool {
        self.peek() == Some('/') && self.peek2() == Some(';')
    }

    fn error_at(
        &self,
        start_byte: u32,
        start_line: u32,
        start_col: u32,
        preamble: u32,
        message: String,
    ) -> LexError {
        LexError {
            location: self.make_location(start_byte, start_line, start_col, preamble),
            message,
        }
    }
}

enum CommentKind {
    Line,
    Block,
    Doc,
}

/// Resolves a byte offset within an already-valid UTF-8 prefix to a 1-based
/// (line, column) pair, matching [`crate::source::SourceFile::line_column`].
fn line_column_of_prefix(prefix: &[u8]) -> (u32, u32) {
    let text = std::str::from_utf8(prefix).unwrap_or_default();
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

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            match lexer.next_token() {
                Ok(t) => {
                    let done = t.kind == TokenKind::Eof;
                    out.push(t.kind);
                    if done {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
        out
    }

    #[test]
    fn line_comment_sequence() {
        assert_eq!(
            kinds("; hi\n"),
            vec![TokenKind::Semicolon, TokenKind::Comment, TokenKind::Newline, TokenKind::Eof]
        );
    }

    #[test]
    fn doc_comment_sequence_allows_empty() {
        assert_eq!(
            kinds("{}"),
            vec![TokenKind::BraceOpen, TokenKind::Comment, TokenKind::BraceClose, TokenKind::Eof]
        );
    }

    #[test]
    fn block_comment_sequence() {
        assert_eq!(
            kinds(";/ hi /;"),
            vec![
                TokenKind::BlockCommentOpen,
                TokenKind::Comment,
                TokenKind::BlockCommentClose,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn signed_number_folds_unless_hex() {
        assert_eq!(kinds("-5"), vec![TokenKind::IntLiteral, TokenKind::Eof]);
        assert_eq!(kinds("-0x5"), vec![TokenKind::Minus, TokenKind::IntLiteral, TokenKind::Eof]);
        assert_eq!(kinds("- 5"), vec![TokenKind::Minus, TokenKind::IntLiteral, TokenKind::Eof]);
    }

    #[test]
    fn array_type_requires_no_space() {
        assert_eq!(kinds("[]"), vec![TokenKind::ArrayType, TokenKind::Eof]);
        assert_eq!(
            kinds("[ ]"),
            vec![TokenKind::BracketOpen, TokenKind::BracketClose, TokenKind::Eof]
        );
    }

    #[test]
    fn lone_cr_is_an_error() {
        let mut lexer = Lexer::new("\rInt");
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn invalid_utf8_is_rejected_before_lexing_starts() {
        let bytes = b"Int a = 1\n\xFF\xFE\n";
        let err = Lexer::from_bytes(bytes).unwrap_err();
        assert_eq!(err.location.byte_offset, 10);
        assert_eq!(err.message, "invalid UTF-8");
    }
}
