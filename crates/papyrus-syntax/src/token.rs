//! The closed set of lexical token kinds and the case-insensitive keyword
//! table used to recognize them.

use crate::location::Location;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Structural keywords
    ScriptName,
    Extends,
    State,
    Auto,
    EndState,
    Event,
    EndEvent,
    Function,
    EndFunction,
    Property,
    EndProperty,
    Import,
    Return,
    If,
    ElseIf,
    Else,
    EndIf,
    While,
    EndWhile,
    New,

    // Type keywords
    Int,
    Float,
    Bool,
    StringType,
    ArrayType,

    // Literals
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    BoolLiteral,
    Identifier,

    // Punctuation
    ParenthesisOpen,
    ParenthesisClose,
    BracketOpen,
    BracketClose,
    BraceOpen,
    BraceClose,
    Comma,
    Dot,
    Semicolon,
    Newline,

    // Operators
    Assign,
    AssignAdd,
    AssignSubtract,
    AssignMultiply,
    AssignDivide,
    AssignModulo,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    LogicalAnd,
    LogicalOr,
    LogicalNot,

    // Trivia
    Comment,
    BlockCommentOpen,
    BlockCommentClose,

    Eof,
    Illegal,
}

impl TokenKind {
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Comment | TokenKind::BlockCommentOpen | TokenKind::BlockCommentClose
        )
    }

    #[must_use]
    pub fn is_keyword(self) -> bool {
        KEYWORDS.iter().any(|(_, kind)| *kind == self)
    }
}

/// Looks up an identifier's lower-cased text against the keyword table.
/// Papyrus keywords are case-insensitive (`Function`, `function` and
/// `FUNCTION` are the same token), so the caller must lower-case before
/// calling this; we don't allocate here to keep the lexer's hot path free
/// of per-identifier heap churn beyond the one lower-casing pass.
#[must_use]
pub fn lookup_keyword(lowercase_text: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(text, _)| *text == lowercase_text)
        .map(|(_, kind)| *kind)
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("scriptname", TokenKind::ScriptName),
    ("extends", TokenKind::Extends),
    ("state", TokenKind::State),
    ("auto", TokenKind::Auto),
    ("endstate", TokenKind::EndState),
    ("event", TokenKind::Event),
    ("endevent", TokenKind::EndEvent),
    ("function", TokenKind::Function),
    ("endfunction", TokenKind::EndFunction),
    ("property", TokenKind::Property),
    ("endproperty", TokenKind::EndProperty),
    ("import", TokenKind::Import),
    ("return", TokenKind::Return),
    ("if", TokenKind::If),
    ("elseif", TokenKind::ElseIf),
    ("else", TokenKind::Else),
    ("endif", TokenKind::EndIf),
    ("while", TokenKind::While),
    ("endwhile", TokenKind::EndWhile),
    ("new", TokenKind::New),
    ("int", TokenKind::Int),
    ("float", TokenKind::Float),
    ("bool", TokenKind::Bool),
    ("string", TokenKind::StringType),
    ("true", TokenKind::BoolLiteral),
    ("false", TokenKind::BoolLiteral),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, location: Location) -> Self {
        Self { kind, location }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Function" => Some(TokenKind::Function))]
    #[test_case("FUNCTION" => Some(TokenKind::Function))]
    #[test_case("fUnCtIoN" => Some(TokenKind::Function))]
    #[test_case("functionality" => None)]
    fn keyword_casefold(lowered: &str) -> Option<TokenKind> {
        lookup_keyword(&lowered.to_ascii_lowercase())
    }
}
