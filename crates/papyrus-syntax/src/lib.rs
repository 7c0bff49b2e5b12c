//! Front-end pipeline for Papyrus source: byte-accurate source model,
//! trivia-preserving lexer, and a recursive-descent parser producing a
//! lossless concrete syntax tree.

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod location;
pub mod parser;
pub mod source;
pub mod token;

pub use diagnostics::{Diagnostic, DiagnosticLog, Severity, Snippet};
pub use lexer::{LexError, Lexer};
pub use location::Location;
pub use parser::{parse, ParseOptions};
pub use source::SourceFile;
pub use token::{Token, TokenKind};

#[cfg(test)]
mod tests {
    use super::*;
    use ast::Member;

    fn parse_str(src: &str) -> (ast::Script, DiagnosticLog) {
        let file = SourceFile::new("test.psc", src.as_bytes().to_vec());
        let mut log = DiagnosticLog::new();
        let (script, _ok) = parse(&file, &mut log, ParseOptions::default());
        (script, log)
    }

    #[test]
    fn parses_minimal_script() {
        let (script, log) = parse_str("ScriptName Foo extends Bar\r\n");
        assert!(log.is_empty());
        assert_eq!(script.name.name, "Foo");
        assert_eq!(script.parent.as_ref().unwrap().name, "Bar");
        assert!(script.members.is_empty());
    }

    #[test]
    fn parses_function_with_return() {
        let src = "ScriptName Foo\r\n\r\nInt Function Add(Int a, Int b)\r\n\treturn a + b\r\nEndFunction\r\n";
        let (script, log) = parse_str(src);
        assert!(log.is_empty(), "{log:?}");
        assert_eq!(script.members.len(), 1);
        match &script.members[0] {
            Member::Function(f) => {
                assert_eq!(f.name.name, "Add");
                assert_eq!(f.params.len(), 2);
                assert_eq!(f.body.len(), 1);
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn coverage_every_byte_is_accounted_for_by_token_text_or_trivia() {
        // Every byte is either inside a token's own span or counted by the
        // preamble of the token immediately following it; walking the
        // stream and checking `covered + preamble == token.start` for each
        // token (including the final EOF) proves there are no gaps.
        let src = "ScriptName Foo\r\n; a comment\r\nInt Property Bar = 1 Auto\r\n";
        let file = SourceFile::new("test.psc", src.as_bytes().to_vec());
        let mut lexer = Lexer::from_bytes(file.bytes()).expect("test input is valid UTF-8");
        let mut covered = 0u32;
        loop {
            let token = lexer.next_token().expect("no lex errors in this input");
            assert_eq!(
                covered + token.location.preamble_length,
                token.location.byte_offset,
                "gap before {:?}",
                token.kind
            );
            covered = token.location.byte_end();
            if token.kind == TokenKind::Eof {
                break;
            }
        }
        assert_eq!(covered as usize, file.len());
    }

    #[test]
    fn total_location_every_node_has_a_location() {
        let (script, _log) = parse_str("ScriptName Foo\r\n\r\nInt Function Get()\r\n\treturn 1\r\nEndFunction\r\n");
        assert!(script.location.length > 0);
        for member in &script.members {
            assert!(member.location().length > 0);
        }
    }

    #[test]
    fn line_ending_independence_lf_and_crlf_parse_the_same_shape() {
        let crlf = "ScriptName Foo\r\n\r\nInt Function Get()\r\n\treturn 1\r\nEndFunction\r\n";
        let lf = "ScriptName Foo\n\nInt Function Get()\n\treturn 1\nEndFunction\n";
        let (crlf_script, crlf_log) = parse_str(crlf);
        let (lf_script, lf_log) = parse_str(lf);
        assert!(crlf_log.is_empty());
        assert!(lf_log.is_empty());
        assert_eq!(crlf_script.members.len(), lf_script.members.len());
    }

    #[test]
    fn omitted_optional_constructs_record_no_diagnostics() {
        let src = "ScriptName Foo\r\n\r\nInt Function Add(Int a, Int b, Int c)\r\n\tIf a > b\r\n\t\treturn a\r\n\tEndIf\r\n\treturn Add(a, b, c)\r\nEndFunction\r\n";
        let (script, log) = parse_str(src);
        assert!(log.is_empty(), "{log:?}");
        assert!(script.parent.is_none());
        match &script.members[0] {
            Member::Function(f) => assert_eq!(f.params.len(), 3),
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_yields_a_diagnostic_instead_of_panicking() {
        let file = SourceFile::new("bad.psc", vec![b'I', b'n', b't', 0xFF, 0xFE]);
        let mut log = DiagnosticLog::new();
        let (script, ok) = parse(&file, &mut log, ParseOptions::default());
        assert!(!ok);
        assert_eq!(log.len(), 1);
        assert_eq!(log.first().unwrap().location.byte_offset, 3);
        assert!(script.members.is_empty());
    }
}
