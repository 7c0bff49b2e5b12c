#![allow(
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::derive_partial_eq_without_eq,
    clippy::doc_markdown,
    clippy::enum_glob_use,
    clippy::items_after_statements,
    clippy::match_like_matches_macro,
    clippy::match_same_arms,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::too_many_lines,
    clippy::unused_self,
    clippy::vec_init_then_push,
    clippy::wildcard_imports,
    clippy::cast_possible_truncation
)]
//! Pretty-printer for the Papyrus concrete syntax tree produced by
//! `papyrus-syntax`.

mod algorithm;
mod comments;
mod expr;
mod ring;
mod script;
mod stmt;
mod util;

pub mod options;

pub use algorithm::Formatter;
pub use options::{OptionParseError, OutputOptions, OutputOptionsIncomplete};

use papyrus_syntax::ast::Script;
use std::io;

/// Formats an already-parsed script to a UTF-8 string.
///
/// # Panics
///
/// Panics if the formatter ever writes non-UTF-8 bytes, which cannot
/// happen since every [`Formatter::word`] call is fed `&str`.
#[must_use]
pub fn format_script(script: &Script, options: &OutputOptions) -> String {
    let buf =
        format_script_bytes(script, options).expect("formatting to an in-memory buffer cannot fail");
    // SAFETY: every byte written by `Formatter` comes from a `&str`.
    unsafe { String::from_utf8_unchecked(buf) }
}

/// Formats an already-parsed script, returning the raw bytes written.
///
/// Exposed separately from [`format_script`] for callers writing directly
/// to a file or other [`io::Write`] sink without an intermediate buffer.
pub fn format_script_bytes(script: &Script, options: &OutputOptions) -> io::Result<Vec<u8>> {
    let mut formatter = Formatter::new(Vec::new(), options);
    formatter.fmt_script(script)?;
    formatter.eof()
}

/// Parses `src` and formats it in one step, returning the parser's
/// diagnostics alongside the formatted text so a caller can decide
/// whether to trust output produced from a source with parse errors.
pub fn format_source(
    name: &str,
    src: &str,
    options: &OutputOptions,
) -> (String, papyrus_syntax::DiagnosticLog) {
    let file = papyrus_syntax::SourceFile::new(name, src.as_bytes().to_vec());
    let mut log = papyrus_syntax::DiagnosticLog::new();
    let (script, _ok) =
        papyrus_syntax::parse(&file, &mut log, papyrus_syntax::ParseOptions::default());
    (format_script(&script, options), log)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(src: &str) -> String {
        let (formatted, log) = format_source("test.psc", src, &OutputOptions::default());
        assert!(log.is_empty(), "{log:?}");
        formatted
    }

    #[test]
    fn formats_minimal_script() {
        let out = format("ScriptName Foo extends Bar\r\n");
        assert!(out.starts_with("ScriptName Foo extends Bar"));
    }

    #[test]
    fn formats_function_body_indented() {
        let src = "ScriptName Foo\r\n\r\nInt Function Add(Int a, Int b)\r\n\treturn a + b\r\nEndFunction\r\n";
        let out = format(src);
        assert!(out.contains("Function Add(Int a, Int b)"));
        assert!(out.contains("Return a + b"));
        assert!(out.contains("EndFunction"));
    }

    #[test]
    fn formatting_is_idempotent() {
        let src = "ScriptName Foo\r\n\r\nInt Function Get()\r\n\treturn 1\r\nEndFunction\r\n";
        let once = format(src);
        let twice = format(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn unix_line_endings_option_switches_newline() {
        let file = papyrus_syntax::SourceFile::new("t.psc", b"ScriptName Foo\r\n".to_vec());
        let mut log = papyrus_syntax::DiagnosticLog::new();
        let (script, _) =
            papyrus_syntax::parse(&file, &mut log, papyrus_syntax::ParseOptions::default());
        let options = OutputOptions {
            unix_line_endings: true,
            ..OutputOptions::default()
        };
        let out = format_script(&script, &options);
        assert!(!out.contains('\r'));
    }
}
