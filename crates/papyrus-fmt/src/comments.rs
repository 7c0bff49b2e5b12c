//! Renders [`papyrus_syntax::ast::Comment`]s attached to a node.
//!
//! Leading comments are emitted one per line immediately before their
//! host, in their original delimiter style; a trailing comment shares the
//! host's line, separated by two spaces, matching how Creation Kit
//! scripts conventionally align end-of-line remarks.

use crate::algorithm::Formatter;
use papyrus_syntax::ast::{Comment, CommentKind};
use std::io::{self, Write};

impl<'a, W: Write> Formatter<'a, W> {
    pub(crate) fn leading_comments(&mut self, comments: &'a [Comment]) -> io::Result<()> {
        for comment in comments {
            self.comment_body(comment)?;
            self.hardbreak();
        }
        Ok(())
    }

    pub(crate) fn trailing_comment(&mut self, comment: Option<&'a Comment>) -> io::Result<()> {
        if let Some(comment) = comment {
            self.word(" ")?;
            self.word(" ")?;
            self.comment_body(comment)?;
        }
        Ok(())
    }

    fn comment_body(&mut self, comment: &'a Comment) -> io::Result<()> {
        match comment.kind {
            CommentKind::Line => {
                self.word(";")?;
                self.word(&comment.text)?;
            }
            CommentKind::Doc => {
                self.word("{")?;
                self.word(&comment.text)?;
                self.word("}")?;
            }
            CommentKind::Block => {
                self.word(";/")?;
                self.word(&comment.text)?;
                self.word("/;")?;
            }
        }
        Ok(())
    }
}
