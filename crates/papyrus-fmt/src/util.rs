#![allow(dead_code)]
//! The `ibox`/`cbox`/`word`/`space`/`hardbreak` vocabulary built on top of
//! the scan/print primitives in [`crate::algorithm`].

use crate::algorithm::{self, BeginToken, BreakToken, Breaks, Formatter};
use std::io::{self, Write};

impl<'a, W: Write> Formatter<'a, W> {
    /// Opens an inconsistent-break box: a group where each break decides
    /// independently whether to fire once the group doesn't fit.
    pub(crate) fn ibox(&mut self, indent: isize) {
        self.scan_begin(BeginToken {
            offset: indent,
            breaks: Breaks::Inconsistent,
        });
    }

    /// Opens a consistent-break box: once one break in the group fires,
    /// every break in it fires.
    pub(crate) fn cbox(&mut self, indent: isize) {
        self.scan_begin(BeginToken {
            offset: indent,
            breaks: Breaks::Consistent,
        });
    }

    pub(crate) fn end(&mut self) {
        self.scan_end();
    }

    pub(crate) fn word(&mut self, wrd: &'a str) -> io::Result<()> {
        self.scan_string(wrd)
    }

    fn spaces(&mut self, n: usize) {
        self.scan_break(BreakToken {
            blank_space: n,
            ..BreakToken::default()
        });
    }

    pub(crate) fn zerobreak(&mut self) {
        self.spaces(0);
    }

    pub(crate) fn space(&mut self) {
        self.spaces(1);
    }

    pub(crate) fn nbsp(&mut self) -> io::Result<()> {
        self.word(" ")
    }

    pub(crate) fn hardbreak(&mut self) {
        self.spaces(algorithm::SIZE_INFINITY as usize);
    }

    /// Emits up to `count` hard breaks, capped at the configured maximum
    /// number of consecutive blank lines so formatting a file with many
    /// blank lines between members converges to at most one.
    pub(crate) fn hardbreaks(&mut self, count: u64) {
        for _ in 0..count.min(1) {
            self.hardbreak();
        }
    }

    pub(crate) fn space_if_nonempty(&mut self) {
        self.scan_break(BreakToken {
            blank_space: 1,
            if_nonempty: true,
            ..BreakToken::default()
        });
    }

    pub(crate) fn hardbreak_if_nonempty(&mut self) {
        self.scan_break(BreakToken {
            blank_space: algorithm::SIZE_INFINITY as usize,
            if_nonempty: true,
            ..BreakToken::default()
        });
    }

    pub(crate) fn trailing_comma(&mut self, is_last: bool) -> io::Result<()> {
        if is_last {
            self.scan_break(BreakToken {
                pre_break: Some(','),
                ..BreakToken::default()
            });
        } else {
            self.word(",")?;
            self.space();
        }

        Ok(())
    }

    pub(crate) fn neverbreak(&mut self) {
        self.scan_break(BreakToken {
            never_break: true,
            ..BreakToken::default()
        });
    }
}
