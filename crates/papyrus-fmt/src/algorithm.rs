#![allow(dead_code)]
//! Wadler/Oppen-style pretty-printing engine: a ring-buffered queue of
//! string/break/begin/end tokens and a two-phase scan/print algorithm that
//! decides whether a "box" (a group of tokens that breaks together) fits
//! on the remaining line width.
//!
//! This is representation-agnostic — it knows nothing about Papyrus — so
//! the same engine that drives `word`/`ibox`/`cbox`/`hardbreak` here is
//! reused unmodified by every per-node formatting function in this crate.

use crate::{ring::RingBuffer, OutputOptions};
use std::{
    cmp,
    collections::VecDeque,
    io::{self, Write},
};

const MIN_SPACE: isize = 60;

#[derive(Clone, Copy, PartialEq)]
pub enum Breaks {
    Consistent,
    Inconsistent,
}

#[derive(Clone, Copy, Default)]
pub struct BreakToken {
    pub offset: isize,
    pub blank_space: usize,
    pub pre_break: Option<char>,
    pub post_break: Option<char>,
    pub no_break: Option<char>,
    pub if_nonempty: bool,
    pub never_break: bool,
}

#[derive(Clone, Copy)]
pub struct BeginToken {
    pub offset: isize,
    pub breaks: Breaks,
}

pub enum Token<'a> {
    Str(&'a str),
    Break(BreakToken),
    Begin(BeginToken),
    End,
}

#[derive(Copy, Clone)]
enum PrintFrame {
    Fits(Breaks),
    Broken(usize, Breaks),
}

pub const SIZE_INFINITY: isize = 0xffff;

pub struct Formatter<'a, W: Write> {
    pub(crate) options: &'a OutputOptions,
    pub(crate) out: W,
    newline: &'static str,
    indent_unit: String,
    // Number of spaces left on line
    space: isize,
    // Ring-buffer of tokens and calculated sizes
    buf: RingBuffer<BufEntry<'a>>,
    // Total size of tokens already printed
    left_total: isize,
    // Total size of tokens enqueued, including printed and not yet printed
    right_total: isize,
    // Holds the ring-buffer index of the Begin that started the current block,
    // possibly with the most recent Break after that Begin (if there is any) on
    // top of it. Values are pushed and popped on the back of the queue using it
    // like stack, and elsewhere old values are popped from the front of the
    // queue as they become irrelevant due to the primary ring-buffer advancing.
    scan_stack: VecDeque<usize>,
    // Stack of blocks-in-progress being flushed by print
    print_stack: Vec<PrintFrame>,
    // Level of indentation of current line
    indent: usize,
    // Buffered indentation to avoid writing trailing whitespace
    pending_indentation: usize,
    pending_spaces: usize,
    max_width: isize,
}

struct BufEntry<'a> {
    token: Token<'a>,
    size: isize,
}

impl<'a, W: Write> Formatter<'a, W> {
    pub fn new(out: W, options: &'a OutputOptions) -> Self {
        let max_width = 100isize;
        Formatter {
            out,
            newline: if options.unix_line_endings { "\n" } else { "\r\n" },
            indent_unit: if options.use_tabs {
                "\t".to_string()
            } else {
                " ".repeat(options.indent_width as usize)
            },
            space: max_width,
            max_width,
            options,
            buf: RingBuffer::new(),
            left_total: 0,
            right_total: 0,
            scan_stack: VecDeque::new(),
            print_stack: Vec::new(),
            indent: 0,
            pending_indentation: 0,
            pending_spaces: 0,
        }
    }

    /// Flushes any boxes still open on the scan stack and hands back the
    /// underlying writer.
    pub fn eof(mut self) -> io::Result<W> {
        if !self.scan_stack.is_empty() {
            self.check_stack(0);
            self.advance_left()?;
        }

        Ok(self.out)
    }

    pub(crate) fn scan_begin(&mut self, token: BeginToken) {
        if self.scan_stack.is_empty() {
            self.left_total = 1;
            self.right_total = 1;
            self.buf.clear();
        }
        let right = self.buf.push(BufEntry {
            token: Token::Begin(token),
            size: -self.right_total,
        });
        self.scan_stack.push_back(right);
    }

    pub(crate) fn scan_end(&mut self) {
        if self.scan_stack.is_empty() {
            self.print_end();
        } else {
            if !self.buf.is_empty() {
                if let Token::Break(break_token) = self.buf.last().token {
                    if self.buf.len() >= 2 {
                        if let Token::Begin(_) = self.buf.second_last().token {
                            self.buf.pop_last();
                            self.buf.pop_last();
                            self.scan_stack.pop_back();
                            self.scan_stack.pop_back();
                            self.right_total -= break_token.blank_space as isize;
                            return;
                        }
                    }
                    if break_token.if_nonempty {
                        self.buf.pop_last();
                        self.scan_stack.pop_back();
                        self.right_total -= break_token.blank_space as isize;
                    }
                }
            }
            let right = self.buf.push(BufEntry {
                token: Token::End,
                size: -1,
            });
            self.scan_stack.push_back(right);
        }
    }

    pub(crate) fn scan_break(&mut self, token: BreakToken) {
        if self.scan_stack.is_empty() {
            self.left_total = 1;
            self.right_total = 1;
            self.buf.clear();
        } else {
            self.check_stack(0);
        }
        let right = self.buf.push(BufEntry {
            token: Token::Break(token),
            size: -self.right_total,
        });
        self.scan_stack.push_back(right);
        self.right_total += token.blank_space as isize;
    }

    pub(crate) fn scan_string(&mut self, string: &'a str) -> io::Result<()> {
        if self.scan_stack.is_empty() {
            self.print_string(string)?;
        } else {
            let len = string.len() as isize;
            self.buf.push(BufEntry {
                token: Token::Str(string),
                size: len,
            });
            self.right_total += len;
            self.check_stream()?;
        }

        Ok(())
    }

    pub(crate) fn offset(&mut self, offset: isize) {
        match &mut self.buf.last_mut().token {
            Token::Break(token) => token.offset += offset,
            Token::Begin(_) => {}
            Token::Str(_) | Token::End => unreachable!(),
        }
    }

    fn check_stream(&mut self) -> io::Result<()> {
        while self.right_total - self.left_total > self.space {
            if *self.scan_stack.front().unwrap() == self.buf.index_of_first() {
                self.scan_stack.pop_front().unwrap();
                self.buf.first_mut().size = SIZE_INFINITY;
            }

            self.advance_left()?;

            if self.buf.is_empty() {
                break;
            }
        }

        Ok(())
    }

    fn advance_left(&mut self) -> io::Result<()> {
        while self.buf.first().size >= 0 {
            let left = self.buf.pop_first();

            match left.token {
                Token::Str(string) => {
                    self.left_total += left.size;
                    self.print_string(string)?;
                }
                Token::Break(token) => {
                    self.left_total += token.blank_space as isize;
                    self.print_break(token, left.size)?;
                }
                Token::Begin(token) => self.print_begin(token, left.size),
                Token::End => self.print_end(),
            }

            if self.buf.is_empty() {
                break;
            }
        }

        Ok(())
    }

    fn check_stack(&mut self, mut depth: usize) {
        while let Some(&index) = self.scan_stack.back() {
            let mut entry = &mut self.buf[index];
            match entry.token {
                Token::Begin(_) => {
                    if depth == 0 {
                        break;
                    }
                    self.scan_stack.pop_back().unwrap();
                    entry.size += self.right_total;
                    depth -= 1;
                }
                Token::End => {
                    self.scan_stack.pop_back().unwrap();
                    entry.size = 1;
                    depth += 1;
                }
                Token::Break(_) => {
                    self.scan_stack.pop_back().unwrap();
                    entry.size += self.right_total;
                    if depth == 0 {
                        break;
                    }
                }
                Token::Str(_) => unreachable!(),
            }
        }
    }

    fn get_top(&self) -> PrintFrame {
        const OUTER: PrintFrame = PrintFrame::Broken(0, Breaks::Inconsistent);
        self.print_stack.last().map_or(OUTER, PrintFrame::clone)
    }

    fn print_begin(&mut self, token: BeginToken, size: isize) {
        if size > self.space {
            self.print_stack
                .push(PrintFrame::Broken(self.indent, token.breaks));
            self.indent = usize::try_from(self.indent as isize + token.offset).unwrap();
        } else {
            self.print_stack.push(PrintFrame::Fits(token.breaks));
        }
    }

    fn print_end(&mut self) {
        match self.print_stack.pop().unwrap() {
            PrintFrame::Broken(indent, breaks) => {
                self.indent = indent;
                breaks
            }
            PrintFrame::Fits(breaks) => breaks,
        };
    }

    fn print_break(&mut self, token: BreakToken, size: isize) -> io::Result<()> {
        let fits = token.never_break
            || match self.get_top() {
                PrintFrame::Fits(..) => true,
                PrintFrame::Broken(.., Breaks::Consistent) => false,
                PrintFrame::Broken(.., Breaks::Inconsistent) => size <= self.space,
            };
        if fits {
            self.pending_spaces += token.blank_space;
            self.space -= token.blank_space as isize;
            if let Some(no_break) = token.no_break {
                self.out.write_all(no_break.to_string().as_bytes())?;
                self.space -= no_break.len_utf8() as isize;
            }
        } else {
            if let Some(pre_break) = token.pre_break {
                self.print_indent()?;
                self.out.write_all(pre_break.to_string().as_bytes())?;
            }
            self.out.write_all(self.newline.as_bytes())?;
            let indent = self.indent as isize + token.offset;
            self.pending_indentation = usize::try_from(indent).unwrap();
            self.space = cmp::max(self.max_width - indent, MIN_SPACE);
            if let Some(post_break) = token.post_break {
                self.print_indent()?;
                self.out.write_all(post_break.to_string().as_bytes())?;
                self.space -= post_break.len_utf8() as isize;
            }
        }

        Ok(())
    }

    fn print_string(&mut self, string: &str) -> io::Result<()> {
        self.print_indent()?;
        self.out.write_all(string.as_bytes())?;
        self.space -= string.len() as isize;
        Ok(())
    }

    fn print_indent(&mut self) -> io::Result<()> {
        for _ in 0..self.pending_indentation {
            self.out.write_all(self.indent_unit.as_bytes())?;
        }

        for _ in 0..self.pending_spaces {
            self.out.write_all(b" ")?;
        }

        self.pending_indentation = 0;
        self.pending_spaces = 0;
        Ok(())
    }
}
