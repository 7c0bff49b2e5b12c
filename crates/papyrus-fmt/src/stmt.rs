//! Statement and statement-block formatting.

use crate::algorithm::Formatter;
use papyrus_syntax::ast::{AssignOp, Statement};
use std::io::{self, Write};

impl<'a, W: Write> Formatter<'a, W> {
    /// Formats a block of statements one indentation level deeper than the
    /// surrounding code, one statement per line.
    pub(crate) fn fmt_block(&mut self, stmts: &'a [Statement]) -> io::Result<()> {
        self.cbox(1);
        for stmt in stmts {
            self.hardbreak();
            self.fmt_stmt(stmt)?;
        }
        self.end();
        Ok(())
    }

    pub(crate) fn fmt_stmt(&mut self, stmt: &'a Statement) -> io::Result<()> {
        self.leading_comments(&stmt.attached_comments().leading)?;
        match stmt {
            Statement::AssignStmt(s) => {
                self.fmt_expr(&s.target)?;
                self.word(" ")?;
                self.word(assign_op_str(s.op))?;
                self.word(" ")?;
                self.fmt_expr(&s.value)?;
            }
            Statement::ReturnStmt(s) => {
                self.word("Return")?;
                if let Some(value) = &s.value {
                    self.word(" ")?;
                    self.fmt_expr(value)?;
                }
            }
            Statement::IfStmt(s) => {
                self.word("If")?;
                self.word(" ")?;
                self.fmt_expr(&s.condition)?;
                self.fmt_block(&s.then_branch)?;
                for (cond, body) in &s.else_ifs {
                    self.hardbreak();
                    self.word("ElseIf")?;
                    self.word(" ")?;
                    self.fmt_expr(cond)?;
                    self.fmt_block(body)?;
                }
                if let Some(body) = &s.else_branch {
                    self.hardbreak();
                    self.word("Else")?;
                    self.fmt_block(body)?;
                }
                self.hardbreak();
                self.word("EndIf")?;
            }
            Statement::WhileStmt(s) => {
                self.word("While")?;
                self.word(" ")?;
                self.fmt_expr(&s.condition)?;
                self.fmt_block(&s.body)?;
                self.hardbreak();
                self.word("EndWhile")?;
            }
            Statement::ExprStmt(s) => {
                self.fmt_expr(&s.expr)?;
            }
            Statement::VariableDecl(s) => {
                self.word(&s.ty.name)?;
                if s.ty.is_array {
                    self.word("[]")?;
                }
                self.word(" ")?;
                self.word(&s.name.name)?;
                if let Some(init) = &s.initializer {
                    self.word(" ")?;
                    self.word("=")?;
                    self.word(" ")?;
                    self.fmt_expr(init)?;
                }
            }
        }
        self.trailing_comment(stmt.attached_comments().trailing.as_ref())
    }
}

fn assign_op_str(op: AssignOp) -> &'static str {
    match op {
        AssignOp::Assign => "=",
        AssignOp::Add => "+=",
        AssignOp::Subtract => "-=",
        AssignOp::Multiply => "*=",
        AssignOp::Divide => "/=",
        AssignOp::Modulo => "%=",
    }
}
