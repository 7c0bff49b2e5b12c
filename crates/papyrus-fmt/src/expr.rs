//! Expression formatting. Precedence is never re-derived here — the tree
//! already records exactly which sub-expressions were parenthesized in
//! the source ([`papyrus_syntax::ast::Expression::Paren`]), so printing
//! is just a structural walk with operator spacing rules layered on top.

use crate::algorithm::Formatter;
use papyrus_syntax::ast::{BinaryOp, Expression, UnaryOp};
use std::io::{self, Write};

impl<'a, W: Write> Formatter<'a, W> {
    pub(crate) fn fmt_expr(&mut self, expr: &'a Expression) -> io::Result<()> {
        match expr {
            Expression::IntLiteral(e)
            | Expression::FloatLiteral(e)
            | Expression::StringLiteral(e)
            | Expression::BoolLiteral(e) => self.word(&e.text),
            Expression::Identifier(e) => self.word(&e.name),
            Expression::Dot(e) => {
                self.fmt_expr(&e.target)?;
                self.word(".")?;
                self.word(&e.member.name)
            }
            Expression::Index(e) => {
                self.fmt_expr(&e.target)?;
                self.word("[")?;
                self.fmt_expr(&e.index)?;
                self.word("]")
            }
            Expression::Call(e) => {
                self.fmt_expr(&e.callee)?;
                self.word("(")?;
                self.ibox(0);
                for (i, arg) in e.args.iter().enumerate() {
                    if i > 0 {
                        self.word(",")?;
                        self.space();
                    }
                    self.fmt_expr(arg)?;
                }
                self.end();
                self.word(")")
            }
            Expression::New(e) => {
                self.word("New")?;
                self.word(" ")?;
                self.word(&e.ty.name)?;
                if e.ty.is_array {
                    self.word("[]")?;
                }
                self.word("[")?;
                self.fmt_expr(&e.size)?;
                self.word("]")
            }
            Expression::Unary(e) => {
                self.word(unary_op_str(e.op))?;
                self.fmt_expr(&e.operand)
            }
            Expression::Binary(e) => {
                self.fmt_expr(&e.lhs)?;
                self.word(" ")?;
                self.word(binary_op_str(e.op))?;
                self.word(" ")?;
                self.fmt_expr(&e.rhs)
            }
            Expression::Paren(e) => {
                self.word("(")?;
                self.fmt_expr(&e.inner)?;
                self.word(")")
            }
        }
    }
}

fn unary_op_str(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Negate => "-",
        UnaryOp::Not => "!",
    }
}

fn binary_op_str(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Or => "||",
        BinaryOp::And => "&&",
        BinaryOp::Equal => "==",
        BinaryOp::NotEqual => "!=",
        BinaryOp::Less => "<",
        BinaryOp::LessOrEqual => "<=",
        BinaryOp::Greater => ">",
        BinaryOp::GreaterOrEqual => ">=",
        BinaryOp::Add => "+",
        BinaryOp::Subtract => "-",
        BinaryOp::Multiply => "*",
        BinaryOp::Divide => "/",
        BinaryOp::Modulo => "%",
    }
}
