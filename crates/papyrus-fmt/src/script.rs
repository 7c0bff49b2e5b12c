//! Top-level `Script` and `Member` formatting: the header line, member
//! ordering, blank-line canonicalization between members, and `State`
//! nesting.

use crate::algorithm::Formatter;
use papyrus_syntax::ast::{
    EventMember, FunctionMember, Member, Param, PropertyMember, Script, StateMember,
    VariableMember,
};
use std::io::{self, Write};

impl<'a, W: Write> Formatter<'a, W> {
    pub fn fmt_script(&mut self, script: &'a Script) -> io::Result<()> {
        self.word("ScriptName")?;
        self.word(" ")?;
        self.word(&script.name.name)?;
        if let Some(parent) = &script.parent {
            self.word(" ")?;
            self.word("extends")?;
            self.word(" ")?;
            self.word(&parent.name)?;
        }
        if let Some(doc) = &script.doc_comment {
            self.word(" ")?;
            self.word("{")?;
            self.word(doc)?;
            self.word("}")?;
        }

        let mut previous: Option<&Member> = None;
        for member in &script.members {
            self.member_separator(previous, member);
            self.fmt_member(member)?;
            previous = Some(member);
        }

        self.hardbreak();
        Ok(())
    }

    /// One blank line between top-level members, except back-to-back
    /// property overloads, which stay adjacent.
    fn member_separator(&mut self, previous: Option<&'a Member>, current: &'a Member) {
        if previous.map_or(false, |p| is_property(p) && is_property(current)) {
            self.hardbreak();
        } else {
            self.hardbreak();
            self.hardbreak();
        }
    }

    fn fmt_member(&mut self, member: &'a Member) -> io::Result<()> {
        self.leading_comments(&member.attached_comments().leading)?;
        match member {
            Member::Import(m) => {
                self.word("Import")?;
                self.word(" ")?;
                self.word(&m.name.name)?;
            }
            Member::Property(m) => self.fmt_property(m)?,
            Member::Variable(m) => self.fmt_variable(m)?,
            Member::Function(m) => self.fmt_function(m)?,
            Member::Event(m) => self.fmt_event(m)?,
            Member::State(m) => self.fmt_state(m)?,
        }
        self.trailing_comment(member.attached_comments().trailing.as_ref())
    }

    fn fmt_property(&mut self, m: &'a PropertyMember) -> io::Result<()> {
        self.word(&m.ty.name)?;
        if m.ty.is_array {
            self.word("[]")?;
        }
        self.word(" ")?;
        self.word("Property")?;
        self.word(" ")?;
        self.word(&m.name.name)?;
        if let Some(value) = &m.default_value {
            self.word(" ")?;
            self.word("=")?;
            self.word(" ")?;
            self.fmt_expr(value)?;
        }
        if m.is_auto {
            self.word(" ")?;
            self.word("Auto")?;
        } else {
            // The parser treats a full property's getter/setter body as an
            // opaque span it does not retain, so there is nothing here to
            // print back out.
            tracing::warn!(
                property = %m.name.name,
                "full property getter/setter body is not retained by the parser; emitting an empty body"
            );
            self.hardbreak();
            self.word("EndProperty")?;
        }
        Ok(())
    }

    fn fmt_variable(&mut self, m: &'a VariableMember) -> io::Result<()> {
        self.word(&m.ty.name)?;
        if m.ty.is_array {
            self.word("[]")?;
        }
        self.word(" ")?;
        self.word(&m.name.name)?;
        if let Some(init) = &m.initializer {
            self.word(" ")?;
            self.word("=")?;
            self.word(" ")?;
            self.fmt_expr(init)?;
        }
        Ok(())
    }

    fn fmt_params(&mut self, params: &'a [Param]) -> io::Result<()> {
        self.word("(")?;
        self.ibox(0);
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.word(",")?;
                self.space();
            }
            self.word(&param.ty.name)?;
            if param.ty.is_array {
                self.word("[]")?;
            }
            self.word(" ")?;
            self.word(&param.name.name)?;
            if let Some(default) = &param.default_value {
                self.word(" ")?;
                self.word("=")?;
                self.word(" ")?;
                self.fmt_expr(default)?;
            }
        }
        self.end();
        self.word(")")
    }

    fn fmt_function(&mut self, m: &'a FunctionMember) -> io::Result<()> {
        if let Some(ret) = &m.return_type {
            self.word(&ret.name)?;
            if ret.is_array {
                self.word("[]")?;
            }
            self.word(" ")?;
        }
        self.word("Function")?;
        self.word(" ")?;
        self.word(&m.name.name)?;
        self.fmt_params(&m.params)?;
        self.fmt_block(&m.body)?;
        self.hardbreak();
        self.word("EndFunction")
    }

    fn fmt_event(&mut self, m: &'a EventMember) -> io::Result<()> {
        self.word("Event")?;
        self.word(" ")?;
        self.word(&m.name.name)?;
        self.fmt_params(&m.params)?;
        self.fmt_block(&m.body)?;
        self.hardbreak();
        self.word("EndEvent")
    }

    fn fmt_state(&mut self, m: &'a StateMember) -> io::Result<()> {
        if m.is_auto {
            self.word("Auto")?;
            self.word(" ")?;
        }
        self.word("State")?;
        self.word(" ")?;
        self.word(&m.name.name)?;
        self.cbox(1);
        let mut previous: Option<&Member> = None;
        for invokable in &m.invokables {
            self.member_separator(previous, invokable);
            self.fmt_member(invokable)?;
            previous = Some(invokable);
        }
        self.end();
        self.hardbreak();
        self.word("EndState")
    }
}

fn is_property(member: &Member) -> bool {
    matches!(member, Member::Property(_))
}
