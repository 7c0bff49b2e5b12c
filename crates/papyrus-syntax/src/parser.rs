//! Recursive-descent parser building the [`crate::ast`] tree directly.
//!
//! Unlike a tree-builder architecture that assembles a generic green tree
//! and casts typed views over it, this parser constructs owned AST nodes
//! as it goes: the grammar here is closed and known in full, so there is
//! no benefit to an intermediate untyped representation.

use crate::ast::*;
use crate::diagnostics::{Diagnostic, DiagnosticLog};
use crate::lexer::Lexer;
use crate::location::Location;
use crate::source::SourceFile;
use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub with_comments: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { with_comments: true }
    }
}

/// Parses `file` into a [`Script`], recording any errors into `log`.
/// Returns `(script, ok)` where `ok` is `false` iff at least one
/// diagnostic was recorded.
///
/// Bytes outside valid UTF-8 never reach the lexer: `file`'s bytes are
/// validated up front, and an encoding failure is recorded as a single
/// diagnostic located at the offending byte, with an empty script returned
/// in its place.
#[must_use]
pub fn parse(file: &SourceFile, log: &mut DiagnosticLog, options: ParseOptions) -> (Script, bool) {
    let before = log.len();
    let lexer = match Lexer::from_bytes(file.bytes()) {
        Ok(lexer) => lexer,
        Err(err) => {
            let location = err.location;
            log.push(Diagnostic::error(location, err.message));
            return (empty_script(location), false);
        }
    };
    let mut parser = Parser::new(file, lexer, options);
    let script = parser.parse_script();
    for diagnostic in parser.take_diagnostics() {
        log.push(diagnostic);
    }
    (script, log.len() == before)
}

fn empty_script(location: Location) -> Script {
    Script {
        location,
        name: Identifier { name: String::new(), location },
        parent: None,
        doc_comment: None,
        members: Vec::new(),
    }
}

struct Parser<'a> {
    file: &'a SourceFile,
    lexer: Lexer<'a>,
    current: Token,
    lookahead: Option<Token>,
    options: ParseOptions,
    diagnostics: Vec<Diagnostic>,
    pending_leading: Vec<Comment>,
    last_error_offset: Option<u32>,
    repeated_error_count: u32,
}

const RECOVERY_REPEAT_LIMIT: u32 = 10;

const END_KEYWORDS: &[TokenKind] = &[
    TokenKind::EndFunction,
    TokenKind::EndEvent,
    TokenKind::EndProperty,
    TokenKind::EndIf,
    TokenKind::EndWhile,
    TokenKind::EndState,
];

impl<'a> Parser<'a> {
    fn new(file: &'a SourceFile, lexer: Lexer<'a>, options: ParseOptions) -> Self {
        let mut parser = Self {
            file,
            lexer,
            current: Token::new(TokenKind::Eof, Location::new(0, 0, 1, 1, 1, 1)),
            lookahead: None,
            options,
            diagnostics: Vec::new(),
            pending_leading: Vec::new(),
            last_error_offset: None,
            repeated_error_count: 0,
        };
        parser.current = parser.raw_advance();
        parser
    }

    fn take_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn add_error(&mut self, location: Location, message: impl Into<String>) {
        let offset = location.byte_offset;
        if self.last_error_offset == Some(offset) {
            self.repeated_error_count += 1;
        } else {
            self.last_error_offset = Some(offset);
            self.repeated_error_count = 0;
        }
        self.diagnostics.push(Diagnostic::error(location, message));
        if self.repeated_error_count >= RECOVERY_REPEAT_LIMIT && self.current.kind != TokenKind::Eof {
            self.bump();
        }
    }

    fn raw_advance(&mut self) -> Token {
        loop {
            let token = match self.lexer.next_token() {
                Ok(token) => token,
                Err(err) => {
                    self.diagnostics.push(Diagnostic::error(err.location, err.message));
                    continue;
                }
            };

            match token.kind {
                TokenKind::Semicolon => {
                    let body = self.lex_raw_ok();
                    let terminal = self.lex_raw_ok();
                    if self.options.with_comments {
                        let text = self.file.slice_str(&body.location).to_string();
                        self.pending_leading.push(Comment {
                            kind: CommentKind::Line,
                            text,
                            location: Location::span(token.location, terminal.location),
                        });
                    }
                    return terminal;
                }
                TokenKind::BraceOpen => {
                    let body = self.lex_raw_ok();
                    let close = self.lex_raw_ok();
                    if self.options.with_comments {
                        let text = self.file.slice_str(&body.location).to_string();
                        self.pending_leading.push(Comment {
                            kind: CommentKind::Doc,
                            text,
                            location: Location::span(token.location, close.location),
                        });
                    }
                }
                TokenKind::BlockCommentOpen => {
                    let body = self.lex_raw_ok();
                    let close = self.lex_raw_ok();
                    if self.options.with_comments {
                        let text = self.file.slice_str(&body.location).to_string();
                        self.pending_leading.push(Comment {
                            kind: CommentKind::Block,
                            text,
                            location: Location::span(token.location, close.location),
                        });
                    }
                }
                _ => return token,
            }
        }
    }

    fn lex_raw_ok(&mut self) -> Token {
        loop {
            match self.lexer.next_token() {
                Ok(token) => return token,
                Err(err) => {
                    self.diagnostics.push(Diagnostic::error(err.location, err.message));
                }
            }
        }
    }

    fn bump(&mut self) -> Token {
        let old = self.current;
        self.current = self.lookahead.take().unwrap_or_else(|| self.raw_advance());
        old
    }

    fn peek(&mut self) -> Token {
        if self.lookahead.is_none() {
            self.lookahead = Some(self.raw_advance());
        }
        self.lookahead.unwrap()
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            let text = self.file.slice_str(&self.current.location);
            self.add_error(
                self.current.location,
                format!("expected {kind:?}, found {:?} ({text:?})", self.current.kind),
            );
            None
        }
    }

    /// Consumes `kind` if present, without recording a diagnostic when it
    /// isn't: for grammar positions where the token's absence is a valid
    /// parse (an omitted `Extends`, a defaulted parameter, the last
    /// parameter in a list), not a malformed one.
    fn eat_optional(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn take_leading_comments(&mut self) -> Vec<Comment> {
        std::mem::take(&mut self.pending_leading)
    }

    fn take_trailing_same_line(&mut self, end_line: u32) -> Option<Comment> {
        if let Some(pos) = self
            .pending_leading
            .iter()
            .position(|c| c.location.start_line == end_line)
        {
            Some(self.pending_leading.remove(pos))
        } else {
            None
        }
    }

    fn skip_newlines(&mut self) {
        while self.at(TokenKind::Newline) {
            self.bump();
        }
    }

    fn synchronize(&mut self) {
        loop {
            match self.current.kind {
                TokenKind::Eof => return,
                TokenKind::Newline => {
                    self.bump();
                    return;
                }
                k if END_KEYWORDS.contains(&k) => return,
                _ => {
                    self.bump();
                }
            }
        }
    }

    // ---- grammar ----

    fn parse_script(&mut self) -> Script {
        let start_location = self.current.location;
        self.eat(TokenKind::ScriptName);
        let name = self.parse_identifier();
        let parent = if self.eat_optional(TokenKind::Extends) {
            Some(self.parse_identifier())
        } else {
            None
        };
        self.skip_newlines();

        let doc_comment = self.take_leading_comments().into_iter().find_map(|c| {
            if c.kind == CommentKind::Doc {
                Some(c.text)
            } else {
                None
            }
        });

        let mut members = Vec::new();
        while !self.at(TokenKind::Eof) {
            self.skip_newlines();
            if self.at(TokenKind::Eof) {
                break;
            }
            if let Some(member) = self.parse_member() {
                members.push(member);
            }
        }

        let end_location = self.current.location;
        Script {
            location: Location::span(start_location, end_location),
            name,
            parent,
            doc_comment,
            members,
        }
    }

    fn parse_identifier(&mut self) -> Identifier {
        let location = self.current.location;
        let name = self.file.slice_str(&location).to_string();
        if self.at(TokenKind::Identifier) {
            self.bump();
        } else {
            self.add_error(location, "expected identifier".to_string());
        }
        Identifier { name, location }
    }

    fn current_starts_type(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Int
                | TokenKind::Float
                | TokenKind::Bool
                | TokenKind::StringType
                | TokenKind::Identifier
        )
    }

    fn parse_type(&mut self) -> TypeName {
        let start = self.current.location;
        let name = self.file.slice_str(&start).to_string();
        self.bump();
        let is_array = self.at(TokenKind::ArrayType);
        let end = if is_array {
            let t = self.bump();
            t.location
        } else {
            start
        };
        TypeName {
            name,
            is_array,
            location: Location::span(start, end),
        }
    }

    fn parse_member(&mut self) -> Option<Member> {
        let leading = self.take_leading_comments();
        match self.current.kind {
            TokenKind::Import => Some(self.parse_import(leading)),
            TokenKind::Auto if self.peek().kind == TokenKind::State => Some(self.parse_state(leading)),
            TokenKind::State => Some(self.parse_state(leading)),
            TokenKind::Event => Some(self.parse_event(leading, None)),
            TokenKind::Function => Some(self.parse_function(leading, None)),
            _ if self.current_starts_type() => Some(self.parse_typed_member(leading)),
            TokenKind::Eof => None,
            _ => {
                self.add_error(self.current.location, "unexpected token at script scope".to_string());
                self.synchronize();
                None
            }
        }
    }

    fn parse_import(&mut self, leading: Vec<Comment>) -> Member {
        let start = self.current.location;
        self.bump();
        let name = self.parse_identifier();
        let end_line = name.location.end_line;
        self.eat(TokenKind::Newline);
        let trailing = self.take_trailing_same_line(end_line);
        Member::Import(ImportMember {
            location: Location::span(start, name.location),
            name,
            attached_comments: AttachedComments { leading, trailing },
        })
    }

    /// Dispatches a leading type token to a property, variable, function,
    /// or event declaration once enough of the line has been read to tell
    /// them apart.
    fn parse_typed_member(&mut self, leading: Vec<Comment>) -> Member {
        let ty = self.parse_type();
        if self.eat_peek_function() {
            return self.parse_function(leading, Some(ty));
        }
        if self.at(TokenKind::Property) {
            return self.parse_property(leading, ty);
        }
        self.parse_variable(leading, ty)
    }

    fn eat_peek_function(&mut self) -> bool {
        self.at(TokenKind::Function)
    }

    fn parse_property(&mut self, leading: Vec<Comment>, ty: TypeName) -> Member {
        let start = ty.location;
        self.bump(); // Property
        let name = self.parse_identifier();
        let default_value = if self.eat_optional(TokenKind::Assign) {
            Some(self.parse_expression())
        } else {
            None
        };
        let is_auto = self.eat_optional(TokenKind::Auto);
        let end_line = self.current.location.start_line;
        self.eat(TokenKind::Newline);
        let trailing = self.take_trailing_same_line(end_line);

        let mut members_end = name.location;
        if is_auto {
            members_end = self.current.location;
        } else {
            // Full property: skip to EndProperty, recording nothing further
            // beyond its own getter/setter bodies, which this formatter
            // treats opaquely as a nested statement-free block.
            while !self.at(TokenKind::EndProperty) && !self.at(TokenKind::Eof) {
                self.bump();
            }
            if self.at(TokenKind::EndProperty) {
                members_end = self.current.location;
                self.bump();
                self.eat(TokenKind::Newline);
            }
        }

        Member::Property(PropertyMember {
            location: Location::span(start, members_end),
            ty,
            name,
            default_value,
            is_auto,
            attached_comments: AttachedComments { leading, trailing },
        })
    }

    fn parse_variable(&mut self, leading: Vec<Comment>, ty: TypeName) -> Member {
        let start = ty.location;
        let name = self.parse_identifier();
        let initializer = if self.eat_optional(TokenKind::Assign) {
            Some(self.parse_expression())
        } else {
            None
        };
        let end_line = self.current.location.start_line;
        self.eat(TokenKind::Newline);
        let trailing = self.take_trailing_same_line(end_line);
        Member::Variable(VariableMember {
            location: Location::span(start, name.location),
            ty,
            name,
            initializer,
            attached_comments: AttachedComments { leading, trailing },
        })
    }

    fn parse_params(&mut self) -> Vec<Param> {
        let mut params = Vec::new();
        self.eat(TokenKind::ParenthesisOpen);
        if !self.at(TokenKind::ParenthesisClose) {
            loop {
                let ty = self.parse_type();
                let name = self.parse_identifier();
                let default_value = if self.eat_optional(TokenKind::Assign) {
                    Some(self.parse_expression())
                } else {
                    None
                };
                let location = Location::span(ty.location, name.location);
                params.push(Param { ty, name, default_value, location });
                if !self.eat_optional(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.eat(TokenKind::ParenthesisClose);
        params
    }

    fn parse_function(&mut self, leading: Vec<Comment>, return_type: Option<TypeName>) -> Member {
        let start = return_type.as_ref().map_or(self.current.location, |t| t.location);
        self.eat(TokenKind::Function);
        let name = self.parse_identifier();
        let params = self.parse_params();
        self.eat(TokenKind::Newline);
        let body = self.parse_statements_until(&[TokenKind::EndFunction]);
        let end = self.current.location;
        self.eat(TokenKind::EndFunction);
        let trailing = self.take_trailing_same_line(end.start_line);
        self.eat(TokenKind::Newline);
        Member::Function(FunctionMember {
            location: Location::span(start, end),
            name,
            return_type,
            params,
            body,
            attached_comments: AttachedComments { leading, trailing },
        })
    }

    fn parse_event(&mut self, leading: Vec<Comment>, _return_type: Option<TypeName>) -> Member {
        let start = self.current.location;
        self.bump(); // Event
        let name = self.parse_identifier();
        let params = self.parse_params();
        self.eat(TokenKind::Newline);
        let body = self.parse_statements_until(&[TokenKind::EndEvent]);
        let end = self.current.location;
        self.eat(TokenKind::EndEvent);
        let trailing = self.take_trailing_same_line(end.start_line);
        self.eat(TokenKind::Newline);
        Member::Event(EventMember {
            location: Location::span(start, end),
            name,
            params,
            body,
            attached_comments: AttachedComments { leading, trailing },
        })
    }

    fn parse_state(&mut self, leading: Vec<Comment>) -> Member {
        let start = self.current.location;
        let is_auto = self.eat_optional(TokenKind::Auto);
        self.eat(TokenKind::State);
        let name = self.parse_identifier();
        self.eat(TokenKind::Newline);

        let mut invokables = Vec::new();
        loop {
            self.skip_newlines();
            if self.at(TokenKind::EndState) || self.at(TokenKind::Eof) {
                break;
            }
            if let Some(member) = self.parse_member() {
                invokables.push(member);
            }
        }

        let end = self.current.location;
        self.eat(TokenKind::EndState);
        let trailing = self.take_trailing_same_line(end.start_line);
        self.eat(TokenKind::Newline);
        Member::State(StateMember {
            location: Location::span(start, end),
            name,
            is_auto,
            invokables,
            attached_comments: AttachedComments { leading, trailing },
        })
    }

    fn parse_statements_until(&mut self, terminators: &[TokenKind]) -> Vec<Statement> {
        let mut statements = Vec::new();
        loop {
            self.skip_newlines();
            if self.at(TokenKind::Eof) || terminators.contains(&self.current.kind) {
                break;
            }
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
        }
        statements
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        let leading = self.take_leading_comments();
        match self.current.kind {
            TokenKind::Return => Some(self.parse_return(leading)),
            TokenKind::If => Some(self.parse_if(leading)),
            TokenKind::While => Some(self.parse_while(leading)),
            _ if self.current_starts_type() && self.peek().kind == TokenKind::Identifier => {
                Some(self.parse_variable_decl(leading))
            }
            TokenKind::Eof => None,
            k if END_KEYWORDS.contains(&k) => None,
            _ => Some(self.parse_assign_or_expr(leading)),
        }
    }

    fn parse_variable_decl(&mut self, leading: Vec<Comment>) -> Statement {
        let ty = self.parse_type();
        let name = self.parse_identifier();
        let initializer = if self.eat_optional(TokenKind::Assign) {
            Some(self.parse_expression())
        } else {
            None
        };
        let end_line = self.current.location.start_line;
        self.eat(TokenKind::Newline);
        let trailing = self.take_trailing_same_line(end_line);
        Statement::VariableDecl(VariableDeclStmt {
            location: Location::span(ty.location, name.location),
            ty,
            name,
            initializer,
            attached_comments: AttachedComments { leading, trailing },
        })
    }

    fn parse_return(&mut self, leading: Vec<Comment>) -> Statement {
        let start = self.current.location;
        self.bump();
        let value = if self.at(TokenKind::Newline) || self.at(TokenKind::Eof) {
            None
        } else {
            Some(self.parse_expression())
        };
        let end_line = self.current.location.start_line;
        self.eat(TokenKind::Newline);
        let trailing = self.take_trailing_same_line(end_line);
        let end = value.as_ref().map_or(start, |e| *e.location());
        Statement::ReturnStmt(ReturnStmt {
            location: Location::span(start, end),
            value,
            attached_comments: AttachedComments { leading, trailing },
        })
    }

    fn parse_if(&mut self, leading: Vec<Comment>) -> Statement {
        let start = self.current.location;
        self.bump(); // If
        let condition = self.parse_expression();
        self.eat(TokenKind::Newline);
        let then_branch = self.parse_statements_until(&[TokenKind::ElseIf, TokenKind::Else, TokenKind::EndIf]);

        let mut else_ifs = Vec::new();
        while self.at(TokenKind::ElseIf) {
            self.bump();
            let cond = self.parse_expression();
            self.eat(TokenKind::Newline);
            let body = self.parse_statements_until(&[TokenKind::ElseIf, TokenKind::Else, TokenKind::EndIf]);
            else_ifs.push((cond, body));
        }

        let else_branch = if self.eat_optional(TokenKind::Else) {
            self.eat(TokenKind::Newline);
            Some(self.parse_statements_until(&[TokenKind::EndIf]))
        } else {
            None
        };

        let end = self.current.location;
        self.eat(TokenKind::EndIf);
        let trailing = self.take_trailing_same_line(end.start_line);
        self.eat(TokenKind::Newline);
        Statement::IfStmt(IfStmt {
            location: Location::span(start, end),
            condition,
            then_branch,
            else_ifs,
            else_branch,
            attached_comments: AttachedComments { leading, trailing },
        })
    }

    fn parse_while(&mut self, leading: Vec<Comment>) -> Statement {
        let start = self.current.location;
        self.bump(); // While
        let condition = self.parse_expression();
        self.eat(TokenKind::Newline);
        let body = self.parse_statements_until(&[TokenKind::EndWhile]);
        let end = self.current.location;
        self.eat(TokenKind::EndWhile);
        let trailing = self.take_trailing_same_line(end.start_line);
        self.eat(TokenKind::Newline);
        Statement::WhileStmt(WhileStmt {
            location: Location::span(start, end),
            condition,
            body,
            attached_comments: AttachedComments { leading, trailing },
        })
    }

    fn parse_assign_or_expr(&mut self, leading: Vec<Comment>) -> Statement {
        let start_line = self.current.location.start_line;
        let expr = self.parse_expression();
        let op = match self.current.kind {
            TokenKind::Assign => Some(AssignOp::Assign),
            TokenKind::AssignAdd => Some(AssignOp::Add),
            TokenKind::AssignSubtract => Some(AssignOp::Subtract),
            TokenKind::AssignMultiply => Some(AssignOp::Multiply),
            TokenKind::AssignDivide => Some(AssignOp::Divide),
            TokenKind::AssignModulo => Some(AssignOp::Modulo),
            _ => None,
        };

        let stmt = if let Some(op) = op {
            self.bump();
            let value = self.parse_expression();
            let location = Location::span(*expr.location(), *value.location());
            Statement::AssignStmt(AssignStmt {
                location,
                target: expr,
                op,
                value,
                attached_comments: AttachedComments::default(),
            })
        } else {
            let location = *expr.location();
            Statement::ExprStmt(ExprStmt {
                location,
                expr,
                attached_comments: AttachedComments::default(),
            })
        };

        self.eat(TokenKind::Newline);
        let trailing = self.take_trailing_same_line(start_line);
        match stmt {
            Statement::AssignStmt(mut s) => {
                s.attached_comments = AttachedComments { leading, trailing };
                Statement::AssignStmt(s)
            }
            Statement::ExprStmt(mut s) => {
                s.attached_comments = AttachedComments { leading, trailing };
                Statement::ExprStmt(s)
            }
            other => other,
        }
    }

    // ---- expressions ----
    // Precedence, low to high: || , && , == != , < <= > >= , + - , * / % ,
    // unary - ! , postfix . [] () , primary.

    fn parse_expression(&mut self) -> Expression {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Expression {
        let mut lhs = self.parse_and();
        while self.at(TokenKind::LogicalOr) {
            self.bump();
            let rhs = self.parse_and();
            lhs = self.make_binary(BinaryOp::Or, lhs, rhs);
        }
        lhs
    }

    fn parse_and(&mut self) -> Expression {
        let mut lhs = self.parse_equality();
        while self.at(TokenKind::LogicalAnd) {
            self.bump();
            let rhs = self.parse_equality();
            lhs = self.make_binary(BinaryOp::And, lhs, rhs);
        }
        lhs
    }

    fn parse_equality(&mut self) -> Expression {
        let mut lhs = self.parse_relational();
        loop {
            let op = match self.current.kind {
                TokenKind::Equal => BinaryOp::Equal,
                TokenKind::NotEqual => BinaryOp::NotEqual,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_relational();
            lhs = self.make_binary(op, lhs, rhs);
        }
        lhs
    }

    fn parse_relational(&mut self) -> Expression {
        let mut lhs = self.parse_additive();
        loop {
            let op = match self.current.kind {
                TokenKind::Less => BinaryOp::Less,
                TokenKind::LessOrEqual => BinaryOp::LessOrEqual,
                TokenKind::Greater => BinaryOp::Greater,
                TokenKind::GreaterOrEqual => BinaryOp::GreaterOrEqual,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_additive();
            lhs = self.make_binary(op, lhs, rhs);
        }
        lhs
    }

    fn parse_additive(&mut self) -> Expression {
        let mut lhs = self.parse_multiplicative();
        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Subtract,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_multiplicative();
            lhs = self.make_binary(op, lhs, rhs);
        }
        lhs
    }

    fn parse_multiplicative(&mut self) -> Expression {
        let mut lhs = self.parse_unary();
        loop {
            let op = match self.current.kind {
                TokenKind::Multiply => BinaryOp::Multiply,
                TokenKind::Divide => BinaryOp::Divide,
                TokenKind::Modulo => BinaryOp::Modulo,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_unary();
            lhs = self.make_binary(op, lhs, rhs);
        }
        lhs
    }

    fn make_binary(&self, op: BinaryOp, lhs: Expression, rhs: Expression) -> Expression {
        let location = Location::span(*lhs.location(), *rhs.location());
        Expression::Binary(BinaryExpr {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            location,
        })
    }

    fn parse_unary(&mut self) -> Expression {
        let op = match self.current.kind {
            TokenKind::Minus => Some(UnaryOp::Negate),
            TokenKind::LogicalNot => Some(UnaryOp::Not),
            _ => None,
        };
        if let Some(op) = op {
            let start = self.current.location;
            self.bump();
            let operand = self.parse_unary();
            let location = Location::span(start, *operand.location());
            return Expression::Unary(UnaryExpr {
                op,
                operand: Box::new(operand),
                location,
            });
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Expression {
        let mut expr = self.parse_primary();
        loop {
            match self.current.kind {
                TokenKind::Dot => {
                    self.bump();
                    let member = self.parse_identifier();
                    let location = Location::span(*expr.location(), member.location);
                    expr = Expression::Dot(DotExpr {
                        target: Box::new(expr),
                        member,
                        location,
                    });
                }
                TokenKind::BracketOpen => {
                    self.bump();
                    let index = self.parse_expression();
                    let close = self.current.location;
                    self.eat(TokenKind::BracketClose);
                    let location = Location::span(*expr.location(), close);
                    expr = Expression::Index(IndexExpr {
                        target: Box::new(expr),
                        index: Box::new(index),
                        location,
                    });
                }
                TokenKind::ParenthesisOpen => {
                    self.bump();
                    let mut args = Vec::new();
                    if !self.at(TokenKind::ParenthesisClose) {
                        loop {
                            args.push(self.parse_expression());
                            if !self.eat_optional(TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    let close = self.current.location;
                    self.eat(TokenKind::ParenthesisClose);
                    let location = Location::span(*expr.location(), close);
                    expr = Expression::Call(CallExpr {
                        callee: Box::new(expr),
                        args,
                        location,
                    });
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_primary(&mut self) -> Expression {
        let token = self.current;
        match token.kind {
            TokenKind::IntLiteral => {
                self.bump();
                Expression::IntLiteral(self.literal(token))
            }
            TokenKind::FloatLiteral => {
                self.bump();
                Expression::FloatLiteral(self.literal(token))
            }
            TokenKind::StringLiteral => {
                self.bump();
                Expression::StringLiteral(self.literal(token))
            }
            TokenKind::BoolLiteral => {
                self.bump();
                Expression::BoolLiteral(self.literal(token))
            }
            TokenKind::Identifier => {
                self.bump();
                Expression::Identifier(IdentifierExpr {
                    name: self.file.slice_str(&token.location).to_string(),
                    location: token.location,
                })
            }
            TokenKind::New => {
                self.bump();
                let ty = self.parse_type();
                self.eat(TokenKind::BracketOpen);
                let size = self.parse_expression();
                let close = self.current.location;
                self.eat(TokenKind::BracketClose);
                Expression::New(NewExpr {
                    location: Location::span(token.location, close),
                    ty,
                    size: Box::new(size),
                })
            }
            TokenKind::ParenthesisOpen => {
                self.bump();
                let inner = self.parse_expression();
                let close = self.current.location;
                self.eat(TokenKind::ParenthesisClose);
                Expression::Paren(ParenExpr {
                    location: Location::span(token.location, close),
                    inner: Box::new(inner),
                })
            }
            _ => {
                self.add_error(token.location, "expected expression".to_string());
                self.bump();
                Expression::Identifier(IdentifierExpr {
                    name: String::new(),
                    location: token.location,
                })
            }
        }
    }

    fn literal(&self, token: Token) -> LiteralExpr {
        LiteralExpr {
            text: self.file.slice_str(&token.location).to_string(),
            location: token.location,
        }
    }
}
