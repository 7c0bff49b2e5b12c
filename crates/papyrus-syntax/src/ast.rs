//! The concrete syntax tree produced by the parser.
//!
//! Every node carries its full [`Location`] plus, when comment retention is
//! requested, any [`Comment`]s the parser judged adjacent to it. The tree
//! is a closed set of tagged variants rather than a homogeneous
//! node-with-children structure: the formatter can match exhaustively over
//! `Member`/`Statement`/`Expression` and the compiler catches any variant
//! it forgets to handle.

use crate::location::Location;
use crate::token::TokenKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub kind: CommentKind,
    pub text: String,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentKind {
    Line,
    Block,
    Doc,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachedComments {
    pub leading: Vec<Comment>,
    pub trailing: Option<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeName {
    pub name: String,
    pub is_array: bool,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub name: Identifier,
    pub parent: Option<Identifier>,
    pub doc_comment: Option<String>,
    pub members: Vec<Member>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Member {
    Import(ImportMember),
    Property(PropertyMember),
    Variable(VariableMember),
    Function(FunctionMember),
    Event(EventMember),
    State(StateMember),
}

impl Member {
    #[must_use]
    pub fn location(&self) -> &Location {
        match self {
            Member::Import(m) => &m.location,
            Member::Property(m) => &m.location,
            Member::Variable(m) => &m.location,
            Member::Function(m) => &m.location,
            Member::Event(m) => &m.location,
            Member::State(m) => &m.location,
        }
    }

    #[must_use]
    pub fn attached_comments(&self) -> &AttachedComments {
        match self {
            Member::Import(m) => &m.attached_comments,
            Member::Property(m) => &m.attached_comments,
            Member::Variable(m) => &m.attached_comments,
            Member::Function(m) => &m.attached_comments,
            Member::Event(m) => &m.attached_comments,
            Member::State(m) => &m.attached_comments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportMember {
    pub name: Identifier,
    pub location: Location,
    pub attached_comments: AttachedComments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyMember {
    pub ty: TypeName,
    pub name: Identifier,
    pub default_value: Option<Expression>,
    pub is_auto: bool,
    pub location: Location,
    pub attached_comments: AttachedComments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableMember {
    pub ty: TypeName,
    pub name: Identifier,
    pub initializer: Option<Expression>,
    pub location: Location,
    pub attached_comments: AttachedComments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub ty: TypeName,
    pub name: Identifier,
    pub default_value: Option<Expression>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionMember {
    pub name: Identifier,
    pub return_type: Option<TypeName>,
    pub params: Vec<Param>,
    pub body: Vec<Statement>,
    pub location: Location,
    pub attached_comments: AttachedComments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMember {
    pub name: Identifier,
    pub params: Vec<Param>,
    pub body: Vec<Statement>,
    pub location: Location,
    pub attached_comments: AttachedComments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMember {
    pub name: Identifier,
    pub is_auto: bool,
    pub invokables: Vec<Member>,
    pub location: Location,
    pub attached_comments: AttachedComments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    AssignStmt(AssignStmt),
    ReturnStmt(ReturnStmt),
    IfStmt(IfStmt),
    WhileStmt(WhileStmt),
    ExprStmt(ExprStmt),
    VariableDecl(VariableDeclStmt),
}

impl Statement {
    #[must_use]
    pub fn location(&self) -> &Location {
        match self {
            Statement::AssignStmt(s) => &s.location,
            Statement::ReturnStmt(s) => &s.location,
            Statement::IfStmt(s) => &s.location,
            Statement::WhileStmt(s) => &s.location,
            Statement::ExprStmt(s) => &s.location,
            Statement::VariableDecl(s) => &s.location,
        }
    }

    #[must_use]
    pub fn attached_comments(&self) -> &AttachedComments {
        match self {
            Statement::AssignStmt(s) => &s.attached_comments,
            Statement::ReturnStmt(s) => &s.attached_comments,
            Statement::IfStmt(s) => &s.attached_comments,
            Statement::WhileStmt(s) => &s.attached_comments,
            Statement::ExprStmt(s) => &s.attached_comments,
            Statement::VariableDecl(s) => &s.attached_comments,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOp {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignStmt {
    pub target: Expression,
    pub op: AssignOp,
    pub value: Expression,
    pub location: Location,
    pub attached_comments: AttachedComments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
    pub value: Option<Expression>,
    pub location: Location,
    pub attached_comments: AttachedComments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    pub condition: Expression,
    pub then_branch: Vec<Statement>,
    pub else_ifs: Vec<(Expression, Vec<Statement>)>,
    pub else_branch: Option<Vec<Statement>>,
    pub location: Location,
    pub attached_comments: AttachedComments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStmt {
    pub condition: Expression,
    pub body: Vec<Statement>,
    pub location: Location,
    pub attached_comments: AttachedComments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprStmt {
    pub expr: Expression,
    pub location: Location,
    pub attached_comments: AttachedComments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclStmt {
    pub ty: TypeName,
    pub name: Identifier,
    pub initializer: Option<Expression>,
    pub location: Location,
    pub attached_comments: AttachedComments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Or,
    And,
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOp {
    #[must_use]
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::LogicalOr => BinaryOp::Or,
            TokenKind::LogicalAnd => BinaryOp::And,
            TokenKind::Equal => BinaryOp::Equal,
            TokenKind::NotEqual => BinaryOp::NotEqual,
            TokenKind::Less => BinaryOp::Less,
            TokenKind::LessOrEqual => BinaryOp::LessOrEqual,
            TokenKind::Greater => BinaryOp::Greater,
            TokenKind::GreaterOrEqual => BinaryOp::GreaterOrEqual,
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Subtract,
            TokenKind::Multiply => BinaryOp::Multiply,
            TokenKind::Divide => BinaryOp::Divide,
            TokenKind::Modulo => BinaryOp::Modulo,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Negate,
    Not,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    IntLiteral(LiteralExpr),
    FloatLiteral(LiteralExpr),
    StringLiteral(LiteralExpr),
    BoolLiteral(LiteralExpr),
    Identifier(IdentifierExpr),
    Dot(DotExpr),
    Index(IndexExpr),
    Call(CallExpr),
    New(NewExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Paren(ParenExpr),
}

impl Expression {
    #[must_use]
    pub fn location(&self) -> &Location {
        match self {
            Expression::IntLiteral(e)
            | Expression::FloatLiteral(e)
            | Expression::StringLiteral(e)
            | Expression::BoolLiteral(e) => &e.location,
            Expression::Identifier(e) => &e.location,
            Expression::Dot(e) => &e.location,
            Expression::Index(e) => &e.location,
            Expression::Call(e) => &e.location,
            Expression::New(e) => &e.location,
            Expression::Unary(e) => &e.location,
            Expression::Binary(e) => &e.location,
            Expression::Paren(e) => &e.location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralExpr {
    pub text: String,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifierExpr {
    pub name: String,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotExpr {
    pub target: Box<Expression>,
    pub member: Identifier,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexExpr {
    pub target: Box<Expression>,
    pub index: Box<Expression>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub callee: Box<Expression>,
    pub args: Vec<Expression>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpr {
    pub ty: TypeName,
    pub size: Box<Expression>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expression>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub lhs: Box<Expression>,
    pub rhs: Box<Expression>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParenExpr {
    pub inner: Box<Expression>,
    pub location: Location,
}
