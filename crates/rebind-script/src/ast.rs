//! Range-annotated syntax tree.
//!
//! Every node carries the `[start, end)` byte span of its source text.
//! Spans are unique per distinct node: no two nodes produced by the parser
//! share a range, which lets span equality stand in for node identity.

use rebind_core::Span;
use serde::{Deserialize, Serialize};

// ============================================================================
// Identifiers and literals
// ============================================================================

/// An identifier occurrence: a name plus the span of that occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Ident {
            name: name.into(),
            span,
        }
    }
}

/// A number literal.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLit {
    pub value: f64,
    pub span: Span,
}

/// A string literal with its decoded value.
#[derive(Debug, Clone, PartialEq)]
pub struct StrLit {
    pub value: String,
    pub span: Span,
}

/// A boolean literal.
#[derive(Debug, Clone, PartialEq)]
pub struct BoolLit {
    pub value: bool,
    pub span: Span,
}

// ============================================================================
// Program and statements
// ============================================================================

/// The root of a parsed program.
///
/// The span covers the whole source text, enclosing every statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDecl),
    FunctionDecl(Function),
    Expr(ExprStmt),
    Block(Block),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return(ReturnStmt),
    Break(Span),
    Continue(Span),
    Empty(Span),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::VarDecl(d) => d.span,
            Stmt::FunctionDecl(f) => f.span,
            Stmt::Expr(e) => e.span,
            Stmt::Block(b) => b.span,
            Stmt::If(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Break(span) | Stmt::Continue(span) | Stmt::Empty(span) => *span,
        }
    }
}

/// Which keyword introduced a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Var,
    Let,
    Const,
}

impl DeclKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKind::Var => "var",
            DeclKind::Let => "let",
            DeclKind::Const => "const",
        }
    }
}

/// `var`/`let`/`const` with one or more declarators.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub kind: DeclKind,
    pub declarators: Vec<Declarator>,
    pub span: Span,
}

/// A single `name` or `name = init` inside a variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: Ident,
    pub init: Option<Expr>,
    pub span: Span,
}

/// A function, either a declaration or an expression.
///
/// Declarations always carry a name; expressions may omit it.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Option<Ident>,
    pub params: Vec<Ident>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub test: Expr,
    pub consequent: Box<Stmt>,
    pub alternate: Option<Box<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub test: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Option<ForInit>,
    pub test: Option<Expr>,
    pub update: Option<Expr>,
    pub body: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    VarDecl(VarDecl),
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub argument: Option<Expr>,
    pub span: Span,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    Number(NumberLit),
    Str(StrLit),
    Bool(BoolLit),
    Null(Span),
    Assign(Box<AssignExpr>),
    Conditional(Box<CondExpr>),
    Binary(Box<BinaryExpr>),
    Unary(Box<UnaryExpr>),
    Call(Box<CallExpr>),
    Member(Box<MemberExpr>),
    Array(ArrayLit),
    Object(ObjectLit),
    Function(Box<Function>),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Ident(i) => i.span,
            Expr::Number(n) => n.span,
            Expr::Str(s) => s.span,
            Expr::Bool(b) => b.span,
            Expr::Null(span) => *span,
            Expr::Assign(a) => a.span,
            Expr::Conditional(c) => c.span,
            Expr::Binary(b) => b.span,
            Expr::Unary(u) => u.span,
            Expr::Call(c) => c.span,
            Expr::Member(m) => m.span,
            Expr::Array(a) => a.span,
            Expr::Object(o) => o.span,
            Expr::Function(f) => f.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

impl AssignOp {
    /// Compound operators both read and write their target.
    pub fn is_compound(&self) -> bool {
        !matches!(self, AssignOp::Assign)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    pub op: AssignOp,
    pub target: Expr,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CondExpr {
    pub test: Expr,
    pub consequent: Expr,
    pub alternate: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Lt,
    Gt,
    Le,
    Ge,
    EqEq,
    NotEq,
    StrictEq,
    StrictNotEq,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Expr,
    pub right: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
    Typeof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub argument: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Expr,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// Property access: `obj.name` or `obj[expr]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Expr,
    pub property: MemberProp,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberProp {
    /// `obj.name` — the name is not a variable reference.
    Dot(Ident),
    /// `obj[expr]` — the index is an ordinary expression.
    Computed(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLit {
    pub elements: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLit {
    pub properties: Vec<Property>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: PropKey,
    pub value: Expr,
    pub span: Span,
}

/// Object literal keys are names, not variable references.
#[derive(Debug, Clone, PartialEq)]
pub enum PropKey {
    Ident(Ident),
    Str(StrLit),
    Number(NumberLit),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stmt_and_expr_spans() {
        let ident = Ident::new("x", Span::new(4, 5));
        let stmt = Stmt::Expr(ExprStmt {
            expr: Expr::Ident(ident.clone()),
            span: Span::new(4, 6),
        });
        assert_eq!(stmt.span(), Span::new(4, 6));
        assert_eq!(Expr::Ident(ident).span(), Span::new(4, 5));
        assert_eq!(Stmt::Break(Span::new(0, 5)).span(), Span::new(0, 5));
    }

    #[test]
    fn ident_serialization() {
        let ident = Ident::new("total", Span::new(10, 15));
        let json = serde_json::to_string(&ident).unwrap();
        assert!(json.contains("\"name\":\"total\""));
        let back: Ident = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ident);
    }

    #[test]
    fn compound_assignment_ops() {
        assert!(!AssignOp::Assign.is_compound());
        assert!(AssignOp::AddAssign.is_compound());
        assert!(AssignOp::DivAssign.is_compound());
    }
}
