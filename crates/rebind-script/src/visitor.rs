//! Depth-first tree traversal.
//!
//! Walk functions traverse the AST in source order and call visitor
//! methods:
//!
//! - `enter` is called before descending into children (pre-order)
//! - `leave` is called after all children have been visited (post-order)
//!
//! Control flow:
//!
//! - `VisitResult::Continue` - traverse into children
//! - `VisitResult::SkipChildren` - skip children but still call `leave`
//! - `VisitResult::Stop` - halt traversal immediately (no `leave` called)
//!
//! Every identifier node is visited, including ones that are not variable
//! references (member property names, object literal keys), so visitors
//! that classify identifiers must do so themselves.

use rebind_core::Span;

use crate::ast::{Expr, Function, Ident, MemberProp, Program, PropKey, Stmt};

/// Traversal control returned from `enter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitResult {
    Continue,
    SkipChildren,
    Stop,
}

/// A borrowed view of any AST node the walk can visit.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Stmt(&'a Stmt),
    Expr(&'a Expr),
    Ident(&'a Ident),
}

impl<'a> Node<'a> {
    pub fn span(&self) -> Span {
        match self {
            Node::Program(p) => p.span,
            Node::Stmt(s) => s.span(),
            Node::Expr(e) => e.span(),
            Node::Ident(i) => i.span,
        }
    }
}

/// Visitor callbacks for the walk.
///
/// Both methods have default implementations so a visitor only implements
/// what it needs.
pub trait Visitor<'a> {
    fn enter(&mut self, _node: Node<'a>) -> VisitResult {
        VisitResult::Continue
    }

    fn leave(&mut self, _node: Node<'a>) {}
}

/// Walk a whole program.
pub fn walk_program<'a, V: Visitor<'a>>(visitor: &mut V, program: &'a Program) -> VisitResult {
    match visitor.enter(Node::Program(program)) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for stmt in &program.body {
                if walk_stmt(visitor, stmt) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
            }
        }
    }
    visitor.leave(Node::Program(program));
    VisitResult::Continue
}

/// Walk a statement and its children.
pub fn walk_stmt<'a, V: Visitor<'a>>(visitor: &mut V, stmt: &'a Stmt) -> VisitResult {
    match visitor.enter(Node::Stmt(stmt)) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let inner = walk_stmt_children(visitor, stmt);
            if inner == VisitResult::Stop {
                return VisitResult::Stop;
            }
        }
    }
    visitor.leave(Node::Stmt(stmt));
    VisitResult::Continue
}

fn walk_stmt_children<'a, V: Visitor<'a>>(visitor: &mut V, stmt: &'a Stmt) -> VisitResult {
    macro_rules! walk {
        ($call:expr) => {
            if $call == VisitResult::Stop {
                return VisitResult::Stop;
            }
        };
    }
    match stmt {
        Stmt::VarDecl(decl) => {
            for declarator in &decl.declarators {
                walk!(walk_ident(visitor, &declarator.name));
                if let Some(init) = &declarator.init {
                    walk!(walk_expr(visitor, init));
                }
            }
        }
        Stmt::FunctionDecl(func) => {
            walk!(walk_function(visitor, func));
        }
        Stmt::Expr(stmt) => {
            walk!(walk_expr(visitor, &stmt.expr));
        }
        Stmt::Block(block) => {
            for stmt in &block.body {
                walk!(walk_stmt(visitor, stmt));
            }
        }
        Stmt::If(stmt) => {
            walk!(walk_expr(visitor, &stmt.test));
            walk!(walk_stmt(visitor, &stmt.consequent));
            if let Some(alternate) = &stmt.alternate {
                walk!(walk_stmt(visitor, alternate));
            }
        }
        Stmt::While(stmt) => {
            walk!(walk_expr(visitor, &stmt.test));
            walk!(walk_stmt(visitor, &stmt.body));
        }
        Stmt::For(stmt) => {
            match &stmt.init {
                Some(crate::ast::ForInit::VarDecl(decl)) => {
                    for declarator in &decl.declarators {
                        walk!(walk_ident(visitor, &declarator.name));
                        if let Some(init) = &declarator.init {
                            walk!(walk_expr(visitor, init));
                        }
                    }
                }
                Some(crate::ast::ForInit::Expr(expr)) => {
                    walk!(walk_expr(visitor, expr));
                }
                None => {}
            }
            if let Some(test) = &stmt.test {
                walk!(walk_expr(visitor, test));
            }
            if let Some(update) = &stmt.update {
                walk!(walk_expr(visitor, update));
            }
            walk!(walk_stmt(visitor, &stmt.body));
        }
        Stmt::Return(stmt) => {
            if let Some(argument) = &stmt.argument {
                walk!(walk_expr(visitor, argument));
            }
        }
        Stmt::Break(_) | Stmt::Continue(_) | Stmt::Empty(_) => {}
    }
    VisitResult::Continue
}

/// Walk an expression and its children.
pub fn walk_expr<'a, V: Visitor<'a>>(visitor: &mut V, expr: &'a Expr) -> VisitResult {
    match visitor.enter(Node::Expr(expr)) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let inner = walk_expr_children(visitor, expr);
            if inner == VisitResult::Stop {
                return VisitResult::Stop;
            }
        }
    }
    visitor.leave(Node::Expr(expr));
    VisitResult::Continue
}

fn walk_expr_children<'a, V: Visitor<'a>>(visitor: &mut V, expr: &'a Expr) -> VisitResult {
    macro_rules! walk {
        ($call:expr) => {
            if $call == VisitResult::Stop {
                return VisitResult::Stop;
            }
        };
    }
    match expr {
        Expr::Ident(ident) => {
            walk!(walk_ident(visitor, ident));
        }
        Expr::Number(_) | Expr::Str(_) | Expr::Bool(_) | Expr::Null(_) => {}
        Expr::Assign(assign) => {
            walk!(walk_expr(visitor, &assign.target));
            walk!(walk_expr(visitor, &assign.value));
        }
        Expr::Conditional(cond) => {
            walk!(walk_expr(visitor, &cond.test));
            walk!(walk_expr(visitor, &cond.consequent));
            walk!(walk_expr(visitor, &cond.alternate));
        }
        Expr::Binary(binary) => {
            walk!(walk_expr(visitor, &binary.left));
            walk!(walk_expr(visitor, &binary.right));
        }
        Expr::Unary(unary) => {
            walk!(walk_expr(visitor, &unary.argument));
        }
        Expr::Call(call) => {
            walk!(walk_expr(visitor, &call.callee));
            for arg in &call.args {
                walk!(walk_expr(visitor, arg));
            }
        }
        Expr::Member(member) => {
            walk!(walk_expr(visitor, &member.object));
            match &member.property {
                MemberProp::Dot(ident) => walk!(walk_ident(visitor, ident)),
                MemberProp::Computed(index) => walk!(walk_expr(visitor, index)),
            }
        }
        Expr::Array(array) => {
            for element in &array.elements {
                walk!(walk_expr(visitor, element));
            }
        }
        Expr::Object(object) => {
            for property in &object.properties {
                if let PropKey::Ident(key) = &property.key {
                    walk!(walk_ident(visitor, key));
                }
                walk!(walk_expr(visitor, &property.value));
            }
        }
        Expr::Function(func) => {
            walk!(walk_function(visitor, func));
        }
    }
    VisitResult::Continue
}

fn walk_function<'a, V: Visitor<'a>>(visitor: &mut V, func: &'a Function) -> VisitResult {
    macro_rules! walk {
        ($call:expr) => {
            if $call == VisitResult::Stop {
                return VisitResult::Stop;
            }
        };
    }
    if let Some(name) = &func.name {
        walk!(walk_ident(visitor, name));
    }
    for param in &func.params {
        walk!(walk_ident(visitor, param));
    }
    for stmt in &func.body.body {
        walk!(walk_stmt(visitor, stmt));
    }
    VisitResult::Continue
}

/// Visit a single identifier node (no children).
pub fn walk_ident<'a, V: Visitor<'a>>(visitor: &mut V, ident: &'a Ident) -> VisitResult {
    if visitor.enter(Node::Ident(ident)) == VisitResult::Stop {
        return VisitResult::Stop;
    }
    visitor.leave(Node::Ident(ident));
    VisitResult::Continue
}
