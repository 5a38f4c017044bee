//! Scope analysis: scope tree, variables, definitions, and references.
//!
//! `analyze` walks a parsed program and produces a [`ScopeTree`]:
//!
//! - The global scope covers the whole program; every function opens a
//!   Function scope; every block statement opens a Block scope; a `for`
//!   statement with a `let`/`const` init opens a Block scope covering the
//!   `for` node.
//! - `var` declarators and function declaration names hoist to the nearest
//!   enclosing function/global scope ("variable scope"); `let`/`const`
//!   bind in the scope they appear in; parameters bind in their function's
//!   scope; a named function expression binds its name inside its own
//!   scope.
//! - References resolve scope-by-scope as scopes close; references still
//!   unresolved when the global scope closes either create an implicit
//!   global variable (writes) or stay unresolved (reads).
//!
//! The tree is an index-based arena; all cross-links are ids, and the
//! arena is a snapshot: it must be rebuilt whenever the program changes.

use std::collections::HashMap;

use rebind_core::Span;
use tracing::debug;

use crate::ast::{
    DeclKind, Expr, ForInit, Function, Ident, MemberProp, Program, Stmt, VarDecl,
};
use crate::visitor::Node;

// ============================================================================
// Arena ids
// ============================================================================

/// Index of a scope in a [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// Index of a variable in a [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableId(usize);

/// Index of a reference in a [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReferenceId(usize);

// ============================================================================
// Scope data model
// ============================================================================

/// What kind of region a scope covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Global,
    Function,
    Block,
}

/// A lexical scope.
#[derive(Debug, Clone)]
pub struct Scope {
    pub kind: ScopeKind,
    /// The enclosing scope; `None` for the global scope.
    pub parent: Option<ScopeId>,
    /// The nearest enclosing function/global scope (self for those kinds).
    pub variable_scope: ScopeId,
    /// The tree node that delimits this scope's lexical extent.
    pub block: Span,
    /// Variables declared directly in this scope, in declaration order.
    pub variables: Vec<VariableId>,
    /// References occurring in this scope, in source order.
    pub references: Vec<ReferenceId>,
}

/// How a name was bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefKind {
    Var,
    Let,
    Const,
    Param,
    FunctionName,
    /// Created by assignment to an undeclared name.
    ImplicitGlobal,
}

impl DefKind {
    pub fn is_implicit_global(&self) -> bool {
        matches!(self, DefKind::ImplicitGlobal)
    }
}

/// A binding site: the kind tag plus the identifier that names it.
#[derive(Debug, Clone)]
pub struct Definition {
    pub kind: DefKind,
    pub name: Ident,
}

/// A named binding with all of its definitions and binding occurrences.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub scope: ScopeId,
    /// Definitions in declaration order.
    pub defs: Vec<Definition>,
    /// The identifier nodes at each binding site.
    pub identifiers: Vec<Ident>,
}

/// How a reference touches its binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Read,
    Write,
    ReadWrite,
}

impl RefKind {
    pub fn is_write(&self) -> bool {
        matches!(self, RefKind::Write | RefKind::ReadWrite)
    }
}

/// An identifier occurrence that reads or writes a binding.
#[derive(Debug, Clone)]
pub struct Reference {
    pub identifier: Ident,
    /// The scope the occurrence was observed in.
    pub from: ScopeId,
    pub kind: RefKind,
    /// The variable this reference binds to, if the analysis found one.
    pub resolved: Option<VariableId>,
}

// ============================================================================
// Scope tree
// ============================================================================

/// The result of scope analysis over one program.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    variables: Vec<Variable>,
    references: Vec<Reference>,
    /// Block span + kind to scope. The kind disambiguates the rare case
    /// where two nodes share a span, e.g. a lone declaration covering
    /// the whole program.
    blocks: HashMap<(Span, ScopeKind), ScopeId>,
}

impl ScopeTree {
    /// The global scope.
    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.0]
    }

    pub fn reference(&self, id: ReferenceId) -> &Reference {
        &self.references[id.0]
    }

    /// All scopes in creation (pre-) order.
    pub fn scopes(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes.iter().enumerate().map(|(i, s)| (ScopeId(i), s))
    }

    /// The scope of kind `kind` whose block is exactly `span`, if any.
    pub fn scope_at(&self, span: Span, kind: ScopeKind) -> Option<ScopeId> {
        self.blocks.get(&(span, kind)).copied()
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn reference_count(&self) -> usize {
        self.references.len()
    }

    /// Find a variable by name among those declared directly in `scope`.
    pub fn variable_in_scope(&self, scope: ScopeId, name: &str) -> Option<VariableId> {
        self.scopes[scope.0]
            .variables
            .iter()
            .copied()
            .find(|&vid| self.variables[vid.0].name == name)
    }
}

// ============================================================================
// Scope cursor
// ============================================================================

/// Tracks the active scope during a tree walk.
///
/// The cursor is the accumulator a visitor threads through its traversal:
/// call `enter`/`leave` with each node, and `current` yields the scope in
/// effect at that point. No state lives outside the cursor.
pub struct ScopeCursor<'a> {
    tree: &'a ScopeTree,
    stack: Vec<(Span, ScopeKind, ScopeId)>,
}

impl<'a> ScopeCursor<'a> {
    pub fn new(tree: &'a ScopeTree) -> Self {
        ScopeCursor {
            tree,
            stack: Vec::new(),
        }
    }

    /// The scope kind a node would open, if it delimits one.
    fn block_kind(node: &Node<'_>) -> Option<ScopeKind> {
        match node {
            Node::Program(_) => Some(ScopeKind::Global),
            Node::Stmt(Stmt::FunctionDecl(_)) | Node::Expr(Expr::Function(_)) => {
                Some(ScopeKind::Function)
            }
            Node::Stmt(Stmt::Block(_)) | Node::Stmt(Stmt::For(_)) => Some(ScopeKind::Block),
            _ => None,
        }
    }

    /// Enter a node; returns the scope acquired if the node opens one.
    pub fn enter(&mut self, node: Node<'_>) -> Option<ScopeId> {
        let kind = Self::block_kind(&node)?;
        let span = node.span();
        let id = self.tree.scope_at(span, kind)?;
        self.stack.push((span, kind, id));
        Some(id)
    }

    /// Leave a node; releases the scope it acquired, if any.
    pub fn leave(&mut self, node: Node<'_>) {
        let Some(kind) = Self::block_kind(&node) else {
            return;
        };
        if self
            .stack
            .last()
            .is_some_and(|(s, k, _)| *s == node.span() && *k == kind)
        {
            self.stack.pop();
        }
    }

    /// The scope currently in effect.
    pub fn current(&self) -> ScopeId {
        self.stack
            .last()
            .map(|(_, _, id)| *id)
            .unwrap_or_else(|| self.tree.global())
    }
}

// ============================================================================
// Analysis
// ============================================================================

/// Analyze a program and build its scope tree.
pub fn analyze(program: &Program) -> ScopeTree {
    let mut analyzer = Analyzer {
        scopes: Vec::new(),
        variables: Vec::new(),
        references: Vec::new(),
        blocks: HashMap::new(),
        stack: Vec::new(),
        pending: Vec::new(),
    };
    analyzer.enter_scope(ScopeKind::Global, program.span);
    for stmt in &program.body {
        analyzer.visit_stmt(stmt);
    }
    analyzer.close_scope();

    debug!(
        scopes = analyzer.scopes.len(),
        variables = analyzer.variables.len(),
        references = analyzer.references.len(),
        "scope analysis complete"
    );

    ScopeTree {
        scopes: analyzer.scopes,
        variables: analyzer.variables,
        references: analyzer.references,
        blocks: analyzer.blocks,
    }
}

struct Analyzer {
    scopes: Vec<Scope>,
    variables: Vec<Variable>,
    references: Vec<Reference>,
    blocks: HashMap<(Span, ScopeKind), ScopeId>,
    stack: Vec<ScopeId>,
    /// Unresolved references per open scope, innermost last.
    pending: Vec<Vec<ReferenceId>>,
}

impl Analyzer {
    fn current(&self) -> ScopeId {
        *self.stack.last().expect("analyzer scope stack is empty")
    }

    fn enter_scope(&mut self, kind: ScopeKind, block: Span) {
        let id = ScopeId(self.scopes.len());
        let parent = self.stack.last().copied();
        let variable_scope = match kind {
            ScopeKind::Global | ScopeKind::Function => id,
            ScopeKind::Block => self.scopes[parent.expect("block scope without parent").0].variable_scope,
        };
        self.scopes.push(Scope {
            kind,
            parent,
            variable_scope,
            block,
            variables: Vec::new(),
            references: Vec::new(),
        });
        self.blocks.entry((block, kind)).or_insert(id);
        self.stack.push(id);
        self.pending.push(Vec::new());
    }

    /// Close the innermost scope, resolving its pending references.
    ///
    /// References that do not match a variable declared here propagate to
    /// the enclosing scope. When the global scope closes, unresolved
    /// writes become implicit globals; unresolved reads stay unresolved.
    fn close_scope(&mut self) {
        let Some(sid) = self.stack.pop() else {
            return;
        };
        let Some(pending) = self.pending.pop() else {
            return;
        };
        let mut leftover = Vec::new();
        for rid in pending {
            let name = self.references[rid.0].identifier.name.clone();
            match self.find_variable(sid, &name) {
                Some(vid) => self.references[rid.0].resolved = Some(vid),
                None => leftover.push(rid),
            }
        }
        if let Some(outer) = self.pending.last_mut() {
            outer.extend(leftover);
            return;
        }
        for rid in leftover {
            if !self.references[rid.0].kind.is_write() {
                continue;
            }
            let ident = self.references[rid.0].identifier.clone();
            let vid = self.declare(sid, DefKind::ImplicitGlobal, &ident);
            self.references[rid.0].resolved = Some(vid);
        }
    }

    fn find_variable(&self, scope: ScopeId, name: &str) -> Option<VariableId> {
        self.scopes[scope.0]
            .variables
            .iter()
            .copied()
            .find(|&vid| self.variables[vid.0].name == name)
    }

    /// Add a definition for `name` in `scope`, creating the variable on
    /// first sight and extending it afterwards.
    fn declare(&mut self, scope: ScopeId, kind: DefKind, name: &Ident) -> VariableId {
        let vid = match self.find_variable(scope, &name.name) {
            Some(vid) => vid,
            None => {
                let vid = VariableId(self.variables.len());
                self.variables.push(Variable {
                    name: name.name.clone(),
                    scope,
                    defs: Vec::new(),
                    identifiers: Vec::new(),
                });
                self.scopes[scope.0].variables.push(vid);
                vid
            }
        };
        self.variables[vid.0].defs.push(Definition {
            kind,
            name: name.clone(),
        });
        self.variables[vid.0].identifiers.push(name.clone());
        vid
    }

    fn add_reference(&mut self, ident: &Ident, kind: RefKind) {
        let rid = ReferenceId(self.references.len());
        let from = self.current();
        self.references.push(Reference {
            identifier: ident.clone(),
            from,
            kind,
            resolved: None,
        });
        self.scopes[from.0].references.push(rid);
        if let Some(pending) = self.pending.last_mut() {
            pending.push(rid);
        }
    }

    // ------------------------------------------------------------------
    // Statement and expression walks
    // ------------------------------------------------------------------

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl(decl) => self.visit_var_decl(decl),
            Stmt::FunctionDecl(func) => {
                if let Some(name) = &func.name {
                    self.declare(self.current(), DefKind::FunctionName, name);
                }
                self.visit_function(func, false);
            }
            Stmt::Expr(stmt) => self.visit_expr(&stmt.expr),
            Stmt::Block(block) => {
                self.enter_scope(ScopeKind::Block, block.span);
                for stmt in &block.body {
                    self.visit_stmt(stmt);
                }
                self.close_scope();
            }
            Stmt::If(stmt) => {
                self.visit_expr(&stmt.test);
                self.visit_stmt(&stmt.consequent);
                if let Some(alternate) = &stmt.alternate {
                    self.visit_stmt(alternate);
                }
            }
            Stmt::While(stmt) => {
                self.visit_expr(&stmt.test);
                self.visit_stmt(&stmt.body);
            }
            Stmt::For(stmt) => {
                let lexical_init = matches!(
                    &stmt.init,
                    Some(ForInit::VarDecl(decl)) if decl.kind != DeclKind::Var
                );
                if lexical_init {
                    self.enter_scope(ScopeKind::Block, stmt.span);
                }
                match &stmt.init {
                    Some(ForInit::VarDecl(decl)) => self.visit_var_decl(decl),
                    Some(ForInit::Expr(expr)) => self.visit_expr(expr),
                    None => {}
                }
                if let Some(test) = &stmt.test {
                    self.visit_expr(test);
                }
                if let Some(update) = &stmt.update {
                    self.visit_expr(update);
                }
                self.visit_stmt(&stmt.body);
                if lexical_init {
                    self.close_scope();
                }
            }
            Stmt::Return(stmt) => {
                if let Some(argument) = &stmt.argument {
                    self.visit_expr(argument);
                }
            }
            Stmt::Break(_) | Stmt::Continue(_) | Stmt::Empty(_) => {}
        }
    }

    fn visit_var_decl(&mut self, decl: &VarDecl) {
        let (target, kind) = match decl.kind {
            DeclKind::Var => (
                self.scopes[self.current().0].variable_scope,
                DefKind::Var,
            ),
            DeclKind::Let => (self.current(), DefKind::Let),
            DeclKind::Const => (self.current(), DefKind::Const),
        };
        for declarator in &decl.declarators {
            self.declare(target, kind, &declarator.name);
            if let Some(init) = &declarator.init {
                self.add_reference(&declarator.name, RefKind::Write);
                self.visit_expr(init);
            }
        }
    }

    /// Walk a function body in a fresh Function scope.
    ///
    /// `name_in_own_scope` is set for named function expressions, whose
    /// name binds inside the function rather than around it.
    fn visit_function(&mut self, func: &Function, name_in_own_scope: bool) {
        self.enter_scope(ScopeKind::Function, func.span);
        if name_in_own_scope {
            if let Some(name) = &func.name {
                self.declare(self.current(), DefKind::FunctionName, name);
            }
        }
        for param in &func.params {
            self.declare(self.current(), DefKind::Param, param);
        }
        for stmt in &func.body.body {
            self.visit_stmt(stmt);
        }
        self.close_scope();
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(ident) => self.add_reference(ident, RefKind::Read),
            Expr::Number(_) | Expr::Str(_) | Expr::Bool(_) | Expr::Null(_) => {}
            Expr::Assign(assign) => {
                match &assign.target {
                    Expr::Ident(ident) => {
                        let kind = if assign.op.is_compound() {
                            RefKind::ReadWrite
                        } else {
                            RefKind::Write
                        };
                        self.add_reference(ident, kind);
                    }
                    other => self.visit_expr(other),
                }
                self.visit_expr(&assign.value);
            }
            Expr::Conditional(cond) => {
                self.visit_expr(&cond.test);
                self.visit_expr(&cond.consequent);
                self.visit_expr(&cond.alternate);
            }
            Expr::Binary(binary) => {
                self.visit_expr(&binary.left);
                self.visit_expr(&binary.right);
            }
            Expr::Unary(unary) => self.visit_expr(&unary.argument),
            Expr::Call(call) => {
                self.visit_expr(&call.callee);
                for arg in &call.args {
                    self.visit_expr(arg);
                }
            }
            Expr::Member(member) => {
                self.visit_expr(&member.object);
                // A dot property name is not a variable reference.
                if let MemberProp::Computed(index) = &member.property {
                    self.visit_expr(index);
                }
            }
            Expr::Array(array) => {
                for element in &array.elements {
                    self.visit_expr(element);
                }
            }
            Expr::Object(object) => {
                // Keys are names, not references; only values count.
                for property in &object.properties {
                    self.visit_expr(&property.value);
                }
            }
            Expr::Function(func) => self.visit_function(func, true),
        }
    }
}
