//! Range index: start offset to identifier lookup.
//!
//! Built once per loaded program by a single scope-aware walk. Each
//! identifier node — and each function declaration, keyed at its name's
//! start — gets an entry recording the identifier, the scope active at
//! that point, and whether the offset names a function declaration.
//!
//! The index is a snapshot: it holds copies of the identifier nodes and
//! must be rebuilt whenever the tree or text changes.

use std::collections::HashMap;

use rebind_script::ast::{Ident, Program, Stmt};
use rebind_script::scope::{ScopeCursor, ScopeId, ScopeTree};
use rebind_script::visitor::{walk_program, Node, VisitResult, Visitor};
use tracing::trace;

/// What the index knows about one identifier start offset.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// True when the offset is the name of a function declaration.
    pub function_declaration: bool,
    /// The scope active at the identifier (for declarations, the scope
    /// entered by the declaration itself).
    pub scope: ScopeId,
    /// The identifier node at this offset.
    pub identifier: Ident,
}

/// Offset-keyed index over every identifier occurrence in a program.
#[derive(Debug, Clone, Default)]
pub struct RangeIndex {
    entries: HashMap<usize, IndexEntry>,
}

impl RangeIndex {
    /// Build the index for `program` with its scope tree.
    pub fn build(program: &Program, scopes: &ScopeTree) -> RangeIndex {
        let mut builder = IndexBuilder {
            cursor: ScopeCursor::new(scopes),
            entries: HashMap::new(),
        };
        walk_program(&mut builder, program);
        trace!(entries = builder.entries.len(), "range index built");
        RangeIndex {
            entries: builder.entries,
        }
    }

    /// The entry whose identifier starts exactly at `offset`.
    ///
    /// Offsets strictly inside an identifier do not match.
    pub fn at(&self, offset: usize) -> Option<&IndexEntry> {
        self.entries.get(&offset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct IndexBuilder<'a> {
    cursor: ScopeCursor<'a>,
    entries: HashMap<usize, IndexEntry>,
}

impl IndexBuilder<'_> {
    /// Record an entry; the first entry at an offset wins.
    fn record(&mut self, identifier: &Ident, function_declaration: bool) {
        let scope = self.cursor.current();
        self.entries
            .entry(identifier.span.start)
            .or_insert_with(|| IndexEntry {
                function_declaration,
                scope,
                identifier: identifier.clone(),
            });
    }
}

impl<'a, 't> Visitor<'a> for IndexBuilder<'t> {
    fn enter(&mut self, node: Node<'a>) -> VisitResult {
        self.cursor.enter(node);
        match node {
            Node::Stmt(Stmt::FunctionDecl(func)) => {
                if let Some(name) = &func.name {
                    self.record(name, true);
                }
            }
            Node::Ident(ident) => self.record(ident, false),
            _ => {}
        }
        VisitResult::Continue
    }

    fn leave(&mut self, node: Node<'a>) {
        self.cursor.leave(node);
    }
}
