//! The loaded program: tree, scope tree, and range index.

use rebind_script::ast;
use rebind_script::scope::ScopeTree;
use tracing::debug;

use crate::error::LoadError;
use crate::identify::{identify, Identification};
use crate::index::RangeIndex;
use crate::rename::{rename, Rewritten};

/// How a program is backed.
///
/// Text-backed programs rename by rewriting the retained source text;
/// tree-only programs rename by mutating identifier nodes in place.
#[derive(Debug, Clone)]
pub enum ProgramSource {
    /// The original source text is retained verbatim.
    Text(String),
    /// Only the tree is available.
    TreeOnly,
}

/// A parsed and analyzed program, ready for identification and rename
/// queries.
///
/// The scope tree and range index are snapshots of the tree at load
/// time. A tree-mode rename mutates the tree in place — the one
/// documented exception to immutability — after which offset-based
/// queries need [`Program::rebuild`].
///
/// A program is single-session state: it is not meant to be shared for
/// concurrent mutation.
#[derive(Debug, Clone)]
pub struct Program {
    tree: ast::Program,
    source: ProgramSource,
    scopes: ScopeTree,
    index: RangeIndex,
}

impl Program {
    /// Parse and analyze source text.
    ///
    /// # Errors
    ///
    /// Fails with [`LoadError::Parse`] when the text does not parse; no
    /// partial program is produced.
    pub fn load(source: &str) -> Result<Program, LoadError> {
        let tree = rebind_script::parse(source)?;
        let scopes = rebind_script::analyze(&tree);
        let index = RangeIndex::build(&tree, &scopes);
        debug!(bytes = source.len(), identifiers = index.len(), "loaded");
        Ok(Program {
            tree,
            source: ProgramSource::Text(source.to_string()),
            scopes,
            index,
        })
    }

    /// Adopt an already-parsed tree without source text.
    ///
    /// The resulting program is tree-only: renames mutate the tree in
    /// place.
    ///
    /// # Errors
    ///
    /// Fails with [`LoadError::MissingRanges`] when the tree's root span
    /// does not enclose its statements, since every query depends on
    /// trustworthy ranges.
    pub fn from_tree(tree: ast::Program) -> Result<Program, LoadError> {
        let enclosed = tree.body.iter().all(|stmt| tree.span.contains(&stmt.span()));
        if !enclosed {
            return Err(LoadError::MissingRanges);
        }
        let scopes = rebind_script::analyze(&tree);
        let index = RangeIndex::build(&tree, &scopes);
        Ok(Program {
            tree,
            source: ProgramSource::TreeOnly,
            scopes,
            index,
        })
    }

    /// Re-run scope analysis and rebuild the range index.
    ///
    /// Required after a tree-mode rename before any further queries: the
    /// scope tree and index are snapshots, not live views.
    pub fn rebuild(&mut self) {
        self.scopes = rebind_script::analyze(&self.tree);
        self.index = RangeIndex::build(&self.tree, &self.scopes);
    }

    /// Identify the identifier occurrence starting at `offset`.
    ///
    /// Returns `None` when the offset is not the start of an identifier
    /// occurrence, or the occurrence has no identifiable binding. This
    /// is not an error; callers decide what a miss means.
    pub fn identify(&self, offset: usize) -> Option<Identification> {
        identify(self, offset)
    }

    /// Rename every occurrence an identification selected.
    ///
    /// An absent identification is a defined no-op: the program's
    /// current representation comes back unchanged.
    pub fn rename(
        &mut self,
        identification: Option<&Identification>,
        new_name: &str,
    ) -> Rewritten {
        rename(self, identification, new_name)
    }

    /// The syntax tree.
    pub fn tree(&self) -> &ast::Program {
        &self.tree
    }

    /// The retained source text, for text-backed programs.
    pub fn source_text(&self) -> Option<&str> {
        match &self.source {
            ProgramSource::Text(text) => Some(text),
            ProgramSource::TreeOnly => None,
        }
    }

    pub(crate) fn source(&self) -> &ProgramSource {
        &self.source
    }

    pub(crate) fn tree_mut(&mut self) -> &mut ast::Program {
        &mut self.tree
    }

    pub(crate) fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    pub(crate) fn index(&self) -> &RangeIndex {
        &self.index
    }
}
