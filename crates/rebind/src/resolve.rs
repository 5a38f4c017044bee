//! Declaration resolution for references.
//!
//! Maps a reference to the identifier node of its authoritative
//! declaration, or to nothing when the only binding is an implicit
//! global. A name that exists solely because something assigned to it
//! without declaring it is, for refactoring purposes, undeclared.

use rebind_script::ast::Ident;
use rebind_script::scope::{Definition, Reference, ScopeTree};
use tracing::trace;

/// Pick the authoritative definition from a variable's definition list.
///
/// With two or more definitions, explicit bindings outrank implicit
/// globals: the preferred partition is the non-implicit definitions when
/// any exist, otherwise all of them. Within the preferred partition the
/// most recently added definition wins. The partition step is a stable
/// preference, not a chronological sort across kinds.
fn choose_definition(defs: &[Definition]) -> Option<&Definition> {
    if defs.len() < 2 {
        return defs.first();
    }
    let explicit = defs.iter().rev().find(|def| !def.kind.is_implicit_global());
    explicit.or_else(|| defs.last())
}

/// Turn the chosen definition into a declaration, dropping implicit
/// globals.
fn declaration_of(defs: &[Definition]) -> Option<Ident> {
    let def = choose_definition(defs)?;
    if def.kind.is_implicit_global() {
        None
    } else {
        Some(def.name.clone())
    }
}

/// Resolve a reference to the identifier node of its declaration.
///
/// A resolved reference resolves through its variable's definitions. An
/// unresolved one walks the scope chain upward from its origin scope and
/// applies the same definition preference at the first scope declaring a
/// variable with the same name; the walk stops there even when that
/// choice turns out to be an implicit global.
pub(crate) fn resolve_reference(tree: &ScopeTree, reference: &Reference) -> Option<Ident> {
    if let Some(vid) = reference.resolved {
        return declaration_of(&tree.variable(vid).defs);
    }

    let mut scope = Some(reference.from);
    while let Some(sid) = scope {
        for &vid in &tree.scope(sid).variables {
            let variable = tree.variable(vid);
            if variable.name == reference.identifier.name && !variable.defs.is_empty() {
                trace!(
                    name = %variable.name,
                    "resolved reference through scope chain"
                );
                return declaration_of(&variable.defs);
            }
        }
        scope = tree.scope(sid).parent;
    }

    None
}
