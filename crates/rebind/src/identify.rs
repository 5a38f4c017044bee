//! Identification: from an offset to a binding and its co-references.
//!
//! An identification answers, for one identifier occurrence, which
//! declaration governs it and which other occurrences in the governing
//! scope's subtree refer to the same binding. Function declaration names
//! get a second chance in the enclosing scope, because that is where the
//! name is bound.

use rebind_core::Span;
use rebind_script::ast::Ident;
use rebind_script::scope::{ScopeId, ScopeTree};
use serde::Serialize;
use tracing::debug;

use crate::program::Program;
use crate::resolve::resolve_reference;

/// The result of identifying the identifier at one offset.
///
/// `declaration` is absent when the name's only binding is an implicit
/// global, or the occurrence never resolves at all; the references list
/// still carries every co-referring occurrence found.
///
/// The list may include the queried occurrence itself (it is collected
/// like any other reference, not excluded); callers that need a strict
/// "other occurrences" set should drop entries whose span equals the
/// identifier's.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identification {
    /// The identifier occurrence at the queried offset.
    pub identifier: Ident,
    /// The identifier node at the governing declaration site, if any.
    pub declaration: Option<Ident>,
    /// Co-referring occurrences in the governing scope's subtree, in
    /// source order.
    pub references: Vec<Ident>,
    /// True when the queried offset names a function declaration.
    pub function_declaration: bool,
}

impl Identification {
    /// Every distinct source range the identification touches.
    pub fn spans(&self) -> Vec<Span> {
        let mut spans = vec![self.identifier.span];
        if let Some(declaration) = &self.declaration {
            spans.push(declaration.span);
        }
        spans.extend(self.references.iter().map(|ident| ident.span));
        spans
    }
}

/// A successful lookup of one identifier within one scope.
struct LocalLookup {
    declaration: Option<Ident>,
}

/// Look up `identifier` within `scope` only.
///
/// Succeeds when the identifier is one of the scope's references (its
/// declaration then comes from the resolver and may still be absent), or
/// when it is a binding occurrence of a variable in the scope's variable
/// scope (a self-declaration). Fails otherwise.
fn local_lookup(tree: &ScopeTree, scope: ScopeId, identifier: &Ident) -> Option<LocalLookup> {
    for &rid in &tree.scope(scope).references {
        let reference = tree.reference(rid);
        if reference.identifier.span == identifier.span {
            return Some(LocalLookup {
                declaration: resolve_reference(tree, reference),
            });
        }
    }

    let variable_scope = tree.scope(scope).variable_scope;
    for &vid in &tree.scope(variable_scope).variables {
        for occurrence in &tree.variable(vid).identifiers {
            if occurrence.span == identifier.span {
                return Some(LocalLookup {
                    declaration: Some(identifier.clone()),
                });
            }
        }
    }

    None
}

/// Identify the identifier occurrence starting at `offset`.
pub(crate) fn identify(program: &Program, offset: usize) -> Option<Identification> {
    let tree = program.scopes();
    let entry = program.index().at(offset)?;

    let mut lookup_scope = entry.scope;
    let mut found = local_lookup(tree, lookup_scope, &entry.identifier);

    // A function declaration's name is bound in the enclosing scope, so
    // retry there; the reference sweep below roots where the lookup
    // succeeded.
    if found.is_none() && entry.function_declaration {
        if let Some(upper) = tree.scope(entry.scope).parent {
            lookup_scope = upper;
            found = local_lookup(tree, upper, &entry.identifier);
        }
    }

    let found = found?;
    let declaration_span = found.declaration.as_ref().map(|ident| ident.span);

    // Collect co-references: scan every scope whose block lies inside the
    // governing scope's block (the scope table is in pre-order, so this
    // is the subtree in traversal order), and keep references that both
    // match the name and resolve to the same declaration. Two absent
    // declarations count as the same.
    let root = tree.scope(lookup_scope).block;
    let mut references = Vec::new();
    for (sid, scope) in tree.scopes() {
        if !root.contains(&scope.block) {
            continue;
        }
        for &rid in &scope.references {
            let reference = tree.reference(rid);
            if reference.identifier.name != entry.identifier.name {
                continue;
            }
            if let Some(lookup) = local_lookup(tree, sid, &reference.identifier) {
                if lookup.declaration.as_ref().map(|ident| ident.span) == declaration_span {
                    references.push(reference.identifier.clone());
                }
            }
        }
    }

    debug!(
        name = %entry.identifier.name,
        offset,
        references = references.len(),
        declared = found.declaration.is_some(),
        "identified"
    );

    Some(Identification {
        identifier: entry.identifier.clone(),
        declaration: found.declaration,
        references,
        function_declaration: entry.function_declaration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(source: &str) -> Program {
        Program::load(source).unwrap()
    }

    #[test]
    fn declaration_site_query() {
        let program = load("var x; x; x = 42");
        let id = program.identify(4).unwrap();
        assert_eq!(id.identifier.span, Span::new(4, 5));
        assert_eq!(id.declaration.as_ref().unwrap().span, Span::new(4, 5));
        assert!(!id.function_declaration);
        let spans: Vec<_> = id.references.iter().map(|r| r.span).collect();
        assert_eq!(spans, vec![Span::new(7, 8), Span::new(10, 11)]);
    }

    #[test]
    fn reference_site_query_finds_same_binding() {
        let program = load("var x; x; x = 42");
        let id = program.identify(7).unwrap();
        assert_eq!(id.identifier.span, Span::new(7, 8));
        assert_eq!(id.declaration.as_ref().unwrap().span, Span::new(4, 5));
        // The queried occurrence is collected like any other reference.
        let spans: Vec<_> = id.references.iter().map(|r| r.span).collect();
        assert_eq!(spans, vec![Span::new(7, 8), Span::new(10, 11)]);
    }

    #[test]
    fn non_identifier_offsets_are_absent() {
        let program = load("var x; x;");
        assert!(program.identify(0).is_none()); // 'v' of var
        assert!(program.identify(5).is_none()); // ';'
        assert!(program.identify(6).is_none()); // ' '
        assert!(program.identify(999).is_none());
    }

    #[test]
    fn interior_of_identifier_is_absent() {
        let program = load("var total; total;");
        assert!(program.identify(4).is_some());
        assert!(program.identify(6).is_none());
    }

    #[test]
    fn implicit_global_has_absent_declaration() {
        let program = load("x = 1;");
        let id = program.identify(0).unwrap();
        assert_eq!(id.declaration, None);
        assert_eq!(id.references.len(), 1);
        assert_eq!(id.references[0].span, Span::new(0, 1));
    }

    #[test]
    fn implicit_global_co_references_are_collected() {
        let program = load("x = 1; x; x = 2;");
        let id = program.identify(0).unwrap();
        assert_eq!(id.declaration, None);
        let spans: Vec<_> = id.references.iter().map(|r| r.span).collect();
        assert_eq!(
            spans,
            vec![Span::new(0, 1), Span::new(7, 8), Span::new(10, 11)]
        );
    }

    #[test]
    fn function_declaration_checks_enclosing_scope() {
        let program = load("function f(){} f();");
        let id = program.identify(9).unwrap();
        assert!(id.function_declaration);
        assert_eq!(id.declaration.as_ref().unwrap().span, Span::new(9, 10));
        // The call site outside the body is part of the same binding.
        let spans: Vec<_> = id.references.iter().map(|r| r.span).collect();
        assert_eq!(spans, vec![Span::new(15, 16)]);
    }

    #[test]
    fn function_call_site_reaches_the_declaration() {
        let program = load("function f(){} f();");
        let id = program.identify(15).unwrap();
        assert!(!id.function_declaration);
        assert_eq!(id.declaration.as_ref().unwrap().span, Span::new(9, 10));
    }

    #[test]
    fn parameter_self_declaration() {
        let program = load("function f(p) { return p; }");
        let id = program.identify(11).unwrap();
        assert_eq!(id.declaration.as_ref().unwrap().span, Span::new(11, 12));
        assert_eq!(id.references.len(), 1);
        assert_eq!(id.references[0].span, Span::new(23, 24));
    }

    #[test]
    fn sibling_blocks_stay_separate() {
        //                0123456789012345678901234567890123456789
        let program = load("{ let a = 1; a; } { let a = 2; a; }");
        let first = program.identify(6).unwrap();
        assert_eq!(first.declaration.as_ref().unwrap().span, Span::new(6, 7));
        let spans: Vec<_> = first.references.iter().map(|r| r.span).collect();
        assert_eq!(spans, vec![Span::new(6, 7), Span::new(13, 14)]);

        let second = program.identify(24).unwrap();
        assert_eq!(second.declaration.as_ref().unwrap().span, Span::new(24, 25));
        let spans: Vec<_> = second.references.iter().map(|r| r.span).collect();
        assert_eq!(spans, vec![Span::new(24, 25), Span::new(31, 32)]);
    }

    #[test]
    fn member_property_is_not_identifiable() {
        let program = load("var o; o.size;");
        assert!(program.identify(9).is_none());
        assert!(program.identify(7).is_some());
    }

    #[test]
    fn unresolvable_read_still_identifies_without_declaration() {
        let program = load("ghost;");
        let id = program.identify(0).unwrap();
        assert_eq!(id.declaration, None);
        assert_eq!(id.references.len(), 1);
    }

    #[test]
    fn shadowing_inner_query_stays_inner() {
        let program = load("var x; function f() { var x; x; }");
        //                  0123456789012345678901234567890123
        let id = program.identify(29).unwrap();
        assert_eq!(id.declaration.as_ref().unwrap().span, Span::new(26, 27));
        assert_eq!(id.references.len(), 1);
        assert_eq!(id.references[0].span, Span::new(29, 30));
    }

    #[test]
    fn identification_serializes() {
        let program = load("var x; x;");
        let id = program.identify(4).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.contains("\"identifier\""));
        assert!(json.contains("\"declaration\""));
        assert!(json.contains("\"references\""));
    }

    #[test]
    fn spans_helper_includes_everything() {
        let program = load("var x; x;");
        let id = program.identify(4).unwrap();
        let spans = id.spans();
        assert!(spans.contains(&Span::new(4, 5)));
        assert!(spans.contains(&Span::new(7, 8)));
    }
}
