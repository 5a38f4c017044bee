//! End-to-end identification and rename flows.

use rebind::{Program, Rewritten, Span};
use rebind_script::{parse, prettify_error, validate_identifier};

// ============================================================================
// Identification
// ============================================================================

#[test]
fn declaration_site_identification() {
    let program = Program::load("var x; x; x = 42").unwrap();
    let id = program.identify(4).unwrap();

    assert_eq!(id.identifier.name, "x");
    assert_eq!(id.identifier.span, Span::new(4, 5));
    assert_eq!(id.declaration.as_ref().unwrap().span, Span::new(4, 5));
    assert!(!id.function_declaration);

    let reference_spans: Vec<_> = id.references.iter().map(|r| r.span).collect();
    assert_eq!(reference_spans, vec![Span::new(7, 8), Span::new(10, 11)]);
}

#[test]
fn non_identifier_offsets_yield_nothing() {
    let program = Program::load("var x; x; x = 42").unwrap();
    // Keyword, punctuation, whitespace, interior of a token, past the end.
    for offset in [0, 1, 5, 6, 13, 1000] {
        assert!(program.identify(offset).is_none(), "offset {offset}");
    }
}

#[test]
fn implicit_global_has_no_declaration() {
    let program = Program::load("x = 1;").unwrap();
    let id = program.identify(0).unwrap();
    assert_eq!(id.declaration, None);
    assert_eq!(id.references.len(), 1);
}

#[test]
fn function_declaration_name_reaches_outer_call_sites() {
    let program = Program::load("function f(){} f();").unwrap();
    let id = program.identify(9).unwrap();

    assert!(id.function_declaration);
    assert_eq!(id.declaration.as_ref().unwrap().span, Span::new(9, 10));
    let reference_spans: Vec<_> = id.references.iter().map(|r| r.span).collect();
    assert_eq!(reference_spans, vec![Span::new(15, 16)]);
}

#[test]
fn queried_reference_occurs_in_its_own_reference_list() {
    // The sweep collects the triggering occurrence like any other
    // reference; callers tolerate it showing up alongside being the
    // query target.
    let program = Program::load("var x; x;").unwrap();
    let id = program.identify(7).unwrap();
    assert!(id.references.iter().any(|r| r.span == id.identifier.span));
}

// ============================================================================
// Rename: text mode
// ============================================================================

#[test]
fn rename_declaration_and_all_references() {
    let mut program = Program::load("var x; x; x = 42").unwrap();
    let id = program.identify(4);
    let renamed = program.rename(id.as_ref(), "y");
    assert_eq!(renamed.into_text().unwrap(), "var y; y; y = 42");
}

#[test]
fn rename_function_declaration_and_call_site() {
    let mut program = Program::load("function f(){} f();").unwrap();
    let id = program.identify(9);
    let renamed = program.rename(id.as_ref(), "g");
    assert_eq!(renamed.into_text().unwrap(), "function g(){} g();");
}

#[test]
fn rename_with_absent_identification_is_a_noop() {
    let source = "var x; x;";
    let mut program = Program::load(source).unwrap();
    let id = program.identify(0);
    assert!(id.is_none());
    let renamed = program.rename(id.as_ref(), "y");
    assert_eq!(renamed.into_text().unwrap(), source);
}

#[test]
fn rename_to_same_name_is_idempotent() {
    let source = "var x; function f(a) { return x + a; }";
    let mut program = Program::load(source).unwrap();
    let id = program.identify(4);
    let renamed = program.rename(id.as_ref(), "x");
    assert_eq!(renamed.into_text().unwrap(), source);
}

#[test]
fn growing_rename_stays_offset_safe_across_one_line() {
    let mut program = Program::load("var x; x; x; x;").unwrap();
    let id = program.identify(4);
    let renamed = program.rename(id.as_ref(), "longName");
    assert_eq!(
        renamed.into_text().unwrap(),
        "var longName; longName; longName; longName;"
    );
}

#[test]
fn shrinking_rename_stays_offset_safe() {
    let mut program = Program::load("var someLongName; someLongName;").unwrap();
    let id = program.identify(4);
    let renamed = program.rename(id.as_ref(), "n");
    assert_eq!(renamed.into_text().unwrap(), "var n; n;");
}

#[test]
fn implicit_global_rename_still_rewrites_occurrences() {
    let mut program = Program::load("x = 1; x;").unwrap();
    let id = program.identify(0).unwrap();
    assert_eq!(id.declaration, None);
    let renamed = program.rename(Some(&id), "y");
    assert_eq!(renamed.into_text().unwrap(), "y = 1; y;");
}

// ============================================================================
// Scope behavior
// ============================================================================

#[test]
fn sibling_blocks_with_same_name_stay_independent() {
    let source = "{ let a = 1; a; } { let a = 2; a; }";
    let mut program = Program::load(source).unwrap();
    let id = program.identify(6);
    let renamed = program.rename(id.as_ref(), "b");
    assert_eq!(
        renamed.into_text().unwrap(),
        "{ let b = 1; b; } { let a = 2; a; }"
    );
}

#[test]
fn inner_shadowing_variable_does_not_leak_out() {
    let source = "var x; function f() { var x; x; }";
    let mut program = Program::load(source).unwrap();
    // Query the inner occurrence; the identification governs only the
    // function's subtree.
    let id = program.identify(29).unwrap();
    assert_eq!(id.declaration.as_ref().unwrap().span, Span::new(26, 27));
    let renamed = program.rename(Some(&id), "y");
    assert_eq!(
        renamed.into_text().unwrap(),
        "var x; function f() { var y; y; }"
    );
}

#[test]
fn parameters_rename_with_their_uses() {
    let mut program = Program::load("function f(count) { return count + 1; }").unwrap();
    let id = program.identify(11);
    let renamed = program.rename(id.as_ref(), "n");
    assert_eq!(renamed.into_text().unwrap(), "function f(n) { return n + 1; }");
}

#[test]
fn named_function_expression_renames_inside_itself() {
    let mut program = Program::load("var g = function h() { h(); };").unwrap();
    let id = program.identify(17).unwrap();
    assert!(!id.function_declaration);
    let renamed = program.rename(Some(&id), "recur");
    assert_eq!(
        renamed.into_text().unwrap(),
        "var g = function recur() { recur(); };"
    );
}

#[test]
fn latest_declaration_governs_redeclared_names() {
    let mut program = Program::load("var x = 1; var x = 2; x;").unwrap();
    let id = program.identify(22).unwrap();
    assert_eq!(id.declaration.as_ref().unwrap().span, Span::new(15, 16));
    let renamed = program.rename(Some(&id), "y");
    assert_eq!(renamed.into_text().unwrap(), "var y = 1; var y = 2; y;");
}

#[test]
fn member_properties_are_not_bindings() {
    let mut program = Program::load("var size; o.size;").unwrap();
    // The property name shares its spelling with the variable but is not
    // an identifiable binding.
    assert!(program.identify(12).is_none());

    // Renaming the variable leaves the property alone.
    let id = program.identify(4);
    let renamed = program.rename(id.as_ref(), "len");
    assert_eq!(renamed.into_text().unwrap(), "var len; o.size;");
}

#[test]
fn object_keys_are_not_bindings() {
    let mut program = Program::load("var key; var o = { key: key };").unwrap();
    let id = program.identify(4);
    let renamed = program.rename(id.as_ref(), "k");
    assert_eq!(renamed.into_text().unwrap(), "var k; var o = { key: k };");
}

#[test]
fn identification_governs_only_its_scope_subtree() {
    // Queried inside the function, the sweep roots at the function
    // scope; the outer occurrence at offset 7 is outside the governing
    // subtree and is not part of this identification.
    let source = "var x; x; function f() { x; }";
    let mut program = Program::load(source).unwrap();
    let id = program.identify(25).unwrap();
    assert_eq!(id.declaration.as_ref().unwrap().span, Span::new(4, 5));
    assert_eq!(id.references.len(), 1);
    let renamed = program.rename(Some(&id), "y");
    assert_eq!(renamed.into_text().unwrap(), "var y; x; function f() { y; }");
}

// ============================================================================
// Tree mode
// ============================================================================

#[test]
fn tree_mode_renames_in_place() {
    let tree = parse("var x; x; x = 42").unwrap();
    let mut program = Program::from_tree(tree).unwrap();
    let id = program.identify(4);
    let renamed = program.rename(id.as_ref(), "y");
    assert_eq!(renamed, Rewritten::Tree);
    assert_eq!(renamed.into_text(), None);

    // The tree carries the new names; spans still describe the old text.
    program.rebuild();
    let id = program.identify(4).unwrap();
    assert_eq!(id.identifier.name, "y");
    assert_eq!(id.identifier.span, Span::new(4, 5));
}

#[test]
fn tree_mode_noop_returns_tree_marker() {
    let tree = parse("var x;").unwrap();
    let mut program = Program::from_tree(tree).unwrap();
    let renamed = program.rename(None, "y");
    assert_eq!(renamed, Rewritten::Tree);
}

// ============================================================================
// Hosting flow
// ============================================================================

#[test]
fn hosts_validate_names_before_renaming() {
    assert!(validate_identifier("fresh_name").is_ok());
    assert!(validate_identifier("3rd").is_err());
    assert!(validate_identifier("for").is_err());
}

#[test]
fn load_errors_render_as_snippets() {
    let source = "var x = ;";
    let err = Program::load(source).unwrap_err();
    let rebind::LoadError::Parse(parse_err) = err else {
        panic!("expected a parse error");
    };
    let rendered = prettify_error(source, &parse_err, "example.js");
    assert!(rendered.contains("example.js"));
}

#[test]
fn repeated_queries_are_deterministic() {
    let program = Program::load("var x; x; x = 42").unwrap();
    let first = program.identify(7).unwrap();
    let second = program.identify(7).unwrap();
    assert_eq!(first, second);
}
