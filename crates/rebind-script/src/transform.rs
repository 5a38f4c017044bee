//! Batch rename application, for source text and for trees.
//!
//! Text edits are applied from the highest start offset down so that
//! earlier spans stay valid while later (in-document) text has already
//! been rewritten.

use std::collections::HashSet;

use rebind_core::Span;

use crate::ast::{Expr, Function, Ident, MemberProp, Program, PropKey, Stmt};

/// Replace every span in `spans` with `new_name`.
///
/// The spans may be given in any order but must not overlap, and must lie
/// within `source` on character boundaries; out-of-range spans panic.
pub fn rename_spans(source: &str, spans: &[Span], new_name: &str) -> String {
    let mut spans = spans.to_vec();
    spans.sort_by(|a, b| b.start.cmp(&a.start));

    let mut result = source.to_string();
    for span in &spans {
        result.replace_range(span.start..span.end, new_name);
    }
    result
}

/// Rename every identifier whose span starts at one of `starts`, in place.
///
/// Returns the number of identifier nodes renamed. Spans are left
/// untouched, so they no longer reflect the new name's length; rebuild
/// any offset-derived state before further queries.
pub fn rename_idents(program: &mut Program, starts: &HashSet<usize>, new_name: &str) -> usize {
    let mut renamed = 0;
    for stmt in &mut program.body {
        rename_in_stmt(stmt, starts, new_name, &mut renamed);
    }
    renamed
}

fn rename_ident(ident: &mut Ident, starts: &HashSet<usize>, new_name: &str, renamed: &mut usize) {
    if starts.contains(&ident.span.start) {
        ident.name = new_name.to_string();
        *renamed += 1;
    }
}

fn rename_in_function(
    func: &mut Function,
    starts: &HashSet<usize>,
    new_name: &str,
    renamed: &mut usize,
) {
    if let Some(name) = &mut func.name {
        rename_ident(name, starts, new_name, renamed);
    }
    for param in &mut func.params {
        rename_ident(param, starts, new_name, renamed);
    }
    for stmt in &mut func.body.body {
        rename_in_stmt(stmt, starts, new_name, renamed);
    }
}

fn rename_in_stmt(stmt: &mut Stmt, starts: &HashSet<usize>, new_name: &str, renamed: &mut usize) {
    match stmt {
        Stmt::VarDecl(decl) => {
            for declarator in &mut decl.declarators {
                rename_ident(&mut declarator.name, starts, new_name, renamed);
                if let Some(init) = &mut declarator.init {
                    rename_in_expr(init, starts, new_name, renamed);
                }
            }
        }
        Stmt::FunctionDecl(func) => rename_in_function(func, starts, new_name, renamed),
        Stmt::Expr(stmt) => rename_in_expr(&mut stmt.expr, starts, new_name, renamed),
        Stmt::Block(block) => {
            for stmt in &mut block.body {
                rename_in_stmt(stmt, starts, new_name, renamed);
            }
        }
        Stmt::If(stmt) => {
            rename_in_expr(&mut stmt.test, starts, new_name, renamed);
            rename_in_stmt(&mut stmt.consequent, starts, new_name, renamed);
            if let Some(alternate) = &mut stmt.alternate {
                rename_in_stmt(alternate, starts, new_name, renamed);
            }
        }
        Stmt::While(stmt) => {
            rename_in_expr(&mut stmt.test, starts, new_name, renamed);
            rename_in_stmt(&mut stmt.body, starts, new_name, renamed);
        }
        Stmt::For(stmt) => {
            match &mut stmt.init {
                Some(crate::ast::ForInit::VarDecl(decl)) => {
                    for declarator in &mut decl.declarators {
                        rename_ident(&mut declarator.name, starts, new_name, renamed);
                        if let Some(init) = &mut declarator.init {
                            rename_in_expr(init, starts, new_name, renamed);
                        }
                    }
                }
                Some(crate::ast::ForInit::Expr(expr)) => {
                    rename_in_expr(expr, starts, new_name, renamed);
                }
                None => {}
            }
            if let Some(test) = &mut stmt.test {
                rename_in_expr(test, starts, new_name, renamed);
            }
            if let Some(update) = &mut stmt.update {
                rename_in_expr(update, starts, new_name, renamed);
            }
            rename_in_stmt(&mut stmt.body, starts, new_name, renamed);
        }
        Stmt::Return(stmt) => {
            if let Some(argument) = &mut stmt.argument {
                rename_in_expr(argument, starts, new_name, renamed);
            }
        }
        Stmt::Break(_) | Stmt::Continue(_) | Stmt::Empty(_) => {}
    }
}

fn rename_in_expr(expr: &mut Expr, starts: &HashSet<usize>, new_name: &str, renamed: &mut usize) {
    match expr {
        Expr::Ident(ident) => rename_ident(ident, starts, new_name, renamed),
        Expr::Number(_) | Expr::Str(_) | Expr::Bool(_) | Expr::Null(_) => {}
        Expr::Assign(assign) => {
            rename_in_expr(&mut assign.target, starts, new_name, renamed);
            rename_in_expr(&mut assign.value, starts, new_name, renamed);
        }
        Expr::Conditional(cond) => {
            rename_in_expr(&mut cond.test, starts, new_name, renamed);
            rename_in_expr(&mut cond.consequent, starts, new_name, renamed);
            rename_in_expr(&mut cond.alternate, starts, new_name, renamed);
        }
        Expr::Binary(binary) => {
            rename_in_expr(&mut binary.left, starts, new_name, renamed);
            rename_in_expr(&mut binary.right, starts, new_name, renamed);
        }
        Expr::Unary(unary) => rename_in_expr(&mut unary.argument, starts, new_name, renamed),
        Expr::Call(call) => {
            rename_in_expr(&mut call.callee, starts, new_name, renamed);
            for arg in &mut call.args {
                rename_in_expr(arg, starts, new_name, renamed);
            }
        }
        Expr::Member(member) => {
            rename_in_expr(&mut member.object, starts, new_name, renamed);
            match &mut member.property {
                MemberProp::Dot(ident) => rename_ident(ident, starts, new_name, renamed),
                MemberProp::Computed(index) => rename_in_expr(index, starts, new_name, renamed),
            }
        }
        Expr::Array(array) => {
            for element in &mut array.elements {
                rename_in_expr(element, starts, new_name, renamed);
            }
        }
        Expr::Object(object) => {
            for property in &mut object.properties {
                if let PropKey::Ident(key) = &mut property.key {
                    rename_ident(key, starts, new_name, renamed);
                }
                rename_in_expr(&mut property.value, starts, new_name, renamed);
            }
        }
        Expr::Function(func) => rename_in_function(func, starts, new_name, renamed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn text_single_span() {
        let source = "var x; x;";
        let result = rename_spans(source, &[Span::new(4, 5)], "y");
        assert_eq!(result, "var y; x;");
    }

    #[test]
    fn text_growing_name_multiple_spans_one_line() {
        let source = "var x; x; x = 42";
        let spans = [Span::new(4, 5), Span::new(7, 8), Span::new(10, 11)];
        let result = rename_spans(source, &spans, "longName");
        assert_eq!(result, "var longName; longName; longName = 42");
    }

    #[test]
    fn text_input_order_does_not_matter() {
        let source = "a b a";
        let forwards = [Span::new(0, 1), Span::new(4, 5)];
        let backwards = [Span::new(4, 5), Span::new(0, 1)];
        assert_eq!(rename_spans(source, &forwards, "zz"), "zz b zz");
        assert_eq!(rename_spans(source, &backwards, "zz"), "zz b zz");
    }

    #[test]
    fn text_shrinking_name() {
        let source = "reallyLongName = reallyLongName + 1;";
        let spans = [Span::new(0, 14), Span::new(17, 31)];
        assert_eq!(rename_spans(source, &spans, "n"), "n = n + 1;");
    }

    #[test]
    fn text_multi_byte_neighbors() {
        // 'é' is two bytes; the span after it must use byte offsets.
        let source = "var é; x;";
        let result = rename_spans(source, &[Span::new(8, 9)], "y");
        assert_eq!(result, "var é; y;");
    }

    #[test]
    fn tree_renames_by_start_offset() {
        let mut program = parse("var x; x; x = 42").unwrap();
        let starts: HashSet<usize> = [4, 7, 10].into_iter().collect();
        let renamed = rename_idents(&mut program, &starts, "y");
        assert_eq!(renamed, 3);

        let Stmt::VarDecl(decl) = &program.body[0] else {
            panic!("expected var declaration");
        };
        assert_eq!(decl.declarators[0].name.name, "y");
        // Spans are untouched.
        assert_eq!(decl.declarators[0].name.span, Span::new(4, 5));
    }

    #[test]
    fn tree_ignores_other_offsets() {
        let mut program = parse("var x; var other;").unwrap();
        let starts: HashSet<usize> = [4].into_iter().collect();
        assert_eq!(rename_idents(&mut program, &starts, "y"), 1);

        let Stmt::VarDecl(decl) = &program.body[1] else {
            panic!("expected var declaration");
        };
        assert_eq!(decl.declarators[0].name.name, "other");
    }

    #[test]
    fn tree_reaches_functions_and_members() {
        let mut program = parse("function f(a) { return o.f; }").unwrap();
        // Rename the declaration name but not the property: distinct
        // offsets keep them apart.
        let starts: HashSet<usize> = [9].into_iter().collect();
        assert_eq!(rename_idents(&mut program, &starts, "g"), 1);

        let Stmt::FunctionDecl(func) = &program.body[0] else {
            panic!("expected function declaration");
        };
        assert_eq!(func.name.as_ref().unwrap().name, "g");
        let Stmt::Return(ret) = &func.body.body[0] else {
            panic!("expected return statement");
        };
        let Some(Expr::Member(member)) = &ret.argument else {
            panic!("expected member expression");
        };
        let MemberProp::Dot(prop) = &member.property else {
            panic!("expected dot property");
        };
        assert_eq!(prop.name, "f");
    }
}
