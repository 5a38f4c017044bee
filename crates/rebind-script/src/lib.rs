//! Script frontend for rebind.
//!
//! This crate covers everything between raw source text and the scope
//! model the rename engine works with:
//!
//! - **Tokenizer** ([`token`]) and recursive-descent **parser**
//!   ([`parser`]) producing a range-annotated AST ([`ast`])
//! - Depth-first **traversal** with enter/leave callbacks ([`visitor`])
//! - **Scope analysis** ([`scope`]): scope tree, variables, definitions,
//!   references, and a cursor for scope-aware walks
//! - Replacement-name **validation** ([`validate`])
//! - Batch rename **transformers** for text and tree ([`transform`])
//!
//! The language is a dynamically typed, lexically scoped script language
//! with C-style syntax: `var`/`let`/`const`, nested functions and blocks,
//! variable hoisting, and implicit global creation when an undeclared
//! name is assigned.

pub mod ast;
pub mod error;
pub mod parser;
pub mod scope;
pub mod token;
pub mod transform;
pub mod validate;
pub mod visitor;

pub use error::{prettify_error, ParseError};
pub use parser::parse;
pub use scope::{analyze, ScopeCursor, ScopeTree};
pub use validate::{validate_identifier, InvalidIdentifier};
pub use visitor::{walk_program, Node, VisitResult, Visitor};
