//! Identifier resolution and scope-aware rename for scripts.
//!
//! Given a parsed program, this crate answers two questions precisely:
//!
//! 1. For a byte offset naming an identifier occurrence, which
//!    declaration (if any) governs it, and which other occurrences refer
//!    to the same binding ([`Program::identify`]).
//! 2. Given such an identification, how to rewrite the program — source
//!    text or tree — so every occurrence is consistently renamed without
//!    corrupting unrelated offsets ([`Program::rename`]).
//!
//! The subtle parts live in the scope-chain semantics: co-located
//! multiple definitions for one name, explicit declarations versus
//! implicit globals created by assignment, function declaration names
//! binding in the *enclosing* scope, and applying several text edits in
//! one pass without invalidating offsets.
//!
//! # Example
//!
//! ```
//! use rebind::Program;
//!
//! let mut program = Program::load("var x; x; x = 42").unwrap();
//! let id = program.identify(4).expect("an identifier starts at offset 4");
//! assert_eq!(id.declaration.as_ref().unwrap().span.start, 4);
//!
//! let renamed = program.rename(Some(&id), "y");
//! assert_eq!(renamed.into_text().unwrap(), "var y; y; y = 42");
//! ```
//!
//! Everything is synchronous and in-memory. All queries are pure; the
//! one mutation is the tree-mode rename, after which
//! [`Program::rebuild`] refreshes the snapshots offset queries rely on.
//!
//! Parsing, scope analysis, and traversal live in `rebind-script`;
//! spans and text positions in `rebind-core`.

pub mod error;
pub mod identify;
pub mod index;
pub mod program;
pub mod rename;

mod resolve;

pub use error::LoadError;
pub use identify::Identification;
pub use index::{IndexEntry, RangeIndex};
pub use program::{Program, ProgramSource};
pub use rename::Rewritten;

pub use rebind_core::Span;
pub use rebind_script::ast::Ident;
