//! Rename application.
//!
//! Takes an identification and a replacement name, computes the minimal
//! non-overlapping set of ranges to rewrite, and applies the rewrite to
//! the source text or to the tree in place.

use std::collections::HashSet;

use rebind_script::transform::{rename_idents, rename_spans};
use tracing::debug;

use crate::identify::Identification;
use crate::program::{Program, ProgramSource};

/// What a rename produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Rewritten {
    /// The rewritten source text (text-backed programs). An absent
    /// identification yields the original text unchanged.
    Text(String),
    /// The tree was mutated in place (tree-only programs). Node spans
    /// still describe the old text, so offset-based queries need
    /// [`Program::rebuild`] first.
    Tree,
}

impl Rewritten {
    /// The new source text, for text-backed programs.
    pub fn into_text(self) -> Option<String> {
        match self {
            Rewritten::Text(text) => Some(text),
            Rewritten::Tree => None,
        }
    }
}

/// Apply `new_name` to every range an identification selected.
///
/// With no identification this is a no-op returning the program's
/// current representation. Either every selected range is rewritten or
/// none is; there is no partial application.
pub(crate) fn rename(
    program: &mut Program,
    identification: Option<&Identification>,
    new_name: &str,
) -> Rewritten {
    let Some(identification) = identification else {
        return match program.source() {
            ProgramSource::Text(text) => Rewritten::Text(text.clone()),
            ProgramSource::TreeOnly => Rewritten::Tree,
        };
    };

    // Highest start first, so applying edits in order never shifts a
    // pending one; after the sort, duplicates of one occurrence are
    // adjacent and collapse by start offset.
    let mut spans = identification.spans();
    spans.sort_by(|a, b| b.start.cmp(&a.start));
    spans.dedup_by_key(|span| span.start);

    debug!(
        name = %identification.identifier.name,
        new_name,
        edits = spans.len(),
        "renaming"
    );

    if let ProgramSource::Text(text) = program.source() {
        return Rewritten::Text(rename_spans(text, &spans, new_name));
    }

    let starts: HashSet<usize> = spans.iter().map(|span| span.start).collect();
    rename_idents(program.tree_mut(), &starts, new_name);
    Rewritten::Tree
}
