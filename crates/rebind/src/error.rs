//! Engine error types.

use rebind_script::ParseError;
use thiserror::Error;

/// Errors that make a program impossible to load.
///
/// Loading is all-or-nothing: on error no partial [`crate::Program`] is
/// produced. Queries against a loaded program never error; a miss is an
/// ordinary `None`.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source text failed to parse.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A supplied pre-parsed tree lacks usable range information: its
    /// root span does not enclose its statements.
    #[error("syntax tree is missing range information on its root")]
    MissingRanges,
}
