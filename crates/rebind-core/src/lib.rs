//! Language-agnostic infrastructure for rebind.
//!
//! This crate provides the pieces that do not depend on any particular
//! source language:
//! - Byte spans over source text
//! - Offset and line:column conversions

pub mod span;
pub mod text;

pub use span::Span;
