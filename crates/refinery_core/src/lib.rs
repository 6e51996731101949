//! Provide shared, pure target vocabulary for the refinery passes.
//!
//! This crate is intentionally small and dependency-free. It holds the tables that a target instantiation of the
//! refinement pipeline is parameterized with:
//! - reserved words of the target language,
//! - well-known identifiers of the target runtime (marker types, abstraction module paths),
//! - default serialization module names and their target-specific replacements,
//! - abstract temporal type names.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global mutable state, and no CodeDOM types.
//! - Tables are `const` so several target instantiations can share them without coordination.

pub mod lang;
pub mod naming;
