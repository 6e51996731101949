//! Target language vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. [`go_keywords::GoKeywordId`]) or named constants and look up spellings via the
//! registry tables, instead of scattering string literals across the passes.
//!
//! ## Notes
//! - Registries are **pure**: no tree types, no IO, no side effects.
//!
//! ## Examples
//! ```rust
//! use refinery_core::lang::go_keywords::{self, GoKeywordId};
//!
//! assert_eq!(go_keywords::from_str("func"), Some(GoKeywordId::Func));
//! assert_eq!(go_keywords::as_str(GoKeywordId::Func), "func");
//! ```

pub mod conventions;
pub mod go_keywords;
pub mod modules;
pub mod temporal;
