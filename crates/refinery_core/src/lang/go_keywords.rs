//! Define the reserved word vocabulary of the Go target.
//!
//! Go keywords are all lowercase, but generated Go code upper-cases the first character of exported identifiers.
//! Matching is therefore **case-insensitive**: a property called `Type` collides with `type` once the emitter lowers
//! it for a private field.
//!
//! ## Examples
//! ```rust
//! use refinery_core::lang::go_keywords::{self, GoKeywordId};
//!
//! assert_eq!(go_keywords::from_str("Select"), Some(GoKeywordId::Select));
//! assert!(go_keywords::is_reserved("RANGE"));
//! assert!(!go_keywords::is_reserved("ranges"));
//! ```

/// Stable identifier for every Go keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoKeywordId {
    // Declarations
    Const,
    Func,
    Import,
    Package,
    Type,
    Var,

    // Composite types
    Chan,
    Interface,
    Map,
    Struct,

    // Control flow
    Break,
    Case,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Go,
    Goto,
    If,
    Range,
    Return,
    Select,
    Switch,
}

/// High-level grouping, used for documentation tables only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoKeywordCategory {
    Declaration,
    CompositeType,
    ControlFlow,
}

/// Metadata for a Go keyword.
#[derive(Debug, Clone, Copy)]
pub struct GoKeywordInfo {
    pub id: GoKeywordId,
    pub spelling: &'static str,
    pub category: GoKeywordCategory,
}

const fn info(id: GoKeywordId, spelling: &'static str, category: GoKeywordCategory) -> GoKeywordInfo {
    GoKeywordInfo { id, spelling, category }
}

/// Registry of all Go keywords.
pub const GO_KEYWORDS: &[GoKeywordInfo] = &[
    info(GoKeywordId::Const, "const", GoKeywordCategory::Declaration),
    info(GoKeywordId::Func, "func", GoKeywordCategory::Declaration),
    info(GoKeywordId::Import, "import", GoKeywordCategory::Declaration),
    info(GoKeywordId::Package, "package", GoKeywordCategory::Declaration),
    info(GoKeywordId::Type, "type", GoKeywordCategory::Declaration),
    info(GoKeywordId::Var, "var", GoKeywordCategory::Declaration),
    info(GoKeywordId::Chan, "chan", GoKeywordCategory::CompositeType),
    info(GoKeywordId::Interface, "interface", GoKeywordCategory::CompositeType),
    info(GoKeywordId::Map, "map", GoKeywordCategory::CompositeType),
    info(GoKeywordId::Struct, "struct", GoKeywordCategory::CompositeType),
    info(GoKeywordId::Break, "break", GoKeywordCategory::ControlFlow),
    info(GoKeywordId::Case, "case", GoKeywordCategory::ControlFlow),
    info(GoKeywordId::Continue, "continue", GoKeywordCategory::ControlFlow),
    info(GoKeywordId::Default, "default", GoKeywordCategory::ControlFlow),
    info(GoKeywordId::Defer, "defer", GoKeywordCategory::ControlFlow),
    info(GoKeywordId::Else, "else", GoKeywordCategory::ControlFlow),
    info(GoKeywordId::Fallthrough, "fallthrough", GoKeywordCategory::ControlFlow),
    info(GoKeywordId::For, "for", GoKeywordCategory::ControlFlow),
    info(GoKeywordId::Go, "go", GoKeywordCategory::ControlFlow),
    info(GoKeywordId::Goto, "goto", GoKeywordCategory::ControlFlow),
    info(GoKeywordId::If, "if", GoKeywordCategory::ControlFlow),
    info(GoKeywordId::Range, "range", GoKeywordCategory::ControlFlow),
    info(GoKeywordId::Return, "return", GoKeywordCategory::ControlFlow),
    info(GoKeywordId::Select, "select", GoKeywordCategory::ControlFlow),
    info(GoKeywordId::Switch, "switch", GoKeywordCategory::ControlFlow),
];

/// Resolve an identifier to a keyword, ignoring ASCII case.
pub fn from_str(name: &str) -> Option<GoKeywordId> {
    GO_KEYWORDS
        .iter()
        .find(|k| k.spelling.eq_ignore_ascii_case(name))
        .map(|k| k.id)
}

/// Return the canonical (lowercase) spelling of a keyword.
pub fn as_str(id: GoKeywordId) -> &'static str {
    match id {
        GoKeywordId::Const => "const",
        GoKeywordId::Func => "func",
        GoKeywordId::Import => "import",
        GoKeywordId::Package => "package",
        GoKeywordId::Type => "type",
        GoKeywordId::Var => "var",
        GoKeywordId::Chan => "chan",
        GoKeywordId::Interface => "interface",
        GoKeywordId::Map => "map",
        GoKeywordId::Struct => "struct",
        GoKeywordId::Break => "break",
        GoKeywordId::Case => "case",
        GoKeywordId::Continue => "continue",
        GoKeywordId::Default => "default",
        GoKeywordId::Defer => "defer",
        GoKeywordId::Else => "else",
        GoKeywordId::Fallthrough => "fallthrough",
        GoKeywordId::For => "for",
        GoKeywordId::Go => "go",
        GoKeywordId::Goto => "goto",
        GoKeywordId::If => "if",
        GoKeywordId::Range => "range",
        GoKeywordId::Return => "return",
        GoKeywordId::Select => "select",
        GoKeywordId::Switch => "switch",
    }
}

/// Return the registry entry for a keyword.
pub fn info_for(id: GoKeywordId) -> Option<&'static GoKeywordInfo> {
    GO_KEYWORDS.iter().find(|k| k.id == id)
}

/// Check whether an identifier collides with a Go keyword (case-insensitive).
pub fn is_reserved(name: &str) -> bool {
    from_str(name).is_some()
}

/// Iterate the canonical spellings, e.g. to seed a target's reserved-word set.
pub fn spellings() -> impl Iterator<Item = &'static str> {
    GO_KEYWORDS.iter().map(|k| k.spelling)
}
