//! Import declarations attached to blocks and methods.

use serde::{Deserialize, Serialize};

/// A `(module, symbol)` import.
///
/// ## Notes
/// - `symbol` may be empty for whole-module imports (Go `import "errors"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeUsing {
    pub module: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub is_external: bool,
}

impl CodeUsing {
    /// An import from a runtime library or the standard library.
    pub fn external(module: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbol: symbol.into(),
            is_external: true,
        }
    }

    /// An import of another namespace of the generated client.
    pub fn internal(module: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbol: symbol.into(),
            is_external: false,
        }
    }

    fn same_pair(&self, other: &CodeUsing) -> bool {
        self.module == other.module && self.symbol == other.symbol
    }
}

/// Ordered set of imports; a `(module, symbol)` pair is stored at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsingSet(Vec<CodeUsing>);

impl UsingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import unless the pair is already present.
    ///
    /// ## Returns
    /// - `true` when the import was added.
    pub fn add(&mut self, using: CodeUsing) -> bool {
        if self.0.iter().any(|u| u.same_pair(&using)) {
            return false;
        }
        self.0.push(using);
        true
    }

    pub fn contains(&self, module: &str, symbol: &str) -> bool {
        self.0.iter().any(|u| u.module == module && u.symbol == symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CodeUsing> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a UsingSet {
    type Item = &'a CodeUsing;
    type IntoIter = std::slice::Iter<'a, CodeUsing>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_deduplicates_pairs() {
        let mut set = UsingSet::new();
        assert!(set.add(CodeUsing::external("strings", "EqualFold")));
        assert!(!set.add(CodeUsing::external("strings", "EqualFold")));
        assert!(set.add(CodeUsing::external("strings", "ToLower")));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_external_flag_does_not_split_pairs() {
        let mut set = UsingSet::new();
        set.add(CodeUsing::external("models", "User"));
        assert!(!set.add(CodeUsing::internal("models", "User")));
    }
}
