//! Symbol table
//!
//! A multimap from identifier to every entry declared under it, in insertion
//! order. Variables and methods may share an identifier, and a redeclared
//! variable keeps both entries. A secondary index keyed on
//! `(identifier, scope)` answers the per-scope questions asked by
//! declarations.

use super::scope::ScopeId;
use super::types::Type;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Variable { ty: Type, value: String },
    Method { return_type: Type, params: Vec<Type> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub name: String,
    pub scope: ScopeId,
    pub kind: SymbolKind,
}

impl SymbolEntry {
    /// Variable type, or method return type.
    pub fn ty(&self) -> Type {
        match &self.kind {
            SymbolKind::Variable { ty, .. } => *ty,
            SymbolKind::Method { return_type, .. } => *return_type,
        }
    }

    pub fn is_method(&self) -> bool {
        matches!(self.kind, SymbolKind::Method { .. })
    }

    pub fn is_variable_of(&self, ty: Type) -> bool {
        matches!(&self.kind, SymbolKind::Variable { ty: t, .. } if *t == ty)
    }

    pub fn params(&self) -> Option<&[Type]> {
        match &self.kind {
            SymbolKind::Method { params, .. } => Some(params),
            SymbolKind::Variable { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
    by_name: FxHashMap<String, Vec<usize>>,
    by_scope: FxHashMap<(String, ScopeId), Vec<usize>>,
    order: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: SymbolEntry) {
        let index = self.entries.len();
        if !self.by_name.contains_key(&entry.name) {
            self.order.push(entry.name.clone());
        }
        self.by_name
            .entry(entry.name.clone())
            .or_default()
            .push(index);
        self.by_scope
            .entry((entry.name.clone(), entry.scope))
            .or_default()
            .push(index);
        self.entries.push(entry);
    }

    /// Every entry for `name`, in insertion order.
    pub fn get(&self, name: &str) -> impl Iterator<Item = &SymbolEntry> {
        self.by_name
            .get(name)
            .into_iter()
            .flatten()
            .map(|&i| &self.entries[i])
    }

    /// Entries for `name` declared directly in `scope`.
    pub fn in_scope(&self, name: &str, scope: ScopeId) -> impl Iterator<Item = &SymbolEntry> {
        self.by_scope
            .get(&(name.to_string(), scope))
            .into_iter()
            .flatten()
            .map(|&i| &self.entries[i])
    }

    /// Identifiers in order of first declaration.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// `(identifier, entries)` groups in order of first declaration.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec<&SymbolEntry>)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.get(name).collect()))
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
