//! Scope arena and scope stack
//!
//! Every scope ever opened is a [`Scope`] record in an arena, with an
//! explicit parent link and a per-kind disambiguator. The stack holds the ids
//! of the scopes that are currently open; `global` sits at the bottom and is
//! never popped.
//!
//! The `function` scope is shared: every method declaration reopens the same
//! record, so methods registered in it stay visible from the body of any
//! method.

use super::types::Type;
use rustc_hash::FxHashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    pub const GLOBAL: ScopeId = ScopeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    /// Shared scope holding method entries.
    Function,
    Method {
        name: String,
        return_type: Type,
        params: Vec<Type>,
    },
    If,
    Else,
    While,
    DoWhile,
    For,
    Case,
    Default,
}

impl ScopeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ScopeKind::Global => "global",
            ScopeKind::Function => "function",
            ScopeKind::Method { .. } => "method",
            ScopeKind::If => "if",
            ScopeKind::Else => "else",
            ScopeKind::While => "while",
            ScopeKind::DoWhile => "doWhile",
            ScopeKind::For => "for",
            ScopeKind::Case => "case",
            ScopeKind::Default => "default",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    /// Occurrence number among scopes of the same kind, starting at 1.
    pub disambiguator: usize,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ScopeKind::Global | ScopeKind::Function => f.write_str(self.kind.label()),
            ScopeKind::Method {
                name,
                return_type,
                params,
            } => {
                let params: Vec<&str> = params.iter().map(|t| t.name()).collect();
                write!(f, "{}@{}({})", name, return_type, params.join(","))
            }
            kind => write!(f, "{}#{}", kind.label(), self.disambiguator),
        }
    }
}

/// Arena of every scope plus the stack of open ones.
#[derive(Debug, Clone)]
pub struct Scopes {
    arena: Vec<Scope>,
    stack: Vec<ScopeId>,
    counters: FxHashMap<&'static str, usize>,
    function: Option<ScopeId>,
    entered: usize,
    exited: usize,
}

impl Scopes {
    pub fn new() -> Self {
        let global = Scope {
            id: ScopeId::GLOBAL,
            parent: None,
            kind: ScopeKind::Global,
            disambiguator: 1,
        };
        Scopes {
            arena: vec![global],
            stack: vec![ScopeId::GLOBAL],
            counters: FxHashMap::default(),
            function: None,
            entered: 0,
            exited: 0,
        }
    }

    /// Open a scope of `kind` on top of the stack and return its id.
    pub fn enter(&mut self, kind: ScopeKind) -> ScopeId {
        let is_function = kind == ScopeKind::Function;
        let id = match self.function {
            Some(shared) if is_function => shared,
            _ => {
                let id = self.allocate(kind);
                if is_function {
                    self.function = Some(id);
                }
                id
            }
        };
        self.stack.push(id);
        self.entered += 1;
        id
    }

    fn allocate(&mut self, kind: ScopeKind) -> ScopeId {
        let parent = Some(self.current());
        let counter = self.counters.entry(kind.label()).or_insert(0);
        *counter += 1;
        let id = ScopeId(self.arena.len());
        self.arena.push(Scope {
            id,
            parent,
            kind,
            disambiguator: *counter,
        });
        id
    }

    /// Close the innermost scope. `global` is never popped.
    pub fn exit(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
            self.exited += 1;
        }
    }

    pub fn current(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(ScopeId::GLOBAL)
    }

    /// Open scopes, outermost first.
    pub fn open(&self) -> &[ScopeId] {
        &self.stack
    }

    pub fn is_open(&self, id: ScopeId) -> bool {
        self.stack.contains(&id)
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.arena.get(id.0)
    }

    /// Display name of `id`, or `?` for an unknown id.
    pub fn name(&self, id: ScopeId) -> String {
        self.get(id).map_or_else(|| "?".to_string(), ToString::to_string)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn entered(&self) -> usize {
        self.entered
    }

    pub fn exited(&self) -> usize {
        self.exited
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.arena.iter()
    }
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_is_never_popped() {
        let mut scopes = Scopes::new();
        scopes.exit();
        scopes.exit();
        assert_eq!(scopes.depth(), 1);
        assert_eq!(scopes.current(), ScopeId::GLOBAL);
        assert_eq!(scopes.exited(), 0);
    }

    #[test]
    fn test_scopes_get_unique_names() {
        let mut scopes = Scopes::new();
        let first = scopes.enter(ScopeKind::If);
        scopes.exit();
        let second = scopes.enter(ScopeKind::If);
        let nested = scopes.enter(ScopeKind::While);

        assert_ne!(first, second);
        assert_eq!(scopes.name(first), "if#1");
        assert_eq!(scopes.name(second), "if#2");
        assert_eq!(scopes.name(nested), "while#1");
        assert_eq!(scopes.get(nested).and_then(|s| s.parent), Some(second));
        assert_eq!(scopes.depth(), 3);
    }

    #[test]
    fn test_function_scope_is_shared() {
        let mut scopes = Scopes::new();
        let a = scopes.enter(ScopeKind::Function);
        scopes.exit();
        let b = scopes.enter(ScopeKind::Function);
        assert_eq!(a, b);
        assert_eq!(scopes.name(a), "function");
        assert_eq!(scopes.entered(), 2);
        assert_eq!(scopes.exited(), 1);
    }

    #[test]
    fn test_method_scope_name() {
        let mut scopes = Scopes::new();
        scopes.enter(ScopeKind::Function);
        let m = scopes.enter(ScopeKind::Method {
            name: "sum".to_string(),
            return_type: Type::Int,
            params: vec![Type::Int, Type::Float],
        });
        assert_eq!(scopes.name(m), "sum@int(int,float)");
        assert!(scopes.is_open(m));
        scopes.exit();
        assert!(!scopes.is_open(m));
    }
}
