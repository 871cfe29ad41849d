//! Interned identifier spellings.
//!
//! The symbol table is owned by the language aggregate and shared read-only
//! across modules, so interning goes through an internal `RwLock`; spellings
//! are leaked to obtain `'static` references that outlive any lookup.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;

/// Interned identifier.
///
/// Two symbols from the same table are equal iff their spellings are equal,
/// so comparison is an integer compare.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Symbol(u32);

impl Symbol {
    /// Pre-interned empty spelling.
    pub const EMPTY: Symbol = Symbol(0);

    /// Raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

struct Interner {
    map: FxHashMap<&'static str, u32>,
    spellings: Vec<&'static str>,
}

/// Table of interned identifier spellings.
pub struct SymbolTable {
    inner: RwLock<Interner>,
}

impl SymbolTable {
    /// Create a table with the empty spelling pre-interned.
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        map.insert("", 0);
        SymbolTable {
            inner: RwLock::new(Interner {
                map,
                spellings: vec![""],
            }),
        }
    }

    /// Intern a spelling, returning its symbol.
    pub fn intern(&self, spelling: &str) -> Symbol {
        {
            let guard = self.inner.read();
            if let Some(&id) = guard.map.get(spelling) {
                return Symbol(id);
            }
        }

        let mut guard = self.inner.write();
        // Re-check: another caller may have interned between the locks.
        if let Some(&id) = guard.map.get(spelling) {
            return Symbol(id);
        }

        let leaked: &'static str = Box::leak(spelling.to_owned().into_boxed_str());
        let id = u32::try_from(guard.spellings.len())
            .unwrap_or_else(|_| panic!("symbol table exceeded u32::MAX spellings"));
        guard.spellings.push(leaked);
        guard.map.insert(leaked, id);
        Symbol(id)
    }

    /// Look up the spelling of a symbol.
    ///
    /// # Panics
    /// Panics if the symbol was not produced by this table.
    pub fn spelling(&self, sym: Symbol) -> &'static str {
        self.inner.read().spellings[sym.0 as usize]
    }

    /// Number of interned spellings.
    pub fn len(&self) -> usize {
        self.inner.read().spellings.len()
    }

    /// `true` when only the empty spelling is present.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTable").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn intern_is_idempotent() {
        let syms = SymbolTable::new();
        let a = syms.intern("x");
        let b = syms.intern("y");
        assert_eq!(a, syms.intern("x"));
        assert_ne!(a, b);
        assert_eq!(syms.spelling(a), "x");
        assert_eq!(syms.spelling(b), "y");
    }

    #[test]
    fn empty_spelling_is_pre_interned() {
        let syms = SymbolTable::new();
        assert_eq!(syms.intern(""), Symbol::EMPTY);
        assert_eq!(syms.spelling(Symbol::EMPTY), "");
    }
}
