//! Lexical environment: a stack of scopes with per-name binding stacks.
//!
//! Shadowing is modeled as a stack per name rather than a flat map that is
//! overwritten and manually restored: nested scope exit must restore prior
//! bindings in the correct order even under early exits, and the stack
//! discipline makes that automatic regardless of how the surrounding
//! algorithm terminates.
//!
//! Scope enter/leave must balance; leaving more scopes than were entered is
//! a fatal invariant violation, as is binding a declaration that has no
//! spellable name.

use std::fmt;

use arbor_ir::{DeclId, Symbol};
use arbor_lang::Module;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

/// Discriminates scope flavors for feature-specific policy.
///
/// Open, not a closed enum: features may define their own flavors beyond
/// the common ones below.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ScopeKind(u32);

impl ScopeKind {
    /// An ordinary braced block.
    pub const BLOCK: ScopeKind = ScopeKind(0);
    /// A function body (parameters land here).
    pub const FUNCTION: ScopeKind = ScopeKind(1);
    /// A namespace or module scope.
    pub const NAMESPACE: ScopeKind = ScopeKind(2);

    /// Create a feature-defined scope kind.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        ScopeKind(raw)
    }

    /// Raw numeric value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ScopeKind::BLOCK => write!(f, "ScopeKind::BLOCK"),
            ScopeKind::FUNCTION => write!(f, "ScopeKind::FUNCTION"),
            ScopeKind::NAMESPACE => write!(f, "ScopeKind::NAMESPACE"),
            ScopeKind(raw) => write!(f, "ScopeKind({raw})"),
        }
    }
}

/// Identifies a scope on the active stack (its depth index).
///
/// Valid only while the scope is on the stack; refs to left scopes are
/// rejected by the operations that take one.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ScopeRef(u32);

impl ScopeRef {
    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ScopeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeRef({})", self.0)
    }
}

/// An association of a name to a declaration within a specific scope.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Binding {
    /// The scope the binding was made against.
    pub scope: ScopeRef,
    /// The bound declaration.
    pub decl: DeclId,
}

/// One region of declared names.
struct Scope {
    kind: ScopeKind,
    /// Enclosing scope; `None` for the outermost.
    parent: Option<ScopeRef>,
    /// Declarations bound against this scope, in binding order. These are
    /// exactly the bindings unwound when the scope is left.
    entries: Vec<(Symbol, DeclId)>,
}

/// The stack of scopes plus per-name binding stacks.
pub struct LexicalEnvironment {
    /// Innermost scope last; owned in push order.
    scopes: Vec<Scope>,
    /// Name to its binding stack, most-recent (innermost) last.
    bindings: FxHashMap<Symbol, SmallVec<[Binding; 2]>>,
}

impl LexicalEnvironment {
    /// Create an environment with no scopes.
    pub fn new() -> Self {
        LexicalEnvironment {
            scopes: Vec::new(),
            bindings: FxHashMap::default(),
        }
    }

    /// Push a new scope whose parent is the current top.
    pub fn enter_scope(&mut self, kind: ScopeKind) -> ScopeRef {
        let parent = self.try_current_scope();
        let sref = ScopeRef(
            u32::try_from(self.scopes.len())
                .unwrap_or_else(|_| panic!("scope stack exceeded u32::MAX depth")),
        );
        trace!(?sref, ?kind, "enter scope");
        self.scopes.push(Scope {
            kind,
            parent,
            entries: Vec::new(),
        });
        sref
    }

    /// Pop the current scope, unbinding exactly the names bound against it
    /// (restoring whatever they shadowed) in reverse binding order.
    ///
    /// # Panics
    /// Panics when leaving more scopes than were entered.
    pub fn leave_scope(&mut self) {
        let sref = match self.try_current_scope() {
            Some(sref) => sref,
            None => panic!("left more scopes than entered"),
        };
        let scope = match self.scopes.pop() {
            Some(scope) => scope,
            None => panic!("left more scopes than entered"),
        };
        trace!(?sref, "leave scope");
        for &(symbol, decl) in scope.entries.iter().rev() {
            self.unbind(symbol, sref, decl);
        }
    }

    /// The innermost scope, if any.
    pub fn try_current_scope(&self) -> Option<ScopeRef> {
        if self.scopes.is_empty() {
            None
        } else {
            Some(ScopeRef((self.scopes.len() - 1) as u32))
        }
    }

    /// The innermost scope.
    ///
    /// # Panics
    /// Panics when no scope has been entered.
    pub fn current_scope(&self) -> ScopeRef {
        match self.try_current_scope() {
            Some(sref) => sref,
            None => panic!("no scope entered"),
        }
    }

    /// Number of scopes on the stack.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// The kind of a scope on the stack.
    pub fn scope_kind(&self, scope: ScopeRef) -> ScopeKind {
        self.live_scope(scope).kind
    }

    /// The parent of a scope on the stack.
    pub fn parent(&self, scope: ScopeRef) -> Option<ScopeRef> {
        self.live_scope(scope).parent
    }

    /// Bind `decl`'s name to `decl` in the current scope.
    ///
    /// # Panics
    /// Panics when no scope has been entered, or when the declaration has no
    /// spellable name.
    pub fn add(&mut self, module: &Module, decl: DeclId) {
        let current = self.current_scope();
        self.add_in(current, module, decl);
    }

    /// Bind `decl`'s name against an explicitly given scope.
    ///
    /// Used when a declaration logically belongs to an enclosing scope, e.g.
    /// parameters hoisted into a function scope while the body block is
    /// current. The binding is recorded in *that* scope's entry list, so it
    /// is unwound when the owning scope leaves.
    pub fn add_in(&mut self, scope: ScopeRef, module: &Module, decl: DeclId) {
        let symbol = decl_symbol(module, decl);
        trace!(?scope, ?symbol, ?decl, "bind");
        self.live_scope_mut(scope).entries.push((symbol, decl));
        self.bindings
            .entry(symbol)
            .or_default()
            .push(Binding { scope, decl });
    }

    /// The innermost binding for `name`, or `None` if unbound.
    pub fn lookup(&self, name: Symbol) -> Option<Binding> {
        self.bindings.get(&name).and_then(|stack| stack.last()).copied()
    }

    /// The full binding stack for `name`, outermost first.
    pub fn bindings_of(&self, name: Symbol) -> &[Binding] {
        self.bindings.get(&name).map_or(&[], |stack| stack.as_slice())
    }

    /// Explicitly remove the innermost binding for `name`, outside the
    /// normal scope-exit path. Used for synthetic bindings with manual
    /// lifetimes.
    ///
    /// # Panics
    /// Panics when `name` is unbound.
    pub fn remove_name(&mut self, name: Symbol) {
        let binding = match self.lookup(name) {
            Some(binding) => binding,
            None => panic!("removed unbound name {name:?}"),
        };
        self.unbind(name, binding.scope, binding.decl);
        self.drop_entry(binding.scope, name, binding.decl);
    }

    /// Explicitly remove the binding of `decl`, outside the normal
    /// scope-exit path.
    ///
    /// # Panics
    /// Panics when `decl` is not bound.
    pub fn remove_decl(&mut self, module: &Module, decl: DeclId) {
        let symbol = decl_symbol(module, decl);
        let stack = match self.bindings.get(&symbol) {
            Some(stack) => stack,
            None => panic!("removed unbound declaration {decl:?}"),
        };
        let binding = match stack.iter().rev().find(|b| b.decl == decl) {
            Some(&binding) => binding,
            None => panic!("removed unbound declaration {decl:?}"),
        };
        self.unbind(symbol, binding.scope, binding.decl);
        self.drop_entry(binding.scope, symbol, decl);
    }

    fn live_scope(&self, scope: ScopeRef) -> &Scope {
        assert!(
            scope.index() < self.scopes.len(),
            "scope {scope:?} is not on the stack"
        );
        &self.scopes[scope.index()]
    }

    fn live_scope_mut(&mut self, scope: ScopeRef) -> &mut Scope {
        assert!(
            scope.index() < self.scopes.len(),
            "scope {scope:?} is not on the stack"
        );
        &mut self.scopes[scope.index()]
    }

    /// Pop the binding (scope, decl) from `symbol`'s stack. The entry is the
    /// top in the common case; hoisted bindings may sit below later inner
    /// bindings, so search from the top.
    fn unbind(&mut self, symbol: Symbol, scope: ScopeRef, decl: DeclId) {
        let stack = match self.bindings.get_mut(&symbol) {
            Some(stack) => stack,
            None => panic!("binding stack missing for {symbol:?}"),
        };
        let idx = match stack.iter().rposition(|b| b.scope == scope && b.decl == decl) {
            Some(idx) => idx,
            None => panic!("binding for {symbol:?} in {scope:?} vanished out of order"),
        };
        stack.remove(idx);
        if stack.is_empty() {
            self.bindings.remove(&symbol);
        }
    }

    /// Remove the bookkeeping entry from the owning scope's list, so a later
    /// `leave_scope` does not unwind an explicitly removed binding.
    fn drop_entry(&mut self, scope: ScopeRef, symbol: Symbol, decl: DeclId) {
        let entries = &mut self.live_scope_mut(scope).entries;
        if let Some(idx) = entries.iter().rposition(|&e| e == (symbol, decl)) {
            entries.remove(idx);
        }
    }
}

impl Default for LexicalEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LexicalEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexicalEnvironment")
            .field("depth", &self.scopes.len())
            .field("bound_names", &self.bindings.len())
            .finish()
    }
}

/// The spellable name a declaration binds under.
fn decl_symbol(module: &Module, decl: DeclId) -> Symbol {
    let node = module.decl_node(decl);
    let name_id = match node.name() {
        Some(name_id) => name_id,
        None => panic!("unnamed declaration {decl:?} cannot be bound"),
    };
    match module.name_node(name_id).symbol() {
        Some(symbol) => symbol,
        None => panic!("declaration {decl:?} has a name with no direct spelling"),
    }
}

#[cfg(test)]
mod tests;
