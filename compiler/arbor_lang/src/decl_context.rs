//! Declaration contexts: scoped per-declaration annotations.
//!
//! Mirrors scope semantics, but for auxiliary per-node values (a generated
//! value cache, an elaboration mark) rather than for name binding: entries
//! recorded while a context is active are all erased when that context is
//! left. The code generator brackets functions and whole modules with these
//! contexts.

use arbor_ir::DeclId;
use rustc_hash::FxHashMap;

/// Stack of declaration contexts, each recording the declarations annotated
/// while it was active.
pub struct DeclContexts<V> {
    values: FxHashMap<DeclId, V>,
    stack: Vec<Vec<DeclId>>,
}

impl<V: PartialEq + std::fmt::Debug> DeclContexts<V> {
    /// Create with no active context.
    pub fn new() -> Self {
        DeclContexts {
            values: FxHashMap::default(),
            stack: Vec::new(),
        }
    }

    /// Enter a new declaration context.
    pub fn enter(&mut self) {
        self.stack.push(Vec::new());
    }

    /// Leave the current context, erasing every annotation recorded while it
    /// was active.
    ///
    /// # Panics
    /// Panics when leaving more contexts than were entered.
    pub fn leave(&mut self) {
        let recorded = match self.stack.pop() {
            Some(recorded) => recorded,
            None => panic!("left more declaration contexts than entered"),
        };
        for decl in recorded {
            self.values.remove(&decl);
        }
    }

    /// Number of active contexts.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Record `value` for `decl` in the active context.
    ///
    /// A declaration may be recorded more than once, but always to the same
    /// value; the entry is erased when the context it was *first* recorded
    /// in is left.
    ///
    /// # Panics
    /// Panics if no context is active, or on re-registration to a different
    /// value.
    pub fn put(&mut self, decl: DeclId, value: V) {
        assert!(
            !self.stack.is_empty(),
            "annotation recorded outside any declaration context"
        );
        if let Some(existing) = self.values.get(&decl) {
            assert!(
                *existing == value,
                "declaration {decl:?} re-registered to a different value \
                 ({existing:?} vs {value:?})"
            );
            return;
        }
        self.values.insert(decl, value);
        if let Some(current) = self.stack.last_mut() {
            current.push(decl);
        }
    }

    /// The value recorded for `decl`.
    ///
    /// # Panics
    /// Panics if the declaration has no recorded value. Referencing a
    /// declaration before its value is materialized violates the
    /// required-predecessor ordering the host driver enforces; the kernel
    /// does not generate out of order.
    #[track_caller]
    pub fn get(&self, decl: DeclId) -> &V {
        match self.values.get(&decl) {
            Some(value) => value,
            None => panic!("declaration {decl:?} referenced before its value was materialized"),
        }
    }

    /// The value recorded for `decl`, if any.
    pub fn try_get(&self, decl: DeclId) -> Option<&V> {
        self.values.get(&decl)
    }

    /// `true` if `decl` has a recorded value.
    pub fn seen(&self, decl: DeclId) -> bool {
        self.values.contains_key(&decl)
    }
}

impl<V: PartialEq + std::fmt::Debug> Default for DeclContexts<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn leaving_a_context_erases_its_entries() {
        let mut cx = DeclContexts::new();
        let outer = DeclId::new(0);
        let inner = DeclId::new(1);

        cx.enter();
        cx.put(outer, 10);
        cx.enter();
        cx.put(inner, 20);
        assert_eq!(*cx.get(outer), 10);
        assert_eq!(*cx.get(inner), 20);

        cx.leave();
        assert!(cx.seen(outer));
        assert!(!cx.seen(inner));

        cx.leave();
        assert!(!cx.seen(outer));
        assert_eq!(cx.depth(), 0);
    }

    #[test]
    fn re_registration_to_same_value_is_permitted() {
        let mut cx = DeclContexts::new();
        let d = DeclId::new(0);
        cx.enter();
        cx.put(d, 5);
        cx.put(d, 5);
        cx.leave();
    }

    #[test]
    #[should_panic(expected = "different value")]
    fn re_registration_to_different_value_panics() {
        let mut cx = DeclContexts::new();
        let d = DeclId::new(0);
        cx.enter();
        cx.put(d, 5);
        cx.put(d, 6);
    }

    #[test]
    #[should_panic(expected = "before its value was materialized")]
    fn get_before_put_panics() {
        let cx: DeclContexts<i64> = DeclContexts::new();
        let _ = cx.get(DeclId::new(3));
    }

    #[test]
    #[should_panic(expected = "more declaration contexts")]
    fn unbalanced_leave_panics() {
        let mut cx: DeclContexts<i64> = DeclContexts::new();
        cx.leave();
    }
}
