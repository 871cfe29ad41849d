//! Compile-time constant evaluation: the `Evaluate` algorithm family.
//!
//! Evaluation is the one kernel boundary where failure is *recoverable*: a
//! division by zero during constant folding is represented as an
//! [`EvalError`] value the caller may catch and suppress, falling back to
//! runtime code generation instead of aborting the compilation. Missing
//! algorithm registrations, by contrast, remain fatal - they are linkage
//! bugs, not input errors.

mod error;
mod value;

use arbor_ir::{DeclId, ExprId, StmtId};
use arbor_lang::{AlgorithmFamily, Language, Module};
use rustc_hash::FxHashMap;
use tracing::trace;

pub use error::{EvalError, EvalResult};
pub use value::Value;

/// Family tag for constant evaluation.
pub struct Evaluate;

impl AlgorithmFamily for Evaluate {
    type Dispatch = dyn EvalOps;
    const NAME: &'static str = "evaluate";
}

/// Evaluation context: the values declarations have been elaborated to.
pub struct Evaluator {
    decl_values: FxHashMap<DeclId, Value>,
}

impl Evaluator {
    /// Create an evaluator with no elaborated declarations.
    pub fn new() -> Self {
        Evaluator {
            decl_values: FxHashMap::default(),
        }
    }

    /// Record the value a declaration elaborated to.
    pub fn bind_decl(&mut self, decl: DeclId, value: Value) {
        trace!(?decl, ?value, "bind declaration value");
        self.decl_values.insert(decl, value);
    }

    /// The value a declaration elaborated to.
    ///
    /// An unelaborated declaration is a recoverable condition: constant
    /// folding of an expression referencing it simply fails, and the caller
    /// falls back to runtime evaluation.
    pub fn decl_value(&self, decl: DeclId) -> EvalResult {
        match self.decl_values.get(&decl) {
            Some(value) => Ok(*value),
            None => Err(EvalError::UnboundDecl { decl }),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-feature evaluation implementations.
pub trait EvalOps {
    /// Evaluate an expression to a value.
    fn eval_expr(&self, _ev: &mut Evaluator, _lang: &Language, m: &Module, id: ExprId) -> EvalResult {
        panic!(
            "evaluation algorithm not defined for expression node {:?}",
            m.expr_node(id).kind()
        );
    }

    /// Elaborate a declaration, returning its value.
    fn eval_decl(&self, _ev: &mut Evaluator, _lang: &Language, m: &Module, id: DeclId) -> EvalResult {
        panic!(
            "evaluation algorithm not defined for declaration node {:?}",
            m.decl_node(id).kind()
        );
    }

    /// Evaluate a statement.
    fn eval_stmt(&self, _ev: &mut Evaluator, _lang: &Language, m: &Module, id: StmtId) -> EvalResult {
        panic!(
            "evaluation algorithm not defined for statement node {:?}",
            m.stmt_node(id).kind()
        );
    }
}

// Deeply nested constant expressions recurse through dispatch; grow the
// stack rather than overflow it.
#[cfg(not(target_arch = "wasm32"))]
fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    const RED_ZONE: usize = 64 * 1024;
    const STACK_PER_RECURSION: usize = 1024 * 1024;
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[cfg(target_arch = "wasm32")]
fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Evaluate an expression through the owning feature.
pub fn evaluate_expr(ev: &mut Evaluator, lang: &Language, m: &Module, id: ExprId) -> EvalResult {
    with_stack(|| {
        let kind = m.expr_node(id).kind();
        lang.feature_of(kind).algorithm::<Evaluate>().eval_expr(ev, lang, m, id)
    })
}

/// Elaborate a declaration through the owning feature.
pub fn evaluate_decl(ev: &mut Evaluator, lang: &Language, m: &Module, id: DeclId) -> EvalResult {
    with_stack(|| {
        let kind = m.decl_node(id).kind();
        lang.feature_of(kind).algorithm::<Evaluate>().eval_decl(ev, lang, m, id)
    })
}

/// Evaluate a statement through the owning feature.
pub fn evaluate_stmt(ev: &mut Evaluator, lang: &Language, m: &Module, id: StmtId) -> EvalResult {
    with_stack(|| {
        let kind = m.stmt_node(id).kind();
        lang.feature_of(kind).algorithm::<Evaluate>().eval_stmt(ev, lang, m, id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unbound_declaration_is_a_recoverable_error() {
        let ev = Evaluator::new();
        let missing = DeclId::new(0);
        assert_eq!(ev.decl_value(missing), Err(EvalError::UnboundDecl { decl: missing }));
    }

    #[test]
    fn bound_declaration_value_round_trips() {
        let mut ev = Evaluator::new();
        let d = DeclId::new(0);
        ev.bind_decl(d, Value::Int(9));
        assert_eq!(ev.decl_value(d), Ok(Value::Int(9)));
    }
}
