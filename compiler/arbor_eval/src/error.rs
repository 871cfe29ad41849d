//! Recoverable evaluation errors.

use arbor_ir::DeclId;
use thiserror::Error;

use crate::Value;

/// Result of a constant-evaluation attempt.
pub type EvalResult = Result<Value, EvalError>;

/// An error raised during compile-time evaluation.
///
/// These are ordinary values, propagated with `?` and catchable by the
/// evaluator's caller: a failed folding attempt falls back to runtime code
/// generation. They never abort compilation of an otherwise-valid program.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum EvalError {
    /// Integer division or remainder with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// An arithmetic operation left the representable range.
    #[error("integer overflow in `{operation}`")]
    Overflow {
        /// The operation that overflowed.
        operation: &'static str,
    },

    /// A referenced declaration has not been elaborated to a value.
    #[error("declaration {decl:?} has no compile-time value")]
    UnboundDecl {
        /// The referenced declaration.
        decl: DeclId,
    },

    /// An operand had a different shape than the operation requires.
    #[error("expected a {expected} value, found `{found}`")]
    Shape {
        /// The shape the operation requires.
        expected: &'static str,
        /// The offending value, rendered.
        found: Value,
    },
}

impl EvalError {
    /// A shape mismatch for `found` where `expected` was required.
    pub fn shape(expected: &'static str, found: Value) -> Self {
        EvalError::Shape { expected, found }
    }
}
