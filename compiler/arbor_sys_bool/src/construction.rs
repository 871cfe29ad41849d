//! Builder for boolean nodes.

use arbor_canon::CanonicalSet;
use arbor_ir::{ExprId, FeatureId, TypeId};
use arbor_lang::{BuilderFor, FeatureBuilder, Module};

use crate::ast::{AndExpr, BoolExpr, BoolType, NotExpr, OrExpr, BOOL_TYPE_KIND};
use crate::FEATURE_ID;

/// Returns true when `t` is the boolean type.
pub fn is_boolean_type(m: &Module, t: TypeId) -> bool {
    m.type_node(t).kind() == BOOL_TYPE_KIND
}

/// Returns true when `e` has boolean type.
pub fn is_boolean_expr(m: &Module, e: ExprId) -> bool {
    is_boolean_type(m, m.expr_node(e).ty())
}

/// Constructs this feature's nodes; owns the canonical set for `bool`.
pub struct Builder {
    bool_ty: CanonicalSet<()>,
}

impl FeatureBuilder for Builder {
    fn feature_id(&self) -> FeatureId {
        FEATURE_ID
    }
}

impl BuilderFor for Builder {
    const FEATURE: FeatureId = FEATURE_ID;
}

impl Builder {
    pub(crate) fn new() -> Self {
        Builder {
            bool_ty: CanonicalSet::new(),
        }
    }

    /// The canonical type `bool`.
    pub fn bool_type(&mut self, m: &mut Module) -> TypeId {
        self.bool_ty.get(m, (), |_| BoolType)
    }

    /// The literal `value`.
    pub fn bool_expr(&mut self, m: &mut Module, value: bool) -> ExprId {
        let ty = self.bool_type(m);
        m.alloc_expr(BoolExpr { ty, value })
    }

    /// The literal `true`.
    pub fn true_expr(&mut self, m: &mut Module) -> ExprId {
        self.bool_expr(m, true)
    }

    /// The literal `false`.
    pub fn false_expr(&mut self, m: &mut Module) -> ExprId {
        self.bool_expr(m, false)
    }

    /// The expression `lhs & rhs`. Both operands shall have type `bool`.
    pub fn and_expr(&mut self, m: &mut Module, lhs: ExprId, rhs: ExprId) -> ExprId {
        assert!(is_boolean_expr(m, lhs) && is_boolean_expr(m, rhs));
        let ty = self.bool_type(m);
        m.alloc_expr(AndExpr { ty, lhs, rhs })
    }

    /// The expression `lhs | rhs`. Both operands shall have type `bool`.
    pub fn or_expr(&mut self, m: &mut Module, lhs: ExprId, rhs: ExprId) -> ExprId {
        assert!(is_boolean_expr(m, lhs) && is_boolean_expr(m, rhs));
        let ty = self.bool_type(m);
        m.alloc_expr(OrExpr { ty, lhs, rhs })
    }

    /// The expression `!operand`. The operand shall have type `bool`.
    pub fn not_expr(&mut self, m: &mut Module, operand: ExprId) -> ExprId {
        assert!(is_boolean_expr(m, operand));
        let ty = self.bool_type(m);
        m.alloc_expr(NotExpr { ty, operand })
    }
}
