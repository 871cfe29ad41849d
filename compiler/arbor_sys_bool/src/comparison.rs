//! Structural equality and hashing of boolean nodes.

use arbor_cmp::{equivalent_exprs, hash_expr, EqOps, HashOps, NodeHasher};
use arbor_ir::{ExprId, TypeId};
use arbor_lang::{Language, Module};

use crate::ast::{AndExpr, BoolExpr, BoolType, NotExpr, OrExpr};

pub(crate) struct EqAlgo;

impl EqOps for EqAlgo {
    fn eq_type(&self, _lang: &Language, m: &Module, a: TypeId, b: TypeId) -> bool {
        // There is only one boolean type; same-kind operands are equal.
        let _ = m.type_node(a).cast_ref::<BoolType>();
        let _ = m.type_node(b).cast_ref::<BoolType>();
        true
    }

    fn eq_expr(&self, lang: &Language, m: &Module, a: ExprId, b: ExprId) -> bool {
        let left = m.expr_node(a);
        let right = m.expr_node(b);
        if let (Some(x), Some(y)) = (left.downcast_ref::<BoolExpr>(), right.downcast_ref::<BoolExpr>()) {
            x.value == y.value
        } else if let (Some(x), Some(y)) = (left.downcast_ref::<AndExpr>(), right.downcast_ref::<AndExpr>()) {
            equivalent_exprs(lang, m, x.lhs, y.lhs) && equivalent_exprs(lang, m, x.rhs, y.rhs)
        } else if let (Some(x), Some(y)) = (left.downcast_ref::<OrExpr>(), right.downcast_ref::<OrExpr>()) {
            equivalent_exprs(lang, m, x.lhs, y.lhs) && equivalent_exprs(lang, m, x.rhs, y.rhs)
        } else if let (Some(x), Some(y)) = (left.downcast_ref::<NotExpr>(), right.downcast_ref::<NotExpr>()) {
            equivalent_exprs(lang, m, x.operand, y.operand)
        } else {
            panic!("unexpected boolean expression {:?}", left.kind());
        }
    }
}

pub(crate) struct HashAlgo;

impl HashOps for HashAlgo {
    fn hash_type(&self, _h: &mut NodeHasher, _lang: &Language, m: &Module, id: TypeId) {
        // The kind is already mixed and `bool` carries no parameters.
        let _ = m.type_node(id).cast_ref::<BoolType>();
    }

    fn hash_expr(&self, h: &mut NodeHasher, lang: &Language, m: &Module, id: ExprId) {
        let node = m.expr_node(id);
        if let Some(lit) = node.downcast_ref::<BoolExpr>() {
            h.mix_bool(lit.value);
        } else if let Some(and) = node.downcast_ref::<AndExpr>() {
            hash_expr(h, lang, m, and.lhs);
            hash_expr(h, lang, m, and.rhs);
        } else if let Some(or) = node.downcast_ref::<OrExpr>() {
            hash_expr(h, lang, m, or.lhs);
            hash_expr(h, lang, m, or.rhs);
        } else if let Some(not) = node.downcast_ref::<NotExpr>() {
            hash_expr(h, lang, m, not.operand);
        } else {
            panic!("unexpected boolean expression {:?}", node.kind());
        }
    }
}
