//! Structural equality and hashing of integer nodes.
//!
//! Two integral types are equal when their kinds and precisions agree; the
//! canonical fast path in the dispatcher already handled identical ids, so
//! reaching these implementations means distinct nodes of the same kind.

use arbor_cmp::{equivalent_exprs, hash_expr, EqOps, HashOps, NodeHasher};
use arbor_ir::{ExprId, TypeId};
use arbor_lang::{Language, Module};

use crate::ast::{binary_operands, IntExpr, IntType, NatType, NegExpr};

pub(crate) struct EqAlgo;

impl EqOps for EqAlgo {
    fn eq_type(&self, _lang: &Language, m: &Module, a: TypeId, b: TypeId) -> bool {
        let left = m.type_node(a);
        let right = m.type_node(b);
        if let (Some(x), Some(y)) = (left.downcast_ref::<NatType>(), right.downcast_ref::<NatType>()) {
            x.precision == y.precision
        } else if let (Some(x), Some(y)) =
            (left.downcast_ref::<IntType>(), right.downcast_ref::<IntType>())
        {
            x.precision == y.precision
        } else {
            panic!("unexpected integer type {:?}", left.kind());
        }
    }

    fn eq_expr(&self, lang: &Language, m: &Module, a: ExprId, b: ExprId) -> bool {
        let left = m.expr_node(a);
        let right = m.expr_node(b);
        if let (Some(x), Some(y)) = (left.downcast_ref::<IntExpr>(), right.downcast_ref::<IntExpr>()) {
            return x.value == y.value;
        }
        if let (Some(x), Some(y)) = (left.downcast_ref::<NegExpr>(), right.downcast_ref::<NegExpr>()) {
            return equivalent_exprs(lang, m, x.operand, y.operand);
        }
        // Same kind on both sides, established by the dispatcher.
        match (binary_operands(left), binary_operands(right)) {
            (Some((al, ar)), Some((bl, br))) => {
                equivalent_exprs(lang, m, al, bl) && equivalent_exprs(lang, m, ar, br)
            }
            _ => panic!("unexpected integer expression {:?}", left.kind()),
        }
    }
}

pub(crate) struct HashAlgo;

impl HashOps for HashAlgo {
    fn hash_type(&self, h: &mut NodeHasher, _lang: &Language, m: &Module, id: TypeId) {
        let node = m.type_node(id);
        if let Some(nat) = node.downcast_ref::<NatType>() {
            h.mix_u32(nat.precision);
        } else if let Some(int) = node.downcast_ref::<IntType>() {
            h.mix_u32(int.precision);
        } else {
            panic!("unexpected integer type {:?}", node.kind());
        }
    }

    fn hash_expr(&self, h: &mut NodeHasher, lang: &Language, m: &Module, id: ExprId) {
        let node = m.expr_node(id);
        if let Some(lit) = node.downcast_ref::<IntExpr>() {
            h.mix_i64(lit.value);
        } else if let Some(neg) = node.downcast_ref::<NegExpr>() {
            hash_expr(h, lang, m, neg.operand);
        } else if let Some((lhs, rhs)) = binary_operands(node) {
            hash_expr(h, lang, m, lhs);
            hash_expr(h, lang, m, rhs);
        } else {
            panic!("unexpected integer expression {:?}", node.kind());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Builder;
    use arbor_cmp::{equivalent_types, expr_hash, type_hash};
    use arbor_lang::{Language, Module};

    fn setup() -> (Language, Module) {
        let mut lang = Language::new();
        lang.add_feature(arbor_sys_bool::feature());
        lang.add_feature(crate::feature());
        let m = Module::new(lang.intern("test"));
        (lang, m)
    }

    #[test]
    fn type_equality_follows_kind_and_precision() {
        let (lang, mut m) = setup();
        let (i32a, i32b, i64t, n32) = m.with_builder::<Builder, _>(&lang, |b, m| {
            (
                b.int_type(m, 32),
                b.int_type(m, 32),
                b.int_type(m, 64),
                b.nat_type(m, 32),
            )
        });
        assert!(equivalent_types(&lang, &m, i32a, i32b));
        assert!(!equivalent_types(&lang, &m, i32a, i64t));
        assert!(!equivalent_types(&lang, &m, i32a, n32));
    }

    #[test]
    fn structurally_equal_exprs_hash_alike() {
        let (lang, mut m) = setup();
        let (e1, e2) = m.with_builder::<Builder, _>(&lang, |b, m| {
            let ty = b.int_type(m, 32);
            let a1 = b.int_expr(m, ty, 2);
            let b1 = b.int_expr(m, ty, 3);
            let a2 = b.int_expr(m, ty, 2);
            let b2 = b.int_expr(m, ty, 3);
            (b.add_expr(m, ty, a1, b1), b.add_expr(m, ty, a2, b2))
        });
        assert_eq!(expr_hash(&lang, &m, e1), expr_hash(&lang, &m, e2));
    }

    #[test]
    fn distinct_precisions_hash_apart() {
        let (lang, mut m) = setup();
        let (a, b) = m.with_builder::<Builder, _>(&lang, |b, m| {
            (b.int_type(m, 32), b.int_type(m, 64))
        });
        assert_ne!(type_hash(&lang, &m, a), type_hash(&lang, &m, b));
    }
}
