//! Builder for integer nodes.

use arbor_canon::CanonicalSet;
use arbor_ir::{ExprId, FeatureId, TypeId};
use arbor_lang::{BuilderFor, FeatureBuilder, Language, Module};

use crate::ast::{
    AddExpr, DivExpr, EqExpr, GeExpr, GtExpr, IntExpr, IntType, LeExpr, LtExpr, MulExpr, NatType,
    NeExpr, NegExpr, RemExpr, SubExpr, INT_TYPE_KIND, NAT_TYPE_KIND,
};
use crate::FEATURE_ID;

/// Returns true when `t` is an integral (nat or int) type.
pub fn is_integral_type(m: &Module, t: TypeId) -> bool {
    let kind = m.type_node(t).kind();
    kind == NAT_TYPE_KIND || kind == INT_TYPE_KIND
}

/// Returns true when `e` has integral type.
pub fn is_integral_expr(m: &Module, e: ExprId) -> bool {
    is_integral_type(m, m.expr_node(e).ty())
}

/// Returns true when `p` is an accepted precision.
fn check_precision(p: u32) -> bool {
    matches!(p, 8 | 16 | 32 | 64)
}

/// Constructs this feature's nodes; owns the canonical sets for `natP` and
/// `intP`.
pub struct Builder {
    nat_tys: CanonicalSet<u32>,
    int_tys: CanonicalSet<u32>,
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
            nat_tys: CanonicalSet::new(),
            int_tys: CanonicalSet::new(),
        }
    }

    /// The canonical type `natP` with `p` bits of precision.
    ///
    /// Requesting a precision outside {8, 16, 32, 64} is a caller contract
    /// violation and fails fast.
    pub fn nat_type(&mut self, m: &mut Module, p: u32) -> TypeId {
        assert!(check_precision(p), "unsupported nat precision {p}");
        self.nat_tys.get(m, p, |&precision| NatType { precision })
    }

    /// The canonical type `intP` with `p` bits of precision.
    ///
    /// Requesting a precision outside {8, 16, 32, 64} is a caller contract
    /// violation and fails fast.
    pub fn int_type(&mut self, m: &mut Module, p: u32) -> TypeId {
        assert!(check_precision(p), "unsupported int precision {p}");
        self.int_tys.get(m, p, |&precision| IntType { precision })
    }

    /// The literal `value` with integral type `ty`.
    pub fn int_expr(&mut self, m: &mut Module, ty: TypeId, value: i64) -> ExprId {
        assert!(is_integral_type(m, ty));
        m.alloc_expr(IntExpr { ty, value })
    }

    /// The expression `-operand`, of type `ty`.
    pub fn neg_expr(&mut self, m: &mut Module, ty: TypeId, operand: ExprId) -> ExprId {
        self.check_arith_operand(m, ty, operand);
        m.alloc_expr(NegExpr { ty, operand })
    }

    // Integral types are canonical, so operand/result type agreement is an
    // id comparison.
    fn check_arith_operand(&self, m: &Module, ty: TypeId, e: ExprId) {
        assert!(is_integral_type(m, ty));
        assert!(
            m.expr_node(e).ty() == ty,
            "arithmetic operand type differs from the result type"
        );
    }

    fn check_cmp_operands(&self, m: &Module, lhs: ExprId, rhs: ExprId) {
        assert!(is_integral_expr(m, lhs));
        assert!(
            m.expr_node(lhs).ty() == m.expr_node(rhs).ty(),
            "comparison operands have different types"
        );
    }

    /// The type `bool`, through the boolean feature's builder.
    fn bool_type(&self, lang: &Language, m: &mut Module) -> TypeId {
        m.with_builder::<arbor_sys_bool::Builder, _>(lang, |b, m| b.bool_type(m))
    }
}

macro_rules! arith_makers {
    ($($(#[$meta:meta])* $fn_name:ident => $node:ident;)*) => {
        impl Builder {
            $(
                $(#[$meta])*
                pub fn $fn_name(
                    &mut self,
                    m: &mut Module,
                    ty: TypeId,
                    lhs: ExprId,
                    rhs: ExprId,
                ) -> ExprId {
                    self.check_arith_operand(m, ty, lhs);
                    self.check_arith_operand(m, ty, rhs);
                    m.alloc_expr($node { ty, lhs, rhs })
                }
            )*
        }
    };
}

arith_makers! {
    /// The expression `lhs + rhs` of type `ty`.
    add_expr => AddExpr;
    /// The expression `lhs - rhs` of type `ty`.
    sub_expr => SubExpr;
    /// The expression `lhs * rhs` of type `ty`.
    mul_expr => MulExpr;
    /// The expression `lhs / rhs` of type `ty`.
    div_expr => DivExpr;
    /// The expression `lhs % rhs` of type `ty`.
    rem_expr => RemExpr;
}

macro_rules! cmp_makers {
    ($($(#[$meta:meta])* $fn_name:ident => $node:ident;)*) => {
        impl Builder {
            $(
                $(#[$meta])*
                pub fn $fn_name(
                    &mut self,
                    lang: &Language,
                    m: &mut Module,
                    lhs: ExprId,
                    rhs: ExprId,
                ) -> ExprId {
                    self.check_cmp_operands(m, lhs, rhs);
                    let ty = self.bool_type(lang, m);
                    m.alloc_expr($node { ty, lhs, rhs })
                }
            )*
        }
    };
}

cmp_makers! {
    /// The expression `lhs == rhs`, of type `bool`.
    eq_expr => EqExpr;
    /// The expression `lhs != rhs`, of type `bool`.
    ne_expr => NeExpr;
    /// The expression `lhs < rhs`, of type `bool`.
    lt_expr => LtExpr;
    /// The expression `lhs > rhs`, of type `bool`.
    gt_expr => GtExpr;
    /// The expression `lhs <= rhs`, of type `bool`.
    le_expr => LeExpr;
    /// The expression `lhs >= rhs`, of type `bool`.
    ge_expr => GeExpr;
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_lang::Language;
    use pretty_assertions::assert_eq;

    fn setup() -> (Language, Module) {
        let mut lang = Language::new();
        lang.add_feature(arbor_sys_bool::feature());
        lang.add_feature(crate::feature());
        let m = Module::new(lang.intern("test"));
        (lang, m)
    }

    #[test]
    fn integral_types_are_canonical_per_precision() {
        let (lang, mut m) = setup();
        m.with_builder::<Builder, _>(&lang, |b, m| {
            let a = b.int_type(m, 32);
            let a2 = b.int_type(m, 32);
            let c = b.int_type(m, 64);
            let n = b.nat_type(m, 32);
            assert_eq!(a, a2);
            assert_ne!(a, c);
            // Same precision, different family: distinct canonical nodes.
            assert_ne!(a, n);
        });
    }

    #[test]
    #[should_panic(expected = "unsupported int precision")]
    fn out_of_domain_precision_panics() {
        let (lang, mut m) = setup();
        m.with_builder::<Builder, _>(&lang, |b, m| {
            let _ = b.int_type(m, 24);
        });
    }

    #[test]
    fn comparisons_take_the_boolean_type() {
        let (lang, mut m) = setup();
        let cmp = m.with_builder::<Builder, _>(&lang, |b, m| {
            let i32_ty = b.int_type(m, 32);
            let one = b.int_expr(m, i32_ty, 1);
            let two = b.int_expr(m, i32_ty, 2);
            b.lt_expr(&lang, m, one, two)
        });
        assert!(arbor_sys_bool::is_boolean_expr(&m, cmp));
    }
}
