//! Integer nodes and their kinds.

use arbor_ir::{ExprId, ExprNode, Kind, TypeId, TypeNode};

use crate::FEATURE_ID;

/// Kind of the natural (unsigned) types `natP`.
pub const NAT_TYPE_KIND: Kind = Kind::in_block(FEATURE_ID, 0);
/// Kind of the signed types `intP`.
pub const INT_TYPE_KIND: Kind = Kind::in_block(FEATURE_ID, 1);
/// Kind of integer literals.
pub const INT_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 2);
/// Kind of `e1 + e2`.
pub const ADD_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 3);
/// Kind of `e1 - e2`.
pub const SUB_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 4);
/// Kind of `e1 * e2`.
pub const MUL_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 5);
/// Kind of `e1 / e2`.
pub const DIV_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 6);
/// Kind of `e1 % e2`.
pub const REM_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 7);
/// Kind of `-e`.
pub const NEG_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 8);
/// Kind of `e1 == e2`.
pub const EQ_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 9);
/// Kind of `e1 != e2`.
pub const NE_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 10);
/// Kind of `e1 < e2`.
pub const LT_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 11);
/// Kind of `e1 > e2`.
pub const GT_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 12);
/// Kind of `e1 <= e2`.
pub const LE_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 13);
/// Kind of `e1 >= e2`.
pub const GE_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 14);

/// The type `natP` with `precision` bits. Canonical per precision.
pub struct NatType {
    pub precision: u32,
}

impl TypeNode for NatType {
    fn kind(&self) -> Kind {
        NAT_TYPE_KIND
    }
}

/// The type `intP` with `precision` bits. Canonical per precision.
pub struct IntType {
    pub precision: u32,
}

impl TypeNode for IntType {
    fn kind(&self) -> Kind {
        INT_TYPE_KIND
    }
}

/// An integer literal with an integral type.
pub struct IntExpr {
    pub ty: TypeId,
    pub value: i64,
}

impl ExprNode for IntExpr {
    fn kind(&self) -> Kind {
        INT_EXPR_KIND
    }
    fn ty(&self) -> TypeId {
        self.ty
    }
}

macro_rules! binary_int_expr {
    ($($(#[$meta:meta])* $name:ident, $kind:expr;)*) => {
        $(
            $(#[$meta])*
            pub struct $name {
                pub ty: TypeId,
                pub lhs: ExprId,
                pub rhs: ExprId,
            }

            impl ExprNode for $name {
                fn kind(&self) -> Kind {
                    $kind
                }
                fn ty(&self) -> TypeId {
                    self.ty
                }
            }
        )*
    };
}

binary_int_expr! {
    /// The expression `e1 + e2`; operands and result share one integral type.
    AddExpr, ADD_EXPR_KIND;
    /// The expression `e1 - e2`; operands and result share one integral type.
    SubExpr, SUB_EXPR_KIND;
    /// The expression `e1 * e2`; operands and result share one integral type.
    MulExpr, MUL_EXPR_KIND;
    /// The expression `e1 / e2`; operands and result share one integral type.
    DivExpr, DIV_EXPR_KIND;
    /// The expression `e1 % e2`; operands and result share one integral type.
    RemExpr, REM_EXPR_KIND;
    /// The expression `e1 == e2`; operands integral, result `bool`.
    EqExpr, EQ_EXPR_KIND;
    /// The expression `e1 != e2`; operands integral, result `bool`.
    NeExpr, NE_EXPR_KIND;
    /// The expression `e1 < e2`; operands integral, result `bool`.
    LtExpr, LT_EXPR_KIND;
    /// The expression `e1 > e2`; operands integral, result `bool`.
    GtExpr, GT_EXPR_KIND;
    /// The expression `e1 <= e2`; operands integral, result `bool`.
    LeExpr, LE_EXPR_KIND;
    /// The expression `e1 >= e2`; operands integral, result `bool`.
    GeExpr, GE_EXPR_KIND;
}

/// The expression `-e`.
pub struct NegExpr {
    pub ty: TypeId,
    pub operand: ExprId,
}

impl ExprNode for NegExpr {
    fn kind(&self) -> Kind {
        NEG_EXPR_KIND
    }
    fn ty(&self) -> TypeId {
        self.ty
    }
}

/// The operand pair of a binary integer expression, for algorithms that
/// treat all binary forms uniformly.
pub(crate) fn binary_operands(node: &dyn ExprNode) -> Option<(ExprId, ExprId)> {
    macro_rules! try_binary {
        ($($name:ident),*) => {
            $(
                if let Some(e) = node.downcast_ref::<$name>() {
                    return Some((e.lhs, e.rhs));
                }
            )*
        };
    }
    try_binary!(
        AddExpr, SubExpr, MulExpr, DivExpr, RemExpr, EqExpr, NeExpr, LtExpr, GtExpr, LeExpr, GeExpr
    );
    None
}
