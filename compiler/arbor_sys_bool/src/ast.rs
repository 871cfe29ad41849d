//! Boolean nodes and their kinds.

use arbor_ir::{ExprId, ExprNode, Kind, TypeId, TypeNode};

use crate::FEATURE_ID;

/// Kind of the `bool` type.
pub const BOOL_TYPE_KIND: Kind = Kind::in_block(FEATURE_ID, 0);
/// Kind of boolean literals.
pub const BOOL_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 1);
/// Kind of `e1 & e2`.
pub const AND_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 2);
/// Kind of `e1 | e2`.
pub const OR_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 3);
/// Kind of `!e`.
pub const NOT_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 4);

/// The type `bool`. Canonical: one node per module, so id equality is type
/// equality.
pub struct BoolType;

impl TypeNode for BoolType {
    fn kind(&self) -> Kind {
        BOOL_TYPE_KIND
    }
}

/// A boolean literal, `true` or `false`.
pub struct BoolExpr {
    pub ty: TypeId,
    pub value: bool,
}

impl ExprNode for BoolExpr {
    fn kind(&self) -> Kind {
        BOOL_EXPR_KIND
    }
    fn ty(&self) -> TypeId {
        self.ty
    }
}

macro_rules! binary_bool_expr {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
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
    };
}

binary_bool_expr! {
    /// The expression `e1 & e2`. Strict: both operands are evaluated.
    AndExpr, AND_EXPR_KIND
}

binary_bool_expr! {
    /// The expression `e1 | e2`. Strict: both operands are evaluated.
    OrExpr, OR_EXPR_KIND
}

/// The expression `!e`.
pub struct NotExpr {
    pub ty: TypeId,
    pub operand: ExprId,
}

impl ExprNode for NotExpr {
    fn kind(&self) -> Kind {
        NOT_EXPR_KIND
    }
    fn ty(&self) -> TypeId {
        self.ty
    }
}
