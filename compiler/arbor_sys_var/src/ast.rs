//! Variable nodes and their kinds.

use arbor_ir::{DeclId, DeclNode, ExprId, ExprNode, Kind, NameId, NameNode, Symbol, TypeId};

use crate::FEATURE_ID;

/// Kind of plainly spelled names.
pub const BASIC_NAME_KIND: Kind = Kind::in_block(FEATURE_ID, 0);
/// Kind of variable declarations.
pub const VAR_DECL_KIND: Kind = Kind::in_block(FEATURE_ID, 1);
/// Kind of declaration references.
pub const REF_EXPR_KIND: Kind = Kind::in_block(FEATURE_ID, 2);

/// A name with a direct spelling: an interned symbol.
pub struct BasicName {
    pub sym: Symbol,
}

impl NameNode for BasicName {
    fn kind(&self) -> Kind {
        BASIC_NAME_KIND
    }
    fn symbol(&self) -> Option<Symbol> {
        Some(self.sym)
    }
}

/// The declaration `var name : ty = init`.
pub struct VarDecl {
    pub name: NameId,
    pub ty: TypeId,
    pub init: ExprId,
}

impl DeclNode for VarDecl {
    fn kind(&self) -> Kind {
        VAR_DECL_KIND
    }
    fn name(&self) -> Option<NameId> {
        Some(self.name)
    }
}

/// The use of a declared variable as a value.
///
/// The referenced declaration is a non-owning arena id; the expression's
/// type is the declaration's type, and its value is the declaration's value.
pub struct RefExpr {
    pub ty: TypeId,
    pub decl: DeclId,
}

impl ExprNode for RefExpr {
    fn kind(&self) -> Kind {
        REF_EXPR_KIND
    }
    fn ty(&self) -> TypeId {
        self.ty
    }
}
