//! Builder for variable nodes.

use arbor_cmp::equivalent_types;
use arbor_ir::{DeclId, ExprId, FeatureId, NameId, Symbol, TypeId};
use arbor_lang::{BuilderFor, FeatureBuilder, Language, Module};

use crate::ast::{BasicName, RefExpr, VarDecl};
use crate::FEATURE_ID;

/// Constructs this feature's nodes. Stateless: names are not uniqued and
/// declarations are never canonical.
pub struct Builder {
    _private: (),
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
        Builder { _private: () }
    }

    /// A name spelling the interned symbol `sym`.
    pub fn basic_name(&mut self, m: &mut Module, sym: Symbol) -> NameId {
        m.alloc_name(BasicName { sym })
    }

    /// The declaration `var name : ty = init`. The initializer shall have
    /// the declared type.
    pub fn var_decl(
        &mut self,
        lang: &Language,
        m: &mut Module,
        name: NameId,
        ty: TypeId,
        init: ExprId,
    ) -> DeclId {
        assert!(
            equivalent_types(lang, m, ty, m.expr_node(init).ty()),
            "variable initializer type differs from the declared type"
        );
        m.alloc_decl(VarDecl { name, ty, init })
    }

    /// The use of `decl` as a value; the expression takes the declaration's
    /// type.
    pub fn ref_expr(&mut self, m: &mut Module, decl: DeclId) -> ExprId {
        let ty = m.decl_node(decl).cast_ref::<VarDecl>().ty;
        m.alloc_expr(RefExpr { ty, decl })
    }
}
