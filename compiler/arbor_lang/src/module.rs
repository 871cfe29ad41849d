//! The node arena for one compilation unit.

use arbor_ir::{
    DeclId, DeclNode, ExprId, ExprNode, FeatureId, NameId, NameNode, StmtId, StmtNode, Symbol,
    TypeId, TypeNode,
};
use rustc_hash::FxHashMap;

use crate::{BuilderFor, FeatureBuilder, Language};

/// Owns every AST node created by every feature for one compilation unit.
///
/// The module is the sole authority over node lifetime: nodes reference each
/// other only through arena ids and are released together when the module is
/// dropped. It also owns one builder instance per active feature, created
/// lazily through the feature's factory on first use.
pub struct Module {
    name: Symbol,
    names: Vec<Box<dyn NameNode>>,
    types: Vec<Box<dyn TypeNode>>,
    exprs: Vec<Box<dyn ExprNode>>,
    decls: Vec<Box<dyn DeclNode>>,
    stmts: Vec<Box<dyn StmtNode>>,
    /// Top-level declarations, in the order they were added. Every consumer
    /// (printer, generator, archive writer) processes this order.
    top_level: Vec<DeclId>,
    /// Per-feature builders. `None` marks a builder temporarily taken by
    /// `with_builder`; re-entering the same builder is a usage error.
    builders: FxHashMap<FeatureId, Option<Box<dyn FeatureBuilder>>>,
}

macro_rules! arena_accessors {
    ($alloc:ident, $get:ident, $count:ident, $field:ident, $id:ident, $node:ident) => {
        /// Allocate a node into this arena, returning its id.
        pub fn $alloc(&mut self, node: impl $node + 'static) -> $id {
            let index = u32::try_from(self.$field.len())
                .unwrap_or_else(|_| panic!("module arena exceeded u32::MAX nodes"));
            self.$field.push(Box::new(node));
            $id::new(index)
        }

        /// The node with the given id.
        ///
        /// # Panics
        /// Panics if the id was not issued by this module.
        #[inline]
        pub fn $get(&self, id: $id) -> &dyn $node {
            &*self.$field[id.index()]
        }

        /// Number of nodes in this arena.
        #[inline]
        pub fn $count(&self) -> usize {
            self.$field.len()
        }
    };
}

impl Module {
    /// Create an empty module.
    pub fn new(name: Symbol) -> Self {
        Module {
            name,
            names: Vec::new(),
            types: Vec::new(),
            exprs: Vec::new(),
            decls: Vec::new(),
            stmts: Vec::new(),
            top_level: Vec::new(),
            builders: FxHashMap::default(),
        }
    }

    /// The module's name.
    #[inline]
    pub fn name(&self) -> Symbol {
        self.name
    }

    arena_accessors!(alloc_name, name_node, name_count, names, NameId, NameNode);
    arena_accessors!(alloc_type, type_node, type_count, types, TypeId, TypeNode);
    arena_accessors!(alloc_expr, expr_node, expr_count, exprs, ExprId, ExprNode);
    arena_accessors!(alloc_decl, decl_node, decl_count, decls, DeclId, DeclNode);
    arena_accessors!(alloc_stmt, stmt_node, stmt_count, stmts, StmtId, StmtNode);

    /// Append a declaration to the module's top-level sequence.
    pub fn add_declaration(&mut self, decl: DeclId) {
        debug_assert!(decl.index() < self.decls.len());
        self.top_level.push(decl);
    }

    /// The top-level declarations, in insertion order.
    ///
    /// This order is an explicit guarantee: it is the order every external
    /// algorithm processes declarations.
    #[inline]
    pub fn declarations(&self) -> &[DeclId] {
        &self.top_level
    }

    /// Run `f` with this module's builder for feature `B::FEATURE`.
    ///
    /// The builder is created through the feature's factory on first use and
    /// owned by the module thereafter. The builder is handed to `f` together
    /// with the module itself, so it can allocate nodes and reach sibling
    /// features' builders (nested `with_builder` calls for *other* features
    /// are fine; re-entering the same feature's builder panics).
    ///
    /// # Panics
    /// Panics if the feature is unregistered, if its factory produces a
    /// builder of a different type than `B`, or on builder reentrancy.
    pub fn with_builder<B, R>(
        &mut self,
        lang: &Language,
        f: impl FnOnce(&mut B, &mut Module) -> R,
    ) -> R
    where
        B: BuilderFor,
    {
        let fid = B::FEATURE;
        if !self.builders.contains_key(&fid) {
            let factory = lang.feature(fid).builder_factory();
            let built = factory(self);
            assert!(
                built.feature_id() == fid,
                "feature `{}` produced a builder claiming feature id {}",
                lang.feature(fid).name(),
                built.feature_id().raw()
            );
            self.builders.insert(fid, Some(built));
        }

        let slot = match self.builders.get_mut(&fid) {
            Some(slot) => slot,
            None => panic!("builder slot vanished for feature id {}", fid.raw()),
        };
        let mut boxed = match slot.take() {
            Some(boxed) => boxed,
            None => panic!(
                "builder for feature id {} is already in use (reentrant with_builder)",
                fid.raw()
            ),
        };

        let result = {
            let builder = match boxed.as_any_mut().downcast_mut::<B>() {
                Some(builder) => builder,
                None => panic!(
                    "feature id {} built a different builder type than {}",
                    fid.raw(),
                    std::any::type_name::<B>()
                ),
            };
            f(builder, self)
        };

        // The closure may have created builders for other features, so look
        // the slot up again before restoring.
        if let Some(slot) = self.builders.get_mut(&fid) {
            *slot = Some(boxed);
        }
        result
    }
}

impl std::fmt::Debug for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("types", &self.types.len())
            .field("exprs", &self.exprs.len())
            .field("decls", &self.decls.len())
            .field("top_level", &self.top_level.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Feature;
    use arbor_ir::Kind;
    use pretty_assertions::assert_eq;

    const FID: FeatureId = FeatureId::new(4);
    const LEAF_KIND: Kind = Kind::in_block(FID, 0);
    const LEAF_DECL_KIND: Kind = Kind::in_block(FID, 1);

    struct LeafType;
    impl TypeNode for LeafType {
        fn kind(&self) -> Kind {
            LEAF_KIND
        }
    }

    struct LeafDecl;
    impl DeclNode for LeafDecl {
        fn kind(&self) -> Kind {
            LEAF_DECL_KIND
        }
    }

    struct LeafBuilder {
        allocated: usize,
    }
    impl FeatureBuilder for LeafBuilder {
        fn feature_id(&self) -> FeatureId {
            FID
        }
    }
    impl BuilderFor for LeafBuilder {
        const FEATURE: FeatureId = FID;
    }
    impl LeafBuilder {
        fn make_leaf(&mut self, m: &mut Module) -> TypeId {
            self.allocated += 1;
            m.alloc_type(LeafType)
        }
    }

    fn leaf_feature() -> Feature {
        fn make(_m: &mut Module) -> Box<dyn FeatureBuilder> {
            Box::new(LeafBuilder { allocated: 0 })
        }
        Feature::new(FID, "leaf", make)
    }

    #[test]
    fn declaration_order_is_preserved() {
        let lang = Language::new();
        let mut m = Module::new(lang.intern("unit"));
        let a = m.alloc_decl(LeafDecl);
        let b = m.alloc_decl(LeafDecl);
        let c = m.alloc_decl(LeafDecl);
        m.add_declaration(b);
        m.add_declaration(a);
        m.add_declaration(c);
        assert_eq!(m.declarations(), &[b, a, c]);
    }

    #[test]
    fn builder_is_created_once_and_reused() {
        let mut lang = Language::new();
        lang.add_feature(leaf_feature());
        let mut m = Module::new(lang.intern("unit"));

        let t1 = m.with_builder::<LeafBuilder, _>(&lang, |b, m| b.make_leaf(m));
        let t2 = m.with_builder::<LeafBuilder, _>(&lang, |b, m| {
            assert_eq!(b.allocated, 1);
            b.make_leaf(m)
        });
        assert_ne!(t1, t2);
        assert_eq!(m.type_count(), 2);
    }

    #[test]
    #[should_panic(expected = "reentrant")]
    fn builder_reentrancy_panics() {
        let mut lang = Language::new();
        lang.add_feature(leaf_feature());
        let mut m = Module::new(lang.intern("unit"));
        m.with_builder::<LeafBuilder, _>(&lang, |_b, m| {
            m.with_builder::<LeafBuilder, _>(&lang, |_b2, _m| ());
        });
    }
}
