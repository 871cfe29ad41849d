//! The five node-category traits and downcasting support.
//!
//! There is no closed enumeration of node kinds. A feature contributes
//! concrete node types implementing one of these traits, tagged with kinds
//! from the feature's block; algorithms recover the concrete type with an
//! `Any`-downcast after dispatching on the kind.

use std::any::Any;

use crate::{Kind, NameId, Symbol, TypeId};

/// Upcast to `&dyn Any` for downcasting trait objects.
///
/// Blanket-implemented for every `'static` type, so node implementors never
/// write it by hand.
pub trait AsAny {
    /// View this value as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// View this value as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A name node: the spelling side of a declaration or reference.
pub trait NameNode: AsAny {
    /// The node's immutable kind tag.
    fn kind(&self) -> Kind;

    /// The interned symbol this name spells, when it has a direct spelling.
    ///
    /// Structured names (qualified, templated, ...) return `None`; the
    /// lexical environment can only bind names with a spelling.
    fn symbol(&self) -> Option<Symbol> {
        None
    }
}

/// A type node.
pub trait TypeNode: AsAny {
    /// The node's immutable kind tag.
    fn kind(&self) -> Kind;
}

/// An expression node. Every expression carries its type.
pub trait ExprNode: AsAny {
    /// The node's immutable kind tag.
    fn kind(&self) -> Kind;

    /// The expression's type.
    fn ty(&self) -> TypeId;
}

/// A declaration node.
pub trait DeclNode: AsAny {
    /// The node's immutable kind tag.
    fn kind(&self) -> Kind;

    /// The declared name, for named declarations.
    fn name(&self) -> Option<NameId> {
        None
    }
}

/// A statement node.
pub trait StmtNode: AsAny {
    /// The node's immutable kind tag.
    fn kind(&self) -> Kind;
}

macro_rules! impl_node_downcast {
    ($trait:ident) => {
        impl<'node> dyn $trait + 'node {
            /// `true` if the node's concrete type is `T`.
            #[inline]
            pub fn is<T: $trait + 'static>(&self) -> bool {
                self.as_any().is::<T>()
            }

            /// Downcast to the concrete node type.
            #[inline]
            pub fn downcast_ref<T: $trait + 'static>(&self) -> Option<&T> {
                self.as_any().downcast_ref::<T>()
            }

            /// Asserting downcast.
            ///
            /// Panics when the node is not a `T`. Dispatch on the node's
            /// kind must establish the concrete type first, so a failure
            /// here is a feature-linkage bug, not a user error.
            #[inline]
            #[track_caller]
            pub fn cast_ref<T: $trait + 'static>(&self) -> &T {
                match self.downcast_ref::<T>() {
                    Some(node) => node,
                    None => panic!(
                        "node {:?} is not a {}",
                        self.kind(),
                        std::any::type_name::<T>()
                    ),
                }
            }
        }
    };
}

impl_node_downcast!(NameNode);
impl_node_downcast!(TypeNode);
impl_node_downcast!(ExprNode);
impl_node_downcast!(DeclNode);
impl_node_downcast!(StmtNode);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FeatureId;

    const TEST_FEATURE: FeatureId = FeatureId::new(9);
    const UNIT_KIND: Kind = Kind::in_block(TEST_FEATURE, 0);
    const PAIR_KIND: Kind = Kind::in_block(TEST_FEATURE, 1);

    struct UnitType;
    impl TypeNode for UnitType {
        fn kind(&self) -> Kind {
            UNIT_KIND
        }
    }

    struct PairType(TypeId, TypeId);
    impl TypeNode for PairType {
        fn kind(&self) -> Kind {
            PAIR_KIND
        }
    }

    #[test]
    fn downcast_recovers_concrete_node() {
        let node: Box<dyn TypeNode> = Box::new(PairType(TypeId::new(0), TypeId::new(1)));
        assert!(node.is::<PairType>());
        assert!(!node.is::<UnitType>());
        let pair = node.cast_ref::<PairType>();
        assert_eq!(pair.0, TypeId::new(0));
    }

    #[test]
    #[should_panic(expected = "is not a")]
    fn cast_to_wrong_type_panics() {
        let node: Box<dyn TypeNode> = Box::new(UnitType);
        let _ = node.cast_ref::<PairType>();
    }
}
