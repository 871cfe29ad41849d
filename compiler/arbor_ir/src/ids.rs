//! Arena ids for the five node categories.
//!
//! Nodes reference each other only through these non-owning `u32` indices
//! into the owning module's arenas. Ids are 4 bytes, compare in O(1), and
//! carry an `INVALID` sentinel for default-initialized fields.

use std::fmt;

macro_rules! define_node_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Sentinel for "no node".
            pub const INVALID: $name = $name(u32::MAX);

            /// Create an id from an arena index.
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Index into the owning arena.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Raw u32 value, as serialized by the archive writer.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// `false` for the `INVALID` sentinel.
            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!(stringify!($name), "({})"), self.0)
                } else {
                    write!(f, concat!(stringify!($name), "::INVALID"))
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }
    };
}

define_node_id! {
    /// Index of a name node in a module's name arena.
    NameId
}

define_node_id! {
    /// Index of a type node in a module's type arena.
    ///
    /// Canonical types are unique per parametrization within one module, so
    /// `TypeId` equality implies structural equality for them.
    TypeId
}

define_node_id! {
    /// Index of an expression node in a module's expression arena.
    ExprId
}

define_node_id! {
    /// Index of a declaration node in a module's declaration arena.
    DeclId
}

define_node_id! {
    /// Index of a statement node in a module's statement arena.
    StmtId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_and_invalid() {
        let id = ExprId::new(7);
        assert!(id.is_valid());
        assert_eq!(id.index(), 7);
        assert!(!ExprId::INVALID.is_valid());
        assert_eq!(ExprId::default(), ExprId::INVALID);
    }

    #[test]
    fn debug_names_the_category() {
        assert_eq!(format!("{:?}", DeclId::new(3)), "DeclId(3)");
        assert_eq!(format!("{:?}", TypeId::INVALID), "TypeId::INVALID");
    }
}
