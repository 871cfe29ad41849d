//! Block-partitioned node-kind identifiers.
//!
//! Every registered feature is assigned a block of `BLOCK_SIZE` consecutive
//! kind values, so independently written features never collide. The owning
//! feature of any kind is recovered with a single division.

use std::fmt;

/// Number of node kinds a single feature may define.
///
/// Generous; a feature that outgrows its block is a configuration error
/// caught at build time, because kinds are formed by `const` evaluation of
/// [`Kind::in_block`].
pub const BLOCK_SIZE: u32 = 100;

/// Identifies a registered language feature.
///
/// Assigned by explicit enumeration: each feature crate exports its id as a
/// `const`. Two features with the same id cannot both be registered - the
/// language aggregate rejects the duplicate fatally.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FeatureId(u32);

impl FeatureId {
    /// Create a feature id.
    #[inline]
    pub const fn new(id: u32) -> Self {
        FeatureId(id)
    }

    /// Raw numeric value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// First kind of this feature's block.
    #[inline]
    pub const fn block_base(self) -> Kind {
        Kind(self.0 * BLOCK_SIZE)
    }
}

impl fmt::Debug for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeatureId({})", self.0)
    }
}

/// The integer tag identifying a node's concrete variant.
///
/// `kind = feature_id * BLOCK_SIZE + local_offset`. Kinds are immutable,
/// assigned once at node construction, and always drawn from the defining
/// feature's block.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Kind(u32);

impl Kind {
    /// Form the kind at `offset` within `feature`'s block.
    ///
    /// Evaluated at compile time when used to initialize a `const`, so a
    /// feature that requests more than `BLOCK_SIZE` local kinds fails the
    /// build rather than the run.
    #[inline]
    pub const fn in_block(feature: FeatureId, offset: u32) -> Self {
        assert!(offset < BLOCK_SIZE, "feature kind block exhausted");
        Kind(feature.0 * BLOCK_SIZE + offset)
    }

    /// The feature whose block this kind belongs to. O(1).
    #[inline]
    pub const fn feature(self) -> FeatureId {
        FeatureId(self.0 / BLOCK_SIZE)
    }

    /// Offset of this kind within its feature's block.
    #[inline]
    pub const fn offset(self) -> u32 {
        self.0 % BLOCK_SIZE
    }

    /// Raw numeric value, as serialized by the archive writer.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Reconstruct a kind from its raw value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Kind(raw)
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Kind({} = feature {} + {})",
            self.0,
            self.feature().raw(),
            self.offset()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn block_math_round_trips() {
        let f = FeatureId::new(3);
        let k = Kind::in_block(f, 17);
        assert_eq!(k.raw(), 317);
        assert_eq!(k.feature(), f);
        assert_eq!(k.offset(), 17);
    }

    #[test]
    fn feature_of_is_left_inverse_of_allocation() {
        for id in 0..8 {
            let f = FeatureId::new(id);
            for off in [0, 1, 42, BLOCK_SIZE - 1] {
                assert_eq!(Kind::in_block(f, off).feature(), f);
            }
        }
    }

    #[test]
    fn blocks_of_distinct_features_are_disjoint() {
        let a = FeatureId::new(0);
        let b = FeatureId::new(1);
        let last_of_a = Kind::in_block(a, BLOCK_SIZE - 1);
        let first_of_b = Kind::in_block(b, 0);
        assert!(last_of_a.raw() < first_of_b.raw());
    }
}
