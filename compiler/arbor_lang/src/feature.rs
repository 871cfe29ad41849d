//! Features and their per-family algorithm tables.

use std::any::{self, Any};

use arbor_ir::{AsAny, FeatureId};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::Module;

/// Identity of a cross-cutting algorithm family (print, hash, equality,
/// evaluate, generate, serialize, ...).
///
/// A family is declared as a zero-sized tag type implementing this trait;
/// `Dispatch` is the per-feature implementation interface, usually a trait
/// object type. Family identity for storage and lookup is the tag's
/// `std::any::TypeId`.
pub trait AlgorithmFamily: 'static {
    /// The per-feature implementation interface, e.g. `dyn PrintOps`.
    type Dispatch: ?Sized + 'static;

    /// Family name for diagnostics.
    const NAME: &'static str;
}

/// A feature's builder: the object external code uses to construct that
/// feature's nodes within one module.
///
/// Builders own per-feature construction state - in particular the canonical
/// sets uniquing that feature's parametrized types - and live exactly as long
/// as the module that owns them.
pub trait FeatureBuilder: AsAny {
    /// The feature this builder constructs nodes for.
    fn feature_id(&self) -> FeatureId;
}

/// Statically ties a concrete builder type to its feature, so modules can
/// locate (and lazily create) the right builder from the type alone.
pub trait BuilderFor: FeatureBuilder + Sized + 'static {
    /// Id of the feature whose factory produces this builder.
    const FEATURE: FeatureId;
}

/// Factory producing a feature's builder for a module.
pub type BuilderFactory = fn(&mut Module) -> Box<dyn FeatureBuilder>;

/// A self-contained language extension.
///
/// Owns the dispatch table mapping algorithm families to this feature's
/// implementations, plus the factory for this feature's builder. Populated
/// once at startup by the feature's constructor function; read-only
/// afterwards.
pub struct Feature {
    id: FeatureId,
    name: &'static str,
    make_builder: BuilderFactory,
    algorithms: FxHashMap<any::TypeId, Box<dyn Any>>,
}

impl Feature {
    /// Create a feature with an empty algorithm table.
    pub fn new(id: FeatureId, name: &'static str, make_builder: BuilderFactory) -> Self {
        Feature {
            id,
            name,
            make_builder,
            algorithms: FxHashMap::default(),
        }
    }

    /// The feature's unique id.
    #[inline]
    pub fn id(&self) -> FeatureId {
        self.id
    }

    /// The feature's name, used in diagnostics.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The factory for this feature's builder.
    #[inline]
    pub fn builder_factory(&self) -> BuilderFactory {
        self.make_builder
    }

    /// Register this feature's implementation of family `F`.
    ///
    /// # Panics
    /// Panics if the family is already registered for this feature; a double
    /// registration is a programming error.
    pub fn add_algorithm<F: AlgorithmFamily>(&mut self, imp: Box<F::Dispatch>) {
        debug!(feature = self.name, family = F::NAME, "register algorithm");
        let prev = self.algorithms.insert(any::TypeId::of::<F>(), Box::new(imp));
        assert!(
            prev.is_none(),
            "feature `{}` registered algorithm family `{}` twice",
            self.name,
            F::NAME
        );
    }

    /// The implementation of family `F` registered by this feature.
    ///
    /// # Panics
    /// Panics if the family was never registered. That means a feature was
    /// linked in without wiring one of its required behaviors - a
    /// configuration error, not a recoverable one.
    pub fn algorithm<F: AlgorithmFamily>(&self) -> &F::Dispatch {
        let slot = match self.algorithms.get(&any::TypeId::of::<F>()) {
            Some(slot) => slot,
            None => panic!(
                "feature `{}` has no `{}` algorithm: the feature was linked \
                 in without wiring this behavior",
                self.name,
                F::NAME
            ),
        };
        match slot.downcast_ref::<Box<F::Dispatch>>() {
            Some(boxed) => boxed.as_ref(),
            None => panic!(
                "algorithm table corrupted for feature `{}`, family `{}`",
                self.name,
                F::NAME
            ),
        }
    }

    /// `true` when this feature registered an implementation of family `F`.
    pub fn has_algorithm<F: AlgorithmFamily>(&self) -> bool {
        self.algorithms.contains_key(&any::TypeId::of::<F>())
    }
}

impl std::fmt::Debug for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Feature")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("algorithms", &self.algorithms.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greet {
        fn greet(&self) -> &'static str;
    }

    struct GreetFamily;
    impl AlgorithmFamily for GreetFamily {
        type Dispatch = dyn Greet;
        const NAME: &'static str = "greet";
    }

    struct Hello;
    impl Greet for Hello {
        fn greet(&self) -> &'static str {
            "hello"
        }
    }

    struct StubBuilder(FeatureId);
    impl FeatureBuilder for StubBuilder {
        fn feature_id(&self) -> FeatureId {
            self.0
        }
    }

    fn make_stub(_m: &mut Module) -> Box<dyn FeatureBuilder> {
        Box::new(StubBuilder(FeatureId::new(7)))
    }

    #[test]
    fn registered_algorithm_is_found() {
        let mut feat = Feature::new(FeatureId::new(7), "stub", make_stub);
        assert!(!feat.has_algorithm::<GreetFamily>());
        feat.add_algorithm::<GreetFamily>(Box::new(Hello));
        assert!(feat.has_algorithm::<GreetFamily>());
        assert_eq!(feat.algorithm::<GreetFamily>().greet(), "hello");
    }

    #[test]
    #[should_panic(expected = "twice")]
    fn duplicate_registration_panics() {
        let mut feat = Feature::new(FeatureId::new(7), "stub", make_stub);
        feat.add_algorithm::<GreetFamily>(Box::new(Hello));
        feat.add_algorithm::<GreetFamily>(Box::new(Hello));
    }

    #[test]
    #[should_panic(expected = "has no `greet` algorithm")]
    fn missing_algorithm_panics() {
        let feat = Feature::new(FeatureId::new(7), "stub", make_stub);
        let _ = feat.algorithm::<GreetFamily>();
    }
}
