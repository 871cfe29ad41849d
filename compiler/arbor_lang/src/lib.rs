//! Arbor language aggregate - the open-dispatch core of the kernel.
//!
//! A *feature* is a self-contained language extension: it contributes node
//! kinds from its own block of the kind space and one implementation per
//! cross-cutting algorithm family. The [`Language`] aggregate collects every
//! registered feature and resolves, for any node, which feature's
//! implementation of a family runs. The [`Module`] arena owns all nodes of
//! one compilation unit plus one builder per active feature.
//!
//! This is the classical expression problem solved with per-feature dispatch
//! tables keyed by algorithm-family identity: adding a feature never touches
//! existing algorithms, and adding an algorithm family is a closed obligation
//! on every live feature, checkable at startup.
//!
//! # Error model
//!
//! Everything that can go wrong in here is a feature-linkage bug, not a user
//! error: duplicate registration, missing algorithms, builder reentrancy.
//! Such violations panic immediately with the violated contract; they are
//! never surfaced as recoverable diagnostics.

mod decl_context;
mod feature;
mod language;
mod module;

pub use decl_context::DeclContexts;
pub use feature::{AlgorithmFamily, BuilderFor, Feature, FeatureBuilder};
pub use language::Language;
pub use module::Module;
