//! The boolean language feature.
//!
//! Contributes the canonical `bool` type, boolean literals, and the strict
//! connectives `&`, `|`, and `!`, plus implementations of every cross-cutting
//! algorithm family for those nodes. Like any feature, it knows nothing about
//! its siblings; other features reach its builder through the module when
//! they need the boolean type (comparisons, say).

mod ast;
mod comparison;
mod construction;
mod evaluation;
mod generation;
mod printing;
mod serialization;

use arbor_cmp::{Equal, Hashing};
use arbor_codegen::Generate;
use arbor_eval::Evaluate;
use arbor_fmt::Print;
use arbor_ir::FeatureId;
use arbor_lang::{Feature, FeatureBuilder, Module};

pub use ast::{
    AndExpr, BoolExpr, BoolType, NotExpr, OrExpr, AND_EXPR_KIND, BOOL_EXPR_KIND, BOOL_TYPE_KIND,
    NOT_EXPR_KIND, OR_EXPR_KIND,
};
pub use construction::{is_boolean_expr, is_boolean_type, Builder};

/// This feature's id; its kind block starts at `FEATURE_ID * BLOCK_SIZE`.
pub const FEATURE_ID: FeatureId = FeatureId::new(0);

fn make_builder(_m: &mut Module) -> Box<dyn FeatureBuilder> {
    Box::new(Builder::new())
}

/// Construct the feature: builder factory plus one registration per
/// algorithm family.
pub fn feature() -> Feature {
    let mut f = Feature::new(FEATURE_ID, "sys_bool", make_builder);
    f.add_algorithm::<Print>(Box::new(printing::PrintAlgo));
    f.add_algorithm::<Equal>(Box::new(comparison::EqAlgo));
    f.add_algorithm::<Hashing>(Box::new(comparison::HashAlgo));
    f.add_algorithm::<Evaluate>(Box::new(evaluation::EvalAlgo));
    f.add_algorithm::<Generate>(Box::new(generation::GenAlgo));
    f.add_algorithm::<arbor_archive::Write>(Box::new(serialization::WriteAlgo));
    f
}
