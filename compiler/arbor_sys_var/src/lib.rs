//! The variable language feature.
//!
//! Contributes spelled names, variable declarations, and reference
//! expressions - the feature that exercises name binding (through the
//! lexical environment) and the generator's declaration-value contexts.
//! A reference's value is the referenced declaration's value; reference
//! types are not modeled.

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

pub use ast::{BasicName, RefExpr, VarDecl, BASIC_NAME_KIND, REF_EXPR_KIND, VAR_DECL_KIND};
pub use construction::Builder;

/// This feature's id; its kind block starts at `FEATURE_ID * BLOCK_SIZE`.
pub const FEATURE_ID: FeatureId = FeatureId::new(2);

fn make_builder(_m: &mut Module) -> Box<dyn FeatureBuilder> {
    Box::new(Builder::new())
}

/// Construct the feature: builder factory plus one registration per
/// algorithm family.
pub fn feature() -> Feature {
    let mut f = Feature::new(FEATURE_ID, "sys_var", make_builder);
    f.add_algorithm::<Print>(Box::new(printing::PrintAlgo));
    f.add_algorithm::<Equal>(Box::new(comparison::EqAlgo));
    f.add_algorithm::<Hashing>(Box::new(comparison::HashAlgo));
    f.add_algorithm::<Evaluate>(Box::new(evaluation::EvalAlgo));
    f.add_algorithm::<Generate>(Box::new(generation::GenAlgo));
    f.add_algorithm::<arbor_archive::Write>(Box::new(serialization::WriteAlgo));
    f
}
