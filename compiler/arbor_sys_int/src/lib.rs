//! The integer language feature.
//!
//! Contributes the canonical types `natP` and `intP` for precisions
//! P in {8, 16, 32, 64}, integer literals, the arithmetic operators
//! `+ - * / % -`, and the comparisons `== != < > <= >=`. Comparisons have
//! type `bool`, obtained through the boolean feature's builder - the two
//! features compose through the module without knowing each other's
//! internals.

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
    AddExpr, DivExpr, EqExpr, GeExpr, GtExpr, IntExpr, IntType, LeExpr, LtExpr, MulExpr, NatType,
    NeExpr, NegExpr, RemExpr, SubExpr, INT_EXPR_KIND, INT_TYPE_KIND, NAT_TYPE_KIND,
};
pub use construction::{is_integral_expr, is_integral_type, Builder};

/// This feature's id; its kind block starts at `FEATURE_ID * BLOCK_SIZE`.
pub const FEATURE_ID: FeatureId = FeatureId::new(1);

fn make_builder(_m: &mut Module) -> Box<dyn FeatureBuilder> {
    Box::new(Builder::new())
}

/// Construct the feature: builder factory plus one registration per
/// algorithm family.
pub fn feature() -> Feature {
    let mut f = Feature::new(FEATURE_ID, "sys_int", make_builder);
    f.add_algorithm::<Print>(Box::new(printing::PrintAlgo));
    f.add_algorithm::<Equal>(Box::new(comparison::EqAlgo));
    f.add_algorithm::<Hashing>(Box::new(comparison::HashAlgo));
    f.add_algorithm::<Evaluate>(Box::new(evaluation::EvalAlgo));
    f.add_algorithm::<Generate>(Box::new(generation::GenAlgo));
    f.add_algorithm::<arbor_archive::Write>(Box::new(serialization::WriteAlgo));
    f
}
