//! Driver support: feature wiring, startup checks, and a demo module.
//!
//! The kernel is a library; this crate is the host program that constructs
//! the language once, registers the features it was built with, populates a
//! module the way a front end would, and drives the cross-cutting algorithms
//! over it.

use arbor_cmp::{Equal, Hashing};
use arbor_codegen::Generate;
use arbor_eval::Evaluate;
use arbor_fmt::Print;
use arbor_lang::{AlgorithmFamily, Language, Module};
use arbor_scope::{LexicalEnvironment, ScopeKind};
use tracing::debug;

/// Register every feature this driver is built with.
///
/// Must run immediately after constructing the language, before any node is
/// built; the language is read-only from then on.
pub fn install_features(lang: &mut Language) {
    lang.add_feature(arbor_sys_bool::feature());
    lang.add_feature(arbor_sys_int::feature());
    lang.add_feature(arbor_sys_var::feature());
}

/// A language with the driver's features installed.
pub fn new_language() -> Language {
    let mut lang = Language::new();
    install_features(&mut lang);
    lang
}

/// Startup completeness check: every registered feature must implement
/// every algorithm family the driver dispatches.
///
/// # Panics
/// Panics naming the feature and family when a registration is missing -
/// the feature was linked in without wiring one of its behaviors.
pub fn verify_algorithms(lang: &Language) {
    fn check<F: AlgorithmFamily>(lang: &Language) {
        for feature in lang.features() {
            assert!(
                feature.has_algorithm::<F>(),
                "feature `{}` does not implement the `{}` algorithm family",
                feature.name(),
                F::NAME
            );
        }
    }
    check::<Print>(lang);
    check::<Equal>(lang);
    check::<Hashing>(lang);
    check::<Evaluate>(lang);
    check::<Generate>(lang);
    check::<arbor_archive::Write>(lang);
    debug!(features = lang.features().len(), "algorithm tables complete");
}

/// Build the demo module:
///
/// ```text
/// var answer : int32 = (6 * 7);
/// var truth : bool = (answer == 42);
/// ```
///
/// Constructed the way a front end would drive the kernel: types through
/// the canonical sets, nodes through the feature builders, and the name
/// `answer` resolved through the lexical environment rather than by holding
/// on to the declaration.
pub fn demo_module(lang: &Language) -> Module {
    let mut m = Module::new(lang.intern("demo"));
    let mut env = LexicalEnvironment::new();
    env.enter_scope(ScopeKind::NAMESPACE);

    // var answer : int32 = (6 * 7);
    let sym_answer = lang.intern("answer");
    let (i32_ty, product) = m.with_builder::<arbor_sys_int::Builder, _>(lang, |b, m| {
        let ty = b.int_type(m, 32);
        let six = b.int_expr(m, ty, 6);
        let seven = b.int_expr(m, ty, 7);
        (ty, b.mul_expr(m, ty, six, seven))
    });
    let answer = m.with_builder::<arbor_sys_var::Builder, _>(lang, |b, m| {
        let name = b.basic_name(m, sym_answer);
        b.var_decl(lang, m, name, i32_ty, product)
    });
    m.add_declaration(answer);
    env.add(&m, answer);

    // var truth : bool = (answer == 42);
    let referenced = match env.lookup(sym_answer) {
        Some(binding) => binding.decl,
        None => panic!("`answer` vanished from the current scope"),
    };
    let reference =
        m.with_builder::<arbor_sys_var::Builder, _>(lang, |b, m| b.ref_expr(m, referenced));
    let comparison = m.with_builder::<arbor_sys_int::Builder, _>(lang, |b, m| {
        let forty_two = b.int_expr(m, i32_ty, 42);
        b.eq_expr(lang, m, reference, forty_two)
    });
    let bool_ty = m.with_builder::<arbor_sys_bool::Builder, _>(lang, |b, m| b.bool_type(m));
    let truth = m.with_builder::<arbor_sys_var::Builder, _>(lang, |b, m| {
        let name = b.basic_name(m, lang.intern("truth"));
        b.var_decl(lang, m, name, bool_ty, comparison)
    });
    m.add_declaration(truth);
    env.add(&m, truth);

    env.leave_scope();
    m
}

/// The spelled name of a top-level declaration, for reporting.
pub fn decl_spelling(lang: &Language, m: &Module, decl: arbor_ir::DeclId) -> &'static str {
    match m.decl_node(decl).name() {
        Some(name) => match m.name_node(name).symbol() {
            Some(sym) => lang.symbols().spelling(sym),
            None => "<unspelled>",
        },
        None => "<anonymous>",
    }
}
