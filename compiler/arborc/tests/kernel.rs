//! End-to-end scenarios over the assembled language: independent features
//! composing through the registry, canonicalization, scoping, dispatch
//! completeness, declaration ordering, and archive framing.

use arbor_archive::ArchiveWriter;
use arbor_eval::{evaluate_decl, Evaluator, Value};
use arbor_fmt::{expr_to_string, module_to_string, print_expr, Printer};
use arbor_ir::{FeatureId, BLOCK_SIZE};
use arbor_lang::Module;
use arbor_scope::{LexicalEnvironment, ScopeKind};
use arborc::{demo_module, new_language, verify_algorithms};
use pretty_assertions::assert_eq;

#[test]
fn feature_blocks_are_disjoint() {
    let lang = new_language();
    let ids: Vec<FeatureId> = lang.features().iter().map(|f| f.id()).collect();
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
            // Disjoint blocks: base kinds differ by at least one block.
            let delta = a.block_base().raw().abs_diff(b.block_base().raw());
            assert!(delta >= BLOCK_SIZE);
        }
    }
}

#[test]
fn every_registered_family_dispatches_for_every_feature() {
    let lang = new_language();
    // The completeness check itself: reaches every (feature, family) pair.
    verify_algorithms(&lang);
}

/// Two features, unaware of each other, compose through the registry and
/// preserve construction order.
#[test]
fn independent_features_compose_in_order() {
    let lang = new_language();
    let mut m = Module::new(lang.intern("compose"));

    let flag = m.with_builder::<arbor_sys_bool::Builder, _>(&lang, |b, m| b.true_expr(m));
    let number = m.with_builder::<arbor_sys_int::Builder, _>(&lang, |b, m| {
        let ty = b.int_type(m, 32);
        b.int_expr(m, ty, 42)
    });

    let mut p = Printer::new();
    print_expr(&mut p, &lang, &m, flag);
    p.space();
    print_expr(&mut p, &lang, &m, number);
    assert_eq!(p.finish(), "true 42");
}

#[test]
fn canonical_types_are_unique_per_parametrization() {
    let lang = new_language();
    let mut m = Module::new(lang.intern("canon"));
    m.with_builder::<arbor_sys_int::Builder, _>(&lang, |b, m| {
        let first = b.int_type(m, 32);
        let second = b.int_type(m, 32);
        let wider = b.int_type(m, 64);
        assert_eq!(first, second);
        assert_ne!(first, wider);
    });
}

#[test]
fn shadowing_resolves_to_the_innermost_binding() {
    let lang = new_language();
    let mut m = Module::new(lang.intern("scopes"));
    let x = lang.intern("x");

    let make_x = |m: &mut Module, value: i64| {
        let init = m.with_builder::<arbor_sys_int::Builder, _>(&lang, |b, m| {
            let ty = b.int_type(m, 32);
            b.int_expr(m, ty, value)
        });
        m.with_builder::<arbor_sys_var::Builder, _>(&lang, |b, m| {
            let name = b.basic_name(m, x);
            let ty = m.expr_node(init).ty();
            b.var_decl(&lang, m, name, ty, init)
        })
    };
    let d1 = make_x(&mut m, 1);
    let d2 = make_x(&mut m, 2);

    let mut env = LexicalEnvironment::new();
    env.enter_scope(ScopeKind::BLOCK);
    env.add(&m, d1);
    env.enter_scope(ScopeKind::BLOCK);
    env.add(&m, d2);
    assert_eq!(env.lookup(x).map(|b| b.decl), Some(d2));
    env.leave_scope();
    assert_eq!(env.lookup(x).map(|b| b.decl), Some(d1));
    env.leave_scope();
    assert_eq!(env.lookup(x), None);
}

#[test]
fn demo_module_prints_in_declaration_order() {
    let lang = new_language();
    let m = demo_module(&lang);
    assert_eq!(
        module_to_string(&lang, &m),
        "var answer : int32 = (6 * 7);\nvar truth : bool = (answer == 42);\n"
    );
}

#[test]
fn demo_module_constant_folds() {
    let lang = new_language();
    let m = demo_module(&lang);
    let mut ev = Evaluator::new();
    let values: Vec<Value> = m
        .declarations()
        .iter()
        .map(|&d| match evaluate_decl(&mut ev, &lang, &m, d) {
            Ok(value) => value,
            Err(err) => panic!("demo declaration failed to fold: {err}"),
        })
        .collect();
    assert_eq!(values, vec![Value::Int(42), Value::Bool(true)]);
}

#[test]
fn demo_module_generates_globals_in_order() {
    let lang = new_language();
    let m = demo_module(&lang);
    let mut g = arbor_codegen::Generator::new();
    arbor_codegen::generate_module(&mut g, &lang, &m);
    let ir = g.finish();

    let answer_at = ir.find("@answer = global i32");
    let truth_at = ir.find("@truth = global i1");
    assert!(answer_at.is_some(), "missing answer global in:\n{ir}");
    assert!(truth_at.is_some(), "missing truth global in:\n{ir}");
    assert!(answer_at < truth_at, "declaration order not preserved:\n{ir}");
    // The reference resolved through the decl-value context.
    assert!(ir.contains("icmp eq i32 @answer, 42"), "unexpected IR:\n{ir}");
}

#[test]
fn archive_is_content_addressed() {
    let lang = new_language();
    let m = demo_module(&lang);
    let mut w = ArchiveWriter::new();
    w.write_module(&lang, &m);

    // int32 is referenced by three literals and a declaration, bool by one
    // declaration and a comparison; each serializes exactly once.
    assert_eq!(w.type_records(), 2);
    // Two top-level declarations; the reference to `answer` emits only an id.
    assert_eq!(w.decl_records(), 2);
    // "answer" and "truth".
    assert_eq!(w.string_records(), 2);

    let bytes = w.to_bytes();
    // Outer framing: count = 3 tables, big-endian u64.
    assert_eq!(&bytes[0..8], &3u64.to_be_bytes());
}

#[test]
fn printing_an_expression_is_reproducible() {
    let lang = new_language();
    let mut m = Module::new(lang.intern("repr"));
    let e = m.with_builder::<arbor_sys_int::Builder, _>(&lang, |b, m| {
        let ty = b.int_type(m, 8);
        let two = b.int_expr(m, ty, 2);
        let three = b.int_expr(m, ty, 3);
        let sum = b.add_expr(m, ty, two, three);
        b.neg_expr(m, ty, sum)
    });
    assert_eq!(expr_to_string(&lang, &m, e), "-(2 + 3)");
}
