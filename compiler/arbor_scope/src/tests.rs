use super::*;
use arbor_ir::{DeclNode, FeatureId, Kind, NameId, NameNode};
use arbor_lang::Language;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const FID: FeatureId = FeatureId::new(8);
const NAME_KIND: Kind = Kind::in_block(FID, 0);
const DECL_KIND: Kind = Kind::in_block(FID, 1);

struct TestName(Symbol);
impl NameNode for TestName {
    fn kind(&self) -> Kind {
        NAME_KIND
    }
    fn symbol(&self) -> Option<Symbol> {
        Some(self.0)
    }
}

struct TestDecl(NameId);
impl DeclNode for TestDecl {
    fn kind(&self) -> Kind {
        DECL_KIND
    }
    fn name(&self) -> Option<NameId> {
        Some(self.0)
    }
}

fn named_decl(lang: &Language, m: &mut Module, spelling: &str) -> DeclId {
    let sym = lang.intern(spelling);
    let name = m.alloc_name(TestName(sym));
    m.alloc_decl(TestDecl(name))
}

#[test]
fn shadowing_follows_scope_nesting() {
    let lang = Language::new();
    let mut m = Module::new(lang.intern("unit"));
    let mut env = LexicalEnvironment::new();
    let x = lang.intern("x");

    let d1 = named_decl(&lang, &mut m, "x");
    let d2 = named_decl(&lang, &mut m, "x");

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
fn lookup_of_outer_binding_through_inner_scope() {
    let lang = Language::new();
    let mut m = Module::new(lang.intern("unit"));
    let mut env = LexicalEnvironment::new();
    let y = lang.intern("y");

    let d = named_decl(&lang, &mut m, "y");
    env.enter_scope(ScopeKind::NAMESPACE);
    env.add(&m, d);
    env.enter_scope(ScopeKind::BLOCK);
    // Not rebound in the inner scope; the outer binding is visible.
    assert_eq!(env.lookup(y).map(|b| b.decl), Some(d));
    env.leave_scope();
    env.leave_scope();
}

#[test]
fn hoisted_binding_unwinds_with_its_owning_scope() {
    let lang = Language::new();
    let mut m = Module::new(lang.intern("unit"));
    let mut env = LexicalEnvironment::new();
    let p = lang.intern("p");

    let param = named_decl(&lang, &mut m, "p");
    let fn_scope = env.enter_scope(ScopeKind::FUNCTION);
    env.enter_scope(ScopeKind::BLOCK);
    // Parameter logically belongs to the function scope even though the
    // body block is current.
    env.add_in(fn_scope, &m, param);
    assert_eq!(env.lookup(p).map(|b| b.scope), Some(fn_scope));

    env.leave_scope();
    // Leaving the body does not unbind the parameter.
    assert_eq!(env.lookup(p).map(|b| b.decl), Some(param));

    env.leave_scope();
    assert_eq!(env.lookup(p), None);
}

#[test]
fn explicit_removal_restores_shadowed_binding() {
    let lang = Language::new();
    let mut m = Module::new(lang.intern("unit"));
    let mut env = LexicalEnvironment::new();
    let x = lang.intern("x");

    let d1 = named_decl(&lang, &mut m, "x");
    let d2 = named_decl(&lang, &mut m, "x");

    env.enter_scope(ScopeKind::BLOCK);
    env.add(&m, d1);
    env.add(&m, d2);
    assert_eq!(env.lookup(x).map(|b| b.decl), Some(d2));

    env.remove_decl(&m, d2);
    assert_eq!(env.lookup(x).map(|b| b.decl), Some(d1));

    env.remove_name(x);
    assert_eq!(env.lookup(x), None);

    // The scope's unwind list no longer holds the removed bindings.
    env.leave_scope();
    assert_eq!(env.depth(), 0);
}

#[test]
#[should_panic(expected = "left more scopes")]
fn unbalanced_leave_panics() {
    let mut env = LexicalEnvironment::new();
    env.leave_scope();
}

#[test]
#[should_panic(expected = "cannot be bound")]
fn unnamed_declaration_cannot_be_bound() {
    struct AnonDecl;
    impl DeclNode for AnonDecl {
        fn kind(&self) -> Kind {
            DECL_KIND
        }
    }

    let lang = Language::new();
    let mut m = Module::new(lang.intern("unit"));
    let mut env = LexicalEnvironment::new();
    let d = m.alloc_decl(AnonDecl);
    env.enter_scope(ScopeKind::BLOCK);
    env.add(&m, d);
}

#[test]
fn scope_metadata_is_queryable() {
    let mut env = LexicalEnvironment::new();
    let outer = env.enter_scope(ScopeKind::NAMESPACE);
    let inner = env.enter_scope(ScopeKind::new(17));
    assert_eq!(env.scope_kind(outer), ScopeKind::NAMESPACE);
    assert_eq!(env.scope_kind(inner), ScopeKind::new(17));
    assert_eq!(env.parent(inner), Some(outer));
    assert_eq!(env.parent(outer), None);
    assert_eq!(env.current_scope(), inner);
}

/// One step of a random scope/bind script.
#[derive(Clone, Debug)]
enum Op {
    Enter,
    Leave,
    Add(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::Enter),
        2 => Just(Op::Leave),
        3 => (0usize..4).prop_map(Op::Add),
    ]
}

proptest! {
    /// Round-trip law: after a balanced sequence of enter/add/leave, every
    /// name's binding stack returns to its pre-sequence state (empty), and
    /// at every step lookup agrees with a reference model.
    #[test]
    fn scope_unwind_round_trips(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let lang = Language::new();
        let mut m = Module::new(lang.intern("unit"));
        let mut env = LexicalEnvironment::new();

        let names = ["a", "b", "c", "d"];
        let symbols: Vec<Symbol> = names.iter().map(|n| lang.intern(n)).collect();

        // Reference model: a scope stack of bound (symbol, decl) pairs.
        let mut model: Vec<Vec<(Symbol, DeclId)>> = Vec::new();

        for op in ops {
            match op {
                Op::Enter => {
                    env.enter_scope(ScopeKind::BLOCK);
                    model.push(Vec::new());
                }
                Op::Leave => {
                    if model.is_empty() {
                        continue; // keep the script balanced
                    }
                    env.leave_scope();
                    model.pop();
                }
                Op::Add(i) => {
                    if model.is_empty() {
                        continue; // bindings need a current scope
                    }
                    let decl = named_decl(&lang, &mut m, names[i]);
                    env.add(&m, decl);
                    if let Some(top) = model.last_mut() {
                        top.push((symbols[i], decl));
                    }
                }
            }

            // Innermost binding must agree with the model at every step.
            for &sym in &symbols {
                let expected = model
                    .iter()
                    .rev()
                    .flat_map(|scope| scope.iter().rev())
                    .find(|&&(s, _)| s == sym)
                    .map(|&(_, d)| d);
                prop_assert_eq!(env.lookup(sym).map(|b| b.decl), expected);
            }
        }

        // Full unwind restores the pre-sequence state.
        while env.depth() > 0 {
            env.leave_scope();
            model.pop();
        }
        for &sym in &symbols {
            prop_assert_eq!(env.lookup(sym), None);
            prop_assert!(env.bindings_of(sym).is_empty());
        }
    }
}
