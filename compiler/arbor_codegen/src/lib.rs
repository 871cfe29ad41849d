//! Target-code generation: the `Generate` algorithm family.
//!
//! The backend here is deliberately thin - a textual three-address pseudo-IR
//! - because instruction selection is not the kernel's concern. What *is*
//! kernel territory, and what this crate exercises, is the generation
//! context: the per-type lowered-type cache (canonical types are cached by
//! id) and the declaration contexts that associate declarations with their
//! generated values for exactly the duration of a generation region.
//!
//! Declarations must be generated before they are referenced; the generator
//! does not step outside the current region to materialize a missing one.
//! That ordering is the host driver's obligation.

use std::fmt;

use arbor_ir::{DeclId, ExprId, NameId, StmtId, Symbol, TypeId};
use arbor_lang::{AlgorithmFamily, DeclContexts, Language, Module};
use rustc_hash::FxHashMap;
use tracing::trace;

/// Family tag for code generation.
pub struct Generate;

impl AlgorithmFamily for Generate {
    type Dispatch = dyn GenOps;
    const NAME: &'static str = "generate";
}

/// A generated value: the operand form an expression lowered to.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GenValue {
    /// No value (statements, void).
    Unit,
    /// An immediate boolean.
    ImmBool(bool),
    /// An immediate integer.
    ImmInt(i64),
    /// A numbered temporary.
    Temp(u32),
    /// A named global.
    Global(Symbol),
}

impl GenValue {
    /// Render as an operand, resolving global names through `lang`.
    pub fn operand(&self, lang: &Language) -> String {
        match self {
            GenValue::Unit => "void".to_owned(),
            GenValue::ImmBool(b) => b.to_string(),
            GenValue::ImmInt(n) => n.to_string(),
            GenValue::Temp(n) => format!("%t{n}"),
            GenValue::Global(sym) => format!("@{}", lang.symbols().spelling(*sym)),
        }
    }
}

/// A lowered type.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct GenType(pub &'static str);

impl fmt::Display for GenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The generation context for one module.
pub struct Generator {
    lines: Vec<String>,
    next_temp: u32,
    /// Lowered-type cache, keyed by (canonical) type id.
    types: FxHashMap<TypeId, GenType>,
    /// Declaration values, scoped to generation regions.
    decl_values: DeclContexts<GenValue>,
    in_function: bool,
}

impl Generator {
    /// Create a generator with the module-level declaration context open.
    pub fn new() -> Self {
        let mut decl_values = DeclContexts::new();
        decl_values.enter();
        Generator {
            lines: Vec::new(),
            next_temp: 0,
            types: FxHashMap::default(),
            decl_values,
            in_function: false,
        }
    }

    /// Close the module-level context and return the emitted text.
    pub fn finish(mut self) -> String {
        self.decl_values.leave();
        let mut out = self.lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    /// Emit one line of pseudo-IR.
    pub fn emit(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// A fresh temporary.
    pub fn fresh_temp(&mut self) -> GenValue {
        let t = GenValue::Temp(self.next_temp);
        self.next_temp += 1;
        t
    }

    /// Bracket a function body: opens a declaration context so values bound
    /// inside the function vanish when it ends.
    pub fn begin_function(&mut self, lang: &Language, name: Symbol) {
        assert!(!self.in_function, "nested function generation");
        self.in_function = true;
        self.decl_values.enter();
        self.emit(format!("fn @{} {{", lang.symbols().spelling(name)));
    }

    /// Close the current function's region.
    pub fn end_function(&mut self) {
        assert!(self.in_function, "no function being generated");
        self.in_function = false;
        self.decl_values.leave();
        self.emit("}");
    }

    /// Associate a declaration with its generated value in the active
    /// region. Re-registration must bind the same value.
    pub fn put_value(&mut self, decl: DeclId, value: GenValue) {
        trace!(?decl, ?value, "record generated value");
        self.decl_values.put(decl, value);
    }

    /// The generated value of a declaration.
    ///
    /// # Panics
    /// Panics if the declaration has not been generated yet - declarations
    /// are required predecessors of their references.
    #[track_caller]
    pub fn get_value(&self, decl: DeclId) -> &GenValue {
        self.decl_values.get(decl)
    }

    /// `true` if the declaration has been generated in a live region.
    pub fn seen_decl(&self, decl: DeclId) -> bool {
        self.decl_values.seen(decl)
    }

    fn cached_type(&self, id: TypeId) -> Option<GenType> {
        self.types.get(&id).copied()
    }

    fn cache_type(&mut self, id: TypeId, ty: GenType) {
        self.types.insert(id, ty);
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-feature generation implementations.
pub trait GenOps {
    /// Generate the symbol name for a name node.
    fn gen_name(&self, _g: &mut Generator, _lang: &Language, m: &Module, id: NameId) -> String {
        panic!(
            "generation algorithm not defined for name node {:?}",
            m.name_node(id).kind()
        );
    }

    /// Lower a type.
    fn gen_type(&self, _g: &mut Generator, _lang: &Language, m: &Module, id: TypeId) -> GenType {
        panic!(
            "generation algorithm not defined for type node {:?}",
            m.type_node(id).kind()
        );
    }

    /// Generate instructions computing an expression.
    fn gen_expr(&self, _g: &mut Generator, _lang: &Language, m: &Module, id: ExprId) -> GenValue {
        panic!(
            "generation algorithm not defined for expression node {:?}",
            m.expr_node(id).kind()
        );
    }

    /// Generate a declaration.
    fn gen_decl(&self, _g: &mut Generator, _lang: &Language, m: &Module, id: DeclId) -> GenValue {
        panic!(
            "generation algorithm not defined for declaration node {:?}",
            m.decl_node(id).kind()
        );
    }

    /// Generate a statement.
    fn gen_stmt(&self, _g: &mut Generator, _lang: &Language, m: &Module, id: StmtId) {
        panic!(
            "generation algorithm not defined for statement node {:?}",
            m.stmt_node(id).kind()
        );
    }
}

/// Generate a symbol name through the owning feature.
pub fn generate_name(g: &mut Generator, lang: &Language, m: &Module, id: NameId) -> String {
    let kind = m.name_node(id).kind();
    lang.feature_of(kind).algorithm::<Generate>().gen_name(g, lang, m, id)
}

/// Lower a type through the owning feature, consulting the cache first.
///
/// Cached by type id; canonical types therefore lower exactly once per
/// module.
pub fn generate_type(g: &mut Generator, lang: &Language, m: &Module, id: TypeId) -> GenType {
    if let Some(ty) = g.cached_type(id) {
        return ty;
    }
    let kind = m.type_node(id).kind();
    let ty = lang.feature_of(kind).algorithm::<Generate>().gen_type(g, lang, m, id);
    g.cache_type(id, ty);
    ty
}

/// Generate an expression through the owning feature.
pub fn generate_expr(g: &mut Generator, lang: &Language, m: &Module, id: ExprId) -> GenValue {
    let kind = m.expr_node(id).kind();
    lang.feature_of(kind).algorithm::<Generate>().gen_expr(g, lang, m, id)
}

/// Generate a declaration through the owning feature.
pub fn generate_decl(g: &mut Generator, lang: &Language, m: &Module, id: DeclId) -> GenValue {
    let kind = m.decl_node(id).kind();
    lang.feature_of(kind).algorithm::<Generate>().gen_decl(g, lang, m, id)
}

/// Generate a statement through the owning feature.
pub fn generate_stmt(g: &mut Generator, lang: &Language, m: &Module, id: StmtId) {
    let kind = m.stmt_node(id).kind();
    lang.feature_of(kind).algorithm::<Generate>().gen_stmt(g, lang, m, id);
}

/// Generate every declaration of a module, in declaration order.
pub fn generate_module(g: &mut Generator, lang: &Language, m: &Module) {
    for &decl in m.declarations() {
        generate_decl(g, lang, m, decl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_lang::Language;
    use pretty_assertions::assert_eq;

    #[test]
    fn function_regions_scope_decl_values() {
        let lang = Language::new();
        let mut g = Generator::new();
        let global = DeclId::new(0);
        let local = DeclId::new(1);

        g.put_value(global, GenValue::Global(lang.intern("g")));

        g.begin_function(&lang, lang.intern("f"));
        g.put_value(local, GenValue::Temp(0));
        assert!(g.seen_decl(local));
        assert!(g.seen_decl(global));
        g.end_function();

        assert!(!g.seen_decl(local));
        assert!(g.seen_decl(global));
    }

    #[test]
    fn finish_joins_emitted_lines() {
        let mut g = Generator::new();
        g.emit("a");
        g.emit("b");
        assert_eq!(g.finish(), "a\nb\n");
    }

    #[test]
    fn temporaries_are_distinct() {
        let mut g = Generator::new();
        assert_eq!(g.fresh_temp(), GenValue::Temp(0));
        assert_eq!(g.fresh_temp(), GenValue::Temp(1));
    }
}
