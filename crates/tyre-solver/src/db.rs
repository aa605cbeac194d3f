//! The database seam between the solver and the checker.

use crate::instantiate::SpecializationCache;
use crate::relations::RelationCaches;
use tyre_binder::{SignatureId, SymbolArena, TypeId, ValueId};
use tyre_common::Interner;

/// Global interfaces that back apparent types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlobalType {
    Object,
    Function,
    Number,
    String,
    Boolean,
    Array,
}

impl GlobalType {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Object => "Object",
            Self::Function => "Function",
            Self::Number => "Number",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Array => "Array",
        }
    }
}

/// Memo tables owned by one resolver instance.
#[derive(Debug, Default)]
pub struct SolverCaches {
    pub relations: RelationCaches,
    pub specializations: SpecializationCache,
}

impl SolverCaches {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// What the solver needs from its host.
///
/// Every `resolve_*` method must tolerate re-entrancy: a symbol that is
/// currently being resolved is returned as-is.
pub trait TypeDatabase {
    fn symbols(&self) -> &SymbolArena;

    fn symbols_mut(&mut self) -> &mut SymbolArena;

    fn interner(&self) -> &Interner;

    fn caches(&mut self) -> &mut SolverCaches;

    /// Bring a type to its resolved state (heritage, members and signatures;
    /// specialized types get populated). Aliases resolve to their target,
    /// which is returned.
    fn resolve_type(&mut self, ty: TypeId) -> TypeId;

    /// The type of a value, resolving it on demand. `any` while the value is
    /// still being resolved.
    fn value_type(&mut self, value: ValueId) -> TypeId;

    /// Resolve parameter and return types of a signature.
    fn resolve_signature(&mut self, signature: SignatureId);

    fn global_type(&mut self, global: GlobalType) -> Option<TypeId>;

    /// Return type of a resolved signature, `any` when missing.
    fn return_type(&mut self, signature: SignatureId) -> TypeId {
        self.resolve_signature(signature);
        self.symbols()
            .signature(signature)
            .return_type
            .unwrap_or(TypeId::ANY)
    }
}
