//! A `TypeDatabase` over a hand-built symbol arena.
//!
//! Every type created here is already resolved, except specializations, which
//! populate on `resolve_type` like they do in the checker.

use crate::{GlobalType, SolverCaches, TypeDatabase, populate_specialization};
use rustc_hash::FxHashMap;
use tyre_binder::{
    DeclId, ResolutionState, SignatureId, SignatureKind, SignatureSymbol, SymbolArena,
    SymbolFlags, TypeId, TypeKind, TypeSymbol, ValueId, ValueKind, ValueSymbol,
};
use tyre_common::{Atom, Interner};

pub struct TestDatabase {
    pub symbols: SymbolArena,
    pub interner: Interner,
    pub caches: SolverCaches,
    pub globals: FxHashMap<GlobalType, TypeId>,
    next_decl: u32,
}

impl TypeDatabase for TestDatabase {
    fn symbols(&self) -> &SymbolArena {
        &self.symbols
    }

    fn symbols_mut(&mut self) -> &mut SymbolArena {
        &mut self.symbols
    }

    fn interner(&self) -> &Interner {
        &self.interner
    }

    fn caches(&mut self) -> &mut SolverCaches {
        &mut self.caches
    }

    fn resolve_type(&mut self, ty: TypeId) -> TypeId {
        let mut current = ty;
        while matches!(self.symbols.kind(current), TypeKind::Alias) {
            match self.symbols.ty(current).alias_target {
                Some(target) if target != ty => current = target,
                _ => return TypeId::ERROR,
            }
        }
        populate_specialization(self, current);
        current
    }

    fn value_type(&mut self, value: ValueId) -> TypeId {
        self.symbols.value(value).ty.unwrap_or(TypeId::ANY)
    }

    fn resolve_signature(&mut self, _signature: SignatureId) {}

    fn global_type(&mut self, global: GlobalType) -> Option<TypeId> {
        self.globals.get(&global).copied()
    }
}

impl TestDatabase {
    pub fn new() -> Self {
        Self {
            symbols: SymbolArena::new(),
            interner: Interner::new(),
            caches: SolverCaches::new(),
            globals: FxHashMap::default(),
            next_decl: 0,
        }
    }

    pub fn atom(&mut self, text: &str) -> Atom {
        self.interner.intern(text)
    }

    fn fresh_decl(&mut self) -> DeclId {
        self.next_decl += 1;
        DeclId(self.next_decl)
    }

    fn resolved_type(&mut self, kind: TypeKind, name: &str) -> TypeId {
        let name = self.atom(name);
        let mut symbol = TypeSymbol::new(kind, name);
        symbol.state = ResolutionState::Resolved;
        symbol.base_state = ResolutionState::Resolved;
        let decl = self.fresh_decl();
        symbol.declarations.push(decl);
        self.symbols.add_type(symbol)
    }

    pub fn interface(&mut self, name: &str, members: &[(&str, TypeId)]) -> TypeId {
        let ty = self.resolved_type(TypeKind::Interface, name);
        for &(member, member_type) in members {
            self.add_property(ty, member, member_type, SymbolFlags::empty());
        }
        ty
    }

    pub fn class(&mut self, name: &str, members: &[(&str, TypeId)]) -> TypeId {
        let ty = self.resolved_type(TypeKind::Class, name);
        for &(member, member_type) in members {
            self.add_property(ty, member, member_type, SymbolFlags::empty());
        }
        ty
    }

    pub fn object(&mut self, members: &[(&str, TypeId)]) -> TypeId {
        let ty = self.resolved_type(TypeKind::ObjectType, "");
        for &(member, member_type) in members {
            self.add_property(ty, member, member_type, SymbolFlags::empty());
        }
        ty
    }

    pub fn enum_type(&mut self, name: &str) -> TypeId {
        self.resolved_type(TypeKind::Enum, name)
    }

    pub fn alias(&mut self, name: &str, target: TypeId) -> TypeId {
        let ty = self.resolved_type(TypeKind::Alias, name);
        self.symbols.ty_mut(ty).alias_target = Some(target);
        ty
    }

    pub fn type_param(&mut self, name: &str, constraint: Option<TypeId>) -> TypeId {
        let ty = self.resolved_type(TypeKind::TypeParameter, name);
        self.symbols.ty_mut(ty).constraint = constraint;
        ty
    }

    /// A generic interface with fresh type parameters.
    pub fn generic_interface(&mut self, name: &str, params: &[&str]) -> (TypeId, Vec<TypeId>) {
        let ty = self.resolved_type(TypeKind::Interface, name);
        let params: Vec<TypeId> = params.iter().map(|p| self.type_param(p, None)).collect();
        self.symbols.ty_mut(ty).type_parameters = params.clone();
        (ty, params)
    }

    pub fn add_property(
        &mut self,
        owner: TypeId,
        name: &str,
        ty: TypeId,
        flags: SymbolFlags,
    ) -> ValueId {
        let atom = self.atom(name);
        let mut value = ValueSymbol::new(ValueKind::Property, atom);
        value.flags = flags;
        value.ty = Some(ty);
        value.state = ResolutionState::Resolved;
        value.container = Some(owner);
        let decl = self.fresh_decl();
        value.declarations.push(decl);
        let id = self.symbols.add_value(value);
        self.symbols.ty_mut(owner).members.insert(atom, id);
        id
    }

    /// Share an existing member symbol, as inheritance does.
    pub fn share_member(&mut self, owner: TypeId, from: TypeId, name: &str) {
        let atom = self.atom(name);
        if let Some(member) = self.symbols.ty(from).members.get(atom) {
            self.symbols.ty_mut(owner).members.insert(atom, member);
        }
    }

    pub fn parameter(&mut self, name: &str, ty: TypeId, flags: SymbolFlags) -> ValueId {
        let atom = self.atom(name);
        let mut value = ValueSymbol::new(ValueKind::Parameter, atom);
        value.flags = flags;
        value.ty = Some(ty);
        value.state = ResolutionState::Resolved;
        self.symbols.add_value(value)
    }

    pub fn signature(
        &mut self,
        kind: SignatureKind,
        params: &[(&str, TypeId)],
        return_type: TypeId,
    ) -> SignatureId {
        let parameters = params
            .iter()
            .map(|&(name, ty)| self.parameter(name, ty, SymbolFlags::empty()))
            .collect();
        self.signature_with(kind, parameters, return_type)
    }

    pub fn signature_with(
        &mut self,
        kind: SignatureKind,
        parameters: Vec<ValueId>,
        return_type: TypeId,
    ) -> SignatureId {
        let mut sig = SignatureSymbol::new(kind);
        sig.parameters = parameters;
        sig.return_type = Some(return_type);
        sig.state = ResolutionState::Resolved;
        self.symbols.add_signature(sig)
    }

    /// `(params) => return_type`
    pub fn function_type(&mut self, params: &[(&str, TypeId)], return_type: TypeId) -> TypeId {
        let sig = self.signature(SignatureKind::Call, params, return_type);
        self.callable(sig)
    }

    /// An anonymous type with one call signature.
    pub fn callable(&mut self, sig: SignatureId) -> TypeId {
        let ty = self.resolved_type(TypeKind::ObjectType, "");
        self.symbols.ty_mut(ty).call_signatures.push(sig);
        ty
    }

    pub fn add_index_signature(&mut self, owner: TypeId, key: TypeId, element: TypeId) {
        let sig = self.signature(SignatureKind::Index, &[("key", key)], element);
        self.symbols.ty_mut(owner).index_signatures.push(sig);
    }

    pub fn format(&self, ty: TypeId) -> String {
        crate::TypeFormatter::new(&self.symbols, &self.interner).format(ty)
    }
}
