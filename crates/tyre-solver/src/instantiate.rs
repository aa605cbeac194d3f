//! Specialization and instantiation.
//!
//! A *specialization* is a type or signature produced from a generic root by a
//! `(type parameter, argument)` mapping. Specializations are memoized by
//! `(root, mapping)`, so `A<number>` is one `TypeId` no matter how often it is
//! written.
//!
//! Specialized types are created empty and populated lazily by
//! [`populate_specialization`] once the root has resolved, which keeps
//! self-referential generics (`interface List<T> { next: List<T> }`) finite:
//! the member types of `List<number>` refer back to the cached instance.

use crate::db::TypeDatabase;
use crate::recursion::{RecursionGuard, RecursionProfile};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;
use tyre_binder::{
    ResolutionState, SignatureId, SignatureSpecialization, SignatureSymbol, Specialization,
    SymbolFlags, TypeId, TypeKind, TypeSymbol,
};
use tyre_common::Atom;
use tyre_common::limits::{STACK_GROWTH_SIZE, STACK_RED_ZONE};

type Mapping = SmallVec<[(TypeId, TypeId); 4]>;

// =============================================================================
// TypeSubstitution
// =============================================================================

/// Ordered `(type parameter, argument)` pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypeSubstitution {
    map: Mapping,
}

impl TypeSubstitution {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair `params` with `args` positionally; missing arguments are `any`.
    #[must_use]
    pub fn from_pairs(params: &[TypeId], args: &[TypeId]) -> Self {
        let map = params
            .iter()
            .enumerate()
            .map(|(i, &param)| (param, args.get(i).copied().unwrap_or(TypeId::ANY)))
            .collect();
        Self { map }
    }

    fn from_mapping(map: Mapping) -> Self {
        Self { map }
    }

    /// Add or replace the argument for `param`.
    pub fn insert(&mut self, param: TypeId, arg: TypeId) {
        if let Some(entry) = self.map.iter_mut().find(|(p, _)| *p == param) {
            entry.1 = arg;
        } else {
            self.map.push((param, arg));
        }
    }

    #[must_use]
    pub fn get(&self, param: TypeId) -> Option<TypeId> {
        self.map
            .iter()
            .find_map(|&(p, arg)| (p == param).then_some(arg))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, TypeId)> + '_ {
        self.map.iter().copied()
    }

    /// Every parameter maps to itself.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.map.iter().all(|&(param, arg)| param == arg)
    }

    #[must_use]
    pub fn params(&self) -> SmallVec<[TypeId; 4]> {
        self.map.iter().map(|&(param, _)| param).collect()
    }
}

// =============================================================================
// SpecializationCache
// =============================================================================

#[derive(Debug, Default)]
pub struct SpecializationCache {
    types: FxHashMap<(TypeId, Mapping), TypeId>,
    signatures: FxHashMap<(SignatureId, Mapping), SignatureId>,
}

impl SpecializationCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }
}

// =============================================================================
// Types
// =============================================================================

/// `root<args>`. Returns `root` itself when it is not generic or when every
/// argument is the corresponding type parameter.
pub fn specialize_type<D: TypeDatabase + ?Sized>(
    db: &mut D,
    root: TypeId,
    args: &[TypeId],
) -> TypeId {
    let params = db.symbols().ty(root).type_parameters.clone();
    if params.is_empty() {
        return root;
    }
    let substitution = TypeSubstitution::from_pairs(&params, args);
    if substitution.is_identity() {
        return root;
    }
    let arguments = substitution.iter().map(|(_, arg)| arg).collect();
    specialize_with_mapping(db, root, arguments, substitution.map)
}

fn specialize_with_mapping<D: TypeDatabase + ?Sized>(
    db: &mut D,
    root: TypeId,
    arguments: Vec<TypeId>,
    mapping: Mapping,
) -> TypeId {
    let key = (root, mapping);
    if let Some(&existing) = db.caches().specializations.types.get(&key) {
        return existing;
    }
    let (root, mapping) = key;

    let source = db.symbols().ty(root);
    let mut symbol = TypeSymbol::new(source.kind, source.name);
    symbol.flags = source.flags - SymbolFlags::INHERITANCE_PENDING;
    symbol.declarations = source.declarations.clone();
    symbol.value = source.value;
    symbol.associated = source.associated;
    symbol.specialization = Some(Specialization {
        root,
        arguments,
        mapping: mapping.clone(),
    });

    let id = db.symbols_mut().add_type(symbol);
    db.caches()
        .specializations
        .types
        .insert((root, mapping), id);
    trace!(root = ?root, specialized = ?id, "created specialization");
    id
}

/// Fill in members, signatures and heritage of a specialized type from its
/// root. No-op for types that are not pending specializations, and while the
/// root has not finished resolving.
pub fn populate_specialization<D: TypeDatabase + ?Sized>(db: &mut D, ty: TypeId) {
    let symbol = db.symbols().ty(ty);
    if symbol.state != ResolutionState::Unresolved {
        return;
    }
    let Some(spec) = symbol.specialization.clone() else {
        return;
    };
    let root = db.resolve_type(spec.root);
    let root_symbol = db.symbols().ty(root);
    if !root_symbol.state.is_resolved()
        || root_symbol.flags.contains(SymbolFlags::INHERITANCE_PENDING)
    {
        return;
    }

    let members: Vec<(Atom, tyre_binder::ValueId)> = root_symbol.members.iter().collect();
    let call_signatures = root_symbol.call_signatures.clone();
    let construct_signatures = root_symbol.construct_signatures.clone();
    let index_signatures = root_symbol.index_signatures.clone();
    let extends = root_symbol.extends.clone();
    let implements = root_symbol.implements.clone();
    let base_flags = root_symbol.flags & SymbolFlags::BASE_CYCLE;

    db.symbols_mut().ty_mut(ty).state = ResolutionState::InResolution;
    let substitution = TypeSubstitution::from_mapping(spec.mapping);

    for (name, member) in members {
        let member_type = db.value_type(member);
        let specialized = instantiate_type(db, member_type, &substitution);
        let value = if specialized == member_type {
            member
        } else {
            let mut copy = db.symbols().value(member).clone();
            copy.ty = Some(specialized);
            copy.state = ResolutionState::Resolved;
            copy.container = Some(ty);
            db.symbols_mut().add_value(copy)
        };
        db.symbols_mut().ty_mut(ty).members.insert(name, value);
    }

    let call_signatures = instantiate_signatures(db, &call_signatures, &substitution);
    let construct_signatures = instantiate_signatures(db, &construct_signatures, &substitution);
    let index_signatures = instantiate_signatures(db, &index_signatures, &substitution);
    let extends: Vec<TypeId> = extends
        .into_iter()
        .map(|base| instantiate_type(db, base, &substitution))
        .collect();
    let implements: Vec<TypeId> = implements
        .into_iter()
        .map(|base| instantiate_type(db, base, &substitution))
        .collect();

    let symbol = db.symbols_mut().ty_mut(ty);
    symbol.call_signatures = call_signatures;
    symbol.construct_signatures = construct_signatures;
    symbol.index_signatures = index_signatures;
    symbol.extends = extends;
    symbol.implements = implements;
    symbol.flags |= base_flags;
    symbol.base_state = ResolutionState::Resolved;
    symbol.state = ResolutionState::Resolved;
    trace!(ty = ?ty, root = ?root, "populated specialization");
}

fn instantiate_signatures<D: TypeDatabase + ?Sized>(
    db: &mut D,
    signatures: &[SignatureId],
    substitution: &TypeSubstitution,
) -> Vec<SignatureId> {
    signatures
        .iter()
        .map(|&sig| instantiate_signature(db, sig, substitution))
        .collect()
}

/// Replace type parameters in `ty` per `substitution`.
///
/// Named generic types are re-specialized with substituted arguments.
/// Anonymous object types that mention a substituted parameter become a
/// specialization of their root restricted to the parameters they mention.
pub fn instantiate_type<D: TypeDatabase + ?Sized>(
    db: &mut D,
    ty: TypeId,
    substitution: &TypeSubstitution,
) -> TypeId {
    if substitution.is_empty() {
        return ty;
    }
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH_SIZE, || {
        instantiate_type_inner(db, ty, substitution)
    })
}

fn instantiate_type_inner<D: TypeDatabase + ?Sized>(
    db: &mut D,
    ty: TypeId,
    substitution: &TypeSubstitution,
) -> TypeId {
    let symbol = db.symbols().ty(ty);
    match symbol.kind {
        TypeKind::TypeParameter => substitution.get(ty).unwrap_or(ty),
        TypeKind::Array { element } => {
            let instantiated = instantiate_type(db, element, substitution);
            if instantiated == element {
                ty
            } else {
                db.symbols_mut().array_of(instantiated)
            }
        }
        TypeKind::Class | TypeKind::Interface | TypeKind::ObjectType => {
            if let Some(spec) = &symbol.specialization
                && !spec.arguments.is_empty()
            {
                let root = spec.root;
                let arguments = spec.arguments.clone();
                let instantiated: Vec<TypeId> = arguments
                    .iter()
                    .map(|&arg| instantiate_type(db, arg, substitution))
                    .collect();
                if instantiated == arguments {
                    return ty;
                }
                return specialize_type(db, root, &instantiated);
            }
            if symbol.is_generic() {
                let arguments: Vec<TypeId> = symbol
                    .type_parameters
                    .iter()
                    .map(|&param| substitution.get(param).unwrap_or(param))
                    .collect();
                return specialize_type(db, ty, &arguments);
            }
            if matches!(symbol.kind, TypeKind::ObjectType) {
                return instantiate_anonymous(db, ty, substitution);
            }
            ty
        }
        _ => ty,
    }
}

fn instantiate_anonymous<D: TypeDatabase + ?Sized>(
    db: &mut D,
    ty: TypeId,
    substitution: &TypeSubstitution,
) -> TypeId {
    let (root, existing) = match &db.symbols().ty(ty).specialization {
        Some(spec) => (spec.root, spec.mapping.clone()),
        None => (ty, Mapping::new()),
    };

    let mut composed = TypeSubstitution::new();
    for (param, arg) in existing {
        let arg = instantiate_type(db, arg, substitution);
        composed.insert(param, arg);
    }
    for (param, arg) in substitution.iter() {
        if composed.get(param).is_none() {
            composed.insert(param, arg);
        }
    }

    let mentioned = mentioned_type_parameters(db, root, &composed.params());
    let mapping: Mapping = composed
        .iter()
        .filter(|(param, _)| mentioned.contains(param))
        .collect();
    if mapping.is_empty() {
        return ty;
    }
    if mapping.iter().all(|&(param, arg)| param == arg) {
        return root;
    }
    specialize_with_mapping(db, root, Vec::new(), mapping)
}

/// Whether `ty` refers to any of `params`, directly or through members,
/// signatures, array elements or type arguments.
pub fn mentions_type_parameters<D: TypeDatabase + ?Sized>(
    db: &mut D,
    ty: TypeId,
    params: &[TypeId],
) -> bool {
    !params.is_empty() && !mentioned_type_parameters(db, ty, params).is_empty()
}

fn mentioned_type_parameters<D: TypeDatabase + ?Sized>(
    db: &mut D,
    ty: TypeId,
    params: &[TypeId],
) -> SmallVec<[TypeId; 4]> {
    let mut found = SmallVec::new();
    if params.is_empty() {
        return found;
    }
    let mut guard = RecursionGuard::with_profile(RecursionProfile::TypeWalk);
    collect_mentions(db, ty, params, &mut found, &mut guard);
    found
}

fn collect_mentions<D: TypeDatabase + ?Sized>(
    db: &mut D,
    ty: TypeId,
    params: &[TypeId],
    found: &mut SmallVec<[TypeId; 4]>,
    guard: &mut RecursionGuard<TypeId>,
) {
    if found.len() == params.len() || !guard.enter(ty).is_entered() {
        return;
    }
    let symbol = db.symbols().ty(ty);
    match symbol.kind {
        TypeKind::TypeParameter => {
            if params.contains(&ty) && !found.contains(&ty) {
                found.push(ty);
            }
        }
        TypeKind::Array { element } => collect_mentions(db, element, params, found, guard),
        TypeKind::Class | TypeKind::Interface | TypeKind::ObjectType => {
            if let Some(spec) = &symbol.specialization
                && !spec.arguments.is_empty()
            {
                let arguments = spec.arguments.clone();
                for arg in arguments {
                    collect_mentions(db, arg, params, found, guard);
                }
            } else if symbol.is_generic() {
                for &param in &symbol.type_parameters {
                    if params.contains(&param) && !found.contains(&param) {
                        found.push(param);
                    }
                }
            } else if matches!(symbol.kind, TypeKind::ObjectType) {
                collect_structural_mentions(db, ty, params, found, guard);
            }
        }
        _ => {}
    }
    guard.leave(ty);
}

fn collect_structural_mentions<D: TypeDatabase + ?Sized>(
    db: &mut D,
    ty: TypeId,
    params: &[TypeId],
    found: &mut SmallVec<[TypeId; 4]>,
    guard: &mut RecursionGuard<TypeId>,
) {
    let ty = db.resolve_type(ty);
    let symbol = db.symbols().ty(ty);
    let members: Vec<_> = symbol.members.values().collect();
    let signatures: Vec<SignatureId> = symbol
        .call_signatures
        .iter()
        .chain(&symbol.construct_signatures)
        .chain(&symbol.index_signatures)
        .copied()
        .collect();

    for member in members {
        let member_type = db.value_type(member);
        collect_mentions(db, member_type, params, found, guard);
    }
    for sig in signatures {
        db.resolve_signature(sig);
        let parameters = db.symbols().signature(sig).parameters.clone();
        for param in parameters {
            let param_type = db.value_type(param);
            collect_mentions(db, param_type, params, found, guard);
        }
        let return_type = db.return_type(sig);
        collect_mentions(db, return_type, params, found, guard);
    }
}

// =============================================================================
// Signatures
// =============================================================================

/// A copy of `signature` with parameter and return types substituted. The
/// signature's own type parameters survive unless the substitution binds
/// them.
pub fn instantiate_signature<D: TypeDatabase + ?Sized>(
    db: &mut D,
    signature: SignatureId,
    substitution: &TypeSubstitution,
) -> SignatureId {
    if substitution.is_empty() || substitution.is_identity() {
        return signature;
    }
    let key = (signature, substitution.map.clone());
    if let Some(&existing) = db.caches().specializations.signatures.get(&key) {
        return existing;
    }

    db.resolve_signature(signature);
    let source = db.symbols().signature(signature).clone();
    let mut symbol = SignatureSymbol::new(source.kind);
    symbol.declarations = source.declarations.clone();
    symbol.is_definition = source.is_definition;
    symbol.type_parameters = source
        .type_parameters
        .iter()
        .copied()
        .filter(|&param| substitution.get(param).is_none())
        .collect();
    symbol.state = ResolutionState::InResolution;
    symbol.specialization = Some(SignatureSpecialization {
        root: signature,
        mapping: substitution.map.clone(),
    });
    let id = db.symbols_mut().add_signature(symbol);
    db.caches().specializations.signatures.insert(key, id);

    let mut parameters = Vec::with_capacity(source.parameters.len());
    for param in source.parameters {
        let param_type = db.value_type(param);
        let instantiated = instantiate_type(db, param_type, substitution);
        if instantiated == param_type {
            parameters.push(param);
            continue;
        }
        let mut copy = db.symbols().value(param).clone();
        copy.ty = Some(instantiated);
        copy.state = ResolutionState::Resolved;
        parameters.push(db.symbols_mut().add_value(copy));
    }
    let return_type = db.return_type(signature);
    let return_type = instantiate_type(db, return_type, substitution);

    let symbol = db.symbols_mut().signature_mut(id);
    symbol.parameters = parameters;
    symbol.return_type = Some(return_type);
    symbol.state = ResolutionState::Resolved;
    id
}

/// `signature<args>` for a generic signature; `signature` itself otherwise.
pub fn specialize_signature<D: TypeDatabase + ?Sized>(
    db: &mut D,
    signature: SignatureId,
    args: &[TypeId],
) -> SignatureId {
    db.resolve_signature(signature);
    let params = db.symbols().signature(signature).type_parameters.clone();
    if params.is_empty() {
        return signature;
    }
    instantiate_signature(db, signature, &TypeSubstitution::from_pairs(&params, args))
}
