//! Apparent types and member lookup.
//!
//! Primitives, enums and arrays have no members of their own; property access
//! and structural comparison see them through the global interfaces that
//! describe them. Every object type additionally sees the members of the
//! global `Object`, and anything with call or construct signatures those of
//! the global `Function`.

use crate::db::{GlobalType, TypeDatabase};
use crate::instantiate::specialize_type;
use tyre_binder::{PrimitiveKind, SignatureId, SignatureKind, TypeId, TypeKind, ValueId};
use tyre_common::Atom;

/// Key type of an index signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexKind {
    String,
    Number,
}

impl IndexKind {
    #[must_use]
    pub const fn key_type(self) -> TypeId {
        match self {
            Self::String => TypeId::STRING,
            Self::Number => TypeId::NUMBER,
        }
    }
}

/// Bound on constraint chains followed when a type parameter is constrained
/// by another type parameter.
const MAX_CONSTRAINT_CHAIN: usize = 32;

/// The type whose members describe values of `ty`.
pub fn apparent_type<D: TypeDatabase + ?Sized>(db: &mut D, ty: TypeId) -> TypeId {
    let mut current = ty;
    for _ in 0..MAX_CONSTRAINT_CHAIN {
        let global = match db.symbols().kind(current) {
            TypeKind::Primitive(PrimitiveKind::Any) => return TypeId::ANY,
            TypeKind::Primitive(PrimitiveKind::Number) | TypeKind::Enum => GlobalType::Number,
            TypeKind::Primitive(PrimitiveKind::String) => GlobalType::String,
            TypeKind::Primitive(PrimitiveKind::Boolean) => GlobalType::Boolean,
            TypeKind::Primitive(_) => return TypeId::EMPTY_OBJECT,
            TypeKind::Array { element } => {
                return match db.global_type(GlobalType::Array) {
                    Some(array) => specialize_type(db, array, &[element]),
                    None => TypeId::EMPTY_OBJECT,
                };
            }
            TypeKind::TypeParameter => {
                match db.symbols().ty(current).constraint {
                    Some(constraint) => current = constraint,
                    None => return TypeId::EMPTY_OBJECT,
                }
                continue;
            }
            TypeKind::Alias => {
                let target = db.resolve_type(current);
                if target == current {
                    return current;
                }
                current = target;
                continue;
            }
            _ => return current,
        };
        return db.global_type(global).unwrap_or(TypeId::EMPTY_OBJECT);
    }
    TypeId::EMPTY_OBJECT
}

/// Look up `name` on `ty`: own members first, then `Function` (for types with
/// signatures), then `Object`.
pub fn find_member<D: TypeDatabase + ?Sized>(db: &mut D, ty: TypeId, name: Atom) -> Option<ValueId> {
    let ty = apparent_type(db, ty);
    let ty = db.resolve_type(ty);
    let symbol = db.symbols().ty(ty);
    if let Some(member) = symbol.members.get(name) {
        return Some(member);
    }
    let callable = !symbol.call_signatures.is_empty() || !symbol.construct_signatures.is_empty();

    if callable
        && let Some(function) = db.global_type(GlobalType::Function)
        && function != ty
    {
        let function = db.resolve_type(function);
        if let Some(member) = db.symbols().ty(function).members.get(name) {
            return Some(member);
        }
    }
    let object = db.global_type(GlobalType::Object)?;
    if object == ty {
        return None;
    }
    let object = db.resolve_type(object);
    db.symbols().ty(object).members.get(name)
}

/// Signatures of `kind` on the apparent type of `ty`.
pub fn signatures_of<D: TypeDatabase + ?Sized>(
    db: &mut D,
    ty: TypeId,
    kind: SignatureKind,
) -> Vec<SignatureId> {
    let ty = apparent_type(db, ty);
    let ty = db.resolve_type(ty);
    let symbol = db.symbols().ty(ty);
    match kind {
        SignatureKind::Call => symbol.call_signatures.clone(),
        SignatureKind::Construct => symbol.construct_signatures.clone(),
        SignatureKind::Index => symbol.index_signatures.clone(),
    }
}

/// The index signature of `ty` keyed by `kind`, if declared.
pub fn index_signature_of<D: TypeDatabase + ?Sized>(
    db: &mut D,
    ty: TypeId,
    kind: IndexKind,
) -> Option<SignatureId> {
    let key = kind.key_type();
    signatures_of(db, ty, SignatureKind::Index)
        .into_iter()
        .find(|&sig| {
            db.resolve_signature(sig);
            let first = db.symbols().signature(sig).parameters.first().copied();
            first.is_some_and(|param| db.value_type(param) == key)
        })
}
