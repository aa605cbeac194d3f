//! Best common type and widening.

use crate::db::TypeDatabase;
use crate::relations::is_subtype;
use tyre_binder::{TypeId, TypeKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BestCommonType {
    pub ty: TypeId,
    /// False when no candidate is a supertype of all the others and `ty` is
    /// the `{}` fallback.
    pub converged: bool,
}

/// The widest candidate that every other candidate is a subtype of.
///
/// `null` and `undefined` are absorbed by any other candidate. Each candidate
/// is tried as the starting point of the reduction before falling back to
/// `{}`. An empty list yields `undefined`.
pub fn best_common_type<D: TypeDatabase + ?Sized>(db: &mut D, candidates: &[TypeId]) -> BestCommonType {
    let Some(&first) = candidates.first() else {
        return BestCommonType {
            ty: TypeId::UNDEFINED,
            converged: true,
        };
    };
    let relevant: Vec<TypeId> = candidates
        .iter()
        .copied()
        .filter(|&ty| ty != TypeId::NULL && ty != TypeId::UNDEFINED)
        .collect();
    if relevant.is_empty() {
        let ty = if candidates.contains(&TypeId::NULL) {
            TypeId::NULL
        } else {
            first
        };
        return BestCommonType { ty, converged: true };
    }

    'start: for &start in &relevant {
        let mut best = start;
        for &candidate in &relevant {
            if is_subtype(db, candidate, best) {
                continue;
            }
            if is_subtype(db, best, candidate) {
                best = candidate;
                continue;
            }
            continue 'start;
        }
        return BestCommonType {
            ty: best,
            converged: true,
        };
    }

    BestCommonType {
        ty: TypeId::EMPTY_OBJECT,
        converged: false,
    }
}

/// `null` and `undefined` widen to `any`, also as array elements.
pub fn widen<D: TypeDatabase + ?Sized>(db: &mut D, ty: TypeId) -> TypeId {
    if ty == TypeId::NULL || ty == TypeId::UNDEFINED {
        return TypeId::ANY;
    }
    if let TypeKind::Array { element } = db.symbols().kind(ty) {
        let widened = widen(db, element);
        if widened != element {
            return db.symbols_mut().array_of(widened);
        }
    }
    ty
}
