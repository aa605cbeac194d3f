//! Type relations: identity, subtyping and assignability.
//!
//! All three share one worker, [`RelationChecker`], parameterized by
//! [`RelationKind`]. Object comparisons are memoized per kind in
//! [`RelationCaches`]; a pair found in progress is assumed related, which is
//! how recursive types such as `interface Node { next: Node }` terminate.
//!
//! Error types are compatible with everything in every mode so one bad
//! reference does not cascade.

mod cache;
mod checker;
mod comparison;
mod structural;

pub use cache::{CacheEntry, RelationCaches};
pub use checker::RelationChecker;
pub use comparison::{ComparisonFlags, TypeComparisonInfo};

use crate::db::TypeDatabase;
use tyre_binder::TypeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Identical,
    Subtype,
    Assignable,
}

impl RelationKind {
    #[inline]
    #[must_use]
    pub const fn is_assignable(self) -> bool {
        matches!(self, Self::Assignable)
    }
}

pub fn is_identical<D: TypeDatabase + ?Sized>(db: &mut D, source: TypeId, target: TypeId) -> bool {
    RelationChecker::new(db, RelationKind::Identical).relate(source, target, None)
}

pub fn is_subtype<D: TypeDatabase + ?Sized>(db: &mut D, source: TypeId, target: TypeId) -> bool {
    RelationChecker::new(db, RelationKind::Subtype).relate(source, target, None)
}

pub fn is_assignable<D: TypeDatabase + ?Sized>(db: &mut D, source: TypeId, target: TypeId) -> bool {
    RelationChecker::new(db, RelationKind::Assignable).relate(source, target, None)
}

/// Like [`is_assignable`], recording the failure chain in `info`.
pub fn is_assignable_with_info<D: TypeDatabase + ?Sized>(
    db: &mut D,
    source: TypeId,
    target: TypeId,
    info: &mut TypeComparisonInfo,
) -> bool {
    RelationChecker::new(db, RelationKind::Assignable).relate(source, target, Some(info))
}

pub fn is_subtype_with_info<D: TypeDatabase + ?Sized>(
    db: &mut D,
    source: TypeId,
    target: TypeId,
    info: &mut TypeComparisonInfo,
) -> bool {
    RelationChecker::new(db, RelationKind::Subtype).relate(source, target, Some(info))
}
