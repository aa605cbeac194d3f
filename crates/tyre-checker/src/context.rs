//! The resolution context.
//!
//! Everything a recursive resolution needs besides the symbol arena: the
//! contextual-type frames, the scalar mode flags, the enclosing declaration
//! and the unit being walked. Changes are made through [`ContextScope`],
//! which snapshots the context on creation and restores it on drop, so no
//! early return can leak a pushed frame or a flag.

use crate::state::CheckerState;
use bitflags::bitflags;
use std::ops::{Deref, DerefMut};
use tyre_binder::{DeclId, TypeId, ValueId};
use tyre_common::Diagnostic;
use tyre_solver::TypeSubstitution;
use tyre_syntax::UnitId;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ContextFlags: u8 {
        /// Diagnostics are reported instead of dropped.
        const TYPE_CHECK = 1 << 0;
        /// Resolving the arguments of a `super(...)` call.
        const RESOLVING_SUPER_CALL_ARGS = 1 << 1;
        /// Resolving parameter initializers of a class constructor.
        const IN_CONSTRUCTOR_ARGUMENTS = 1 << 2;
    }
}

/// One contextual-typing frame.
#[derive(Clone, Debug, Default)]
pub struct ContextFrame {
    /// The contextual type, `None` for a frame that masks an outer one.
    pub ty: Option<TypeId>,
    /// Results computed under this frame are discarded: no memo writes, no
    /// signature commits, diagnostics to the provisional buffer.
    pub provisional: bool,
    /// Applied to `ty` when it is read (contextual types that still mention
    /// the type parameters of a signature under inference).
    pub substitution: Option<TypeSubstitution>,
}

impl ContextFrame {
    #[must_use]
    pub fn new(ty: Option<TypeId>) -> Self {
        Self {
            ty,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn provisional(ty: Option<TypeId>) -> Self {
        Self {
            ty,
            provisional: true,
            substitution: None,
        }
    }

    #[must_use]
    pub fn with_substitution(mut self, substitution: TypeSubstitution) -> Self {
        self.substitution = Some(substitution);
        self
    }
}

#[derive(Debug)]
pub struct ResolutionContext {
    pub flags: ContextFlags,
    pub unit: UnitId,
    /// Innermost declaration around the node being resolved; name lookup
    /// starts here.
    pub enclosing: Option<DeclId>,
    frames: Vec<ContextFrame>,
    /// Parameter types of provisionally typed function expressions.
    overrides: Vec<(ValueId, TypeId)>,
    /// Types of locals declared inside a function expression that is being
    /// typed provisionally. Outlive the scope that computed them and are
    /// dropped when the scope that started the provisional typing ends.
    speculative_locals: Vec<(ValueId, TypeId)>,
    pub(crate) provisional_errors: Vec<Diagnostic>,
}

#[derive(Debug)]
pub(crate) struct ContextSnapshot {
    flags: ContextFlags,
    unit: UnitId,
    enclosing: Option<DeclId>,
    frame_depth: usize,
    stashed_frames: Option<Vec<ContextFrame>>,
    override_depth: usize,
    speculative_local_depth: Option<usize>,
}

impl ResolutionContext {
    #[must_use]
    pub fn new(unit: UnitId) -> Self {
        Self {
            flags: ContextFlags::empty(),
            unit,
            enclosing: None,
            frames: Vec::new(),
            overrides: Vec::new(),
            speculative_locals: Vec::new(),
            provisional_errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_checking(&self) -> bool {
        self.flags.contains(ContextFlags::TYPE_CHECK)
    }

    /// Whether the innermost frame is provisional. Provisionality is
    /// inherited: a frame pushed inside a provisional one is provisional.
    #[must_use]
    pub fn is_provisional(&self) -> bool {
        self.frames.last().is_some_and(|frame| frame.provisional)
    }

    pub fn push_frame(&mut self, mut frame: ContextFrame) {
        frame.provisional |= self.is_provisional();
        self.frames.push(frame);
    }

    #[must_use]
    pub fn top_frame(&self) -> Option<&ContextFrame> {
        self.frames.last()
    }

    #[must_use]
    pub fn frame_depth(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn push_override(&mut self, value: ValueId, ty: TypeId) {
        self.overrides.push((value, ty));
    }

    #[must_use]
    pub fn value_override(&self, value: ValueId) -> Option<TypeId> {
        self.overrides
            .iter()
            .rev()
            .chain(self.speculative_locals.iter().rev())
            .find(|(v, _)| *v == value)
            .map(|&(_, ty)| ty)
    }

    /// Record a speculative local type; returns the slot for [`Self::set_speculative_local`].
    pub(crate) fn push_speculative_local(&mut self, value: ValueId, ty: TypeId) -> usize {
        self.speculative_locals.push((value, ty));
        self.speculative_locals.len() - 1
    }

    pub(crate) fn set_speculative_local(&mut self, slot: usize, ty: TypeId) {
        if let Some(entry) = self.speculative_locals.get_mut(slot) {
            entry.1 = ty;
        }
    }

    #[must_use]
    pub fn has_overrides(&self) -> bool {
        !self.overrides.is_empty() || !self.speculative_locals.is_empty()
    }

    pub(crate) fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            flags: self.flags,
            unit: self.unit,
            enclosing: self.enclosing,
            frame_depth: self.frames.len(),
            stashed_frames: None,
            override_depth: self.overrides.len(),
            speculative_local_depth: None,
        }
    }

    /// Snapshot and then clear everything that could make a declaration's
    /// type depend on where it was first requested.
    pub(crate) fn snapshot_clean(&mut self) -> ContextSnapshot {
        let mut saved = self.snapshot();
        saved.stashed_frames = Some(std::mem::take(&mut self.frames));
        self.flags = ContextFlags::empty();
        saved
    }

    pub(crate) fn restore(&mut self, saved: &mut ContextSnapshot) {
        self.flags = saved.flags;
        self.unit = saved.unit;
        self.enclosing = saved.enclosing;
        match saved.stashed_frames.take() {
            Some(frames) => self.frames = frames,
            None => self.frames.truncate(saved.frame_depth),
        }
        self.overrides.truncate(saved.override_depth);
        if let Some(depth) = saved.speculative_local_depth {
            self.speculative_locals.truncate(depth);
        }
    }
}

// =============================================================================
// Scoped context changes
// =============================================================================

/// A `CheckerState` borrow whose context changes are undone on drop.
pub struct ContextScope<'s, 'a> {
    state: &'s mut CheckerState<'a>,
    saved: ContextSnapshot,
}

impl<'s, 'a> ContextScope<'s, 'a> {
    pub(crate) fn new(state: &'s mut CheckerState<'a>) -> Self {
        let saved = state.ctx.snapshot();
        Self { state, saved }
    }

    pub(crate) fn clean(state: &'s mut CheckerState<'a>) -> Self {
        let saved = state.ctx.snapshot_clean();
        Self { state, saved }
    }

    /// Like [`Self::new`], and also discards the speculative local types recorded
    /// while the scope was alive.
    pub(crate) fn speculative(state: &'s mut CheckerState<'a>) -> Self {
        let mut saved = state.ctx.snapshot();
        saved.speculative_local_depth = Some(state.ctx.speculative_locals.len());
        Self { state, saved }
    }
}

impl<'a> Deref for ContextScope<'_, 'a> {
    type Target = CheckerState<'a>;

    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl DerefMut for ContextScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}

impl Drop for ContextScope<'_, '_> {
    fn drop(&mut self) {
        self.state.ctx.restore(&mut self.saved);
    }
}
