//! The resolver instance.
//!
//! `CheckerState` owns the symbol arena handed over by the binder, the solver
//! caches, the per-node memo, the resolution context and the diagnostic
//! collector. It implements [`TypeDatabase`], so the solver resolves symbols
//! lazily through it.

use crate::chain::SemanticInfoChain;
use crate::context::{ContextFlags, ContextScope, ResolutionContext};
use crate::declared::DeferredWork;
use crate::diagnostics::DiagnosticCollector;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use tracing::{debug, info_span};
use tyre_binder::{
    BoundProgram, DeclFilter, DeclId, Declaration, DeclarationTree, SignatureId, SymbolArena,
    TypeId, TypeKind, ValueId,
};
use tyre_common::{CompilationSettings, Diagnostic, Interner};
use tyre_solver::{GlobalType, SolverCaches, TypeDatabase};
use tyre_syntax::{NodeArena, NodeData, NodeIndex, Program, UnitId};

/// Bind-independent checking of a whole program.
///
/// Consumes the binder output and returns every diagnostic, in report order.
pub fn type_check_program(
    program: &Program,
    bound: BoundProgram,
    settings: CompilationSettings,
) -> Vec<Diagnostic> {
    let BoundProgram {
        declarations,
        symbols,
    } = bound;
    let mut checker = CheckerState::new(program, &declarations, symbols, settings);
    checker.check_program();
    checker.take_diagnostics()
}

pub struct CheckerState<'a> {
    pub(crate) program: &'a Program,
    pub(crate) declarations: &'a DeclarationTree,
    pub symbols: SymbolArena,
    pub(crate) caches: SolverCaches,
    pub settings: CompilationSettings,
    pub chain: SemanticInfoChain,
    pub ctx: ResolutionContext,
    pub diagnostics: DiagnosticCollector,
    pub(crate) deferred: VecDeque<DeferredWork>,
    /// Aliases whose target is being resolved, innermost last.
    pub(crate) alias_stack: Vec<TypeId>,
    /// Single-signature object types used to compare overloads.
    pub(crate) signature_objects: FxHashMap<SignatureId, TypeId>,
    globals: FxHashMap<GlobalType, Option<TypeId>>,
}

impl<'a> CheckerState<'a> {
    pub fn new(
        program: &'a Program,
        declarations: &'a DeclarationTree,
        symbols: SymbolArena,
        settings: CompilationSettings,
    ) -> Self {
        Self {
            program,
            declarations,
            symbols,
            caches: SolverCaches::new(),
            settings,
            chain: SemanticInfoChain::new(),
            ctx: ResolutionContext::new(UnitId(0)),
            diagnostics: DiagnosticCollector::new(),
            deferred: VecDeque::new(),
            alias_stack: Vec::new(),
            signature_objects: FxHashMap::default(),
            globals: FxHashMap::default(),
        }
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Check every unit, then start a new epoch.
    pub fn check_program(&mut self) {
        let _span = info_span!("check_program", units = self.program.unit_count()).entered();
        let units: Vec<UnitId> = self.program.unit_ids().collect();
        for unit in units {
            self.type_check_unit(unit);
        }
        self.chain.advance_epoch();
    }

    /// Check the unit at `path`. Returns false when no such unit exists.
    pub fn type_check(&mut self, path: &str) -> bool {
        match self.program.unit_by_path(path) {
            Some(unit) => {
                self.type_check_unit(unit);
                true
            }
            None => false,
        }
    }

    /// Walk one unit with reporting on. Idempotent within an epoch.
    pub fn type_check_unit(&mut self, unit: UnitId) {
        if !self.chain.mark_unit_checked(unit) {
            return;
        }
        let source = self.program.unit(unit);
        debug!(path = source.path(), "type checking unit");
        let root = source.root();
        {
            let mut scope = ContextScope::clean(self);
            scope.ctx.unit = unit;
            scope.ctx.enclosing = scope.declarations.unit_root(unit);
            scope.ctx.flags = ContextFlags::TYPE_CHECK;
            scope.resolve_ast(root, false);
        }
        self.drain_deferred_work();
    }

    /// Type of an arbitrary node, resolved in its lexical environment without
    /// reporting. Used by hosts that query types outside of a check pass.
    pub fn resolve(&mut self, unit: UnitId, node: NodeIndex) -> TypeId {
        let enclosing = self.enclosing_declaration(unit, node);
        let ty = {
            let mut scope = ContextScope::clean(self);
            scope.ctx.unit = unit;
            scope.ctx.enclosing = enclosing;
            scope.resolve_ast(node, false)
        };
        self.drain_deferred_work();
        ty
    }

    /// The memoized type of a node, if any walk has reached it.
    #[must_use]
    pub fn type_of_node(&self, unit: UnitId, node: NodeIndex) -> Option<TypeId> {
        self.chain.node_type((unit, node))
    }

    /// Signature chosen for a call or `new` node.
    #[must_use]
    pub fn call_signature_of(&self, unit: UnitId, node: NodeIndex) -> Option<SignatureId> {
        self.chain.call_signature((unit, node))
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.as_slice()
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Run `f` with context changes that are undone afterwards.
    pub fn scope(&mut self) -> ContextScope<'_, 'a> {
        ContextScope::new(self)
    }

    pub(crate) fn decl(&self, id: DeclId) -> &'a Declaration {
        let tree: &'a DeclarationTree = self.declarations;
        tree.get(id)
    }

    pub(crate) fn arena(&self, unit: UnitId) -> &'a NodeArena {
        let program: &'a Program = self.program;
        program.unit(unit).arena()
    }

    /// Payload of `node` in the unit being walked.
    pub(crate) fn node_data(&self, node: NodeIndex) -> Option<&'a NodeData> {
        self.arena(self.ctx.unit).data(node)
    }

    /// Payload of the node a declaration was created for.
    pub(crate) fn decl_data(&self, id: DeclId) -> Option<&'a NodeData> {
        let decl = self.decl(id);
        self.arena(decl.unit).data(decl.node)
    }

    /// Declaration created for `node` in the unit being walked.
    pub(crate) fn declaration_of(&self, node: NodeIndex) -> Option<DeclId> {
        self.declarations.declaration_for_node(self.ctx.unit, node)
    }
}

// =============================================================================
// TypeDatabase
// =============================================================================

impl TypeDatabase for CheckerState<'_> {
    fn symbols(&self) -> &SymbolArena {
        &self.symbols
    }

    fn symbols_mut(&mut self) -> &mut SymbolArena {
        &mut self.symbols
    }

    fn interner(&self) -> &Interner {
        self.program.interner()
    }

    fn caches(&mut self) -> &mut SolverCaches {
        &mut self.caches
    }

    fn resolve_type(&mut self, ty: TypeId) -> TypeId {
        self.resolve_type_symbol(ty)
    }

    fn value_type(&mut self, value: ValueId) -> TypeId {
        self.resolve_value_symbol(value)
    }

    fn resolve_signature(&mut self, signature: SignatureId) {
        self.resolve_signature_symbol(signature);
    }

    fn global_type(&mut self, global: GlobalType) -> Option<TypeId> {
        if let Some(&cached) = self.globals.get(&global) {
            return cached;
        }
        let found = self
            .program
            .interner()
            .lookup(global.name())
            .and_then(|name| self.lookup_global(name, DeclFilter::Type))
            .and_then(|decl| self.type_of_declaration(decl))
            .filter(|&ty| {
                matches!(
                    self.symbols.kind(ty),
                    TypeKind::Interface | TypeKind::Class
                )
            });
        debug!(global = global.name(), found = ?found, "global type lookup");
        self.globals.insert(global, found);
        found
    }
}
