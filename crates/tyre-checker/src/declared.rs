//! Lazy declaration resolution.
//!
//! Type, value and signature symbols move `Unresolved -> InResolution ->
//! Resolved` the first time they are requested. A request that arrives while
//! its symbol is `InResolution` is a cycle and returns the symbol as it is
//! (or `any` for a value), which is what keeps recursive declarations
//! finite.
//!
//! Declarations always resolve in a clean context positioned at the
//! declaration itself, so their types do not depend on which expression
//! happened to ask first.
//!
//! Classes and interfaces resolve their heritage first (`base_state`), then
//! copy base members in, then resolve their own members. When a base is
//! still in flight the copy is postponed: the type is flagged
//! `INHERITANCE_PENDING` and a work item is queued for the driver.

use crate::context::{ContextFlags, ContextFrame, ContextScope};
use crate::state::CheckerState;
use crate::statements::return_expressions;
use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};
use tyre_binder::{
    DeclId, DeclKind, ResolutionState, SignatureId, SignatureKind, SignatureSymbol, SymbolFlags,
    TypeId, TypeKind, ValueId,
};
use tyre_common::limits::{MAX_DEFERRED_WORK_ITEMS, MAX_VISITING_SET_SIZE};
use tyre_solver::{
    TypeDatabase, TypeSubstitution, best_common_type, instantiate_signature,
    populate_specialization, widen,
};
use tyre_syntax::{NodeData, NodeIndex, ParameterData};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeferredKind {
    /// Copy base members into a class or interface whose base was still
    /// resolving.
    InheritMembers,
}

/// A postponed resolution step, keyed by the declaration it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeferredWork {
    pub decl: DeclId,
    pub kind: DeferredKind,
}

impl<'a> CheckerState<'a> {
    /// A clean context positioned at `decl`.
    pub(crate) fn declaration_scope(&mut self, decl: DeclId) -> ContextScope<'_, 'a> {
        let unit = self.decl(decl).unit;
        let mut scope = ContextScope::clean(self);
        scope.ctx.unit = unit;
        scope.ctx.enclosing = Some(decl);
        scope
    }

    /// Resolve a type annotation node, `None` when absent.
    pub(crate) fn resolve_type_annotation(&mut self, node: NodeIndex) -> Option<TypeId> {
        if node.is_none() {
            None
        } else {
            Some(self.resolve_ast(node, false))
        }
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub(crate) fn resolve_type_symbol(&mut self, ty: TypeId) -> TypeId {
        let symbol = self.symbols.ty(ty);
        let (kind, state, flags) = (symbol.kind, symbol.state, symbol.flags);
        if matches!(kind, TypeKind::Alias) {
            return self.resolve_alias(ty);
        }
        if symbol.specialization.is_some() {
            populate_specialization(self, ty);
            return ty;
        }
        match state {
            ResolutionState::Resolved => {
                if flags.contains(SymbolFlags::INHERITANCE_PENDING) && !self.has_base_in_flight(ty) {
                    self.inherit_members(ty);
                }
                return ty;
            }
            ResolutionState::InResolution => {
                trace!(ty = ty.0, "type requested while resolving");
                return ty;
            }
            ResolutionState::Unresolved => {}
        }
        match kind {
            TypeKind::Class | TypeKind::Interface => self.resolve_class_or_interface(ty),
            TypeKind::ConstructorType => self.resolve_constructor_type(ty),
            TypeKind::ObjectType => self.resolve_object_type(ty),
            TypeKind::TypeParameter => self.resolve_type_parameter(ty),
            _ => {
                let symbol = self.symbols.ty_mut(ty);
                symbol.state = ResolutionState::Resolved;
                symbol.base_state = ResolutionState::Resolved;
            }
        }
        ty
    }

    fn resolve_class_or_interface(&mut self, ty: TypeId) {
        self.symbols.ty_mut(ty).state = ResolutionState::InResolution;
        self.resolve_heritage(ty);
        self.inherit_members(ty);

        let symbol = self.symbols.ty(ty);
        let members: Vec<ValueId> = symbol.members.values().collect();
        let signatures: Vec<SignatureId> = symbol
            .call_signatures
            .iter()
            .chain(&symbol.construct_signatures)
            .chain(&symbol.index_signatures)
            .copied()
            .collect();
        for member in members {
            self.resolve_value_symbol(member);
        }
        for signature in signatures {
            self.resolve_signature_symbol(signature);
        }
        self.symbols.ty_mut(ty).state = ResolutionState::Resolved;
        debug!(
            ty = ty.0,
            name = self.program.interner().resolve(self.symbols.ty(ty).name),
            "resolved class or interface"
        );
    }

    fn resolve_object_type(&mut self, ty: TypeId) {
        self.symbols.ty_mut(ty).state = ResolutionState::InResolution;
        let symbol = self.symbols.ty(ty);
        let members: Vec<ValueId> = symbol.members.values().collect();
        let signatures: Vec<SignatureId> = symbol
            .call_signatures
            .iter()
            .chain(&symbol.construct_signatures)
            .chain(&symbol.index_signatures)
            .copied()
            .collect();
        for member in members {
            self.resolve_value_symbol(member);
        }
        for signature in signatures {
            self.resolve_signature_symbol(signature);
        }
        let symbol = self.symbols.ty_mut(ty);
        symbol.state = ResolutionState::Resolved;
        symbol.base_state = ResolutionState::Resolved;
    }

    fn resolve_type_parameter(&mut self, ty: TypeId) {
        self.symbols.ty_mut(ty).state = ResolutionState::InResolution;
        let decl = self.symbols.ty(ty).declarations.first().copied();
        if let Some(decl) = decl
            && let Some(NodeData::TypeParameter(param)) = self.decl_data(decl)
            && param.constraint.is_some()
        {
            let constraint = self.declaration_scope(decl).resolve_ast(param.constraint, false);
            if constraint != ty && !self.symbols.is_error(constraint) {
                self.symbols.ty_mut(ty).constraint = Some(constraint);
            }
        }
        let symbol = self.symbols.ty_mut(ty);
        symbol.state = ResolutionState::Resolved;
        symbol.base_state = ResolutionState::Resolved;
    }

    /// The target of an alias; the error type when the alias reaches itself.
    fn resolve_alias(&mut self, ty: TypeId) -> TypeId {
        let symbol = self.symbols.ty(ty);
        match symbol.state {
            ResolutionState::Resolved => {
                if symbol.flags.contains(SymbolFlags::ALIAS_CYCLE) {
                    return TypeId::ERROR;
                }
                return symbol.alias_target.unwrap_or(TypeId::ERROR);
            }
            ResolutionState::InResolution => {
                let start = self
                    .alias_stack
                    .iter()
                    .position(|&alias| alias == ty)
                    .unwrap_or(self.alias_stack.len());
                let cycle: Vec<TypeId> = self.alias_stack[start..].to_vec();
                for alias in cycle {
                    self.symbols.ty_mut(alias).flags |= SymbolFlags::ALIAS_CYCLE;
                }
                self.symbols.ty_mut(ty).flags |= SymbolFlags::ALIAS_CYCLE;
                debug!(alias = ty.0, "alias reaches itself");
                return TypeId::ERROR;
            }
            ResolutionState::Unresolved => {}
        }

        let decl = symbol.declarations.first().copied();
        let target_node = match decl.and_then(|decl| self.decl_data(decl)) {
            Some(NodeData::TypeAlias(alias)) => alias.ty,
            _ => NodeIndex::NONE,
        };
        self.symbols.ty_mut(ty).state = ResolutionState::InResolution;
        self.alias_stack.push(ty);
        let target = match decl {
            Some(decl) if target_node.is_some() => {
                self.declaration_scope(decl).resolve_ast(target_node, false)
            }
            _ => TypeId::ERROR,
        };
        self.alias_stack.pop();

        let symbol = self.symbols.ty_mut(ty);
        let cyclic = symbol.flags.contains(SymbolFlags::ALIAS_CYCLE) || target == ty;
        let target = if cyclic { TypeId::ERROR } else { target };
        if cyclic {
            symbol.flags |= SymbolFlags::ALIAS_CYCLE;
        }
        symbol.alias_target = Some(target);
        symbol.state = ResolutionState::Resolved;
        symbol.base_state = ResolutionState::Resolved;
        target
    }

    // =========================================================================
    // Heritage and inheritance
    // =========================================================================

    /// Resolve the `extends` / `implements` lists of a class or interface and
    /// detect base-type cycles.
    pub(crate) fn resolve_heritage(&mut self, ty: TypeId) {
        let symbol = self.symbols.ty(ty);
        if symbol.specialization.is_some() || symbol.base_state != ResolutionState::Unresolved {
            return;
        }
        let declarations = symbol.declarations.clone();
        self.symbols.ty_mut(ty).base_state = ResolutionState::InResolution;

        let mut extends = Vec::new();
        let mut implements = Vec::new();
        for decl in declarations {
            match self.decl_data(decl) {
                Some(NodeData::Class(class)) => {
                    if class.extends.is_some() {
                        let base = self.declaration_scope(decl).resolve_ast(class.extends, false);
                        if self.is_class_type(base) {
                            extends.push(base);
                        }
                    }
                    for node in class.implements.iter() {
                        let base = self.declaration_scope(decl).resolve_ast(node, false);
                        if self.is_class_or_interface_type(base) {
                            implements.push(base);
                        }
                    }
                }
                Some(NodeData::Interface(interface)) => {
                    for node in interface.extends.iter() {
                        let base = self.declaration_scope(decl).resolve_ast(node, false);
                        if self.is_class_or_interface_type(base) && !extends.contains(&base) {
                            extends.push(base);
                        }
                    }
                }
                _ => {}
            }
        }

        let symbol = self.symbols.ty_mut(ty);
        symbol.extends = extends.clone();
        symbol.implements = implements;
        for base in extends {
            let root = self.symbols.ty(base).root(base);
            self.resolve_heritage(root);
        }
        if self.base_chain_reaches(ty, ty) {
            self.symbols.ty_mut(ty).flags |= SymbolFlags::BASE_CYCLE;
            debug!(ty = ty.0, "base type chain reaches itself");
        }
        self.symbols.ty_mut(ty).base_state = ResolutionState::Resolved;
    }

    pub(crate) fn is_class_type(&self, ty: TypeId) -> bool {
        matches!(self.symbols.kind(ty), TypeKind::Class)
    }

    pub(crate) fn is_class_or_interface_type(&self, ty: TypeId) -> bool {
        matches!(self.symbols.kind(ty), TypeKind::Class | TypeKind::Interface)
    }

    /// Whether `target` is reachable through the `extends` chain of `from`.
    fn base_chain_reaches(&self, from: TypeId, target: TypeId) -> bool {
        let mut stack: Vec<TypeId> = self.base_roots(from);
        let mut visited = FxHashSet::default();
        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if !visited.insert(current) || visited.len() > MAX_VISITING_SET_SIZE as usize {
                continue;
            }
            stack.extend(self.base_roots(current));
        }
        false
    }

    fn base_roots(&self, ty: TypeId) -> Vec<TypeId> {
        self.symbols
            .ty(ty)
            .extends
            .iter()
            .map(|&base| self.symbols.ty(base).root(base))
            .collect()
    }

    fn has_base_in_flight(&self, ty: TypeId) -> bool {
        self.base_roots(ty)
            .into_iter()
            .any(|root| self.symbols.ty(root).state == ResolutionState::InResolution)
    }

    /// Copy members (and, for interfaces, signatures) of every base into
    /// `ty`. Own members win. Postponed when a base is not ready.
    fn inherit_members(&mut self, ty: TypeId) {
        let symbol = self.symbols.ty(ty);
        if symbol.flags.contains(SymbolFlags::BASE_CYCLE) {
            self.symbols.ty_mut(ty).flags -= SymbolFlags::INHERITANCE_PENDING;
            return;
        }
        let is_interface = matches!(symbol.kind, TypeKind::Interface);
        let extends = symbol.extends.clone();
        let mut pending = false;

        for base in extends {
            let base = self.resolve_type(base);
            let base_symbol = self.symbols.ty(base);
            let root = base_symbol.root(base);
            let root_symbol = self.symbols.ty(root);
            if !base_symbol.state.is_resolved()
                || !root_symbol.state.is_resolved()
                || root_symbol.flags.contains(SymbolFlags::INHERITANCE_PENDING)
            {
                pending = true;
                continue;
            }
            let inherited: Vec<_> = base_symbol.members.iter().collect();
            let call = base_symbol.call_signatures.clone();
            let construct = base_symbol.construct_signatures.clone();
            let index = base_symbol.index_signatures.clone();
            for (name, member) in inherited {
                self.symbols.ty_mut(ty).members.insert(name, member);
            }
            self.inherit_signatures(ty, &index, SignatureKind::Index);
            if is_interface {
                self.inherit_signatures(ty, &call, SignatureKind::Call);
                self.inherit_signatures(ty, &construct, SignatureKind::Construct);
            }
        }

        if pending {
            let symbol = self.symbols.ty_mut(ty);
            if !symbol.flags.contains(SymbolFlags::INHERITANCE_PENDING) {
                symbol.flags |= SymbolFlags::INHERITANCE_PENDING;
            }
            if let Some(&decl) = self.symbols.ty(ty).declarations.first() {
                trace!(ty = ty.0, "inheritance postponed");
                self.deferred.push_back(DeferredWork {
                    decl,
                    kind: DeferredKind::InheritMembers,
                });
            }
        } else {
            self.symbols.ty_mut(ty).flags -= SymbolFlags::INHERITANCE_PENDING;
        }
    }

    /// Base signatures of `kind` are inherited only by types that declare
    /// none of their own.
    fn inherit_signatures(&mut self, ty: TypeId, base: &[SignatureId], kind: SignatureKind) {
        if base.is_empty() {
            return;
        }
        let declarations = self.symbols.ty(ty).declarations.clone();
        let own = self.signature_list(ty, kind);
        let declares_own = own.iter().any(|&sig| {
            self.symbols
                .signature(sig)
                .declarations
                .first()
                .and_then(|&decl| self.decl(decl).parent)
                .is_some_and(|parent| declarations.contains(&parent))
        });
        if declares_own {
            return;
        }
        for &sig in base {
            if !self.signature_list(ty, kind).contains(&sig) {
                let symbol = self.symbols.ty_mut(ty);
                match kind {
                    SignatureKind::Call => symbol.call_signatures.push(sig),
                    SignatureKind::Construct => symbol.construct_signatures.push(sig),
                    SignatureKind::Index => symbol.index_signatures.push(sig),
                }
            }
        }
    }

    fn signature_list(&self, ty: TypeId, kind: SignatureKind) -> Vec<SignatureId> {
        let symbol = self.symbols.ty(ty);
        match kind {
            SignatureKind::Call => symbol.call_signatures.clone(),
            SignatureKind::Construct => symbol.construct_signatures.clone(),
            SignatureKind::Index => symbol.index_signatures.clone(),
        }
    }

    /// Run postponed work until the queue is empty.
    pub(crate) fn drain_deferred_work(&mut self) {
        let mut processed = 0usize;
        while let Some(work) = self.deferred.pop_front() {
            processed += 1;
            if processed > MAX_DEFERRED_WORK_ITEMS {
                warn!(remaining = self.deferred.len(), "deferred work limit reached");
                self.deferred.clear();
                break;
            }
            match work.kind {
                DeferredKind::InheritMembers => {
                    let Some(ty) = self.type_of_declaration(work.decl) else {
                        continue;
                    };
                    let flags = self.symbols.ty(ty).flags;
                    if flags.contains(SymbolFlags::INHERITANCE_PENDING) && !self.has_base_in_flight(ty) {
                        self.inherit_members(ty);
                    }
                }
            }
        }
        if processed > 0 {
            debug!(processed, "drained deferred work");
        }
    }

    // =========================================================================
    // The static side of classes
    // =========================================================================

    fn resolve_constructor_type(&mut self, constructor: TypeId) {
        self.symbols.ty_mut(constructor).state = ResolutionState::InResolution;
        let instance = self.symbols.ty(constructor).associated;
        if let Some(instance) = instance {
            self.resolve_heritage(instance);
        }

        let symbol = self.symbols.ty(constructor);
        let members: Vec<ValueId> = symbol.members.values().collect();
        let own_signatures = symbol.construct_signatures.clone();
        for member in members {
            self.resolve_value_symbol(member);
        }
        for &signature in &own_signatures {
            self.resolve_signature_symbol(signature);
        }

        let base = instance.and_then(|instance| {
            let symbol = self.symbols.ty(instance);
            if symbol.flags.contains(SymbolFlags::BASE_CYCLE) {
                None
            } else {
                symbol.extends.first().copied()
            }
        });
        let base_constructor = base.and_then(|base| {
            let root = self.symbols.ty(base).root(base);
            self.symbols.ty(root).associated
        });

        if let (Some(base), Some(base_constructor)) = (base, base_constructor) {
            self.resolve_type(base_constructor);
            let inherited: Vec<_> = self.symbols.ty(base_constructor).members.iter().collect();
            for (name, member) in inherited {
                self.symbols.ty_mut(constructor).members.insert(name, member);
            }
            if own_signatures.is_empty()
                && let Some(instance) = instance
            {
                let base_signatures = self.symbols.ty(base_constructor).construct_signatures.clone();
                let substitution = self.specialization_substitution(base);
                for signature in base_signatures {
                    let derived = self.derived_construct_signature(signature, &substitution, instance);
                    self.symbols.ty_mut(constructor).construct_signatures.push(derived);
                }
            }
        }

        if self.symbols.ty(constructor).construct_signatures.is_empty()
            && let Some(instance) = instance
        {
            let mut default = SignatureSymbol::new(SignatureKind::Construct);
            default.type_parameters = self.symbols.ty(instance).type_parameters.clone();
            default.return_type = Some(instance);
            default.is_definition = true;
            default.state = ResolutionState::Resolved;
            default
                .declarations
                .extend(self.symbols.ty(instance).declarations.first().copied());
            let default = self.symbols.add_signature(default);
            self.symbols.ty_mut(constructor).construct_signatures.push(default);
        }

        let symbol = self.symbols.ty_mut(constructor);
        symbol.state = ResolutionState::Resolved;
        symbol.base_state = ResolutionState::Resolved;
    }

    /// A base-class construct signature re-targeted at the derived instance.
    fn derived_construct_signature(
        &mut self,
        signature: SignatureId,
        substitution: &TypeSubstitution,
        instance: TypeId,
    ) -> SignatureId {
        let signature = instantiate_signature(self, signature, substitution);
        self.resolve_signature_symbol(signature);
        let source = self.symbols.signature(signature);
        let mut derived = SignatureSymbol::new(SignatureKind::Construct);
        derived.declarations = source.declarations.clone();
        derived.parameters = source.parameters.clone();
        derived.type_parameters = self.symbols.ty(instance).type_parameters.clone();
        derived.return_type = Some(instance);
        derived.is_definition = true;
        derived.state = ResolutionState::Resolved;
        self.symbols.add_signature(derived)
    }

    /// The substitution that produced a specialized type; empty otherwise.
    pub(crate) fn specialization_substitution(&self, ty: TypeId) -> TypeSubstitution {
        match &self.symbols.ty(ty).specialization {
            Some(spec) => {
                let params: Vec<TypeId> = spec.mapping.iter().map(|&(param, _)| param).collect();
                let args: Vec<TypeId> = spec.mapping.iter().map(|&(_, arg)| arg).collect();
                TypeSubstitution::from_pairs(&params, &args)
            }
            None => TypeSubstitution::new(),
        }
    }

    // =========================================================================
    // Values
    // =========================================================================

    pub(crate) fn resolve_value_symbol(&mut self, value: ValueId) -> TypeId {
        let symbol = self.symbols.value(value);
        match symbol.state {
            ResolutionState::Resolved => return symbol.ty.unwrap_or(TypeId::ANY),
            ResolutionState::InResolution => {
                trace!(value = value.0, "value requested while resolving");
                return symbol.ty.unwrap_or(TypeId::ANY);
            }
            ResolutionState::Unresolved => {}
        }
        if let Some(ty) = symbol.ty {
            self.symbols.value_mut(value).state = ResolutionState::Resolved;
            return ty;
        }
        let Some(decl) = symbol.first_declaration() else {
            let symbol = self.symbols.value_mut(value);
            symbol.ty = Some(TypeId::ANY);
            symbol.state = ResolutionState::Resolved;
            return TypeId::ANY;
        };

        self.symbols.value_mut(value).state = ResolutionState::InResolution;
        let (ty, inferred) = match self.decl_data(decl) {
            Some(NodeData::Variable(variable)) => {
                self.resolve_declared_value(decl, variable.type_annotation, variable.initializer)
            }
            Some(NodeData::Parameter(parameter)) => self.resolve_parameter_type(decl, parameter),
            Some(NodeData::Property(property)) => {
                self.resolve_declared_value(decl, property.type_annotation, property.initializer)
            }
            Some(NodeData::PropertySignature(property)) => {
                self.resolve_declared_value(decl, property.type_annotation, NodeIndex::NONE)
            }
            _ => (TypeId::ANY, true),
        };

        let symbol = self.symbols.value_mut(value);
        if symbol.ty.is_none() {
            symbol.ty = Some(ty);
            if inferred {
                symbol.flags |= SymbolFlags::INFERRED;
            }
        }
        symbol.state = ResolutionState::Resolved;
        symbol.ty.unwrap_or(ty)
    }

    /// Annotation, else the widened initializer type, else `any`. The flag
    /// is true when the type was not annotated.
    fn resolve_declared_value(
        &mut self,
        decl: DeclId,
        annotation: NodeIndex,
        initializer: NodeIndex,
    ) -> (TypeId, bool) {
        let mut scope = self.declaration_scope(decl);
        if annotation.is_some() {
            return (scope.resolve_ast(annotation, false), false);
        }
        if initializer.is_some() {
            let ty = scope.resolve_ast(initializer, false);
            return (widen(&mut *scope, ty), true);
        }
        (TypeId::ANY, true)
    }

    fn resolve_parameter_type(&mut self, decl: DeclId, parameter: &ParameterData) -> (TypeId, bool) {
        let in_constructor = self
            .decl(decl)
            .parent
            .is_some_and(|parent| self.decl(parent).kind == DeclKind::Constructor);
        let mut scope = self.declaration_scope(decl);
        if in_constructor {
            scope.ctx.flags |= ContextFlags::IN_CONSTRUCTOR_ARGUMENTS;
        }
        if parameter.type_annotation.is_some() {
            return (scope.resolve_ast(parameter.type_annotation, false), false);
        }
        if parameter.initializer.is_some() {
            let ty = scope.resolve_ast(parameter.initializer, false);
            return (widen(&mut *scope, ty), true);
        }
        if parameter.rest {
            return (scope.symbols.array_of(TypeId::ANY), true);
        }
        (TypeId::ANY, true)
    }

    // =========================================================================
    // Signatures
    // =========================================================================

    pub(crate) fn resolve_signature_symbol(&mut self, signature: SignatureId) {
        let symbol = self.symbols.signature(signature);
        if symbol.state != ResolutionState::Unresolved || symbol.specialization.is_some() {
            return;
        }
        let parameters = symbol.parameters.clone();
        let preset_return = symbol.return_type;
        let decl = symbol.declarations.first().copied();
        self.symbols.signature_mut(signature).state = ResolutionState::InResolution;

        for parameter in parameters {
            self.resolve_value_symbol(parameter);
        }
        let return_type = match (preset_return, decl) {
            (Some(ty), _) => ty,
            (None, Some(decl)) => self.resolve_declared_return_type(decl),
            (None, None) => TypeId::ANY,
        };
        let symbol = self.symbols.signature_mut(signature);
        if symbol.return_type.is_none() {
            symbol.return_type = Some(return_type);
        }
        symbol.state = ResolutionState::Resolved;
        trace!(signature = signature.0, "resolved signature");
    }

    fn resolve_declared_return_type(&mut self, decl: DeclId) -> TypeId {
        let (annotation, body) = match self.decl_data(decl) {
            Some(NodeData::Function(function)) => (function.return_type, function.body),
            Some(NodeData::Signature(signature)) => (signature.return_type, NodeIndex::NONE),
            Some(NodeData::IndexSignature(index)) => (index.return_type, NodeIndex::NONE),
            _ => (NodeIndex::NONE, NodeIndex::NONE),
        };
        if annotation.is_some() {
            return self.declaration_scope(decl).resolve_ast(annotation, false);
        }
        if body.is_some() {
            return self.declaration_scope(decl).infer_return_type(decl, body, None);
        }
        TypeId::ANY
    }

    /// Widened best common type of the values returned from `body`; `void`
    /// when nothing is returned. An expression body is its own return value.
    ///
    /// Runs in the current context so a provisional caller stays
    /// provisional.
    pub(crate) fn infer_return_type(
        &mut self,
        decl: DeclId,
        body: NodeIndex,
        contextual: Option<TypeId>,
    ) -> TypeId {
        let arena = self.arena(self.decl(decl).unit);
        let expressions = match arena.data(body) {
            Some(NodeData::Block(_)) => return_expressions(arena, body),
            Some(_) => vec![body],
            None => Vec::new(),
        };
        if expressions.is_empty() {
            return TypeId::VOID;
        }
        let unit = self.decl(decl).unit;
        let mut scope = self.scope();
        scope.ctx.unit = unit;
        scope.ctx.enclosing = Some(decl);
        let mut types = Vec::with_capacity(expressions.len());
        for expression in expressions {
            let mut inner = scope.scope();
            inner.ctx.push_frame(ContextFrame::new(contextual));
            types.push(inner.resolve_ast(expression, true));
        }
        let best = best_common_type(&mut *scope, &types);
        widen(&mut *scope, best.ty)
    }
}
