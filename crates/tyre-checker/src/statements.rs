//! Statements and value declarations.
//!
//! Everything here runs in type-check mode only; in resolve mode the
//! dispatcher answers declarations with their symbol's type and never
//! reaches these checks.

use crate::context::{ContextFlags, ContextFrame};
use crate::state::CheckerState;
use tracing::trace;
use tyre_binder::{
    DeclFlags, DeclId, DeclKind, ResolutionState, SignatureId, SignatureKind, SymbolFlags,
    SymbolRef, TypeId, TypeKind, TypeSymbol,
};
use tyre_common::Atom;
use tyre_common::diagnostics::diagnostic_codes;
use tyre_solver::{TypeDatabase, is_assignable, is_identical, signatures_of, widen};
use tyre_syntax::{
    EnumData, FunctionData, FunctionKind, NodeArena, NodeData, NodeIndex, NodeList, ParameterData,
    ReturnData, TypeAliasData, VariableData,
};

/// Expressions of the `return` statements directly inside `body`. Nested
/// functions and classes are not entered.
pub(crate) fn return_expressions(arena: &NodeArena, body: NodeIndex) -> Vec<NodeIndex> {
    let mut found = Vec::new();
    let mut stack = vec![body];
    while let Some(node) = stack.pop() {
        match arena.data(node) {
            Some(NodeData::Return(statement)) => {
                if statement.expression.is_some() {
                    found.push(statement.expression);
                }
            }
            Some(NodeData::Function(_) | NodeData::Class(_)) if node != body => {}
            Some(_) => stack.extend(arena.children(node).into_iter().rev()),
            None => {}
        }
    }
    found
}

/// Whether `body` calls `super(...)` outside of nested functions.
fn contains_super_call(arena: &NodeArena, body: NodeIndex) -> bool {
    let mut stack = vec![body];
    while let Some(node) = stack.pop() {
        match arena.data(node) {
            Some(NodeData::Call(call)) if matches!(arena.data(call.callee), Some(NodeData::Super)) => {
                return true;
            }
            Some(NodeData::Function(function))
                if node != body && function.kind != FunctionKind::Arrow => {}
            Some(NodeData::Class(_)) => {}
            Some(_) => stack.extend(arena.children(node)),
            None => {}
        }
    }
    false
}

impl<'a> CheckerState<'a> {
    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn check_statement_list(&mut self, statements: &'a NodeList) {
        for statement in statements.iter() {
            self.resolve_ast(statement, false);
        }
        self.check_implementations_follow(statements, |kind| kind == FunctionKind::Declaration);
    }

    /// A bodiless, non-ambient function or method must be followed by
    /// another declaration of the same name.
    pub(crate) fn check_implementations_follow(
        &mut self,
        statements: &'a NodeList,
        accepts: impl Fn(FunctionKind) -> bool,
    ) {
        let functions: Vec<(NodeIndex, Option<&'a FunctionData>)> = statements
            .iter()
            .map(|node| match self.node_data(node) {
                Some(NodeData::Function(function)) if accepts(function.kind) => (node, Some(function)),
                _ => (node, None),
            })
            .collect();
        for (i, &(node, function)) in functions.iter().enumerate() {
            let Some(function) = function else {
                continue;
            };
            if function.body.is_some() {
                continue;
            }
            let ambient = self
                .declaration_of(node)
                .is_some_and(|decl| self.decl(decl).flags.contains(DeclFlags::AMBIENT));
            if ambient {
                continue;
            }
            let followed = functions
                .get(i + 1)
                .and_then(|&(_, next)| next)
                .is_some_and(|next| next.name == function.name);
            if !followed {
                self.error_at_node(
                    node,
                    diagnostic_codes::FUNCTION_IMPLEMENTATION_IS_MISSING_OR_NOT_IMMEDIATELY_FOLLOWING_THE_DECLARATION,
                    &[],
                );
            }
        }
    }

    /// The nearest enclosing function-like declaration.
    fn enclosing_function(&self) -> Option<DeclId> {
        let start = self.ctx.enclosing?;
        self.declarations.enclosing(start, |kind| {
            matches!(
                kind,
                DeclKind::Function
                    | DeclKind::Method
                    | DeclKind::Constructor
                    | DeclKind::FunctionExpression
            )
        })
    }

    pub(crate) fn check_return_statement(&mut self, statement: &ReturnData) -> TypeId {
        if statement.expression.is_none() {
            return TypeId::VOID;
        }
        let function = self.enclosing_function();
        let annotation = function
            .and_then(|decl| match self.decl_data(decl) {
                Some(NodeData::Function(data)) => Some(data.return_type),
                _ => None,
            })
            .filter(|node| node.is_some());

        if let Some(annotation) = annotation {
            let expected = self.resolve_ast(annotation, false);
            let actual = {
                let mut scope = self.scope();
                scope.ctx.push_frame(ContextFrame::new(Some(expected)));
                scope.resolve_ast(statement.expression, true)
            };
            self.check_assignable_to(statement.expression, actual, expected);
            return TypeId::VOID;
        }

        // An unannotated function expression returns into its contextual
        // return type, which was folded into its signature on commit.
        let contextual = function
            .filter(|&decl| self.decl(decl).kind == DeclKind::FunctionExpression)
            .and_then(|decl| self.decl(decl).signature)
            .map(|signature| self.return_type(signature));
        let mut scope = self.scope();
        scope.ctx.push_frame(ContextFrame::new(contextual));
        scope.resolve_ast(statement.expression, true);
        TypeId::VOID
    }

    // =========================================================================
    // Variables and parameters
    // =========================================================================

    pub(crate) fn check_variable(&mut self, node: NodeIndex, variable: &'a VariableData) -> TypeId {
        let Some(decl) = self.declaration_of(node) else {
            return TypeId::ANY;
        };
        let Some(value) = self.value_of_declaration(decl) else {
            return TypeId::ANY;
        };
        let declared = self.value_type(value);
        let annotated = self.resolve_type_annotation(variable.type_annotation);

        let initializer = if variable.initializer.is_none() {
            None
        } else if let Some(annotated) = annotated {
            let ty = {
                let mut scope = self.scope();
                scope.ctx.push_frame(ContextFrame::new(Some(annotated)));
                scope.resolve_ast(variable.initializer, true)
            };
            self.check_assignable_to(variable.initializer, ty, annotated);
            Some(ty)
        } else {
            Some(self.resolve_ast(variable.initializer, false))
        };

        let first = self.symbols.value(value).first_declaration();
        if let Some(first) = first.filter(|&first| first != decl) {
            let own = match (annotated, initializer) {
                (Some(ty), _) => ty,
                (None, Some(ty)) => widen(self, ty),
                (None, None) => TypeId::ANY,
            };
            if !is_identical(self, own, declared) {
                let (name, first_text, own_text) = (
                    self.atom_text(variable.name),
                    self.format_type(declared),
                    self.format_type(own),
                );
                self.error_at_node_with_related(
                    node,
                    diagnostic_codes::SUBSEQUENT_VARIABLE_DECLARATIONS_MUST_HAVE_THE_SAME_TYPE,
                    &[&name, &first_text, &own_text],
                    first,
                    &name,
                );
            }
        } else if self.settings.no_implicit_any
            && annotated.is_none()
            && initializer.is_none_or(|ty| ty == TypeId::NULL || ty == TypeId::UNDEFINED)
        {
            let (name, text) = (self.atom_text(variable.name), self.format_type(declared));
            self.error_at_node(
                node,
                diagnostic_codes::VARIABLE_IMPLICITLY_HAS_AN_TYPE,
                &[&name, &text],
            );
        }
        declared
    }

    pub(crate) fn check_parameter(
        &mut self,
        node: NodeIndex,
        parameter: &'a ParameterData,
        contextually_typed: bool,
    ) -> TypeId {
        let Some(decl) = self.declaration_of(node) else {
            return TypeId::ANY;
        };
        let Some(value) = self.value_of_declaration(decl) else {
            return TypeId::ANY;
        };
        let in_constructor = self
            .decl(decl)
            .parent
            .is_some_and(|parent| self.decl(parent).kind == DeclKind::Constructor);
        let mut scope = self.scope();
        if in_constructor {
            scope.ctx.flags |= ContextFlags::IN_CONSTRUCTOR_ARGUMENTS;
        }
        scope.resolve_type_annotation(parameter.type_annotation);
        let ty = scope.value_type(value);

        if parameter.rest && ty != TypeId::ANY && scope.symbols.array_element(ty).is_none() {
            scope.error_at_node(node, diagnostic_codes::A_REST_PARAMETER_MUST_BE_OF_AN_ARRAY_TYPE, &[]);
        }
        if parameter.initializer.is_some() {
            let initializer = {
                let mut inner = scope.scope();
                inner.ctx.push_frame(ContextFrame::new(Some(ty)));
                inner.resolve_ast(parameter.initializer, true)
            };
            scope.check_assignable_to(parameter.initializer, initializer, ty);
        }

        let any_array = scope.symbols.array_of(TypeId::ANY);
        if scope.settings.no_implicit_any
            && !contextually_typed
            && scope.symbols.value(value).flags.contains(SymbolFlags::INFERRED)
            && (ty == TypeId::ANY || ty == any_array)
        {
            let (name, text) = (scope.atom_text(parameter.name), scope.format_type(ty));
            scope.error_at_node(
                node,
                diagnostic_codes::PARAMETER_IMPLICITLY_HAS_AN_TYPE,
                &[&name, &text],
            );
        }
        ty
    }

    // =========================================================================
    // Functions, methods and constructors
    // =========================================================================

    pub(crate) fn check_function_declaration(&mut self, node: NodeIndex, function: &'a FunctionData) -> TypeId {
        let Some(decl) = self.declaration_of(node) else {
            return TypeId::VOID;
        };
        for parameter in function.type_parameters.iter() {
            self.resolve_ast(parameter, false);
        }
        for parameter in function.parameters.iter() {
            if let Some(NodeData::Parameter(data)) = self.node_data(parameter) {
                self.check_parameter(parameter, data, false);
            }
        }
        let annotated = self.resolve_type_annotation(function.return_type);
        self.resolve_ast(function.body, false);

        let Some(signature) = self.decl(decl).signature else {
            return self.declaration_node_type(node);
        };
        self.resolve_signature(signature);

        if function.body.is_some() {
            let arena = self.arena(self.ctx.unit);
            let returns = return_expressions(arena, function.body);
            match annotated {
                Some(expected) => {
                    if returns.is_empty() && expected != TypeId::VOID && expected != TypeId::ANY {
                        self.error_at_node(
                            function.return_type,
                            diagnostic_codes::A_FUNCTION_WHOSE_DECLARED_TYPE_IS_NEITHER_VOID_NOR_ANY_MUST_RETURN_A_VALUE,
                            &[],
                        );
                    }
                }
                None => self.check_implicit_any_return(node, function, signature, &returns),
            }
            self.check_overload_compatibility(decl, signature);
            if function.kind == FunctionKind::Constructor
                && self.enclosing_base_type().is_some()
                && !contains_super_call(arena, function.body)
            {
                self.error_at_node(
                    node,
                    diagnostic_codes::CONSTRUCTORS_FOR_DERIVED_CLASSES_MUST_CONTAIN_A_SUPER_CALL,
                    &[],
                );
            }
        }
        self.declaration_node_type(node)
    }

    /// An unannotated function whose every return value is `null` or
    /// `undefined` widens to `any`.
    fn check_implicit_any_return(
        &mut self,
        node: NodeIndex,
        function: &FunctionData,
        signature: SignatureId,
        returns: &[NodeIndex],
    ) {
        if !self.settings.no_implicit_any || returns.is_empty() {
            return;
        }
        let all_empty = returns.iter().all(|&expression| {
            let ty = self.resolve_ast(expression, false);
            ty == TypeId::NULL || ty == TypeId::UNDEFINED
        });
        if !all_empty {
            return;
        }
        let return_type = self.return_type(signature);
        let name = if function.name == Atom::NONE {
            "constructor".to_string()
        } else {
            self.atom_text(function.name)
        };
        let text = self.format_type(return_type);
        self.error_at_node(
            node,
            diagnostic_codes::WHICH_LACKS_RETURN_TYPE_ANNOTATION_IMPLICITLY_HAS_AN_RETURN_TYPE,
            &[&name, &text],
        );
    }

    /// Signatures declared together with `decl`: the call signatures of a
    /// function or method, the construct signatures of a constructor.
    fn sibling_signatures(&mut self, decl: DeclId) -> Vec<SignatureId> {
        let declaration = self.decl(decl);
        match (declaration.kind, declaration.symbol) {
            (DeclKind::Constructor, _) => {
                let constructor = declaration
                    .parent
                    .and_then(|class| self.type_of_declaration(class))
                    .and_then(|instance| self.symbols.ty(instance).associated);
                match constructor {
                    Some(constructor) => signatures_of(self, constructor, SignatureKind::Construct),
                    None => Vec::new(),
                }
            }
            (_, Some(SymbolRef::Value(value))) => {
                let ty = self.value_type(value);
                signatures_of(self, ty, SignatureKind::Call)
            }
            _ => Vec::new(),
        }
    }

    /// The implementation must be assignable to each of its overloads.
    fn check_overload_compatibility(&mut self, decl: DeclId, implementation: SignatureId) {
        let overloads: Vec<SignatureId> = self
            .sibling_signatures(decl)
            .into_iter()
            .filter(|&signature| signature != implementation)
            .filter(|&signature| !self.symbols.signature(signature).is_definition)
            .collect();
        if overloads.is_empty() {
            return;
        }
        let implementation_object = self.signature_object(implementation);
        for overload in overloads {
            self.resolve_signature(overload);
            let overload_object = self.signature_object(overload);
            if is_assignable(self, implementation_object, overload_object) {
                continue;
            }
            let Some(&overload_decl) = self.symbols.signature(overload).declarations.first() else {
                continue;
            };
            let declaration = self.decl(overload_decl);
            if declaration.unit != self.ctx.unit {
                continue;
            }
            trace!(overload = overload.0, implementation = implementation.0, "incompatible overload");
            self.error_at_node(
                declaration.node,
                diagnostic_codes::OVERLOAD_SIGNATURE_IS_NOT_COMPATIBLE_WITH_FUNCTION_IMPLEMENTATION,
                &[],
            );
        }
    }

    /// An anonymous object type whose only call signature is `signature`.
    pub(crate) fn signature_object(&mut self, signature: SignatureId) -> TypeId {
        if let Some(&object) = self.signature_objects.get(&signature) {
            return object;
        }
        let mut symbol = TypeSymbol::new(TypeKind::ObjectType, Atom::NONE);
        symbol.call_signatures.push(signature);
        symbol.state = ResolutionState::Resolved;
        symbol.base_state = ResolutionState::Resolved;
        let object = self.symbols.add_type(symbol);
        self.signature_objects.insert(signature, object);
        object
    }

    // =========================================================================
    // Enums and aliases
    // =========================================================================

    pub(crate) fn check_enum(&mut self, node: NodeIndex, enum_data: &'a EnumData) -> TypeId {
        for member in enum_data.members.iter() {
            self.resolve_ast(member, false);
        }
        self.declaration_node_type(node)
    }

    pub(crate) fn check_type_alias(&mut self, node: NodeIndex, alias: &'a TypeAliasData) -> TypeId {
        let Some(ty) = self
            .declaration_of(node)
            .and_then(|decl| self.type_of_declaration(decl))
        else {
            return TypeId::ANY;
        };
        let target = self.resolve_type(ty);
        if self.symbols.ty(ty).flags.contains(SymbolFlags::ALIAS_CYCLE) {
            let name = self.atom_text(alias.name);
            self.error_at_node(
                node,
                diagnostic_codes::TYPE_ALIAS_CIRCULARLY_REFERENCES_ITSELF,
                &[&name],
            );
            return TypeId::ERROR;
        }
        self.resolve_ast(alias.ty, false);
        target
    }
}
