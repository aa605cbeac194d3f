//! The resolution driver.
//!
//! `resolve_ast` is the single entry point for typing any node. It decides
//! whether the per-node memo can answer, and otherwise hands the node to
//! [`NodeDispatcher`], which routes it to the handler for its kind.
//!
//! Memo policy, by mode:
//! - provisional: read only for nodes whose type cannot depend on the
//!   contextual type, and only when no parameter overrides are active; never
//!   written
//! - type check: answered when the node was already checked in this epoch
//! - resolve: answered whenever a type is recorded

use crate::context::ContextFrame;
use crate::state::CheckerState;
use tracing::trace;
use tyre_binder::{SymbolRef, TypeId};
use tyre_common::limits::{STACK_GROWTH_SIZE, STACK_RED_ZONE};
use tyre_solver::TypeDatabase;
use tyre_syntax::{NodeData, NodeIndex, SignatureKind};

impl<'a> CheckerState<'a> {
    /// Type of `node` in the current unit.
    ///
    /// With `contextual_assignment` false, any contextual frame pushed by
    /// the caller is masked so the node is typed without one.
    pub(crate) fn resolve_ast(&mut self, node: NodeIndex, contextual_assignment: bool) -> TypeId {
        if node.is_none() {
            return TypeId::ANY;
        }
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH_SIZE, || {
            self.resolve_ast_inner(node, contextual_assignment)
        })
    }

    fn resolve_ast_inner(&mut self, node: NodeIndex, contextual_assignment: bool) -> TypeId {
        let Some(data) = self.node_data(node) else {
            return TypeId::ANY;
        };
        let key = (self.ctx.unit, node);
        let mut scope = self.scope();
        if !contextual_assignment {
            scope.ctx.push_frame(ContextFrame::new(None));
        }

        if scope.ctx.is_provisional() {
            if !scope.is_context_sensitive(node)
                && !scope.ctx.has_overrides()
                && let Some(ty) = scope.chain.node_type(key)
            {
                return ty;
            }
            return NodeDispatcher::new(&mut *scope).dispatch(node, data);
        }

        if scope.ctx.is_checking() {
            if scope.chain.is_checked(key)
                && let Some(ty) = scope.chain.node_type(key)
            {
                return ty;
            }
            let ty = NodeDispatcher::new(&mut *scope).dispatch(node, data);
            scope.chain.set_checked(key, ty);
            return ty;
        }

        if let Some(ty) = scope.chain.node_type(key) {
            return ty;
        }
        let ty = NodeDispatcher::new(&mut *scope).dispatch(node, data);
        scope.chain.set_node_type(key, ty);
        ty
    }

    /// Whether the type of `node` depends on the contextual type pushed for
    /// it. Looks through parentheses.
    pub(crate) fn is_context_sensitive(&self, node: NodeIndex) -> bool {
        let mut current = node;
        while let Some(data) = self.node_data(current) {
            match data {
                NodeData::Parenthesized(paren) => current = paren.expression,
                NodeData::Conditional(conditional) => {
                    return self.is_context_sensitive(conditional.when_true)
                        || self.is_context_sensitive(conditional.when_false);
                }
                _ => return data.is_context_sensitive(),
            }
        }
        false
    }

    /// Resolve-mode answer for a declaration node: the type of the symbol it
    /// declares.
    pub(crate) fn declaration_node_type(&mut self, node: NodeIndex) -> TypeId {
        let Some(decl) = self.declaration_of(node) else {
            return TypeId::VOID;
        };
        match self.decl(decl).symbol {
            Some(SymbolRef::Type(ty)) => {
                self.resolve_type(ty);
                ty
            }
            Some(SymbolRef::Value(value)) => self.value_type(value),
            Some(SymbolRef::Signature(signature)) => {
                self.resolve_signature(signature);
                TypeId::VOID
            }
            None => TypeId::VOID,
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Routes a node to the handler for its kind.
pub(crate) struct NodeDispatcher<'s, 'a> {
    checker: &'s mut CheckerState<'a>,
}

impl<'s, 'a> NodeDispatcher<'s, 'a> {
    pub(crate) fn new(checker: &'s mut CheckerState<'a>) -> Self {
        Self { checker }
    }

    pub(crate) fn dispatch(&mut self, node: NodeIndex, data: &'a NodeData) -> TypeId {
        trace!(node = node.0, kind = data.kind_name(), "dispatch");
        let checker = &mut *self.checker;
        match data {
            // Declarations: checked in type-check mode, otherwise the type of
            // the declared symbol.
            NodeData::SourceFile(_)
            | NodeData::Module(_)
            | NodeData::Class(_)
            | NodeData::Interface(_)
            | NodeData::Enum(_)
            | NodeData::EnumMember(_)
            | NodeData::TypeAlias(_)
            | NodeData::Variable(_)
            | NodeData::Parameter(_)
            | NodeData::TypeParameter(_)
            | NodeData::Property(_)
            | NodeData::PropertySignature(_)
            | NodeData::IndexSignature(_) => self.dispatch_declaration(node, data),
            NodeData::Function(function) if data.is_function_expression() => {
                checker.resolve_function_expression(node, function)
            }
            NodeData::Function(_) => self.dispatch_declaration(node, data),
            NodeData::Signature(signature) => match signature.kind {
                SignatureKind::FunctionType | SignatureKind::ConstructorType => {
                    checker.resolve_function_type_node(node, signature)
                }
                SignatureKind::Method | SignatureKind::Call | SignatureKind::Construct => {
                    self.dispatch_declaration(node, data)
                }
            },

            // Types
            NodeData::KeywordType(keyword) => CheckerState::keyword_type(*keyword),
            NodeData::TypeReference(reference) => checker.resolve_type_reference(node, reference),
            NodeData::ArrayType(array) => {
                let element = checker.resolve_ast(array.element, false);
                checker.symbols.array_of(element)
            }
            NodeData::TypeLiteral(literal) => checker.resolve_type_literal(node, literal),

            // Statements
            NodeData::Block(block) => {
                checker.check_statement_list(&block.statements);
                TypeId::VOID
            }
            NodeData::ExpressionStatement(statement) => {
                checker.resolve_ast(statement.expression, false);
                TypeId::VOID
            }
            NodeData::Return(statement) => checker.check_return_statement(statement),
            NodeData::If(statement) => {
                checker.resolve_ast(statement.condition, false);
                checker.resolve_ast(statement.then_statement, false);
                checker.resolve_ast(statement.else_statement, false);
                TypeId::VOID
            }
            NodeData::While(statement) => {
                checker.resolve_ast(statement.condition, false);
                checker.resolve_ast(statement.body, false);
                TypeId::VOID
            }

            // Expressions
            NodeData::Identifier(identifier) => checker.resolve_identifier(node, identifier),
            NodeData::NumericLiteral(_) => TypeId::NUMBER,
            NodeData::StringLiteral(_) => TypeId::STRING,
            NodeData::BooleanLiteral(_) => TypeId::BOOLEAN,
            NodeData::NullLiteral => TypeId::NULL,
            NodeData::This => checker.resolve_this(node),
            NodeData::Super => checker.resolve_super(node),
            NodeData::ArrayLiteral(literal) => checker.resolve_array_literal(node, literal),
            NodeData::ObjectLiteral(literal) => checker.resolve_object_literal(node, literal),
            NodeData::PropertyAssignment(assignment) => {
                checker.resolve_ast(assignment.initializer, true)
            }
            NodeData::Call(call) => checker.resolve_call(node, call, false),
            NodeData::New(call) => checker.resolve_call(node, call, true),
            NodeData::PropertyAccess(access) => checker.resolve_property_access(node, access),
            NodeData::ElementAccess(access) => checker.resolve_element_access(access),
            NodeData::Binary(binary) => checker.resolve_binary(node, binary),
            NodeData::PrefixUnary(unary) => checker.resolve_prefix_unary(node, unary),
            NodeData::PostfixUnary(unary) => checker.resolve_postfix_unary(node, unary),
            NodeData::Conditional(conditional) => checker.resolve_conditional(conditional),
            NodeData::TypeAssertion(assertion) => checker.resolve_type_assertion(node, assertion),
            NodeData::Parenthesized(paren) => checker.resolve_ast(paren.expression, true),
        }
    }

    /// Declarations are entered (name lookup starts at them) and checked in
    /// type-check mode; in resolve mode they yield their symbol's type.
    fn dispatch_declaration(&mut self, node: NodeIndex, data: &'a NodeData) -> TypeId {
        let checker = &mut *self.checker;
        if !checker.ctx.is_checking() {
            return checker.declaration_node_type(node);
        }
        let mut scope = checker.scope();
        if let Some(decl) = scope.declaration_of(node) {
            scope.ctx.enclosing = Some(decl);
        }
        match data {
            NodeData::SourceFile(file) => {
                scope.check_statement_list(&file.statements);
                TypeId::VOID
            }
            NodeData::Module(module) => {
                scope.check_statement_list(&module.body);
                scope.declaration_node_type(node)
            }
            NodeData::Class(class) => scope.check_class(node, class),
            NodeData::Interface(interface) => scope.check_interface(node, interface),
            NodeData::Enum(enum_data) => scope.check_enum(node, enum_data),
            NodeData::EnumMember(member) => {
                scope.resolve_ast(member.initializer, false);
                scope.declaration_node_type(node)
            }
            NodeData::TypeAlias(alias) => scope.check_type_alias(node, alias),
            NodeData::Function(function) => scope.check_function_declaration(node, function),
            NodeData::Variable(variable) => scope.check_variable(node, variable),
            NodeData::Parameter(parameter) => scope.check_parameter(node, parameter, false),
            NodeData::TypeParameter(parameter) => {
                scope.resolve_ast(parameter.constraint, false);
                scope.declaration_node_type(node)
            }
            NodeData::Property(property) => scope.check_property(node, property),
            NodeData::PropertySignature(property) => {
                scope.resolve_ast(property.type_annotation, false);
                scope.declaration_node_type(node)
            }
            NodeData::Signature(signature) => scope.check_member_signature(node, signature),
            NodeData::IndexSignature(index) => {
                scope.resolve_ast(index.parameter, false);
                scope.resolve_ast(index.return_type, false);
                scope.declaration_node_type(node)
            }
            _ => scope.declaration_node_type(node),
        }
    }
}
