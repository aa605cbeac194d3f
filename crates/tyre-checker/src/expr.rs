//! Expression typing: names, `this`/`super`, member access and operators.

use crate::context::{ContextFlags, ContextFrame};
use crate::state::CheckerState;
use tracing::trace;
use tyre_binder::{
    DeclFilter, DeclId, DeclKind, PrimitiveKind, ResolutionState, TypeId, TypeKind, ValueId,
};
use tyre_common::diagnostics::diagnostic_codes;
use tyre_solver::{
    IndexKind, TypeComparisonInfo, TypeDatabase, best_common_type, find_member,
    index_signature_of, is_assignable, is_assignable_with_info, widen,
};
use tyre_syntax::{
    BinaryData, BinaryOperator, ConditionalData, ElementAccessData, FunctionKind, IdentifierData,
    NodeData, NodeIndex, PostfixUnaryData, PrefixOperator, PrefixUnaryData, PropertyAccessData,
    TypeAssertionData,
};

impl<'a> CheckerState<'a> {
    // =========================================================================
    // Names
    // =========================================================================

    /// Whether `decl` is a variable of a function expression whose signature
    /// is still uncommitted while a provisional frame is active and the walk
    /// is inside that function. Its type may depend on the candidate being tried.
    fn is_speculative_local(&self, decl: DeclId, value: ValueId) -> bool {
        if !self.ctx.is_provisional()
            || self.decl(decl).kind != DeclKind::Variable
            || self.symbols.value(value).state != ResolutionState::Unresolved
        {
            return false;
        }
        let mut owner = self.decl(decl).parent;
        while let Some(id) = owner {
            match self.decl(id).kind {
                DeclKind::FunctionExpression => break,
                DeclKind::Function | DeclKind::Method | DeclKind::Constructor | DeclKind::Script => {
                    return false;
                }
                _ => owner = self.decl(id).parent,
            }
        }
        let Some(function) = owner else {
            return false;
        };
        let committed = self
            .decl(function)
            .signature
            .is_some_and(|sig| self.symbols.signature(sig).state != ResolutionState::Unresolved);
        if committed {
            return false;
        }
        let mut current = self.ctx.enclosing;
        while let Some(id) = current {
            if id == function {
                return true;
            }
            current = self.decl(id).parent;
        }
        false
    }

    /// Type a speculative local in the current provisional scope and record it
    /// until the provisional typing ends. The value symbol itself is not touched.
    fn resolve_speculative_local(&mut self, decl: DeclId, value: ValueId) -> TypeId {
        let Some(NodeData::Variable(variable)) = self.decl_data(decl) else {
            return self.value_type(value);
        };
        // Self references during the walk below see `any`.
        let slot = self.ctx.push_speculative_local(value, TypeId::ANY);
        let ty = {
            let unit = self.decl(decl).unit;
            let mut scope = self.scope();
            scope.ctx.unit = unit;
            scope.ctx.enclosing = Some(decl);
            if variable.type_annotation.is_some() {
                scope.resolve_ast(variable.type_annotation, false)
            } else if variable.initializer.is_some() {
                let ty = scope.resolve_ast(variable.initializer, false);
                widen(&mut *scope, ty)
            } else {
                TypeId::ANY
            }
        };
        trace!(value = value.0, ty = ty.0, "speculative local");
        self.ctx.set_speculative_local(slot, ty);
        ty
    }

    pub(crate) fn resolve_identifier(&mut self, node: NodeIndex, identifier: &IdentifierData) -> TypeId {
        if let Some(decl) = self.lookup_declaration(self.ctx.enclosing, identifier.name, DeclFilter::Value) {
            let Some(value) = self.value_of_declaration(decl) else {
                return TypeId::ANY;
            };
            if let Some(ty) = self.ctx.value_override(value) {
                return ty;
            }
            if self.is_speculative_local(decl, value) {
                return self.resolve_speculative_local(decl, value);
            }
            return self.value_type(value);
        }
        let text = self.atom_text(identifier.name);
        if text == "undefined" {
            return TypeId::UNDEFINED;
        }
        self.error_at_node(node, diagnostic_codes::CANNOT_FIND_NAME, &[&text]);
        self.symbols.error_type(identifier.name)
    }

    /// Type of `this` at the current position.
    pub(crate) fn resolve_this(&mut self, node: NodeIndex) -> TypeId {
        let mut current = self.ctx.enclosing;
        while let Some(decl) = current {
            let declaration = self.decl(decl);
            match declaration.kind {
                DeclKind::FunctionExpression => {
                    let is_arrow = matches!(
                        self.decl_data(decl),
                        Some(NodeData::Function(function)) if function.kind == FunctionKind::Arrow
                    );
                    if !is_arrow {
                        return TypeId::ANY;
                    }
                }
                DeclKind::Function => return TypeId::ANY,
                DeclKind::Method | DeclKind::Property | DeclKind::Constructor => {
                    if self
                        .ctx
                        .flags
                        .intersects(ContextFlags::IN_CONSTRUCTOR_ARGUMENTS | ContextFlags::RESOLVING_SUPER_CALL_ARGS)
                    {
                        self.error_at_node(
                            node,
                            diagnostic_codes::THIS_CANNOT_BE_REFERENCED_IN_CURRENT_LOCATION,
                            &[],
                        );
                        return TypeId::ANY;
                    }
                    let is_static = declaration.is_static();
                    return declaration
                        .parent
                        .and_then(|class| self.class_side(class, is_static))
                        .unwrap_or(TypeId::ANY);
                }
                DeclKind::Class => {
                    return self.type_of_declaration(decl).unwrap_or(TypeId::ANY);
                }
                DeclKind::Module => {
                    self.error_at_node(
                        node,
                        diagnostic_codes::THIS_CANNOT_BE_REFERENCED_IN_CURRENT_LOCATION,
                        &[],
                    );
                    return TypeId::ANY;
                }
                DeclKind::Script => return TypeId::ANY,
                _ => {}
            }
            current = declaration.parent;
        }
        TypeId::ANY
    }

    /// Instance type of `class`, or its constructor type for static members.
    fn class_side(&self, class: DeclId, is_static: bool) -> Option<TypeId> {
        let instance = self.type_of_declaration(class)?;
        if is_static {
            self.symbols.ty(instance).associated
        } else {
            Some(instance)
        }
    }

    /// Whether the current position is inside a static class member.
    pub(crate) fn in_static_member(&self) -> bool {
        let Some(from) = self.ctx.enclosing else {
            return false;
        };
        self.declarations
            .enclosing(from, |kind| {
                matches!(kind, DeclKind::Method | DeclKind::Property | DeclKind::Constructor)
            })
            .is_some_and(|member| self.decl(member).is_static())
    }

    /// Base instance type of the enclosing class, if it has one.
    pub(crate) fn enclosing_base_type(&mut self) -> Option<TypeId> {
        let class = self.enclosing_class()?;
        let instance = self.type_of_declaration(class)?;
        self.resolve_type(instance);
        let symbol = self.symbols.ty(instance);
        if symbol.flags.contains(tyre_binder::SymbolFlags::BASE_CYCLE) {
            return None;
        }
        symbol.extends.first().copied()
    }

    /// `super` as an expression: the base instance type, or the base
    /// constructor type inside a static member.
    pub(crate) fn resolve_super(&mut self, node: NodeIndex) -> TypeId {
        let Some(base) = self.enclosing_base_type() else {
            self.error_at_node(
                node,
                diagnostic_codes::SUPER_CAN_ONLY_BE_REFERENCED_IN_A_DERIVED_CLASS,
                &[],
            );
            return TypeId::ERROR;
        };
        if self.in_static_member() {
            let root = self.symbols.ty(base).root(base);
            return self.symbols.ty(root).associated.unwrap_or(TypeId::ANY);
        }
        base
    }

    // =========================================================================
    // Member access
    // =========================================================================

    pub(crate) fn resolve_property_access(
        &mut self,
        node: NodeIndex,
        access: &PropertyAccessData,
    ) -> TypeId {
        let object = self.resolve_ast(access.expression, false);
        if object == TypeId::ANY || self.symbols.is_error(object) {
            return object;
        }
        let Some(member) = find_member(self, object, access.name) else {
            let (name, ty) = (self.atom_text(access.name), self.format_type(object));
            self.error_at_node(node, diagnostic_codes::PROPERTY_DOES_NOT_EXIST_ON_TYPE, &[&name, &ty]);
            return TypeId::ERROR;
        };

        let symbol = self.symbols.value(member);
        if symbol.is_private()
            && let Some(container) = symbol.container
        {
            let root = self.symbols.ty(container).root(container);
            let owner = self.symbols.ty(root).declarations.first().copied();
            if owner.is_some() && owner != self.enclosing_class() {
                let name = self.atom_text(access.name);
                let class = owner
                    .map(|decl| self.atom_text(self.decl(decl).name))
                    .unwrap_or_default();
                self.error_at_node(
                    node,
                    diagnostic_codes::PROPERTY_IS_PRIVATE_AND_ONLY_ACCESSIBLE_WITHIN_CLASS,
                    &[&name, &class],
                );
            }
        }
        self.value_type(member)
    }

    /// `o[k]`: a string literal key selects a member, numeric keys select
    /// array elements or the numeric index signature, anything else the
    /// string index signature.
    pub(crate) fn resolve_element_access(&mut self, access: &ElementAccessData) -> TypeId {
        let object = self.resolve_ast(access.expression, false);
        let index = self.resolve_ast(access.argument, false);
        if object == TypeId::ANY || self.symbols.is_error(object) {
            return object;
        }
        let index_kind = self.symbols.kind(index);
        let numeric = matches!(index_kind, TypeKind::Primitive(PrimitiveKind::Number) | TypeKind::Enum);
        let valid = numeric
            || index_kind.is_error()
            || matches!(
                index_kind,
                TypeKind::Primitive(PrimitiveKind::String | PrimitiveKind::Any)
            );
        if !valid {
            self.error_at_node(
                access.argument,
                diagnostic_codes::AN_INDEX_EXPRESSION_ARGUMENT_MUST_BE_OF_TYPE_STRING_NUMBER_OR_ANY,
                &[],
            );
            return TypeId::ERROR;
        }

        if let Some(NodeData::StringLiteral(text)) = self.node_data(access.argument)
            && let Some(name) = self.program.interner().lookup(text)
            && let Some(member) = find_member(self, object, name)
        {
            return self.value_type(member);
        }
        if numeric {
            if let Some(element) = self.symbols.array_element(object) {
                return element;
            }
            if let Some(signature) = index_signature_of(self, object, IndexKind::Number) {
                return self.return_type(signature);
            }
        }
        if let Some(signature) = index_signature_of(self, object, IndexKind::String) {
            return self.return_type(signature);
        }
        TypeId::ANY
    }

    // =========================================================================
    // Operators
    // =========================================================================

    /// `any`, `number`, enums, `null`, `undefined` and error types.
    pub(crate) fn is_numeric_operand(&self, ty: TypeId) -> bool {
        matches!(
            self.symbols.kind(ty),
            TypeKind::Primitive(
                PrimitiveKind::Any
                    | PrimitiveKind::Number
                    | PrimitiveKind::Null
                    | PrimitiveKind::Undefined
            ) | TypeKind::Enum
                | TypeKind::Error { .. }
        )
    }

    fn is_reference_node(&self, node: NodeIndex) -> bool {
        let mut current = node;
        while let Some(data) = self.node_data(current) {
            match data {
                NodeData::Parenthesized(paren) => current = paren.expression,
                _ => return data.is_reference(),
            }
        }
        false
    }

    pub(crate) fn resolve_binary(&mut self, node: NodeIndex, binary: &BinaryData) -> TypeId {
        let operator = binary.operator;
        if operator.is_assignment() {
            return self.resolve_assignment(binary);
        }
        match operator {
            BinaryOperator::LogicalAnd => {
                self.resolve_ast(binary.left, false);
                self.resolve_ast(binary.right, false)
            }
            BinaryOperator::LogicalOr => {
                let left = self.resolve_ast(binary.left, false);
                let right = {
                    let mut scope = self.scope();
                    scope.ctx.push_frame(ContextFrame::new(Some(left)));
                    scope.resolve_ast(binary.right, true)
                };
                best_common_type(self, &[left, right]).ty
            }
            BinaryOperator::Comma => {
                self.resolve_ast(binary.left, false);
                self.resolve_ast(binary.right, false)
            }
            _ => {
                let left = self.resolve_ast(binary.left, false);
                let right = self.resolve_ast(binary.right, false);
                self.binary_operator_type(node, binary, operator, left, right)
            }
        }
    }

    fn resolve_assignment(&mut self, binary: &BinaryData) -> TypeId {
        if !self.is_reference_node(binary.left) {
            self.error_at_node(
                binary.left,
                diagnostic_codes::THE_LEFT_HAND_SIDE_OF_AN_ASSIGNMENT_EXPRESSION_MUST_BE_A_VARIABLE_OR_A_PROPERTY_ACCESS,
                &[],
            );
        }
        let target = self.resolve_ast(binary.left, false);
        let (source, result) = match binary.operator.compound_base() {
            None => {
                let mut scope = self.scope();
                scope.ctx.push_frame(ContextFrame::new(Some(target)));
                let source = scope.resolve_ast(binary.right, true);
                (source, source)
            }
            Some(base) => {
                let right = self.resolve_ast(binary.right, false);
                let result = self.binary_operator_type(binary.right, binary, base, target, right);
                (result, result)
            }
        };
        self.check_assignable_to(binary.left, source, target);
        result
    }

    /// Post 2322 with the comparison chain when `source` is not assignable
    /// to `target`. Returns whether it was.
    pub(crate) fn check_assignable_to(&mut self, at: NodeIndex, source: TypeId, target: TypeId) -> bool {
        let mut info = TypeComparisonInfo::new();
        if is_assignable_with_info(self, source, target, &mut info) {
            return true;
        }
        let (source_text, target_text) = (self.format_type(source), self.format_type(target));
        self.error_at_node_with_chain(
            at,
            diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
            &[&source_text, &target_text],
            &info.message(),
        );
        false
    }

    fn binary_operator_type(
        &mut self,
        node: NodeIndex,
        binary: &BinaryData,
        operator: BinaryOperator,
        left: TypeId,
        right: TypeId,
    ) -> TypeId {
        if operator == BinaryOperator::Add {
            return self.addition_type(node, operator, left, right);
        }
        if operator.is_numeric_arithmetic() {
            if !self.is_numeric_operand(left) {
                self.error_at_node(
                    binary.left,
                    diagnostic_codes::THE_LEFT_HAND_SIDE_OF_AN_ARITHMETIC_OPERATION_MUST_BE_OF_TYPE_ANY_NUMBER_OR_AN_ENUM_TYPE,
                    &[],
                );
            }
            if !self.is_numeric_operand(right) {
                self.error_at_node(
                    binary.right,
                    diagnostic_codes::THE_RIGHT_HAND_SIDE_OF_AN_ARITHMETIC_OPERATION_MUST_BE_OF_TYPE_ANY_NUMBER_OR_AN_ENUM_TYPE,
                    &[],
                );
            }
            return TypeId::NUMBER;
        }
        if operator.is_comparison() {
            if !is_assignable(self, left, right) && !is_assignable(self, right, left) {
                self.report_operator(node, operator, left, right);
            }
            return TypeId::BOOLEAN;
        }
        match operator {
            BinaryOperator::InstanceOf => {
                let kind = self.symbols.kind(left);
                if left != TypeId::ANY
                    && !kind.is_object_like()
                    && !kind.is_error()
                    && !matches!(kind, TypeKind::TypeParameter | TypeKind::Array { .. })
                {
                    self.error_at_node(
                        binary.left,
                        diagnostic_codes::THE_LEFT_HAND_SIDE_OF_AN_INSTANCEOF_EXPRESSION_MUST_BE_OF_TYPE_ANY_OR_AN_OBJECT_TYPE,
                        &[],
                    );
                }
                TypeId::BOOLEAN
            }
            BinaryOperator::In => {
                let key_ok = matches!(
                    self.symbols.kind(left),
                    TypeKind::Primitive(PrimitiveKind::Any | PrimitiveKind::String | PrimitiveKind::Number)
                        | TypeKind::Error { .. }
                );
                let right_kind = self.symbols.kind(right);
                let object_ok = right == TypeId::ANY
                    || right_kind.is_object_like()
                    || right_kind.is_error()
                    || matches!(right_kind, TypeKind::TypeParameter | TypeKind::Array { .. });
                if !key_ok || !object_ok {
                    self.report_operator(node, operator, left, right);
                }
                TypeId::BOOLEAN
            }
            _ => TypeId::ANY,
        }
    }

    /// `+`: numeric when both sides are, string when either side is, `any`
    /// when either side is `any`.
    fn addition_type(&mut self, node: NodeIndex, operator: BinaryOperator, left: TypeId, right: TypeId) -> TypeId {
        if self.symbols.is_error(left) || self.symbols.is_error(right) {
            return TypeId::ERROR;
        }
        if left == TypeId::STRING || right == TypeId::STRING {
            return TypeId::STRING;
        }
        if left == TypeId::ANY || right == TypeId::ANY {
            return TypeId::ANY;
        }
        if self.is_numeric_operand(left) && self.is_numeric_operand(right) {
            return TypeId::NUMBER;
        }
        self.report_operator(node, operator, left, right);
        TypeId::ANY
    }

    fn report_operator(&mut self, node: NodeIndex, operator: BinaryOperator, left: TypeId, right: TypeId) {
        let (left_text, right_text) = (self.format_type(left), self.format_type(right));
        self.error_at_node(
            node,
            diagnostic_codes::OPERATOR_CANNOT_BE_APPLIED_TO_TYPES,
            &[operator.text(), &left_text, &right_text],
        );
    }

    pub(crate) fn resolve_prefix_unary(&mut self, node: NodeIndex, unary: &PrefixUnaryData) -> TypeId {
        let operand = self.resolve_ast(unary.operand, false);
        match unary.operator {
            PrefixOperator::Plus => TypeId::NUMBER,
            PrefixOperator::Minus | PrefixOperator::Tilde => {
                self.check_arithmetic_operand(unary.operand, operand);
                TypeId::NUMBER
            }
            PrefixOperator::Increment | PrefixOperator::Decrement => {
                self.check_increment_operand(node, unary.operand, operand);
                TypeId::NUMBER
            }
            PrefixOperator::Not | PrefixOperator::Delete => TypeId::BOOLEAN,
            PrefixOperator::TypeOf => TypeId::STRING,
            PrefixOperator::Void => TypeId::UNDEFINED,
        }
    }

    pub(crate) fn resolve_postfix_unary(&mut self, node: NodeIndex, unary: &PostfixUnaryData) -> TypeId {
        let operand = self.resolve_ast(unary.operand, false);
        self.check_increment_operand(node, unary.operand, operand);
        TypeId::NUMBER
    }

    fn check_arithmetic_operand(&mut self, at: NodeIndex, ty: TypeId) {
        if !self.is_numeric_operand(ty) {
            self.error_at_node(
                at,
                diagnostic_codes::AN_ARITHMETIC_OPERAND_MUST_BE_OF_TYPE_ANY_NUMBER_OR_AN_ENUM_TYPE,
                &[],
            );
        }
    }

    fn check_increment_operand(&mut self, node: NodeIndex, operand: NodeIndex, ty: TypeId) {
        if !self.is_reference_node(operand) {
            self.error_at_node(
                node,
                diagnostic_codes::THE_OPERAND_OF_AN_INCREMENT_OR_DECREMENT_OPERATOR_MUST_BE_A_VARIABLE_OR_PROPERTY,
                &[],
            );
            return;
        }
        self.check_arithmetic_operand(operand, ty);
    }

    // =========================================================================
    // Conditional and assertion
    // =========================================================================

    /// Both branches see the caller's contextual type.
    pub(crate) fn resolve_conditional(&mut self, conditional: &ConditionalData) -> TypeId {
        self.resolve_ast(conditional.condition, false);
        let when_true = self.resolve_ast(conditional.when_true, true);
        let when_false = self.resolve_ast(conditional.when_false, true);
        best_common_type(self, &[when_true, when_false]).ty
    }

    /// `<T>expr`: the expression is typed with `T` as its contextual type
    /// and must be related to `T` in one direction or the other.
    pub(crate) fn resolve_type_assertion(
        &mut self,
        node: NodeIndex,
        assertion: &TypeAssertionData,
    ) -> TypeId {
        let target = self.resolve_ast(assertion.ty, false);
        let source = {
            let mut scope = self.scope();
            scope.ctx.push_frame(ContextFrame::new(Some(target)));
            scope.resolve_ast(assertion.expression, true)
        };
        if !is_assignable(self, source, target) && !is_assignable(self, target, source) {
            let (source_text, target_text) = (self.format_type(source), self.format_type(target));
            self.error_at_node(
                node,
                diagnostic_codes::NEITHER_TYPE_IS_ASSIGNABLE_TO_THE_OTHER,
                &[&source_text, &target_text],
            );
        }
        target
    }
}
