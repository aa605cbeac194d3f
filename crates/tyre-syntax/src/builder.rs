//! Programmatic tree construction.
//!
//! Every node gets a distinct one-byte synthetic span (its arena position), so
//! diagnostics anchored to different nodes never collide. Children must be
//! built before their parents, which is the natural order of nested calls:
//!
//! ```
//! use tyre_syntax::{NodeIndex, Program};
//!
//! let mut program = Program::new();
//! program.add_unit("a.ts", |b| {
//!     let ty = b.number_type();
//!     let init = b.num(1.0);
//!     let x = b.var("x", ty, init);
//!     b.source_file(vec![x])
//! });
//! ```

use crate::arena::NodeArena;
use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use tyre_common::{Atom, Interner, Span};

pub struct AstBuilder<'i> {
    interner: &'i mut Interner,
    arena: NodeArena,
}

impl<'i> AstBuilder<'i> {
    pub fn new(interner: &'i mut Interner) -> Self {
        Self {
            interner,
            arena: NodeArena::new(),
        }
    }

    #[must_use]
    pub fn finish(self) -> NodeArena {
        self.arena
    }

    pub fn intern(&mut self, text: &str) -> Atom {
        self.interner.intern(text)
    }

    /// Add a raw node.
    pub fn add(&mut self, data: NodeData) -> NodeIndex {
        let pos = self.arena.len() as u32;
        self.arena.add(data, Span::new(pos, pos + 1))
    }

    #[must_use]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    // =========================================================================
    // Modifiers
    // =========================================================================

    pub fn with_modifiers(&mut self, idx: NodeIndex, modifiers: Modifiers) -> NodeIndex {
        if let Some(node) = self.arena.get_mut(idx)
            && let Some(slot) = node.data.modifiers_mut()
        {
            *slot |= modifiers;
        }
        idx
    }

    pub fn export(&mut self, idx: NodeIndex) -> NodeIndex {
        self.with_modifiers(idx, Modifiers::EXPORT)
    }

    pub fn declare(&mut self, idx: NodeIndex) -> NodeIndex {
        self.with_modifiers(idx, Modifiers::DECLARE)
    }

    // =========================================================================
    // Units and containers
    // =========================================================================

    pub fn source_file(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::SourceFile(SourceFileData {
            statements: statements.into(),
        }))
    }

    pub fn module(&mut self, name: &str, body: Vec<NodeIndex>) -> NodeIndex {
        let name = self.intern(name);
        self.add(NodeData::Module(ModuleData {
            name,
            modifiers: Modifiers::empty(),
            body: body.into(),
        }))
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub fn keyword(&mut self, keyword: KeywordType) -> NodeIndex {
        self.add(NodeData::KeywordType(keyword))
    }

    pub fn any_type(&mut self) -> NodeIndex {
        self.keyword(KeywordType::Any)
    }

    pub fn number_type(&mut self) -> NodeIndex {
        self.keyword(KeywordType::Number)
    }

    pub fn string_type(&mut self) -> NodeIndex {
        self.keyword(KeywordType::String)
    }

    pub fn boolean_type(&mut self) -> NodeIndex {
        self.keyword(KeywordType::Boolean)
    }

    pub fn void_type(&mut self) -> NodeIndex {
        self.keyword(KeywordType::Void)
    }

    /// `name<args>`; a dotted `name` becomes a qualified reference.
    pub fn type_ref(&mut self, name: &str, type_arguments: Vec<NodeIndex>) -> NodeIndex {
        let name = name.split('.').map(|part| self.interner.intern(part)).collect();
        self.add(NodeData::TypeReference(TypeReferenceData {
            name,
            type_arguments: type_arguments.into(),
        }))
    }

    pub fn array_type(&mut self, element: NodeIndex) -> NodeIndex {
        self.add(NodeData::ArrayType(ArrayTypeData { element }))
    }

    pub fn type_literal(&mut self, members: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::TypeLiteral(TypeLiteralData {
            members: members.into(),
        }))
    }

    fn signature(
        &mut self,
        kind: SignatureKind,
        name: &str,
        optional: bool,
        type_parameters: Vec<NodeIndex>,
        parameters: Vec<NodeIndex>,
        return_type: NodeIndex,
    ) -> NodeIndex {
        let name = self.intern(name);
        self.add(NodeData::Signature(SignatureData {
            kind,
            name,
            optional,
            type_parameters: type_parameters.into(),
            parameters: parameters.into(),
            return_type,
        }))
    }

    pub fn function_type(
        &mut self,
        type_parameters: Vec<NodeIndex>,
        parameters: Vec<NodeIndex>,
        return_type: NodeIndex,
    ) -> NodeIndex {
        self.signature(
            SignatureKind::FunctionType,
            "",
            false,
            type_parameters,
            parameters,
            return_type,
        )
    }

    pub fn constructor_type(
        &mut self,
        type_parameters: Vec<NodeIndex>,
        parameters: Vec<NodeIndex>,
        return_type: NodeIndex,
    ) -> NodeIndex {
        self.signature(
            SignatureKind::ConstructorType,
            "",
            false,
            type_parameters,
            parameters,
            return_type,
        )
    }

    // =========================================================================
    // Type members
    // =========================================================================

    pub fn property_signature(&mut self, name: &str, ty: NodeIndex) -> NodeIndex {
        let name = self.intern(name);
        self.add(NodeData::PropertySignature(PropertySignatureData {
            name,
            optional: false,
            type_annotation: ty,
        }))
    }

    pub fn optional_property_signature(&mut self, name: &str, ty: NodeIndex) -> NodeIndex {
        let name = self.intern(name);
        self.add(NodeData::PropertySignature(PropertySignatureData {
            name,
            optional: true,
            type_annotation: ty,
        }))
    }

    pub fn method_signature(
        &mut self,
        name: &str,
        type_parameters: Vec<NodeIndex>,
        parameters: Vec<NodeIndex>,
        return_type: NodeIndex,
    ) -> NodeIndex {
        self.signature(
            SignatureKind::Method,
            name,
            false,
            type_parameters,
            parameters,
            return_type,
        )
    }

    pub fn call_signature(
        &mut self,
        type_parameters: Vec<NodeIndex>,
        parameters: Vec<NodeIndex>,
        return_type: NodeIndex,
    ) -> NodeIndex {
        self.signature(
            SignatureKind::Call,
            "",
            false,
            type_parameters,
            parameters,
            return_type,
        )
    }

    pub fn construct_signature(
        &mut self,
        type_parameters: Vec<NodeIndex>,
        parameters: Vec<NodeIndex>,
        return_type: NodeIndex,
    ) -> NodeIndex {
        self.signature(
            SignatureKind::Construct,
            "",
            false,
            type_parameters,
            parameters,
            return_type,
        )
    }

    /// `[key: key_type]: return_type`
    pub fn index_signature(
        &mut self,
        key: &str,
        key_type: NodeIndex,
        return_type: NodeIndex,
    ) -> NodeIndex {
        let parameter = self.param(key, key_type);
        self.add(NodeData::IndexSignature(IndexSignatureData {
            parameter,
            return_type,
        }))
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    pub fn parameter(&mut self, data: ParameterData) -> NodeIndex {
        self.add(NodeData::Parameter(data))
    }

    fn param_with(
        &mut self,
        name: &str,
        ty: NodeIndex,
        optional: bool,
        rest: bool,
        initializer: NodeIndex,
        modifiers: Modifiers,
    ) -> NodeIndex {
        let name = self.intern(name);
        self.parameter(ParameterData {
            name,
            modifiers,
            optional,
            rest,
            type_annotation: ty,
            initializer,
        })
    }

    /// A required parameter; pass `NodeIndex::NONE` for an unannotated one.
    pub fn param(&mut self, name: &str, ty: NodeIndex) -> NodeIndex {
        self.param_with(name, ty, false, false, NodeIndex::NONE, Modifiers::empty())
    }

    pub fn optional_param(&mut self, name: &str, ty: NodeIndex) -> NodeIndex {
        self.param_with(name, ty, true, false, NodeIndex::NONE, Modifiers::empty())
    }

    pub fn rest_param(&mut self, name: &str, ty: NodeIndex) -> NodeIndex {
        self.param_with(name, ty, false, true, NodeIndex::NONE, Modifiers::empty())
    }

    pub fn param_with_initializer(
        &mut self,
        name: &str,
        ty: NodeIndex,
        initializer: NodeIndex,
    ) -> NodeIndex {
        self.param_with(name, ty, true, false, initializer, Modifiers::empty())
    }

    /// Constructor parameter that also declares a property (`public x: T`).
    pub fn property_param(&mut self, name: &str, modifiers: Modifiers, ty: NodeIndex) -> NodeIndex {
        self.param_with(name, ty, false, false, NodeIndex::NONE, modifiers)
    }

    pub fn type_param(&mut self, name: &str, constraint: NodeIndex) -> NodeIndex {
        let name = self.intern(name);
        self.add(NodeData::TypeParameter(TypeParameterData { name, constraint }))
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    pub fn class(
        &mut self,
        name: &str,
        type_parameters: Vec<NodeIndex>,
        extends: NodeIndex,
        implements: Vec<NodeIndex>,
        members: Vec<NodeIndex>,
    ) -> NodeIndex {
        let name = self.intern(name);
        self.add(NodeData::Class(ClassData {
            name,
            modifiers: Modifiers::empty(),
            type_parameters: type_parameters.into(),
            extends,
            implements: implements.into(),
            members: members.into(),
        }))
    }

    pub fn interface(
        &mut self,
        name: &str,
        type_parameters: Vec<NodeIndex>,
        extends: Vec<NodeIndex>,
        members: Vec<NodeIndex>,
    ) -> NodeIndex {
        let name = self.intern(name);
        self.add(NodeData::Interface(InterfaceData {
            name,
            modifiers: Modifiers::empty(),
            type_parameters: type_parameters.into(),
            extends: extends.into(),
            members: members.into(),
        }))
    }

    pub fn enum_member(&mut self, name: &str, initializer: NodeIndex) -> NodeIndex {
        let name = self.intern(name);
        self.add(NodeData::EnumMember(EnumMemberData { name, initializer }))
    }

    /// An enum whose members have no initializers.
    pub fn enum_decl(&mut self, name: &str, members: &[&str]) -> NodeIndex {
        let members = members
            .iter()
            .map(|member| self.enum_member(member, NodeIndex::NONE))
            .collect();
        self.enum_with_members(name, members)
    }

    pub fn enum_with_members(&mut self, name: &str, members: Vec<NodeIndex>) -> NodeIndex {
        let name = self.intern(name);
        self.add(NodeData::Enum(EnumData {
            name,
            modifiers: Modifiers::empty(),
            members: members.into(),
        }))
    }

    pub fn type_alias(&mut self, name: &str, ty: NodeIndex) -> NodeIndex {
        let name = self.intern(name);
        self.add(NodeData::TypeAlias(TypeAliasData {
            name,
            modifiers: Modifiers::empty(),
            ty,
        }))
    }

    fn function_like(
        &mut self,
        kind: FunctionKind,
        name: &str,
        modifiers: Modifiers,
        type_parameters: Vec<NodeIndex>,
        parameters: Vec<NodeIndex>,
        return_type: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        let name = self.intern(name);
        self.add(NodeData::Function(FunctionData {
            kind,
            name,
            modifiers,
            type_parameters: type_parameters.into(),
            parameters: parameters.into(),
            return_type,
            body,
        }))
    }

    /// Function declaration; `body` NONE declares an overload.
    pub fn function(
        &mut self,
        name: &str,
        type_parameters: Vec<NodeIndex>,
        parameters: Vec<NodeIndex>,
        return_type: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        self.function_like(
            FunctionKind::Declaration,
            name,
            Modifiers::empty(),
            type_parameters,
            parameters,
            return_type,
            body,
        )
    }

    pub fn method(
        &mut self,
        name: &str,
        modifiers: Modifiers,
        type_parameters: Vec<NodeIndex>,
        parameters: Vec<NodeIndex>,
        return_type: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        self.function_like(
            FunctionKind::Method,
            name,
            modifiers,
            type_parameters,
            parameters,
            return_type,
            body,
        )
    }

    pub fn constructor(&mut self, parameters: Vec<NodeIndex>, body: NodeIndex) -> NodeIndex {
        self.function_like(
            FunctionKind::Constructor,
            "",
            Modifiers::empty(),
            Vec::new(),
            parameters,
            NodeIndex::NONE,
            body,
        )
    }

    pub fn property(
        &mut self,
        name: &str,
        modifiers: Modifiers,
        ty: NodeIndex,
        initializer: NodeIndex,
    ) -> NodeIndex {
        let name = self.intern(name);
        self.add(NodeData::Property(PropertyData {
            name,
            modifiers,
            type_annotation: ty,
            initializer,
        }))
    }

    pub fn var(&mut self, name: &str, ty: NodeIndex, initializer: NodeIndex) -> NodeIndex {
        let name = self.intern(name);
        self.add(NodeData::Variable(VariableData {
            name,
            modifiers: Modifiers::empty(),
            type_annotation: ty,
            initializer,
        }))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub fn block(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::Block(BlockData {
            statements: statements.into(),
        }))
    }

    pub fn expr_stmt(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add(NodeData::ExpressionStatement(ExpressionStatementData {
            expression,
        }))
    }

    /// `return expr;` (`NodeIndex::NONE` for a bare `return;`).
    pub fn return_stmt(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add(NodeData::Return(ReturnData { expression }))
    }

    pub fn if_stmt(
        &mut self,
        condition: NodeIndex,
        then_statement: NodeIndex,
        else_statement: NodeIndex,
    ) -> NodeIndex {
        self.add(NodeData::If(IfData {
            condition,
            then_statement,
            else_statement,
        }))
    }

    pub fn while_stmt(&mut self, condition: NodeIndex, body: NodeIndex) -> NodeIndex {
        self.add(NodeData::While(WhileData { condition, body }))
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn ident(&mut self, name: &str) -> NodeIndex {
        let name = self.intern(name);
        self.add(NodeData::Identifier(IdentifierData { name }))
    }

    pub fn num(&mut self, value: f64) -> NodeIndex {
        self.add(NodeData::NumericLiteral(value))
    }

    pub fn string(&mut self, value: &str) -> NodeIndex {
        self.add(NodeData::StringLiteral(value.to_string()))
    }

    pub fn boolean(&mut self, value: bool) -> NodeIndex {
        self.add(NodeData::BooleanLiteral(value))
    }

    pub fn null(&mut self) -> NodeIndex {
        self.add(NodeData::NullLiteral)
    }

    pub fn this(&mut self) -> NodeIndex {
        self.add(NodeData::This)
    }

    pub fn super_(&mut self) -> NodeIndex {
        self.add(NodeData::Super)
    }

    pub fn array(&mut self, elements: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::ArrayLiteral(ArrayLiteralData {
            elements: elements.into(),
        }))
    }

    pub fn property_assignment(&mut self, name: &str, initializer: NodeIndex) -> NodeIndex {
        let name = self.intern(name);
        self.add(NodeData::PropertyAssignment(PropertyAssignmentData {
            name,
            initializer,
        }))
    }

    /// `{ name: value, ... }`
    pub fn object(&mut self, properties: Vec<(&str, NodeIndex)>) -> NodeIndex {
        let properties: Vec<NodeIndex> = properties
            .into_iter()
            .map(|(name, value)| self.property_assignment(name, value))
            .collect();
        self.add(NodeData::ObjectLiteral(ObjectLiteralData {
            properties: properties.into(),
        }))
    }

    pub fn call(&mut self, callee: NodeIndex, arguments: Vec<NodeIndex>) -> NodeIndex {
        self.call_generic(callee, Vec::new(), arguments)
    }

    pub fn call_generic(
        &mut self,
        callee: NodeIndex,
        type_arguments: Vec<NodeIndex>,
        arguments: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.add(NodeData::Call(CallData {
            callee,
            type_arguments: type_arguments.into(),
            arguments: arguments.into(),
        }))
    }

    pub fn new_expr(
        &mut self,
        callee: NodeIndex,
        type_arguments: Vec<NodeIndex>,
        arguments: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.add(NodeData::New(CallData {
            callee,
            type_arguments: type_arguments.into(),
            arguments: arguments.into(),
        }))
    }

    pub fn prop(&mut self, expression: NodeIndex, name: &str) -> NodeIndex {
        let name = self.intern(name);
        self.add(NodeData::PropertyAccess(PropertyAccessData { expression, name }))
    }

    pub fn elem(&mut self, expression: NodeIndex, argument: NodeIndex) -> NodeIndex {
        self.add(NodeData::ElementAccess(ElementAccessData {
            expression,
            argument,
        }))
    }

    pub fn binary(
        &mut self,
        left: NodeIndex,
        operator: BinaryOperator,
        right: NodeIndex,
    ) -> NodeIndex {
        self.add(NodeData::Binary(BinaryData {
            operator,
            left,
            right,
        }))
    }

    pub fn assign(&mut self, left: NodeIndex, right: NodeIndex) -> NodeIndex {
        self.binary(left, BinaryOperator::Assign, right)
    }

    pub fn prefix(&mut self, operator: PrefixOperator, operand: NodeIndex) -> NodeIndex {
        self.add(NodeData::PrefixUnary(PrefixUnaryData { operator, operand }))
    }

    pub fn postfix(&mut self, operator: PostfixOperator, operand: NodeIndex) -> NodeIndex {
        self.add(NodeData::PostfixUnary(PostfixUnaryData { operator, operand }))
    }

    pub fn conditional(
        &mut self,
        condition: NodeIndex,
        when_true: NodeIndex,
        when_false: NodeIndex,
    ) -> NodeIndex {
        self.add(NodeData::Conditional(ConditionalData {
            condition,
            when_true,
            when_false,
        }))
    }

    pub fn assertion(&mut self, ty: NodeIndex, expression: NodeIndex) -> NodeIndex {
        self.add(NodeData::TypeAssertion(TypeAssertionData { ty, expression }))
    }

    pub fn paren(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add(NodeData::Parenthesized(ParenthesizedData { expression }))
    }

    /// `(params): ret => body`; `body` is a block or an expression.
    pub fn arrow(
        &mut self,
        parameters: Vec<NodeIndex>,
        return_type: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        self.function_like(
            FunctionKind::Arrow,
            "",
            Modifiers::empty(),
            Vec::new(),
            parameters,
            return_type,
            body,
        )
    }

    pub fn function_expr(
        &mut self,
        name: &str,
        type_parameters: Vec<NodeIndex>,
        parameters: Vec<NodeIndex>,
        return_type: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        self.function_like(
            FunctionKind::Expression,
            name,
            Modifiers::empty(),
            type_parameters,
            parameters,
            return_type,
            body,
        )
    }
}

impl NodeList {
    /// Build a list from already-added nodes.
    #[must_use]
    pub fn of(nodes: &[NodeIndex]) -> Self {
        Self {
            nodes: nodes.to_vec(),
        }
    }
}
