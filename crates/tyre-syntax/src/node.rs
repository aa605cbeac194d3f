//! Node payloads.
//!
//! `NodeData` is a closed tagged union over every construct the semantic core
//! understands. Optional children use `NodeIndex::NONE`.

use crate::base::{NodeIndex, NodeList};
use bitflags::bitflags;
use tyre_common::{Atom, Span};

bitflags! {
    /// Declaration modifiers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u16 {
        const EXPORT = 1 << 0;
        const DECLARE = 1 << 1;
        const STATIC = 1 << 2;
        const PUBLIC = 1 << 3;
        const PRIVATE = 1 << 4;
    }
}

/// A syntax node.
#[derive(Clone, Debug)]
pub struct Node {
    pub data: NodeData,
    pub span: Span,
    /// Filled in when the parent node is added to the arena.
    pub parent: NodeIndex,
}

#[derive(Clone, Debug)]
pub enum NodeData {
    // Declarations
    SourceFile(SourceFileData),
    Module(ModuleData),
    Class(ClassData),
    Interface(InterfaceData),
    Enum(EnumData),
    EnumMember(EnumMemberData),
    TypeAlias(TypeAliasData),
    Function(FunctionData),
    Variable(VariableData),
    Parameter(ParameterData),
    TypeParameter(TypeParameterData),
    Property(PropertyData),
    PropertySignature(PropertySignatureData),
    Signature(SignatureData),
    IndexSignature(IndexSignatureData),

    // Types
    KeywordType(KeywordType),
    TypeReference(TypeReferenceData),
    ArrayType(ArrayTypeData),
    TypeLiteral(TypeLiteralData),

    // Statements
    Block(BlockData),
    ExpressionStatement(ExpressionStatementData),
    Return(ReturnData),
    If(IfData),
    While(WhileData),

    // Expressions
    Identifier(IdentifierData),
    NumericLiteral(f64),
    StringLiteral(String),
    BooleanLiteral(bool),
    NullLiteral,
    This,
    Super,
    ArrayLiteral(ArrayLiteralData),
    ObjectLiteral(ObjectLiteralData),
    PropertyAssignment(PropertyAssignmentData),
    Call(CallData),
    New(CallData),
    PropertyAccess(PropertyAccessData),
    ElementAccess(ElementAccessData),
    Binary(BinaryData),
    PrefixUnary(PrefixUnaryData),
    PostfixUnary(PostfixUnaryData),
    Conditional(ConditionalData),
    TypeAssertion(TypeAssertionData),
    Parenthesized(ParenthesizedData),
}

// =============================================================================
// Declaration payloads
// =============================================================================

#[derive(Clone, Debug)]
pub struct SourceFileData {
    pub statements: NodeList,
}

/// `module A { ... }`. Dotted names are nested modules.
#[derive(Clone, Debug)]
pub struct ModuleData {
    pub name: Atom,
    pub modifiers: Modifiers,
    pub body: NodeList,
}

#[derive(Clone, Debug)]
pub struct ClassData {
    pub name: Atom,
    pub modifiers: Modifiers,
    pub type_parameters: NodeList,
    /// A `TypeReference`, or NONE.
    pub extends: NodeIndex,
    pub implements: NodeList,
    pub members: NodeList,
}

#[derive(Clone, Debug)]
pub struct InterfaceData {
    pub name: Atom,
    pub modifiers: Modifiers,
    pub type_parameters: NodeList,
    pub extends: NodeList,
    pub members: NodeList,
}

#[derive(Clone, Debug)]
pub struct EnumData {
    pub name: Atom,
    pub modifiers: Modifiers,
    pub members: NodeList,
}

#[derive(Clone, Debug)]
pub struct EnumMemberData {
    pub name: Atom,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TypeAliasData {
    pub name: Atom,
    pub modifiers: Modifiers,
    pub ty: NodeIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Declaration,
    Expression,
    Arrow,
    Method,
    Constructor,
}

/// Every function-like construct with (optionally) a body.
#[derive(Clone, Debug)]
pub struct FunctionData {
    pub kind: FunctionKind,
    /// `Atom::NONE` for anonymous expressions, arrows and constructors.
    pub name: Atom,
    pub modifiers: Modifiers,
    pub type_parameters: NodeList,
    pub parameters: NodeList,
    pub return_type: NodeIndex,
    /// A `Block`, an expression (arrow shorthand), or NONE for overloads and
    /// ambient declarations.
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct VariableData {
    pub name: Atom,
    pub modifiers: Modifiers,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ParameterData {
    pub name: Atom,
    /// `public`/`private` on constructor parameters declares a property.
    pub modifiers: Modifiers,
    pub optional: bool,
    pub rest: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TypeParameterData {
    pub name: Atom,
    pub constraint: NodeIndex,
}

/// Class property declaration.
#[derive(Clone, Debug)]
pub struct PropertyData {
    pub name: Atom,
    pub modifiers: Modifiers,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct PropertySignatureData {
    pub name: Atom,
    pub optional: bool,
    pub type_annotation: NodeIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignatureKind {
    /// `m(x): T` inside an interface or type literal.
    Method,
    /// `(x): T`
    Call,
    /// `new (x): T`
    Construct,
    /// `(x) => T`
    FunctionType,
    /// `new (x) => T`
    ConstructorType,
}

/// Bodiless signatures: members of interfaces/type literals and function types.
#[derive(Clone, Debug)]
pub struct SignatureData {
    pub kind: SignatureKind,
    /// Only set for `Method`.
    pub name: Atom,
    pub optional: bool,
    pub type_parameters: NodeList,
    pub parameters: NodeList,
    pub return_type: NodeIndex,
}

/// `[key: string]: T` / `[index: number]: T`.
#[derive(Clone, Debug)]
pub struct IndexSignatureData {
    /// A `Parameter` node carrying the key type.
    pub parameter: NodeIndex,
    pub return_type: NodeIndex,
}

// =============================================================================
// Type payloads
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeywordType {
    Any,
    Number,
    String,
    Boolean,
    Void,
}

/// `A`, `A<T>`, `M.N.A<T>`.
#[derive(Clone, Debug)]
pub struct TypeReferenceData {
    pub name: Vec<Atom>,
    pub type_arguments: NodeList,
}

#[derive(Clone, Debug)]
pub struct ArrayTypeData {
    pub element: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TypeLiteralData {
    pub members: NodeList,
}

// =============================================================================
// Statement payloads
// =============================================================================

#[derive(Clone, Debug)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct ExpressionStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ReturnData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct IfData {
    pub condition: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct WhileData {
    pub condition: NodeIndex,
    pub body: NodeIndex,
}

// =============================================================================
// Expression payloads
// =============================================================================

#[derive(Clone, Debug)]
pub struct IdentifierData {
    pub name: Atom,
}

#[derive(Clone, Debug)]
pub struct ArrayLiteralData {
    pub elements: NodeList,
}

#[derive(Clone, Debug)]
pub struct ObjectLiteralData {
    /// `PropertyAssignment` nodes.
    pub properties: NodeList,
}

#[derive(Clone, Debug)]
pub struct PropertyAssignmentData {
    pub name: Atom,
    pub initializer: NodeIndex,
}

/// Shared by calls and `new` expressions.
#[derive(Clone, Debug)]
pub struct CallData {
    pub callee: NodeIndex,
    pub type_arguments: NodeList,
    pub arguments: NodeList,
}

#[derive(Clone, Debug)]
pub struct PropertyAccessData {
    pub expression: NodeIndex,
    pub name: Atom,
}

#[derive(Clone, Debug)]
pub struct ElementAccessData {
    pub expression: NodeIndex,
    pub argument: NodeIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LessThan,
    GreaterThan,
    LessThanEquals,
    GreaterThanEquals,
    Equals,
    NotEquals,
    StrictEquals,
    StrictNotEquals,
    LogicalAnd,
    LogicalOr,
    InstanceOf,
    In,
    Comma,
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
    LeftShiftAssign,
    RightShiftAssign,
    UnsignedRightShiftAssign,
    BitwiseAndAssign,
    BitwiseOrAssign,
    BitwiseXorAssign,
}

impl BinaryOperator {
    /// Source text of the operator, used in diagnostics.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::UnsignedRightShift => ">>>",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::LessThanEquals => "<=",
            Self::GreaterThanEquals => ">=",
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::StrictEquals => "===",
            Self::StrictNotEquals => "!==",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::InstanceOf => "instanceof",
            Self::In => "in",
            Self::Comma => ",",
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubtractAssign => "-=",
            Self::MultiplyAssign => "*=",
            Self::DivideAssign => "/=",
            Self::ModuloAssign => "%=",
            Self::LeftShiftAssign => "<<=",
            Self::RightShiftAssign => ">>=",
            Self::UnsignedRightShiftAssign => ">>>=",
            Self::BitwiseAndAssign => "&=",
            Self::BitwiseOrAssign => "|=",
            Self::BitwiseXorAssign => "^=",
        }
    }

    /// The underlying operator of a compound assignment (`+=` -> `+`).
    #[must_use]
    pub const fn compound_base(self) -> Option<BinaryOperator> {
        Some(match self {
            Self::AddAssign => Self::Add,
            Self::SubtractAssign => Self::Subtract,
            Self::MultiplyAssign => Self::Multiply,
            Self::DivideAssign => Self::Divide,
            Self::ModuloAssign => Self::Modulo,
            Self::LeftShiftAssign => Self::LeftShift,
            Self::RightShiftAssign => Self::RightShift,
            Self::UnsignedRightShiftAssign => Self::UnsignedRightShift,
            Self::BitwiseAndAssign => Self::BitwiseAnd,
            Self::BitwiseOrAssign => Self::BitwiseOr,
            Self::BitwiseXorAssign => Self::BitwiseXor,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn is_assignment(self) -> bool {
        matches!(self, Self::Assign) || self.compound_base().is_some()
    }

    /// Operators whose operands must both be numeric (everything arithmetic
    /// except `+`).
    #[must_use]
    pub const fn is_numeric_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Subtract
                | Self::Multiply
                | Self::Divide
                | Self::Modulo
                | Self::LeftShift
                | Self::RightShift
                | Self::UnsignedRightShift
                | Self::BitwiseAnd
                | Self::BitwiseOr
                | Self::BitwiseXor
        )
    }

    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::LessThan
                | Self::GreaterThan
                | Self::LessThanEquals
                | Self::GreaterThanEquals
                | Self::Equals
                | Self::NotEquals
                | Self::StrictEquals
                | Self::StrictNotEquals
        )
    }
}

#[derive(Clone, Debug)]
pub struct BinaryData {
    pub operator: BinaryOperator,
    pub left: NodeIndex,
    pub right: NodeIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrefixOperator {
    Plus,
    Minus,
    Tilde,
    Not,
    Increment,
    Decrement,
    TypeOf,
    Void,
    Delete,
}

#[derive(Clone, Debug)]
pub struct PrefixUnaryData {
    pub operator: PrefixOperator,
    pub operand: NodeIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PostfixOperator {
    Increment,
    Decrement,
}

#[derive(Clone, Debug)]
pub struct PostfixUnaryData {
    pub operator: PostfixOperator,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ConditionalData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

/// `<T>expr`
#[derive(Clone, Debug)]
pub struct TypeAssertionData {
    pub ty: NodeIndex,
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

// =============================================================================
// Child enumeration and accessors
// =============================================================================

fn push(out: &mut Vec<NodeIndex>, idx: NodeIndex) {
    if idx.is_some() {
        out.push(idx);
    }
}

fn push_list(out: &mut Vec<NodeIndex>, list: &NodeList) {
    out.extend(list.iter().filter(|idx| idx.is_some()));
}

impl NodeData {
    /// Direct children in source order.
    #[must_use]
    pub fn children(&self) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        match self {
            NodeData::SourceFile(d) => push_list(&mut out, &d.statements),
            NodeData::Module(d) => push_list(&mut out, &d.body),
            NodeData::Class(d) => {
                push_list(&mut out, &d.type_parameters);
                push(&mut out, d.extends);
                push_list(&mut out, &d.implements);
                push_list(&mut out, &d.members);
            }
            NodeData::Interface(d) => {
                push_list(&mut out, &d.type_parameters);
                push_list(&mut out, &d.extends);
                push_list(&mut out, &d.members);
            }
            NodeData::Enum(d) => push_list(&mut out, &d.members),
            NodeData::EnumMember(d) => push(&mut out, d.initializer),
            NodeData::TypeAlias(d) => push(&mut out, d.ty),
            NodeData::Function(d) => {
                push_list(&mut out, &d.type_parameters);
                push_list(&mut out, &d.parameters);
                push(&mut out, d.return_type);
                push(&mut out, d.body);
            }
            NodeData::Variable(d) => {
                push(&mut out, d.type_annotation);
                push(&mut out, d.initializer);
            }
            NodeData::Parameter(d) => {
                push(&mut out, d.type_annotation);
                push(&mut out, d.initializer);
            }
            NodeData::TypeParameter(d) => push(&mut out, d.constraint),
            NodeData::Property(d) => {
                push(&mut out, d.type_annotation);
                push(&mut out, d.initializer);
            }
            NodeData::PropertySignature(d) => push(&mut out, d.type_annotation),
            NodeData::Signature(d) => {
                push_list(&mut out, &d.type_parameters);
                push_list(&mut out, &d.parameters);
                push(&mut out, d.return_type);
            }
            NodeData::IndexSignature(d) => {
                push(&mut out, d.parameter);
                push(&mut out, d.return_type);
            }
            NodeData::KeywordType(_) => {}
            NodeData::TypeReference(d) => push_list(&mut out, &d.type_arguments),
            NodeData::ArrayType(d) => push(&mut out, d.element),
            NodeData::TypeLiteral(d) => push_list(&mut out, &d.members),
            NodeData::Block(d) => push_list(&mut out, &d.statements),
            NodeData::ExpressionStatement(d) => push(&mut out, d.expression),
            NodeData::Return(d) => push(&mut out, d.expression),
            NodeData::If(d) => {
                push(&mut out, d.condition);
                push(&mut out, d.then_statement);
                push(&mut out, d.else_statement);
            }
            NodeData::While(d) => {
                push(&mut out, d.condition);
                push(&mut out, d.body);
            }
            NodeData::Identifier(_)
            | NodeData::NumericLiteral(_)
            | NodeData::StringLiteral(_)
            | NodeData::BooleanLiteral(_)
            | NodeData::NullLiteral
            | NodeData::This
            | NodeData::Super => {}
            NodeData::ArrayLiteral(d) => push_list(&mut out, &d.elements),
            NodeData::ObjectLiteral(d) => push_list(&mut out, &d.properties),
            NodeData::PropertyAssignment(d) => push(&mut out, d.initializer),
            NodeData::Call(d) | NodeData::New(d) => {
                push(&mut out, d.callee);
                push_list(&mut out, &d.type_arguments);
                push_list(&mut out, &d.arguments);
            }
            NodeData::PropertyAccess(d) => push(&mut out, d.expression),
            NodeData::ElementAccess(d) => {
                push(&mut out, d.expression);
                push(&mut out, d.argument);
            }
            NodeData::Binary(d) => {
                push(&mut out, d.left);
                push(&mut out, d.right);
            }
            NodeData::PrefixUnary(d) => push(&mut out, d.operand),
            NodeData::PostfixUnary(d) => push(&mut out, d.operand),
            NodeData::Conditional(d) => {
                push(&mut out, d.condition);
                push(&mut out, d.when_true);
                push(&mut out, d.when_false);
            }
            NodeData::TypeAssertion(d) => {
                push(&mut out, d.ty);
                push(&mut out, d.expression);
            }
            NodeData::Parenthesized(d) => push(&mut out, d.expression),
        }
        out
    }

    /// Modifiers of declarations that carry them.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        match self {
            NodeData::Module(d) => d.modifiers,
            NodeData::Class(d) => d.modifiers,
            NodeData::Interface(d) => d.modifiers,
            NodeData::Enum(d) => d.modifiers,
            NodeData::TypeAlias(d) => d.modifiers,
            NodeData::Function(d) => d.modifiers,
            NodeData::Variable(d) => d.modifiers,
            NodeData::Parameter(d) => d.modifiers,
            NodeData::Property(d) => d.modifiers,
            _ => Modifiers::empty(),
        }
    }

    pub fn modifiers_mut(&mut self) -> Option<&mut Modifiers> {
        match self {
            NodeData::Module(d) => Some(&mut d.modifiers),
            NodeData::Class(d) => Some(&mut d.modifiers),
            NodeData::Interface(d) => Some(&mut d.modifiers),
            NodeData::Enum(d) => Some(&mut d.modifiers),
            NodeData::TypeAlias(d) => Some(&mut d.modifiers),
            NodeData::Function(d) => Some(&mut d.modifiers),
            NodeData::Variable(d) => Some(&mut d.modifiers),
            NodeData::Parameter(d) => Some(&mut d.modifiers),
            NodeData::Property(d) => Some(&mut d.modifiers),
            _ => None,
        }
    }

    /// Short kind name for tracing output.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            NodeData::SourceFile(_) => "SourceFile",
            NodeData::Module(_) => "Module",
            NodeData::Class(_) => "Class",
            NodeData::Interface(_) => "Interface",
            NodeData::Enum(_) => "Enum",
            NodeData::EnumMember(_) => "EnumMember",
            NodeData::TypeAlias(_) => "TypeAlias",
            NodeData::Function(_) => "Function",
            NodeData::Variable(_) => "Variable",
            NodeData::Parameter(_) => "Parameter",
            NodeData::TypeParameter(_) => "TypeParameter",
            NodeData::Property(_) => "Property",
            NodeData::PropertySignature(_) => "PropertySignature",
            NodeData::Signature(_) => "Signature",
            NodeData::IndexSignature(_) => "IndexSignature",
            NodeData::KeywordType(_) => "KeywordType",
            NodeData::TypeReference(_) => "TypeReference",
            NodeData::ArrayType(_) => "ArrayType",
            NodeData::TypeLiteral(_) => "TypeLiteral",
            NodeData::Block(_) => "Block",
            NodeData::ExpressionStatement(_) => "ExpressionStatement",
            NodeData::Return(_) => "Return",
            NodeData::If(_) => "If",
            NodeData::While(_) => "While",
            NodeData::Identifier(_) => "Identifier",
            NodeData::NumericLiteral(_) => "NumericLiteral",
            NodeData::StringLiteral(_) => "StringLiteral",
            NodeData::BooleanLiteral(_) => "BooleanLiteral",
            NodeData::NullLiteral => "NullLiteral",
            NodeData::This => "This",
            NodeData::Super => "Super",
            NodeData::ArrayLiteral(_) => "ArrayLiteral",
            NodeData::ObjectLiteral(_) => "ObjectLiteral",
            NodeData::PropertyAssignment(_) => "PropertyAssignment",
            NodeData::Call(_) => "Call",
            NodeData::New(_) => "New",
            NodeData::PropertyAccess(_) => "PropertyAccess",
            NodeData::ElementAccess(_) => "ElementAccess",
            NodeData::Binary(_) => "Binary",
            NodeData::PrefixUnary(_) => "PrefixUnary",
            NodeData::PostfixUnary(_) => "PostfixUnary",
            NodeData::Conditional(_) => "Conditional",
            NodeData::TypeAssertion(_) => "TypeAssertion",
            NodeData::Parenthesized(_) => "Parenthesized",
        }
    }

    /// Function expressions and arrows: the expressions whose parameter and
    /// return types come from a contextual signature.
    #[must_use]
    pub const fn is_function_expression(&self) -> bool {
        matches!(
            self,
            NodeData::Function(FunctionData {
                kind: FunctionKind::Expression | FunctionKind::Arrow,
                ..
            })
        )
    }

    /// Expressions whose type depends on the contextual type pushed for them.
    #[must_use]
    pub const fn is_context_sensitive(&self) -> bool {
        self.is_function_expression()
            || matches!(
                self,
                NodeData::ObjectLiteral(_) | NodeData::ArrayLiteral(_)
            )
    }

    /// Nodes that can stand on the left of an assignment.
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(
            self,
            NodeData::Identifier(_) | NodeData::PropertyAccess(_) | NodeData::ElementAccess(_)
        )
    }
}
