//! The declaration tree.
//!
//! One `Declaration` per named (or scoped anonymous) position in every source
//! unit. Declarations are created once by the binder and never change after
//! `BinderState::bind` returns.

use crate::symbols::{SignatureId, SymbolRef};
use bitflags::bitflags;
use rustc_hash::FxHashMap;
use tyre_common::Atom;
use tyre_syntax::{NodeIndex, UnitId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Script,
    Module,
    Class,
    Interface,
    Enum,
    EnumMember,
    TypeAlias,
    TypeParameter,
    Function,
    Method,
    Constructor,
    Property,
    PropertySignature,
    MethodSignature,
    CallSignature,
    ConstructSignature,
    IndexSignature,
    Parameter,
    Variable,
    FunctionExpression,
    TypeLiteral,
    FunctionType,
    ConstructorType,
}

impl DeclKind {
    /// Declarations that introduce a name in value space.
    #[must_use]
    pub const fn is_value(self) -> bool {
        matches!(
            self,
            Self::Variable | Self::Function | Self::Parameter | Self::Class | Self::Enum | Self::Module
        )
    }

    /// Declarations that introduce a name in type space.
    #[must_use]
    pub const fn is_type(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Enum | Self::TypeAlias | Self::TypeParameter
        )
    }

    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Module)
    }

    /// Declarations that own a signature.
    #[must_use]
    pub const fn is_signature(self) -> bool {
        matches!(
            self,
            Self::Function
                | Self::Method
                | Self::Constructor
                | Self::MethodSignature
                | Self::CallSignature
                | Self::ConstructSignature
                | Self::IndexSignature
                | Self::FunctionExpression
                | Self::FunctionType
                | Self::ConstructorType
        )
    }

    /// Declarations that open a scope for names declared inside them.
    #[must_use]
    pub const fn is_function_like(self) -> bool {
        matches!(
            self,
            Self::Function | Self::Method | Self::Constructor | Self::FunctionExpression
        )
    }
}

/// Name-space selector for `search_child_declarations`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclFilter {
    Value,
    Type,
    Container,
}

impl DeclFilter {
    #[must_use]
    pub const fn accepts(self, kind: DeclKind) -> bool {
        match self {
            Self::Value => kind.is_value(),
            Self::Type => kind.is_type(),
            Self::Container => kind.is_container(),
        }
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DeclFlags: u16 {
        const EXPORTED = 1 << 0;
        const STATIC = 1 << 1;
        const PRIVATE = 1 << 2;
        const PUBLIC = 1 << 3;
        const OPTIONAL = 1 << 4;
        const REST = 1 << 5;
        const AMBIENT = 1 << 6;
        const HAS_BODY = 1 << 7;
        const PROPERTY_PARAMETER = 1 << 8;
    }
}

#[derive(Clone, Debug)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: Atom,
    pub flags: DeclFlags,
    pub unit: UnitId,
    pub node: NodeIndex,
    pub parent: Option<DeclId>,
    pub children: Vec<DeclId>,
    pub symbol: Option<SymbolRef>,
    /// The signature owned by a signature-like declaration.
    pub signature: Option<SignatureId>,
}

impl Declaration {
    #[must_use]
    pub fn is_exported(&self) -> bool {
        self.flags.contains(DeclFlags::EXPORTED)
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags.contains(DeclFlags::STATIC)
    }

    #[must_use]
    pub fn has_body(&self) -> bool {
        self.flags.contains(DeclFlags::HAS_BODY)
    }
}

#[derive(Clone, Debug, Default)]
pub struct DeclarationTree {
    decls: Vec<Declaration>,
    by_node: FxHashMap<(UnitId, NodeIndex), DeclId>,
    roots: Vec<DeclId>,
}

impl DeclarationTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, decl: Declaration) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.by_node.insert((decl.unit, decl.node), id);
        if let Some(parent) = decl.parent {
            self.decls[parent.0 as usize].children.push(id);
        } else {
            self.roots.push(id);
        }
        self.decls.push(decl);
        id
    }

    pub(crate) fn get_mut(&mut self, id: DeclId) -> &mut Declaration {
        &mut self.decls[id.0 as usize]
    }

    /// # Panics
    ///
    /// Panics on an id from another tree.
    #[must_use]
    pub fn get(&self, id: DeclId) -> &Declaration {
        &self.decls[id.0 as usize]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    #[must_use]
    pub fn declaration_for_node(&self, unit: UnitId, node: NodeIndex) -> Option<DeclId> {
        self.by_node.get(&(unit, node)).copied()
    }

    #[must_use]
    pub fn child_declarations(&self, id: DeclId) -> &[DeclId] {
        &self.get(id).children
    }

    #[must_use]
    pub fn parent_declaration(&self, id: DeclId) -> Option<DeclId> {
        self.get(id).parent
    }

    /// Children of `parent` named `name` whose kind passes `filter`, in
    /// declaration order.
    pub fn search_child_declarations(
        &self,
        parent: DeclId,
        name: Atom,
        filter: DeclFilter,
    ) -> impl Iterator<Item = DeclId> + '_ {
        self.get(parent).children.iter().copied().filter(move |&child| {
            let decl = self.get(child);
            decl.name == name && filter.accepts(decl.kind)
        })
    }

    /// The `Script` declaration of `unit`.
    #[must_use]
    pub fn unit_root(&self, unit: UnitId) -> Option<DeclId> {
        self.roots
            .iter()
            .copied()
            .find(|&root| self.get(root).unit == unit)
    }

    #[must_use]
    pub fn roots(&self) -> &[DeclId] {
        &self.roots
    }

    /// Nearest ancestor (or `id` itself) of the given kind.
    #[must_use]
    pub fn enclosing(&self, id: DeclId, pred: impl Fn(DeclKind) -> bool) -> Option<DeclId> {
        let mut current = Some(id);
        while let Some(decl) = current {
            if pred(self.get(decl).kind) {
                return Some(decl);
            }
            current = self.get(decl).parent;
        }
        None
    }
}
