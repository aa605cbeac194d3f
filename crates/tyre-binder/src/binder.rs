//! The declaration-collection pass.
//!
//! Walks every unit once and produces the declaration tree plus skeleton
//! symbols. Merging rules:
//! - modules merge per scope and name (across units at script level)
//! - interfaces merge per scope and name; later declarations reuse the type
//!   parameters of the first one
//! - function declarations with the same name append call signatures to one
//!   function object type (overloads)
//! - methods with the same name on one class or interface append call
//!   signatures the same way
//! - `var` redeclarations reuse the first variable symbol
//!
//! Classes get an instance type, a constructor type (`typeof C`) and a class
//! value; enums get an enum type, an enum object type and an enum value.

use crate::declarations::{DeclFlags, DeclId, DeclKind, Declaration, DeclarationTree};
use crate::symbols::{
    ResolutionState, SignatureId, SignatureKind, SignatureSymbol, SymbolArena, SymbolFlags,
    SymbolRef, TypeId, TypeKind, TypeSymbol, ValueId, ValueKind, ValueSymbol,
};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};
use tyre_common::Atom;
use tyre_syntax::{
    ClassData, EnumData, FunctionData, FunctionKind, InterfaceData, Modifiers, ModuleData,
    NodeArena, NodeData, NodeIndex, NodeList, Program, SignatureData, UnitId, VariableData,
};

/// Output of the binder.
#[derive(Clone, Debug)]
pub struct BoundProgram {
    pub declarations: DeclarationTree,
    pub symbols: SymbolArena,
}

/// A naming scope used only to merge declarations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Scope {
    /// Script-level declarations of every unit.
    Global,
    Container(TypeId),
    Local(DeclId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Space {
    Value,
    Type,
    Container,
}

/// Where the declarations found below a node attach.
#[derive(Clone, Copy, Debug)]
struct BindContext {
    parent: DeclId,
    scope: Scope,
    /// Module container receiving exported values.
    container: Option<TypeId>,
    ambient: bool,
}

impl BindContext {
    fn nested(self, parent: DeclId) -> Self {
        Self {
            parent,
            scope: Scope::Local(parent),
            container: None,
            ambient: self.ambient,
        }
    }

    fn child(self, parent: DeclId) -> Self {
        Self { parent, ..self }
    }
}

pub struct BinderState<'a> {
    program: &'a Program,
    unit: UnitId,
    declarations: DeclarationTree,
    symbols: SymbolArena,
    locals: FxHashMap<(Scope, Atom, Space), SymbolRef>,
}

impl<'a> BinderState<'a> {
    #[must_use]
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            unit: UnitId(0),
            declarations: DeclarationTree::new(),
            symbols: SymbolArena::new(),
            locals: FxHashMap::default(),
        }
    }

    /// Bind every unit of `program`.
    #[must_use]
    pub fn bind(program: &Program) -> BoundProgram {
        let mut state = BinderState::new(program);
        for unit in program.unit_ids() {
            state.bind_unit(unit);
        }
        state.finish()
    }

    #[must_use]
    pub fn finish(self) -> BoundProgram {
        BoundProgram {
            declarations: self.declarations,
            symbols: self.symbols,
        }
    }

    pub fn bind_unit(&mut self, unit: UnitId) {
        self.unit = unit;
        let source = self.program.unit(unit);
        let arena = source.arena();
        debug!(unit = unit.0, path = source.path(), "binding unit");

        let root = source.root();
        let script = self.declare(DeclKind::Script, Atom::NONE, DeclFlags::empty(), root, None);
        let ctx = BindContext {
            parent: script,
            scope: Scope::Global,
            container: None,
            ambient: false,
        };
        if let Some(NodeData::SourceFile(file)) = arena.data(root) {
            self.bind_list(arena, &file.statements, ctx);
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn declare(
        &mut self,
        kind: DeclKind,
        name: Atom,
        flags: DeclFlags,
        node: NodeIndex,
        parent: Option<DeclId>,
    ) -> DeclId {
        trace!(?kind, name = name.0, node = node.0, "declare");
        self.declarations.add(Declaration {
            kind,
            name,
            flags,
            unit: self.unit,
            node,
            parent,
            children: Vec::new(),
            symbol: None,
            signature: None,
        })
    }

    fn set_symbol(&mut self, decl: DeclId, symbol: SymbolRef) {
        self.declarations.get_mut(decl).symbol = Some(symbol);
    }

    fn decl_flags(modifiers: Modifiers, ctx: BindContext) -> DeclFlags {
        let mut flags = DeclFlags::empty();
        if modifiers.contains(Modifiers::EXPORT) {
            flags |= DeclFlags::EXPORTED;
        }
        if modifiers.contains(Modifiers::DECLARE) || ctx.ambient {
            flags |= DeclFlags::AMBIENT;
        }
        if modifiers.contains(Modifiers::STATIC) {
            flags |= DeclFlags::STATIC;
        }
        if modifiers.contains(Modifiers::PUBLIC) {
            flags |= DeclFlags::PUBLIC;
        }
        if modifiers.contains(Modifiers::PRIVATE) {
            flags |= DeclFlags::PRIVATE;
        }
        flags
    }

    fn symbol_flags(flags: DeclFlags) -> SymbolFlags {
        let mut out = SymbolFlags::empty();
        for (decl_flag, symbol_flag) in [
            (DeclFlags::EXPORTED, SymbolFlags::EXPORTED),
            (DeclFlags::STATIC, SymbolFlags::STATIC),
            (DeclFlags::PRIVATE, SymbolFlags::PRIVATE),
            (DeclFlags::PUBLIC, SymbolFlags::PUBLIC),
            (DeclFlags::OPTIONAL, SymbolFlags::OPTIONAL),
            (DeclFlags::REST, SymbolFlags::VARARG),
            (DeclFlags::AMBIENT, SymbolFlags::AMBIENT),
            (DeclFlags::PROPERTY_PARAMETER, SymbolFlags::PROPERTY_PARAMETER),
        ] {
            if flags.contains(decl_flag) {
                out |= symbol_flag;
            }
        }
        out
    }

    fn new_value(&mut self, kind: ValueKind, name: Atom, decl: DeclId) -> ValueId {
        let mut symbol = ValueSymbol::new(kind, name);
        symbol.flags = Self::symbol_flags(self.declarations.get(decl).flags);
        symbol.declarations.push(decl);
        self.symbols.add_value(symbol)
    }

    fn new_type(&mut self, kind: TypeKind, name: Atom, decl: DeclId) -> TypeId {
        let mut symbol = TypeSymbol::new(kind, name);
        symbol.flags = Self::symbol_flags(self.declarations.get(decl).flags);
        symbol.declarations.push(decl);
        self.symbols.add_type(symbol)
    }

    /// Export `value` from the enclosing module container.
    fn export_value(&mut self, ctx: BindContext, decl: DeclId, value: ValueId) {
        if let Some(container) = ctx.container
            && self.declarations.get(decl).is_exported()
        {
            let name = self.symbols.value(value).name;
            self.symbols.ty_mut(container).members.insert(name, value);
            self.symbols.value_mut(value).container = Some(container);
        }
    }

    fn bind_list(&mut self, arena: &NodeArena, list: &NodeList, ctx: BindContext) {
        for idx in list.iter() {
            self.bind_node(arena, idx, ctx);
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    fn bind_node(&mut self, arena: &NodeArena, idx: NodeIndex, ctx: BindContext) {
        let Some(data) = arena.data(idx) else {
            return;
        };
        match data {
            NodeData::Module(module) => self.bind_module(arena, idx, module, ctx),
            NodeData::Class(class) => self.bind_class(arena, idx, class, ctx),
            NodeData::Interface(interface) => self.bind_interface(arena, idx, interface, ctx),
            NodeData::Enum(enum_data) => self.bind_enum(arena, idx, enum_data, ctx),
            NodeData::TypeAlias(alias) => {
                let flags = Self::decl_flags(alias.modifiers, ctx);
                let decl = self.declare(DeclKind::TypeAlias, alias.name, flags, idx, Some(ctx.parent));
                let ty = self.new_type(TypeKind::Alias, alias.name, decl);
                self.set_symbol(decl, SymbolRef::Type(ty));
                self.bind_node(arena, alias.ty, ctx.child(decl));
            }
            NodeData::Function(function) => match function.kind {
                FunctionKind::Declaration => self.bind_function_declaration(arena, idx, function, ctx),
                FunctionKind::Expression | FunctionKind::Arrow => {
                    self.bind_function_expression(arena, idx, function, ctx);
                }
                FunctionKind::Method | FunctionKind::Constructor => {
                    for child in arena.children(idx) {
                        self.bind_node(arena, child, ctx);
                    }
                }
            },
            NodeData::Variable(variable) => self.bind_variable(arena, idx, variable, ctx),
            NodeData::TypeLiteral(literal) => {
                let decl = self.declare(
                    DeclKind::TypeLiteral,
                    Atom::NONE,
                    DeclFlags::empty(),
                    idx,
                    Some(ctx.parent),
                );
                let ty = self.new_type(TypeKind::ObjectType, Atom::NONE, decl);
                self.set_symbol(decl, SymbolRef::Type(ty));
                self.bind_type_members(arena, ty, decl, &literal.members, ctx.child(decl));
            }
            NodeData::Signature(signature)
                if matches!(
                    signature.kind,
                    tyre_syntax::SignatureKind::FunctionType
                        | tyre_syntax::SignatureKind::ConstructorType
                ) =>
            {
                self.bind_function_type(arena, idx, signature, ctx);
            }
            _ => {
                for child in arena.children(idx) {
                    self.bind_node(arena, child, ctx);
                }
            }
        }
    }

    // =========================================================================
    // Containers
    // =========================================================================

    fn bind_module(&mut self, arena: &NodeArena, idx: NodeIndex, module: &ModuleData, ctx: BindContext) {
        let flags = Self::decl_flags(module.modifiers, ctx);
        let decl = self.declare(DeclKind::Module, module.name, flags, idx, Some(ctx.parent));

        let key = (ctx.scope, module.name, Space::Container);
        let (container, value) = match self.locals.get(&key).copied() {
            Some(SymbolRef::Type(container)) => {
                let value = self.symbols.ty(container).value;
                self.symbols.ty_mut(container).declarations.push(decl);
                if let Some(value) = value {
                    self.symbols.value_mut(value).declarations.push(decl);
                }
                (container, value)
            }
            _ => {
                let container = self.new_type(TypeKind::Container, module.name, decl);
                let value = self.new_value(ValueKind::Module, module.name, decl);
                self.symbols.value_mut(value).ty = Some(container);
                self.symbols.value_mut(value).state = ResolutionState::Resolved;
                self.symbols.ty_mut(container).value = Some(value);
                self.locals.insert(key, SymbolRef::Type(container));
                (container, Some(value))
            }
        };
        if let Some(value) = value {
            self.set_symbol(decl, SymbolRef::Value(value));
            self.export_value(ctx, decl, value);
        }
        debug!(name = module.name.0, container = container.0, "bound module");

        let inner = BindContext {
            parent: decl,
            scope: Scope::Container(container),
            container: Some(container),
            ambient: flags.contains(DeclFlags::AMBIENT),
        };
        self.bind_list(arena, &module.body, inner);
    }

    fn bind_class(&mut self, arena: &NodeArena, idx: NodeIndex, class: &ClassData, ctx: BindContext) {
        let flags = Self::decl_flags(class.modifiers, ctx);
        let decl = self.declare(DeclKind::Class, class.name, flags, idx, Some(ctx.parent));

        let instance = self.new_type(TypeKind::Class, class.name, decl);
        let constructor = self.new_type(TypeKind::ConstructorType, class.name, decl);
        let value = self.new_value(ValueKind::Class, class.name, decl);
        self.symbols.value_mut(value).ty = Some(constructor);
        {
            let symbols = &mut self.symbols;
            symbols.ty_mut(instance).associated = Some(constructor);
            symbols.ty_mut(instance).value = Some(value);
            symbols.ty_mut(constructor).associated = Some(instance);
            symbols.ty_mut(constructor).value = Some(value);
        }
        self.set_symbol(decl, SymbolRef::Type(instance));
        self.locals.entry((ctx.scope, class.name, Space::Type)).or_insert(SymbolRef::Type(instance));
        self.locals.entry((ctx.scope, class.name, Space::Value)).or_insert(SymbolRef::Value(value));
        self.export_value(ctx, decl, value);

        let inner = ctx.child(decl);
        let type_parameters = self.bind_type_parameters(arena, decl, &class.type_parameters, &[], inner);
        self.symbols.ty_mut(instance).type_parameters = type_parameters;

        self.bind_node(arena, class.extends, inner);
        self.bind_list(arena, &class.implements, inner);

        for member in class.members.iter() {
            let Some(data) = arena.data(member) else {
                continue;
            };
            match data {
                NodeData::Property(property) => {
                    let flags = Self::decl_flags(property.modifiers, ctx);
                    let member_decl =
                        self.declare(DeclKind::Property, property.name, flags, member, Some(decl));
                    let owner = if flags.contains(DeclFlags::STATIC) { constructor } else { instance };
                    let value = self.new_value(ValueKind::Property, property.name, member_decl);
                    self.symbols.value_mut(value).container = Some(owner);
                    self.symbols.ty_mut(owner).members.insert(property.name, value);
                    self.set_symbol(member_decl, SymbolRef::Value(value));
                    self.bind_node(arena, property.type_annotation, inner.child(member_decl));
                    self.bind_node(arena, property.initializer, inner.nested(member_decl));
                }
                NodeData::Function(function) if function.kind == FunctionKind::Method => {
                    let owner = if function.modifiers.contains(Modifiers::STATIC) {
                        constructor
                    } else {
                        instance
                    };
                    self.bind_method(arena, member, function, owner, inner);
                }
                NodeData::Function(function) if function.kind == FunctionKind::Constructor => {
                    self.bind_constructor(arena, member, function, instance, constructor, inner);
                }
                NodeData::IndexSignature(_) => {
                    self.bind_type_member(arena, member, instance, decl, inner);
                }
                _ => self.bind_node(arena, member, inner),
            }
        }
        debug!(name = class.name.0, instance = instance.0, constructor = constructor.0, "bound class");
    }

    fn bind_interface(
        &mut self,
        arena: &NodeArena,
        idx: NodeIndex,
        interface: &InterfaceData,
        ctx: BindContext,
    ) {
        let flags = Self::decl_flags(interface.modifiers, ctx);
        let decl = self.declare(DeclKind::Interface, interface.name, flags, idx, Some(ctx.parent));

        let key = (ctx.scope, interface.name, Space::Type);
        let ty = match self.locals.get(&key).copied() {
            Some(SymbolRef::Type(existing)) if self.symbols.kind(existing) == TypeKind::Interface => {
                self.symbols.ty_mut(existing).declarations.push(decl);
                existing
            }
            _ => {
                let ty = self.new_type(TypeKind::Interface, interface.name, decl);
                self.locals.entry(key).or_insert(SymbolRef::Type(ty));
                ty
            }
        };
        self.set_symbol(decl, SymbolRef::Type(ty));

        let inner = ctx.child(decl);
        let existing = self.symbols.ty(ty).type_parameters.clone();
        let type_parameters =
            self.bind_type_parameters(arena, decl, &interface.type_parameters, &existing, inner);
        if existing.is_empty() {
            self.symbols.ty_mut(ty).type_parameters = type_parameters;
        }
        self.bind_list(arena, &interface.extends, inner);
        self.bind_type_members(arena, ty, decl, &interface.members, inner);
    }

    fn bind_enum(&mut self, arena: &NodeArena, idx: NodeIndex, enum_data: &EnumData, ctx: BindContext) {
        let flags = Self::decl_flags(enum_data.modifiers, ctx);
        let decl = self.declare(DeclKind::Enum, enum_data.name, flags, idx, Some(ctx.parent));

        let key = (ctx.scope, enum_data.name, Space::Type);
        let (ty, object) = match self.locals.get(&key).copied() {
            Some(SymbolRef::Type(existing)) if self.symbols.kind(existing) == TypeKind::Enum => {
                self.symbols.ty_mut(existing).declarations.push(decl);
                let object = self.symbols.ty(existing).associated.unwrap_or(TypeId::EMPTY_OBJECT);
                (existing, object)
            }
            _ => {
                let ty = self.new_type(TypeKind::Enum, enum_data.name, decl);
                let object = self.new_type(TypeKind::ObjectType, enum_data.name, decl);
                let value = self.new_value(ValueKind::Enum, enum_data.name, decl);
                self.symbols.value_mut(value).ty = Some(object);
                self.symbols.value_mut(value).state = ResolutionState::Resolved;
                {
                    let symbols = &mut self.symbols;
                    symbols.ty_mut(ty).associated = Some(object);
                    symbols.ty_mut(ty).value = Some(value);
                    symbols.ty_mut(object).value = Some(value);
                    symbols.ty_mut(object).state = ResolutionState::Resolved;
                    symbols.ty_mut(object).base_state = ResolutionState::Resolved;
                }
                self.locals.entry(key).or_insert(SymbolRef::Type(ty));
                self.locals
                    .entry((ctx.scope, enum_data.name, Space::Value))
                    .or_insert(SymbolRef::Value(value));
                self.export_value(ctx, decl, value);
                (ty, object)
            }
        };
        self.set_symbol(decl, SymbolRef::Type(ty));

        for member in enum_data.members.iter() {
            let Some(NodeData::EnumMember(data)) = arena.data(member) else {
                continue;
            };
            let member_decl =
                self.declare(DeclKind::EnumMember, data.name, DeclFlags::empty(), member, Some(decl));
            let value = self.new_value(ValueKind::EnumMember, data.name, member_decl);
            self.symbols.value_mut(value).ty = Some(ty);
            self.symbols.value_mut(value).container = Some(object);
            self.symbols.ty_mut(object).members.insert(data.name, value);
            self.set_symbol(member_decl, SymbolRef::Value(value));
            self.bind_node(arena, data.initializer, ctx.child(member_decl));
        }
    }

    // =========================================================================
    // Values
    // =========================================================================

    fn bind_variable(&mut self, arena: &NodeArena, idx: NodeIndex, variable: &VariableData, ctx: BindContext) {
        let flags = Self::decl_flags(variable.modifiers, ctx);
        let decl = self.declare(DeclKind::Variable, variable.name, flags, idx, Some(ctx.parent));

        let key = (ctx.scope, variable.name, Space::Value);
        let value = match self.locals.get(&key).copied() {
            Some(SymbolRef::Value(existing))
                if self.symbols.value(existing).kind == ValueKind::Variable =>
            {
                self.symbols.value_mut(existing).declarations.push(decl);
                existing
            }
            _ => {
                let value = self.new_value(ValueKind::Variable, variable.name, decl);
                self.locals.entry(key).or_insert(SymbolRef::Value(value));
                value
            }
        };
        self.set_symbol(decl, SymbolRef::Value(value));
        self.export_value(ctx, decl, value);

        self.bind_node(arena, variable.type_annotation, ctx.child(decl));
        self.bind_node(arena, variable.initializer, ctx.child(decl));
    }

    fn bind_function_declaration(
        &mut self,
        arena: &NodeArena,
        idx: NodeIndex,
        function: &FunctionData,
        ctx: BindContext,
    ) {
        let mut flags = Self::decl_flags(function.modifiers, ctx);
        if function.body.is_some() {
            flags |= DeclFlags::HAS_BODY;
        }
        let decl = self.declare(DeclKind::Function, function.name, flags, idx, Some(ctx.parent));

        let key = (ctx.scope, function.name, Space::Value);
        let (value, object) = match self.locals.get(&key).copied() {
            Some(SymbolRef::Value(existing))
                if self.symbols.value(existing).kind == ValueKind::Function =>
            {
                self.symbols.value_mut(existing).declarations.push(decl);
                let object = self.symbols.value(existing).ty.unwrap_or(TypeId::EMPTY_OBJECT);
                self.symbols.ty_mut(object).declarations.push(decl);
                (existing, object)
            }
            _ => {
                let value = self.new_value(ValueKind::Function, function.name, decl);
                let object = self.new_type(TypeKind::ObjectType, Atom::NONE, decl);
                self.symbols.value_mut(value).ty = Some(object);
                self.symbols.ty_mut(object).value = Some(value);
                self.locals.entry(key).or_insert(SymbolRef::Value(value));
                self.export_value(ctx, decl, value);
                (value, object)
            }
        };
        self.set_symbol(decl, SymbolRef::Value(value));

        let signature = self.bind_signature(
            arena,
            decl,
            SignatureKind::Call,
            &function.type_parameters,
            &function.parameters,
            function.return_type,
            function.body.is_some(),
            ctx,
        );
        self.symbols.ty_mut(object).call_signatures.push(signature);
        self.bind_node(arena, function.body, ctx.nested(decl));
    }

    fn bind_function_expression(
        &mut self,
        arena: &NodeArena,
        idx: NodeIndex,
        function: &FunctionData,
        ctx: BindContext,
    ) {
        let decl = self.declare(
            DeclKind::FunctionExpression,
            function.name,
            DeclFlags::HAS_BODY,
            idx,
            Some(ctx.parent),
        );
        let object = self.new_type(TypeKind::ObjectType, Atom::NONE, decl);
        self.set_symbol(decl, SymbolRef::Type(object));
        let signature = self.bind_signature(
            arena,
            decl,
            SignatureKind::Call,
            &function.type_parameters,
            &function.parameters,
            function.return_type,
            true,
            ctx,
        );
        self.symbols.ty_mut(object).call_signatures.push(signature);
        self.bind_node(arena, function.body, ctx.nested(decl));
    }

    fn bind_function_type(
        &mut self,
        arena: &NodeArena,
        idx: NodeIndex,
        signature: &SignatureData,
        ctx: BindContext,
    ) {
        let is_constructor = signature.kind == tyre_syntax::SignatureKind::ConstructorType;
        let kind = if is_constructor {
            DeclKind::ConstructorType
        } else {
            DeclKind::FunctionType
        };
        let decl = self.declare(kind, Atom::NONE, DeclFlags::empty(), idx, Some(ctx.parent));
        let object = self.new_type(TypeKind::ObjectType, Atom::NONE, decl);
        self.set_symbol(decl, SymbolRef::Type(object));
        let sig_kind = if is_constructor {
            SignatureKind::Construct
        } else {
            SignatureKind::Call
        };
        let sig = self.bind_signature(
            arena,
            decl,
            sig_kind,
            &signature.type_parameters,
            &signature.parameters,
            signature.return_type,
            false,
            ctx,
        );
        let object_symbol = self.symbols.ty_mut(object);
        if is_constructor {
            object_symbol.construct_signatures.push(sig);
        } else {
            object_symbol.call_signatures.push(sig);
        }
    }

    // =========================================================================
    // Class members
    // =========================================================================

    /// Find or create the method value `name` on `owner`.
    fn method_value(&mut self, owner: TypeId, name: Atom, decl: DeclId) -> (ValueId, TypeId) {
        if let Some(existing) = self.symbols.ty(owner).members.get(name)
            && self.symbols.value(existing).kind == ValueKind::Method
            && let Some(object) = self.symbols.value(existing).ty
        {
            self.symbols.value_mut(existing).declarations.push(decl);
            self.symbols.ty_mut(object).declarations.push(decl);
            return (existing, object);
        }
        let value = self.new_value(ValueKind::Method, name, decl);
        let object = self.new_type(TypeKind::ObjectType, Atom::NONE, decl);
        self.symbols.value_mut(value).ty = Some(object);
        self.symbols.value_mut(value).container = Some(owner);
        self.symbols.ty_mut(object).value = Some(value);
        self.symbols.ty_mut(owner).members.insert(name, value);
        (value, object)
    }

    fn bind_method(
        &mut self,
        arena: &NodeArena,
        idx: NodeIndex,
        function: &FunctionData,
        owner: TypeId,
        ctx: BindContext,
    ) {
        let mut flags = Self::decl_flags(function.modifiers, ctx);
        if function.body.is_some() {
            flags |= DeclFlags::HAS_BODY;
        }
        let decl = self.declare(DeclKind::Method, function.name, flags, idx, Some(ctx.parent));
        let (value, object) = self.method_value(owner, function.name, decl);
        self.set_symbol(decl, SymbolRef::Value(value));

        let signature = self.bind_signature(
            arena,
            decl,
            SignatureKind::Call,
            &function.type_parameters,
            &function.parameters,
            function.return_type,
            function.body.is_some(),
            ctx,
        );
        self.symbols.ty_mut(object).call_signatures.push(signature);
        self.bind_node(arena, function.body, ctx.nested(decl));
    }

    fn bind_constructor(
        &mut self,
        arena: &NodeArena,
        idx: NodeIndex,
        function: &FunctionData,
        instance: TypeId,
        constructor: TypeId,
        ctx: BindContext,
    ) {
        let mut flags = Self::decl_flags(function.modifiers, ctx);
        if function.body.is_some() {
            flags |= DeclFlags::HAS_BODY;
        }
        let decl = self.declare(DeclKind::Constructor, Atom::NONE, flags, idx, Some(ctx.parent));
        let class_type_parameters = self.symbols.ty(instance).type_parameters.clone();

        let signature = self.bind_signature(
            arena,
            decl,
            SignatureKind::Construct,
            &NodeList::new(),
            &function.parameters,
            NodeIndex::NONE,
            function.body.is_some(),
            ctx,
        );
        {
            let sig = self.symbols.signature_mut(signature);
            sig.type_parameters = class_type_parameters;
            sig.return_type = Some(instance);
        }
        self.symbols.ty_mut(constructor).construct_signatures.push(signature);
        self.set_symbol(decl, SymbolRef::Signature(signature));

        // Parameter properties.
        let parameters = self.symbols.signature(signature).parameters.clone();
        for parameter in parameters {
            let Some(param_decl) = self.symbols.value(parameter).first_declaration() else {
                continue;
            };
            let param_flags = self.declarations.get(param_decl).flags;
            if !param_flags.intersects(DeclFlags::PUBLIC | DeclFlags::PRIVATE) {
                continue;
            }
            let name = self.symbols.value(parameter).name;
            let property = self.new_value(ValueKind::Property, name, param_decl);
            self.symbols.value_mut(property).container = Some(instance);
            self.symbols.ty_mut(instance).members.insert(name, property);
        }

        self.bind_node(arena, function.body, ctx.nested(decl));
    }

    // =========================================================================
    // Type members
    // =========================================================================

    fn bind_type_members(
        &mut self,
        arena: &NodeArena,
        owner: TypeId,
        owner_decl: DeclId,
        members: &NodeList,
        ctx: BindContext,
    ) {
        for member in members.iter() {
            self.bind_type_member(arena, member, owner, owner_decl, ctx);
        }
    }

    fn bind_type_member(
        &mut self,
        arena: &NodeArena,
        member: NodeIndex,
        owner: TypeId,
        owner_decl: DeclId,
        ctx: BindContext,
    ) {
        let Some(data) = arena.data(member) else {
            return;
        };
        match data {
            NodeData::PropertySignature(property) => {
                let flags = if property.optional {
                    DeclFlags::OPTIONAL
                } else {
                    DeclFlags::empty()
                };
                let decl = self.declare(
                    DeclKind::PropertySignature,
                    property.name,
                    flags,
                    member,
                    Some(owner_decl),
                );
                let value = self.new_value(ValueKind::Property, property.name, decl);
                self.symbols.value_mut(value).container = Some(owner);
                self.symbols.ty_mut(owner).members.insert(property.name, value);
                self.set_symbol(decl, SymbolRef::Value(value));
                self.bind_node(arena, property.type_annotation, ctx.child(decl));
            }
            NodeData::Signature(signature) => {
                let (kind, sig_kind) = match signature.kind {
                    tyre_syntax::SignatureKind::Method => (DeclKind::MethodSignature, SignatureKind::Call),
                    tyre_syntax::SignatureKind::Call => (DeclKind::CallSignature, SignatureKind::Call),
                    tyre_syntax::SignatureKind::Construct => {
                        (DeclKind::ConstructSignature, SignatureKind::Construct)
                    }
                    tyre_syntax::SignatureKind::FunctionType
                    | tyre_syntax::SignatureKind::ConstructorType => {
                        self.bind_node(arena, member, ctx);
                        return;
                    }
                };
                let flags = if signature.optional {
                    DeclFlags::OPTIONAL
                } else {
                    DeclFlags::empty()
                };
                let decl = self.declare(kind, signature.name, flags, member, Some(owner_decl));
                let sig = self.bind_signature(
                    arena,
                    decl,
                    sig_kind,
                    &signature.type_parameters,
                    &signature.parameters,
                    signature.return_type,
                    false,
                    ctx,
                );
                match kind {
                    DeclKind::MethodSignature => {
                        let (value, object) = self.method_value(owner, signature.name, decl);
                        self.symbols.ty_mut(object).call_signatures.push(sig);
                        self.set_symbol(decl, SymbolRef::Value(value));
                    }
                    DeclKind::CallSignature => {
                        self.symbols.ty_mut(owner).call_signatures.push(sig);
                        self.set_symbol(decl, SymbolRef::Signature(sig));
                    }
                    _ => {
                        self.symbols.ty_mut(owner).construct_signatures.push(sig);
                        self.set_symbol(decl, SymbolRef::Signature(sig));
                    }
                }
            }
            NodeData::IndexSignature(index) => {
                let decl = self.declare(
                    DeclKind::IndexSignature,
                    Atom::NONE,
                    DeclFlags::empty(),
                    member,
                    Some(owner_decl),
                );
                let sig = self.bind_signature(
                    arena,
                    decl,
                    SignatureKind::Index,
                    &NodeList::new(),
                    &NodeList::of(&[index.parameter]),
                    index.return_type,
                    false,
                    ctx,
                );
                self.symbols.ty_mut(owner).index_signatures.push(sig);
                self.set_symbol(decl, SymbolRef::Signature(sig));
            }
            _ => self.bind_node(arena, member, ctx),
        }
    }

    // =========================================================================
    // Signatures and parameters
    // =========================================================================

    /// Type parameters declared under `owner`. Positions already covered by
    /// `existing` (merged interface declarations) reuse those symbols.
    fn bind_type_parameters(
        &mut self,
        arena: &NodeArena,
        owner: DeclId,
        list: &NodeList,
        existing: &[TypeId],
        ctx: BindContext,
    ) -> Vec<TypeId> {
        let mut out = Vec::with_capacity(list.len());
        for (position, idx) in list.iter().enumerate() {
            let Some(NodeData::TypeParameter(data)) = arena.data(idx) else {
                continue;
            };
            let decl = self.declare(DeclKind::TypeParameter, data.name, DeclFlags::empty(), idx, Some(owner));
            let ty = match existing.get(position) {
                Some(&reused) if self.symbols.ty(reused).name == data.name => {
                    self.symbols.ty_mut(reused).declarations.push(decl);
                    reused
                }
                _ => self.new_type(TypeKind::TypeParameter, data.name, decl),
            };
            self.set_symbol(decl, SymbolRef::Type(ty));
            self.bind_node(arena, data.constraint, ctx.child(decl));
            out.push(ty);
        }
        out
    }

    fn bind_signature(
        &mut self,
        arena: &NodeArena,
        decl: DeclId,
        kind: SignatureKind,
        type_parameters: &NodeList,
        parameters: &NodeList,
        return_type: NodeIndex,
        is_definition: bool,
        ctx: BindContext,
    ) -> SignatureId {
        let inner = ctx.nested(decl);
        let type_parameters = self.bind_type_parameters(arena, decl, type_parameters, &[], inner);

        let mut params = Vec::with_capacity(parameters.len());
        for idx in parameters.iter() {
            let Some(NodeData::Parameter(data)) = arena.data(idx) else {
                continue;
            };
            let mut flags = Self::decl_flags(data.modifiers, ctx);
            if data.optional || data.initializer.is_some() {
                flags |= DeclFlags::OPTIONAL;
            }
            if data.rest {
                flags |= DeclFlags::REST;
            }
            if data.modifiers.intersects(Modifiers::PUBLIC | Modifiers::PRIVATE) {
                flags |= DeclFlags::PROPERTY_PARAMETER;
            }
            let param_decl = self.declare(DeclKind::Parameter, data.name, flags, idx, Some(decl));
            let value = self.new_value(ValueKind::Parameter, data.name, param_decl);
            self.locals
                .entry((inner.scope, data.name, Space::Value))
                .or_insert(SymbolRef::Value(value));
            self.set_symbol(param_decl, SymbolRef::Value(value));
            self.bind_node(arena, data.type_annotation, inner.child(param_decl));
            self.bind_node(arena, data.initializer, inner);
            params.push(value);
        }
        self.bind_node(arena, return_type, inner);

        let mut symbol = SignatureSymbol::new(kind);
        symbol.declarations.push(decl);
        symbol.parameters = params;
        symbol.type_parameters = type_parameters;
        symbol.is_definition = is_definition;
        let signature = self.symbols.add_signature(symbol);
        self.declarations.get_mut(decl).signature = Some(signature);
        trace!(decl = decl.0, signature = signature.0, "bound signature");
        signature
    }
}
