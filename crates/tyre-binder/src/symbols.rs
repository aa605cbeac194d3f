//! Symbol and signature model.
//!
//! Three arenas of symbols addressed by dense ids:
//! - `TypeSymbol` (`TypeId`): primitives, classes, interfaces, object types,
//!   arrays, enums, type parameters, aliases, module containers and error types
//! - `ValueSymbol` (`ValueId`): variables, functions, parameters, properties,
//!   enum members, class and enum constructor values, modules
//! - `SignatureSymbol` (`SignatureId`): call, construct and index signatures
//!
//! The binder creates the skeletons. The checker fills in types and moves the
//! `state` fields forward; nothing is ever removed.

use crate::declarations::DeclId;
use bitflags::bitflags;
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use smallvec::SmallVec;
use tyre_common::Atom;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

// =============================================================================
// Ids
// =============================================================================

/// Handle to a type symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const ANY: TypeId = TypeId(0);
    pub const NUMBER: TypeId = TypeId(1);
    pub const STRING: TypeId = TypeId(2);
    pub const BOOLEAN: TypeId = TypeId(3);
    pub const VOID: TypeId = TypeId(4);
    pub const NULL: TypeId = TypeId(5);
    pub const UNDEFINED: TypeId = TypeId(6);
    /// The anonymous error type.
    pub const ERROR: TypeId = TypeId(7);
    /// `{}`
    pub const EMPTY_OBJECT: TypeId = TypeId(8);

    /// First id handed out by `SymbolArena::add_type`.
    pub const FIRST_USER: u32 = 9;

    #[inline]
    #[must_use]
    pub const fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignatureId(pub u32);

/// The symbol a declaration binds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolRef {
    Type(TypeId),
    Value(ValueId),
    Signature(SignatureId),
}

// =============================================================================
// States and flags
// =============================================================================

/// Resolution progress. Transitions are monotonic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResolutionState {
    #[default]
    Unresolved,
    InResolution,
    Resolved,
}

impl ResolutionState {
    #[inline]
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Resolved)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SymbolFlags: u32 {
        const EXPORTED = 1 << 0;
        const STATIC = 1 << 1;
        const PRIVATE = 1 << 2;
        const PUBLIC = 1 << 3;
        const OPTIONAL = 1 << 4;
        /// Rest parameter.
        const VARARG = 1 << 5;
        const AMBIENT = 1 << 6;
        /// Constructor parameter that also declares an instance property.
        const PROPERTY_PARAMETER = 1 << 7;
        /// The base-type chain of this type reaches itself.
        const BASE_CYCLE = 1 << 8;
        /// The alias target reaches this alias again.
        const ALIAS_CYCLE = 1 << 9;
        /// Base members still have to be copied in by the deferred pass.
        const INHERITANCE_PENDING = 1 << 10;
        /// The type of this value was inferred (no annotation).
        const INFERRED = 1 << 11;
    }
}

// =============================================================================
// Type symbols
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Any,
    Number,
    String,
    Boolean,
    Void,
    Null,
    Undefined,
}

impl PrimitiveKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Void => "void",
            Self::Null => "null",
            Self::Undefined => "undefined",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive(PrimitiveKind),
    /// The instance side of a class.
    Class,
    Interface,
    /// Anonymous structural type: type literals, function types, object
    /// literals, function objects and enum objects.
    ObjectType,
    /// The static side of a class (`typeof A`).
    ConstructorType,
    Array { element: TypeId },
    Enum,
    TypeParameter,
    /// Non-generic type alias; transparent once its target is resolved.
    Alias,
    /// The value-space side of a module (`typeof M`).
    Container,
    /// An unresolvable reference. `Atom::NONE` for the anonymous error type.
    Error { name: Atom },
}

impl TypeKind {
    /// Kinds that carry members and signatures.
    #[must_use]
    pub const fn is_object_like(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::ObjectType | Self::ConstructorType | Self::Container
        )
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// The substitution that produced a specialized type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Specialization {
    /// The unspecialized generic (or type-parameter-mentioning) type.
    pub root: TypeId,
    /// Type arguments in the root's type-parameter order. Empty for anonymous
    /// types instantiated by an outer substitution.
    pub arguments: Vec<TypeId>,
    /// `(type parameter, argument)` pairs applied to the root.
    pub mapping: SmallVec<[(TypeId, TypeId); 4]>,
}

/// Named members of a type. Lookup is by name; on duplicates the first
/// inserted symbol wins.
#[derive(Clone, Debug, Default)]
pub struct MemberTable {
    entries: FxIndexMap<Atom, ValueId>,
}

impl MemberTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless `name` is already present. Returns whether it was added.
    pub fn insert(&mut self, name: Atom, value: ValueId) -> bool {
        if self.entries.contains_key(&name) {
            return false;
        }
        self.entries.insert(name, value);
        true
    }

    #[must_use]
    pub fn get(&self, name: Atom) -> Option<ValueId> {
        self.entries.get(&name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: Atom) -> bool {
        self.entries.contains_key(&name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Atom, ValueId)> + '_ {
        self.entries.iter().map(|(&name, &value)| (name, value))
    }

    pub fn values(&self) -> impl Iterator<Item = ValueId> + '_ {
        self.entries.values().copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Clone, Debug)]
pub struct TypeSymbol {
    pub kind: TypeKind,
    pub name: Atom,
    pub flags: SymbolFlags,
    pub declarations: SmallVec<[DeclId; 2]>,
    pub state: ResolutionState,
    /// Progress of `extends`/`implements` resolution.
    pub base_state: ResolutionState,
    pub members: MemberTable,
    pub call_signatures: Vec<SignatureId>,
    pub construct_signatures: Vec<SignatureId>,
    pub index_signatures: Vec<SignatureId>,
    pub extends: Vec<TypeId>,
    pub implements: Vec<TypeId>,
    pub type_parameters: Vec<TypeId>,
    pub specialization: Option<Specialization>,
    /// Type parameters only.
    pub constraint: Option<TypeId>,
    /// Aliases only.
    pub alias_target: Option<TypeId>,
    /// Class instance type <-> class constructor type.
    pub associated: Option<TypeId>,
    /// The value whose type this is (class constructor, enum object, module).
    pub value: Option<ValueId>,
}

impl TypeSymbol {
    #[must_use]
    pub fn new(kind: TypeKind, name: Atom) -> Self {
        Self {
            kind,
            name,
            flags: SymbolFlags::empty(),
            declarations: SmallVec::new(),
            state: ResolutionState::Unresolved,
            base_state: ResolutionState::Unresolved,
            members: MemberTable::new(),
            call_signatures: Vec::new(),
            construct_signatures: Vec::new(),
            index_signatures: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            type_parameters: Vec::new(),
            specialization: None,
            constraint: None,
            alias_target: None,
            associated: None,
            value: None,
        }
    }

    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.type_parameters.is_empty()
    }

    /// The generic type this one was specialized from, or itself.
    #[must_use]
    pub fn root(&self, own: TypeId) -> TypeId {
        self.specialization.as_ref().map_or(own, |spec| spec.root)
    }
}

// =============================================================================
// Value symbols
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Variable,
    Function,
    Parameter,
    Property,
    Method,
    EnumMember,
    /// The constructor function of a class.
    Class,
    /// The runtime object of an enum.
    Enum,
    Module,
}

#[derive(Clone, Debug)]
pub struct ValueSymbol {
    pub kind: ValueKind,
    pub name: Atom,
    pub flags: SymbolFlags,
    pub declarations: SmallVec<[DeclId; 2]>,
    pub state: ResolutionState,
    pub ty: Option<TypeId>,
    /// The type whose member table holds this value.
    pub container: Option<TypeId>,
}

impl ValueSymbol {
    #[must_use]
    pub fn new(kind: ValueKind, name: Atom) -> Self {
        Self {
            kind,
            name,
            flags: SymbolFlags::empty(),
            declarations: SmallVec::new(),
            state: ResolutionState::Unresolved,
            ty: None,
            container: None,
        }
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.flags.contains(SymbolFlags::OPTIONAL)
    }

    #[must_use]
    pub fn is_private(&self) -> bool {
        self.flags.contains(SymbolFlags::PRIVATE)
    }

    #[must_use]
    pub fn first_declaration(&self) -> Option<DeclId> {
        self.declarations.first().copied()
    }
}

// =============================================================================
// Signatures
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignatureKind {
    Call,
    Construct,
    Index,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureSpecialization {
    pub root: SignatureId,
    pub mapping: SmallVec<[(TypeId, TypeId); 4]>,
}

#[derive(Clone, Debug)]
pub struct SignatureSymbol {
    pub kind: SignatureKind,
    pub declarations: SmallVec<[DeclId; 1]>,
    pub state: ResolutionState,
    pub parameters: Vec<ValueId>,
    pub return_type: Option<TypeId>,
    pub type_parameters: Vec<TypeId>,
    /// The implementation signature, as opposed to an overload declaration.
    pub is_definition: bool,
    pub specialization: Option<SignatureSpecialization>,
}

impl SignatureSymbol {
    #[must_use]
    pub fn new(kind: SignatureKind) -> Self {
        Self {
            kind,
            declarations: SmallVec::new(),
            state: ResolutionState::Unresolved,
            parameters: Vec::new(),
            return_type: None,
            type_parameters: Vec::new(),
            is_definition: false,
            specialization: None,
        }
    }

    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.type_parameters.is_empty()
    }
}

// =============================================================================
// Arena
// =============================================================================

/// Owner of every symbol.
#[derive(Clone, Debug)]
pub struct SymbolArena {
    types: Vec<TypeSymbol>,
    values: Vec<ValueSymbol>,
    signatures: Vec<SignatureSymbol>,
    arrays: FxHashMap<TypeId, TypeId>,
    errors: FxHashMap<Atom, TypeId>,
}

impl Default for SymbolArena {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolArena {
    /// An arena holding only the intrinsic types.
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Self {
            types: Vec::with_capacity(64),
            values: Vec::new(),
            signatures: Vec::new(),
            arrays: FxHashMap::default(),
            errors: FxHashMap::default(),
        };
        let intrinsics = [
            TypeKind::Primitive(PrimitiveKind::Any),
            TypeKind::Primitive(PrimitiveKind::Number),
            TypeKind::Primitive(PrimitiveKind::String),
            TypeKind::Primitive(PrimitiveKind::Boolean),
            TypeKind::Primitive(PrimitiveKind::Void),
            TypeKind::Primitive(PrimitiveKind::Null),
            TypeKind::Primitive(PrimitiveKind::Undefined),
            TypeKind::Error { name: Atom::NONE },
            TypeKind::ObjectType,
        ];
        for kind in intrinsics {
            let mut symbol = TypeSymbol::new(kind, Atom::NONE);
            symbol.state = ResolutionState::Resolved;
            symbol.base_state = ResolutionState::Resolved;
            arena.types.push(symbol);
        }
        arena.errors.insert(Atom::NONE, TypeId::ERROR);
        arena
    }

    pub fn add_type(&mut self, symbol: TypeSymbol) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(symbol);
        id
    }

    pub fn add_value(&mut self, symbol: ValueSymbol) -> ValueId {
        let id = ValueId(self.values.len() as u32);
        self.values.push(symbol);
        id
    }

    pub fn add_signature(&mut self, symbol: SignatureSymbol) -> SignatureId {
        let id = SignatureId(self.signatures.len() as u32);
        self.signatures.push(symbol);
        id
    }

    /// # Panics
    ///
    /// Panics on an id from another arena.
    #[inline]
    #[must_use]
    pub fn ty(&self, id: TypeId) -> &TypeSymbol {
        &self.types[id.0 as usize]
    }

    #[inline]
    pub fn ty_mut(&mut self, id: TypeId) -> &mut TypeSymbol {
        &mut self.types[id.0 as usize]
    }

    #[inline]
    #[must_use]
    pub fn value(&self, id: ValueId) -> &ValueSymbol {
        &self.values[id.0 as usize]
    }

    #[inline]
    pub fn value_mut(&mut self, id: ValueId) -> &mut ValueSymbol {
        &mut self.values[id.0 as usize]
    }

    #[inline]
    #[must_use]
    pub fn signature(&self, id: SignatureId) -> &SignatureSymbol {
        &self.signatures[id.0 as usize]
    }

    #[inline]
    pub fn signature_mut(&mut self, id: SignatureId) -> &mut SignatureSymbol {
        &mut self.signatures[id.0 as usize]
    }

    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }

    /// The array type of `element`; one instance per element type.
    pub fn array_of(&mut self, element: TypeId) -> TypeId {
        if let Some(&id) = self.arrays.get(&element) {
            return id;
        }
        let mut symbol = TypeSymbol::new(TypeKind::Array { element }, Atom::NONE);
        symbol.state = ResolutionState::Resolved;
        symbol.base_state = ResolutionState::Resolved;
        let id = self.add_type(symbol);
        self.arrays.insert(element, id);
        id
    }

    /// The error type for an unresolvable `name`; one instance per name.
    pub fn error_type(&mut self, name: Atom) -> TypeId {
        if let Some(&id) = self.errors.get(&name) {
            return id;
        }
        let mut symbol = TypeSymbol::new(TypeKind::Error { name }, name);
        symbol.state = ResolutionState::Resolved;
        symbol.base_state = ResolutionState::Resolved;
        let id = self.add_type(symbol);
        self.errors.insert(name, id);
        id
    }

    #[must_use]
    pub fn kind(&self, id: TypeId) -> TypeKind {
        self.ty(id).kind
    }

    #[must_use]
    pub fn is_error(&self, id: TypeId) -> bool {
        self.ty(id).kind.is_error()
    }

    #[must_use]
    pub fn array_element(&self, id: TypeId) -> Option<TypeId> {
        match self.ty(id).kind {
            TypeKind::Array { element } => Some(element),
            _ => None,
        }
    }

    /// Whether the last parameter of `sig` is a rest parameter.
    #[must_use]
    pub fn has_varargs(&self, sig: SignatureId) -> bool {
        self.signature(sig)
            .parameters
            .last()
            .is_some_and(|&p| self.value(p).flags.contains(SymbolFlags::VARARG))
    }

    /// Parameters that are neither optional nor rest.
    #[must_use]
    pub fn required_parameter_count(&self, sig: SignatureId) -> usize {
        self.signature(sig)
            .parameters
            .iter()
            .filter(|&&p| {
                !self
                    .value(p)
                    .flags
                    .intersects(SymbolFlags::OPTIONAL | SymbolFlags::VARARG)
            })
            .count()
    }

    /// Whether a call with `count` arguments can match `sig` by arity.
    #[must_use]
    pub fn accepts_argument_count(&self, sig: SignatureId, count: usize) -> bool {
        if count < self.required_parameter_count(sig) {
            return false;
        }
        self.has_varargs(sig) || count <= self.signature(sig).parameters.len()
    }
}
